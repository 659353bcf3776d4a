//! Built-in template set
//!
//! Seeded into an empty store on first access. Seeding never overwrites
//! existing data.

use contract_model::{Clause, Template};

/// The default template set: a standard employment contract and a
/// shorter executive variant.
pub fn default_templates() -> Vec<Template> {
    vec![standard_employment(), executive()]
}

fn standard_employment() -> Template {
    Template {
        id: "default".to_string(),
        name: "Standard Employment Contract".to_string(),
        clauses: vec![
            Clause {
                id: "clause_1".to_string(),
                title: "EMPLOYMENT CONTRACT AND PERIOD".to_string(),
                content: String::new(),
                subclauses: vec![
                    untitled(
                        "clause_1_1",
                        "We would like to take this opportunity to welcome you to the Company \
                         and confirm your employment with effect from {{startDate}} in the \
                         position of \"{{position}}\". This letter sets out the terms and \
                         conditions of your employment.",
                    ),
                    untitled(
                        "clause_1_2",
                        "The Company may in its absolute discretion and from time to time \
                         require you to perform duties which may fall outside of your job \
                         title and/or job description.",
                    ),
                    untitled(
                        "clause_1_3",
                        "Initially you will be located at {{location}}. Your services will be \
                         transferable to any of our current and future establishments in India \
                         or Global at the sole discretion of the Management.",
                    ),
                ],
            },
            Clause {
                id: "clause_2".to_string(),
                title: "EFFECTIVE DATE".to_string(),
                content: String::new(),
                subclauses: vec![
                    untitled(
                        "clause_2_1",
                        "The effective date of this contract is the date of signature hereof, \
                         however should you have been employed by the Company prior to the \
                         effective date and continue to remain in the employ of the Company \
                         immediately preceding the effective date then the applicability of \
                         the time periods for calculation of your holiday leave, will be \
                         calculated in accordance with the date you commenced your employment \
                         with the Company in terms of clause 1.1. above.",
                    ),
                    untitled(
                        "clause_2_2",
                        "For you first {{probationPeriod}} months of employment will be \
                         probation period. Based on your overall performance for this period \
                         you will be eligible to get confirmed employment.",
                    ),
                ],
            },
        ],
    }
}

fn executive() -> Template {
    Template {
        id: "executive".to_string(),
        name: "Executive Contract".to_string(),
        clauses: vec![Clause {
            id: "exec_clause_1".to_string(),
            title: "APPOINTMENT AND DUTIES".to_string(),
            content: String::new(),
            subclauses: vec![untitled(
                "exec_clause_1_1",
                "The Company hereby appoints you as {{position}} effective {{startDate}}.",
            )],
        }],
    }
}

fn untitled(id: &str, content: &str) -> Clause {
    Clause {
        id: id.to_string(),
        title: String::new(),
        content: content.to_string(),
        subclauses: Vec::new(),
    }
}
