//! Placeholder substitution
//!
//! The pure text transform applied to clause content at generation time.

use crate::input::GenerationInput;

/// Replace every `{{field}}` token in `text` with its value from the
/// input record.
///
/// The token set is fixed: `employeeName`, `position`, `startDate`
/// (rendered `DD/MM/YYYY`), `location`, `probationPeriod` and `salary`
/// (empty string when absent). Replacement is global: all occurrences of
/// a token are rewritten, not just the first. Tokens outside the set are
/// left in place verbatim; the set is not extensible at runtime.
pub fn substitute(text: &str, input: &GenerationInput) -> String {
    let start_date = input.formatted_start_date();
    let probation = input.probation_period.to_string();
    let replacements = [
        ("{{employeeName}}", input.employee_name.as_str()),
        ("{{position}}", input.position.as_str()),
        ("{{startDate}}", start_date.as_str()),
        ("{{location}}", input.location.as_str()),
        ("{{probationPeriod}}", probation.as_str()),
        ("{{salary}}", input.salary.as_deref().unwrap_or("")),
    ];

    let mut out = text.to_string();
    for (token, value) in replacements {
        out = out.replace(token, value);
    }
    out
}
