//! Employment contract generator CLI
//!
//! The thin surface over the core crates:
//! - template management (list, show, add, rename, delete)
//! - clause editing on a working copy, saved explicitly
//! - contract generation into a PDF file

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use contract_model::{
    ClausePatch, ClauseTree, Direction, GenerationInput, ProbationPeriod, Template,
};
use contract_render::{render_contract, PageGeometry};
use contract_store::{JsonFileStore, TemplateStore};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "contract", version, about = "Employment contract templates and generation")]
struct Cli {
    /// Path of the template store file
    #[arg(
        long,
        global = true,
        env = "CONTRACT_STORE",
        default_value = "contract-templates.json"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage stored templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Edit a template's clause tree
    #[command(subcommand)]
    Clause(ClauseCommand),
    /// Generate a contract PDF from employee details
    Generate(GenerateArgs),
}

#[derive(Subcommand)]
enum TemplatesCommand {
    /// List stored templates
    List,
    /// Print a template's numbered clause outline
    Show { id: String },
    /// Create a new empty template
    Add { id: String, name: String },
    /// Rename a template
    Rename { id: String, name: String },
    /// Delete a template
    Delete { id: String },
}

#[derive(Subcommand)]
enum ClauseCommand {
    /// Append a new top-level clause
    Add { template: String },
    /// Append a new sub-clause under a parent clause
    AddSub { template: String, parent: String },
    /// Update a clause's title and/or content
    Set {
        template: String,
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a clause and its entire subtree
    Remove { template: String, id: String },
    /// Move a clause within its sibling sequence
    Move {
        template: String,
        id: String,
        direction: MoveDirection,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    employee_name: String,
    #[arg(long)]
    position: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: NaiveDate,
    #[arg(long, default_value = "Ahmedabad, Gujarat")]
    location: String,
    #[arg(long)]
    salary: Option<String>,
    /// Probation period in months
    #[arg(long, default_value = "3", value_parser = parse_probation)]
    probation: ProbationPeriod,
    #[arg(long, default_value = "default")]
    template: String,
    /// Output path; defaults to the employee-derived filename
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_probation(value: &str) -> Result<ProbationPeriod, String> {
    value.parse().map_err(|err: contract_model::ParseProbationError| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.store);

    match cli.command {
        Command::Templates(command) => templates(&store, command).await,
        Command::Clause(command) => clause(&store, command).await,
        Command::Generate(args) => generate(&store, args).await,
    }
}

async fn templates(store: &JsonFileStore, command: TemplatesCommand) -> Result<()> {
    match command {
        TemplatesCommand::List => {
            for template in store.list().await? {
                println!(
                    "{}\t{}\t{} clause(s)",
                    template.id,
                    template.name,
                    template.clauses.len()
                );
            }
        }
        TemplatesCommand::Show { id } => {
            let template = fetch(store, &id).await?;
            println!("{} ({})", template.name, template.id);
            let tree = ClauseTree::from_clauses(&template.clauses);
            for entry in tree.outline() {
                let indent = "  ".repeat(entry.depth);
                println!("{indent}{}. {}", entry.number, entry.title);
            }
        }
        TemplatesCommand::Add { id, name } => {
            if store.get(&id).await?.is_some() {
                bail!("template {id:?} already exists");
            }
            store
                .save(&Template {
                    id: id.clone(),
                    name,
                    clauses: Vec::new(),
                })
                .await?;
            println!("created template {id}");
        }
        TemplatesCommand::Rename { id, name } => {
            let mut template = fetch(store, &id).await?;
            template.name = name;
            store.save(&template).await?;
            println!("renamed template {id}");
        }
        TemplatesCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("deleted template {id}");
        }
    }
    Ok(())
}

async fn clause(store: &JsonFileStore, command: ClauseCommand) -> Result<()> {
    match command {
        ClauseCommand::Add { template } => {
            edit_tree(store, &template, |tree| {
                let id = tree.insert_top_level();
                println!("added clause {id}");
                true
            })
            .await
        }
        ClauseCommand::AddSub { template, parent } => {
            edit_tree(store, &template, |tree| match tree.insert_child(&parent) {
                Some(id) => {
                    println!("added sub-clause {id}");
                    true
                }
                None => {
                    println!("no clause with id {parent:?}; template unchanged");
                    false
                }
            })
            .await
        }
        ClauseCommand::Set {
            template,
            id,
            title,
            content,
        } => {
            edit_tree(store, &template, |tree| {
                if tree.update(&id, ClausePatch { title, content }) {
                    println!("updated clause {id}");
                    true
                } else {
                    println!("no clause with id {id:?}; template unchanged");
                    false
                }
            })
            .await
        }
        ClauseCommand::Remove { template, id } => {
            edit_tree(store, &template, |tree| {
                if tree.remove(&id) {
                    println!("removed clause {id}");
                    true
                } else {
                    println!("no clause with id {id:?}; template unchanged");
                    false
                }
            })
            .await
        }
        ClauseCommand::Move {
            template,
            id,
            direction,
        } => {
            edit_tree(store, &template, |tree| {
                if tree.move_clause(&id, direction.into()) {
                    println!("moved clause {id}");
                    true
                } else {
                    println!("clause {id:?} not moved (missing or at a boundary)");
                    false
                }
            })
            .await
        }
    }
}

/// Load a working copy of the template, apply one edit, and save only if
/// the edit changed anything.
async fn edit_tree(
    store: &JsonFileStore,
    template_id: &str,
    edit: impl FnOnce(&mut ClauseTree) -> bool,
) -> Result<()> {
    let mut template = fetch(store, template_id).await?;
    let mut tree = ClauseTree::from_clauses(&template.clauses);
    if edit(&mut tree) {
        template.clauses = tree.to_clauses();
        store.save(&template).await?;
    }
    Ok(())
}

async fn fetch(store: &JsonFileStore, id: &str) -> Result<Template> {
    store
        .get(id)
        .await?
        .with_context(|| format!("no template with id {id:?}"))
}

async fn generate(store: &JsonFileStore, args: GenerateArgs) -> Result<()> {
    let input = GenerationInput {
        employee_name: args.employee_name,
        position: args.position,
        start_date: args.start_date,
        location: args.location,
        salary: args.salary,
        probation_period: args.probation,
        template_id: args.template,
    };

    let rendered = render_contract(store, &input, &PageGeometry::default()).await?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&rendered.filename));
    write_atomic(&out, &rendered.bytes)
        .await
        .with_context(|| format!("writing {}", out.display()))?;

    info!(pages = rendered.page_count, path = %out.display(), "contract generated");
    println!("wrote {} ({} page(s))", out.display(), rendered.page_count);
    Ok(())
}

/// Write the finished document next to its destination and rename it
/// into place, so a failed write never leaves a partial file behind.
async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await
}
