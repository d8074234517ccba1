//! Command-line argument definitions using clap.
//!
//! CLI argument structs carry the clap derives and convert into the core's
//! interface-agnostic parameter types, so help text and flag handling stay
//! out of the core crate.

use std::path::PathBuf;

use cadence_core::models::{TaskKind, TaskStatus};
use cadence_core::params::{
    CreateAdhocTask, CreatePlan, CreateTemplate, TemplateSelection, UpdatePlan, UpdateTemplate,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Weekly task-planning board.
///
/// Cadence turns recurring task templates into a weekly plan: daily and
/// weekly task instances are generated on a rolling schedule, roll over with
/// a one-day grace window, and expire at week boundaries. Running with no
/// subcommand shows the current board.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current board (default)
    #[command(alias = "b")]
    Board,
    /// Manage the weekly plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage recurring task templates
    #[command(aliases = ["t", "tpl"])]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Move a task between board columns
    #[command(alias = "k")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage one-off ad-hoc tasks
    #[command(alias = "a")]
    Adhoc {
        #[command(subcommand)]
        command: AdhocCommands,
    },
}

/// Board column a task can be moved to.
#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    Doing,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::Doing => TaskStatus::Doing,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

/// Parses a template selection of the form `ID:KIND:FREQUENCY`, e.g.
/// `3:daily:2`.
pub fn parse_selection(s: &str) -> Result<TemplateSelection, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [id, kind, frequency] = parts.as_slice() else {
        return Err(format!("expected ID:KIND:FREQUENCY, got '{s}'"));
    };
    let template_id = id
        .parse::<u64>()
        .map_err(|_| format!("invalid template id '{id}'"))?;
    let kind = match kind.to_lowercase().as_str() {
        "daily" | "d" => TaskKind::Daily,
        "weekly" | "w" => TaskKind::Weekly,
        other => return Err(format!("invalid kind '{other}' (daily or weekly)")),
    };
    let frequency = frequency
        .parse::<u32>()
        .map_err(|_| format!("invalid frequency '{frequency}'"))?;
    Ok(TemplateSelection {
        template_id,
        kind,
        frequency,
    })
}

/// Create this week's plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Template selections as ID:KIND:FREQUENCY (e.g. 3:daily:2); repeatable
    #[arg(short, long = "template", value_parser = parse_selection)]
    pub templates: Vec<TemplateSelection>,
    /// Optional free-text description for the week
    #[arg(short, long)]
    pub description: Option<String>,
    /// Existing ad-hoc task IDs to attach to the new plan; repeatable
    #[arg(short, long = "adhoc")]
    pub adhoc_task_ids: Vec<u64>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            templates: val.templates,
            description: val.description,
            adhoc_task_ids: val.adhoc_task_ids,
            ..Default::default()
        }
    }
}

/// Edit the plan
#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    /// ID of the plan to edit
    pub id: u64,
    /// Full replacement template selection as ID:KIND:FREQUENCY; repeatable.
    /// Omitting the flag leaves the selection unchanged
    #[arg(short, long = "template", value_parser = parse_selection)]
    pub templates: Vec<TemplateSelection>,
    /// New description for the week
    #[arg(short, long)]
    pub description: Option<String>,
    /// Full replacement set of attached ad-hoc task IDs; repeatable
    #[arg(short, long = "adhoc")]
    pub adhoc_task_ids: Vec<u64>,
    /// Detach all ad-hoc tasks from the plan
    #[arg(long, conflicts_with = "adhoc_task_ids")]
    pub clear_adhoc: bool,
    /// Remove every template from the plan
    #[arg(long, conflicts_with = "templates")]
    pub clear_templates: bool,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        let templates = if val.clear_templates {
            Some(Vec::new())
        } else if val.templates.is_empty() {
            None
        } else {
            Some(val.templates)
        };
        let adhoc_task_ids = if val.clear_adhoc {
            Some(Vec::new())
        } else if val.adhoc_task_ids.is_empty() {
            None
        } else {
            Some(val.adhoc_task_ids)
        };
        UpdatePlan {
            description: val.description,
            templates,
            adhoc_task_ids,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create this week's plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Edit the plan's description, templates, or attached ad-hoc tasks
    #[command(alias = "e")]
    Edit(UpdatePlanArgs),
    /// Show the plan waiting for a successor after a week rollover
    Pending,
}

/// Create a task template
#[derive(ClapArgs)]
pub struct CreateTemplateArgs {
    /// Title of the template
    pub title: String,
    /// Description of what the task involves
    #[arg(short, long)]
    pub description: String,
    /// Points one generated instance is worth
    #[arg(short, long, default_value_t = 1)]
    pub points: u32,
}

impl From<CreateTemplateArgs> for CreateTemplate {
    fn from(val: CreateTemplateArgs) -> Self {
        CreateTemplate {
            title: val.title,
            description: val.description,
            points: val.points,
        }
    }
}

/// Edit a task template
#[derive(ClapArgs)]
pub struct UpdateTemplateArgs {
    /// ID of the template to edit
    pub id: u64,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New points value (existing instances keep their snapshot)
    #[arg(short, long)]
    pub points: Option<u32>,
}

impl From<UpdateTemplateArgs> for UpdateTemplate {
    fn from(val: UpdateTemplateArgs) -> Self {
        UpdateTemplate {
            id: val.id,
            title: val.title,
            description: val.description,
            points: val.points,
        }
    }
}

/// List templates
#[derive(ClapArgs)]
pub struct ListTemplatesArgs {
    /// Include archived templates
    #[arg(long)]
    pub archived: bool,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Create a task template
    #[command(alias = "c")]
    Create(CreateTemplateArgs),
    /// List templates
    #[command(aliases = ["l", "ls"])]
    List(ListTemplatesArgs),
    /// Show a template
    #[command(alias = "s")]
    Show {
        /// ID of the template to show
        id: u64,
    },
    /// Edit a template
    #[command(alias = "e")]
    Edit(UpdateTemplateArgs),
    /// Archive a template (hidden from listings, history preserved)
    #[command(alias = "a")]
    Archive {
        /// ID of the template to archive
        id: u64,
    },
    /// Restore an archived template
    #[command(alias = "u")]
    Restore {
        /// ID of the template to restore
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Move a task to another column
    #[command(alias = "s")]
    Set {
        /// ID of the task to move
        id: u64,
        /// Target column
        #[arg(value_enum)]
        status: StatusArg,
    },
}

/// Create an ad-hoc task
#[derive(ClapArgs)]
pub struct CreateAdhocArgs {
    /// Title of the task
    pub title: String,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Points the task is worth
    #[arg(short, long, default_value_t = 1)]
    pub points: u32,
    /// Start the task in the doing column
    #[arg(long)]
    pub doing: bool,
    /// Plan to attach the task to; floats in the unattached pool when absent
    #[arg(long)]
    pub plan: Option<u64>,
}

impl From<CreateAdhocArgs> for CreateAdhocTask {
    fn from(val: CreateAdhocArgs) -> Self {
        CreateAdhocTask {
            title: val.title,
            description: val.description,
            points: val.points,
            status: val.doing.then_some(TaskStatus::Doing),
            plan_id: val.plan,
        }
    }
}

#[derive(Subcommand)]
pub enum AdhocCommands {
    /// Create an ad-hoc task
    #[command(alias = "c")]
    Create(CreateAdhocArgs),
    /// List ad-hoc tasks not attached to any plan
    #[command(aliases = ["l", "ls"])]
    List,
}
