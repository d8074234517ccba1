//! Command handlers bridging parsed arguments and the core board API.

use anyhow::{Context, Result};
use cadence_core::display::{AdhocPool, BoardView, Templates};
use cadence_core::params::UpdateTaskStatus;
use cadence_core::Board;

use crate::args::{AdhocCommands, PlanCommands, TaskCommands, TemplateCommands};
use crate::renderer::TerminalRenderer;

/// Dispatches commands against the board and renders the results.
pub struct Cli {
    board: Board,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(board: Board, renderer: TerminalRenderer) -> Self {
        Self { board, renderer }
    }

    /// Shows the current board, or a hint about what to do when there is
    /// none (no plan yet, or last week's plan awaiting a successor).
    pub async fn show_board(&self) -> Result<()> {
        match self.board.fetch_board().await? {
            Some(data) => self.renderer.render(&BoardView::new(&data).to_string()),
            None => match self.board.pending_plan().await? {
                Some(pending) => {
                    let mut out = format!(
                        "Week {} has ended. Create a new plan with `cadence plan create`.\n",
                        pending.plan.period_key
                    );
                    if !pending.templates.is_empty() {
                        out.push_str("\nLast week's templates:\n");
                        for linked in &pending.templates {
                            out.push_str(&format!(
                                "- {}:{}:{} ({})\n",
                                linked.link.template_id,
                                linked.link.kind,
                                linked.link.frequency,
                                linked.template.title,
                            ));
                        }
                    }
                    self.renderer.render(&out)
                }
                None => self
                    .renderer
                    .render("No active plan. Create one with `cadence plan create`.\n"),
            },
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .board
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&format!(
                    "Created plan {} for week {}.\n",
                    plan.id, plan.period_key
                ))?;
                self.show_board().await
            }
            PlanCommands::Edit(args) => {
                let plan_id = args.id;
                let plan = self
                    .board
                    .update_plan(plan_id, &args.into())
                    .await
                    .context("Failed to update plan")?;
                self.renderer
                    .render(&format!("Updated plan {}.\n", plan.id))
            }
            PlanCommands::Pending => match self.board.pending_plan().await? {
                Some(pending) => {
                    let mut out = format!(
                        "# Pending plan {} ({})\n\n",
                        pending.plan.id, pending.plan.period_key
                    );
                    if let Some(desc) = &pending.plan.description {
                        out.push_str(&format!("{desc}\n\n"));
                    }
                    for linked in &pending.templates {
                        out.push_str(&format!(
                            "- {}:{}:{} ({})\n",
                            linked.link.template_id,
                            linked.link.kind,
                            linked.link.frequency,
                            linked.template.title,
                        ));
                    }
                    self.renderer.render(&out)
                }
                None => self.renderer.render("No pending plan.\n"),
            },
        }
    }

    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::Create(args) => {
                let template = self
                    .board
                    .create_template(&args.into())
                    .await
                    .context("Failed to create template")?;
                self.renderer
                    .render(&format!("Created template with ID: {}\n", template.id))
            }
            TemplateCommands::List(args) => {
                let templates = self.board.list_templates(args.archived).await?;
                self.renderer.render(&Templates(&templates).to_string())
            }
            TemplateCommands::Show { id } => match self.board.get_template(id).await? {
                Some(template) => self.renderer.render(&template.to_string()),
                None => self.renderer.render(&format!("Template {id} not found.\n")),
            },
            TemplateCommands::Edit(args) => {
                let template = self
                    .board
                    .update_template(&args.into())
                    .await
                    .context("Failed to update template")?;
                self.renderer
                    .render(&format!("Updated template {}.\n", template.id))
            }
            TemplateCommands::Archive { id } => {
                self.board
                    .set_template_archived(id, true)
                    .await
                    .context("Failed to archive template")?;
                self.renderer.render(&format!("Archived template {id}.\n"))
            }
            TemplateCommands::Restore { id } => {
                self.board
                    .set_template_archived(id, false)
                    .await
                    .context("Failed to restore template")?;
                self.renderer.render(&format!("Restored template {id}.\n"))
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Set { id, status } => {
                let task = self
                    .board
                    .update_task_status(&UpdateTaskStatus {
                        id,
                        status: status.into(),
                    })
                    .await
                    .context("Failed to update task")?;
                self.renderer.render(&format!(
                    "Task {} is now {}.\n",
                    task.id,
                    task.status.with_icon()
                ))
            }
        }
    }

    pub async fn handle_adhoc_command(&self, command: AdhocCommands) -> Result<()> {
        match command {
            AdhocCommands::Create(args) => {
                let task = self
                    .board
                    .create_adhoc_task(&args.into())
                    .await
                    .context("Failed to create ad-hoc task")?;
                let attachment = match task.plan_id {
                    Some(plan_id) => format!("attached to plan {plan_id}"),
                    None => "unattached".to_string(),
                };
                self.renderer.render(&format!(
                    "Created ad-hoc task with ID: {} ({attachment})\n",
                    task.id
                ))
            }
            AdhocCommands::List => {
                let pool = self.board.list_unattached_adhoc().await?;
                self.renderer.render(&AdhocPool(&pool).to_string())
            }
        }
    }
}
