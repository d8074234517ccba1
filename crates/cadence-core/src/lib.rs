//! Core library for the Cadence weekly planning board.
//!
//! This crate provides the business logic for a personal weekly task board:
//! recurring task templates, weekly plans that expand templates into dated
//! task instances, a sync engine that rolls daily tasks over (with a one-day
//! grace window) and retires plans at week boundaries, and pure helpers for
//! progress metrics, risk levels, and board ordering.
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{BoardBuilder, params::{CreatePlan, CreateTemplate, TemplateSelection}};
//! use cadence_core::models::TaskKind;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board = BoardBuilder::new()
//!     .with_database_path(Some("cadence.db"))
//!     .build()
//!     .await?;
//!
//! // Define a recurring template, then plan the week with it.
//! let template = board
//!     .create_template(&CreateTemplate {
//!         title: "Morning stretch".to_string(),
//!         description: "Ten minutes before breakfast".to_string(),
//!         points: 3,
//!     })
//!     .await?;
//!
//! let plan = board
//!     .create_plan(&CreatePlan {
//!         templates: vec![TemplateSelection {
//!             template_id: template.id,
//!             kind: TaskKind::Daily,
//!             frequency: 1,
//!         }],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Planned week {}", plan.period_key);
//!
//! // The read path runs whatever sync is due and returns the board.
//! if let Some(data) = board.fetch_board().await? {
//!     println!("{} tasks on the board", data.tasks.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod clock;
pub mod db;
pub mod diff;
pub mod display;
mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod params;
pub mod risk;

// Re-export commonly used types
pub use board::{Board, BoardBuilder};
pub use db::Database;
pub use display::{AdhocPool, BoardView, LocalDateTime, Templates};
pub use error::{BoardError, Result};
pub use metrics::compute_metrics;
pub use models::{
    BoardData, BoardMetrics, Plan, PlanStatus, PlanWithTemplates, Task, TaskKind, TaskStatus,
    TaskTemplate,
};
pub use risk::{
    compute_risk_level, compute_template_progress, group_and_sort_tasks, sort_tasks, GroupedTasks,
    RiskLevel, TemplateProgress,
};
