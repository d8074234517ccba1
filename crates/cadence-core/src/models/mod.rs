//! Data models for templates, plans and task instances.
//!
//! These are plain serde-derived structs; Display implementations for the
//! board view live in [`crate::display`] so data shape and presentation stay
//! separate.

pub mod board;
pub mod plan;
pub mod status;
pub mod task;
pub mod template;

// Re-export all public types at the models level
pub use board::{BoardData, BoardMetrics};
pub use plan::{LinkedTemplate, Plan, PlanTemplate, PlanWithTemplates};
pub use status::{PeriodType, PlanStatus, TaskKind, TaskStatus};
pub use task::Task;
pub use template::TaskTemplate;
