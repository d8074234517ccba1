//! Markdown formatting for board output.
//!
//! Domain models stay presentation-free; everything user-facing renders
//! through the Display implementations and wrapper types here. All output is
//! markdown so the CLI can pipe it through a terminal renderer.

use std::fmt;

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::clock;
use crate::models::{BoardData, PlanStatus, Task, TaskKind, TaskStatus, TaskTemplate};
use crate::risk::{self, RiskLevel};

/// Formats a timestamp in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let archived = if self.archived { " (archived)" } else { "" };
        writeln!(f, "### {}. {}{} — {} pts", self.id, self.title, archived, self.points)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        Ok(())
    }
}

/// Collection wrapper for template listings.
pub struct Templates<'a>(pub &'a [TaskTemplate]);

impl fmt::Display for Templates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No templates yet.");
        }
        writeln!(f, "# Templates")?;
        writeln!(f)?;
        for template in self.0 {
            let archived = if template.archived { " (archived)" } else { "" };
            writeln!(
                f,
                "- **{}**. {}{} — {} pts",
                template.id, template.title, archived, template.points
            )?;
        }
        Ok(())
    }
}

/// Collection wrapper for the unattached ad-hoc pool.
pub struct AdhocPool<'a>(pub &'a [Task]);

impl fmt::Display for AdhocPool<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No unattached ad-hoc tasks.");
        }
        writeln!(f, "# Unattached ad-hoc tasks")?;
        writeln!(f)?;
        for task in self.0 {
            writeln!(
                f,
                "- **{}**. {} ({}) — {} pts",
                task.id,
                task.title,
                task.status.with_icon(),
                task.points
            )?;
        }
        Ok(())
    }
}

/// Renders the full board: week banner, metrics, and the three columns with
/// risk markers computed against the supplied clock reading.
pub struct BoardView<'a> {
    data: &'a BoardData,
    today: jiff::civil::Date,
    current_hour: i8,
}

impl<'a> BoardView<'a> {
    /// Builds a view against the live clock.
    pub fn new(data: &'a BoardData) -> Self {
        let now = Zoned::now();
        Self {
            data,
            today: now.date(),
            current_hour: now.hour(),
        }
    }

    /// Builds a view at a fixed point in time.
    pub fn at(data: &'a BoardData, today: jiff::civil::Date, current_hour: i8) -> Self {
        Self {
            data,
            today,
            current_hour,
        }
    }

    fn write_column(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        tasks: &[Task],
    ) -> fmt::Result {
        writeln!(f, "## {title} ({})", tasks.len())?;
        writeln!(f)?;
        if tasks.is_empty() {
            writeln!(f, "_empty_")?;
            writeln!(f)?;
            return Ok(());
        }

        let frequencies = self
            .data
            .plan
            .templates
            .iter()
            .map(|linked| (linked.link.template_id, linked.link.frequency))
            .collect();
        let progress = risk::compute_template_progress(&self.data.tasks);

        for task in tasks {
            let level = risk::compute_risk_level(
                task,
                self.today,
                self.current_hour,
                self.data.metrics.days_elapsed,
                &frequencies,
                &progress,
            );
            let marker = match level {
                RiskLevel::Normal => "",
                RiskLevel::Warning => " ⚠",
                RiskLevel::Danger => " ‼",
            };
            let anchor = match (task.kind, task.for_date, &task.period_key) {
                (TaskKind::Daily, Some(date), _) => format!(" · {date}"),
                (TaskKind::Weekly, _, Some(key)) => format!(" · {key}"),
                _ => String::new(),
            };
            writeln!(
                f,
                "- **{}**. {} — {} pts ({}){anchor}{marker}",
                task.id, task.title, task.points, task.kind
            )?;
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = &self.data.plan.plan;
        let banner = clock::week_date_range(&plan.period_key)
            .unwrap_or_else(|_| plan.period_key.clone());
        writeln!(f, "# {banner}")?;
        writeln!(f)?;
        if let Some(desc) = &plan.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        let m = &self.data.metrics;
        writeln!(
            f,
            "- Today: {}/{} tasks · {}/{} pts",
            m.today_done_count, m.today_total_count, m.today_done_points, m.today_total_points
        )?;
        writeln!(
            f,
            "- Week: {}/{} tasks · {}/{} pts · day {}/7",
            m.week_done_count,
            m.week_projected_count,
            m.week_done_points,
            m.week_projected_points,
            m.days_elapsed
        )?;
        writeln!(f)?;

        let grouped = risk::group_and_sort_tasks(&self.data.tasks, self.today);
        self.write_column(f, "Todo", &grouped.todo)?;
        self.write_column(f, "Doing", &grouped.doing)?;
        self.write_column(f, "Done", &grouped.done)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BoardMetrics, LinkedTemplate, PeriodType, Plan, PlanTemplate, PlanWithTemplates,
    };
    use jiff::civil::date;

    fn sample_board() -> BoardData {
        let template = TaskTemplate {
            id: 1,
            owner: None,
            title: "Stretch".to_string(),
            description: "Morning stretch".to_string(),
            points: 3,
            archived: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let plan = PlanWithTemplates {
            plan: Plan {
                id: 1,
                owner: None,
                period_type: PeriodType::Weekly,
                period_key: "2026-W09".to_string(),
                description: Some("Focus week".to_string()),
                status: PlanStatus::Active,
                last_sync_date: Some(date(2026, 2, 23)),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            templates: vec![LinkedTemplate {
                link: PlanTemplate {
                    id: 10,
                    plan_id: 1,
                    template_id: 1,
                    kind: TaskKind::Daily,
                    frequency: 1,
                    created_at: Timestamp::UNIX_EPOCH,
                },
                template,
            }],
        };
        let task = Task {
            id: 5,
            plan_id: Some(1),
            template_id: Some(1),
            kind: TaskKind::Daily,
            title: "Stretch".to_string(),
            description: None,
            points: 3,
            status: TaskStatus::Todo,
            for_date: Some(date(2026, 2, 23)),
            period_key: None,
            instance_index: 0,
            done_at: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        BoardData {
            plan,
            tasks: vec![task],
            metrics: BoardMetrics {
                today_total_count: 1,
                today_total_points: 3,
                week_projected_count: 7,
                week_projected_points: 21,
                days_elapsed: 1,
                ..Default::default()
            },
        }
    }

    #[test]
    fn board_view_includes_banner_and_columns() {
        let data = sample_board();
        let out = BoardView::at(&data, date(2026, 2, 23), 10).to_string();
        assert!(out.contains("Week 09 · Feb 23 – Mar 1"));
        assert!(out.contains("Focus week"));
        assert!(out.contains("## Todo (1)"));
        assert!(out.contains("**5**. Stretch — 3 pts (daily)"));
        assert!(out.contains("## Doing (0)"));
        assert!(out.contains("_empty_"));
    }

    #[test]
    fn rollover_task_carries_a_risk_marker() {
        let mut data = sample_board();
        data.tasks[0].for_date = Some(date(2026, 2, 23));
        let out = BoardView::at(&data, date(2026, 2, 24), 16).to_string();
        assert!(out.contains("‼"));
    }

    #[test]
    fn template_listing_marks_archived_entries() {
        let mut template = sample_board().plan.templates[0].template.clone();
        template.archived = true;
        let out = Templates(std::slice::from_ref(&template)).to_string();
        assert!(out.contains("(archived)"));
    }

    #[test]
    fn empty_pool_has_a_friendly_message() {
        assert_eq!(AdhocPool(&[]).to_string(), "No unattached ad-hoc tasks.\n");
    }
}
