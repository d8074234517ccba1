//! Progress metrics derived from a plan's task set.
//!
//! Pure computation over already-fetched data. "Today" figures cover what is
//! currently on the board; "week" figures blend materialized history with a
//! forward projection, because daily instances for future days do not exist
//! as rows until their day arrives.

use jiff::civil::Date;

use crate::clock;
use crate::error::Result;
use crate::models::{BoardMetrics, PlanWithTemplates, Task, TaskKind, TaskStatus};

/// Computes the metrics bundle for a board view.
///
/// `tasks` must be the plan's full task list including expired instances;
/// the today figures filter those out internally.
pub fn compute_metrics(
    plan: &PlanWithTemplates,
    tasks: &[Task],
    today: Date,
) -> Result<BoardMetrics> {
    let monday = clock::monday_of_week(&plan.plan.period_key)?;
    let sunday = clock::sunday_of_week(&plan.plan.period_key)?;

    let days_elapsed = ((today - monday).get_days() + 1).clamp(1, 7) as u8;
    // Inclusive of today; a board viewed after its week never projects
    // fewer than one day.
    let remaining_days = ((sunday - today).get_days() + 1).max(1) as u32;

    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Expired)
        .collect();

    let mut metrics = BoardMetrics {
        days_elapsed,
        ..Default::default()
    };

    for task in &visible {
        metrics.today_total_count += 1;
        metrics.today_total_points += task.points;
        let done_today = task.status == TaskStatus::Done
            && clock::same_calendar_day(task.done_at, today);
        if done_today {
            metrics.today_done_count += 1;
            metrics.today_done_points += task.points;
        }
    }

    for task in tasks {
        if task.status == TaskStatus::Done {
            metrics.week_done_count += 1;
            metrics.week_done_points += task.points;
        }

        // Past daily instances already happened, whatever their status;
        // weekly and ad-hoc instances count in full once materialized.
        let materialized = match task.kind {
            TaskKind::Daily => task.for_date.is_some_and(|d| d < today),
            TaskKind::Weekly | TaskKind::AdHoc => true,
        };
        if materialized {
            metrics.week_projected_count += 1;
            metrics.week_projected_points += task.points;
        }
    }

    // Forward projection for today and the rest of the week from the
    // current daily template commitments.
    for linked in &plan.templates {
        if linked.link.kind == TaskKind::Daily {
            metrics.week_projected_count += linked.link.frequency * remaining_days;
            metrics.week_projected_points +=
                linked.template.points * linked.link.frequency * remaining_days;
        }
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        LinkedTemplate, PeriodType, Plan, PlanStatus, PlanTemplate, TaskTemplate,
    };
    use jiff::civil::date;
    use jiff::Timestamp;

    fn plan_with(period_key: &str, templates: Vec<(u64, TaskKind, u32, u32)>) -> PlanWithTemplates {
        let templates = templates
            .into_iter()
            .map(|(id, kind, frequency, points)| LinkedTemplate {
                link: PlanTemplate {
                    id: id + 100,
                    plan_id: 1,
                    template_id: id,
                    kind,
                    frequency,
                    created_at: Timestamp::UNIX_EPOCH,
                },
                template: TaskTemplate {
                    id,
                    owner: None,
                    title: format!("Template {id}"),
                    description: String::new(),
                    points,
                    archived: false,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                },
            })
            .collect();
        PlanWithTemplates {
            plan: Plan {
                id: 1,
                owner: None,
                period_type: PeriodType::Weekly,
                period_key: period_key.to_string(),
                description: None,
                status: PlanStatus::Active,
                last_sync_date: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            templates,
        }
    }

    fn task(
        id: u64,
        kind: TaskKind,
        points: u32,
        status: TaskStatus,
        for_date: Option<Date>,
    ) -> Task {
        Task {
            id,
            plan_id: Some(1),
            template_id: Some(1),
            kind,
            title: format!("Task {id}"),
            description: None,
            points,
            status,
            for_date,
            period_key: None,
            instance_index: 0,
            done_at: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn monday_board_counts_and_projection() {
        // Week 2026-W09 runs Mon 2026-02-23 .. Sun 2026-03-01.
        let today = date(2026, 2, 23);
        let plan = plan_with(
            "2026-W09",
            vec![(1, TaskKind::Daily, 2, 3), (2, TaskKind::Weekly, 1, 5)],
        );
        let tasks = vec![
            task(1, TaskKind::Daily, 3, TaskStatus::Todo, Some(today)),
            task(2, TaskKind::Daily, 3, TaskStatus::Todo, Some(today)),
            task(3, TaskKind::Weekly, 5, TaskStatus::Todo, None),
        ];

        let m = compute_metrics(&plan, &tasks, today).unwrap();
        assert_eq!(m.today_total_count, 3);
        assert_eq!(m.today_total_points, 11);
        assert_eq!(m.today_done_count, 0);
        assert_eq!(m.days_elapsed, 1);
        // Projection: 2 daily instances/day over 7 remaining days, plus the
        // one weekly instance.
        assert_eq!(m.week_projected_count, 15);
        assert_eq!(m.week_projected_points, 2 * 3 * 7 + 5);
    }

    #[test]
    fn expired_tasks_count_toward_week_not_today() {
        let today = date(2026, 2, 25);
        let plan = plan_with("2026-W09", vec![(1, TaskKind::Daily, 1, 2)]);
        let mut done_past = task(
            1,
            TaskKind::Daily,
            2,
            TaskStatus::Done,
            Some(date(2026, 2, 23)),
        );
        done_past.done_at = Some("2026-02-23T12:00:00Z".parse().unwrap());
        let tasks = vec![
            done_past,
            task(2, TaskKind::Daily, 2, TaskStatus::Expired, Some(date(2026, 2, 24))),
            task(3, TaskKind::Daily, 2, TaskStatus::Todo, Some(today)),
        ];

        let m = compute_metrics(&plan, &tasks, today).unwrap();
        // The expired instance never appears on the board.
        assert_eq!(m.today_total_count, 2);
        assert_eq!(m.week_done_count, 1);
        assert_eq!(m.week_done_points, 2);
        // Past dailies count regardless of status: 2 materialized past
        // instances plus 1/day over the 5 remaining days.
        assert_eq!(m.week_projected_count, 2 + 5);
        assert_eq!(m.days_elapsed, 3);
    }

    #[test]
    fn done_on_a_previous_day_is_not_done_today() {
        let today = date(2026, 2, 25);
        let plan = plan_with("2026-W09", vec![(2, TaskKind::Weekly, 1, 5)]);
        let mut weekly = task(1, TaskKind::Weekly, 5, TaskStatus::Done, None);
        weekly.done_at = Some("2026-02-23T09:00:00Z".parse().unwrap());
        let m = compute_metrics(&plan, &[weekly], today).unwrap();
        assert_eq!(m.today_done_count, 0);
        assert_eq!(m.week_done_count, 1);
    }

    #[test]
    fn days_elapsed_clamps_to_week_bounds() {
        let plan = plan_with("2026-W09", vec![(1, TaskKind::Daily, 1, 1)]);
        let before = compute_metrics(&plan, &[], date(2026, 2, 20)).unwrap();
        assert_eq!(before.days_elapsed, 1);
        let after = compute_metrics(&plan, &[], date(2026, 3, 15)).unwrap();
        assert_eq!(after.days_elapsed, 7);
        // Even after the week, the projection covers at least one day.
        assert_eq!(after.week_projected_count, 1);
    }
}
