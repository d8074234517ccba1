//! Risk signals and deterministic board ordering.
//!
//! Pure functions recomputed on every render from the current task set plus
//! a live clock reading, so thresholds react over the course of a day
//! without refetching anything.

use std::collections::HashMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::models::{Task, TaskKind, TaskStatus};

/// Urgency signal attached to a board task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Warning,
    Danger,
}

/// Per-template completion progress within the current period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateProgress {
    /// Instances finished
    pub done: u32,
    /// Instances started but not finished
    pub doing: u32,
}

/// Tasks partitioned into board columns, each sorted for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupedTasks {
    pub todo: Vec<Task>,
    pub doing: Vec<Task>,
    pub done: Vec<Task>,
}

/// Counts done/doing instances per template. Used by weekly risk to judge
/// how much of a template's committed frequency remains.
pub fn compute_template_progress(tasks: &[Task]) -> HashMap<u64, TemplateProgress> {
    let mut progress: HashMap<u64, TemplateProgress> = HashMap::new();
    for task in tasks {
        let Some(template_id) = task.template_id else {
            continue;
        };
        let entry = progress.entry(template_id).or_default();
        match task.status {
            TaskStatus::Done => entry.done += 1,
            TaskStatus::Doing => entry.doing += 1,
            _ => {}
        }
    }
    progress
}

/// Computes the risk level of one task.
///
/// `current_hour` is the local wall-clock hour (0..=23); `days_elapsed` is
/// the 1-indexed day of the plan's week.
pub fn compute_risk_level(
    task: &Task,
    today: Date,
    current_hour: i8,
    days_elapsed: u8,
    frequencies: &HashMap<u64, u32>,
    progress: &HashMap<u64, TemplateProgress>,
) -> RiskLevel {
    if matches!(task.status, TaskStatus::Done | TaskStatus::Expired) {
        return RiskLevel::Normal;
    }

    match task.kind {
        TaskKind::AdHoc => adhoc_risk(task, today),
        TaskKind::Daily => daily_risk(task, today, current_hour),
        TaskKind::Weekly => weekly_risk(task, days_elapsed, frequencies, progress),
    }
}

/// Ad-hoc tasks carry no deadline; risk grows with their age instead.
fn adhoc_risk(task: &Task, today: Date) -> RiskLevel {
    let created = clock::normalize_date_only(task.created_at);
    let age_days = (today - created).get_days();
    match task.status {
        TaskStatus::Todo if age_days >= 8 => RiskLevel::Danger,
        TaskStatus::Todo if age_days >= 5 => RiskLevel::Warning,
        // An in-progress task is being worked; it never reads as abandoned.
        TaskStatus::Doing if age_days >= 8 => RiskLevel::Warning,
        _ => RiskLevel::Normal,
    }
}

fn daily_risk(task: &Task, today: Date, current_hour: i8) -> RiskLevel {
    if task.is_rollover(today) {
        // Living out its one-day grace window; it dies tomorrow.
        return if task.status == TaskStatus::Todo && current_hour >= 15 {
            RiskLevel::Danger
        } else {
            RiskLevel::Warning
        };
    }
    if current_hour >= 20 {
        RiskLevel::Warning
    } else {
        RiskLevel::Normal
    }
}

fn weekly_risk(
    task: &Task,
    days_elapsed: u8,
    frequencies: &HashMap<u64, u32>,
    progress: &HashMap<u64, TemplateProgress>,
) -> RiskLevel {
    let frequency = task
        .template_id
        .and_then(|id| frequencies.get(&id))
        .copied()
        .unwrap_or(1) as i32;
    let p = task
        .template_id
        .and_then(|id| progress.get(&id))
        .copied()
        .unwrap_or_default();

    let remaining = frequency - p.done as i32 - p.doing as i32;
    let remaining_days = 7 - i32::from(days_elapsed);

    let danger = days_elapsed >= 5 || remaining_days < remaining;
    match task.status {
        TaskStatus::Todo if danger => RiskLevel::Danger,
        TaskStatus::Todo if days_elapsed >= 3 || remaining_days < remaining * 2 => {
            RiskLevel::Warning
        }
        // Effort already underway never escalates past warning.
        TaskStatus::Doing if danger => RiskLevel::Warning,
        _ => RiskLevel::Normal,
    }
}

/// Sorts tasks for rendering within one board column: fresh dailies first,
/// then rollover dailies, then everything else; creation time and id break
/// ties.
pub fn sort_tasks(tasks: &mut [Task], today: Date) {
    tasks.sort_by(|a, b| {
        sort_bucket(a, today)
            .cmp(&sort_bucket(b, today))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn sort_bucket(task: &Task, today: Date) -> u8 {
    match task.kind {
        TaskKind::Daily if task.for_date == Some(today) => 0,
        TaskKind::Daily if task.is_rollover(today) => 1,
        _ => 2,
    }
}

/// Partitions board-visible tasks into columns and sorts each. Expired
/// tasks are dropped.
pub fn group_and_sort_tasks(tasks: &[Task], today: Date) -> GroupedTasks {
    let mut grouped = GroupedTasks::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => grouped.todo.push(task.clone()),
            TaskStatus::Doing => grouped.doing.push(task.clone()),
            TaskStatus::Done => grouped.done.push(task.clone()),
            TaskStatus::Expired => {}
        }
    }
    sort_tasks(&mut grouped.todo, today);
    sort_tasks(&mut grouped.doing, today);
    sort_tasks(&mut grouped.done, today);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::Timestamp;

    fn task(id: u64, kind: TaskKind, status: TaskStatus) -> Task {
        Task {
            id,
            plan_id: Some(1),
            template_id: Some(1),
            kind,
            title: format!("Task {id}"),
            description: None,
            points: 1,
            status,
            for_date: None,
            period_key: None,
            instance_index: 0,
            done_at: None,
            created_at: "2026-02-23T00:00:00Z".parse().unwrap(),
            updated_at: "2026-02-23T00:00:00Z".parse().unwrap(),
        }
    }

    fn risk(
        t: &Task,
        today: Date,
        hour: i8,
        days_elapsed: u8,
        frequency: u32,
        progress: TemplateProgress,
    ) -> RiskLevel {
        let frequencies = HashMap::from([(1u64, frequency)]);
        let progress = HashMap::from([(1u64, progress)]);
        compute_risk_level(t, today, hour, days_elapsed, &frequencies, &progress)
    }

    #[test]
    fn finished_and_expired_tasks_are_always_normal() {
        let today = date(2026, 2, 25);
        for status in [TaskStatus::Done, TaskStatus::Expired] {
            let mut t = task(1, TaskKind::Daily, status);
            t.for_date = Some(date(2026, 2, 23));
            assert_eq!(
                risk(&t, today, 23, 7, 1, TemplateProgress::default()),
                RiskLevel::Normal
            );
        }
    }

    #[test]
    fn rollover_daily_escalates_in_the_afternoon() {
        let today = date(2026, 2, 24);
        let mut t = task(1, TaskKind::Daily, TaskStatus::Todo);
        t.for_date = Some(date(2026, 2, 23));

        let p = TemplateProgress::default();
        assert_eq!(risk(&t, today, 9, 2, 1, p), RiskLevel::Warning);
        assert_eq!(risk(&t, today, 15, 2, 1, p), RiskLevel::Danger);

        t.status = TaskStatus::Doing;
        assert_eq!(risk(&t, today, 23, 2, 1, p), RiskLevel::Warning);
    }

    #[test]
    fn fresh_daily_warns_only_in_the_evening() {
        let today = date(2026, 2, 24);
        let mut t = task(1, TaskKind::Daily, TaskStatus::Todo);
        t.for_date = Some(today);

        let p = TemplateProgress::default();
        assert_eq!(risk(&t, today, 19, 2, 1, p), RiskLevel::Normal);
        assert_eq!(risk(&t, today, 20, 2, 1, p), RiskLevel::Warning);
    }

    #[test]
    fn weekly_risk_tracks_remaining_commitment() {
        let today = date(2026, 2, 24);
        let t = task(1, TaskKind::Weekly, TaskStatus::Todo);

        // Early in the week with everything still ahead but enough days left.
        let p = TemplateProgress::default();
        assert_eq!(risk(&t, today, 10, 1, 3, p), RiskLevel::Normal);
        // Day 3 crosses the first time threshold.
        assert_eq!(risk(&t, today, 10, 3, 3, p), RiskLevel::Warning);
        // Day 5 crosses the hard threshold.
        assert_eq!(risk(&t, today, 10, 5, 3, p), RiskLevel::Danger);
        // More instances left than days: danger regardless of day.
        assert_eq!(risk(&t, today, 10, 2, 7, p), RiskLevel::Danger);
        // Completed progress releases the pressure.
        let done = TemplateProgress { done: 3, doing: 0 };
        assert_eq!(risk(&t, today, 10, 3, 3, done), RiskLevel::Normal);
    }

    #[test]
    fn weekly_doing_never_reaches_danger() {
        let today = date(2026, 2, 28);
        let t = task(1, TaskKind::Weekly, TaskStatus::Doing);
        assert_eq!(
            risk(&t, today, 10, 6, 3, TemplateProgress::default()),
            RiskLevel::Warning
        );
    }

    #[test]
    fn weekly_risk_is_monotonic_in_elapsed_days() {
        let today = date(2026, 2, 25);
        let t = task(1, TaskKind::Weekly, TaskStatus::Todo);
        let p = TemplateProgress { done: 1, doing: 0 };
        let early = risk(&t, today, 10, 2, 3, p);
        let late = risk(&t, today, 10, 5, 3, p);
        assert!(late >= early);
    }

    #[test]
    fn adhoc_risk_grows_with_age() {
        let today = date(2026, 3, 5);
        let mut t = task(1, TaskKind::AdHoc, TaskStatus::Todo);
        t.template_id = None;

        // Created 2026-02-23: ten days old.
        assert_eq!(
            risk(&t, today, 10, 4, 1, TemplateProgress::default()),
            RiskLevel::Danger
        );
        // Six days old.
        assert_eq!(
            risk(&t, date(2026, 3, 1), 10, 4, 1, TemplateProgress::default()),
            RiskLevel::Warning
        );
        // Two days old.
        assert_eq!(
            risk(&t, date(2026, 2, 25), 10, 4, 1, TemplateProgress::default()),
            RiskLevel::Normal
        );
        // In progress caps at warning however old it gets.
        t.status = TaskStatus::Doing;
        assert_eq!(
            risk(&t, today, 10, 4, 1, TemplateProgress::default()),
            RiskLevel::Warning
        );
    }

    #[test]
    fn template_progress_counts_done_and_doing() {
        let tasks = vec![
            task(1, TaskKind::Weekly, TaskStatus::Done),
            task(2, TaskKind::Weekly, TaskStatus::Doing),
            task(3, TaskKind::Weekly, TaskStatus::Todo),
        ];
        let progress = compute_template_progress(&tasks);
        assert_eq!(progress[&1], TemplateProgress { done: 1, doing: 1 });
    }

    #[test]
    fn sort_puts_fresh_dailies_before_rollovers_before_the_rest() {
        let today = date(2026, 2, 24);
        let mut rollover = task(1, TaskKind::Daily, TaskStatus::Todo);
        rollover.for_date = Some(date(2026, 2, 23));
        let mut fresh = task(2, TaskKind::Daily, TaskStatus::Todo);
        fresh.for_date = Some(today);
        let weekly = task(3, TaskKind::Weekly, TaskStatus::Todo);

        let mut tasks = vec![weekly, rollover, fresh];
        sort_tasks(&mut tasks, today);
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn equal_timestamps_fall_back_to_id_order() {
        let today = date(2026, 2, 24);
        let mut tasks = vec![
            task(9, TaskKind::Weekly, TaskStatus::Todo),
            task(4, TaskKind::Weekly, TaskStatus::Todo),
            task(7, TaskKind::Weekly, TaskStatus::Todo),
        ];
        sort_tasks(&mut tasks, today);
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn grouping_drops_expired_tasks() {
        let today = date(2026, 2, 24);
        let tasks = vec![
            task(1, TaskKind::Weekly, TaskStatus::Todo),
            task(2, TaskKind::Weekly, TaskStatus::Doing),
            task(3, TaskKind::Weekly, TaskStatus::Done),
            task(4, TaskKind::Daily, TaskStatus::Expired),
        ];
        let grouped = group_and_sort_tasks(&tasks, today);
        assert_eq!(grouped.todo.len(), 1);
        assert_eq!(grouped.doing.len(), 1);
        assert_eq!(grouped.done.len(), 1);
    }
}
