//! Three-way diff of a plan's template selection.
//!
//! Plan edits arrive as a full replacement list. Diffing it against the
//! stored links, keyed by template id, is what lets an edit touch only the
//! templates that actually changed and leave completed work untouched.

use std::collections::HashMap;

use crate::models::PlanTemplate;
use crate::params::TemplateSelection;

/// The outcome of diffing an incoming selection against stored links.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TemplateDiff {
    /// Selections with no stored link yet
    pub added: Vec<TemplateSelection>,
    /// Template ids whose link disappears
    pub removed: Vec<u64>,
    /// Stored link id paired with its replacement selection, for links
    /// whose kind or frequency changed
    pub modified: Vec<(u64, TemplateSelection)>,
}

impl TemplateDiff {
    /// Whether the incoming selection matches the stored links exactly.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Diffs `incoming` (the full replacement selection) against `current`
/// (the stored links), keyed by template id.
pub fn diff_template_sets(
    current: &[PlanTemplate],
    incoming: &[TemplateSelection],
) -> TemplateDiff {
    let current_by_template: HashMap<u64, &PlanTemplate> =
        current.iter().map(|link| (link.template_id, link)).collect();
    let incoming_by_template: HashMap<u64, &TemplateSelection> =
        incoming.iter().map(|sel| (sel.template_id, sel)).collect();

    let mut diff = TemplateDiff::default();

    for sel in incoming {
        match current_by_template.get(&sel.template_id) {
            None => diff.added.push(sel.clone()),
            Some(link) if link.kind != sel.kind || link.frequency != sel.frequency => {
                diff.modified.push((link.id, sel.clone()));
            }
            Some(_) => {}
        }
    }

    for link in current {
        if !incoming_by_template.contains_key(&link.template_id) {
            diff.removed.push(link.template_id);
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;
    use jiff::Timestamp;

    fn link(id: u64, template_id: u64, kind: TaskKind, frequency: u32) -> PlanTemplate {
        PlanTemplate {
            id,
            plan_id: 1,
            template_id,
            kind,
            frequency,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn sel(template_id: u64, kind: TaskKind, frequency: u32) -> TemplateSelection {
        TemplateSelection {
            template_id,
            kind,
            frequency,
        }
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let current = vec![link(10, 1, TaskKind::Daily, 2), link(11, 2, TaskKind::Weekly, 1)];
        let incoming = vec![sel(1, TaskKind::Daily, 2), sel(2, TaskKind::Weekly, 1)];
        assert!(diff_template_sets(&current, &incoming).is_empty());
    }

    #[test]
    fn new_template_is_added() {
        let current = vec![link(10, 1, TaskKind::Daily, 1)];
        let incoming = vec![sel(1, TaskKind::Daily, 1), sel(3, TaskKind::Weekly, 2)];
        let diff = diff_template_sets(&current, &incoming);
        assert_eq!(diff.added, vec![sel(3, TaskKind::Weekly, 2)]);
        assert!(diff.removed.is_empty());
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn missing_template_is_removed() {
        let current = vec![link(10, 1, TaskKind::Daily, 1), link(11, 2, TaskKind::Weekly, 1)];
        let incoming = vec![sel(2, TaskKind::Weekly, 1)];
        let diff = diff_template_sets(&current, &incoming);
        assert_eq!(diff.removed, vec![1]);
        assert!(diff.added.is_empty());
    }

    #[test]
    fn frequency_change_is_a_modification() {
        let current = vec![link(10, 1, TaskKind::Daily, 1)];
        let incoming = vec![sel(1, TaskKind::Daily, 3)];
        let diff = diff_template_sets(&current, &incoming);
        assert_eq!(diff.modified, vec![(10, sel(1, TaskKind::Daily, 3))]);
    }

    #[test]
    fn kind_change_is_a_modification() {
        let current = vec![link(10, 1, TaskKind::Daily, 2)];
        let incoming = vec![sel(1, TaskKind::Weekly, 2)];
        let diff = diff_template_sets(&current, &incoming);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].0, 10);
    }

    #[test]
    fn empty_incoming_removes_everything() {
        let current = vec![link(10, 1, TaskKind::Daily, 1), link(11, 2, TaskKind::Weekly, 1)];
        let diff = diff_template_sets(&current, &[]);
        assert_eq!(diff.removed.len(), 2);
        assert!(diff.added.is_empty());
        assert!(diff.modified.is_empty());
    }
}
