/*
[INPUT]:  Working task list and the snapshot fetched from the server
[OUTPUT]: Disjoint added / updated / removed sets keyed by server id
[POS]:    Reconciliation layer - pure diff, no I/O
[UPDATE]: When change detection rules change
*/

use std::collections::{HashMap, HashSet};

use crate::task_entry::TaskEntry;

/// Result of diffing the working list against the snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub added: Vec<TaskEntry>,
    pub updated: Vec<TaskEntry>,
    pub removed: Vec<TaskEntry>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Diff `current` against `snapshot`.
///
/// Placeholders are ignored on both sides. Entries are matched by id, never
/// by position; a persisted entry is updated only when it differs by value.
pub fn reconcile(current: &[TaskEntry], snapshot: &[TaskEntry]) -> TaskChanges {
    let baseline: HashMap<i64, &TaskEntry> = snapshot
        .iter()
        .filter(|entry| !entry.is_placeholder())
        .filter_map(|entry| entry.id().map(|id| (id, entry)))
        .collect();

    let current_ids: HashSet<i64> = current
        .iter()
        .filter(|entry| !entry.is_placeholder())
        .filter_map(TaskEntry::id)
        .collect();

    let updated = current
        .iter()
        .filter(|entry| !entry.is_placeholder())
        .filter(|entry| {
            entry
                .id()
                .and_then(|id| baseline.get(&id))
                .is_some_and(|before| *before != *entry)
        })
        .cloned()
        .collect();

    let removed = snapshot
        .iter()
        .filter(|entry| !entry.is_placeholder())
        .filter(|entry| entry.id().is_some_and(|id| !current_ids.contains(&id)))
        .cloned()
        .collect();

    let added = added_positions(current, snapshot)
        .into_iter()
        .map(|index| current[index].clone())
        .collect();

    TaskChanges {
        added,
        updated,
        removed,
    }
}

/// Indices into `current` of the entries [`reconcile`] reports as added, in order.
pub fn added_positions(current: &[TaskEntry], snapshot: &[TaskEntry]) -> Vec<usize> {
    let known: HashSet<i64> = snapshot
        .iter()
        .filter(|entry| !entry.is_placeholder())
        .filter_map(TaskEntry::id)
        .collect();

    current
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.is_placeholder())
        .filter(|(_, entry)| entry.id().is_none_or(|id| !known.contains(&id)))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task_entry::{DomainFields, TwitterFwFields};
    use proptest::prelude::*;

    fn domain(id: Option<i64>, name: &str) -> TaskEntry {
        TaskEntry::Domain(DomainFields {
            id,
            domain_name: name.to_string(),
            domain_desc: "Own a domain".to_string(),
        })
    }

    fn follow(id: Option<i64>, username: &str) -> TaskEntry {
        TaskEntry::TwitterFw(TwitterFwFields {
            id,
            twfw_name: "Follow".to_string(),
            twfw_desc: "Follow us".to_string(),
            twfw_username: username.to_string(),
        })
    }

    #[test]
    fn placeholders_are_ignored() {
        let changes = reconcile(&[TaskEntry::None, domain(None, "a")], &[TaskEntry::None]);
        assert_eq!(changes.added, vec![domain(None, "a")]);
        assert!(changes.updated.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn matches_by_id_not_position() {
        let snapshot = vec![domain(Some(1), "a"), follow(Some(2), "starknet")];
        let current = vec![follow(Some(2), "starknet"), domain(Some(1), "a")];

        assert!(reconcile(&current, &snapshot).is_empty());
    }

    #[test]
    fn edited_entry_is_updated() {
        let snapshot = vec![follow(Some(2), "starknet")];
        let current = vec![follow(Some(2), "starknetid")];

        let changes = reconcile(&current, &snapshot);
        assert_eq!(changes.updated, vec![follow(Some(2), "starknetid")]);
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn unknown_id_is_added_and_missing_id_is_removed() {
        let snapshot = vec![domain(Some(1), "a")];
        let current = vec![domain(Some(9), "b"), domain(Some(0), "c")];

        let changes = reconcile(&current, &snapshot);
        assert_eq!(changes.added, vec![domain(Some(9), "b"), domain(Some(0), "c")]);
        assert_eq!(changes.removed, vec![domain(Some(1), "a")]);
        assert_eq!(added_positions(&current, &snapshot), vec![0, 1]);
    }

    fn arb_entry(id: impl Strategy<Value = Option<i64>>) -> impl Strategy<Value = TaskEntry> {
        (id, "[a-z]{0,3}", any::<bool>()).prop_map(|(id, name, as_follow)| {
            if as_follow {
                follow(id, &name)
            } else {
                domain(id, &name)
            }
        })
    }

    proptest! {
        /// Disjoint id sets: everything current is added, everything old is removed.
        #[test]
        fn disjoint_ids_partition(
            current_ids in prop::collection::hash_set(1i64..100, 0..8),
            snapshot_ids in prop::collection::hash_set(100i64..200, 0..8),
        ) {
            let current: Vec<TaskEntry> = current_ids.iter().map(|id| domain(Some(*id), "c")).collect();
            let snapshot: Vec<TaskEntry> = snapshot_ids.iter().map(|id| domain(Some(*id), "s")).collect();

            let changes = reconcile(&current, &snapshot);
            prop_assert_eq!(changes.added, current);
            prop_assert_eq!(changes.removed, snapshot);
            prop_assert!(changes.updated.is_empty());
        }

        /// Running the diff twice yields the same sets.
        #[test]
        fn reconcile_is_idempotent(
            current in prop::collection::vec(arb_entry(prop::option::of(0i64..6)), 0..8),
            snapshot in prop::collection::vec(arb_entry((1i64..6).prop_map(Some)), 0..8),
        ) {
            prop_assert_eq!(reconcile(&current, &snapshot), reconcile(&current, &snapshot));
        }

        /// Persisted entries equal to their snapshot are never reported as updated,
        /// and no entry lands in both added and updated.
        #[test]
        fn unchanged_entries_are_not_updated(
            snapshot_ids in prop::collection::hash_set(1i64..50, 0..8),
        ) {
            let snapshot: Vec<TaskEntry> = snapshot_ids.iter().map(|id| follow(Some(*id), "same")).collect();
            let mut current = snapshot.clone();
            current.push(follow(None, "new"));

            let changes = reconcile(&current, &snapshot);
            prop_assert!(changes.updated.is_empty());
            prop_assert!(changes.removed.is_empty());
            prop_assert_eq!(changes.added, vec![follow(None, "new")]);
        }
    }
}
