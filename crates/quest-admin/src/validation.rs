/*
[INPUT]:  Task entries from the working list
[OUTPUT]: Presence checks over each kind's mandated fields
[POS]:    Validation layer - pure predicates, no format checks
[UPDATE]: When a kind's mandated field set changes
*/

use crate::error::TaskError;
use crate::task_entry::TaskEntry;

/// Mandated fields that are empty, in form order.
///
/// Every text field of the kind is mandated, plus a non-empty
/// `balance_contracts` list for balance tasks. Quiz questions are optional.
pub fn missing_fields(entry: &TaskEntry) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = entry
        .text_fields()
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

    if let TaskEntry::Balance(fields) = entry {
        if fields.balance_contracts.is_empty() {
            missing.push("balance_contracts");
        }
    }

    missing
}

pub fn is_valid(entry: &TaskEntry) -> bool {
    !entry.is_placeholder() && missing_fields(entry).is_empty()
}

/// Validate an entry, naming the kind and the missing fields on failure.
///
/// Placeholders are rejected with [`TaskError::Placeholder`].
pub fn validate(entry: &TaskEntry) -> Result<(), TaskError> {
    let Some(kind) = entry.kind() else {
        return Err(TaskError::Placeholder);
    };

    let fields = missing_fields(entry);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(TaskError::MissingField { kind, fields })
    }
}
