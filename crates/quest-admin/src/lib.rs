/*
[INPUT]:  Public API exports for quest-admin crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod analytics;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod download;
pub mod error;
pub mod format;
pub mod manifest;
pub mod notify;
pub mod reconcile;
pub mod task_entry;
pub mod validation;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use config::AdminConfig;
pub use error::{DownloadError, TaskError, WizardError};
pub use manifest::QuestManifest;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use reconcile::{TaskChanges, reconcile};
pub use task_entry::{TaskEntry, TaskKind};
pub use wizard::{QuestWizard, Step, WizardMode};
