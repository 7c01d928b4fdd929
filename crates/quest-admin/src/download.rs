/*
[INPUT]:  Export kind and id, target directory, cancellation token
[OUTPUT]: JSON/CSV export files on disk plus success/error notifications
[POS]:    Export layer - cancellable downloads of participant and winner lists
[UPDATE]: When the backend adds an export
*/

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use quest_admin_adapter::{AdminService, FileType, QuestAdminClient, QuestAdminError};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::DownloadError;
use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    QuestParticipants,
    QuestUsers,
    BoostWinners,
}

impl ExportKind {
    /// Lower-case subject used in notifications
    pub fn subject(self) -> &'static str {
        match self {
            ExportKind::QuestParticipants => "quest participants",
            ExportKind::QuestUsers => "quest users",
            ExportKind::BoostWinners => "boost winners",
        }
    }

    pub fn file_name(self, id: i64, today: NaiveDate) -> String {
        match self {
            ExportKind::QuestParticipants => {
                format!("quest_{id}_participants_{}.json", today.format("%Y-%m-%d"))
            }
            ExportKind::QuestUsers => format!("quest_{id}_users.json"),
            ExportKind::BoostWinners => format!("boost_{id}_winners.json"),
        }
    }
}

/// Raw export of any public endpoint, saved as `{label}.{csv|json}`
#[derive(Debug, Clone)]
pub struct EndpointExport {
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub label: String,
    pub file_type: FileType,
}

impl EndpointExport {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.label, self.file_type.extension())
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), DownloadError> {
    let io_error = |source| DownloadError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_error)
}

async fn save_json(
    path: &Path,
    fetched: Result<Value, QuestAdminError>,
) -> Result<(), DownloadError> {
    let body = serde_json::to_vec_pretty(&fetched?)?;
    write_file(path, &body).await
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Saves exports into one directory and reports the outcome.
pub struct Downloader<'a> {
    notifier: &'a dyn Notifier,
    dir: PathBuf,
}

impl<'a> Downloader<'a> {
    pub fn new(notifier: &'a dyn Notifier, dir: impl Into<PathBuf>) -> Self {
        Self {
            notifier,
            dir: dir.into(),
        }
    }

    /// Download an admin export as pretty JSON.
    ///
    /// Returns `Ok(None)` without writing anything when `cancel` fires first.
    pub async fn export(
        &self,
        service: &dyn AdminService,
        kind: ExportKind,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError> {
        let path = self.dir.join(kind.file_name(id, Utc::now().date_naive()));
        let fetch = async {
            match kind {
                ExportKind::QuestParticipants => service.get_quest_participants_by_quest_id(id).await,
                ExportKind::QuestUsers => service.get_quest_users_by_quest_id(id).await,
                ExportKind::BoostWinners => service.get_boost_winners_by_boost_id(id).await,
            }
        };

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(id, export = kind.subject(), "download cancelled");
                return Ok(None);
            }
            fetched = fetch => fetched,
        };

        let outcome = save_json(&path, fetched).await;
        self.report(kind.subject(), &path, outcome)
    }

    /// Download the raw body of a public endpoint
    pub async fn endpoint(
        &self,
        client: &QuestAdminClient,
        export: &EndpointExport,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError> {
        let path = self.dir.join(export.file_name());
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(endpoint = %export.endpoint, "download cancelled");
                return Ok(None);
            }
            fetched = client.fetch_bytes(&export.endpoint, &export.query) => fetched,
        };

        let outcome = match fetched {
            Ok(body) => write_file(&path, &body).await,
            Err(err) => Err(err.into()),
        };
        self.report(&export.label, &path, outcome)
    }

    fn report(
        &self,
        subject: &str,
        path: &Path,
        outcome: Result<(), DownloadError>,
    ) -> Result<Option<PathBuf>, DownloadError> {
        match outcome {
            Ok(()) => {
                info!(path = %path.display(), "{subject} downloaded");
                self.notifier.notify(Notification::success(format!(
                    "{} downloaded successfully",
                    capitalize(subject)
                )));
                Ok(Some(path.to_path_buf()))
            }
            Err(err) => {
                warn!(error = %err, "failed to download {subject}");
                self.notifier
                    .notify(Notification::error(format!("Failed to download {subject}")));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationLevel, RecordingNotifier};
    use crate::testutil::FakeAdminService;
    use quest_admin_adapter::ClientConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn export_file_names() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!(
            ExportKind::QuestParticipants.file_name(7, day),
            "quest_7_participants_2024-03-05.json"
        );
        assert_eq!(ExportKind::QuestUsers.file_name(7, day), "quest_7_users.json");
        assert_eq!(ExportKind::BoostWinners.file_name(3, day), "boost_3_winners.json");
    }

    #[tokio::test]
    async fn export_writes_pretty_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = FakeAdminService::new();
        let notifier = RecordingNotifier::new();
        let downloader = Downloader::new(&notifier, dir.path());

        let saved = downloader
            .export(&service, ExportKind::BoostWinners, 3, &CancellationToken::new())
            .await
            .expect("export succeeds")
            .expect("not cancelled");

        assert_eq!(saved, dir.path().join("boost_3_winners.json"));
        let text = std::fs::read_to_string(&saved).expect("file written");
        assert!(text.contains("\n  \"boost_id\": 3"));
        assert_eq!(
            notifier.messages(),
            vec!["Boost winners downloaded successfully".to_string()]
        );
    }

    #[tokio::test]
    async fn cancelled_export_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = FakeAdminService::new();
        let notifier = RecordingNotifier::new();
        let downloader = Downloader::new(&notifier, dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let saved = downloader
            .export(&service, ExportKind::QuestUsers, 7, &cancel)
            .await
            .expect("cancel is not an error");

        assert!(saved.is_none());
        assert!(service.calls().is_empty());
        assert!(!dir.path().join("quest_7_users.json").exists());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn failed_export_notifies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = FakeAdminService::new();
        service.fail_calls("get_quest_participants");
        let notifier = RecordingNotifier::new();
        let downloader = Downloader::new(&notifier, dir.path());

        let err = downloader
            .export(&service, ExportKind::QuestParticipants, 7, &CancellationToken::new())
            .await
            .expect_err("remote failure");

        assert!(matches!(err, DownloadError::Remote(_)));
        let notifications = notifier.notifications();
        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert_eq!(notifications[0].message, "Failed to download quest participants");
    }

    #[tokio::test]
    async fn endpoint_export_saves_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/analytics/export"))
            .and(query_param("id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("address,xp\n0x1,10\n"))
            .expect(1)
            .mount(&server)
            .await;
        let client = QuestAdminClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");

        let dir = tempfile::tempdir().expect("tempdir");
        let notifier = RecordingNotifier::new();
        let export = EndpointExport {
            endpoint: "/analytics/export".to_string(),
            query: vec![("id".to_string(), "7".to_string())],
            label: "leaderboard".to_string(),
            file_type: FileType::Csv,
        };

        let saved = Downloader::new(&notifier, dir.path())
            .endpoint(&client, &export, &CancellationToken::new())
            .await
            .expect("download succeeds")
            .expect("not cancelled");

        assert_eq!(saved.file_name().and_then(|n| n.to_str()), Some("leaderboard.csv"));
        assert_eq!(
            std::fs::read_to_string(saved).expect("file written"),
            "address,xp\n0x1,10\n"
        );
    }
}
