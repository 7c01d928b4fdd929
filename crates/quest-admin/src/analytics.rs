/*
[INPUT]:  Quest id, public analytics endpoints of QuestAdminClient
[OUTPUT]: Dashboard snapshot (quest, activity, participation, counts) and its text report
[POS]:    Analytics layer - concurrent metric fetch with per-metric fallbacks
[UPDATE]: When the dashboard gains a metric
*/

use std::fmt::Write as _;

use chrono::NaiveDate;
use quest_admin_adapter::{QuestAdminClient, QuestAdminError, QuestDocument, TaskParticipation};
use tracing::warn;

use crate::format::{format_axis_tick, number_with_commas, percent_of_visitors};

/// One bar of the completion chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityBar {
    /// `"DD Mon"`
    pub label: String,
    pub participants: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestAnalytics {
    pub quest_id: i64,
    pub quest: Option<QuestDocument>,
    pub activity: Vec<ActivityBar>,
    pub participation: Vec<TaskParticipation>,
    pub participants: u64,
    pub unique_visitors: Option<u64>,
}

/// `"25.00"` -> `"25.00%"`; `"NA"` stays bare
fn with_percent_sign(percent: String) -> String {
    if percent.parse::<f64>().is_ok() {
        format!("{percent}%")
    } else {
        percent
    }
}

/// `"2024-03-05 00:00:00"` -> `"05 Mar"`; unparseable dates are kept as is
pub fn activity_label(date: &str) -> String {
    let day = date.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|parsed| parsed.format("%d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn or_default<T: Default>(metric: &str, quest_id: i64, outcome: Result<T, QuestAdminError>) -> T {
    outcome.unwrap_or_else(|err| {
        warn!(quest_id, metric, error = %err, "analytics fetch failed");
        T::default()
    })
}

/// Fetch every dashboard metric concurrently.
///
/// A failing metric falls back to its empty value and never hides the others.
pub async fn load_quest_analytics(client: &QuestAdminClient, quest_id: i64) -> QuestAnalytics {
    let (quest, activity, participation, participants, visitors) = tokio::join!(
        client.get_public_quest(quest_id),
        client.get_quest_activity(quest_id),
        client.get_quest_participation(quest_id),
        client.get_quest_participants(quest_id),
        client.get_unique_visitor_count(quest_id),
    );

    let activity = or_default("activity", quest_id, activity)
        .into_iter()
        .map(|point| ActivityBar {
            label: activity_label(&point.date),
            participants: point.participants,
        })
        .collect();

    QuestAnalytics {
        quest_id,
        quest: or_default("quest", quest_id, quest),
        activity,
        participation: or_default("participation", quest_id, participation),
        participants: or_default("participants", quest_id, participants.map(|p| p.count)),
        unique_visitors: or_default("unique_visitors", quest_id, visitors),
    }
}

/// Every quest across categories, newest first
pub async fn list_quests(client: &QuestAdminClient) -> Result<Vec<QuestDocument>, QuestAdminError> {
    let mut quests = client.get_quests().await?;
    quests.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(quests)
}

impl QuestAnalytics {
    /// Participants as a share of unique visitors
    pub fn participants_percent(&self) -> String {
        percent_of_visitors(self.participants, self.unique_visitors)
    }

    pub fn task_percent(&self, task: &TaskParticipation) -> String {
        percent_of_visitors(task.count, self.unique_visitors)
    }

    /// Plain text report for the CLI
    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = self
            .quest
            .as_ref()
            .map(|quest| quest.name.as_str())
            .unwrap_or("unknown quest");
        let _ = writeln!(out, "Quest #{} - {title}", self.quest_id);

        let visitors = self
            .unique_visitors
            .map(|count| number_with_commas(count as i64))
            .unwrap_or_else(|| "NA".to_string());
        let _ = writeln!(out, "Unique visitors: {visitors}");
        let _ = writeln!(
            out,
            "Participants:    {} ({})",
            number_with_commas(self.participants as i64),
            with_percent_sign(self.participants_percent())
        );

        if !self.activity.is_empty() {
            let _ = writeln!(out, "\nActivity");
            for bar in &self.activity {
                let _ = writeln!(
                    out,
                    "  {:<8} {:>8}",
                    bar.label,
                    format_axis_tick(bar.participants as i64)
                );
            }
        }

        if !self.participation.is_empty() {
            let _ = writeln!(out, "\nTasks");
            for task in &self.participation {
                let _ = writeln!(
                    out,
                    "  {:<32} {:>10} {:>8}",
                    task.name,
                    number_with_commas(task.count as i64),
                    with_percent_sign(self.task_percent(task))
                );
            }
        }
        out
    }
}
