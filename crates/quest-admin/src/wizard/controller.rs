/*
[INPUT]:  Admin edits, step navigation, AdminService, Notifier
[OUTPUT]: Persisted quest, rewards, tasks and banner; user notifications
[POS]:    Wizard layer - stepped create/edit controller
[UPDATE]: When a step gains a side effect or a new form field
*/

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quest_admin_adapter::{AdminService, Banner, QuestDocument, UpdateQuest};
use tracing::{debug, info, warn};

use crate::decode::decode_tasks;
use crate::dispatch::{DispatchReport, TaskDispatcher};
use crate::error::{TaskError, WizardError};
use crate::notify::{Notification, Notifier};
use crate::reconcile::{TaskChanges, added_positions, reconcile};
use crate::task_entry::{QuizQuestionFields, TaskEntry, TaskKind};
use crate::validation::validate;
use crate::wizard::state::{BoostForm, NftForm, QuestForm};
use crate::wizard::{Step, WizardMode};

/// Fails unless the admin session is known and still valid
fn ensure_session(service: &dyn AdminService) -> Result<(), WizardError> {
    match service.session_expires_at() {
        Some(expires_at) if expires_at > Utc::now() => Ok(()),
        _ => Err(WizardError::SessionExpired),
    }
}

/// Epoch milliseconds, or an RFC 3339 timestamp
fn parse_millis(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.timestamp_millis())
    })
}

/// Stepped controller for creating or editing one quest.
///
/// Owns the form state, the working task list and the task snapshot.
/// Leaving a step runs its side effect against the [`AdminService`]; the
/// step index only moves once that side effect succeeded.
pub struct QuestWizard {
    service: Arc<dyn AdminService>,
    notifier: Arc<dyn Notifier>,
    mode: WizardMode,
    step: usize,
    quest_id: Option<i64>,
    pub quest: QuestForm,
    loaded_quest: QuestForm,
    pub nft: NftForm,
    nft_saved: bool,
    pub boost: BoostForm,
    loaded_boost: BoostForm,
    pub show_boost: bool,
    initial_show_boost: bool,
    pub banner: Banner,
    tasks: Vec<TaskEntry>,
    snapshot: Vec<TaskEntry>,
    summary: Option<QuestDocument>,
}

impl QuestWizard {
    /// Start a new quest with a single unchosen task slot
    pub fn create(
        service: Arc<dyn AdminService>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, WizardError> {
        ensure_session(service.as_ref())?;
        Ok(Self {
            service,
            notifier,
            mode: WizardMode::Create,
            step: 0,
            quest_id: None,
            quest: QuestForm::default(),
            loaded_quest: QuestForm::default(),
            nft: NftForm::default(),
            nft_saved: false,
            boost: BoostForm::default(),
            loaded_boost: BoostForm::default(),
            show_boost: false,
            initial_show_boost: false,
            banner: Banner::default(),
            tasks: vec![TaskEntry::None],
            snapshot: Vec::new(),
            summary: None,
        })
    }

    /// Load an existing quest, its rewards and tasks, positioned at `start`
    pub async fn load_edit(
        service: Arc<dyn AdminService>,
        notifier: Arc<dyn Notifier>,
        quest_id: i64,
        start: Step,
    ) -> Result<Self, WizardError> {
        ensure_session(service.as_ref())?;
        let step = WizardMode::Edit
            .index_of(start)
            .ok_or_else(|| WizardError::InvalidInput(format!("no {start} step when editing")))?;

        let doc = service
            .get_quest_by_id(quest_id)
            .await?
            .ok_or(WizardError::QuestNotFound(quest_id))?;
        let nft = service
            .get_nft_uri_by_quest_id(quest_id)
            .await?
            .map(|uri| NftForm::from(&uri))
            .unwrap_or_default();
        let records = service.get_tasks_by_quest_id(quest_id).await?;
        let tasks = decode_tasks(service.as_ref(), &records).await;

        let boost = doc.boosts.first().map(BoostForm::from).unwrap_or_default();
        let show_boost = doc.boosts.first().is_some_and(|boost| !boost.hidden);
        let quest = QuestForm::from(&doc);
        info!(quest_id, tasks = tasks.len(), step = %start, "quest loaded for editing");

        Ok(Self {
            service,
            notifier,
            mode: WizardMode::Edit,
            step,
            quest_id: Some(quest_id),
            loaded_quest: quest.clone(),
            quest,
            nft,
            nft_saved: true,
            loaded_boost: boost.clone(),
            boost,
            show_boost,
            initial_show_boost: show_boost,
            banner: doc.banner.clone().unwrap_or_default(),
            snapshot: tasks.clone(),
            tasks,
            summary: Some(doc),
        })
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn current_step(&self) -> Step {
        self.mode.steps()[self.step]
    }

    pub fn quest_id(&self) -> Option<i64> {
        self.quest_id
    }

    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    pub fn snapshot(&self) -> &[TaskEntry] {
        &self.snapshot
    }

    /// Quest as last fetched for the summary step
    pub fn summary(&self) -> Option<&QuestDocument> {
        self.summary.as_ref()
    }

    fn require_quest_id(&self) -> Result<i64, WizardError> {
        self.quest_id.ok_or(WizardError::MissingQuest)
    }

    /// Validity predicate of the current step
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            Step::Details => self.quest.details_complete(self.mode == WizardMode::Create),
            Step::Rewards => {
                self.nft.is_complete()
                    && self.quest.rewards_complete()
                    && (!self.show_boost || self.boost.is_complete())
            }
            Step::Tasks => {
                self.tasks.is_empty() || self.tasks.iter().any(|entry| !entry.is_placeholder())
            }
            Step::Banner => self.banner.is_complete(),
            Step::Summary => true,
        }
    }

    /// Run the side effect of the current step and move to the next one.
    ///
    /// The terminal step is a no-op.
    pub async fn next(&mut self) -> Result<Step, WizardError> {
        let step = self.current_step();
        if self.step + 1 >= self.mode.steps().len() {
            return Ok(step);
        }
        if !self.can_advance() {
            return Err(WizardError::StepIncomplete { step });
        }

        if let Err(err) = self.leave(step).await {
            warn!(step = %step, error = %err, "step could not be saved");
            return Err(err);
        }

        self.step += 1;
        let entered = self.current_step();
        if entered == Step::Summary {
            self.refresh_summary().await;
        }
        debug!(from = %step, to = %entered, "wizard advanced");
        Ok(entered)
    }

    pub fn back(&mut self) -> Step {
        self.step = self.step.saturating_sub(1);
        self.current_step()
    }

    async fn leave(&mut self, step: Step) -> Result<(), WizardError> {
        match (self.mode, step) {
            (WizardMode::Create, Step::Details) => self.save_details().await,
            (WizardMode::Create, Step::Rewards) => self.save_rewards_create().await,
            (WizardMode::Edit, Step::Rewards) => self.save_rewards_edit().await,
            (_, Step::Tasks) => self.save_tasks().await,
            (WizardMode::Edit, Step::Banner) => self.save_banner().await,
            _ => Ok(()),
        }
    }

    async fn save_details(&mut self) -> Result<(), WizardError> {
        match self.quest_id {
            None => {
                let created = self.service.create_quest(&self.quest.to_create()?).await?;
                info!(quest_id = created.id, "quest created");
                self.quest_id = Some(created.id);
            }
            Some(quest_id) => {
                self.service
                    .update_quest(&self.quest.to_update(quest_id))
                    .await?;
            }
        }
        self.loaded_quest = self.quest.clone();
        Ok(())
    }

    async fn save_rewards_create(&mut self) -> Result<(), WizardError> {
        let quest_id = self.require_quest_id()?;
        self.service
            .update_quest(&self.quest.to_update(quest_id))
            .await?;
        self.loaded_quest = self.quest.clone();

        if self.show_boost {
            self.save_boost(quest_id, false).await?;
        }

        if !self.nft_saved {
            self.service
                .create_nft_uri(&self.nft.to_create(quest_id))
                .await?;
            self.nft_saved = true;
        }
        Ok(())
    }

    async fn save_rewards_edit(&mut self) -> Result<(), WizardError> {
        let quest_id = self.require_quest_id()?;
        if self.quest != self.loaded_quest {
            self.service
                .update_quest(&self.quest.to_update(quest_id))
                .await?;
            self.loaded_quest = self.quest.clone();
        }

        let boost_changed =
            self.show_boost != self.initial_show_boost || self.boost != self.loaded_boost;
        if !boost_changed {
            return Ok(());
        }

        let hidden = !self.show_boost;
        if self.boost.persisted_id().is_some() || (self.show_boost && self.boost.is_creatable()) {
            self.save_boost(quest_id, hidden).await?;
        } else {
            debug!(quest_id, "boost left unsaved: hidden or incomplete");
        }
        self.loaded_boost = self.boost.clone();
        self.initial_show_boost = self.show_boost;
        Ok(())
    }

    /// Update the boost when it has an id, otherwise create it
    async fn save_boost(&mut self, quest_id: i64, hidden: bool) -> Result<(), WizardError> {
        match self.boost.persisted_id() {
            Some(boost_id) => {
                self.service
                    .update_boost(&self.boost.to_update(boost_id, hidden))
                    .await?;
            }
            None => {
                let request = self.boost.to_create(quest_id, &self.quest, hidden)?;
                let created = self.service.create_boost(&request).await?;
                info!(quest_id, boost_id = created.id, "boost created");
                self.boost.id = Some(created.id);
            }
        }
        self.boost.hidden = hidden;
        Ok(())
    }

    /// Validate, reconcile and dispatch the task list, then refresh it.
    ///
    /// Invalid or failing tasks are reported and skipped; they never block
    /// the step.
    async fn save_tasks(&mut self) -> Result<(), WizardError> {
        let quest_id = self.require_quest_id()?;
        self.tasks.retain(|entry| !entry.is_placeholder());

        let changes = reconcile(&self.tasks, &self.snapshot);
        let positions = added_positions(&self.tasks, &self.snapshot);

        let mut pending = TaskChanges {
            removed: changes.removed,
            ..TaskChanges::default()
        };
        let mut pending_positions = Vec::new();
        for (entry, position) in changes.added.into_iter().zip(positions) {
            if self.accept(&entry) {
                pending.added.push(entry);
                pending_positions.push(position);
            }
        }
        for entry in changes.updated {
            if self.accept(&entry) {
                pending.updated.push(entry);
            }
        }

        let mut report = DispatchReport::default();
        if !pending.is_empty() {
            let dispatcher =
                TaskDispatcher::new(self.service.as_ref(), self.notifier.as_ref(), quest_id);
            report = dispatcher.apply(&pending).await;
            for (&position, created) in pending_positions.iter().zip(&report.created) {
                let (Some(created), Some(entry)) = (created, self.tasks.get_mut(position)) else {
                    continue;
                };
                entry.set_id(created.id);
                if let (TaskEntry::Quiz(quiz), Some(quiz_id)) = (entry, created.quiz_id) {
                    quiz.quiz_id = Some(quiz_id);
                }
            }
        }

        self.refresh_tasks(quest_id, &report).await;
        if self.mode == WizardMode::Create {
            self.notifier
                .notify(Notification::success("Quest created successfully"));
        }
        Ok(())
    }

    /// Presence check before dispatch; a rejected entry is reported, not sent
    fn accept(&self, entry: &TaskEntry) -> bool {
        match validate(entry) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "task skipped");
                self.notifier.notify(Notification::info(err.to_string()));
                false
            }
        }
    }

    /// Replace working list and snapshot with the server's task list.
    ///
    /// When the fetch fails, the snapshot only takes in what `report` says
    /// went through, so failed changes are sent again on the next submit.
    async fn refresh_tasks(&mut self, quest_id: i64, report: &DispatchReport) {
        let service = Arc::clone(&self.service);
        match service.get_tasks_by_quest_id(quest_id).await {
            Ok(records) => {
                let entries = decode_tasks(service.as_ref(), &records).await;
                self.snapshot = entries.clone();
                self.tasks = entries;
            }
            Err(err) => {
                warn!(quest_id, error = %err, "failed to refresh tasks, keeping local copy");
                self.settle_snapshot(report);
            }
        }
    }

    fn settle_snapshot(&mut self, report: &DispatchReport) {
        self.snapshot
            .retain(|known| !known.id().is_some_and(|id| report.deleted.contains(&id)));

        for &id in &report.updated {
            let saved = self.tasks.iter().find(|entry| entry.id() == Some(id));
            let known = self.snapshot.iter_mut().find(|known| known.id() == Some(id));
            if let (Some(saved), Some(known)) = (saved, known) {
                *known = saved.clone();
            }
        }

        for created in report.created.iter().flatten() {
            if let Some(saved) = self.tasks.iter().find(|entry| entry.id() == Some(created.id)) {
                self.snapshot.push(saved.clone());
            }
        }
    }

    async fn save_banner(&mut self) -> Result<(), WizardError> {
        let quest_id = self.require_quest_id()?;
        let request = UpdateQuest {
            banner: Some(self.banner.clone()),
            ..self.quest.to_update(quest_id)
        };
        self.service.update_quest(&request).await?;
        self.loaded_quest = self.quest.clone();
        self.notifier
            .notify(Notification::success("Banner updated successfully"));
        Ok(())
    }

    /// Fetch the quest for the summary; failures keep the previous copy
    pub async fn refresh_summary(&mut self) -> Option<&QuestDocument> {
        let Some(quest_id) = self.quest_id else {
            return self.summary.as_ref();
        };
        match self.service.get_quest_by_id(quest_id).await {
            Ok(Some(doc)) => self.summary = Some(doc),
            Ok(None) => warn!(quest_id, "quest missing while refreshing summary"),
            Err(err) => warn!(quest_id, error = %err, "failed to refresh summary"),
        }
        self.summary.as_ref()
    }

    /// Enable or disable the quest for launch
    pub async fn publish(&mut self, disabled: bool) -> Result<(), WizardError> {
        let quest_id = self.require_quest_id()?;
        self.service
            .update_quest(&UpdateQuest {
                id: quest_id,
                disabled: Some(disabled),
                ..UpdateQuest::default()
            })
            .await?;
        self.quest.disabled = disabled;
        self.loaded_quest.disabled = disabled;

        let message = if disabled {
            "Quest is disabled from launch"
        } else {
            "Quest is enabled for launch"
        };
        self.notifier.notify(Notification::success(message));
        self.refresh_summary().await;
        Ok(())
    }

    pub fn set_start_time(&mut self, text: &str) -> bool {
        self.set_start_time_at(text, Utc::now())
    }

    /// Set the start time unless it lies before `now`; returns whether it was applied
    pub fn set_start_time_at(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        let Some(millis) = parse_millis(text) else {
            self.notifier
                .notify(Notification::info(format!("Invalid start time: {text}")));
            return false;
        };
        if millis < now.timestamp_millis() {
            self.notifier.notify(Notification::info(
                "Start time cannot be less than current time",
            ));
            return false;
        }
        self.quest.start_time = Some(millis);
        true
    }

    /// Set quest and boost expiry unless it lies before the start time
    pub fn set_end_time(&mut self, text: &str) -> bool {
        let Some(millis) = parse_millis(text) else {
            self.notifier
                .notify(Notification::info(format!("Invalid end time: {text}")));
            return false;
        };
        if self.quest.start_time.is_some_and(|start| millis < start) {
            self.notifier
                .notify(Notification::info("End time cannot be less than start time"));
            return false;
        }
        self.quest.expiry = Some(millis);
        self.boost.expiry = Some(millis);
        true
    }

    /// One image feeds the quest card, the reward, the NFT and the boost
    pub fn set_image(&mut self, url: &str) {
        self.quest.rewards_img = url.to_string();
        self.quest.img_card = url.to_string();
        self.nft.image = url.to_string();
        self.boost.img_url = url.to_string();
    }

    pub fn set_boost_token(&mut self, address: &str, decimals: u32) {
        self.boost.token = address.to_string();
        self.boost.token_decimals = Some(decimals);
    }

    /// Append an unchosen slot; returns its position
    pub fn add_task_slot(&mut self) -> usize {
        self.tasks.push(TaskEntry::None);
        self.tasks.len() - 1
    }

    pub fn add_task(&mut self, entry: TaskEntry) -> usize {
        self.tasks.push(entry);
        self.tasks.len() - 1
    }

    /// Replace the working list.
    ///
    /// Entries carrying the id of a snapshot entry must keep its kind.
    pub fn replace_tasks(&mut self, entries: Vec<TaskEntry>) -> Result<(), WizardError> {
        for entry in &entries {
            let Some(id) = entry.id() else { continue };
            let known = self.snapshot.iter().find(|known| known.id() == Some(id));
            if let Some(known_kind) = known.and_then(TaskEntry::kind) {
                if entry.kind() != Some(known_kind) {
                    return Err(TaskError::KindLocked { kind: known_kind }.into());
                }
            }
        }
        self.tasks = entries;
        Ok(())
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut TaskEntry, WizardError> {
        self.tasks
            .get_mut(index)
            .ok_or_else(|| WizardError::InvalidInput(format!("no task at position {index}")))
    }

    pub fn choose_task_kind(&mut self, index: usize, kind: TaskKind) -> Result<(), WizardError> {
        self.task_mut(index)?.choose_kind(kind)?;
        Ok(())
    }

    pub fn edit_task_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), WizardError> {
        self.task_mut(index)?.set_field(field, value)?;
        Ok(())
    }

    pub fn set_quiz_questions(
        &mut self,
        index: usize,
        questions: Vec<QuizQuestionFields>,
    ) -> Result<(), WizardError> {
        let slot = self
            .task_mut(index)?
            .questions_mut()
            .ok_or_else(|| WizardError::InvalidInput(format!("task {index} is not a quiz")))?;
        *slot = questions;
        Ok(())
    }

    /// Remove a task from the working list.
    ///
    /// A persisted task is deleted right away and leaves the snapshot once
    /// the delete succeeded.
    pub async fn remove_task(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= self.tasks.len() {
            return Err(WizardError::InvalidInput(format!(
                "no task at position {index}"
            )));
        }
        let Some(id) = self.tasks[index].id() else {
            self.tasks.remove(index);
            return Ok(());
        };
        let quest_id = self.require_quest_id()?;
        let entry = self.tasks.remove(index);

        let dispatcher =
            TaskDispatcher::new(self.service.as_ref(), self.notifier.as_ref(), quest_id);
        match dispatcher.delete(&entry).await {
            Ok(()) => {
                self.snapshot.retain(|known| known.id() != Some(id));
                Ok(())
            }
            Err(err) => {
                let kind = entry.kind().map(TaskKind::label).unwrap_or("None");
                let message = match &err {
                    TaskError::Remote { source, .. } => {
                        format!("Error deleting {kind} task: {source}")
                    }
                    other => format!("Error deleting {kind} task: {other}"),
                };
                self.notifier.notify(Notification::error(message));
                Err(err.into())
            }
        }
    }
}
