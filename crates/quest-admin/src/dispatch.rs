/*
[INPUT]:  Reconciled task changes, AdminService, Notifier
[OUTPUT]: One remote call per changed entry; ids of created tasks
[POS]:    Dispatch layer - per-kind create/update, shared delete
[UPDATE]: When a task kind gains an endpoint or payload field
*/

use futures_util::future::join_all;
use quest_admin_adapter::{
    AdminService, BalancePayload, ContractPayload, CreateQuiz, CreateQuizQuestion,
    CreateTaskRequest, CustomApiPayload, CustomPayload, DiscordPayload, DomainPayload,
    QuestAdminError, TaskPayload, TwitterFwPayload, TwitterRwPayload, UpdateQuiz,
    UpdateQuizQuestion, UpdateTaskRequest,
};
use tracing::{debug, warn};

use crate::error::TaskError;
use crate::notify::{Notification, Notifier};
use crate::reconcile::TaskChanges;
use crate::task_entry::{QuizFields, TaskEntry, TaskKind};

/// Ids assigned by the server to a newly created task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedTask {
    pub id: i64,
    /// Set for quiz tasks only
    pub quiz_id: Option<i64>,
}

/// Outcome of [`TaskDispatcher::apply`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Parallel to `TaskChanges::added`; `None` where the create failed
    pub created: Vec<Option<CreatedTask>>,
    /// Ids whose update went through
    pub updated: Vec<i64>,
    /// Ids whose delete went through
    pub deleted: Vec<i64>,
    pub failed: usize,
}

/// Kind-specific payload of a non-quiz task
pub fn task_payload(entry: &TaskEntry) -> Result<TaskPayload, TaskError> {
    let payload = match entry {
        TaskEntry::TwitterFw(f) => TaskPayload::TwitterFw(TwitterFwPayload {
            name: f.twfw_name.clone(),
            desc: f.twfw_desc.clone(),
            username: f.twfw_username.clone(),
        }),
        TaskEntry::TwitterRw(f) => TaskPayload::TwitterRw(TwitterRwPayload {
            name: f.twrw_name.clone(),
            desc: f.twrw_desc.clone(),
            post_link: f.twrw_post_link.clone(),
        }),
        TaskEntry::Discord(f) => TaskPayload::Discord(DiscordPayload {
            name: f.dc_name.clone(),
            desc: f.dc_desc.clone(),
            invite_link: f.dc_invite_link.clone(),
            guild_id: f.dc_guild_id.clone(),
        }),
        TaskEntry::Custom(f) => TaskPayload::Custom(CustomPayload {
            name: f.custom_name.clone(),
            desc: f.custom_desc.clone(),
            cta: f.custom_cta.clone(),
            href: f.custom_href.clone(),
            api: f.custom_api.clone(),
        }),
        TaskEntry::Domain(f) => TaskPayload::Domain(DomainPayload {
            name: f.domain_name.clone(),
            desc: f.domain_desc.clone(),
        }),
        TaskEntry::Balance(f) => TaskPayload::Balance(BalancePayload {
            name: f.balance_name.clone(),
            desc: f.balance_desc.clone(),
            contracts: f.balance_contracts.clone(),
            cta: f.balance_cta.clone(),
            href: f.balance_href.clone(),
        }),
        TaskEntry::Contract(f) => {
            let calls = serde_json::from_str(&f.contract_calls).map_err(|err| TaskError::Decode {
                kind: TaskKind::Contract,
                message: format!("contract_calls is not valid JSON: {err}"),
            })?;
            TaskPayload::Contract(ContractPayload {
                name: f.contract_name.clone(),
                desc: f.contract_desc.clone(),
                href: f.contract_href.clone(),
                cta: f.contract_cta.clone(),
                calls,
            })
        }
        TaskEntry::CustomApi(f) => TaskPayload::CustomApi(CustomApiPayload {
            name: f.api_name.clone(),
            desc: f.api_desc.clone(),
            api_url: f.api_url.clone(),
            cta: f.api_cta.clone(),
            href: f.api_href.clone(),
            regex: f.api_regex.clone(),
        }),
        TaskEntry::Quiz(_) => {
            return Err(TaskError::Decode {
                kind: TaskKind::Quiz,
                message: "quiz tasks use the quiz endpoints".to_string(),
            });
        }
        TaskEntry::None => return Err(TaskError::Placeholder),
    };
    Ok(payload)
}

/// Issues the remote calls for reconciled task changes of one quest.
pub struct TaskDispatcher<'a> {
    service: &'a dyn AdminService,
    notifier: &'a dyn Notifier,
    quest_id: i64,
}

impl<'a> TaskDispatcher<'a> {
    pub fn new(service: &'a dyn AdminService, notifier: &'a dyn Notifier, quest_id: i64) -> Self {
        Self {
            service,
            notifier,
            quest_id,
        }
    }

    /// Apply changes set by set: updates, then deletes, then creates.
    ///
    /// Calls inside a set run concurrently. A failing call is reported as an
    /// error notification and never cancels its siblings.
    pub async fn apply(&self, changes: &TaskChanges) -> DispatchReport {
        let mut report = DispatchReport::default();

        let updates = join_all(changes.updated.iter().map(|entry| self.update(entry))).await;
        for (entry, outcome) in changes.updated.iter().zip(updates) {
            match outcome {
                Ok(()) => report.updated.extend(entry.id()),
                Err(err) => {
                    report.failed += 1;
                    self.report_failure("updating", entry, &err);
                }
            }
        }

        let deletes = join_all(changes.removed.iter().map(|entry| self.delete(entry))).await;
        for (entry, outcome) in changes.removed.iter().zip(deletes) {
            match outcome {
                Ok(()) => report.deleted.extend(entry.id()),
                Err(err) => {
                    report.failed += 1;
                    self.report_failure("deleting", entry, &err);
                }
            }
        }

        let creates = join_all(changes.added.iter().map(|entry| self.create(entry))).await;
        for (entry, outcome) in changes.added.iter().zip(creates) {
            match outcome {
                Ok(created) => report.created.push(Some(created)),
                Err(err) => {
                    report.failed += 1;
                    report.created.push(None);
                    self.report_failure("adding", entry, &err);
                }
            }
        }

        debug!(
            quest_id = self.quest_id,
            created = report.created.iter().flatten().count(),
            updated = report.updated.len(),
            deleted = report.deleted.len(),
            failed = report.failed,
            "task changes dispatched"
        );
        report
    }

    fn report_failure(&self, action: &str, entry: &TaskEntry, err: &TaskError) {
        let kind = entry.kind().map(TaskKind::label).unwrap_or("None");
        warn!(quest_id = self.quest_id, task_kind = kind, error = %err, "task {action} failed");
        let message = match err {
            TaskError::Remote { source, .. } => format!("Error {action} {kind} task: {source}"),
            other => format!("Error {action} {kind} task: {other}"),
        };
        self.notifier.notify(Notification::error(message));
    }

    /// Create one task; quiz tasks also create their questions
    pub async fn create(&self, entry: &TaskEntry) -> Result<CreatedTask, TaskError> {
        if let TaskEntry::Quiz(quiz) = entry {
            return self.create_quiz(quiz).await;
        }

        let kind = entry.kind().ok_or(TaskError::Placeholder)?;
        let request = CreateTaskRequest {
            quest_id: self.quest_id,
            payload: task_payload(entry)?,
        };
        let created = self
            .service
            .create_task(&request)
            .await
            .map_err(|source| TaskError::Remote { kind, source })?;
        Ok(CreatedTask {
            id: created.id,
            quiz_id: None,
        })
    }

    /// Update one persisted task
    pub async fn update(&self, entry: &TaskEntry) -> Result<(), TaskError> {
        let kind = entry.kind().ok_or(TaskError::Placeholder)?;
        let id = entry.id().ok_or_else(|| TaskError::Decode {
            kind,
            message: "task has no server id".to_string(),
        })?;

        if let TaskEntry::Quiz(quiz) = entry {
            return self.update_quiz(id, quiz).await;
        }

        let request = UpdateTaskRequest {
            id,
            payload: task_payload(entry)?,
        };
        self.service
            .update_task(&request)
            .await
            .map(|_| ())
            .map_err(|source| TaskError::Remote { kind, source })
    }

    pub async fn delete(&self, entry: &TaskEntry) -> Result<(), TaskError> {
        let kind = entry.kind().ok_or(TaskError::Placeholder)?;
        let id = entry.id().ok_or_else(|| TaskError::Decode {
            kind,
            message: "task has no server id".to_string(),
        })?;
        self.service
            .delete_task(id)
            .await
            .map(|_| ())
            .map_err(|source| TaskError::Remote { kind, source })
    }

    async fn create_quiz(&self, quiz: &QuizFields) -> Result<CreatedTask, TaskError> {
        let created = self
            .service
            .create_quiz(&CreateQuiz {
                quest_id: self.quest_id,
                name: quiz.quiz_name.clone(),
                desc: quiz.quiz_desc.clone(),
                intro: quiz.quiz_intro.clone(),
                cta: quiz.quiz_cta.clone(),
                help_link: quiz.quiz_help_link.clone(),
            })
            .await
            .map_err(|source| TaskError::Remote {
                kind: TaskKind::Quiz,
                source,
            })?;

        let quiz_id = created.quiz_id;
        let outcomes = join_all(quiz.questions.iter().map(|question| async move {
            let request = CreateQuizQuestion {
                quiz_id,
                question: question.question.clone(),
                options: question.options.clone(),
                correct_answers: question.correct_answers.clone(),
            };
            self.service.create_quiz_question(&request).await.map(|_| ())
        }))
        .await;
        self.report_question_failures(outcomes.into_iter());

        Ok(CreatedTask {
            id: created.id,
            quiz_id: Some(created.quiz_id),
        })
    }

    async fn update_quiz(&self, id: i64, quiz: &QuizFields) -> Result<(), TaskError> {
        let quiz_id = quiz.quiz_id.ok_or_else(|| TaskError::Decode {
            kind: TaskKind::Quiz,
            message: "quiz has no server quiz id".to_string(),
        })?;

        self.service
            .update_quiz(&UpdateQuiz {
                id,
                quiz_id,
                name: quiz.quiz_name.clone(),
                desc: quiz.quiz_desc.clone(),
                intro: quiz.quiz_intro.clone(),
                cta: quiz.quiz_cta.clone(),
                help_link: quiz.quiz_help_link.clone(),
            })
            .await
            .map_err(|source| TaskError::Remote {
                kind: TaskKind::Quiz,
                source,
            })?;

        let outcomes = join_all(quiz.questions.iter().map(|question| async move {
            match question.id.filter(|id| *id != 0) {
                Some(question_id) => self
                    .service
                    .update_quiz_question(&UpdateQuizQuestion {
                        id: question_id,
                        quiz_id,
                        question: question.question.clone(),
                        options: question.options.clone(),
                        correct_answers: question.correct_answers.clone(),
                    })
                    .await
                    .map(|_| ()),
                None => self
                    .service
                    .create_quiz_question(&CreateQuizQuestion {
                        quiz_id,
                        question: question.question.clone(),
                        options: question.options.clone(),
                        correct_answers: question.correct_answers.clone(),
                    })
                    .await
                    .map(|_| ()),
            }
        }))
        .await;
        self.report_question_failures(outcomes.into_iter());

        Ok(())
    }

    fn report_question_failures(
        &self,
        outcomes: impl Iterator<Item = Result<(), QuestAdminError>>,
    ) {
        let mut total = 0;
        let mut failed = 0;
        for outcome in outcomes {
            total += 1;
            if let Err(err) = outcome {
                failed += 1;
                warn!(quest_id = self.quest_id, error = %err, "quiz question request failed");
            }
        }

        if failed > 0 {
            let err = TaskError::QuestionsFailed { failed, total };
            self.notifier
                .notify(Notification::warning(format!("{err}. Please review and try again.")));
        }
    }
}
