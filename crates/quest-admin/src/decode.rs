/*
[INPUT]:  Server task records of a quest, AdminService for quiz details
[OUTPUT]: Working task entries in server order
[POS]:    Model layer - server record to task entry conversion
[UPDATE]: When a task kind gains a column
*/

use futures_util::future::join_all;
use quest_admin_adapter::{AdminService, TaskType, UserTask};
use tracing::warn;

use crate::task_entry::{
    BalanceFields, ContractFields, CustomApiFields, CustomFields, DiscordFields, DomainFields,
    QuizFields, QuizQuestionFields, TaskEntry, TwitterFwFields, TwitterRwFields,
};

/// Decode every task of a quest.
///
/// Quiz details are fetched concurrently. Records that cannot be decoded
/// (quiz without a quiz reference, quiz details unavailable) are logged and
/// left out.
pub async fn decode_tasks(service: &dyn AdminService, tasks: &[UserTask]) -> Vec<TaskEntry> {
    let decoded = join_all(tasks.iter().map(|task| decode_task(service, task))).await;
    decoded.into_iter().flatten().collect()
}

async fn decode_task(service: &dyn AdminService, task: &UserTask) -> Option<TaskEntry> {
    if task.task_type == TaskType::Quiz {
        return decode_quiz(service, task).await;
    }
    decode_plain(task)
}

async fn decode_quiz(service: &dyn AdminService, task: &UserTask) -> Option<TaskEntry> {
    let Some(quiz_ref) = task.quiz_name.filter(|id| *id != 0) else {
        warn!(task_id = task.id, "quiz task has no quiz reference, skipped");
        return None;
    };

    let details = match service.get_quiz_details(quiz_ref).await {
        Ok(details) => details,
        Err(err) => {
            warn!(task_id = task.id, quiz_id = quiz_ref, error = %err, "failed to load quiz details");
            return None;
        }
    };

    let questions = details
        .questions
        .into_iter()
        .map(|question| QuizQuestionFields {
            id: Some(question.id),
            question: question.question,
            options: question.options,
            correct_answers: question.correct_answers,
        })
        .collect();

    Some(TaskEntry::Quiz(QuizFields {
        id: Some(task.id),
        quiz_id: Some(details.id),
        quiz_name: details.name,
        quiz_desc: details.desc,
        quiz_intro: details.intro,
        quiz_cta: task.cta.clone(),
        quiz_help_link: task.href.clone(),
        questions,
    }))
}

/// Part after the first `=` of a follow intent url
fn twitter_username(verify_redirect: Option<&str>) -> String {
    verify_redirect
        .and_then(|url| url.split('=').nth(1))
        .unwrap_or_default()
        .to_string()
}

fn calls_text(task: &UserTask) -> String {
    match &task.calls {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(raw)) => raw.clone(),
        Some(value) => value.to_string(),
    }
}

/// Decode a non-quiz record
pub fn decode_plain(task: &UserTask) -> Option<TaskEntry> {
    let id = Some(task.id);
    let entry = match task.task_type {
        TaskType::Quiz => return None,
        TaskType::TwitterFw => TaskEntry::TwitterFw(TwitterFwFields {
            id,
            twfw_name: task.name.clone(),
            twfw_desc: task.desc.clone(),
            twfw_username: twitter_username(task.verify_redirect.as_deref()),
        }),
        TaskType::TwitterRw => TaskEntry::TwitterRw(TwitterRwFields {
            id,
            twrw_name: task.name.clone(),
            twrw_desc: task.desc.clone(),
            twrw_post_link: task.verify_redirect.clone().unwrap_or_default(),
        }),
        TaskType::Discord => TaskEntry::Discord(DiscordFields {
            id,
            dc_name: task.name.clone(),
            dc_desc: task.desc.clone(),
            dc_invite_link: task.href.clone(),
            dc_guild_id: task.discord_guild_id.clone().unwrap_or_default(),
        }),
        TaskType::Custom => TaskEntry::Custom(CustomFields {
            id,
            custom_name: task.name.clone(),
            custom_desc: task.desc.clone(),
            custom_cta: task.cta.clone(),
            custom_href: task.href.clone(),
            custom_api: task.verify_endpoint.clone(),
        }),
        TaskType::Domain => TaskEntry::Domain(DomainFields {
            id,
            domain_name: task.name.clone(),
            domain_desc: task.desc.clone(),
        }),
        TaskType::Balance => TaskEntry::Balance(BalanceFields {
            id,
            balance_name: task.name.clone(),
            balance_desc: task.desc.clone(),
            balance_contracts: task.contracts.clone().unwrap_or_default(),
            balance_cta: task.cta.clone(),
            balance_href: task.href.clone(),
        }),
        TaskType::Contract => TaskEntry::Contract(ContractFields {
            id,
            contract_name: task.name.clone(),
            contract_desc: task.desc.clone(),
            contract_href: task.href.clone(),
            contract_cta: task.cta.clone(),
            contract_calls: calls_text(task),
        }),
        TaskType::CustomApi => TaskEntry::CustomApi(CustomApiFields {
            id,
            api_name: task.name.clone(),
            api_desc: task.desc.clone(),
            api_url: task.api_url.clone().unwrap_or_default(),
            api_cta: task.cta.clone(),
            api_href: task.href.clone(),
            api_regex: task.regex.clone().unwrap_or_default(),
        }),
    };
    Some(entry)
}
