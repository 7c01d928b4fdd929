/*
[INPUT]:  Parsed subcommand arguments, admin configuration, quest manifests
[OUTPUT]: Quest created/edited/published, analytics printed, exports saved
[POS]:    CLI command layer - drives QuestWizard and Downloader from the terminal
[UPDATE]: When adding a subcommand or changing wizard flow
*/

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use quest_admin::analytics::{list_quests, load_quest_analytics};
use quest_admin::download::{Downloader, ExportKind};
use quest_admin::notify::{Notification, NotificationLevel, Notifier};
use quest_admin::{AdminConfig, QuestManifest, QuestWizard, Step};
use quest_admin_adapter::{AdminService, QuestDocument};

/// Prints notifications to stderr and mirrors them into the log
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Info => style("info").cyan(),
            NotificationLevel::Success => style("ok").green(),
            NotificationLevel::Warning => style("warn").yellow(),
            NotificationLevel::Error => style("error").red(),
        };
        eprintln!("[{}] {}", tag.bold(), notification.message);
        debug!(severity = %notification.level, message = %notification.message, "notification");
    }
}

fn manifest_path(path: &Path) -> Result<&str> {
    path.to_str().context("manifest path must be valid utf-8")
}

fn format_millis(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_summary(quest: &QuestDocument) {
    println!("\n{}", style(format!("Quest #{}", quest.id)).bold().cyan());
    println!("  Name:     {}", quest.name);
    println!("  Category: {}", quest.category);
    println!("  Issuer:   {}", quest.issuer);
    println!("  Starts:   {}", format_millis(quest.start_time));
    println!("  Ends:     {}", format_millis(quest.expiry));
    println!("  Reward:   {}", quest.rewards_title);
    for boost in &quest.boosts {
        println!(
            "  Boost:    {} to {} winners{}",
            boost.amount,
            boost.num_of_winners,
            if boost.hidden { " (hidden)" } else { "" }
        );
    }
    let status = if quest.disabled {
        style("disabled").yellow()
    } else {
        style("enabled").green()
    };
    println!("  Status:   {status}");
}

/// Walk forward until the summary step, saving each step on the way
async fn advance_to_summary(wizard: &mut QuestWizard) -> Result<()> {
    while wizard.current_step() != Step::Summary {
        let from = wizard.current_step();
        let to = wizard.next().await.context("advance wizard")?;
        if to == from {
            bail!("wizard stopped at the {from} step");
        }
        debug!(from = %from, to = %to, "wizard advanced");
    }
    Ok(())
}

pub async fn run_create(config: Option<AdminConfig>, manifest: &Path, dry_run: bool) -> Result<()> {
    let manifest = QuestManifest::from_file(manifest_path(manifest)?).context("load manifest")?;
    manifest.validate(true)?;
    info!(tasks = manifest.tasks.len(), "manifest loaded");

    if dry_run {
        info!("dry-run requested; manifest validated");
        return Ok(());
    }

    let config = config.context("--config is required to create a quest")?;
    let service: Arc<dyn AdminService> = Arc::new(config.build_client()?);
    let mut wizard = QuestWizard::create(service, Arc::new(ConsoleNotifier))?;
    manifest.apply_to(&mut wizard)?;

    let start = manifest.quest.start_time.unwrap_or_default().to_string();
    let end = manifest.quest.expiry.unwrap_or_default().to_string();
    if !wizard.set_start_time(&start) || !wizard.set_end_time(&end) {
        bail!("quest dates rejected");
    }

    advance_to_summary(&mut wizard).await?;
    if let Some(quest) = wizard.summary() {
        print_summary(quest);
    }
    Ok(())
}

pub async fn run_edit(
    config: AdminConfig,
    quest_id: i64,
    manifest: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let manifest = match manifest {
        Some(path) => {
            let manifest =
                QuestManifest::from_file(manifest_path(path)?).context("load manifest")?;
            manifest.validate(false)?;
            Some(manifest)
        }
        None => None,
    };

    let service: Arc<dyn AdminService> = Arc::new(config.build_client()?);
    let mut wizard =
        QuestWizard::load_edit(service, Arc::new(ConsoleNotifier), quest_id, Step::Details).await?;

    let Some(manifest) = manifest else {
        print!("{}", QuestManifest::from_wizard(&wizard).to_yaml()?);
        return Ok(());
    };

    manifest.apply_to(&mut wizard)?;
    let end = manifest.quest.expiry.map(|expiry| expiry.to_string());
    if let Some(end) = end {
        if !wizard.set_end_time(&end) {
            bail!("quest end time rejected");
        }
    }

    if dry_run {
        info!(quest_id, tasks = wizard.tasks().len(), "dry-run requested; manifest applies cleanly");
        return Ok(());
    }

    advance_to_summary(&mut wizard).await?;
    if let Some(quest) = wizard.summary() {
        print_summary(quest);
    }
    Ok(())
}

pub async fn run_publish(config: AdminConfig, quest_id: i64, disable: bool) -> Result<()> {
    let service: Arc<dyn AdminService> = Arc::new(config.build_client()?);
    let mut wizard =
        QuestWizard::load_edit(service, Arc::new(ConsoleNotifier), quest_id, Step::Summary).await?;
    wizard.publish(disable).await?;
    if let Some(quest) = wizard.summary() {
        print_summary(quest);
    }
    Ok(())
}

pub async fn run_analytics(config: AdminConfig, quest_id: Option<i64>) -> Result<()> {
    let client = config.build_client()?;
    match quest_id {
        Some(quest_id) => {
            let analytics = load_quest_analytics(&client, quest_id).await;
            print!("{}", analytics.render());
        }
        None => {
            let quests = list_quests(&client).await.context("list quests")?;
            for quest in quests {
                let status = if quest.disabled { " (disabled)" } else { "" };
                println!("{:>6}  {}{status}", quest.id, quest.name);
            }
        }
    }
    Ok(())
}

pub async fn run_download(
    config: AdminConfig,
    kind: ExportKind,
    id: i64,
    cancel: CancellationToken,
) -> Result<()> {
    let client = config.build_client()?;
    let notifier = ConsoleNotifier;
    let downloader = Downloader::new(&notifier, config.download_dir());
    match downloader.export(&client, kind, id, &cancel).await? {
        Some(path) => println!("{}", path.display()),
        None => info!("download cancelled"),
    }
    Ok(())
}
