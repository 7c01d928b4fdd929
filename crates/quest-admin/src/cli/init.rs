/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated quest manifest YAML file
[POS]:    CLI initialization layer
[UPDATE]: When QuestManifest schema changes
*/

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use rust_decimal::Decimal;
use std::path::PathBuf;

use quest_admin::manifest::QuestManifest;
use quest_admin::task_entry::{TaskEntry, TaskKind};
use quest_admin::wizard::{BoostForm, NftForm, QuestForm};

fn text(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    Ok(Input::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()?)
}

fn text_or(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
    Ok(Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

/// Prompt every text field of a freshly chosen task kind
fn prompt_task(theme: &ColorfulTheme, kind: TaskKind) -> Result<TaskEntry> {
    let mut entry = TaskEntry::empty(kind);
    let names: Vec<&'static str> = entry.text_fields().into_iter().map(|(name, _)| name).collect();
    for name in names {
        let value = text(theme, name)?;
        entry.set_field(name, &value)?;
    }
    if kind == TaskKind::Balance {
        let contracts = text(theme, "balance_contracts (comma separated)")?;
        entry.set_field("balance_contracts", &contracts)?;
    }
    Ok(entry)
}

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Quest Admin Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new quest manifest.").dim()
    );

    let theme = ColorfulTheme::default();

    println!("\n{}", style("--- Details ---").bold());
    let name = text(&theme, "Quest name")?;
    let desc = text(&theme, "Description")?;
    let categories = vec!["Defi", "NFT", "Gaming", "Social"];
    let category = categories[Select::with_theme(&theme)
        .with_prompt("Category")
        .items(&categories)
        .default(0)
        .interact()?]
    .to_string();
    let issuer = text_or(&theme, "Issuer", "Starknet Quest")?;
    let start_days: i64 = Input::with_theme(&theme)
        .with_prompt("Starts in (days)")
        .default(1)
        .interact_text()?;
    let length_days: i64 = Input::with_theme(&theme)
        .with_prompt("Runs for (days)")
        .default(14)
        .interact_text()?;
    let start = Utc::now() + Duration::days(start_days);
    let expiry = start + Duration::days(length_days);

    println!("\n{}", style("--- Rewards ---").bold());
    let logo = text(&theme, "Logo URL")?;
    let image = text(&theme, "Reward image URL")?;
    let rewards_title = text(&theme, "Reward title")?;

    let quest = QuestForm {
        name: name.clone(),
        desc,
        category,
        issuer,
        logo,
        rewards_img: image.clone(),
        rewards_title: rewards_title.clone(),
        img_card: image.clone(),
        title_card: name,
        start_time: Some(start.timestamp_millis()),
        expiry: Some(expiry.timestamp_millis()),
        ..QuestForm::default()
    };
    let nft = NftForm {
        name: rewards_title,
        description: text_or(&theme, "NFT description", "")?,
        image: image.clone(),
    };

    let boost = if Confirm::with_theme(&theme)
        .with_prompt("Attach a boost?")
        .default(false)
        .interact()?
    {
        let amount: Decimal = Input::with_theme(&theme)
            .with_prompt("Boost amount")
            .interact_text()?;
        let num_of_winners: u32 = Input::with_theme(&theme)
            .with_prompt("Number of winners")
            .interact_text()?;
        let token = text(&theme, "Token address")?;
        let token_decimals: u32 = Input::with_theme(&theme)
            .with_prompt("Token decimals")
            .default(18)
            .interact_text()?;
        Some(BoostForm {
            amount: Some(amount),
            num_of_winners: Some(num_of_winners),
            token,
            token_decimals: Some(token_decimals),
            expiry: Some(expiry.timestamp_millis()),
            img_url: image,
            ..BoostForm::default()
        })
    } else {
        None
    };

    println!("\n{}", style("--- Tasks ---").bold());
    let labels: Vec<&'static str> = TaskKind::ALL.iter().map(|kind| kind.label()).collect();
    let mut tasks = Vec::new();
    while Confirm::with_theme(&theme)
        .with_prompt("Add a task?")
        .default(tasks.is_empty())
        .interact()?
    {
        let kind = TaskKind::ALL[Select::with_theme(&theme)
            .with_prompt("Task type")
            .items(&labels)
            .default(0)
            .interact()?];
        if kind == TaskKind::Quiz {
            println!(
                "{}",
                style("Quiz questions can be added to the manifest by hand.").dim()
            );
        }
        tasks.push(prompt_task(&theme, kind)?);
    }

    let manifest = QuestManifest {
        quest,
        nft,
        boost,
        banner: None,
        tasks,
    };

    let yaml = manifest
        .to_yaml()
        .context("failed to serialize manifest to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write manifest to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Manifest written to: {}", style(output.display()).cyan());

    Ok(())
}
