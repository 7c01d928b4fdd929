/*
[INPUT]:  Quest manifest YAML (details, rewards, banner, tasks)
[OUTPUT]: Validated manifest applied to a QuestWizard, or exported from one
[POS]:    Configuration layer - declarative quest definition for the CLI
[UPDATE]: When the wizard gains a form field
*/

use anyhow::bail;
use quest_admin_adapter::Banner;
use serde::{Deserialize, Serialize};

use crate::dispatch::task_payload;
use crate::error::WizardError;
use crate::task_entry::TaskEntry;
use crate::validation::validate;
use crate::wizard::{BoostForm, NftForm, QuestForm, QuestWizard};

/// Everything the wizard collects for one quest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestManifest {
    pub quest: QuestForm,
    #[serde(default)]
    pub nft: NftForm,
    /// Present when the quest carries a boost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<BoostForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

impl QuestManifest {
    /// Load a manifest from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_yaml::from_str(&content)?;
        Ok(manifest)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Every reason the wizard would refuse or skip part of this manifest
    pub fn problems(&self, creating: bool) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.quest.details_complete(creating) {
            let needs = if creating {
                "name, desc, category, start_time and expiry"
            } else {
                "name, desc, category and start_time"
            };
            problems.push(format!("quest details need {needs}"));
        }
        if !self.quest.rewards_complete() {
            problems.push("quest needs rewards_title and logo".to_string());
        }
        if !self.nft.is_complete() {
            problems.push("nft needs name and image".to_string());
        }
        if let Some(boost) = &self.boost {
            if !boost.hidden && !boost.is_complete() {
                problems.push("boost needs amount, num_of_winners and token".to_string());
            }
        }
        if let Some(banner) = &self.banner {
            if !banner.is_complete() {
                problems.push("banner needs every field".to_string());
            }
        }

        for (index, entry) in self.tasks.iter().enumerate() {
            if entry.is_placeholder() {
                problems.push(format!("task {index} has no type"));
                continue;
            }
            if let Err(err) = validate(entry) {
                problems.push(format!("task {index}: {err}"));
                continue;
            }
            if !matches!(entry, TaskEntry::Quiz(_)) {
                if let Err(err) = task_payload(entry) {
                    problems.push(format!("task {index}: {err}"));
                }
            }
        }
        problems
    }

    pub fn validate(&self, creating: bool) -> anyhow::Result<()> {
        let problems = self.problems(creating);
        if problems.is_empty() {
            return Ok(());
        }
        bail!("invalid quest manifest: {}", problems.join("; "))
    }

    /// Copy the manifest into the wizard's forms and task list.
    ///
    /// Server ids already known to the wizard (boost) are kept.
    pub fn apply_to(&self, wizard: &mut QuestWizard) -> Result<(), WizardError> {
        wizard.quest = self.quest.clone();
        wizard.nft = self.nft.clone();

        match &self.boost {
            Some(boost) => {
                let known_id = wizard.boost.persisted_id();
                wizard.boost = boost.clone();
                if wizard.boost.persisted_id().is_none() {
                    wizard.boost.id = known_id;
                }
                wizard.show_boost = !boost.hidden;
            }
            None => wizard.show_boost = false,
        }

        if let Some(banner) = &self.banner {
            wizard.banner = banner.clone();
        }
        wizard.replace_tasks(self.tasks.clone())
    }

    /// Manifest describing the wizard's current state
    pub fn from_wizard(wizard: &QuestWizard) -> Self {
        let has_boost = wizard.show_boost || wizard.boost.persisted_id().is_some();
        let banner = Some(wizard.banner.clone()).filter(|banner| *banner != Banner::default());
        Self {
            quest: wizard.quest.clone(),
            nft: wizard.nft.clone(),
            boost: has_boost.then(|| BoostForm {
                hidden: !wizard.show_boost,
                ..wizard.boost.clone()
            }),
            banner,
            tasks: wizard.tasks().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task_entry::{ContractFields, DiscordFields};

    const MANIFEST: &str = r#"
quest:
  name: Bridge
  desc: Bridge some ETH
  category: Defi
  logo: logo.png
  rewards_title: Bridge NFT
  start_time: 1900000000000
  expiry: 1950000000000
nft:
  name: Bridge NFT
  image: nft.png
boost:
  amount: 1000
  num_of_winners: 10
  token: "0x1"
tasks:
  - type: Discord
    data:
      dc_name: Join
      dc_desc: Join the server
      dc_invite_link: https://discord.gg/x
      dc_guild_id: "1"
"#;

    #[test]
    fn manifest_parses_tagged_tasks() {
        let manifest: QuestManifest = serde_yaml::from_str(MANIFEST).expect("manifest parses");

        assert_eq!(manifest.tasks.len(), 1);
        assert!(matches!(
            &manifest.tasks[0],
            TaskEntry::Discord(DiscordFields { dc_guild_id, .. }) if dc_guild_id == "1"
        ));
        assert!(manifest.boost.as_ref().is_some_and(BoostForm::is_complete));
        assert!(manifest.problems(true).is_empty());
    }

    #[test]
    fn problems_name_each_gap() {
        let mut manifest: QuestManifest = serde_yaml::from_str(MANIFEST).expect("manifest parses");
        manifest.quest.expiry = None;
        manifest.tasks.push(TaskEntry::None);
        manifest.tasks.push(TaskEntry::Contract(ContractFields {
            contract_name: "Mint".to_string(),
            contract_desc: "Mint once".to_string(),
            contract_href: "https://example.com".to_string(),
            contract_cta: "Mint".to_string(),
            contract_calls: "not json".to_string(),
            ..ContractFields::default()
        }));

        let problems = manifest.problems(true);
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems[0].starts_with("quest details"));
        assert_eq!(problems[1], "task 1 has no type");
        assert!(problems[2].starts_with("task 2: Contract task has invalid data"));
        assert_eq!(manifest.problems(false).len(), 2);
        assert!(manifest.validate(true).is_err());
    }
}
