/*
[INPUT]:  Admin form edits, quest manifests, server quest records
[OUTPUT]: Quest, boost and NFT form state plus the request bodies built from it
[POS]:    Wizard layer - form state
[UPDATE]: When the quest or boost schema changes
*/

use quest_admin_adapter::{
    BoostDocument, CreateBoost, CreateNftUri, CreateQuest, NftUri, QuestDocument, UpdateBoost,
    UpdateQuest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Token decimals assumed when the admin did not pick a token
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

fn present(value: &str) -> bool {
    !value.is_empty()
}

/// Editable quest fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestForm {
    pub name: String,
    pub desc: String,
    pub category: String,
    pub issuer: String,
    pub logo: String,
    pub rewards_img: String,
    pub rewards_title: String,
    pub img_card: String,
    pub title_card: String,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
    /// Epoch milliseconds
    pub expiry: Option<i64>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory_domain: Option<String>,
}

impl QuestForm {
    /// Details step predicate; `require_expiry` is set in create mode
    pub fn details_complete(&self, require_expiry: bool) -> bool {
        present(&self.name)
            && present(&self.desc)
            && present(&self.category)
            && self.start_time.is_some_and(|t| t != 0)
            && (!require_expiry || self.expiry.is_some_and(|t| t != 0))
    }

    pub fn rewards_complete(&self) -> bool {
        present(&self.rewards_title) && present(&self.logo)
    }

    pub fn to_create(&self) -> Result<CreateQuest, WizardError> {
        let start_time = self
            .start_time
            .ok_or_else(|| WizardError::InvalidInput("start time is not set".to_string()))?;
        Ok(CreateQuest {
            name: self.name.clone(),
            desc: self.desc.clone(),
            category: self.category.clone(),
            issuer: self.issuer.clone(),
            logo: self.logo.clone(),
            rewards_img: self.rewards_img.clone(),
            rewards_title: self.rewards_title.clone(),
            img_card: self.img_card.clone(),
            title_card: self.title_card.clone(),
            start_time,
            expiry: self.expiry,
            disabled: self.disabled,
            mandatory_domain: self.mandatory_domain.clone(),
        })
    }

    /// Full update of every quest field; the banner is left untouched
    pub fn to_update(&self, id: i64) -> UpdateQuest {
        UpdateQuest {
            id,
            name: Some(self.name.clone()),
            desc: Some(self.desc.clone()),
            category: Some(self.category.clone()),
            issuer: Some(self.issuer.clone()),
            logo: Some(self.logo.clone()),
            rewards_img: Some(self.rewards_img.clone()),
            rewards_title: Some(self.rewards_title.clone()),
            img_card: Some(self.img_card.clone()),
            title_card: Some(self.title_card.clone()),
            start_time: self.start_time,
            expiry: self.expiry,
            disabled: Some(self.disabled),
            banner: None,
        }
    }
}

impl From<&QuestDocument> for QuestForm {
    fn from(doc: &QuestDocument) -> Self {
        Self {
            name: doc.name.clone(),
            desc: doc.desc.clone(),
            category: doc.category.clone(),
            issuer: doc.issuer.clone(),
            logo: doc.logo.clone(),
            rewards_img: doc.rewards_img.clone(),
            rewards_title: doc.rewards_title.clone(),
            img_card: doc.img_card.clone(),
            title_card: doc.title_card.clone(),
            start_time: doc.start_time,
            expiry: doc.expiry,
            disabled: doc.disabled,
            mandatory_domain: doc.mandatory_domain.clone(),
        }
    }
}

/// Boost prize pool form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub amount: Option<Decimal>,
    pub num_of_winners: Option<u32>,
    /// Token contract address
    pub token: String,
    pub token_decimals: Option<u32>,
    pub expiry: Option<i64>,
    pub img_url: String,
    pub hidden: bool,
}

impl BoostForm {
    /// Amount, winners and token are all set (zero counts as unset)
    pub fn is_complete(&self) -> bool {
        self.amount.is_some_and(|amount| !amount.is_zero())
            && self.num_of_winners.is_some_and(|winners| winners != 0)
            && present(&self.token)
    }

    /// Complete and carries token decimals; required to create a boost while editing
    pub fn is_creatable(&self) -> bool {
        self.is_complete() && self.token_decimals.is_some_and(|decimals| decimals != 0)
    }

    pub fn persisted_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Create body; the quest expiry stands in when the boost has none
    pub fn to_create(
        &self,
        quest_id: i64,
        quest: &QuestForm,
        hidden: bool,
    ) -> Result<CreateBoost, WizardError> {
        let amount = self
            .amount
            .ok_or_else(|| WizardError::InvalidInput("boost amount is not set".to_string()))?;
        let num_of_winners = self.num_of_winners.ok_or_else(|| {
            WizardError::InvalidInput("boost number of winners is not set".to_string())
        })?;
        let expiry = self
            .expiry
            .or(quest.expiry)
            .ok_or_else(|| WizardError::InvalidInput("boost expiry is not set".to_string()))?;
        let img_url = if present(&self.img_url) {
            self.img_url.clone()
        } else {
            quest.img_card.clone()
        };

        Ok(CreateBoost {
            quest_id,
            name: quest.name.clone(),
            amount,
            num_of_winners,
            token: self.token.clone(),
            token_decimals: self.token_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS),
            expiry,
            img_url,
            hidden,
        })
    }

    pub fn to_update(&self, id: i64, hidden: bool) -> UpdateBoost {
        UpdateBoost {
            id,
            amount: self.amount,
            num_of_winners: self.num_of_winners,
            token: Some(self.token.clone()),
            token_decimals: self.token_decimals,
            expiry: self.expiry,
            img_url: Some(self.img_url.clone()),
            hidden: Some(hidden),
        }
    }
}

impl From<&BoostDocument> for BoostForm {
    fn from(doc: &BoostDocument) -> Self {
        Self {
            id: Some(doc.id),
            amount: Some(doc.amount),
            num_of_winners: Some(doc.num_of_winners),
            token: doc.token.clone(),
            token_decimals: Some(doc.token_decimals),
            expiry: doc.expiry,
            img_url: doc.img_url.clone(),
            hidden: doc.hidden,
        }
    }
}

/// NFT metadata shown for the quest reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NftForm {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl NftForm {
    pub fn is_complete(&self) -> bool {
        present(&self.name) && present(&self.image)
    }

    pub fn to_create(&self, quest_id: i64) -> CreateNftUri {
        CreateNftUri {
            quest_id,
            name: self.name.clone(),
            desc: self.description.clone(),
            image: self.image.clone(),
        }
    }
}

impl From<&NftUri> for NftForm {
    fn from(uri: &NftUri) -> Self {
        Self {
            name: uri.name.clone(),
            description: uri.desc.clone(),
            image: uri.image.clone(),
        }
    }
}
