/*
[INPUT]:  Wizard mode (create or edit)
[OUTPUT]: Step sequence and the QuestWizard controller
[POS]:    Wizard layer - module root
[UPDATE]: When a step is added to either mode
*/

pub mod controller;
pub mod state;

pub use controller::QuestWizard;
pub use state::{BoostForm, NftForm, QuestForm};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Details,
    Rewards,
    Tasks,
    Banner,
    Summary,
}

const CREATE_STEPS: [Step; 4] = [Step::Details, Step::Rewards, Step::Tasks, Step::Summary];
const EDIT_STEPS: [Step; 5] = [
    Step::Details,
    Step::Rewards,
    Step::Tasks,
    Step::Banner,
    Step::Summary,
];

impl WizardMode {
    /// Ordered steps of the mode; the last one is terminal
    pub fn steps(self) -> &'static [Step] {
        match self {
            WizardMode::Create => &CREATE_STEPS,
            WizardMode::Edit => &EDIT_STEPS,
        }
    }

    pub fn index_of(self, step: Step) -> Option<usize> {
        self.steps().iter().position(|candidate| *candidate == step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Details => "Details",
            Step::Rewards => "Rewards",
            Step::Tasks => "Tasks",
            Step::Banner => "Banner",
            Step::Summary => "Summary",
        };
        f.write_str(name)
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "details" => Ok(Step::Details),
            "rewards" => Ok(Step::Rewards),
            "tasks" => Ok(Step::Tasks),
            "banner" => Ok(Step::Banner),
            "summary" => Ok(Step::Summary),
            other => Err(format!("unknown step: {other}")),
        }
    }
}
