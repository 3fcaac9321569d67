//! Talent profile completeness card.

use std::{fmt, str::FromStr};

use shared::protocol::ProfileConditionGroup;
use thiserror::Error;

pub const PROFILE_STATUS_LABEL: &str = "Profile Status:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileStatus {
    Incomplete,
    Basic,
    Good,
    Better,
    Best,
}

impl ProfileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "Incomplete",
            Self::Basic => "Basic",
            Self::Good => "Good",
            Self::Better => "Better",
            Self::Best => "Best",
        }
    }

    /// The next rung on the ladder; `Best` has none.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Incomplete => Some(Self::Basic),
            Self::Basic => Some(Self::Good),
            Self::Good => Some(Self::Better),
            Self::Better => Some(Self::Best),
            Self::Best => None,
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile status {0:?}")]
pub struct UnknownProfileStatus(pub String);

impl FromStr for ProfileStatus {
    type Err = UnknownProfileStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        [
            Self::Incomplete,
            Self::Basic,
            Self::Good,
            Self::Better,
            Self::Best,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| UnknownProfileStatus(raw.to_string()))
    }
}

/// Callbacks the profile card drives.
pub trait ProfileActions {
    fn set_show_conditions(&self, visible: bool);
    fn open_conditions_modal(&self);
    fn update_profile(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeHint {
    /// e.g. `3 Step(s) to`
    pub steps_text: String,
    pub next_status: ProfileStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStatusView {
    pub label: &'static str,
    pub status: ProfileStatus,
    pub upgrade: Option<UpgradeHint>,
    pub conditions: Vec<ProfileConditionGroup>,
    pub button_text: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub status: ProfileStatus,
    pub steps_required: u32,
    pub conditions: Vec<ProfileConditionGroup>,
    pub show_full_profile_button: bool,
}

impl ProfileCard {
    pub fn view(&self) -> ProfileStatusView {
        let upgrade = self.status.next().map(|next_status| UpgradeHint {
            steps_text: format!("{} Step(s) to", self.steps_required),
            next_status,
        });
        let button_text = self.show_full_profile_button.then_some(match self.status {
            ProfileStatus::Best => "Update Profile",
            _ => "Edit Full Profile",
        });

        ProfileStatusView {
            label: PROFILE_STATUS_LABEL,
            status: self.status,
            upgrade,
            conditions: self.conditions.clone(),
            button_text,
        }
    }

    pub fn hover_info(&self, entered: bool, actions: &dyn ProfileActions) {
        actions.set_show_conditions(entered);
    }

    pub fn click_info(&self, actions: &dyn ProfileActions) {
        actions.open_conditions_modal();
    }

    /// Returns false when the button is hidden and nothing was triggered.
    pub fn click_profile_button(&self, actions: &dyn ProfileActions) -> bool {
        if !self.show_full_profile_button {
            return false;
        }
        actions.update_profile();
        true
    }
}
