//! Headless core of the client and talent dashboards: turns fetched data into
//! view models and routes user intents to explicit collaborators.

use serde::{Deserialize, Serialize};
use shared::domain::{InstrId, ProjectId};
use url::Url;

pub mod actions;
pub mod carousel;
pub mod help;
pub mod jobs;
pub mod login;
pub mod profile;
pub mod stats;

pub use actions::{
    aggregate, membership_prompt, route, ActionItem, ActionPanel, ActionRecord, InstructorScope,
    LegalDocumentKind, NavigationTarget, PanelState, Route,
};
pub use login::{HttpLoginApi, LoginApi, LoginError, LoginFlow, LoginForm, LoginOutcome, Session};

/// Copy shown by every list panel while its data is being fetched.
pub const LOADING_TEXT: &str = "Getting Details... Please Wait";

/// Performs page transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// State handed to the upload-resume modal, serialized as `{showModal, instrId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeModal {
    pub show_modal: bool,
    pub instr_id: Option<InstrId>,
}

impl UploadResumeModal {
    pub fn open_for(instr_id: Option<InstrId>) -> Self {
        Self {
            show_modal: true,
            instr_id,
        }
    }
}

pub trait ModalController: Send + Sync {
    fn open_upload_resume(&self, state: UploadResumeModal);
    fn show_task_details(&self, project_id: &ProjectId);
    fn toggle_contact(&self);
}

pub trait Mailer: Send + Sync {
    fn send_mail(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    NewTab,
    SameTab,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewTab => "_blank",
            Self::SameTab => "_self",
        }
    }
}

/// Opens URLs outside the application router.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str, target: LinkTarget);
}

/// Joins `path` under the base URL, keeping any path prefix the base already has.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
