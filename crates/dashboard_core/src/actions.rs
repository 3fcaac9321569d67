//! Pending-action routing: classifies heterogeneous action records, derives
//! their labels, and maps each to a navigation target or a modal side effect.

use std::{fmt, str::FromStr};

use shared::{
    domain::{EchoSignKey, InstrId, ProjectId},
    protocol::{ActionEntity, AlertEntity, DashboardActionsPayload},
};
use tracing::{debug, warn};

use crate::{ModalController, Navigator, UploadResumeModal, LOADING_TEXT};

pub const ACTIONS_HEADER: &str = "Actions Required";
pub const NO_ACTIONS_TEXT: &str = "No Actions Pending";
pub const COMPLETION_ICON_ALT: &str = "greenTickComplete";
pub const ADD_MEMBERS_TEXT: &str = "Add Members To Your Agency";

/// Agencies with fewer members than this are prompted to add more.
const MIN_AGENCY_MEMBERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalDocumentKind {
    Nda,
    Msa,
    W9,
}

impl LegalDocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nda => "NDA",
            Self::Msa => "MSA",
            Self::W9 => "W9",
        }
    }
}

enum Discriminator {
    Legal(LegalDocumentKind),
    TalentSubmission,
    Other,
}

fn classify(entity_type: &str) -> Discriminator {
    let entity_type = entity_type.trim();
    if entity_type.eq_ignore_ascii_case("nda") {
        Discriminator::Legal(LegalDocumentKind::Nda)
    } else if entity_type.eq_ignore_ascii_case("msa") {
        Discriminator::Legal(LegalDocumentKind::Msa)
    } else if entity_type.eq_ignore_ascii_case("w9") {
        Discriminator::Legal(LegalDocumentKind::W9)
    } else if entity_type.eq_ignore_ascii_case("talent submission") {
        Discriminator::TalentSubmission
    } else {
        Discriminator::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRecord {
    LegalDocument {
        kind: LegalDocumentKind,
        echo_sign_key: Option<EchoSignKey>,
        instructor_name: Option<String>,
        web_text: Option<String>,
    },
    ProjectSubmission {
        project_id: Option<ProjectId>,
        web_text: Option<String>,
    },
    /// `"Other"` and every discriminator this build does not know about.
    OtherProjectAction {
        entity_type: String,
        project_id: Option<ProjectId>,
        web_text: Option<String>,
    },
    TravelFeeAcceptance {
        project_id: Option<ProjectId>,
        web_text: Option<String>,
    },
    ResumeAlert {
        instr_id: Option<InstrId>,
        name: String,
    },
    PaymentAlert {
        instr_id: Option<InstrId>,
        name: String,
    },
    MembershipAlert,
}

impl ActionRecord {
    /// Classifies a legal-document or project entity by its discriminator.
    pub fn from_entity(entity: &ActionEntity) -> Self {
        let entity_type = entity.discriminator().unwrap_or_default();
        match classify(entity_type) {
            Discriminator::Legal(kind) => Self::LegalDocument {
                kind,
                echo_sign_key: entity.echo_sign_key.clone(),
                instructor_name: entity.instructor_name.clone(),
                web_text: entity.web_text.clone(),
            },
            Discriminator::TalentSubmission => Self::ProjectSubmission {
                project_id: entity.project_id.clone(),
                web_text: entity.web_text.clone(),
            },
            Discriminator::Other => Self::OtherProjectAction {
                entity_type: entity_type.to_string(),
                project_id: entity.project_id.clone(),
                web_text: entity.web_text.clone(),
            },
        }
    }

    pub fn travel_fee(entity: &ActionEntity) -> Self {
        Self::TravelFeeAcceptance {
            project_id: entity.project_id.clone(),
            web_text: entity.web_text.clone(),
        }
    }

    pub fn resume_alert(alert: &AlertEntity) -> Self {
        Self::ResumeAlert {
            instr_id: alert.instr_id,
            name: alert.name.clone(),
        }
    }

    pub fn payment_alert(alert: &AlertEntity) -> Self {
        Self::PaymentAlert {
            instr_id: alert.instr_id,
            name: alert.name.clone(),
        }
    }

    pub fn discriminator(&self) -> &str {
        match self {
            Self::LegalDocument { kind, .. } => kind.as_str(),
            Self::ProjectSubmission { .. } => "Talent Submission",
            Self::OtherProjectAction { entity_type, .. } => entity_type,
            Self::TravelFeeAcceptance { .. } => "Travel Fee",
            Self::ResumeAlert { .. } => "Resume",
            Self::PaymentAlert { .. } => "Payment",
            Self::MembershipAlert => "Membership",
        }
    }

    /// Text shown for the record; server-provided `webText` wins where present.
    pub fn label(&self) -> String {
        match self {
            Self::LegalDocument {
                kind: LegalDocumentKind::W9,
                instructor_name,
                ..
            } => format!(
                "Sign your W9 - {}",
                instructor_name.as_deref().unwrap_or_default()
            ),
            Self::LegalDocument { kind, web_text, .. } => web_text
                .clone()
                .unwrap_or_else(|| format!("Sign {} Document", kind.as_str())),
            Self::ProjectSubmission { web_text, .. } => web_text
                .clone()
                .unwrap_or_else(|| "Talent Submission Pending".to_string()),
            Self::OtherProjectAction {
                entity_type,
                web_text,
                ..
            } => web_text
                .clone()
                .unwrap_or_else(|| format!("{entity_type} Action Pending")),
            Self::TravelFeeAcceptance { web_text, .. } => web_text
                .clone()
                .unwrap_or_else(|| "Accept Travel Fee".to_string()),
            Self::ResumeAlert { name, .. } | Self::PaymentAlert { name, .. } => name.clone(),
            Self::MembershipAlert => ADD_MEMBERS_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    SignNda(EchoSignKey),
    SignMsa(EchoSignKey),
    JobPost(ProjectId),
    /// Generic project detail page, also the landing spot for unknown action types.
    JobEntity(ProjectId),
    IrsForm,
    ManageMembers,
    PaymentSettings,
}

impl NavigationTarget {
    pub fn path(&self) -> String {
        match self {
            Self::SignNda(key) => format!("/sign-nda/{key}"),
            Self::SignMsa(key) => format!("/sign-msa/{key}"),
            Self::JobPost(project_id) => format!("/client-job/jobpost/{project_id}"),
            Self::JobEntity(project_id) => format!("/client-job/job-entity/1/{project_id}"),
            Self::IrsForm => "/irs-form".to_string(),
            Self::ManageMembers => "/manage-members".to_string(),
            Self::PaymentSettings => "/payment-settings".to_string(),
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Navigate(NavigationTarget),
    OpenUploadResume(UploadResumeModal),
    ShowTaskDetails(ProjectId),
}

impl Route {
    /// Performs exactly one side effect: a navigation or a modal call.
    pub fn dispatch(&self, navigator: &dyn Navigator, modals: &dyn ModalController) {
        match self {
            Self::Navigate(target) => navigator.navigate(&target.path()),
            Self::OpenUploadResume(state) => modals.open_upload_resume(*state),
            Self::ShowTaskDetails(project_id) => modals.show_task_details(project_id),
        }
    }
}

fn echo_sign_key_or_blank(key: &Option<EchoSignKey>, discriminator: &str) -> EchoSignKey {
    key.clone().unwrap_or_else(|| {
        warn!(discriminator, "action record missing echoSignKey; link will be broken");
        EchoSignKey::new("")
    })
}

fn project_id_or_blank(project_id: &Option<ProjectId>, discriminator: &str) -> ProjectId {
    project_id.clone().unwrap_or_else(|| {
        warn!(discriminator, "action record missing projectId; link will be broken");
        ProjectId::new("")
    })
}

/// Maps a record to where activating it leads. Total over every record.
pub fn route(record: &ActionRecord) -> Route {
    let discriminator = record.discriminator();
    match record {
        ActionRecord::LegalDocument {
            kind: LegalDocumentKind::Nda,
            echo_sign_key,
            ..
        } => Route::Navigate(NavigationTarget::SignNda(echo_sign_key_or_blank(
            echo_sign_key,
            discriminator,
        ))),
        ActionRecord::LegalDocument {
            kind: LegalDocumentKind::Msa,
            echo_sign_key,
            ..
        } => Route::Navigate(NavigationTarget::SignMsa(echo_sign_key_or_blank(
            echo_sign_key,
            discriminator,
        ))),
        ActionRecord::LegalDocument {
            kind: LegalDocumentKind::W9,
            ..
        } => Route::Navigate(NavigationTarget::IrsForm),
        ActionRecord::ProjectSubmission { project_id, .. } => Route::Navigate(
            NavigationTarget::JobPost(project_id_or_blank(project_id, discriminator)),
        ),
        ActionRecord::OtherProjectAction { project_id, .. } => Route::Navigate(
            NavigationTarget::JobEntity(project_id_or_blank(project_id, discriminator)),
        ),
        ActionRecord::TravelFeeAcceptance { project_id, .. } => {
            Route::ShowTaskDetails(project_id_or_blank(project_id, discriminator))
        }
        ActionRecord::ResumeAlert { instr_id, .. } => {
            Route::OpenUploadResume(UploadResumeModal::open_for(*instr_id))
        }
        ActionRecord::PaymentAlert { .. } => Route::Navigate(NavigationTarget::PaymentSettings),
        ActionRecord::MembershipAlert => Route::Navigate(NavigationTarget::ManageMembers),
    }
}

/// Which agency member's alerts to show. Talent dashboards pass `"all"` or a member's instr id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstructorScope {
    #[default]
    All,
    Instructor(InstrId),
}

impl InstructorScope {
    /// Alerts without an instr id cannot be attributed and are kept in every scope.
    pub fn includes(self, instr_id: Option<InstrId>) -> bool {
        match (self, instr_id) {
            (Self::All, _) | (_, None) => true,
            (Self::Instructor(selected), Some(instr_id)) => selected == instr_id,
        }
    }
}

impl FromStr for InstructorScope {
    type Err = std::num::ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") || raw.is_empty() {
            return Ok(Self::All);
        }
        raw.parse().map(|id| Self::Instructor(InstrId(id)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem {
    pub record: ActionRecord,
    pub label: String,
    pub route: Route,
}

impl ActionItem {
    pub fn new(record: ActionRecord) -> Self {
        let label = record.label();
        let route = route(&record);
        Self {
            record,
            label,
            route,
        }
    }

    pub fn activate(&self, navigator: &dyn Navigator, modals: &dyn ModalController) {
        debug!(
            discriminator = self.record.discriminator(),
            label = %self.label,
            "activating pending action"
        );
        self.route.dispatch(navigator, modals);
    }
}

fn needs_more_members(payload: &DashboardActionsPayload) -> bool {
    let is_agency = payload
        .user_data
        .as_ref()
        .and_then(|user| user.agency_instr_id)
        .is_some_and(|agency_instr_id| agency_instr_id.0 > 0);
    is_agency && payload.member_list.len() < MIN_AGENCY_MEMBERS
}

/// Concatenates every fetched collection in panel order: legal documents,
/// project actions, travel fees, resume alerts, then payment alerts.
pub fn aggregate(payload: &DashboardActionsPayload, scope: InstructorScope) -> Vec<ActionItem> {
    let legal = payload
        .legal_document_actions
        .iter()
        .map(ActionRecord::from_entity);
    let projects = payload.project_actions.iter().map(ActionRecord::from_entity);
    let travel_fees = payload.accept_travel_fee.iter().map(ActionRecord::travel_fee);
    let resumes = payload
        .resume_alert
        .iter()
        .filter(|alert| scope.includes(alert.instr_id))
        .map(ActionRecord::resume_alert);
    let payments = payload
        .payment_alert
        .iter()
        .filter(|alert| scope.includes(alert.instr_id))
        .map(ActionRecord::payment_alert);

    legal
        .chain(projects)
        .chain(travel_fees)
        .chain(resumes)
        .chain(payments)
        .map(ActionItem::new)
        .collect()
}

/// "Add Members To Your Agency" for agencies with a short roster. It is shown
/// beside the list and never counts as a pending action.
pub fn membership_prompt(payload: &DashboardActionsPayload) -> Option<ActionItem> {
    needs_more_members(payload).then(|| ActionItem::new(ActionRecord::MembershipAlert))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Loading,
    /// Terminal empty state: nothing left for the user to do.
    AllCaughtUp,
    Pending(Vec<ActionItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPanel {
    state: PanelState,
    membership_prompt: Option<ActionItem>,
}

impl ActionPanel {
    /// The membership prompt is dropped while fetching.
    pub fn new(
        fetching: bool,
        items: Vec<ActionItem>,
        membership_prompt: Option<ActionItem>,
    ) -> Self {
        let state = if fetching {
            PanelState::Loading
        } else if items.is_empty() {
            PanelState::AllCaughtUp
        } else {
            PanelState::Pending(items)
        };
        Self {
            state,
            membership_prompt: membership_prompt.filter(|_| !fetching),
        }
    }

    pub fn build(fetching: bool, payload: &DashboardActionsPayload, scope: InstructorScope) -> Self {
        Self::new(fetching, aggregate(payload, scope), membership_prompt(payload))
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn header(&self) -> &'static str {
        ACTIONS_HEADER
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self.state {
            PanelState::Loading => Some(LOADING_TEXT),
            PanelState::AllCaughtUp => Some(NO_ACTIONS_TEXT),
            PanelState::Pending(_) => None,
        }
    }

    pub fn completion_icon(&self) -> Option<&'static str> {
        matches!(self.state, PanelState::AllCaughtUp).then_some(COMPLETION_ICON_ALT)
    }

    pub fn items(&self) -> &[ActionItem] {
        match &self.state {
            PanelState::Pending(items) => items,
            PanelState::Loading | PanelState::AllCaughtUp => &[],
        }
    }

    pub fn membership_prompt(&self) -> Option<&ActionItem> {
        self.membership_prompt.as_ref()
    }

    /// Looks through the pending items, then the membership prompt.
    pub fn find(&self, label: &str) -> Option<&ActionItem> {
        self.items()
            .iter()
            .chain(self.membership_prompt.as_ref())
            .find(|item| item.label == label)
    }
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
