use serde::{Deserialize, Serialize};

use crate::domain::{EchoSignKey, InstrId, JobId, LoginId, ProjectId};

/// A legal-document or project action as sent by the API. Which fields are
/// meaningful depends on the discriminator; talent-side legal documents carry
/// it under `type` instead of `entityType`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub legacy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echo_sign_key: Option<EchoSignKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
}

impl ActionEntity {
    /// `entityType` wins when a record carries both spellings.
    pub fn discriminator(&self) -> Option<&str> {
        self.entity_type.as_deref().or(self.legacy_type.as_deref())
    }
}

/// Resume and payment alerts share one shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertEntity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instr_id: Option<InstrId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgencyUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_instr_id: Option<InstrId>,
}

/// Every pending-action collection a dashboard may receive. Client dashboards
/// only fill the legal document and project collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardActionsPayload {
    pub legal_document_actions: Vec<ActionEntity>,
    pub project_actions: Vec<ActionEntity>,
    pub accept_travel_fee: Vec<ActionEntity>,
    pub resume_alert: Vec<AlertEntity>,
    pub payment_alert: Vec<AlertEntity>,
    /// Only the length is used; member entries vary in shape between endpoints.
    pub member_list: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<AgencyUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub login_id: LoginId,
    pub instr_id: InstrId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited_page: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickStats {
    pub upcoming_jobs: u32,
    pub jobs_in_progress: u32,
    pub this_month_payments_received: f64,
    pub all_time_payments_received: f64,
    pub this_month_payments_pending: f64,
    pub all_time_payments_pending: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingJob {
    #[serde(rename = "jobID")]
    pub job_id: JobId,
    pub project_title: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub location: String,
    pub start_date: String,
    #[serde(rename = "noofActionReq", default)]
    pub actions_required: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenBid {
    pub project_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_id: Option<InstrId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub project_title: String,
    pub proposal_placed_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingItem {
    pub image_name: String,
    pub heading: String,
    pub content: String,
    pub button_text: String,
    pub button_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesRep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sr_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sr_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sr_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCondition {
    pub title: String,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConditionGroup {
    pub title: String,
    #[serde(default)]
    pub conditions: Vec<ProfileCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile_status: String,
    #[serde(rename = "noOfStepsRequired", default)]
    pub steps_required: u32,
    #[serde(default)]
    pub conditions: Vec<ProfileConditionGroup>,
}

/// Everything a dashboard page has fetched, in one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSnapshot {
    pub actions: DashboardActionsPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_stats: Option<QuickStats>,
    pub upcoming_jobs: Vec<UpcomingJob>,
    pub open_bids: Vec<OpenBid>,
    pub marketing: Vec<MarketingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rep: Option<SalesRep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talent_legal_documents_use_type_as_discriminator() {
        let entity: ActionEntity =
            serde_json::from_str(r#"{"type":"W9","instructorName":"John Doe"}"#).expect("w9");
        assert_eq!(entity.discriminator(), Some("W9"));
        assert_eq!(entity.instructor_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn record_with_both_discriminator_spellings_prefers_entity_type() {
        let payload: DashboardActionsPayload = serde_json::from_str(
            r#"{"legalDocumentActions":[{"type":"W9","entityType":"NDA","echoSignKey":"1"}]}"#,
        )
        .expect("payload");
        assert_eq!(payload.legal_document_actions[0].discriminator(), Some("NDA"));
    }

    #[test]
    fn agency_instr_id_accepts_numeric_string() {
        let payload: DashboardActionsPayload = serde_json::from_str(
            r#"{"memberList":["Member 1"],"userData":{"agencyInstrId":"1"}}"#,
        )
        .expect("payload");
        let user = payload.user_data.expect("user data");
        assert_eq!(user.agency_instr_id, Some(InstrId(1)));
    }

    #[test]
    fn upcoming_job_reads_legacy_field_names() {
        let job: UpcomingJob = serde_json::from_str(
            r#"{"jobID":"1","projectTitle":"Job 1","firstName":"John","lastName":"Doe",
                "location":"Location 1","startDate":"2024-12-31","noofActionReq":1}"#,
        )
        .expect("job");
        assert_eq!(job.job_id, JobId::new("1"));
        assert_eq!(job.actions_required, 1);
    }

    #[test]
    fn empty_payload_defaults_every_collection() {
        let payload: DashboardActionsPayload = serde_json::from_str("{}").expect("payload");
        assert!(payload.legal_document_actions.is_empty());
        assert!(payload.user_data.is_none());
    }
}
