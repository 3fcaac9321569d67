use super::*;
use crate::test_support::{ModalCall, RecordingModals, RecordingNavigator};
use serde_json::json;

fn client_payload() -> DashboardActionsPayload {
    serde_json::from_value(json!({
        "legalDocumentActions": [
            { "entityType": "NDA", "echoSignKey": "1234", "webText": "Sign NDA Document" },
            { "entityType": "MSA", "echoSignKey": "5678", "webText": "Sign MSA Document" }
        ],
        "projectActions": [
            { "entityType": "Talent Submission", "projectId": "123", "webText": "Talent Submission Pending" },
            { "entityType": "Other", "projectId": "456", "webText": "Other Action Pending" }
        ]
    }))
    .expect("client payload")
}

fn talent_payload(extra: serde_json::Value) -> DashboardActionsPayload {
    let mut base = json!({
        "memberList": ["Member 1"],
        "userData": { "agencyInstrId": 1 },
        "projectActions": [],
        "legalDocumentActions": [],
        "acceptTravelFee": [],
        "resumeAlert": [],
        "paymentAlert": []
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(base).expect("talent payload")
}

fn click(panel: &ActionPanel, label: &str) -> (RecordingNavigator, RecordingModals) {
    let navigator = RecordingNavigator::default();
    let modals = RecordingModals::default();
    panel
        .find(label)
        .unwrap_or_else(|| panic!("no action labelled {label:?}"))
        .activate(&navigator, &modals);
    (navigator, modals)
}

#[test]
fn client_panel_lists_legal_documents_then_projects() {
    let panel = ActionPanel::build(false, &client_payload(), InstructorScope::All);

    assert_eq!(panel.header(), "Actions Required");
    let labels: Vec<_> = panel.items().iter().map(|item| item.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Sign NDA Document",
            "Sign MSA Document",
            "Talent Submission Pending",
            "Other Action Pending",
        ]
    );
}

#[test]
fn nda_action_navigates_to_signing_page() {
    let panel = ActionPanel::build(false, &client_payload(), InstructorScope::All);
    let (navigator, modals) = click(&panel, "Sign NDA Document");
    assert_eq!(navigator.paths(), vec!["/sign-nda/1234"]);
    assert!(modals.calls().is_empty());
}

#[test]
fn msa_action_navigates_to_signing_page() {
    let panel = ActionPanel::build(false, &client_payload(), InstructorScope::All);
    let (navigator, _) = click(&panel, "Sign MSA Document");
    assert_eq!(navigator.paths(), vec!["/sign-msa/5678"]);
}

#[test]
fn talent_submission_navigates_to_job_post() {
    let panel = ActionPanel::build(false, &client_payload(), InstructorScope::All);
    let (navigator, _) = click(&panel, "Talent Submission Pending");
    assert_eq!(navigator.paths(), vec!["/client-job/jobpost/123"]);
}

#[test]
fn other_project_action_navigates_to_job_entity() {
    let panel = ActionPanel::build(false, &client_payload(), InstructorScope::All);
    let (navigator, _) = click(&panel, "Other Action Pending");
    assert_eq!(navigator.paths(), vec!["/client-job/job-entity/1/456"]);
}

#[test]
fn unknown_discriminator_falls_back_to_project_detail() {
    let entity: ActionEntity = serde_json::from_value(json!({
        "entityType": "Invoice Dispute",
        "projectId": 789
    }))
    .expect("entity");
    let record = ActionRecord::from_entity(&entity);

    assert_eq!(record.discriminator(), "Invoice Dispute");
    assert_eq!(record.label(), "Invoice Dispute Action Pending");
    assert_eq!(
        route(&record),
        Route::Navigate(NavigationTarget::JobEntity(ProjectId::new("789")))
    );
}

#[test]
fn missing_identifier_degrades_to_broken_link() {
    let entity: ActionEntity =
        serde_json::from_value(json!({ "entityType": "NDA", "webText": "Sign NDA" }))
            .expect("entity");
    let record = ActionRecord::from_entity(&entity);
    match route(&record) {
        Route::Navigate(target) => assert_eq!(target.path(), "/sign-nda/"),
        other => panic!("unexpected route: {other:?}"),
    }
}

#[test]
fn empty_client_collections_render_terminal_state() {
    let panel = ActionPanel::build(
        false,
        &DashboardActionsPayload::default(),
        InstructorScope::All,
    );
    assert_eq!(panel.state(), &PanelState::AllCaughtUp);
    assert_eq!(panel.status_text(), Some("No Actions Pending"));
    assert!(panel.membership_prompt().is_none());
    assert_eq!(panel.completion_icon(), Some("greenTickComplete"));
    assert!(panel.items().is_empty());
}

#[test]
fn fetching_takes_precedence_over_data() {
    let panel = ActionPanel::build(true, &client_payload(), InstructorScope::All);
    assert_eq!(panel.state(), &PanelState::Loading);
    assert_eq!(panel.status_text(), Some(crate::LOADING_TEXT));
    assert_eq!(panel.completion_icon(), None);
}

#[test]
fn small_agency_gets_add_members_prompt_beside_empty_state() {
    let panel = ActionPanel::build(false, &talent_payload(json!({})), InstructorScope::All);

    assert_eq!(panel.state(), &PanelState::AllCaughtUp);
    assert_eq!(panel.status_text(), Some("No Actions Pending"));
    assert_eq!(panel.completion_icon(), Some("greenTickComplete"));
    assert!(panel.items().is_empty());
    assert_eq!(
        panel.membership_prompt().map(|item| item.label.as_str()),
        Some("Add Members To Your Agency")
    );

    let (navigator, _) = click(&panel, "Add Members To Your Agency");
    assert_eq!(navigator.paths(), vec!["/manage-members"]);
}

#[test]
fn add_members_prompt_does_not_count_as_pending() {
    let payload = talent_payload(json!({
        "resumeAlert": [{ "name": "Resume Missing", "instrId": 1 }]
    }));
    let panel = ActionPanel::build(false, &payload, InstructorScope::All);

    assert_eq!(panel.status_text(), None);
    assert_eq!(panel.items().len(), 1);
    assert!(panel.membership_prompt().is_some());
}

#[test]
fn add_members_prompt_hidden_while_fetching() {
    let panel = ActionPanel::build(true, &talent_payload(json!({})), InstructorScope::All);
    assert_eq!(panel.state(), &PanelState::Loading);
    assert!(panel.membership_prompt().is_none());
}

#[test]
fn add_members_prompt_requires_agency_and_small_roster() {
    let full_agency = talent_payload(json!({ "memberList": ["a", "b"] }));
    assert!(membership_prompt(&full_agency).is_none());

    let freelancer = talent_payload(json!({ "userData": { "agencyInstrId": 0 } }));
    assert!(membership_prompt(&freelancer).is_none());

    let string_id = talent_payload(json!({ "userData": { "agencyInstrId": "7" } }));
    assert!(membership_prompt(&string_id).is_some());
}

#[test]
fn w9_document_is_labelled_with_instructor_and_opens_irs_form() {
    let payload = talent_payload(json!({
        "legalDocumentActions": [{ "type": "W9", "instructorName": "John Doe" }]
    }));
    let panel = ActionPanel::build(false, &payload, InstructorScope::All);
    let (navigator, _) = click(&panel, "Sign your W9 - John Doe");
    assert_eq!(navigator.paths(), vec!["/irs-form"]);
}

#[test]
fn resume_alert_opens_upload_modal_instead_of_navigating() {
    let payload = talent_payload(json!({
        "resumeAlert": [{ "name": "Resume Missing", "instrId": 1 }]
    }));
    let panel = ActionPanel::build(false, &payload, InstructorScope::All);
    let (navigator, modals) = click(&panel, "Resume Missing");

    assert!(navigator.paths().is_empty());
    assert_eq!(
        modals.calls(),
        vec![ModalCall::UploadResume(UploadResumeModal {
            show_modal: true,
            instr_id: Some(InstrId(1)),
        })]
    );
    assert_eq!(
        serde_json::to_value(UploadResumeModal::open_for(Some(InstrId(1)))).expect("json"),
        json!({ "showModal": true, "instrId": 1 })
    );
}

#[test]
fn travel_fee_opens_task_details() {
    let payload = talent_payload(json!({
        "acceptTravelFee": [{ "projectId": "55", "webText": "Accept travel fee for Job #55" }]
    }));
    let panel = ActionPanel::build(false, &payload, InstructorScope::All);
    let (navigator, modals) = click(&panel, "Accept travel fee for Job #55");

    assert!(navigator.paths().is_empty());
    assert_eq!(
        modals.calls(),
        vec![ModalCall::TaskDetails(ProjectId::new("55"))]
    );
}

#[test]
fn talent_panel_keeps_fixed_collection_order() {
    let payload = talent_payload(json!({
        "paymentAlert": [{ "name": "Add payout details", "instrId": 2 }],
        "resumeAlert": [{ "name": "Resume Missing", "instrId": 2 }],
        "acceptTravelFee": [{ "projectId": "9" }],
        "projectActions": [{ "entityType": "Other", "projectId": "8", "webText": "Review job" }],
        "legalDocumentActions": [{ "type": "W9", "instructorName": "Ann Lee" }]
    }));
    let labels: Vec<_> = aggregate(&payload, InstructorScope::All)
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "Sign your W9 - Ann Lee",
            "Review job",
            "Accept Travel Fee",
            "Resume Missing",
            "Add payout details",
        ]
    );
    assert!(membership_prompt(&payload).is_some());
}

#[test]
fn instructor_scope_filters_member_alerts() {
    let payload = talent_payload(json!({
        "memberList": ["a", "b", "c"],
        "resumeAlert": [
            { "name": "Resume Missing - Ann", "instrId": 2 },
            { "name": "Resume Missing - Bo", "instrId": 3 }
        ],
        "paymentAlert": [{ "name": "Payout details needed", "instrId": 3 }]
    }));

    let scope: InstructorScope = "2".parse().expect("scope");
    let labels: Vec<_> = aggregate(&payload, scope)
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(labels, vec!["Resume Missing - Ann"]);

    let all: InstructorScope = "all".parse().expect("scope");
    assert_eq!(all, InstructorScope::All);
    assert_eq!(aggregate(&payload, all).len(), 3);
}

#[test]
fn payment_alert_navigates_to_payment_settings() {
    let record = ActionRecord::PaymentAlert {
        instr_id: Some(InstrId(4)),
        name: "Payout details needed".into(),
    };
    assert_eq!(
        route(&record),
        Route::Navigate(NavigationTarget::PaymentSettings)
    );
}
