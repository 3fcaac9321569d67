use std::sync::Mutex;

use shared::domain::ProjectId;

use crate::{LinkOpener, LinkTarget, Mailer, ModalController, Navigator, UploadResumeModal};

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub(crate) paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths
            .lock()
            .expect("navigator lock")
            .push(path.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ModalCall {
    UploadResume(UploadResumeModal),
    TaskDetails(ProjectId),
    ToggleContact,
}

#[derive(Default)]
pub(crate) struct RecordingModals {
    pub(crate) calls: Mutex<Vec<ModalCall>>,
}

impl RecordingModals {
    pub(crate) fn calls(&self) -> Vec<ModalCall> {
        self.calls.lock().expect("modal lock").clone()
    }
}

impl ModalController for RecordingModals {
    fn open_upload_resume(&self, state: UploadResumeModal) {
        self.calls
            .lock()
            .expect("modal lock")
            .push(ModalCall::UploadResume(state));
    }

    fn show_task_details(&self, project_id: &ProjectId) {
        self.calls
            .lock()
            .expect("modal lock")
            .push(ModalCall::TaskDetails(project_id.clone()));
    }

    fn toggle_contact(&self) {
        self.calls
            .lock()
            .expect("modal lock")
            .push(ModalCall::ToggleContact);
    }
}

#[derive(Default)]
pub(crate) struct RecordingMailer {
    pub(crate) sent: Mutex<u32>,
}

impl Mailer for RecordingMailer {
    fn send_mail(&self) {
        *self.sent.lock().expect("mailer lock") += 1;
    }
}

#[derive(Default)]
pub(crate) struct RecordingLinks {
    pub(crate) opened: Mutex<Vec<(String, &'static str)>>,
}

impl LinkOpener for RecordingLinks {
    fn open(&self, url: &str, target: LinkTarget) {
        self.opened
            .lock()
            .expect("links lock")
            .push((url.to_string(), target.as_str()));
    }
}
