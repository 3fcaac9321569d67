//! Upcoming tasks / open proposals: the desktop tab panel and the mobile
//! open-proposals list.

use std::collections::HashSet;

use chrono::NaiveDate;
use shared::{
    domain::{InstrId, JobId, ProjectId},
    protocol::{OpenBid, UpcomingJob},
};

use crate::{Navigator, LOADING_TEXT};

pub const CALENDAR_LIST_PATH: &str = "/calendar-view?view=list";
pub const OPEN_PROPOSALS_PATH: &str = "/open-proposals";
pub const NO_DATA_TEXT: &str = "We currently have no data to show here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobsTab {
    #[default]
    UpcomingJobs,
    OpenBids,
}

impl JobsTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::UpcomingJobs => "Upcoming Tasks",
            Self::OpenBids => "Open Proposals",
        }
    }

    /// Identifier reported to the tab toggle handler.
    pub fn key(self) -> &'static str {
        match self {
            Self::UpcomingJobs => "UpcomingJobs",
            Self::OpenBids => "OpenBids",
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            Self::UpcomingJobs => "No Upcoming Tasks",
            Self::OpenBids => "No Open Proposals",
        }
    }
}

/// Renders API dates (`2024-12-25`) for display.
pub trait DateConverter {
    fn convert(&self, raw: &str) -> String;
}

impl<F> DateConverter for F
where
    F: Fn(&str) -> String,
{
    fn convert(&self, raw: &str) -> String {
        self(raw)
    }
}

/// `2024-12-25` -> `December 25, 2024`. Unparseable input is shown as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongDate;

impl DateConverter for LongDate {
    fn convert(&self, raw: &str) -> String {
        let raw = raw.trim();
        let date_part = raw.split('T').next().unwrap_or(raw);
        match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingJobRow {
    pub job_id: JobId,
    pub title: String,
    pub instructor: String,
    pub location: String,
    pub start_date: String,
    pub actions_required: u32,
}

impl From<&UpcomingJob> for UpcomingJobRow {
    fn from(job: &UpcomingJob) -> Self {
        let instructor = format!("{} {}", job.first_name.trim(), job.last_name.trim())
            .trim()
            .to_string();
        Self {
            job_id: job.job_id.clone(),
            title: job.project_title.clone(),
            instructor,
            location: job.location.clone(),
            start_date: job.start_date.clone(),
            actions_required: job.actions_required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBidRow {
    pub project_id: ProjectId,
    pub instr_id: Option<InstrId>,
    pub title: String,
    pub job_label: String,
    pub start_date: Option<String>,
    pub proposal_date: String,
    pub expanded: bool,
}

fn bid_row(bid: &OpenBid, dates: &dyn DateConverter, expanded: bool) -> OpenBidRow {
    OpenBidRow {
        project_id: bid.project_id.clone(),
        instr_id: bid.instr_id,
        title: bid.project_title.clone(),
        job_label: format!("Job #{}", bid.project_id),
        start_date: bid.start_date.as_deref().map(|raw| dates.convert(raw)),
        proposal_date: dates.convert(&bid.proposal_placed_date),
        expanded,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsBody {
    Loading,
    Empty(&'static str),
    Upcoming(Vec<UpcomingJobRow>),
    Bids(Vec<OpenBidRow>),
}

impl JobsBody {
    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_TEXT),
            Self::Empty(text) => Some(*text),
            Self::Upcoming(_) | Self::Bids(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHeader {
    pub tab: JobsTab,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsPanelView {
    pub tabs: Vec<TabHeader>,
    pub body: JobsBody,
}

/// Desktop panel: two mutually exclusive tabs, each with its own empty state.
#[derive(Debug, Clone, Default)]
pub struct JobsPanel {
    active: JobsTab,
}

impl JobsPanel {
    pub fn new(active: JobsTab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> JobsTab {
        self.active
    }

    pub fn toggle(&mut self, tab: JobsTab, on_toggle: &mut dyn FnMut(&'static str)) {
        self.active = tab;
        on_toggle(tab.key());
    }

    pub fn view(
        &self,
        fetching: bool,
        upcoming: &[UpcomingJob],
        bids: &[OpenBid],
        dates: &dyn DateConverter,
    ) -> JobsPanelView {
        let tabs = [JobsTab::UpcomingJobs, JobsTab::OpenBids]
            .into_iter()
            .map(|tab| TabHeader {
                tab,
                label: tab.label(),
                active: tab == self.active,
            })
            .collect();

        let body = if fetching {
            JobsBody::Loading
        } else {
            match self.active {
                JobsTab::UpcomingJobs if upcoming.is_empty() => {
                    JobsBody::Empty(JobsTab::UpcomingJobs.empty_text())
                }
                JobsTab::UpcomingJobs => {
                    JobsBody::Upcoming(upcoming.iter().map(UpcomingJobRow::from).collect())
                }
                JobsTab::OpenBids if bids.is_empty() => {
                    JobsBody::Empty(JobsTab::OpenBids.empty_text())
                }
                JobsTab::OpenBids => JobsBody::Bids(
                    bids.iter().map(|bid| bid_row(bid, dates, false)).collect(),
                ),
            }
        };

        JobsPanelView { tabs, body }
    }

    pub fn view_all(&self, navigator: &dyn Navigator) {
        navigator.navigate(CALENDAR_LIST_PATH);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenBidsBody {
    Loading,
    Empty {
        title: &'static str,
        detail: &'static str,
    },
    Rows(Vec<OpenBidRow>),
}

/// Mobile open-proposals list with expandable rows.
#[derive(Debug, Clone, Default)]
pub struct OpenBidsList {
    expanded: HashSet<ProjectId>,
}

impl OpenBidsList {
    pub fn header(&self) -> &'static str {
        JobsTab::OpenBids.label()
    }

    pub fn view(
        &self,
        fetching: bool,
        bids: &[OpenBid],
        dates: &dyn DateConverter,
    ) -> OpenBidsBody {
        if fetching {
            return OpenBidsBody::Loading;
        }
        if bids.is_empty() {
            return OpenBidsBody::Empty {
                title: JobsTab::OpenBids.empty_text(),
                detail: NO_DATA_TEXT,
            };
        }
        OpenBidsBody::Rows(
            bids.iter()
                .map(|bid| bid_row(bid, dates, self.expanded.contains(&bid.project_id)))
                .collect(),
        )
    }

    /// Flips a row open or closed, reports the clicked project to the handler
    /// and returns whether the row is now expanded.
    pub fn toggle_row(
        &mut self,
        project_id: &ProjectId,
        on_toggle: &mut dyn FnMut(&ProjectId),
    ) -> bool {
        let expanded = if self.expanded.remove(project_id) {
            false
        } else {
            self.expanded.insert(project_id.clone());
            true
        };
        on_toggle(project_id);
        expanded
    }

    pub fn view_all(&self, navigator: &dyn Navigator) {
        navigator.navigate(OPEN_PROPOSALS_PATH);
    }
}
