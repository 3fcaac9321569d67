//! Help widgets on the client dashboard: the sales contact card and the help
//! center article list.

use shared::protocol::SalesRep;
use tracing::debug;

use crate::{LinkOpener, LinkTarget, Mailer, ModalController, Navigator};

/// Placeholder rep name the CRM assigns to accounts without a dedicated salesperson.
const HOUSE_ACCOUNT_REP: &str = "House Account SR";

pub const HELP_CENTER_HEADER: &str = "Help Center";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesContact {
    Representative {
        title: &'static str,
        name: Option<String>,
        email: String,
        phone: Option<String>,
    },
    ContactUs {
        title: &'static str,
        link_text: &'static str,
    },
}

impl SalesContact {
    pub fn from_rep(rep: &SalesRep) -> Self {
        let email = rep
            .sr_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());

        let Some(email) = email else {
            return Self::ContactUs {
                title: "Contact Us",
                link_text: "Get in touch",
            };
        };

        let is_house_account = rep.sr_name.as_deref() == Some(HOUSE_ACCOUNT_REP);
        Self::Representative {
            title: if is_house_account {
                "Business Development Team"
            } else {
                "Sales Representative"
            },
            name: rep.sr_name.clone().filter(|_| !is_house_account),
            email: email.to_string(),
            phone: rep.sr_phone.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Representative { title, .. } | Self::ContactUs { title, .. } => *title,
        }
    }

    /// Email address click for a representative; opens the contact modal otherwise.
    pub fn activate(&self, mailer: &dyn Mailer, modals: &dyn ModalController) {
        match self {
            Self::Representative { .. } => mailer.send_mail(),
            Self::ContactUs { .. } => modals.toggle_contact(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Navigate(String),
    OpenUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpItem {
    pub header: String,
    pub description: String,
    pub action: HelpAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpLayout {
    Desktop,
    Mobile,
}

impl HelpLayout {
    pub fn wrapper_class(self) -> &'static str {
        match self {
            Self::Desktop => "helpfulWrapper",
            Self::Mobile => "helpfulMobileWrapper",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HelpCenter {
    layout: HelpLayout,
    items: Vec<HelpItem>,
    articles_url: String,
}

impl HelpCenter {
    pub fn new(mobile_view: bool, items: Vec<HelpItem>, articles_url: impl Into<String>) -> Self {
        Self {
            layout: if mobile_view {
                HelpLayout::Mobile
            } else {
                HelpLayout::Desktop
            },
            items,
            articles_url: articles_url.into(),
        }
    }

    pub fn header(&self) -> &'static str {
        HELP_CENTER_HEADER
    }

    pub fn layout(&self) -> HelpLayout {
        self.layout
    }

    pub fn items(&self) -> &[HelpItem] {
        &self.items
    }

    /// Runs the action of the item at `position`; returns false if there is none.
    pub fn activate(
        &self,
        position: usize,
        navigator: &dyn Navigator,
        links: &dyn LinkOpener,
    ) -> bool {
        let Some(item) = self.items.get(position) else {
            debug!(position, "no help item at position");
            return false;
        };
        match &item.action {
            HelpAction::Navigate(path) => navigator.navigate(path),
            HelpAction::OpenUrl(url) => links.open(url, LinkTarget::NewTab),
        }
        true
    }

    pub fn view_all_articles(&self, links: &dyn LinkOpener) {
        links.open(&self.articles_url, LinkTarget::NewTab);
    }
}
