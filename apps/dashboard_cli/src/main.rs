use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dashboard_core::{
    carousel::Carousel,
    help::{HelpCenter, SalesContact},
    jobs::{JobsBody, JobsPanel, JobsTab, LongDate, OpenBidsBody, OpenBidsList},
    login::MemorySessionStore,
    profile::{ProfileActions, ProfileCard, ProfileStatus},
    stats::{QuickStatsPanel, StatsFilter, SymbolCurrency},
    endpoint, ActionPanel, HttpLoginApi, InstructorScope, LinkOpener, LinkTarget, LoginFlow,
    LoginForm, LoginOutcome, Mailer, ModalController, Navigator, UploadResumeModal,
};
use shared::{domain::ProjectId, protocol::DashboardSnapshot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod config;

use config::load_settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dashboard {
    Client,
    Talent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatsRange {
    ThisMonth,
    AllTime,
}

impl From<StatsRange> for StatsFilter {
    fn from(range: StatsRange) -> Self {
        match range {
            StatsRange::ThisMonth => StatsFilter::ThisMonth,
            StatsRange::AllTime => StatsFilter::AllTime,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Render a marketplace dashboard from a fetched snapshot")]
struct Cli {
    /// Overrides `api_base_url` from dashboard.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Log in with this email before rendering.
    #[arg(long, requires = "password")]
    email: Option<String>,
    #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// JSON dashboard snapshot; overrides `snapshot_path`.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "talent")]
    dashboard: Dashboard,
    /// `all` or an agency member's instr id.
    #[arg(long, default_value = "all")]
    instructor: InstructorScope,
    #[arg(long, value_enum, default_value = "this-month")]
    stats: StatsRange,
    /// Activate the pending action with this exact label.
    #[arg(long)]
    activate: Option<String>,
    #[arg(long)]
    mobile: bool,
}

/// Prints every side effect the dashboard asks for.
struct ConsoleShell;

impl Navigator for ConsoleShell {
    fn navigate(&self, path: &str) {
        info!(path, "navigate");
        println!("-> navigate {path}");
    }
}

impl ModalController for ConsoleShell {
    fn open_upload_resume(&self, state: UploadResumeModal) {
        let payload = serde_json::to_string(&state).unwrap_or_default();
        println!("-> open upload-resume modal {payload}");
    }

    fn show_task_details(&self, project_id: &ProjectId) {
        println!("-> show task details for project {project_id}");
    }

    fn toggle_contact(&self) {
        println!("-> toggle contact modal");
    }
}

impl Mailer for ConsoleShell {
    fn send_mail(&self) {
        println!("-> compose email to sales representative");
    }
}

impl LinkOpener for ConsoleShell {
    fn open(&self, url: &str, target: LinkTarget) {
        println!("-> open {url} ({})", target.as_str());
    }
}

impl ProfileActions for ConsoleShell {
    fn set_show_conditions(&self, visible: bool) {
        println!("-> show profile conditions: {visible}");
    }

    fn open_conditions_modal(&self) {
        println!("-> open profile conditions modal");
    }

    fn update_profile(&self) {
        println!("-> open profile editor");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url.clone() {
        settings.api_base_url = api_url;
    }
    if let Some(snapshot) = cli.snapshot.clone() {
        settings.snapshot_path = Some(snapshot);
    }

    let shell = ConsoleShell;

    if let (Some(email), Some(password)) = (cli.email.as_deref(), cli.password.as_deref()) {
        let api = HttpLoginApi::new(&settings.api_url()?)?;
        info!(url = %api.login_url(), "logging in");
        let flow = LoginFlow::new(Arc::new(api), Arc::new(MemorySessionStore::default()));
        let outcome = flow.submit(&LoginForm::new(email, password), &shell).await;
        if let LoginOutcome::LoggedIn { session, .. } = &outcome {
            println!("Logged in as {} (instr id {})", session.email, session.instr_id);
        } else {
            for message in outcome.error_messages() {
                eprintln!("{message}");
            }
            anyhow::bail!("login failed");
        }
    }

    let Some(snapshot_path) = settings.snapshot_path.clone() else {
        warn!("no snapshot given; nothing to render");
        return Ok(());
    };
    let raw = fs::read_to_string(&snapshot_path)
        .with_context(|| format!("failed to read snapshot '{}'", snapshot_path.display()))?;
    let snapshot: DashboardSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot '{}'", snapshot_path.display()))?;

    let panel = ActionPanel::build(false, &snapshot.actions, cli.instructor);
    print_actions(&panel);
    if let Some(label) = cli.activate.as_deref() {
        match panel.find(label) {
            Some(item) => item.activate(&shell, &shell),
            None => anyhow::bail!("no pending action labelled '{label}'"),
        }
    }

    if let Some(stats) = &snapshot.quick_stats {
        let currency = SymbolCurrency::new(settings.currency_symbol.clone());
        let view = QuickStatsPanel::new(cli.stats.into(), false).view(stats, &currency);
        println!("\n== {} ==", view.header());
        for button in &view.filters {
            let marker = if button.active { "*" } else { " " };
            println!("[{marker}] {}", button.filter);
        }
        println!("Payments Received: {}", view.payments_received.unwrap_or_default());
        println!("Payments Pending: {}", view.payments_pending.unwrap_or_default());
        println!("Upcoming Jobs: {}", view.upcoming_jobs.unwrap_or_default());
        println!("Jobs In Progress: {}", view.jobs_in_progress.unwrap_or_default());
    }

    match cli.dashboard {
        Dashboard::Talent => print_talent_widgets(&snapshot, &cli),
        Dashboard::Client => print_client_widgets(&snapshot, &settings, &cli, &shell)?,
    }

    Ok(())
}

fn print_actions(panel: &ActionPanel) {
    println!("== {} ==", panel.header());
    if let Some(text) = panel.status_text() {
        match panel.completion_icon() {
            Some(icon) => println!("[{icon}] {text}"),
            None => println!("{text}"),
        }
    }
    for (position, item) in panel.items().iter().enumerate() {
        println!("{:>2}. {} -> {:?}", position + 1, item.label, item.route);
    }
    if let Some(prompt) = panel.membership_prompt() {
        println!(" +  {} -> {:?}", prompt.label, prompt.route);
    }
}

/// Resolves a marketing image name under the API base, keeping its path prefix.
fn image_url(base: &Url, name: &str) -> String {
    endpoint(base, name)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| name.to_string())
}

fn print_talent_widgets(snapshot: &DashboardSnapshot, cli: &Cli) {
    let dates = LongDate;
    if cli.mobile {
        let list = OpenBidsList::default();
        println!("\n== {} ==", list.header());
        match list.view(false, &snapshot.open_bids, &dates) {
            OpenBidsBody::Loading => {}
            OpenBidsBody::Empty { title, detail } => println!("{title}\n{detail}"),
            OpenBidsBody::Rows(rows) => {
                for row in rows {
                    println!("{} | {} | placed {}", row.job_label, row.title, row.proposal_date);
                }
            }
        }
    } else {
        let mut tabs = JobsPanel::new(JobsTab::UpcomingJobs);
        for tab in [JobsTab::UpcomingJobs, JobsTab::OpenBids] {
            tabs.toggle(tab, &mut |key| info!(tab = key, "jobs tab selected"));
            let view = tabs.view(false, &snapshot.upcoming_jobs, &snapshot.open_bids, &dates);
            println!("\n== {} ==", tab.label());
            if let Some(text) = view.body.status_text() {
                println!("{text}");
            }
            match view.body {
                JobsBody::Upcoming(rows) => {
                    for row in rows {
                        println!(
                            "{} | {} | {} | {} action(s)",
                            row.start_date, row.title, row.location, row.actions_required
                        );
                    }
                }
                JobsBody::Bids(rows) => {
                    for row in rows {
                        println!("{} | {} | placed {}", row.job_label, row.title, row.proposal_date);
                    }
                }
                JobsBody::Loading | JobsBody::Empty(_) => {}
            }
        }
    }

    if let Some(profile) = &snapshot.profile {
        let status = match profile.profile_status.parse::<ProfileStatus>() {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "falling back to incomplete profile status");
                ProfileStatus::Incomplete
            }
        };
        let card = ProfileCard {
            status,
            steps_required: profile.steps_required,
            conditions: profile.conditions.clone(),
            show_full_profile_button: true,
        };
        let view = card.view();
        println!("\n{} {}", view.label, view.status);
        if let Some(upgrade) = &view.upgrade {
            println!("{} {}", upgrade.steps_text, upgrade.next_status);
        }
        for group in &view.conditions {
            println!("  {}", group.title);
            for condition in &group.conditions {
                let mark = if condition.complete { "x" } else { " " };
                println!("    [{mark}] {}", condition.title);
            }
        }
        if let Some(button) = view.button_text {
            println!("[{button}]");
        }
    }
}

fn print_client_widgets(
    snapshot: &DashboardSnapshot,
    settings: &config::Settings,
    cli: &Cli,
    shell: &ConsoleShell,
) -> Result<()> {
    let carousel = Carousel::new(snapshot.marketing.clone());
    let images = settings.api_url()?;
    if let Some(card) = carousel.card_view(|name| image_url(&images, name), str::to_string) {
        println!("\n== {} ==", card.heading);
        println!("{}", card.content);
        println!("[{}] ({})", card.button_text, card.image_url);
        if card.show_arrows {
            let dots: String = card
                .indicators
                .iter()
                .map(|dot| if dot.active { '●' } else { '○' })
                .collect();
            println!("< {dots} >");
        }
    }

    let contact = SalesContact::from_rep(&snapshot.sales_rep.clone().unwrap_or_default());
    println!("\n== {} ==", contact.title());
    match &contact {
        SalesContact::Representative {
            name, email, phone, ..
        } => {
            if let Some(name) = name {
                println!("{name}");
            }
            println!("{email}");
            if let Some(phone) = phone {
                println!("{phone}");
            }
        }
        SalesContact::ContactUs { link_text, .. } => println!("[{link_text}]"),
    }

    let help = HelpCenter::new(cli.mobile, Vec::new(), settings.help_center()?.to_string());
    println!("\n== {} ({}) ==", help.header(), help.layout().wrapper_class());
    help.view_all_articles(shell);

    Ok(())
}
