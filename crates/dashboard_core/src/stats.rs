//! Quick statistics panel with a two-mode period filter.

use std::fmt;

use shared::protocol::QuickStats;
use tracing::debug;

pub const QUICK_STATS_HEADER: &str = "Quick Statistics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsFilter {
    #[default]
    ThisMonth,
    AllTime,
}

impl StatsFilter {
    pub const ALL: [StatsFilter; 2] = [StatsFilter::ThisMonth, StatsFilter::AllTime];

    pub fn label(self) -> &'static str {
        match self {
            Self::ThisMonth => "This Month",
            Self::AllTime => "All Time",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for StatsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait CurrencyFormatter {
    fn format(&self, amount: f64) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, amount: f64) -> String {
        self(amount)
    }
}

/// Symbol-prefixed amount with thousands separators and two decimals, e.g. `$1,250.00`.
#[derive(Debug, Clone)]
pub struct SymbolCurrency {
    symbol: String,
}

impl SymbolCurrency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for SymbolCurrency {
    fn default() -> Self {
        Self::new("$")
    }
}

impl CurrencyFormatter for SymbolCurrency {
    fn format(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        format!("{sign}{}{grouped}.{cents}", self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: StatsFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStatsView {
    pub filters: Vec<FilterButton>,
    /// `None` while loading.
    pub payments_received: Option<String>,
    pub payments_pending: Option<String>,
    pub upcoming_jobs: Option<String>,
    pub jobs_in_progress: Option<String>,
}

impl QuickStatsView {
    pub fn header(&self) -> &'static str {
        QUICK_STATS_HEADER
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuickStatsPanel {
    selected: StatsFilter,
    loader: bool,
}

impl QuickStatsPanel {
    pub fn new(selected: StatsFilter, loader: bool) -> Self {
        Self { selected, loader }
    }

    pub fn selected(&self) -> StatsFilter {
        self.selected
    }

    pub fn set_loading(&mut self, loader: bool) {
        self.loader = loader;
    }

    pub fn view(&self, stats: &QuickStats, formatter: &dyn CurrencyFormatter) -> QuickStatsView {
        let filters = StatsFilter::ALL
            .into_iter()
            .map(|filter| FilterButton {
                filter,
                active: filter == self.selected,
            })
            .collect();

        if self.loader {
            return QuickStatsView {
                filters,
                payments_received: None,
                payments_pending: None,
                upcoming_jobs: None,
                jobs_in_progress: None,
            };
        }

        let (received, pending) = match self.selected {
            StatsFilter::ThisMonth => (
                stats.this_month_payments_received,
                stats.this_month_payments_pending,
            ),
            StatsFilter::AllTime => (
                stats.all_time_payments_received,
                stats.all_time_payments_pending,
            ),
        };

        QuickStatsView {
            filters,
            payments_received: Some(formatter.format(received)),
            payments_pending: Some(formatter.format(pending)),
            upcoming_jobs: Some(stats.upcoming_jobs.to_string()),
            jobs_in_progress: Some(stats.jobs_in_progress.to_string()),
        }
    }

    /// A filter button was clicked; the handler is told which one.
    pub fn click_filter(&mut self, filter: StatsFilter, on_filter: &mut dyn FnMut(StatsFilter)) {
        self.selected = filter;
        on_filter(filter);
    }

    /// The compact dropdown picked an option by its label. Unknown labels are ignored.
    pub fn select_label(
        &mut self,
        label: &str,
        on_select: &mut dyn FnMut(StatsFilter),
    ) -> Option<StatsFilter> {
        let Some(filter) = StatsFilter::from_label(label) else {
            debug!(label, "ignoring unknown stats filter");
            return None;
        };
        self.selected = filter;
        on_select(filter);
        Some(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> QuickStats {
        QuickStats {
            upcoming_jobs: 10,
            jobs_in_progress: 5,
            this_month_payments_received: 1000.0,
            all_time_payments_received: 5000.0,
            this_month_payments_pending: 200.0,
            all_time_payments_pending: 1000.0,
        }
    }

    fn dollars(amount: f64) -> String {
        format!("${amount}")
    }

    #[test]
    fn this_month_is_active_initially() {
        let view = QuickStatsPanel::default().view(&stats(), &dollars);
        assert_eq!(view.header(), "Quick Statistics");
        let active: Vec<_> = view
            .filters
            .iter()
            .filter(|button| button.active)
            .map(|button| button.filter.label())
            .collect();
        assert_eq!(active, vec!["This Month"]);
    }

    #[test]
    fn shows_this_month_values_through_formatter() {
        let view = QuickStatsPanel::new(StatsFilter::ThisMonth, false).view(&stats(), &dollars);
        assert_eq!(view.payments_received.as_deref(), Some("$1000"));
        assert_eq!(view.payments_pending.as_deref(), Some("$200"));
        assert_eq!(view.upcoming_jobs.as_deref(), Some("10"));
        assert_eq!(view.jobs_in_progress.as_deref(), Some("5"));
    }

    #[test]
    fn all_time_switches_payment_fields() {
        let view = QuickStatsPanel::new(StatsFilter::AllTime, false).view(&stats(), &dollars);
        assert_eq!(view.payments_received.as_deref(), Some("$5000"));
        assert_eq!(view.payments_pending.as_deref(), Some("$1000"));
        assert!(view.filters[1].active && !view.filters[0].active);
    }

    #[test]
    fn loader_suppresses_every_value() {
        let view = QuickStatsPanel::new(StatsFilter::ThisMonth, true).view(&stats(), &dollars);
        assert_eq!(view.payments_received, None);
        assert_eq!(view.payments_pending, None);
        assert_eq!(view.upcoming_jobs, None);
        assert_eq!(view.jobs_in_progress, None);
    }

    #[test]
    fn filter_clicks_are_reported() {
        let mut panel = QuickStatsPanel::default();
        let mut clicked = Vec::new();
        panel.click_filter(StatsFilter::ThisMonth, &mut |f| clicked.push(f));
        panel.click_filter(StatsFilter::AllTime, &mut |f| clicked.push(f));
        assert_eq!(clicked, vec![StatsFilter::ThisMonth, StatsFilter::AllTime]);
        assert_eq!(panel.selected(), StatsFilter::AllTime);
    }

    #[test]
    fn dropdown_selects_by_label() {
        let mut panel = QuickStatsPanel::default();
        let mut selected = None;
        assert_eq!(
            panel.select_label("All Time", &mut |f| selected = Some(f)),
            Some(StatsFilter::AllTime)
        );
        assert_eq!(selected, Some(StatsFilter::AllTime));
        assert_eq!(panel.select_label("Last Year", &mut |_| {}), None);
        assert_eq!(panel.selected(), StatsFilter::AllTime);
    }

    #[test]
    fn symbol_currency_groups_thousands() {
        let usd = SymbolCurrency::default();
        assert_eq!(usd.format(1000.0), "$1,000.00");
        assert_eq!(usd.format(1234567.5), "$1,234,567.50");
        assert_eq!(usd.format(12.0), "$12.00");
        assert_eq!(usd.format(-200.0), "-$200.00");
    }
}
