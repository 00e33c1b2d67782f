//! Dashboard data: current-month summary plus the latest transactions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard page owns a `DashboardState` signal and calls
//! `load_dashboard` once on mount with a page-scoped cancellation token.
//! Everything shown is computed by the server; this module only fetches,
//! gates, and shapes it into display rows.
//!
//! ERROR HANDLING
//! ==============
//! Both requests run concurrently and the state is replaced only when both
//! succeed. Any other outcome leaves the previous (default) state and pushes
//! at most one toast. A 401 stays silent because the session store's
//! invalidation already redirects to login.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use chrono::{Datelike, NaiveDate};
use tokio_util::sync::CancellationToken;

use crate::net::client::{ApiClient, ApiError};
use crate::net::types::{Category, Expense, ExpenseQuery, Summary, SummaryQuery};
use crate::state::cell::StateCell;
use crate::state::toast::ToastState;
use crate::util::format::{AmountTone, category_swatch, format_inr, format_percentage, format_short_date};

pub const RECENT_EXPENSES_LIMIT: u32 = 5;
pub const CATEGORY_ROWS_LIMIT: usize = 5;
pub const DASHBOARD_ERROR_TITLE: &str = "Error loading dashboard";
pub const DASHBOARD_ERROR_FALLBACK: &str = "Failed to load dashboard data";

const DEFAULT_EXPENSE_ICON: &str = "💰";

/// Rendered dashboard data.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub summary: Option<Summary>,
    pub recent: Vec<Expense>,
    pub loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            summary: None,
            recent: Vec::new(),
            loading: true,
        }
    }
}

/// Both halves of a successful load.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub summary: Summary,
    pub recent: Vec<Expense>,
}

// =============================================================================
// LOADING
// =============================================================================

/// First and last calendar day of `today`'s month.
pub fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let next_month_first = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month_first.and_then(|d| d.pred_opt()).unwrap_or(today);
    (first, last)
}

pub fn summary_query(today: NaiveDate) -> SummaryQuery {
    let (first, last) = month_window(today);
    SummaryQuery {
        date_from: Some(first.format("%Y-%m-%d").to_string()),
        date_to: Some(last.format("%Y-%m-%d").to_string()),
    }
}

pub fn recent_expenses_query() -> ExpenseQuery {
    ExpenseQuery {
        page: Some(1),
        per_page: Some(RECENT_EXPENSES_LIMIT),
        ..ExpenseQuery::default()
    }
}

/// Fetch the month summary and recent expenses concurrently.
///
/// # Errors
///
/// Fails fast with the first `ApiError`. A `success: false` body on either
/// response is reported as `ApiError::Rejected`.
pub async fn fetch_dashboard(api: &ApiClient, today: NaiveDate, cancel: &CancellationToken) -> Result<DashboardData, ApiError> {
    let month = summary_query(today);
    let latest = recent_expenses_query();
    let (summary, recent) = futures::future::try_join(
        api.expense_summary(&month, cancel),
        api.list_expenses(&latest, cancel),
    )
    .await?;

    if !summary.success {
        return Err(ApiError::Rejected { message: summary.message });
    }
    if !recent.success {
        return Err(ApiError::Rejected { message: recent.message });
    }
    Ok(DashboardData {
        summary: summary.data,
        recent: recent.data,
    })
}

/// Load the dashboard into `state`, toasting on user-visible failures.
pub async fn load_dashboard<D, N>(api: &ApiClient, today: NaiveDate, cancel: &CancellationToken, state: &D, toasts: &N)
where
    D: StateCell<DashboardState>,
    N: StateCell<ToastState>,
{
    state.modify(|s| s.loading = true);
    match fetch_dashboard(api, today, cancel).await {
        Ok(data) => state.modify(|s| {
            s.summary = Some(data.summary);
            s.recent = data.recent;
            s.loading = false;
        }),
        // The page is gone; nobody is watching this state any more.
        Err(ApiError::Cancelled) => {}
        Err(error) => {
            state.modify(|s| s.loading = false);
            if error.is_silent() {
                return;
            }
            leptos::logging::warn!("dashboard load failed: {error}");
            let message = error.user_message(DASHBOARD_ERROR_FALLBACK);
            toasts.modify(|t| {
                t.error(DASHBOARD_ERROR_TITLE, message);
            });
        }
    }
}

// =============================================================================
// VIEW MODEL
// =============================================================================

/// Headline cards. Missing summary renders as zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct Totals {
    pub income: String,
    pub expenses: String,
    pub net: String,
    pub net_tone: AmountTone,
}

impl DashboardState {
    pub fn totals(&self) -> Totals {
        let summary = self.summary.clone().unwrap_or_default();
        Totals {
            income: format_inr(summary.total_income),
            expenses: format_inr(summary.total_expenses.abs()),
            net: format_inr(summary.net_amount),
            net_tone: AmountTone::for_balance(summary.net_amount),
        }
    }

    pub fn category_rows(&self) -> Vec<CategoryRow> {
        self.summary
            .as_ref()
            .map(|summary| {
                summary
                    .category_breakdown
                    .iter()
                    .take(CATEGORY_ROWS_LIMIT)
                    .enumerate()
                    .map(|(index, entry)| CategoryRow {
                        name: entry.category.clone(),
                        amount: format_inr(entry.amount),
                        percentage: format_percentage(entry.percentage),
                        swatch: category_swatch(index),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn transaction_rows(&self) -> Vec<TransactionRow> {
        self.recent.iter().map(TransactionRow::from_expense).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    pub name: String,
    pub amount: String,
    pub percentage: String,
    pub swatch: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: String,
    pub icon: String,
    pub name: String,
    /// `15 Jan • UPI`.
    pub meta: String,
    /// Signed display amount, e.g. `-₹250.00`.
    pub amount: String,
    pub tone: AmountTone,
    pub category: String,
}

impl TransactionRow {
    fn from_expense(expense: &Expense) -> Self {
        let category = expense.expense_type.as_ref().map(|t| t.category);
        let tone = AmountTone::for_category(category);
        Self {
            id: expense.id.clone(),
            icon: expense
                .expense_type
                .as_ref()
                .map(|t| t.icon.clone())
                .filter(|icon| !icon.is_empty())
                .unwrap_or_else(|| DEFAULT_EXPENSE_ICON.to_owned()),
            name: expense.expense_type.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
            meta: format!("{} • {}", format_short_date(&expense.date), expense.payment_method),
            amount: format!("{}{}", tone.sign(), format_inr(expense.amount.abs())),
            tone,
            category: category.map(Category::as_str).unwrap_or_default().to_owned(),
        }
    }
}
