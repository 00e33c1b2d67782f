//! Dashboard page: current-month totals, recent transactions and the top
//! spending categories.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `RequireAuth`. Loads once on mount in the browser; the
//! page-scoped cancellation token is cancelled on unmount so late responses
//! never touch disposed signals.

use leptos::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::state::dashboard::{CategoryRow, DashboardState, TransactionRow};
use crate::state::session::AppSession;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = RwSignal::new(DashboardState::default());

    let cancel = CancellationToken::new();
    on_cleanup({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    #[cfg(feature = "hydrate")]
    {
        let api = session.api().clone();
        let toasts = *session.toasts();
        leptos::task::spawn_local(async move {
            let today = chrono::Local::now().date_naive();
            crate::state::dashboard::load_dashboard(&api, today, &cancel, &state, &toasts).await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, cancel);

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
                <p class="dashboard-page__subtitle">"Overview of your financial activity this month"</p>
            </header>
            <Show when=move || !state.get().loading fallback=|| view! { <DashboardSkeleton/> }>
                <SummaryCards state=state/>
                <div class="dashboard-page__grid">
                    <RecentTransactions state=state/>
                    <CategoryBreakdown state=state/>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn DashboardSkeleton() -> impl IntoView {
    view! {
        <div class="dashboard-page__cards">
            {(0..3).map(|_| view! { <div class="card card--skeleton"></div> }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn SummaryCards(state: RwSignal<DashboardState>) -> impl IntoView {
    let totals = Memo::new(move |_| state.get().totals());

    view! {
        <div class="dashboard-page__cards">
            <div class="card card--income">
                <p class="card__label">"Total Income"</p>
                <p class="card__value">{move || totals.get().income}</p>
            </div>
            <div class="card card--expense">
                <p class="card__label">"Total Expenses"</p>
                <p class="card__value">{move || totals.get().expenses}</p>
            </div>
            <div class="card card--balance">
                <p class="card__label">"Net Balance"</p>
                <p class=move || format!("card__value {}", totals.get().net_tone.class())>
                    {move || totals.get().net}
                </p>
                <p class="card__hint">"Current month balance"</p>
            </div>
        </div>
    }
}

#[component]
fn RecentTransactions(state: RwSignal<DashboardState>) -> impl IntoView {
    let rows = move || state.get().transaction_rows();

    view! {
        <section class="card dashboard-page__recent">
            <h2 class="card__title">"Recent Transactions"</h2>
            <p class="card__description">"Your latest expense entries"</p>
            <Show
                when=move || !rows().is_empty()
                fallback=|| {
                    view! {
                        <div class="empty-state">
                            <p>"No recent transactions"</p>
                            <p class="empty-state__hint">"Start by adding your first expense"</p>
                        </div>
                    }
                }
            >
                <ul class="transaction-list">
                    {move || rows().into_iter().map(transaction_row).collect::<Vec<_>>()}
                </ul>
            </Show>
        </section>
    }
}

fn transaction_row(row: TransactionRow) -> impl IntoView {
    view! {
        <li class="transaction-list__item">
            <span class="transaction-list__icon">{row.icon}</span>
            <div class="transaction-list__text">
                <p class="transaction-list__name">{row.name}</p>
                <p class="transaction-list__meta">{row.meta}</p>
            </div>
            <div class="transaction-list__amount">
                <p class=row.tone.class()>{row.amount}</p>
                <span class="badge">{row.category}</span>
            </div>
        </li>
    }
}

#[component]
fn CategoryBreakdown(state: RwSignal<DashboardState>) -> impl IntoView {
    let rows = move || state.get().category_rows();

    view! {
        <section class="card dashboard-page__categories">
            <h2 class="card__title">"Category Breakdown"</h2>
            <p class="card__description">"Expenses by category this month"</p>
            <Show
                when=move || !rows().is_empty()
                fallback=|| {
                    view! {
                        <div class="empty-state">
                            <p>"No category data available"</p>
                            <p class="empty-state__hint">"Add expenses to see breakdown"</p>
                        </div>
                    }
                }
            >
                <ul class="category-list">
                    {move || rows().into_iter().map(category_row).collect::<Vec<_>>()}
                </ul>
            </Show>
        </section>
    }
}

fn category_row(row: CategoryRow) -> impl IntoView {
    view! {
        <li class="category-list__item">
            <span class="category-list__swatch" style:background-color=row.swatch></span>
            <span class="category-list__name">{row.name}</span>
            <div class="category-list__figures">
                <p class="category-list__amount">{row.amount}</p>
                <p class="category-list__share">{row.percentage}</p>
            </div>
        </li>
    }
}
