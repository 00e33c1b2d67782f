//! Toast host: renders `ToastState` and dismisses entries on a timer.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState};
#[cfg(feature = "hydrate")]
use crate::state::toast::TOAST_DURATION_MS;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast toasts=toasts/> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, toasts: RwSignal<ToastState>) -> impl IntoView {
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || toasts.update(|t| t.dismiss(id))).forget();

    view! {
        <div class=toast.variant.class() role="status">
            <div class="toast__body">
                <p class="toast__title">{toast.title}</p>
                {toast.description.map(|text| view! { <p class="toast__description">{text}</p> })}
            </div>
            <button
                class="toast__close"
                aria-label="Dismiss"
                on:click=move |_| toasts.update(|t| t.dismiss(id))
            >
                "×"
            </button>
        </div>
    }
}
