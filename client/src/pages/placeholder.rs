//! Guarded routes whose screens are not built yet.

use leptos::prelude::*;

#[component]
pub fn ComingSoon(title: &'static str) -> impl IntoView {
    view! {
        <div class="placeholder-page">
            <h1>{title}</h1>
            <p class="placeholder-page__hint">"Coming soon..."</p>
        </div>
    }
}
