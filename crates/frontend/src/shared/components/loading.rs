use leptos::prelude::*;
use thaw::*;

/// Spinner shown in place of page content while a request is outstanding
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading">
            <Spinner />
            <span class="loading__text">"Loading..."</span>
        </div>
    }
}
