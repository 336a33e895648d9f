use crate::shared::icons::icon;
use leptos::prelude::*;

/// Dismissible error banner
#[component]
pub fn ErrorMessage(
    #[prop(into)]
    text: String,
    /// Called when the user dismisses the banner
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="alert alert--error" role="alert">
            <span class="alert__icon">{icon("alert")}</span>
            <span class="alert__text">{text}</span>
            <button
                class="button button--icon alert__close"
                title="Dismiss"
                on:click=move |_| on_reset.run(())
            >
                {icon("x")}
            </button>
        </div>
    }
}
