use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page header with the dashboard breadcrumb trail: `Dashboard › {title}`
#[component]
pub fn AdminBreadcrumb(
    /// Heading and last breadcrumb segment
    #[prop(into)]
    page_title: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{move || page_title.get()}</h1>
                <nav class="breadcrumb" aria-label="breadcrumb">
                    <span class="breadcrumb__item">"Dashboard"</span>
                    <span class="breadcrumb__separator">{icon("chevron-right")}</span>
                    <span class="breadcrumb__item breadcrumb__item--current">
                        {move || page_title.get()}
                    </span>
                </nav>
            </div>
        </div>
    }
}
