//! PageFrame: standard root wrapper for every page.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`                  : `"{entity}--{category}"`, e.g. `"a001_order--list"`
//!   - `data-page-category`  : one of the PAGE_CAT_* constants
//!
//! Usage:
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="a001_order--list" category=PAGE_CAT_LIST>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets standard metadata on every page.
///
/// Adds the BEM modifier class based on category:
/// - `list`   → `page`
/// - `system` → `page page--system`
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = page_class(category, class);

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}

fn page_class(category: &str, extra: &str) -> String {
    let base_class = match category {
        PAGE_CAT_LIST => "page",
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    if extra.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {extra}")
    }
}
