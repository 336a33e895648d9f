use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires a resolved user
/// Shows fallback while the session is missing or still being restored
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.identity().is_some())
            fallback=|| view! { <div>"Not authenticated. Please login."</div> }
        >
            {children()}
        </Show>
    }
}
