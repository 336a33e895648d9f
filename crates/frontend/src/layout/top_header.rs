//! TopHeader component - application top navigation bar.
//!
//! Contains the application title, the signed-in user and the logout action.

use crate::shared::icons::icon;
use crate::system::auth::context::{sign_out, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| sign_out(set_auth_state);

    let role = move || {
        auth_state.with(|s| match s.user_info.as_ref() {
            Some(u) if u.is_admin => "Admin",
            Some(_) => "Customer",
            None => "",
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                {icon("orders")}
                <span class="top-header__title">"Storefront Dashboard"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__user-name">
                        {move || auth_state.with(|s| s.user_info
                            .as_ref()
                            .map(|u| u.full_name.clone().unwrap_or_else(|| u.email.clone()))
                            .unwrap_or_default())}
                    </span>
                    <span class="badge badge--neutral">{role}</span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
