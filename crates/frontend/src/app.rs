use crate::layout::dialog_service::{DialogHost, DialogService};
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Confirmations and notifications for every page
    provide_context(DialogService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
            <DialogHost />
        </AuthProvider>
    }
}
