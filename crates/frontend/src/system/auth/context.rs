use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::identity::Identity;
use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn identity(&self) -> Option<Identity> {
        self.access_token.as_ref()?;
        self.user_info.as_ref().map(Identity::from)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let Some(access_token) = storage::get_access_token() else {
                return;
            };
            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    log::debug!("session restored for {}", user_info.email);
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                    });
                }
                Err(e) => {
                    log::warn!("stored session rejected: {}", e);
                    storage::clear_tokens();
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Identity of the signed-in user, recomputed only when it actually changes
pub fn use_identity() -> Memo<Option<Identity>> {
    let (auth_state, _) = use_auth();
    Memo::new(move |_| auth_state.with(|s| s.identity()))
}

/// Store the session returned by a successful login
pub fn sign_in(set_auth_state: WriteSignal<AuthState>, access_token: String, user: UserInfo) {
    storage::save_access_token(&access_token);
    set_auth_state.set(AuthState {
        access_token: Some(access_token),
        user_info: Some(user),
    });
}

/// Drop the local session and revoke the token on the server
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    let token = storage::get_access_token();
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());

    if let Some(token) = token {
        spawn_local(async move {
            if let Err(e) = api::logout(token).await {
                log::warn!("logout request failed: {}", e);
            }
        });
    }
}
