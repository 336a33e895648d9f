use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;

use crate::shared::icons::icon;

/// Blocking yes/no question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Informational message acknowledged with OK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Confirmation and notification surface used by views
#[async_trait(?Send)]
pub trait Dialogs {
    /// Resolves to `true` only on an explicit confirm
    async fn confirm(&self, request: ConfirmRequest) -> bool;

    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DialogKind {
    Confirm(ConfirmRequest),
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DialogEntry {
    id: u64,
    kind: DialogKind,
}

/// Stack of open dialogs; the most recent one is rendered on top
#[derive(Clone, Copy)]
pub struct DialogService {
    stack: RwSignal<Vec<DialogEntry>>,
    responders: StoredValue<HashMap<u64, oneshot::Sender<bool>>>,
    next_id: StoredValue<u64>,
}

impl DialogService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            responders: StoredValue::new(HashMap::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn push(&self, kind: DialogKind) -> u64 {
        let mut id = 0;
        self.next_id.update_value(|next| {
            *next += 1;
            id = *next;
        });
        self.stack.update(|stack| stack.push(DialogEntry { id, kind }));
        id
    }

    /// Close dialog `id`, answering a pending confirmation if there is one
    pub fn resolve(&self, id: u64, answer: bool) {
        self.stack.update(|stack| stack.retain(|entry| entry.id != id));

        let mut responder = None;
        self.responders.update_value(|map| responder = map.remove(&id));
        if let Some(tx) = responder {
            // The waiting future may already be gone
            let _ = tx.send(answer);
        }
    }

    fn top(&self) -> Option<DialogEntry> {
        self.stack.with(|stack| stack.last().cloned())
    }
}

impl Default for DialogService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Dialogs for DialogService {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        let (tx, rx) = oneshot::channel();
        let id = self.push(DialogKind::Confirm(request));
        self.responders.update_value(|map| {
            map.insert(id, tx);
        });

        // A dropped sender (service disposed) counts as cancel
        rx.await.unwrap_or(false)
    }

    fn notify(&self, notice: Notice) {
        self.push(DialogKind::Notice(notice));
    }
}

pub fn use_dialogs() -> DialogService {
    use_context::<DialogService>().expect("DialogService not provided in context")
}

/// Renders the topmost open dialog
#[component]
pub fn DialogHost() -> impl IntoView {
    let dialogs = use_dialogs();

    view! {
        {move || dialogs.top().map(|entry| render_entry(dialogs, entry))}
    }
}

fn render_entry(dialogs: DialogService, entry: DialogEntry) -> AnyView {
    let id = entry.id;

    match entry.kind {
        DialogKind::Confirm(request) => view! {
            <div class="modal-overlay" on:click=move |_| dialogs.resolve(id, false)>
                <div class="modal modal--dialog" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-body dialog">
                        <div class="dialog__icon dialog__icon--warning">{icon("alert")}</div>
                        <h2 class="dialog__title">{request.title}</h2>
                        <p class="dialog__text">{request.text}</p>
                    </div>
                    <div class="modal-footer">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| dialogs.resolve(id, false)
                        >
                            {request.cancel_label}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            class="button--danger"
                            on_click=move |_| dialogs.resolve(id, true)
                        >
                            {request.confirm_label}
                        </Button>
                    </div>
                </div>
            </div>
        }
        .into_any(),
        DialogKind::Notice(notice) => {
            view! {
                <div class="modal-overlay" on:click=move |_| dialogs.resolve(id, true)>
                    <div class="modal modal--dialog" on:click=|ev| ev.stop_propagation()>
                        <div class="modal-body dialog">
                            <div class="dialog__icon dialog__icon--success">{icon("check")}</div>
                            <h2 class="dialog__title">{notice.title}</h2>
                        </div>
                        <div class="modal-footer">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| dialogs.resolve(id, true)
                            >
                                "OK"
                            </Button>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}
