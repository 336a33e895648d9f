pub mod controller;
pub mod state;

use contracts::domain::a001_order::aggregate::Order;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::controller::{page_title, should_load, LoadTrigger, OrdersController};
use self::state::create_state;
use crate::domain::a001_order::api::HttpOrdersApi;
use crate::layout::dialog_service::use_dialogs;
use crate::shared::components::breadcrumb::AdminBreadcrumb;
use crate::shared::components::error_message::ErrorMessage;
use crate::shared::components::loading::Loading;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_identity;
use crate::system::auth::guard::RequireAuth;

const TABLE_ID: &str = "a001-order-table";

#[component]
pub fn ManageOrdersPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ManageOrders />
        </RequireAuth>
    }
}

#[component]
fn ManageOrders() -> impl IntoView {
    let identity = use_identity();
    let state = create_state();
    let controller = OrdersController::new(state, HttpOrdersApi, use_dialogs());

    let reload_requests = Memo::new(move |_| state.with(|s| s.reload_requests()));

    Effect::new(move |previous: Option<LoadTrigger>| {
        let current = LoadTrigger {
            identity: identity.get(),
            reload_requests: reload_requests.get(),
        };
        if should_load(previous.as_ref(), &current) {
            if let Some(who) = current.identity.clone() {
                spawn_local(async move { controller.load(&who).await });
            }
        }
        current
    });

    let is_admin = move || identity.with(|i| i.as_ref().map(|i| i.is_admin).unwrap_or(false));
    let title = Signal::derive(move || identity.with(|i| page_title(i.as_ref()).to_string()));

    let on_toggle = move |order: Order| {
        let Some(who) = identity.get_untracked() else {
            return;
        };
        spawn_local(async move {
            controller.toggle_status(&who, &order.id, order.status).await;
        });
    };

    let on_delete = move |order: Order| {
        spawn_local(async move {
            controller.delete(&order.id).await;
        });
    };

    view! {
        <PageFrame page_id="a001_order--list" category=PAGE_CAT_LIST>
            <AdminBreadcrumb page_title=title />

            <div class="page__content">
                {move || state.with(|s| s.error.clone()).map(|text| view! {
                    <ErrorMessage
                        text=text
                        on_reset=Callback::new(move |_| controller.reset_error())
                    />
                })}

                {move || if state.with(|s| s.loading()) {
                    view! { <Loading /> }.into_any()
                } else {
                    view! {
                        <div class="table-wrapper">
                            <Table attr:id=TABLE_ID attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell min_width=160.0>"Product"</TableHeaderCell>
                                        <TableHeaderCell min_width=80.0>"Quantity"</TableHeaderCell>
                                        <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                                        <TableHeaderCell min_width=200.0>"Customer"</TableHeaderCell>
                                        <TableHeaderCell min_width=90.0>"Actions"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>

                                <TableBody>
                                    <For
                                        each=move || state.with(|s| s.orders.clone())
                                        key=|order| order.clone()
                                        children=move |order| {
                                            let product = order.product.clone();
                                            let quantity = order.quantity;
                                            let label = order.status_label();
                                            let full_name = order.full_name.clone();
                                            let email = order.email.clone();
                                            let phone = order.phone.clone();
                                            let badge_class = if order.status {
                                                "badge badge--success"
                                            } else {
                                                "badge badge--warning"
                                            };
                                            let for_toggle = order.clone();
                                            let for_delete = order;
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            <span style="font-weight: 600;">{product}</span>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>{quantity}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <button
                                                            class=move || if is_admin() {
                                                                format!("{} badge--clickable", badge_class)
                                                            } else {
                                                                badge_class.to_string()
                                                            }
                                                            title=move || if is_admin() { "Toggle status" } else { "" }
                                                            on:click=move |_| on_toggle(for_toggle.clone())
                                                        >
                                                            {label}
                                                        </button>
                                                    </TableCell>
                                                    <TableCell>
                                                        <div class="customer">
                                                            <p class="customer__name">{full_name}</p>
                                                            <p class="customer__contact">{email}</p>
                                                            <p class="customer__contact">{phone}</p>
                                                        </div>
                                                    </TableCell>
                                                    <TableCell>
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            class="button--danger"
                                                            on_click=move |_| on_delete(for_delete.clone())
                                                            attr:title="Delete"
                                                        >
                                                            {icon("trash")}
                                                            " Delete"
                                                        </Button>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        }
                                    />
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}
