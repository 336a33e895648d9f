//! Actions of the orders list page.
//!
//! The controller owns no reactive state of its own: it writes through an
//! [`OrdersStore`], talks to the backend through [`OrdersApi`] and asks the
//! user through [`Dialogs`]. The page wires in the Leptos signal, the HTTP
//! client and the dialog service; tests wire in plain Rust doubles.

use contracts::domain::a001_order::aggregate::OrderId;

use super::state::OrdersStore;
use crate::domain::a001_order::api::{OrderScope, OrdersApi};
use crate::layout::dialog_service::{ConfirmRequest, Dialogs, Notice};
use crate::system::auth::identity::Identity;

pub const FETCH_ERROR: &str = "Something went wrong. Please Try again later.";
pub const MUTATION_ERROR: &str = "Something went wrong! Please try again later.";
pub const MISSING_ORDER_ERROR: &str = "This order no longer exists. The list has been refreshed.";

pub const STATUS_UPDATED: &str = "Order status updated";
pub const ORDER_DELETED: &str = "Order deleted successfully";

pub fn delete_confirmation() -> ConfirmRequest {
    ConfirmRequest {
        title: "Are you sure?".into(),
        text: "You won't be able to revert this!".into(),
        confirm_label: "Yes, delete it!".into(),
        cancel_label: "Cancel".into(),
    }
}

pub fn page_title(identity: Option<&Identity>) -> &'static str {
    match identity {
        Some(identity) if identity.is_admin => "Manage Orders",
        _ => "My Orders",
    }
}

/// What the page's list fetch depends on
#[derive(Clone, Debug, PartialEq)]
pub struct LoadTrigger {
    pub identity: Option<Identity>,
    pub reload_requests: u64,
}

/// Whether the page must fetch again after moving from `previous` to
/// `current`. The first run fetches; later runs fetch when the caller
/// changes or a new reload request arrives. Serving a request never lowers
/// the counter, so it never refetches.
pub fn should_load(previous: Option<&LoadTrigger>, current: &LoadTrigger) -> bool {
    if current.identity.is_none() {
        return false;
    }
    match previous {
        None => true,
        Some(previous) => {
            previous.identity != current.identity
                || current.reload_requests > previous.reload_requests
        }
    }
}

#[derive(Clone, Copy)]
pub struct OrdersController<S, A, D> {
    store: S,
    api: A,
    dialogs: D,
}

impl<S, A, D> OrdersController<S, A, D>
where
    S: OrdersStore,
    A: OrdersApi,
    D: Dialogs,
{
    pub fn new(store: S, api: A, dialogs: D) -> Self {
        Self {
            store,
            api,
            dialogs,
        }
    }

    /// Fetch the orders visible to `identity` into the store
    pub async fn load(&self, identity: &Identity) {
        let scope = OrderScope::for_identity(identity);
        let Some(generation) = self.store.mutate(|s| s.begin_load()) else {
            return;
        };
        log::debug!("loading orders ({:?}), generation {}", scope, generation);

        let result = match self.api.list(&scope).await {
            Ok(orders) => {
                log::debug!("loaded {} orders", orders.len());
                Ok(orders)
            }
            Err(e) => {
                log::error!("failed to load orders: {}", e);
                Err(FETCH_ERROR.to_string())
            }
        };

        match self.store.mutate(|s| s.finish_load(generation, result)) {
            Some(true) => {}
            Some(false) => log::warn!("dropped stale orders response, generation {}", generation),
            None => log::debug!("orders page gone, response dropped"),
        }
    }

    /// Flip shipped/pending. Admin only; returns `false` without touching
    /// anything for other callers.
    pub async fn toggle_status(&self, identity: &Identity, id: &OrderId, status: bool) -> bool {
        if !identity.is_admin {
            return false;
        }
        if self
            .store
            .mutate(|s| {
                s.clear_error();
                s.begin_request();
            })
            .is_none()
        {
            return false;
        }

        match self.api.update_status(id, !status).await {
            Ok(result) if result.is_modified() => {
                log::info!("order {} marked {}", id, if status { "pending" } else { "shipped" });
                if self
                    .store
                    .mutate(|s| {
                        s.end_request();
                        s.request_reload();
                    })
                    .is_some()
                {
                    self.dialogs.notify(Notice::success(STATUS_UPDATED));
                }
            }
            Ok(_) => {
                log::warn!("status update matched no order {}", id);
                self.store.mutate(|s| {
                    s.end_request();
                    s.error = Some(MISSING_ORDER_ERROR.to_string());
                    s.request_reload();
                });
            }
            Err(e) => {
                log::error!("failed to update order {}: {}", id, e);
                self.store.mutate(|s| {
                    s.end_request();
                    s.error = Some(MUTATION_ERROR.to_string());
                });
            }
        }
        true
    }

    /// Ask for confirmation, then delete. Returns whether the request was sent.
    pub async fn delete(&self, id: &OrderId) -> bool {
        if self.store.mutate(|s| s.clear_error()).is_none() {
            return false;
        }

        if !self.dialogs.confirm(delete_confirmation()).await {
            log::debug!("delete of order {} cancelled", id);
            return false;
        }
        if self.store.mutate(|s| s.begin_request()).is_none() {
            return false;
        }

        match self.api.delete(id).await {
            Ok(result) if result.is_deleted() => {
                log::info!("order {} deleted", id);
                if self
                    .store
                    .mutate(|s| {
                        s.end_request();
                        s.remove_order(id);
                    })
                    .is_some()
                {
                    self.dialogs.notify(Notice::success(ORDER_DELETED));
                }
            }
            Ok(_) => {
                log::warn!("delete matched no order {}", id);
                self.store.mutate(|s| {
                    s.end_request();
                    s.error = Some(MISSING_ORDER_ERROR.to_string());
                    s.request_reload();
                });
            }
            Err(e) => {
                log::error!("failed to delete order {}: {}", id, e);
                self.store.mutate(|s| {
                    s.end_request();
                    s.error = Some(MUTATION_ERROR.to_string());
                });
            }
        }
        true
    }

    /// Dismiss the error banner
    pub fn reset_error(&self) {
        self.store.mutate(|s| s.clear_error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::ui::list::state::OrdersListState;
    use crate::shared::api_utils::ApiError;
    use async_trait::async_trait;
    use contracts::domain::a001_order::aggregate::{DeleteResult, Order, UpdateResult};
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct TestStore(Rc<RefCell<Option<OrdersListState>>>);

    impl TestStore {
        fn with_orders(orders: Vec<Order>) -> Self {
            let mut state = OrdersListState::default();
            state.orders = orders;
            Self(Rc::new(RefCell::new(Some(state))))
        }

        fn snapshot(&self) -> OrdersListState {
            self.0.borrow().clone().unwrap()
        }

        fn dispose(&self) {
            self.0.borrow_mut().take();
        }

        fn is_disposed(&self) -> bool {
            self.0.borrow().is_none()
        }
    }

    impl OrdersStore for TestStore {
        fn mutate<R>(&self, f: impl FnOnce(&mut OrdersListState) -> R) -> Option<R> {
            self.0.borrow_mut().as_mut().map(f)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(OrderScope),
        Update(OrderId, bool),
        Delete(OrderId),
    }

    /// Backend double: a shared order table plus a call log
    #[derive(Clone, Default)]
    struct FakeApi {
        orders: Rc<RefCell<Vec<Order>>>,
        calls: Rc<RefCell<Vec<Call>>>,
        fail: Rc<RefCell<bool>>,
        /// Report zero modified/deleted regardless of the table
        miss: Rc<RefCell<bool>>,
        /// Holds back the response of the next call until released
        gate: Rc<RefCell<Option<oneshot::Receiver<()>>>>,
    }

    impl FakeApi {
        fn with_orders(orders: Vec<Order>) -> Self {
            let api = Self::default();
            *api.orders.borrow_mut() = orders;
            api
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        /// The next call is answered from the table as it is then, but its
        /// response only arrives once the returned sender fires or drops.
        fn hold_next(&self) -> oneshot::Sender<()> {
            let (release, gate) = oneshot::channel();
            *self.gate.borrow_mut() = Some(gate);
            release
        }

        async fn respond(&self) {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
        }

        fn check(&self) -> Result<(), ApiError> {
            if *self.fail.borrow() {
                Err(ApiError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl OrdersApi for FakeApi {
        async fn list(&self, scope: &OrderScope) -> Result<Vec<Order>, ApiError> {
            self.calls.borrow_mut().push(Call::List(scope.clone()));
            self.check()?;
            let orders: Vec<Order> = {
                let table = self.orders.borrow();
                match scope {
                    OrderScope::All => table.clone(),
                    OrderScope::Customer(email) => table
                        .iter()
                        .filter(|o| &o.email == email)
                        .cloned()
                        .collect(),
                }
            };
            self.respond().await;
            Ok(orders)
        }

        async fn update_status(&self, id: &OrderId, status: bool) -> Result<UpdateResult, ApiError> {
            self.calls.borrow_mut().push(Call::Update(id.clone(), status));
            self.check()?;
            if *self.miss.borrow() {
                return Ok(UpdateResult::default());
            }
            let mut modified_count = 0;
            for order in self.orders.borrow_mut().iter_mut().filter(|o| &o.id == id) {
                order.status = status;
                modified_count += 1;
            }
            self.respond().await;
            Ok(UpdateResult { modified_count })
        }

        async fn delete(&self, id: &OrderId) -> Result<DeleteResult, ApiError> {
            self.calls.borrow_mut().push(Call::Delete(id.clone()));
            self.check()?;
            if *self.miss.borrow() {
                return Ok(DeleteResult::default());
            }
            let deleted_count = {
                let mut orders = self.orders.borrow_mut();
                let before = orders.len();
                orders.retain(|o| &o.id != id);
                (before - orders.len()) as u64
            };
            self.respond().await;
            Ok(DeleteResult { deleted_count })
        }
    }

    #[derive(Clone, Default)]
    struct FakeDialogs {
        answer: Rc<RefCell<bool>>,
        asked: Rc<RefCell<Vec<ConfirmRequest>>>,
        notices: Rc<RefCell<Vec<Notice>>>,
    }

    impl FakeDialogs {
        fn answering(answer: bool) -> Self {
            let dialogs = Self::default();
            *dialogs.answer.borrow_mut() = answer;
            dialogs
        }

        fn notice_titles(&self) -> Vec<String> {
            self.notices.borrow().iter().map(|n| n.title.clone()).collect()
        }
    }

    #[async_trait(?Send)]
    impl Dialogs for FakeDialogs {
        async fn confirm(&self, request: ConfirmRequest) -> bool {
            self.asked.borrow_mut().push(request);
            *self.answer.borrow()
        }

        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    fn order(id: &str, status: bool, email: &str) -> Order {
        Order {
            id: OrderId::new(id),
            product: format!("Product {}", id),
            quantity: 2,
            status,
            full_name: "Test Customer".into(),
            email: email.into(),
            phone: "555-0100".into(),
        }
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            order("1", false, "alice@example.com"),
            order("2", true, "bob@example.com"),
        ]
    }

    type Controller = OrdersController<TestStore, FakeApi, FakeDialogs>;

    fn setup(dialogs: FakeDialogs) -> (Controller, TestStore, FakeApi, FakeDialogs) {
        let store = TestStore::with_orders(Vec::new());
        let api = FakeApi::with_orders(sample_orders());
        let controller = OrdersController::new(store.clone(), api.clone(), dialogs.clone());
        (controller, store, api, dialogs)
    }

    fn admin() -> Identity {
        Identity::admin("admin@example.com")
    }

    #[test]
    fn test_admin_loads_unfiltered_collection() {
        let (controller, store, api, _) = setup(FakeDialogs::default());

        block_on(controller.load(&admin()));

        assert_eq!(api.calls(), vec![Call::List(OrderScope::All)]);
        let state = store.snapshot();
        assert_eq!(state.orders, sample_orders());
        assert!(!state.loading());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_customer_loads_own_orders() {
        let (controller, store, api, _) = setup(FakeDialogs::default());

        block_on(controller.load(&Identity::customer("bob@example.com")));

        assert_eq!(
            api.calls(),
            vec![Call::List(OrderScope::Customer("bob@example.com".into()))]
        );
        let ids: Vec<_> = store.snapshot().orders.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId::new("2")]);
    }

    #[test]
    fn test_failed_load_sets_error_and_dismiss_clears_it() {
        let (controller, store, api, _) = setup(FakeDialogs::default());
        *api.fail.borrow_mut() = true;
        store.mutate(|s| s.request_reload());

        block_on(controller.load(&admin()));

        let state = store.snapshot();
        assert!(!state.loading());
        assert!(!state.reload_pending());
        assert_eq!(state.error.as_deref(), Some(FETCH_ERROR));

        controller.reset_error();
        assert_eq!(store.snapshot().error, None);
    }

    #[test]
    fn test_toggle_notifies_and_reload_shows_new_status() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::default());
        block_on(controller.load(&admin()));

        let sent = block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false));

        assert!(sent);
        assert_eq!(dialogs.notice_titles(), vec![STATUS_UPDATED.to_string()]);
        let state = store.snapshot();
        assert!(state.reload_pending());
        assert!(!state.loading());
        // Not re-fetched yet: still the old status
        assert!(!state.orders[0].status);

        block_on(controller.load(&admin()));

        let state = store.snapshot();
        assert!(!state.reload_pending());
        assert!(state.orders[0].status);
        assert_eq!(
            api.calls(),
            vec![
                Call::List(OrderScope::All),
                Call::Update(OrderId::new("1"), true),
                Call::List(OrderScope::All),
            ]
        );
    }

    #[test]
    fn test_toggle_by_customer_is_noop() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::default());
        let customer = Identity::customer("alice@example.com");
        block_on(controller.load(&customer));
        store.mutate(|s| s.error = Some("previous".into()));
        let before = store.snapshot();

        let sent = block_on(controller.toggle_status(&customer, &OrderId::new("1"), false));

        assert!(!sent);
        assert_eq!(api.calls().len(), 1);
        assert_eq!(store.snapshot(), before);
        assert!(dialogs.notice_titles().is_empty());
    }

    #[test]
    fn test_toggle_failure_sets_mutation_error() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::default());
        *api.fail.borrow_mut() = true;

        block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false));

        let state = store.snapshot();
        assert!(!state.loading());
        assert!(!state.reload_pending());
        assert_eq!(state.error.as_deref(), Some(MUTATION_ERROR));
        assert!(dialogs.notice_titles().is_empty());
    }

    #[test]
    fn test_toggle_on_missing_order_reports_and_reloads() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::default());
        *api.miss.borrow_mut() = true;

        block_on(controller.toggle_status(&admin(), &OrderId::new("9"), true));

        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some(MISSING_ORDER_ERROR));
        assert!(state.reload_pending());
        assert!(dialogs.notice_titles().is_empty());
    }

    #[test]
    fn test_confirmed_delete_removes_order_without_refetch() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::answering(true));
        block_on(controller.load(&admin()));

        let sent = block_on(controller.delete(&OrderId::new("2")));

        assert!(sent);
        assert_eq!(dialogs.asked.borrow().as_slice(), &[delete_confirmation()]);
        assert_eq!(dialogs.notice_titles(), vec![ORDER_DELETED.to_string()]);
        let state = store.snapshot();
        assert_eq!(state.orders, vec![order("1", false, "alice@example.com")]);
        assert_eq!(state.reload_requests(), 0);
        assert!(!state.loading());
        assert_eq!(
            api.calls(),
            vec![Call::List(OrderScope::All), Call::Delete(OrderId::new("2"))]
        );
    }

    #[test]
    fn test_cancelled_delete_sends_nothing() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::answering(false));
        block_on(controller.load(&admin()));
        store.mutate(|s| s.error = Some("previous".into()));

        let sent = block_on(controller.delete(&OrderId::new("2")));

        assert!(!sent);
        assert_eq!(api.calls().len(), 1);
        let state = store.snapshot();
        assert_eq!(state.orders.len(), 2);
        assert_eq!(state.error, None);
        assert!(dialogs.notice_titles().is_empty());
    }

    #[test]
    fn test_delete_failure_keeps_list() {
        let (controller, store, api, _) = setup(FakeDialogs::answering(true));
        block_on(controller.load(&admin()));
        *api.fail.borrow_mut() = true;

        block_on(controller.delete(&OrderId::new("1")));

        let state = store.snapshot();
        assert_eq!(state.orders.len(), 2);
        assert!(!state.loading());
        assert_eq!(state.error.as_deref(), Some(MUTATION_ERROR));
    }

    #[test]
    fn test_actions_after_dispose_do_nothing() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::answering(true));
        store.dispose();

        block_on(controller.load(&admin()));
        assert!(!block_on(controller.delete(&OrderId::new("1"))));
        assert!(!block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false)));

        assert!(dialogs.asked.borrow().is_empty());
        assert!(dialogs.notice_titles().is_empty());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_dispose_while_requests_wait_drops_completions() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::answering(true));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let release_load = api.hold_next();
        let loader = controller.clone();
        spawner
            .spawn_local(async move { loader.load(&admin()).await })
            .unwrap();
        pool.run_until_stalled();

        let release_delete = api.hold_next();
        let deleter = controller.clone();
        spawner
            .spawn_local(async move {
                assert!(deleter.delete(&OrderId::new("2")).await);
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(store.snapshot().loading());

        store.dispose();
        release_load.send(()).unwrap();
        release_delete.send(()).unwrap();
        pool.run();

        assert!(store.is_disposed());
        assert!(dialogs.notice_titles().is_empty());
        assert_eq!(
            api.calls(),
            vec![Call::List(OrderScope::All), Call::Delete(OrderId::new("2"))]
        );
    }

    #[test]
    fn test_reload_requested_during_fetch_is_not_lost() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::default());
        block_on(controller.load(&admin()));

        block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false));
        let seen = store.snapshot().reload_requests();

        // The fetch for the first reload is answered before the second toggle
        let mut pool = LocalPool::new();
        let release = api.hold_next();
        let loader = controller.clone();
        pool.spawner()
            .spawn_local(async move { loader.load(&admin()).await })
            .unwrap();
        pool.run_until_stalled();

        block_on(controller.toggle_status(&admin(), &OrderId::new("2"), true));
        release.send(()).unwrap();
        pool.run();

        let state = store.snapshot();
        assert_eq!(dialogs.notice_titles().len(), 2);
        assert!(state.orders[1].status);
        assert!(state.reload_pending());
        assert!(should_load(
            Some(&LoadTrigger {
                identity: Some(admin()),
                reload_requests: seen,
            }),
            &LoadTrigger {
                identity: Some(admin()),
                reload_requests: state.reload_requests(),
            },
        ));

        block_on(controller.load(&admin()));

        let state = store.snapshot();
        assert!(!state.reload_pending());
        assert!(state.orders[0].status);
        assert!(!state.orders[1].status);
    }

    #[test]
    fn test_delete_during_fetch_is_not_undone() {
        let (controller, store, api, dialogs) = setup(FakeDialogs::answering(true));
        block_on(controller.load(&admin()));
        block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false));

        // The server answers this fetch before the delete lands
        let mut pool = LocalPool::new();
        let release = api.hold_next();
        let loader = controller.clone();
        pool.spawner()
            .spawn_local(async move { loader.load(&admin()).await })
            .unwrap();
        pool.run_until_stalled();

        assert!(block_on(controller.delete(&OrderId::new("2"))));
        release.send(()).unwrap();
        pool.run();

        let state = store.snapshot();
        assert_eq!(
            dialogs.notice_titles(),
            vec![STATUS_UPDATED.to_string(), ORDER_DELETED.to_string()]
        );
        assert_eq!(state.orders, vec![order("1", true, "alice@example.com")]);
        assert!(!state.loading());
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(Some(&admin())), "Manage Orders");
        assert_eq!(page_title(Some(&Identity::customer("a@b.c"))), "My Orders");
        assert_eq!(page_title(None), "My Orders");
    }

    fn trigger(identity: Option<Identity>, reload_requests: u64) -> LoadTrigger {
        LoadTrigger {
            identity,
            reload_requests,
        }
    }

    #[test]
    fn test_should_load_on_first_run_and_identity_change() {
        assert!(should_load(None, &trigger(Some(admin()), 0)));
        assert!(!should_load(None, &trigger(None, 0)));

        let customer = Identity::customer("alice@example.com");
        assert!(should_load(
            Some(&trigger(Some(admin()), 0)),
            &trigger(Some(customer.clone()), 0)
        ));
        assert!(should_load(
            Some(&trigger(None, 0)),
            &trigger(Some(customer), 0)
        ));
        assert!(!should_load(Some(&trigger(Some(admin()), 0)), &trigger(None, 0)));
    }

    #[test]
    fn test_should_load_on_new_reload_request_only() {
        let previous = trigger(Some(admin()), 1);

        assert!(should_load(Some(&previous), &trigger(Some(admin()), 2)));
        assert!(!should_load(Some(&previous), &trigger(Some(admin()), 1)));
    }

    #[test]
    fn test_serving_reload_does_not_trigger_fetch() {
        let (controller, store, _, _) = setup(FakeDialogs::default());
        block_on(controller.toggle_status(&admin(), &OrderId::new("1"), false));
        let before = trigger(Some(admin()), store.snapshot().reload_requests());

        block_on(controller.load(&admin()));

        let state = store.snapshot();
        assert!(!state.reload_pending());
        let after = trigger(Some(admin()), state.reload_requests());
        assert!(!should_load(Some(&before), &after));
    }
}
