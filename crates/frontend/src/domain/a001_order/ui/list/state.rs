use contracts::domain::a001_order::aggregate::{Order, OrderId};
use leptos::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrdersListState {
    /// Last successful fetch, minus optimistic deletes
    pub orders: Vec<Order>,
    pub error: Option<String>,
    in_flight: usize,
    generation: u64,
    /// Reload requests raised after mutations; only ever grows
    reload_requests: u64,
    /// Requests answered by an applied fetch
    reload_served: u64,
    /// `reload_requests` as seen when the newest fetch started
    load_covers: u64,
    /// Deleted while the newest fetch was running
    deleted_since_load: Vec<OrderId>,
}

impl OrdersListState {
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    pub fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Start a list fetch and return its generation tag
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.load_covers = self.reload_requests;
        self.deleted_since_load.clear();
        self.begin_request();
        self.generation
    }

    /// Complete the fetch tagged `generation`.
    ///
    /// Only the newest fetch may touch `orders` and `error`; older
    /// completions just release their in-flight slot. An applied fetch
    /// answers the reload requests raised before it started, not the ones
    /// raised while it was running. Orders deleted in the meantime stay
    /// out of the list. Returns whether the result was applied.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<Order>, String>) -> bool {
        self.end_request();
        if generation != self.generation {
            return false;
        }

        match result {
            Ok(mut orders) => {
                orders.retain(|order| !self.deleted_since_load.contains(&order.id));
                self.orders = orders;
            }
            Err(message) => self.error = Some(message),
        }
        self.reload_served = self.reload_served.max(self.load_covers);
        self.deleted_since_load.clear();
        true
    }

    pub fn request_reload(&mut self) {
        self.reload_requests += 1;
    }

    /// Monotonic count of reload requests; a rise means "fetch again"
    pub fn reload_requests(&self) -> u64 {
        self.reload_requests
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_requests > self.reload_served
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop the order from the in-memory list; returns whether it was present.
    ///
    /// The id is also kept out of the result of a fetch already running.
    pub fn remove_order(&mut self, id: &OrderId) -> bool {
        if !self.deleted_since_load.contains(id) {
            self.deleted_since_load.push(id.clone());
        }
        let before = self.orders.len();
        self.orders.retain(|order| &order.id != id);
        self.orders.len() != before
    }
}

pub fn create_state() -> RwSignal<OrdersListState> {
    RwSignal::new(OrdersListState::default())
}

/// Holder of the list state that async actions write into.
///
/// `mutate` returns `None` once the holder is gone (page unmounted), so
/// late completions are dropped instead of applied.
pub trait OrdersStore {
    fn mutate<R>(&self, f: impl FnOnce(&mut OrdersListState) -> R) -> Option<R>;
}

impl OrdersStore for RwSignal<OrdersListState> {
    fn mutate<R>(&self, f: impl FnOnce(&mut OrdersListState) -> R) -> Option<R> {
        self.try_update(f)
    }
}
