//! State behind the debts table. Results from superseded reloads are dropped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiClient, Transport};
use crate::error::ApiError;
use crate::filters::{DebtFilters, FilterPatch, DEFAULT_PAGE_SIZE};
use crate::models::{Debt, DebtPage};
use crate::storage::KeyValueStore;

#[derive(Clone, Debug, PartialEq)]
pub struct DebtList {
    pub filters: DebtFilters,
    pub items: Vec<Debt>,
    pub loading: bool,
    pub error: String,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    generation: u64,
}

/// A reload in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Ticket {
    pub generation: u64,
    pub filters: DebtFilters,
}

impl DebtList {
    pub fn new(filters: DebtFilters) -> Self {
        Self {
            filters,
            items: Vec::new(),
            loading: false,
            error: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
            generation: 0,
        }
    }

    pub fn begin(&mut self, patch: FilterPatch) -> Ticket {
        self.filters.merge(patch);
        self.generation += 1;
        self.loading = true;
        self.error.clear();
        Ticket {
            generation: self.generation,
            filters: self.filters.clone(),
        }
    }

    /// Commits `result` if `ticket` is the latest reload. Returns whether it did.
    pub fn settle(&mut self, ticket: &Ticket, result: Result<DebtPage, ApiError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "discarding superseded debt list response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.data;
                self.page = page.page;
                self.limit = page.limit;
                self.total = page.total;
                self.error.clear();
            }
            Err(err) => {
                self.error = err.to_string();
            }
        }
        true
    }

    /// `ceil(total / limit)`, never below 1.
    pub fn page_count(&self) -> u32 {
        page_count(self.total, self.limit)
    }

    /// Page `delta` steps away from the current one, clamped to the valid range.
    pub fn step_page(&self, delta: i64) -> u32 {
        let last = i64::from(self.page_count());
        (i64::from(self.page) + delta).clamp(1, last) as u32
    }

    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.items.is_empty()
    }
}

pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Runs reloads of a shared [`DebtList`] and calls `on_change` after every state
/// transition so the owning component can re-render.
pub struct DebtsController<T, S> {
    api: Rc<ApiClient<T, S>>,
    state: RefCell<DebtList>,
    on_change: Rc<dyn Fn()>,
}

impl<T: Transport, S: KeyValueStore> DebtsController<T, S> {
    pub fn new(api: Rc<ApiClient<T, S>>, initial: DebtFilters, on_change: Rc<dyn Fn()>) -> Self {
        Self {
            api,
            state: RefCell::new(DebtList::new(initial)),
            on_change,
        }
    }

    pub fn snapshot(&self) -> DebtList {
        self.state.borrow().clone()
    }

    pub async fn reload(&self, patch: FilterPatch) {
        let ticket = self.state.borrow_mut().begin(patch);
        (self.on_change)();

        let result = self.api.fetch_debts(&ticket.filters).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "failed to load debts");
        }

        let committed = self.state.borrow_mut().settle(&ticket, result);
        if committed {
            (self.on_change)();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::api::mock::{debt_json, page_json, test_client};
    use crate::filters::SortField;

    fn page_of(descriptions: &[&str], page: u32, limit: u32, total: u64) -> DebtPage {
        let data = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| debt_json(i as i64 + 1, d, 100))
            .collect();
        serde_json::from_value(page_json(data, page, limit, total)).unwrap()
    }

    #[test]
    fn page_count_floors_at_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(0, 0), 1);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(7, 3), 3);
    }

    #[test]
    fn step_page_clamps() {
        let mut list = DebtList::new(DebtFilters::with_limit(10));
        let ticket = list.begin(FilterPatch::default());
        list.settle(&ticket, Ok(page_of(&["a"], 2, 10, 25)));

        assert_eq!(list.step_page(1), 3);
        assert_eq!(list.step_page(5), 3);
        assert_eq!(list.step_page(-1), 1);
        assert_eq!(list.step_page(-9), 1);
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut list = DebtList::new(DebtFilters::with_limit(10));
        list.error = "old".to_string();

        let ticket = list.begin(FilterPatch::default().description("luz"));
        assert!(list.loading);
        assert!(list.error.is_empty());
        assert_eq!(ticket.filters.description.as_deref(), Some("luz"));
        assert_eq!(ticket.filters.limit, Some(10));
    }

    #[test]
    fn failure_keeps_items() {
        let mut list = DebtList::new(DebtFilters::with_limit(10));
        let first = list.begin(FilterPatch::default());
        list.settle(&first, Ok(page_of(&["a", "b"], 1, 10, 2)));

        let second = list.begin(FilterPatch::default().page(2));
        let err = ApiError::Status {
            status: 401,
            message: "Sessão expirada ou não autorizada.".to_string(),
        };
        assert!(list.settle(&second, Err(err)));

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.error, "Sessão expirada ou não autorizada.");
        assert!(!list.loading);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut list = DebtList::new(DebtFilters::with_limit(10));
        let slow = list.begin(FilterPatch::default().description("old"));
        let fast = list.begin(FilterPatch::default().description("new"));

        assert!(list.settle(&fast, Ok(page_of(&["new"], 1, 10, 1))));
        assert!(!list.settle(&slow, Ok(page_of(&["old", "older"], 1, 10, 2))));

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].description, "new");
        assert_eq!(list.total, 1);
    }

    #[test]
    fn loading_stays_until_latest_settles() {
        let mut list = DebtList::new(DebtFilters::with_limit(10));
        let slow = list.begin(FilterPatch::default());
        let fast = list.begin(FilterPatch::default().page(2));

        list.settle(&slow, Ok(page_of(&["a"], 1, 10, 1)));
        assert!(list.loading);
        assert!(list.items.is_empty());

        list.settle(&fast, Err(ApiError::Network("down".to_string())));
        assert!(!list.loading);
    }

    #[tokio::test]
    async fn reload_scenario_page_two_of_three() {
        let (client, transport, _) = test_client();
        transport.respond_json(200, page_json(vec![debt_json(11, "x", 500)], 2, 10, 25));

        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let controller = DebtsController::new(
            Rc::new(client),
            DebtFilters::with_limit(10),
            Rc::new(move || counter.set(counter.get() + 1)),
        );

        controller.reload(FilterPatch::default().page(2)).await;

        let state = controller.snapshot();
        assert_eq!(state.page, 2);
        assert_eq!(state.total, 25);
        assert_eq!(state.page_count(), 3);
        assert!(!state.loading);
        assert_eq!(changes.get(), 2);
        assert_eq!(transport.requests()[0].url, "http://api.test/debts?page=2&limit=10");
    }

    #[tokio::test]
    async fn overlapping_reloads_commit_latest_only() {
        let (client, transport, _) = test_client();
        // The older request answers last.
        let stale = page_json(vec![debt_json(1, "stale", 10)], 1, 10, 1);
        transport.respond_json_after(3, 200, stale);
        transport.respond_json(200, page_json(vec![debt_json(2, "fresh", 10)], 1, 10, 1));

        let controller =
            DebtsController::new(Rc::new(client), DebtFilters::with_limit(10), Rc::new(|| {}));
        let ((), ()) = tokio::join!(
            controller.reload(FilterPatch::default().description("a")),
            async {
                controller.reload(FilterPatch::default().description("ab")).await;
                let state = controller.snapshot();
                assert_eq!(state.items[0].description, "fresh");
                assert!(!state.loading);
            },
        );

        let state = controller.snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].description, "fresh");
        assert_eq!(state.filters.description.as_deref(), Some("ab"));
        assert!(!state.loading);
        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            [
                "http://api.test/debts?description=a&limit=10",
                "http://api.test/debts?description=ab&limit=10",
            ]
        );
    }

    #[tokio::test]
    async fn reload_401_keeps_previous_items() {
        let (client, transport, _) = test_client();
        transport.respond_json(200, page_json(vec![debt_json(1, "a", 10)], 1, 10, 1));
        transport.respond(401, "");

        let controller =
            DebtsController::new(Rc::new(client), DebtFilters::with_limit(10), Rc::new(|| {}));
        controller.reload(FilterPatch::default()).await;
        controller.reload(FilterPatch::default().page(2)).await;

        let state = controller.snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error, "Sessão expirada ou não autorizada.");
        assert_eq!(state.filters.page, Some(2));
    }

    #[tokio::test]
    async fn sort_reload_sends_order() {
        let (client, transport, _) = test_client();
        transport.respond_json(200, page_json(vec![], 1, 10, 0));

        let controller =
            DebtsController::new(Rc::new(client), DebtFilters::with_limit(10), Rc::new(|| {}));
        let patch = controller.snapshot().filters.sort_toggle(SortField::DueDate);
        controller.reload(patch).await;

        let state = controller.snapshot();
        assert_eq!(state.page_count(), 1);
        assert!(state.is_empty_result());
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/debts?order=asc&orderBy=dueDate&page=1&limit=10"
        );
    }
}
