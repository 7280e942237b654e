//! [`Store`] of the locally loaded [`Product`]s.

use std::{collections::HashSet, sync::Arc};

use common::pagination;
use parking_lot::RwLock;

use crate::domain::{product, Product};

common::define_pagination!(Product);

/// Status of the last [`Product`]s fetch.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Status {
    /// Nothing has been fetched yet.
    #[default]
    Idle,

    /// A fetch is in progress.
    Loading,

    /// The last fetch succeeded.
    Loaded,

    /// The last fetch failed with the provided message.
    Failed(String),
}

/// Locally mutable collection of [`Product`]s, kept consistent with the
/// paginated remote catalog.
///
/// Clones share the same collection.
#[derive(Clone, Debug, Default)]
pub struct Store {
    /// Shared state of this [`Store`].
    state: Arc<RwLock<State>>,
}

/// State of a [`Store`].
#[derive(Debug, Default)]
struct State {
    /// Loaded [`Product`]s, in the display order.
    products: Vec<Product>,

    /// [`Cursor`] over the loaded pages.
    cursor: Cursor,

    /// [`Status`] of the last fetch.
    status: Status,

    /// [`Status`] the last settled fetch ended with.
    settled: Status,

    /// Pages being fetched at the moment.
    in_flight: HashSet<pagination::Number>,
}

impl Store {
    /// Creates a new empty [`Store`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the loaded [`Product`]s.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    /// Returns the current [`Cursor`].
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.state.read().cursor
    }

    /// Returns the [`Status`] of the last fetch.
    #[must_use]
    pub fn status(&self) -> Status {
        self.state.read().status.clone()
    }

    /// Returns the [`pagination::Number`] of the page to fetch next, if there
    /// are pages left and no fetch is in progress.
    #[must_use]
    pub fn next_page(&self) -> Option<pagination::Number> {
        let state = self.state.read();
        if state.status == Status::Loading {
            return None;
        }
        state.cursor.next()
    }

    /// Prepends the provided [`Product`].
    pub fn insert(&self, product: Product) {
        self.state.write().products.insert(0, product);
    }

    /// Replaces the [`Product`] having the same ID as the provided one.
    ///
    /// Does nothing if there is no such [`Product`].
    pub fn replace(&self, product: Product) {
        let mut state = self.state.write();
        if let Some(existing) =
            state.products.iter_mut().find(|p| p.id == product.id)
        {
            *existing = product;
        }
    }

    /// Removes the [`Product`] with the provided ID.
    ///
    /// Does nothing if there is no such [`Product`].
    pub fn remove(&self, id: product::Id) {
        self.state.write().products.retain(|p| p.id != id);
    }

    /// Marks the provided page as being fetched.
    ///
    /// Returns [`None`] if this page is being fetched already. The page stays
    /// marked until the returned [`InFlight`] is dropped.
    pub(crate) fn begin(
        &self,
        page: pagination::Number,
    ) -> Option<InFlight<'_>> {
        let mut state = self.state.write();
        if !state.in_flight.insert(page) {
            return None;
        }
        state.status = Status::Loading;
        Some(InFlight { store: self, page })
    }
}

/// Page of a [`Store`] being fetched at the moment.
///
/// Dropping it without [`complete`]ing or [`fail`]ing (a cancelled fetch)
/// releases the page and restores the [`Status`] of the last settled fetch.
///
/// [`complete`]: InFlight::complete
/// [`fail`]: InFlight::fail
#[derive(Debug)]
pub(crate) struct InFlight<'s> {
    /// [`Store`] the page is fetched into.
    store: &'s Store,

    /// Number of the fetched page.
    page: pagination::Number,
}

impl InFlight<'_> {
    /// Applies the fetched [`Page`].
    ///
    /// The first page replaces the whole collection, any other one is
    /// appended to it.
    pub(crate) fn complete(self, page: Page) {
        debug_assert_eq!(page.number, self.page, "another page completed");

        let mut state = self.store.state.write();
        state.cursor.advance(&page);
        if page.number.is_first() {
            state.products = page.items;
        } else {
            state.products.extend(page.items);
        }
        state.settled = Status::Loaded;
    }

    /// Records a failed fetch of this page, leaving the loaded [`Product`]s
    /// and the [`Cursor`] untouched.
    pub(crate) fn fail(self, message: &str) {
        self.store.state.write().settled = Status::Failed(message.into());
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.store.state.write();
        _ = state.in_flight.remove(&self.page);
        state.status = if state.in_flight.is_empty() {
            state.settled.clone()
        } else {
            Status::Loading
        };
    }
}
