//! Abstractions for page-number pagination.

use std::{fmt, num::NonZeroU32};

use derive_more::{Display, Into};

/// Number of a page, starting from `1`.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Number(NonZeroU32);

impl Number {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Number`] if the given `number` is positive.
    #[must_use]
    pub const fn new(number: u32) -> Option<Self> {
        match NonZeroU32::new(number) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Returns the raw value of this [`Number`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Indicates whether this [`Number`] is the [first](Self::FIRST) page.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0.get() == 1
    }

    /// Returns the [`Number`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Number of items on a single page.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Size(NonZeroU32);

impl Size {
    /// Creates a new [`Size`] if the given `size` is positive.
    #[must_use]
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Returns the raw value of this [`Size`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Size {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("page size must be positive")
    }
}

/// A single page of `T`s returned by a paginated resource.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`], in the resource order.
    pub items: Vec<T>,

    /// Total number of items in the whole resource.
    pub total: u64,

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// [`Size`] this [`Page`] was requested with.
    pub size: Size,

    /// Total number of pages in the whole resource.
    pub total_pages: Number,
}

/// Tracker of how much of a paginated resource has been loaded.
///
/// Invariant: `current <= total` at all times.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    /// Last loaded page.
    current: Number,

    /// Total number of pages known so far.
    total: Number,
}

impl Cursor {
    /// Creates a new [`Cursor`], widening `total` up to `current` if needed.
    #[must_use]
    pub fn new(current: Number, total: Number) -> Self {
        Self {
            current,
            total: total.max(current),
        }
    }

    /// Returns the last loaded page [`Number`].
    #[must_use]
    pub const fn current_page(&self) -> Number {
        self.current
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> Number {
        self.total
    }

    /// Indicates whether there are pages left to load.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Returns the [`Number`] of the next page to load, if any.
    #[must_use]
    pub fn next(&self) -> Option<Number> {
        self.has_next().then(|| self.current.next())
    }

    /// Moves this [`Cursor`] to the provided loaded [`Page`].
    pub fn advance<T>(&mut self, page: &Page<T>) {
        *self = Self::new(page.number, page.total_pages);
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Defines pagination types for the provided node.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "[`Cursor`] over [`Page`]s."]
        pub type Cursor = $crate::pagination::Cursor;
    };
}
