//! Service contains the business logic of the catalog client.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod catalog;
pub mod command;
pub mod domain;
pub mod guard;
pub mod infra;
pub mod session;

use std::sync::Arc;

use common::pagination;
use smart_default::SmartDefault;

use self::infra::Api;

pub use self::{command::Command, guard::guard};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`Product`]s requested per page.
    ///
    /// [`Product`]: domain::Product
    #[default(Self::DEFAULT_PAGE_SIZE)]
    pub page_size: pagination::Size,
}

impl Config {
    /// Default [`Config::page_size`].
    pub const DEFAULT_PAGE_SIZE: pagination::Size =
        match pagination::Size::new(8) {
            Some(size) => size,
            None => panic!("page size must be positive"),
        };
}

/// Domain service.
///
/// Owns the [`session::Store`] and the [`catalog::Store`], and executes
/// [`Command`]s upon them.
#[derive(Debug)]
pub struct Service<T, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Raw [`infra::Transport`] of this [`Service`].
    transport: Arc<T>,

    /// [`session::Store`] of this [`Service`].
    session: session::Store<St>,

    /// [`Api`] authorized with the [`session::Store`].
    api: Api<Arc<T>, session::Store<St>>,

    /// [`catalog::Store`] of this [`Service`].
    catalog: catalog::Store,
}

impl<T, St> Service<T, St> {
    /// Creates a new [`Service`] with an anonymous [`domain::Session`] and an
    /// empty [`catalog::Store`].
    #[must_use]
    pub fn new(config: Config, transport: T, storage: St) -> Self {
        let transport = Arc::new(transport);
        let session = session::Store::new(storage);
        let api = Api::new(Arc::clone(&transport), session.clone());
        Self {
            config,
            transport,
            session,
            api,
            catalog: catalog::Store::new(),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the raw [`infra::Transport`] of this [`Service`], not
    /// authorized with the current [`domain::Session`].
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns [`session::Store`] of this [`Service`].
    #[must_use]
    pub fn session(&self) -> &session::Store<St> {
        &self.session
    }

    /// Returns the [`Api`] of this [`Service`], authorized with the current
    /// [`domain::Session`].
    #[must_use]
    pub fn api(&self) -> &Api<Arc<T>, session::Store<St>> {
        &self.api
    }

    /// Returns [`catalog::Store`] of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &catalog::Store {
        &self.catalog
    }
}
