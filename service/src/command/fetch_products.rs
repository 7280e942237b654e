//! [`Command`] for fetching a page of [`Product`]s.

use common::pagination;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracerr::Traced;

#[cfg(doc)]
use crate::catalog::Cursor;
use crate::{
    catalog::Page,
    domain::Product,
    infra::{
        api,
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::Command;

/// [`Command`] for fetching a page of [`Product`]s into the catalog.
///
/// The first page replaces the loaded [`Product`]s, any other one is appended
/// to them. The catalog [`Cursor`] is moved to the fetched page.
#[derive(Clone, Copy, Debug)]
pub struct FetchProducts {
    /// Number of the page to fetch.
    pub page: pagination::Number,
}

/// Outcome of [`FetchProducts`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Output {
    /// Fetched page has been applied to the catalog.
    Applied,

    /// The same page is being fetched already, so nothing has been done.
    Skipped,
}

/// Page of [`Product`]s as returned by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    /// [`Product`]s on the page.
    products: Vec<Product>,

    /// Total number of [`Product`]s.
    #[serde(default)]
    total: u64,

    /// Total number of pages.
    #[serde(default)]
    total_pages: u32,
}

impl<T, St> Command<FetchProducts> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(page = %cmd.page))]
    async fn execute(&self, cmd: FetchProducts) -> Result<Self::Ok, Self::Err> {
        let FetchProducts { page } = cmd;
        let size = self.config().page_size;

        let Some(fetch) = self.catalog().begin(page) else {
            tracing::debug!("page is being fetched already, skipping");
            return Ok(Output::Skipped);
        };

        let listing = self
            .api()
            .execute(
                Request::get("/products")
                    .with_query("page", page)
                    .with_query("pageSize", size),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
            .and_then(|resp| {
                resp.json::<Listing>()
                    .map_err(tracerr::from_and_wrap!(=> ExecutionError))
            });
        let listing = match listing {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("{e}");
                fetch.fail(ExecutionError::FAILURE_MESSAGE);
                return Err(e);
            }
        };

        fetch.complete(Page {
            items: listing.products,
            total: listing.total,
            number: page,
            size,
            total_pages: pagination::Number::new(listing.total_pages)
                .unwrap_or(pagination::Number::FIRST),
        });
        tracing::debug!(cursor = %self.catalog().cursor(), "page applied");

        Ok(Output::Applied)
    }
}

/// Error of [`FetchProducts`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Request to the server failed.
    #[display("Failed to fetch products: {_0}")]
    Api(api::Error),

    /// Server responded with an unexpected body.
    #[display("Failed to fetch products: unexpected response: {_0}")]
    MalformedResponse(serde_json::Error),
}

impl ExecutionError {
    /// Message describing a failed fetch.
    pub const FAILURE_MESSAGE: &'static str = "Failed to fetch products";
}
