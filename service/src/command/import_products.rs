//! [`Command`] for importing [`Product`]s in bulk.

use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Product;
use crate::{
    infra::{
        api,
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::Command;

/// [`Command`] for triggering a server-side bulk import of [`Product`]s.
///
/// Loaded [`Product`]s stay untouched, so the first page should be fetched
/// again to observe the imported ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImportProducts;

impl<T, St> Command<ImportProducts> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, _: ImportProducts) -> Result<Self::Ok, Self::Err> {
        _ = self
            .api()
            .execute(Request::post("/products/import"))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        tracing::info!("products imported");
        Ok(())
    }
}

/// Error of [`ImportProducts`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Request to the server failed.
    #[display("{}", Self::FAILURE_MESSAGE)]
    Api(api::Error),
}

impl ExecutionError {
    /// Message describing a failed import.
    pub const FAILURE_MESSAGE: &'static str = "Failed to import products";
}
