//! [`Command`] for deleting a [`Product`].

use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Product;
use crate::{
    domain::product,
    infra::{
        api,
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Product`] on the server and removing its
/// loaded copy.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteProduct {
    /// ID of the [`Product`] to delete.
    pub id: product::Id,
}

impl<T, St> Command<DeleteProduct> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(&self, cmd: DeleteProduct) -> Result<Self::Ok, Self::Err> {
        let DeleteProduct { id } = cmd;

        _ = self
            .api()
            .execute(Request::delete(format!("/products/{id}")))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        self.catalog().remove(id);
        tracing::info!("product deleted");

        Ok(())
    }
}

/// Error of [`DeleteProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Request to the server failed.
    #[display("{}", _0.server_message().unwrap_or(Self::FAILURE_MESSAGE))]
    Api(api::Error),
}

impl ExecutionError {
    /// Message describing a failed deletion the server gave no reason for.
    pub const FAILURE_MESSAGE: &'static str = "Failed to delete product";
}
