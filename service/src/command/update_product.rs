//! [`Command`] for updating a [`Product`].

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{product, Product},
    infra::{
        api,
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::{multipart, Command};

/// [`Command`] for updating an existing [`Product`] on the server and
/// replacing its loaded copy.
#[derive(Clone, Debug)]
pub struct UpdateProduct {
    /// ID of the [`Product`] to update.
    pub id: product::Id,

    /// New values of the [`Product`].
    pub draft: product::Draft,
}

impl<T, St> Command<UpdateProduct> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(&self, cmd: UpdateProduct) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProduct { id, draft } = cmd;

        let product = self
            .api()
            .execute(
                Request::put(format!("/products/{id}"))
                    .with_body(multipart(draft)),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .json::<Product>()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.catalog().replace(product.clone());
        tracing::info!("product updated");

        Ok(product)
    }
}

/// Error of [`UpdateProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Request to the server failed.
    #[display("{}", _0.server_message().unwrap_or(Self::FAILURE_MESSAGE))]
    Api(api::Error),

    /// Server responded with an unexpected body.
    #[display("{}", Self::FAILURE_MESSAGE)]
    MalformedResponse(serde_json::Error),
}

impl ExecutionError {
    /// Message describing a failed update the server gave no reason for.
    pub const FAILURE_MESSAGE: &'static str = "Failed to update product";
}

#[cfg(test)]
mod spec {
    use crate::{command::fixture, domain::product, Command as _};

    use super::{ExecutionError, UpdateProduct};

    #[tokio::test]
    async fn replaces_loaded_copy() {
        let (service, transport, _) = fixture::service();
        service.catalog().insert(fixture::product(2, "B"));
        service.catalog().insert(fixture::product(1, "A"));
        let updated = fixture::product(2, "B2");
        _ = transport.respond(200, fixture::json(&updated));

        let product = service
            .execute(UpdateProduct {
                id: product::Id::from(2),
                draft: fixture::draft("B2"),
            })
            .await
            .unwrap();

        assert_eq!(product, updated);
        assert_eq!(service.catalog().products()[1], updated);
        assert_eq!(fixture::ids(&service), [1, 2]);

        let req = transport.last_request();
        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.path, "/products/2");
    }

    #[tokio::test]
    async fn leaves_catalog_on_failure() {
        let (service, transport, _) = fixture::service();
        service.catalog().insert(fixture::product(2, "B"));
        _ = transport.respond(200, "{}");

        let err = service
            .execute(UpdateProduct {
                id: product::Id::from(2),
                draft: fixture::draft("B2"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::MalformedResponse(_)));
        assert_eq!(
            service.catalog().products(),
            [fixture::product(2, "B")],
        );
    }
}
