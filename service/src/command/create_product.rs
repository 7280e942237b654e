//! [`Command`] for creating a [`Product`].

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{product::Draft, Product},
    infra::{
        api,
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::{multipart, Command};

/// [`Command`] for creating a new [`Product`] on the server and prepending it
/// to the catalog.
#[derive(Clone, Debug, From)]
pub struct CreateProduct(pub Draft);

impl<T, St> Command<CreateProduct> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(sku = %cmd.0.sku))]
    async fn execute(&self, cmd: CreateProduct) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProduct(draft) = cmd;

        let product = self
            .api()
            .execute(Request::post("/products").with_body(multipart(draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .json::<Product>()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.catalog().insert(product.clone());
        tracing::info!(id = %product.id, "product created");

        Ok(product)
    }
}

/// Error of [`CreateProduct`] [`Command`] execution.
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
    /// Message describing a failed creation the server gave no reason for.
    pub const FAILURE_MESSAGE: &'static str = "Failed to create product";
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture,
        domain::product::Image,
        infra::transport::{Body, PartValue},
        Command as _,
    };

    use super::{CreateProduct, ExecutionError};

    #[tokio::test]
    async fn prepends_created_product() {
        let (service, transport, _) = fixture::service();
        fixture::authenticate(&service).await;
        service.catalog().insert(fixture::product(1, "A"));
        let created = fixture::product(5, "New");
        _ = transport.respond(201, fixture::json(&created));

        let mut draft = fixture::draft("New");
        draft.image = Image::new("new.jpg", vec![7]);
        let product = service.execute(CreateProduct(draft)).await.unwrap();

        assert_eq!(product, created);
        assert_eq!(fixture::ids(&service), [5, 1]);

        let req = transport.last_request();
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.path, "/products");
        let Body::Multipart(parts) = req.body else {
            panic!("not a multipart body");
        };
        assert!(parts.iter().any(|p| p.name == "image"
            && matches!(
                &p.value,
                PartValue::File { content_type, .. }
                    if *content_type == "image/jpeg",
            )));
    }

    #[tokio::test]
    async fn surfaces_server_message() {
        let (service, transport, _) = fixture::service();
        _ = transport
            .respond(409, r#"{"error":"SKU already exists"}"#)
            .respond(500, "");

        let err = service
            .execute(CreateProduct(fixture::draft("New")))
            .await
            .unwrap_err();
        assert_eq!(err.as_ref().to_string(), "SKU already exists");

        let err = service
            .execute(CreateProduct(fixture::draft("New")))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_ref().to_string(),
            ExecutionError::FAILURE_MESSAGE,
        );

        assert!(service.catalog().products().is_empty());
    }
}
