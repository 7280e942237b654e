//! [`Shell`] commands changing the session or the catalog.

use secrecy::SecretBox;
use service::{
    command::{
        Command as _, CreateProduct, DeleteProduct, ImportProducts, Login,
        Logout, UpdateProduct,
    },
    domain::{
        product::{self, Draft, Image},
        session::{Password, Username},
    },
};

use crate::{args, AsError, Error};

use super::{InputError, Shell, View};

impl Shell {
    /// Name of the [`tracing::Span`] for the mutations.
    const MUTATION_SPAN_NAME: &'static str = "Mutation";

    /// Logs in with the provided credentials.
    #[tracing::instrument(
        skip_all,
        fields(
            cli.name = "login",
            otel.name = Self::MUTATION_SPAN_NAME,
            username = %username,
        ),
    )]
    pub(super) async fn login(
        &self,
        username: String,
        password: String,
    ) -> Result<View, Error> {
        let username = Username::new(username).ok_or(InputError::Username)?;
        let user = self
            .service()
            .execute(Login {
                username,
                password: SecretBox::init_with(move || password.into()),
            })
            .await
            .map_err(AsError::into_error)?;
        Ok(View::Whoami(Some(user)))
    }

    /// Logs out.
    #[tracing::instrument(
        skip_all,
        fields(cli.name = "logout", otel.name = Self::MUTATION_SPAN_NAME),
    )]
    pub(super) async fn logout(&self) -> Result<View, Error> {
        self.service()
            .execute(Logout)
            .await
            .unwrap_or_else(|e| match e {});
        Ok(View::Notice("Logged out"))
    }

    /// Creates a new product.
    #[tracing::instrument(
        skip_all,
        fields(cli.name = "create", otel.name = Self::MUTATION_SPAN_NAME),
    )]
    pub(super) async fn create(
        &self,
        product: args::Product,
    ) -> Result<View, Error> {
        let draft = draft(product).await?;
        let product = self
            .service()
            .execute(CreateProduct(draft))
            .await
            .map_err(AsError::into_error)?;
        Ok(View::Product(product))
    }

    /// Updates an existing product.
    #[tracing::instrument(
        skip_all,
        fields(
            cli.name = "update",
            otel.name = Self::MUTATION_SPAN_NAME,
            id = %id,
        ),
    )]
    pub(super) async fn update(
        &self,
        id: i64,
        product: args::Product,
    ) -> Result<View, Error> {
        let draft = draft(product).await?;
        let product = self
            .service()
            .execute(UpdateProduct {
                id: id.into(),
                draft,
            })
            .await
            .map_err(AsError::into_error)?;
        Ok(View::Product(product))
    }

    /// Deletes a product.
    #[tracing::instrument(
        skip_all,
        fields(
            cli.name = "delete",
            otel.name = Self::MUTATION_SPAN_NAME,
            id = %id,
        ),
    )]
    pub(super) async fn delete(&self, id: i64) -> Result<View, Error> {
        self.service()
            .execute(DeleteProduct { id: id.into() })
            .await
            .map_err(AsError::into_error)?;
        Ok(View::Notice("Product deleted"))
    }

    /// Triggers a bulk import of products.
    #[tracing::instrument(
        skip_all,
        fields(cli.name = "import", otel.name = Self::MUTATION_SPAN_NAME),
    )]
    pub(super) async fn import(&self) -> Result<View, Error> {
        self.service()
            .execute(ImportProducts)
            .await
            .map_err(AsError::into_error)?;
        Ok(View::Notice(
            "Products imported, run `catalog list` to see them",
        ))
    }
}

/// Validates the provided [`args::Product`] and reads its image, if any.
async fn draft(product: args::Product) -> Result<Draft, Error> {
    let args::Product {
        title,
        sku,
        price,
        description,
        image,
    } = product;

    let image = match image {
        Some(path) => {
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                tracing::warn!("failed to read `{}`: {e}", path.display());
                InputError::Image
            })?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or(InputError::Image)?;
            Some(Image::new(file_name, bytes).ok_or(InputError::Image)?)
        }
        None => None,
    };

    Ok(Draft {
        title: product::Title::new(title).ok_or(InputError::Title)?,
        sku: product::Sku::new(sku).ok_or(InputError::Sku)?,
        price: price.parse().map_err(|_| InputError::Price)?,
        description: description
            .map(|d| product::Description::new(d).ok_or(InputError::Description))
            .transpose()?,
        image,
    })
}
