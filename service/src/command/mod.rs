//! [`Command`] definition.

pub mod create_product;
pub mod delete_product;
pub mod fetch_products;
pub mod import_products;
pub mod initialize_session;
pub mod login;
pub mod logout;
pub mod update_product;

use crate::{
    domain::product::Draft,
    infra::transport::{Body, Part, PartValue},
};

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_product::CreateProduct, delete_product::DeleteProduct,
    fetch_products::FetchProducts, import_products::ImportProducts,
    initialize_session::InitializeSession, login::Login, logout::Logout,
    update_product::UpdateProduct,
};

/// Encodes the provided [`Draft`] as a `multipart/form-data` [`Body`].
///
/// Absent optional fields are omitted.
pub(crate) fn multipart(draft: Draft) -> Body {
    let Draft {
        title,
        sku,
        price,
        description,
        image,
    } = draft;

    let mut parts = vec![
        Part::text("title", title.to_string()),
        Part::text("sku", sku.to_string()),
        Part::text("price", price.to_string()),
    ];
    if let Some(desc) = description {
        parts.push(Part::text("description", desc.to_string()));
    }
    if let Some(image) = image {
        parts.push(Part {
            name: "image",
            value: PartValue::File {
                file_name: image.file_name,
                content_type: image.content_type,
                bytes: image.bytes,
            },
        });
    }
    Body::Multipart(parts)
}


#[cfg(test)]
mod spec {
    use crate::{
        domain::product::{Description, Image},
        infra::transport::{Body, Part, PartValue},
    };

    use super::{fixture, multipart};

    #[test]
    fn encodes_required_fields_only() {
        let Body::Multipart(parts) = multipart(fixture::draft("Lamp")) else {
            panic!("not a multipart body");
        };

        assert_eq!(
            parts,
            [
                Part::text("title", "Lamp"),
                Part::text("sku", "SKU-NEW"),
                Part::text("price", "12.5"),
            ],
        );
    }

    #[test]
    fn encodes_description_and_image() {
        let mut draft = fixture::draft("Lamp");
        draft.description = Description::new("Bright");
        draft.image = Image::new("lamp.png", vec![1, 2]);

        let Body::Multipart(parts) = multipart(draft) else {
            panic!("not a multipart body");
        };

        assert_eq!(parts.len(), 5);
        assert_eq!(parts[3], Part::text("description", "Bright"));
        assert_eq!(
            parts[4].value,
            PartValue::File {
                file_name: "lamp.png".into(),
                content_type: "image/png",
                bytes: vec![1, 2],
            },
        );
    }
}
