//! [`Product`] definitions.

use std::path::Path;

use common::Price;
use derive_more::{AsRef, Debug, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Catalog product.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Product {
    /// ID of this [`Product`], assigned by the server.
    pub id: Id,

    /// [`Title`] of this [`Product`].
    pub title: Title,

    /// [`Sku`] of this [`Product`].
    pub sku: Sku,

    /// [`ImageUrl`] of this [`Product`].
    pub image_url: ImageUrl,

    /// [`Price`] of this [`Product`].
    pub price: Price,

    /// [`Description`] of this [`Product`], if any.
    #[serde(default)]
    pub description: Option<Description>,
}

/// ID of a [`Product`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);

/// Title of a [`Product`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        non_blank(&title).then_some(Self(title))
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Stock keeping unit of a [`Product`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Creates a new [`Sku`] if the given `sku` is valid.
    #[must_use]
    pub fn new(sku: impl Into<String>) -> Option<Self> {
        let sku = sku.into();
        non_blank(&sku).then_some(Self(sku))
    }
}

impl FromStr for Sku {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Sku`")
    }
}

/// URL of a [`Product`] image.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
#[serde(transparent)]
pub struct ImageUrl(String);

/// Free-form description of a [`Product`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is not blank.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.trim().is_empty()).then_some(Self(text))
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank `Description`")
    }
}

/// Checks that the given `value` is trimmed and not empty.
fn non_blank(value: &str) -> bool {
    value.trim() == value && !value.is_empty() && value.len() <= 512
}

/// Values of a [`Product`] being created or updated.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Title`] of the [`Product`].
    pub title: Title,

    /// [`Sku`] of the [`Product`].
    pub sku: Sku,

    /// [`Price`] of the [`Product`].
    pub price: Price,

    /// [`Description`] of the [`Product`], if any.
    pub description: Option<Description>,

    /// New [`Image`] of the [`Product`], if any.
    pub image: Option<Image>,
}

/// Image file uploaded along with a [`Draft`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// Name of the uploaded file.
    pub file_name: String,

    /// MIME type of the uploaded file.
    pub content_type: &'static str,

    /// Contents of the uploaded file.
    #[debug(skip)]
    pub bytes: Vec<u8>,
}

impl Image {
    /// MIME types accepted for [`Product`] images.
    pub const CONTENT_TYPES: [(&'static str, &'static str); 3] = [
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
    ];

    /// Creates a new [`Image`] from the provided file name and contents.
    ///
    /// [`None`] is returned if the file extension is not one of the
    /// [accepted](Self::CONTENT_TYPES) ones.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        let content_type = Self::CONTENT_TYPES
            .iter()
            .find_map(|(ext, mime)| (*ext == extension).then_some(*mime))?;
        Some(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}
