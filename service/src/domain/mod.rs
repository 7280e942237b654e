//! Domain definitions.

pub mod product;
pub mod session;

pub use self::{product::Product, session::Session};
