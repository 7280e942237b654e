//! Infrastructure layer.

pub mod api;
pub mod storage;
pub mod transport;

#[cfg(feature = "reqwest")]
pub use self::transport::Reqwest;
pub use self::{
    api::Api,
    storage::{KeyValue, Storage},
    transport::Transport,
};
