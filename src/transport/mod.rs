//! Implementations of [`GameService`](crate::service::GameService).

pub mod http;
pub mod in_memory;
pub mod local;
