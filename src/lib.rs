#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;

#[cfg(feature = "std")]
pub mod auto;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
pub mod domain;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod placement;
#[cfg(feature = "std")]
pub mod retry;
#[cfg(feature = "std")]
pub mod scheduler;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod shutdown;
#[cfg(feature = "std")]
pub mod surface;
#[cfg(feature = "std")]
pub mod timer;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;

#[cfg(feature = "std")]
pub use auto::AutoTargeter;
#[cfg(feature = "std")]
pub use config::ClientConfig;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use placement::build_fleet;
#[cfg(feature = "std")]
pub use retry::{Resilient, RetryPolicy};
#[cfg(feature = "std")]
pub use scheduler::{MatchDriver, MatchEnd};
#[cfg(feature = "std")]
pub use service::{GameService, MatchRequest, ServiceError};
#[cfg(feature = "std")]
pub use shutdown::Shutdown;
#[cfg(feature = "std")]
pub use surface::{DisplaySink, PlacementInput, PlacementStep, TargetInput};
#[cfg(feature = "std")]
pub use timer::Countdown;
#[cfg(feature = "std")]
pub use transport::{http::HttpService, in_memory::ScriptedService, local::LocalReferee};
