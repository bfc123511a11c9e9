//! sb-core: shared error type and configuration for snapbridge.
//!
//! Every other crate in the workspace funnels its failures into
//! [`Error`] and reads its settings from [`config::Config`].

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
