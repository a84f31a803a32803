//! Client side of the swan device registry
//!
//! - [`RegistryApi`] - one method per registry endpoint
//! - [`HttpRegistry`] - reqwest implementation
//! - [`Device`] / [`Imei`] - wire models
//! - [`ClientError`] - what a call can fail with

mod error;
mod http;
pub mod models;
mod traits;

pub use error::{ClientError, Result};
pub use http::HttpRegistry;
pub use models::{Device, IMEI_LEN, Imei};
pub use traits::{FormFields, RegistryApi};
