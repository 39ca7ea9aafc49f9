//! Aggregation layer over manga catalog sites.
//!
//! Each site is a [`Source`] that turns HTML or JSON fetched through an
//! injected [`RequestManager`] into the shared entity model in [`models`].

pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod request;
pub mod source;
pub mod sources;

pub use error::{Error, ErrorKind, Result};
pub use request::{AppRequest, HttpRequestManager, RequestManager, Response};
pub use source::{Source, SourceCapabilities, SourceRegistry};
