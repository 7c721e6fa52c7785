//! Core components for SharedKey request signing.
//!
//! This crate carries the pieces that are not specific to any one storage
//! service:
//!
//! - [`Error`] and [`Result`]: the error type shared by the workspace.
//! - [`SigningRequest`]: an explicit signing context built from
//!   [`http::request::Parts`] and applied back once signing succeeds, so
//!   a failed signing attempt never leaves a half-mutated request behind.
//! - [`hash`]: base64 and HMAC-SHA256 helpers.
//! - [`time`]: the RFC-1123 date formatter required by the `x-ms-date`
//!   header, whose exact textual form is part of the signature input.
//! - [`utils`]: debug redaction for credential material.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::SigningRequest;
