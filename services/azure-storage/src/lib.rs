//! Azure Storage SharedKey signer
//!
//! This crate signs outgoing HTTP requests against Azure Blob Storage
//! with the SharedKey authorization scheme: it stamps `x-ms-date` and
//! `x-ms-version` headers, builds the canonical string-to-sign, computes
//! an HMAC-SHA256 signature with the account key, and attaches the
//! resulting `Authorization` header.
//!
//! # Example
//!
//! ```rust,no_run
//! use blobsign_azure_storage::{Credential, Signer};
//! use blobsign_core::Result;
//!
//! fn main() -> Result<()> {
//!     let cred = Credential::new("account_name", "YWNjb3VudF9rZXkK");
//!     let signer = Signer::new();
//!
//!     // Construct request
//!     let req = http::Request::get("https://account_name.blob.core.windows.net/container/blob")
//!         .body(())
//!         .unwrap();
//!
//!     // Signing request with Signer
//!     let (mut parts, body) = req.into_parts();
//!     signer.sign(&mut parts, &cred)?;
//!     let _req = http::Request::from_parts(parts, body);
//!
//!     // The signed request is now ready to be sent by any HTTP client.
//!     Ok(())
//! }
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod signer;
pub use signer::Signer;
