use std::mem;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use std::str::FromStr;

use crate::Error;
use crate::Result;

/// Signing context for request.
///
/// The context is taken out of [`http::request::Parts`], mutated while the
/// signature is computed, and applied back in one step once signing
/// succeeded. A signing failure therefore never leaves a half-mutated
/// request behind.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// Raw HTTP query string, still percent-encoded.
    ///
    /// SharedKey canonicalization never inspects query pairs, so the
    /// query is carried through untouched and reattached verbatim;
    /// decoding and re-assembling it would change the bytes on the wire.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Rebuild the URI first: the context is only written back once the
        // whole URI is known to be valid, so a failure here cannot leave a
        // half-applied request behind.
        let uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            // Return scheme back.
            uri_parts.scheme = Some(self.scheme);
            // Return authority back.
            uri_parts.authority = Some(self.authority);
            // Reattach the query verbatim, bytes unchanged.
            uri_parts.path_and_query = {
                let paq = match self.query {
                    None => self.path,
                    Some(query) => {
                        let mut s = self.path;
                        s.reserve(query.len() + 1);
                        s.push('?');
                        s.push_str(&query);

                        s
                    }
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        parts.uri = uri;
        parts.method = self.method;
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);

        Ok(())
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Get headers with given prefix as lowercased name/value pairs.
    ///
    /// [`HeaderName`] is already case-folded, so the prefix match is
    /// effectively case-insensitive. Duplicate names after folding are a
    /// precondition violation of the signing scheme; [`HeaderMap`] keeps
    /// only the first value here.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            // Filter all header that starts with prefix
            .filter(|(k, _)| k.as_str().starts_with(prefix))
            // Convert all header name to lowercase
            .map(|(k, v)| Ok((k.as_str().to_lowercase(), v.to_str()?.to_string())))
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_and_apply_round_trip() {
        let req = http::Request::get("https://test.blob.core.windows.net/container/blob.txt")
            .header("Range", "bytes=0-1023")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let ctx = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(ctx.method, Method::GET);
        assert_eq!(ctx.path, "/container/blob.txt");
        assert_eq!(ctx.query, None);

        ctx.apply(&mut parts).unwrap();
        assert_eq!(
            parts.uri,
            "https://test.blob.core.windows.net/container/blob.txt"
        );
        assert_eq!(parts.headers.get("Range").unwrap(), "bytes=0-1023");
    }

    #[test]
    fn test_query_survives_byte_identical() {
        // `+` and percent escapes must come back exactly as sent; the
        // query is never decoded on the way through.
        let uri = "https://test.blob.core.windows.net/container?prefix=a+b&marker=x%2Fy";
        let req = http::Request::get(uri).body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let ctx = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(ctx.query.as_deref(), Some("prefix=a+b&marker=x%2Fy"));

        ctx.apply(&mut parts).unwrap();
        assert_eq!(parts.uri, uri);
    }

    #[test]
    fn test_build_requires_authority() {
        let req = http::Request::get("/container/blob.txt").body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        assert!(SigningRequest::build(&mut parts).is_err());
    }

    #[test]
    fn test_header_to_string_sorts() {
        let headers = vec![
            ("x-ms-version".to_string(), "2009-09-19".to_string()),
            ("x-ms-date".to_string(), "date".to_string()),
            ("x-ms-blob-type".to_string(), "BlockBlob".to_string()),
        ];

        assert_eq!(
            SigningRequest::header_to_string(headers, ":", "\n"),
            "x-ms-blob-type:BlockBlob\nx-ms-date:date\nx-ms-version:2009-09-19"
        );
    }
}
