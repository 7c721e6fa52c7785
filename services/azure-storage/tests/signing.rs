use blobsign_azure_storage::{Credential, Signer};
use blobsign_core::time::parse_http_date;
use blobsign_core::ErrorKind;

const TEST_KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZg==";

#[test]
fn test_sign_get_request() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cred = Credential::new("myaccount", TEST_KEY);
    let signer = Signer::new();

    let req = http::Request::get("https://myaccount.blob.core.windows.net/container/blob.txt")
        .body(())
        .unwrap();
    let (mut parts, _) = req.into_parts();

    signer.sign(&mut parts, &cred).unwrap();

    // All three headers are attached.
    let authorization = parts
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(authorization.starts_with("SharedKey myaccount:"));
    assert_eq!(parts.headers.get("x-ms-version").unwrap(), "2009-09-19");

    // The stamped date is a valid http date.
    let date = parts.headers.get("x-ms-date").unwrap().to_str().unwrap();
    assert!(parse_http_date(date).is_ok());

    // The rest of the request is untouched.
    assert_eq!(
        parts.uri,
        "https://myaccount.blob.core.windows.net/container/blob.txt"
    );
}

#[test]
fn test_sign_rejects_malformed_key() {
    let cred = Credential::new("myaccount", "not-base64!");
    let signer = Signer::new();

    let req = http::Request::get("https://myaccount.blob.core.windows.net/container/blob.txt")
        .body(())
        .unwrap();
    let (mut parts, _) = req.into_parts();

    let err = signer.sign(&mut parts, &cred).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
    assert!(parts.headers.is_empty());
}

#[test]
fn test_two_signatures_for_the_same_request_are_each_valid() {
    // Each sign call stamps its own date, so two calls may differ, but
    // both carry the full header set.
    let cred = Credential::new("myaccount", TEST_KEY);
    let signer = Signer::new();

    for _ in 0..2 {
        let req = http::Request::get("https://myaccount.blob.core.windows.net/container/blob.txt")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        signer.sign(&mut parts, &cred).unwrap();

        assert!(parts.headers.contains_key("authorization"));
        assert!(parts.headers.contains_key("x-ms-date"));
        assert!(parts.headers.contains_key("x-ms-version"));
    }
}
