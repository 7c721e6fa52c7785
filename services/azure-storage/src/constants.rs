// Headers used in azure services.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const CONTENT_MD5: &str = "content-md5";

// Storage service version conveyed in every signed request.
pub const STORAGE_VERSION: &str = "2009-09-19";
