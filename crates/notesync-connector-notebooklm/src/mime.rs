//! Content-type derivation for uploads.

/// Office and media formats whose types generic tables commonly miss.
const OVERRIDES: &[(&str, &str)] = &[
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("mp4", "video/mp4"),
];

/// Generic extension table for everything else we expect to see.
const COMMON_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("doc", "application/msword"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("xls", "application/vnd.ms-excel"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
];

/// Derives the upload content type from a file name.
///
/// Overrides first, then the generic table, then an opaque-binary
/// default for anything unrecognized or extensionless.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    let Some(ext) = extension(file_name) else {
        return "application/octet-stream";
    };

    for (candidate, mime) in OVERRIDES.iter().chain(COMMON_TYPES) {
        if ext.eq_ignore_ascii_case(candidate) {
            return mime;
        }
    }
    "application/octet-stream"
}

fn extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}
