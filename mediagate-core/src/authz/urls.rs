use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as a single URL component.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn login_page_url(website_base_url: &str, redirect: &str) -> String {
    format!(
        "{website_base_url}/login?redirect={}",
        encode_uri_component(redirect)
    )
}

pub fn room_access_url(website_base_url: &str, room_id: &str) -> String {
    format!(
        "{website_base_url}/api/v1/rooms/{}/authorize-resources-access",
        encode_uri_component(room_id)
    )
}

pub fn document_input_access_url(website_base_url: &str, document_input_id: &str) -> String {
    format!(
        "{website_base_url}/api/v1/doc-inputs/{}/authorize-resources-access",
        encode_uri_component(document_input_id)
    )
}

pub fn media_trash_access_url(website_base_url: &str) -> String {
    format!("{website_base_url}/api/v1/media-trash/authorize-resources-access")
}
