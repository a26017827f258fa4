//! Compose-intent payload and `mailto:` URI construction.
//!
//! [`ComposeRequest`] is the data a host hands over when it wants a mail
//! composer opened: an optional recipient plus the optional compose fields
//! the platform intent carries (cc, bcc, subject, body). It is built per
//! call, consumed by the launch, and discarded.
//!
//! The request serializes to an RFC 6068 `mailto:` URI, which is what the
//! platform registries substitute into the launched application's command
//! line. No validation is performed on addresses -- they are passed through
//! verbatim, escaped only as far as URI syntax requires.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use serde::{Deserialize, Serialize};

/// Characters escaped in `mailto:` header field values (subject, body, ...).
///
/// Everything outside the RFC 3986 unreserved set is encoded.
const HFIELD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters escaped in address positions.
///
/// Addresses keep `@` and `+` literally, and `,` so that a caller-supplied
/// multi-recipient string survives the trip unmodified.
const ADDR: &AsciiSet = &HFIELD.remove(b'@').remove(b'+').remove(b',');

/// A request to open a mail composer, optionally pre-filled.
///
/// All fields are optional; the default value means "open the composer
/// blank", which maps to the bare `mailto:` URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeRequest {
    /// Recipient address, passed through verbatim. `None` leaves the
    /// address line blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Carbon-copy addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,

    /// Blind-carbon-copy addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,

    /// Subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ComposeRequest {
    /// A blank compose request (`mailto:` with no fields).
    pub fn new() -> Self {
        Self::default()
    }

    /// A compose request addressed to `addr`.
    pub fn to(addr: impl Into<String>) -> Self {
        Self {
            to: Some(addr.into()),
            ..Self::default()
        }
    }

    /// Set the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the message body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the carbon-copy addresses.
    pub fn with_cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }

    /// Set the blind-carbon-copy addresses.
    pub fn with_bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }

    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        self.to.is_none()
            && self.cc.is_empty()
            && self.bcc.is_empty()
            && self.subject.is_none()
            && self.body.is_none()
    }

    /// Render the request as an RFC 6068 `mailto:` URI.
    ///
    /// An empty request renders as the bare `mailto:` scheme, which is the
    /// generic "open a composer" intent every mail-capable application
    /// registers for.
    pub fn to_mailto_uri(&self) -> String {
        let mut uri = String::from("mailto:");
        if let Some(to) = &self.to {
            uri.push_str(&percent_encode(to.as_bytes(), ADDR).to_string());
        }

        let mut fields: Vec<String> = Vec::new();
        if !self.cc.is_empty() {
            fields.push(format!("cc={}", encode_address_list(&self.cc)));
        }
        if !self.bcc.is_empty() {
            fields.push(format!("bcc={}", encode_address_list(&self.bcc)));
        }
        if let Some(subject) = &self.subject {
            fields.push(format!(
                "subject={}",
                percent_encode(subject.as_bytes(), HFIELD)
            ));
        }
        if let Some(body) = &self.body {
            fields.push(format!("body={}", percent_encode(body.as_bytes(), HFIELD)));
        }

        if !fields.is_empty() {
            uri.push('?');
            uri.push_str(&fields.join("&"));
        }
        uri
    }
}

/// Encode a list of addresses, comma-separated per RFC 6068.
fn encode_address_list(addrs: &[String]) -> String {
    addrs
        .iter()
        .map(|a| percent_encode(a.as_bytes(), ADDR).to_string())
        .collect::<Vec<_>>()
        .join(",")
}
