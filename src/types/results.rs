//! Search result payloads.

/// An opaque, renderable search result payload.
///
/// The search service returns markup; it is passed through to the host
/// unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet(pub String);

impl ResultSet {
    pub fn new(body: impl Into<String>) -> Self {
        ResultSet(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for ResultSet {
    fn from(s: String) -> Self {
        ResultSet(s)
    }
}
