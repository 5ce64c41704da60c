use serde::{Deserialize, Serialize};

/// Label used wherever a failure could not be tied to a request.
pub const UNKNOWN_REQUEST: &str = "(unknown request)";

/// Label used wherever a failure carried no assertion description.
pub const UNKNOWN_ASSERTION: &str = "(unknown assertion)";

/// Default failure marker emitted by Newman for failed `pm.test` assertions.
pub const DEFAULT_MARKER: &str = "AssertionError";

/// A single failed assertion, as recovered from a log or report.
///
/// Records are produced once by an extractor and never mutated afterwards.
/// Missing fields stay `None`; sentinels are applied only when records are
/// grouped (see [`FailureRecord::request_label`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Error kind token, e.g. `AssertionError`.
    pub error_kind: String,
    /// Enclosing request name, if one could be located.
    pub request_name: Option<String>,
    /// Assertion (test) description, if one could be located.
    pub assertion_text: Option<String>,
    /// Whether the assertion concerns the HTTP status/response code.
    #[serde(default)]
    pub status_related: bool,
}

impl FailureRecord {
    pub fn new(error_kind: impl Into<String>) -> Self {
        Self {
            error_kind: error_kind.into(),
            request_name: None,
            assertion_text: None,
            status_related: false,
        }
    }

    pub fn with_request(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    pub fn with_assertion(mut self, text: impl Into<String>) -> Self {
        self.assertion_text = Some(text.into());
        self
    }

    pub fn status_related(mut self, status_related: bool) -> Self {
        self.status_related = status_related;
        self
    }

    /// Grouping key: the request name or [`UNKNOWN_REQUEST`].
    pub fn request_label(&self) -> &str {
        self.request_name.as_deref().unwrap_or(UNKNOWN_REQUEST)
    }

    /// Assertion key: the assertion text or [`UNKNOWN_ASSERTION`].
    pub fn assertion_label(&self) -> &str {
        self.assertion_text.as_deref().unwrap_or(UNKNOWN_ASSERTION)
    }
}
