//! Decode-side error taxonomy for the token wire format.

use thiserror::Error;

// ============================================================================
// FORMAT ERRORS (Task 1.2)
// ============================================================================

/// Errors produced while decoding a serialized resource token.
///
/// Decoding is strict. Any deviation from the grammar or from the kind's
/// declared field set is a typed failure; nothing is recovered silently.
/// Byte offsets refer to positions in the full input string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The kind header before the first `|` is absent, empty, or contains
    /// characters outside `[A-Za-z0-9._-]`.
    #[error("Malformed token header: {reason}")]
    BadHeader { reason: &'static str },

    /// The kind named in the header has no registration.
    #[error("Unknown resource kind `{kind}`")]
    UnknownKind { kind: String },

    /// A field required by the kind is absent, or a core-triple field is
    /// out of its canonical position.
    #[error("Missing required field `{field}` for kind `{kind}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A well-formed pair whose name is not part of the kind's field set.
    #[error("Unexpected field `{field}` for kind `{kind}`")]
    UnexpectedField { kind: &'static str, field: String },

    /// A field name appeared more than once.
    #[error("Duplicate field `{field}` for kind `{kind}`")]
    DuplicateField { kind: &'static str, field: String },

    /// Broken pair syntax: bad field name, missing `=`, missing quote, or
    /// an invalid escape sequence.
    #[error("Malformed field data at byte {offset}: expected {expected}")]
    Malformed {
        offset: usize,
        expected: &'static str,
    },

    /// Input continued after a complete pair where `", "` was expected.
    #[error("Trailing data at byte {offset}")]
    TrailingData { offset: usize },
}
