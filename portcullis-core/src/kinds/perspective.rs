//! Top-level console area: Content, Media, System, and the like.
//!
//! Perspectives are permission roots; every inheritance chain in a
//! console ends at one.

use crate::registry::{decode_default, KindSpec, NoAncestor};
use crate::token::{CoreTriple, ResourceToken};

/// Kind name on the wire.
pub const KIND: &str = "perspective";

pub(crate) fn spec() -> KindSpec {
    KindSpec::new(KIND, &[], decode_default, NoAncestor)
}

/// Token for the perspective `id` owned by application `source`.
/// The `type` field is unused for this kind and stays empty.
pub fn token(source: impl Into<String>, id: impl Into<String>) -> ResourceToken {
    ResourceToken::from_parts(KIND, CoreTriple::new("", source, id), vec![])
}
