//! Generated function node: an element a tree definition produces under
//! a parent node.
//!
//! The nested kind. Its `type` field holds the parent token's complete
//! encoded form; `source` is the tree id, `id` the node id, and the
//! `element_id` extra names the generated element. The parent string is
//! the identity: equality and hashing compare it byte for byte and never
//! decode it. Decoding happens lazily, at most once, when ancestry or
//! rendering first asks.

use crate::error::FormatError;
use crate::registry::{decode_default, EmbeddedParent, KindRegistry, KindSpec};
use crate::token::{CoreTriple, EncodedToken, ResourceToken};

/// Kind name on the wire.
pub const KIND: &str = "function-node";

/// Wire name of the element-id extra field.
pub const FIELD_ELEMENT_ID: &str = "element_id";

pub(crate) fn spec() -> KindSpec {
    KindSpec::new(KIND, &[FIELD_ELEMENT_ID], decode_default, EmbeddedParent)
        .with_embedded_parent()
}

/// Token for the element `element_id` generated under `parent` at node
/// `node_id` of tree `tree_id`.
pub fn token(
    parent: &ResourceToken,
    tree_id: impl Into<String>,
    node_id: impl Into<String>,
    element_id: impl Into<String>,
) -> ResourceToken {
    from_encoded_parent(EncodedToken::of(parent), tree_id, node_id, element_id)
}

/// Like [`token`], for a parent that is already in wire form.
///
/// The encoded parent is stored verbatim and not validated here; a bad
/// string surfaces as a [`FormatError`] when the parent is first needed.
pub fn from_encoded_parent(
    parent: EncodedToken,
    tree_id: impl Into<String>,
    node_id: impl Into<String>,
    element_id: impl Into<String>,
) -> ResourceToken {
    ResourceToken::from_parts(
        KIND,
        CoreTriple::new(parent.into_string(), tree_id, node_id),
        vec![(FIELD_ELEMENT_ID, element_id.into())],
    )
}

// ============================================================================
// TYPED VIEW (Task 4.2)
// ============================================================================

/// Read access to a function-node token under its own field names.
#[derive(Debug, Clone, Copy)]
pub struct FunctionNode<'a> {
    token: &'a ResourceToken,
}

impl<'a> FunctionNode<'a> {
    /// View `token` as a function node; `None` when the kind differs.
    pub fn of(token: &'a ResourceToken) -> Option<Self> {
        if token.kind() == KIND {
            Some(Self { token })
        } else {
            None
        }
    }

    pub fn tree_id(&self) -> &'a str {
        self.token.source()
    }

    pub fn node_id(&self) -> &'a str {
        self.token.id()
    }

    pub fn element_id(&self) -> &'a str {
        // Required extra, present on every constructed or decoded token.
        self.token.extra(FIELD_ELEMENT_ID).unwrap_or("")
    }

    /// The parent exactly as stored, undecoded.
    pub fn encoded_parent(&self) -> &'a str {
        self.token.token_type()
    }

    /// Decode the parent, memoized across calls and clones.
    pub fn parent(&self, registry: &KindRegistry) -> Result<&'a ResourceToken, FormatError> {
        self.token.embedded_parent(registry)
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::codec::decode;
    use crate::kinds::record;
    use crate::registry::KIND_REGISTRY;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // ====================================================================
        // Property 1: wrapping then decoding recovers the same parent
        // ====================================================================

        #[test]
        fn prop_parent_survives_wrapping(
            store in "[ -~]{0,16}",
            key in "[ -~]{0,16}",
            locale in "[a-z-]{0,8}",
            tree in "[a-zA-Z0-9]{1,8}",
            node in "[a-zA-Z0-9]{1,8}",
            element in "[a-zA-Z0-9]{1,8}",
        ) {
            let parent = record::token("Product", store, key, locale);
            let wrapped = token(&parent, tree, node, element);

            let decoded = decode(&wrapped.encode()).unwrap();
            prop_assert_eq!(&decoded, &wrapped);
            let resolved = decoded.embedded_parent(&KIND_REGISTRY).unwrap();
            prop_assert_eq!(resolved, &parent);
        }
    }
}
