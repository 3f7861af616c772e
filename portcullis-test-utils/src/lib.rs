//! PORTCULLIS Test Utilities
//!
//! Centralized test infrastructure for the PORTCULLIS workspace:
//! - Fixture tokens and token chains for common scenarios
//! - Synthetic kinds whose strategies misbehave on purpose (cycles,
//!   endless descent) for failure-path tests
//! - Proptest generators for tokens

// Re-export core types for convenience
pub use portcullis_core::{
    decode, decode_default, decode_with, encode, kinds, AncestorStrategy, CoreTriple, DecodeFn,
    EmbeddedParent, EncodedToken, FormatError, KindRegistry, KindSpec, NoAncestor, ResourceToken,
    TokenFields, KIND_REGISTRY,
};

use portcullis_core::kinds::{function_node, perspective, record};
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// The standard root used across tests: the Home perspective of `App`.
pub fn home_perspective() -> ResourceToken {
    perspective::token("App", "Home")
}

/// A localized Product record.
pub fn sample_record() -> ResourceToken {
    record::token("Product", "Shop", "42", "en-US")
}

/// Leaf of a function-node chain `depth` levels above the Home
/// perspective. Depth 0 is the perspective itself.
pub fn nested_chain(depth: usize) -> ResourceToken {
    let mut tokens = nested_chain_tokens(depth);
    tokens.remove(0)
}

/// Every token of the chain, leaf first, root last. `depth + 1` entries.
pub fn nested_chain_tokens(depth: usize) -> Vec<ResourceToken> {
    let mut tokens = vec![home_perspective()];
    for level in 1..=depth {
        let parent = tokens.last().expect("chain is never empty");
        let node = function_node::token(parent, "T1", format!("N{level}"), format!("E{level}"));
        tokens.push(node);
    }
    tokens.reverse();
    tokens
}

// ============================================================================
// SYNTHETIC KINDS
// ============================================================================

/// Strategy that always answers with the partner kind's fixture token.
/// Registering two of these pointed at each other forms a cycle.
#[derive(Debug, Clone, Copy)]
pub struct PartnerLoop {
    pub partner: &'static str,
}

impl AncestorStrategy for PartnerLoop {
    fn immediate_parent(
        &self,
        _token: &ResourceToken,
        registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError> {
        synthetic_token(registry, self.partner).map(Some)
    }
}

/// Strategy that names the token as its own parent.
#[derive(Debug, Clone, Copy)]
pub struct SelfLoop;

impl AncestorStrategy for SelfLoop {
    fn immediate_parent(
        &self,
        token: &ResourceToken,
        _registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError> {
        Ok(Some(token.clone()))
    }
}

/// Strategy that invents a fresh, never-repeating parent every level.
/// Chains under it only stop at the resolver's depth limit.
#[derive(Debug, Clone, Copy)]
pub struct EverDeeper;

impl AncestorStrategy for EverDeeper {
    fn immediate_parent(
        &self,
        token: &ResourceToken,
        registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError> {
        let deeper = format!("{}x", token.id());
        decode_with(
            registry,
            &format!("turtle|type='', source='synthetic', id='{deeper}'"),
        )
        .map(Some)
    }
}

/// Builtins plus the synthetic kinds: `loop-a`/`loop-b` (mutual cycle),
/// `narcissus` (self cycle), `turtle` (endless descent).
pub fn synthetic_registry() -> KindRegistry {
    let mut registry = KindRegistry::builtin();
    registry.register(KindSpec::new(
        "loop-a",
        &[],
        decode_default,
        PartnerLoop { partner: "loop-b" },
    ));
    registry.register(KindSpec::new(
        "loop-b",
        &[],
        decode_default,
        PartnerLoop { partner: "loop-a" },
    ));
    registry.register(KindSpec::new("narcissus", &[], decode_default, SelfLoop));
    registry.register(KindSpec::new("turtle", &[], decode_default, EverDeeper));
    registry
}

/// Fixture token of a synthetic kind, produced through the public codec
/// path so fixtures and production tokens are made of the same stuff.
pub fn synthetic_token(
    registry: &KindRegistry,
    kind: &str,
) -> Result<ResourceToken, FormatError> {
    decode_with(
        registry,
        &format!("{kind}|type='', source='synthetic', id='{kind}'"),
    )
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Field values that exercise escaping: plain text, printable ASCII with
/// quotes and backslashes, and arbitrary unicode.
pub fn arb_field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}",
        "[ -~]{0,16}",
        any::<String>(),
    ]
}

pub fn arb_perspective_token() -> impl Strategy<Value = ResourceToken> {
    (arb_field_value(), arb_field_value())
        .prop_map(|(source, id)| perspective::token(source, id))
}

pub fn arb_record_token() -> impl Strategy<Value = ResourceToken> {
    (
        arb_field_value(),
        arb_field_value(),
        arb_field_value(),
        "[a-zA-Z-]{0,8}",
    )
        .prop_map(|(record_type, store, key, locale)| {
            record::token(record_type, store, key, locale)
        })
}

pub fn arb_flat_token() -> impl Strategy<Value = ResourceToken> {
    prop_oneof![arb_perspective_token(), arb_record_token()]
}

/// Any built-in token, wrapped in up to three function-node layers.
pub fn arb_token() -> impl Strategy<Value = ResourceToken> {
    let wrap = ("[a-zA-Z0-9]{1,6}", "[a-zA-Z0-9]{1,6}", "[a-zA-Z0-9]{1,6}");
    (arb_flat_token(), prop::collection::vec(wrap, 0..3)).prop_map(|(base, wraps)| {
        let mut token = base;
        for (tree, node, element) in wraps {
            token = function_node::token(&token, tree, node, element);
        }
        token
    })
}

// ============================================================================
// TESTS
// ============================================================================
