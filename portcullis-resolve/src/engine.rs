//! The chain walk: strategy lookups, cycle detection, depth limits.

use portcullis_core::{CoreTriple, FormatError, KindRegistry, ResourceToken, KIND_REGISTRY};
use thiserror::Error;

// ============================================================================
// ERRORS (Task 5.1)
// ============================================================================

/// Errors from ancestor resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A token failed to decode while walking the chain. Covers unknown
    /// kinds as well as corrupt embedded parents.
    #[error("Ancestor resolution hit a decode failure: {0}")]
    Decode(#[from] FormatError),

    /// A strategy produced a token already on the chain, or the starting
    /// token itself. The fields identify the repeated token.
    #[error("Ancestor cycle detected at kind `{kind}` ({triple})")]
    CycleDetected {
        kind: &'static str,
        triple: CoreTriple,
    },

    /// The walk passed the configured depth limit. Bounds resolution on
    /// corrupt or adversarial token nests.
    #[error("Ancestor chain exceeded depth limit of {limit}")]
    DepthExceeded { limit: usize },
}

// ============================================================================
// LIMITS (Task 5.2)
// ============================================================================

/// Default ceiling on chain length. Far above any real console tree.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds on one resolution walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveLimits {
    pub max_depth: usize,
}

impl Default for ResolveLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// ANCESTOR CHAIN (Task 5.3)
// ============================================================================

/// Ancestors of a token: nearest first, permission root last, duplicate
/// free. The token itself is not a member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AncestorChain {
    tokens: Vec<ResourceToken>,
}

impl AncestorChain {
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The immediate parent, when the token is not itself a root.
    pub fn nearest(&self) -> Option<&ResourceToken> {
        self.tokens.first()
    }

    /// The permission root the chain ends at.
    pub fn root(&self) -> Option<&ResourceToken> {
        self.tokens.last()
    }

    pub fn contains(&self, token: &ResourceToken) -> bool {
        self.tokens.contains(token)
    }

    pub fn as_slice(&self) -> &[ResourceToken] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<ResourceToken> {
        self.tokens
    }
}

impl IntoIterator for AncestorChain {
    type Item = ResourceToken;
    type IntoIter = std::vec::IntoIter<ResourceToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a AncestorChain {
    type Item = &'a ResourceToken;
    type IntoIter = std::slice::Iter<'a, ResourceToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

// ============================================================================
// RESOLVER (Task 5.4)
// ============================================================================

/// Walks immediate-parent strategies until a root answers `None`.
///
/// The walk is synchronous and does no I/O of its own; a strategy may,
/// which is its own business. Each step resolves the current token's kind
/// to its registered strategy and asks for the immediate parent, so a
/// chain may cross as many kinds as the console has registered.
pub struct Resolver<'r> {
    registry: &'r KindRegistry,
    limits: ResolveLimits,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r KindRegistry) -> Self {
        Self {
            registry,
            limits: ResolveLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ResolveLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve the full ancestor chain of `token`, nearest first.
    ///
    /// A cycle or an over-deep chain is a typed failure, never a
    /// truncated result; decode failures along the way surface unchanged.
    pub fn resolve(&self, token: &ResourceToken) -> Result<AncestorChain, ResolveError> {
        let mut tokens: Vec<ResourceToken> = Vec::new();
        let mut current = token.clone();

        loop {
            let spec = self.registry.get(current.kind()).ok_or_else(|| {
                FormatError::UnknownKind {
                    kind: current.kind().to_string(),
                }
            })?;

            let parent = match spec.strategy().immediate_parent(&current, self.registry)? {
                Some(parent) => parent,
                None => break,
            };

            if parent == *token || tokens.contains(&parent) {
                return Err(ResolveError::CycleDetected {
                    kind: parent.kind(),
                    triple: parent.triple().clone(),
                });
            }
            if tokens.len() >= self.limits.max_depth {
                return Err(ResolveError::DepthExceeded {
                    limit: self.limits.max_depth,
                });
            }

            current = parent.clone();
            tokens.push(parent);
        }

        Ok(AncestorChain { tokens })
    }
}

/// Resolve over the built-in kinds with default limits.
pub fn resolve_ancestors(token: &ResourceToken) -> Result<AncestorChain, ResolveError> {
    Resolver::new(&KIND_REGISTRY).resolve(token)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use portcullis_core::kinds::function_node;
    use portcullis_core::EncodedToken;
    use portcullis_test_utils::{
        home_perspective, nested_chain_tokens, sample_record, synthetic_registry, synthetic_token,
    };

    #[test]
    fn test_roots_have_empty_chains() {
        for root in [home_perspective(), sample_record()] {
            let chain = resolve_ancestors(&root).unwrap();
            assert!(chain.is_empty());
            assert_eq!(chain.nearest(), None);
            assert_eq!(chain.root(), None);
        }
    }

    #[test]
    fn test_single_level_chain() {
        let root = home_perspective();
        let node = function_node::token(&root, "T1", "N7", "E3");

        let chain = resolve_ancestors(&node).unwrap();
        assert_eq!(chain.as_slice(), &[root]);
    }

    #[test]
    fn test_three_level_chain_is_nearest_first() {
        // leaf over mid over root
        let tokens = nested_chain_tokens(2);
        let chain = resolve_ancestors(&tokens[0]).unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.nearest(), Some(&tokens[1]));
        assert_eq!(chain.root(), Some(&tokens[2]));
        assert_eq!(chain.into_vec(), tokens[1..].to_vec());
    }

    #[test]
    fn test_chain_membership() {
        let tokens = nested_chain_tokens(3);
        let chain = resolve_ancestors(&tokens[0]).unwrap();

        assert!(!chain.contains(&tokens[0]));
        assert!(chain.contains(&tokens[1]));
        assert!(chain.contains(&tokens[3]));
    }

    #[test]
    fn test_mutual_cycle_is_detected() {
        let registry = synthetic_registry();
        let a = synthetic_token(&registry, "loop-a").unwrap();

        let err = Resolver::new(&registry).resolve(&a).unwrap_err();
        // The repeat is the starting token itself.
        assert!(matches!(
            err,
            ResolveError::CycleDetected { kind: "loop-a", .. }
        ));
    }

    #[test]
    fn test_self_cycle_is_detected() {
        let registry = synthetic_registry();
        let token = synthetic_token(&registry, "narcissus").unwrap();

        let err = Resolver::new(&registry).resolve(&token).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::CycleDetected {
                kind: "narcissus",
                ..
            }
        ));
    }

    #[test]
    fn test_depth_limit_stops_endless_descent() {
        let registry = synthetic_registry();
        let token = synthetic_token(&registry, "turtle").unwrap();

        let err = Resolver::new(&registry)
            .with_limits(ResolveLimits { max_depth: 5 })
            .resolve(&token)
            .unwrap_err();
        assert_eq!(err, ResolveError::DepthExceeded { limit: 5 });
    }

    #[test]
    fn test_deep_chain_within_limit_resolves() {
        let tokens = nested_chain_tokens(10);
        let chain = resolve_ancestors(&tokens[0]).unwrap();
        assert_eq!(chain.len(), 10);
    }

    #[test]
    fn test_corrupt_parent_surfaces_decode_error() {
        let node =
            function_node::from_encoded_parent(EncodedToken::new("<<garbage>>"), "T1", "N7", "E3");

        let err = resolve_ancestors(&node).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Decode(FormatError::BadHeader { .. })
        ));
    }

    #[test]
    fn test_parent_of_unregistered_kind_fails() {
        // A parent decodable only against the synthetic registry, resolved
        // against the builtins.
        let registry = synthetic_registry();
        let foreign = synthetic_token(&registry, "loop-a").unwrap();
        let node = function_node::token(&foreign, "T1", "N7", "E3");

        let err = resolve_ancestors(&node).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Decode(FormatError::UnknownKind { kind }) if kind == "loop-a"
        ));
    }

    #[test]
    fn test_unregistered_start_kind_fails() {
        let registry = synthetic_registry();
        let foreign = synthetic_token(&registry, "loop-a").unwrap();

        let err = resolve_ancestors(&foreign).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Decode(FormatError::UnknownKind { kind }) if kind == "loop-a"
        ));
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(ResolveLimits::default().max_depth, DEFAULT_MAX_DEPTH);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
