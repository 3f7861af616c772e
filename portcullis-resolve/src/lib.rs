//! PORTCULLIS Resolve - Ancestor Chains
//!
//! Computes the permission-inheritance chain of a resource token by
//! walking each kind's registered [`AncestorStrategy`], nearest ancestor
//! first, until a root kind answers `None`.
//!
//! ```
//! use portcullis_core::kinds::{function_node, perspective};
//! use portcullis_resolve::resolve_ancestors;
//!
//! let root = perspective::token("App", "Home");
//! let node = function_node::token(&root, "T1", "N7", "E3");
//!
//! let chain = resolve_ancestors(&node)?;
//! assert_eq!(chain.root(), Some(&root));
//! # Ok::<(), portcullis_resolve::ResolveError>(())
//! ```
//!
//! Cycles and over-deep chains are typed failures, not truncated results:
//! a permission check built on a silently shortened chain would grant
//! access it never inherited.
//!
//! [`AncestorStrategy`]: portcullis_core::AncestorStrategy

mod engine;

pub use engine::{
    resolve_ancestors, AncestorChain, ResolveError, ResolveLimits, Resolver, DEFAULT_MAX_DEPTH,
};
