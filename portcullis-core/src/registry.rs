//! Kind registrations: decode dispatch and ancestor strategies.
//!
//! Every resource kind registers once, at startup, under its wire name.
//! A registration carries the kind's declared extra fields, a decode hook,
//! the ancestor strategy used for permission inheritance, and whether the
//! kind embeds its parent's encoded form in the `type` field.
//!
//! A registry is populated through `&mut` and then shared immutably, so
//! readers never observe a half-built table. [`KIND_REGISTRY`] is the
//! sealed snapshot of the built-in kinds; deployments with custom kinds
//! compose [`KindRegistry::builtin`] plus their own registrations and
//! hand that registry to the `*_with` entry points.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::FormatError;
use crate::kinds;
use crate::token::{CoreTriple, ResourceToken};

// ============================================================================
// KIND SPECS (Task 3.1)
// ============================================================================

/// Field values matched against a kind's declared set, ready for assembly.
/// Extras are aligned to declared order by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFields {
    pub triple: CoreTriple,
    pub extras: Vec<(&'static str, String)>,
}

/// Decode hook for a kind: turn matched fields into a token, applying any
/// kind-specific validation. Most kinds use [`decode_default`].
pub type DecodeFn = fn(&KindSpec, TokenFields) -> Result<ResourceToken, FormatError>;

/// Registration record for one resource kind.
pub struct KindSpec {
    name: &'static str,
    extra_fields: &'static [&'static str],
    decode: DecodeFn,
    strategy: Box<dyn AncestorStrategy>,
    embeds_parent: bool,
}

impl KindSpec {
    pub fn new(
        name: &'static str,
        extra_fields: &'static [&'static str],
        decode: DecodeFn,
        strategy: impl AncestorStrategy + 'static,
    ) -> Self {
        Self {
            name,
            extra_fields,
            decode,
            strategy: Box::new(strategy),
            embeds_parent: false,
        }
    }

    /// Mark the kind's `type` field as holding an encoded parent token.
    /// The renderer nests such parents inline; [`EmbeddedParent`] resolves
    /// them for ancestry.
    pub fn with_embedded_parent(mut self) -> Self {
        self.embeds_parent = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Extra field names in declared (wire) order.
    pub fn extra_fields(&self) -> &'static [&'static str] {
        self.extra_fields
    }

    pub fn embeds_parent(&self) -> bool {
        self.embeds_parent
    }

    pub fn strategy(&self) -> &dyn AncestorStrategy {
        self.strategy.as_ref()
    }

    /// Build a token from pre-aligned fields.
    ///
    /// This is the assembly step every decode hook ends with; kind
    /// constructors outside this crate use it too. `fields.extras` must
    /// already be in declared order, which is guaranteed when the fields
    /// came from the codec.
    pub fn assemble(&self, fields: TokenFields) -> ResourceToken {
        debug_assert_eq!(fields.extras.len(), self.extra_fields.len());
        ResourceToken::from_parts(self.name, fields.triple, fields.extras)
    }

    pub(crate) fn run_decode(&self, fields: TokenFields) -> Result<ResourceToken, FormatError> {
        (self.decode)(self, fields)
    }
}

impl fmt::Debug for KindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindSpec")
            .field("name", &self.name)
            .field("extra_fields", &self.extra_fields)
            .field("embeds_parent", &self.embeds_parent)
            .finish_non_exhaustive()
    }
}

/// Default decode hook: assembly with no extra validation.
pub fn decode_default(spec: &KindSpec, fields: TokenFields) -> Result<ResourceToken, FormatError> {
    Ok(spec.assemble(fields))
}

// ============================================================================
// ANCESTOR STRATEGIES (Task 3.2)
// ============================================================================

/// Pluggable immediate-parent lookup for one kind.
///
/// Implementations must be pure with respect to the token: the same token
/// always yields the same answer. A strategy may consult an external
/// hierarchy; the built-in ones do not.
pub trait AncestorStrategy: Send + Sync {
    /// The immediate permission parent of `token`, or `None` when the
    /// token is a permission root.
    fn immediate_parent(
        &self,
        token: &ResourceToken,
        registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError>;
}

/// Root marker: the kind never has a permission parent.
#[derive(Debug, Clone, Copy)]
pub struct NoAncestor;

impl AncestorStrategy for NoAncestor {
    fn immediate_parent(
        &self,
        _token: &ResourceToken,
        _registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError> {
        Ok(None)
    }
}

/// The parent is the token encoded in this token's own `type` field.
///
/// Decoding goes through the token's memo cell, so repeated resolution
/// and rendering share one decode.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedParent;

impl AncestorStrategy for EmbeddedParent {
    fn immediate_parent(
        &self,
        token: &ResourceToken,
        registry: &KindRegistry,
    ) -> Result<Option<ResourceToken>, FormatError> {
        token
            .embedded_parent(registry)
            .map(|parent| Some(parent.clone()))
    }
}

// ============================================================================
// REGISTRY (Task 3.3)
// ============================================================================

/// Immutable-after-population table of kind registrations.
#[derive(Debug, Default)]
pub struct KindRegistry {
    kinds: HashMap<&'static str, KindSpec>,
}

impl KindRegistry {
    /// An empty registry. Most callers want [`KindRegistry::builtin`].
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// A registry holding the built-in kinds.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        kinds::install_builtins(&mut registry);
        registry
    }

    /// Register a kind.
    ///
    /// Panics if the name is already taken: two registrations for one
    /// kind is a startup configuration error, and failing loudly there
    /// beats decoding with whichever one won.
    pub fn register(&mut self, spec: KindSpec) {
        let name = spec.name();
        if self.kinds.insert(name, spec).is_some() {
            panic!("duplicate kind registration: {name}");
        }
    }

    pub fn get(&self, kind: &str) -> Option<&KindSpec> {
        self.kinds.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Sealed snapshot of the built-in kinds, initialized on first use.
pub static KIND_REGISTRY: LazyLock<KindRegistry> = LazyLock::new(KindRegistry::builtin);

// ============================================================================
// TESTS
// ============================================================================
