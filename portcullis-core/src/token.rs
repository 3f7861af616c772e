//! The resource token value type and its serialized wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::codec;
use crate::error::FormatError;
use crate::registry::KindRegistry;

// ============================================================================
// CORE TRIPLE (Task 1.1)
// ============================================================================

/// The three fields every token carries: `type`, `source`, `id`.
///
/// What each field means is up to the kind. A stored record uses the triple
/// as schema/store/key; the nested function-node kind repurposes
/// `token_type` to hold its parent's encoded form. The fields may be empty;
/// the kind name never is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoreTriple {
    pub token_type: String,
    pub source: String,
    pub id: String,
}

impl CoreTriple {
    pub fn new(
        token_type: impl Into<String>,
        source: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            source: source.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for CoreTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type='{}', source='{}', id='{}'",
            self.token_type, self.source, self.id
        )
    }
}

// ============================================================================
// RESOURCE TOKEN (Task 1.1)
// ============================================================================

/// Compute-once cache for the decoded embedded parent.
///
/// Shared across clones so no copy of a token repeats decode work. The
/// first decode outcome, success or failure, is kept for the token's
/// lifetime. Excluded from equality, hashing, and serialization.
#[derive(Clone, Default)]
struct ParentCell(Arc<OnceLock<Result<Box<ResourceToken>, FormatError>>>);

impl fmt::Debug for ParentCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0.get() {
            None => "ParentCell(unset)",
            Some(Ok(_)) => "ParentCell(decoded)",
            Some(Err(_)) => "ParentCell(failed)",
        })
    }
}

/// Opaque identity of one manageable console resource.
///
/// A token is a kind name, the core triple, and the kind's declared extra
/// fields. Tokens are value objects: immutable after construction, cheap
/// to clone, usable as hash-map keys. Identity is exactly the visible
/// fields; two tokens are equal when kind, triple, and extras all match.
///
/// Extras are kept in the kind's declared order. Every constructor in
/// this crate (kind constructors, the codec, [`KindSpec::assemble`])
/// upholds that order, which is what makes [`codec::encode`] deterministic
/// and lets equality compare the vectors directly.
///
/// [`KindSpec::assemble`]: crate::registry::KindSpec::assemble
#[derive(Debug, Clone)]
pub struct ResourceToken {
    kind: &'static str,
    triple: CoreTriple,
    extras: Vec<(&'static str, String)>,
    parent: ParentCell,
}

impl ResourceToken {
    pub(crate) fn from_parts(
        kind: &'static str,
        triple: CoreTriple,
        extras: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            kind,
            triple,
            extras,
            parent: ParentCell::default(),
        }
    }

    /// Registered kind name, e.g. `"record"` or `"function-node"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn triple(&self) -> &CoreTriple {
        &self.triple
    }

    pub fn token_type(&self) -> &str {
        &self.triple.token_type
    }

    pub fn source(&self) -> &str {
        &self.triple.source
    }

    pub fn id(&self) -> &str {
        &self.triple.id
    }

    /// Extra fields in declared order.
    pub fn extras(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.extras.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Value of the extra field `name`, if the kind declares one.
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to the wire form. Deterministic; see [`codec::encode`].
    pub fn encode(&self) -> String {
        codec::encode(self)
    }

    /// Serialize into the persistable wrapper.
    pub fn encoded(&self) -> EncodedToken {
        EncodedToken::of(self)
    }

    /// Decode the `type` field as an embedded parent token.
    ///
    /// Only meaningful for kinds that store an encoded parent there (see
    /// [`KindSpec::embeds_parent`]); for any other kind this fails with
    /// whatever decode error the `type` value produces. The outcome of the
    /// first call is memoized for the token's lifetime and shared with
    /// clones, so ancestry resolution and rendering never repeat the work.
    ///
    /// [`KindSpec::embeds_parent`]: crate::registry::KindSpec::embeds_parent
    pub fn embedded_parent(&self, registry: &KindRegistry) -> Result<&ResourceToken, FormatError> {
        let slot = self
            .parent
            .0
            .get_or_init(|| codec::decode_with(registry, &self.triple.token_type).map(Box::new));
        match slot {
            Ok(parent) => Ok(parent),
            Err(err) => Err(err.clone()),
        }
    }
}

impl PartialEq for ResourceToken {
    fn eq(&self, other: &Self) -> bool {
        // The memo cell is a cache, not identity.
        self.kind == other.kind && self.triple == other.triple && self.extras == other.extras
    }
}

impl Eq for ResourceToken {}

impl Hash for ResourceToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.triple.hash(state);
        self.extras.hash(state);
    }
}

/// The wire form doubles as the display form.
impl fmt::Display for ResourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

// ============================================================================
// ENCODED TOKEN (Task 1.3)
// ============================================================================

/// A token in its serialized wire form, ready for session or navigation
/// state. Serializes transparently as the underlying string.
///
/// The wrapper performs no validation; a stale or corrupt string surfaces
/// as a [`FormatError`] at [`decode`](EncodedToken::decode) time, exactly
/// like any other wire input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedToken(String);

impl EncodedToken {
    /// Wrap an already-serialized token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encode `token` into its wire form.
    pub fn of(token: &ResourceToken) -> Self {
        Self(codec::encode(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode against the built-in kinds.
    pub fn decode(&self) -> Result<ResourceToken, FormatError> {
        codec::decode(&self.0)
    }

    /// Decode against a caller-supplied registry.
    pub fn decode_with(&self, registry: &KindRegistry) -> Result<ResourceToken, FormatError> {
        codec::decode_with(registry, &self.0)
    }
}

impl fmt::Display for EncodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
