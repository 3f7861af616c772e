//! PORTCULLIS Core - Resource Tokens
//!
//! Every manageable object in an admin console, whether a top-level
//! perspective, a stored record, or an element generated under a tree
//! node, is addressed by an opaque [`ResourceToken`]: a kind name plus
//! the core triple (`type`, `source`, `id`) and the kind's declared extra
//! fields. Tokens are hash-map keys, the subject of permission checks,
//! and the unit walked to compute inherited permissions.
//!
//! # Wire format
//!
//! ```text
//! perspective|type='', source='App', id='Home'
//! record|type='Product', source='Shop', id='42', locale='en-US'
//! function-node|type='perspective|type=\'\', source=\'App\', id=\'Home\'', source='T1', id='N7', element_id='E3'
//! ```
//!
//! The third line shows the nested case: a token whose `type` field holds
//! another token's complete wire form, quote-escaped. Equality treats
//! that value as opaque bytes; it is only decoded, once and memoized,
//! when ancestry resolution or rendering asks for the parent.
//!
//! # Key types
//!
//! - [`ResourceToken`], [`CoreTriple`], [`EncodedToken`]: the value model
//! - [`KindRegistry`], [`KindSpec`], [`AncestorStrategy`]: kind dispatch
//! - [`encode`], [`decode`], [`decode_with`]: the wire codec
//!
//! Ancestor chains are resolved by `portcullis-resolve`; diagnostic HTML
//! rendering lives in `portcullis-render`.

pub mod codec;
pub mod error;
pub mod kinds;
pub mod registry;
pub mod token;

pub use codec::{decode, decode_with, encode, FIELD_ID, FIELD_SOURCE, FIELD_TYPE};
pub use error::FormatError;
pub use registry::{
    decode_default, AncestorStrategy, DecodeFn, EmbeddedParent, KindRegistry, KindSpec,
    NoAncestor, TokenFields, KIND_REGISTRY,
};
pub use token::{CoreTriple, EncodedToken, ResourceToken};
