//! Wire codec for resource tokens.
//!
//! One token serializes to one line:
//!
//! ```text
//! token  := kind '|' pairs
//! kind   := 1*(ALPHA / DIGIT / '-' / '_' / '.')
//! pairs  := pair *( ", " pair )
//! pair   := name "='" value "'"
//! value  := any text, with `\` written `\\` and `'` written `\'`
//! ```
//!
//! The first three pairs are always the core triple `type`, `source`,
//! `id`, in that order. The rest are the kind's declared extra fields:
//! encode emits them in declared order, decode accepts them in any order
//! but requires each declared name exactly once and nothing else.
//!
//! Escaping is what lets a value hold a complete serialized token, so the
//! nested kind needs no special framing: the parent travels inside the
//! `type` value and the outer grammar never sees it.

mod scan;
mod write;

use crate::error::FormatError;
use crate::registry::{KindRegistry, KindSpec, TokenFields, KIND_REGISTRY};
use crate::token::{CoreTriple, ResourceToken};
use scan::{PairScanner, ScannedPair};

// ============================================================================
// FIELD NAMES (Task 2.1)
// ============================================================================

/// Wire name of the core triple's first field.
pub const FIELD_TYPE: &str = "type";
/// Wire name of the core triple's second field.
pub const FIELD_SOURCE: &str = "source";
/// Wire name of the core triple's third field.
pub const FIELD_ID: &str = "id";

const CORE_FIELDS: [&str; 3] = [FIELD_TYPE, FIELD_SOURCE, FIELD_ID];

// ============================================================================
// ENCODE (Task 2.2)
// ============================================================================

/// Serialize `token` to its wire form.
///
/// Deterministic: equal tokens always produce identical strings, across
/// calls and across processes. Needs no registry because a token already
/// carries its extras in declared order.
pub fn encode(token: &ResourceToken) -> String {
    let extras_len: usize = token.extras().map(|(n, v)| n.len() + v.len() + 8).sum();
    let mut out = String::with_capacity(
        token.kind().len()
            + token.token_type().len()
            + token.source().len()
            + token.id().len()
            + extras_len
            + 40,
    );

    out.push_str(token.kind());
    out.push('|');
    write::push_pair(&mut out, FIELD_TYPE, token.token_type());
    out.push_str(", ");
    write::push_pair(&mut out, FIELD_SOURCE, token.source());
    out.push_str(", ");
    write::push_pair(&mut out, FIELD_ID, token.id());
    for (name, value) in token.extras() {
        out.push_str(", ");
        write::push_pair(&mut out, name, value);
    }
    out
}

// ============================================================================
// DECODE (Task 2.3)
// ============================================================================

/// Decode against the built-in kinds.
pub fn decode(input: &str) -> Result<ResourceToken, FormatError> {
    decode_with(&KIND_REGISTRY, input)
}

/// Decode against a caller-supplied registry.
///
/// The kind header picks the registration; the registration names the
/// extra fields and the decode hook that assembles the token. Every
/// failure is a [`FormatError`]; a partially matching input never yields
/// a partially filled token.
pub fn decode_with(registry: &KindRegistry, input: &str) -> Result<ResourceToken, FormatError> {
    let (kind, rest, base) = split_header(input)?;
    let spec = registry.get(kind).ok_or_else(|| FormatError::UnknownKind {
        kind: kind.to_string(),
    })?;
    let pairs = PairScanner::new(rest, base).scan_all()?;
    let fields = match_fields(spec, pairs)?;
    spec.run_decode(fields)
}

fn split_header(input: &str) -> Result<(&str, &str, usize), FormatError> {
    let sep = input.find('|').ok_or(FormatError::BadHeader {
        reason: "missing `|` separator",
    })?;
    let kind = &input[..sep];
    if kind.is_empty() {
        return Err(FormatError::BadHeader {
            reason: "empty kind name",
        });
    }
    if !kind.chars().all(is_kind_char) {
        return Err(FormatError::BadHeader {
            reason: "kind name contains invalid characters",
        });
    }
    Ok((kind, &input[sep + 1..], sep + 1))
}

fn is_kind_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Check scanned pairs against the kind's field set: triple first in
/// canonical order, then each declared extra exactly once, nothing else.
/// Extras come out aligned to declared order whatever order they arrived
/// in, so re-encoding is canonical.
fn match_fields(spec: &KindSpec, pairs: Vec<ScannedPair<'_>>) -> Result<TokenFields, FormatError> {
    let mut iter = pairs.into_iter();
    let token_type = take_core(spec, &mut iter, FIELD_TYPE)?;
    let source = take_core(spec, &mut iter, FIELD_SOURCE)?;
    let id = take_core(spec, &mut iter, FIELD_ID)?;

    let mut remaining: Vec<ScannedPair<'_>> = iter.collect();
    let mut extras = Vec::with_capacity(spec.extra_fields().len());
    for &name in spec.extra_fields() {
        let mut value: Option<String> = None;
        let mut rest = Vec::with_capacity(remaining.len());
        for pair in remaining {
            if pair.name == name {
                if value.is_some() {
                    return Err(FormatError::DuplicateField {
                        kind: spec.name(),
                        field: name.to_string(),
                    });
                }
                value = Some(pair.value);
            } else {
                rest.push(pair);
            }
        }
        remaining = rest;
        let value = value.ok_or(FormatError::MissingField {
            kind: spec.name(),
            field: name,
        })?;
        extras.push((name, value));
    }

    if let Some(stray) = remaining.first() {
        let field = stray.name.to_string();
        // A stray with a core name is a repeat of the triple.
        return Err(if CORE_FIELDS.contains(&stray.name) {
            FormatError::DuplicateField {
                kind: spec.name(),
                field,
            }
        } else {
            FormatError::UnexpectedField {
                kind: spec.name(),
                field,
            }
        });
    }

    Ok(TokenFields {
        triple: CoreTriple {
            token_type,
            source,
            id,
        },
        extras,
    })
}

fn take_core<'a>(
    spec: &KindSpec,
    iter: &mut impl Iterator<Item = ScannedPair<'a>>,
    want: &'static str,
) -> Result<String, FormatError> {
    match iter.next() {
        Some(pair) if pair.name == want => Ok(pair.value),
        _ => Err(FormatError::MissingField {
            kind: spec.name(),
            field: want,
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{function_node, perspective, record};
    use crate::registry::{decode_default, NoAncestor};

    #[test]
    fn test_encode_shape_perspective() {
        let token = perspective::token("App", "Home");
        assert_eq!(token.encode(), "perspective|type='', source='App', id='Home'");
    }

    #[test]
    fn test_encode_shape_record() {
        let token = record::token("Product", "Shop", "42", "en-US");
        assert_eq!(
            token.encode(),
            "record|type='Product', source='Shop', id='42', locale='en-US'"
        );
    }

    #[test]
    fn test_round_trip_builtins() {
        let tokens = [
            perspective::token("App", "Home"),
            record::token("Product", "Shop", "42", "en-US"),
            function_node::token(&perspective::token("App", "Home"), "T1", "N7", "E3"),
        ];
        for token in tokens {
            assert_eq!(decode(&token.encode()).unwrap(), token);
        }
    }

    #[test]
    fn test_round_trip_awkward_values() {
        let token = record::token(r"Type's", r"a\b", "x, y='z'", "");
        assert_eq!(decode(&token.encode()).unwrap(), token);
    }

    #[test]
    fn test_decode_unknown_kind() {
        let err = decode("bogus-kind|type='', source='App', id='Home'").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownKind {
                kind: "bogus-kind".to_string()
            }
        );
    }

    #[test]
    fn test_decode_missing_extra_field() {
        // A record without its locale pair.
        let err = decode("record|type='Product', source='Shop', id='42'").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                kind: "record",
                field: "locale"
            }
        );
    }

    #[test]
    fn test_decode_missing_triple_field() {
        let err = decode("perspective|type='', source='App'").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                kind: "perspective",
                field: "id"
            }
        );
    }

    #[test]
    fn test_decode_triple_order_is_canonical() {
        let err = decode("perspective|source='App', type='', id='Home'").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                kind: "perspective",
                field: "type"
            }
        );
    }

    #[test]
    fn test_decode_empty_pairs_section() {
        let err = decode("perspective|").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                kind: "perspective",
                field: "type"
            }
        );
    }

    #[test]
    fn test_decode_bad_headers() {
        assert!(matches!(
            decode("no separator here").unwrap_err(),
            FormatError::BadHeader { .. }
        ));
        assert!(matches!(
            decode("|type='', source='', id=''").unwrap_err(),
            FormatError::BadHeader { .. }
        ));
        assert!(matches!(
            decode("bad kind|type='', source='', id=''").unwrap_err(),
            FormatError::BadHeader { .. }
        ));
        assert!(matches!(
            decode("").unwrap_err(),
            FormatError::BadHeader { .. }
        ));
    }

    #[test]
    fn test_decode_duplicate_extra() {
        let err =
            decode("record|type='P', source='S', id='1', locale='en', locale='da'").unwrap_err();
        assert_eq!(
            err,
            FormatError::DuplicateField {
                kind: "record",
                field: "locale".to_string()
            }
        );
    }

    #[test]
    fn test_decode_repeated_core_field() {
        let err = decode("record|type='P', source='S', id='1', locale='en', id='2'").unwrap_err();
        assert_eq!(
            err,
            FormatError::DuplicateField {
                kind: "record",
                field: "id".to_string()
            }
        );
    }

    #[test]
    fn test_decode_unexpected_field() {
        let err = decode("perspective|type='', source='App', id='Home', color='red'").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnexpectedField {
                kind: "perspective",
                field: "color".to_string()
            }
        );
    }

    #[test]
    fn test_decode_trailing_data() {
        let err = decode("perspective|type='', source='App', id='Home' x").unwrap_err();
        assert!(matches!(err, FormatError::TrailingData { .. }));
    }

    #[test]
    fn test_decode_malformed_separator() {
        // Double space after the comma breaks the pair grammar.
        let err = decode("perspective|type='',  source='App', id='Home'").unwrap_err();
        assert!(matches!(err, FormatError::Malformed { .. }));
    }

    #[test]
    fn test_decode_accepts_extras_in_any_order_and_canonicalizes() {
        let mut registry = KindRegistry::builtin();
        registry.register(KindSpec::new(
            "widget",
            &["shade", "size"],
            decode_default,
            NoAncestor,
        ));

        let shuffled = "widget|type='W', source='Store', id='9', size='large', shade='blue'";
        let token = decode_with(&registry, shuffled).unwrap();
        assert_eq!(token.extra("shade"), Some("blue"));
        assert_eq!(token.extra("size"), Some("large"));
        // Re-encoding emits declared order regardless of input order.
        assert_eq!(
            token.encode(),
            "widget|type='W', source='Store', id='9', shade='blue', size='large'"
        );
    }

    #[test]
    fn test_nested_value_survives_outer_scan() {
        let parent = record::token("Product", "Shop", "42", "en-US");
        let node = function_node::token(&parent, "T1", "N7", "E3");
        let wire = node.encode();
        // The parent's pairs are escaped into the type value; the outer
        // grammar still sees exactly four pairs.
        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(decoded.token_type(), parent.encode());
    }

    #[test]
    fn test_doubly_nested_round_trip() {
        let root = perspective::token("App", "Home");
        let mid = function_node::token(&root, "T1", "N1", "E1");
        let leaf = function_node::token(&mid, "T1", "N2", "E2");
        let decoded = decode(&leaf.encode()).unwrap();
        assert_eq!(decoded, leaf);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
