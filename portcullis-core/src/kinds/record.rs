//! Stored data record, addressed by schema, store, key, and locale.

use crate::registry::{decode_default, KindSpec, NoAncestor};
use crate::token::{CoreTriple, ResourceToken};

/// Kind name on the wire.
pub const KIND: &str = "record";

/// Wire name of the locale extra field.
pub const FIELD_LOCALE: &str = "locale";

pub(crate) fn spec() -> KindSpec {
    KindSpec::new(KIND, &[FIELD_LOCALE], decode_default, NoAncestor)
}

/// Token for one stored record.
///
/// `record_type` is the schema name, `store` the provider holding the
/// record, `key` its primary key, and `locale` the localization scope
/// (empty for non-localized data). Records are permission roots here;
/// any inheritance from containing resources is the business of an
/// external hierarchy strategy.
pub fn token(
    record_type: impl Into<String>,
    store: impl Into<String>,
    key: impl Into<String>,
    locale: impl Into<String>,
) -> ResourceToken {
    ResourceToken::from_parts(
        KIND,
        CoreTriple::new(record_type, store, key),
        vec![(FIELD_LOCALE, locale.into())],
    )
}

/// Locale of a record token; `None` when `token` is not a record.
pub fn locale(token: &ResourceToken) -> Option<&str> {
    if token.kind() == KIND {
        token.extra(FIELD_LOCALE)
    } else {
        None
    }
}
