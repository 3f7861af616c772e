//! Built-in resource kinds.
//!
//! Each module owns one kind: its wire name, extra-field names, typed
//! constructors, and registration. [`KindRegistry::builtin`] installs all
//! of them; deployments register further kinds beside these.
//!
//! [`KindRegistry::builtin`]: crate::registry::KindRegistry::builtin

pub mod function_node;
pub mod perspective;
pub mod record;

use crate::registry::KindRegistry;

pub(crate) fn install_builtins(registry: &mut KindRegistry) {
    registry.register(perspective::spec());
    registry.register(record::spec());
    registry.register(function_node::spec());
}
