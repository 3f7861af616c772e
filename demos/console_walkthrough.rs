//! Console Walkthrough Example
//!
//! Demonstrates the fundamental PORTCULLIS workflow:
//! 1. Construct tokens for console resources
//! 2. Encode them for session/navigation state
//! 3. Decode them back through the kind registry
//! 4. Resolve the permission-ancestor chain
//! 5. Render diagnostic HTML
//!
//! Everything here runs in-process against the built-in kinds. Custom
//! kinds work the same way through `KindRegistry::builtin()` plus their
//! own registrations and the `*_with` entry points.

use portcullis_core::kinds::function_node::{self, FunctionNode};
use portcullis_core::kinds::{perspective, record};
use portcullis_core::{decode, EncodedToken, KIND_REGISTRY};
use portcullis_render::render;
use portcullis_resolve::{resolve_ancestors, ResolveError};

fn main() -> Result<(), ResolveError> {
    println!("=== PORTCULLIS Console Walkthrough ===\n");

    // Step 1: Construct tokens for a few console resources
    let home = perspective::token("App", "Home");
    let product = record::token("Product", "Shop", "42", "en-US");
    let node = function_node::token(&home, "T1", "N7", "E3");
    println!("✓ Tokens constructed");
    println!("  perspective:   {home}");
    println!("  record:        {product}");
    println!("  function-node: {node}");

    // Step 2: Encode for persistence
    let stored = store_in_session(&node);
    println!("\n✓ Token stored in session state");
    println!("  {} bytes on the wire", stored.as_str().len());

    // Step 3: Decode back through the registry
    let restored = stored.decode()?;
    assert_eq!(restored, node);
    println!("\n✓ Token restored, identity intact");

    let view = FunctionNode::of(&restored).expect("kind is function-node");
    println!("  tree:    {}", view.tree_id());
    println!("  node:    {}", view.node_id());
    println!("  element: {}", view.element_id());
    println!("  parent:  {}", view.parent(&KIND_REGISTRY)?);

    // Step 4: Resolve the permission-ancestor chain
    let chain = resolve_ancestors(&restored)?;
    println!("\n✓ Ancestor chain resolved, nearest first");
    for (i, ancestor) in chain.iter().enumerate() {
        println!("  {}. {}", i + 1, ancestor);
    }
    println!("  root: {}", chain.root().expect("node is not a root"));

    // Step 5: Render diagnostic HTML
    let html = render(&restored);
    println!("\n✓ Diagnostic rendering");
    println!("  {} definition lists", html.matches("<dl").count());

    // A corrupt parent fails resolution with a typed error but still
    // renders, marked inline.
    let corrupt = corrupt_session_token();
    let err = resolve_ancestors(&corrupt).expect_err("corrupt parent must not resolve");
    println!("\n✓ Corrupt parent surfaced as typed error");
    println!("  {err}");
    let marked = render(&corrupt);
    assert!(marked.contains("unreadable parent"));
    println!("  rendering carries an inline marker instead");

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}

/// Encode a token the way console navigation state would hold it.
fn store_in_session(token: &portcullis_core::ResourceToken) -> EncodedToken {
    token.encoded()
}

/// A function node whose stored parent string was truncated in storage.
fn corrupt_session_token() -> portcullis_core::ResourceToken {
    function_node::from_encoded_parent(
        EncodedToken::new("perspective|type='', source='App'"),
        "T1",
        "N7",
        "E3",
    )
}
