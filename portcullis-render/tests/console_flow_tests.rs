use portcullis_core::kinds::function_node::{self, FunctionNode};
use portcullis_core::kinds::perspective;
use portcullis_core::{decode, EncodedToken, FormatError, KIND_REGISTRY};
use portcullis_render::render;
use portcullis_resolve::{resolve_ancestors, ResolveError};
use portcullis_test_utils::nested_chain_tokens;

#[test]
fn generated_node_through_decode_resolve_render() {
    // A generated element under the Home perspective, the way a console
    // would hold it in navigation state.
    let root = perspective::token("App", "Home");
    let node = function_node::token(&root, "T1", "N7", "E3");

    let wire = node.encode();
    let decoded = decode(&wire).expect("decode stored token");
    assert_eq!(decoded, node);

    let view = FunctionNode::of(&decoded).expect("kind is function-node");
    assert_eq!(view.tree_id(), "T1");
    assert_eq!(view.node_id(), "N7");
    assert_eq!(view.element_id(), "E3");
    assert_eq!(view.parent(&KIND_REGISTRY).expect("parent decodes"), &root);

    let chain = resolve_ancestors(&decoded).expect("resolve ancestors");
    assert_eq!(chain.as_slice(), &[root.clone()]);

    let html = render(&decoded);
    for fragment in [
        "<dt>kind</dt>\n<dd>function-node</dd>",
        "<dt>source</dt>\n<dd>T1</dd>",
        "<dt>id</dt>\n<dd>N7</dd>",
        "<dt>element_id</dt>\n<dd>E3</dd>",
        "<dt>parent</dt>",
        "<dt>kind</dt>\n<dd>perspective</dd>",
        "<dt>id</dt>\n<dd>Home</dd>",
    ] {
        assert!(html.contains(fragment), "missing {fragment:?} in:\n{html}");
    }
}

#[test]
fn three_level_chain_resolves_nearest_first_and_renders_whole() {
    let tokens = nested_chain_tokens(2);
    let leaf = decode(&tokens[0].encode()).expect("decode leaf");

    let chain = resolve_ancestors(&leaf).expect("resolve");
    assert_eq!(chain.into_vec(), tokens[1..].to_vec());

    let html = render(&leaf);
    assert_eq!(html.matches("<dl class=\"resource-token\">").count(), 3);
    assert!(html.contains("<dd>N2</dd>"));
    assert!(html.contains("<dd>N1</dd>"));
    assert!(html.contains("<dd>Home</dd>"));
}

#[test]
fn corrupt_session_string_fails_typed_but_renders_marked() {
    // Same bad parent, two disciplines: resolution reports the error,
    // rendering downgrades it to an inline marker.
    let node = function_node::from_encoded_parent(
        EncodedToken::new("perspective|type='', source='App'"),
        "T1",
        "N7",
        "E3",
    );

    let err = resolve_ancestors(&node).expect_err("short parent must not resolve");
    assert!(matches!(
        err,
        ResolveError::Decode(FormatError::MissingField {
            kind: "perspective",
            field: "id"
        })
    ));

    let html = render(&node);
    assert!(html.contains("unreadable parent: "));
    assert!(html.contains("Missing required field"));
    assert!(html.contains("<dt>id</dt>\n<dd>N7</dd>"));
}

#[test]
fn encoded_wrapper_carries_tokens_between_layers() {
    let leaf = nested_chain_tokens(1).remove(0);
    let stored = leaf.encoded();

    let restored = stored.decode().expect("decode wrapper");
    assert_eq!(restored, leaf);
    assert_eq!(
        resolve_ancestors(&restored).expect("resolve").len(),
        1
    );
}
