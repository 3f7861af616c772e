use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portcullis_core::kinds::{function_node, perspective, record};
use portcullis_core::{decode, encode, KIND_REGISTRY};

fn nested_sample() -> portcullis_core::ResourceToken {
    let root = perspective::token("App", "Home");
    let mid = function_node::token(&root, "T1", "N1", "E1");
    function_node::token(&mid, "T1", "N2", "E2")
}

fn bench_encode(c: &mut Criterion) {
    let flat = record::token("Product", "Shop", "42", "en-US");
    c.bench_function("codec/encode_record", |b| {
        b.iter(|| black_box(encode(black_box(&flat))));
    });

    let nested = nested_sample();
    c.bench_function("codec/encode_nested", |b| {
        b.iter(|| black_box(encode(black_box(&nested))));
    });
}

fn bench_decode(c: &mut Criterion) {
    let flat_wire = record::token("Product", "Shop", "42", "en-US").encode();
    c.bench_function("codec/decode_record", |b| {
        b.iter(|| decode(black_box(&flat_wire)).expect("decode record"));
    });

    let nested_wire = nested_sample().encode();
    c.bench_function("codec/decode_nested", |b| {
        b.iter(|| decode(black_box(&nested_wire)).expect("decode nested"));
    });
}

fn bench_embedded_parent(c: &mut Criterion) {
    let parent = perspective::token("App", "Home");

    c.bench_function("codec/embedded_parent_cold", |b| {
        b.iter(|| {
            let node = function_node::token(black_box(&parent), "T1", "N7", "E3");
            black_box(node.embedded_parent(&KIND_REGISTRY).expect("parent").kind());
        });
    });

    let warm = function_node::token(&parent, "T1", "N7", "E3");
    warm.embedded_parent(&KIND_REGISTRY).expect("parent");
    c.bench_function("codec/embedded_parent_warm", |b| {
        b.iter(|| {
            black_box(warm.embedded_parent(&KIND_REGISTRY).expect("parent").id());
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_embedded_parent);
criterion_main!(benches);
