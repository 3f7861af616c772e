//! Fuzz test for the token decoder
//!
//! Feeds arbitrary byte sequences through decode to find:
//! - Panics or crashes
//! - Non-termination
//! - Accepted inputs that violate the field-set contract
//!
//! Run with: cargo +nightly fuzz run decode_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use portcullis_core::decode;

fuzz_target!(|data: &[u8]| {
    // The decoder takes UTF-8; anything else is out of its contract.
    if let Ok(input) = std::str::from_utf8(data) {
        // Decode must return, Ok or Err, never panic.
        if let Ok(token) = decode(input) {
            // Anything accepted must satisfy the model's invariants:
            // a known kind and its full declared field set.
            assert!(!token.kind().is_empty(), "kind must never be empty");
            assert!(
                portcullis_core::KIND_REGISTRY.contains(token.kind()),
                "decode accepted an unregistered kind"
            );
            let spec = portcullis_core::KIND_REGISTRY
                .get(token.kind())
                .expect("registered kind has a spec");
            for name in spec.extra_fields() {
                assert!(
                    token.extra(name).is_some(),
                    "decoded token is missing declared extra {name}"
                );
            }
        }
    }
});
