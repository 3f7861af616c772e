//! Fuzz test for codec round-trip stability
//!
//! For any input the decoder accepts, re-encoding and decoding again must
//! land on an equal token, and the second encoding must be a fixed point.
//! This is the canonicalization contract: decode-encode normalizes field
//! order once and then never changes the bytes again.
//!
//! Run with: cargo +nightly fuzz run roundtrip_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use portcullis_core::decode;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(token) = decode(input) else {
        return;
    };

    let wire = token.encode();
    let again = decode(&wire).expect("canonical encoding must decode");
    assert_eq!(again, token, "round trip changed the token");
    assert_eq!(again.encode(), wire, "encoding is not a fixed point");
});
