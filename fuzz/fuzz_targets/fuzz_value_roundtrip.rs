//! Fuzz target: untagged round trip of the RPC value union.
//!
//! Any value the decoder accepts must serialize back to JSON and decode to
//! an equal value; the untagged representation must not lose variants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vmrc_core::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let json = serde_json::to_string(&value).expect("accepted value must serialize");
    let back: Value =
        serde_json::from_str(&json).expect("serialized value must deserialize");
    assert_eq!(back, value, "round trip must preserve the value");
});
