//! Fuzz target: JSON deserialization of the RPC value union.
//!
//! Verifies that arbitrary byte sequences fed to the untagged decoder
//! never cause panics, UB, or unbounded resource consumption.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vmrc_core::Value;

fuzz_target!(|data: &[u8]| {
    // Treat arbitrary bytes as a JSON payload for a call result.
    // We only care that this never panics — errors are expected and fine.
    let _ = serde_json::from_slice::<Value>(data);
});
