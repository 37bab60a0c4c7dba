//! Arbitrary ABI JSON must resolve or fail cleanly, never panic or recurse
//! without bound through type aliases and base structs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use totems_core::resolve_action;
use totems_proto::AbiDocument;

fuzz_target!(|data: &[u8]| {
    let Ok(abi) = serde_json::from_slice::<AbiDocument>(data) else {
        return;
    };
    for action in &abi.actions {
        let _ = resolve_action(&abi, &action.name);
    }
});
