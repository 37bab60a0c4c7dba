//! Arbitrary rule lists over a fixed schema: every successful layout has
//! non-overlapping fields in schema order.

#![no_main]

use libfuzzer_sys::fuzz_target;
use totems_core::{EnforcementRule, LayoutEngine, SchemaField};

fuzz_target!(|data: &[u8]| {
    let Ok(rules) = serde_json::from_slice::<Vec<EnforcementRule>>(data) else {
        return;
    };

    let schema = [
        SchemaField::new("producer", "name"),
        SchemaField::new("producer_key", "public_key"),
        SchemaField::new("url", "string"),
        SchemaField::new("location", "uint16"),
        SchemaField::new("votes", "name[]"),
        SchemaField::new("memo", "bytes"),
    ];

    let engine: LayoutEngine = LayoutEngine::default();
    if let Ok(layout) = engine.layout("eosio", "regproducer", &schema, &rules, "") {
        for pair in layout.fields.windows(2) {
            assert!(pair[0].offset + pair[0].size <= pair[1].offset);
        }
    }
});
