// SPDX-License-Identifier: Apache-2.0

#![no_main]

use issuelens_core::ai::normalize::{extract_object_span, parse_model_reply};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(span) = extract_object_span(s) {
            assert!(span.starts_with('{') && span.ends_with('}'));
        }
        if let Ok(analysis) = parse_model_reply(s) {
            assert_eq!(analysis.summary, analysis.summary.trim());
            assert_eq!(analysis.potential_impact, analysis.potential_impact.trim());
        }
    }
});
