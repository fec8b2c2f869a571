//! Fuzz target: reference search soundness.
//!
//! Splits the input into a pattern and a buffer and checks that every offset
//! the oracle reports is a real occurrence, that no occurrence is skipped,
//! and that the formatted output parses back to the same offsets.
#![no_main]

use bgrep_fuzz_core::{find_matches, format_matches, parse_matches};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let pattern_len = usize::from(split % 8) + 1;
    if rest.len() < pattern_len {
        // Pattern one byte longer than the buffer: must produce nothing.
        if let Some((_, shorter)) = rest.split_last() {
            assert!(find_matches(shorter, rest).is_empty());
        }
        return;
    }
    let (pattern, haystack) = rest.split_at(pattern_len);

    let matches = find_matches(haystack, pattern);
    let naive: Vec<u64> = haystack
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == pattern)
        .map(|(i, _)| i as u64)
        .collect();
    assert_eq!(matches.offsets(), naive.as_slice());

    let text = format_matches("data", &matches);
    let parsed = parse_matches("data", &text).expect("formatted output must parse");
    assert_eq!(parsed, matches);
});
