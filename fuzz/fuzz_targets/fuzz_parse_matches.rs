//! Fuzz target: `bgrep -Hb` output parser.
//!
//! Arbitrary text must never panic the parser, and anything it accepts must
//! format back to exactly the same text.
#![no_main]

use bgrep_fuzz_core::{format_matches, parse_matches};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(matches) = parse_matches("data", text) {
        // Re-formatting pads to 8 digits, so only canonical input round-trips.
        let canonical = format_matches("data", &matches);
        let reparsed = parse_matches("data", &canonical).expect("canonical output must parse");
        assert_eq!(reparsed, matches);
    }
});
