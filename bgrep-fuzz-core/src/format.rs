//! `bgrep -Hb` output format.
//!
//! One line per match, `<filename>:<offset>\n`, where the offset is lowercase
//! hex zero-padded to at least 8 digits. No output at all for zero matches.

use crate::error::CoreError;
use crate::oracle::MatchSet;

/// Minimum number of hex digits in a formatted offset.
pub const OFFSET_WIDTH: usize = 8;

/// Render `matches` exactly as `bgrep -Hb` prints them for `filename`.
#[must_use]
pub fn format_matches(filename: &str, matches: &MatchSet) -> String {
    matches
        .offsets()
        .iter()
        .map(|offset| format!("{filename}:{offset:0width$x}\n", width = OFFSET_WIDTH))
        .collect()
}

/// Parse `bgrep -Hb` output for `filename` back into offsets.
///
/// Every line must be newline-terminated, carry `filename` as its prefix and
/// end in at least [`OFFSET_WIDTH`] lowercase hex digits. Offsets must be
/// strictly ascending.
///
/// # Errors
/// Returns [`CoreError::MalformedOutput`] naming the first offending line.
pub fn parse_matches(filename: &str, text: &str) -> Result<MatchSet, CoreError> {
    let mut offsets: Vec<u64> = Vec::new();

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let malformed = |reason: &str| CoreError::MalformedOutput {
            line_no,
            line: line.to_owned(),
            reason: reason.to_owned(),
        };

        let body = line
            .strip_suffix('\n')
            .ok_or_else(|| malformed("missing trailing newline"))?;
        let (name, digits) = body
            .rsplit_once(':')
            .ok_or_else(|| malformed("missing ':' separator"))?;

        if name != filename {
            return Err(malformed("unexpected filename"));
        }
        if digits.len() < OFFSET_WIDTH {
            return Err(malformed("offset shorter than 8 digits"));
        }
        if !digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(malformed("offset is not lowercase hex"));
        }

        let offset = u64::from_str_radix(digits, 16).map_err(|e| malformed(&e.to_string()))?;
        if offsets.last().is_some_and(|&prev| prev >= offset) {
            return Err(malformed("offsets not strictly ascending"));
        }
        offsets.push(offset);
    }

    Ok(MatchSet::from(offsets))
}
