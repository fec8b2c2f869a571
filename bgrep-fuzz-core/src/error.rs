/// Errors produced by the `bgrep-fuzz-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A test case was built with a zero-length pattern.
    #[error("pattern must contain at least one byte")]
    EmptyPattern,

    /// Size bounds for case generation were unusable.
    #[error("invalid size bounds: {reason}")]
    InvalidBounds { reason: String },

    /// A line of tool output did not follow the `<filename>:<hex offset>` format.
    #[error("malformed output line {line_no} ({line:?}): {reason}")]
    MalformedOutput {
        line_no: usize,
        line: String,
        reason: String,
    },
}
