use quill_dict::DictError;
use quill_garray::GrowError;

/// Errors from line and mark operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Line 0, or a line past the end of the buffer.
    #[error("line {line} out of range (buffer has {count} lines)")]
    LineOutOfRange { line: u32, count: usize },

    /// A column past the end of its line.
    #[error("column {col} out of range on line {line} (length {len})")]
    ColumnOutOfRange { line: u32, col: u32, len: usize },

    /// The line would be longer than a column number can address.
    #[error("line of {len} bytes is too long")]
    LineTooLong { len: usize },

    #[error(transparent)]
    Grow(#[from] GrowError),

    #[error(transparent)]
    Dict(#[from] DictError),
}
