//! Quill buffer storage.
//!
//! Builds the editor-facing pieces on top of the engine primitives:
//!
//! - [`LineTable`]: the lines of a buffer, addressed by 1-based line number,
//!   with character-aware stepping through a [`CharEncoding`]
//! - [`MarkTable`]: named positions kept in a [`Dict`](quill_dict::Dict)
//!   and adjusted as lines come and go
//!
//! # Tracing
//!
//! Structural edits are instrumented with `tracing` spans. Call
//! [`init_tracing`] once at startup and set `RUST_LOG` (for example
//! `RUST_LOG=quill_buffer=trace`) to see them.

use std::sync::Once;

mod error;
mod lines;
mod marks;

pub use error::BufferError;
pub use lines::LineTable;
pub use marks::{Mark, MarkTable};

pub use quill_mbyte::CharEncoding;
pub use quill_pos::{PosRange, Position};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber for the engine crates.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
