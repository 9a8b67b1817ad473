//! Built-in subscription sources.
//!
//! - **Timers** ([`After`]) -- a one-shot delay keyed so that re-declaring it
//!   with a new key cancels the pending one.
//! - **Line input** ([`input_lines`], [`InputLines`]) -- newline-delimited text
//!   read from stdin.

mod lines;
mod timer;

pub use lines::*;
pub use timer::*;
