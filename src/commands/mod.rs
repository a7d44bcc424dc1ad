//! Command handlers
//!
//! Everything the user interface can ask of a session. Errors cross this
//! boundary as strings.
//! Split into submodules by functionality.

mod files;
mod preview;
mod search;

pub use files::*;
pub use preview::*;
pub use search::*;
