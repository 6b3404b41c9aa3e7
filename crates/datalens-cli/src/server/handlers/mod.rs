//! API request handlers.

mod analyze;
mod hr;
mod samples;

pub use analyze::*;
pub use hr::*;
pub use samples::*;
