//! Compute module - Cell storage, stepping, and viewport navigation.

mod bits;
mod grid;
mod session;
mod viewport;

pub use bits::*;
pub use grid::*;
pub use session::*;
pub use viewport::*;
