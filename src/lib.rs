//! Life Grid - Conway's Game of Life on a grid that grows as you pan.
//!
//! The grid is a dense row-major buffer that is enlarged on demand when the
//! viewport moves past its edge, rather than a fixed or toroidal board. Grid
//! state persists to a headerless bit-packed file.
//!
//! # Architecture
//!
//! - `compute`: bit packing, grid storage/stepping/resizing, viewport, session
//! - `schema`: Configuration and seeding types
//! - `storage`: Save/load of the bit-packed file format
//!
//! # Example
//!
//! ```rust,no_run
//! use life_grid::{
//!     compute::{Direction, Session},
//!     schema::{Pattern, Seed, SessionConfig},
//! };
//!
//! let config = SessionConfig {
//!     seed: Seed {
//!         pattern: Pattern::Glider { x: 0, y: 0 },
//!     },
//!     ..Default::default()
//! };
//! let mut session = Session::new(&config).unwrap();
//!
//! // Pan past the left edge: the grid grows and the glider shifts with it
//! session.pan(Direction::Left, 10).unwrap();
//! session.run(100);
//! session.save().unwrap();
//!
//! println!("{}", session.stats());
//! ```

pub mod compute;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use compute::{BitPacker, Direction, Grid, Session, SessionStats, Viewport};
pub use schema::{Pattern, Seed, SessionConfig};
