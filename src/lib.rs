// Library API shared by the CLI and WASM builds
pub mod board;
pub mod cancel;
pub mod coord;
pub mod demand;
pub mod errors;
pub mod graph;
pub mod grid;
pub mod log;
mod rune;
mod search;
pub mod solver;
pub mod state;
pub mod word_list;

pub use rune::DEFAULT_FILLER;

/// Crate version plus the commit it was built from, e.g. `0.1.0 (3f2a9c1)`.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
