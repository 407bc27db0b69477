//! Core building blocks for flow-graph layout
//!
//! Identity and geometry types, the graph container, error taxonomy, and
//! logging setup shared by every pipeline stage.

mod error;
mod graph;
pub mod logging;
mod types;

pub use error::*;
pub use graph::*;
pub use logging::*;
pub use types::*;
