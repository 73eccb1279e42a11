//! XML tree-edit diff engine.
//!
//! Normalized trees go in, a flat stream of typed diff tokens comes out.
//! The cost model estimates edit distances, the planner aligns children
//! and emits tokens addressed by locators.

pub mod cost;
pub mod planner;
pub mod token;

pub use cost::{CostModel, Side, NO_MATCH};
pub use planner::DiffPlanner;
pub use token::{EditType, XmlDiffToken};
