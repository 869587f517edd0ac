//! Curriculum graph - construction, validation, leveling
//!
//! - `build`: CurriculumGraph built from topic records
//! - `validate`: elementary cycle enumeration and the acyclicity gate
//! - `level`: longest-prerequisite-chain depth assignment
//!
//! The graph's edge set is immutable after construction; `assign_levels` is
//! the only mutation and touches node attributes only.

mod build;
mod level;
mod validate;

pub use build::{CurriculumGraph, EdgeVec, NodeInfo};
pub use level::assign_levels;
