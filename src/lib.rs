//! Cora - curriculum graph recommendation engine
//!
//! Builds a prerequisite DAG from topic records, validates it (enumerating
//! every elementary cycle on failure), assigns presentation levels, and
//! recommends next topics for a learner under a four-tier strategy.

pub mod curriculum;
pub mod error;
pub mod graph;
pub mod recommend;
pub mod snapshot;

pub use curriculum::{Curriculum, TopicRecord, DEFAULT_CLUSTER, SCHEMA_VERSION};
pub use error::{CoraError, FixSuggestion, Result};
pub use graph::{assign_levels, CurriculumGraph, NodeInfo};
pub use recommend::{recommend, MasteredSet, DEFAULT_LIMIT};
pub use snapshot::{GraphSnapshot, NodeSummary};
