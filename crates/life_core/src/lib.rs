pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod expansion;
pub mod hierarchy;
pub mod model;
pub mod pipeline;
pub mod rollup;
pub mod streak;

pub use crate::config::{EngineConfig, ValueGoalLinking};
pub use crate::dashboard::{compute_dashboard, Dashboard};
pub use crate::hierarchy::{build_hierarchy, HierarchyTree};
pub use crate::rollup::{Rollup, RollupCounts};
