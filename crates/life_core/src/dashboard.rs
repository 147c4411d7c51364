use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{self, HabitAnalytics};
use crate::config::EngineConfig;
use crate::hierarchy::{self, HierarchyTree};
use crate::model::LifeCollections;
use crate::pipeline::{self, PipelineStats};
use crate::rollup::{Rollup, RollupCounts};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_for: Option<NaiveDate>,
    pub tree: HierarchyTree,
    pub rollup: RollupCounts,
    pub pipelines: Vec<PipelineStats>,
    pub habits: HabitAnalytics,
}

pub fn compute_dashboard(
    collections: &LifeCollections,
    today: NaiveDate,
    config: &EngineConfig,
) -> Dashboard {
    let tree = hierarchy::build_hierarchy(collections, config.value_goal_linking);
    let rollup = tree.rollup();
    let pipelines = tree.pillars.iter().map(pipeline::pipeline_stats).collect();
    let habits = analytics::analyze_habits(&collections.habits, &collections.habit_logs, today, config);
    Dashboard {
        generated_for: Some(today),
        tree,
        rollup,
        pipelines,
        habits,
    }
}
