use serde::{Deserialize, Serialize};

use crate::hierarchy::PillarNode;
use crate::model::EntityId;
use crate::rollup::Rollup;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub pillar_id: EntityId,
    pub total_values: usize,
    pub total_goals: usize,
    pub active_goals: usize,
    pub total_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_percentage: u8,
}

pub fn pipeline_stats(pillar: &PillarNode) -> PipelineStats {
    let counts = pillar.rollup();
    let completion = counts.completed_tasks as f64 / counts.total_tasks.max(1) as f64 * 100.0;
    PipelineStats {
        pillar_id: pillar.pillar.id.clone(),
        total_values: counts.total_values,
        total_goals: counts.total_goals,
        active_goals: counts.active_goals,
        total_projects: counts.total_projects,
        total_tasks: counts.total_tasks,
        completed_tasks: counts.completed_tasks,
        completion_percentage: completion.round().clamp(0.0, 100.0) as u8,
    }
}
