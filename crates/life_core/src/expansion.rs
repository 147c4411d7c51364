use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::EntityId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TreeLevel {
    Pillar,
    Value,
    Goal,
    Project,
}

/// One id set per level so equal ids of different entity types never collide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pillars: HashSet<EntityId>,
    values: HashSet<EntityId>,
    goals: HashSet<EntityId>,
    projects: HashSet<EntityId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn level(&self, level: TreeLevel) -> &HashSet<EntityId> {
        match level {
            TreeLevel::Pillar => &self.pillars,
            TreeLevel::Value => &self.values,
            TreeLevel::Goal => &self.goals,
            TreeLevel::Project => &self.projects,
        }
    }

    fn level_mut(&mut self, level: TreeLevel) -> &mut HashSet<EntityId> {
        match level {
            TreeLevel::Pillar => &mut self.pillars,
            TreeLevel::Value => &mut self.values,
            TreeLevel::Goal => &mut self.goals,
            TreeLevel::Project => &mut self.projects,
        }
    }

    pub fn toggle(&mut self, level: TreeLevel, id: &str) -> bool {
        let set = self.level_mut(level);
        if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, level: TreeLevel, id: &str) -> bool {
        self.level(level).contains(id)
    }

    pub fn expanded_count(&self, level: TreeLevel) -> usize {
        self.level(level).len()
    }

    pub fn collapse_all(&mut self) {
        self.pillars.clear();
        self.values.clear();
        self.goals.clear();
        self.projects.clear();
    }
}
