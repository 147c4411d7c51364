use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::hierarchy::{GoalNode, HierarchyTree, PillarNode, ProjectNode, ValueNode};
use crate::model::{GoalStatus, Habit, HabitStatus, Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RollupCounts {
    pub total_pillars: usize,
    pub total_values: usize,
    pub total_goals: usize,
    pub active_goals: usize,
    pub total_habits: usize,
    pub active_habits: usize,
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
}

impl AddAssign for RollupCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.total_pillars += rhs.total_pillars;
        self.total_values += rhs.total_values;
        self.total_goals += rhs.total_goals;
        self.active_goals += rhs.active_goals;
        self.total_habits += rhs.total_habits;
        self.active_habits += rhs.active_habits;
        self.total_projects += rhs.total_projects;
        self.active_projects += rhs.active_projects;
        self.total_tasks += rhs.total_tasks;
        self.completed_tasks += rhs.completed_tasks;
        self.pending_tasks += rhs.pending_tasks;
    }
}

impl Add for RollupCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sum for RollupCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

pub trait Rollup {
    fn rollup(&self) -> RollupCounts;
}

fn sum_of<'a, T: Rollup + 'a>(children: impl IntoIterator<Item = &'a T>) -> RollupCounts {
    children.into_iter().map(Rollup::rollup).sum()
}

impl Rollup for Task {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_tasks: 1,
            completed_tasks: usize::from(self.status == TaskStatus::Completed),
            pending_tasks: usize::from(self.status == TaskStatus::Pending),
            ..RollupCounts::default()
        }
    }
}

impl Rollup for Habit {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_habits: 1,
            active_habits: usize::from(self.status == HabitStatus::Active),
            ..RollupCounts::default()
        }
    }
}

impl Rollup for ProjectNode {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_projects: 1,
            active_projects: usize::from(self.project.status == GoalStatus::Active),
            ..RollupCounts::default()
        } + sum_of(&self.tasks)
    }
}

impl Rollup for GoalNode {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_goals: 1,
            active_goals: usize::from(self.goal.status == GoalStatus::Active),
            ..RollupCounts::default()
        } + sum_of(&self.habits)
            + sum_of(&self.projects)
    }
}

impl Rollup for ValueNode {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_values: 1,
            ..RollupCounts::default()
        } + sum_of(&self.goals)
    }
}

impl Rollup for PillarNode {
    fn rollup(&self) -> RollupCounts {
        RollupCounts {
            total_pillars: 1,
            ..RollupCounts::default()
        } + sum_of(&self.values)
    }
}

// unattached rows are not counted
impl Rollup for HierarchyTree {
    fn rollup(&self) -> RollupCounts {
        rollup_pillars(&self.pillars)
    }
}

pub fn rollup_pillars(pillars: &[PillarNode]) -> RollupCounts {
    sum_of(pillars)
}
