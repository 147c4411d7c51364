use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ValueGoalLinking;
use crate::model::{Goal, Habit, LifeCollections, Pillar, Project, Task, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectNode {
    pub project: Project,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalNode {
    pub goal: Goal,
    pub habits: Vec<Habit>,
    pub projects: Vec<ProjectNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueNode {
    pub value: Value,
    pub goals: Vec<GoalNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PillarNode {
    pub pillar: Pillar,
    pub values: Vec<ValueNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unattached {
    pub values: Vec<Value>,
    pub goals: Vec<GoalNode>,
    pub projects: Vec<ProjectNode>,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
}

impl Unattached {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.goals.is_empty()
            && self.projects.is_empty()
            && self.tasks.is_empty()
            && self.habits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.goals.len() + self.projects.len() + self.tasks.len() + self.habits.len()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HierarchyTree {
    pub pillars: Vec<PillarNode>,
    pub unattached: Unattached,
}

impl HierarchyTree {
    pub fn pillar(&self, id: &str) -> Option<&PillarNode> {
        self.pillars.iter().find(|node| node.pillar.id == id)
    }
}

/// Rows with a missing or unknown parent go to `unattached` instead of being dropped.
#[instrument(skip(collections), fields(pillars = collections.pillars.len()))]
pub fn build_hierarchy(collections: &LifeCollections, linking: ValueGoalLinking) -> HierarchyTree {
    let mut unattached = Unattached::default();

    let project_ids: HashSet<&str> = collections.projects.iter().map(|p| p.id.as_str()).collect();
    let mut tasks_by_project: HashMap<&str, Vec<Task>> = HashMap::new();
    for task in &collections.tasks {
        match task.project_id.as_deref() {
            Some(parent) if project_ids.contains(parent) => {
                tasks_by_project.entry(parent).or_default().push(task.clone());
            }
            _ => unattached.tasks.push(task.clone()),
        }
    }

    let goal_ids: HashSet<&str> = collections.goals.iter().map(|g| g.id.as_str()).collect();
    let mut projects_by_goal: HashMap<&str, Vec<ProjectNode>> = HashMap::new();
    for project in &collections.projects {
        let node = ProjectNode {
            project: project.clone(),
            tasks: tasks_by_project.remove(project.id.as_str()).unwrap_or_default(),
        };
        match project.linked_goal_id.as_deref() {
            Some(parent) if goal_ids.contains(parent) => {
                projects_by_goal.entry(parent).or_default().push(node);
            }
            _ => unattached.projects.push(node),
        }
    }

    let mut habits_by_goal: HashMap<&str, Vec<Habit>> = HashMap::new();
    for habit in &collections.habits {
        match habit.goal_id.as_deref() {
            Some(parent) if goal_ids.contains(parent) => {
                habits_by_goal.entry(parent).or_default().push(habit.clone());
            }
            _ => unattached.habits.push(habit.clone()),
        }
    }

    let pillar_ids: HashSet<&str> = collections.pillars.iter().map(|p| p.id.as_str()).collect();
    let mut goals_by_pillar: HashMap<&str, Vec<GoalNode>> = HashMap::new();
    for goal in &collections.goals {
        let node = GoalNode {
            goal: goal.clone(),
            habits: habits_by_goal.remove(goal.id.as_str()).unwrap_or_default(),
            projects: projects_by_goal.remove(goal.id.as_str()).unwrap_or_default(),
        };
        match goal.pillar_id.as_deref() {
            Some(parent) if pillar_ids.contains(parent) => {
                goals_by_pillar.entry(parent).or_default().push(node);
            }
            _ => unattached.goals.push(node),
        }
    }

    let mut values_by_pillar: HashMap<&str, Vec<&Value>> = HashMap::new();
    for value in &collections.values {
        match value.pillar_id.as_deref() {
            Some(parent) if pillar_ids.contains(parent) => {
                values_by_pillar.entry(parent).or_default().push(value);
            }
            _ => unattached.values.push(value.clone()),
        }
    }

    let connections: HashSet<(&str, &str)> = collections
        .value_goal_connections
        .iter()
        .map(|link| (link.value_id.as_str(), link.goal_id.as_str()))
        .collect();

    let mut pillars = Vec::with_capacity(collections.pillars.len());
    for pillar in &collections.pillars {
        let goals = goals_by_pillar.remove(pillar.id.as_str()).unwrap_or_default();
        let values = values_by_pillar.remove(pillar.id.as_str()).unwrap_or_default();

        let mut placed = vec![false; goals.len()];
        let value_nodes: Vec<ValueNode> = values
            .into_iter()
            .map(|value| {
                let linked: Vec<GoalNode> = goals
                    .iter()
                    .enumerate()
                    .filter(|(_, node)| match linking {
                        ValueGoalLinking::FanOut => true,
                        ValueGoalLinking::Explicit => {
                            connections.contains(&(value.id.as_str(), node.goal.id.as_str()))
                        }
                    })
                    .map(|(idx, node)| {
                        placed[idx] = true;
                        node.clone()
                    })
                    .collect();
                ValueNode {
                    value: value.clone(),
                    goals: linked,
                }
            })
            .collect();

        unattached.goals.extend(
            goals
                .into_iter()
                .zip(placed)
                .filter(|(_, placed)| !placed)
                .map(|(node, _)| node),
        );

        pillars.push(PillarNode {
            pillar: pillar.clone(),
            values: value_nodes,
        });
    }

    if !unattached.is_empty() {
        tracing::debug!(
            values = unattached.values.len(),
            goals = unattached.goals.len(),
            projects = unattached.projects.len(),
            tasks = unattached.tasks.len(),
            habits = unattached.habits.len(),
            "rows left outside the pillar tree"
        );
    }

    HierarchyTree { pillars, unattached }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoalStatus, HabitFrequency, HabitStatus, HabitType, TaskStatus, ValueGoalConnection};

    fn pillar(id: &str) -> Pillar {
        Pillar {
            id: id.into(),
            user_id: "u".into(),
            name: id.to_uppercase(),
            description: String::new(),
        }
    }

    fn value(id: &str, pillar_id: Option<&str>) -> Value {
        Value {
            id: id.into(),
            user_id: "u".into(),
            pillar_id: pillar_id.map(Into::into),
            title: id.into(),
            description: String::new(),
        }
    }

    fn goal(id: &str, pillar_id: Option<&str>) -> Goal {
        Goal {
            id: id.into(),
            user_id: "u".into(),
            pillar_id: pillar_id.map(Into::into),
            title: id.into(),
            description: String::new(),
            status: GoalStatus::Active,
            priority: 1,
            target_date: None,
        }
    }

    fn project(id: &str, goal_id: Option<&str>) -> Project {
        Project {
            id: id.into(),
            user_id: "u".into(),
            linked_goal_id: goal_id.map(Into::into),
            title: id.into(),
            description: String::new(),
            status: GoalStatus::Active,
        }
    }

    fn task(id: &str, project_id: Option<&str>) -> Task {
        Task {
            id: id.into(),
            user_id: "u".into(),
            project_id: project_id.map(Into::into),
            description: id.into(),
            status: TaskStatus::Pending,
            priority: 0,
            due_date: None,
            tags: Vec::new(),
        }
    }

    fn habit(id: &str, goal_id: Option<&str>) -> Habit {
        Habit {
            id: id.into(),
            user_id: "u".into(),
            goal_id: goal_id.map(Into::into),
            title: id.into(),
            habit_type: HabitType::Do,
            frequency: HabitFrequency::Daily,
            status: HabitStatus::Active,
        }
    }

    fn link(value_id: &str, goal_id: &str) -> ValueGoalConnection {
        ValueGoalConnection {
            user_id: "u".into(),
            value_id: value_id.into(),
            goal_id: goal_id.into(),
        }
    }

    #[test]
    fn nests_full_chain() {
        let collections = LifeCollections {
            pillars: vec![pillar("health")],
            values: vec![value("wellness", Some("health"))],
            goals: vec![goal("run", Some("health"))],
            projects: vec![project("plan", Some("run"))],
            tasks: vec![task("t1", Some("plan")), task("t2", Some("plan"))],
            habits: vec![habit("stretch", Some("run"))],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        assert!(tree.unattached.is_empty());
        let health = tree.pillar("health").expect("pillar present");
        let goal_node = &health.values[0].goals[0];
        assert_eq!(goal_node.goal.id, "run");
        assert_eq!(goal_node.habits[0].id, "stretch");
        assert_eq!(goal_node.projects[0].tasks.len(), 2);
        assert_eq!(goal_node.projects[0].tasks[0].id, "t1");
    }

    #[test]
    fn fan_out_gives_every_value_every_goal() {
        let collections = LifeCollections {
            pillars: vec![pillar("career")],
            values: vec![value("growth", Some("career")), value("craft", Some("career"))],
            goals: vec![goal("promo", Some("career")), goal("talk", Some("career"))],
            value_goal_connections: vec![link("growth", "promo")],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        let career = &tree.pillars[0];
        assert_eq!(career.values.len(), 2);
        assert!(career.values.iter().all(|v| v.goals.len() == 2));
        assert!(tree.unattached.goals.is_empty());
    }

    #[test]
    fn explicit_linking_follows_connections() {
        let collections = LifeCollections {
            pillars: vec![pillar("career")],
            values: vec![value("growth", Some("career")), value("craft", Some("career"))],
            goals: vec![
                goal("promo", Some("career")),
                goal("talk", Some("career")),
                goal("lonely", Some("career")),
            ],
            value_goal_connections: vec![link("growth", "promo"), link("craft", "promo"), link("craft", "talk")],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::Explicit);
        let career = &tree.pillars[0];
        let ids = |node: &ValueNode| node.goals.iter().map(|g| g.goal.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&career.values[0]), vec!["promo"]);
        assert_eq!(ids(&career.values[1]), vec!["promo", "talk"]);
        assert_eq!(tree.unattached.goals.len(), 1);
        assert_eq!(tree.unattached.goals[0].goal.id, "lonely");
    }

    #[test]
    fn orphans_go_to_unattached() {
        let collections = LifeCollections {
            pillars: vec![pillar("health")],
            values: vec![value("wellness", Some("health")), value("stray", Some("missing"))],
            goals: vec![goal("run", Some("health")), goal("floating", None)],
            projects: vec![project("plan", Some("run")), project("side", None)],
            tasks: vec![task("t1", Some("plan")), task("t2", None), task("t3", Some("side"))],
            habits: vec![habit("h1", Some("nope"))],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        assert_eq!(tree.unattached.values[0].id, "stray");
        assert_eq!(tree.unattached.goals[0].goal.id, "floating");
        assert_eq!(tree.unattached.projects[0].project.id, "side");
        assert_eq!(tree.unattached.projects[0].tasks[0].id, "t3");
        assert_eq!(tree.unattached.tasks[0].id, "t2");
        assert_eq!(tree.unattached.habits[0].id, "h1");
        assert_eq!(tree.unattached.len(), 5);
    }

    #[test]
    fn pillar_without_values_leaves_goals_unattached() {
        let collections = LifeCollections {
            pillars: vec![pillar("health")],
            goals: vec![goal("run", Some("health"))],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        assert!(tree.pillars[0].values.is_empty());
        assert_eq!(tree.unattached.goals[0].goal.id, "run");
    }

    #[test]
    fn tolerates_partially_fetched_collections() {
        let collections = LifeCollections {
            projects: vec![project("plan", Some("run"))],
            tasks: vec![task("t1", Some("plan"))],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        assert!(tree.pillars.is_empty());
        assert_eq!(tree.unattached.projects[0].tasks.len(), 1);
    }

    #[test]
    fn preserves_pillar_order() {
        let collections = LifeCollections {
            pillars: vec![pillar("newest"), pillar("older"), pillar("oldest")],
            ..LifeCollections::default()
        };
        let tree = build_hierarchy(&collections, ValueGoalLinking::FanOut);
        let order: Vec<&str> = tree.pillars.iter().map(|p| p.pillar.id.as_str()).collect();
        assert_eq!(order, vec!["newest", "older", "oldest"]);
    }
}
