use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type EntityId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Planning,
    Active,
    Paused,
    Completed,
    Cancelled,
}

pub type ProjectStatus = GoalStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    #[default]
    Do,
    Dont,
}

impl HabitType {
    /// Interprets a log's `completed` flag: a `do` habit succeeds when it was done,
    /// a `dont` habit succeeds when it was not.
    pub fn is_success(self, completed: bool) -> bool {
        match self {
            HabitType::Do => completed,
            HabitType::Dont => !completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    #[default]
    Active,
    Paused,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pillar {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Value {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub pillar_id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub pillar_id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: GoalStatus,
    // 1 is the most urgent
    #[serde(default = "default_goal_priority")]
    pub priority: u8,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

fn default_goal_priority() -> u8 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub linked_goal_id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub goal_id: Option<EntityId>,
    pub title: String,
    #[serde(rename = "type", default)]
    pub habit_type: HabitType,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub status: HabitStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitLog {
    pub id: EntityId,
    pub user_id: EntityId,
    pub habit_id: EntityId,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueGoalConnection {
    pub user_id: EntityId,
    pub value_id: EntityId,
    pub goal_id: EntityId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LifeCollections {
    #[serde(default)]
    pub pillars: Vec<Pillar>,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub habit_logs: Vec<HabitLog>,
    #[serde(default)]
    pub value_goal_connections: Vec<ValueGoalConnection>,
}

impl LifeCollections {
    pub fn is_empty(&self) -> bool {
        self.pillars.is_empty()
            && self.values.is_empty()
            && self.goals.is_empty()
            && self.projects.is_empty()
            && self.tasks.is_empty()
            && self.habits.is_empty()
            && self.habit_logs.is_empty()
            && self.value_goal_connections.is_empty()
    }

    pub fn merge(&mut self, other: LifeCollections) {
        self.pillars.extend(other.pillars);
        self.values.extend(other.values);
        self.goals.extend(other.goals);
        self.projects.extend(other.projects);
        self.tasks.extend(other.tasks);
        self.habits.extend(other.habits);
        self.habit_logs.extend(other.habit_logs);
        self.value_goal_connections.extend(other.value_goal_connections);
    }

    pub fn row_count(&self) -> usize {
        self.pillars.len()
            + self.values.len()
            + self.goals.len()
            + self.projects.len()
            + self.tasks.len()
            + self.habits.len()
            + self.habit_logs.len()
            + self.value_goal_connections.len()
    }

    pub fn logs_for(&self, habit_id: &str) -> Vec<HabitLog> {
        self.habit_logs
            .iter()
            .filter(|log| log.habit_id == habit_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_type_flips_success() {
        assert!(HabitType::Do.is_success(true));
        assert!(!HabitType::Do.is_success(false));
        assert!(HabitType::Dont.is_success(false));
        assert!(!HabitType::Dont.is_success(true));
    }

    #[test]
    fn deserializes_storage_rows() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","user_id":"u1","project_id":"p1","description":"Stretch","status":"in-progress","priority":2}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.project_id.as_deref(), Some("p1"));
        assert!(task.tags.is_empty());

        let habit: Habit = serde_json::from_str(
            r#"{"id":"h1","user_id":"u1","title":"No sugar","type":"dont","frequency":"daily","status":"paused"}"#,
        )
        .unwrap();
        assert_eq!(habit.habit_type, HabitType::Dont);
        assert_eq!(habit.status, HabitStatus::Paused);
        assert!(habit.goal_id.is_none());

        let goal: Goal = serde_json::from_str(
            r#"{"id":"g1","user_id":"u1","pillar_id":"p1","title":"Run 5K","status":"active","target_date":"2026-05-01"}"#,
        )
        .unwrap();
        assert_eq!(goal.priority, 3);
        assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2026, 5, 1));
    }

    #[test]
    fn rejects_unknown_status() {
        let parsed = serde_json::from_str::<Task>(
            r#"{"id":"t1","user_id":"u1","description":"x","status":"blocked"}"#,
        );
        assert!(parsed.is_err());
    }
}
