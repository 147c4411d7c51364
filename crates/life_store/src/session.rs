use life_core::model::{
    EntityId, Goal, Habit, HabitLog, LifeCollections, Pillar, Project, Task, Value, ValueGoalConnection,
};
use serde::{Deserialize, Serialize};

/// Identity of the signed-in user. Passed into every query instead of living in
/// process-wide state; dropping it is signing out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Session {
    pub user_id: EntityId,
}

impl Session {
    pub fn new(user_id: impl Into<EntityId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn owns(&self, row: &impl Owned) -> bool {
        row.owner() == self.user_id
    }

    /// Copy of `collections` holding only this user's rows.
    pub fn scope(&self, collections: &LifeCollections) -> LifeCollections {
        fn keep<T: Owned + Clone>(session: &Session, rows: &[T]) -> Vec<T> {
            rows.iter().filter(|row| session.owns(*row)).cloned().collect()
        }

        LifeCollections {
            pillars: keep(self, &collections.pillars),
            values: keep(self, &collections.values),
            goals: keep(self, &collections.goals),
            projects: keep(self, &collections.projects),
            tasks: keep(self, &collections.tasks),
            habits: keep(self, &collections.habits),
            habit_logs: keep(self, &collections.habit_logs),
            value_goal_connections: keep(self, &collections.value_goal_connections),
        }
    }
}

/// Rows that belong to a single user.
pub trait Owned {
    fn owner(&self) -> &str;
}

macro_rules! impl_owned {
    ($($row:ty),* $(,)?) => {
        $(
            impl Owned for $row {
                fn owner(&self) -> &str {
                    &self.user_id
                }
            }
        )*
    };
}

impl_owned!(Pillar, Value, Goal, Project, Task, Habit, HabitLog, ValueGoalConnection);
