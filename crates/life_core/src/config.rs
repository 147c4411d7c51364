use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;
pub const MAX_TREND_WINDOW_DAYS: u32 = 3660;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ValueGoalLinking {
    // every value of a pillar lists every goal of that pillar
    #[default]
    FanOut,
    Explicit,
}

impl FromStr for ValueGoalLinking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fan-out" | "fanout" => Ok(ValueGoalLinking::FanOut),
            "explicit" => Ok(ValueGoalLinking::Explicit),
            other => Err(format!("unknown value/goal linking `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub value_goal_linking: ValueGoalLinking,
    pub trend_window_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            value_goal_linking: ValueGoalLinking::default(),
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    pub fn with_linking(mut self, linking: ValueGoalLinking) -> Self {
        self.value_goal_linking = linking;
        self
    }

    pub fn with_trend_window(mut self, days: u32) -> Self {
        self.trend_window_days = days.clamp(1, MAX_TREND_WINDOW_DAYS);
        self
    }
}
