use crate::ExpiryThreshold;
use serde::{Deserialize, Serialize};

/// One daily expiry check, run at `hour:minute` in the display timezone
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlertSchedule {
    pub threshold: ExpiryThreshold,
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

impl AlertSchedule {
    pub fn new(threshold: ExpiryThreshold, hour: u32, minute: u32) -> Self {
        Self {
            threshold,
            hour,
            minute,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_schedules")]
    pub schedules: Vec<AlertSchedule>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedules: default_schedules(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedules() -> Vec<AlertSchedule> {
    vec![
        AlertSchedule::new(ExpiryThreshold::SevenDays, 9, 0),
        AlertSchedule::new(ExpiryThreshold::TwoDays, 10, 0),
        AlertSchedule::new(ExpiryThreshold::OneDay, 11, 0),
    ]
}
