use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 86_400;

/// Whole days and hours left before a certificate expires.
///
/// Both values are floored, so an already expired certificate has negative
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
}

impl TimeLeft {
    pub fn between(now_unix: i64, expires_unix: i64) -> Self {
        let remaining = expires_unix - now_unix;
        Self {
            days: remaining.div_euclid(SECS_PER_DAY),
            hours: remaining.div_euclid(SECS_PER_HOUR),
        }
    }
}

/// Alert windows checked by the expiry job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryThreshold {
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "2days")]
    TwoDays,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "2hours")]
    TwoHours,
}

impl ExpiryThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryThreshold::SevenDays => "7days",
            ExpiryThreshold::TwoDays => "2days",
            ExpiryThreshold::OneDay => "1day",
            ExpiryThreshold::TwoHours => "2hours",
        }
    }

    pub fn priority(&self) -> &'static str {
        match self {
            ExpiryThreshold::SevenDays => "NOTICE",
            ExpiryThreshold::TwoDays => "HIGH PRIORITY",
            ExpiryThreshold::OneDay => "CRITICAL",
            ExpiryThreshold::TwoHours => "EMERGENCY",
        }
    }

    /// Day thresholds match an exact day count; the hour threshold matches
    /// anything between one and three hours out.
    pub fn matches(&self, left: TimeLeft) -> bool {
        match self {
            ExpiryThreshold::SevenDays => left.days == 7,
            ExpiryThreshold::TwoDays => left.days == 2,
            ExpiryThreshold::OneDay => left.days == 1,
            ExpiryThreshold::TwoHours => (1..=3).contains(&left.hours),
        }
    }
}

impl fmt::Display for ExpiryThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7days" => Ok(ExpiryThreshold::SevenDays),
            "2days" => Ok(ExpiryThreshold::TwoDays),
            "1day" => Ok(ExpiryThreshold::OneDay),
            "2hours" => Ok(ExpiryThreshold::TwoHours),
            other => Err(format!("unknown expiry threshold '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringDomain {
    pub domain: String,
    pub expires_on: String,
    pub days_left: i64,
    pub hours_left: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryAlert {
    pub threshold: ExpiryThreshold,
    pub domains: Vec<ExpiringDomain>,
}
