//! Calculator input: the reporting period and the four activity figures.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tables::{DAYS_PER_WEEK, WEEKS_PER_MONTH};

/// Reporting granularity selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// Resolve a submitted period. Missing or unrecognized values fall back to weekly.
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("daily") => Period::Daily,
            Some("monthly") => Period::Monthly,
            _ => Period::Weekly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Days covered by one period; scales travel and electricity.
    pub fn multiplier(self) -> f64 {
        match self {
            Period::Daily => 1.0,
            Period::Weekly => 7.0,
            Period::Monthly => 30.0,
        }
    }

    /// Scale applied to the weekly food and waste baselines.
    pub fn weekly_baseline_scale(self) -> f64 {
        match self {
            Period::Daily => 1.0 / DAYS_PER_WEEK,
            Period::Weekly => 1.0,
            Period::Monthly => WEEKS_PER_MONTH,
        }
    }
}

/// Validated calculator input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRecord {
    pub period: Period,
    pub distance: f64,
    pub electricity: f64,
    pub meals: f64,
    pub waste: f64,
}

/// Calculator form fields exactly as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInput {
    pub period: Option<String>,
    pub distance: Option<String>,
    pub electricity: Option<String>,
    pub meals: Option<String>,
    pub waste: Option<String>,
}

impl RawInput {
    /// Parse every numeric field, failing on the first invalid one.
    pub fn validate(&self) -> Result<InputRecord, ValidationError> {
        Ok(InputRecord {
            period: Period::from_form(self.period.as_deref()),
            distance: parse_quantity("distance", self.distance.as_deref())?,
            electricity: parse_quantity("electricity", self.electricity.as_deref())?,
            meals: parse_quantity("meals", self.meals.as_deref())?,
            waste: parse_quantity("waste", self.waste.as_deref())?,
        })
    }
}

fn parse_quantity(field: &'static str, raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw.ok_or(ValidationError::Missing(field))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: raw.to_string(),
        })?;

    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }

    // -0.0 parses fine; normalize so it never leaks into results
    Ok(value + 0.0)
}
