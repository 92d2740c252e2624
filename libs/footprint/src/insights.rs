//! Insight generator: advisory tips, the global comparison message and the badge.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::calculator::EmissionResult;
use crate::input::InputRecord;
use crate::tables::{
    ABOVE_GLOBAL_AVERAGE, ABOVE_US_AVERAGE, BETTER_THAN_MOST, ECO_TIPS, ELECTRICITY_TIP, FOOD_TIP,
    NEAR_SUSTAINABLE, RANDOM_TIP_COUNT, TRAVEL_TIP, WASTE_TIP,
};

/// Presentation severity attached to a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub icon: &'static str,
    pub severity: Severity,
}

impl Badge {
    pub const ECO_HERO: Badge = Badge {
        label: "Eco Hero",
        icon: "🌱",
        severity: Severity::Success,
    };
    pub const AVERAGE_CITIZEN: Badge = Badge {
        label: "Average Citizen",
        icon: "⚖️",
        severity: Severity::Warning,
    };
    pub const HEAVY_EMITTER: Badge = Badge {
        label: "Heavy Emitter",
        icon: "🔥",
        severity: Severity::Danger,
    };

    /// Classify a period total. Cutoffs are the same for every period.
    pub fn for_total(total_co2: f64) -> Self {
        if total_co2 < 20.0 {
            Badge::ECO_HERO
        } else if total_co2 < 50.0 {
            Badge::AVERAGE_CITIZEN
        } else {
            Badge::HEAVY_EMITTER
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub rule_tips: Vec<&'static str>,
    pub random_tips: Vec<&'static str>,
    pub global_insight: Vec<&'static str>,
    pub badge: Badge,
}

/// Build the advisories for one calculation using the thread-local RNG.
pub fn advise(input: &InputRecord, result: &EmissionResult, annual_tons: f64) -> Insights {
    advise_with_rng(input, result, annual_tons, &mut rand::thread_rng())
}

pub fn advise_with_rng<R: Rng + ?Sized>(
    input: &InputRecord,
    result: &EmissionResult,
    annual_tons: f64,
    rng: &mut R,
) -> Insights {
    Insights {
        rule_tips: rule_tips(input),
        random_tips: random_tips(rng),
        global_insight: vec![global_insight(annual_tons)],
        badge: Badge::for_total(result.total_co2),
    }
}

/// Tips triggered by high raw inputs, in fixed category order.
pub fn rule_tips(input: &InputRecord) -> Vec<&'static str> {
    [
        (input.distance > 50.0, TRAVEL_TIP),
        (input.electricity > 30.0, ELECTRICITY_TIP),
        (input.meals > 10.0, FOOD_TIP),
        (input.waste > 5.0, WASTE_TIP),
    ]
    .into_iter()
    .filter_map(|(triggered, tip)| triggered.then_some(tip))
    .collect()
}

/// Message comparing the yearly projection with world figures.
pub fn global_insight(annual_tons: f64) -> &'static str {
    if annual_tons > 14.0 {
        ABOVE_US_AVERAGE
    } else if annual_tons > 4.5 {
        ABOVE_GLOBAL_AVERAGE
    } else if annual_tons > 2.0 {
        NEAR_SUSTAINABLE
    } else {
        BETTER_THAN_MOST
    }
}

/// Distinct tips drawn uniformly from the general pool.
pub fn random_tips<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    ECO_TIPS
        .choose_multiple(rng, RANDOM_TIP_COUNT)
        .copied()
        .collect()
}
