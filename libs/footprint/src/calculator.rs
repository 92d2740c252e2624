//! Emission calculator.
//!
//! Maps a validated [`InputRecord`] to per-category emissions, a rounded
//! total, pie chart shares, a yearly projection and the comparison against
//! the national reference figure.

use serde::Serialize;

use crate::input::{InputRecord, Period};
use crate::tables::{
    DAYS_PER_YEAR, ELECTRICITY_FACTOR, FOOD_FACTOR, NATIONAL_AVERAGE, TRAVEL_FACTOR, WASTE_FACTOR,
};

/// Percentage of the total contributed by each category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct PieShares {
    pub travel: f64,
    pub electricity: f64,
    pub food: f64,
    pub waste: f64,
}

impl PieShares {
    pub fn sum(&self) -> f64 {
        self.travel + self.electricity + self.food + self.waste
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionResult {
    pub period: Period,
    pub travel_co2: f64,
    pub electricity_co2: f64,
    pub food_co2: f64,
    pub waste_co2: f64,
    /// Sum of the four categories, rounded to 2 decimals
    pub total_co2: f64,
    pub pie_shares: PieShares,
    /// Yearly projection in tonnes, rounded to 2 decimals
    pub annual_tons: f64,
    /// Percentage above (positive) or below the national average; weekly period only
    pub comparison: Option<f64>,
}

impl EmissionResult {
    /// Unrounded yearly projection in tonnes
    pub fn projected_annual_tons(&self) -> f64 {
        annualize(self.total_co2, self.period)
    }
}

/// Compute the emission breakdown for one reporting period.
pub fn compute(input: &InputRecord) -> EmissionResult {
    let period = input.period;
    let multiplier = period.multiplier();
    let baseline_scale = period.weekly_baseline_scale();

    let travel_co2 = input.distance * TRAVEL_FACTOR * multiplier;
    let electricity_co2 = input.electricity * ELECTRICITY_FACTOR * multiplier;
    let food_co2 = input.meals * FOOD_FACTOR * baseline_scale;
    let waste_co2 = input.waste * WASTE_FACTOR * baseline_scale;

    let exact_total = travel_co2 + electricity_co2 + food_co2 + waste_co2;
    let total_co2 = round_to(exact_total, 2);

    let pie_shares = if total_co2 > 0.0 {
        let share = |part: f64| round_to(part / exact_total * 100.0, 2);
        PieShares {
            travel: share(travel_co2),
            electricity: share(electricity_co2),
            food: share(food_co2),
            waste: share(waste_co2),
        }
    } else {
        PieShares::default()
    };

    let comparison = match period {
        Period::Weekly => Some(round_to(
            (total_co2 - NATIONAL_AVERAGE) / NATIONAL_AVERAGE * 100.0,
            1,
        )),
        Period::Daily | Period::Monthly => None,
    };

    EmissionResult {
        period,
        travel_co2,
        electricity_co2,
        food_co2,
        waste_co2,
        total_co2,
        pie_shares,
        annual_tons: round_to(annualize(total_co2, period), 2),
        comparison,
    }
}

/// Extrapolate a period total to tonnes per year.
pub fn annualize(total_co2: f64, period: Period) -> f64 {
    total_co2 * (DAYS_PER_YEAR / period.multiplier()) / 1000.0
}

/// Round to `places` decimals; exact halves go to the even neighbour.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
