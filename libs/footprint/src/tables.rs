//! Static lookup tables: emission coefficients, reference averages and tips.

/// kg CO2 per distance unit travelled
pub const TRAVEL_FACTOR: f64 = 0.271;
/// kg CO2 per kWh of electricity
pub const ELECTRICITY_FACTOR: f64 = 0.475;
/// kg CO2 per meal, as a weekly baseline
pub const FOOD_FACTOR: f64 = 0.5;
/// kg CO2 per waste unit, as a weekly baseline
pub const WASTE_FACTOR: f64 = 0.1;

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const WEEKS_PER_MONTH: f64 = 4.3;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Weekly national reference figure used for the comparison percentage
pub const NATIONAL_AVERAGE: f64 = 70.0;

/// Annual per-capita emissions in tonnes, in display order
pub const GLOBAL_STATS: [(&str, f64); 6] = [
    ("Global Average", 4.5),
    ("USA", 14.4),
    ("India", 1.9),
    ("China", 7.6),
    ("European Union", 6.5),
    ("Africa", 0.9),
];

/// Pool the random tips are sampled from
pub const ECO_TIPS: [&str; 5] = [
    "Switch to LED bulbs to save energy.",
    "Walk or bike short distances.",
    "Recycle household waste.",
    "Try one meat-free day per week.",
    "Turn off devices when not in use.",
];

/// Number of tips drawn from [`ECO_TIPS`] per calculation
pub const RANDOM_TIP_COUNT: usize = 3;

pub const TRAVEL_TIP: &str = "Your travel emissions are high: use public transport or carpool.";
pub const ELECTRICITY_TIP: &str =
    "Reduce electricity use: switch to energy-efficient appliances.";
pub const FOOD_TIP: &str = "Cut down on meat meals: try plant-based options.";
pub const WASTE_TIP: &str = "Recycle and compost your waste regularly.";

pub const ABOVE_US_AVERAGE: &str = "Your footprint is higher than the average American. Focus on reducing energy use and travel.";
pub const ABOVE_GLOBAL_AVERAGE: &str = "You're above the global average. Small changes like LED lighting and fewer car trips can help.";
pub const NEAR_SUSTAINABLE: &str =
    "You're near sustainable levels. Keep minimizing waste and electricity use.";
pub const BETTER_THAN_MOST: &str =
    "You're performing better than most people worldwide. Great job being eco-conscious!";
