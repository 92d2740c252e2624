//! JSON view models returned by the routes

use chrono::{DateTime, Utc};
use footprint::{
    Badge, EmissionResult, InputRecord, Insights, Period, PieShares,
    tables::{GLOBAL_STATS, NATIONAL_AVERAGE},
};
use serde::Serialize;

use crate::models::{LeaderboardEntry, Record, UserResponse};

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub service: &'static str,
    pub message: &'static str,
    pub links: [&'static str; 4],
}

impl LandingView {
    pub fn new() -> Self {
        Self {
            service: "carbon-footprint",
            message: "Track your carbon footprint and compare it with national and global averages.",
            links: ["/register", "/login", "/calculator", "/leaderboard"],
        }
    }
}

impl Default for LandingView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
}

impl FieldView {
    fn new(name: &'static str, kind: &'static str) -> Self {
        Self {
            name,
            kind,
            options: None,
        }
    }
}

/// Describes a form the client should render and submit
#[derive(Debug, Serialize)]
pub struct FormView {
    pub form: &'static str,
    pub action: &'static str,
    pub method: &'static str,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl FormView {
    fn credentials(form: &'static str, action: &'static str) -> Self {
        Self {
            form,
            action,
            method: "POST",
            fields: vec![
                FieldView::new("username", "text"),
                FieldView::new("password", "password"),
            ],
            user: None,
        }
    }

    pub fn register() -> Self {
        Self::credentials("register", "/register")
    }

    pub fn login() -> Self {
        Self::credentials("login", "/login")
    }

    pub fn calculator(user: Option<UserResponse>) -> Self {
        let period = FieldView {
            name: "period",
            kind: "select",
            options: Some(Period::ALL.iter().map(|p| p.as_str()).collect()),
        };

        Self {
            form: "calculator",
            action: "/calculate",
            method: "POST",
            fields: vec![
                period,
                FieldView::new("distance", "number"),
                FieldView::new("electricity", "number"),
                FieldView::new("meals", "number"),
                FieldView::new("waste", "number"),
            ],
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Breakdown {
    pub travel: f64,
    pub electricity: f64,
    pub food: f64,
    pub waste: f64,
}

#[derive(Debug, Serialize)]
pub struct GlobalStat {
    pub region: &'static str,
    pub tons: f64,
}

/// Everything the result page shows for one calculation
#[derive(Debug, Serialize)]
pub struct CalculationView {
    pub record_id: i64,
    pub date: DateTime<Utc>,
    pub period: Period,
    pub input: InputRecord,
    pub total_co2: f64,
    pub breakdown: Breakdown,
    pub pie_shares: PieShares,
    pub national_average: f64,
    pub comparison: Option<f64>,
    pub random_tips: Vec<&'static str>,
    pub rule_tips: Vec<&'static str>,
    pub badge: Badge,
    pub global_stats: Vec<GlobalStat>,
    pub annual_tons: f64,
    pub global_insight: Vec<&'static str>,
}

impl CalculationView {
    pub fn new(
        input: InputRecord,
        result: EmissionResult,
        insights: Insights,
        record: &Record,
    ) -> Self {
        Self {
            record_id: record.id,
            date: record.date,
            period: result.period,
            input,
            total_co2: result.total_co2,
            breakdown: Breakdown {
                travel: result.travel_co2,
                electricity: result.electricity_co2,
                food: result.food_co2,
                waste: result.waste_co2,
            },
            pie_shares: result.pie_shares,
            national_average: NATIONAL_AVERAGE,
            comparison: result.comparison,
            random_tips: insights.random_tips,
            rule_tips: insights.rule_tips,
            badge: insights.badge,
            global_stats: global_stats(),
            annual_tons: result.annual_tons,
            global_insight: insights.global_insight,
        }
    }
}

fn global_stats() -> Vec<GlobalStat> {
    GLOBAL_STATS
        .iter()
        .map(|&(region, tons)| GlobalStat { region, tons })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub user_id: i64,
    pub username: String,
    pub min_total_co2: f64,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardView {
    pub entries: Vec<LeaderboardRow>,
}

impl From<Vec<LeaderboardEntry>> for LeaderboardView {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| LeaderboardRow {
                rank: index + 1,
                user_id: entry.user_id,
                username: entry.username,
                min_total_co2: entry.min_total_co2,
            })
            .collect();

        Self { entries }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryView {
    pub records: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint::{RawInput, compute, insights::advise_with_rng};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_calculation_view_fields() {
        let input = RawInput {
            period: Some("weekly".to_string()),
            distance: Some("60".to_string()),
            electricity: Some("5".to_string()),
            meals: Some("2".to_string()),
            waste: Some("1".to_string()),
        }
        .validate()
        .unwrap();
        let result = compute(&input);
        let insights = advise_with_rng(
            &input,
            &result,
            result.projected_annual_tons(),
            &mut StdRng::seed_from_u64(1),
        );
        let record = Record {
            id: 9,
            user_id: 3,
            total_co2: result.total_co2,
            date: Utc::now(),
        };

        let json = serde_json::to_value(CalculationView::new(input, result, insights, &record)).unwrap();

        assert_eq!(json["record_id"], 9);
        assert_eq!(json["period"], "weekly");
        assert_eq!(json["national_average"], 70.0);
        assert_eq!(json["badge"]["label"], "Heavy Emitter");
        assert_eq!(json["badge"]["severity"], "danger");
        assert_eq!(json["random_tips"].as_array().unwrap().len(), 3);
        assert_eq!(json["rule_tips"].as_array().unwrap().len(), 1);
        assert_eq!(json["global_insight"].as_array().unwrap().len(), 1);
        assert_eq!(json["global_stats"].as_array().unwrap().len(), 6);
        assert_eq!(json["global_stats"][0]["region"], "Global Average");
        assert!(json["comparison"].is_number());
    }

    #[test]
    fn test_comparison_serializes_as_null_outside_weekly() {
        let input = RawInput {
            period: Some("daily".to_string()),
            distance: Some("1".to_string()),
            electricity: Some("1".to_string()),
            meals: Some("1".to_string()),
            waste: Some("1".to_string()),
        }
        .validate()
        .unwrap();
        let result = compute(&input);
        let insights = footprint::advise(&input, &result, result.projected_annual_tons());
        let record = Record {
            id: 1,
            user_id: 1,
            total_co2: result.total_co2,
            date: Utc::now(),
        };

        let json = serde_json::to_value(CalculationView::new(input, result, insights, &record)).unwrap();
        assert!(json["comparison"].is_null());
    }

    #[test]
    fn test_leaderboard_ranks_start_at_one() {
        let view = LeaderboardView::from(vec![
            LeaderboardEntry {
                user_id: 2,
                username: "bob".to_string(),
                min_total_co2: 3.5,
            },
            LeaderboardEntry {
                user_id: 1,
                username: "alice".to_string(),
                min_total_co2: 8.0,
            },
        ]);

        assert_eq!(view.entries[0].rank, 1);
        assert_eq!(view.entries[0].username, "bob");
        assert_eq!(view.entries[1].rank, 2);
    }

    #[test]
    fn test_landing_view_default_lists_entry_points() {
        let json = serde_json::to_value(LandingView::default()).unwrap();
        assert_eq!(json["service"], "carbon-footprint");
        assert_eq!(json["links"][0], "/register");
        assert_eq!(json["links"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_calculator_form_lists_periods() {
        let json = serde_json::to_value(FormView::calculator(None)).unwrap();
        assert_eq!(json["action"], "/calculate");
        assert_eq!(
            json["fields"][0]["options"],
            serde_json::json!(["daily", "weekly", "monthly"])
        );
        assert!(json.get("user").is_none());
    }
}
