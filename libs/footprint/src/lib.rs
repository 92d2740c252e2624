//! Carbon footprint core.
//!
//! Pure building blocks of the calculator: the lookup tables, validation of
//! submitted form fields, the emission calculator and the insight generator.
//! Nothing in this crate performs I/O.
//!
//! ```rust
//! use footprint::{RawInput, advise, compute};
//!
//! let raw = RawInput {
//!     period: Some("weekly".into()),
//!     distance: Some("10".into()),
//!     electricity: Some("5".into()),
//!     meals: Some("2".into()),
//!     waste: Some("1".into()),
//! };
//! let input = raw.validate().expect("valid numbers");
//! let result = compute(&input);
//! let insights = advise(&input, &result, result.projected_annual_tons());
//! assert_eq!(insights.badge.label, "Average Citizen");
//! ```

pub mod calculator;
pub mod error;
pub mod input;
pub mod insights;
pub mod tables;

pub use calculator::{EmissionResult, PieShares, compute};
pub use error::ValidationError;
pub use input::{InputRecord, Period, RawInput};
pub use insights::{Badge, Insights, Severity, advise};
