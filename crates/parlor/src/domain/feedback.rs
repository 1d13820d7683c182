//! The submitted contact-form record and its derived average rating.

use serde::{Deserialize, Serialize};
use strum::Display;

/// One successful form submission. Built only after every validator passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub rating1: f64,
    pub rating2: f64,
    pub rating3: f64,
}

/// Rating band of the rounded average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    /// Classifies a one-decimal average: `< 4` low, `< 7` medium, else high.
    pub fn classify(average: f64) -> Self {
        if average < 4.0 {
            Band::Low
        } else if average < 7.0 {
            Band::Medium
        } else {
            Band::High
        }
    }
}

impl Feedback {
    /// Average of the three ratings, rounded to one decimal
    /// (half away from zero), with its band.
    pub fn average(&self) -> (f64, Band) {
        let raw = (self.rating1 + self.rating2 + self.rating3) / 3.0;
        let rounded = (raw * 10.0).round() / 10.0;
        (rounded, Band::classify(rounded))
    }

    /// The average as displayed, e.g. `8.0`.
    pub fn average_text(&self) -> String {
        format!("{:.1}", self.average().0)
    }
}
