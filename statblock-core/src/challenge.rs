//! Challenge ratings and the proficiency bonus they grant.
//!
//! A challenge rating is one of 34 fixed tokens: "0", "1/8", "1/4", "1/2"
//! and "1" through "30". The token doubles as the XP table key (see
//! [`crate::encounter`]); its numeric value drives the proficiency bonus.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Proficiency bonus used when a CR cannot be interpreted, and the floor for
/// every CR below 1.
pub const MIN_PROFICIENCY_BONUS: i32 = 2;

/// Error type for challenge rating parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeRatingError {
    #[error("Unknown challenge rating: {0:?}")]
    UnknownToken(String),
}

/// A creature's challenge rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChallengeRating {
    #[default]
    Zero,
    Eighth,
    Quarter,
    Half,
    Cr1,
    Cr2,
    Cr3,
    Cr4,
    Cr5,
    Cr6,
    Cr7,
    Cr8,
    Cr9,
    Cr10,
    Cr11,
    Cr12,
    Cr13,
    Cr14,
    Cr15,
    Cr16,
    Cr17,
    Cr18,
    Cr19,
    Cr20,
    Cr21,
    Cr22,
    Cr23,
    Cr24,
    Cr25,
    Cr26,
    Cr27,
    Cr28,
    Cr29,
    Cr30,
}

impl ChallengeRating {
    /// Every challenge rating in ascending order.
    pub const ALL: [ChallengeRating; 34] = [
        ChallengeRating::Zero,
        ChallengeRating::Eighth,
        ChallengeRating::Quarter,
        ChallengeRating::Half,
        ChallengeRating::Cr1,
        ChallengeRating::Cr2,
        ChallengeRating::Cr3,
        ChallengeRating::Cr4,
        ChallengeRating::Cr5,
        ChallengeRating::Cr6,
        ChallengeRating::Cr7,
        ChallengeRating::Cr8,
        ChallengeRating::Cr9,
        ChallengeRating::Cr10,
        ChallengeRating::Cr11,
        ChallengeRating::Cr12,
        ChallengeRating::Cr13,
        ChallengeRating::Cr14,
        ChallengeRating::Cr15,
        ChallengeRating::Cr16,
        ChallengeRating::Cr17,
        ChallengeRating::Cr18,
        ChallengeRating::Cr19,
        ChallengeRating::Cr20,
        ChallengeRating::Cr21,
        ChallengeRating::Cr22,
        ChallengeRating::Cr23,
        ChallengeRating::Cr24,
        ChallengeRating::Cr25,
        ChallengeRating::Cr26,
        ChallengeRating::Cr27,
        ChallengeRating::Cr28,
        ChallengeRating::Cr29,
        ChallengeRating::Cr30,
    ];

    /// The canonical token, e.g. `"1/4"` or `"12"`.
    pub fn token(&self) -> &'static str {
        match self {
            ChallengeRating::Zero => "0",
            ChallengeRating::Eighth => "1/8",
            ChallengeRating::Quarter => "1/4",
            ChallengeRating::Half => "1/2",
            ChallengeRating::Cr1 => "1",
            ChallengeRating::Cr2 => "2",
            ChallengeRating::Cr3 => "3",
            ChallengeRating::Cr4 => "4",
            ChallengeRating::Cr5 => "5",
            ChallengeRating::Cr6 => "6",
            ChallengeRating::Cr7 => "7",
            ChallengeRating::Cr8 => "8",
            ChallengeRating::Cr9 => "9",
            ChallengeRating::Cr10 => "10",
            ChallengeRating::Cr11 => "11",
            ChallengeRating::Cr12 => "12",
            ChallengeRating::Cr13 => "13",
            ChallengeRating::Cr14 => "14",
            ChallengeRating::Cr15 => "15",
            ChallengeRating::Cr16 => "16",
            ChallengeRating::Cr17 => "17",
            ChallengeRating::Cr18 => "18",
            ChallengeRating::Cr19 => "19",
            ChallengeRating::Cr20 => "20",
            ChallengeRating::Cr21 => "21",
            ChallengeRating::Cr22 => "22",
            ChallengeRating::Cr23 => "23",
            ChallengeRating::Cr24 => "24",
            ChallengeRating::Cr25 => "25",
            ChallengeRating::Cr26 => "26",
            ChallengeRating::Cr27 => "27",
            ChallengeRating::Cr28 => "28",
            ChallengeRating::Cr29 => "29",
            ChallengeRating::Cr30 => "30",
        }
    }

    /// Numeric value of the rating (`0.125` for `"1/8"`).
    pub fn value(&self) -> f64 {
        match self {
            ChallengeRating::Zero => 0.0,
            ChallengeRating::Eighth => 0.125,
            ChallengeRating::Quarter => 0.25,
            ChallengeRating::Half => 0.5,
            // Cr1 sits at index 4 of ALL
            whole => (*whole as usize - 3) as f64,
        }
    }

    /// Exact lookup of a canonical token, no trimming.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cr| cr.token() == token)
    }

    /// Parse a canonical token. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Result<Self, ChallengeRatingError> {
        Self::from_token(token.trim())
            .ok_or_else(|| ChallengeRatingError::UnknownToken(token.to_string()))
    }

    /// Proficiency bonus granted by this rating.
    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus_for_value(self.value())
    }
}

impl FromStr for ChallengeRating {
    type Err = ChallengeRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChallengeRating::parse(s)
    }
}

impl TryFrom<String> for ChallengeRating {
    type Error = ChallengeRatingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ChallengeRating::parse(&value)
    }
}

impl From<ChallengeRating> for String {
    fn from(cr: ChallengeRating) -> Self {
        cr.token().to_string()
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Proficiency bonus for a challenge rating.
pub fn proficiency_bonus(cr: ChallengeRating) -> i32 {
    cr.proficiency_bonus()
}

/// Proficiency bonus for free-form CR text.
///
/// Accepts integers, decimals and `a/b` fractions, so it works on
/// non-canonical values too. Anything unparseable yields
/// [`MIN_PROFICIENCY_BONUS`].
pub fn proficiency_bonus_for_token(token: &str) -> i32 {
    numeric_value(token)
        .map(proficiency_bonus_for_value)
        .unwrap_or(MIN_PROFICIENCY_BONUS)
}

/// `floor((cr - 1) / 4) + 2`, never below 2.
fn proficiency_bonus_for_value(value: f64) -> i32 {
    if !value.is_finite() {
        return MIN_PROFICIENCY_BONUS;
    }
    // CR text is unbounded; keep the cast and the addition in range.
    let steps = ((value - 1.0) / 4.0).floor().clamp(0.0, 1_000.0) as i32;
    steps + MIN_PROFICIENCY_BONUS
}

fn numeric_value(token: &str) -> Option<f64> {
    let token = token.trim();
    let value = match token.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => token.parse().ok()?,
    };
    value.is_finite().then_some(value)
}
