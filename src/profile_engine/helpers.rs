//! Shared building blocks that keep street generators focused on strategy.
//!
//! Generators all need the same handful of things: the aggression factor and
//! its derived scales, raise-size arithmetic, condition fragments for the
//! common seat groups, and number formatting that matches the rule-file
//! conventions (floats always carry a fractional digit, ints never do).

use crate::error::Result;
use crate::profile_engine::{
    keys,
    settings::{Settings, Sizing},
    threshold::round_to_tenth,
};

// ---------------------------------------------------------------------------
// Condition fragments
// ---------------------------------------------------------------------------

pub const EARLY_POSITION: &str = "(InEarlyPosition1 OR InEarlyPosition2 OR InEarlyPosition3)";
pub const MIDDLE_POSITION: &str = "(InMiddlePosition1 OR InMiddlePosition2 OR InMiddlePosition3)";
pub const LATE_POSITION: &str = "(InCutOff OR InButton)";
pub const BLINDS: &str = "(InSmallBlind OR InBigBlind)";

/// First action of the round with nobody in yet.
pub const UNOPENED: &str = "BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 0 AND Calls = 0";

/// `handrank169 <= n`
pub fn rank_at_most(n: i64) -> String {
    format!("handrank169 <= {n}")
}

/// Join condition fragments with `AND`.
pub fn all_of(parts: &[&str]) -> String {
    parts.join(" AND ")
}

// ---------------------------------------------------------------------------
// Aggression
// ---------------------------------------------------------------------------

/// `aggression / 50`: 1.0 is neutral, 2.0 maximally aggressive.
pub fn aggression_factor(settings: &Settings) -> Result<f64> {
    Ok(settings.percent(keys::AGGRESSION)? / 50.0)
}

/// Partial pull of an adjustment towards the aggression factor.
/// `weight` 0.5 → 3-bets, 0.6 → 4-bets, 0.7 → squeezes.
pub fn aggression_adjustment(factor: f64, weight: f64) -> f64 {
    1.0 + (factor - 1.0) * weight
}

/// Postflop frequency scale, `1.2 - 0.4 * factor`.
pub fn postflop_scale(factor: f64) -> f64 {
    1.2 - 0.4 * factor
}

// ---------------------------------------------------------------------------
// Sizing and formatting
// ---------------------------------------------------------------------------

/// Raise size in big blinds: base size plus one per limper, to one decimal.
pub fn raise_size(base: &Sizing, limpers: u32) -> f64 {
    round_to_tenth(base.value() + f64::from(limpers))
}

/// Shortest round-trip decimal, always with a fractional part (`3.0`, `0.2`).
pub fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
