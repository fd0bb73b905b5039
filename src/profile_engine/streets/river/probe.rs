//! River bets as the caller after the turn went check-check.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{aggression_factor, all_of, postflop_scale, rank_at_most},
    keys,
    rules::{Action, RuleBlock, Script},
    settings::{Number, Settings, Sizing},
    streets::bet,
    threshold::{scale_threshold, threshold},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RiverProbePlan {
    pub probe_freq: Number,
    pub ip_size: Sizing,
    pub oop_size: Sizing,
    pub probe: i64,
    pub check_behind: i64,
}

impl RiverProbePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let probe_freq = settings.number(keys::RIVER_PROBE_FREQ)?;
        Ok(RiverProbePlan {
            probe: scale_threshold(threshold(probe_freq.value()), scale),
            check_behind: threshold(keys::river_check_behind(settings)?.value()),
            ip_size: settings.sizing(keys::IP_RIVER_BET_SIZE)?,
            oop_size: settings.sizing(keys::OOP_RIVER_BET_SIZE)?,
            probe_freq,
        })
    }
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = RiverProbePlan::from_settings(settings)?;
    let ip = bet(&plan.ip_size);
    let oop = bet(&plan.oop_size);

    let mut script = Script::new();
    script.comment("Probe betting and checking functions");

    script.push(
        RuleBlock::builder("f$RiverProbeAfterCheckedTurn")
            .comment(format!(
                "Probe betting when in position after a checked turn, default size: {}% of pot",
                plan.ip_size
            ))
            .blank()
            .comment("Value bet with strong hands")
            .when("f$RiverValueHands", ip.clone())
            .blank()
            .comment("Opportunistic betting when checked to twice")
            .when(all_of(&["f$RiverBluffCandidates", &rank_at_most(plan.probe)]), ip)
            .blank()
            .comment("Check back with showdown value")
            .when(rank_at_most(plan.check_behind), Action::check())
            .blank()
            .comment("Default check back")
            .otherwise(Action::check()),
    );

    script.push(
        RuleBlock::builder("f$RiverOOPAfterCheckedTurn")
            .comment(format!("OOP lead betting after a checked turn, default size: {}% of pot", plan.oop_size))
            .blank()
            .comment("Only lead with strong hands")
            .when("f$RiverStrongHands", oop.clone())
            .blank()
            .comment("Occasionally lead as a bluff")
            .when(
                all_of(&["f$RiverBluffCandidates", &rank_at_most(scale_threshold(plan.probe, 0.6))]),
                oop,
            )
            .blank()
            .comment("Default check")
            .otherwise(Action::check()),
    );

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_bluffs_scale_with_aggression() {
        // 25% → 43, then 34.4 at the neutral scale
        assert_eq!(RiverProbePlan::from_settings(&Settings::new()).unwrap().probe, 34);
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("WHEN f$RiverBluffCandidates AND handrank169 <= 34 RaiseBy 75% FORCE\n"));
        assert!(text.contains("WHEN f$RiverBluffCandidates AND handrank169 <= 20 RaiseBy 75% FORCE\n"));
    }

    #[test]
    fn oop_size_is_independent() {
        let text = generate(&Settings::new().with("oop_river_bet_size", "100")).unwrap();
        assert!(text.contains("WHEN f$RiverStrongHands RaiseBy 100% FORCE\n"));
        assert!(text.contains("WHEN f$RiverValueHands RaiseBy 75% FORCE\n"));
    }
}
