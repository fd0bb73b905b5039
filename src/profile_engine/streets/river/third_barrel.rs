//! River bets as the aggressor: third barrel, delayed second barrel, and the
//! follow-up when our turn bet was checked to us.
//!
//! River betting is polarized: value hands, a bluff range built from missed
//! draws and blockers, and a showdown-value check behind.

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
pub struct ThirdBarrelPlan {
    pub third_barrel_freq: Number,
    pub delayed_second_barrel_freq: Number,
    pub bluff_range: Number,
    pub check_behind_freq: Number,
    pub ip_size: Sizing,

    pub third_barrel: i64,
    pub delayed_second_barrel: i64,
    pub bluff: i64,
    /// Not scaled by aggression.
    pub check_behind: i64,
}

impl ThirdBarrelPlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let third_barrel_freq = settings.number(keys::THIRD_BARREL_FREQ)?;
        let delayed_second_barrel_freq = settings.number(keys::DELAYED_SECOND_BARREL_FREQ)?;
        let bluff_range = settings.number(keys::RIVER_BLUFF_RANGE)?;
        let check_behind_freq = keys::river_check_behind(settings)?;

        Ok(ThirdBarrelPlan {
            third_barrel: scale_threshold(threshold(third_barrel_freq.value()), scale),
            delayed_second_barrel: scale_threshold(threshold(delayed_second_barrel_freq.value()), scale),
            bluff: scale_threshold(threshold(bluff_range.value()), scale),
            check_behind: threshold(check_behind_freq.value()),
            ip_size: settings.sizing(keys::IP_RIVER_BET_SIZE)?,
            third_barrel_freq,
            delayed_second_barrel_freq,
            bluff_range,
            check_behind_freq,
        })
    }
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = ThirdBarrelPlan::from_settings(settings)?;
    let size = bet(&plan.ip_size);
    let bluffs = |factor: f64| all_of(&["f$RiverBluffCandidates", &rank_at_most(scale_threshold(plan.bluff, factor))]);

    let mut script = Script::new();
    script.comment("Third Barrel and Delayed Second Barrel functions");

    script.push(
        RuleBlock::builder("f$RiverThirdBarrel")
            .comment(format!("Third barrel after betting flop and turn, default size: {}% of pot", plan.ip_size))
            .comment("At river, we polarize to value bets and bluffs")
            .blank()
            .comment("Value betting")
            .when("f$RiverValueHands", size.clone())
            .blank()
            .comment("Bluffing with missed draws and blockers")
            .when(bluffs(1.0), size.clone())
            .blank()
            .comment("Board texture-based decisions")
            .when(all_of(&["f$DrawHeavyBoard", &rank_at_most(scale_threshold(plan.third_barrel, 0.8))]), size.clone())
            .when(all_of(&["f$PairedBoard", &rank_at_most(scale_threshold(plan.third_barrel, 0.9))]), size.clone())
            .when(rank_at_most(plan.third_barrel), size.clone())
            .blank()
            .comment("Check back marginal hands")
            .otherwise(Action::check()),
    );

    script.push(
        RuleBlock::builder("f$RiverDelayedSecondBarrel")
            .comment(format!("Delayed second barrel after checking turn, default size: {}% of pot", plan.ip_size))
            .comment("More selective with value betting, less bluffing")
            .blank()
            .comment("Value betting")
            .when("f$RiverStrongHands", size.clone())
            .when(all_of(&["f$RiverValueHands", &rank_at_most(plan.delayed_second_barrel)]), size.clone())
            .blank()
            .comment("Occasionally bluff with missed draws")
            .when(bluffs(0.7), size.clone())
            .blank()
            .comment("Default check")
            .otherwise(Action::check()),
    );

    script.push(
        RuleBlock::builder("f$RiverContinuationAfterTurnBet")
            .comment(format!(
                "In position facing a check after we bet the turn, default size: {}% of pot",
                plan.ip_size
            ))
            .blank()
            .comment("Value bet with strong hands")
            .when("f$RiverValueHands", size.clone())
            .blank()
            .comment("Selective bluffing")
            .when(bluffs(0.8), size)
            .blank()
            .comment("Check back with showdown value")
            .when(rank_at_most(plan.check_behind), Action::check())
            .blank()
            .comment("Default check back")
            .otherwise(Action::check()),
    );

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
