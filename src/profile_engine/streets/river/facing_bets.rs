//! River answers to villain bets and raises.
//!
//! No more cards are coming, so draws drop out: every block ranks nut hands,
//! strong hands and thin value against the bet, with bluff raises limited to
//! blocker hands.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{aggression_factor, all_of, postflop_scale, rank_at_most},
    keys,
    rules::{Action, RuleBlock, RuleBlockBuilder, Script},
    settings::{Number, Settings},
    threshold::{scale_threshold, threshold},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RiverDefensePlan {
    pub fold_to_bet_freq: Number,
    pub float_freq: Number,
    pub checkraise_freq: Number,
    pub bluff_raise_freq: Number,
    pub value_range: Number,

    pub fold: i64,
    pub float: i64,
    pub checkraise: i64,
    pub bluff_raise: i64,
    pub value: i64,
}

impl RiverDefensePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let fold_to_bet_freq = settings.number(keys::RIVER_FOLD_TO_BET_FREQ)?;
        let float_freq = settings.number(keys::RIVER_FLOAT_FREQ)?;
        let checkraise_freq = settings.number(keys::RIVER_CHECKRAISE_FREQ)?;
        let bluff_raise_freq = settings.number(keys::RIVER_BLUFF_RAISE_FREQ)?;
        let value_range = settings.number(keys::RIVER_VALUE_RANGE)?;

        Ok(RiverDefensePlan {
            fold: threshold(100.0 - fold_to_bet_freq.value()),
            float: scale_threshold(threshold(float_freq.value()), scale),
            checkraise: scale_threshold(threshold(checkraise_freq.value()), scale),
            bluff_raise: threshold(bluff_raise_freq.value()),
            value: threshold(value_range.value()),
            fold_to_bet_freq,
            float_freq,
            checkraise_freq,
            bluff_raise_freq,
            value_range,
        })
    }
}

/// Shared head of the two "villain bet into us" blocks.
fn facing_bet(plan: &RiverDefensePlan, name: &str, intro: &str) -> RuleBlockBuilder {
    RuleBlock::builder(name)
        .comment(intro)
        .blank()
        .comment("Raise the nuts, call with strong hands")
        .when("f$RiverNutHands", Action::raise_pot())
        .when("f$RiverStrongHands", Action::call())
        .blank()
        .comment("Call with value hands inside the value range")
        .when(all_of(&["f$RiverValueHands", &rank_at_most(plan.value)]), Action::call())
        .blank()
        .comment("Bluff-raise with blockers")
        .when(all_of(&["f$RiverBluffRaiseHands", &rank_at_most(plan.bluff_raise)]), Action::raise_pot())
        .blank()
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = RiverDefensePlan::from_settings(settings)?;

    let mut script = Script::new();
    script.comment("Facing bets functions");

    script.push(
        facing_bet(&plan, "f$FacingThirdBarrel", "Response when facing a third barrel on the river")
            .comment("Call with hands that have showdown value")
            .when(rank_at_most(plan.fold), Action::call())
            .blank()
            .comment("Default fold")
            .otherwise(Action::fold()),
    );

    script.push(
        facing_bet(
            &plan,
            "f$FacingDelayedSecondBarrel",
            "Response when facing a bet on the river after the turn checked through",
        )
        .comment("Villain showed weakness on the turn, call wider in position")
        .when(all_of(&["f$InPosition", &rank_at_most(plan.float)]), Action::call())
        .blank()
        .comment("Call with hands that have showdown value")
        .when(rank_at_most(plan.fold), Action::call())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        RuleBlock::builder("f$FacingCheckRaiseToThirdBarrel")
            .comment("Response when opponent check-raises our third barrel")
            .blank()
            .comment("Re-raise only with the nuts")
            .when("f$RiverNutHands", Action::raise_pot())
            .blank()
            .comment("Defense frequency against check-raises")
            .when(all_of(&["f$RiverValueHands", &rank_at_most(plan.checkraise)]), Action::call())
            .blank()
            .comment("Default fold")
            .otherwise(Action::fold()),
    );

    script.push(
        RuleBlock::builder("f$FacingRaiseToThirdBarrel")
            .comment("Response when opponent raises our third barrel")
            .blank()
            .comment("Continue with the nuts")
            .when("f$RiverNutHands", Action::call())
            .blank()
            .comment("Be more cautious against a river raise")
            .when(
                all_of(&["f$RiverStrongHands", &rank_at_most(scale_threshold(plan.checkraise, 0.7))]),
                Action::call(),
            )
            .blank()
            .comment("Default fold")
            .otherwise(Action::fold()),
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
    fn default_thresholds() {
        let plan = RiverDefensePlan::from_settings(&Settings::new()).unwrap();
        assert_eq!(plan.fold, 51);
        assert_eq!(plan.float, 28);
        assert_eq!(plan.checkraise, 21);
        assert_eq!(plan.bluff_raise, 18);
        assert_eq!(plan.value, 102);
    }

    #[test]
    fn value_range_gates_thin_calls() {
        let text = generate(&Settings::new().with("river_value_range", 40)).unwrap();
        assert!(text.contains("WHEN f$RiverValueHands AND handrank169 <= 68 Call FORCE\n"));
    }

    #[test]
    fn float_only_against_delayed_barrels() {
        let script = build(&Settings::new()).unwrap();
        let floats = |name: &str| {
            script
                .find_block(name)
                .unwrap()
                .clauses()
                .filter(|c| c.condition.starts_with("f$InPosition"))
                .count()
        };
        assert_eq!(floats("f$FacingThirdBarrel"), 0);
        assert_eq!(floats("f$FacingDelayedSecondBarrel"), 1);
    }

    #[test]
    fn raises_are_called_tighter_than_check_raises() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("WHEN f$RiverValueHands AND handrank169 <= 21 Call FORCE\n"));
        assert!(text.contains("WHEN f$RiverStrongHands AND handrank169 <= 15 Call FORCE\n"));
        let script = build(&Settings::new()).unwrap();
        assert!(script.blocks().all(|b| b.fallback() == &Action::fold()));
    }
}
