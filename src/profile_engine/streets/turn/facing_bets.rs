//! Turn answers to villain bets and raises.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{aggression_factor, all_of, postflop_scale, rank_at_most},
    keys,
    rules::{Action, RuleBlock, RuleBlockBuilder, Script},
    settings::{Number, Settings},
    threshold::{scale_threshold, threshold},
};

/// Check-raise and float scale with aggression; bluff raises and the
/// showdown-value fold line do not.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDefensePlan {
    pub checkraise_freq: Number,
    pub float_freq: Number,
    pub fold_to_cbet_freq: Number,
    pub bluff_raise_freq: Number,

    pub checkraise: i64,
    pub float: i64,
    pub bluff_raise: i64,
    pub fold: i64,
}

impl TurnDefensePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let checkraise_freq = settings.number(keys::TURN_CHECKRAISE_FREQ)?;
        let float_freq = settings.number(keys::TURN_FLOAT_FREQ)?;
        let fold_to_cbet_freq = settings.number(keys::TURN_FOLD_TO_CBET_FREQ)?;
        let bluff_raise_freq = settings.number(keys::TURN_BLUFF_RAISE_FREQ)?;

        Ok(TurnDefensePlan {
            checkraise: scale_threshold(threshold(checkraise_freq.value()), scale),
            float: scale_threshold(threshold(float_freq.value()), scale),
            bluff_raise: threshold(bluff_raise_freq.value()),
            fold: threshold(100.0 - fold_to_cbet_freq.value()),
            checkraise_freq,
            float_freq,
            fold_to_cbet_freq,
            bluff_raise_freq,
        })
    }
}

fn facing(name: &str, intro: &str, lead: &str) -> RuleBlockBuilder {
    RuleBlock::builder(name)
        .comment(intro)
        .blank()
        .comment(lead)
        .when("f$TurnStrongHands", Action::raise_pot())
        .when("f$TurnValueHands", Action::call())
        .blank()
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = TurnDefensePlan::from_settings(settings)?;

    let mut script = Script::new();
    script.comment("Facing bets functions");

    script.push(
        facing(
            "f$FacingSecondBarrel",
            "Response when facing a second barrel on the turn",
            "Always continue with strong hands",
        )
        .comment("Continue with good draws")
        .when("f$TurnStrongDraws", Action::call())
        .blank()
        .comment("Check-raise bluff with specific holdings")
        .when(all_of(&[&rank_at_most(plan.bluff_raise), "f$TurnSemiBluffHands"]), Action::raise_pot())
        .blank()
        .comment("Float with position")
        .when(all_of(&["f$InPosition", &rank_at_most(plan.float)]), Action::call())
        .blank()
        .comment("Call with hands that have showdown value")
        .when(rank_at_most(plan.fold), Action::call())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        facing(
            "f$FacingDelayedCbet",
            "Response when facing a delayed c-bet on the turn",
            "Similar logic to facing a second barrel",
        )
        .comment("More inclined to raise with draws when villain showed weakness on flop")
        .when(
            all_of(&["f$TurnStrongDraws", &rank_at_most(scale_threshold(plan.checkraise, 1.2))]),
            Action::raise_pot(),
        )
        .when("f$TurnStrongDraws", Action::call())
        .blank()
        .comment("More aggressive raising range")
        .when(rank_at_most(scale_threshold(plan.bluff_raise, 1.2)), Action::raise_pot())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        facing(
            "f$FacingCheckRaiseToSecondBarrel",
            "Response when opponent check-raises our second barrel",
            "Continue with strong hands",
        )
        .comment("Continue with strong draws")
        .when(
            all_of(&["f$TurnStrongDraws", &rank_at_most(scale_threshold(plan.checkraise, 0.8))]),
            Action::call(),
        )
        .blank()
        .comment("Defense frequency against check-raises")
        .when(rank_at_most(plan.checkraise), Action::call())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        facing(
            "f$FacingRaiseToSecondBarrel",
            "Response when opponent raises our second barrel",
            "Continue with very strong hands",
        )
        .comment("Be more cautious with draws")
        .when(
            all_of(&["f$TurnStrongDraws", &rank_at_most(scale_threshold(plan.checkraise, 0.7))]),
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
    fn fold_line_is_the_complement_of_fold_frequency() {
        let plan = TurnDefensePlan::from_settings(&Settings::new()).unwrap();
        // 100 - 60 = 40% → 68
        assert_eq!(plan.fold, 68);
        // 25% → 43 → 34.4 at scale 0.8; 30% → 51.4 → 51 → 40.8
        assert_eq!(plan.checkraise, 34);
        assert_eq!(plan.float, 41);
        // 20% → 34.6, unscaled
        assert_eq!(plan.bluff_raise, 35);
    }

    #[test]
    fn facing_second_barrel_ladder() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains(
            "// Float with position\n\
             WHEN f$InPosition AND handrank169 <= 41 Call FORCE\n\
             \n\
             // Call with hands that have showdown value\n\
             WHEN handrank169 <= 68 Call FORCE\n"
        ));
        assert!(text.contains("WHEN handrank169 <= 35 AND f$TurnSemiBluffHands RaisePot FORCE\n"));
    }

    #[test]
    fn raises_are_defended_tighter_than_check_raises() {
        let script = build(&Settings::new()).unwrap();
        let draws = |name: &str| {
            script.find_block(name).unwrap().clauses().nth(2).unwrap().condition.clone()
        };
        assert_eq!(draws("f$FacingCheckRaiseToSecondBarrel"), "f$TurnStrongDraws AND handrank169 <= 27");
        assert_eq!(draws("f$FacingRaiseToSecondBarrel"), "f$TurnStrongDraws AND handrank169 <= 24");
    }

    #[test]
    fn every_block_folds_by_default() {
        let script = build(&Settings::new()).unwrap();
        assert_eq!(script.blocks().count(), 4);
        assert!(script.blocks().all(|b| b.fallback() == &Action::fold()));
    }
}
