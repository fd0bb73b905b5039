//! 3-bet, 4-bet and 5-bet decisions, both cold and as the original raiser.
//!
//! Every "facing" spot is a pair of blocks: a wrapper that maps a 0/1/2 code to
//! an action, and a `_Decision` block that computes the code from position
//! tiers. Tier order is load-bearing: the wider overrides (late-position
//! raiser, in position, short stack) sit after the position tiers and only
//! fire when those fall through.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{
        aggression_adjustment, aggression_factor, all_of, decimal, rank_at_most, BLINDS, EARLY_POSITION,
        LATE_POSITION, MIDDLE_POSITION,
    },
    keys,
    rules::{Action, RuleBlock, RuleBlockBuilder, Script},
    settings::{Number, Settings},
    streets::preflop::decision_wrapper,
    threshold::{scale_threshold, threshold},
};

/// One position tier: label comment, seat condition, raise and call multipliers.
type Tier = (&'static str, &'static str, f64, f64);

const COLD_3BET_TIERS: [Tier; 4] = [
    ("Early Position 3-bet",  EARLY_POSITION,  0.5,  0.6),
    ("Middle Position 3-bet", MIDDLE_POSITION, 0.65, 0.7),
    ("Late Position 3-bet",   LATE_POSITION,   0.8,  0.8),
    ("Blinds 3-bet",          BLINDS,          0.7,  0.75),
];

const COLD_4BET_TIERS: [Tier; 4] = [
    ("Very tight 4-betting range from early position", EARLY_POSITION,  0.4,  0.5),
    ("Middle position",                                MIDDLE_POSITION, 0.5,  0.55),
    ("Late position",                                  LATE_POSITION,   0.6,  0.6),
    ("Blinds",                                         BLINDS,          0.55, 0.55),
];

/// As the original raiser facing a 3-bet. Only the first tier carries a comment.
const RAISER_4BET_TIERS: [Tier; 4] = [
    ("Adjust based on position", EARLY_POSITION,  0.45, 0.55),
    ("",                         MIDDLE_POSITION, 0.55, 0.6),
    ("",                         LATE_POSITION,   0.65, 0.7),
    ("",                         BLINDS,          0.6,  0.65),
];

/// Raw settings plus every threshold derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBetPlan {
    pub threebet_frequency: Number,
    pub fourbet_frequency: Number,
    pub threebet_adjustment: f64,
    pub fourbet_adjustment: f64,
    pub call_3bet_range: Number,
    pub fourbet_range: Number,
    pub call_4bet_range: Number,
    pub fivebet_range: Number,
    pub ip_adjust: Number,
    pub vs_late_adjust: Number,
    pub short_stack_adjust: Number,

    pub threebet: i64,
    pub call_3bet: i64,
    pub fourbet_vs_3bet: i64,
    pub call_4bet: i64,
    pub fivebet: i64,
}

impl ThreeBetPlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let af = aggression_factor(settings)?;
        let threebet_frequency = settings.number(keys::THREEBET_FREQUENCY)?;
        let fourbet_frequency = settings.number(keys::FOURBET_FREQUENCY)?;
        let threebet_adjustment = aggression_adjustment(af, 0.5);
        let fourbet_adjustment = aggression_adjustment(af, 0.6);
        let call_3bet_range = settings.number(keys::CALL_3BET_RANGE)?;
        let fourbet_range = settings.number(keys::FOURBET_RANGE)?;
        let call_4bet_range = settings.number(keys::CALL_4BET_RANGE)?;
        let fivebet_range = settings.number(keys::FIVEBET_RANGE)?;

        Ok(ThreeBetPlan {
            threebet: threshold(threebet_frequency.value() * threebet_adjustment),
            call_3bet: threshold(call_3bet_range.value()),
            fourbet_vs_3bet: threshold(fourbet_range.value()),
            call_4bet: threshold(call_4bet_range.value()),
            fivebet: threshold(fivebet_range.value()),
            threebet_frequency,
            fourbet_frequency,
            threebet_adjustment,
            fourbet_adjustment,
            call_3bet_range,
            fourbet_range,
            call_4bet_range,
            fivebet_range,
            ip_adjust: settings.number(keys::IP_3BET_ADJUST)?,
            vs_late_adjust: settings.number(keys::VS_LP_3BET_ADJUST)?,
            short_stack_adjust: settings.number(keys::SHORT_STACK_4BET)?,
        })
    }

    fn banner_lines(&self) -> Vec<String> {
        vec![
            "3-BET AND 4-BET STRATEGY".into(),
            String::new(),
            format!(
                "3-Bet Frequency: {}% (Adjusted: {:.1}%)",
                self.threebet_frequency,
                self.threebet_frequency.value() * self.threebet_adjustment
            ),
            format!(
                "4-Bet Frequency: {}% (Adjusted: {:.1}%)",
                self.fourbet_frequency,
                self.fourbet_frequency.value() * self.fourbet_adjustment
            ),
            format!("Call 3-Bet Range: {}% (Threshold: {})", self.call_3bet_range, self.call_3bet),
            format!("4-Bet vs 3-Bet Range: {}% (Threshold: {})", self.fourbet_range, self.fourbet_vs_3bet),
            format!("Call 4-Bet Range: {}% (Threshold: {})", self.call_4bet_range, self.call_4bet),
            format!("5-Bet Range: {}% (Threshold: {})", self.fivebet_range, self.fivebet),
            format!(
                "Position Adjustments: In Position +{}%, vs Late Position +{}%",
                decimal(self.ip_adjust.value()),
                decimal(self.vs_late_adjust.value())
            ),
        ]
    }
}

/// Emit position tiers as `RETURN 2` / `RETURN 1` clause pairs.
fn tiered(mut block: RuleBlockBuilder, tiers: &[Tier], raise_base: i64, call_base: i64) -> RuleBlockBuilder {
    for &(label, seats, raise_mult, call_mult) in tiers {
        if !label.is_empty() {
            block = block.comment(label);
        }
        block = block
            .when(all_of(&[seats, &rank_at_most(scale_threshold(raise_base, raise_mult))]), Action::ret(2))
            .when(all_of(&[seats, &rank_at_most(scale_threshold(call_base, call_mult))]), Action::ret(1))
            .blank();
    }
    block
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = ThreeBetPlan::from_settings(settings)?;
    let vs_late = 1.0 + plan.vs_late_adjust.fraction();
    let in_position = 1.0 + plan.ip_adjust.fraction();
    let short_stack = 1.0 + plan.short_stack_adjust.fraction();
    let late_raiser = "(DealPositionLastRaiser >= nplayersdealt - 2)";

    let mut script = Script::new();
    script.banner(plan.banner_lines());

    // Cold: one raise in front, nobody called yet.
    script.push(decision_wrapper(
        "f$ThreeBetColdCall",
        "1 Raise before Hero first action and No villains call. Hero can 3Bet, ColdCall or Fold",
        Action::ret("RaisePot"),
    ));
    let block = RuleBlock::builder("f$ThreeBetColdCall_Decision").comment("0 = Fold, 1 = Call, 2 = 3-Bet");
    script.push(
        tiered(block, &COLD_3BET_TIERS, plan.threebet, plan.call_3bet)
            .comment("Against specific positions - 3-bet looser against late position raises")
            .when(all_of(&[late_raiser, &rank_at_most(scale_threshold(plan.threebet, vs_late))]), Action::ret(2))
            .when(all_of(&[late_raiser, &rank_at_most(scale_threshold(plan.call_3bet, vs_late))]), Action::ret(1))
            .blank()
            .otherwise(Action::ret(0)),
    );

    // Cold: a 3-bet (or squeeze) already in front of us.
    script.push(decision_wrapper(
        "f$Facing3BetBeforeFirstAction",
        "3bet or squeeze before Hero first action. Hero can 4Bet, ColdCall or Fold",
        Action::ret("RaisePot"),
    ));
    let block = RuleBlock::builder("f$Facing3BetBeforeFirstAction_Decision").comment("0 = Fold, 1 = Call, 2 = 4-Bet");
    script.push(
        tiered(block, &COLD_4BET_TIERS, plan.fourbet_vs_3bet, plan.call_3bet)
            .comment("Stack depth considerations")
            .when(
                all_of(&["StackSize < 50", &rank_at_most(scale_threshold(plan.fourbet_vs_3bet, short_stack))]),
                Action::ret(2),
            )
            .otherwise(Action::ret(0)),
    );

    script.push(decision_wrapper(
        "f$Facing4BetBeforeFirstAction",
        "4bet before Hero first action. Hero can 5Bet, ColdCall or Fold",
        Action::ret("RaiseMax"),
    ));
    script.push(
        RuleBlock::builder("f$Facing4BetBeforeFirstAction_Decision")
            .comment("0 = Fold, 1 = Call, 2 = 5-Bet (All-In)")
            .when(rank_at_most(plan.fivebet), Action::ret(2))
            .when(rank_at_most(plan.call_4bet), Action::ret(1))
            .otherwise(Action::ret(0)),
    );

    script.push(
        RuleBlock::builder("f$Facing5BetBeforeFirstAction")
            .comment("5bet before Hero first action. Hero can Push, ColdCall or Fold")
            .when(rank_at_most(scale_threshold(plan.fivebet, 0.8)), Action::ret("RaiseMax"))
            .when(rank_at_most(scale_threshold(plan.call_4bet, 0.8)), Action::ret("Call"))
            .otherwise(Action::ret("Fold")),
    );

    // As the original raiser.
    script.push(decision_wrapper(
        "f$Facing3Bet",
        "Hero is the Original Raiser and Facing 3Bet. Hero can 4Bet, Call or Fold",
        Action::ret("RaisePot"),
    ));
    let block = RuleBlock::builder("f$Facing3Bet_Decision").comment("0 = Fold, 1 = Call, 2 = 4-Bet");
    script.push(
        tiered(block, &RAISER_4BET_TIERS, plan.fourbet_vs_3bet, plan.call_3bet)
            .comment("Position adjustment - more aggressive in position")
            .when(
                all_of(&["f$InPosition", &rank_at_most(scale_threshold(plan.fourbet_vs_3bet, in_position))]),
                Action::ret(2),
            )
            .when(
                all_of(&["f$InPosition", &rank_at_most(scale_threshold(plan.call_3bet, in_position))]),
                Action::ret(1),
            )
            .blank()
            .otherwise(Action::ret(0)),
    );

    script.push(decision_wrapper(
        "f$Facing4Bet",
        "Hero 3bet and facing 4bet. Hero can 5bet, Call or Fold",
        Action::ret("RaiseMax"),
    ));
    script.push(
        RuleBlock::builder("f$Facing4Bet_Decision")
            .comment("0 = Fold, 1 = Call, 2 = 5-Bet (All-In)")
            .when(rank_at_most(plan.fivebet), Action::ret(2))
            .when(rank_at_most(plan.call_4bet), Action::ret(1))
            .comment("Stack depth considerations")
            .when(
                all_of(&["StackSize < 50", &rank_at_most(scale_threshold(plan.fivebet, short_stack))]),
                Action::ret(2),
            )
            .blank()
            .otherwise(Action::ret(0)),
    );

    script.push(
        RuleBlock::builder("f$Facing5Bet")
            .comment("Hero 4bet and facing 5bet. Hero can Push, Call or Fold")
            .when(rank_at_most(scale_threshold(plan.fivebet, 0.8)), Action::ret("RaiseMax"))
            .when(rank_at_most(scale_threshold(plan.call_4bet, 0.6)), Action::ret("Call"))
            .otherwise(Action::ret("Fold")),
    );

    script.push(
        RuleBlock::builder("f$InPosition")
            .comment("Helper function to determine if we're in position vs the 3bettor")
            .when("LastAggressorActsAfterUs", Action::return_false())
            .otherwise(Action::return_true()),
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
        let plan = ThreeBetPlan::from_settings(&Settings::new()).unwrap();
        assert_eq!(plan.threebet, threshold(40.0));
        assert_eq!(plan.call_3bet, 26);
        assert_eq!(plan.fourbet_vs_3bet, 14);
        assert_eq!(plan.call_4bet, 9);
        assert_eq!(plan.fivebet, 6);
    }

    #[test]
    fn cold_decision_keeps_late_raiser_override_after_position_tiers() {
        let script = build(&Settings::new()).unwrap();
        let block = script.find_block("f$ThreeBetColdCall_Decision").unwrap();
        let conditions: Vec<&str> = block.clauses().map(|c| c.condition.as_str()).collect();
        assert_eq!(conditions.len(), 10);
        assert!(conditions[0].starts_with(EARLY_POSITION));
        assert!(conditions[8].starts_with("(DealPositionLastRaiser >= nplayersdealt - 2)"));
        assert_eq!(block.fallback(), &Action::ret(0));
    }

    #[test]
    fn higher_aggression_widens_the_3bet_range() {
        let passive = ThreeBetPlan::from_settings(&Settings::new().with("aggression", 20)).unwrap();
        let aggressive = ThreeBetPlan::from_settings(&Settings::new().with("aggression", 90)).unwrap();
        assert!(passive.threebet < aggressive.threebet);
        assert_eq!(passive.call_3bet, aggressive.call_3bet);
    }

    #[test]
    fn short_stack_jam_widens_the_4bet_range() {
        let text = generate(&Settings::new()).unwrap();
        // fourbet_range 8% → 14, widened by 30% → 18
        assert!(text.contains("WHEN StackSize < 50 AND handrank169 <= 18 RETURN 2 FORCE"));
    }

    #[test]
    fn header_echoes_adjusted_frequencies() {
        let text = generate(&Settings::new().with("aggression", 100)).unwrap();
        assert!(text.contains("// 3-Bet Frequency: 40% (Adjusted: 60.0%)"));
        assert!(text.contains("// 4-Bet Frequency: 30% (Adjusted: 48.0%)"));
    }

    #[test]
    fn header_echoes_position_adjustments_as_decimals() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("// Position Adjustments: In Position +20.0%, vs Late Position +15.0%\n"));
        let text = generate(&Settings::new().with("ip_3bet_adjust", 12.5)).unwrap();
        assert!(text.contains("In Position +12.5%,"));
    }
}
