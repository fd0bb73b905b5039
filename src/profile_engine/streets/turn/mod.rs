//! Turn document.
//!
//! | Module              | Blocks                                                 |
//! |---------------------|--------------------------------------------------------|
//! | [`second_barrel`]   | second barrel, delayed c-bet, continuation             |
//! | [`facing_bets`]     | facing second barrel, delayed c-bet, (check-)raises    |
//! | [`probe`]           | in-position probe, out-of-position lead                |
//! | [`board_texture`]   | scare card, completed draws, pairing, flush draws      |
//! | [`hand_categories`] | value, strong, strong draws, semi-bluffs, kicker       |

pub mod board_texture;
pub mod facing_bets;
pub mod hand_categories;
pub mod probe;
pub mod second_barrel;

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

use self::{facing_bets::TurnDefensePlan, probe::ProbePlan, second_barrel::BarrelPlan};

fn header(settings: &Settings) -> Result<Vec<String>> {
    let barrel = BarrelPlan::from_settings(settings)?;
    let defense = TurnDefensePlan::from_settings(settings)?;
    let probe = ProbePlan::from_settings(settings)?;

    Ok(vec![
        "TURN STRATEGY".to_string(),
        String::new(),
        "Generated with the following settings:".to_string(),
        format!("- Second Barrel Frequency: {}% (Threshold: {})", barrel.second_barrel_freq, barrel.second_barrel),
        format!("- Delayed C-Bet Frequency: {}% (Threshold: {})", barrel.delayed_cbet_freq, barrel.delayed_cbet),
        format!("- IP Turn Bet Size: {}% of pot", probe.ip_size),
        format!("- OOP Turn Bet Size: {}% of pot", probe.oop_size),
        format!("- Turn Check-Raise Frequency: {}% (Threshold: {})", defense.checkraise_freq, defense.checkraise),
        format!("- Turn Float Frequency: {}% (Threshold: {})", defense.float_freq, defense.float),
        format!("- Turn Probe Frequency: {}% (Threshold: {})", probe.probe_freq, probe.probe),
        format!("- Turn Fold to C-Bet Frequency: {}% (Threshold: {})", defense.fold_to_cbet_freq, defense.fold),
        format!("- Turn Bluff Raise Frequency: {}% (Threshold: {})", defense.bluff_raise_freq, defense.bluff_raise),
        format!("- Scare Card Adjustment: {}%", barrel.scare_card_adjust),
        format!("- Draw Complete Adjustment: {}%", barrel.draw_complete_adjust),
    ])
}

fn main_function() -> RuleBlock {
    RuleBlock::builder("f$turn")
        .comment("Main turn decision function")
        .comment("Determines action based on scenario detection")
        .blank()
        .comment("C-Bet and Second Barrel scenarios")
        .when("f$SecondBarrel", Action::ret("f$TurnSecondBarrel"))
        .when("f$DelayedCbet", Action::ret("f$TurnDelayedCbet"))
        .blank()
        .comment("Facing bet scenarios")
        .when("f$FacingSecondBarrelSpot", Action::ret("f$FacingSecondBarrel"))
        .when("f$FacingDelayedCbetSpot", Action::ret("f$FacingDelayedCbet"))
        .blank()
        .comment("Facing check scenarios")
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND f$InPosition AND NoBettingOnFlop",
            Action::ret("f$TurnProbeAfterCheckedFlop"),
        )
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND NOT f$InPosition AND NoBettingOnFlop",
            Action::ret("f$TurnOOPAfterCheckedFlop"),
        )
        .blank()
        .comment("Facing check to our flop bet")
        .when(
            "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets = 0 AND f$InPosition",
            Action::ret("f$TurnContinuationAfterFlopBet"),
        )
        .blank()
        .comment("Check-raise response")
        .when("f$FacingCheckRaiseToSecondBarrelSpot", Action::ret("f$FacingCheckRaiseToSecondBarrel"))
        .when("f$FacingRaiseToSecondBarrelSpot", Action::ret("f$FacingRaiseToSecondBarrel"))
        .blank()
        .comment("Default action")
        .otherwise(Action::check())
}

const SPOTS: [(&str, &str, &str); 6] = [
    (
        "f$SecondBarrel",
        "Detect second barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$DelayedCbet",
        "Detect delayed c-bet scenarios",
        "BotRaisedBeforeFlop AND NOT BotRaisedOnFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$FacingSecondBarrelSpot",
        "Detect facing second barrel scenarios",
        "NOT BotRaisedBeforeFlop AND BotAction_PREFLOP = Call AND BotAction_FLOP = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$FacingDelayedCbetSpot",
        "Detect facing delayed c-bet scenarios",
        "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND NoBettingOnFlop AND BotCalledOnTurn AND Bets = 1",
    ),
    (
        "f$FacingCheckRaiseToSecondBarrelSpot",
        "Detect facing check-raise to second barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotActionsTurn = 1 AND BotsActionsOnThisRound = 1 AND RaisesSinceLastPlay = 1",
    ),
    (
        "f$FacingRaiseToSecondBarrelSpot",
        "Detect facing raise to second barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotRaisedOnTurn AND RaisesSinceLastPlay = 1",
    ),
];

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.banner(header(settings)?);
    script.push(main_function());

    script.tight_banner("Helper functions for identifying scenarios");
    for (name, comment, condition) in SPOTS {
        script.push(true_when(name, comment, &[condition]));
    }

    script.append(second_barrel::build(settings)?);
    script.append(facing_bets::build(settings)?);
    script.append(probe::build(settings)?);
    script.append(board_texture::build(settings)?);
    script.append(hand_categories::build(settings)?);

    script.footer("END OF TURN PROFILE");
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_is_fixed() {
        let script = build(&Settings::new()).unwrap();
        let main = script.blocks().next().unwrap();
        assert_eq!(main.name(), "f$turn");
        let targets: Vec<&str> = main.clauses().map(|c| c.action.as_str()).collect();
        assert_eq!(
            targets,
            [
                "RETURN f$TurnSecondBarrel",
                "RETURN f$TurnDelayedCbet",
                "RETURN f$FacingSecondBarrel",
                "RETURN f$FacingDelayedCbet",
                "RETURN f$TurnProbeAfterCheckedFlop",
                "RETURN f$TurnOOPAfterCheckedFlop",
                "RETURN f$TurnContinuationAfterFlopBet",
                "RETURN f$FacingCheckRaiseToSecondBarrel",
                "RETURN f$FacingRaiseToSecondBarrel",
            ]
        );
    }

    #[test]
    fn every_predicate_and_target_is_defined_once() {
        let script = build(&Settings::new()).unwrap();
        let main = script.find_block("f$turn").unwrap();
        for clause in main.clauses() {
            let target = clause.action.as_str().trim_start_matches("RETURN ");
            assert_eq!(script.blocks().filter(|b| b.name() == target).count(), 1, "{target}");
            if clause.condition.starts_with("f$") {
                assert_eq!(script.blocks().filter(|b| b.name() == clause.condition).count(), 1);
            }
        }
    }

    #[test]
    fn spot_predicates_use_upper_case_keywords() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("AND BotCalledOnTurn AND Bets = 1 RETURN true FORCE\n"));
        assert!(!text.contains("Return true Force"));
    }

    #[test]
    fn header_echoes_thresholds() {
        let text = generate(&Settings::new().with("turn_fold_to_cbet_freq", 55)).unwrap();
        // 45% → 76.6
        assert!(text.contains("// - Turn Fold to C-Bet Frequency: 55% (Threshold: 77)\n"));
        assert!(text.contains("WHEN handrank169 <= 77 Call FORCE\n"));
        assert!(text.contains("// - Scare Card Adjustment: -15%\n"));
        assert!(text.ends_with("// END OF TURN PROFILE\n//\n//*****************************************************************************"));
    }
}
