//! River document. Same shape as the turn, one street later.
//!
//! | Module              | Blocks                                                 |
//! |---------------------|--------------------------------------------------------|
//! | [`third_barrel`]    | third barrel, delayed second barrel, continuation      |
//! | [`facing_bets`]     | facing third barrel, delayed barrel, (check-)raises    |
//! | [`probe`]           | in-position probe, out-of-position lead                |
//! | [`board_texture`]   | draw-heavy, pairing, blockers, busted turn draws       |
//! | [`hand_categories`] | value, strong, nuts, bluff candidates, bluff raises    |

pub mod board_texture;
pub mod facing_bets;
pub mod hand_categories;
pub mod probe;
pub mod third_barrel;

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

use self::{facing_bets::RiverDefensePlan, probe::RiverProbePlan, third_barrel::ThirdBarrelPlan};

fn header(settings: &Settings) -> Result<Vec<String>> {
    let barrel = ThirdBarrelPlan::from_settings(settings)?;
    let defense = RiverDefensePlan::from_settings(settings)?;
    let probe = RiverProbePlan::from_settings(settings)?;

    Ok(vec![
        "RIVER STRATEGY".to_string(),
        String::new(),
        "Generated with the following settings:".to_string(),
        format!("- Third Barrel Frequency: {}% (Threshold: {})", barrel.third_barrel_freq, barrel.third_barrel),
        format!(
            "- Delayed Second Barrel Frequency: {}% (Threshold: {})",
            barrel.delayed_second_barrel_freq, barrel.delayed_second_barrel
        ),
        format!("- IP River Bet Size: {}% of pot", probe.ip_size),
        format!("- OOP River Bet Size: {}% of pot", probe.oop_size),
        format!("- River Check-Raise Frequency: {}% (Threshold: {})", defense.checkraise_freq, defense.checkraise),
        format!("- River Float Frequency: {}% (Threshold: {})", defense.float_freq, defense.float),
        format!("- River Probe Frequency: {}% (Threshold: {})", probe.probe_freq, probe.probe),
        format!("- River Fold to Bet Frequency: {}% (Threshold: {})", defense.fold_to_bet_freq, defense.fold),
        format!("- River Bluff Raise Frequency: {}% (Threshold: {})", defense.bluff_raise_freq, defense.bluff_raise),
        format!("- River Value Range: {}% (Threshold: {})", defense.value_range, defense.value),
        format!("- River Bluff Range: {}% (Threshold: {})", barrel.bluff_range, barrel.bluff),
        format!("- River Check Behind Range: {}% (Threshold: {})", barrel.check_behind_freq, barrel.check_behind),
    ])
}

fn main_function() -> RuleBlock {
    RuleBlock::builder("f$river")
        .comment("Main river decision function")
        .comment("Determines action based on scenario detection")
        .blank()
        .comment("Third Barrel and Delayed Second Barrel scenarios")
        .when("f$ThirdBarrel", Action::ret("f$RiverThirdBarrel"))
        .when("f$DelayedSecondBarrel", Action::ret("f$RiverDelayedSecondBarrel"))
        .blank()
        .comment("Facing bet scenarios")
        .when("f$FacingThirdBarrelSpot", Action::ret("f$FacingThirdBarrel"))
        .when("f$FacingDelayedSecondBarrelSpot", Action::ret("f$FacingDelayedSecondBarrel"))
        .blank()
        .comment("Facing check scenarios")
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND f$InPosition AND NoBettingOnTurn",
            Action::ret("f$RiverProbeAfterCheckedTurn"),
        )
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND NOT f$InPosition AND NoBettingOnTurn",
            Action::ret("f$RiverOOPAfterCheckedTurn"),
        )
        .blank()
        .comment("Facing check to our turn bet")
        .when(
            "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotRaisedOnTurn AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets = 0 AND f$InPosition",
            Action::ret("f$RiverContinuationAfterTurnBet"),
        )
        .blank()
        .comment("Check-raise response")
        .when("f$FacingCheckRaiseToThirdBarrelSpot", Action::ret("f$FacingCheckRaiseToThirdBarrel"))
        .when("f$FacingRaiseToThirdBarrelSpot", Action::ret("f$FacingRaiseToThirdBarrel"))
        .blank()
        .comment("Default action")
        .otherwise(Action::check())
}

const SPOTS: [(&str, &str, &str); 6] = [
    (
        "f$ThirdBarrel",
        "Detect third barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotRaisedOnTurn AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$DelayedSecondBarrel",
        "Detect delayed second barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND NOT BotRaisedOnTurn AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$FacingThirdBarrelSpot",
        "Detect facing third barrel scenarios",
        "NOT BotRaisedBeforeFlop AND BotAction_PREFLOP = Call AND BotAction_FLOP = Call AND BotAction_TURN = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$FacingDelayedSecondBarrelSpot",
        "Detect facing delayed second barrel scenarios",
        "NOT BotRaisedBeforeFlop AND BotAction_PREFLOP = Call AND BotAction_FLOP = Call AND BotAction_TURN = Check AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0",
    ),
    (
        "f$FacingCheckRaiseToThirdBarrelSpot",
        "Detect facing check-raise to third barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotRaisedOnTurn AND BotActionsRiver = 1 AND BotsActionsOnThisRound = 1 AND RaisesSinceLastPlay = 1",
    ),
    (
        "f$FacingRaiseToThirdBarrelSpot",
        "Detect facing raise to third barrel scenarios",
        "BotRaisedBeforeFlop AND BotRaisedOnFlop AND BotRaisedOnTurn AND BotRaisedOnRiver AND RaisesSinceLastPlay = 1",
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

    script.append(third_barrel::build(settings)?);
    script.append(facing_bets::build(settings)?);
    script.append(probe::build(settings)?);
    script.append(board_texture::build(settings)?);
    script.append(hand_categories::build(settings)?);

    script.footer("END OF RIVER PROFILE");
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_mirrors_the_turn() {
        let script = build(&Settings::new()).unwrap();
        let main = script.blocks().next().unwrap();
        assert_eq!(main.name(), "f$river");
        let targets: Vec<&str> = main.clauses().map(|c| c.action.as_str()).collect();
        assert_eq!(
            targets,
            [
                "RETURN f$RiverThirdBarrel",
                "RETURN f$RiverDelayedSecondBarrel",
                "RETURN f$FacingThirdBarrel",
                "RETURN f$FacingDelayedSecondBarrel",
                "RETURN f$RiverProbeAfterCheckedTurn",
                "RETURN f$RiverOOPAfterCheckedTurn",
                "RETURN f$RiverContinuationAfterTurnBet",
                "RETURN f$FacingCheckRaiseToThirdBarrel",
                "RETURN f$FacingRaiseToThirdBarrel",
            ]
        );
        assert_eq!(main.fallback(), &Action::check());
    }

    #[test]
    fn every_predicate_and_target_is_defined_once() {
        let script = build(&Settings::new()).unwrap();
        let main = script.find_block("f$river").unwrap();
        for clause in main.clauses() {
            let target = clause.action.as_str().trim_start_matches("RETURN ");
            assert_eq!(script.blocks().filter(|b| b.name() == target).count(), 1, "{target}");
            if clause.condition.starts_with("f$") {
                assert_eq!(script.blocks().filter(|b| b.name() == clause.condition).count(), 1);
            }
        }
    }

    #[test]
    fn header_lists_check_behind_range() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("// - River Check Behind Range: 80% (Threshold: 135)\n"));
        assert!(text.contains("// - River Value Range: 60% (Threshold: 102)\n"));
        assert!(text.ends_with("// END OF RIVER PROFILE\n//\n//*****************************************************************************"));
    }

    #[test]
    fn header_reads_the_check_behind_range_key() {
        let text = generate(&Settings::new().with("river_check_behind_range", 20)).unwrap();
        assert!(text.contains("// - River Check Behind Range: 20% (Threshold: 35)\n"));
        assert!(text.contains("##f$RiverContinuationAfterTurnBet##"));
        assert_ne!(text, generate(&Settings::new()).unwrap());
    }
}
