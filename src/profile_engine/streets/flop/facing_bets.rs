//! Flop answers to villain aggression, plus our own bets as the preflop caller.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{all_of, rank_at_most},
    keys,
    models::DonkResponse,
    rules::{Action, RuleBlock, RuleBlockBuilder, Script},
    settings::{Number, Settings},
    threshold::{scale_threshold, threshold},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FacingBetsPlan {
    pub checkraise_defense: Number,
    pub donk_response: DonkResponse,
    pub draw_aggression: Number,
    pub semibluff_freq: Number,

    pub defense: i64,
    pub draws: i64,
    pub semibluff: i64,
}

impl FacingBetsPlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let checkraise_defense = settings.number(keys::CHECKRAISE_DEFENSE)?;
        let draw_aggression = settings.number(keys::DRAW_AGGRESSION)?;
        let semibluff_freq = settings.number(keys::SEMIBLUFF_FREQ)?;

        Ok(FacingBetsPlan {
            defense: threshold(checkraise_defense.value()),
            draws: threshold(draw_aggression.value()),
            semibluff: threshold(semibluff_freq.value()),
            donk_response: settings.parsed(keys::DONK_RESPONSE)?,
            checkraise_defense,
            draw_aggression,
            semibluff_freq,
        })
    }
}

/// Opening lines shared by every "we face a bet" block.
fn continue_with_made_hands(name: &str, intro: &str, lead: &str) -> RuleBlockBuilder {
    RuleBlock::builder(name)
        .comment(intro)
        .blank()
        .comment(lead)
        .when("f$FlopStrongHands", Action::raise_pot())
        .when("f$FlopValueHands", Action::call())
        .blank()
}

fn donk_lines(plan: &FacingBetsPlan, block: RuleBlockBuilder) -> RuleBlockBuilder {
    match plan.donk_response {
        DonkResponse::FoldCall => block
            .comment("Conservative approach to donk bets")
            .when(all_of(&["f$FlopDrawHands", &rank_at_most(scale_threshold(plan.draws, 0.8))]), Action::call()),
        DonkResponse::CallRaise => block
            .comment("Balanced approach to donk bets")
            .when(all_of(&["f$FlopDrawHands", &rank_at_most(plan.draws)]), Action::call())
            .when(all_of(&["f$FlopStrongDraws", &rank_at_most(plan.semibluff)]), Action::raise_pot()),
        DonkResponse::Aggressive => block
            .comment("Aggressive approach to donk bets")
            .when("f$FlopDrawHands", Action::call())
            .when(rank_at_most(scale_threshold(plan.semibluff, 0.8)), Action::raise_pot()),
    }
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = FacingBetsPlan::from_settings(settings)?;
    let half_pot = || Action::raise_by(50);

    let mut script = Script::new();
    script.comment("Facing bets functions");

    script.push(
        continue_with_made_hands(
            "f$FacingFlopCbet",
            "Response when facing a c-bet on the flop",
            "Always continue with strong hands",
        )
        .comment("Continue with good draws")
        .when(all_of(&["f$FlopDrawHands", &rank_at_most(plan.draws)]), Action::call())
        .blank()
        .comment("Check-raise with strong draws in position")
        .when(
            all_of(&["f$InPosition", "f$FlopStrongDraws", &rank_at_most(plan.semibluff)]),
            Action::raise_pot(),
        )
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    let donk = continue_with_made_hands(
        "f$FacingDonkBet",
        "Response when a non-preflop-raiser bets into the preflop raiser",
        "Aggressive response to donk bets with strong hands",
    );
    script.push(donk_lines(&plan, donk).blank().otherwise(Action::fold()));

    script.push(
        continue_with_made_hands(
            "f$FacingCheckRaiseToCbet",
            "Response when opponent check-raises our c-bet",
            "Continue with strong hands",
        )
        .comment("Defense frequency against check-raises")
        .when(rank_at_most(plan.defense), Action::call())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        continue_with_made_hands(
            "f$FacingRaiseToCbet",
            "Response when opponent raises our c-bet",
            "Continue with strong hands",
        )
        .comment("Defense frequency against raises - slightly tighter than vs check-raises")
        .when(rank_at_most(scale_threshold(plan.defense, 0.9)), Action::call())
        .blank()
        .comment("Default fold")
        .otherwise(Action::fold()),
    );

    script.push(
        RuleBlock::builder("f$DonkBet")
            .comment("Donk betting as non-preflop-raiser")
            .blank()
            .comment("Only donk with very strong hands or draws")
            .when("f$FlopStrongHands", Action::raise_pot())
            .when(
                all_of(&["f$FlopStrongDraws", &rank_at_most(scale_threshold(plan.semibluff, 0.7))]),
                half_pot(),
            )
            .blank()
            .comment("Default check")
            .otherwise(Action::check()),
    );

    script.push(
        RuleBlock::builder("f$BetAfterCheckIP")
            .comment("Betting when checked to in position")
            .blank()
            .comment("Always bet value hands")
            .when("f$FlopValueHands", half_pot())
            .blank()
            .comment("Bet draws on wet boards")
            .when(all_of(&["f$FlopDrawHands", "f$WetBoard", &rank_at_most(plan.draws)]), half_pot())
            .blank()
            .comment("Opportunistic betting when checked to")
            .when(all_of(&["f$DryBoard", &rank_at_most(plan.semibluff)]), half_pot())
            .when(rank_at_most(scale_threshold(plan.semibluff, 0.8)), half_pot())
            .blank()
            .comment("Default check back")
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

    fn donk_conditions(style: &str) -> Vec<String> {
        let script = build(&Settings::new().with("donk_response", style)).unwrap();
        script
            .find_block("f$FacingDonkBet")
            .unwrap()
            .clauses()
            .skip(2)
            .map(|c| format!("{} {}", c.condition, c.action))
            .collect()
    }

    #[test]
    fn donk_response_styles_change_the_draw_clauses() {
        // draw_aggression 60 → 102, semibluff 65 → 110
        assert_eq!(donk_conditions("Fold/Call"), ["f$FlopDrawHands AND handrank169 <= 82 Call"]);
        assert_eq!(
            donk_conditions("Call/Raise"),
            ["f$FlopDrawHands AND handrank169 <= 102 Call", "f$FlopStrongDraws AND handrank169 <= 110 RaisePot"]
        );
        assert_eq!(donk_conditions("Aggressive"), ["f$FlopDrawHands Call", "handrank169 <= 88 RaisePot"]);
    }

    #[test]
    fn unknown_donk_style_is_rejected() {
        assert!(build(&Settings::new().with("donk_response", "Raise Everything")).is_err());
    }

    #[test]
    fn raise_defense_is_tighter_than_checkraise_defense() {
        let script = build(&Settings::new()).unwrap();
        let last = |name: &str| {
            script.find_block(name).unwrap().clauses().last().unwrap().condition.clone()
        };
        // checkraise_defense 35 → 60, then 54 against raises
        assert_eq!(last("f$FacingCheckRaiseToCbet"), "handrank169 <= 60");
        assert_eq!(last("f$FacingRaiseToCbet"), "handrank169 <= 54");
    }

    #[test]
    fn bets_as_caller_use_half_pot() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("WHEN f$FlopStrongDraws AND handrank169 <= 77 RaiseBy 50% FORCE\n"));
        assert!(text.contains("##f$BetAfterCheckIP##\n// Betting when checked to in position\n\n"));
    }
}
