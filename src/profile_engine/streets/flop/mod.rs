//! Flop document.
//!
//! | Module              | Blocks                                                  |
//! |---------------------|---------------------------------------------------------|
//! | [`cbet`]            | `f$FlopCbetIP`, `f$FlopCbetOOP`                         |
//! | [`facing_bets`]     | facing c-bet, donk, check-raise, raise; our own bets    |
//! | [`board_texture`]   | dry, wet, suits, pairing, connectivity, card height     |
//! | [`hand_categories`] | value, strong, draws, strong draws, kicker              |
//!
//! Spot detection lives here: each `f$Facing…Spot` predicate answers "are we
//! in this spot", and `f$flop` dispatches to the handler of the same stem.

pub mod board_texture;
pub mod cbet;
pub mod facing_bets;
pub mod hand_categories;

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    keys,
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

use self::{cbet::CbetPlan, facing_bets::FacingBetsPlan};

fn header(settings: &Settings) -> Result<Vec<String>> {
    let cbet = CbetPlan::from_settings(settings)?;
    let facing = FacingBetsPlan::from_settings(settings)?;

    let mut lines = vec![
        "FLOP STRATEGY".to_string(),
        String::new(),
        "Generated with the following settings:".to_string(),
        format!("- IP C-Bet Frequency: {}% (Threshold: {})", cbet.ip_freq, cbet.ip),
        format!("- OOP C-Bet Frequency: {}% (Threshold: {})", cbet.oop_freq, cbet.oop),
        format!("- IP C-Bet Size: {}% of pot", cbet.ip_size),
        format!("- OOP C-Bet Size: {}% of pot", cbet.oop_size),
    ];
    for texture in &cbet.textures {
        lines.push(format!("- {} Adjustment: {}%", texture.label, texture.adjust));
    }
    lines.extend([
        format!("- Check-Raise Defense: {}% (Threshold: {})", facing.checkraise_defense, facing.defense),
        format!("- Donk Bet Response Style: {}", facing.donk_response),
        format!("- Value Hands Aggression: {}%", settings.number(keys::VALUE_AGGRESSION)?),
        format!("- Draw Hands Aggression: {}% (Threshold: {})", facing.draw_aggression, facing.draws),
        format!("- Semi-Bluff Frequency: {}% (Threshold: {})", facing.semibluff_freq, facing.semibluff),
        format!("- Multiway C-Bet Frequency: {}% (Threshold: {})", cbet.multiway_freq, cbet.multiway_cbet),
        format!(
            "- Multiway Value Range: {}% (Threshold: {})",
            cbet.multiway_value, cbet.multiway_value_threshold
        ),
    ]);
    Ok(lines)
}

fn main_function() -> RuleBlock {
    RuleBlock::builder("f$flop")
        .comment("Main flop decision function")
        .comment("Determines action based on scenario detection")
        .blank()
        .comment("C-Bet scenarios")
        .when(
            "BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND f$InPosition",
            Action::ret("f$FlopCbetIP"),
        )
        .when(
            "BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND NOT f$InPosition",
            Action::ret("f$FlopCbetOOP"),
        )
        .blank()
        .comment("Facing bet scenarios")
        .when("f$FacingFlopCbetSpot", Action::ret("f$FacingFlopCbet"))
        .when("f$FacingDonkBetSpot", Action::ret("f$FacingDonkBet"))
        .blank()
        .comment("Facing check scenarios")
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND f$InPosition",
            Action::ret("f$BetAfterCheckIP"),
        )
        .when(
            "BotsLastPreflopAction = Call AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets = 0 AND NOT f$InPosition",
            Action::ret("f$DonkBet"),
        )
        .blank()
        .comment("Check-raise response")
        .when("f$FacingCheckRaiseToCbetSpot", Action::ret("f$FacingCheckRaiseToCbet"))
        .when("f$FacingRaiseToCbetSpot", Action::ret("f$FacingRaiseToCbet"))
        .blank()
        .comment("Default action")
        .otherwise(Action::check())
}

fn spot_predicates(script: &mut Script) {
    script.tight_banner("Helper functions for identifying scenarios");
    script.push(true_when(
        "f$FacingFlopCbetSpot",
        "We called preflop and the raiser bet into us",
        &["NOT BotRaisedBeforeFlop AND BotsLastPreflopAction = Call AND Bets > 0 AND Raises = 0"],
    ));
    script.push(true_when(
        "f$FacingDonkBetSpot",
        "We raised preflop and a caller bet before our first action",
        &["BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 0 AND Bets > 0"],
    ));
    script.push(true_when(
        "f$FacingCheckRaiseToCbetSpot",
        "Our in-position c-bet met a check-raise",
        &["BotRaisedBeforeFlop AND BotActionsFlop = 1 AND BotsActionsOnThisRoundIncludingChecks = 1 AND RaisesSinceLastPlay = 1 AND f$InPosition"],
    ));
    script.push(true_when(
        "f$FacingRaiseToCbetSpot",
        "Our c-bet was raised",
        &["BotRaisedBeforeFlop AND BotRaisedOnFlop AND RaisesSinceLastPlay = 1"],
    ));
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.banner(header(settings)?);
    script.push(main_function());
    spot_predicates(&mut script);

    script.append(cbet::build(settings)?);
    script.append(facing_bets::build(settings)?);
    script.append(board_texture::build(settings)?);
    script.append(hand_categories::build(settings)?);

    script.footer("END OF FLOP PROFILE");
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
