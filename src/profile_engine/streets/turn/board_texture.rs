//! What the turn card changed about the board.
//!
//! `f$WetBoard` and `f$DryBoard` come from the flop document; only the
//! turn-specific predicates live here.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

#[instrument(level = "trace", skip(_settings))]
pub fn build(_settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.comment("Board texture helper functions for turn");

    script.push(true_when(
        "f$ScareCard",
        "Detects scare cards that could make betting more effective",
        &[
            "(TurnCard >= jack) AND (FlopCardPairedOnTurn OR PairOnTurn)",
            "FlushDrawPossible AND NOT FlushPossible",
            "f$StraightDrawPossible AND NOT StraightPossible",
            "TurnCardIsOvercardToBoard",
            "TurnCard <= 9 AND FlopCardPairedOnTurn",
        ],
    ));
    script.push(true_when(
        "f$DrawComplete",
        "Detects draw completions on the turn",
        &["FlushPossible", "StraightPossible", "FlopCardPairedOnTurn"],
    ));

    script.push(
        RuleBlock::builder("f$StraightDrawPossible")
            .comment("Detects if a straight draw is possible")
            .comment("For example, having 4 consecutive cards or two groups of 3 cards")
            .when("nstraightfill == 1", Action::return_true())
            .when("HaveStraightDraw", Action::return_true())
            .when("HaveOpenEndedStraightDraw", Action::return_true())
            .when("HaveInsideStraightDraw", Action::return_true())
            .otherwise(Action::return_false()),
    );

    script.push(true_when(
        "f$TurnPairedBoard",
        "The turn paired the board, or the flop was already paired",
        &["FlopCardPairedOnTurn", "PairOnBoard"],
    ));
    script.push(true_when(
        "f$TurnFlushDrawHeavyBoard",
        "Two or more cards of one suit after the turn",
        &["FlushDrawPossible", "nsuitedcommon >= 2"],
    ));

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
