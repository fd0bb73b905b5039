//! River board and holding predicates: completed draws, pairing, blockers,
//! and the draws we carried from the turn.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

fn blockers_to_nuts() -> RuleBlock {
    RuleBlock::builder("f$HaveBlockersToNuts")
        .comment("Detects if we have blockers to the nuts")
        .comment("For example holding one flush card when flush is possible")
        .when(
            "FlushPossible AND ((FirstHoleCardSuit == DominantSuitCommon AND SecondHoleCardSuit != DominantSuitCommon) \
             OR (FirstHoleCardSuit != DominantSuitCommon AND SecondHoleCardSuit == DominantSuitCommon))",
            Action::return_true(),
        )
        .when(
            "StraightPossible AND ((rankhiplayer == HighCardOfBestPossibleStraight + 1) \
             OR (rankloplayer == HighCardOfBestPossibleStraight + 1))",
            Action::return_true(),
        )
        .otherwise(Action::return_false())
}

#[instrument(level = "trace", skip(_settings))]
pub fn build(_settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.comment("Board texture helper functions for river");

    script.push(true_when(
        "f$DrawHeavyBoard",
        "Detects if the board is draw-heavy (many possible draws)",
        &["FlushPossible", "StraightPossible", "f$FourToFlush", "f$FourToStraight"],
    ));
    script.push(true_when("f$PairedBoard", "Detects if the board is paired", &["PairOnBoard", "TripsOnBoard"]));
    script.push(blockers_to_nuts());
    script.push(true_when(
        "f$FourToFlush",
        "Detects if there are four cards of the same suit on board",
        &["nsuitedcommon >= 4"],
    ));
    script.push(true_when(
        "f$FourToStraight",
        "Detects if there are four consecutive cards on board",
        &["nstraightcommon >= 4"],
    ));
    script.push(true_when(
        "f$HaveTopKicker",
        "Checks if we have the top kicker possible",
        &["rankhiplayer >= rankhicommon", "rankloplayer >= rankhicommon"],
    ));
    script.push(true_when(
        "f$HadFlushDrawOnTurn",
        "Checks if we had a flush draw on the turn",
        &["hi_nsuited3 == 4 AND FirstHoleCardSuit == hi_tsuit3 AND SecondHoleCardSuit == hi_tsuit3"],
    ));
    script.push(true_when(
        "f$HadStraightDrawOnTurn",
        "Checks if we had a straight draw on the turn",
        &["hi_nstraightfill3 == 1"],
    ));

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
