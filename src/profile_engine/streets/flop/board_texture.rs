//! Flop board texture predicates.
//!
//! Every predicate is its own block over runtime board facts (suit counts,
//! flop card ranks, flush and straight possibilities). Several are built on
//! top of others, so the order of emission does not matter to the runtime but
//! is kept stable for diffing.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::true_when,
};

const CONNECTED: &str = "(TopFlopCard - LowestFlopCard) <= 4 AND (TopFlopCard - LowestFlopCard) > 1";

fn dry_board() -> RuleBlock {
    RuleBlock::builder("f$DryBoard")
        .comment("A dry board has few draws and is disconnected")
        .when("FlushPossible", Action::return_false())
        .when("StraightPossible", Action::return_false())
        .when("nsuitedcommon >= 2", Action::return_false())
        .when(CONNECTED, Action::return_false())
        .when("PairOnBoard", Action::return_false())
        .otherwise(Action::return_true())
}

fn middle_card_board() -> RuleBlock {
    RuleBlock::builder("f$MiddleCardBoard")
        .comment("Neither high-card nor low-card: top card between nine and ten")
        .when("f$HighCardBoard", Action::return_false())
        .when("f$LowCardBoard", Action::return_false())
        .otherwise(Action::return_true())
}

fn semi_connected_board() -> RuleBlock {
    RuleBlock::builder("f$SemiConnectedBoard")
        .comment("Gapped but still within straight range")
        .when("f$ConnectedBoard", Action::return_false())
        .when("(TopFlopCard - LowestFlopCard) <= 6", Action::return_true())
        .when("TopFlopCard = ace AND LowestFlopCard <= 5", Action::return_true())
        .otherwise(Action::return_false())
}

fn static_board() -> RuleBlock {
    RuleBlock::builder("f$StaticBoard")
        .comment("Few turn cards change which hand is best")
        .when("f$DynamicBoard", Action::return_false())
        .when("f$DryBoard", Action::return_true())
        .when("PairOnBoard AND f$RainbowBoard", Action::return_true())
        .otherwise(Action::return_false())
}

fn caller_favorable_board() -> RuleBlock {
    RuleBlock::builder("f$CallerFavorableBoard")
        .comment("Low connected boards hit the preflop caller's range")
        .when("f$RaiserFavorableBoard", Action::return_false())
        .when("f$LowCardBoard AND f$ConnectedBoard", Action::return_true())
        .when("f$MiddleCardBoard AND f$TwoToneBoard AND f$SemiConnectedBoard", Action::return_true())
        .when("f$LowCardBoard AND f$TwoToneBoard", Action::return_true())
        .otherwise(Action::return_false())
}

fn linear_equity_board() -> RuleBlock {
    RuleBlock::builder("f$LinearEquityBoard")
        .comment("Equity spread evenly across many hands")
        .when("f$PolarizedEquityBoard", Action::return_false())
        .when("f$DynamicBoard", Action::return_true())
        .when("f$SemiConnectedBoard", Action::return_true())
        .otherwise(Action::return_false())
}

#[instrument(level = "trace", skip(_settings))]
pub fn build(_settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.comment("Board texture helper functions");

    script.push(dry_board());
    script.push(true_when(
        "f$WetBoard",
        "A wet board has many draws and connected cards",
        &["FlushPossible OR FlushDrawPossible", "StraightPossible", "OpenEndedStraightDrawPossibleOnFlop", CONNECTED],
    ));

    script.push(true_when("f$MonotoneBoard", "All three flop cards share a suit", &["nsuitedcommon >= 3"]));
    script.push(true_when("f$TwoToneBoard", "Exactly two flop cards share a suit", &["nsuitedcommon = 2"]));
    script.push(true_when("f$RainbowBoard", "Three different suits on the flop", &["nsuitedcommon <= 1"]));
    script.push(true_when("f$PairedBoard", "Detects if the flop is paired", &["PairOnBoard", "TripsOnBoard"]));

    script.push(true_when(
        "f$ConnectedBoard",
        "Three cards within a four-rank window",
        &["(TopFlopCard - LowestFlopCard) <= 4 AND NOT PairOnBoard", "StraightPossible"],
    ));
    script.push(semi_connected_board());

    script.push(true_when("f$HighCardBoard", "Top card jack or better", &["TopFlopCard >= jack"]));
    script.push(true_when("f$BroadwayBoard", "Every flop card ten or better", &["LowestFlopCard >= ten"]));
    script.push(true_when("f$LowCardBoard", "Top card eight or lower", &["TopFlopCard <= 8"]));
    script.push(middle_card_board());

    script.push(true_when(
        "f$DynamicBoard",
        "Many turn cards change which hand is best",
        &["f$WetBoard", "f$StraightDrawHeavyBoard", "f$FlushDrawHeavyBoard", "f$LowCardBoard AND f$ConnectedBoard"],
    ));
    script.push(static_board());

    script.push(true_when(
        "f$StraightDrawHeavyBoard",
        "Open-enders and gutshots are plentiful",
        &["StraightPossible", "OpenEndedStraightDrawPossibleOnFlop", "(TopFlopCard - LowestFlopCard) <= 4 AND NOT PairOnBoard"],
    ));
    script.push(true_when(
        "f$FlushDrawHeavyBoard",
        "Flush or flush draw available",
        &["FlushPossible", "FlushDrawPossible", "nsuitedcommon >= 2"],
    ));
    script.push(true_when(
        "f$LockedBoard",
        "The best hand is unlikely to change",
        &["TripsOnBoard", "f$PairedBoard AND f$RainbowBoard AND NOT f$ConnectedBoard"],
    ));

    script.push(true_when(
        "f$RaiserFavorableBoard",
        "High dry boards favour the preflop raiser's range",
        &["f$HighCardBoard AND f$DryBoard", "f$BroadwayBoard AND NOT f$MonotoneBoard", "f$PairedBoard AND TopFlopCard >= queen"],
    ));
    script.push(caller_favorable_board());

    script.push(true_when(
        "f$PolarizedEquityBoard",
        "Hands are either very strong or drawing thin",
        &["f$MonotoneBoard", "f$PairedBoard AND f$DryBoard"],
    ));
    script.push(linear_equity_board());

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
