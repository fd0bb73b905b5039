//! Made-hand and bluff buckets for the river.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::{good_kicker, true_when},
};

#[instrument(level = "trace", skip(_settings))]
pub fn build(_settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.banner(["HAND CATEGORY HELPER FUNCTIONS FOR RIVER"]);

    script.push(true_when(
        "f$RiverValueHands",
        "Hands worth value betting on the river",
        &[
            "HaveStraightFlush",
            "HaveQuads",
            "HaveFullHouse",
            "HaveFlush",
            "HaveStraight",
            "HaveTrips",
            "HaveTwoPair AND HaveTopPair",
            "HaveOverPair",
            "HaveTopPair AND f$HaveGoodKicker",
            "HaveSecondTopPair AND f$HaveTopKicker",
        ],
    ));
    script.push(true_when(
        "f$RiverStrongHands",
        "Strong hands that can call a river bet",
        &[
            "HaveStraightFlush",
            "HaveQuads",
            "HaveFullHouse",
            "HaveFlush",
            "HaveStraight",
            "HaveTrips",
            "HaveTwoPair",
            "HaveOverPair",
            "HaveTopPair AND rankloplayer >= queen",
        ],
    ));
    script.push(true_when(
        "f$RiverNutHands",
        "Very strong hands that should be played aggressively",
        &[
            "HaveStraightFlush",
            "HaveQuads",
            "HaveFullHouse AND NOT TwoPairOnBoard",
            "HaveNutFlush",
            "HaveNutStraight",
            "HaveSet AND TwoPairOnBoard",
        ],
    ));

    script.push(
        RuleBlock::builder("f$RiverBluffCandidates")
            .comment("Hands suitable for bluffing on the river")
            .comment("Usually missed draws or blockers to strong hands")
            .when("f$HadFlushDrawOnTurn AND NOT HaveFlush", Action::return_true())
            .when("f$HadStraightDrawOnTurn AND NOT HaveStraight", Action::return_true())
            .when("TopPairKickerRank >= ace AND FlushPossible", Action::return_true())
            .when("Overcards = 2 AND f$DryBoard", Action::return_true())
            .when("f$HaveBlockersToNuts", Action::return_true())
            .otherwise(Action::return_false()),
    );
    script.push(
        RuleBlock::builder("f$RiverBluffRaiseHands")
            .comment("Hands suitable for bluff-raising on the river")
            .comment("Usually hands with blockers to nuts")
            .when("f$HaveBlockersToNuts", Action::return_true())
            .otherwise(Action::return_false()),
    );
    script.push(good_kicker());

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
