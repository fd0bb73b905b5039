//! Made-hand and draw buckets for the turn.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    rules::Script,
    settings::Settings,
    streets::{good_kicker, true_when},
};

#[instrument(level = "trace", skip(_settings))]
pub fn build(_settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.banner(["HAND CATEGORY HELPER FUNCTIONS FOR TURN"]);

    script.push(true_when(
        "f$TurnValueHands",
        "Hands worth value betting on the turn",
        &[
            "HaveStraightFlush",
            "HaveQuads",
            "HaveFullHouse",
            "HaveFlush",
            "HaveStraight",
            "HaveTrips",
            "HaveTwoPair",
            "HaveOverPair",
            "HaveTopPair AND f$HaveGoodKicker",
        ],
    ));
    script.push(true_when(
        "f$TurnStrongHands",
        "Very strong hands that should be played aggressively",
        &[
            "HaveStraightFlush",
            "HaveQuads",
            "HaveFullHouse",
            "HaveFlush",
            "HaveStraight",
            "HaveSet",
            "HaveTwoPair AND HaveTopPair",
            "HaveOverPair AND rankhiplayer >= queen",
        ],
    ));
    script.push(true_when(
        "f$TurnStrongDraws",
        "Strong drawing hands on the turn",
        &[
            "HaveFlushDraw AND HaveStraightDraw",
            "HaveNutFlushDraw",
            "HaveNutStraightDraw",
            "HaveFlushDraw AND Overcards >= 1",
            "HaveOpenEndedStraightDraw",
        ],
    ));
    script.push(true_when(
        "f$TurnSemiBluffHands",
        "Hands suitable for semi-bluffing on the turn",
        &["HaveFlushDraw OR HaveOpenEndedStraightDraw", "Overcards = 2 AND f$WetBoard"],
    ));
    script.push(good_kicker());

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_flush_leads_both_made_hand_lists() {
        let script = build(&Settings::new()).unwrap();
        for name in ["f$TurnValueHands", "f$TurnStrongHands"] {
            let first = script.find_block(name).unwrap().clauses().next().unwrap();
            assert_eq!(first.condition, "HaveStraightFlush");
        }
        assert!(script.find_block("f$HaveGoodKicker").is_some());
    }

    #[test]
    fn banner_names_the_street() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains("// HAND CATEGORY HELPER FUNCTIONS FOR TURN\n"));
    }
}
