//! Made-hand and draw buckets the flop blocks branch on.

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
    script.banner(["HAND CATEGORY HELPER FUNCTIONS"]);

    script.push(true_when(
        "f$FlopValueHands",
        "Hands worth value betting on the flop",
        &[
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
        "f$FlopStrongHands",
        "Very strong hands that should be played aggressively",
        &[
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
        "f$FlopDrawHands",
        "Hands with significant drawing potential",
        &[
            "HaveFlushDraw",
            "HaveStraightDraw",
            "HaveOpenEndedStraightDraw",
            "HaveInsideStraightDraw AND Overcards >= 1",
        ],
    ));
    script.push(true_when(
        "f$FlopStrongDraws",
        "Strong drawing hands worth semi-bluffing",
        &[
            "HaveFlushDraw AND Overcards >= 1",
            "HaveOpenEndedStraightDraw AND Overcards >= 1",
            "HaveFlushDraw AND HaveStraightDraw",
        ],
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
    fn categories_in_order() {
        let script = build(&Settings::new()).unwrap();
        let names: Vec<&str> = script.blocks().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["f$FlopValueHands", "f$FlopStrongHands", "f$FlopDrawHands", "f$FlopStrongDraws", "f$HaveGoodKicker"]
        );
    }

    #[test]
    fn top_pair_needs_a_kicker_to_count_as_value() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.starts_with("//*****"));
        assert!(text.contains(
            "WHEN HaveOverPair RETURN true FORCE\n\
             WHEN HaveTopPair AND f$HaveGoodKicker RETURN true FORCE\n\
             WHEN Others RETURN false FORCE\n\n"
        ));
    }
}
