//! Rule generators grouped by street.
//!
//! Each street module exposes the same pair of entry points, and so does
//! every specialized generator inside it:
//!
//! ```ignore
//! pub fn build(settings: &Settings) -> Result<Script>
//! pub fn generate(settings: &Settings) -> Result<String>
//! ```
//!
//! The dispatcher in `generator.rs` picks the street; the street's `mod.rs`
//! lays out header, main function, specialized sections and footer.

/// Open-raise, 3-bet/4-bet, squeeze, push/fold
pub mod preflop;
/// C-bet, facing bets, board texture, hand categories
pub mod flop;
/// Second barrel, facing bets, probe, board texture, hand categories
pub mod turn;
/// Third barrel, facing bets, probe, board texture, hand categories
pub mod river;

use crate::profile_engine::{
    rules::{Action, RuleBlock},
    settings::Sizing,
};

/// Boolean helper that is true as soon as one condition holds.
pub(crate) fn true_when(name: &str, comment: &str, conditions: &[&str]) -> RuleBlock {
    conditions
        .iter()
        .fold(RuleBlock::builder(name).comment(comment), |block, condition| {
            block.when(*condition, Action::return_true())
        })
        .otherwise(Action::return_false())
}

/// Postflop bet or raise by a percentage of the pot.
pub(crate) fn bet(size: &Sizing) -> Action {
    Action::raise_by(size.raw())
}

/// Kicker check shared by every street's hand categories.
pub(crate) fn good_kicker() -> RuleBlock {
    true_when(
        "f$HaveGoodKicker",
        "Determines if we have a good kicker with our pair",
        &["HaveTopPair AND rankhiplayer >= queen", "HaveTopPair AND rankloplayer >= ten"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile_engine::rules::Script;

    #[test]
    fn true_when_lists_conditions_then_false() {
        let mut script = Script::new();
        script.push(true_when("f$PairedBoard", "Detects if the board is paired", &["PairOnBoard", "TripsOnBoard"]));
        assert_eq!(
            script.render(),
            "##f$PairedBoard##\n\
             // Detects if the board is paired\n\
             WHEN PairOnBoard RETURN true FORCE\n\
             WHEN TripsOnBoard RETURN true FORCE\n\
             WHEN Others RETURN false FORCE\n\n"
        );
    }

    #[test]
    fn bet_echoes_raw_sizing() {
        let size = Sizing::parse("ip_cbet_size", "66").unwrap();
        assert_eq!(bet(&size).as_str(), "RaiseBy 66%");
    }
}
