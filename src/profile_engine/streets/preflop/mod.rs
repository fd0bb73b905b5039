//! Preflop document: header, the `f$preflop` dispatcher, then one section per
//! specialized generator.
//!
//! | Module              | Spots                                             |
//! |---------------------|---------------------------------------------------|
//! | [`open_raise`]      | unopened and limped pots                          |
//! | [`three_bet`]       | single raise, 3-bets, 4-bets, 5-bets              |
//! | [`squeeze`]         | raise plus callers, our open squeezed             |
//! | [`push_fold`]       | short-stack tournament play                       |
//! | [`push_fold_table`] | push and call percentages behind [`push_fold`]    |

pub mod open_raise;
pub mod push_fold;
pub mod push_fold_table;
pub mod squeeze;
pub mod three_bet;

use tracing::instrument;

use crate::error::{ProfileError, Result};
use crate::profile_engine::{
    helpers::{aggression_factor, decimal, raise_size},
    keys,
    models::{GameType, Position},
    rules::{Action, RuleBlock, Script},
    settings::Settings,
};

use self::{open_raise::OpenRaisePlan, squeeze::SqueezePlan, three_bet::ThreeBetPlan};

/// Wrapper that maps a `_Decision` block's 2/1/0 onto raise, call or fold.
pub(crate) fn decision_wrapper(name: &str, comment: &str, raise: Action) -> RuleBlock {
    RuleBlock::builder(name)
        .comment(comment)
        .when(format!("{name}_Decision = 2"), raise)
        .when(format!("{name}_Decision = 1"), Action::ret("Call"))
        .otherwise(Action::ret("Fold"))
}

/// `num_players`, checked against the seats a table can have.
pub fn table_size(settings: &Settings) -> Result<u32> {
    let n = settings.number(keys::NUM_PLAYERS)?;
    let v = n.value();
    if v.fract() == 0.0 && (2.0..=10.0).contains(&v) {
        Ok(v as u32)
    } else {
        Err(ProfileError::invalid(keys::NUM_PLAYERS.name, "a table size from 2 to 10", n))
    }
}

fn header(settings: &Settings) -> Result<Vec<String>> {
    let players = table_size(settings)?;
    let game_type: GameType = settings.parsed(keys::GAME_TYPE)?;
    let aggression = settings.number(keys::AGGRESSION)?;
    let af = aggression_factor(settings)?;
    let open_size = settings.sizing(keys::OPEN_RAISE_SIZE)?;

    let open = OpenRaisePlan::from_settings(settings)?;
    let three_bet = ThreeBetPlan::from_settings(settings)?;
    let squeeze = SqueezePlan::from_settings(settings)?;

    let mut lines = vec![
        "OpenHoldem Profile Generator - Preflop Profile".to_string(),
        format!("Generated for {players}-player {game_type}"),
        String::new(),
        "Strategy Settings:".to_string(),
        format!("- Aggression: {aggression}% (Factor: {af:.2}x)"),
        format!("- Tightness: {}%", settings.number(keys::TIGHTNESS)?),
        format!("- Limp Frequency: {}%", settings.number(keys::LIMP_FREQUENCY)?),
        format!(
            "- 3-Bet Frequency: {}% (Adjusted: {:.1}%)",
            three_bet.threebet_frequency,
            three_bet.threebet_frequency.value() * three_bet.threebet_adjustment
        ),
        format!(
            "- 4-Bet Frequency: {}% (Adjusted: {:.1}%)",
            three_bet.fourbet_frequency,
            three_bet.fourbet_frequency.value() * three_bet.fourbet_adjustment
        ),
        format!(
            "- Squeeze Frequency: {}% (Adjusted: {:.1}%)",
            squeeze.squeeze_frequency,
            squeeze.squeeze_frequency.value() * squeeze.squeeze_adjustment
        ),
        format!("- Open Raise Size: {open_size}x (Adjusted: {}x)", decimal(raise_size(&open_size, 0))),
        String::new(),
        "Position-Based Settings:".to_string(),
    ];

    for seat in &open.seats {
        lines.push(format!(
            "- {} Range: {}% (Threshold: {}), Sizing: {}BB",
            seat.position.label(),
            seat.range,
            seat.raise_threshold,
            decimal(seat.size)
        ));
    }
    lines.extend(squeeze.threshold_lines().map(|line| format!("- {line}")));

    lines.push(String::new());
    lines.push("Position Map for Table Size:".to_string());
    for position in Position::ALL {
        let state = if position.is_active(players) { "Active" } else { "Inactive" };
        lines.push(format!("- {position}: {state}"));
    }

    Ok(lines)
}

/// Scenario detection, first match wins.
fn main_function() -> RuleBlock {
    const SCENARIOS: [(&str, &str, &str); 12] = [
        ("Check for Push/Fold mode first", "f$InPushFoldMode", "f$PushFoldPreflop"),
        ("Open Raise or Open Limp", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 0 AND Calls = 0)", "f$OpenRaiseOrOpenLimp"),
        ("Limp or Isolate Limpers", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 0 AND Calls >= 1)", "f$LimpOrIsolateLimpers"),
        ("Three Bet or Cold Call", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 1 AND CallsSinceLastRaise = 0)", "f$ThreeBetColdCall"),
        ("Squeeze or Cold Call", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 1 AND CallsSinceLastRaise >= 1)", "f$SqueezeColdCall"),
        ("Facing 3-Bet Before First Action", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 2)", "f$Facing3BetBeforeFirstAction"),
        ("Facing 4-Bet Before First Action", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 3)", "f$Facing4BetBeforeFirstAction"),
        ("Facing 5-Bet Before First Action", "(BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 4)", "f$Facing5BetBeforeFirstAction"),
        ("Facing 3-Bet", "(BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 1 AND NumberOfRaisesBeforeFlop = 1 AND Calls = 0 AND RaisesSinceLastPlay = 1)", "f$Facing3Bet"),
        ("Facing Squeeze", "(BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 1 AND NumberOfRaisesBeforeFlop = 1 AND Calls >= 1 AND RaisesSinceLastPlay = 1)", "f$FacingSqueeze"),
        ("Facing 4-Bet", "(BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 1 AND NumberOfRaisesBeforeFlop = 2 AND RaisesSinceLastPlay = 1)", "f$Facing4Bet"),
        ("Facing 5-Bet", "(BotRaisedBeforeFlop AND BotsActionsOnThisRoundIncludingChecks = 2 AND NumberOfRaisesBeforeFlop = 2 AND RaisesSinceLastPlay = 1)", "f$Facing5Bet"),
    ];

    let mut block = RuleBlock::builder("f$preflop")
        .comment("Main preflop decision function that uses OpenPPL library functions")
        .comment("to detect scenarios and then calls our decision functions")
        .blank();
    for (comment, condition, target) in SCENARIOS {
        block = block.comment(comment).when(condition, Action::ret(target)).blank();
    }
    block
        .comment("Default action if no scenario is matched")
        .otherwise(Action::ret("Fold"))
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let mut script = Script::new();
    script.banner(header(settings)?);

    script.banner(["MAIN PREFLOP FUNCTION"]);
    script.push(main_function());

    script.banner(["PREFLOP SCENARIOS"]);
    script.append(open_raise::build(settings)?);
    script.append(three_bet::build(settings)?);
    script.append(squeeze::build(settings)?);
    script.append(push_fold::build(settings)?);

    script.footer("END OF PREFLOP PROFILE");
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
