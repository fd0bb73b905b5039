//! Squeeze spots: a raise and at least one caller in front of us, and the
//! reverse spot where our open gets squeezed.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{aggression_adjustment, aggression_factor, all_of, decimal, rank_at_most, raise_size, BLINDS},
    keys,
    rules::{Action, RuleBlock, Script},
    settings::{Number, Settings, Sizing},
    streets::preflop::decision_wrapper,
    threshold::{scale_threshold, threshold},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SqueezePlan {
    pub squeeze_frequency: Number,
    pub squeeze_adjustment: f64,
    pub one_caller_range: Number,
    pub multi_caller_range: Number,
    pub sizing: Sizing,
    pub button_adjust: Number,
    pub blinds_adjust: Number,

    pub squeeze: i64,
    pub one_caller: i64,
    pub multi_caller: i64,
    pub tight: i64,
    /// Squeeze size in big blinds.
    pub size: f64,
}

impl SqueezePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let af = aggression_factor(settings)?;
        let squeeze_frequency = settings.number(keys::SQUEEZE_FREQUENCY)?;
        let squeeze_adjustment = aggression_adjustment(af, 0.7);
        let one_caller_range = settings.number(keys::SQUEEZE_1CALLER)?;
        let multi_caller_range = settings.number(keys::SQUEEZE_MULTI)?;
        let sizing = settings.sizing(keys::SQUEEZE_SIZING)?;

        Ok(SqueezePlan {
            squeeze: threshold(squeeze_frequency.value() * squeeze_adjustment),
            one_caller: threshold(one_caller_range.value()),
            multi_caller: threshold(multi_caller_range.value()),
            tight: threshold(settings.percent(keys::TIGHTNESS)?),
            size: raise_size(&sizing, 0),
            squeeze_frequency,
            squeeze_adjustment,
            one_caller_range,
            multi_caller_range,
            sizing,
            button_adjust: settings.number(keys::BTN_SQUEEZE)?,
            blinds_adjust: settings.number(keys::BLINDS_SQUEEZE)?,
        })
    }

    /// Header lines shared with the preflop document header.
    pub fn threshold_lines(&self) -> [String; 2] {
        [
            format!("Squeeze vs 1 Caller: {}% (Threshold: {})", self.one_caller_range, self.one_caller),
            format!("Squeeze vs 2+ Callers: {}% (Threshold: {})", self.multi_caller_range, self.multi_caller),
        ]
    }
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = SqueezePlan::from_settings(settings)?;
    let button = 1.0 + plan.button_adjust.fraction();
    let blinds = 1.0 + plan.blinds_adjust.fraction();
    let size = decimal(plan.size);

    let mut script = Script::new();
    script.banner([
        "SQUEEZE STRATEGY".to_string(),
        String::new(),
        format!(
            "Squeeze Frequency: {}% (Adjusted: {:.1}%)",
            plan.squeeze_frequency,
            plan.squeeze_frequency.value() * plan.squeeze_adjustment
        ),
        format!("Squeeze vs 1 Caller: {}% (Threshold: {})", plan.one_caller_range, plan.one_caller),
        format!("Squeeze vs Multiple Callers: {}% (Threshold: {})", plan.multi_caller_range, plan.multi_caller),
        format!("Squeeze Sizing: {}x (Adjusted: {size}x)", plan.sizing),
        format!("Button Squeeze Adjust: +{}%", plan.button_adjust),
        format!("Blinds Squeeze Adjust: +{}%", plan.blinds_adjust),
    ]);

    script.push(decision_wrapper(
        "f$SqueezeColdCall",
        "1 Raise before Hero first action and 1 or more villains calls. Hero can Squeeze, ColdCall or Fold",
        Action::ret(format!("{size} * pot")),
    ));

    let one = "CallsSinceLastRaise = 1";
    let two = "CallsSinceLastRaise = 2";
    let many = "CallsSinceLastRaise >= 3";
    script.push(
        RuleBlock::builder("f$SqueezeColdCall_Decision")
            .comment("0 = Fold, 1 = Call, 2 = Squeeze")
            .comment("Tighter squeeze range with more players in the pot")
            .when(all_of(&[one, &rank_at_most(plan.one_caller)]), Action::ret(2))
            .when(all_of(&[one, &rank_at_most(scale_threshold(plan.tight, 0.7))]), Action::ret(1))
            .blank()
            .when(all_of(&[two, &rank_at_most(plan.multi_caller)]), Action::ret(2))
            .when(all_of(&[two, &rank_at_most(scale_threshold(plan.tight, 0.65))]), Action::ret(1))
            .blank()
            .when(all_of(&[many, &rank_at_most(scale_threshold(plan.multi_caller, 0.8))]), Action::ret(2))
            .when(all_of(&[many, &rank_at_most(scale_threshold(plan.tight, 0.6))]), Action::ret(1))
            .blank()
            .comment("Position-based adjustments")
            .when(all_of(&["(InButton)", &rank_at_most(scale_threshold(plan.one_caller, button))]), Action::ret(2))
            .when(all_of(&[BLINDS, &rank_at_most(scale_threshold(plan.one_caller, blinds))]), Action::ret(2))
            .blank()
            .otherwise(Action::ret(0)),
    );

    script.push(decision_wrapper(
        "f$FacingSqueeze",
        "Hero is the Original Raiser and Facing Squeeze by an opponent. Hero can 4Bet, Call or Fold",
        Action::ret("RaisePot"),
    ));
    script.push(
        RuleBlock::builder("f$FacingSqueeze_Decision")
            .comment("0 = Fold, 1 = Call, 2 = 4-Bet")
            .comment("Generally tighter than regular 3-bet defense")
            .when(rank_at_most(scale_threshold(plan.squeeze, 0.5)), Action::ret(2))
            .when(rank_at_most(scale_threshold(plan.tight, 0.55)), Action::ret(1))
            .blank()
            .comment("Adjust based on number of callers between raise and squeeze")
            .when(all_of(&[one, &rank_at_most(scale_threshold(plan.squeeze, 0.55))]), Action::ret(2))
            .when(all_of(&["CallsSinceLastRaise >= 2", &rank_at_most(scale_threshold(plan.squeeze, 0.45))]), Action::ret(2))
            .blank()
            .otherwise(Action::ret(0)),
    );

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
