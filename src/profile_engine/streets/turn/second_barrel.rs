//! Turn bets as the preflop raiser: second barrel, delayed c-bet, and the
//! follow-up when the flop bet was checked to us.
//!
//! Base thresholds are scaled by the postflop aggression scale. Scare-card and
//! draw-complete adjustments then move them; the delayed c-bet takes only 80%
//! of each adjustment.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{aggression_factor, all_of, postflop_scale, rank_at_most},
    keys,
    rules::{Action, RuleBlock, Script},
    settings::{Number, Settings, Sizing},
    streets::bet,
    threshold::{scale_threshold, threshold},
};

const DELAYED_DAMPING: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct BarrelPlan {
    pub second_barrel_freq: Number,
    pub delayed_cbet_freq: Number,
    pub ip_size: Sizing,
    pub scare_card_adjust: Number,
    pub draw_complete_adjust: Number,

    pub second_barrel: i64,
    pub delayed_cbet: i64,
}

impl BarrelPlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let second_barrel_freq = settings.number(keys::SECOND_BARREL_FREQ)?;
        let delayed_cbet_freq = settings.number(keys::DELAYED_CBET_FREQ)?;

        Ok(BarrelPlan {
            second_barrel: scale_threshold(threshold(second_barrel_freq.value()), scale),
            delayed_cbet: scale_threshold(threshold(delayed_cbet_freq.value()), scale),
            ip_size: settings.sizing(keys::IP_TURN_BET_SIZE)?,
            scare_card_adjust: settings.number(keys::SCARE_CARD_ADJUST)?,
            draw_complete_adjust: settings.number(keys::DRAW_COMPLETE_ADJUST)?,
            second_barrel_freq,
            delayed_cbet_freq,
        })
    }

    /// `round(base * (1 + adjust * damping))`
    fn adjusted(base: i64, adjust: Number, damping: f64) -> i64 {
        scale_threshold(base, 1.0 + adjust.fraction() * damping)
    }

    pub fn scare_card(&self, base: i64, damping: f64) -> i64 {
        Self::adjusted(base, self.scare_card_adjust, damping)
    }

    pub fn draw_complete(&self, base: i64, damping: f64) -> i64 {
        Self::adjusted(base, self.draw_complete_adjust, damping)
    }
}

fn second_barrel(plan: &BarrelPlan) -> RuleBlock {
    let size = bet(&plan.ip_size);
    let base = plan.second_barrel;
    RuleBlock::builder("f$TurnSecondBarrel")
        .comment(format!("Second barrel after betting the flop, default size: {}% of pot", plan.ip_size))
        .comment("Adjust based on board texture and previous actions")
        .blank()
        .comment("Always continue with made hands")
        .when("f$TurnValueHands", size.clone())
        .blank()
        .comment("Continue with strong draws")
        .when("f$TurnStrongDraws", size.clone())
        .blank()
        .comment("Board texture-based adjustments")
        .when(all_of(&["f$ScareCard", &rank_at_most(plan.scare_card(base, 1.0))]), size.clone())
        .when(all_of(&["f$DrawComplete", &rank_at_most(plan.draw_complete(base, 1.0))]), size.clone())
        .when(all_of(&["f$WetBoard", &rank_at_most(scale_threshold(base, 0.9))]), size.clone())
        .when(all_of(&["f$DryBoard", &rank_at_most(scale_threshold(base, 1.1))]), size.clone())
        .when(rank_at_most(base), size)
        .blank()
        .comment("Default check")
        .otherwise(Action::check())
}

fn delayed_cbet(plan: &BarrelPlan) -> RuleBlock {
    let size = bet(&plan.ip_size);
    let base = plan.delayed_cbet;
    RuleBlock::builder("f$TurnDelayedCbet")
        .comment(format!("Delayed c-bet after checking the flop, default size: {}% of pot", plan.ip_size))
        .comment("Generally more selective than a second barrel")
        .blank()
        .comment("Always bet with made hands")
        .when("f$TurnValueHands", size.clone())
        .blank()
        .comment("Continue with strong draws on appropriate boards")
        .when("f$TurnStrongDraws AND f$WetBoard", size.clone())
        .blank()
        .comment("Board texture-based adjustments")
        .when(all_of(&["f$ScareCard", &rank_at_most(plan.scare_card(base, DELAYED_DAMPING))]), size.clone())
        .when(
            all_of(&["f$DrawComplete", &rank_at_most(plan.draw_complete(base, DELAYED_DAMPING))]),
            size.clone(),
        )
        .when(all_of(&["f$DryBoard", &rank_at_most(scale_threshold(base, 1.1))]), size.clone())
        .when(rank_at_most(base), size)
        .blank()
        .comment("Default check")
        .otherwise(Action::check())
}

fn continuation_after_flop_bet(plan: &BarrelPlan) -> RuleBlock {
    let size = bet(&plan.ip_size);
    let base = plan.second_barrel;
    RuleBlock::builder("f$TurnContinuationAfterFlopBet")
        .comment(format!(
            "In position facing a check after we bet the flop, default size: {}% of pot",
            plan.ip_size
        ))
        .blank()
        .comment("Continue betting with value hands")
        .when("f$TurnValueHands", size.clone())
        .blank()
        .comment("Be selective with semi-bluffs")
        .when(all_of(&["f$TurnStrongDraws", &rank_at_most(scale_threshold(base, 0.8))]), size.clone())
        .blank()
        .comment("Board texture-based continuation")
        .when(all_of(&["f$DryBoard", &rank_at_most(scale_threshold(base, 0.9))]), size.clone())
        .when(rank_at_most(scale_threshold(base, 0.7)), size)
        .blank()
        .comment("Default check back")
        .otherwise(Action::check())
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = BarrelPlan::from_settings(settings)?;

    let mut script = Script::new();
    script.comment("Second Barrel and Delayed C-bet functions");
    script.push(second_barrel(&plan));
    script.push(delayed_cbet(&plan));
    script.push(continuation_after_flop_bet(&plan));
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(settings: &Settings, name: &str) -> Vec<String> {
        build(settings)
            .unwrap()
            .find_block(name)
            .unwrap()
            .clauses()
            .map(|c| c.condition.clone())
            .collect()
    }

    #[test]
    fn default_barrel_thresholds() {
        let plan = BarrelPlan::from_settings(&Settings::new()).unwrap();
        // 60% → 101.8 → 102, 40% → 68.2 → 68; scale is 0.8 at aggression 50
        assert_eq!(plan.second_barrel, 82);
        assert_eq!(plan.delayed_cbet, 54);
    }

    #[test]
    fn second_barrel_texture_clauses() {
        assert_eq!(
            conditions(&Settings::new(), "f$TurnSecondBarrel"),
            [
                "f$TurnValueHands",
                "f$TurnStrongDraws",
                "f$ScareCard AND handrank169 <= 70",
                "f$DrawComplete AND handrank169 <= 90",
                "f$WetBoard AND handrank169 <= 74",
                "f$DryBoard AND handrank169 <= 90",
                "handrank169 <= 82",
            ]
        );
    }

    #[test]
    fn delayed_cbet_damps_the_adjustments() {
        let conds = conditions(&Settings::new(), "f$TurnDelayedCbet");
        // 54 * (1 - 0.12) = 47.52, 54 * 1.08 = 58.32
        assert_eq!(conds[2], "f$ScareCard AND handrank169 <= 48");
        assert_eq!(conds[3], "f$DrawComplete AND handrank169 <= 58");
    }

    #[test]
    fn higher_aggression_tightens_barrels() {
        let plan = BarrelPlan::from_settings(&Settings::new().with("aggression", 100)).unwrap();
        // scale 0.4
        assert_eq!(plan.second_barrel, 41);
    }

    #[test]
    fn bets_use_the_in_position_size() {
        let text = generate(&Settings::new().with("ip_turn_bet_size", "80")).unwrap();
        assert!(text.starts_with("// Second Barrel and Delayed C-bet functions\n\n##f$TurnSecondBarrel##\n"));
        assert!(text.contains("// Second barrel after betting the flop, default size: 80% of pot\n"));
        assert!(text.contains("WHEN f$TurnValueHands RaiseBy 80% FORCE\n"));
    }
}
