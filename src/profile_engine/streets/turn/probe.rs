//! Turn bets as the preflop caller after the flop went check-check.

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

#[derive(Debug, Clone, PartialEq)]
pub struct ProbePlan {
    pub probe_freq: Number,
    pub ip_size: Sizing,
    pub oop_size: Sizing,
    pub probe: i64,
}

impl ProbePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let scale = postflop_scale(aggression_factor(settings)?);
        let probe_freq = settings.number(keys::TURN_PROBE_FREQ)?;
        Ok(ProbePlan {
            probe: scale_threshold(threshold(probe_freq.value()), scale),
            ip_size: settings.sizing(keys::IP_TURN_BET_SIZE)?,
            oop_size: settings.sizing(keys::OOP_TURN_BET_SIZE)?,
            probe_freq,
        })
    }
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = ProbePlan::from_settings(settings)?;
    let ip = bet(&plan.ip_size);
    let oop = bet(&plan.oop_size);

    let mut script = Script::new();
    script.comment("Probe betting and checking functions");

    script.push(
        RuleBlock::builder("f$TurnProbeAfterCheckedFlop")
            .comment(format!(
                "Probe betting when in position after a checked flop, default size: {}% of pot",
                plan.ip_size
            ))
            .blank()
            .comment("Always bet with made hands")
            .when("f$TurnValueHands", ip.clone())
            .blank()
            .comment("Probe with strong draws")
            .when("f$TurnStrongDraws", ip.clone())
            .blank()
            .comment("Opportunistic betting when checked to twice")
            .when(rank_at_most(plan.probe), ip)
            .blank()
            .comment("Default check back")
            .otherwise(Action::check()),
    );

    script.push(
        RuleBlock::builder("f$TurnOOPAfterCheckedFlop")
            .comment(format!("OOP lead betting after a checked flop, default size: {}% of pot", plan.oop_size))
            .blank()
            .comment("Only lead with strong hands")
            .when("f$TurnValueHands", oop.clone())
            .blank()
            .comment("Lead with some strong draws")
            .when(all_of(&["f$TurnStrongDraws", &rank_at_most(scale_threshold(plan.probe, 0.7))]), oop)
            .blank()
            .comment("Default check")
            .otherwise(Action::check()),
    );

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
