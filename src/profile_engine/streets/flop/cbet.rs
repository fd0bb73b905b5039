//! Continuation bets as the preflop raiser, in and out of position.
//!
//! Clause order inside each block: multiway gating, value hands, one clause
//! per board texture adjustment, the base threshold, then check. Out of
//! position every texture adjustment and both multiway thresholds are taken
//! at 80%.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{all_of, rank_at_most},
    keys,
    rules::{Action, RuleBlock, Script},
    settings::{Number, NumberKey, Settings, Sizing},
    streets::bet,
    threshold::{round_half_even, scale_threshold, threshold},
};

/// Texture adjustment keys and the predicate each one applies to, in clause order.
pub const TEXTURE_ADJUSTMENTS: [(NumberKey, &str, &str); 9] = [
    (keys::DRY_BOARD_ADJUST,       "f$DryBoard",       "Dry Board"),
    (keys::WET_BOARD_ADJUST,       "f$WetBoard",       "Wet Board"),
    (keys::MONOTONE_BOARD_ADJUST,  "f$MonotoneBoard",  "Monotone Board"),
    (keys::PAIRED_BOARD_ADJUST,    "f$PairedBoard",    "Paired Board"),
    (keys::CONNECTED_BOARD_ADJUST, "f$ConnectedBoard", "Connected Board"),
    (keys::HIGH_CARD_BOARD_ADJUST, "f$HighCardBoard",  "High Card Board"),
    (keys::LOW_CARD_BOARD_ADJUST,  "f$LowCardBoard",   "Low Card Board"),
    (keys::DYNAMIC_BOARD_ADJUST,   "f$DynamicBoard",   "Dynamic Board"),
    (keys::STATIC_BOARD_ADJUST,    "f$StaticBoard",    "Static Board"),
];

const OOP_DAMPING: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct TextureAdjustment {
    pub predicate: &'static str,
    pub label: &'static str,
    pub adjust: Number,
}

impl TextureAdjustment {
    /// `round(base * (1 + adjust * damping))`
    pub fn apply(&self, base: i64, damping: f64) -> i64 {
        round_half_even(base as f64 * (1.0 + self.adjust.fraction() * damping))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CbetPlan {
    pub ip_freq: Number,
    pub oop_freq: Number,
    pub ip_size: Sizing,
    pub oop_size: Sizing,
    pub multiway_freq: Number,
    pub multiway_value: Number,
    pub textures: Vec<TextureAdjustment>,

    pub ip: i64,
    pub oop: i64,
    pub multiway_cbet: i64,
    pub multiway_value_threshold: i64,
}

impl CbetPlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let ip_freq = settings.number(keys::IP_CBET_FREQ)?;
        let oop_freq = settings.number(keys::OOP_CBET_FREQ)?;
        let multiway_freq = settings.number(keys::MULTIWAY_CBET_FREQ)?;
        let multiway_value = settings.number(keys::MULTIWAY_VALUE_RANGE)?;

        let textures = TEXTURE_ADJUSTMENTS
            .iter()
            .map(|&(key, predicate, label)| {
                Ok(TextureAdjustment { predicate, label, adjust: settings.number(key)? })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CbetPlan {
            ip: threshold(ip_freq.value()),
            oop: threshold(oop_freq.value()),
            multiway_cbet: threshold(multiway_freq.value()),
            multiway_value_threshold: threshold(multiway_value.value()),
            ip_size: settings.sizing(keys::IP_CBET_SIZE)?,
            oop_size: settings.sizing(keys::OOP_CBET_SIZE)?,
            ip_freq,
            oop_freq,
            multiway_freq,
            multiway_value,
            textures,
        })
    }
}

struct Side<'a> {
    name: &'static str,
    size: &'a Sizing,
    base: i64,
    damping: f64,
    intro: &'static str,
    multiway_comment: &'static str,
    texture_comment: &'static str,
}

fn cbet_block(plan: &CbetPlan, side: Side<'_>) -> RuleBlock {
    const MULTIWAY: &str = "nopponentsplaying > 2";
    let action = bet(side.size);
    let value = scale_threshold(plan.multiway_value_threshold, side.damping);
    let draws = scale_threshold(plan.multiway_cbet, side.damping);

    let mut block = RuleBlock::builder(side.name)
        .comment(format!("{}, default size: {}% of pot", side.intro, side.size))
        .comment("Adjust based on board texture and player count")
        .blank()
        .comment(side.multiway_comment)
        .when(all_of(&[MULTIWAY, &rank_at_most(value)]), action.clone())
        .when(all_of(&[MULTIWAY, "f$FlopStrongDraws", &rank_at_most(draws)]), action.clone())
        .when(MULTIWAY, Action::check())
        .blank()
        .comment("Value hands always c-bet")
        .when("f$FlopValueHands", action.clone())
        .blank()
        .comment(side.texture_comment);

    for texture in &plan.textures {
        block = block.when(
            all_of(&[texture.predicate, &rank_at_most(texture.apply(side.base, side.damping))]),
            action.clone(),
        );
    }

    block
        .when(rank_at_most(side.base), action)
        .blank()
        .otherwise(Action::check())
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = CbetPlan::from_settings(settings)?;

    let mut script = Script::new();
    script.comment("C-Bet functions");
    script.push(cbet_block(
        &plan,
        Side {
            name: "f$FlopCbetIP",
            size: &plan.ip_size,
            base: plan.ip,
            damping: 1.0,
            intro: "C-Bet in position",
            multiway_comment: "Multiway pot considerations",
            texture_comment: "Board texture-based adjustments",
        },
    ));
    script.push(cbet_block(
        &plan,
        Side {
            name: "f$FlopCbetOOP",
            size: &plan.oop_size,
            base: plan.oop,
            damping: OOP_DAMPING,
            intro: "C-Bet out of position",
            multiway_comment: "Multiway pot considerations - even tighter",
            texture_comment: "Board texture-based adjustments - more conservative when OOP",
        },
    ));
    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}
