//! Every documented settings key and its default.
//!
//! Frequencies and ranges are percentages, adjustments are signed percentages,
//! sizings are decimal text. The push/fold table keys are derived from
//! [`push_fold_table`](crate::profile_engine::streets::preflop::push_fold_table).

use crate::error::Result;
use crate::profile_engine::{
    models::Position,
    settings::{Number, NumberKey, Settings, SizingKey, TextKey},
    streets::preflop::push_fold_table,
};

// ---------------------------------------------------------------------------
// Preflop
// ---------------------------------------------------------------------------

pub const NUM_PLAYERS: NumberKey = NumberKey::int("num_players", 9);
pub const GAME_TYPE: TextKey = TextKey::new("game_type", "Cash Game");
pub const AGGRESSION: NumberKey = NumberKey::int("aggression", 50);
pub const TIGHTNESS: NumberKey = NumberKey::int("tightness", 50);
pub const LIMP_FREQUENCY: NumberKey = NumberKey::int("limp_frequency", 30);
pub const THREEBET_FREQUENCY: NumberKey = NumberKey::int("threebet_frequency", 40);
pub const FOURBET_FREQUENCY: NumberKey = NumberKey::int("fourbet_frequency", 30);
pub const SQUEEZE_FREQUENCY: NumberKey = NumberKey::int("squeeze_frequency", 35);
pub const OPEN_RAISE_SIZE: SizingKey = SizingKey::new("open_raise_size", "2.5");

pub const CALL_3BET_RANGE: NumberKey = NumberKey::int("call_3bet_range", 15);
pub const FOURBET_RANGE: NumberKey = NumberKey::int("fourbet_range", 8);
pub const IP_3BET_ADJUST: NumberKey = NumberKey::int("ip_3bet_adjust", 20);
pub const VS_LP_3BET_ADJUST: NumberKey = NumberKey::int("vs_lp_3bet_adjust", 15);
pub const CALL_4BET_RANGE: NumberKey = NumberKey::int("call_4bet_range", 5);
pub const FIVEBET_RANGE: NumberKey = NumberKey::int("fivebet_range", 3);
pub const SHORT_STACK_4BET: NumberKey = NumberKey::int("short_stack_4bet", 30);

pub const SQUEEZE_1CALLER: NumberKey = NumberKey::int("squeeze_1caller", 12);
pub const SQUEEZE_MULTI: NumberKey = NumberKey::int("squeeze_multi", 8);
pub const SQUEEZE_SIZING: SizingKey = SizingKey::new("squeeze_sizing", "3.0");
pub const BLINDS_SQUEEZE: NumberKey = NumberKey::int("blinds_squeeze", 25);
pub const BTN_SQUEEZE: NumberKey = NumberKey::int("btn_squeeze", 20);

/// Open-raise range for one seat.
pub fn position_range(position: Position) -> NumberKey {
    match position {
        Position::EP1 => NumberKey::int("ep1_range", 10),
        Position::EP2 => NumberKey::int("ep2_range", 12),
        Position::EP3 => NumberKey::int("ep3_range", 14),
        Position::MP1 => NumberKey::int("mp1_range", 16),
        Position::MP2 => NumberKey::int("mp2_range", 18),
        Position::MP3 => NumberKey::int("mp3_range", 20),
        Position::CO  => NumberKey::int("co_range", 25),
        Position::BTN => NumberKey::int("btn_range", 30),
        Position::SB  => NumberKey::int("sb_range", 35),
        Position::BB  => NumberKey::int("bb_range", 40),
    }
}

/// Open-raise size for one seat, in big blinds.
pub fn position_sizing(position: Position) -> SizingKey {
    match position {
        Position::EP1 => SizingKey::new("ep1_sizing", "3.0"),
        Position::EP2 => SizingKey::new("ep2_sizing", "3.0"),
        Position::EP3 => SizingKey::new("ep3_sizing", "3.0"),
        Position::MP1 => SizingKey::new("mp1_sizing", "2.5"),
        Position::MP2 => SizingKey::new("mp2_sizing", "2.5"),
        Position::MP3 => SizingKey::new("mp3_sizing", "2.5"),
        Position::CO  => SizingKey::new("co_sizing", "2.5"),
        Position::BTN => SizingKey::new("btn_sizing", "2.5"),
        Position::SB  => SizingKey::new("sb_sizing", "2.5"),
        Position::BB  => SizingKey::new("bb_sizing", "3.0"),
    }
}

// ---------------------------------------------------------------------------
// Flop
// ---------------------------------------------------------------------------

pub const IP_CBET_FREQ: NumberKey = NumberKey::int("ip_cbet_freq", 70);
pub const OOP_CBET_FREQ: NumberKey = NumberKey::int("oop_cbet_freq", 60);
pub const IP_CBET_SIZE: SizingKey = SizingKey::new("ip_cbet_size", "50");
pub const OOP_CBET_SIZE: SizingKey = SizingKey::new("oop_cbet_size", "66");

pub const DRY_BOARD_ADJUST: NumberKey = NumberKey::int("dry_board_adjust", 20);
pub const WET_BOARD_ADJUST: NumberKey = NumberKey::int("wet_board_adjust", -20);
pub const MONOTONE_BOARD_ADJUST: NumberKey = NumberKey::int("monotone_board_adjust", -25);
pub const PAIRED_BOARD_ADJUST: NumberKey = NumberKey::int("paired_board_adjust", 15);
pub const CONNECTED_BOARD_ADJUST: NumberKey = NumberKey::int("connected_board_adjust", -15);
pub const HIGH_CARD_BOARD_ADJUST: NumberKey = NumberKey::int("high_card_board_adjust", 10);
pub const LOW_CARD_BOARD_ADJUST: NumberKey = NumberKey::int("low_card_board_adjust", -10);
pub const DYNAMIC_BOARD_ADJUST: NumberKey = NumberKey::int("dynamic_board_adjust", -10);
pub const STATIC_BOARD_ADJUST: NumberKey = NumberKey::int("static_board_adjust", 10);

pub const CHECKRAISE_DEFENSE: NumberKey = NumberKey::int("checkraise_defense", 35);
pub const DONK_RESPONSE: TextKey = TextKey::new("donk_response", "Call/Raise");
pub const VALUE_AGGRESSION: NumberKey = NumberKey::int("value_aggression", 80);
pub const DRAW_AGGRESSION: NumberKey = NumberKey::int("draw_aggression", 60);
pub const SEMIBLUFF_FREQ: NumberKey = NumberKey::int("semibluff_freq", 65);
pub const MULTIWAY_CBET_FREQ: NumberKey = NumberKey::int("multiway_cbet_freq", 40);
pub const MULTIWAY_VALUE_RANGE: NumberKey = NumberKey::int("multiway_value_range", 25);

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

pub const SECOND_BARREL_FREQ: NumberKey = NumberKey::int("second_barrel_freq", 60);
pub const DELAYED_CBET_FREQ: NumberKey = NumberKey::int("delayed_cbet_freq", 40);
pub const IP_TURN_BET_SIZE: SizingKey = SizingKey::new("ip_turn_bet_size", "66");
pub const OOP_TURN_BET_SIZE: SizingKey = SizingKey::new("oop_turn_bet_size", "75");
pub const TURN_CHECKRAISE_FREQ: NumberKey = NumberKey::int("turn_checkraise_freq", 25);
pub const TURN_FLOAT_FREQ: NumberKey = NumberKey::int("turn_float_freq", 30);
pub const TURN_PROBE_FREQ: NumberKey = NumberKey::int("turn_probe_freq", 35);
pub const TURN_FOLD_TO_CBET_FREQ: NumberKey = NumberKey::int("turn_fold_to_cbet_freq", 60);
pub const TURN_BLUFF_RAISE_FREQ: NumberKey = NumberKey::int("turn_bluff_raise_freq", 20);
pub const SCARE_CARD_ADJUST: NumberKey = NumberKey::int("scare_card_adjust", -15);
pub const DRAW_COMPLETE_ADJUST: NumberKey = NumberKey::int("draw_complete_adjust", 10);

// ---------------------------------------------------------------------------
// River
// ---------------------------------------------------------------------------

pub const THIRD_BARREL_FREQ: NumberKey = NumberKey::int("third_barrel_freq", 40);
pub const DELAYED_SECOND_BARREL_FREQ: NumberKey = NumberKey::int("delayed_second_barrel_freq", 30);
pub const IP_RIVER_BET_SIZE: SizingKey = SizingKey::new("ip_river_bet_size", "75");
pub const OOP_RIVER_BET_SIZE: SizingKey = SizingKey::new("oop_river_bet_size", "75");
pub const RIVER_CHECKRAISE_FREQ: NumberKey = NumberKey::int("river_checkraise_freq", 15);
pub const RIVER_FLOAT_FREQ: NumberKey = NumberKey::int("river_float_freq", 20);
pub const RIVER_PROBE_FREQ: NumberKey = NumberKey::int("river_probe_freq", 25);
pub const RIVER_FOLD_TO_BET_FREQ: NumberKey = NumberKey::int("river_fold_to_bet_freq", 70);
pub const RIVER_BLUFF_RAISE_FREQ: NumberKey = NumberKey::int("river_bluff_raise_freq", 10);
pub const RIVER_VALUE_RANGE: NumberKey = NumberKey::int("river_value_range", 60);
pub const RIVER_BLUFF_RANGE: NumberKey = NumberKey::int("river_bluff_range", 15);
pub const RIVER_CHECK_BEHIND_RANGE: NumberKey = NumberKey::int("river_check_behind_range", 80);
/// Older spelling of `river_check_behind_range`, read when the new key is absent.
pub const RIVER_CHECK_BEHIND_FREQ: &str = "river_check_behind_freq";

// ---------------------------------------------------------------------------
// Registries
// ---------------------------------------------------------------------------

pub const NUMBER_KEYS: &[NumberKey] = &[
    NUM_PLAYERS, AGGRESSION, TIGHTNESS, LIMP_FREQUENCY,
    THREEBET_FREQUENCY, FOURBET_FREQUENCY, SQUEEZE_FREQUENCY,
    CALL_3BET_RANGE, FOURBET_RANGE, IP_3BET_ADJUST, VS_LP_3BET_ADJUST,
    CALL_4BET_RANGE, FIVEBET_RANGE, SHORT_STACK_4BET,
    SQUEEZE_1CALLER, SQUEEZE_MULTI, BLINDS_SQUEEZE, BTN_SQUEEZE,
    IP_CBET_FREQ, OOP_CBET_FREQ,
    DRY_BOARD_ADJUST, WET_BOARD_ADJUST, MONOTONE_BOARD_ADJUST, PAIRED_BOARD_ADJUST,
    CONNECTED_BOARD_ADJUST, HIGH_CARD_BOARD_ADJUST, LOW_CARD_BOARD_ADJUST,
    DYNAMIC_BOARD_ADJUST, STATIC_BOARD_ADJUST,
    CHECKRAISE_DEFENSE, VALUE_AGGRESSION, DRAW_AGGRESSION, SEMIBLUFF_FREQ,
    MULTIWAY_CBET_FREQ, MULTIWAY_VALUE_RANGE,
    SECOND_BARREL_FREQ, DELAYED_CBET_FREQ, TURN_CHECKRAISE_FREQ, TURN_FLOAT_FREQ,
    TURN_PROBE_FREQ, TURN_FOLD_TO_CBET_FREQ, TURN_BLUFF_RAISE_FREQ,
    SCARE_CARD_ADJUST, DRAW_COMPLETE_ADJUST,
    THIRD_BARREL_FREQ, DELAYED_SECOND_BARREL_FREQ, RIVER_CHECKRAISE_FREQ,
    RIVER_FLOAT_FREQ, RIVER_PROBE_FREQ, RIVER_FOLD_TO_BET_FREQ, RIVER_BLUFF_RAISE_FREQ,
    RIVER_VALUE_RANGE, RIVER_BLUFF_RANGE, RIVER_CHECK_BEHIND_RANGE,
];

pub const SIZING_KEYS: &[SizingKey] = &[
    OPEN_RAISE_SIZE, SQUEEZE_SIZING,
    IP_CBET_SIZE, OOP_CBET_SIZE,
    IP_TURN_BET_SIZE, OOP_TURN_BET_SIZE,
    IP_RIVER_BET_SIZE, OOP_RIVER_BET_SIZE,
];

pub const TEXT_KEYS: &[TextKey] = &[GAME_TYPE, DONK_RESPONSE];

/// River check-behind range, under either of its names.
pub fn river_check_behind(settings: &Settings) -> Result<Number> {
    settings.number_layered(
        &[RIVER_CHECK_BEHIND_RANGE.name, RIVER_CHECK_BEHIND_FREQ],
        RIVER_CHECK_BEHIND_RANGE.default,
    )
}

/// A mapping holding every documented key at its default value.
pub fn documented_defaults() -> Settings {
    let mut settings = Settings::new();
    for key in NUMBER_KEYS {
        settings = settings.with(key.name, key.default);
    }
    for key in SIZING_KEYS {
        settings = settings.with(key.name, key.default);
    }
    for key in TEXT_KEYS {
        settings = settings.with(key.name, key.default);
    }
    for position in Position::ALL {
        let range = position_range(position);
        let sizing = position_sizing(position);
        settings = settings
            .with(range.name, range.default)
            .with(sizing.name, sizing.default);
    }
    for (name, value) in push_fold_table::default_entries() {
        settings = settings.with(&name, value);
    }
    settings
}
