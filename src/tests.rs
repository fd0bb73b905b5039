//! Cross-street tests for the `poker_profile_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Structure | Every block ends in `WHEN Others`, for defaults and random dials |
//! | Determinism | Same settings → byte-identical output |
//! | Thresholds | Header echoes agree with the rule bodies |
//! | Errors | Wrong value kinds name the key |
//! | Full profile | Street order and separators |

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ProfileError;
use crate::profile_engine::{
    build_street, generate_full_profile, generate_street, keys, scale_threshold, threshold,
    Settings, Street,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

/// Random but valid dials over every numeric key.
fn random_settings(seed: u64) -> Settings {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut settings = Settings::new();
    for key in keys::NUMBER_KEYS {
        let value: i64 = if key.name == keys::NUM_PLAYERS.name {
            rng.gen_range(2..=10)
        } else if key.name.ends_with("_adjust") {
            rng.gen_range(-30..=30)
        } else {
            rng.gen_range(0..=100)
        };
        settings = settings.with(key.name, value);
    }
    if rng.gen_bool(0.5) {
        settings = settings.with("game_type", "Tournament");
    }
    settings
}

/// Every `##name##` section closes with `WHEN Others`, except formula
/// sections (`f$IsolateSize`), which are expressions.
fn assert_blocks_closed(street: Street, settings: &Settings) {
    let script = build_street(street, settings).unwrap();
    let text = script.render();
    let formulas: Vec<String> = script.formulas().map(|f| format!("##{}##", f.name)).collect();

    let sections: Vec<&str> = text.split("\n##").skip(1).collect();
    for section in sections {
        let header = format!("##{}", section.lines().next().unwrap_or_default());
        if formulas.contains(&header) {
            assert!(!section.contains("WHEN Others"), "{street}: formula {header} has a fallback");
            continue;
        }
        let last = section.lines().filter(|l| l.starts_with("WHEN ")).last().unwrap_or_default();
        assert!(last.starts_with("WHEN Others "), "{street}: {header} is not a formula and does not close");
    }

    let fallbacks = text.lines().filter(|l| l.starts_with("WHEN Others ")).count();
    assert_eq!(script.blocks().count(), fallbacks, "{street}");
}

// ── structure ────────────────────────────────────────────────────────────────

#[test]
fn every_block_ends_with_a_fallback() {
    for street in Street::ALL {
        assert_blocks_closed(street, &Settings::new());
    }
}

#[test]
fn random_dials_keep_every_block_closed() {
    for seed in SEEDS {
        let settings = random_settings(seed);
        for street in Street::ALL {
            assert_blocks_closed(street, &settings);
        }
    }
}

#[test]
fn block_names_are_unique_per_street() {
    for street in Street::ALL {
        let script = build_street(street, &Settings::new()).unwrap();
        let mut names: Vec<&str> = script.blocks().map(|b| b.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "{street}: duplicate block");
    }
}

#[test]
fn each_street_defines_its_main_function_first() {
    for street in Street::ALL {
        let script = build_street(street, &Settings::new()).unwrap();
        let first = script.blocks().next().unwrap();
        assert_eq!(first.name(), street.main_function());
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_settings_produce_identical_text() {
    for seed in SEEDS {
        let settings = random_settings(seed);
        let a = generate_full_profile(&settings).unwrap();
        let b = generate_full_profile(&settings.clone()).unwrap();
        assert_eq!(a, b, "seed {seed}");
    }
}

#[test]
fn explicit_defaults_match_empty_settings() {
    let documented = keys::documented_defaults();
    for street in Street::ALL {
        assert_eq!(
            generate_street(street, &Settings::new()).unwrap(),
            generate_street(street, &documented).unwrap(),
            "{street}"
        );
    }
}

// ── thresholds ───────────────────────────────────────────────────────────────

#[test]
fn preflop_header_threshold_matches_range() {
    let text = generate_street(Street::Preflop, &Settings::new().with("co_range", 27)).unwrap();
    let expected = threshold(27.0);
    assert_eq!(expected, 46);
    assert!(text.contains(&format!("// - CO Range: 27% (Threshold: {expected})")));
}

#[test]
fn flop_multiway_value_precedes_heads_up_lines() {
    let text = generate_street(Street::Flop, &Settings::new()).unwrap();
    let block = text.split("##f$FlopCbetIP##").nth(1).unwrap();
    let multiway = block.find("WHEN nopponentsplaying > 2 AND handrank169 <= 43").unwrap();
    let heads_up = block.find("WHEN f$FlopValueHands").unwrap();
    assert!(multiway < heads_up);
}

fn early_one_bb_push(aggression: i64) -> String {
    let settings = Settings::new()
        .with("game_type", "Tournament")
        .with("push_1bb_ep", 75)
        .with("aggression", aggression);
    let script = build_street(Street::Preflop, &settings).unwrap();
    let block = script.find_block("f$PushFold_1BB").unwrap();
    let condition = block.clauses().next().unwrap().condition.clone();
    condition
}

#[test]
fn tournament_push_threshold_scales_with_aggression() {
    // 75% × 0.8 = 60% → 102; 75% → 127; 75% × 1.2 = 90% → 152
    assert!(early_one_bb_push(25).ends_with("handrank169 <= 102"));
    assert!(early_one_bb_push(50).ends_with("handrank169 <= 127"));
    assert!(early_one_bb_push(75).ends_with("handrank169 <= 152"));
    assert_eq!(threshold(75.0), 127);
}

#[test]
fn scaled_thresholds_round_half_to_even() {
    assert_eq!(scale_threshold(5, 0.5), 2);
    assert_eq!(scale_threshold(7, 0.5), 4);
    assert_eq!(threshold(0.0), 1);
    assert_eq!(threshold(100.0), 169);
}

// ── errors ───────────────────────────────────────────────────────────────────

#[test]
fn wrong_kind_of_value_names_the_key() {
    let settings = Settings::new().with("third_barrel_freq", "often");
    match generate_street(Street::River, &settings) {
        Err(ProfileError::InvalidValue { key, .. }) => assert_eq!(key, "third_barrel_freq"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
    // Other streets never read the key.
    assert!(generate_street(Street::Turn, &settings).is_ok());
}

#[test]
fn unknown_keys_are_ignored() {
    let settings = Settings::new().with("favourite_colour", "green");
    assert_eq!(
        generate_full_profile(&settings).unwrap(),
        generate_full_profile(&Settings::new()).unwrap()
    );
}

// ── full profile ─────────────────────────────────────────────────────────────

#[test]
fn full_profile_keeps_street_order() {
    let text = generate_full_profile(&Settings::new()).unwrap();
    let positions: Vec<usize> = ["##f$preflop##", "##f$flop##", "##f$turn##", "##f$river##"]
        .iter()
        .map(|name| text.find(name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("// END OF FLOP PROFILE\n//\n//*****************************************************************************\n\n//****"));
    assert!(text.ends_with("// END OF RIVER PROFILE\n//\n//*****************************************************************************"));
}
