use tracing::{debug, instrument};

use crate::error::Result;
use crate::profile_engine::{
    models::Street,
    rules::Script,
    settings::Settings,
    streets,
};

/// Core dispatch: routes to the street's coordinator.
#[instrument(level = "debug", skip(settings))]
pub fn build_street(street: Street, settings: &Settings) -> Result<Script> {
    match street {
        Street::Preflop => streets::preflop::build(settings),
        Street::Flop    => streets::flop::build(settings),
        Street::Turn    => streets::turn::build(settings),
        Street::River   => streets::river::build(settings),
    }
}

/// Render one street's rule document.
pub fn generate_street(street: Street, settings: &Settings) -> Result<String> {
    let text = build_street(street, settings)?.render();
    debug!(%street, lines = text.lines().count(), "generated street profile");
    Ok(text)
}

pub fn generate_preflop(settings: &Settings) -> Result<String> {
    generate_street(Street::Preflop, settings)
}

pub fn generate_flop(settings: &Settings) -> Result<String> {
    generate_street(Street::Flop, settings)
}

pub fn generate_turn(settings: &Settings) -> Result<String> {
    generate_street(Street::Turn, settings)
}

pub fn generate_river(settings: &Settings) -> Result<String> {
    generate_street(Street::River, settings)
}

/// All four streets, preflop first, separated by one blank line.
pub fn generate_full_profile(settings: &Settings) -> Result<String> {
    let streets = Street::ALL
        .iter()
        .map(|&street| generate_street(street, settings))
        .collect::<Result<Vec<_>>>()?;
    let profile = streets.join("\n\n");
    debug!(lines = profile.lines().count(), "generated full profile");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_entry_points_agree_with_dispatch() {
        let settings = Settings::new();
        assert_eq!(generate_preflop(&settings).unwrap(), generate_street(Street::Preflop, &settings).unwrap());
        assert_eq!(generate_river(&settings).unwrap(), streets::river::generate(&settings).unwrap());
    }

    #[test]
    fn full_profile_joins_streets_in_order() {
        let settings = Settings::new();
        let full = generate_full_profile(&settings).unwrap();
        let expected = [
            generate_preflop(&settings).unwrap(),
            generate_flop(&settings).unwrap(),
            generate_turn(&settings).unwrap(),
            generate_river(&settings).unwrap(),
        ]
        .join("\n\n");
        assert_eq!(full, expected);
    }

    #[test]
    fn one_bad_street_fails_the_whole_profile() {
        let settings = Settings::new().with("donk_response", "Sometimes");
        assert!(generate_preflop(&settings).is_ok());
        assert!(generate_flop(&settings).is_err());
        assert!(generate_full_profile(&settings).is_err());
    }
}
