use std::fmt;
use std::str::FromStr;

use crate::error::ProfileError;

// ---------------------------------------------------------------------------
// Streets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Name of the street's main decision function in the rule language.
    pub fn main_function(self) -> &'static str {
        match self {
            Street::Preflop => "f$preflop",
            Street::Flop    => "f$flop",
            Street::Turn    => "f$turn",
            Street::River   => "f$river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop    => write!(f, "Flop"),
            Street::Turn    => write!(f, "Turn"),
            Street::River   => write!(f, "River"),
        }
    }
}

impl FromStr for Street {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preflop" => Ok(Street::Preflop),
            "flop"    => Ok(Street::Flop),
            "turn"    => Ok(Street::Turn),
            "river"   => Ok(Street::River),
            _ => Err(ProfileError::invalid("street", "preflop, flop, turn or river", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Table / game metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    CashGame,
    Tournament,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::CashGame => write!(f, "Cash Game"),
            GameType::Tournament => write!(f, "Tournament"),
        }
    }
}

impl FromStr for GameType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash Game" => Ok(GameType::CashGame),
            "Tournament" => Ok(GameType::Tournament),
            _ => Err(ProfileError::invalid("game_type", "\"Cash Game\" or \"Tournament\"", s)),
        }
    }
}

/// The ten preflop seats the open-raise ladder is keyed on, earliest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    EP1,
    EP2,
    EP3,
    MP1,
    MP2,
    MP3,
    CO,
    BTN,
    SB,
    BB,
}

impl Position {
    pub const ALL: [Position; 10] = [
        Position::EP1, Position::EP2, Position::EP3,
        Position::MP1, Position::MP2, Position::MP3,
        Position::CO, Position::BTN, Position::SB, Position::BB,
    ];

    /// Coarse group key (`ep_range`, `lp_sizing`) used when a per-seat key is absent.
    pub fn group_key(self) -> Option<&'static str> {
        match self {
            Position::EP1 | Position::EP2 | Position::EP3 => Some("ep"),
            Position::MP1 | Position::MP2 | Position::MP3 => Some("mp"),
            Position::CO | Position::BTN                  => Some("lp"),
            Position::SB | Position::BB                   => None,
        }
    }

    /// Header label, with the seat's common nickname where it has one.
    pub fn label(self) -> &'static str {
        match self {
            Position::EP1 => "EP1 (UTG)",
            Position::EP2 => "EP2 (UTG+1)",
            Position::EP3 => "EP3 (UTG+2)",
            Position::MP1 => "MP1",
            Position::MP2 => "MP2",
            Position::MP3 => "MP3 (HJ)",
            Position::CO  => "CO",
            Position::BTN => "BTN",
            Position::SB  => "SB",
            Position::BB  => "BB",
        }
    }

    /// Runtime predicate that is true when the bot sits in this seat.
    pub fn predicate(self) -> &'static str {
        match self {
            Position::EP1 => "InEarlyPosition1",
            Position::EP2 => "InEarlyPosition2",
            Position::EP3 => "InEarlyPosition3",
            Position::MP1 => "InMiddlePosition1",
            Position::MP2 => "InMiddlePosition2",
            Position::MP3 => "InMiddlePosition3",
            Position::CO  => "InCutOff",
            Position::BTN => "InButton",
            Position::SB  => "InSmallBlind",
            Position::BB  => "InBigBlind",
        }
    }

    /// Share of the tightness range an open-limp may use from this seat.
    /// `None` for the big blind, which never limps.
    pub fn limp_multiplier(self) -> Option<f64> {
        match self {
            Position::EP1 | Position::EP2 | Position::EP3 => Some(0.7),
            Position::MP1 | Position::MP2 | Position::MP3 => Some(0.85),
            Position::CO | Position::BTN                  => Some(1.0),
            Position::SB                                  => Some(0.9),
            Position::BB                                  => None,
        }
    }

    /// Smallest table size at which this seat is dealt in.
    pub fn min_players(self) -> u32 {
        match self {
            Position::EP1 | Position::EP2 => 9,
            Position::EP3 => 8,
            Position::MP1 => 7,
            Position::MP2 => 6,
            Position::MP3 => 5,
            Position::CO  => 4,
            Position::BTN => 3,
            Position::SB | Position::BB => 2,
        }
    }

    pub fn is_active(self, num_players: u32) -> bool {
        num_players >= self.min_players()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::EP1 => write!(f, "EP1"),
            Position::EP2 => write!(f, "EP2"),
            Position::EP3 => write!(f, "EP3"),
            Position::MP1 => write!(f, "MP1"),
            Position::MP2 => write!(f, "MP2"),
            Position::MP3 => write!(f, "MP3"),
            Position::CO  => write!(f, "CO"),
            Position::BTN => write!(f, "BTN"),
            Position::SB  => write!(f, "SB"),
            Position::BB  => write!(f, "BB"),
        }
    }
}

// ---------------------------------------------------------------------------
// Postflop styles
// ---------------------------------------------------------------------------

/// How the bot answers a donk bet into its flop c-bet opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonkResponse {
    FoldCall,
    CallRaise,
    Aggressive,
}

impl fmt::Display for DonkResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DonkResponse::FoldCall   => write!(f, "Fold/Call"),
            DonkResponse::CallRaise  => write!(f, "Call/Raise"),
            DonkResponse::Aggressive => write!(f, "Aggressive"),
        }
    }
}

impl FromStr for DonkResponse {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fold/Call"  => Ok(DonkResponse::FoldCall),
            "Call/Raise" => Ok(DonkResponse::CallRaise),
            "Aggressive" => Ok(DonkResponse::Aggressive),
            _ => Err(ProfileError::invalid(
                "donk_response",
                "\"Fold/Call\", \"Call/Raise\" or \"Aggressive\"",
                s,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_parses_case_insensitively() {
        assert_eq!("Flop".parse::<Street>().ok(), Some(Street::Flop));
        assert_eq!(" river ".parse::<Street>().ok(), Some(Street::River));
        assert!("showdown".parse::<Street>().is_err());
    }

    #[test]
    fn blinds_are_always_dealt_in() {
        for n in 2..=10 {
            assert!(Position::SB.is_active(n));
            assert!(Position::BB.is_active(n));
        }
    }

    #[test]
    fn nine_handed_table_activates_every_seat() {
        assert!(Position::ALL.iter().all(|p| p.is_active(9)));
        assert!(!Position::EP3.is_active(7));
        assert!(Position::MP1.is_active(7));
    }

    #[test]
    fn donk_response_round_trips_through_display() {
        for style in [DonkResponse::FoldCall, DonkResponse::CallRaise, DonkResponse::Aggressive] {
            assert_eq!(style.to_string().parse::<DonkResponse>().ok(), Some(style));
        }
        assert!("Raise/Fold".parse::<DonkResponse>().is_err());
    }
}
