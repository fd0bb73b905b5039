//! Short-stack push and call ranges as plain data.
//!
//! Two tables, both in percent of hands:
//!
//! | Table | Rows                         | Columns                       | Key                        |
//! |-------|------------------------------|-------------------------------|----------------------------|
//! | push  | 13 [`StackBucket`]s          | 6 [`PushSeat`]s               | `push_<bucket>_<seat>`     |
//! | call  | 8 [`CallBucket`]s            | 5 [`RaiserSeat`]s             | `call_<bucket>_vs_<seat>`  |
//!
//! Call buckets are coarser than push buckets; [`StackBucket::call_bucket`]
//! is the one place the two ladders meet.

use crate::error::Result;
use crate::profile_engine::{
    helpers::aggression_factor,
    settings::{Number, Settings},
    threshold::{round_half_even, threshold},
};

const PUSH_CLAMP: i64 = 98;
const CALL_CLAMP: i64 = 95;

// ---------------------------------------------------------------------------
// Stack depth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackBucket {
    Bb1,
    Bb2,
    Bb3,
    Bb4,
    Bb5,
    Bb6,
    Bb7,
    Bb8,
    Bb9,
    Bb10,
    Bb10To15,
    Bb15To20,
    Bb20To25,
}

impl StackBucket {
    pub const ALL: [StackBucket; 13] = [
        StackBucket::Bb1, StackBucket::Bb2, StackBucket::Bb3, StackBucket::Bb4,
        StackBucket::Bb5, StackBucket::Bb6, StackBucket::Bb7, StackBucket::Bb8,
        StackBucket::Bb9, StackBucket::Bb10, StackBucket::Bb10To15,
        StackBucket::Bb15To20, StackBucket::Bb20To25,
    ];

    /// Effective stack range `(low, high]` in big blinds.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            StackBucket::Bb1      => (0, 1),
            StackBucket::Bb2      => (1, 2),
            StackBucket::Bb3      => (2, 3),
            StackBucket::Bb4      => (3, 4),
            StackBucket::Bb5      => (4, 5),
            StackBucket::Bb6      => (5, 6),
            StackBucket::Bb7      => (6, 7),
            StackBucket::Bb8      => (7, 8),
            StackBucket::Bb9      => (8, 9),
            StackBucket::Bb10     => (9, 10),
            StackBucket::Bb10To15 => (10, 15),
            StackBucket::Bb15To20 => (15, 20),
            StackBucket::Bb20To25 => (20, 25),
        }
    }

    /// `"7"` for single big blind buckets, `"10-15"` for ranges.
    pub fn label(self) -> String {
        match self.bounds() {
            (low, high) if high - low == 1 => high.to_string(),
            (low, high) => format!("{low}-{high}"),
        }
    }

    pub fn function_name(self) -> String {
        format!("f$PushFold_{}BB", self.label().replace('-', "_"))
    }

    /// `1bb`, `10_15bb`: the bucket part of a settings key.
    pub fn key_fragment(self) -> String {
        format!("{}bb", self.label().replace('-', "_"))
    }

    /// Ladder condition selecting this bucket from `f$EffectiveStack`.
    pub fn stack_condition(self) -> String {
        match self.bounds() {
            (0, high) => format!("f$EffectiveStack <= {high}"),
            (low, high) => format!("f$EffectiveStack > {low} AND f$EffectiveStack <= {high}"),
        }
    }

    pub fn call_bucket(self) -> CallBucket {
        match self {
            StackBucket::Bb1 => CallBucket::Bb1,
            StackBucket::Bb2 => CallBucket::Bb2,
            StackBucket::Bb3 => CallBucket::Bb3,
            StackBucket::Bb4 => CallBucket::Bb4,
            StackBucket::Bb5 => CallBucket::Bb5,
            StackBucket::Bb6
            | StackBucket::Bb7
            | StackBucket::Bb8
            | StackBucket::Bb9
            | StackBucket::Bb10 => CallBucket::Bb6To10,
            StackBucket::Bb10To15 => CallBucket::Bb10To15,
            StackBucket::Bb15To20 | StackBucket::Bb20To25 => CallBucket::Bb15To25,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallBucket {
    Bb1,
    Bb2,
    Bb3,
    Bb4,
    Bb5,
    Bb6To10,
    Bb10To15,
    Bb15To25,
}

impl CallBucket {
    pub const ALL: [CallBucket; 8] = [
        CallBucket::Bb1, CallBucket::Bb2, CallBucket::Bb3, CallBucket::Bb4,
        CallBucket::Bb5, CallBucket::Bb6To10, CallBucket::Bb10To15, CallBucket::Bb15To25,
    ];

    pub fn key_fragment(self) -> &'static str {
        match self {
            CallBucket::Bb1      => "1bb",
            CallBucket::Bb2      => "2bb",
            CallBucket::Bb3      => "3bb",
            CallBucket::Bb4      => "4bb",
            CallBucket::Bb5      => "5bb",
            CallBucket::Bb6To10  => "6_10bb",
            CallBucket::Bb10To15 => "10_15bb",
            CallBucket::Bb15To25 => "15_25bb",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Seats
// ---------------------------------------------------------------------------

/// Seat groups used by the push table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushSeat {
    EP,
    MP,
    CO,
    BTN,
    SB,
    BB,
}

impl PushSeat {
    pub const ALL: [PushSeat; 6] = [PushSeat::EP, PushSeat::MP, PushSeat::CO, PushSeat::BTN, PushSeat::SB, PushSeat::BB];

    pub fn key(self) -> &'static str {
        match self {
            PushSeat::EP  => "ep",
            PushSeat::MP  => "mp",
            PushSeat::CO  => "co",
            PushSeat::BTN => "btn",
            PushSeat::SB  => "sb",
            PushSeat::BB  => "bb",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Seat of the player whose all-in we are facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiserSeat {
    EP,
    MP,
    CO,
    BTN,
    SB,
}

impl RaiserSeat {
    pub const ALL: [RaiserSeat; 5] = [RaiserSeat::EP, RaiserSeat::MP, RaiserSeat::CO, RaiserSeat::BTN, RaiserSeat::SB];

    pub fn key(self) -> &'static str {
        match self {
            RaiserSeat::EP  => "ep",
            RaiserSeat::MP  => "mp",
            RaiserSeat::CO  => "co",
            RaiserSeat::BTN => "btn",
            RaiserSeat::SB  => "sb",
        }
    }

    /// Short name used in rule comments.
    pub fn label(self) -> &'static str {
        match self {
            RaiserSeat::EP  => "EP",
            RaiserSeat::MP  => "MP",
            RaiserSeat::CO  => "CO",
            RaiserSeat::BTN => "BN",
            RaiserSeat::SB  => "SB",
        }
    }

    /// Where the last raiser sits, counted from the first seat dealt.
    pub fn raiser_condition(self) -> &'static str {
        match self {
            RaiserSeat::EP  => "(LastRaiserPosition <= 3)",
            RaiserSeat::MP  => "(LastRaiserPosition > 3 AND LastRaiserPosition <= 6)",
            RaiserSeat::CO  => "(LastRaiserPosition = nplayersdealt - 2)",
            RaiserSeat::BTN => "(LastRaiserPosition = nplayersdealt - 1)",
            RaiserSeat::SB  => "(LastRaiserPosition = nplayersdealt)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub fn push_key(bucket: StackBucket, seat: PushSeat) -> String {
    format!("push_{}_{}", bucket.key_fragment(), seat.key())
}

pub fn call_key(bucket: CallBucket, raiser: RaiserSeat) -> String {
    format!("call_{}_vs_{}", bucket.key_fragment(), raiser.key())
}

// ---------------------------------------------------------------------------
// Default tables
// ---------------------------------------------------------------------------

/// Push percentages, rows in [`StackBucket::ALL`] order, columns EP MP CO BTN SB BB.
#[rustfmt::skip]
const PUSH_DEFAULTS: [[i64; 6]; 13] = [
    [75, 80, 85, 90, 92, 95],
    [60, 65, 70, 75, 80, 85],
    [45, 50, 55, 60, 65, 70],
    [35, 40, 45, 50, 55, 60],
    [28, 32, 36, 40, 45, 50],
    [22, 26, 30, 35, 40, 45],
    [18, 22, 26, 30, 35, 40],
    [15, 18, 22, 26, 30, 35],
    [12, 15, 18, 22, 26, 30],
    [10, 12, 15, 18, 22, 25],
    [ 8, 10, 12, 15, 18, 20],
    [ 5,  8, 10, 12, 15, 18],
    [ 3,  5,  7, 10, 12, 15],
];

/// Call percentages, rows in [`CallBucket::ALL`] order, columns vs EP MP CO BTN SB.
#[rustfmt::skip]
const CALL_DEFAULTS: [[i64; 5]; 8] = [
    [60, 65, 70, 75, 80],
    [50, 55, 60, 65, 70],
    [40, 45, 50, 55, 60],
    [30, 35, 40, 45, 50],
    [25, 28, 32, 36, 40],
    [20, 22, 25, 28, 32],
    [15, 18, 20, 22, 25],
    [10, 12, 15, 18, 20],
];

pub fn default_push(bucket: StackBucket, seat: PushSeat) -> i64 {
    PUSH_DEFAULTS[bucket.index()][seat.index()]
}

pub fn default_call(bucket: CallBucket, raiser: RaiserSeat) -> i64 {
    CALL_DEFAULTS[bucket.index()][raiser.index()]
}

/// Every push and call key with its default percentage.
pub fn default_entries() -> Vec<(String, i64)> {
    let push = StackBucket::ALL.into_iter().flat_map(|bucket| {
        PushSeat::ALL
            .into_iter()
            .map(move |seat| (push_key(bucket, seat), default_push(bucket, seat)))
    });
    let call = CallBucket::ALL.into_iter().flat_map(|bucket| {
        RaiserSeat::ALL
            .into_iter()
            .map(move |raiser| (call_key(bucket, raiser), default_call(bucket, raiser)))
    });
    push.chain(call).collect()
}

// ---------------------------------------------------------------------------
// Resolved thresholds
// ---------------------------------------------------------------------------

/// `1 + 0.4 * (af - 1)`: neutral at aggression 50, wider when more aggressive.
pub fn push_fold_multiplier(aggression_factor: f64) -> f64 {
    1.0 + 0.4 * (aggression_factor - 1.0)
}

fn adjusted(pct: f64, multiplier: f64, clamp: i64) -> i64 {
    round_half_even(pct * multiplier).clamp(0, clamp)
}

/// Hand-rank thresholds for every bucket and seat after the aggression
/// multiplier and clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct PushFoldTable {
    pub aggression_factor: f64,
    pub multiplier: f64,
    push: [[i64; 6]; 13],
    call: [[i64; 5]; 8],
}

impl PushFoldTable {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let af = aggression_factor(settings)?;
        let multiplier = push_fold_multiplier(af);

        let mut push = [[0; 6]; 13];
        for bucket in StackBucket::ALL {
            for seat in PushSeat::ALL {
                let pct = settings
                    .number_named(&push_key(bucket, seat), Number::Int(default_push(bucket, seat)))?
                    .value();
                push[bucket.index()][seat.index()] = threshold(adjusted(pct, multiplier, PUSH_CLAMP) as f64);
            }
        }

        let mut call = [[0; 5]; 8];
        for bucket in CallBucket::ALL {
            for raiser in RaiserSeat::ALL {
                let pct = settings
                    .number_named(&call_key(bucket, raiser), Number::Int(default_call(bucket, raiser)))?
                    .value();
                call[bucket.index()][raiser.index()] = threshold(adjusted(pct, multiplier, CALL_CLAMP) as f64);
            }
        }

        Ok(PushFoldTable { aggression_factor: af, multiplier, push, call })
    }

    pub fn push(&self, bucket: StackBucket, seat: PushSeat) -> i64 {
        self.push[bucket.index()][seat.index()]
    }

    pub fn call(&self, bucket: CallBucket, raiser: RaiserSeat) -> i64 {
        self.call[bucket.index()][raiser.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_aggression_uses_table_percentages_unchanged() {
        let table = PushFoldTable::from_settings(&Settings::new().with("push_1bb_ep", 75)).unwrap();
        assert_eq!(table.multiplier, 1.0);
        assert_eq!(table.push(StackBucket::Bb1, PushSeat::EP), 127);
        assert_eq!(table.call(CallBucket::Bb15To25, RaiserSeat::EP), threshold(10.0));
    }

    #[test]
    fn push_thresholds_never_widen_with_deeper_stacks() {
        let table = PushFoldTable::from_settings(&Settings::new()).unwrap();
        for seat in PushSeat::ALL {
            let ladder: Vec<i64> = StackBucket::ALL.iter().map(|b| table.push(*b, seat)).collect();
            assert!(ladder.windows(2).all(|w| w[0] >= w[1]), "ladder widens for {seat:?}: {ladder:?}");
        }
    }

    #[test]
    fn aggressive_values_are_clamped() {
        let table = PushFoldTable::from_settings(&Settings::new().with("aggression", 100)).unwrap();
        // 95 * 1.4 → 98, 80 * 1.4 → 95
        assert_eq!(table.push(StackBucket::Bb1, PushSeat::BB), threshold(98.0));
        assert_eq!(table.call(CallBucket::Bb1, RaiserSeat::SB), threshold(95.0));
    }

    #[test]
    fn passive_aggression_narrows_ranges() {
        let table = PushFoldTable::from_settings(&Settings::new().with("aggression", 0)).unwrap();
        // 75 * 0.6 = 45
        assert_eq!(table.push(StackBucket::Bb1, PushSeat::EP), 77);
    }

    #[test]
    fn negative_percentages_clamp_to_zero() {
        let table = PushFoldTable::from_settings(&Settings::new().with("push_5bb_sb", -20)).unwrap();
        assert_eq!(table.push(StackBucket::Bb5, PushSeat::SB), 1);
    }

    #[test]
    fn call_buckets_merge_six_to_ten_and_fifteen_to_twenty_five() {
        for bucket in [StackBucket::Bb6, StackBucket::Bb7, StackBucket::Bb8, StackBucket::Bb9, StackBucket::Bb10] {
            assert_eq!(bucket.call_bucket(), CallBucket::Bb6To10);
        }
        assert_eq!(StackBucket::Bb10To15.call_bucket(), CallBucket::Bb10To15);
        assert_eq!(StackBucket::Bb15To20.call_bucket(), CallBucket::Bb15To25);
        assert_eq!(StackBucket::Bb20To25.call_bucket(), CallBucket::Bb15To25);
    }

    #[test]
    fn bucket_names_and_ladder_conditions() {
        assert_eq!(StackBucket::Bb1.function_name(), "f$PushFold_1BB");
        assert_eq!(StackBucket::Bb15To20.function_name(), "f$PushFold_15_20BB");
        assert_eq!(StackBucket::Bb1.stack_condition(), "f$EffectiveStack <= 1");
        assert_eq!(
            StackBucket::Bb10To15.stack_condition(),
            "f$EffectiveStack > 10 AND f$EffectiveStack <= 15"
        );
        assert_eq!(push_key(StackBucket::Bb20To25, PushSeat::BTN), "push_20_25bb_btn");
        assert_eq!(call_key(CallBucket::Bb6To10, RaiserSeat::SB), "call_6_10bb_vs_sb");
    }

    #[test]
    fn default_entries_cover_both_tables() {
        let entries = default_entries();
        assert_eq!(entries.len(), 13 * 6 + 8 * 5);
        assert!(entries.contains(&("push_10bb_bb".to_string(), 25)));
        assert!(entries.contains(&("call_5bb_vs_mp".to_string(), 28)));
    }
}
