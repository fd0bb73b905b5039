//! Unopened and limped pots: open-raise, open-limp, or isolate.
//!
//! Each seat gets its own `f$OpenRaise_<SEAT>` block keyed on that seat's
//! range and sizing. The limp threshold comes from tightness, not from the
//! seat's range: `threshold(tightness) × seat multiplier × limp factor`, where
//! the limp factor is `limp_frequency / 50`.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{all_of, decimal, rank_at_most, raise_size, BLINDS, LATE_POSITION},
    keys,
    models::Position,
    rules::{Action, Formula, RuleBlock, Script},
    settings::{Number, Settings},
    threshold::{round_half_even, scale_threshold, threshold},
};

/// Effective open-raise parameters for one seat.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatPlan {
    pub position: Position,
    pub range: Number,
    pub raise_threshold: i64,
    /// Raise size in big blinds.
    pub size: f64,
    /// `None` for the big blind.
    pub limp_threshold: Option<i64>,
}

impl SeatPlan {
    pub fn block_name(&self) -> String {
        format!("f$OpenRaise_{}", self.position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenRaisePlan {
    pub seats: Vec<SeatPlan>,
    pub tight: i64,
    pub limp_factor: f64,
    /// Isolation base size in big blinds.
    pub open_size: f64,
}

impl OpenRaisePlan {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let tight = threshold(settings.percent(keys::TIGHTNESS)?);
        let limp_factor = settings.percent(keys::LIMP_FREQUENCY)? / 50.0;
        let open_size = raise_size(&settings.sizing(keys::OPEN_RAISE_SIZE)?, 0);

        let seats = Position::ALL
            .iter()
            .map(|&position| seat_plan(settings, position, tight, limp_factor))
            .collect::<Result<Vec<_>>>()?;

        Ok(OpenRaisePlan { seats, tight, limp_factor, open_size })
    }

    pub fn seat(&self, position: Position) -> Option<&SeatPlan> {
        self.seats.iter().find(|s| s.position == position)
    }

    fn limp(&self, multiplier: f64) -> i64 {
        round_half_even(self.tight as f64 * multiplier * self.limp_factor)
    }
}

/// Late-position keys the small blind falls back to when it has no key of its own.
const SB_FALLBACK_RANGE: &str = "lp_range";
const SB_FALLBACK_SIZING: &str = "lp_sizing";
/// The small blind opens 90% of the late-position threshold.
const SB_FALLBACK_FACTOR: f64 = 0.9;

/// Per-seat key first, then its position-group key, then the documented default.
fn seat_plan(settings: &Settings, position: Position, tight: i64, limp_factor: f64) -> Result<SeatPlan> {
    let range_key = keys::position_range(position);
    let sizing_key = keys::position_sizing(position);
    let group_range = position.group_key().map(|g| format!("{g}_range"));
    let group_sizing = position.group_key().map(|g| format!("{g}_sizing"));

    let mut range_names = vec![range_key.name];
    range_names.extend(group_range.as_deref());
    let mut sizing_names = vec![sizing_key.name];
    sizing_names.extend(group_sizing.as_deref());
    if position == Position::SB {
        sizing_names.push(SB_FALLBACK_SIZING);
    }

    let sb_from_late = position == Position::SB
        && settings.get(range_key.name).is_none()
        && settings.get(SB_FALLBACK_RANGE).is_some();
    let (range, raise_threshold) = if sb_from_late {
        let late = settings.number_named(SB_FALLBACK_RANGE, range_key.default)?;
        (late, scale_threshold(threshold(late.value()), SB_FALLBACK_FACTOR))
    } else {
        let range = settings.number_layered(&range_names, range_key.default)?;
        (range, threshold(range.value()))
    };
    let sizing = settings.sizing_layered(&sizing_names, sizing_key.default)?;

    Ok(SeatPlan {
        position,
        range,
        raise_threshold,
        size: raise_size(&sizing, 0),
        limp_threshold: position
            .limp_multiplier()
            .map(|m| round_half_even(tight as f64 * m * limp_factor)),
    })
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let plan = OpenRaisePlan::from_settings(settings)?;

    let mut banner = vec!["OPEN RAISE STRATEGY".to_string(), String::new()];
    for seat in &plan.seats {
        banner.push(format!(
            "{} Range: {}% (Threshold: {}), Sizing: {}BB",
            seat.position,
            seat.range,
            seat.raise_threshold,
            decimal(seat.size)
        ));
    }
    banner.push(format!("Open Limp Factor: {}x", decimal(plan.limp_factor)));

    let mut script = Script::new();
    script.banner(banner);

    let mut dispatch = RuleBlock::builder("f$OpenRaiseOrOpenLimp")
        .comment("No action (limp or raise) before us. Hero can Open the game by Raising or Limping");
    for seat in &plan.seats {
        dispatch = dispatch.when(seat.position.predicate(), Action::ret(seat.block_name()));
    }
    script.push(dispatch.otherwise(Action::ret("Fold")));

    for seat in &plan.seats {
        let block = RuleBlock::builder(seat.block_name())
            .when(rank_at_most(seat.raise_threshold), Action::ret(decimal(seat.size)));
        let block = match seat.limp_threshold {
            Some(limp) => block
                .when(rank_at_most(limp), Action::ret("Call"))
                .otherwise(Action::ret("Fold")),
            // Nobody raised: the big blind never folds for free.
            None => block.otherwise(Action::ret("Check")),
        };
        script.push(block);
    }

    script.push(
        RuleBlock::builder("f$LimpOrIsolateLimpers")
            .comment("1 or more limps before us. Hero can Limp too or Raise to isolate the limpers")
            .when("f$LimpOrIsolateLimpers_Decision = 2", Action::ret("f$IsolateSize"))
            .when("f$LimpOrIsolateLimpers_Decision = 1", Action::ret("Call"))
            .otherwise(Action::ret("Fold")),
    );

    script.push_formula(Formula {
        name: "f$IsolateSize".into(),
        comments: vec!["Base open size plus 1BB per limper".into()],
        expression: format!("Calls * 1 + {}", decimal(plan.open_size)),
    });

    let mut decision = RuleBlock::builder("f$LimpOrIsolateLimpers_Decision")
        .comment("0 = Fold, 1 = Limp, 2 = Raise")
        .comment("More aggressive with fewer limpers, tighter with more");
    for (limpers, raise_mult, limp_mult) in [("Calls = 1", 0.7, 0.9), ("Calls = 2", 0.6, 0.85), ("Calls >= 3", 0.5, 0.8)] {
        decision = decision
            .when(all_of(&[limpers, &rank_at_most(scale_threshold(plan.tight, raise_mult))]), Action::ret(2))
            .when(all_of(&[limpers, &rank_at_most(plan.limp(limp_mult))]), Action::ret(1))
            .blank();
    }
    script.push(
        decision
            .comment("Position based adjustments - more aggressive in position")
            .when(all_of(&[LATE_POSITION, &rank_at_most(scale_threshold(plan.tight, 0.75))]), Action::ret(2))
            .when(all_of(&[BLINDS, &rank_at_most(scale_threshold(plan.tight, 0.65))]), Action::ret(2))
            .blank()
            .otherwise(Action::ret(0)),
    );

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_widens_towards_the_button() {
        let plan = OpenRaisePlan::from_settings(&Settings::new()).unwrap();
        let ep1 = plan.seat(Position::EP1).unwrap();
        let btn = plan.seat(Position::BTN).unwrap();
        assert_eq!(ep1.raise_threshold, 18);
        assert_eq!(btn.raise_threshold, 51);
        assert!(ep1.raise_threshold < btn.raise_threshold);
    }

    #[test]
    fn limp_threshold_scales_tightness_by_seat_and_limp_factor() {
        let plan = OpenRaisePlan::from_settings(&Settings::new()).unwrap();
        // tightness 50% → 85, limp factor 0.6
        assert_eq!(plan.seat(Position::EP1).unwrap().limp_threshold, Some(36));
        assert_eq!(plan.seat(Position::CO).unwrap().limp_threshold, Some(51));
        assert_eq!(plan.seat(Position::SB).unwrap().limp_threshold, Some(46));
        assert_eq!(plan.seat(Position::BB).unwrap().limp_threshold, None);
    }

    #[test]
    fn group_keys_back_fill_missing_seat_keys() {
        let settings = Settings::new().with("lp_range", 40).with("lp_sizing", "2.2").with("co_range", 28);
        let plan = OpenRaisePlan::from_settings(&settings).unwrap();
        assert_eq!(plan.seat(Position::CO).unwrap().range, Number::Int(28));
        assert_eq!(plan.seat(Position::BTN).unwrap().range, Number::Int(40));
        assert_eq!(plan.seat(Position::BTN).unwrap().size, 2.2);
    }

    #[test]
    fn big_blind_checks_instead_of_folding() {
        let script = build(&Settings::new()).unwrap();
        let bb = script.find_block("f$OpenRaise_BB").unwrap();
        assert_eq!(bb.fallback(), &Action::ret("Check"));
        assert_eq!(bb.clauses().count(), 1);
    }

    #[test]
    fn dispatcher_routes_every_seat() {
        let script = build(&Settings::new()).unwrap();
        let dispatch = script.find_block("f$OpenRaiseOrOpenLimp").unwrap();
        assert_eq!(dispatch.clauses().count(), Position::ALL.len());
        for seat in Position::ALL {
            assert!(script.find_block(&format!("f$OpenRaise_{seat}")).is_some(), "missing block for {seat}");
        }
    }

    #[test]
    fn isolate_size_uses_open_raise_size() {
        let text = generate(&Settings::new().with("open_raise_size", "3")).unwrap();
        assert!(text.contains("##f$IsolateSize##\n// Base open size plus 1BB per limper\nCalls * 1 + 3.0\n"));
    }

    #[test]
    fn small_blind_falls_back_to_late_position_range() {
        // lp_range 30% → 51, taken at 90% → 46
        let late = Settings::new().with("lp_range", 30).with("lp_sizing", "2.0");
        let plan = OpenRaisePlan::from_settings(&late).unwrap();
        let sb = plan.seat(Position::SB).unwrap();
        assert_eq!(sb.raise_threshold, 46);
        assert_eq!(sb.range, Number::Int(30));
        assert_eq!(sb.size, 2.0);
        assert_eq!(plan.seat(Position::BTN).unwrap().raise_threshold, 51);

        let text = generate(&late).unwrap();
        assert!(text.contains("##f$OpenRaise_SB##\nWHEN handrank169 <= 46 RETURN 2.0 FORCE\n"));

        // An explicit small blind key wins, and no keys at all keep the default.
        let explicit = late.with("sb_range", 35);
        assert_eq!(OpenRaisePlan::from_settings(&explicit).unwrap().seat(Position::SB).unwrap().raise_threshold, 60);
        assert_eq!(OpenRaisePlan::from_settings(&Settings::new()).unwrap().seat(Position::SB).unwrap().raise_threshold, 60);
    }
}
