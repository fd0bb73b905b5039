//! All-in-or-fold play for short tournament stacks.
//!
//! `f$PushFoldPreflop` walks the effective-stack ladder and hands off to one
//! `f$PushFold_<bucket>BB` block per [`StackBucket`]. Each bucket block opens
//! with first-in pushes by seat, then pushes over limpers, then calls against
//! an all-in keyed on the raiser's seat.

use tracing::instrument;

use crate::error::Result;
use crate::profile_engine::{
    helpers::{all_of, decimal, rank_at_most, EARLY_POSITION, MIDDLE_POSITION, UNOPENED},
    rules::{Action, RuleBlock, Script},
    settings::Settings,
    streets::preflop::push_fold_table::{PushFoldTable, PushSeat, RaiserSeat, StackBucket},
    threshold::scale_threshold,
};

const LIMPED: &str = "BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 0 AND Calls > 0";
const FACING_ONE_RAISE: &str = "BotsActionsOnThisRoundIncludingChecks = 0 AND (RaisesSinceLastPlay = 1)";

fn push_block(table: &PushFoldTable, bucket: StackBucket) -> RuleBlock {
    let push = |seat| rank_at_most(table.push(bucket, seat));
    let call_bucket = bucket.call_bucket();
    let vs_early = table.call(call_bucket, RaiserSeat::EP);

    let mut block = RuleBlock::builder(bucket.function_name())
        .comment(format!("Push/Fold strategy for {}BB stack", bucket.label()))
        .blank()
        .comment("No action before us (first to act)")
        .comment("Early Position Push")
        .when(all_of(&[EARLY_POSITION, UNOPENED, &push(PushSeat::EP)]), Action::ret("RaiseMax"))
        .blank()
        .comment("Middle Position Push")
        .when(all_of(&[MIDDLE_POSITION, UNOPENED, &push(PushSeat::MP)]), Action::ret("RaiseMax"))
        .blank()
        .comment("CO and Button Push")
        .when(all_of(&["InCutOff", UNOPENED, &push(PushSeat::CO)]), Action::ret("RaiseMax"))
        .when(all_of(&["InButton", UNOPENED, &push(PushSeat::BTN)]), Action::ret("RaiseMax"))
        .blank()
        .comment("SB Push")
        .when(all_of(&["InSmallBlind", UNOPENED, &push(PushSeat::SB)]), Action::ret("RaiseMax"))
        .blank()
        .comment("BB Check or Push over limps")
        .when(all_of(&["InBigBlind", UNOPENED]), Action::ret("Check"))
        .when(all_of(&["InBigBlind", LIMPED, &push(PushSeat::BB)]), Action::ret("RaiseMax"))
        .blank()
        .comment("Push over limpers (from any position)")
        .when(
            all_of(&[LIMPED, &rank_at_most(scale_threshold(table.push(bucket, PushSeat::CO), 0.8))]),
            Action::ret("RaiseMax"),
        )
        .blank();

    for raiser in RaiserSeat::ALL {
        block = block
            .comment(format!("Call all-in when {} pushes", raiser.label()))
            .when(
                all_of(&[
                    FACING_ONE_RAISE,
                    raiser.raiser_condition(),
                    "(AmountToCall >= StackSize * 0.8)",
                    &rank_at_most(table.call(call_bucket, raiser)),
                ]),
                Action::ret("Call"),
            )
            .blank();
    }

    block
        .comment("Face standard raises (push or fold)")
        .when(
            all_of(&[
                FACING_ONE_RAISE,
                "(AmountToCall < StackSize * 0.8)",
                &rank_at_most(scale_threshold(vs_early, 0.7)),
            ]),
            Action::ret("RaiseMax"),
        )
        .blank()
        .comment("Face multiple all-ins")
        .when(
            all_of(&[
                "BotsActionsOnThisRoundIncludingChecks = 0 AND Raises >= 2",
                &rank_at_most(scale_threshold(vs_early, 0.4)),
            ]),
            Action::ret("Call"),
        )
        .blank()
        .comment("Default action")
        .otherwise(Action::ret("Fold"))
}

#[instrument(level = "trace", skip(settings))]
pub fn build(settings: &Settings) -> Result<Script> {
    let table = PushFoldTable::from_settings(settings)?;

    let buckets = StackBucket::ALL
        .iter()
        .map(|b| format!("{}BB", b.label()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut script = Script::new();
    script.banner([
        "PUSH OR FOLD STRATEGY".to_string(),
        String::new(),
        "Generated with detailed stack size ranges:".to_string(),
        format!("- {buckets}"),
        String::new(),
        format!("Aggression Factor applied: {}x", decimal(table.aggression_factor)),
    ]);

    script.push(
        RuleBlock::builder("f$InPushFoldMode")
            .comment("Determine if we're in push/fold mode (less than 25 BBs)")
            .when("f$EffectiveStack < 25 AND istournament", Action::return_true())
            .otherwise(Action::return_false()),
    );

    let mut ladder = RuleBlock::builder("f$PushFoldPreflop").comment("Main push/fold function based on stack size");
    for bucket in StackBucket::ALL {
        ladder = ladder
            .comment(format!("{}BB range", bucket.label()))
            .when(bucket.stack_condition(), Action::ret(bucket.function_name()))
            .blank();
    }
    script.push(ladder.comment("Default action").otherwise(Action::ret("Fold")));

    for bucket in StackBucket::ALL {
        script.push(push_block(&table, bucket));
    }

    Ok(script)
}

pub fn generate(settings: &Settings) -> Result<String> {
    Ok(build(settings)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_big_blind_early_push_embeds_threshold() {
        let text = generate(&Settings::new().with("push_1bb_ep", 75).with("aggression", 50)).unwrap();
        assert!(text.contains(
            "WHEN (InEarlyPosition1 OR InEarlyPosition2 OR InEarlyPosition3) AND \
             BotsActionsOnThisRoundIncludingChecks = 0 AND Raises = 0 AND Calls = 0 AND \
             handrank169 <= 127 RETURN RaiseMax FORCE"
        ));
    }

    #[test]
    fn ladder_routes_every_bucket_in_order() {
        let script = build(&Settings::new()).unwrap();
        let ladder = script.find_block("f$PushFoldPreflop").unwrap();
        let targets: Vec<String> = ladder.clauses().map(|c| c.action.to_string()).collect();
        let expected: Vec<String> = StackBucket::ALL
            .iter()
            .map(|b| format!("RETURN {}", b.function_name()))
            .collect();
        assert_eq!(targets, expected);
        assert_eq!(ladder.fallback(), &Action::ret("Fold"));
    }

    #[test]
    fn bucket_block_clause_layout() {
        let script = build(&Settings::new()).unwrap();
        let block = script.find_block("f$PushFold_7BB").unwrap();
        let clauses: Vec<_> = block.clauses().collect();
        // 5 seat pushes, 2 big blind lines, limper push, 5 calls, standard raise, multiple all-ins
        assert_eq!(clauses.len(), 15);
        assert_eq!(clauses[5].action, Action::ret("Check"));
        // 7BB calls come from the merged 6-10BB call row: vs EP 20% → 35
        assert!(clauses[8].condition.contains("(LastRaiserPosition <= 3)"));
        assert!(clauses[8].condition.ends_with("handrank169 <= 35"));
        assert!(clauses[13].condition.ends_with(&format!("handrank169 <= {}", scale_threshold(35, 0.7))));
        assert!(clauses[14].condition.ends_with(&format!("handrank169 <= {}", scale_threshold(35, 0.4))));
    }

    #[test]
    fn push_fold_mode_is_tournament_only() {
        let text = generate(&Settings::new()).unwrap();
        assert!(text.contains(
            "##f$InPushFoldMode##\n\
             // Determine if we're in push/fold mode (less than 25 BBs)\n\
             WHEN f$EffectiveStack < 25 AND istournament RETURN true FORCE\n\
             WHEN Others RETURN false FORCE\n"
        ));
    }

    #[test]
    fn banner_lists_all_stack_ranges() {
        let text = generate(&Settings::new().with("aggression", 75)).unwrap();
        assert!(text.contains("// - 1BB, 2BB, 3BB, 4BB, 5BB, 6BB, 7BB, 8BB, 9BB, 10BB, 10-15BB, 15-20BB, 20-25BB\n"));
        assert!(text.contains("// Aggression Factor applied: 1.5x\n"));
    }
}
