//! End-to-end demo of profile generation.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Dial comparison**: the turn second-barrel block is generated for a
//!    passive and an aggressive player, showing how the same percentages map
//!    to different `handrank169` thresholds once aggression scales them.
//!
//! 2. **Full profile**: every street with default settings, summarised as
//!    block counts plus the first lines of each main function.

use poker_profile_gen::profile_engine::Script;
use poker_profile_gen::{build_street, threshold, Settings, Street};

/// Print one block of a street by name.
fn print_block(script: &Script, name: &str) {
    match script.find_block(name) {
        Some(block) => {
            println!("  ##{}##", block.name());
            for clause in block.clauses() {
                println!("  WHEN {} {}", clause.condition, clause.action);
            }
            println!("  WHEN Others {}", block.fallback());
        }
        None => println!("  (no block named {name})"),
    }
}

fn main() -> poker_profile_gen::Result<()> {
    println!("=== Percentages to thresholds ===");
    for pct in [10.0, 25.0, 50.0, 75.0, 100.0] {
        println!("  {pct:>5}% -> handrank169 <= {}", threshold(pct));
    }
    println!();

    for (label, aggression) in [("Passive", 20), ("Aggressive", 90)] {
        let settings = Settings::new().with("aggression", aggression);
        println!("=== {label} turn barrels (aggression {aggression}) ===");
        let turn = build_street(Street::Turn, &settings)?;
        print_block(&turn, "f$TurnSecondBarrel");
        println!();
    }

    println!("=== Default profile ===");
    let settings = Settings::new();
    for street in Street::ALL {
        let script = build_street(street, &settings)?;
        let text = script.render();
        println!(
            "  {street:<8} {:>3} blocks, {:>5} lines",
            script.blocks().count(),
            text.lines().count()
        );
    }
    println!();

    let flop = build_street(Street::Flop, &settings)?;
    print_block(&flop, Street::Flop.main_function());

    Ok(())
}
