//! metro — smallest end-to-end example for the railsim workspace.
//!
//! Simulates three lines sharing a five-station network for 40 ticks and
//! prints the position snapshot for the final 3 ticks.  Swap the embedded
//! scenario for `Scenario::load(path)` to run a real network description
//! from disk.

use std::time::Instant;

use anyhow::Result;

use rail_core::Tick;
use rail_scenario::Scenario;
use rail_sim::{SimBuilder, SimObserver};

// ── Scenario ──────────────────────────────────────────────────────────────────

// Five stations; three lines (g: harbor–quay–vista–ridge, y: harbor–quay–
// ridge, b: vista–ridge–grove) with targets 4/3/2; snapshot the last 3 of
// 40 ticks.
const SCENARIO: &str = "\
5
harbor quay vista ridge grove
2 3 1 2 1
0 3 0 0 0
3 0 2 5 0
0 2 0 4 0
0 5 4 0 2
0 0 0 2 0
harbor quay vista ridge
harbor quay ridge
vista ridge grove
40
4 3 2
3
";

// ── Output ────────────────────────────────────────────────────────────────────

/// Prints every snapshot line to stdout as the simulation produces it.
struct StdoutSnapshots;

impl SimObserver for StdoutSnapshots {
    fn on_snapshot(&mut self, _tick: Tick, line: &str) {
        println!("{line}");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let scenario = Scenario::parse(SCENARIO)?;

    let mut builder = SimBuilder::new(scenario.config, scenario.topology);
    for (line, target) in scenario.lines.into_iter().zip(scenario.targets) {
        builder = builder.line(line, target);
    }
    let mut sim = builder.build()?;

    let started = Instant::now();
    sim.run(&mut StdoutSnapshots)?;
    println!("{:.6} seconds", started.elapsed().as_secs_f64());

    Ok(())
}
