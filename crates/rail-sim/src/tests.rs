//! Integration tests for the train state machine, spawner, and tick loop.

use rail_core::{Direction, SimConfig, StationId, TrainId};
use rail_network::{Line, Topology, TopologyBuilder};

use crate::{NoopObserver, Sim, SimBuilder, SnapshotCollector, TrainState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(total_ticks: u64, snapshot_tail: u64) -> SimConfig {
    SimConfig { total_ticks, snapshot_tail }
}

/// alpha ↔ beta, distance 5 both ways, both popularity 2.
fn two_station_topology() -> (Topology, StationId, StationId) {
    let mut b = TopologyBuilder::new();
    let a = b.add_station("alpha", 2);
    let c = b.add_station("beta", 2);
    b.link(a, c, 5);
    b.link(c, a, 5);
    (b.build(), a, c)
}

/// One line `g` over the two-station topology with the given train target.
fn two_station_sim(target: u32, cfg: SimConfig) -> Sim {
    let (topo, a, b) = two_station_topology();
    let line = Line::new('g', vec![a, b]).unwrap();
    SimBuilder::new(cfg, topo).line(line, target).build().unwrap()
}

fn tick(sim: &mut Sim) {
    sim.run_ticks(1, &mut NoopObserver).unwrap();
}

fn state_of(sim: &Sim, id: u32) -> TrainState {
    sim.trains[id as usize].state
}

// ── Single-train timeline (the reference scenario) ────────────────────────────

#[cfg(test)]
mod single_train_timeline {
    use super::*;

    /// 2-station line A↔B, distance 5, popularity 2, one train spawned
    /// forward at A.  Walks the exact expected tick-by-tick timeline.
    #[test]
    fn full_cycle_to_first_turnaround() {
        let mut sim = two_station_sim(1, config(100, 0));
        let (a, b) = (StationId(0), StationId(1));

        // tick 0: spawned into the platform, door opens the same tick.
        tick(&mut sim);
        let plt_ab = sim.topology.platform_to(a, b).unwrap();
        assert_eq!(state_of(&sim, 0), TrainState::OpeningDoor { platform: plt_ab });
        assert!(sim.topology.platform(plt_ab).is_occupied());
        assert_eq!(sim.trains[0].direction, Direction::Forward);

        // tick 1: dwell armed to 2 and advanced once.
        tick(&mut sim);
        match state_of(&sim, 0) {
            TrainState::LoadingPassengers { dwell, .. } => assert_eq!(dwell.remaining(), 1),
            other => panic!("expected LoadingPassengers, got {other:?}"),
        }

        // tick 2: dwell hits zero; the free link is claimed immediately.
        tick(&mut sim);
        let link_ab = sim.topology.link_to(a, b).unwrap();
        match state_of(&sim, 0) {
            TrainState::WaitingForAnotherTick { link, transit, .. } => {
                assert_eq!(link, link_ab);
                assert_eq!(transit.remaining(), 5);
            }
            other => panic!("expected WaitingForAnotherTick, got {other:?}"),
        }
        assert!(sim.topology.link(link_ab).is_occupied());
        assert!(sim.topology.platform(plt_ab).is_occupied()); // not yet released

        // tick 3: platform released, train enters the link; travel time
        // starts being consumed next tick.
        tick(&mut sim);
        assert!(!sim.topology.platform(plt_ab).is_occupied());
        match state_of(&sim, 0) {
            TrainState::Transitioning { transit, .. } => assert_eq!(transit.remaining(), 5),
            other => panic!("expected Transitioning, got {other:?}"),
        }

        // ticks 4–7: transit counts 5 → 1.
        for expected in [4u32, 3, 2, 1] {
            tick(&mut sim);
            match state_of(&sim, 0) {
                TrainState::Transitioning { transit, .. } => {
                    assert_eq!(transit.remaining(), expected)
                }
                other => panic!("expected Transitioning, got {other:?}"),
            }
        }

        // tick 8: transit done; B is the terminal in forward direction, so
        // the train flips to backward and its door opens at B this tick.
        tick(&mut sim);
        let plt_ba = sim.topology.platform_to(b, a).unwrap();
        assert_eq!(state_of(&sim, 0), TrainState::OpeningDoor { platform: plt_ba });
        assert_eq!(sim.trains[0].direction, Direction::Backward);
        assert!(!sim.topology.link(link_ab).is_occupied());
        assert!(sim.topology.platform(plt_ba).is_occupied());
    }

    /// A popularity-0 station dwells for zero ticks: the dwell countdown is
    /// immediately done and the link decision happens on the door tick.
    #[test]
    fn zero_popularity_skips_dwell() {
        let mut b = TopologyBuilder::new();
        let a = b.add_station("alpha", 0);
        let c = b.add_station("beta", 0);
        b.link(a, c, 1);
        b.link(c, a, 1);
        let line = Line::new('g', vec![a, c]).unwrap();
        let mut sim = SimBuilder::new(config(100, 0), b.build())
            .line(line, 1)
            .build()
            .unwrap();

        tick(&mut sim); // spawn + door
        assert!(matches!(state_of(&sim, 0), TrainState::OpeningDoor { .. }));
        tick(&mut sim); // dwell(0) already done → link claimed
        assert!(matches!(
            state_of(&sim, 0),
            TrainState::WaitingForAnotherTick { .. }
        ));
        tick(&mut sim); // enter link
        assert!(matches!(state_of(&sim, 0), TrainState::Transitioning { .. }));
        tick(&mut sim); // distance 1 → arrive, flip, door opens at beta
        assert!(matches!(state_of(&sim, 0), TrainState::OpeningDoor { .. }));
        assert_eq!(sim.trains[0].direction, Direction::Backward);
    }
}

// ── Contention ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod contention {
    use super::*;

    /// Three trains on a two-station line.  Exercises same-tick platform
    /// promotion, link polling, and creation-order tie-breaks end to end.
    #[test]
    fn platform_promotion_happens_in_the_release_tick() {
        let mut sim = two_station_sim(3, config(100, 0));

        // tick 0: pair spawned (t0 at alpha forward, t1 at beta backward).
        tick(&mut sim);
        assert_eq!(sim.trains.len(), 2);
        assert_eq!(sim.trains[1].direction, Direction::Backward);

        // tick 1: t2 spawned at alpha; its platform is occupied by t0.
        tick(&mut sim);
        assert_eq!(sim.trains.len(), 3);
        assert!(matches!(
            state_of(&sim, 2),
            TrainState::QueueingForPlatform { .. }
        ));

        // tick 2: t0 and t1 finish dwelling and claim their links.
        tick(&mut sim);

        // tick 3: t0 releases its platform → t2 is promoted in the same
        // tick, and (stepping after t0) its door already opens.
        tick(&mut sim);
        assert!(matches!(state_of(&sim, 0), TrainState::Transitioning { .. }));
        assert!(matches!(state_of(&sim, 2), TrainState::OpeningDoor { .. }));
    }

    #[test]
    fn link_wait_is_polled_and_fifo_platform_entry_round_trips() {
        let mut sim = two_station_sim(3, config(100, 0));
        let (a, b) = (StationId(0), StationId(1));
        let plt_ab = sim.topology.platform_to(a, b).unwrap();

        sim.run_ticks(5, &mut NoopObserver).unwrap();
        // tick 4 ran: t2 dwells; t0 occupies the alpha→beta link until its
        // arrival at tick 8, so from tick 5 on t2 waits for it.
        tick(&mut sim); // tick 5
        assert!(matches!(state_of(&sim, 2), TrainState::WaitingForLink { .. }));

        sim.run_ticks(2, &mut NoopObserver).unwrap(); // ticks 6, 7
        assert!(matches!(state_of(&sim, 2), TrainState::WaitingForLink { .. }));

        // tick 8: t0 arrives at beta and frees the link; t1 arrives at
        // alpha and queues behind t2's platform; t2 (stepping last) sees
        // the link free and claims it.
        tick(&mut sim);
        assert!(matches!(state_of(&sim, 0), TrainState::OpeningDoor { .. }));
        assert_eq!(
            state_of(&sim, 1),
            TrainState::QueueingForPlatform { platform: plt_ab }
        );
        assert_eq!(sim.trains[1].direction, Direction::Forward); // flipped at alpha
        assert!(matches!(
            state_of(&sim, 2),
            TrainState::WaitingForAnotherTick { .. }
        ));

        // tick 9: t2 vacates the platform; t1 (already stepped this tick)
        // is promoted and opens its door next tick.
        tick(&mut sim);
        assert_eq!(state_of(&sim, 1), TrainState::InPlatform { platform: plt_ab });
        tick(&mut sim);
        assert!(matches!(state_of(&sim, 1), TrainState::OpeningDoor { .. }));
    }

    /// No platform or link is ever held by two trains at once, and every
    /// held resource's occupancy flag agrees with the holder.
    #[test]
    fn mutual_exclusion_holds_across_a_busy_run() {
        let mut b = TopologyBuilder::new();
        let s0 = b.add_station("ash", 1);
        let s1 = b.add_station("birch", 2);
        let s2 = b.add_station("cedar", 1);
        for (x, y, d) in [(s0, s1, 2), (s1, s0, 2), (s1, s2, 3), (s2, s1, 3)] {
            b.link(x, y, d);
        }
        let line = Line::new('g', vec![s0, s1, s2]).unwrap();
        let mut sim = SimBuilder::new(config(60, 0), b.build())
            .line(line, 4)
            .build()
            .unwrap();

        for _ in 0..60 {
            tick(&mut sim);

            let mut held_platforms = Vec::new();
            let mut held_links = Vec::new();
            for train in &sim.trains {
                if let Some(p) = train.state.held_platform() {
                    assert!(
                        !held_platforms.contains(&p),
                        "platform {p} held by two trains"
                    );
                    assert!(sim.topology.platform(p).is_occupied());
                    held_platforms.push(p);
                }
                if let Some(l) = train.state.held_link() {
                    assert!(!held_links.contains(&l), "link {l} held by two trains");
                    assert!(sim.topology.link(l).is_occupied());
                    held_links.push(l);
                }
            }
        }
    }
}

// ── Spawning policy ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn pairs_then_single_toward_target() {
        let mut sim = two_station_sim(5, config(100, 0));

        tick(&mut sim);
        assert_eq!(sim.trains.len(), 2); // pair
        tick(&mut sim);
        assert_eq!(sim.trains.len(), 4); // pair
        tick(&mut sim);
        assert_eq!(sim.trains.len(), 5); // single, at the start
        tick(&mut sim);
        assert_eq!(sim.trains.len(), 5); // target reached

        // Pair spawns put one train at each terminus.
        assert_eq!(sim.trains[0].direction, Direction::Forward);
        assert_eq!(sim.trains[1].direction, Direction::Backward);
        assert_eq!(sim.trains[4].direction, Direction::Forward);
        assert_eq!(sim.lines[0].roster.len(), 5);
    }

    #[test]
    fn lines_spawn_independently() {
        let mut b = TopologyBuilder::new();
        let a = b.add_station("alpha", 1);
        let c = b.add_station("beta", 1);
        let g = b.add_station("gamma", 1);
        let d = b.add_station("delta", 1);
        for (x, y) in [(a, c), (c, a), (g, d), (d, g)] {
            b.link(x, y, 2);
        }
        let green = Line::new('g', vec![a, c]).unwrap();
        let yellow = Line::new('y', vec![g, d]).unwrap();
        let mut sim = SimBuilder::new(config(100, 0), b.build())
            .line(green, 2)
            .line(yellow, 1)
            .build()
            .unwrap();

        tick(&mut sim);
        // Green pair first (ids 0, 1), then yellow single (id 2).
        assert_eq!(sim.lines[0].roster, vec![TrainId(0), TrainId(1)]);
        assert_eq!(sim.lines[1].roster, vec![TrainId(2)]);
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshots {
    use super::*;

    #[test]
    fn position_labels_and_window() {
        let mut sim = two_station_sim(1, config(5, 5));
        let mut out = SnapshotCollector::new();
        sim.run(&mut out).unwrap();

        assert_eq!(
            out.lines,
            vec![
                "0: g0-alpha",
                "1: g0-alpha",
                "2: g0-alpha",
                "3: g0-alpha->beta",
                "4: g0-alpha->beta",
            ]
        );
    }

    #[test]
    fn only_the_tail_is_snapshotted() {
        let mut sim = two_station_sim(1, config(10, 2));
        let mut out = SnapshotCollector::new();
        sim.run(&mut out).unwrap();

        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[0].starts_with("8: "));
        assert!(out.lines[1].starts_with("9: "));
    }

    #[test]
    fn trains_group_by_line_in_declaration_order() {
        let mut b = TopologyBuilder::new();
        let a = b.add_station("alpha", 1);
        let c = b.add_station("beta", 1);
        let g = b.add_station("gamma", 1);
        let d = b.add_station("delta", 1);
        for (x, y) in [(a, c), (c, a), (g, d), (d, g)] {
            b.link(x, y, 2);
        }
        let green = Line::new('g', vec![a, c]).unwrap();
        let yellow = Line::new('y', vec![g, d]).unwrap();
        let mut sim = SimBuilder::new(config(1, 1), b.build())
            .line(green, 1)
            .line(yellow, 1)
            .build()
            .unwrap();

        let mut out = SnapshotCollector::new();
        sim.run(&mut out).unwrap();
        assert_eq!(out.lines, vec!["0: g0-alpha y1-gamma"]);
    }

    /// A line whose target is zero never spawns; the snapshot is the bare
    /// tick prefix with no trailing space.
    #[test]
    fn no_trains_renders_a_bare_tick_prefix() {
        let mut sim = two_station_sim(0, config(2, 2));
        let mut out = SnapshotCollector::new();
        sim.run(&mut out).unwrap();

        assert_eq!(out.lines, vec!["0:", "1:"]);
    }

    /// A not-yet-placed train labels as its spawn station.
    #[test]
    fn unplaced_train_labels_with_its_station() {
        let mut sim = two_station_sim(1, config(1, 0));
        tick(&mut sim);

        sim.trains[0].state = TrainState::Initial { station: StationId(0) };
        assert_eq!(sim.train_label(TrainId(0)), "g0-alpha");
    }

    /// Identical input and creation order ⇒ byte-identical output.
    #[test]
    fn runs_are_deterministic() {
        let run = || {
            let mut sim = two_station_sim(3, config(50, 20));
            let mut out = SnapshotCollector::new();
            sim.run(&mut out).unwrap();
            out.lines
        };
        let first = run();
        let second = run();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn rejects_empty_line_set() {
        let (topo, _, _) = two_station_topology();
        assert!(SimBuilder::new(config(10, 0), topo).build().is_err());
    }

    #[test]
    fn rejects_route_with_missing_reverse_link() {
        let mut b = TopologyBuilder::new();
        let a = b.add_station("alpha", 1);
        let c = b.add_station("beta", 1);
        b.link(a, c, 2); // one direction only — trains could never return
        let line = Line::new('g', vec![a, c]).unwrap();

        let result = SimBuilder::new(config(10, 0), b.build()).line(line, 1).build();
        assert!(result.is_err());
    }
}
