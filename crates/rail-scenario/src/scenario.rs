//! Scenario parsing: text description → topology, lines, and run config.

use std::path::Path;

use rustc_hash::FxHashMap;

use rail_core::{SimConfig, StationId};
use rail_network::{Line, Topology, TopologyBuilder};

use crate::ScenarioError;

/// Display prefixes of the three lines, in their fixed declaration order.
pub const LINE_PREFIXES: [char; 3] = ['g', 'y', 'b'];

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A fully loaded scenario: everything needed to build and run a
/// simulation.
///
/// `lines` and `targets` are aligned by position and ordered as declared
/// in the input (`g`, `y`, `b`).
pub struct Scenario {
    pub topology: Topology,
    pub lines: Vec<Line>,
    /// Per-line live-train targets.
    pub targets: Vec<u32>,
    pub config: SimConfig,
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Scenario::parse(&text)
    }

    /// Parse a scenario from text (see the crate docs for the format).
    pub fn parse(input: &str) -> Result<Scenario, ScenarioError> {
        let mut tokens = Tokens::new(input);

        // ── Stations ──────────────────────────────────────────────────────
        let station_count = tokens.next_usize("station count")?;

        let mut names: Vec<&str> = Vec::with_capacity(station_count);
        for _ in 0..station_count {
            names.push(tokens.next("station name")?);
        }

        let mut popularity: Vec<u32> = Vec::with_capacity(station_count);
        for _ in 0..station_count {
            popularity.push(tokens.next_u32("station popularity")?);
        }

        let mut builder = TopologyBuilder::with_capacity(station_count, station_count * 2);
        let mut by_name: FxHashMap<&str, StationId> = FxHashMap::default();
        for (&name, &pop) in names.iter().zip(&popularity) {
            let id = builder.add_station(name, pop);
            by_name.insert(name, id);
        }

        // ── Adjacency matrix → links + platforms ──────────────────────────
        for src in 0..station_count {
            for dst in 0..station_count {
                let distance = tokens.next_u32("link distance")?;
                if distance > 0 {
                    builder.link(StationId(src as u32), StationId(dst as u32), distance);
                }
            }
        }

        // ── Line routes (one text line each) ──────────────────────────────
        let mut lines = Vec::with_capacity(LINE_PREFIXES.len());
        for prefix in LINE_PREFIXES {
            let route = tokens.next_row("line route")?;
            let stations = route
                .iter()
                .map(|&name| {
                    by_name
                        .get(name)
                        .copied()
                        .ok_or_else(|| ScenarioError::UnknownStation {
                            prefix,
                            name: name.to_owned(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            lines.push(Line::new(prefix, stations)?);
        }

        // ── Run parameters ────────────────────────────────────────────────
        let total_ticks = tokens.next_u64("tick count")?;

        let mut targets = Vec::with_capacity(LINE_PREFIXES.len());
        for _ in LINE_PREFIXES {
            targets.push(tokens.next_u32("train target")?);
        }

        let snapshot_tail = tokens.next_u64("snapshot line count")?;

        Ok(Scenario {
            topology: builder.build(),
            lines,
            targets,
            config: SimConfig {
                total_ticks,
                snapshot_tail,
            },
        })
    }
}

// ── Token cursor ──────────────────────────────────────────────────────────────

/// A position-tracking token cursor over the input's text lines.
///
/// Scalar reads flow across line breaks; [`next_row`](Self::next_row)
/// consumes a whole text line, which is how the undeclared-length line
/// routes are delimited.
struct Tokens<'a> {
    rows: Vec<Vec<&'a str>>,
    row: usize,
    col: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rows: input
                .lines()
                .map(|line| line.split_whitespace().collect())
                .collect(),
            row: 0,
            col: 0,
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, ScenarioError> {
        loop {
            let Some(row) = self.rows.get(self.row) else {
                return Err(ScenarioError::Truncated { expected });
            };
            if self.col < row.len() {
                let token = row[self.col];
                self.col += 1;
                return Ok(token);
            }
            self.row += 1;
            self.col = 0;
        }
    }

    /// All tokens of the next non-empty text line.  Any partially consumed
    /// line is abandoned first.
    fn next_row(&mut self, expected: &'static str) -> Result<Vec<&'a str>, ScenarioError> {
        if self.col > 0 {
            self.row += 1;
            self.col = 0;
        }
        loop {
            let Some(row) = self.rows.get(self.row) else {
                return Err(ScenarioError::Truncated { expected });
            };
            self.row += 1;
            if !row.is_empty() {
                return Ok(row.clone());
            }
        }
    }

    fn next_u32(&mut self, what: &'static str) -> Result<u32, ScenarioError> {
        let token = self.next(what)?;
        token.parse().map_err(|_| ScenarioError::BadNumber {
            what,
            text: token.to_owned(),
        })
    }

    fn next_u64(&mut self, what: &'static str) -> Result<u64, ScenarioError> {
        let token = self.next(what)?;
        token.parse().map_err(|_| ScenarioError::BadNumber {
            what,
            text: token.to_owned(),
        })
    }

    fn next_usize(&mut self, what: &'static str) -> Result<usize, ScenarioError> {
        let token = self.next(what)?;
        token.parse().map_err(|_| ScenarioError::BadNumber {
            what,
            text: token.to_owned(),
        })
    }
}
