//! Line routes: ordered station sequences with direction-aware neighbor
//! lookup.

use rustc_hash::FxHashMap;

use rail_core::{Direction, StationId};

use crate::NetworkError;

/// One transit line: a display prefix and an ordered station sequence.
///
/// The sequence is fixed at load time.  Its first and last stations are the
/// line's termini; trains reverse direction there and otherwise cycle the
/// line forever.  A station→position index makes neighbor lookup O(1).
pub struct Line {
    /// Single-character prefix used when rendering this line's trains
    /// (e.g. `g` for `g3-alpha`).
    pub prefix: char,
    stations: Vec<StationId>,
    index: FxHashMap<StationId, usize>,
}

impl Line {
    /// Build a line from its station sequence.
    ///
    /// Fails if the sequence has fewer than two stations or visits the same
    /// station twice (a repeated station would make the position index — and
    /// therefore neighbor lookup — ambiguous).
    pub fn new(prefix: char, stations: Vec<StationId>) -> Result<Line, NetworkError> {
        if stations.len() < 2 {
            return Err(NetworkError::LineTooShort {
                prefix,
                len: stations.len(),
            });
        }

        let mut index = FxHashMap::default();
        for (i, &station) in stations.iter().enumerate() {
            if index.insert(station, i).is_some() {
                return Err(NetworkError::RepeatedStation { prefix, station });
            }
        }

        Ok(Line {
            prefix,
            stations,
            index,
        })
    }

    /// The station sequence in declaration order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// The starting terminus (first station of the sequence).
    #[inline]
    pub fn start(&self) -> StationId {
        self.stations[0]
    }

    /// The terminal terminus (last station of the sequence).
    #[inline]
    pub fn terminal(&self) -> StationId {
        // Constructor guarantees at least two stations.
        self.stations[self.stations.len() - 1]
    }

    #[inline]
    pub fn is_start(&self, station: StationId) -> bool {
        self.start() == station
    }

    #[inline]
    pub fn is_terminal(&self, station: StationId) -> bool {
        self.terminal() == station
    }

    /// Whether `station` appears on this line.
    pub fn contains(&self, station: StationId) -> bool {
        self.index.contains_key(&station)
    }

    /// The neighbor of `station` in the given travel direction.
    ///
    /// # Panics
    ///
    /// Panics if `station` is not on this line, or if the requested neighbor
    /// lies past a terminus.  Both are caller contract violations: the train
    /// state machine must turn around at a terminus before asking for the
    /// next station, so an out-of-range request here means a state-machine
    /// bug and must not silently produce wrong data.
    pub fn next_in_direction(&self, station: StationId, direction: Direction) -> StationId {
        let i = match self.index.get(&station) {
            Some(&i) => i,
            None => panic!("station {station} is not on line '{}'", self.prefix),
        };
        match direction {
            Direction::Forward => {
                assert!(
                    i + 1 < self.stations.len(),
                    "line '{}': asked for the station past the terminal terminus",
                    self.prefix
                );
                self.stations[i + 1]
            }
            Direction::Backward => {
                assert!(
                    i > 0,
                    "line '{}': asked for the station before the starting terminus",
                    self.prefix
                );
                self.stations[i - 1]
            }
        }
    }
}
