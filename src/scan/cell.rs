//! Per-tile emitter-to-level map
//!
//! A tile rarely hears more than a few dozen access points, so the map is a
//! sorted association list rather than a hash map: one small contiguous
//! allocation per scanned tile and none for unscanned tiles.

use crate::scan::reading::{EmitterId, Level, Reading};

/// Readings recorded at one tile, sorted by emitter
///
/// An empty map means the tile was never scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellReadings {
    entries: Vec<(EmitterId, Level)>,
}

impl CellReadings {
    /// Create an empty map
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether the tile has never been scanned
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct emitters recorded
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Level recorded for an emitter
    pub fn get(&self, emitter: EmitterId) -> Option<Level> {
        self.entries
            .binary_search_by_key(&emitter, |&(id, _)| id)
            .ok()
            .and_then(|index| self.entries.get(index))
            .map(|&(_, level)| level)
    }

    /// Whether an emitter was heard here
    pub fn contains(&self, emitter: EmitterId) -> bool {
        self.get(emitter).is_some()
    }

    /// Store a reading unless its emitter is already present
    ///
    /// The first level recorded for an emitter wins; later readings of the
    /// same emitter, within one batch or across batches, are dropped.
    /// Returns whether the reading was stored.
    pub fn insert(&mut self, reading: Reading) -> bool {
        match self
            .entries
            .binary_search_by_key(&reading.emitter, |&(id, _)| id)
        {
            Ok(_) => false,
            Err(position) => {
                self.entries
                    .insert(position, (reading.emitter, reading.level));
                true
            }
        }
    }

    /// Reserve room for `additional` more emitters
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Readings in ascending emitter order
    pub fn iter(&self) -> impl Iterator<Item = Reading> + '_ {
        self.entries
            .iter()
            .map(|&(emitter, level)| Reading::new(emitter, level))
    }

    /// Strongest reading; ties go to the smaller emitter id
    pub fn strongest(&self) -> Option<Reading> {
        // Entries are sorted by id, so keeping the first maximum breaks ties low
        self.iter().fold(None, |best: Option<Reading>, reading| match best {
            Some(current) if current.level >= reading.level => Some(current),
            _ => Some(reading),
        })
    }

    /// Forget every reading
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
