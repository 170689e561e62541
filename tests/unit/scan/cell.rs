//! Tests for the per-tile emitter-to-level map

#[cfg(test)]
mod tests {
    use signalgrid::scan::cell::CellReadings;
    use signalgrid::scan::reading::Reading;

    // Tests the first level recorded for an emitter wins
    // Verified by overwriting existing entries in insert
    #[test]
    fn test_insert_keeps_first_level() {
        let mut cell = CellReadings::new();

        assert!(cell.insert(Reading::new(7, -50)));
        assert!(!cell.insert(Reading::new(7, -80)));

        assert_eq!(cell.get(7), Some(-50));
        assert_eq!(cell.len(), 1);
    }

    // Tests entries stay sorted regardless of insertion order
    // Verified by pushing instead of inserting at the search position
    #[test]
    fn test_iteration_is_sorted_by_emitter() {
        let mut cell = CellReadings::default();
        for reading in [(30, -70), (-5, -40), (12, -55)] {
            cell.insert(reading.into());
        }

        let emitters: Vec<_> = cell.iter().map(|reading| reading.emitter).collect();
        assert_eq!(emitters, vec![-5, 12, 30]);
        assert!(cell.contains(12));
        assert!(!cell.contains(13));
        assert_eq!(cell.get(30), Some(-70));
    }

    // Tests the strongest reading and its tie break
    // Verified by keeping the last maximum instead of the first
    #[test]
    fn test_strongest_prefers_smaller_id_on_tie() {
        let mut cell = CellReadings::new();
        assert_eq!(cell.strongest(), None);

        cell.insert(Reading::new(9, -45));
        cell.insert(Reading::new(3, -45));
        cell.insert(Reading::new(1, -70));

        assert_eq!(cell.strongest(), Some(Reading::new(3, -45)));
    }

    // Tests clearing returns the tile to the unscanned state
    // Verified by leaving entries behind in clear
    #[test]
    fn test_clear_empties_cell() {
        let mut cell = CellReadings::new();
        cell.reserve(4);
        cell.insert(Reading::new(1, -60));
        assert!(!cell.is_empty());

        cell.clear();
        assert!(cell.is_empty());
        assert_eq!(cell.get(1), None);
    }
}
