//! Tests for seeded synthetic access points

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use signalgrid::model::path_loss::LogDistanceModel;
    use signalgrid::model::synthetic::{SyntheticEmitter, SyntheticSite};
    use signalgrid::scan::reading::emitter_id;

    // Tests the same seed produces the same site and readings
    // Verified by seeding from entropy
    #[test]
    fn test_random_site_is_reproducible() {
        let area = Vec3::new(4.0, 0.0, 3.0);
        let mut first_rng = StdRng::seed_from_u64(7);
        let mut second_rng = StdRng::seed_from_u64(7);

        let first = SyntheticSite::random(&mut first_rng, area, 5);
        let second = SyntheticSite::random(&mut second_rng, area, 5);
        assert_eq!(first, second);

        let position = Vec3::new(0.5, 0.0, -0.5);
        assert_eq!(
            first.readings_at(position, &mut first_rng),
            second.readings_at(position, &mut second_rng)
        );
    }

    // Tests emitters are placed inside the area with distinct derived keys
    // Verified by using the full extent instead of half of it
    #[test]
    fn test_random_emitters_lie_within_area() {
        let area = Vec3::new(4.0, 0.0, 3.0);
        let mut rng = StdRng::seed_from_u64(1);
        let site = SyntheticSite::random(&mut rng, area, 16);

        assert_eq!(site.emitters().len(), 16);
        for emitter in site.emitters() {
            assert!(emitter.model.source.x.abs() <= 2.0);
            assert!(emitter.model.source.z.abs() <= 1.5);
            assert!((-45.0..=-30.0).contains(&emitter.model.reference_level));
            assert_eq!(emitter.id, emitter_id(&emitter.hardware_id));
        }

        let mut ids: Vec<_> = site.emitters().iter().map(|emitter| emitter.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    // Tests noiseless readings equal the rounded model level
    // Verified by truncating instead of rounding
    #[test]
    fn test_noiseless_readings_follow_model() {
        let model = LogDistanceModel::new(Vec3::ZERO, -40.0).with_exponent(2.0);
        let site = SyntheticSite::new(vec![SyntheticEmitter::new("aa:bb", model)]).with_noise(0.0);
        let mut rng = StdRng::seed_from_u64(3);

        let readings = site.readings_at(Vec3::new(10.0, 0.0, 0.0), &mut rng);
        assert_eq!(readings.len(), 1);
        assert!(
            readings
                .first()
                .is_some_and(|reading| reading.level == -60 && reading.emitter == emitter_id("aabb"))
        );
    }

    // Tests emitters below the hearing floor are not reported
    // Verified by removing the floor filter
    #[test]
    fn test_readings_below_floor_are_dropped() {
        let model = LogDistanceModel::new(Vec3::ZERO, -40.0).with_exponent(4.0);
        let site = SyntheticSite::new(vec![SyntheticEmitter::new("far", model)]).with_noise(0.0);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(site.readings_at(Vec3::new(50.0, 0.0, 0.0), &mut rng).is_empty());
        assert_eq!(site.readings_at(Vec3::new(1.0, 0.0, 0.0), &mut rng).len(), 1);
    }
}
