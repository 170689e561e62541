//! Tests for inverse-distance-weighted interpolation

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use signalgrid::model::SignalModel;
    use signalgrid::model::idw::InverseDistanceModel;
    use signalgrid::scan::grid::COMPUTED_SENTINEL;

    // Tests an empty model yields the computed sentinel
    // Verified by returning zero for empty models
    #[test]
    fn test_empty_model_returns_sentinel() {
        let model = InverseDistanceModel::from_samples(Vec::<(Vec3, i32)>::new());
        assert!(model.is_empty());
        assert!((model.level_at(Vec3::ZERO) - COMPUTED_SENTINEL).abs() < f32::EPSILON);
    }

    // Tests queries at a sample position return that sample exactly
    // Verified by removing the coincident-sample shortcut
    #[test]
    fn test_sample_positions_are_exact() {
        let model = InverseDistanceModel::from_samples([
            (Vec3::new(0.0, 0.0, 0.0), -40),
            (Vec3::new(2.0, 0.0, 0.0), -80),
        ]);
        assert_eq!(model.len(), 2);
        assert!((model.level_at(Vec3::new(0.0, 1.7, 0.0)) + 40.0).abs() < f32::EPSILON);
        assert!((model.level_at(Vec3::new(2.0, 0.0, 0.0)) + 80.0).abs() < f32::EPSILON);
    }

    // Tests the midpoint of two samples is their average and estimates stay in range
    // Verified by weighting with distance instead of inverse distance
    #[test]
    fn test_estimates_are_weighted_averages() {
        let model = InverseDistanceModel::from_samples([
            (Vec3::new(0.0, 0.0, 0.0), -40),
            (Vec3::new(2.0, 0.0, 0.0), -80),
        ]);

        assert!((model.level_at(Vec3::new(1.0, 0.0, 0.0)) + 60.0).abs() < 1e-4);

        let near_strong = model.level_at(Vec3::new(0.5, 0.0, 0.0));
        assert!(near_strong > -60.0 && near_strong < -40.0);

        let far = model.level_at(Vec3::new(-5.0, 0.0, 3.0));
        assert!((-80.0..=-40.0).contains(&far));
    }

    // Tests a higher power pulls estimates toward the nearest sample
    // Verified by ignoring the configured power
    #[test]
    fn test_power_sharpens_estimates() {
        let samples = [
            (Vec3::new(0.0, 0.0, 0.0), -40),
            (Vec3::new(2.0, 0.0, 0.0), -80),
        ];
        let query = Vec3::new(0.5, 0.0, 0.0);

        let soft = InverseDistanceModel::from_samples(samples).with_power(1.0);
        let sharp = InverseDistanceModel::from_samples(samples).with_power(4.0);
        assert!(sharp.level_at(query) > soft.level_at(query));
    }
}
