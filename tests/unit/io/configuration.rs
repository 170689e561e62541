//! Tests for configuration defaults, TOML loading and validation

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use signalgrid::SignalGridError;
    use signalgrid::io::configuration::{
        DEFAULT_GRID_MARGIN, DEFAULT_HIGH_LEVEL, DEFAULT_LOW_LEVEL, DEFAULT_TILE_SIZE,
        FALLBACK_AREA_DEPTH, FALLBACK_AREA_WIDTH, SignalGridConfig,
    };
    use std::io::Write;

    // Tests the built-in defaults pass validation with rising level thresholds
    // Verified by inverting threshold values
    #[test]
    fn test_defaults_are_valid() {
        let config = SignalGridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.low_level, DEFAULT_LOW_LEVEL);
        assert_eq!(config.high_level, DEFAULT_HIGH_LEVEL);
        assert!((config.tile_size - DEFAULT_TILE_SIZE).abs() < f32::EPSILON);
    }

    // Tests an empty document yields the defaults
    // Verified by removing serde(default)
    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SignalGridConfig::from_toml_str("").expect("empty document is valid");
        assert_eq!(config, SignalGridConfig::default());
        assert_eq!(config.margin, DEFAULT_GRID_MARGIN);
        assert_eq!(config.snap_radius, None);
    }

    // Tests partial documents override only the named keys
    // Verified by ignoring parsed values
    #[test]
    fn test_partial_toml_overrides_named_keys() {
        let config = SignalGridConfig::from_toml_str(
            "tile_size = 0.25\nmargin = 3\nsnap_radius = 0.4\nfallback_area = [5.0, 6.0]\n",
        )
        .expect("valid document");

        assert!((config.tile_size - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.margin, 3);
        assert_eq!(config.snap_radius, Some(0.4));
        assert_eq!(config.fallback_area, [5.0, 6.0]);
        assert_eq!(config.low_level, DEFAULT_LOW_LEVEL);
    }

    // Tests unknown keys and invalid values are rejected
    // Verified by removing deny_unknown_fields
    #[test]
    fn test_invalid_documents_are_rejected() {
        for document in [
            "tile_sise = 1.0",
            "tile_size = 0.0",
            "low_level = -20\nhigh_level = -40",
            "snap_radius = -1.0",
            "fallback_area = [0.0, 2.0]",
            "margin = \"wide\"",
        ] {
            let result = SignalGridConfig::from_toml_str(document);
            assert!(
                matches!(result, Err(SignalGridError::InvalidConfiguration { .. })),
                "document should be rejected: {document}"
            );
        }
    }

    // Tests loading a file and that parse errors name the file
    // Verified by dropping the path prefix in load
    #[test]
    fn test_load_from_file() {
        let mut valid = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(valid, "max_emitters = 12").expect("write config");
        let config = SignalGridConfig::load(valid.path()).expect("valid file");
        assert_eq!(config.max_emitters, 12);

        let mut invalid = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(invalid, "tile_size = -2.0").expect("write config");
        let rejected = SignalGridConfig::load(invalid.path());
        assert!(
            matches!(&rejected, Err(SignalGridError::InvalidConfiguration { reason })
                if reason.contains(&invalid.path().display().to_string())),
            "expected a configuration error naming the file, got {rejected:?}"
        );

        let missing = SignalGridConfig::load(&valid.path().with_extension("missing"));
        assert!(matches!(missing, Err(SignalGridError::FileSystem { .. })));
    }

    // Tests tracked bounds are used when usable and the fallback area otherwise
    // Verified by always returning the tracked bounds
    #[test]
    fn test_play_area_falls_back_when_bounds_unusable() {
        let config = SignalGridConfig::default();
        let fallback = Vec3::new(FALLBACK_AREA_WIDTH, 0.0, FALLBACK_AREA_DEPTH);

        let tracked = Vec3::new(3.0, 2.5, 4.0);
        assert_eq!(config.play_area(Some(tracked)), tracked);
        assert_eq!(config.play_area(None), fallback);
        assert_eq!(config.play_area(Some(Vec3::new(0.0, 0.0, 4.0))), fallback);
        assert_eq!(config.play_area(Some(Vec3::new(3.0, 0.0, f32::NAN))), fallback);
    }

    // Tests the built grid reflects the configured geometry
    // Verified by ignoring the configured margin in build_grid
    #[test]
    fn test_build_grid_uses_configuration() {
        let config = SignalGridConfig::from_toml_str("tile_size = 1.0\nmargin = 0")
            .expect("valid document");
        let grid = config
            .build_grid(Some(Vec3::new(2.0, 0.0, 2.0)))
            .expect("valid grid");
        assert_eq!(grid.point_count(), 9);

        let display = config.display_config();
        assert_eq!(display.heights, config.height_mapping());
        assert!((display.sphere_size - config.sphere_size).abs() < f32::EPSILON);
    }
}
