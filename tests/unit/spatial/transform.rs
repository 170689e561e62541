//! Tests for draw transform construction

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};
    use signalgrid::spatial::transform::Transform;

    // Tests sphere transforms are uniformly scaled and unrotated
    // Verified by scaling only the x axis
    #[test]
    fn test_sphere_is_uniform() {
        let sphere = Transform::sphere(Vec3::new(1.0, 0.5, -2.0), 0.1);

        assert_eq!(sphere.translation, Vec3::new(1.0, 0.5, -2.0));
        assert_eq!(sphere.scale, Vec3::splat(0.1));
        assert_eq!(sphere.rotation, Quat::IDENTITY);
    }

    // Tests a line spans exactly from its base up to the requested height
    // Verified by using the full height as the y scale
    #[test]
    fn test_line_spans_base_to_height() {
        let base = Vec3::new(0.5, 0.0, 0.5);
        let line = Transform::line(base, 1.2, 0.02);

        assert!((line.translation.y - 0.6).abs() < 1e-6);
        assert!((line.scale.y - 0.6).abs() < 1e-6);
        assert!((line.scale.x - 0.02).abs() < f32::EPSILON);
        assert!((line.scale.z - 0.02).abs() < f32::EPSILON);

        let matrix = line.to_matrix();
        let bottom = matrix.transform_point3(Vec3::new(0.0, -1.0, 0.0));
        let top = matrix.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(bottom.distance(base) < 1e-5);
        assert!(top.distance(base + Vec3::Y * 1.2) < 1e-5);
    }

    // Tests the matrix scales before translating
    // Verified by composing translation before scale
    #[test]
    fn test_matrix_scales_then_translates() {
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
        let point = transform.to_matrix().transform_point3(Vec3::ONE);
        assert!(point.distance(Vec3::new(3.0, 4.0, 5.0)) < 1e-5);
    }

    // Tests the default transform is the identity
    // Verified by defaulting the scale to zero
    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert!(
            Transform::IDENTITY
                .to_matrix()
                .abs_diff_eq(glam::Mat4::IDENTITY, 1e-6)
        );
    }
}
