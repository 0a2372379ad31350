use bevy::prelude::*;

/// Clamp a blend factor into [0, 1]
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Spherical interpolation between two vectors.
///
/// The direction rotates by `t` of the angle between `from` and `to` while the
/// magnitude is interpolated linearly. `t` is clamped to [0, 1] and the end
/// points are returned exactly.
pub fn slerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = clamp01(t);
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }

    let from_len = from.length();
    let to_len = to.length();
    if from_len <= f32::EPSILON || to_len <= f32::EPSILON {
        return from.lerp(to, t);
    }

    let a = from / from_len;
    let b = to / to_len;
    let length = from_len + (to_len - from_len) * t;
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();

    let direction = if angle < 1e-5 {
        a.lerp(b, t).normalize_or_zero()
    } else if std::f32::consts::PI - angle < 1e-5 {
        // Antiparallel: any perpendicular axis is a valid great circle
        Quat::from_axis_angle(a.any_orthonormal_vector(), angle * t) * a
    } else {
        let sin_angle = angle.sin();
        a * (((1.0 - t) * angle).sin() / sin_angle) + b * ((t * angle).sin() / sin_angle)
    };

    direction * length
}

/// Ray-sphere intersection test
/// Returns Some((distance, hit_point)) if ray intersects sphere, None otherwise
pub fn ray_sphere_intersection(
    ray_origin: Vec3,
    ray_direction: Vec3,
    sphere_center: Vec3,
    sphere_radius: f32,
) -> Option<(f32, Vec3)> {
    let oc = ray_origin - sphere_center;
    let a = ray_direction.dot(ray_direction);
    let b = 2.0 * oc.dot(ray_direction);
    let c = oc.dot(oc) - sphere_radius * sphere_radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    // Entry point first, exit point if the origin is inside the sphere
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t > 0.0 {
        return Some((t, ray_origin + ray_direction * t));
    }

    let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
    if t2 > 0.0 {
        return Some((t2, ray_origin + ray_direction * t2));
    }

    None
}

/// Ray intersection with the horizontal plane `y = plane_height`
pub fn ray_ground_intersection(
    ray_origin: Vec3,
    ray_direction: Vec3,
    plane_height: f32,
) -> Option<(f32, Vec3)> {
    // Ray equation: P = origin + t * direction, solve for P.y = plane_height
    if ray_direction.y.abs() < 0.0001 {
        // Ray is parallel to ground, no intersection
        return None;
    }

    let t = (plane_height - ray_origin.y) / ray_direction.y;
    if t > 0.0 {
        Some((t, ray_origin + ray_direction * t))
    } else {
        // Intersection is behind the ray origin
        None
    }
}

/// Calculate horizontal distance between two points (ignoring Y axis)
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
