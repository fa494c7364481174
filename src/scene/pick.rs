//! CPU ray picking against scene primitives.
//!
//! Tests a world-space ray against every pickable node and returns the
//! nearest hit. Triangles are double-sided; cylinders are tested as
//! capsules around their axis segment.

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::{NodeId, Scene, Shape};

/// Hits closer than this along the ray are ignored.
const MIN_HIT_DISTANCE: f32 = 1e-6;

/// A world-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction (zero for a degenerate ray, which hits nothing).
    pub direction: Vec3,
}

impl Ray {
    /// A ray from `origin` along `direction` (normalized here).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// A ray through `origin` toward `target`.
    #[must_use]
    pub fn through(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Convert a screen position to a world-space ray through the inverse
    /// view-projection matrix. `screen` is in pixels with y pointing down.
    #[must_use]
    pub fn from_screen(screen: Vec2, viewport: Vec2, view_proj: Mat4) -> Self {
        // Convert to NDC (-1 to 1), y flipped for screen coordinates
        let ndc_x = (screen.x / viewport.x) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen.y / viewport.y) * 2.0;

        let inv_view_proj = view_proj.inverse();
        let world_near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let world_far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        // Perspective divide
        let near = world_near.truncate() / world_near.w;
        let far = world_far.truncate() / world_far.w;
        Self::through(near, far)
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest primitive hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The primitive hit.
    pub node: NodeId,
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl Scene {
    /// Nearest pickable node along `ray`. Use [`Scene::lineage`] on the
    /// hit node for its ownership chain.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        if ray.direction == Vec3::ZERO {
            return None;
        }
        self.iter()
            .filter(|(_, node)| node.pickable)
            .filter_map(|(id, node)| {
                intersect_shape(ray, &node.shape).map(|t| (id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, distance)| RayHit {
                node,
                distance,
                point: ray.at(distance),
            })
    }
}

fn intersect_shape(ray: &Ray, shape: &Shape) -> Option<f32> {
    match shape {
        Shape::Triangle { vertices, .. } => ray_triangle(ray, *vertices),
        Shape::Sphere { center, radius } => ray_sphere(ray, *center, *radius),
        Shape::Cylinder { start, end, radius } => {
            ray_capsule(ray, *start, *end, *radius)
        }
        Shape::Group | Shape::Label(_) => None,
    }
}

/// Möller–Trumbore, double-sided.
fn ray_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > MIN_HIT_DISTANCE).then_some(t)
}

/// Distance to the first intersection, or the far one when the origin is
/// inside the sphere.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t > MIN_HIT_DISTANCE {
        Some(t)
    } else {
        // Try the far intersection (we're inside the sphere)
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        (t2 > MIN_HIT_DISTANCE).then_some(t2)
    }
}

/// Distance to where the ray enters the capsule of `radius` around the
/// segment: the nearest of the side wall and the two end caps.
fn ray_capsule(ray: &Ray, start: Vec3, end: Vec3, radius: f32) -> Option<f32> {
    let axis = end - start;
    let axis_len_sq = axis.length_squared();
    if axis_len_sq < 1e-12 {
        return ray_sphere(ray, start, radius);
    }
    let d = ray.direction;
    let w = ray.origin - start;
    let de = d.dot(axis);
    let we = w.dot(axis);

    // Infinite cylinder, scaled by |axis|^2 to avoid normalizing
    let a = axis_len_sq * d.dot(d) - de * de;
    let b = axis_len_sq * w.dot(d) - we * de;
    let c = axis_len_sq * (w.dot(w) - radius * radius) - we * we;

    let mut nearest: Option<f32> = None;
    let mut consider = |t: f32| {
        if t > MIN_HIT_DISTANCE && nearest.is_none_or(|best| t < best) {
            nearest = Some(t);
        }
    };

    // Parallel rays can only enter through a cap
    if a.abs() > 1e-12 {
        let discriminant = b * b - a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / a, (-b + root) / a] {
                let s = (we + t * de) / axis_len_sq;
                if (0.0..=1.0).contains(&s) {
                    consider(t);
                }
            }
        }
    }
    for cap in [start, end] {
        if let Some(t) = ray_sphere(ray, cap, radius) {
            consider(t);
        }
    }
    nearest
}
