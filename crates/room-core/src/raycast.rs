use crate::scene::{MeshId, SceneGraph};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a world-space ray through a normalized device coordinate.
    ///
    /// `inv_view_proj` is the inverse of `projection * view`; the ray starts
    /// on the near plane and points toward the far plane.
    pub fn from_ndc(ndc: Vec2, inv_view_proj: Mat4) -> Self {
        let p_near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Self {
            origin: p0,
            dir: (p1 - p0).normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Same ray expressed in the space described by `inverse` (not renormalized,
    /// so parameters stay comparable after the caller maps hits back).
    pub fn transformed(&self, inverse: Mat4) -> Self {
        Self {
            origin: inverse.transform_point3(self.origin),
            dir: inverse.transform_vector3(self.dir),
        }
    }
}

/// Slab test; returns the entry distance (or 0 when starting inside).
#[inline]
pub fn ray_aabb(ray: &Ray, bounds: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.dir[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        if d.abs() < 1e-12 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Moller-Trumbore, double-sided.
#[inline]
pub fn ray_triangle(ray: &Ray, tri: &[Vec3; 3]) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-9 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub mesh: MeshId,
    pub distance: f32,
    pub point: Vec3,
}

/// Intersect `ray` against the listed meshes only and return the nearest hit.
pub fn intersect_meshes(scene: &SceneGraph, ids: &[MeshId], ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for &id in ids {
        let Some(node) = scene.get(id) else {
            continue;
        };
        let world = node.world_matrix();
        if world.determinant().abs() < 1e-12 {
            continue;
        }
        let local = ray.transformed(world.inverse());
        let Some(t_box) = ray_aabb(&local, &node.collider.bounds) else {
            continue;
        };
        let t_local = if node.collider.triangles.is_empty() {
            Some(t_box)
        } else {
            node.collider
                .triangles
                .iter()
                .filter_map(|tri| ray_triangle(&local, tri))
                .min_by(|a, b| a.total_cmp(b))
        };
        let Some(t_local) = t_local else {
            continue;
        };
        let point = world.transform_point3(local.at(t_local));
        let distance = (point - ray.origin).length();
        match best {
            Some(b) if distance >= b.distance => {}
            _ => {
                best = Some(Hit {
                    mesh: id,
                    distance,
                    point,
                })
            }
        }
    }
    best
}
