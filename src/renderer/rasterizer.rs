use glam::{Mat4, Vec2, Vec3};

use crate::renderer::target::RenderTarget;
use crate::scene::{Actor, Camera};

/// Constant term of the shading, so faces turned away from the light stay visible.
const AMBIENT: f32 = 0.35;
/// Vertices closer than this in clip-space w are treated as behind the camera.
const MIN_CLIP_W: f32 = 1e-5;

/// A triangle after projection to pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct ScreenTriangle {
    points: [Vec2; 3],
    /// NDC depth per vertex, in `[0, 1]` when inside the frustum.
    depths: [f32; 3],
}

/// CPU rasterizer for preview frames.
///
/// Draws every renderable part of an actor with flat Lambert shading, a depth
/// test and back-face culling. Output is a pure function of its inputs, so
/// rendering the same pose twice gives identical pixels.
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    pub background: [u8; 4],
    /// Direction the light travels, in world space.
    pub light_direction: Vec3,
}

impl SoftwareRenderer {
    #[must_use]
    pub fn new(background: [u8; 4]) -> Self {
        Self {
            background,
            light_direction: Vec3::new(-0.4, -1.0, -0.6).normalize(),
        }
    }

    /// Clears `target` and draws `actor` as seen from `camera`.
    ///
    /// Returns the number of triangles that survived culling.
    pub fn render(&self, target: &mut RenderTarget, camera: &Camera, actor: &Actor) -> usize {
        target.clear(self.background);

        let view_projection = camera.view_projection_matrix();
        let eye = camera.transform.position;
        let size = Vec2::new(target.width() as f32, target.height() as f32);
        let mut drawn = 0;

        for (index, part) in actor.parts().iter().enumerate() {
            let Some(mesh) = part.mesh.as_ref().filter(|_| part.is_renderable()) else {
                continue;
            };
            let Some(world) = actor.part_world_matrix(index) else {
                continue;
            };

            for [a, b, c] in mesh.triangles() {
                let world_tri = [
                    world.transform_point3(a),
                    world.transform_point3(b),
                    world.transform_point3(c),
                ];
                let normal = (world_tri[1] - world_tri[0])
                    .cross(world_tri[2] - world_tri[0])
                    .normalize_or_zero();
                if normal == Vec3::ZERO || normal.dot(eye - world_tri[0]) <= 0.0 {
                    continue;
                }

                let Some(screen) = project(&view_projection, &world_tri, size) else {
                    continue;
                };

                let color = shade(part.color, normal, self.light_direction);
                rasterize(target, &screen, color);
                drawn += 1;
            }
        }

        target.finish_frame();
        drawn
    }
}

fn project(view_projection: &Mat4, tri: &[Vec3; 3], size: Vec2) -> Option<ScreenTriangle> {
    let mut points = [Vec2::ZERO; 3];
    let mut depths = [0.0; 3];
    for (i, p) in tri.iter().enumerate() {
        let clip = *view_projection * p.extend(1.0);
        // No near-plane clipping; triangles crossing the camera plane are dropped.
        if clip.w <= MIN_CLIP_W {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        points[i] = Vec2::new(
            (ndc.x * 0.5 + 0.5) * size.x,
            (0.5 - ndc.y * 0.5) * size.y,
        );
        depths[i] = ndc.z;
    }
    Some(ScreenTriangle { points, depths })
}

fn shade(base: [u8; 4], normal: Vec3, light_direction: Vec3) -> [u8; 4] {
    let lambert = normal.dot(-light_direction).max(0.0);
    let intensity = AMBIENT + (1.0 - AMBIENT) * lambert;
    let channel = |c: u8| (f32::from(c) * intensity).round().clamp(0.0, 255.0) as u8;
    [channel(base[0]), channel(base[1]), channel(base[2]), 255]
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn rasterize(target: &mut RenderTarget, tri: &ScreenTriangle, color: [u8; 4]) {
    let [p0, p1, p2] = tri.points;
    let area = edge(p0, p1, p2);
    if area.abs() < f32::EPSILON {
        return;
    }

    let max_x = target.width() as f32 - 1.0;
    let max_y = target.height() as f32 - 1.0;
    let min = p0.min(p1).min(p2).floor().max(Vec2::ZERO);
    let max = p0.max(p1).max(p2).ceil().min(Vec2::new(max_x, max_y));
    if min.x > max.x || min.y > max.y {
        return;
    }

    for y in (min.y as u32)..=(max.y as u32) {
        for x in (min.x as u32)..=(max.x as u32) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(p1, p2, p) / area;
            let w1 = edge(p2, p0, p) / area;
            let w2 = edge(p0, p1, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = w0 * tri.depths[0] + w1 * tri.depths[1] + w2 * tri.depths[2];
            if !(0.0..=1.0).contains(&depth) {
                continue;
            }
            target.write_if_nearer(x, y, depth, color);
        }
    }
}
