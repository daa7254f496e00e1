use std::sync::Arc;

use glam::{Affine3A, Vec3};
use uuid::Uuid;

use crate::resources::geometry::{BoundingBox, Mesh};
use crate::scene::transform::Transform;
use crate::scene::ActorKey;

/// Blueprint for one part of an actor.
#[derive(Debug, Clone)]
pub struct PartTemplate {
    pub name: String,
    /// `None` for pivot-only parts that animate but never render.
    pub mesh: Option<Arc<Mesh>>,
    pub color: [u8; 4],
    pub transform: Transform,
}

impl PartTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            color: [200, 200, 200, 255],
            transform: Transform::new(),
        }
    }

    /// A part with a transform but nothing to draw.
    #[must_use]
    pub fn pivot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            color: [0, 0, 0, 0],
            transform: Transform::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Shareable description of a previewable model.
///
/// A template is never rendered directly; an [`ActorFactory`](super::ActorFactory)
/// turns it into an [`Actor`] owned by a single preview session.
#[derive(Debug, Clone)]
pub struct ActorTemplate {
    pub uuid: Uuid,
    pub name: String,
    pub parts: Vec<PartTemplate>,
    /// Whether instances come with an [`Animator`] already attached.
    pub with_animator: bool,
}

impl ActorTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            parts: Vec::new(),
            with_animator: false,
        }
    }

    #[must_use]
    pub fn with_part(mut self, part: PartTemplate) -> Self {
        self.parts.push(part);
        self
    }

    #[must_use]
    pub fn with_animator(mut self) -> Self {
        self.with_animator = true;
        self
    }
}

/// A live part of an instantiated actor.
#[derive(Debug, Clone)]
pub struct ActorPart {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Arc<Mesh>>,
    pub color: [u8; 4],
}

impl ActorPart {
    /// `true` when the part has geometry to draw.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.mesh
            .as_ref()
            .is_some_and(|mesh| mesh.bounding_box().is_some())
    }
}

/// Animation-capable component of an actor.
///
/// Remembers the pose the actor had when the animator was last rebound so
/// that playback can be switched off without leaving a half-played pose.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    rest_pose: Vec<Transform>,
}

impl Animator {
    #[must_use]
    pub fn rest_pose(&self) -> &[Transform] {
        &self.rest_pose
    }
}

/// An instantiated 3D model.
#[derive(Debug)]
pub struct Actor {
    pub(crate) key: Option<ActorKey>,
    template_id: Uuid,
    pub name: String,
    pub transform: Transform,
    parts: Vec<ActorPart>,
    animator: Option<Animator>,
}

impl Actor {
    /// Builds an actor from `template` without registering it anywhere.
    ///
    /// Factories call this and then attach their own bookkeeping key.
    #[must_use]
    pub fn from_template(template: &ActorTemplate) -> Self {
        let parts = template
            .parts
            .iter()
            .map(|p| ActorPart {
                name: p.name.clone(),
                transform: p.transform,
                mesh: p.mesh.clone(),
                color: p.color,
            })
            .collect();

        let mut actor = Self {
            key: None,
            template_id: template.uuid,
            name: template.name.clone(),
            transform: Transform::new(),
            parts,
            animator: None,
        };
        if template.with_animator {
            actor.add_animator();
        }
        actor
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<ActorKey> {
        self.key
    }

    #[inline]
    #[must_use]
    pub fn template_id(&self) -> Uuid {
        self.template_id
    }

    #[must_use]
    pub fn parts(&self) -> &[ActorPart] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [ActorPart] {
        &mut self.parts
    }

    #[must_use]
    pub fn part_index(&self, name: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.name == name)
    }

    #[must_use]
    pub fn renderable_parts(&self) -> impl Iterator<Item = &ActorPart> {
        self.parts.iter().filter(|p| p.is_renderable())
    }

    // ========================================================================
    // Animator component
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn has_animator(&self) -> bool {
        self.animator.is_some()
    }

    /// Attaches an animator if none is present and returns it.
    pub fn add_animator(&mut self) -> &Animator {
        self.animator.get_or_insert_with(|| Animator {
            rest_pose: self.parts.iter().map(|p| p.transform).collect(),
        })
    }

    /// Puts every part back into the pose captured when the animator was attached.
    pub fn restore_rest_pose(&mut self) {
        if let Some(animator) = &self.animator {
            for (part, rest) in self.parts.iter_mut().zip(&animator.rest_pose) {
                part.transform = *rest;
            }
        }
    }

    // ========================================================================
    // Spatial queries
    // ========================================================================

    /// World matrix of part `index`.
    #[must_use]
    pub fn part_world_matrix(&self, index: usize) -> Option<Affine3A> {
        let part = self.parts.get(index)?;
        Some(self.transform.matrix() * part.transform.matrix())
    }

    /// Combined world-space bounds of all renderable parts.
    ///
    /// Starts as a zero-size box at the actor position, so an actor without
    /// renderable parts collapses to that point.
    #[must_use]
    pub fn world_bounds(&self) -> BoundingBox {
        let root = self.transform.matrix();
        let mut bounds = BoundingBox::from_point(self.transform.position);
        for part in &self.parts {
            let Some(local) = part.mesh.as_ref().and_then(|m| m.bounding_box()) else {
                continue;
            };
            bounds.encapsulate(&local.transform(&(root * part.transform.matrix())));
        }
        bounds
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}
