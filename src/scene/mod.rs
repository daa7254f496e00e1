//! Scene objects used by the preview
//!
//! - [`Actor`]: the instantiated model, a root transform plus flat renderable parts
//! - [`ActorTemplate`]: the shareable blueprint an actor is created from
//! - [`ActorFactory`]: instantiate/destroy seam, with [`ActorPool`] as default
//! - [`Transform`]: TRS component
//! - [`Camera`]: perspective preview camera

pub mod actor;
pub mod camera;
pub mod factory;
pub mod transform;

pub use actor::{Actor, ActorPart, ActorTemplate, Animator, PartTemplate};
pub use camera::Camera;
pub use factory::{ActorFactory, ActorPool};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ActorKey;
}
