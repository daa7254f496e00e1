use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::SlotMap;

use crate::errors::{PreviewError, Result};
use crate::scene::actor::{Actor, ActorTemplate};
use crate::scene::ActorKey;

/// Turns actor templates into live actors and tears them down again.
///
/// A preview session calls [`instantiate`](Self::instantiate) when it opens and
/// [`destroy`](Self::destroy) exactly once for every actor it received.
pub trait ActorFactory {
    fn instantiate(&mut self, template: &ActorTemplate) -> Result<Actor>;

    fn destroy(&mut self, actor: Actor);
}

#[derive(Debug, Default)]
struct PoolInner {
    live: SlotMap<ActorKey, String>,
    capacity: Option<usize>,
}

/// Default factory that keeps a registry of live actors.
///
/// Cloning the pool yields another handle to the same registry, which lets
/// the owner of a session observe how many actors are still alive.
#[derive(Debug, Clone, Default)]
pub struct ActorPool {
    inner: Arc<Mutex<PoolInner>>,
}

impl ActorPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool that refuses to hold more than `capacity` actors at once.
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        let pool = Self::default();
        pool.inner.lock().capacity = Some(capacity);
        pool
    }

    /// Number of actors instantiated and not yet destroyed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.lock().live.len()
    }

    #[must_use]
    pub fn is_live(&self, key: ActorKey) -> bool {
        self.inner.lock().live.contains_key(key)
    }
}

impl ActorFactory for ActorPool {
    fn instantiate(&mut self, template: &ActorTemplate) -> Result<Actor> {
        let mut inner = self.inner.lock();
        if let Some(capacity) = inner.capacity
            && inner.live.len() >= capacity
        {
            return Err(PreviewError::ActorInstantiation {
                template: template.name.clone(),
                reason: format!("actor pool is full ({capacity} live)"),
            });
        }

        let mut actor = Actor::from_template(template);
        actor.key = Some(inner.live.insert(template.name.clone()));
        log::debug!(
            "Instantiated actor '{}' ({} parts)",
            template.name,
            actor.parts().len()
        );
        Ok(actor)
    }

    fn destroy(&mut self, actor: Actor) {
        let Some(key) = actor.key else {
            log::warn!("Destroying actor '{}' that was not created by this pool", actor.name);
            return;
        };
        if self.inner.lock().live.remove(key).is_none() {
            log::warn!("Actor '{}' was already destroyed", actor.name);
        }
    }
}
