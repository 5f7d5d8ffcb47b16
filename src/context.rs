//! Context ownership: [`ZoomContextManager`] and [`ContextId`].
//!
//! One [`ZoomLevelRegistry`] exists per browsing context. The manager owns
//! that mapping explicitly: contexts are created and removed by id, and
//! consumers receive their registry as an `Arc` handle instead of fetching
//! it from ambient global state.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ZoomConfig;
use crate::errors::ZoomError;
use crate::registry::ZoomLevelRegistry;

/// A unique identifier for a browsing context, represented as a UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ContextId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of the per-context zoom registries.
///
/// Created once by whatever owns the set of browsing contexts. All methods
/// take `&self`; the context table is internally synchronized.
pub struct ZoomContextManager {
    config: ZoomConfig,
    contexts: Mutex<HashMap<ContextId, Arc<ZoomLevelRegistry>>>,
}

impl ZoomContextManager {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            contexts: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new context with an empty registry seeded from the
    /// configured default zoom level.
    ///
    /// Pass `Some(id)` to create under a caller-chosen id (e.g. when the
    /// embedder already minted a context identity), `None` for a fresh one.
    pub fn create_context(&self, context_id: Option<ContextId>) -> Result<ContextId, ZoomError> {
        let mut contexts = self.contexts.lock().unwrap();

        if contexts.len() >= self.config.max_contexts {
            return Err(ZoomError::ContextLimitExceeded);
        }

        let id = context_id.unwrap_or_else(ContextId::new);
        if contexts.contains_key(&id) {
            return Err(ZoomError::ContextAlreadyExists);
        }

        let registry = Arc::new(ZoomLevelRegistry::new(self.config.default_zoom_level));
        contexts.insert(id, registry);
        log::debug!("created zoom context {id}");
        Ok(id)
    }

    /// Create a new context whose registry starts as a snapshot of
    /// `source`'s host map, scheme+host map, and default level.
    ///
    /// Used for contexts that inherit their parent's zoom configuration
    /// (e.g. an off-the-record context forked from a regular one). The two
    /// registries diverge independently afterwards, and temporary levels
    /// never cross.
    pub fn clone_context(
        &self,
        source: ContextId,
        context_id: Option<ContextId>,
    ) -> Result<ContextId, ZoomError> {
        let source_registry = self.registry(source).ok_or(ZoomError::ContextNotFound)?;

        let id = self.create_context(context_id)?;
        if let Some(registry) = self.registry(id) {
            registry.copy_from(&source_registry);
        }

        log::debug!("cloned zoom context {source} into {id}");
        Ok(id)
    }

    /// The registry for a context, as a shareable handle.
    pub fn registry(&self, id: ContextId) -> Option<Arc<ZoomLevelRegistry>> {
        let contexts = self.contexts.lock().ok()?;
        contexts.get(&id).cloned()
    }

    /// Remove a context. Handles already held onto its registry stay
    /// valid; the manager just stops handing it out.
    pub fn remove_context(&self, id: ContextId) -> Result<(), ZoomError> {
        let mut contexts = self.contexts.lock().unwrap();
        if contexts.remove(&id).is_none() {
            return Err(ZoomError::ContextNotFound);
        }

        log::debug!("removed zoom context {id}");
        Ok(())
    }

    pub fn iter(&self) -> Vec<ContextId> {
        self.contexts
            .lock()
            .map(|c| c.keys().copied().collect())
            .unwrap_or_default()
    }
}
