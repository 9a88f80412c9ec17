//! Surface registry: the last declared parameters of every surface.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use log::{debug, info};

use crate::{geometry::Geometry, payload::Payload};

/// What a surface was last declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub geometry: Geometry,
    pub payload: Payload,
}

/// Maps surface ids to their declarations.
///
/// Declarations are last-writer-wins. The registry is shared by reference
/// and guarded by a mutex; every access holds the lock only for the copy.
#[derive(Debug, Default)]
pub struct Registry {
    surfaces: Mutex<HashMap<String, Declaration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a declaration, returning the one it replaced.
    pub fn insert(&self, id: impl Into<String>, declaration: Declaration) -> Option<Declaration> {
        let id = id.into();
        let previous = self.lock().insert(id.clone(), declaration);
        if previous.is_some() {
            info!(id = id.as_str(); "Redeclared surface");
        } else {
            debug!(id = id.as_str(); "Declared surface");
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<Declaration> {
        self.lock().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Declaration> {
        self.lock().remove(id)
    }

    /// Applies `f` to a stored declaration in place.
    pub fn modify<R>(&self, id: &str, f: impl FnOnce(&mut Declaration) -> R) -> Option<R> {
        self.lock().get_mut(id).map(f)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Declaration>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
