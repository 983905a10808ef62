//! Dynamic property storage.
//!
//! A [`PropertyStore`] is an insertion-ordered, mutable map from member name
//! to value, shared by handle. It backs `Object` values and the function
//! namespace. Each operation takes the store's lock once, so concurrent
//! readers never observe a half-applied write.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::errors::{unresolved_member, RuntimeResult};
use crate::value::Value;

type Properties<V> = IndexMap<String, V, FxBuildHasher>;

/// Shared, ordered property bag.
///
/// Cloning the handle shares the store; identity is the allocation.
pub struct PropertyStore<V> {
    properties: Arc<RwLock<Properties<V>>>,
}

/// The property store behind an `Object` value.
pub type ObjectValue = PropertyStore<Value>;

impl<V: Clone> PropertyStore<V> {
    pub fn new() -> Self {
        PropertyStore {
            properties: Arc::new(RwLock::new(IndexMap::with_hasher(FxBuildHasher))),
        }
    }

    /// Read a member, failing with `UnresolvedMember` if it is absent.
    pub fn read(&self, key: &str) -> RuntimeResult<V> {
        self.get(key).ok_or_else(|| unresolved_member(key))
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.properties.read().get(key).cloned()
    }

    /// Insert or replace a member. A new member goes to the end of the
    /// enumeration order; a replaced member keeps its position.
    pub fn write(&self, key: impl Into<String>, value: V) {
        self.properties.write().insert(key.into(), value);
    }

    /// Remove a member, failing with `UnresolvedMember` if it is absent.
    pub fn remove(&self, key: &str) -> RuntimeResult<V> {
        self.properties
            .write()
            .shift_remove(key)
            .ok_or_else(|| unresolved_member(key))
    }

    /// Read a member, inserting `init()` first if it is absent.
    ///
    /// The second element is `true` when this call inserted the member.
    pub fn get_or_insert_with(&self, key: &str, init: impl FnOnce() -> V) -> (V, bool) {
        if let Some(value) = self.get(key) {
            return (value, false);
        }
        let mut properties = self.properties.write();
        // Another writer may have won the race between the two locks.
        if let Some(value) = properties.get(key) {
            return (value.clone(), false);
        }
        let value = init();
        properties.insert(key.to_string(), value.clone());
        (value, true)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.read().contains_key(key)
    }

    /// A member can be inserted exactly when it does not exist yet.
    pub fn is_insertable(&self, key: &str) -> bool {
        !self.contains(key)
    }

    /// Member names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.properties.read().keys().cloned().collect()
    }

    /// Member values in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.properties.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }
}

impl<V> PropertyStore<V> {
    /// Whether two handles refer to the same store.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.properties, &other.properties)
    }

    /// Hash consistent with [`ptr_eq`](Self::ptr_eq).
    pub fn identity_hash(&self) -> u64 {
        Arc::as_ptr(&self.properties).cast::<()>() as usize as u64
    }
}

impl<V: Clone> Default for PropertyStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for PropertyStore<V> {
    fn clone(&self) -> Self {
        PropertyStore {
            properties: Arc::clone(&self.properties),
        }
    }
}

// Values may form cycles through objects, so only member names are printed.
impl<V> fmt::Debug for PropertyStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("members", &self.properties.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
