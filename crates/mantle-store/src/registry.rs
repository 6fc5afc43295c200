use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};
use crate::mappable::Mappable;
use crate::mapper::Mapper;

/// Terminates every module prefix so that a module's keys never run into
/// its name.
const PREFIX_TERMINATOR: u8 = b'/';

/// Explicit registry of the modules that share one store.
///
/// Built once at startup and passed by reference. Each registration returns
/// a [`Mapper`] bound to a prefix no other module can overlap.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    prefixes: BTreeMap<String, Vec<u8>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name` and return a mapper for `M` under its prefix.
    ///
    /// Names are `[a-z0-9_-]` segments joined by `/`. A name is rejected if
    /// it is already registered or if its prefix contains, or is contained
    /// by, an existing module's prefix.
    pub fn register<M: Mappable>(&mut self, name: &str) -> StoreResult<Mapper<M>> {
        if !is_valid_name(name) {
            return Err(StoreError::InvalidModuleName(name.to_string()));
        }
        if self.prefixes.contains_key(name) {
            return Err(StoreError::DuplicateModule(name.to_string()));
        }

        let mut prefix = name.as_bytes().to_vec();
        prefix.push(PREFIX_TERMINATOR);

        if let Some((existing, _)) = self
            .prefixes
            .iter()
            .find(|(_, other)| other.starts_with(&prefix) || prefix.starts_with(other))
        {
            return Err(StoreError::PrefixCollision {
                name: name.to_string(),
                existing: existing.clone(),
            });
        }

        self.prefixes.insert(name.to_string(), prefix.clone());
        Ok(Mapper::new(name.to_string(), prefix))
    }

    /// Registered module names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prefixes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
        })
}
