use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

use crate::types::Package;

/// Packages keyed by package name.
///
/// Two directories declaring the same package name share one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    packages: BTreeMap<String, Package>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. If an entry with the same name exists, the new
    /// imports, functions and interfaces are appended to it as-is; no
    /// duplicate suppression happens across entries.
    pub fn absorb(&mut self, pkg: Package) {
        match self.packages.entry(pkg.name.clone()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(pkg);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.imports.extend(pkg.imports);
                existing.funcs.extend(pkg.funcs);
                existing.interfaces.extend(pkg.interfaces);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Package> {
        self.packages.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in name order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }
}

impl IntoIterator for Registry {
    type Item = (String, Package);
    type IntoIter = btree_map::IntoIter<String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}

impl FromIterator<Package> for Registry {
    fn from_iter<T: IntoIterator<Item = Package>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for pkg in iter {
            registry.absorb(pkg);
        }
        registry
    }
}
