use crate::vehicle::{Catalog, VehicleId};
use serde::Serialize;
use std::collections::BTreeSet;

/// Vehicles the user marked as favourite
///
/// Seeded once from the catalog's `favourite` flags. The flags are never
/// consulted again afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavouriteSet(BTreeSet<VehicleId>);

impl FavouriteSet {
    pub fn seed(catalog: &Catalog) -> Self {
        Self(
            catalog
                .entries()
                .iter()
                .filter(|entry| entry.vehicle.favourite)
                .map(|entry| entry.id)
                .collect(),
        )
    }

    /// Flip membership of `id`, returning whether it is a favourite now
    pub fn toggle(&mut self, id: VehicleId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.0.contains(&id)
    }
}

#[cfg(test)]
impl FavouriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.0.iter().copied()
    }
}
