//! Filter option derivation
//!
//! Each axis is restricted only by the *other* axis' selection, so the
//! make and model choices can never lock each other into an empty state.
use crate::{filter::FilterSelection, vehicle::Catalog};
use std::collections::HashSet;

/// Makes offered for `selection`, narrowed by its model only
pub fn available_makes(catalog: &Catalog, selection: &FilterSelection) -> Vec<String> {
    let model = selection.model();
    distinct(
        catalog
            .entries()
            .iter()
            .filter(|entry| model.map_or(true, |model| entry.vehicle.model == model))
            .map(|entry| entry.vehicle.make.as_str()),
    )
}

/// Models offered for `selection`, narrowed by its make only
pub fn available_models(catalog: &Catalog, selection: &FilterSelection) -> Vec<String> {
    let make = selection.make();
    distinct(
        catalog
            .entries()
            .iter()
            .filter(|entry| make.map_or(true, |make| entry.vehicle.make == make))
            .map(|entry| entry.vehicle.model.as_str()),
    )
}

/// De-duplicate keeping first-seen order
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_owned)
        .collect()
}
