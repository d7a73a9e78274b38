//! Filter selection and the predicate engine applying it
use crate::{
    favourites::FavouriteSet,
    options,
    vehicle::{Amount, Catalog, CatalogEntry},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Make,
    Model,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Make => "make",
            Axis::Model => "model",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{axis} {value:?} is not offered for the current selection")]
pub struct InvalidSelection {
    pub axis: Axis,
    pub value: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("minimum bid {0:?} is not a number")]
pub struct MinBidError(pub String);

/// A single user edit of the filter controls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterEdit {
    Make(Option<String>),
    Model(Option<String>),
    MinBid(Option<String>),
    FavouritesOnly(bool),
    ToggleFavouritesOnly,
}

/// The user's current filter criteria
///
/// Empty strings are stored as `None`. After every edit, [`Self::apply_edit`]
/// clears whichever of make/model is no longer offered given the other one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    make: Option<String>,
    model: Option<String>,
    min_bid: Option<String>,
    favourites_only: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterSelection {
    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn favourites_only(&self) -> bool {
        self.favourites_only
    }

    /// Parsed minimum bid; `Ok(None)` when unset
    pub fn min_bid(&self) -> Result<Option<Amount>, MinBidError> {
        let Some(raw) = self.min_bid.as_deref() else {
            return Ok(None);
        };
        match raw.trim() {
            // the only spellings of infinity a numeric text field accepts
            "Infinity" | "+Infinity" => Ok(Some(Amount::INFINITY)),
            "-Infinity" => Ok(Some(Amount::NEG_INFINITY)),
            trimmed => match trimmed.parse::<Amount>() {
                Ok(amount) if amount.is_finite() => Ok(Some(amount)),
                _ => Err(MinBidError(raw.to_owned())),
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn get(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Make => self.make(),
            Axis::Model => self.model(),
        }
    }

    fn field_mut(&mut self, axis: Axis) -> &mut Option<String> {
        match axis {
            Axis::Make => &mut self.make,
            Axis::Model => &mut self.model,
        }
    }

    /// Apply `edit` and restore the make/model invariant
    ///
    /// Returns the selections that had to be cleared.
    pub fn apply_edit(&mut self, catalog: &Catalog, edit: FilterEdit) -> Vec<InvalidSelection> {
        let edited = match edit {
            FilterEdit::Make(make) => {
                self.make = non_empty(make);
                Some(Axis::Make)
            }
            FilterEdit::Model(model) => {
                self.model = non_empty(model);
                Some(Axis::Model)
            }
            FilterEdit::MinBid(min_bid) => {
                self.min_bid = non_empty(min_bid);
                None
            }
            FilterEdit::FavouritesOnly(favourites_only) => {
                self.favourites_only = favourites_only;
                None
            }
            FilterEdit::ToggleFavouritesOnly => {
                self.favourites_only = !self.favourites_only;
                None
            }
        };
        self.correct(catalog, edited)
    }

    /// Clear make and/or model if not offered given the other axis
    ///
    /// The axis the user just edited wins: the opposite one is checked first,
    /// so `model = "X3"` clears a stale `make = "Ford"` rather than itself.
    pub fn correct(&mut self, catalog: &Catalog, edited: Option<Axis>) -> Vec<InvalidSelection> {
        let order = match edited {
            Some(Axis::Make) => [Axis::Model, Axis::Make],
            _ => [Axis::Make, Axis::Model],
        };
        order
            .into_iter()
            .filter_map(|axis| self.ensure_offered(catalog, axis))
            .collect()
    }

    fn ensure_offered(&mut self, catalog: &Catalog, axis: Axis) -> Option<InvalidSelection> {
        let current = self.get(axis)?;
        let offered = match axis {
            Axis::Make => options::available_makes(catalog, self),
            Axis::Model => options::available_models(catalog, self),
        };
        if offered.iter().any(|o| o == current) {
            return None;
        }
        self.field_mut(axis)
            .take()
            .map(|value| InvalidSelection { axis, value })
    }
}

#[cfg(test)]
impl FilterSelection {
    pub fn with_make(mut self, make: &str) -> Self {
        self.make = non_empty(Some(make.to_owned()));
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = non_empty(Some(model.to_owned()));
        self
    }

    pub fn with_min_bid(mut self, min_bid: &str) -> Self {
        self.min_bid = non_empty(Some(min_bid.to_owned()));
        self
    }

    pub fn with_favourites_only(mut self, favourites_only: bool) -> Self {
        self.favourites_only = favourites_only;
        self
    }

    pub fn min_bid_input(&self) -> Option<&str> {
        self.min_bid.as_deref()
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }
}

/// Entries of `entries` matching `selection`, in their original order
pub fn apply<'a>(
    entries: impl IntoIterator<Item = &'a CatalogEntry>,
    selection: &FilterSelection,
    favourites: &FavouriteSet,
) -> Vec<&'a CatalogEntry> {
    let min_bid = selection.min_bid().unwrap_or_else(|e| {
        debug!(error = %e, "skipping minimum bid filter");
        None
    });

    entries
        .into_iter()
        .filter(|entry| matches(entry, selection, min_bid, favourites))
        .collect()
}

fn matches(
    entry: &CatalogEntry,
    selection: &FilterSelection,
    min_bid: Option<Amount>,
    favourites: &FavouriteSet,
) -> bool {
    let vehicle = &entry.vehicle;

    selection.make().map_or(true, |make| vehicle.make == make)
        && selection.model().map_or(true, |model| vehicle.model == model)
        && min_bid.map_or(true, |min_bid| vehicle.starting_bid >= min_bid)
        && (!selection.favourites_only() || favourites.contains(entry.id))
}
