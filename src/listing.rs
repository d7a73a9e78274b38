//! List projection
//!
//! Composes filtering, favourites and the countdown into the records the
//! presentation layer renders. Everything is recomputed from scratch on
//! every change; the catalog is small.
use crate::{
    auction::{AuctionState, CountdownClassifier},
    event::Event,
    favourites::FavouriteSet,
    filter::{self, FilterSelection},
    options,
    vehicle::{Catalog, SharedCatalog, VehicleId, VehicleRecord},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewRecord {
    pub id: VehicleId,
    pub vehicle: VehicleRecord,
    pub is_favourite: bool,
    pub auction_state: AuctionState,
    /// Badge text, e.g. `Auction in 1d 2h 3m 4s`
    pub label: String,
}

/// What is handed to a detail view when a listing is opened
///
/// A copy taken at selection time; later toggles don't reach it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailSnapshot {
    pub id: VehicleId,
    pub vehicle: VehicleRecord,
    pub is_favourite: bool,
}

/// Everything the listing screen needs to render one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingView {
    pub records: Vec<ViewRecord>,
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub count: usize,
    /// `N vehicles found`
    pub summary: String,
    pub selection: FilterSelection,
    pub now: DateTime<Utc>,
}

pub fn summary(count: usize) -> String {
    match count {
        1 => "1 vehicle found".to_owned(),
        n => format!("{n} vehicles found"),
    }
}

pub fn project(
    catalog: &Catalog,
    selection: &FilterSelection,
    favourites: &FavouriteSet,
    classifier: &CountdownClassifier,
    now: DateTime<Utc>,
) -> Vec<ViewRecord> {
    filter::apply(catalog.entries(), selection, favourites)
        .into_iter()
        .map(|entry| {
            let auction_state = classifier.classify(&entry.vehicle.auction_date_time, now);
            ViewRecord {
                id: entry.id,
                vehicle: entry.vehicle.clone(),
                is_favourite: favourites.contains(entry.id),
                auction_state,
                label: auction_state.label(),
            }
        })
        .collect()
}

/// Owner of all mutable listing state
///
/// Mutated only through [`Self::handle_event`].
#[derive(Clone, Debug)]
pub struct ListingState {
    catalog: SharedCatalog,
    classifier: CountdownClassifier,
    selection: FilterSelection,
    favourites: FavouriteSet,
    now: DateTime<Utc>,
}

impl ListingState {
    pub fn new(catalog: SharedCatalog, classifier: CountdownClassifier, now: DateTime<Utc>) -> Self {
        let favourites = FavouriteSet::seed(&catalog);
        Self {
            catalog,
            classifier,
            selection: FilterSelection::default(),
            favourites,
            now,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::FilterEdited(edit) => {
                for cleared in self.selection.apply_edit(&self.catalog, edit) {
                    debug!(%cleared, "selection reset");
                }
            }
            Event::FiltersReset => self.selection.reset(),
            Event::FavouriteToggled(id) => {
                if self.catalog.get(id).is_some() {
                    let favourite = self.favourites.toggle(id);
                    debug!(%id, favourite, "favourite toggled");
                } else {
                    warn!(%id, "ignoring toggle of unknown vehicle");
                }
            }
            Event::ClockTicked(now) => self.now = now,
            #[cfg(test)]
            Event::Test => {}
        }
    }

    pub fn view(&self) -> ListingView {
        let records = project(
            &self.catalog,
            &self.selection,
            &self.favourites,
            &self.classifier,
            self.now,
        );
        ListingView {
            count: records.len(),
            summary: summary(records.len()),
            records,
            makes: options::available_makes(&self.catalog, &self.selection),
            models: options::available_models(&self.catalog, &self.selection),
            selection: self.selection.clone(),
            now: self.now,
        }
    }

    pub fn detail(&self, id: VehicleId) -> Option<DetailSnapshot> {
        self.catalog.get(id).map(|entry| DetailSnapshot {
            id,
            vehicle: entry.vehicle.clone(),
            is_favourite: self.favourites.contains(id),
        })
    }

    /// Freeze the current state for readers outside the owning service
    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            view: self.view(),
            state: self.clone(),
        }
    }
}

#[cfg(test)]
impl ListingState {
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn favourites(&self) -> &FavouriteSet {
        &self.favourites
    }
}

/// Read-only copy of the listing, published after every event
#[derive(Clone, Debug)]
pub struct ListingSnapshot {
    pub view: ListingView,
    state: ListingState,
}

impl ListingSnapshot {
    pub fn detail(&self, id: VehicleId) -> Option<DetailSnapshot> {
        self.state.detail(id)
    }
}
