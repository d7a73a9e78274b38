use crate::{filter::FilterEdit, vehicle::VehicleId};
use chrono::{DateTime, Utc};

/// Everything that can change what the listing shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    FilterEdited(FilterEdit),
    FiltersReset,
    FavouriteToggled(VehicleId),
    ClockTicked(DateTime<Utc>),
    #[cfg(test)]
    Test,
}
