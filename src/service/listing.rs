use super::*;
use crate::listing::ListingState;
use tracing::debug;

pub const LISTING_SERVICE_ID: &str = "listing";

/// Applies logged events to the listing and publishes the result
pub struct ListingService {
    state: ListingState,
    view_store: SharedViewStore,
}

impl ListingService {
    pub fn new(state: ListingState, view_store: SharedViewStore) -> Self {
        view_store.publish(state.snapshot());
        Self { state, view_store }
    }
}

impl LogFollowerService for ListingService {
    fn service_id(&self) -> ServiceId {
        LISTING_SERVICE_ID.to_owned()
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        debug!(?event, "event");
        self.state.handle_event(event);
        self.view_store.publish(self.state.snapshot());
        Ok(())
    }
}
