//! List upcoming trips use case

use itinera_domain::Trip;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::TripBackend;
use crate::session::SessionContext;

/// Lists the signed-in user's future trips, soonest first.
pub struct ListUpcomingTrips<B> {
    backend: B,
    session: SessionContext,
}

impl<B: TripBackend> ListUpcomingTrips<B> {
    /// Creates a new `ListUpcomingTrips` use case.
    pub const fn new(backend: B, session: SessionContext) -> Self {
        Self { backend, session }
    }

    /// Executes the use case.
    ///
    /// Trips without a start date are listed last, in backend order.
    ///
    /// # Errors
    /// Returns `NotSignedIn` when no principal is active, or the backend error.
    pub async fn execute(&self) -> ApplicationResult<Vec<Trip>> {
        if self.session.user().is_none() {
            return Err(ApplicationError::NotSignedIn);
        }

        let mut trips = self.backend.future_trips().await?;
        trips.sort_by_key(|trip| (trip.start_date.is_none(), trip.start_date));
        Ok(trips)
    }
}
