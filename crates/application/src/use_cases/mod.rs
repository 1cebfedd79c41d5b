//! Use cases - Application business logic orchestration
//!
//! Each use case represents a single user action or workflow.
//! Use cases coordinate between domain logic and infrastructure through ports.

mod list_upcoming_trips;
mod load_trip_itinerary;

pub use list_upcoming_trips::ListUpcomingTrips;
pub use load_trip_itinerary::{LoadTripItinerary, TripItinerary};

#[cfg(test)]
mod test_support;
