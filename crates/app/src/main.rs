//! Itinera - Main Entry Point
//!
//! Wires the identity provider, the authenticated gateway and the session
//! observer together, then lists the upcoming trips of the signed-in user.

use std::sync::Arc;

use itinera_application::{ListUpcomingTrips, LoadTripItinerary, SessionObserver};
use itinera_infrastructure::{
    AppConfig, AuthenticatedGateway, GatewayProvisioner, LocalIdentityProvider, RestTripBackend,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!(
        base_url = %config.api_base_url(),
        provisioning = ?config.provisioning(),
        "Starting Itinera v{}",
        env!("CARGO_PKG_VERSION")
    );

    let identity = Arc::new(LocalIdentityProvider::new());
    if let Some((user, token)) = config.dev_session() {
        identity.sign_in(user.clone(), token.clone());
    }

    let gateway = Arc::new(AuthenticatedGateway::new(&config, identity.clone())?);
    let provisioner = Arc::new(GatewayProvisioner::new(
        gateway.clone(),
        config.provisioning(),
    ));
    let backend = RestTripBackend::new(gateway);

    let observer = SessionObserver::start(identity.as_ref(), provisioner);
    let _listener = observer.on_change(|session| {
        tracing::info!(
            signed_in = session.is_signed_in(),
            user = session.user().map(|user| user.label()),
            "session changed"
        );
    });

    let mut context = observer.context();
    let Some(session) = context.resolved().await else {
        tracing::error!("session observer stopped before resolving");
        return Ok(());
    };

    match backend.health().await {
        Ok(true) => tracing::info!("backend is healthy"),
        Ok(false) => tracing::warn!("backend reported an unhealthy status"),
        Err(e) => tracing::warn!(error = %e, "backend health check failed"),
    }

    if session.is_signed_in() {
        let trips = match ListUpcomingTrips::new(backend.clone(), context).execute().await {
            Ok(trips) => trips,
            Err(e) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "failed to list trips");
                observer.stop();
                return Err(e.into());
            }
        };
        tracing::info!(count = trips.len(), "upcoming trips");

        let itinerary = LoadTripItinerary::new(backend);
        for trip in &trips {
            let loaded = itinerary.execute(trip.trip_id).await?;
            tracing::info!(
                trip = %trip.name,
                start = ?trip.start_date,
                items = loaded.items.len(),
                days = loaded.by_day().len(),
                "trip"
            );
            for (day, items) in loaded.by_day() {
                for item in items {
                    tracing::info!(
                        %day,
                        kind = item.kind.item_type().label(),
                        at = %item.scheduled_at(),
                        "itinerary item"
                    );
                }
            }
        }
    } else {
        tracing::info!("no active session; set ITINERA_DEV_UID and ITINERA_DEV_ID_TOKEN to sign in");
    }

    observer.stop();
    Ok(())
}
