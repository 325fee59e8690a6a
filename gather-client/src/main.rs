use gather_client::{
    EventFilter, EventsClient,
    discover::discover,
    location::{CachedLocationProvider, EnvLocationProvider},
};
use gather_core::{DistanceUnit, format_distance};

#[tokio::main]
async fn main() {
    let client = EventsClient::from_env();
    let provider = CachedLocationProvider::new(EnvLocationProvider);

    match discover(&client, &provider, &EventFilter::default(), true).await {
        Ok(events) => {
            for discovered in events {
                let event = &discovered.event;
                let distance = discovered
                    .distance
                    .map(|d| format!(" ({})", format_distance(d, DistanceUnit::Kilometers)))
                    .unwrap_or_default();
                println!(
                    "#{} {} in {}{} [{}/{} registered]",
                    event.id,
                    event.title,
                    event.location,
                    distance,
                    event.current_participants,
                    event.max_participants
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}
