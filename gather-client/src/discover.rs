use gather_core::{Coordinates, distance_km};

use crate::{
    EventFilter, EventsClient, HttpError, JsonEvent,
    location::LocationProvider,
};

/// An event as presented to the user, annotated with the distance from the
/// user's location when both positions are known.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveredEvent {
    pub event: JsonEvent,
    pub distance: Option<f64>,
}

/// Without a user location every event passes through unannotated.
pub fn add_distances(
    events: Vec<JsonEvent>,
    user_location: Option<&Coordinates>,
) -> Vec<DiscoveredEvent> {
    events
        .into_iter()
        .map(|event| {
            let distance = user_location.and_then(|user| {
                event
                    .coordinates()
                    .map(|target| distance_km(user, &target))
            });
            DiscoveredEvent { event, distance }
        })
        .collect()
}

/// Stable ascending sort by distance; events without one keep their relative
/// order after all annotated events.
pub fn sort_by_distance(events: &mut [DiscoveredEvent]) {
    events.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(dist_a), Some(dist_b)) => dist_a
            .partial_cmp(&dist_b)
            .unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Lists events and annotates them with distances. Location acquisition runs
/// concurrently with the listing and never delays it.
pub async fn discover(
    client: &EventsClient,
    provider: &(impl LocationProvider + Sync),
    filter: &EventFilter,
    sort: bool,
) -> Result<Vec<DiscoveredEvent>, HttpError> {
    let (events, user_location) =
        tokio::join!(client.list_events(filter), provider.current_location());

    let mut events = add_distances(events?, user_location.as_ref());
    if sort && user_location.is_some() {
        sort_by_distance(&mut events);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(id: u32, coordinates: Option<Coordinates>) -> JsonEvent {
        JsonEvent {
            id,
            title: format!("Event {}", id),
            description: String::new(),
            location: "Somewhere".to_string(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            date: "2025-11-20T18:30:00".to_string(),
            max_participants: 10,
            current_participants: 0,
        }
    }

    fn discovered(id: u32, distance: Option<f64>) -> DiscoveredEvent {
        DiscoveredEvent {
            event: sample_event(id, None),
            distance,
        }
    }

    #[test]
    fn test_add_distances_without_location() {
        let events = vec![
            sample_event(1, Some(Coordinates::new(25.7617, -80.1918))),
            sample_event(2, None),
        ];

        let discovered = add_distances(events, None);
        assert!(discovered.iter().all(|event| event.distance.is_none()));
    }

    #[test]
    fn test_add_distances_annotates_located_events() {
        let miami = Coordinates::new(25.7617, -80.1918);
        let events = vec![
            sample_event(1, Some(miami)),
            sample_event(2, None),
            sample_event(3, Some(Coordinates::new(40.7128, -74.0060))),
        ];

        let discovered = add_distances(events, Some(&miami));
        assert_eq!(discovered[0].distance, Some(0.0));
        assert_eq!(discovered[1].distance, None);

        let to_new_york = discovered[2].distance.expect("Expected a distance");
        assert!((to_new_york - 1755.0).abs() < 30.0);
    }

    #[test]
    fn test_sort_by_distance_puts_unknown_last() {
        let mut events = vec![
            discovered(1, Some(5.0)),
            discovered(2, None),
            discovered(3, Some(2.0)),
        ];

        sort_by_distance(&mut events);

        let order: Vec<(u32, Option<f64>)> = events
            .iter()
            .map(|event| (event.event.id, event.distance))
            .collect();
        assert_eq!(order, vec![(3, Some(2.0)), (1, Some(5.0)), (2, None)]);
    }

    #[test]
    fn test_sort_by_distance_is_stable_for_unknown() {
        let mut events = vec![
            discovered(1, None),
            discovered(2, Some(3.0)),
            discovered(3, None),
        ];

        sort_by_distance(&mut events);

        let ids: Vec<u32> = events.iter().map(|event| event.event.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
