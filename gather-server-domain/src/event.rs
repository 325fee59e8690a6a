use std::sync::Arc;

use dashmap::DashMap;
use gather_core::Coordinates;
use log::info;
use validator::Validate;

use crate::{ServiceError, ServiceResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub date: String,
    pub max_participants: u32,
    pub current_participants: u32,
}

pub type EventId = u32;

/// Creation input. `description` defaults to empty, coordinates are optional;
/// everything else must be present and non-empty.
#[derive(Clone, Debug, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub location: String,
    pub coordinates: Option<Coordinates>,
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(range(min = 1))]
    pub max_participants: u32,
}

/// Listing filters. Both are case-insensitive substring matches and compose
/// as logical AND.
#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    pub location: Option<String>,
    pub search: Option<String>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(location) = &self.location
            && !event
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
        {
            return false;
        }
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            if !event.title.to_lowercase().contains(&search)
                && !event.description.to_lowercase().contains(&search)
                && !event.location.to_lowercase().contains(&search)
            {
                return false;
            }
        }
        true
    }
}

pub type ArcEventService = Arc<Box<dyn EventService + Send + Sync + 'static>>;

pub trait EventService {
    fn list_events(&self, query: &EventQuery) -> Vec<Event>;
    fn get_event(&self, id: &EventId) -> ServiceResult<Event>;
    fn create_event(&self, request: CreateEvent) -> ServiceResult<Event>;
    fn register_participant(&self, id: &EventId) -> ServiceResult<Event>;
}

#[derive(Clone)]
pub struct EventServiceImpl {
    events: Arc<DashMap<EventId, Event>>,
    next_event_id: Arc<std::sync::Mutex<EventId>>,
}

impl EventServiceImpl {
    pub fn new() -> Self {
        Self {
            events: Arc::new(DashMap::new()),
            next_event_id: Arc::new(std::sync::Mutex::new(1)),
        }
    }

    pub fn with_seed_events() -> Self {
        let service = Self::new();
        let mut next_id = 1;
        for event in seed_events() {
            next_id = next_id.max(event.id + 1);
            service.events.insert(event.id, event);
        }
        *service
            .next_event_id
            .lock()
            .expect("Failed to lock event ID mutex") = next_id;
        service
    }

    fn increment_event_id(&self) -> EventId {
        let mut id_lock = self
            .next_event_id
            .lock()
            .expect("Failed to lock event ID mutex");
        let event_id = *id_lock;
        *id_lock += 1;
        event_id
    }
}

impl EventService for EventServiceImpl {
    fn list_events(&self, query: &EventQuery) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // Ids are assigned sequentially and never reused, so ascending id
        // order is insertion order.
        events.sort_by_key(|event| event.id);
        events
    }

    fn get_event(&self, id: &EventId) -> ServiceResult<Event> {
        let Some(event_ref) = self.events.get(id) else {
            return ServiceError::not_found("Event not found");
        };
        Ok(event_ref.value().clone())
    }

    fn create_event(&self, request: CreateEvent) -> ServiceResult<Event> {
        if request.validate().is_err() {
            return ServiceError::bad_request("Missing required fields");
        }
        let event_id = self.increment_event_id();
        let event = Event {
            id: event_id,
            title: request.title,
            description: request.description.unwrap_or_default(),
            location: request.location,
            coordinates: request.coordinates,
            date: request.date,
            max_participants: request.max_participants,
            current_participants: 0,
        };
        self.events.insert(event_id, event.clone());

        info!("New event {}: {}", event.id, event.title);
        Ok(event)
    }

    fn register_participant(&self, id: &EventId) -> ServiceResult<Event> {
        let Some(mut event_ref) = self.events.get_mut(id) else {
            return ServiceError::not_found("Event not found");
        };
        // Capacity check and increment happen under the entry guard.
        if event_ref.current_participants >= event_ref.max_participants {
            return ServiceError::not_possible("Event is full");
        }
        event_ref.current_participants += 1;
        Ok(event_ref.value().clone())
    }
}

/// The fixed sample set loaded on every process start.
pub fn seed_events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            title: "React Conference 2025".to_string(),
            description: "Annual conference for React developers.".to_string(),
            location: "Miami".to_string(),
            coordinates: Some(Coordinates::new(25.7617, -80.1918)),
            date: "2025-12-10T09:00:00".to_string(),
            max_participants: 100,
            current_participants: 45,
        },
        Event {
            id: 2,
            title: "Node.js Meetup".to_string(),
            description: "Monthly meetup for the Node.js community.".to_string(),
            location: "Online".to_string(),
            coordinates: None,
            date: "2025-11-20T18:30:00".to_string(),
            max_participants: 50,
            current_participants: 30,
        },
        Event {
            id: 3,
            title: "Local Art Fair".to_string(),
            description: "Discover local artists and creators.".to_string(),
            location: "Miami".to_string(),
            coordinates: Some(Coordinates::new(25.7743, -80.1937)),
            date: "2025-11-15T11:00:00".to_string(),
            max_participants: 200,
            current_participants: 112,
        },
        Event {
            id: 4,
            title: "Tech Startup Pitch Night".to_string(),
            description: "Watch innovative startups pitch their ideas.".to_string(),
            location: "San Francisco".to_string(),
            coordinates: Some(Coordinates::new(37.7749, -122.4194)),
            date: "2025-11-25T19:00:00".to_string(),
            max_participants: 150,
            current_participants: 89,
        },
        Event {
            id: 5,
            title: "Marathon Training Group".to_string(),
            description: "Weekly long run with experienced marathoners.".to_string(),
            location: "New York".to_string(),
            coordinates: Some(Coordinates::new(40.7128, -74.0060)),
            date: "2025-11-18T07:00:00".to_string(),
            max_participants: 30,
            current_participants: 22,
        },
    ]
}
