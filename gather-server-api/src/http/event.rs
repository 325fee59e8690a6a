use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use gather_core::Coordinates;
use gather_server_domain::{
    ServiceError,
    app::AppState,
    event::{CreateEvent, Event, EventId, EventQuery},
};

use crate::ApiError;

#[derive(serde::Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JsonEvent {
    id: EventId,
    title: String,
    description: String,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    date: String,
    max_participants: u32,
    current_participants: u32,
}

impl From<Event> for JsonEvent {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            latitude: event.coordinates.map(|c| c.latitude),
            longitude: event.coordinates.map(|c| c.longitude),
            date: event.date,
            max_participants: event.max_participants,
            current_participants: event.current_participants,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreateEvent {
    title: String,
    description: Option<String>,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    date: String,
    max_participants: u32,
}

impl From<JsonCreateEvent> for CreateEvent {
    fn from(value: JsonCreateEvent) -> Self {
        let coordinates = match (value.latitude, value.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Self {
            title: value.title,
            description: value.description,
            location: value.location,
            coordinates,
            date: value.date,
            max_participants: value.max_participants,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonEventFilter {
    location: Option<String>,
    search: Option<String>,
}

pub async fn list_events(
    State(app_state): State<AppState>,
    Query(filter): Query<JsonEventFilter>,
) -> Json<Vec<JsonEvent>> {
    let query = EventQuery {
        location: filter.location,
        search: filter.search,
    };
    let events = app_state.event_service.list_events(&query);
    Json(events.into_iter().map(JsonEvent::from).collect())
}

pub async fn get_event(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonEvent>, ApiError> {
    let event = app_state.event_service.get_event(&parse_event_id(&id)?)?;
    Ok(Json(event.into()))
}

pub async fn create_event(
    State(app_state): State<AppState>,
    Json(request): Json<JsonCreateEvent>,
) -> Result<(StatusCode, Json<JsonEvent>), ApiError> {
    let event = app_state.event_service.create_event(request.into())?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn register(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonEvent>, ApiError> {
    let event = app_state
        .event_service
        .register_participant(&parse_event_id(&id)?)?;
    Ok(Json(event.into()))
}

// A non-numeric id can never match a stored event, so it surfaces as
// not-found rather than a validation error.
fn parse_event_id(id: &str) -> Result<EventId, ServiceError> {
    id.parse::<EventId>()
        .map_err(|_| ServiceError::NotFound("Event not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_event_wire_format() {
        let event = Event {
            id: 1,
            title: "React Conference 2025".to_string(),
            description: "Annual conference for React developers.".to_string(),
            location: "Miami".to_string(),
            coordinates: Some(Coordinates::new(25.7617, -80.1918)),
            date: "2025-12-10T09:00:00".to_string(),
            max_participants: 100,
            current_participants: 45,
        };

        let value = serde_json::to_value(JsonEvent::from(event)).expect("Failed to serialize");
        assert_eq!(value["id"], 1);
        assert_eq!(value["maxParticipants"], 100);
        assert_eq!(value["currentParticipants"], 45);
        assert_eq!(value["latitude"], 25.7617);
        assert_eq!(value["longitude"], -80.1918);
    }

    #[test]
    fn test_json_event_omits_absent_coordinates() {
        let event = Event {
            id: 2,
            title: "Node.js Meetup".to_string(),
            description: String::new(),
            location: "Online".to_string(),
            coordinates: None,
            date: "2025-11-20T18:30:00".to_string(),
            max_participants: 50,
            current_participants: 30,
        };

        let value = serde_json::to_value(JsonEvent::from(event)).expect("Failed to serialize");
        assert!(value.get("latitude").is_none());
        assert!(value.get("longitude").is_none());
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        assert_eq!(
            parse_event_id("abc"),
            Err(ServiceError::NotFound("Event not found".to_string()))
        );
        assert_eq!(parse_event_id("3"), Ok(3));
    }
}
