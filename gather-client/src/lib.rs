use gather_core::Coordinates;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod discover;
pub mod location;

#[derive(Clone)]
pub struct EventsClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("Failed to serialize/deserialize message")]
    Serde(#[from] serde_json::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonEvent {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub date: String,
    pub max_participants: u32,
    pub current_participants: u32,
}

impl JsonEvent {
    /// Both coordinates, or nothing. Distance can only be computed for
    /// events with a full position.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn spots_remaining(&self) -> u32 {
        self.max_participants.saturating_sub(self.current_participants)
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreateEvent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub date: String,
    pub max_participants: u32,
}

#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    pub location: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonHealth {
    pub status: String,
    pub timestamp: String,
}

#[derive(Deserialize)]
struct JsonErrorBody {
    message: String,
}

impl EventsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Base URL from `GATHER_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GATHER_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self::new(base_url)
    }

    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<JsonEvent>, HttpError> {
        let mut request = self
            .http_client
            .get(format!("{}/api/events", self.base_url));
        if let Some(location) = &filter.location {
            request = request.query(&[("location", location)]);
        }
        if let Some(search) = &filter.search {
            request = request.query(&[("search", search)]);
        }
        let resp = request.send().await?;
        Self::decode(resp).await
    }

    pub async fn get_event(&self, id: u32) -> Result<JsonEvent, HttpError> {
        let resp = self
            .http_client
            .get(format!("{}/api/events/{}", self.base_url, id))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn create_event(&self, event: JsonCreateEvent) -> Result<JsonEvent, HttpError> {
        let body = serde_json::to_string(&event)?;
        let resp = self
            .http_client
            .post(format!("{}/api/events", self.base_url))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn register(&self, id: u32) -> Result<JsonEvent, HttpError> {
        let resp = self
            .http_client
            .put(format!("{}/api/events/{}/register", self.base_url, id))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn health(&self) -> Result<JsonHealth, HttpError> {
        let resp = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, HttpError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<JsonErrorBody>(&body)
                .map(|err| err.message)
                .unwrap_or_else(|_| "Network response was not ok".to_string());
            return Err(HttpError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> JsonEvent {
        JsonEvent {
            id: 1,
            title: "React Conference 2025".to_string(),
            description: "Annual conference for React developers.".to_string(),
            location: "Miami".to_string(),
            latitude: Some(25.7617),
            longitude: Some(-80.1918),
            date: "2025-12-10T09:00:00".to_string(),
            max_participants: 100,
            current_participants: 45,
        }
    }

    #[test]
    fn test_coordinates_require_both_fields() {
        let mut event = sample_event();
        assert!(event.coordinates().is_some());

        event.longitude = None;
        assert!(event.coordinates().is_none());
    }

    #[test]
    fn test_spots_remaining() {
        let mut event = sample_event();
        assert_eq!(event.spots_remaining(), 55);
        assert!(!event.is_full());

        event.current_participants = event.max_participants;
        assert_eq!(event.spots_remaining(), 0);
        assert!(event.is_full());
    }

    #[test]
    fn test_event_parses_wire_format() {
        let json = r#"{
            "id": 2,
            "title": "Node.js Meetup",
            "description": "Monthly meetup for the Node.js community.",
            "location": "Online",
            "date": "2025-11-20T18:30:00",
            "maxParticipants": 50,
            "currentParticipants": 30
        }"#;

        let event: JsonEvent = serde_json::from_str(json).expect("Failed to parse event");
        assert_eq!(event.id, 2);
        assert_eq!(event.max_participants, 50);
        assert!(event.coordinates().is_none());
    }
}
