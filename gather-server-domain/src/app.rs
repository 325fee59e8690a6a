use std::sync::Arc;

use crate::event::{ArcEventService, EventServiceImpl};

#[derive(Clone)]
pub struct AppState {
    pub event_service: ArcEventService,
}

/// Wires up the application with the seeded in-memory store. The store is
/// owned by the service and lives for the lifetime of the process.
pub fn construct_app() -> AppState {
    let event_service: ArcEventService = Arc::new(Box::new(EventServiceImpl::with_seed_events()));

    AppState { event_service }
}
