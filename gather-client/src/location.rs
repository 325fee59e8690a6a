use std::time::Duration;

use async_trait::async_trait;
use gather_core::Coordinates;
use log::warn;

const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);
const LOCATION_CACHE_TTL: Duration = Duration::from_secs(300);

/// Source of the user's current position. Absence of a location is a normal
/// outcome, never an error.
#[async_trait]
pub trait LocationProvider {
    async fn current_location(&self) -> Option<Coordinates>;
}

/// Wraps a provider with the acquisition timeout and a short-lived cache so
/// repeated queries do not hit the underlying source.
pub struct CachedLocationProvider<P> {
    inner: P,
    cache: moka::sync::Cache<(), Coordinates>,
}

impl<P> CachedLocationProvider<P>
where
    P: LocationProvider + Send + Sync,
{
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: moka::sync::Cache::builder()
                .time_to_live(LOCATION_CACHE_TTL)
                .build(),
        }
    }
}

#[async_trait]
impl<P> LocationProvider for CachedLocationProvider<P>
where
    P: LocationProvider + Send + Sync,
{
    async fn current_location(&self) -> Option<Coordinates> {
        if let Some(cached) = self.cache.get(&()) {
            return Some(cached);
        }
        let location =
            match tokio::time::timeout(LOCATION_TIMEOUT, self.inner.current_location()).await {
                Ok(location) => location,
                Err(_) => {
                    warn!("Timed out acquiring user location");
                    None
                }
            };
        if let Some(location) = location {
            self.cache.insert((), location);
        }
        location
    }
}

/// Reads the position from `GATHER_USER_LAT` / `GATHER_USER_LON`. Stands in
/// for a device location source in headless environments.
pub struct EnvLocationProvider;

#[async_trait]
impl LocationProvider for EnvLocationProvider {
    async fn current_location(&self) -> Option<Coordinates> {
        let latitude = std::env::var("GATHER_USER_LAT").ok()?.parse().ok()?;
        let longitude = std::env::var("GATHER_USER_LON").ok()?.parse().ok()?;
        Some(Coordinates::new(latitude, longitude))
    }
}

#[derive(Clone, Default)]
pub struct MockLocationProvider {
    pub location: Option<Coordinates>,
    pub calls: std::sync::Arc<std::sync::Mutex<u32>>,
}

#[allow(unused)]
impl MockLocationProvider {
    pub fn with_location(location: Coordinates) -> Self {
        Self {
            location: Some(location),
            calls: Default::default(),
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LocationProvider for MockLocationProvider {
    async fn current_location(&self) -> Option<Coordinates> {
        *self.calls.lock().unwrap() += 1;
        self.location
    }
}
