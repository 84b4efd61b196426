use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LocationError,
    model::{Coordinates, LocationSpec},
};

pub const DEFAULT_FALLBACK_CITY: &str = "London";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Restricted,
    Undetermined,
}

/// Device position source.
#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// One-shot lookup of where to show weather for.
///
/// Anything other than a granted permission followed by a successful read
/// falls back to `fallback_city`.
pub async fn resolve_initial_location(
    service: &dyn LocationService,
    fallback_city: &str,
) -> LocationSpec {
    let status = service.request_permission().await;
    if status != PermissionStatus::Granted {
        tracing::info!(
            ?status,
            fallback_city,
            "location permission not granted, using fallback city"
        );
        return LocationSpec::City(fallback_city.to_string());
    }

    match service.current_position().await {
        Ok(coords) => LocationSpec::Coordinates(coords),
        Err(err) => {
            tracing::warn!(error = %err, fallback_city, "reading device position failed");
            LocationSpec::City(fallback_city.to_string())
        }
    }
}

/// A position known up front, treated as a granted device fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coords: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl LocationService for FixedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// No positioning available; permission is never granted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationService for NoLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Undetermined
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct GrantedButBroken;

    #[async_trait]
    impl LocationService for GrantedButBroken {
        async fn request_permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }

        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::Unavailable("no fix".into()))
        }
    }

    #[derive(Debug)]
    struct Status(PermissionStatus);

    #[async_trait]
    impl LocationService for Status {
        async fn request_permission(&self) -> PermissionStatus {
            self.0
        }

        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Ok(Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            })
        }
    }

    #[tokio::test]
    async fn granted_permission_uses_coordinates() {
        let spec =
            resolve_initial_location(&FixedLocation::new(48.85, 2.35), DEFAULT_FALLBACK_CITY)
                .await;
        assert_eq!(
            spec,
            LocationSpec::Coordinates(Coordinates {
                latitude: 48.85,
                longitude: 2.35
            })
        );
    }

    #[tokio::test]
    async fn denial_falls_back_to_london() {
        let spec = resolve_initial_location(&NoLocation, DEFAULT_FALLBACK_CITY).await;
        assert_eq!(spec, LocationSpec::City("London".into()));
    }

    #[tokio::test]
    async fn every_non_granted_status_falls_back() {
        for status in [
            PermissionStatus::Denied,
            PermissionStatus::Restricted,
            PermissionStatus::Undetermined,
        ] {
            let spec = resolve_initial_location(&Status(status), "Lisbon").await;
            assert_eq!(spec, LocationSpec::City("Lisbon".into()));
        }
    }

    #[tokio::test]
    async fn position_error_falls_back() {
        let spec = resolve_initial_location(&GrantedButBroken, DEFAULT_FALLBACK_CITY).await;
        assert_eq!(spec, LocationSpec::City("London".into()));
    }
}
