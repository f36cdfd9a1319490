//! Location provider interface

use crate::core::GeoPoint;
use crate::hardware::ProviderResult;
use serde::{Deserialize, Serialize};

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Abstraction over the platform geolocation service
pub trait LocationProvider {
    /// Whether location permission has already been granted
    fn is_permission_granted(&self) -> bool;

    /// Ask for location permission
    fn request_permission(&mut self) -> PermissionStatus;

    /// One-shot position fix.
    ///
    /// May block for as long as the platform takes; no timeout is imposed
    /// by the caller.
    fn current_position(&mut self) -> ProviderResult<GeoPoint>;
}
