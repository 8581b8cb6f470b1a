//! Device position boundary
//!
//! The resolver only talks to positioning through [`PositionProvider`], so
//! the capability can be a real device service, an IP lookup, or a test fake.

pub mod ip;

use crate::error::Result;
use crate::location::Coordinates;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Location permission state reported by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    DeniedForever,
}

impl Default for Permission {
    fn default() -> Self {
        Self::Granted
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::DeniedForever => write!(f, "denied_forever"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "denied_forever" | "denied-forever" | "deniedforever" => Ok(Self::DeniedForever),
            _ => Err(format!("Unknown permission state: {}", s)),
        }
    }
}

/// Source of device coordinates
///
/// Every operation may fail when the runtime does not support it.
pub trait PositionProvider: Send + Sync {
    /// Whether location services are switched on
    fn is_location_service_enabled(&self) -> impl Future<Output = Result<bool>> + Send;

    /// Current permission state, without prompting
    fn check_permission(&self) -> impl Future<Output = Result<Permission>> + Send;

    /// Ask for permission; may prompt the user
    fn request_permission(&self) -> impl Future<Output = Result<Permission>> + Send;

    /// Live fix
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>> + Send;

    /// Cached fix, if the runtime has one
    fn last_known_position(&self) -> impl Future<Output = Result<Option<Coordinates>>> + Send;
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_permission_from_str() {
        assert_eq!(Permission::from_str("granted").unwrap(), Permission::Granted);
        assert_eq!(Permission::from_str("DENIED").unwrap(), Permission::Denied);
        assert_eq!(
            Permission::from_str("denied-forever").unwrap(),
            Permission::DeniedForever
        );
        assert!(Permission::from_str("maybe").is_err());
    }

    #[test]
    fn test_permission_display_roundtrip() {
        for permission in [Permission::Granted, Permission::Denied, Permission::DeniedForever] {
            assert_eq!(Permission::from_str(&permission.to_string()).unwrap(), permission);
        }
    }

    #[test]
    fn test_permission_serde() {
        let json = serde_json::to_string(&Permission::DeniedForever).unwrap();
        assert_eq!(json, "\"denied_forever\"");
    }
}
