//! Visitor connection info supplied by the hosting layer

use serde::{Deserialize, Serialize};

pub const FALLBACK_IP: &str = "127.0.0.1";
pub const FALLBACK_CITY: &str = "Unknown City";
pub const FALLBACK_COUNTRY: &str = "Earth";
pub const FALLBACK_COLO: &str = "DEV";

/// Where the visitor connects from and which edge node served them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorInfo {
    pub ip: String,
    pub city: String,
    pub country: String,
    pub colo: String,
}

impl VisitorInfo {
    pub fn new(
        ip: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        colo: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            city: city.into(),
            country: country.into(),
            colo: colo.into(),
        }
    }

    /// Info for a visitor on the local machine (no edge network in front)
    pub fn local() -> Self {
        Self::new(FALLBACK_IP, FALLBACK_CITY, FALLBACK_COUNTRY, FALLBACK_COLO)
    }

    /// "City, Country"
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl Default for VisitorInfo {
    fn default() -> Self {
        Self::local()
    }
}
