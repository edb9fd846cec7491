use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Service;

pub const CONTACT_ROUTE: &str = "/contact";
pub const SERVICES_ROUTE: &str = "/api/services";
pub const HEALTH_ROUTE: &str = "/health";
pub const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    pub message: String,
}

/// Reply to `POST /contact`. Callers treat anything but `success == true` as failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesResponse {
    pub success: bool,
    pub data: Vec<Service>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
}

pub fn is_api_path(path: &str) -> bool {
    path == API_PREFIX.trim_end_matches('/') || path.starts_with(API_PREFIX)
}
