use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    contact::{normalize, validate},
    domain::{Service, ServiceId},
    error::{ApiError, ErrorCode},
    protocol::{ContactRequest, ContactResponse, ServicesResponse},
};
use tracing::{info, warn};

use crate::app_state::AppState;

pub const CONTACT_ACCEPTED: &str = "Thank you! We'll get back to you within 24 hours.";

pub async fn submit_contact(payload: Result<Json<ContactRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    let errors = validate(&request);
    if !errors.is_empty() {
        warn!(count = errors.len(), "contact submission failed validation");
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::rejected(errors.join(" "))),
        )
            .into_response();
    }

    let request = normalize(request);
    info!(
        name = %request.name,
        email = %request.email,
        business = request.business.as_deref().unwrap_or("-"),
        message_len = request.message.chars().count(),
        "contact submission received"
    );
    Json(ContactResponse::accepted(CONTACT_ACCEPTED)).into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let (status, code) = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::PayloadTooLarge)
    } else {
        (StatusCode::BAD_REQUEST, ErrorCode::Validation)
    };
    let detail = rejection.body_text();
    warn!(%status, error = %detail, "rejected contact payload");
    (status, Json(ApiError::new(code, detail))).into_response()
}

pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<ServicesResponse> {
    Json(ServicesResponse {
        success: true,
        data: state.services.as_ref().clone(),
    })
}

pub async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "API endpoint not found")),
    )
}

pub fn default_services() -> Vec<Service> {
    let service = |id: &str, title: &str, description: &str, features: &[&str]| Service {
        id: ServiceId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    };

    vec![
        service(
            "web-design",
            "Website Design",
            "Modern, mobile-friendly websites built around your business.",
            &["Responsive layout", "Search engine basics", "Contact forms"],
        ),
        service(
            "branding",
            "Brand Identity",
            "A consistent look for your business online and in print.",
            &["Logo refresh", "Color palette", "Typography guide"],
        ),
        service(
            "maintenance",
            "Care & Maintenance",
            "Ongoing updates so your site stays fast and secure.",
            &["Content updates", "Uptime monitoring", "Monthly reports"],
        ),
    ]
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
