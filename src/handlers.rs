use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    AppState,
    catalog::{CatalogSource, FALLBACK_NOTICE},
    error::ApiError,
    models::{ClassBooking, ContactInquiry, YogaClass},
    validation::{BookingForm, InquiryForm, validate_booking, validate_inquiry},
};

pub const BOOKING_SUCCESS: &str = "Booking request submitted! I'll contact you soon to confirm.";
pub const BOOKING_FAILURE: &str = "Sorry, there was an error with your booking. Please try again.";
pub const INQUIRY_SUCCESS: &str = "Thank you for your message! I'll get back to you soon.";
pub const INQUIRY_FAILURE: &str =
    "Sorry, there was an error sending your message. Please try again.";

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassListing {
    #[serde(flatten)]
    pub class: YogaClass,
    pub display_image: String,
}

impl From<YogaClass> for ClassListing {
    fn from(class: YogaClass) -> Self {
        let display_image = class.display_image().to_string();
        Self {
            class,
            display_image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub source: CatalogSource,
    pub notice: Option<String>,
    pub classes: Vec<ClassListing>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
}

/// Result of a booking submission. On failure the submitted form is
/// echoed back so nothing the user typed is lost.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingOutcome {
    pub status: SubmitOutcome,
    pub message: String,
    pub record: Option<ClassBooking>,
    pub form: Option<BookingForm>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryOutcome {
    pub status: SubmitOutcome,
    pub message: String,
    pub record: Option<ContactInquiry>,
    pub form: Option<InquiryForm>,
}

#[utoipa::path(get, path = "/", tag = "studio")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Yoga Studio API",
        "endpoints": {
            "/classes": "List active classes",
            "/bookings": "Submit a class booking request",
            "/inquiries": "Submit a contact inquiry"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "studio")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "studio")]
pub async fn healthz_ready(State(state): State<AppState>) -> impl IntoResponse {
    let backend = if state.client.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };
    Json(serde_json::json!({"status": "ok", "backend": backend}))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "Active classes, live or fallback", body = CatalogResponse)
    ),
    tag = "studio"
)]
pub async fn list_classes(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.client.list_active_classes().await;
    let source = catalog.source();
    let notice = catalog.is_fallback().then(|| FALLBACK_NOTICE.to_string());

    Json(CatalogResponse {
        source,
        notice,
        classes: catalog.classes.into_iter().map(ClassListing::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingForm,
    responses(
        (status = 201, description = "Booking request stored", body = BookingOutcome),
        (status = 400, description = "Missing or invalid form fields"),
        (status = 502, description = "Remote store rejected the booking", body = BookingOutcome)
    ),
    tag = "studio"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(form): Json<BookingForm>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = validate_booking(&form)?;

    let outcome = match state.client.create_booking(&booking).await {
        Ok(record) => {
            info!("Booking {} stored for class {}", record.id, record.class_id);
            (
                StatusCode::CREATED,
                BookingOutcome {
                    status: SubmitOutcome::Succeeded,
                    message: BOOKING_SUCCESS.to_string(),
                    record: Some(record),
                    form: None,
                },
            )
        }
        Err(err) => {
            error!("Error creating booking: {err}");
            (
                StatusCode::BAD_GATEWAY,
                BookingOutcome {
                    status: SubmitOutcome::Failed,
                    message: BOOKING_FAILURE.to_string(),
                    record: None,
                    form: Some(form),
                },
            )
        }
    };

    Ok((outcome.0, Json(outcome.1)))
}

#[utoipa::path(
    post,
    path = "/inquiries",
    request_body = InquiryForm,
    responses(
        (status = 201, description = "Inquiry stored", body = InquiryOutcome),
        (status = 400, description = "Missing or invalid form fields"),
        (status = 502, description = "Remote store rejected the inquiry", body = InquiryOutcome)
    ),
    tag = "studio"
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = validate_inquiry(&form)?;

    let outcome = match state.client.submit_inquiry(&inquiry).await {
        Ok(record) => {
            info!("Inquiry {} stored ({})", record.id, record.subject);
            (
                StatusCode::CREATED,
                InquiryOutcome {
                    status: SubmitOutcome::Succeeded,
                    message: INQUIRY_SUCCESS.to_string(),
                    record: Some(record),
                    form: None,
                },
            )
        }
        Err(err) => {
            error!("Error submitting inquiry: {err}");
            (
                StatusCode::BAD_GATEWAY,
                InquiryOutcome {
                    status: SubmitOutcome::Failed,
                    message: INQUIRY_FAILURE.to_string(),
                    record: None,
                    form: Some(form),
                },
            )
        }
    };

    Ok((outcome.0, Json(outcome.1)))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("No such endpoint".into())
}
