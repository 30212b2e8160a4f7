use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{InquirySubject, NewBooking, NewInquiry};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("regex compiles"));

/// Booking form as posted by the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct BookingForm {
    pub class_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[schema(example = "2025-06-01")]
    pub booking_date: String,
    #[schema(example = "18:30")]
    pub booking_time: Option<String>,
    pub notes: Option<String>,
}

/// Contact form as posted by the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    #[schema(example = "Class Inquiry")]
    pub subject: String,
    pub message: String,
}

fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn email(value: &str, field: &str) -> Result<String, ApiError> {
    let value = required(value, field)?;
    if !EMAIL_REGEX.is_match(&value) {
        return Err(ApiError::BadRequest(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(value)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn validate_booking(form: &BookingForm) -> Result<NewBooking, ApiError> {
    let class_id = required(&form.class_id, "class_id")?;
    let customer_name = required(&form.customer_name, "customer_name")?;
    let customer_email = email(&form.customer_email, "customer_email")?;
    let booking_date = required(&form.booking_date, "booking_date")?;
    let booking_date = NaiveDate::parse_from_str(&booking_date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("booking_date must be YYYY-MM-DD".into()))?;

    let booking_time = match optional(form.booking_time.as_deref()) {
        Some(raw) => Some(parse_time(&raw).ok_or_else(|| {
            ApiError::BadRequest("booking_time must be HH:MM".into())
        })?),
        None => None,
    };

    Ok(NewBooking::pending(
        class_id,
        customer_name,
        customer_email,
        booking_date,
        booking_time,
        optional(form.notes.as_deref()),
    ))
}

pub fn validate_inquiry(form: &InquiryForm) -> Result<NewInquiry, ApiError> {
    let name = required(&form.name, "name")?;
    let email = email(&form.email, "email")?;
    let subject = required(&form.subject, "subject")?
        .parse::<InquirySubject>()
        .map_err(ApiError::BadRequest)?;
    let message = required(&form.message, "message")?;

    Ok(NewInquiry {
        name,
        email,
        subject,
        message,
    })
}
