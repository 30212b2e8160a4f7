use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Image shown for classes without their own picture.
pub const DEFAULT_CLASS_IMAGE: &str = "/IMG-20250907-WA0011.jpg";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct YogaClass {
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(example = "60 minutes")]
    pub duration: String,
    #[schema(example = "All Levels")]
    pub level: String,
    #[schema(example = 25.0)]
    pub price: f64,
    pub image_url: Option<String>,
    pub is_active: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl YogaClass {
    pub fn display_image(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_CLASS_IMAGE)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Row written to `class_bookings`. Id and timestamp come from the store.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct NewBooking {
    pub class_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[schema(value_type = String, format = "date", example = "2025-06-01")]
    pub booking_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "18:30:00")]
    pub booking_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub user_id: Option<String>,
}

impl NewBooking {
    /// Anonymous booking request awaiting confirmation by the studio.
    pub fn pending(
        class_id: String,
        customer_name: String,
        customer_email: String,
        booking_date: NaiveDate,
        booking_time: Option<NaiveTime>,
        notes: Option<String>,
    ) -> Self {
        Self {
            class_id,
            customer_name,
            customer_email,
            booking_date,
            booking_time,
            notes,
            status: BookingStatus::Pending,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassBooking {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub class_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[schema(value_type = String, format = "date")]
    pub booking_date: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub booking_time: Option<NaiveTime>,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Class columns embedded into a booking row by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassSummary {
    pub title: String,
    pub duration: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BookingWithClass {
    #[serde(flatten)]
    pub booking: ClassBooking,
    #[serde(rename = "yoga_classes")]
    pub class: Option<ClassSummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum InquirySubject {
    #[serde(rename = "Class Inquiry")]
    ClassInquiry,
    #[serde(rename = "Private Session")]
    PrivateSession,
    #[serde(rename = "Workshop Information")]
    WorkshopInformation,
    #[serde(rename = "Pricing Information")]
    PricingInformation,
    #[serde(rename = "General Question")]
    GeneralQuestion,
}

impl InquirySubject {
    pub const ALL: [InquirySubject; 5] = [
        InquirySubject::ClassInquiry,
        InquirySubject::PrivateSession,
        InquirySubject::WorkshopInformation,
        InquirySubject::PricingInformation,
        InquirySubject::GeneralQuestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquirySubject::ClassInquiry => "Class Inquiry",
            InquirySubject::PrivateSession => "Private Session",
            InquirySubject::WorkshopInformation => "Workshop Information",
            InquirySubject::PricingInformation => "Pricing Information",
            InquirySubject::GeneralQuestion => "General Question",
        }
    }
}

impl fmt::Display for InquirySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquirySubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown inquiry subject: {wanted}"))
    }
}

/// Row written to `contact_inquiries`.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub subject: InquirySubject,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ContactInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: InquirySubject,
    pub message: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_pending_booking_wire_format() {
        let booking = NewBooking::pending(
            "class-1".to_string(),
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            None,
            None,
        );
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["status"], json!("pending"));
        assert_eq!(value["booking_date"], json!("2025-06-01"));
        assert_eq!(value["booking_time"], json!(null));
        assert_eq!(value["notes"], json!(null));
        assert_eq!(value["user_id"], json!(null));
    }

    #[test]
    fn test_display_image_default() {
        let mut class = YogaClass {
            id: "1".to_string(),
            title: "Hatha Yoga".to_string(),
            description: String::new(),
            duration: "60 minutes".to_string(),
            level: "All Levels".to_string(),
            price: 25.0,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
        };
        assert_eq!(class.display_image(), DEFAULT_CLASS_IMAGE);
        class.image_url = Some("https://cdn.example.com/hatha.jpg".to_string());
        assert_eq!(class.display_image(), "https://cdn.example.com/hatha.jpg");
    }

    #[test]
    fn test_inquiry_subject_parse() {
        assert_eq!(
            "Private Session".parse::<InquirySubject>().unwrap(),
            InquirySubject::PrivateSession
        );
        assert_eq!(
            " general question ".parse::<InquirySubject>().unwrap(),
            InquirySubject::GeneralQuestion
        );
        assert!("Refund".parse::<InquirySubject>().is_err());
        assert_eq!(
            serde_json::to_value(InquirySubject::WorkshopInformation).unwrap(),
            json!("Workshop Information")
        );
    }

    #[test]
    fn test_booking_with_class_decodes_embedded_row() {
        let row = json!({
            "id": "b-1",
            "user_id": "u-1",
            "class_id": "c-1",
            "customer_name": "Jane Doe",
            "customer_email": "jane@example.com",
            "booking_date": "2025-06-01",
            "booking_time": "18:30:00",
            "status": "confirmed",
            "notes": null,
            "created_at": "2025-05-20T10:00:00+00:00",
            "yoga_classes": {"title": "Hatha Yoga", "duration": "60 minutes", "level": "All Levels"}
        });
        let decoded: BookingWithClass = serde_json::from_value(row).unwrap();
        assert_eq!(decoded.booking.status, BookingStatus::Confirmed);
        assert_eq!(
            decoded.booking.booking_time,
            NaiveTime::from_hms_opt(18, 30, 0)
        );
        assert_eq!(decoded.class.unwrap().title, "Hatha Yoga");
    }
}
