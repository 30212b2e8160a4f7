use utoipa::OpenApi;

use crate::catalog::CatalogSource;
use crate::handlers::{BookingOutcome, CatalogResponse, ClassListing, InquiryOutcome, SubmitOutcome};
use crate::models::{BookingStatus, ClassBooking, ContactInquiry, InquirySubject, YogaClass};
use crate::validation::{BookingForm, InquiryForm};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_classes,
        crate::handlers::create_booking,
        crate::handlers::submit_inquiry
    ),
    components(schemas(
        YogaClass,
        ClassListing,
        CatalogResponse,
        CatalogSource,
        BookingForm,
        BookingOutcome,
        ClassBooking,
        BookingStatus,
        InquiryForm,
        InquiryOutcome,
        ContactInquiry,
        InquirySubject,
        SubmitOutcome
    )),
    tags(
        (name = "studio", description = "Class catalog, bookings and contact inquiries")
    ),
)]
pub struct ApiDoc;
