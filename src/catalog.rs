use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::backend::StudioClient;
use crate::models::YogaClass;

/// Shown next to the class list whenever it is not live data.
pub const FALLBACK_NOTICE: &str =
    "Showing sample classes. Live class listings are temporarily unavailable.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No backend credentials; no request was made.
    Unconfigured,
    /// A request was made and failed.
    RemoteFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Live,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub origin: CatalogOrigin,
    pub classes: Vec<YogaClass>,
}

impl Catalog {
    fn fallback(reason: FallbackReason) -> Self {
        Self {
            origin: CatalogOrigin::Fallback(reason),
            classes: FALLBACK_CLASSES.clone(),
        }
    }

    pub fn source(&self) -> CatalogSource {
        match self.origin {
            CatalogOrigin::Live => CatalogSource::Live,
            CatalogOrigin::Fallback(_) => CatalogSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source() == CatalogSource::Fallback
    }
}

impl StudioClient {
    /// Active classes for display. Degrades to the built-in catalog rather
    /// than failing.
    pub async fn list_active_classes(&self) -> Catalog {
        if !self.is_configured() {
            info!("Backend not configured, serving fallback class catalog");
            return Catalog::fallback(FallbackReason::Unconfigured);
        }

        match self.fetch_active_classes().await {
            Ok(classes) => Catalog {
                origin: CatalogOrigin::Live,
                classes,
            },
            Err(err) => {
                warn!("Error loading classes, serving fallback catalog: {err}");
                Catalog::fallback(FallbackReason::RemoteFailure)
            }
        }
    }
}

static FALLBACK_CLASSES: Lazy<Vec<YogaClass>> = Lazy::new(|| {
    vec![
        fallback_class(
            "fallback-hatha-yoga",
            "Hatha Yoga",
            "A gentle, grounding practice that pairs foundational postures with steady breathing. Ideal for building strength and flexibility at your own pace.",
            "60 minutes",
            "All Levels",
            25.0,
            0,
        ),
        fallback_class(
            "fallback-vinyasa-flow",
            "Vinyasa Flow",
            "A dynamic sequence linking breath and movement into a continuous flow that builds heat, balance and focus.",
            "75 minutes",
            "Intermediate",
            30.0,
            1,
        ),
        fallback_class(
            "fallback-restorative-yoga",
            "Restorative Yoga",
            "Slow, supported poses held with props to release tension and calm the nervous system.",
            "90 minutes",
            "All Levels",
            35.0,
            2,
        ),
        fallback_class(
            "fallback-power-yoga",
            "Power Yoga",
            "A vigorous, fitness-focused practice that challenges strength and endurance through athletic sequences.",
            "60 minutes",
            "Advanced",
            32.0,
            3,
        ),
    ]
});

fn fallback_class(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    level: &str,
    price: f64,
    position: i64,
) -> YogaClass {
    YogaClass {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        level: level.to_string(),
        price,
        image_url: None,
        is_active: true,
        created_at: catalog_epoch() + chrono::Duration::minutes(position),
    }
}

fn catalog_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
