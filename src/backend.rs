use std::sync::Arc;
use std::time::Duration;

use http::header::{AUTHORIZATION, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    BookingWithClass, ClassBooking, ContactInquiry, NewBooking, NewInquiry, YogaClass,
};

pub const INQUIRIES_TABLE: &str = "contact_inquiries";
pub const CLASSES_TABLE: &str = "yoga_classes";
pub const BOOKINGS_TABLE: &str = "class_bookings";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Remote data service is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote data service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Insert into {0} returned no rows")]
    EmptyInsert(&'static str),
    /// The row was accepted but the stored copy could not be read back.
    #[error("Insert into {table} was accepted but its response could not be read: {source}")]
    UnreadableInsert {
        table: &'static str,
        source: reqwest::Error,
    },
    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Where the data lives, decided once at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Configured { base_url: Url, access_key: String },
    Unconfigured { reason: String },
}

impl BackendConfig {
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        BackendConfig::Unconfigured {
            reason: reason.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, BackendConfig::Configured { .. })
    }
}

struct Remote {
    base_url: Url,
    access_key: String,
}

/// Client for the hosted structured-data service (PostgREST dialect).
#[derive(Clone)]
pub struct StudioClient {
    client: reqwest::Client,
    remote: Option<Arc<Remote>>,
}

impl StudioClient {
    pub fn new(config: BackendConfig, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let remote = match config {
            BackendConfig::Configured {
                base_url,
                access_key,
            } => Some(Arc::new(Remote {
                base_url,
                access_key,
            })),
            BackendConfig::Unconfigured { .. } => None,
        };

        Ok(Self { client, remote })
    }

    pub fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    fn remote(&self) -> Result<&Remote, BackendError> {
        self.remote.as_deref().ok_or(BackendError::NotConfigured)
    }

    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, BackendError> {
        let remote = self.remote()?;
        let mut endpoint = remote.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| BackendError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        if !query.is_empty() {
            endpoint.query_pairs_mut().extend_pairs(query);
        }
        Ok(endpoint)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, BackendError> {
        let remote = self.remote()?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", remote.access_key))
            .map_err(|_| BackendError::NotConfigured)?;
        Ok(request
            .header("apikey", remote.access_key.as_str())
            .header(AUTHORIZATION, bearer))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table, query)?;
        debug!("Selecting from {table}");
        let response = self.authorized(self.client.get(url))?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    async fn insert<R: Serialize, T: DeserializeOwned>(
        &self,
        table: &'static str,
        row: &R,
    ) -> Result<T, BackendError> {
        let url = self.table_url(table, &[])?;
        debug!("Inserting into {table}");
        let response = self
            .authorized(self.client.post(url))?
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        let response = check_status(response).await?;
        let status = response.status();
        let mut rows = match response.json::<Vec<T>>().await {
            Ok(rows) => rows,
            Err(source) => {
                warn!(
                    "Insert into {table} returned {status} but the response did not decode, \
                     the row may already be stored: {source}"
                );
                return Err(BackendError::UnreadableInsert { table, source });
            }
        };
        if rows.is_empty() {
            return Err(BackendError::EmptyInsert(table));
        }
        Ok(rows.swap_remove(0))
    }

    /// Active classes as stored remotely, oldest first.
    pub async fn fetch_active_classes(&self) -> Result<Vec<YogaClass>, BackendError> {
        let mut classes: Vec<YogaClass> = self
            .select(
                CLASSES_TABLE,
                &[
                    ("select", "*"),
                    ("is_active", "eq.true"),
                    ("order", "created_at.asc"),
                ],
            )
            .await?;
        classes.retain(|class| class.is_active);
        classes.sort_by_key(|class| class.created_at);
        Ok(classes)
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> Result<ClassBooking, BackendError> {
        self.insert(BOOKINGS_TABLE, booking).await
    }

    pub async fn submit_inquiry(
        &self,
        inquiry: &NewInquiry,
    ) -> Result<ContactInquiry, BackendError> {
        self.insert(INQUIRIES_TABLE, inquiry).await
    }

    /// Bookings made under `user_id`, newest first, with class details.
    pub async fn list_user_bookings(
        &self,
        user_id: &str,
    ) -> Result<Vec<BookingWithClass>, BackendError> {
        let user_filter = format!("eq.{user_id}");
        self.select(
            BOOKINGS_TABLE,
            &[
                ("select", "*,yoga_classes(title,duration,level)"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn configured(base: &str) -> StudioClient {
        StudioClient::new(
            BackendConfig::Configured {
                base_url: Url::parse(base).unwrap(),
                access_key: "key".to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn unconfigured() -> StudioClient {
        StudioClient::new(BackendConfig::unconfigured("empty"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_table_url_with_query() {
        let client = configured("https://abcd.supabase.co");
        let url = client
            .table_url(CLASSES_TABLE, &[("is_active", "eq.true"), ("order", "created_at.asc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://abcd.supabase.co/rest/v1/yoga_classes?is_active=eq.true&order=created_at.asc"
        );
    }

    #[test]
    fn test_table_url_keeps_base_path() {
        let client = configured("https://gateway.example.com/proxy");
        assert_eq!(
            client.table_url(BOOKINGS_TABLE, &[]).unwrap().as_str(),
            "https://gateway.example.com/proxy/rest/v1/class_bookings"
        );

        let client = configured("https://gateway.example.com/proxy/");
        assert_eq!(
            client.table_url(BOOKINGS_TABLE, &[]).unwrap().as_str(),
            "https://gateway.example.com/proxy/rest/v1/class_bookings"
        );
    }

    #[test]
    fn test_table_url_unconfigured() {
        let client = unconfigured();
        assert!(!client.is_configured());
        assert!(matches!(
            client.table_url(BOOKINGS_TABLE, &[]),
            Err(BackendError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_https_backend_reaches_connect() {
        // Nothing listens on port 1, so the request fails at connect time;
        // it must not fail because https is unsupported.
        let client = configured("https://127.0.0.1:1");

        let err = client.fetch_active_classes().await.unwrap_err();

        let err = match err {
            BackendError::Http(err) => err,
            other => panic!("expected an HTTP error, got {other:?}"),
        };
        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        assert!(
            chain.iter().all(|msg| !msg.contains("scheme is not http")),
            "https is not supported by the HTTP client: {chain:?}"
        );
    }

    #[tokio::test]
    async fn test_writes_fail_when_unconfigured() {
        let client = unconfigured();
        let inquiry = NewInquiry {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: crate::models::InquirySubject::GeneralQuestion,
            message: "Hello".to_string(),
        };
        let err = client.submit_inquiry(&inquiry).await.unwrap_err();
        assert!(matches!(err, BackendError::NotConfigured));
    }
}
