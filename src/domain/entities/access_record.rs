//! Access record describing one successful redirect.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An in-memory representation of a redirect for the access log.
///
/// Built by the redirect handler from request metadata and passed to the
/// [`crate::domain::repositories::AccessLog`]. All client metadata is optional
/// to handle missing headers gracefully.
#[derive(Debug, Clone, Serialize)]
pub struct AccessRecord {
    pub slug: String,
    pub url: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub language: Option<String>,
    pub accessed_at: DateTime<Utc>,
}

impl AccessRecord {
    /// Creates a new access record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let record = AccessRecord::new(
    ///     "promo".to_string(),
    ///     "https://example.com".to_string(),
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    ///     Some("en-US"),
    /// );
    /// ```
    pub fn new(
        slug: String,
        url: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        language: Option<&str>,
    ) -> Self {
        Self {
            slug,
            url,
            ip,
            user_agent: user_agent.map(str::to_string),
            referer: referer.map(str::to_string),
            language: language.map(str::to_string),
            accessed_at: Utc::now(),
        }
    }
}
