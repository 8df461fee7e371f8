//! Redirect behaviour switches, compiled once from [`Config`].

use std::collections::HashSet;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use regex::{Regex, RegexBuilder};

use crate::config::{Config, DEFAULT_RESERVED_SLUGS, DEFAULT_SLUG_PATTERN};
use crate::domain::repositories::LookupOptions;

/// Immutable redirect configuration shared by every request.
///
/// Each request's behaviour is a function of (request, policy, store
/// contents) only; nothing here changes after startup.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    /// Target for `GET /`. `None` leaves the root path unmatched.
    pub home_url: Option<String>,
    /// Anchored, case-insensitive slug pattern.
    pub slug_pattern: Regex,
    /// Slugs that never resolve (exact, case-sensitive match).
    pub reserved_slugs: HashSet<String>,
    /// Cache-TTL hint passed with every store lookup, in seconds.
    pub link_cache_ttl: u64,
    /// Forward request query parameters onto the link URL.
    pub redirect_with_query: bool,
    /// Look slugs up exactly as received instead of lowercased-first.
    pub case_sensitive: bool,
    pub redirect_status: StatusCode,
}

impl RedirectPolicy {
    /// Compiles the policy from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug pattern is not a valid regex or the
    /// redirect status code is not a 3xx code.
    pub fn from_config(config: &Config) -> Result<Self> {
        let slug_pattern = compile_slug_pattern(&config.slug_pattern)
            .with_context(|| format!("Invalid SLUG_PATTERN '{}'", config.slug_pattern))?;

        let redirect_status = StatusCode::from_u16(config.redirect_status_code)
            .ok()
            .filter(StatusCode::is_redirection)
            .with_context(|| {
                format!(
                    "REDIRECT_STATUS_CODE must be a 3xx code, got {}",
                    config.redirect_status_code
                )
            })?;

        Ok(Self {
            home_url: config.home_url.clone(),
            slug_pattern,
            reserved_slugs: config.reserved_slugs.iter().cloned().collect(),
            link_cache_ttl: config.link_cache_ttl,
            redirect_with_query: config.redirect_with_query,
            case_sensitive: config.case_sensitive,
            redirect_status,
        })
    }

    /// Returns `true` if `slug` may be looked up: non-empty, not reserved,
    /// and a full match of the slug pattern.
    pub fn is_valid_slug(&self, slug: &str) -> bool {
        !slug.is_empty() && !self.reserved_slugs.contains(slug) && self.slug_pattern.is_match(slug)
    }

    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions::with_cache_ttl(self.link_cache_ttl)
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            home_url: None,
            slug_pattern: compile_slug_pattern(DEFAULT_SLUG_PATTERN)
                .expect("default slug pattern is valid"),
            reserved_slugs: DEFAULT_RESERVED_SLUGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            link_cache_ttl: 60,
            redirect_with_query: false,
            case_sensitive: false,
            redirect_status: StatusCode::MOVED_PERMANENTLY,
        }
    }
}

/// Compiles a slug pattern as an anchored, case-insensitive full match.
///
/// The pattern is wrapped in `^(?:...)$`, so a pattern with its own anchors
/// behaves the same. Inline flags such as `(?-i)` still apply.
pub fn compile_slug_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
}
