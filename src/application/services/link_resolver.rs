//! Slug resolution: path → validated slug → link record.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::policy::RedirectPolicy;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreResult, link_key};
use crate::utils::path::{is_root, slug_candidate};

/// A link found for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    /// The slug as it appeared in the request path.
    pub slug: String,
    pub link: LinkRecord,
    /// `true` when the record was found under the original mixed-case slug
    /// after the lowercase lookup missed.
    pub used_fallback: bool,
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Root path with a configured home URL; no lookup happened.
    Home(String),
    Found(ResolvedLink),
    /// Invalid, reserved, or unknown slug, or no store configured.
    NoMatch,
}

/// Resolves request paths to link records.
///
/// Performs at most two store lookups per call and never retries. Store
/// errors are returned unchanged for the caller to surface.
pub struct LinkResolver {
    store: Option<Arc<dyn LinkStore>>,
    policy: Arc<RedirectPolicy>,
}

impl LinkResolver {
    /// Creates a resolver.
    ///
    /// `store` is `None` when the process runs without a link store; every
    /// slug then resolves to [`Resolution::NoMatch`].
    pub fn new(store: Option<Arc<dyn LinkStore>>, policy: Arc<RedirectPolicy>) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    pub fn store(&self) -> Option<&Arc<dyn LinkStore>> {
        self.store.as_ref()
    }

    /// Resolves a raw request path (no query string).
    ///
    /// # Lookup Order
    ///
    /// - Case-sensitive: the slug as received, once.
    /// - Case-insensitive: the lowercased slug; on a miss, and only if the
    ///   lowercased form differs, the original slug.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any lookup fails.
    pub async fn resolve(&self, raw_path: &str) -> StoreResult<Resolution> {
        if is_root(raw_path)
            && let Some(home) = &self.policy.home_url
        {
            return Ok(Resolution::Home(home.clone()));
        }

        let slug = slug_candidate(raw_path);
        if !self.policy.is_valid_slug(slug) {
            debug!(path = raw_path, "path is not a valid slug");
            return Ok(Resolution::NoMatch);
        }

        let Some(store) = &self.store else {
            debug!(slug, "no link store configured");
            return Ok(Resolution::NoMatch);
        };

        let found = if self.policy.case_sensitive {
            self.lookup(store.as_ref(), slug)
                .await?
                .map(|link| (link, false))
        } else {
            let lower = slug.to_lowercase();
            match self.lookup(store.as_ref(), &lower).await? {
                Some(link) => Some((link, false)),
                None if lower != slug => {
                    info!(slug, lower = %lower, "original slug fallback");
                    metrics::counter!("slug_fallback_total").increment(1);
                    self.lookup(store.as_ref(), slug)
                        .await?
                        .map(|link| (link, true))
                }
                None => None,
            }
        };

        Ok(match found {
            Some((link, used_fallback)) => Resolution::Found(ResolvedLink {
                slug: slug.to_string(),
                link,
                used_fallback,
            }),
            None => Resolution::NoMatch,
        })
    }

    async fn lookup(&self, store: &dyn LinkStore, slug: &str) -> StoreResult<Option<LinkRecord>> {
        store
            .get(&link_key(slug), self.policy.lookup_options())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkStore, StoreError};

    fn policy() -> RedirectPolicy {
        RedirectPolicy::default()
    }

    fn resolver(store: MockLinkStore, policy: RedirectPolicy) -> LinkResolver {
        LinkResolver::new(Some(Arc::new(store)), Arc::new(policy))
    }

    fn found(url: &str) -> Option<LinkRecord> {
        Some(LinkRecord::new(url))
    }

    #[tokio::test]
    async fn test_lowercase_key_found_for_any_casing() {
        for path in ["/promo", "/PROMO", "/PrOmO"] {
            let mut store = MockLinkStore::new();
            store
                .expect_get()
                .withf(|key, _| key == "link:promo")
                .times(1)
                .returning(|_, _| Ok(found("https://example.com")));

            let result = resolver(store, policy()).resolve(path).await.unwrap();

            match result {
                Resolution::Found(resolved) => {
                    assert_eq!(resolved.link.url, "https://example.com");
                    assert!(!resolved.used_fallback);
                }
                other => panic!("{path}: unexpected {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_mixed_case_key_found_via_fallback() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key, _| key == "link:promo")
            .times(1)
            .returning(|_, _| Ok(None));
        store
            .expect_get()
            .withf(|key, _| key == "link:ProMo")
            .times(1)
            .returning(|_, _| Ok(found("https://example.com/mixed")));

        let result = resolver(store, policy()).resolve("/ProMo").await.unwrap();

        match result {
            Resolution::Found(resolved) => {
                assert_eq!(resolved.slug, "ProMo");
                assert_eq!(resolved.link.url, "https://example.com/mixed");
                assert!(resolved.used_fallback);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_fallback_when_slug_already_lowercase() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_, _| Ok(None));

        let result = resolver(store, policy()).resolve("/promo").await.unwrap();

        assert_eq!(result, Resolution::NoMatch);
    }

    #[tokio::test]
    async fn test_both_lookups_miss() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(2).returning(|_, _| Ok(None));

        let result = resolver(store, policy()).resolve("/Promo").await.unwrap();

        assert_eq!(result, Resolution::NoMatch);
    }

    #[tokio::test]
    async fn test_case_sensitive_single_exact_lookup() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key, _| key == "link:ProMo")
            .times(1)
            .returning(|_, _| Ok(None));

        let policy = RedirectPolicy {
            case_sensitive: true,
            ..policy()
        };
        let result = resolver(store, policy).resolve("/ProMo").await.unwrap();

        assert_eq!(result, Resolution::NoMatch);
    }

    #[tokio::test]
    async fn test_reserved_slug_skips_store() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);

        let result = resolver(store, policy()).resolve("/dashboard").await.unwrap();

        assert_eq!(result, Resolution::NoMatch);
    }

    #[tokio::test]
    async fn test_invalid_slugs_skip_store() {
        for path in ["/", "//", "/-bad", "/a/b", "/bad_slug", "/x..y"] {
            let mut store = MockLinkStore::new();
            store.expect_get().times(0);

            let result = resolver(store, policy()).resolve(path).await.unwrap();

            assert_eq!(result, Resolution::NoMatch, "{path}");
        }
    }

    #[tokio::test]
    async fn test_root_with_home_url_skips_store() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);

        let policy = RedirectPolicy {
            home_url: Some("https://example.com/home".to_string()),
            ..policy()
        };
        let result = resolver(store, policy).resolve("/").await.unwrap();

        assert_eq!(result, Resolution::Home("https://example.com/home".to_string()));
    }

    #[tokio::test]
    async fn test_trailing_slash_is_stripped() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key, _| key == "link:promo")
            .times(1)
            .returning(|_, _| Ok(found("https://example.com")));

        let result = resolver(store, policy()).resolve("/promo/").await.unwrap();

        assert!(matches!(result, Resolution::Found(_)));
    }

    #[tokio::test]
    async fn test_lookup_carries_cache_ttl() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key, options| key == "link:promo" && options.cache_ttl_secs == 120)
            .times(1)
            .returning(|_, _| Ok(None));

        let policy = RedirectPolicy {
            link_cache_ttl: 120,
            ..policy()
        };
        resolver(store, policy).resolve("/promo").await.unwrap();
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_, _| Err(StoreError::Backend("unreachable".to_string())));

        let result = resolver(store, policy()).resolve("/Promo").await;

        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_without_store_is_no_match() {
        let resolver = LinkResolver::new(None, Arc::new(policy()));

        let result = resolver.resolve("/promo").await.unwrap();

        assert_eq!(result, Resolution::NoMatch);
    }
}
