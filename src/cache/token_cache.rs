use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::token::AccessToken;
use crate::config::settings::TokenCacheConfig;
use crate::helpers::time::now_u64;

#[derive(Debug, Clone)]
struct CachedToken {
    token: AccessToken,
    /// unix seconds after which the token is no longer handed out
    valid_until_unix_ts: u64,
}

/// Single-slot cache for the relay's access token.
///
/// The relay authenticates with exactly one set of credentials, so one slot is
/// enough. Clones share the slot.
#[derive(Debug, Clone)]
pub struct TokenCache {
    inner: Arc<RwLock<Option<CachedToken>>>,
    safety_margin_seconds: u64,
    default_ttl_seconds: u64,
}

impl TokenCache {
    pub fn new(cfg: &TokenCacheConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            safety_margin_seconds: cfg.safety_margin_seconds,
            default_ttl_seconds: cfg.default_ttl_seconds,
        }
    }

    /// Token if present and still inside its validity window.
    pub async fn get(&self) -> Option<AccessToken> {
        self.get_at(now_u64()).await
    }

    async fn get_at(&self, now: u64) -> Option<AccessToken> {
        self.inner
            .read()
            .await
            .as_ref()
            .filter(|cached| now < cached.valid_until_unix_ts)
            .map(|cached| cached.token.clone())
    }

    pub async fn set(&self, token: AccessToken) {
        self.set_at(token, now_u64()).await
    }

    async fn set_at(&self, token: AccessToken, now: u64) {
        let ttl = token.expires_in.unwrap_or(self.default_ttl_seconds);
        let valid_until_unix_ts = now
            .saturating_add(ttl)
            .saturating_sub(self.safety_margin_seconds);
        if valid_until_unix_ts <= now {
            debug!(ttl, "token lifetime shorter than safety margin, not caching");
            return;
        }
        *self.inner.write().await = Some(CachedToken { token, valid_until_unix_ts });
    }

    /// Drop the cached token, but only if it is still the one the caller used.
    pub async fn invalidate(&self, token: &AccessToken) {
        let mut slot = self.inner.write().await;
        if slot.as_ref().is_some_and(|cached| cached.token.value == token.value) {
            debug!("evicting cached access token");
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(safety_margin_seconds: u64) -> TokenCache {
        TokenCache::new(&TokenCacheConfig {
            enabled: true,
            safety_margin_seconds,
            default_ttl_seconds: 120,
        })
    }

    #[tokio::test]
    async fn token_expires_at_safety_margin() {
        let cache = cache(10);
        let now = 1_000;
        cache.set_at(AccessToken::new("abc".into(), Some(60)), now).await;

        assert_eq!(cache.get_at(now).await.unwrap().value, "abc");
        assert!(cache.get_at(now + 49).await.is_some());
        assert!(cache.get_at(now + 50).await.is_none());
    }

    #[tokio::test]
    async fn huge_expires_in_saturates_instead_of_overflowing() {
        let cache = cache(10);
        let now = 1_000;
        cache.set_at(AccessToken::new("abc".into(), Some(u64::MAX)), now).await;

        assert_eq!(cache.get_at(now).await.unwrap().value, "abc");
        assert!(cache.get_at(u64::MAX - 11).await.is_some());
        assert!(cache.get_at(u64::MAX - 10).await.is_none());
    }

    #[tokio::test]
    async fn missing_expires_in_uses_default_ttl() {
        let cache = cache(0);
        let now = 1_000;
        cache.set_at(AccessToken::new("abc".into(), None), now).await;

        assert!(cache.get_at(now + 119).await.is_some());
        assert!(cache.get_at(now + 120).await.is_none());
    }

    #[tokio::test]
    async fn short_lived_token_is_not_cached() {
        let cache = cache(30);
        cache.set(AccessToken::new("abc".into(), Some(20))).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn invalidate_only_evicts_matching_token() {
        let cache = cache(0);
        let current = AccessToken::new("new".into(), Some(600));
        cache.set(current.clone()).await;

        cache.invalidate(&AccessToken::new("old".into(), None)).await;
        assert_eq!(cache.get().await, Some(current.clone()));

        cache.invalidate(&current).await;
        assert!(cache.get().await.is_none());
    }
}
