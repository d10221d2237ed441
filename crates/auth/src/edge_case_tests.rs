//! Edge Case Tests for the Authentication System
//!
//! Tests critical boundary conditions in:
//! - Path exclusion matching (AUTH-P01 to AUTH-P04)
//! - Session stores across all variants (AUTH-S01 to AUTH-S05)
//! - Request/cookie parsing (AUTH-R01 to AUTH-R03)

#[cfg(test)]
mod exclusion_tests {
    use crate::exclusion::require_auth;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // AUTH-P01: Wildcard pattern equal to the path minus the marker
    // =========================================================================
    #[test]
    fn test_wildcard_matches_path_equal_to_prefix() {
        // "/api/v1/status*" must exclude "/api/v1/status" itself, not only
        // longer paths under it
        assert!(!require_auth(
            Some("/api/v1/status"),
            &patterns(&["/api/v1/status*"])
        ));
    }

    // =========================================================================
    // AUTH-P02: Bare "*" excludes everything
    // =========================================================================
    #[test]
    fn test_bare_wildcard_excludes_all_paths() {
        let excluded = patterns(&["*"]);
        assert!(!require_auth(Some("/"), &excluded));
        assert!(!require_auth(Some("/api/v1/users"), &excluded));
        // Missing path is still sensitive by default
        assert!(require_auth(None, &excluded));
    }

    // =========================================================================
    // AUTH-P03: Non-wildcard pattern must not behave as a prefix
    // =========================================================================
    #[test]
    fn test_exact_pattern_is_not_a_prefix() {
        let excluded = patterns(&["/api/v1/stat"]);
        assert!(require_auth(Some("/api/v1/status"), &excluded));
    }

    // =========================================================================
    // AUTH-P04: Only a single trailing slash is normalized
    // =========================================================================
    #[test]
    fn test_double_trailing_slash_is_not_normalized() {
        let excluded = patterns(&["/api/v1/status"]);
        assert!(!require_auth(Some("/api/v1/status/"), &excluded));
        assert!(require_auth(Some("/api/v1/status//"), &excluded));
    }
}

#[cfg(test)]
mod session_tests {
    use std::sync::Arc;

    use crate::session::{
        ExpiringSessionStore, MemorySessionBackend, MemorySessionStore, PersistedSessionStore,
        SessionStore,
    };

    fn all_variants() -> Vec<Box<dyn SessionStore>> {
        vec![
            Box::new(MemorySessionStore::new()),
            Box::new(ExpiringSessionStore::new(3600)),
            Box::new(PersistedSessionStore::new(
                Arc::new(MemorySessionBackend::new()),
                3600,
            )),
        ]
    }

    // =========================================================================
    // AUTH-S01: Contract holds uniformly across every store variant
    // =========================================================================
    #[tokio::test]
    async fn test_roundtrip_holds_for_every_variant() {
        for store in all_variants() {
            let session_id = store
                .create_session(Some("user-1"))
                .await
                .expect("should create");
            assert_eq!(
                store.user_id_for_session(Some(&session_id)).await.as_deref(),
                Some("user-1")
            );
        }
    }

    // =========================================================================
    // AUTH-S02: None input never panics, for every variant
    // =========================================================================
    #[tokio::test]
    async fn test_none_inputs_are_safe_for_every_variant() {
        for store in all_variants() {
            assert!(store.create_session(None).await.is_none());
            assert!(store.user_id_for_session(None).await.is_none());
            assert!(!store.destroy_session(None).await);
        }
    }

    // =========================================================================
    // AUTH-S03: Destroy twice returns true then false, for every variant
    // =========================================================================
    #[tokio::test]
    async fn test_double_destroy_for_every_variant() {
        for store in all_variants() {
            let session_id = store
                .create_session(Some("user-1"))
                .await
                .expect("should create");
            assert!(store.destroy_session(Some(&session_id)).await);
            assert!(!store.destroy_session(Some(&session_id)).await);
        }
    }

    // =========================================================================
    // AUTH-S04: A destroyed id never resolves again
    // =========================================================================
    #[tokio::test]
    async fn test_destroyed_id_never_resolves_again() {
        for store in all_variants() {
            let session_id = store
                .create_session(Some("user-1"))
                .await
                .expect("should create");
            store.destroy_session(Some(&session_id)).await;
            assert!(store.user_id_for_session(Some(&session_id)).await.is_none());
        }
    }

    // =========================================================================
    // AUTH-S05: Two users' sessions stay independent
    // =========================================================================
    #[tokio::test]
    async fn test_sessions_are_independent_between_users() {
        for store in all_variants() {
            let a = store.create_session(Some("alice")).await.expect("create a");
            let b = store.create_session(Some("bob")).await.expect("create b");
            assert_ne!(a, b);

            store.destroy_session(Some(&a)).await;
            assert_eq!(
                store.user_id_for_session(Some(&b)).await.as_deref(),
                Some("bob")
            );
        }
    }
}

#[cfg(test)]
mod request_tests {
    use std::collections::HashMap;

    use crate::request::RequestView;

    // =========================================================================
    // AUTH-R01: Cookie values containing '=' keep everything after the first
    // =========================================================================
    #[test]
    fn test_cookie_value_may_contain_equals() {
        let mut headers = HashMap::new();
        headers.insert("Cookie".to_string(), "session_id=a=b=c".to_string());
        let request = RequestView::from_parts(None, headers);
        assert_eq!(request.cookie("session_id"), Some("a=b=c"));
    }

    // =========================================================================
    // AUTH-R02: Empty cookie header yields an empty map
    // =========================================================================
    #[test]
    fn test_empty_cookie_header() {
        let mut headers = HashMap::new();
        headers.insert("Cookie".to_string(), String::new());
        let request = RequestView::from_parts(None, headers);
        assert!(request.cookies.is_empty());
    }

    // =========================================================================
    // AUTH-R03: Whitespace around pairs is trimmed
    // =========================================================================
    #[test]
    fn test_cookie_pairs_are_trimmed() {
        let mut headers = HashMap::new();
        headers.insert(
            "Cookie".to_string(),
            "  session_id=abc ;  theme=dark".to_string(),
        );
        let request = RequestView::from_parts(None, headers);
        assert_eq!(request.cookie("session_id"), Some("abc"));
        assert_eq!(request.cookie("theme"), Some("dark"));
    }
}
