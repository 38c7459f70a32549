use thiserror::Error;

/// Which bucket a request path falls into, from the session gate's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
    /// Requires an active session.
    Protected,
    /// Accessible with or without a session.
    Public,
    /// Login/registration, hidden from sessions that already exist.
    Auth,
    /// Listed nowhere, handled per the configured fallback.
    Unknown,
}

/// How entries are matched against request paths.
///
/// `Prefix` is segment-aware: `/dashboard` covers `/dashboard/calendar`
/// but not `/dashboardx`. When several entries cover a path, the longest
/// one decides, so a public `/` never shadows a protected `/dashboard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    Exact,
    Prefix,
}

/// What the gate does with an `Unknown` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFallback {
    /// Treat unlisted paths as public.
    Permissive,
    /// Treat unlisted paths as protected.
    Conservative,
}

/// The gate's verdict for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteMapError {
    #[error("route `{0}` does not start with /")]
    NotAbsolute(String),
    #[error("route `{0}` has a trailing slash")]
    TrailingSlash(String),
    #[error("route `{0}` is listed in more than one category")]
    Overlap(String),
}

/// Immutable partition of the app's paths, built once at startup and
/// handed to the router. The three lists must be disjoint.
#[derive(Debug, Clone)]
pub struct RouteMap {
    protected: Vec<String>,
    public: Vec<String>,
    auth: Vec<String>,
    policy: MatchPolicy,
    fallback: GateFallback,
    login_path: String,
    dashboard_path: String,
}

impl RouteMap {
    pub fn new(
        protected: Vec<String>,
        public: Vec<String>,
        auth: Vec<String>,
        policy: MatchPolicy,
        fallback: GateFallback,
    ) -> Result<Self, RouteMapError> {
        for route in protected.iter().chain(&public).chain(&auth) {
            if !route.starts_with('/') {
                return Err(RouteMapError::NotAbsolute(route.clone()));
            }
            if route.len() > 1 && route.ends_with('/') {
                return Err(RouteMapError::TrailingSlash(route.clone()));
            }
        }

        for route in &protected {
            if public.contains(route) || auth.contains(route) {
                return Err(RouteMapError::Overlap(route.clone()));
            }
        }
        for route in &public {
            if auth.contains(route) {
                return Err(RouteMapError::Overlap(route.clone()));
            }
        }

        Ok(Self {
            protected,
            public,
            auth,
            policy,
            fallback,
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
        })
    }

    /// The page routes of the portal frontend. Sub-paths of a protected
    /// page (`/dashboard/calendar`, `/onboarding/profile`, ...) inherit
    /// its protection through the prefix policy.
    pub fn portal_defaults() -> Self {
        Self::new(
            vec!["/dashboard".to_string(), "/onboarding".to_string()],
            vec!["/".to_string()],
            vec!["/login".to_string(), "/register".to_string()],
            MatchPolicy::Prefix,
            GateFallback::Permissive,
        )
        .expect("default route lists are valid")
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    fn covers(&self, entry: &str, path: &str) -> bool {
        match self.policy {
            MatchPolicy::Exact => entry == path,
            MatchPolicy::Prefix => {
                if entry == path || entry == "/" {
                    return true;
                }
                match path.strip_prefix(entry) {
                    Some(rest) => rest.starts_with('/'),
                    None => false,
                }
            }
        }
    }

    /// Pure lookup of a path's category. Total: unlisted paths come back
    /// as `Unknown` rather than an error.
    pub fn classify(&self, path: &str) -> RouteCategory {
        let candidates = [
            (RouteCategory::Protected, &self.protected),
            (RouteCategory::Public, &self.public),
            (RouteCategory::Auth, &self.auth),
        ];

        let mut best: Option<(usize, RouteCategory)> = None;
        for (category, entries) in candidates {
            for entry in entries {
                if self.covers(entry, path) && best.is_none_or(|(len, _)| entry.len() > len) {
                    best = Some((entry.len(), category));
                }
            }
        }

        match best {
            Some((_, category)) => category,
            None => RouteCategory::Unknown,
        }
    }

    /// The session gate's decision for a request: pass it through, or
    /// bounce it to the login page / the dashboard. Missing sessions are
    /// redirects, never errors.
    pub fn decide(&self, path: &str, has_session: bool) -> AccessDecision {
        let category = match self.classify(path) {
            RouteCategory::Unknown => match self.fallback {
                GateFallback::Permissive => RouteCategory::Public,
                GateFallback::Conservative => RouteCategory::Protected,
            },
            known => known,
        };

        match category {
            RouteCategory::Protected if !has_session => AccessDecision::RedirectToLogin,
            RouteCategory::Auth if has_session => AccessDecision::RedirectToDashboard,
            _ => AccessDecision::Allow,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn map(policy: MatchPolicy, fallback: GateFallback) -> RouteMap {
        RouteMap::new(
            vec!["/dashboard".to_string(), "/onboarding".to_string()],
            vec!["/".to_string()],
            vec!["/login".to_string(), "/register".to_string()],
            policy,
            fallback,
        )
        .unwrap()
    }

    #[test]
    fn listed_paths_classify_into_their_category() {
        let map = map(MatchPolicy::Exact, GateFallback::Permissive);

        for path in ["/dashboard", "/onboarding"] {
            assert_eq!(map.classify(path), RouteCategory::Protected, "{path}");
        }
        for path in ["/login", "/register"] {
            assert_eq!(map.classify(path), RouteCategory::Auth, "{path}");
        }
        assert_eq!(map.classify("/"), RouteCategory::Public);
    }

    #[test]
    fn exact_policy_leaves_subpaths_unknown() {
        let map = map(MatchPolicy::Exact, GateFallback::Permissive);

        assert_eq!(map.classify("/dashboard/calendar"), RouteCategory::Unknown);
        assert_eq!(map.classify("/nope"), RouteCategory::Unknown);
    }

    #[test]
    fn prefix_policy_is_segment_aware() {
        let map = map(MatchPolicy::Prefix, GateFallback::Permissive);

        assert_eq!(
            map.classify("/dashboard/calendar"),
            RouteCategory::Protected
        );
        assert_eq!(
            map.classify("/onboarding/profile/step2"),
            RouteCategory::Protected
        );
        // not a path segment boundary
        assert_eq!(map.classify("/dashboardx"), RouteCategory::Public);
    }

    #[test]
    fn longest_match_wins_over_root() {
        let map = map(MatchPolicy::Prefix, GateFallback::Permissive);

        // "/" covers everything under prefix matching, but the longer
        // protected entry must decide
        assert_eq!(map.classify("/dashboard"), RouteCategory::Protected);
        assert_eq!(map.classify("/login"), RouteCategory::Auth);
        assert_eq!(map.classify("/anything-else"), RouteCategory::Public);
    }

    #[test]
    fn decisions_follow_session_presence() {
        let map = map(MatchPolicy::Prefix, GateFallback::Permissive);

        assert_eq!(
            map.decide("/dashboard", false),
            AccessDecision::RedirectToLogin
        );
        assert_eq!(map.decide("/dashboard", true), AccessDecision::Allow);
        assert_eq!(
            map.decide("/login", true),
            AccessDecision::RedirectToDashboard
        );
        assert_eq!(map.decide("/login", false), AccessDecision::Allow);
        assert_eq!(map.decide("/", false), AccessDecision::Allow);
        assert_eq!(map.decide("/", true), AccessDecision::Allow);
    }

    #[test]
    fn fallback_applies_to_unknown_only() {
        let permissive = RouteMap::new(
            vec!["/dashboard".to_string()],
            vec![],
            vec!["/login".to_string()],
            MatchPolicy::Exact,
            GateFallback::Permissive,
        )
        .unwrap();
        let conservative = RouteMap::new(
            vec!["/dashboard".to_string()],
            vec![],
            vec!["/login".to_string()],
            MatchPolicy::Exact,
            GateFallback::Conservative,
        )
        .unwrap();

        assert_eq!(permissive.decide("/stray", false), AccessDecision::Allow);
        assert_eq!(
            conservative.decide("/stray", false),
            AccessDecision::RedirectToLogin
        );
        assert_eq!(conservative.decide("/stray", true), AccessDecision::Allow);
    }

    #[test]
    fn overlapping_lists_are_rejected() {
        let result = RouteMap::new(
            vec!["/dashboard".to_string()],
            vec!["/dashboard".to_string()],
            vec![],
            MatchPolicy::Prefix,
            GateFallback::Permissive,
        );
        assert_eq!(
            result.err(),
            Some(RouteMapError::Overlap("/dashboard".to_string()))
        );
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let not_absolute = RouteMap::new(
            vec!["dashboard".to_string()],
            vec![],
            vec![],
            MatchPolicy::Prefix,
            GateFallback::Permissive,
        );
        assert_eq!(
            not_absolute.err(),
            Some(RouteMapError::NotAbsolute("dashboard".to_string()))
        );

        let trailing = RouteMap::new(
            vec!["/dashboard/".to_string()],
            vec![],
            vec![],
            MatchPolicy::Prefix,
            GateFallback::Permissive,
        );
        assert_eq!(
            trailing.err(),
            Some(RouteMapError::TrailingSlash("/dashboard/".to_string()))
        );
    }
}
