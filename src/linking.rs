//! Translation between paths and navigation states.
//!
//! [`PathStateCodec`] is the seam the coordinator translates through.
//! [`LinkingConfig`] is the bundled implementation, driven by a static table
//! of screens: each leaf screen declares a path pattern, and navigators
//! group screens (optionally contributing a path prefix).
//!
//! ```
//! use stack_navigation::linking::{LinkingConfig, PathStateCodec, ScreenConfig};
//!
//! let linking = LinkingConfig::new(vec![
//!     ScreenConfig::new("CentralPaneNavigator")
//!         .screen(ScreenConfig::new("Home").path("home"))
//!         .screen(ScreenConfig::new("Report").path("r/:reportID/:reportActionID?")),
//!     ScreenConfig::new("RightModalNavigator")
//!         .screen(ScreenConfig::new("Settings").path("settings")),
//! ])
//! .unwrap();
//!
//! let state = linking.state_from_path("/r/42").unwrap();
//! let report = state.focused_route().unwrap();
//! assert_eq!(report.name, "Report");
//! assert_eq!(report.params.get("reportID"), Some("42"));
//!
//! assert_eq!(linking.path_from_state(&state).as_deref(), Some("/r/42"));
//! ```

#[cfg(feature = "cache")]
use crate::cache::StateCache;
use crate::action::{NavigationAction, RouteTarget};
use crate::error::NavigationError;
use crate::matching::{normalize_path, split_path, split_query, PathPattern};
use crate::state::{NavigatorState, Route};
use crate::{debug_log, trace_log, QueryParams, RouteParams};
#[cfg(feature = "cache")]
use std::sync::Mutex;

/// Bidirectional mapping between paths and navigation states.
pub trait PathStateCodec: Send + Sync + 'static {
    /// Build the navigation state a path leads to.
    fn state_from_path(&self, path: &str) -> Result<NavigatorState, NavigationError>;

    /// Path of the focused route of `state`, starting with `/`.
    ///
    /// `None` when the focused route has no linkable path.
    fn path_from_state(&self, state: &NavigatorState) -> Option<String>;

    /// Action that applies `state` to a live container.
    ///
    /// The default navigates to the focused top-level route, carrying its
    /// params and nested state.
    fn action_from_state(&self, state: &NavigatorState) -> Result<NavigationAction, NavigationError> {
        let route = state.active_route().ok_or(NavigationError::EmptyState)?;
        let mut target = RouteTarget::new(route.name.clone(), route.params.clone());
        target.state = route.state.clone();
        Ok(NavigationAction::Navigate(target))
    }
}

/// One entry of the screen table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Screen or navigator name.
    pub name: String,
    /// Path pattern, or path prefix for navigators.
    pub path: Option<String>,
    /// Nested screens, for navigators.
    pub screens: Vec<ScreenConfig>,
}

impl ScreenConfig {
    /// Create an entry without a path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            screens: Vec::new(),
        }
    }

    /// Set the path pattern.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a nested screen.
    pub fn screen(mut self, screen: ScreenConfig) -> Self {
        self.screens.push(screen);
        self
    }

    /// Set all nested screens.
    pub fn screens(mut self, screens: Vec<ScreenConfig>) -> Self {
        self.screens = screens;
        self
    }
}

/// A path resolved to a linkable screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Index into the linkable screens of the [`LinkingConfig`].
    pub screen: usize,
    /// Params captured from the path and its query string.
    pub params: RouteParams,
}

impl ResolvedPath {
    /// Create a resolution.
    pub fn new(screen: usize, params: RouteParams) -> Self {
        Self { screen, params }
    }
}

/// A leaf screen with its full pattern and navigator chain.
#[derive(Debug, Clone)]
struct LinkableScreen {
    /// Names from the top-level navigator down to the screen.
    chain: Vec<String>,
    pattern: PathPattern,
}

/// Screen table implementing [`PathStateCodec`].
#[derive(Debug)]
pub struct LinkingConfig {
    screens: Vec<ScreenConfig>,
    /// Linkable screens, most specific pattern first.
    linkable: Vec<LinkableScreen>,
    #[cfg(feature = "cache")]
    cache: Mutex<StateCache>,
}

impl LinkingConfig {
    /// Compile a screen table. Fails on malformed path patterns.
    pub fn new(screens: Vec<ScreenConfig>) -> Result<Self, NavigationError> {
        let mut linkable = Vec::new();
        let root = PathPattern::parse("")?;
        collect_linkable(&screens, &root, &[], &mut linkable)?;

        // Stable: declaration order breaks ties.
        linkable.sort_by(|a, b| {
            b.pattern
                .static_count()
                .cmp(&a.pattern.static_count())
                .then_with(|| b.pattern.segments().len().cmp(&a.pattern.segments().len()))
        });

        debug_log!("Linking config compiled: {} linkable screens", linkable.len());

        Ok(Self {
            screens,
            linkable,
            #[cfg(feature = "cache")]
            cache: Mutex::new(StateCache::new()),
        })
    }

    /// Replace the resolution cache with one of the given capacity.
    #[cfg(feature = "cache")]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = Mutex::new(StateCache::with_capacity(capacity));
        self
    }

    /// Resolution cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> Option<crate::cache::CacheStats> {
        self.cache.lock().ok().map(|cache| cache.stats().clone())
    }

    /// The screen table as configured.
    pub fn screens(&self) -> &[ScreenConfig] {
        &self.screens
    }

    /// Resolve a path to a linkable screen and its params.
    ///
    /// Path params take precedence over query params of the same name.
    pub fn resolve(&self, path: &str) -> Result<ResolvedPath, NavigationError> {
        let (raw_path, query) = split_query(path);
        let normalized = normalize_path(raw_path);

        let cache_key = match query {
            Some(query) => format!("{}?{}", normalized, query),
            None => normalized.to_string(),
        };
        if let Some(hit) = self.cached(&cache_key) {
            return Ok(hit);
        }

        let segments = split_path(&normalized);
        let resolved = self
            .linkable
            .iter()
            .enumerate()
            .find_map(|(index, screen)| {
                let matched = screen.pattern.match_segments(&segments)?;
                let mut params: RouteParams = query
                    .map(QueryParams::from_query_string)
                    .map(RouteParams::from)
                    .unwrap_or_default();
                params.extend(matched);
                Some(ResolvedPath::new(index, params))
            })
            .ok_or_else(|| NavigationError::UnknownPath {
                path: path.to_string(),
            })?;

        trace_log!(
            "Path '{}' resolved to screen '{}'",
            path,
            self.linkable[resolved.screen].chain.join("/")
        );

        self.remember(cache_key, &resolved);
        Ok(resolved)
    }

    #[cfg(feature = "cache")]
    fn cached(&self, key: &str) -> Option<ResolvedPath> {
        // A poisoned lock only disables caching.
        self.cache.lock().ok()?.get(key)
    }

    #[cfg(not(feature = "cache"))]
    fn cached(&self, _key: &str) -> Option<ResolvedPath> {
        None
    }

    #[cfg(feature = "cache")]
    fn remember(&self, key: String, resolved: &ResolvedPath) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, resolved.clone());
        }
    }

    #[cfg(not(feature = "cache"))]
    fn remember(&self, _key: String, _resolved: &ResolvedPath) {}

    /// Build a fresh state (new keys) for a resolution.
    fn build_state(&self, resolved: ResolvedPath) -> Result<NavigatorState, NavigationError> {
        let screen = self
            .linkable
            .get(resolved.screen)
            .ok_or(NavigationError::EmptyState)?;
        let (leaf, navigators) = screen.chain.split_last().ok_or(NavigationError::EmptyState)?;

        let mut route = Route::new(leaf.as_str()).params(resolved.params);
        for navigator in navigators.iter().rev() {
            let nested = NavigatorState::with_generated_key(navigator).route(route);
            route = Route::new(navigator.as_str()).state(nested);
        }
        Ok(NavigatorState::with_generated_key("root").route(route))
    }
}

fn collect_linkable(
    screens: &[ScreenConfig],
    prefix: &PathPattern,
    chain: &[String],
    out: &mut Vec<LinkableScreen>,
) -> Result<(), NavigationError> {
    for screen in screens {
        let mut screen_chain = chain.to_vec();
        screen_chain.push(screen.name.clone());

        let own = PathPattern::parse(screen.path.as_deref().unwrap_or(""))?;
        let full = PathPattern::parse(prefix.join(&own).as_str())?;

        if !screen.screens.is_empty() {
            collect_linkable(&screen.screens, &full, &screen_chain, out)?;
        } else if screen.path.is_some() {
            out.push(LinkableScreen {
                chain: screen_chain,
                pattern: full,
            });
        }
    }
    Ok(())
}

impl PathStateCodec for LinkingConfig {
    fn state_from_path(&self, path: &str) -> Result<NavigatorState, NavigationError> {
        let resolved = self.resolve(path)?;
        self.build_state(resolved)
    }

    fn path_from_state(&self, state: &NavigatorState) -> Option<String> {
        let chain = state.focused_chain();
        let (leaf, _) = chain.split_last()?;

        let screen = self.linkable.iter().find(|screen| {
            screen.chain.len() == chain.len()
                && screen.chain.iter().zip(&chain).all(|(name, route)| *name == route.name)
        })?;

        let merged = chain
            .iter()
            .fold(RouteParams::new(), |acc, route| RouteParams::merge(&acc, &route.params));
        let path = screen.pattern.build(&merged).ok()?;

        let mut query = leaf.params.clone();
        for name in screen.pattern.param_names() {
            query.remove(name);
        }

        let mut out = format!("/{}", path);
        if !query.is_empty() {
            out.push('?');
            out.push_str(&QueryParams::from(query).to_query_string());
        }
        Some(out)
    }
}
