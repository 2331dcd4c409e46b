//! Navigation tree state.
//!
//! A snapshot of the live navigation container is a tree of
//! [`NavigatorState`]s: each navigator holds a stack of [`Route`]s and an
//! `index` selecting the active one, and a route may itself host a nested
//! navigator in its `state`.
//!
//! ```text
//! NavigatorState (root, key "root")
//! ├── Route "CentralPaneNavigator"
//! │   └── NavigatorState
//! │       └── Route "Report" {reportID: 1}
//! └── Route "RightModalNavigator"           ← index 1, active
//!     └── NavigatorState (index 0)
//!         └── Route "Settings"
//! ```
//!
//! The coordinator only reads these snapshots. They are produced by the
//! [`NavigationHandle`](crate::NavigationHandle) and by the
//! [`PathStateCodec`](crate::linking::PathStateCodec).

use crate::RouteParams;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_KEY: AtomicUsize = AtomicUsize::new(0);

/// Generate a unique route/navigator key with the given prefix.
pub fn generate_key(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_KEY.fetch_add(1, Ordering::Relaxed))
}

/// State of one navigator: a stack of routes plus the active index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    /// Key identifying this navigator, used as the `target` of scoped actions.
    pub key: String,
    /// Active route. `None` means the first route.
    pub index: Option<usize>,
    /// Routes in stack order, oldest first.
    pub routes: Vec<Route>,
}

impl NavigatorState {
    /// Create an empty navigator state with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
            routes: Vec::new(),
        }
    }

    /// Create a navigator with a generated key.
    pub fn with_generated_key(prefix: &str) -> Self {
        Self::new(generate_key(prefix))
    }

    /// Set the routes.
    pub fn routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = routes;
        self
    }

    /// Append a route.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Set the active index.
    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// The active index, defaulting to `0`.
    pub fn active_index(&self) -> usize {
        self.index.unwrap_or(0)
    }

    /// The active route at this level.
    pub fn active_route(&self) -> Option<&Route> {
        self.routes.get(self.active_index())
    }

    /// The topmost (last) route of the stack.
    pub fn last_route(&self) -> Option<&Route> {
        self.routes.last()
    }

    /// Follow active routes down to the focused leaf.
    pub fn focused_route(&self) -> Option<&Route> {
        let mut route = self.active_route()?;
        while let Some(child) = route.state.as_ref().and_then(NavigatorState::active_route) {
            route = child;
        }
        Some(route)
    }

    /// Active routes from this navigator down to the focused leaf.
    pub fn focused_chain(&self) -> Vec<&Route> {
        let mut chain = Vec::new();
        let mut current = self.active_route();
        while let Some(route) = current {
            chain.push(route);
            current = route.state.as_ref().and_then(NavigatorState::active_route);
        }
        chain
    }

    /// Return `true` if any top-level route has the given name.
    pub fn contains_route(&self, name: &str) -> bool {
        self.routes.iter().any(|r| r.name == name)
    }

    /// Index of the last top-level route with the given name.
    pub fn last_index_of(&self, name: &str) -> Option<usize> {
        self.routes.iter().rposition(|r| r.name == name)
    }
}

/// A screen or nested navigator entry in a navigator's stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Screen or navigator name.
    pub name: String,
    /// Unique key of this entry.
    pub key: String,
    /// Route parameters.
    pub params: RouteParams,
    /// Nested navigator, when this route hosts one.
    pub state: Option<NavigatorState>,
}

impl Route {
    /// Create a route with a generated key.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = generate_key(&name);
        Self {
            name,
            key,
            params: RouteParams::new(),
            state: None,
        }
    }

    /// Override the generated key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Add a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Replace all parameters.
    pub fn params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Attach a nested navigator.
    pub fn state(mut self, state: NavigatorState) -> Self {
        self.state = Some(state);
        self
    }

    /// Classify this route for tree walks.
    pub fn as_node(&self) -> NavigationNode<'_> {
        match &self.state {
            Some(state) => NavigationNode::NestedState { route: self, state },
            None => NavigationNode::Leaf(self),
        }
    }
}

/// Borrowed view of one level of the tree.
///
/// Walks match on this instead of probing optional fields, so every shape a
/// node can take is handled explicitly.
#[derive(Debug, Clone, Copy)]
pub enum NavigationNode<'a> {
    /// A navigator level with its own route list (e.g. the root state).
    Navigator(&'a NavigatorState),
    /// A route hosting a nested navigator.
    NestedState {
        route: &'a Route,
        state: &'a NavigatorState,
    },
    /// A screen with no nested navigator.
    Leaf(&'a Route),
}

impl<'a> From<&'a NavigatorState> for NavigationNode<'a> {
    fn from(state: &'a NavigatorState) -> Self {
        NavigationNode::Navigator(state)
    }
}

impl<'a> From<&'a Route> for NavigationNode<'a> {
    fn from(route: &'a Route) -> Self {
        route.as_node()
    }
}

/// Position of the active leaf inside its innermost navigator.
///
/// Descends through the active child of every navigator level, carrying the
/// index used to select it. A leaf named `modal_navigator` always counts as
/// position `0`, so entering that modal is treated as being on its first
/// screen. A navigator whose active index points past its routes stops the
/// walk and reports the index carried so far.
///
/// ```
/// use stack_navigation::state::{active_route_index, NavigatorState, Route};
///
/// let state = NavigatorState::new("root")
///     .route(Route::new("Home"))
///     .route(Route::new("Settings"))
///     .index(1);
/// assert_eq!(active_route_index(&state, "RightModalNavigator"), 1);
/// ```
pub fn active_route_index<'a>(node: impl Into<NavigationNode<'a>>, modal_navigator: &str) -> usize {
    resolve_active_index(node.into(), 0, modal_navigator)
}

fn resolve_active_index(node: NavigationNode<'_>, index: usize, modal_navigator: &str) -> usize {
    match node {
        NavigationNode::Navigator(state) | NavigationNode::NestedState { state, .. } => {
            let child_index = state.active_index();
            match state.routes.get(child_index) {
                Some(child) => resolve_active_index(child.as_node(), child_index, modal_navigator),
                None => index,
            }
        }
        NavigationNode::Leaf(route) if route.name == modal_navigator => 0,
        NavigationNode::Leaf(_) => index,
    }
}
