//! Navigation actions dispatched to the live container.
//!
//! A [`NavigationAction`] is built by the coordinator for a single call,
//! dispatched once through the [`NavigationHandle`](crate::NavigationHandle)
//! and never retained. Actions that apply to a specific sub-stack carry a
//! `target` (navigator key) or `source` (route key).
//!
//! # Example
//!
//! ```
//! use stack_navigation::{ActionType, NavigationAction, RouteParams};
//!
//! let action = NavigationAction::navigate("Report", RouteParams::new().with("reportID", "1"));
//! assert_eq!(action.action_type(), ActionType::Navigate);
//!
//! let action = action.into_replace();
//! assert_eq!(action.action_type(), ActionType::Replace);
//! assert_eq!(action.action_type().as_str(), "REPLACE");
//! ```

use crate::state::NavigatorState;
use crate::RouteParams;
use std::fmt;

/// Hint passed along with a path describing how the navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationType {
    /// "Up" press: replace the current screen instead of pushing.
    Up,
    /// Forced "up": always replace, regardless of the target navigator.
    ForcedUp,
}

/// Destination of a navigate/push/replace action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// Route (screen or navigator) name.
    pub name: String,
    /// Params for the route.
    pub params: RouteParams,
    /// Nested state to apply below the route, for deep links.
    pub state: Option<NavigatorState>,
}

impl RouteTarget {
    /// Create a target without nested state.
    pub fn new(name: impl Into<String>, params: RouteParams) -> Self {
        Self {
            name: name.into(),
            params,
            state: None,
        }
    }

    /// Attach nested state.
    pub fn with_state(mut self, state: NavigatorState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Discriminant of a [`NavigationAction`], with wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Navigate,
    Push,
    Replace,
    SetParams,
    Pop,
    PopToTop,
    GoBack,
}

impl ActionType {
    /// The conventional upper-case action name.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Navigate => "NAVIGATE",
            ActionType::Push => "PUSH",
            ActionType::Replace => "REPLACE",
            ActionType::SetParams => "SET_PARAMS",
            ActionType::Pop => "POP",
            ActionType::PopToTop => "POP_TO_TOP",
            ActionType::GoBack => "GO_BACK",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command consumed by the navigation container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Go to a route, reusing an existing entry when the container allows.
    Navigate(RouteTarget),

    /// Push a new entry for the route.
    Push(RouteTarget),

    /// Replace the current entry with the route.
    Replace(RouteTarget),

    /// Merge params into the route identified by `source`.
    SetParams {
        params: RouteParams,
        /// Key of the route whose params change.
        source: Option<String>,
    },

    /// Pop `count` entries.
    Pop {
        count: usize,
        /// Key of the navigator to pop from.
        target: Option<String>,
    },

    /// Pop back to the first entry.
    PopToTop {
        /// Key of the navigator to pop from.
        target: Option<String>,
    },

    /// Generic back action, resolved by the container.
    GoBack,
}

impl NavigationAction {
    /// Create a `NAVIGATE` action.
    pub fn navigate(name: impl Into<String>, params: RouteParams) -> Self {
        Self::Navigate(RouteTarget::new(name, params))
    }

    /// Create a `SET_PARAMS` action for the route with key `source`.
    pub fn set_params(params: RouteParams, source: impl Into<String>) -> Self {
        Self::SetParams {
            params,
            source: Some(source.into()),
        }
    }

    /// Create a single `POP`.
    pub fn pop() -> Self {
        Self::pop_n(1)
    }

    /// Create a `POP` of `count` entries.
    pub fn pop_n(count: usize) -> Self {
        Self::Pop {
            count,
            target: None,
        }
    }

    /// Create a `POP_TO_TOP`.
    pub fn pop_to_top() -> Self {
        Self::PopToTop { target: None }
    }

    /// Scope a pop-style action to the navigator with key `target`.
    ///
    /// Other actions are returned unchanged.
    pub fn with_target(mut self, navigator_key: impl Into<String>) -> Self {
        match &mut self {
            Self::Pop { target, .. } | Self::PopToTop { target } => {
                *target = Some(navigator_key.into());
            }
            _ => {}
        }
        self
    }

    /// Turn a navigate-style action into `REPLACE`. Others are unchanged.
    pub fn into_replace(self) -> Self {
        match self {
            Self::Navigate(target) | Self::Push(target) => Self::Replace(target),
            other => other,
        }
    }

    /// Turn a navigate-style action into `PUSH`. Others are unchanged.
    pub fn into_push(self) -> Self {
        match self {
            Self::Navigate(target) | Self::Replace(target) => Self::Push(target),
            other => other,
        }
    }

    /// The action discriminant.
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::Navigate(_) => ActionType::Navigate,
            Self::Push(_) => ActionType::Push,
            Self::Replace(_) => ActionType::Replace,
            Self::SetParams { .. } => ActionType::SetParams,
            Self::Pop { .. } => ActionType::Pop,
            Self::PopToTop { .. } => ActionType::PopToTop,
            Self::GoBack => ActionType::GoBack,
        }
    }

    /// The route a navigate-style action points at.
    pub fn route_target(&self) -> Option<&RouteTarget> {
        match self {
            Self::Navigate(target) | Self::Push(target) | Self::Replace(target) => Some(target),
            _ => None,
        }
    }

    /// The navigator key a pop-style action is scoped to.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Pop { target, .. } | Self::PopToTop { target } => target.as_deref(),
            _ => None,
        }
    }
}
