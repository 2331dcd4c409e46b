//! # Stack Navigation
//!
//! Navigation coordinator for applications built from nested stack
//! navigators (a central content pane, modal overlay stacks, tab stacks):
//!
//! - **Deep links** - Resolve URL-like paths into navigation states and dispatch them
//! - **Readiness gating** - Defer navigation until the container is mounted, replay once ready
//! - **Back navigation** - Stack-aware "up" with fallback routes and pop-to-top requests
//! - **Modal dismissal** - Collapse the right sub-stack, optionally landing on a report
//! - **Introspection** - Active route path, topmost report and central pane screen
//!
//! The navigation container itself (mounting and rendering screens) lives
//! outside this crate and is reached through the [`NavigationHandle`] trait.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use stack_navigation::linking::{LinkingConfig, ScreenConfig};
//! use stack_navigation::*;
//!
//! #[derive(Default)]
//! struct Container {
//!     dispatched: Mutex<Vec<NavigationAction>>,
//! }
//!
//! impl NavigationHandle for Container {
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!     fn root_state(&self) -> Option<NavigatorState> {
//!         None
//!     }
//!     fn dispatch(&self, action: NavigationAction) {
//!         self.dispatched.lock().unwrap().push(action);
//!     }
//!     fn can_go_back(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let linking = LinkingConfig::new(vec![ScreenConfig::new("CentralPaneNavigator")
//!     .screen(ScreenConfig::new("Home").path("home"))
//!     .screen(ScreenConfig::new("Report").path("r/:reportID"))])
//! .unwrap();
//!
//! let mut coordinator = NavigationCoordinator::new(linking, CoordinatorConfig::default());
//! coordinator.navigate("r/123", None);
//!
//! let container = Arc::new(Container::default());
//! coordinator.attach_handle(container.clone());
//! coordinator.set_is_navigation_ready();
//!
//! let dispatched = container.dispatched.lock().unwrap();
//! assert_eq!(dispatched.len(), 1);
//! assert_eq!(dispatched[0].action_type(), ActionType::Push);
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache of path resolutions
//! - `gpui` - Expose the coordinator as a GPUI global with the [`Navigation`] facade

#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Navigation tree and actions
pub mod action;
pub mod matching;
pub mod params;
pub mod state;

// Error handling
pub mod error;

// Collaborators
pub mod handle;
pub mod link;
pub mod linking;
pub mod topmost;

// Coordinator
pub mod config;
pub mod coordinator;
pub mod pending;
pub mod readiness;

// Context module (GPUI integration)
#[cfg(feature = "gpui")]
mod context;

// Re-export main types for convenient access
pub use action::{ActionType, NavigationAction, NavigationType, RouteTarget};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, StateCache};
pub use config::{CoordinatorConfig, RouteNames};
#[cfg(feature = "gpui")]
pub use context::{init_navigation, Navigation, UseNavigation};
pub use coordinator::{GoBackOptions, NavigationCoordinator};
pub use error::NavigationError;
pub use handle::NavigationHandle;
pub use link::{build_link_action, link_to};
pub use linking::{LinkingConfig, PathStateCodec, ScreenConfig};
pub use params::{QueryParams, RouteParams};
pub use pending::{PendingRoute, PendingRouteQueue};
pub use readiness::{ReadinessGate, ReadinessSignal};
pub use state::{active_route_index, NavigationNode, NavigatorState, Route};
pub use topmost::{route_name_from_state_event, StateChangeEvent};
