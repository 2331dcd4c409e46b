//! Coordinator configuration.
//!
//! The coordinator and the state walkers refer to a handful of navigators,
//! screens and params by name. [`RouteNames`] collects them; the defaults
//! match a layout with a central content pane, a right-hand modal stack, a
//! not-found screen and a full-screen attachment viewer.
//!
//! ```
//! use stack_navigation::{CoordinatorConfig, RouteNames};
//!
//! let config = CoordinatorConfig::new()
//!     .home_path("inbox")
//!     .names(RouteNames::default().right_modal_navigator("SidePanel"));
//!
//! assert_eq!(config.home_path, "inbox");
//! assert_eq!(config.names.right_modal_navigator, "SidePanel");
//! assert_eq!(config.report_path("42").unwrap(), "r/42");
//! ```

use crate::error::NavigationError;
use crate::matching::PathPattern;
use crate::RouteParams;

/// Identifiers of the navigators, screens and params with special handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNames {
    /// Modal overlay stack shown on the right.
    pub right_modal_navigator: String,
    /// Main content navigator.
    pub central_pane_navigator: String,
    /// Screen shown for unknown links.
    pub not_found: String,
    /// Full-screen attachment viewer.
    pub report_attachments: String,
    /// Report screen inside the central pane.
    pub report_screen: String,
    /// Param holding the report id.
    pub report_id_param: String,
    /// Param holding the report action id.
    pub report_action_id_param: String,
}

impl Default for RouteNames {
    fn default() -> Self {
        Self {
            right_modal_navigator: "RightModalNavigator".to_string(),
            central_pane_navigator: "CentralPaneNavigator".to_string(),
            not_found: "NotFound".to_string(),
            report_attachments: "ReportAttachments".to_string(),
            report_screen: "Report".to_string(),
            report_id_param: "reportID".to_string(),
            report_action_id_param: "reportActionID".to_string(),
        }
    }
}

impl RouteNames {
    /// Set the right modal navigator name.
    pub fn right_modal_navigator(mut self, name: impl Into<String>) -> Self {
        self.right_modal_navigator = name.into();
        self
    }

    /// Set the central pane navigator name.
    pub fn central_pane_navigator(mut self, name: impl Into<String>) -> Self {
        self.central_pane_navigator = name.into();
        self
    }

    /// Set the not-found screen name.
    pub fn not_found(mut self, name: impl Into<String>) -> Self {
        self.not_found = name.into();
        self
    }

    /// Set the attachments screen name.
    pub fn report_attachments(mut self, name: impl Into<String>) -> Self {
        self.report_attachments = name.into();
        self
    }

    /// Set the report screen name.
    pub fn report_screen(mut self, name: impl Into<String>) -> Self {
        self.report_screen = name.into();
        self
    }

    /// Top-level routes that `dismiss_modal` knows how to collapse.
    pub fn is_dismissable(&self, name: &str) -> bool {
        name == self.right_modal_navigator
            || name == self.not_found
            || name == self.report_attachments
    }
}

/// Settings for a [`NavigationCoordinator`](crate::NavigationCoordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Names with special handling.
    pub names: RouteNames,
    /// Path used by `navigate_home` and by fallbacks without a route.
    pub home_path: String,
    /// Pattern of the report route, filled with the report id param.
    pub report_path: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            names: RouteNames::default(),
            home_path: "home".to_string(),
            report_path: "r/:reportID".to_string(),
        }
    }
}

impl CoordinatorConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the route names.
    pub fn names(mut self, names: RouteNames) -> Self {
        self.names = names;
        self
    }

    /// Set the home path.
    pub fn home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    /// Set the report route pattern.
    pub fn report_path_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.report_path = pattern.into();
        self
    }

    /// Path of the report with the given id.
    pub fn report_path(&self, report_id: &str) -> Result<String, NavigationError> {
        let params = RouteParams::new().with(self.names.report_id_param.as_str(), report_id);
        PathPattern::parse(&self.report_path)?.build(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let names = RouteNames::default();
        assert!(names.is_dismissable("RightModalNavigator"));
        assert!(names.is_dismissable("NotFound"));
        assert!(names.is_dismissable("ReportAttachments"));
        assert!(!names.is_dismissable("CentralPaneNavigator"));
    }

    #[test]
    fn test_report_path_custom_pattern() {
        let config = CoordinatorConfig::new().report_path_pattern("/chat/:reportID/");
        assert_eq!(config.report_path("7").unwrap(), "chat/7");
    }

    #[test]
    fn test_report_path_without_param_slot() {
        let config = CoordinatorConfig::new().report_path_pattern("r/:id");
        assert!(config.report_path("7").is_err());
    }
}
