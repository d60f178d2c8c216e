//! # Status Descriptor
//!
//! Displayable status of one job, stage or pipeline.
//!
//! A descriptor starts as the static attributes of its [`CoreStatus`] and is
//! then refined by folding [`StatusOverride`] records over it, in order. Later
//! overrides win; a field an override leaves unset keeps the value it already
//! had. The core status itself can never be overridden, and statuses that
//! suppress details never gain a details path.

use super::core_status::CoreStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of a status action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for ActionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Action button attached to a status (retry, cancel, play...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAction {
    pub icon: String,
    pub title: String,
    pub path: String,
    pub method: ActionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_message: Option<String>,
}

impl StatusAction {
    /// POST action, the method every built-in action uses
    pub fn post(
        icon: impl Into<String>,
        title: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            path: path.into(),
            method: ActionMethod::Post,
            button_title: None,
            confirmation_message: None,
        }
    }

    pub fn with_button_title(mut self, button_title: impl Into<String>) -> Self {
        self.button_title = Some(button_title.into());
        self
    }

    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = Some(message.into());
        self
    }
}

/// Empty-state picture shown on a job page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Illustration {
    pub image: String,
    pub size: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Illustration {
    pub fn new(image: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            size: String::new(),
            title: title.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Partial set of display overrides contributed by one extended status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusOverride {
    pub text: Option<String>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub favicon: Option<String>,
    pub group: Option<String>,
    pub tooltip: Option<String>,
    pub has_details: Option<bool>,
    pub details_path: Option<String>,
    pub action: Option<StatusAction>,
    pub illustration: Option<Illustration>,
}

impl StatusOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn has_details(mut self, has_details: bool) -> Self {
        self.has_details = Some(has_details);
        self
    }

    pub fn details_path(mut self, path: impl Into<String>) -> Self {
        self.details_path = Some(path.into());
        self
    }

    pub fn action(mut self, action: StatusAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn illustration(mut self, illustration: Illustration) -> Self {
        self.illustration = Some(illustration);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Fully decorated, immutable status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    core: CoreStatus,
    text: String,
    label: String,
    icon: String,
    favicon: String,
    group: String,
    tooltip: String,
    has_details: bool,
    details_path: Option<String>,
    action: Option<StatusAction>,
    illustration: Option<Illustration>,
    extended: Vec<&'static str>,
}

impl StatusDescriptor {
    /// Undecorated descriptor of a core status, without details
    pub fn core(status: CoreStatus) -> Self {
        let presentation = status.presentation();
        Self {
            core: status,
            text: presentation.text.to_string(),
            label: presentation.label.to_string(),
            icon: presentation.icon.to_string(),
            favicon: presentation.favicon.to_string(),
            group: status.group().to_string(),
            tooltip: presentation.label.to_string(),
            has_details: false,
            details_path: None,
            action: None,
            illustration: None,
            extended: Vec::new(),
        }
    }

    /// Core descriptor with details resolved by the embedding system.
    ///
    /// Transient statuses never expose a details path.
    pub fn core_with_details(
        status: CoreStatus,
        has_details: bool,
        details_path: Option<String>,
    ) -> Self {
        let mut descriptor = Self::core(status);
        descriptor.has_details = has_details;
        if !status.presentation().suppresses_details {
            descriptor.details_path = details_path;
        }
        descriptor
    }

    /// Attach the default empty-state illustration
    pub fn with_illustration(mut self, illustration: Option<Illustration>) -> Self {
        self.illustration = illustration;
        self
    }

    /// Wrap this descriptor with one extended status
    pub fn apply(mut self, name: &'static str, overrides: StatusOverride) -> Self {
        let StatusOverride {
            text,
            label,
            icon,
            favicon,
            group,
            tooltip,
            has_details,
            details_path,
            action,
            illustration,
        } = overrides;

        if let Some(text) = text {
            self.text = text;
        }
        if let Some(label) = label {
            self.label = label;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(favicon) = favicon {
            self.favicon = favicon;
        }
        if let Some(group) = group {
            self.group = group;
        }
        if let Some(tooltip) = tooltip {
            self.tooltip = tooltip;
        }
        if let Some(has_details) = has_details {
            self.has_details = has_details;
        }
        if details_path.is_some() && !self.core.presentation().suppresses_details {
            self.details_path = details_path;
        }
        if action.is_some() {
            self.action = action;
        }
        if illustration.is_some() {
            self.illustration = illustration;
        }
        self.extended.push(name);
        self
    }

    pub fn core_status(&self) -> CoreStatus {
        self.core
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn favicon(&self) -> &str {
        &self.favicon
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Upper-case group with underscores, e.g. `SUCCESS_WITH_WARNINGS`
    pub fn name(&self) -> String {
        self.group.to_uppercase().replace('-', "_")
    }

    pub fn has_details(&self) -> bool {
        self.has_details
    }

    pub fn details_path(&self) -> Option<&str> {
        self.details_path.as_deref()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn action(&self) -> Option<&StatusAction> {
        self.action.as_ref()
    }

    pub fn action_icon(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.icon.as_str())
    }

    pub fn action_title(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.title.as_str())
    }

    pub fn action_path(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.path.as_str())
    }

    pub fn action_method(&self) -> Option<ActionMethod> {
        self.action.as_ref().map(|action| action.method)
    }

    /// Core label unless an extended status replaced it
    pub fn status_tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Raw stored status, as shown on badges
    pub fn badge_tooltip(&self) -> &'static str {
        self.core.as_str()
    }

    pub fn illustration(&self) -> Option<&Illustration> {
        self.illustration.as_ref()
    }

    /// Names of the applied extended statuses, outermost last
    pub fn extended(&self) -> &[&'static str] {
        &self.extended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_descriptor_matches_presentation() {
        let descriptor = StatusDescriptor::core(CoreStatus::Manual);
        assert_eq!(descriptor.text(), "manual");
        assert_eq!(descriptor.label(), "manual action");
        assert_eq!(descriptor.group(), "manual");
        assert_eq!(descriptor.name(), "MANUAL");
        assert!(!descriptor.has_details());
        assert!(!descriptor.has_action());
        assert_eq!(descriptor.status_tooltip(), "manual action");
    }

    #[test]
    fn test_label_override_leaves_other_fields() {
        let descriptor = StatusDescriptor::core(CoreStatus::Success)
            .apply("relabel", StatusOverride::new().label("all good"));

        assert_eq!(descriptor.label(), "all good");
        assert_eq!(descriptor.text(), "passed");
        assert_eq!(descriptor.icon(), "status_success");
        assert_eq!(descriptor.favicon(), "favicon_status_success");
        assert_eq!(descriptor.core_status(), CoreStatus::Success);
        assert_eq!(descriptor.status_tooltip(), "passed");
        assert_eq!(descriptor.extended(), &["relabel"]);
    }

    #[test]
    fn test_later_overrides_win() {
        let descriptor = StatusDescriptor::core(CoreStatus::Failed)
            .apply("first", StatusOverride::new().icon("status_warning").label("first"))
            .apply("second", StatusOverride::new().label("second"));

        assert_eq!(descriptor.label(), "second");
        assert_eq!(descriptor.icon(), "status_warning");
        assert_eq!(descriptor.extended(), &["first", "second"]);
    }

    #[test]
    fn test_details_suppressed_for_canceling() {
        let path = Some("/jobs/1".to_string());
        let descriptor = StatusDescriptor::core_with_details(CoreStatus::Canceling, true, path);
        assert!(descriptor.has_details());
        assert_eq!(descriptor.details_path(), None);

        let path = Some("/jobs/1".to_string());
        let descriptor = StatusDescriptor::core_with_details(CoreStatus::Running, true, path);
        assert_eq!(descriptor.details_path(), Some("/jobs/1"));
    }

    #[test]
    fn test_override_cannot_expose_suppressed_details_path() {
        let descriptor =
            StatusDescriptor::core_with_details(CoreStatus::WaitingForCallback, true, None)
            .apply("linked", StatusOverride::new().details_path("/jobs/1"));
        assert_eq!(descriptor.details_path(), None);

        let descriptor = StatusDescriptor::core(CoreStatus::Failed)
            .apply("linked", StatusOverride::new().details_path("/jobs/1"));
        assert_eq!(descriptor.details_path(), Some("/jobs/1"));
    }

    #[test]
    fn test_name_of_hyphenated_group() {
        let descriptor = StatusDescriptor::core(CoreStatus::Success)
            .apply("warning", StatusOverride::new().group("success-with-warnings"));
        assert_eq!(descriptor.group(), "success-with-warnings");
        assert_eq!(descriptor.name(), "SUCCESS_WITH_WARNINGS");
    }

    #[test]
    fn test_illustration_override() {
        let fallback = Illustration::new("empty-job-skipped-md.svg", "No trace");
        let manual = Illustration::new("empty-job-manual-md.svg", "Manual");

        let descriptor =
            StatusDescriptor::core(CoreStatus::Manual).with_illustration(Some(fallback.clone()));
        assert_eq!(descriptor.illustration(), Some(&fallback));

        let descriptor =
            descriptor.apply("manual", StatusOverride::new().illustration(manual.clone()));
        assert_eq!(descriptor.illustration(), Some(&manual));
    }

    #[test]
    fn test_action_accessors() {
        let action = StatusAction::post("retry", "Retry", "/jobs/1/retry")
            .with_button_title("Retry this job");
        let descriptor = StatusDescriptor::core(CoreStatus::Failed)
            .apply("retryable", StatusOverride::new().action(action));

        assert!(descriptor.has_action());
        assert_eq!(descriptor.action_icon(), Some("retry"));
        assert_eq!(descriptor.action_title(), Some("Retry"));
        assert_eq!(descriptor.action_path(), Some("/jobs/1/retry"));
        assert_eq!(descriptor.action_method(), Some(ActionMethod::Post));
    }

    #[test]
    fn test_override_is_empty() {
        assert!(StatusOverride::new().is_empty());
        assert!(!StatusOverride::new().group("x").is_empty());
    }
}
