//! Engine configuration

use serde::Deserialize;

/// Process-wide settings shared by every table.
///
/// # Example
///
/// ```
/// use datagrid_lib::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_separator('-')
///     .with_default_filter_event("enter");
/// assert_eq!(config.separator, '-');
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Separator between naming-container ids in client ids.
    ///
    /// Default: `':'`
    pub separator: char,

    /// Request parameter carrying the logical behavior event name.
    ///
    /// Default: `javax.faces.behavior.event`
    pub behavior_event_param: String,

    /// Request parameter carrying the client id of the partial request source.
    ///
    /// Default: `javax.faces.source`
    pub source_param: String,

    /// Client event that triggers filtering when a table does not set one.
    ///
    /// Default: `keyup`
    pub default_filter_event: String,

    /// Delay in milliseconds before a filter event fires.
    ///
    /// Default: `300`
    pub default_filter_delay: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            separator: ':',
            behavior_event_param: "javax.faces.behavior.event".to_string(),
            source_param: "javax.faces.source".to_string(),
            default_filter_event: "keyup".to_string(),
            default_filter_delay: 300,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the naming-container separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the behavior event parameter name.
    pub fn with_behavior_event_param(mut self, name: impl Into<String>) -> Self {
        self.behavior_event_param = name.into();
        self
    }

    /// Sets the partial source parameter name.
    pub fn with_source_param(mut self, name: impl Into<String>) -> Self {
        self.source_param = name.into();
        self
    }

    /// Sets the default filter event.
    pub fn with_default_filter_event(mut self, event: impl Into<String>) -> Self {
        self.default_filter_event = event.into();
        self
    }

    /// Sets the default filter delay.
    pub fn with_default_filter_delay(mut self, delay: u32) -> Self {
        self.default_filter_delay = delay;
        self
    }
}
