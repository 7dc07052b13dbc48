use crate::config::schema::{Layout, MacroConfig};
use tracing::{debug, info};

/// Tracks the focused application and the layout that applies to it.
///
/// Created fresh for every connection epoch, so the first tick after a
/// reconnect always resolves from `(None, default layout)`.
pub struct LayoutResolver<'a> {
    config: &'a MacroConfig,
    application: Option<String>,
    layout: &'a Layout,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(config: &'a MacroConfig) -> Self {
        Self {
            config,
            application: None,
            layout: &config.default_layout,
        }
    }

    /// The application seen on the last call to [`resolve`](Self::resolve).
    pub fn current_application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    pub fn current_layout(&self) -> &'a Layout {
        self.layout
    }

    /// Record the focused application. Returns true only if the active
    /// layout changed by value; two applications sharing an identical
    /// layout do not count as a change.
    pub fn resolve(&mut self, application: Option<&str>) -> bool {
        if self.application.as_deref() == application {
            return false;
        }

        debug!(
            "focus: {} → {}",
            self.application.as_deref().unwrap_or("<none>"),
            application.unwrap_or("<none>")
        );
        self.application = application.map(str::to_string);

        let candidate = self.config.layout_for(application);
        if candidate == self.layout {
            return false;
        }

        info!(
            "layout switched for {} ({} macros)",
            application.unwrap_or("<none>"),
            candidate.macros.len()
        );
        self.layout = candidate;
        true
    }
}
