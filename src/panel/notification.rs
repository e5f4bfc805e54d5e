#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Destructive,
}

/// A toast shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: &str, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity,
        }
    }

    /// Shown when the clear could not start at all
    pub fn clear_aborted() -> Self {
        Self::new(
            "Error",
            "Failed to clear expired orders. Please try again.",
            Severity::Destructive,
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}
