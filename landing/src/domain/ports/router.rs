//! Driven port for page navigation.

/// Page router capability.
#[cfg_attr(test, mockall::automock)]
pub trait Router: Send + Sync {
    /// Move the user to `route`.
    fn navigate_to(&self, route: &str);
}
