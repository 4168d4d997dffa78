//! Exclusive modal state of the landing page.

/// Which modal, if any, is rendered.
///
/// A single enum rather than one flag per modal: the login and register
/// forms can never be open together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UiMode {
    /// No modal; the resting state.
    #[default]
    Idle,
    /// Login form is showing.
    LoginOpen,
    /// Registration form is showing.
    RegisterOpen,
}
