//=========================================================================
// Screen Errors
//=========================================================================
//
// Contract violations raised by the screen manager and transitions.
//
// None of these are transient. They are returned synchronously to the
// caller, never retried, and indicate a bug in how the manager is driven.
//
//=========================================================================

//=== ErrorKind ===========================================================

/// Broad category of a [`ScreenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation named a screen that was never registered.
    Configuration,

    /// The operation would break a lifecycle invariant.
    InvalidOperation,

    /// A transition was driven without an entry/exit role.
    ArgumentRange,
}

//=== ScreenError =========================================================

/// Errors returned by [`crate::core::screen::ScreenManager`] and
/// [`crate::core::transition::Transition`].
///
/// Screen keys are captured in their `Debug` form so the error type stays
/// independent of the manager's key type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// No screen is registered under this key.
    UnknownScreen(String),

    /// The current screen cannot be removed; change away from it first.
    RemoveCurrentScreen(String),

    /// The screen has been disposed and can no longer be addressed.
    DisposedScreen(String),

    /// Transition updated before being attached as an entry or exit effect.
    TransitionModeUnset,
}

impl ScreenError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownScreen(_) => ErrorKind::Configuration,
            Self::RemoveCurrentScreen(_) | Self::DisposedScreen(_) => ErrorKind::InvalidOperation,
            Self::TransitionModeUnset => ErrorKind::ArgumentRange,
        }
    }

    pub(crate) fn unknown<K: std::fmt::Debug>(key: &K) -> Self {
        Self::UnknownScreen(format!("{:?}", key))
    }

    pub(crate) fn remove_current<K: std::fmt::Debug>(key: &K) -> Self {
        Self::RemoveCurrentScreen(format!("{:?}", key))
    }

    pub(crate) fn disposed<K: std::fmt::Debug>(key: &K) -> Self {
        Self::DisposedScreen(format!("{:?}", key))
    }
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScreen(key) => write!(f, "Screen {} does not exist", key),
            Self::RemoveCurrentScreen(key) => {
                write!(f, "Cannot remove the current screen {}", key)
            }
            Self::DisposedScreen(key) => write!(f, "Screen {} has already been disposed", key),
            Self::TransitionModeUnset => {
                write!(f, "Transition mode must be set to Entry or Exit before updating")
            }
        }
    }
}

impl std::error::Error for ScreenError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ScreenError>();
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ScreenError::unknown(&"menu").kind(), ErrorKind::Configuration);
        assert_eq!(ScreenError::remove_current(&"menu").kind(), ErrorKind::InvalidOperation);
        assert_eq!(ScreenError::disposed(&"menu").kind(), ErrorKind::InvalidOperation);
        assert_eq!(ScreenError::TransitionModeUnset.kind(), ErrorKind::ArgumentRange);
    }

    #[test]
    fn display_includes_key() {
        let message = ScreenError::unknown(&"level_1").to_string();
        assert!(message.contains("\"level_1\""), "got: {}", message);
    }
}
