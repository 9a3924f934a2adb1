//! Error types used by the lifecycle registry and the scene seams.
//!
//! This module defines two error enums:
//!
//! - [`LifecycleError`] — errors raised by the registry itself.
//! - [`SceneError`] — errors raised by host collaborators (scene objects, visuals).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging,
//! mirroring the labels carried by [`Event::reason`](crate::Event).

use std::sync::Arc;

use thiserror::Error;

/// # Errors produced by the lifecycle registry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// A tracked creation was attempted after the owner was torn down.
    ///
    /// The factory is never invoked in this case, so nothing leaks.
    #[error("owner {owner:?} is torn down; refusing to track new objects")]
    TornDown {
        /// Name of the owner the registry belongs to.
        owner: Arc<str>,
    },
}

impl LifecycleError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use scenekeeper::LifecycleError;
    ///
    /// let err = LifecycleError::TornDown { owner: "script".into() };
    /// assert_eq!(err.as_label(), "lifecycle_torn_down");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleError::TornDown { .. } => "lifecycle_torn_down",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LifecycleError::TornDown { owner } => format!("owner={owner} already torn down"),
        }
    }
}

/// # Errors produced by host scene collaborators.
///
/// Accessors exposed to the editor never surface these; they collapse them
/// into a `None` sentinel or a silent no-op.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The target object (scene object, component) is no longer valid.
    #[error("{what} is destroyed")]
    ObjectDestroyed {
        /// Short description of the missing object.
        what: &'static str,
    },

    /// The host rejected an operation for another reason.
    #[error("host error: {error}")]
    Host {
        /// The underlying error message.
        error: String,
    },

    /// The owning registry refused to track a new object.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl SceneError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use scenekeeper::SceneError;
    ///
    /// let err = SceneError::ObjectDestroyed { what: "mesh visual" };
    /// assert_eq!(err.as_label(), "scene_object_destroyed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SceneError::ObjectDestroyed { .. } => "scene_object_destroyed",
            SceneError::Host { .. } => "scene_host",
            SceneError::Lifecycle(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SceneError::ObjectDestroyed { what } => format!("destroyed: {what}"),
            SceneError::Host { error } => format!("host: {error}"),
            SceneError::Lifecycle(e) => e.as_message(),
        }
    }

    /// Indicates whether the error means the target is gone.
    ///
    /// This is the one anomaly the editor-facing accessors tolerate silently.
    pub fn is_destroyed(&self) -> bool {
        matches!(self, SceneError::ObjectDestroyed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_error_converts_into_scene_error() {
        let err: SceneError = LifecycleError::TornDown {
            owner: "script".into(),
        }
        .into();
        assert_eq!(err.as_label(), "lifecycle_torn_down");
        assert!(!err.is_destroyed());
        assert_eq!(err.to_string(), "owner \"script\" is torn down; refusing to track new objects");
    }

    #[test]
    fn destroyed_is_the_tolerated_anomaly() {
        let err = SceneError::ObjectDestroyed { what: "scene object" };
        assert!(err.is_destroyed());
        assert_eq!(err.as_message(), "destroyed: scene object");
    }
}
