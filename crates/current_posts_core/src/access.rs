//! Permission checks supplied by the host.
//!
//! The block only asks one question: may the current viewer see content?

use std::collections::BTreeSet;

/// Permission gating the block body.
pub const PERMISSION_ACCESS_CONTENT: &str = "access content";

/// Host-provided permission oracle for the current viewer.
pub trait AccessPolicy {
    fn has_permission(&self, permission: &str) -> bool;
}

/// Explicit set of granted permission names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: BTreeSet<String>,
}

impl PermissionSet {
    /// Viewer without any permission.
    pub fn none() -> Self {
        Self::default()
    }

    /// Viewer allowed to read published content.
    pub fn content_viewer() -> Self {
        Self::none().grant(PERMISSION_ACCESS_CONTENT)
    }

    pub fn grant(mut self, permission: impl Into<String>) -> Self {
        self.granted.insert(permission.into());
        self
    }
}

impl AccessPolicy for PermissionSet {
    fn has_permission(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessPolicy, PermissionSet, PERMISSION_ACCESS_CONTENT};

    #[test]
    fn content_viewer_has_access_content_only() {
        let viewer = PermissionSet::content_viewer();
        assert!(viewer.has_permission(PERMISSION_ACCESS_CONTENT));
        assert!(!viewer.has_permission("administer blocks"));
        assert!(!PermissionSet::none().has_permission(PERMISSION_ACCESS_CONTENT));
    }
}
