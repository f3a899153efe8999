//! Catalog scans and permission grants

use crate::catalog::CatalogError;
use crate::model::{Grant, LibraryStatus, Overlay, Permission, MEDIA_DENIED, OVERLAY_DENIED};

use super::AppController;

impl AppController {
    /// Act on grants that are already decided
    pub(crate) fn apply_grants(&mut self) {
        if self.model.permissions.media.is_granted() {
            self.rescan_library();
        }
        self.sync_overlay();
    }

    /// Answer to the permission prompt
    pub fn resolve_prompt(&mut self, permission: Permission, granted: bool) {
        let grant = if granted {
            Grant::Granted
        } else {
            let reason = match permission {
                Permission::MediaLibrary => MEDIA_DENIED,
                Permission::Overlay => OVERLAY_DENIED,
            };
            Grant::Denied(reason.to_string())
        };
        self.model.permissions.set(permission, grant);

        match permission {
            Permission::MediaLibrary if granted => self.rescan_library(),
            Permission::MediaLibrary => {
                self.halt();
                self.model.clear_catalog(LibraryStatus::NotScanned);
                self.publish_now_playing();
            }
            Permission::Overlay => self.sync_overlay(),
        }
        self.model.permissions.prompt = self.model.permissions.next_undetermined();
    }

    /// Rescan when access is granted, otherwise ask for it again
    pub fn request_library(&mut self) {
        if self.model.permissions.media.is_granted() {
            self.rescan_library();
        } else {
            self.model.permissions.prompt = Some(Permission::MediaLibrary);
        }
    }

    /// Toggle the bubble, or ask for the overlay grant when there is none
    pub fn tap_bubble(&mut self) {
        if let Some(overlay) = self.model.overlay.as_mut() {
            overlay.tap();
        } else if self.model.permissions.overlay.is_granted() {
            self.sync_overlay();
        } else {
            self.model.permissions.prompt = Some(Permission::Overlay);
        }
    }

    /// Replace the catalog with a fresh scan. Nothing is current afterwards.
    pub fn rescan_library(&mut self) {
        self.halt();
        match self.catalog.scan() {
            Ok(tracks) => {
                tracing::info!(count = tracks.len(), "Library loaded");
                self.model.set_catalog(tracks);
            }
            Err(CatalogError::PermissionDenied(path)) => {
                let reason = format!(
                    "The system refused access to {}. Press F5 to try again.",
                    path.display()
                );
                tracing::warn!(path = %path.display(), "Library access denied by the OS");
                self.model
                    .permissions
                    .set(Permission::MediaLibrary, Grant::Denied(reason));
                self.model.clear_catalog(LibraryStatus::NotScanned);
            }
            Err(e) => {
                tracing::error!(error = %e, "Library scan failed");
                self.model.clear_catalog(LibraryStatus::Failed(e.to_string()));
            }
        }
        self.publish_now_playing();
    }

    /// Create or drop the bubble to match the overlay grant
    fn sync_overlay(&mut self) {
        let granted = self.model.permissions.overlay.is_granted();
        match (granted, self.model.overlay.is_some()) {
            (true, false) => {
                self.model.overlay = Some(Overlay::new(self.bubble_origin, self.model.ui.screen));
                tracing::info!("Floating player shown");
            }
            (false, true) => {
                self.model.overlay = None;
                tracing::info!("Floating player removed");
            }
            _ => {}
        }
    }
}
