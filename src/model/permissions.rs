//! Permission grants gating the library scan and the floating bubble

use crate::config::PermissionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    /// Read access to the music library
    MediaLibrary,
    /// Drawing the floating bubble over the main UI
    Overlay,
}

impl Permission {
    pub fn prompt(self) -> &'static str {
        match self {
            Permission::MediaLibrary => "Allow bubble-player to read your music library?",
            Permission::Overlay => "Allow bubble-player to draw a floating player above the UI?",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Grant {
    #[default]
    Undetermined,
    Granted,
    /// Denied by the user, or refused by the OS with the given reason
    Denied(String),
}

impl Grant {
    fn from_config(value: Option<bool>, denied_reason: &str) -> Self {
        match value {
            None => Grant::Undetermined,
            Some(true) => Grant::Granted,
            Some(false) => Grant::Denied(denied_reason.to_string()),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Grant::Granted)
    }
}

pub const MEDIA_DENIED: &str = "Music library access was denied. Press F5 to ask again.";
pub const OVERLAY_DENIED: &str = "Floating player disabled: overlay permission denied. Press O to ask again.";

#[derive(Clone, Debug, Default)]
pub struct Permissions {
    pub media: Grant,
    pub overlay: Grant,
    /// Permission currently being asked about, if any
    pub prompt: Option<Permission>,
}

impl Permissions {
    pub fn from_config(config: PermissionConfig) -> Self {
        Self {
            media: Grant::from_config(config.media, MEDIA_DENIED),
            overlay: Grant::from_config(config.overlay, OVERLAY_DENIED),
            prompt: None,
        }
    }

    pub fn grant(&self, permission: Permission) -> &Grant {
        match permission {
            Permission::MediaLibrary => &self.media,
            Permission::Overlay => &self.overlay,
        }
    }

    pub fn set(&mut self, permission: Permission, grant: Grant) {
        tracing::info!(?permission, ?grant, "Permission updated");
        match permission {
            Permission::MediaLibrary => self.media = grant,
            Permission::Overlay => self.overlay = grant,
        }
    }

    /// First undetermined permission, library before overlay
    pub fn next_undetermined(&self) -> Option<Permission> {
        [Permission::MediaLibrary, Permission::Overlay]
            .into_iter()
            .find(|p| *self.grant(*p) == Grant::Undetermined)
    }
}
