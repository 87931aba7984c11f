//! Host platform identity

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Platform the client is running on.
///
/// The platform decides which loopback address reaches a development backend
/// on the host machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
    Windows,
    Macos,
}

impl_domain_enum_conversions!(Platform {
    Web => "web",
    Ios => "ios",
    Android => "android",
    Windows => "windows",
    Macos => "macos",
});

impl Platform {
    /// Whether this platform runs inside the Android emulator's virtual network.
    pub fn is_android(self) -> bool {
        matches!(self, Self::Android)
    }
}
