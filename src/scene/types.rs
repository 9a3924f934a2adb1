//! Value types shared with the host: asset ids, shadow mode, colors.

use std::fmt;
use std::sync::Arc;

macro_rules! asset_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Wraps a host asset identifier.
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

asset_id!(
    /// Host render mesh asset.
    MeshId
);
asset_id!(
    /// Host texture asset.
    TextureId
);
asset_id!(
    /// Host material asset.
    MaterialId
);

/// Whether a mesh visual casts shadows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowMode {
    /// No shadow.
    #[default]
    None,
    /// Casts a shadow.
    Caster,
}

impl ShadowMode {
    /// Maps the editor's `use_shadow` toggle onto a mode.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            ShadowMode::Caster
        } else {
            ShadowMode::None
        }
    }

    pub fn is_caster(self) -> bool {
        self == ShadowMode::Caster
    }
}

/// RGBA color as the host expects it (channels are not normalized).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black shadow color.
    pub const SHADOW_BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 255.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_mode_from_toggle() {
        assert_eq!(ShadowMode::from_enabled(true), ShadowMode::Caster);
        assert!(!ShadowMode::from_enabled(false).is_caster());
    }

    #[test]
    fn asset_ids_compare_by_value() {
        assert_eq!(MeshId::from("pumpkin.mesh"), MeshId::new("pumpkin.mesh"));
        assert_eq!(TextureId::new("white").to_string(), "white");
    }
}
