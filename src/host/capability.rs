//! Capability interfaces exposed by the authoring-tool document model.
//!
//! The encoder never owns host objects. Each callback hands over a borrowed
//! [`CapabilityHandle`], the encoder probes it for the behaviors it needs, reads the
//! values through the returned capability, and drops every borrow before returning.
//!
//! A single handle may satisfy several probes at once; [`CapabilityHandle::capabilities`]
//! returns the full subset in canonical probe order.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{EncodeError, EncodeResult};

/// Fault code returned by a failing host getter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fault(pub i32);

/// Result of a host getter.
pub type HostResult<T> = Result<T, Fault>;

/// Attach capability/property context to a host getter result.
pub trait HostResultExt<T> {
    /// Convert a [`Fault`] into [`EncodeError::PropertyRead`].
    fn read(self, capability: &'static str, property: &'static str) -> EncodeResult<T>;
}

impl<T> HostResultExt<T> for HostResult<T> {
    fn read(self, capability: &'static str, property: &'static str) -> EncodeResult<T> {
        self.map_err(|Fault(code)| EncodeError::property_read(capability, property, code))
    }
}

/// Drop-shadow filter properties.
pub trait DropShadowSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Shadow angle in degrees.
    fn angle(&self) -> HostResult<f64>;
    /// Horizontal blur amount.
    fn blur_x(&self) -> HostResult<f64>;
    /// Vertical blur amount.
    fn blur_y(&self) -> HostResult<f64>;
    /// Shadow offset distance.
    fn distance(&self) -> HostResult<f64>;
    /// Whether the source object is hidden.
    fn hide_object(&self) -> HostResult<bool>;
    /// Whether the shadow is drawn inside the object.
    fn inner_shadow(&self) -> HostResult<bool>;
    /// Knockout flag.
    fn knockout(&self) -> HostResult<bool>;
    /// Raw quality code (0 low, 1 medium, 2 high).
    fn quality(&self) -> HostResult<u32>;
    /// Strength in percent.
    fn strength(&self) -> HostResult<i32>;
    /// Shadow color.
    fn shadow_color(&self) -> HostResult<Rgba8>;
}

/// Blur filter properties.
pub trait BlurSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Horizontal blur amount.
    fn blur_x(&self) -> HostResult<f64>;
    /// Vertical blur amount.
    fn blur_y(&self) -> HostResult<f64>;
    /// Raw quality code.
    fn quality(&self) -> HostResult<u32>;
}

/// Glow filter properties.
pub trait GlowSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Horizontal blur amount.
    fn blur_x(&self) -> HostResult<f64>;
    /// Vertical blur amount.
    fn blur_y(&self) -> HostResult<f64>;
    /// Whether the glow is drawn inside the object.
    fn inner_shadow(&self) -> HostResult<bool>;
    /// Knockout flag.
    fn knockout(&self) -> HostResult<bool>;
    /// Raw quality code.
    fn quality(&self) -> HostResult<u32>;
    /// Strength in percent.
    fn strength(&self) -> HostResult<i32>;
    /// Glow color.
    fn shadow_color(&self) -> HostResult<Rgba8>;
}

/// Bevel filter properties.
pub trait BevelSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Light angle in degrees.
    fn angle(&self) -> HostResult<f64>;
    /// Horizontal blur amount.
    fn blur_x(&self) -> HostResult<f64>;
    /// Vertical blur amount.
    fn blur_y(&self) -> HostResult<f64>;
    /// Bevel distance.
    fn distance(&self) -> HostResult<f64>;
    /// Highlight color.
    fn highlight_color(&self) -> HostResult<Rgba8>;
    /// Knockout flag.
    fn knockout(&self) -> HostResult<bool>;
    /// Raw quality code.
    fn quality(&self) -> HostResult<u32>;
    /// Strength in percent.
    fn strength(&self) -> HostResult<i32>;
    /// Shadow color.
    fn shadow_color(&self) -> HostResult<Rgba8>;
    /// Raw placement code (0 inner, 1 outer, 2 full).
    fn placement(&self) -> HostResult<u32>;
}

/// Properties shared by the gradient glow and gradient bevel filters.
pub trait GradientFilterSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Angle in degrees.
    fn angle(&self) -> HostResult<f64>;
    /// Horizontal blur amount.
    fn blur_x(&self) -> HostResult<f64>;
    /// Vertical blur amount.
    fn blur_y(&self) -> HostResult<f64>;
    /// Offset distance.
    fn distance(&self) -> HostResult<f64>;
    /// Knockout flag.
    fn knockout(&self) -> HostResult<bool>;
    /// Raw quality code.
    fn quality(&self) -> HostResult<u32>;
    /// Strength in percent.
    fn strength(&self) -> HostResult<i32>;
    /// Raw placement code.
    fn placement(&self) -> HostResult<u32>;
    /// The filter's color gradient.
    fn gradient(&self) -> HostResult<&dyn GradientHandle>;
}

/// Opaque gradient object; only linear color gradients carry readable stops.
pub trait GradientHandle {
    /// Probe for the linear color gradient capability.
    fn as_linear(&self) -> Option<&dyn LinearGradientSource> {
        None
    }
}

/// One key color of a gradient as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GradientPoint {
    /// Position along the ramp in `[0, 255]`.
    pub position: u8,
    /// Key color including alpha.
    pub color: Rgba8,
}

/// Linear color gradient key colors.
pub trait LinearGradientSource {
    /// Number of key colors.
    fn key_color_count(&self) -> HostResult<u8>;
    /// Key color at `index` (`index < key_color_count()`).
    fn key_color_at(&self, index: u8) -> HostResult<GradientPoint>;
}

/// Adjust-color filter properties.
pub trait ColorAdjustSource {
    /// Whether the filter is enabled.
    fn is_enabled(&self) -> HostResult<bool>;
    /// Brightness adjustment.
    fn brightness(&self) -> HostResult<f64>;
    /// Contrast adjustment.
    fn contrast(&self) -> HostResult<f64>;
    /// Saturation adjustment.
    fn saturation(&self) -> HostResult<f64>;
    /// Hue adjustment.
    fn hue(&self) -> HostResult<f64>;
}

/// Raw loop settings of a placed sound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoundLoopSettings {
    /// Raw loop mode code (0 repeat, 1 loop).
    pub mode: u32,
    /// Repeat count (meaningful for repeat mode).
    pub repeat_count: u32,
}

/// In/out limits of a placed sound, in 44.1 kHz samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoundLimit {
    /// First sample played.
    pub in_samples: u32,
    /// Last sample played.
    pub out_samples: u32,
}

/// Sound frame-element properties.
pub trait SoundSource {
    /// Loop settings.
    fn loop_settings(&self) -> HostResult<SoundLoopSettings>;
    /// Raw sync mode code (0 event, 1 start, 2 stop, 3 stream).
    fn sync_mode(&self) -> HostResult<u32>;
    /// In/out sample limits.
    fn limit(&self) -> HostResult<SoundLimit>;
}

/// Closed set of capabilities a host handle can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// [`DropShadowSource`].
    DropShadow,
    /// [`BlurSource`].
    Blur,
    /// [`GlowSource`].
    Glow,
    /// [`BevelSource`].
    Bevel,
    /// [`GradientFilterSource`] as a glow.
    GradientGlow,
    /// [`GradientFilterSource`] as a bevel.
    GradientBevel,
    /// [`ColorAdjustSource`].
    ColorAdjust,
    /// [`SoundSource`].
    Sound,
}

impl CapabilityKind {
    /// Stable snake_case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DropShadow => "drop_shadow",
            Self::Blur => "blur",
            Self::Glow => "glow",
            Self::Bevel => "bevel",
            Self::GradientGlow => "gradient_glow",
            Self::GradientBevel => "gradient_bevel",
            Self::ColorAdjust => "color_adjust",
            Self::Sound => "sound",
        }
    }
}

/// One capability a handle satisfies, borrowed from the handle.
#[derive(Clone, Copy)]
pub enum Capability<'a> {
    /// Drop-shadow filter.
    DropShadow(&'a dyn DropShadowSource),
    /// Blur filter.
    Blur(&'a dyn BlurSource),
    /// Glow filter.
    Glow(&'a dyn GlowSource),
    /// Bevel filter.
    Bevel(&'a dyn BevelSource),
    /// Gradient glow filter.
    GradientGlow(&'a dyn GradientFilterSource),
    /// Gradient bevel filter.
    GradientBevel(&'a dyn GradientFilterSource),
    /// Adjust-color filter.
    ColorAdjust(&'a dyn ColorAdjustSource),
    /// Sound frame element.
    Sound(&'a dyn SoundSource),
}

impl Capability<'_> {
    /// Discriminant of this capability.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::DropShadow(_) => CapabilityKind::DropShadow,
            Self::Blur(_) => CapabilityKind::Blur,
            Self::Glow(_) => CapabilityKind::Glow,
            Self::Bevel(_) => CapabilityKind::Bevel,
            Self::GradientGlow(_) => CapabilityKind::GradientGlow,
            Self::GradientBevel(_) => CapabilityKind::GradientBevel,
            Self::ColorAdjust(_) => CapabilityKind::ColorAdjust,
            Self::Sound(_) => CapabilityKind::Sound,
        }
    }
}

impl std::fmt::Debug for Capability<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Capability").field(&self.kind()).finish()
    }
}

/// Opaque host object that can be probed for capabilities.
///
/// Every probe defaults to "not supported"; implementors override the ones they satisfy.
pub trait CapabilityHandle {
    /// Probe for a drop-shadow filter.
    fn as_drop_shadow(&self) -> Option<&dyn DropShadowSource> {
        None
    }
    /// Probe for a blur filter.
    fn as_blur(&self) -> Option<&dyn BlurSource> {
        None
    }
    /// Probe for a glow filter.
    fn as_glow(&self) -> Option<&dyn GlowSource> {
        None
    }
    /// Probe for a bevel filter.
    fn as_bevel(&self) -> Option<&dyn BevelSource> {
        None
    }
    /// Probe for a gradient glow filter.
    fn as_gradient_glow(&self) -> Option<&dyn GradientFilterSource> {
        None
    }
    /// Probe for a gradient bevel filter.
    fn as_gradient_bevel(&self) -> Option<&dyn GradientFilterSource> {
        None
    }
    /// Probe for an adjust-color filter.
    fn as_color_adjust(&self) -> Option<&dyn ColorAdjustSource> {
        None
    }
    /// Probe for a sound frame element.
    fn as_sound(&self) -> Option<&dyn SoundSource> {
        None
    }

    /// Every capability this handle satisfies, in canonical probe order.
    fn capabilities(&self) -> Vec<Capability<'_>> {
        let mut caps = Vec::new();
        if let Some(c) = self.as_drop_shadow() {
            caps.push(Capability::DropShadow(c));
        }
        if let Some(c) = self.as_blur() {
            caps.push(Capability::Blur(c));
        }
        if let Some(c) = self.as_glow() {
            caps.push(Capability::Glow(c));
        }
        if let Some(c) = self.as_bevel() {
            caps.push(Capability::Bevel(c));
        }
        if let Some(c) = self.as_gradient_glow() {
            caps.push(Capability::GradientGlow(c));
        }
        if let Some(c) = self.as_gradient_bevel() {
            caps.push(Capability::GradientBevel(c));
        }
        if let Some(c) = self.as_color_adjust() {
            caps.push(Capability::ColorAdjust(c));
        }
        if let Some(c) = self.as_sound() {
            caps.push(Capability::Sound(c));
        }
        caps
    }
}

/// A handle that satisfies no probe.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapabilities;

impl CapabilityHandle for NoCapabilities {}

#[cfg(test)]
#[path = "../../tests/unit/host/capability.rs"]
mod tests;
