//! Plain-data stand-ins for host capability handles.
//!
//! Each descriptor is deserialized from a replay script and answers the same probes a live
//! authoring-tool object would. A descriptor may populate several filter variants at once,
//! and any getter can be made to fail by listing its property name under `faults`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Rgba8,
    host::capability::{
        BevelSource, BlurSource, CapabilityHandle, ColorAdjustSource, DropShadowSource, Fault,
        GlowSource, GradientFilterSource, GradientHandle, GradientPoint, HostResult,
        LinearGradientSource, SoundLimit, SoundLoopSettings, SoundSource,
    },
};

/// Property name to fault code. A listed getter returns `Err(Fault(code))`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faults(pub BTreeMap<String, i32>);

impl Faults {
    /// Whether no getter is set to fail.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Make `property` fail with `code`.
    pub fn inject(mut self, property: &str, code: i32) -> Self {
        self.0.insert(property.to_owned(), code);
        self
    }

    fn get<T>(&self, property: &str, value: T) -> HostResult<T> {
        match self.0.get(property) {
            Some(&code) => Err(Fault(code)),
            None => Ok(value),
        }
    }
}

/// Fault reported by `key_color_at` for an index past the stop list.
pub const STOP_OUT_OF_RANGE: i32 = -1;
/// Fault reported by `key_color_count` when the stop list does not fit the host's `u8` count.
pub const TOO_MANY_STOPS: i32 = -2;

fn yes() -> bool {
    true
}

fn white() -> Rgba8 {
    Rgba8::opaque(255, 255, 255)
}

fn black() -> Rgba8 {
    Rgba8::opaque(0, 0, 0)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Drop-shadow filter values.
pub struct DropShadowParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Angle in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Horizontal blur.
    #[serde(default)]
    pub blur_x: f64,
    /// Vertical blur.
    #[serde(default)]
    pub blur_y: f64,
    /// Offset distance.
    #[serde(default)]
    pub distance: f64,
    /// Hide-object flag.
    #[serde(default)]
    pub hide_object: bool,
    /// Inner-shadow flag.
    #[serde(default)]
    pub inner_shadow: bool,
    /// Knockout flag.
    #[serde(default)]
    pub knockout: bool,
    /// Raw quality code.
    #[serde(default)]
    pub quality: u32,
    /// Strength in percent.
    #[serde(default)]
    pub strength: i32,
    /// Shadow color.
    #[serde(default = "black")]
    pub color: Rgba8,
    /// Failing getters.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl DropShadowSource for DropShadowParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn angle(&self) -> HostResult<f64> {
        self.faults.get("angle", self.angle)
    }
    fn blur_x(&self) -> HostResult<f64> {
        self.faults.get("blur_x", self.blur_x)
    }
    fn blur_y(&self) -> HostResult<f64> {
        self.faults.get("blur_y", self.blur_y)
    }
    fn distance(&self) -> HostResult<f64> {
        self.faults.get("distance", self.distance)
    }
    fn hide_object(&self) -> HostResult<bool> {
        self.faults.get("hide_object", self.hide_object)
    }
    fn inner_shadow(&self) -> HostResult<bool> {
        self.faults.get("inner_shadow", self.inner_shadow)
    }
    fn knockout(&self) -> HostResult<bool> {
        self.faults.get("knockout", self.knockout)
    }
    fn quality(&self) -> HostResult<u32> {
        self.faults.get("quality", self.quality)
    }
    fn strength(&self) -> HostResult<i32> {
        self.faults.get("strength", self.strength)
    }
    fn shadow_color(&self) -> HostResult<Rgba8> {
        self.faults.get("shadow_color", self.color)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Blur filter values.
pub struct BlurParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Horizontal blur.
    #[serde(default)]
    pub blur_x: f64,
    /// Vertical blur.
    #[serde(default)]
    pub blur_y: f64,
    /// Raw quality code.
    #[serde(default)]
    pub quality: u32,
    /// Failing getters.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl BlurSource for BlurParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn blur_x(&self) -> HostResult<f64> {
        self.faults.get("blur_x", self.blur_x)
    }
    fn blur_y(&self) -> HostResult<f64> {
        self.faults.get("blur_y", self.blur_y)
    }
    fn quality(&self) -> HostResult<u32> {
        self.faults.get("quality", self.quality)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Glow filter values.
pub struct GlowParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Horizontal blur.
    #[serde(default)]
    pub blur_x: f64,
    /// Vertical blur.
    #[serde(default)]
    pub blur_y: f64,
    /// Inner-glow flag.
    #[serde(default)]
    pub inner_shadow: bool,
    /// Knockout flag.
    #[serde(default)]
    pub knockout: bool,
    /// Raw quality code.
    #[serde(default)]
    pub quality: u32,
    /// Strength in percent.
    #[serde(default)]
    pub strength: i32,
    /// Glow color.
    #[serde(default = "black")]
    pub color: Rgba8,
    /// Failing getters.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl GlowSource for GlowParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn blur_x(&self) -> HostResult<f64> {
        self.faults.get("blur_x", self.blur_x)
    }
    fn blur_y(&self) -> HostResult<f64> {
        self.faults.get("blur_y", self.blur_y)
    }
    fn inner_shadow(&self) -> HostResult<bool> {
        self.faults.get("inner_shadow", self.inner_shadow)
    }
    fn knockout(&self) -> HostResult<bool> {
        self.faults.get("knockout", self.knockout)
    }
    fn quality(&self) -> HostResult<u32> {
        self.faults.get("quality", self.quality)
    }
    fn strength(&self) -> HostResult<i32> {
        self.faults.get("strength", self.strength)
    }
    fn shadow_color(&self) -> HostResult<Rgba8> {
        self.faults.get("shadow_color", self.color)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Bevel filter values.
pub struct BevelParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Light angle in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Horizontal blur.
    #[serde(default)]
    pub blur_x: f64,
    /// Vertical blur.
    #[serde(default)]
    pub blur_y: f64,
    /// Bevel distance.
    #[serde(default)]
    pub distance: f64,
    /// Highlight color.
    #[serde(default = "white")]
    pub highlight_color: Rgba8,
    /// Knockout flag.
    #[serde(default)]
    pub knockout: bool,
    /// Raw quality code.
    #[serde(default)]
    pub quality: u32,
    /// Strength in percent.
    #[serde(default)]
    pub strength: i32,
    /// Shadow color.
    #[serde(default = "black")]
    pub shadow_color: Rgba8,
    /// Raw placement code.
    #[serde(default)]
    pub placement: u32,
    /// Failing getters.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl BevelSource for BevelParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn angle(&self) -> HostResult<f64> {
        self.faults.get("angle", self.angle)
    }
    fn blur_x(&self) -> HostResult<f64> {
        self.faults.get("blur_x", self.blur_x)
    }
    fn blur_y(&self) -> HostResult<f64> {
        self.faults.get("blur_y", self.blur_y)
    }
    fn distance(&self) -> HostResult<f64> {
        self.faults.get("distance", self.distance)
    }
    fn highlight_color(&self) -> HostResult<Rgba8> {
        self.faults.get("highlight_color", self.highlight_color)
    }
    fn knockout(&self) -> HostResult<bool> {
        self.faults.get("knockout", self.knockout)
    }
    fn quality(&self) -> HostResult<u32> {
        self.faults.get("quality", self.quality)
    }
    fn strength(&self) -> HostResult<i32> {
        self.faults.get("strength", self.strength)
    }
    fn shadow_color(&self) -> HostResult<Rgba8> {
        self.faults.get("shadow_color", self.shadow_color)
    }
    fn placement(&self) -> HostResult<u32> {
        self.faults.get("placement", self.placement)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Gradient glow / gradient bevel values, including the gradient itself.
pub struct GradientParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Angle in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Horizontal blur.
    #[serde(default)]
    pub blur_x: f64,
    /// Vertical blur.
    #[serde(default)]
    pub blur_y: f64,
    /// Offset distance.
    #[serde(default)]
    pub distance: f64,
    /// Knockout flag.
    #[serde(default)]
    pub knockout: bool,
    /// Raw quality code.
    #[serde(default)]
    pub quality: u32,
    /// Strength in percent.
    #[serde(default)]
    pub strength: i32,
    /// Raw placement code.
    #[serde(default)]
    pub placement: u32,
    /// `false` models a gradient object that is not a linear color gradient.
    #[serde(default = "yes")]
    pub linear: bool,
    /// Key colors.
    #[serde(default)]
    pub stops: Vec<GradientPoint>,
    /// Failing getters, including `gradient`, `key_color_count` and `key_color_at`.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl GradientFilterSource for GradientParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn angle(&self) -> HostResult<f64> {
        self.faults.get("angle", self.angle)
    }
    fn blur_x(&self) -> HostResult<f64> {
        self.faults.get("blur_x", self.blur_x)
    }
    fn blur_y(&self) -> HostResult<f64> {
        self.faults.get("blur_y", self.blur_y)
    }
    fn distance(&self) -> HostResult<f64> {
        self.faults.get("distance", self.distance)
    }
    fn knockout(&self) -> HostResult<bool> {
        self.faults.get("knockout", self.knockout)
    }
    fn quality(&self) -> HostResult<u32> {
        self.faults.get("quality", self.quality)
    }
    fn strength(&self) -> HostResult<i32> {
        self.faults.get("strength", self.strength)
    }
    fn placement(&self) -> HostResult<u32> {
        self.faults.get("placement", self.placement)
    }
    fn gradient(&self) -> HostResult<&dyn GradientHandle> {
        self.faults.get("gradient", self as &dyn GradientHandle)
    }
}

impl GradientHandle for GradientParams {
    fn as_linear(&self) -> Option<&dyn LinearGradientSource> {
        self.linear.then_some(self as &dyn LinearGradientSource)
    }
}

impl LinearGradientSource for GradientParams {
    fn key_color_count(&self) -> HostResult<u8> {
        let n = u8::try_from(self.stops.len()).map_err(|_| Fault(TOO_MANY_STOPS))?;
        self.faults.get("key_color_count", n)
    }

    fn key_color_at(&self, index: u8) -> HostResult<GradientPoint> {
        if let Some(&code) = self.faults.0.get("key_color_at") {
            return Err(Fault(code));
        }
        self.stops
            .get(usize::from(index))
            .copied()
            .ok_or(Fault(STOP_OUT_OF_RANGE))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Adjust-color filter values.
pub struct ColorAdjustParams {
    /// Enabled flag.
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Brightness.
    #[serde(default)]
    pub brightness: f64,
    /// Contrast.
    #[serde(default)]
    pub contrast: f64,
    /// Saturation.
    #[serde(default)]
    pub saturation: f64,
    /// Hue.
    #[serde(default)]
    pub hue: f64,
    /// Failing getters.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl ColorAdjustSource for ColorAdjustParams {
    fn is_enabled(&self) -> HostResult<bool> {
        self.faults.get("enabled", self.enabled)
    }
    fn brightness(&self) -> HostResult<f64> {
        self.faults.get("brightness", self.brightness)
    }
    fn contrast(&self) -> HostResult<f64> {
        self.faults.get("contrast", self.contrast)
    }
    fn saturation(&self) -> HostResult<f64> {
        self.faults.get("saturation", self.saturation)
    }
    fn hue(&self) -> HostResult<f64> {
        self.faults.get("hue", self.hue)
    }
}

/// A filter handle: every populated variant answers its probe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterDescriptor {
    /// Drop-shadow variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_shadow: Option<DropShadowParams>,
    /// Blur variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<BlurParams>,
    /// Glow variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<GlowParams>,
    /// Bevel variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel: Option<BevelParams>,
    /// Gradient glow variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_glow: Option<GradientParams>,
    /// Gradient bevel variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_bevel: Option<GradientParams>,
    /// Adjust-color variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_adjust: Option<ColorAdjustParams>,
}

impl CapabilityHandle for FilterDescriptor {
    fn as_drop_shadow(&self) -> Option<&dyn DropShadowSource> {
        self.drop_shadow.as_ref().map(|p| p as &dyn DropShadowSource)
    }
    fn as_blur(&self) -> Option<&dyn BlurSource> {
        self.blur.as_ref().map(|p| p as &dyn BlurSource)
    }
    fn as_glow(&self) -> Option<&dyn GlowSource> {
        self.glow.as_ref().map(|p| p as &dyn GlowSource)
    }
    fn as_bevel(&self) -> Option<&dyn BevelSource> {
        self.bevel.as_ref().map(|p| p as &dyn BevelSource)
    }
    fn as_gradient_glow(&self) -> Option<&dyn GradientFilterSource> {
        self.gradient_glow
            .as_ref()
            .map(|p| p as &dyn GradientFilterSource)
    }
    fn as_gradient_bevel(&self) -> Option<&dyn GradientFilterSource> {
        self.gradient_bevel
            .as_ref()
            .map(|p| p as &dyn GradientFilterSource)
    }
    fn as_color_adjust(&self) -> Option<&dyn ColorAdjustSource> {
        self.color_adjust
            .as_ref()
            .map(|p| p as &dyn ColorAdjustSource)
    }
}

/// A sound frame element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundDescriptor {
    /// Raw loop mode code.
    #[serde(default)]
    pub loop_mode: u32,
    /// Repeat count.
    #[serde(default)]
    pub repeat_count: u32,
    /// Raw sync mode code.
    #[serde(default)]
    pub sync_mode: u32,
    /// First sample played.
    #[serde(default)]
    pub in_samples: u32,
    /// Last sample played.
    #[serde(default)]
    pub out_samples: u32,
    /// Failing getters: `loop_mode`, `sync_mode`, `limit`.
    #[serde(default, skip_serializing_if = "Faults::is_empty")]
    pub faults: Faults,
}

impl SoundSource for SoundDescriptor {
    fn loop_settings(&self) -> HostResult<SoundLoopSettings> {
        self.faults.get(
            "loop_mode",
            SoundLoopSettings {
                mode: self.loop_mode,
                repeat_count: self.repeat_count,
            },
        )
    }

    fn sync_mode(&self) -> HostResult<u32> {
        self.faults.get("sync_mode", self.sync_mode)
    }

    fn limit(&self) -> HostResult<SoundLimit> {
        self.faults.get(
            "limit",
            SoundLimit {
                in_samples: self.in_samples,
                out_samples: self.out_samples,
            },
        )
    }
}

impl CapabilityHandle for SoundDescriptor {
    fn as_sound(&self) -> Option<&dyn SoundSource> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/descriptor.rs"]
mod tests;
