use crate::{
    foundation::core::{HexColor, Strength},
    foundation::error::EncodeResult,
    host::capability::{
        BevelSource, BlurSource, Capability, CapabilityHandle, CapabilityKind, ColorAdjustSource,
        DropShadowSource, GlowSource, GradientFilterSource, GradientHandle, GradientPoint,
        HostResultExt as _,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Filter rendering quality.
pub enum FilterQuality {
    /// Code 0.
    Low,
    /// Code 1.
    Medium,
    /// Code 2.
    High,
}

impl FilterQuality {
    /// Exact lookup of a host quality code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Where a bevel or gradient effect is drawn relative to the object.
pub enum FilterPlacement {
    /// Code 0.
    Inner,
    /// Code 1.
    Outer,
    /// Code 2.
    Full,
}

impl FilterPlacement {
    /// Exact lookup of a host placement code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Inner),
            1 => Some(Self::Outer),
            2 => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Normalized gradient key color.
pub struct GradientStop {
    /// Position along the ramp in `[0, 100]`.
    pub offset_percent: f64,
    /// Stop color.
    pub color: HexColor,
    /// Stop opacity in `[0, 1]`.
    pub opacity_fraction: f64,
}

impl GradientStop {
    /// Normalize a host key color (`position` in `[0, 255]`, 8-bit alpha).
    pub fn from_point(point: GradientPoint) -> Self {
        Self {
            offset_percent: f64::from(point.position) * 100.0 / 255.0,
            color: point.color.hex(),
            opacity_fraction: point.color.alpha_fraction(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Canonical record for one graphic filter attached to a displayed object.
pub struct FilterSpec {
    /// Whether the filter is enabled in the authoring tool.
    pub enabled: bool,
    /// Variant-specific fields, tagged by `filterType`.
    #[serde(flatten)]
    pub kind: FilterKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "filterType", rename_all_fields = "camelCase")]
/// Variant-specific filter fields.
pub enum FilterKind {
    /// Drop shadow.
    #[allow(missing_docs)]
    DropShadow {
        angle: f64,
        blur_x: f64,
        blur_y: f64,
        distance: f64,
        hide_object: bool,
        inner_shadow: bool,
        knockout: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<FilterQuality>,
        strength: Strength,
        color: HexColor,
    },
    /// Blur.
    #[allow(missing_docs)]
    Blur {
        blur_x: f64,
        blur_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<FilterQuality>,
    },
    /// Glow.
    #[allow(missing_docs)]
    Glow {
        blur_x: f64,
        blur_y: f64,
        inner_shadow: bool,
        knockout: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<FilterQuality>,
        strength: Strength,
        color: HexColor,
    },
    /// Bevel.
    #[allow(missing_docs)]
    Bevel {
        angle: f64,
        blur_x: f64,
        blur_y: f64,
        distance: f64,
        highlight_color: HexColor,
        knockout: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<FilterQuality>,
        strength: Strength,
        shadow_color: HexColor,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placement: Option<FilterPlacement>,
    },
    /// Gradient glow.
    GradientGlow(GradientFilter),
    /// Gradient bevel.
    GradientBevel(GradientFilter),
    /// Adjust color.
    #[allow(missing_docs)]
    ColorAdjust {
        brightness: f64,
        contrast: f64,
        saturation: f64,
        hue: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Fields shared by the gradient glow and gradient bevel filters.
pub struct GradientFilter {
    /// Angle in degrees.
    pub angle: f64,
    /// Horizontal blur amount.
    pub blur_x: f64,
    /// Vertical blur amount.
    pub blur_y: f64,
    /// Offset distance.
    pub distance: f64,
    /// Knockout flag.
    pub knockout: bool,
    /// Quality; absent when the host code is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<FilterQuality>,
    /// Strength.
    pub strength: Strength,
    /// Placement; absent when the host code is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<FilterPlacement>,
    /// Stops in source order; absent when the gradient is not a linear color gradient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_stops: Option<Vec<GradientStop>>,
}

/// Encode every filter variant `handle` satisfies, in canonical probe order.
///
/// A handle matching several probes produces several blocks; non-filter capabilities are
/// ignored. The first failing getter aborts the whole call.
pub fn encode_filters(handle: &dyn CapabilityHandle) -> EncodeResult<Vec<FilterSpec>> {
    let mut out = Vec::new();
    for cap in handle.capabilities() {
        let spec = match cap {
            Capability::DropShadow(f) => encode_drop_shadow(f)?,
            Capability::Blur(f) => encode_blur(f)?,
            Capability::Glow(f) => encode_glow(f)?,
            Capability::Bevel(f) => encode_bevel(f)?,
            Capability::GradientGlow(f) => {
                let (enabled, g) = encode_gradient_filter(f, CapabilityKind::GradientGlow)?;
                FilterSpec {
                    enabled,
                    kind: FilterKind::GradientGlow(g),
                }
            }
            Capability::GradientBevel(f) => {
                let (enabled, g) = encode_gradient_filter(f, CapabilityKind::GradientBevel)?;
                FilterSpec {
                    enabled,
                    kind: FilterKind::GradientBevel(g),
                }
            }
            Capability::ColorAdjust(f) => encode_color_adjust(f)?,
            Capability::Sound(_) => continue,
        };
        out.push(spec);
    }
    Ok(out)
}

fn quality(code: u32, cap: &'static str) -> Option<FilterQuality> {
    let q = FilterQuality::from_code(code);
    if q.is_none() {
        tracing::debug!(
            capability = cap,
            code,
            "unsupported filter quality code; field omitted"
        );
    }
    q
}

fn placement(code: u32, cap: &'static str) -> Option<FilterPlacement> {
    let p = FilterPlacement::from_code(code);
    if p.is_none() {
        tracing::debug!(
            capability = cap,
            code,
            "unsupported filter placement code; field omitted"
        );
    }
    p
}

fn encode_drop_shadow(f: &dyn DropShadowSource) -> EncodeResult<FilterSpec> {
    const CAP: &str = CapabilityKind::DropShadow.name();
    Ok(FilterSpec {
        enabled: f.is_enabled().read(CAP, "enabled")?,
        kind: FilterKind::DropShadow {
            angle: f.angle().read(CAP, "angle")?,
            blur_x: f.blur_x().read(CAP, "blur_x")?,
            blur_y: f.blur_y().read(CAP, "blur_y")?,
            distance: f.distance().read(CAP, "distance")?,
            hide_object: f.hide_object().read(CAP, "hide_object")?,
            inner_shadow: f.inner_shadow().read(CAP, "inner_shadow")?,
            knockout: f.knockout().read(CAP, "knockout")?,
            quality: quality(f.quality().read(CAP, "quality")?, CAP),
            strength: Strength(f.strength().read(CAP, "strength")?),
            color: f.shadow_color().read(CAP, "shadow_color")?.hex(),
        },
    })
}

fn encode_blur(f: &dyn BlurSource) -> EncodeResult<FilterSpec> {
    const CAP: &str = CapabilityKind::Blur.name();
    Ok(FilterSpec {
        enabled: f.is_enabled().read(CAP, "enabled")?,
        kind: FilterKind::Blur {
            blur_x: f.blur_x().read(CAP, "blur_x")?,
            blur_y: f.blur_y().read(CAP, "blur_y")?,
            quality: quality(f.quality().read(CAP, "quality")?, CAP),
        },
    })
}

fn encode_glow(f: &dyn GlowSource) -> EncodeResult<FilterSpec> {
    const CAP: &str = CapabilityKind::Glow.name();
    Ok(FilterSpec {
        enabled: f.is_enabled().read(CAP, "enabled")?,
        kind: FilterKind::Glow {
            blur_x: f.blur_x().read(CAP, "blur_x")?,
            blur_y: f.blur_y().read(CAP, "blur_y")?,
            inner_shadow: f.inner_shadow().read(CAP, "inner_shadow")?,
            knockout: f.knockout().read(CAP, "knockout")?,
            quality: quality(f.quality().read(CAP, "quality")?, CAP),
            strength: Strength(f.strength().read(CAP, "strength")?),
            color: f.shadow_color().read(CAP, "shadow_color")?.hex(),
        },
    })
}

fn encode_bevel(f: &dyn BevelSource) -> EncodeResult<FilterSpec> {
    const CAP: &str = CapabilityKind::Bevel.name();
    Ok(FilterSpec {
        enabled: f.is_enabled().read(CAP, "enabled")?,
        kind: FilterKind::Bevel {
            angle: f.angle().read(CAP, "angle")?,
            blur_x: f.blur_x().read(CAP, "blur_x")?,
            blur_y: f.blur_y().read(CAP, "blur_y")?,
            distance: f.distance().read(CAP, "distance")?,
            highlight_color: f.highlight_color().read(CAP, "highlight_color")?.hex(),
            knockout: f.knockout().read(CAP, "knockout")?,
            quality: quality(f.quality().read(CAP, "quality")?, CAP),
            strength: Strength(f.strength().read(CAP, "strength")?),
            shadow_color: f.shadow_color().read(CAP, "shadow_color")?.hex(),
            placement: placement(f.placement().read(CAP, "placement")?, CAP),
        },
    })
}

fn encode_gradient_filter(
    f: &dyn GradientFilterSource,
    kind: CapabilityKind,
) -> EncodeResult<(bool, GradientFilter)> {
    let cap = kind.name();
    let enabled = f.is_enabled().read(cap, "enabled")?;
    let filter = GradientFilter {
        angle: f.angle().read(cap, "angle")?,
        blur_x: f.blur_x().read(cap, "blur_x")?,
        blur_y: f.blur_y().read(cap, "blur_y")?,
        distance: f.distance().read(cap, "distance")?,
        knockout: f.knockout().read(cap, "knockout")?,
        quality: quality(f.quality().read(cap, "quality")?, cap),
        strength: Strength(f.strength().read(cap, "strength")?),
        placement: placement(f.placement().read(cap, "placement")?, cap),
        gradient_stops: gradient_stops(f.gradient().read(cap, "gradient")?, cap)?,
    };
    Ok((enabled, filter))
}

/// Read every key color of a linear gradient by index, preserving source order.
///
/// Returns `None` when the gradient is not a linear color gradient.
pub fn gradient_stops(
    gradient: &dyn GradientHandle,
    cap: &'static str,
) -> EncodeResult<Option<Vec<GradientStop>>> {
    let Some(linear) = gradient.as_linear() else {
        return Ok(None);
    };
    let count = linear.key_color_count().read(cap, "key_color_count")?;
    let mut stops = Vec::with_capacity(usize::from(count));
    for index in 0..count {
        let point = linear.key_color_at(index).read(cap, "key_color_at")?;
        stops.push(GradientStop::from_point(point));
    }
    Ok(Some(stops))
}

fn encode_color_adjust(f: &dyn ColorAdjustSource) -> EncodeResult<FilterSpec> {
    const CAP: &str = CapabilityKind::ColorAdjust.name();
    Ok(FilterSpec {
        enabled: f.is_enabled().read(CAP, "enabled")?,
        kind: FilterKind::ColorAdjust {
            brightness: f.brightness().read(CAP, "brightness")?,
            contrast: f.contrast().read(CAP, "contrast")?,
            saturation: f.saturation().read(CAP, "saturation")?,
            hue: f.hue().read(CAP, "hue")?,
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
