//! Per-vertex light terms: ambient occlusion, light curve, and biome tints.

use tessera_meta::{Metadata, Rgb, StateInfo, TintKind};

/// Brightness floor of a fully occluded corner.
pub const AO_FLOOR: f32 = 0.4;

/// AO level of a face corner from its two side samples and the diagonal sample.
///
/// Returns 3 for an unoccluded corner and 0 for a fully occluded one. Two solid
/// sides always give 0, whatever the diagonal holds.
#[inline]
pub fn corner_ao(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        0
    } else {
        3 - (side1 as u8 + side2 as u8 + corner as u8)
    }
}

/// Brightness multiplier of an AO level (0..=3).
#[inline]
pub fn ao_brightness(level: u8) -> f32 {
    AO_FLOOR + level.min(3) as f32 / 3.0 * (1.0 - AO_FLOOR)
}

/// Maps a 0..=15 light level to a brightness multiplier that never reaches black.
#[inline]
pub fn light_curve(level: u8) -> f32 {
    0.25 + 0.75 * (level.min(15) as f32 / 15.0).powf(1.2)
}

/// Color for a face that declares a tint index.
pub fn tint(meta: &Metadata, block: &str, state: Option<&StateInfo>, biome: u16) -> Rgb {
    if block == "redstone_wire" {
        let power = state
            .and_then(|s| s.prop("power"))
            .and_then(|p| p.parse::<u8>().ok())
            .unwrap_or(0);
        return meta.redstone_tint(power);
    }
    if let Some(c) = meta.constant_tint(block) {
        return c;
    }
    if block.contains("leaves") || block == "vine" {
        return meta.biome_tint(TintKind::Foliage, biome);
    }
    if block.contains("water") {
        return meta.biome_tint(TintKind::Water, biome);
    }
    meta.biome_tint(TintKind::Grass, biome)
}

#[inline]
pub fn mul_rgb(a: Rgb, s: f32) -> Rgb {
    [a[0] * s, a[1] * s, a[2] * s]
}
