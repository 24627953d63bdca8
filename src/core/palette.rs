//! Fixed color assignments.
//!
//! 2D series colors come from a fixed palette assigned by index, cycling
//! when the series outgrows it. 3D hues are deterministic functions of the
//! element index so regenerating the same dataset reproduces the same
//! colors.

/// Per-point fill palette for flat chart series.
pub const PALETTE: [&str; 10] = [
    "#3B82F6", "#8B5CF6", "#06B6D4", "#10B981", "#F59E0B", "#EF4444", "#EC4899", "#F97316",
    "#6366F1", "#14B8A6",
];

/// Shared border color for flat chart series.
pub const FLAT_BORDER_COLOR: &str = "#1F2937";

/// Stroke color of the 3D polyline.
pub const LINE_COLOR: &str = "#3B82F6";

/// Wireframe color of the decorative 3D surface.
pub const SURFACE_COLOR: &str = "#8B5CF6";

#[must_use]
pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Hue in `[0, 1)` for 3D scatter spheres.
#[must_use]
pub fn scatter_hue(index: usize) -> f64 {
    (index as f64 * 0.07) % 1.0
}

/// Hue in degrees for 3D bars.
#[must_use]
pub fn bar_hue_degrees(index: usize) -> u16 {
    ((index * 37) % 360) as u16
}

/// Hue in degrees for 3D line marker spheres.
#[must_use]
pub fn marker_hue_degrees(index: usize) -> u16 {
    ((index * 45) % 360) as u16
}
