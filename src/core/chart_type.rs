use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Which rendering target family a chart type drives.
///
/// The two families are mutually exclusive: a session never holds a flat
/// chart and a spatial scene at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartFamily {
    /// 2D chart frame bound to a flat drawing surface.
    Flat,
    /// 3D scene graph with camera, lights, and a continuous animation loop.
    Spatial,
}

/// Closed set of supported chart types.
///
/// Serialized names match the persisted history wire format (`"bar"`,
/// `"polarArea"`, `"3dscatter"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
    Bubble,
    Scatter,
    #[serde(rename = "3dscatter")]
    Scatter3d,
    #[serde(rename = "3dbar")]
    Bar3d,
    #[serde(rename = "3dline")]
    Line3d,
    #[serde(rename = "3dsurface")]
    Surface3d,
}

impl ChartType {
    #[must_use]
    pub fn family(self) -> ChartFamily {
        match self {
            Self::Scatter3d | Self::Bar3d | Self::Line3d | Self::Surface3d => ChartFamily::Spatial,
            _ => ChartFamily::Flat,
        }
    }

    /// Pie-family charts render without x/y axis scales; every other flat
    /// type draws gridlined scales.
    #[must_use]
    pub fn uses_axis_scales(self) -> bool {
        !matches!(self, Self::Pie | Self::Doughnut)
    }

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Radar => "radar",
            Self::PolarArea => "polarArea",
            Self::Bubble => "bubble",
            Self::Scatter => "scatter",
            Self::Scatter3d => "3dscatter",
            Self::Bar3d => "3dbar",
            Self::Line3d => "3dline",
            Self::Surface3d => "3dsurface",
        }
    }

    #[must_use]
    pub fn all() -> [ChartType; 12] {
        [
            Self::Bar,
            Self::Line,
            Self::Pie,
            Self::Doughnut,
            Self::Radar,
            Self::PolarArea,
            Self::Bubble,
            Self::Scatter,
            Self::Scatter3d,
            Self::Bar3d,
            Self::Line3d,
            Self::Surface3d,
        ]
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ChartType {
    type Err = VizError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.wire_name() == name)
            .ok_or_else(|| VizError::RenderFailure(format!("unsupported chart type: {name}")))
    }
}
