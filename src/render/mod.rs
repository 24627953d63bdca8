pub mod flat;
pub mod spatial;
pub mod surface;

pub use flat::{FlatChartFrame, project_flat_chart};
pub use spatial::{
    AnimationLoop, Camera, DisposalStats, Geometry, GroundGrid, Light, Material, MaterialColor,
    ROTATION_PER_FRAME, SCATTER_JITTER, SceneFrame, SceneNode, SpatialScene, Vec3, build_bar_scene,
    build_line_scene, build_scatter_scene, build_surface_scene,
};
pub use surface::{Bitmap, ListenerId, NullRenderer, Renderer};

/// The one live rendering target a session may own.
///
/// Exactly one target (or none) is alive at any time; the session fully
/// disposes the previous target before creating a successor, whichever
/// family either belongs to.
#[derive(Debug)]
pub enum RenderingTarget {
    Flat(FlatChartFrame),
    Spatial(SpatialScene),
}

impl RenderingTarget {
    #[must_use]
    pub fn is_spatial(&self) -> bool {
        matches!(self, Self::Spatial(_))
    }
}
