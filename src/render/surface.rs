use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::render::{FlatChartFrame, SceneFrame};

/// Raw RGBA snapshot of a drawing surface, ready for PNG encoding by the
/// host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }
}

/// Handle for one registered window resize listener.
///
/// Registration and removal are paired: whichever rendering target
/// registered a listener owns the handle and must remove it during its own
/// disposal, however disposal was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Backend seam between the session and a concrete drawing stack.
///
/// A backend owns the drawing surface and the host window's resize events.
/// The session presents frames through it and never touches windowing APIs
/// directly.
pub trait Renderer {
    /// Draws a flat chart frame onto the surface.
    fn present_flat(&mut self, frame: &FlatChartFrame) -> VizResult<()>;

    /// Draws one spatial scene frame onto the surface.
    fn present_spatial(&mut self, frame: &SceneFrame) -> VizResult<()>;

    /// Snapshot of the current surface contents.
    fn snapshot(&self) -> VizResult<Bitmap>;

    /// Clears the surface backing store. Best-effort; must not fail.
    fn clear(&mut self);

    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// No-op renderer used by tests and headless session usage.
///
/// It still validates frames so tests can catch invalid geometry before a
/// real backend is introduced, and it tracks resize-listener registrations
/// so lifecycle tests can assert paired removal.
#[derive(Debug)]
pub struct NullRenderer {
    pub surface_width: u32,
    pub surface_height: u32,
    pub last_flat_point_count: usize,
    pub last_spatial_node_count: usize,
    pub flat_presents: u64,
    pub spatial_presents: u64,
    pub clears: u64,
    pub active_resize_listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl NullRenderer {
    #[must_use]
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            last_flat_point_count: 0,
            last_spatial_node_count: 0,
            flat_presents: 0,
            spatial_presents: 0,
            clears: 0,
            active_resize_listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Renderer for NullRenderer {
    fn present_flat(&mut self, frame: &FlatChartFrame) -> VizResult<()> {
        frame.validate()?;
        self.last_flat_point_count = frame.values.len();
        self.flat_presents += 1;
        Ok(())
    }

    fn present_spatial(&mut self, frame: &SceneFrame) -> VizResult<()> {
        frame.validate()?;
        self.last_spatial_node_count = frame.nodes.len();
        self.spatial_presents += 1;
        Ok(())
    }

    fn snapshot(&self) -> VizResult<Bitmap> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(VizError::ExportFailure(
                "drawing surface has zero size".to_owned(),
            ));
        }
        Ok(Bitmap::blank(self.surface_width, self.surface_height))
    }

    fn clear(&mut self) {
        self.last_flat_point_count = 0;
        self.last_spatial_node_count = 0;
        self.clears += 1;
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.active_resize_listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.active_resize_listeners.retain(|l| *l != id);
    }
}
