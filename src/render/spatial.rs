use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Dataset, palette, to_number};
use crate::error::{VizError, VizResult};
use crate::render::ListenerId;

/// Scene rotation around the vertical axis applied per animation frame,
/// radians.
pub const ROTATION_PER_FRAME: f64 = 0.0015;

/// Half-range of the random z-jitter applied to 3D scatter points.
pub const SCATTER_JITTER: f64 = 15.0;

const SCATTER_SPHERE_RADIUS: f64 = 0.6;
const BAR_SPACING: f64 = 2.0;
const BAR_SIDE: f64 = 1.5;
const MIN_BAR_HEIGHT: f64 = 0.001;
const LINE_STEP: f64 = 1.2;
const LINE_MARKER_RADIUS: f64 = 0.25;
const SURFACE_SIZE: f64 = 30.0;
const SURFACE_SEGMENTS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Mesh geometry owned by one scene node. Dimensions are world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere {
        radius: f64,
        segments: u32,
    },
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Polyline {
        points: Vec<Vec3>,
    },
    /// Fixed-resolution parametric grid. Decorative: heights come from a
    /// closed-form function of grid position, not from the dataset.
    SurfaceGrid {
        size: f64,
        segments: u32,
        heights: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialColor {
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f64, s: f64, l: f64 },
    Hex(String),
}

/// Phong-style material description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: MaterialColor,
    pub shininess: f64,
    pub wireframe: bool,
}

impl Material {
    #[must_use]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self {
            color: MaterialColor::Hsl { h, s, l },
            shininess: 30.0,
            wireframe: false,
        }
    }

    #[must_use]
    pub fn hex(color: &str) -> Self {
        Self {
            color: MaterialColor::Hex(color.to_owned()),
            shininess: 30.0,
            wireframe: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
    /// Source label carried for pointer feedback; not used by the renderer.
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub fov_degrees: f64,
    pub position: Vec3,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient {
        color: String,
        intensity: f64,
    },
    Directional {
        color: String,
        intensity: f64,
        direction: Vec3,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundGrid {
    pub size: f64,
    pub divisions: u32,
}

/// Counts reported by a scene release, for best-effort disposal logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisposalStats {
    pub geometries: usize,
    pub materials: usize,
}

/// One 3D scene: camera, lights, ground grid, and the populated nodes.
///
/// The whole scene rotates continuously around the vertical axis while its
/// animation loop is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub background: String,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub grid: GroundGrid,
    pub nodes: Vec<SceneNode>,
    /// Current rotation around the vertical axis, radians.
    pub rotation_y: f64,
}

impl SceneFrame {
    /// Empty scene with the fixed camera, lights, and ground grid every
    /// spatial chart shares.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            background: "#F8FAFC".to_owned(),
            camera: Camera {
                fov_degrees: 75.0,
                position: Vec3::new(0.0, 15.0, 40.0),
                near: 0.1,
                far: 1000.0,
            },
            lights: vec![
                Light::Ambient {
                    color: "#404040".to_owned(),
                    intensity: 0.7,
                },
                Light::Directional {
                    color: "#FFFFFF".to_owned(),
                    intensity: 0.9,
                    direction: Vec3::new(1.0, 2.0, 1.0),
                },
            ],
            grid: GroundGrid {
                size: 100.0,
                divisions: 20,
            },
            nodes: Vec::new(),
            rotation_y: 0.0,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.rotation_y.is_finite() {
            return Err(VizError::RenderFailure(
                "scene rotation is non-finite".to_owned(),
            ));
        }
        for node in &self.nodes {
            if !node.position.is_finite() {
                return Err(VizError::RenderFailure(
                    "scene node position is non-finite".to_owned(),
                ));
            }
            if let Geometry::Polyline { points } = &node.geometry {
                if points.iter().any(|p| !p.is_finite()) {
                    return Err(VizError::RenderFailure(
                        "polyline point is non-finite".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Releases every node's geometry and material, traversal-style, and
    /// returns what was freed.
    pub fn release(&mut self) -> DisposalStats {
        let freed = self.nodes.len();
        self.nodes.clear();
        DisposalStats {
            geometries: freed,
            materials: freed,
        }
    }
}

/// Cooperative animation loop state.
///
/// The host scheduler drives frames through the owning session once per
/// display refresh; every frame checks the liveness flag so no further
/// frames run once disposal has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationLoop {
    live: bool,
    frames: u64,
}

impl AnimationLoop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: true,
            frames: 0,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Marks one frame. Returns `false` when the loop has been cancelled
    /// and the host must stop scheduling.
    pub fn advance(&mut self) -> bool {
        if !self.live {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn cancel(&mut self) {
        self.live = false;
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Live spatial rendering target: the scene graph plus the resources that
/// must be released with it.
#[derive(Debug)]
pub struct SpatialScene {
    pub frame: SceneFrame,
    animation: AnimationLoop,
    resize_listener: Option<ListenerId>,
}

impl SpatialScene {
    #[must_use]
    pub fn new(frame: SceneFrame, resize_listener: ListenerId) -> Self {
        Self {
            frame,
            animation: AnimationLoop::new(),
            resize_listener: Some(resize_listener),
        }
    }

    #[must_use]
    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    /// Advances one animation frame: rotates the scene and reports whether
    /// the loop is still live.
    pub fn tick(&mut self) -> bool {
        if !self.animation.advance() {
            return false;
        }
        self.frame.rotation_y += ROTATION_PER_FRAME;
        true
    }

    /// Takes the resize-listener handle for removal by whoever owns the
    /// backend. Subsequent calls return `None`.
    pub fn take_resize_listener(&mut self) -> Option<ListenerId> {
        self.resize_listener.take()
    }

    /// Cancels the animation loop and releases scene resources. Safe to
    /// call repeatedly.
    pub fn dispose(&mut self) -> DisposalStats {
        self.animation.cancel();
        let stats = self.frame.release();
        trace!(
            geometries = stats.geometries,
            materials = stats.materials,
            "released spatial scene"
        );
        stats
    }
}

/// One sphere per row at `(x, y, jitter)`, hue deterministic by row index.
pub fn build_scatter_scene(
    dataset: &Dataset,
    x_index: usize,
    y_index: usize,
    rng: &mut StdRng,
) -> SceneFrame {
    let mut scene = SceneFrame::with_defaults();
    for (i, row) in dataset.rows.iter().enumerate() {
        let x = row.get(x_index).map_or(0.0, to_number);
        let y = row.get(y_index).map_or(0.0, to_number);
        let z = rng.gen_range(-SCATTER_JITTER..=SCATTER_JITTER);
        scene.nodes.push(SceneNode {
            geometry: Geometry::Sphere {
                radius: SCATTER_SPHERE_RADIUS,
                segments: 16,
            },
            material: Material {
                shininess: 90.0,
                ..Material::hsl(palette::scatter_hue(i) * 360.0, 65.0, 55.0)
            },
            position: Vec3::new(x, y, z),
            label: None,
        });
    }
    debug!(points = scene.nodes.len(), "built 3d scatter scene");
    scene
}

/// One box per row along a single axis at fixed spacing, centered around
/// the origin. Bar height clamps negatives to zero.
pub fn build_bar_scene(dataset: &Dataset, x_index: usize, y_index: usize) -> SceneFrame {
    let mut scene = SceneFrame::with_defaults();
    let offset = dataset.row_count() as f64 * BAR_SPACING / 2.0;
    for (i, row) in dataset.rows.iter().enumerate() {
        let height = row.get(y_index).map_or(0.0, to_number).max(0.0);
        scene.nodes.push(SceneNode {
            geometry: Geometry::Box {
                width: BAR_SIDE,
                height: height.max(MIN_BAR_HEIGHT),
                depth: BAR_SIDE,
            },
            material: Material::hsl(f64::from(palette::bar_hue_degrees(i)), 70.0, 60.0),
            position: Vec3::new(i as f64 * BAR_SPACING - offset, height / 2.0, 0.0),
            label: row.get(x_index).and_then(|cell| cell.display_text()),
        });
    }
    debug!(bars = scene.nodes.len(), "built 3d bar scene");
    scene
}

/// A polyline through `(i * step, y, 0)` plus one marker sphere per point.
pub fn build_line_scene(dataset: &Dataset, y_index: usize) -> SceneFrame {
    let mut scene = SceneFrame::with_defaults();
    let points: Vec<Vec3> = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Vec3::new(
                i as f64 * LINE_STEP,
                row.get(y_index).map_or(0.0, to_number),
                0.0,
            )
        })
        .collect();

    scene.nodes.push(SceneNode {
        geometry: Geometry::Polyline {
            points: points.clone(),
        },
        material: Material::hex(palette::LINE_COLOR),
        position: Vec3::new(0.0, 0.0, 0.0),
        label: None,
    });

    for (i, point) in points.iter().enumerate() {
        scene.nodes.push(SceneNode {
            geometry: Geometry::Sphere {
                radius: LINE_MARKER_RADIUS,
                segments: 12,
            },
            material: Material::hsl(f64::from(palette::marker_hue_degrees(i)), 70.0, 55.0),
            position: *point,
            label: None,
        });
    }

    debug!(points = points.len(), "built 3d line scene");
    scene
}

/// Decorative parametric surface: a fixed 30x30 grid whose heights come
/// from a closed-form function of grid position, independent of the
/// dataset.
#[must_use]
pub fn build_surface_scene() -> SceneFrame {
    let mut scene = SceneFrame::with_defaults();
    let per_side = SURFACE_SEGMENTS + 1;
    let mut heights = Vec::with_capacity((per_side * per_side) as usize);
    for row in 0..per_side {
        for col in 0..per_side {
            let x = (f64::from(col) / f64::from(SURFACE_SEGMENTS) - 0.5) * SURFACE_SIZE;
            let y = (f64::from(row) / f64::from(SURFACE_SEGMENTS) - 0.5) * SURFACE_SIZE;
            let z = (x * 0.35).sin() * (y * 0.35).cos() * 2.0 + ((x + y) * 0.2).sin() * 1.2;
            heights.push(z);
        }
    }

    scene.nodes.push(SceneNode {
        geometry: Geometry::SurfaceGrid {
            size: SURFACE_SIZE,
            segments: SURFACE_SEGMENTS,
            heights,
        },
        material: Material {
            wireframe: true,
            ..Material::hex(palette::SURFACE_COLOR)
        },
        position: Vec3::new(0.0, 0.0, 0.0),
        label: None,
    });

    debug!("built decorative 3d surface scene");
    scene
}
