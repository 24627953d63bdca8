//! The visualization session: at most one live rendering target, explicit
//! teardown, and a small state machine gating every operation.
//!
//! A session is owned by a single host instance (one tab, one window) and
//! runs entirely on the caller's thread. The only ongoing activity is the
//! spatial animation loop, which the host drives through [`VisualizationSession::tick`]
//! once per display refresh; it checks liveness every frame so disposal
//! stops it immediately.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{CellValue, ChartFamily, ChartType, Dataset};
use crate::error::{VizError, VizResult};
use crate::export::{DocumentExport, build_document, dataset_to_csv};
use crate::history::{HistoryEntry, HistoryStore, StoredEntry, SummaryRequest};
use crate::render::{
    Bitmap, Renderer, RenderingTarget, SpatialScene, build_bar_scene, build_line_scene,
    build_scatter_scene, build_surface_scene, project_flat_chart,
};

/// Session lifecycle states.
///
/// `Disposed` is terminal per instance: every later operation fails with
/// [`VizError::SessionDisposed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No dataset loaded.
    Empty,
    /// Dataset present, axes and chart type selected, no live target.
    Configured,
    /// Exactly one live rendering target.
    Rendered,
    /// All resources released.
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Current axis column selections. Free-form: validation against the
/// dataset happens at `generate()`, not at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSelection {
    pub x_axis: String,
    pub y_axis: String,
}

/// Outcome of a successful `generate()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub chart_type: ChartType,
    /// Data-bound elements plotted. Zero for the decorative surface chart,
    /// which is not bound to the dataset.
    pub plotted: usize,
}

/// Owns at most one rendering target and the backend it draws through.
///
/// The session never reads credentials itself; an optional user id is
/// injected by the caller for history saves.
pub struct VisualizationSession<R: Renderer> {
    renderer: R,
    state: SessionState,
    user_id: Option<String>,
    dataset: Option<Dataset>,
    axes: AxisSelection,
    chart_type: ChartType,
    target: Option<RenderingTarget>,
    rng: StdRng,
}

impl<R: Renderer> VisualizationSession<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            state: SessionState::Empty,
            user_id: None,
            dataset: None,
            axes: AxisSelection::default(),
            chart_type: ChartType::default(),
            target: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Attaches the authenticated user identity for history saves.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Pins the scatter-jitter RNG for reproducible scenes.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn axes(&self) -> &AxisSelection {
        &self.axes
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn target(&self) -> Option<&RenderingTarget> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Loads a freshly ingested dataset, replacing any previous one.
    ///
    /// Disposes the live rendering target, seeds the axes to the first and
    /// second columns, and resets the chart type to bar. Zero data rows
    /// fail with [`VizError::EmptyDataset`] and leave the session `Empty`.
    pub fn load_dataset(
        &mut self,
        file_name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> VizResult<()> {
        self.ensure_not_disposed()?;
        self.dispose_target();

        let dataset = match Dataset::new(file_name, columns, rows) {
            Ok(dataset) => dataset,
            Err(err) => {
                self.dataset = None;
                self.state = SessionState::Empty;
                return Err(err);
            }
        };

        self.axes = AxisSelection {
            x_axis: dataset.columns.first().cloned().unwrap_or_default(),
            y_axis: dataset
                .columns
                .get(1)
                .or_else(|| dataset.columns.first())
                .cloned()
                .unwrap_or_default(),
        };
        self.chart_type = ChartType::Bar;

        debug!(
            file_name = %dataset.file_name,
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            "dataset loaded"
        );
        self.dataset = Some(dataset);
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Overrides one axis selection.
    ///
    /// Any live rendering target is disposed immediately; a new one is not
    /// auto-created, so the target and its configuration can never be
    /// silently mismatched. The column is validated at `generate()`.
    pub fn set_axis(&mut self, axis: Axis, column: impl Into<String>) -> VizResult<()> {
        self.ensure_configurable()?;
        let column = column.into();
        match axis {
            Axis::X => self.axes.x_axis = column,
            Axis::Y => self.axes.y_axis = column,
        }
        self.dispose_target();
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Switches the chart type, disposing any live rendering target.
    pub fn set_chart_type(&mut self, chart_type: ChartType) -> VizResult<()> {
        self.ensure_configurable()?;
        trace!(chart_type = %chart_type, "chart type selected");
        self.chart_type = chart_type;
        self.dispose_target();
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Builds and presents the configured visualization.
    ///
    /// Always disposes the previous target first. On any failure the
    /// session stays `Configured` with no live target; it is never left
    /// partially rendered.
    pub fn generate(&mut self) -> VizResult<RenderReport> {
        self.ensure_not_disposed()?;
        if self.dataset.is_none() {
            return Err(VizError::EmptyDataset);
        }
        self.dispose_target();
        self.state = SessionState::Configured;

        let report = match self.chart_type.family() {
            ChartFamily::Flat => self.generate_flat()?,
            ChartFamily::Spatial => self.generate_spatial()?,
        };

        self.state = SessionState::Rendered;
        debug!(
            chart_type = %report.chart_type,
            plotted = report.plotted,
            "visualization rendered"
        );
        Ok(report)
    }

    fn generate_flat(&mut self) -> VizResult<RenderReport> {
        let dataset = self.dataset.as_ref().ok_or(VizError::EmptyDataset)?;
        let frame = project_flat_chart(
            dataset,
            self.chart_type,
            &self.axes.x_axis,
            &self.axes.y_axis,
        )?;
        self.renderer.present_flat(&frame)?;

        let plotted = frame.values.len();
        self.target = Some(RenderingTarget::Flat(frame));
        Ok(RenderReport {
            chart_type: self.chart_type,
            plotted,
        })
    }

    fn generate_spatial(&mut self) -> VizResult<RenderReport> {
        let dataset = self.dataset.as_ref().ok_or(VizError::EmptyDataset)?;

        // The whole spatial family requires resolvable axes, including the
        // decorative surface, so switching sub-types never changes whether a
        // configuration is valid.
        let x_index = dataset
            .column_index(&self.axes.x_axis)
            .ok_or_else(|| VizError::InvalidAxisSelection {
                column: self.axes.x_axis.clone(),
            })?;
        let y_index = dataset
            .column_index(&self.axes.y_axis)
            .ok_or_else(|| VizError::InvalidAxisSelection {
                column: self.axes.y_axis.clone(),
            })?;

        let (frame, plotted) = match self.chart_type {
            ChartType::Scatter3d => {
                let frame = build_scatter_scene(dataset, x_index, y_index, &mut self.rng);
                let plotted = frame.nodes.len();
                (frame, plotted)
            }
            ChartType::Bar3d => {
                let frame = build_bar_scene(dataset, x_index, y_index);
                let plotted = frame.nodes.len();
                (frame, plotted)
            }
            ChartType::Line3d => {
                let frame = build_line_scene(dataset, y_index);
                (frame, dataset.row_count())
            }
            ChartType::Surface3d => (build_surface_scene(), 0),
            _ => {
                return Err(VizError::RenderFailure(format!(
                    "unsupported 3d chart type: {}",
                    self.chart_type
                )));
            }
        };

        let listener = self.renderer.add_resize_listener();
        if let Err(err) = self.renderer.present_spatial(&frame) {
            // Half-built target: unwind the listener registration so
            // nothing leaks against a scene that never went live.
            self.renderer.remove_resize_listener(listener);
            self.renderer.clear();
            return Err(err);
        }

        self.target = Some(RenderingTarget::Spatial(SpatialScene::new(frame, listener)));
        Ok(RenderReport {
            chart_type: self.chart_type,
            plotted,
        })
    }

    /// Advances the spatial animation loop by one frame and re-presents the
    /// scene.
    ///
    /// Returns `false` when no live spatial target exists, so the host
    /// stops scheduling frames. Presentation failures mid-animation are
    /// logged and swallowed; the loop stays live.
    pub fn tick(&mut self) -> bool {
        let Some(RenderingTarget::Spatial(scene)) = self.target.as_mut() else {
            return false;
        };
        if !scene.tick() {
            return false;
        }
        if let Err(err) = self.renderer.present_spatial(&scene.frame) {
            warn!(error = %err, "skipping animation frame");
        }
        true
    }

    /// Releases everything and moves to the terminal `Disposed` state.
    ///
    /// Idempotent and best-effort: repeated calls are no-ops, and teardown
    /// never fails, because a failed cleanup must not block the host.
    pub fn dispose(&mut self) {
        if self.state == SessionState::Disposed {
            trace!("dispose on already-disposed session");
            return;
        }
        self.dispose_target();
        self.dataset = None;
        self.state = SessionState::Disposed;
        debug!("session disposed");
    }

    /// CSV export of the loaded dataset. Available whenever a dataset is
    /// loaded, rendered or not.
    pub fn export_csv(&self) -> VizResult<String> {
        self.ensure_not_disposed()?;
        let dataset = self
            .dataset
            .as_ref()
            .ok_or_else(|| VizError::ExportFailure("no data to export".to_owned()))?;
        Ok(dataset_to_csv(dataset))
    }

    /// Snapshot of whichever drawing surface is live. Requires `Rendered`.
    pub fn export_image(&self) -> VizResult<Bitmap> {
        self.ensure_not_disposed()?;
        if self.target.is_none() {
            return Err(VizError::ExportFailure(
                "no chart available to download".to_owned(),
            ));
        }
        self.renderer.snapshot()
    }

    /// Paginated document: the chart image followed by the full data
    /// matrix. Requires `Rendered`.
    pub fn export_document(&self) -> VizResult<DocumentExport> {
        self.ensure_not_disposed()?;
        let dataset = self
            .dataset
            .as_ref()
            .ok_or_else(|| VizError::ExportFailure("no data to export".to_owned()))?;
        if self.target.is_none() {
            return Err(VizError::ExportFailure(
                "no chart available to export".to_owned(),
            ));
        }
        let image = self.renderer.snapshot()?;
        Ok(build_document(&dataset.file_name, image, dataset))
    }

    /// Saves the current analysis to the history store.
    ///
    /// Requires an injected user id and a loaded dataset. After a
    /// successful create, a text summary is requested best-effort; its
    /// failure never fails the save.
    pub fn save_to_history(&mut self, store: &mut dyn HistoryStore) -> VizResult<StoredEntry> {
        self.ensure_not_disposed()?;
        let Some(user_id) = self.user_id.clone() else {
            return Err(VizError::HistoryUnavailable(
                "authentication required".to_owned(),
            ));
        };
        let dataset = self.dataset.as_ref().ok_or(VizError::EmptyDataset)?;

        let entry = HistoryEntry {
            file_name: dataset.file_name.clone(),
            columns: dataset.columns.clone(),
            rows: dataset.rows.clone(),
            chart_type: self.chart_type,
            x_axis: self.axes.x_axis.clone(),
            y_axis: self.axes.y_axis.clone(),
        };
        let mut stored = store.create(&user_id, entry)?;

        let request = SummaryRequest {
            columns: dataset.columns.clone(),
            rows: dataset.rows.clone(),
            chart_type: self.chart_type,
            x_axis: self.axes.x_axis.clone(),
            y_axis: self.axes.y_axis.clone(),
        };
        match store.summarize(&request) {
            Ok(summary) => stored.summary = Some(summary),
            Err(err) => warn!(error = %err, "summary call failed; saving without one"),
        }

        debug!(id = %stored.id, "analysis saved to history");
        Ok(stored)
    }

    /// Loads a stored analysis back into the session and regenerates it:
    /// equivalent to `load_dataset` + `set_chart_type`/`set_axis` +
    /// `generate()`.
    pub fn load_history_entry(&mut self, entry: HistoryEntry) -> VizResult<RenderReport> {
        self.load_dataset(entry.file_name, entry.columns, entry.rows)?;
        self.set_chart_type(entry.chart_type)?;
        if !entry.x_axis.is_empty() {
            self.set_axis(Axis::X, entry.x_axis)?;
        }
        if !entry.y_axis.is_empty() {
            self.set_axis(Axis::Y, entry.y_axis)?;
        }
        self.generate()
    }

    fn ensure_not_disposed(&self) -> VizResult<()> {
        if self.state == SessionState::Disposed {
            return Err(VizError::SessionDisposed);
        }
        Ok(())
    }

    fn ensure_configurable(&self) -> VizResult<()> {
        self.ensure_not_disposed()?;
        if self.dataset.is_none() {
            return Err(VizError::EmptyDataset);
        }
        Ok(())
    }

    /// Tears down the live rendering target, if any. Guarded no-op when
    /// nothing is live, so repeated disposal never double-frees.
    fn dispose_target(&mut self) {
        let Some(target) = self.target.take() else {
            return;
        };
        match target {
            RenderingTarget::Flat(_) => {
                trace!("destroyed flat chart");
            }
            RenderingTarget::Spatial(mut scene) => {
                scene.dispose();
                if let Some(listener) = scene.take_resize_listener() {
                    self.renderer.remove_resize_listener(listener);
                }
            }
        }
        self.renderer.clear();
    }
}
