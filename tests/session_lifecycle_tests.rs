use sheetviz::core::{CellValue, ChartType};
use sheetviz::render::{NullRenderer, RenderingTarget};
use sheetviz::{Axis, SessionState, VisualizationSession, VizError};

fn sample_columns() -> Vec<String> {
    vec!["Month".into(), "Revenue".into(), "Region".into()]
}

fn sample_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec!["Jan".into(), 120.into(), "North".into()],
        vec!["Feb".into(), 95.into(), "South".into()],
        vec!["Mar".into(), 180.into(), "North".into()],
    ]
}

fn loaded_session() -> VisualizationSession<NullRenderer> {
    let mut session = VisualizationSession::new(NullRenderer::default()).with_rng_seed(7);
    session
        .load_dataset("revenue.xlsx", sample_columns(), sample_rows())
        .expect("load dataset");
    session
}

#[test]
fn axis_seeding_defaults_to_first_two_columns() {
    let session = loaded_session();
    assert_eq!(session.state(), SessionState::Configured);
    assert_eq!(session.axes().x_axis, "Month");
    assert_eq!(session.axes().y_axis, "Revenue");
    assert_eq!(session.chart_type(), ChartType::Bar);
}

#[test]
fn single_column_dataset_seeds_both_axes_to_it() {
    let mut session = VisualizationSession::new(NullRenderer::default());
    session
        .load_dataset(
            "one.csv",
            vec!["Only".into()],
            vec![vec![1.into()], vec![2.into()]],
        )
        .expect("load dataset");
    assert_eq!(session.axes().x_axis, "Only");
    assert_eq!(session.axes().y_axis, "Only");
}

#[test]
fn empty_dataset_is_rejected_and_state_stays_empty() {
    let mut session = VisualizationSession::new(NullRenderer::default());
    let err = session
        .load_dataset("empty.xlsx", sample_columns(), vec![])
        .expect_err("zero rows must be rejected");
    assert!(matches!(err, VizError::EmptyDataset));
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.dataset().is_none());
}

#[test]
fn empty_reload_after_render_disposes_and_returns_to_empty() {
    let mut session = loaded_session();
    session.generate().expect("render");
    assert_eq!(session.state(), SessionState::Rendered);

    let err = session
        .load_dataset("empty.xlsx", sample_columns(), vec![])
        .expect_err("zero rows must be rejected");
    assert!(matches!(err, VizError::EmptyDataset));
    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.target().is_none());
}

#[test]
fn generate_without_dataset_fails() {
    let mut session = VisualizationSession::new(NullRenderer::default());
    let err = session.generate().expect_err("no dataset loaded");
    assert!(matches!(err, VizError::EmptyDataset));
    assert_eq!(session.state(), SessionState::Empty);
}

#[test]
fn setters_dispose_the_live_target_without_regenerating() {
    let mut session = loaded_session();
    session.generate().expect("render");
    assert!(session.target().is_some());

    session
        .set_chart_type(ChartType::Line)
        .expect("set chart type");
    assert_eq!(session.state(), SessionState::Configured);
    assert!(
        session.target().is_none(),
        "a stale target must never outlive a configuration change"
    );

    session.generate().expect("render again");
    session.set_axis(Axis::Y, "Region").expect("set axis");
    assert_eq!(session.state(), SessionState::Configured);
    assert!(session.target().is_none());
}

#[test]
fn setters_require_a_dataset() {
    let mut session = VisualizationSession::new(NullRenderer::default());
    assert!(matches!(
        session.set_axis(Axis::X, "Month"),
        Err(VizError::EmptyDataset)
    ));
    assert!(matches!(
        session.set_chart_type(ChartType::Pie),
        Err(VizError::EmptyDataset)
    ));
}

#[test]
fn at_most_one_target_across_alternating_families() {
    let mut session = loaded_session();
    let sequence = [
        ChartType::Bar,
        ChartType::Scatter3d,
        ChartType::Pie,
        ChartType::Bar3d,
        ChartType::Line3d,
        ChartType::Doughnut,
        ChartType::Surface3d,
    ];

    for chart_type in sequence {
        session.set_chart_type(chart_type).expect("set chart type");
        session.generate().expect("generate");

        assert_eq!(session.state(), SessionState::Rendered);
        let target = session.target().expect("exactly one target alive");
        assert_eq!(
            target.is_spatial(),
            chart_type.family() == sheetviz::core::ChartFamily::Spatial
        );
        // The resize listener belongs to the live spatial target alone.
        let listeners = session.renderer().active_resize_listeners.len();
        assert_eq!(listeners, usize::from(target.is_spatial()));
    }
}

#[test]
fn dispose_is_idempotent() {
    let mut session = loaded_session();
    session
        .set_chart_type(ChartType::Scatter3d)
        .expect("set chart type");
    session.generate().expect("render spatial");
    assert!(session.tick());

    session.dispose();
    assert_eq!(session.state(), SessionState::Disposed);
    assert!(session.target().is_none());
    assert!(!session.tick(), "no frames may run after disposal");

    session.dispose();
    assert_eq!(session.state(), SessionState::Disposed);
    assert!(session.target().is_none());
    assert!(!session.tick());

    let renderer = session.into_renderer();
    assert!(renderer.active_resize_listeners.is_empty());
}

#[test]
fn operations_after_dispose_are_rejected() {
    let mut session = loaded_session();
    session.dispose();

    assert!(matches!(
        session.load_dataset("again.xlsx", sample_columns(), sample_rows()),
        Err(VizError::SessionDisposed)
    ));
    assert!(matches!(session.generate(), Err(VizError::SessionDisposed)));
    assert!(matches!(
        session.set_axis(Axis::X, "Month"),
        Err(VizError::SessionDisposed)
    ));
    assert!(matches!(
        session.export_csv(),
        Err(VizError::SessionDisposed)
    ));
}

#[test]
fn generate_reports_plotted_count() {
    let mut session = loaded_session();
    let report = session.generate().expect("render");
    assert_eq!(report.chart_type, ChartType::Bar);
    assert_eq!(report.plotted, 3);
}

#[test]
fn failed_generate_leaves_session_configured() {
    let mut session = loaded_session();
    session.generate().expect("first render");
    session
        .set_chart_type(ChartType::Bar3d)
        .expect("set chart type");
    session.set_axis(Axis::X, "Nope").expect("set axis");

    let err = session.generate().expect_err("invalid axis must fail");
    assert!(matches!(err, VizError::InvalidAxisSelection { .. }));
    assert_eq!(session.state(), SessionState::Configured);
    assert!(session.target().is_none());
    assert!(session.renderer().active_resize_listeners.is_empty());
}

#[test]
fn flat_target_exposes_rendered_frame() {
    let mut session = loaded_session();
    session.generate().expect("render");
    match session.target() {
        Some(RenderingTarget::Flat(frame)) => {
            assert_eq!(frame.values.len(), 3);
            assert_eq!(frame.chart_type, ChartType::Bar);
        }
        other => panic!("expected a flat target, got {other:?}"),
    }
}
