use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sheetviz::core::{CellValue, ChartType, Dataset, palette};
use sheetviz::render::{
    Geometry, NullRenderer, RenderingTarget, SCATTER_JITTER, SceneFrame, build_bar_scene,
    build_line_scene, build_scatter_scene, build_surface_scene,
};
use sheetviz::{Axis, SessionState, VisualizationSession, VizError};

fn metrics_dataset() -> Dataset {
    Dataset::new(
        "metrics.xlsx",
        vec!["X".into(), "Y".into()],
        vec![
            vec![1.into(), 10.into()],
            vec![2.into(), (-4).into()],
            vec![3.into(), "7.5".into()],
            vec![4.into(), CellValue::Empty],
        ],
    )
    .expect("dataset")
}

fn loaded_session() -> VisualizationSession<NullRenderer> {
    let mut session = VisualizationSession::new(NullRenderer::default()).with_rng_seed(42);
    let dataset = metrics_dataset();
    session
        .load_dataset(dataset.file_name, dataset.columns, dataset.rows)
        .expect("load");
    session
}

#[test]
fn spatial_chart_with_invalid_axis_fails_and_stays_configured() {
    let mut session = loaded_session();
    session.set_chart_type(ChartType::Bar3d).expect("type");
    session.set_axis(Axis::X, "Z").expect("set axis");

    let err = session.generate().expect_err("invalid axis");
    match err {
        VizError::InvalidAxisSelection { column } => assert_eq!(column, "Z"),
        other => panic!("expected InvalidAxisSelection, got {other}"),
    }
    assert_eq!(session.state(), SessionState::Configured);
    assert!(session.target().is_none());
}

#[test]
fn scatter_scene_jitters_z_within_range_and_keeps_hue_deterministic() {
    let dataset = metrics_dataset();
    let mut rng = StdRng::seed_from_u64(1);
    let scene = build_scatter_scene(&dataset, 0, 1, &mut rng);

    assert_eq!(scene.nodes.len(), 4);
    for (i, node) in scene.nodes.iter().enumerate() {
        assert!(node.position.z.abs() <= SCATTER_JITTER);
        match &node.material.color {
            sheetviz::render::MaterialColor::Hsl { h, .. } => {
                assert_relative_eq!(*h, palette::scatter_hue(i) * 360.0);
            }
            other => panic!("expected hsl material, got {other:?}"),
        }
    }
    // Coerced positions: x from X column, y through total coercion.
    assert_relative_eq!(scene.nodes[2].position.y, 7.5);
    assert_relative_eq!(scene.nodes[3].position.y, 0.0);
}

#[test]
fn scatter_scene_is_reproducible_for_a_fixed_seed() {
    let dataset = metrics_dataset();
    let mut a = StdRng::seed_from_u64(9);
    let mut b = StdRng::seed_from_u64(9);
    assert_eq!(
        build_scatter_scene(&dataset, 0, 1, &mut a),
        build_scatter_scene(&dataset, 0, 1, &mut b)
    );
}

#[test]
fn bar_scene_clamps_negative_heights_and_centers_the_span() {
    let dataset = metrics_dataset();
    let scene = build_bar_scene(&dataset, 0, 1);
    assert_eq!(scene.nodes.len(), 4);

    let offset = 4.0 * 2.0 / 2.0;
    for (i, node) in scene.nodes.iter().enumerate() {
        let Geometry::Box { height, .. } = &node.geometry else {
            panic!("expected box geometry");
        };
        assert!(*height >= 0.0);
        assert_relative_eq!(node.position.x, i as f64 * 2.0 - offset);
        assert_relative_eq!(node.position.y, height.max(0.001) / 2.0, epsilon = 0.01);
    }

    let Geometry::Box { height, .. } = &scene.nodes[1].geometry else {
        panic!("expected box geometry");
    };
    // -4 clamps to the minimal visible height.
    assert_relative_eq!(*height, 0.001);
    assert_eq!(scene.nodes[0].label.as_deref(), Some("1"));
}

#[test]
fn line_scene_builds_polyline_plus_one_marker_per_point() {
    let dataset = metrics_dataset();
    let scene = build_line_scene(&dataset, 1);
    // One polyline node plus a marker sphere per row.
    assert_eq!(scene.nodes.len(), 1 + 4);

    let Geometry::Polyline { points } = &scene.nodes[0].geometry else {
        panic!("expected polyline first");
    };
    assert_eq!(points.len(), 4);
    assert_relative_eq!(points[1].x, 1.2);
    assert_relative_eq!(points[1].y, -4.0);

    for (i, node) in scene.nodes[1..].iter().enumerate() {
        let Geometry::Sphere { radius, .. } = &node.geometry else {
            panic!("expected marker sphere");
        };
        assert_relative_eq!(*radius, 0.25);
        assert_relative_eq!(node.position.x, i as f64 * 1.2);
    }
}

#[test]
fn surface_scene_is_decorative_and_dataset_independent() {
    let scene = build_surface_scene();
    assert_eq!(scene.nodes.len(), 1);

    let Geometry::SurfaceGrid {
        size,
        segments,
        heights,
    } = &scene.nodes[0].geometry
    else {
        panic!("expected surface grid");
    };
    assert_relative_eq!(*size, 30.0);
    assert_eq!(*segments, 40);
    assert_eq!(heights.len(), 41 * 41);
    assert!(scene.nodes[0].material.wireframe);
    // Closed-form height at the grid center.
    let center = heights[(41 * 41) / 2];
    assert_relative_eq!(center, 0.0, epsilon = 1e-9);
}

#[test]
fn every_scene_carries_lights_grid_and_fixed_camera() {
    let scene = SceneFrame::with_defaults();
    assert_eq!(scene.lights.len(), 2);
    assert_eq!(scene.grid.divisions, 20);
    assert_relative_eq!(scene.camera.fov_degrees, 75.0);
    assert_relative_eq!(scene.camera.position.y, 15.0);
    assert_relative_eq!(scene.camera.position.z, 40.0);
}

#[test]
fn animation_loop_rotates_until_disposed() {
    let mut session = loaded_session();
    session.set_chart_type(ChartType::Scatter3d).expect("type");
    session.generate().expect("render");

    for _ in 0..10 {
        assert!(session.tick());
    }
    let Some(RenderingTarget::Spatial(scene)) = session.target() else {
        panic!("expected spatial target");
    };
    assert_relative_eq!(scene.frame.rotation_y, 10.0 * 0.0015, epsilon = 1e-12);
    assert_eq!(scene.animation().frames(), 10);

    session.dispose();
    assert!(!session.tick());
    assert!(!session.tick());
}

#[test]
fn switching_away_from_spatial_stops_the_loop_and_frees_the_listener() {
    let mut session = loaded_session();
    session.set_chart_type(ChartType::Line3d).expect("type");
    session.generate().expect("render spatial");
    assert_eq!(session.renderer().active_resize_listeners.len(), 1);
    assert!(session.tick());

    session.set_chart_type(ChartType::Pie).expect("back to flat");
    assert!(!session.tick(), "loop must stop with its target");
    assert!(session.renderer().active_resize_listeners.is_empty());

    session.generate().expect("render flat");
    assert!(session.renderer().active_resize_listeners.is_empty());
}

#[test]
fn surface_chart_reports_zero_plotted_elements() {
    let mut session = loaded_session();
    session.set_chart_type(ChartType::Surface3d).expect("type");
    let report = session.generate().expect("render");
    assert_eq!(report.plotted, 0);
    assert_eq!(session.state(), SessionState::Rendered);
}
