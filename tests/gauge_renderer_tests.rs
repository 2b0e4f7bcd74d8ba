use thermo_gauge::api::{DrawOptions, GaugeRenderer};
use thermo_gauge::core::{GaugeConfig, Viewport};
use thermo_gauge::render::{
    AspectRatio, Paint, SceneSurface, Shape, Spine, Surface, SurfaceEvent,
};
use thermo_gauge::GaugeError;

fn headless() -> SceneSurface {
    SceneSurface::headless(Viewport::new(400, 600))
}

#[test]
fn first_draw_creates_outline_fill_clips_and_label() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");

    gauge
        .draw(&mut surface, 20.0, DrawOptions::default())
        .expect("draw");

    assert!(gauge.has_outline());
    assert_eq!(gauge.live_fill_count(), 2);
    assert_eq!(surface.axes_ids().len(), 1);
    // 4 outline shapes, 2 fills, 2 clip shapes, 1 label.
    assert_eq!(surface.shape_count(), 9);
    assert_eq!(gauge.label_text(), Some("20.0 °C"));
}

#[test]
fn repeated_draws_keep_a_single_fill_pair() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");

    let mut previous = Vec::new();
    for step in 0..25 {
        let value = -250.0 + f64::from(step) * 13.0;
        gauge
            .draw(&mut surface, value, DrawOptions::default())
            .expect("draw");
        assert_eq!(gauge.live_fill_count(), 2);
        assert_eq!(surface.shape_count(), 9);

        for handle in &previous {
            assert!(!surface.contains(*handle), "stale shape {handle:?} survived");
        }
        let (bulb, bar) = gauge.fill_handles().expect("fill");
        let (bulb_clip, bar_clip) = gauge.clip_handles().expect("clips");
        previous = vec![bulb, bar, bulb_clip, bar_clip];
        previous.extend(gauge.label_handle());
    }
}

#[test]
fn fills_are_clipped_to_invisible_inner_shapes() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 0.0, DrawOptions::default())
        .expect("draw");

    let (bulb, bar) = gauge.fill_handles().expect("fill");
    let (bulb_clip, bar_clip) = gauge.clip_handles().expect("clips");
    assert_eq!(surface.clip_of(bulb), Some(bulb_clip));
    assert_eq!(surface.clip_of(bar), Some(bar_clip));

    match surface.shape(bulb_clip) {
        Some(Shape::Circle(circle)) => {
            assert_eq!(circle.radius, 37.0);
            assert_eq!(circle.paint, Paint::None);
        }
        other => panic!("unexpected bulb clip {other:?}"),
    }
    match surface.shape(bar_clip) {
        Some(Shape::Rect(rect)) => assert_eq!(rect.paint, Paint::None),
        other => panic!("unexpected bar clip {other:?}"),
    }
}

#[test]
fn outline_configures_equal_aspect_and_left_spine_only() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    let axes = gauge.draw_outline(&mut surface, None).expect("outline");

    let layout = surface.axes_layout(axes).expect("layout");
    assert_eq!(layout.aspect, AspectRatio::Equal);
    assert!(!layout.show_x_ticks);
    assert!(layout.spine_visible(Spine::Left));
    assert!(!layout.spine_visible(Spine::Right));
    assert!(!layout.spine_visible(Spine::Top));
    assert!(!layout.spine_visible(Spine::Bottom));
    assert_eq!(layout.limits.x_min, -25.0);
    assert_eq!(layout.limits.x_max, 25.0);
    assert!(!layout.y_ticks.is_empty());
    assert_eq!(gauge.live_fill_count(), 0);
}

#[test]
fn second_outline_is_rejected() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge.draw_outline(&mut surface, None).expect("outline");

    let err = gauge
        .draw_outline(&mut surface, None)
        .expect_err("second outline");
    assert!(matches!(err, GaugeError::InvalidData(_)));
    assert_eq!(surface.shape_count(), 4);
}

#[test]
fn hiding_the_value_removes_the_previous_label() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 20.0, DrawOptions::default())
        .expect("draw");
    let label = gauge.label_handle().expect("label");

    gauge
        .draw(&mut surface, 30.0, DrawOptions::default().without_value())
        .expect("draw");

    assert!(!surface.contains(label));
    assert_eq!(gauge.label_handle(), None);
    assert_eq!(surface.shape_count(), 8);
}

#[test]
fn description_and_title_are_forwarded_to_surface() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(
            &mut surface,
            15.0,
            DrawOptions::described("Surface temperature").with_title("Energy balance"),
        )
        .expect("draw");

    let axes = gauge.axes().expect("axes");
    assert_eq!(surface.axis_label(axes), Some("Surface temperature"));
    assert_eq!(surface.title(), Some("Energy balance"));
}

#[test]
fn gauge_can_draw_on_existing_axes() {
    let mut surface = headless();
    let first = surface.create_axes().expect("axes");
    let second = surface.create_axes().expect("axes");
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");

    gauge
        .draw(&mut surface, 10.0, DrawOptions::default().on_axes(second))
        .expect("draw");

    assert_eq!(gauge.axes(), Some(second));
    assert!(surface.shapes_on(first).is_empty());
    assert_eq!(surface.shapes_on(second).len(), 9);
}

#[test]
fn non_finite_value_leaves_the_scene_untouched() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 20.0, DrawOptions::default())
        .expect("draw");
    surface.take_events();

    assert!(gauge
        .draw(&mut surface, f64::NAN, DrawOptions::default())
        .is_err());
    assert!(surface.events().is_empty());
    assert_eq!(gauge.label_text(), Some("20.0 °C"));
}

#[test]
fn out_of_range_value_is_drawn_as_is() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 150.0, DrawOptions::default())
        .expect("draw");

    assert_eq!(gauge.label_text(), Some("150.0 °C"));
    let (_, bar) = gauge.fill_handles().expect("fill");
    match surface.shape(bar) {
        Some(Shape::Rect(rect)) => assert!((rect.top() - 150.0).abs() < 1e-9),
        other => panic!("unexpected fill {other:?}"),
    }
}

#[test]
fn dispose_detaches_everything() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 20.0, DrawOptions::default())
        .expect("draw");

    gauge.dispose(&mut surface).expect("dispose");

    assert_eq!(surface.shape_count(), 0);
    assert!(!gauge.has_outline());
    assert_eq!(gauge.axes(), None);
    let detached = surface
        .events()
        .iter()
        .filter(|event| matches!(event, SurfaceEvent::Detached { .. }))
        .count();
    assert_eq!(detached, 9);
}

#[test]
fn drawing_does_not_flush() {
    let mut surface = headless();
    let mut gauge = GaugeRenderer::new(GaugeConfig::default()).expect("gauge");
    gauge
        .draw(&mut surface, 20.0, DrawOptions::default())
        .expect("draw");
    assert_eq!(surface.flush_count(), 0);

    surface.flush().expect("flush");
    assert_eq!(surface.renderer().frames_rendered, 1);
    assert_eq!(surface.renderer().last_item_count, 9);
    assert_eq!(surface.renderer().last_text_count, 1);
}

#[test]
fn invalid_config_fails_at_construction() {
    let config = GaugeConfig::default().with_range(5.0, -5.0);
    assert!(matches!(
        GaugeRenderer::new(config),
        Err(GaugeError::InvalidConfig(_))
    ));
}
