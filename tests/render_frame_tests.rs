use approx::assert_relative_eq;
use thermo_gauge::api::{ControllerBuilder, ModelInputs, ModelResult};
use thermo_gauge::core::{Point, Viewport};
use thermo_gauge::render::{
    AXIS_LABEL_BAND_PX, PANEL_GUTTER_PX, SceneSurface, Shape, TITLE_BAND_PX,
};
use thermo_gauge::ModelError;

fn pair(inputs: &ModelInputs<'_>) -> Result<ModelResult, ModelError> {
    let [surface, air] = inputs.exactly::<2>()?;
    Ok(ModelResult::from([
        ("Surface".to_owned(), surface),
        ("Air".to_owned(), air),
    ]))
}

fn dashboard() -> SceneSurface {
    ControllerBuilder::new(pair)
        .controls([("surface", 15.0), ("air", -20.0)])
        .title("Dashboard")
        .build(SceneSurface::headless(Viewport::new(800, 500)))
        .expect("controller")
        .into_surface()
}

#[test]
fn flushed_frame_holds_one_panel_per_gauge() {
    let surface = dashboard();
    let frame = surface.last_frame().expect("flushed frame");

    assert_eq!(frame.title.as_deref(), Some("Dashboard"));
    assert_eq!(frame.panels.len(), 2);
    assert_eq!(frame.item_count(), 18);
    assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["15.0 °C", "-20.0 °C"]);
    assert_eq!(frame.panels[0].x_label.as_deref(), Some("Surface"));
    assert_eq!(frame.panels[1].x_label.as_deref(), Some("Air"));

    let clipped = frame.panels[0]
        .items
        .iter()
        .filter(|item| item.clip.is_some())
        .count();
    assert_eq!(clipped, 2);

    let renderer = surface.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_panel_count, 2);
    assert_eq!(renderer.last_text_count, 2);
}

#[test]
fn panel_regions_split_viewport_below_title() {
    let surface = dashboard();
    let frame = surface.last_frame().expect("flushed frame");

    let left = frame.panel_region(0).expect("left");
    let right = frame.panel_region(1).expect("right");
    assert!(frame.panel_region(2).is_none());

    assert_eq!(left.x, PANEL_GUTTER_PX);
    assert_eq!(right.x, 400.0 + PANEL_GUTTER_PX);
    assert_eq!(left.y, TITLE_BAND_PX);
    assert_eq!(left.height, 500.0 - TITLE_BAND_PX - AXIS_LABEL_BAND_PX);
}

#[test]
fn equal_aspect_projection_fits_tall_gauge_by_height() {
    let surface = dashboard();
    let frame = surface.last_frame().expect("flushed frame");
    let region = frame.panel_region(0).expect("region");
    let layout = frame.panels[0].layout.clone().expect("layout");
    let projector = frame.panels[0]
        .projector(region)
        .expect("projector")
        .expect("configured panel");

    let plot = projector.plot_area();
    assert_relative_eq!(plot.height, region.height, epsilon = 1e-9);
    assert!(plot.width < region.width);
    assert_relative_eq!(
        plot.width / plot.height,
        layout.limits.width() / layout.limits.height(),
        epsilon = 1e-9
    );

    let (_, top) = projector
        .to_pixel(Point::new(0.0, layout.limits.y_max))
        .expect("top");
    let (_, bottom) = projector
        .to_pixel(Point::new(0.0, layout.limits.y_min))
        .expect("bottom");
    assert_relative_eq!(top, plot.y, epsilon = 1e-9);
    assert_relative_eq!(bottom, plot.y + plot.height, epsilon = 1e-9);
}

#[test]
fn snapshot_json_exposes_scene_contract() {
    let surface = dashboard();
    let json = surface.snapshot_json().expect("snapshot");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["viewport"]["width"], 800);
    assert_eq!(value["title"], "Dashboard");
    let panels = value["panels"].as_array().expect("panels");
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0]["layout"]["aspect"], "Equal");
    assert_eq!(panels[0]["items"].as_array().map(Vec::len), Some(9));
}

#[test]
fn last_frame_reflects_latest_update() {
    let mut controller = ControllerBuilder::new(pair)
        .controls([("surface", 15.0), ("air", -20.0)])
        .build(SceneSurface::headless(Viewport::new(800, 500)))
        .expect("controller");
    controller.set_control("air", -10.0).expect("update");

    let surface = controller.surface();
    let frame = surface.last_frame().expect("flushed frame");
    assert!(frame.texts().any(|text| text == "-10.0 °C"));
    assert!(
        frame
            .panels
            .iter()
            .flat_map(|panel| &panel.items)
            .all(|item| !matches!(&item.shape, Shape::Text(text) if text.text == "-20.0 °C"))
    );
}
