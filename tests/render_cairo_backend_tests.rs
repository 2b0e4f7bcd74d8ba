#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use thermo_gauge::GaugeError;
use thermo_gauge::api::ControllerBuilder;
use thermo_gauge::core::Viewport;
use thermo_gauge::extensions::EnergyBalanceModel;
use thermo_gauge::render::{CairoContextRenderer, CairoRenderer, SceneSurface};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, GaugeError::InvalidData(_)));
}

#[test]
fn cairo_renderer_paints_outlines_and_clipped_fills() {
    let renderer = CairoRenderer::new(800, 500).expect("renderer");
    let surface = SceneSurface::new(renderer, Viewport::new(800, 500));
    let controller = ControllerBuilder::new(EnergyBalanceModel::AbsorbingAtmosphere)
        .controls(
            EnergyBalanceModel::AbsorbingAtmosphere
                .parameters()
                .iter()
                .copied(),
        )
        .title("Energy balance")
        .build(surface)
        .expect("controller");

    let renderer = controller.into_surface().into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.panels_drawn, 2);
    // Four outline shapes and two fills per gauge; clip shapes are unpainted.
    assert_eq!(stats.shapes_drawn, 12);
    assert_eq!(stats.clipped_shapes, 4);
    assert!(stats.texts_drawn >= 5);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_draws_on_external_context() {
    let controller = ControllerBuilder::new(EnergyBalanceModel::Simplest)
        .controls([("solar_intensity_percent", 100.0), ("planet_albedo", 0.3)])
        .build(SceneSurface::headless(Viewport::new(400, 500)))
        .expect("controller");
    let frame = controller
        .surface()
        .last_frame()
        .cloned()
        .expect("flushed frame");

    let target = ImageSurface::create(Format::ARgb32, 400, 500).expect("image surface");
    let context = Context::new(&target).expect("context");
    let mut renderer = CairoRenderer::new(1, 1).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().panels_drawn, 1);
}
