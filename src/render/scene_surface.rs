use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::Viewport;
use crate::error::{GaugeError, GaugeResult};
use crate::render::{
    AxesId, AxesLayout, FrameItem, NullRenderer, PanelFrame, RenderFrame, Renderer, Shape,
    ShapeHandle, Surface,
};

/// Mutation recorded by [`SceneSurface`], in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    AxesCreated(AxesId),
    Attached { axes: AxesId, handle: ShapeHandle },
    Detached { axes: AxesId, handle: ShapeHandle },
    ClipSet { handle: ShapeHandle, clip: ShapeHandle },
    Flushed,
}

#[derive(Debug, Clone, PartialEq)]
struct AttachedShape {
    shape: Shape,
    clip: Option<ShapeHandle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct AxesScene {
    layout: Option<AxesLayout>,
    x_label: Option<String>,
    shapes: IndexMap<ShapeHandle, AttachedShape>,
}

/// In-memory retained-mode surface.
///
/// Shapes live in per-axes insertion order (later shapes paint over earlier
/// ones). `flush` resolves clip handles into a [`RenderFrame`] and hands it to
/// the configured [`Renderer`] backend.
#[derive(Debug)]
pub struct SceneSurface<R: Renderer = NullRenderer> {
    viewport: Viewport,
    renderer: R,
    title: Option<String>,
    axes: IndexMap<AxesId, AxesScene>,
    owners: IndexMap<ShapeHandle, AxesId>,
    next_axes: u32,
    next_handle: u64,
    flush_count: usize,
    events: Vec<SurfaceEvent>,
    last_frame: Option<RenderFrame>,
}

impl SceneSurface<NullRenderer> {
    /// Headless surface backed by [`NullRenderer`].
    #[must_use]
    pub fn headless(viewport: Viewport) -> Self {
        Self::new(NullRenderer::default(), viewport)
    }
}

impl<R: Renderer> SceneSurface<R> {
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self {
            viewport,
            renderer,
            title: None,
            axes: IndexMap::new(),
            owners: IndexMap::new(),
            next_axes: 0,
            next_handle: 0,
            flush_count: 0,
            events: Vec::new(),
            last_frame: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn axes_ids(&self) -> Vec<AxesId> {
        self.axes.keys().copied().collect()
    }

    #[must_use]
    pub fn axes_layout(&self, axes: AxesId) -> Option<&AxesLayout> {
        self.axes.get(&axes)?.layout.as_ref()
    }

    #[must_use]
    pub fn axis_label(&self, axes: AxesId) -> Option<&str> {
        self.axes.get(&axes)?.x_label.as_deref()
    }

    /// Number of shapes currently attached across all axes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn shapes_on(&self, axes: AxesId) -> Vec<(ShapeHandle, &Shape)> {
        self.axes
            .get(&axes)
            .map(|scene| {
                scene
                    .shapes
                    .iter()
                    .map(|(handle, attached)| (*handle, &attached.shape))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        let axes = self.owners.get(&handle)?;
        Some(&self.axes.get(axes)?.shapes.get(&handle)?.shape)
    }

    #[must_use]
    pub fn clip_of(&self, handle: ShapeHandle) -> Option<ShapeHandle> {
        let axes = self.owners.get(&handle)?;
        self.axes.get(axes)?.shapes.get(&handle)?.clip
    }

    #[must_use]
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.owners.contains_key(&handle)
    }

    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Returns and clears the recorded mutation log.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frame handed to the renderer by the most recent flush.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Resolves the current scene without flushing it.
    pub fn build_frame(&self) -> GaugeResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.viewport);
        frame.title = self.title.clone();
        for (axes, scene) in &self.axes {
            let items = scene
                .shapes
                .values()
                .map(|attached| -> GaugeResult<FrameItem> {
                    let clip = attached
                        .clip
                        .map(|clip| {
                            scene
                                .shapes
                                .get(&clip)
                                .map(|clip| clip.shape.clone())
                                .ok_or(GaugeError::UnknownShape(clip.raw()))
                        })
                        .transpose()?;
                    Ok(FrameItem {
                        shape: attached.shape.clone(),
                        clip,
                    })
                })
                .collect::<GaugeResult<Vec<_>>>()?;
            frame.panels.push(PanelFrame {
                axes: *axes,
                layout: scene.layout.clone(),
                x_label: scene.x_label.clone(),
                items,
            });
        }
        frame.validate()?;
        Ok(frame)
    }

    /// Pretty-printed JSON of the current scene, for diagnostics and
    /// contract tests.
    pub fn snapshot_json(&self) -> GaugeResult<String> {
        Ok(serde_json::to_string_pretty(&self.build_frame()?)?)
    }

    fn scene_mut(&mut self, axes: AxesId) -> GaugeResult<&mut AxesScene> {
        self.axes
            .get_mut(&axes)
            .ok_or(GaugeError::UnknownAxes(axes.raw()))
    }
}

impl<R: Renderer> Surface for SceneSurface<R> {
    fn create_axes(&mut self) -> GaugeResult<AxesId> {
        let axes = AxesId::new(self.next_axes);
        self.next_axes += 1;
        self.axes.insert(axes, AxesScene::default());
        self.events.push(SurfaceEvent::AxesCreated(axes));
        debug!(%axes, "created axes");
        Ok(axes)
    }

    fn attach(&mut self, axes: AxesId, shape: Shape) -> GaugeResult<ShapeHandle> {
        shape.validate()?;
        let handle = ShapeHandle::new(self.next_handle);
        self.scene_mut(axes)?
            .shapes
            .insert(handle, AttachedShape { shape, clip: None });
        self.next_handle += 1;
        self.owners.insert(handle, axes);
        self.events.push(SurfaceEvent::Attached { axes, handle });
        trace!(%axes, handle = handle.raw(), "attach shape");
        Ok(handle)
    }

    fn detach(&mut self, handle: ShapeHandle) -> GaugeResult<()> {
        let axes = self
            .owners
            .shift_remove(&handle)
            .ok_or(GaugeError::UnknownShape(handle.raw()))?;
        let scene = self.scene_mut(axes)?;
        scene.shapes.shift_remove(&handle);
        // Shapes clipped by the removed one become unclipped.
        for attached in scene.shapes.values_mut() {
            if attached.clip == Some(handle) {
                attached.clip = None;
            }
        }
        self.events.push(SurfaceEvent::Detached { axes, handle });
        trace!(%axes, handle = handle.raw(), "detach shape");
        Ok(())
    }

    fn set_clip(&mut self, handle: ShapeHandle, clip: ShapeHandle) -> GaugeResult<()> {
        let axes = *self
            .owners
            .get(&handle)
            .ok_or(GaugeError::UnknownShape(handle.raw()))?;
        if self.owners.get(&clip) != Some(&axes) {
            return Err(GaugeError::InvalidData(format!(
                "clip shape {} must be attached to the same axes as shape {}",
                clip.raw(),
                handle.raw()
            )));
        }

        let scene = self.scene_mut(axes)?;
        let is_closed = scene
            .shapes
            .get(&clip)
            .is_some_and(|attached| attached.shape.is_closed());
        if !is_closed {
            return Err(GaugeError::InvalidData(
                "clip region must be a closed shape".to_owned(),
            ));
        }
        if let Some(attached) = scene.shapes.get_mut(&handle) {
            attached.clip = Some(clip);
        }
        self.events.push(SurfaceEvent::ClipSet { handle, clip });
        Ok(())
    }

    fn configure_axes(&mut self, axes: AxesId, layout: AxesLayout) -> GaugeResult<()> {
        self.scene_mut(axes)?.layout = Some(layout);
        Ok(())
    }

    fn set_axis_label(&mut self, axes: AxesId, label: String) -> GaugeResult<()> {
        self.scene_mut(axes)?.x_label = Some(label);
        Ok(())
    }

    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    fn flush(&mut self) -> GaugeResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.flush_count += 1;
        self.events.push(SurfaceEvent::Flushed);
        debug!(
            flush_count = self.flush_count,
            items = frame.item_count(),
            "flushed surface"
        );
        self.last_frame = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SceneSurface, SurfaceEvent};
    use crate::core::{Point, Viewport};
    use crate::render::{CirclePrimitive, Color, Paint, RectPrimitive, Surface, TextPrimitive};

    #[test]
    fn detaching_a_clip_unclips_dependents() {
        let mut surface = SceneSurface::headless(Viewport::new(200, 200));
        let axes = surface.create_axes().expect("axes");
        let fill = surface
            .attach(
                axes,
                RectPrimitive::new(0.0, 0.0, 4.0, 4.0, Paint::Solid(Color::RED)).into(),
            )
            .expect("fill");
        let clip = surface
            .attach(
                axes,
                CirclePrimitive::new(Point::new(1.0, 1.0), 1.0, Paint::None).into(),
            )
            .expect("clip");
        surface.set_clip(fill, clip).expect("set clip");
        assert_eq!(surface.clip_of(fill), Some(clip));

        surface.detach(clip).expect("detach");
        assert_eq!(surface.clip_of(fill), None);
        assert_eq!(surface.shape_count(), 1);
        assert!(matches!(
            surface.events().last(),
            Some(SurfaceEvent::Detached { .. })
        ));
    }

    #[test]
    fn text_cannot_be_a_clip_region() {
        let mut surface = SceneSurface::headless(Viewport::new(200, 200));
        let axes = surface.create_axes().expect("axes");
        let fill = surface
            .attach(
                axes,
                RectPrimitive::new(0.0, 0.0, 4.0, 4.0, Paint::Solid(Color::RED)).into(),
            )
            .expect("fill");
        let text = surface
            .attach(
                axes,
                TextPrimitive::new("x", Point::new(0.0, 0.0), Color::BLACK).into(),
            )
            .expect("text");
        assert!(surface.set_clip(fill, text).is_err());
        assert!(surface.detach(text).is_ok());
        assert!(surface.detach(text).is_err());
    }
}
