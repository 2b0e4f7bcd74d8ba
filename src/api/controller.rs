use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::api::{
    BindingScheme, DrawOptions, GaugeRenderer, Localizer, Model, ModelInputs, ModelResult,
    PassThrough,
};
use crate::core::GaugeConfig;
use crate::error::{GaugeError, GaugeResult, ModelError};
use crate::interaction::{ControlBinding, ControlCatalog, ControlChange};
use crate::render::{Color, Surface};

/// Phase of one control-change cycle.
///
/// Cycles run to completion under `&mut self`, so callers only ever observe
/// `Idle`; the other phases are diagnostic and show up in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Evaluating,
    Rendering,
}

/// Outcome of one completed update cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// Control values the model was evaluated with, in registration order.
    pub inputs: Vec<f64>,
    pub outputs: ModelResult,
}

/// Wires control bindings to one model and fans results out to gauges.
///
/// Each cycle snapshots every control, evaluates the model once, redraws
/// each gauge in output order and flushes the surface once. Failed
/// evaluations leave every gauge untouched.
pub struct ReactiveController<S: Surface, M: Model> {
    surface: S,
    model: M,
    scheme: BindingScheme,
    controls: Vec<ControlBinding>,
    parameter_names: Vec<String>,
    gauges: Vec<GaugeRenderer>,
    state: ControllerState,
    last_result: Option<ModelResult>,
    evaluations: usize,
}

impl<S: Surface, M: Model> ReactiveController<S, M> {
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub fn scheme(&self) -> BindingScheme {
        self.scheme
    }

    #[must_use]
    pub fn controls(&self) -> &[ControlBinding] {
        &self.controls
    }

    /// Shared binding for the host widget driving control `name`.
    #[must_use]
    pub fn control(&self, name: &str) -> Option<ControlBinding> {
        self.controls
            .iter()
            .find(|control| control.name() == name)
            .cloned()
    }

    #[must_use]
    pub fn gauges(&self) -> &[GaugeRenderer] {
        &self.gauges
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Result of the last successful evaluation.
    #[must_use]
    pub fn last_result(&self) -> Option<&ModelResult> {
        self.last_result.as_ref()
    }

    /// Number of model evaluations, including the one made at setup.
    #[must_use]
    pub fn evaluation_count(&self) -> usize {
        self.evaluations
    }

    /// Writes control `name` and runs an update cycle.
    pub fn set_control(&mut self, name: &str, value: f64) -> GaugeResult<UpdateReport> {
        let index = self
            .controls
            .iter()
            .position(|control| control.name() == name)
            .ok_or_else(|| GaugeError::UnknownControl(name.to_owned()))?;
        self.set_control_at(index, value)
    }

    /// Writes control `index` and runs an update cycle.
    pub fn set_control_at(&mut self, index: usize, value: f64) -> GaugeResult<UpdateReport> {
        let control = self
            .controls
            .get(index)
            .ok_or_else(|| GaugeError::UnknownControl(format!("#{index}")))?;
        control.set(value)?;
        self.on_control_change(ControlChange::at(index))
    }

    /// Handles a change reported by a host widget whose binding was already
    /// written.
    pub fn on_control_change(&mut self, change: ControlChange) -> GaugeResult<UpdateReport> {
        if change.index >= self.controls.len() {
            return Err(GaugeError::UnknownControl(format!("#{}", change.index)));
        }

        let outcome = self.run_cycle(change);
        self.state = ControllerState::Idle;
        outcome
    }

    fn run_cycle(&mut self, change: ControlChange) -> GaugeResult<UpdateReport> {
        self.state = ControllerState::Evaluating;
        let inputs = self.snapshot();
        debug!(control = change.index, ?inputs, "control changed");

        let outputs = self.evaluate(&inputs)?;
        if outputs.len() != self.gauges.len() {
            warn!(
                expected = self.gauges.len(),
                actual = outputs.len(),
                "model output count does not match gauges"
            );
            return Err(GaugeError::OutputCountMismatch {
                expected: self.gauges.len(),
                actual: outputs.len(),
            });
        }
        check_finite(&outputs)?;

        self.state = ControllerState::Rendering;
        trace!(state = ?self.state, "model evaluated");
        draw_all(&mut self.surface, &mut self.gauges, &outputs)?;
        self.surface.flush()?;

        self.last_result = Some(outputs.clone());
        Ok(UpdateReport { inputs, outputs })
    }

    fn snapshot(&self) -> Vec<f64> {
        self.controls.iter().map(ControlBinding::value).collect()
    }

    fn evaluate(&mut self, values: &[f64]) -> GaugeResult<ModelResult> {
        self.evaluations += 1;
        let inputs = ModelInputs::new(self.scheme, &self.parameter_names, values)?;
        self.model.evaluate(&inputs).map_err(|err| {
            warn!(error = %err, "model evaluation failed");
            GaugeError::from(err)
        })
    }
}

/// Rejects a result before any gauge is touched when an output is NaN or
/// infinite.
fn check_finite(outputs: &ModelResult) -> GaugeResult<()> {
    match outputs.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => {
            warn!(output = %name, value, "model output is not finite");
            Err(ModelError::NonFiniteOutput {
                name: name.clone(),
                value: *value,
            }
            .into())
        }
        None => Ok(()),
    }
}

fn draw_all<S: Surface>(
    surface: &mut S,
    gauges: &mut [GaugeRenderer],
    outputs: &ModelResult,
) -> GaugeResult<()> {
    for (gauge, (name, value)) in gauges.iter_mut().zip(outputs) {
        trace!(output = %name, value, "redraw gauge");
        gauge.draw(surface, *value, DrawOptions::described(name.as_str()))?;
    }
    Ok(())
}

/// Setup-time configuration for a [`ReactiveController`].
pub struct ControllerBuilder<M: Model> {
    model: M,
    scheme: BindingScheme,
    pending_controls: Vec<(String, f64)>,
    bindings: Vec<ControlBinding>,
    title: Option<String>,
    colors: Vec<Color>,
    gauge_template: GaugeConfig,
    gauge_configs: Option<Vec<GaugeConfig>>,
    catalog: Option<ControlCatalog>,
    localizer: Rc<dyn Localizer>,
}

impl<M: Model> ControllerBuilder<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            scheme: BindingScheme::default(),
            pending_controls: Vec::new(),
            bindings: Vec::new(),
            title: None,
            colors: vec![Color::RED, Color::BLUE],
            gauge_template: GaugeConfig::default(),
            gauge_configs: None,
            catalog: None,
            localizer: Rc::new(PassThrough),
        }
    }

    #[must_use]
    pub fn scheme(mut self, scheme: BindingScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Registers a control by name and initial value. Registration order is
    /// the positional parameter order.
    #[must_use]
    pub fn control(mut self, name: impl Into<String>, initial: f64) -> Self {
        self.pending_controls.push((name.into(), initial));
        self
    }

    #[must_use]
    pub fn controls<'a>(mut self, controls: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        self.pending_controls
            .extend(controls.into_iter().map(|(name, value)| (name.to_owned(), value)));
        self
    }

    /// Registers bindings created by the host; they are appended after the
    /// controls declared with [`control`](Self::control).
    #[must_use]
    pub fn binding(mut self, binding: ControlBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fill colors cycled over the gauges in output order.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    /// Base config for gauges derived from the model outputs; its fill color
    /// is replaced per gauge.
    #[must_use]
    pub fn gauge_template(mut self, template: GaugeConfig) -> Self {
        self.gauge_template = template;
        self
    }

    /// Explicit per-output gauge configs. Their count must match the model.
    #[must_use]
    pub fn gauges(mut self, configs: Vec<GaugeConfig>) -> Self {
        self.gauge_configs = Some(configs);
        self
    }

    /// Slider table; every control must have an entry and is clamped to it.
    #[must_use]
    pub fn catalog(mut self, catalog: ControlCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn localizer(mut self, localizer: Rc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Evaluates the model once, creates and draws the gauges, and flushes.
    pub fn build<S: Surface>(self, surface: S) -> GaugeResult<ReactiveController<S, M>> {
        let mut controls = self
            .pending_controls
            .into_iter()
            .map(|(name, initial)| ControlBinding::new(name, initial))
            .collect::<GaugeResult<Vec<_>>>()?;
        controls.extend(self.bindings);

        for (index, control) in controls.iter().enumerate() {
            if controls[..index]
                .iter()
                .any(|earlier| earlier.name() == control.name())
            {
                return Err(GaugeError::InvalidData(format!(
                    "duplicate control `{}`",
                    control.name()
                )));
            }
        }
        if let Some(catalog) = &self.catalog {
            controls = controls
                .into_iter()
                .map(|control| {
                    let spec = catalog.get(control.name())?.clone();
                    Ok(control.with_spec(spec))
                })
                .collect::<GaugeResult<Vec<_>>>()?;
        }
        if self.colors.is_empty() {
            return Err(GaugeError::InvalidData(
                "at least one gauge color is required".to_owned(),
            ));
        }

        let mut controller = ReactiveController {
            parameter_names: controls
                .iter()
                .map(|control| control.name().to_owned())
                .collect(),
            surface,
            model: self.model,
            scheme: self.scheme,
            controls,
            gauges: Vec::new(),
            state: ControllerState::Evaluating,
            last_result: None,
            evaluations: 0,
        };

        let inputs = controller.snapshot();
        let outputs = controller.evaluate(&inputs)?;
        if outputs.is_empty() {
            return Err(GaugeError::InvalidData(
                "model produced no outputs".to_owned(),
            ));
        }
        check_finite(&outputs)?;

        let configs = match self.gauge_configs {
            Some(configs) if configs.len() != outputs.len() => {
                warn!(
                    expected = configs.len(),
                    actual = outputs.len(),
                    "model output count does not match gauges"
                );
                return Err(GaugeError::OutputCountMismatch {
                    expected: configs.len(),
                    actual: outputs.len(),
                });
            }
            Some(configs) => configs,
            None => (0..outputs.len())
                .map(|index| {
                    self.gauge_template
                        .clone()
                        .with_fill_color(self.colors[index % self.colors.len()])
                })
                .collect(),
        };
        controller.gauges = configs
            .into_iter()
            .map(|config| {
                GaugeRenderer::new(config).map(|gauge| gauge.with_localizer(self.localizer.clone()))
            })
            .collect::<GaugeResult<Vec<_>>>()?;

        controller.state = ControllerState::Rendering;
        if let Some(title) = &self.title {
            controller.surface.set_title(self.localizer.localize(title));
        }
        draw_all(&mut controller.surface, &mut controller.gauges, &outputs)?;
        controller.surface.flush()?;

        debug!(
            controls = controller.controls.len(),
            gauges = controller.gauges.len(),
            scheme = ?controller.scheme,
            "controller ready"
        );
        controller.state = ControllerState::Idle;
        controller.last_result = Some(outputs);
        Ok(controller)
    }
}
