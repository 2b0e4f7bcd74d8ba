use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{GaugeError, GaugeResult};
use crate::interaction::ControlSpec;

/// One named numeric input feeding a model parameter.
///
/// Clones share the same value cell and slider spec: the host widget keeps a
/// clone and writes to it, the controller reads it when a change is reported.
/// Writes through any clone are clamped once a spec is attached. The shared
/// cell makes bindings single-threaded (`!Send`).
#[derive(Debug, Clone)]
pub struct ControlBinding {
    name: Rc<str>,
    cell: Rc<ControlCell>,
}

#[derive(Debug)]
struct ControlCell {
    value: Cell<f64>,
    spec: RefCell<Option<ControlSpec>>,
}

impl ControlBinding {
    pub fn new(name: impl Into<String>, initial: f64) -> GaugeResult<Self> {
        let name: String = name.into();
        if name.is_empty() {
            return Err(GaugeError::InvalidData(
                "control name must not be empty".to_owned(),
            ));
        }
        if !initial.is_finite() {
            return Err(GaugeError::InvalidData(format!(
                "initial value of control `{name}` must be finite"
            )));
        }
        Ok(Self {
            name: name.into(),
            cell: Rc::new(ControlCell {
                value: Cell::new(initial),
                spec: RefCell::new(None),
            }),
        })
    }

    /// Attaches a slider spec shared by every clone; the current value is
    /// clamped and snapped to it.
    #[must_use]
    pub fn with_spec(self, spec: ControlSpec) -> Self {
        self.cell.value.set(spec.apply(self.cell.value.get()));
        self.cell.spec.replace(Some(spec));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.cell.value.get()
    }

    #[must_use]
    pub fn spec(&self) -> Option<ControlSpec> {
        self.cell.spec.borrow().clone()
    }

    /// Writes a new value and returns the value actually stored (after
    /// clamping/snapping when a spec is attached).
    pub fn set(&self, value: f64) -> GaugeResult<f64> {
        if !value.is_finite() {
            return Err(GaugeError::InvalidData(format!(
                "value of control `{}` must be finite",
                self.name
            )));
        }
        let stored = self
            .cell
            .spec
            .borrow()
            .as_ref()
            .map_or(value, |spec| spec.apply(value));
        self.cell.value.set(stored);
        Ok(stored)
    }

    /// True when both bindings read and write the same value cell.
    #[must_use]
    pub fn shares_value_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

/// Notification that the control at `index` (registration order) changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub index: usize,
}

impl ControlChange {
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self { index }
    }
}

#[cfg(test)]
mod tests {
    use super::ControlBinding;
    use crate::interaction::ControlCatalog;

    #[test]
    fn clones_observe_host_writes() {
        let binding = ControlBinding::new("planet_albedo", 0.3).expect("binding");
        let widget_side = binding.clone();
        widget_side.set(0.5).expect("set");
        assert_eq!(binding.value(), 0.5);
        assert!(binding.shares_value_with(&widget_side));
    }

    #[test]
    fn spec_clamps_initial_and_later_values() {
        let spec = ControlCatalog::energy_balance()
            .get("solar_intensity_percent")
            .expect("spec")
            .clone();
        let binding = ControlBinding::new("solar_intensity_percent", 400.0)
            .expect("binding")
            .with_spec(spec);
        assert_eq!(binding.value(), 150.0);
        assert_eq!(binding.set(99.6).expect("set"), 100.0);
        assert!(binding.set(f64::NAN).is_err());
        assert_eq!(binding.value(), 100.0);
    }

    #[test]
    fn spec_attached_later_clamps_host_clone_writes() {
        let widget_side = ControlBinding::new("planet_albedo", 0.3).expect("binding");
        let spec = ControlCatalog::energy_balance()
            .get("planet_albedo")
            .expect("spec")
            .clone();
        let controller_side = widget_side.clone().with_spec(spec.clone());

        assert_eq!(widget_side.spec(), Some(spec));
        assert_eq!(widget_side.set(3.0).expect("set"), 1.0);
        assert_eq!(controller_side.value(), 1.0);
    }
}
