use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper bound on the number of intervals the locator splits an axis into.
pub const VALUE_AXIS_MAX_INTERVALS: usize = 9;

const NICE_STEP_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Positioned, labelled tick on the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Picks the smallest "nice" step (1, 2, 2.5, 5 times a power of ten) that
/// splits `[start, end]` into at most `max_intervals` intervals.
#[must_use]
pub fn nice_tick_step(start: f64, end: f64, max_intervals: usize) -> Option<f64> {
    let span = (end - start).abs();
    if !span.is_finite() || span <= 0.0 || max_intervals == 0 {
        return None;
    }

    let raw_step = span / max_intervals as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    NICE_STEP_MULTIPLIERS
        .iter()
        .map(|multiplier| multiplier * magnitude)
        .find(|step| *step >= raw_step * (1.0 - 1e-9))
}

/// Tick positions that are whole multiples of the nice step inside
/// `[start, end]`.
#[must_use]
pub fn nice_tick_positions(start: f64, end: f64, max_intervals: usize) -> SmallVec<[f64; 12]> {
    let mut ticks = SmallVec::new();
    let Some(step) = nice_tick_step(start, end, max_intervals) else {
        return ticks;
    };

    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    let tolerance = step * 1e-9;
    let mut index = (low / step).ceil() as i64;
    loop {
        let tick = index as f64 * step;
        if tick > high + tolerance {
            break;
        }
        // Avoid `-0` labels.
        ticks.push(if tick.abs() < tolerance { 0.0 } else { tick });
        index += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::{VALUE_AXIS_MAX_INTERVALS, nice_tick_positions, nice_tick_step};

    #[test]
    fn step_snaps_to_nice_multiplier() {
        assert_eq!(nice_tick_step(0.0, 10.0, 5), Some(2.0));
        let quarter = nice_tick_step(0.0, 1.0, 4).expect("step");
        assert!((quarter - 0.25).abs() < 1e-12);
        assert_eq!(nice_tick_step(-281.15, 108.0, VALUE_AXIS_MAX_INTERVALS), Some(50.0));
    }

    #[test]
    fn positions_cover_celsius_gauge_range() {
        let ticks = nice_tick_positions(-281.15, 108.0, VALUE_AXIS_MAX_INTERVALS);
        assert_eq!(
            ticks.as_slice(),
            &[-250.0, -200.0, -150.0, -100.0, -50.0, 0.0, 50.0, 100.0]
        );
    }

    #[test]
    fn degenerate_span_has_no_ticks() {
        assert!(nice_tick_positions(1.0, 1.0, 5).is_empty());
        assert!(nice_tick_positions(0.0, f64::INFINITY, 5).is_empty());
    }
}
