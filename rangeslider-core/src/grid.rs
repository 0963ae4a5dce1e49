//! Step-grid math: quantization, value ↔ percent conversion, scale ticks.
//!
//! Everything here is a pure function of `(min, max, step)`. The model uses
//! [`Grid::snap`] to keep values on the grid; the presenter uses the
//! conversions and [`Grid::ticks`] to build render data.

use serde::{Deserialize, Serialize};

/// Hard cap on interior scale ticks.
pub const MAX_SCALE_TICKS: usize = 10;

/// Tolerance for "is this ratio a whole number" checks.
const EPSILON: f64 = 1e-9;

/// Decimal digits below the leading digit of the unit that [`tidy`] keeps.
const TIDY_DIGITS: i32 = 6;

/// 2^52: above this an `f64` has no fractional bits left to round.
const MANTISSA_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Exactly representable powers of ten.
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Remove floating-point noise left by `min + k * step` style arithmetic
/// (`0.1 * 3 == 0.30000000000000004`).
///
/// `x` is rounded to a decimal precision six digits finer than `unit`, and
/// the rounded value is only taken when it lies within `EPSILON * unit` of
/// `x`. Anything farther away is real data, not noise, and is returned
/// untouched, as is any value too large to carry digits at that precision.
pub fn tidy(x: f64, unit: f64) -> f64 {
    if !x.is_finite() || !unit.is_finite() || unit <= 0.0 {
        return x;
    }
    let exponent = unit.log10().floor() as i32 - TIDY_DIGITS;
    let Some(&scale) = POW10.get(exponent.unsigned_abs() as usize) else {
        return x;
    };
    let scaled = if exponent < 0 { x * scale } else { x / scale };
    if scaled.abs() >= MANTISSA_LIMIT {
        return x;
    }
    let rounded = if exponent < 0 {
        scaled.round() / scale
    } else {
        scaled.round() * scale
    };
    if (rounded - x).abs() > EPSILON * unit {
        x
    } else if rounded == 0.0 {
        // no negative zero
        0.0
    } else {
        rounded
    }
}

/// Snap `offset` to a multiple of `unit`: a remainder strictly greater than
/// half a unit rounds up, anything else rounds down.
pub fn snap_remainder(offset: f64, unit: f64) -> f64 {
    let mut rem = offset.rem_euclid(unit);
    if unit - rem < EPSILON * unit {
        // already on the next grid line, modulo noise
        rem -= unit;
    }
    if rem > unit / 2.0 {
        offset - rem + unit
    } else {
        offset - rem
    }
}

/// Scale tick configuration, read from the view options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    /// Desired interior tick count; capped at [`MAX_SCALE_TICKS`].
    pub num_of_scale_val: usize,
    pub display_min: bool,
    pub display_max: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            num_of_scale_val: MAX_SCALE_TICKS,
            display_min: true,
            display_max: true,
        }
    }
}

/// A numeric domain `[min, max]` quantized by `step`.
///
/// Callers guarantee `max > min` and `step > 0`; the model never hands out a
/// grid that violates this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Grid {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Index of the last grid line that still lies inside `[min, max]`.
    fn last_line(&self) -> f64 {
        (self.range() / self.step + EPSILON).floor()
    }

    /// Clamp into `[min, max]` and move to the nearest `min + k * step`.
    ///
    /// Exact midpoints round toward `max`. When `max` itself is off-grid the
    /// result never exceeds the last grid line below it.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let lines = ((clamped - self.min) / self.step + 0.5 + EPSILON).floor();
        let lines = lines.clamp(0.0, self.last_line());
        tidy(self.min + lines * self.step, self.step).clamp(self.min, self.max)
    }

    /// True if `value` lies on the grid within tolerance.
    pub fn is_aligned(&self, value: f64) -> bool {
        let ratio = (value - self.min) / self.step;
        (ratio - ratio.round()).abs() < 1e-6
    }

    /// Map a value into `[0, 100]`, snapped to the percentage granularity of
    /// one step so positions never imply finer resolution than the grid.
    pub fn value_to_percent(&self, value: f64) -> f64 {
        let range = self.range();
        let percent = (value - self.min) / range * 100.0;
        if percent <= 0.0 {
            return 0.0;
        }
        if percent >= 100.0 - EPSILON {
            return 100.0;
        }
        let unit = self.step / range * 100.0;
        tidy(snap_remainder(percent, unit), unit).clamp(0.0, 100.0)
    }

    /// Exact inverse of the linear part of [`Grid::value_to_percent`].
    /// No snapping; the model quantizes on write.
    pub fn percent_to_value(&self, percent: f64) -> f64 {
        tidy(self.range() * percent / 100.0 + self.min, self.step)
    }

    /// Scale tick positions in value-space.
    ///
    /// When the requested tick count covers every interior grid line, the
    /// grid itself is enumerated. Otherwise ticks are spread evenly over
    /// `(min, max)` and each is snapped to the step grid.
    pub fn ticks(&self, options: &ScaleOptions) -> Vec<f64> {
        let range = self.range();
        let exact = range / self.step;
        // The endpoint is emitted separately, so an exact fit loses one line.
        let total = if (exact - exact.round()).abs() < EPSILON {
            exact.round() - 1.0
        } else {
            exact.floor()
        };
        let total = total.max(0.0) as usize;
        let count = options.num_of_scale_val.min(total).min(MAX_SCALE_TICKS);

        let mut values = Vec::with_capacity(count + 2);
        if options.display_min {
            values.push(self.min);
        }

        if count == total {
            values.extend((1..=total).map(|i| tidy(self.min + self.step * i as f64, self.step)));
        } else {
            let spacing = range / (count + 1) as f64;
            values.extend((1..=count).map(|i| {
                let offset = spacing * i as f64;
                tidy(self.min + snap_remainder(offset, self.step), self.step)
            }));
        }

        if options.display_max {
            values.push(self.max);
        }
        values
    }

    /// [`Grid::ticks`] mapped through [`Grid::value_to_percent`].
    pub fn percentage_ticks(&self, options: &ScaleOptions) -> Vec<f64> {
        self.ticks(options)
            .into_iter()
            .map(|v| self.value_to_percent(v))
            .collect()
    }
}
