//! Package normalization: clamps a shipment to the dimension table the
//! carrier accepts for its shape. The function is total; bad sizes are
//! corrected, never rejected.

use crate::domain::model::{PackageSpec, Shape};

const MIN_WEIGHT: f64 = 0.3;
const MAX_WEIGHT: f64 = 30.0;
const MAX_ENVELOPE_WEIGHT: f64 = 1.0;

/// Upper bound for the linear sum of a shape's dimensions.
const MAX_DIMENSION_SUM: f64 = 200.0;

/// Passes of the full clamp procedure before giving up on a fixed point.
/// Convergence happens in one or two passes for any finite input.
const MAX_PASSES: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// One lock-step decrement; a dimension at its floor stays put.
    fn decrement(&self, value: f64) -> f64 {
        if value > self.min {
            (value - 1.0).max(self.min)
        } else {
            value
        }
    }
}

const BOX_LENGTH: Bounds = Bounds::new(16.0, 105.0);
const BOX_WIDTH: Bounds = Bounds::new(11.0, 105.0);
const BOX_HEIGHT: Bounds = Bounds::new(2.0, 105.0);

const ROLL_LENGTH: Bounds = Bounds::new(18.0, 105.0);
const ROLL_DIAMETER: Bounds = Bounds::new(5.0, 91.0);

const ENVELOPE_LENGTH: Bounds = Bounds::new(16.0, 60.0);
const ENVELOPE_WIDTH: Bounds = Bounds::new(11.0, 60.0);

/// Normalizes `spec` to carrier-compliant bounds.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(spec: &PackageSpec) -> PackageSpec {
    let mut current = *spec;

    for _ in 0..MAX_PASSES {
        let next = adjust_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }

    tracing::warn!(?spec, "package normalization did not settle, using last pass");
    current
}

fn adjust_once(spec: &PackageSpec) -> PackageSpec {
    let mut adjusted = *spec;
    adjusted.weight_kg = clamp_weight(spec.shape, spec.weight_kg);

    match spec.shape {
        Shape::Box => {
            adjusted.diameter = 0.0;
            adjusted.length = BOX_LENGTH.clamp(adjusted.length);
            adjusted.width = BOX_WIDTH.clamp(adjusted.width);
            adjusted.height = BOX_HEIGHT.clamp(adjusted.height);

            while adjusted.length + adjusted.width + adjusted.height > MAX_DIMENSION_SUM {
                let before = adjusted;
                adjusted.length = BOX_LENGTH.decrement(adjusted.length);
                adjusted.width = BOX_WIDTH.decrement(adjusted.width);
                adjusted.height = BOX_HEIGHT.decrement(adjusted.height);
                // 全部都在下限，無法再縮小
                if adjusted == before {
                    break;
                }
            }
        }
        Shape::Roll => {
            adjusted.height = 0.0;
            adjusted.width = 0.0;
            adjusted.length = ROLL_LENGTH.clamp(adjusted.length);
            adjusted.diameter = ROLL_DIAMETER.clamp(adjusted.diameter);

            while adjusted.length + 2.0 * adjusted.diameter > MAX_DIMENSION_SUM {
                let before = adjusted;
                adjusted.length = ROLL_LENGTH.decrement(adjusted.length);
                adjusted.diameter = ROLL_DIAMETER.decrement(adjusted.diameter);
                if adjusted == before {
                    break;
                }
            }
        }
        Shape::Envelope => {
            adjusted.height = 0.0;
            adjusted.diameter = 0.0;
            adjusted.length = ENVELOPE_LENGTH.clamp(adjusted.length);
            adjusted.width = ENVELOPE_WIDTH.clamp(adjusted.width);
        }
    }

    adjusted
}

fn clamp_weight(shape: Shape, weight: f64) -> f64 {
    let max = match shape {
        Shape::Envelope => MAX_ENVELOPE_WEIGHT,
        Shape::Box | Shape::Roll => MAX_WEIGHT,
    };
    Bounds::new(MIN_WEIGHT, max).clamp(weight)
}
