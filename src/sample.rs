//! Evaluation of an expression along the x-axis for plotting. A plot front end
//! samples an expression with [`sample`] and maps the points to pixels with a
//! [`Viewport`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::definitions::{
    DEFAULT_HEIGHT, DEFAULT_STEP, DEFAULT_UNITS_X, DEFAULT_UNITS_Y, DEFAULT_WIDTH,
};
use crate::{exerr, format_exerr, ExResult, Expr};

/// Range and resolution of the sampled x-values.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub step: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            x_min: -DEFAULT_UNITS_X / 2.0,
            x_max: DEFAULT_UNITS_X / 2.0,
            step: DEFAULT_STEP,
        }
    }
}

impl SampleConfig {
    pub fn new(x_min: f64, x_max: f64, step: f64) -> ExResult<Self> {
        let config = SampleConfig { x_min, x_max, step };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Bounds need to be finite with `x_min <= x_max` and the step needs to be finite
    /// and positive. The step also needs to be large enough to move away from both
    /// bounds in floating point.
    pub fn validate(&self) -> ExResult<()> {
        if !self.x_min.is_finite() || !self.x_max.is_finite() {
            Err(exerr!(Eval, "sample range needs finite bounds"))
        } else if self.x_min > self.x_max {
            Err(format_exerr!(
                Eval,
                "empty sample range [{}, {}]",
                self.x_min,
                self.x_max
            ))
        } else if !(self.step.is_finite() && self.step > 0.0) {
            Err(format_exerr!(Eval, "invalid sample step {}", self.step))
        } else if self.x_min + self.step == self.x_min || self.x_max - self.step == self.x_max {
            Err(format_exerr!(
                Eval,
                "sample step {} vanishes at the bounds [{}, {}]",
                self.step,
                self.x_min,
                self.x_max
            ))
        } else {
            Ok(())
        }
    }

    /// Sample positions from `x_min` up to and including `x_max`. The step is
    /// accumulated, so the last position might fall short of `x_max` by rounding.
    /// Invalid configurations yield no positions. The positions end as soon as adding
    /// the step does not increase `x` anymore.
    pub fn xs(&self) -> impl Iterator<Item = f64> {
        let SampleConfig { x_min, x_max, step } = *self;
        let first = self.validate().ok().map(|_| x_min);
        std::iter::successors(first, move |x| {
            let next = x + step;
            (next > *x).then_some(next)
        })
        .take_while(move |x| *x <= x_max)
    }
}

/// Evaluates `expr` at each position of `config` without any checks.
pub fn sample_iter<'a>(
    expr: &'a Expr<f64>,
    config: &SampleConfig,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    config.xs().map(move |x| (x, expr.eval(x)))
}

/// Evaluates `expr` at each position of `config` and returns the `(x, y)` pairs.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use plotex::prelude::*;
///
/// let expr = Expr::<f64>::parse_strict("x^2")?;
/// let points = sample(&expr, &SampleConfig::new(-1.0, 1.0, 0.5)?)?;
/// assert_eq!(points, vec![(-1.0, 1.0), (-0.5, 0.25), (0.0, 0.0), (0.5, 0.25), (1.0, 1.0)]);
///
/// // a single NaN fails the whole sample
/// let expr = Expr::<f64>::parse_strict("x^0.5")?;
/// assert!(sample(&expr, &SampleConfig::new(-1.0, 1.0, 0.5)?).is_err());
/// #
/// #     Ok(())
/// # }
/// ```
///
/// # Errors
///
/// * The configuration is invalid, see [`SampleConfig::validate`].
/// * The expression evaluates to NaN at any position. Partial results are dropped,
///   since a plot with holes is not what the user asked for.
pub fn sample(expr: &Expr<f64>, config: &SampleConfig) -> ExResult<Vec<(f64, f64)>> {
    config.validate()?;
    let mut points = Vec::new();
    for (x, y) in sample_iter(expr, config) {
        if y.is_nan() {
            let err = format_exerr!(Eval, "'{}' is not a number for x={}", expr.unparse(), x);
            log::warn!("{}", err);
            return Err(err);
        }
        points.push((x, y));
    }
    log::debug!("sampled '{}' at {} positions", expr.unparse(), points.len());
    Ok(points)
}

/// Maps plot coordinates to pixels. The origin lies in the center of the viewport and
/// the pixel y-axis points downwards.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Number of x-units visible across the width.
    pub units_x: f64,
    /// Number of y-units visible across the height.
    pub units_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            units_x: DEFAULT_UNITS_X,
            units_y: DEFAULT_UNITS_Y,
        }
    }
}

impl Viewport {
    pub fn to_screen(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let horizontal_step = self.width / self.units_x;
        let vertical_step = self.height / self.units_y;
        (
            x * horizontal_step + self.width / 2.0,
            self.height / 2.0 - y * vertical_step,
        )
    }

    /// Sample configuration that covers the visible x-range.
    pub fn sample_config(&self) -> SampleConfig {
        SampleConfig {
            x_min: -self.units_x / 2.0,
            x_max: self.units_x / 2.0,
            step: DEFAULT_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assert_float_eq_f64;
    use crate::ExErrorKind;

    #[test]
    fn test_default_config() {
        let config = SampleConfig::default();
        assert!(config.validate().is_ok());
        let xs = config.xs().collect::<Vec<_>>();
        assert_float_eq_f64(xs[0], -30.0);
        assert!(xs.len() >= 400 && xs.len() <= 401);
        assert!(*xs.last().unwrap() <= 30.0);
        assert_eq!(Viewport::default().sample_config(), config);
    }

    #[test]
    fn test_invalid_config() {
        for (x_min, x_max, step) in [
            (1.0, -1.0, 0.1),
            (-1.0, 1.0, 0.0),
            (-1.0, 1.0, -0.1),
            (f64::NEG_INFINITY, 1.0, 0.1),
            (-1.0, 1.0, f64::NAN),
        ] {
            let err = SampleConfig::new(x_min, x_max, step).unwrap_err();
            assert_eq!(err.kind, ExErrorKind::Eval);
            let config = SampleConfig { x_min, x_max, step };
            assert_eq!(config.xs().count(), 0);
        }
        let config = SampleConfig::new(2.0, 2.0, 1.0).unwrap();
        assert_eq!(config.xs().collect::<Vec<_>>(), vec![2.0]);
    }

    #[test]
    fn test_vanishing_step() {
        // 1.0 is below half the spacing of floats around 1e17
        let err = SampleConfig::new(1e17, 1e17 + 64.0, 1.0).unwrap_err();
        assert_eq!(err.kind, ExErrorKind::Eval);
        assert!(err.msg.contains("vanishes"));
        let config = SampleConfig {
            x_min: 1e17,
            x_max: 1e17 + 64.0,
            step: 1.0,
        };
        assert_eq!(config.xs().count(), 0);

        // the step still moves at both bounds
        let config = SampleConfig::new(1e17, 1e17 + 64.0, 16.0).unwrap();
        let xs = config.xs().collect::<Vec<_>>();
        assert_eq!(xs.len(), 5);
        assert_eq!(*xs.last().unwrap(), 1e17 + 64.0);
    }

    #[test]
    fn test_sample() {
        let expr = Expr::<f64>::parse_strict("2*x+1").unwrap();
        let config = SampleConfig::new(0.0, 2.0, 1.0).unwrap();
        let points = sample(&expr, &config).unwrap();
        assert_eq!(points, vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]);

        let expr = Expr::<f64>::parse_strict("1/x").unwrap();
        let config = SampleConfig::new(-1.0, 1.0, 1.0).unwrap();
        let points = sample(&expr, &config).unwrap();
        assert_eq!(points[1], (0.0, f64::INFINITY));

        let expr = Expr::<f64>::parse_strict("x/x").unwrap();
        let err = sample(&expr, &config).unwrap_err();
        assert!(err.msg.contains("x=0"));
        // unchecked sampling hands out the NaN
        assert!(sample_iter(&expr, &config).any(|(_, y)| y.is_nan()));
    }

    #[test]
    fn test_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_screen((0.0, 0.0)), (500.0, 250.0));
        for ((x, y), (px_ref, py_ref)) in [
            ((30.0, 20.0), (1000.0, 0.0)),
            ((-30.0, -20.0), (0.0, 500.0)),
            ((3.0, 1.0), (550.0, 237.5)),
        ] {
            let (px, py) = viewport.to_screen((x, y));
            assert_float_eq_f64(px, px_ref);
            assert_float_eq_f64(py, py_ref);
        }
    }
}
