//! Mark-to-market of the underlying swap on simulated paths.
//!
//! At grid date `t = i·τ` with short rate `r_t` the swap paying from `T_0 = t`
//! to `T_m` is worth, per unit notional,
//!
//! ```text
//! payer    P(t,T_0) − P(t,T_m) − K·Σ_j P(t,T_j)·τ
//! receiver −(payer)
//! ```
//!
//! with `T_j` running over the payment dates after `t`. Bond prices come
//! from the model's affine formula.

use hw_core::{errors::Error, Rate, Real, Result, Size, Time};
use hw_instruments::{SwapType, SwaptionSpec};
use hw_math::PathMatrix;
use hw_methods::PathEnsemble;
use hw_models::ShortRateModel;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Receiver swap values indexed `[path][exercise candidate]`.
#[derive(Debug, Clone)]
pub struct SwapValueMatrix {
    values: PathMatrix,
    exercise_times: Vec<Time>,
}

impl SwapValueMatrix {
    /// Number of paths.
    pub fn paths(&self) -> Size {
        self.values.paths()
    }

    /// Candidate exercise dates `τ, 2τ, …, T_m − τ`, one per column.
    pub fn exercise_times(&self) -> &[Time] {
        &self.exercise_times
    }

    /// Swap value of `path` at candidate `exercise`.
    pub fn value(&self, path: Size, exercise: Size) -> Real {
        self.values.value(path, exercise)
    }

    /// The underlying grid.
    pub fn matrix(&self) -> &PathMatrix {
        &self.values
    }
}

/// Values the swap underlying a [`SwaptionSpec`] with a short-rate model.
#[derive(Debug, Clone)]
pub struct SwapValuator<'a> {
    model: &'a dyn ShortRateModel,
    spec: SwaptionSpec,
}

impl<'a> SwapValuator<'a> {
    /// Create a valuator. The swaption terms are validated here.
    pub fn new(model: &'a dyn ShortRateModel, spec: SwaptionSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self { model, spec })
    }

    /// `P(t,T_0) − P(t,T_m) − K·Σ_j P(t,T_j)·τ` at grid date `i` given the
    /// short rate there; the payer swap value per unit notional.
    pub fn payer_bracket(&self, i: Size, rate: Rate) -> Real {
        let spec = &self.spec;
        let model = self.model;
        let t = spec.grid_time(i);
        let annuity: Real = spec
            .payment_times_after(i)
            .map(|tj| model.discount_bond(t, tj, rate) * spec.tenor)
            .sum();
        model.discount_bond(t, t, rate)
            - model.discount_bond(t, spec.maturity, rate)
            - spec.fixed_rate * annuity
    }

    /// Swap value at grid date `i` for the given direction, scaled by the
    /// notional.
    pub fn swap_value(&self, swap_type: SwapType, i: Size, rate: Rate) -> Real {
        swap_type.sign() * self.spec.notional * self.payer_bracket(i, rate)
    }

    /// Receiver swap value `V(t) = −N·[payer bracket]` at grid date `i`.
    pub fn receiver_value(&self, i: Size, rate: Rate) -> Real {
        self.swap_value(SwapType::Receiver, i, rate)
    }

    /// Value the receiver swap on every path at every candidate exercise
    /// date, reading the short rate at step `⌊t·steps_per_year⌋`.
    ///
    /// # Errors
    /// * [`Error::Precondition`] if an exercise date lies beyond the ensemble.
    /// * [`Error::NumericOverflow`] if any value is not finite.
    #[instrument(level = "debug", skip_all, fields(paths = ensemble.paths()))]
    pub fn value(&self, ensemble: &PathEnsemble) -> Result<SwapValueMatrix> {
        let exercise_times = self.spec.exercise_times();
        let steps: Vec<Size> = exercise_times
            .iter()
            .map(|&t| ensemble.step_index(t))
            .collect();
        let last = steps.last().copied().unwrap_or(0);
        hw_core::ensure!(
            last < ensemble.steps(),
            "exercise step {last} is beyond the {} simulated steps",
            ensemble.steps()
        );

        let candidates = exercise_times.len();
        let mut data = vec![0.0; ensemble.paths() * candidates];
        data.par_chunks_mut(candidates)
            .enumerate()
            .try_for_each(|(p, row)| {
                for (e, slot) in row.iter_mut().enumerate() {
                    let r = ensemble.rate(p, steps[e]);
                    let v = self.receiver_value(e + 1, r);
                    if !v.is_finite() {
                        return Err(Error::NumericOverflow {
                            path: p,
                            step: steps[e],
                            detail: format!(
                                "swap value {v} at t = {} (short rate {r})",
                                exercise_times[e]
                            ),
                        });
                    }
                    *slot = v;
                }
                Ok(())
            })?;

        debug!(candidates, "swap values computed");
        Ok(SwapValueMatrix {
            values: PathMatrix::from_path_major(ensemble.paths(), candidates, data)?,
            exercise_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hw_models::{HullWhite, ModelParameters};
    use hw_termstructures::{YieldCurve, YieldTermStructure};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn model() -> HullWhite {
        let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(0.04).unwrap());
        HullWhite::new(curve, ModelParameters::default()).unwrap()
    }

    fn spec(fixed_rate: Real) -> SwaptionSpec {
        SwaptionSpec::new(5.0, 0.5, 1.0, fixed_rate).unwrap()
    }

    #[test]
    fn receiver_is_minus_payer() {
        let hw = model();
        let v = SwapValuator::new(&hw, spec(0.04)).unwrap();
        for i in 1..10 {
            let payer = v.swap_value(SwapType::Payer, i, 0.045);
            assert_eq!(v.receiver_value(i, 0.045), -payer);
            assert_eq!(payer, v.payer_bracket(i, 0.045));
        }
    }

    #[test]
    fn par_rate_gives_zero_value() {
        let hw = model();
        let (i, r) = (1, 0.04);
        let t = 0.5;
        let annuity: Real = (2..=10).map(|j| hw.discount_bond(t, 0.5 * j as Real, r) * 0.5).sum();
        let par = (1.0 - hw.discount_bond(t, 5.0, r)) / annuity;
        let v = SwapValuator::new(&hw, spec(par)).unwrap();
        assert_abs_diff_eq!(v.receiver_value(i, r), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn value_moves_monotonically_with_the_fixed_rate() {
        let hw = model();
        let strikes = [0.02, 0.03, 0.04, 0.05, 0.06];
        for i in 1..10 {
            for r in [0.0, 0.04, 0.09] {
                let values: Vec<Real> = strikes
                    .iter()
                    .map(|&k| SwapValuator::new(&hw, spec(k)).unwrap().receiver_value(i, r))
                    .collect();
                let brackets: Vec<Real> = strikes
                    .iter()
                    .map(|&k| SwapValuator::new(&hw, spec(k)).unwrap().payer_bracket(i, r))
                    .collect();
                assert!(values.windows(2).all(|w| w[1] > w[0]), "receiver at i={i}: {values:?}");
                assert!(brackets.windows(2).all(|w| w[1] < w[0]), "payer at i={i}: {brackets:?}");
            }
        }
    }

    #[test]
    fn notional_scales_the_value() {
        let hw = model();
        let unit = SwapValuator::new(&hw, spec(0.05)).unwrap();
        let big = SwapValuator::new(&hw, SwaptionSpec::new(5.0, 0.5, 1e6, 0.05).unwrap()).unwrap();
        assert_abs_diff_eq!(big.receiver_value(3, 0.03), 1e6 * unit.receiver_value(3, 0.03), epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn receiver_value_increases_with_the_fixed_rate(
            k in -0.02f64..0.10,
            dk in 1e-4f64..0.05,
            r in -0.05f64..0.15,
            i in 1usize..10,
        ) {
            let hw = model();
            let low = SwapValuator::new(&hw, spec(k)).unwrap();
            let high = SwapValuator::new(&hw, spec(k + dk)).unwrap();
            prop_assert!(high.receiver_value(i, r) > low.receiver_value(i, r));
            prop_assert!(high.payer_bracket(i, r) < low.payer_bracket(i, r));
        }
    }
}
