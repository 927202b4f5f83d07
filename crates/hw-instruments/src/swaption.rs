//! European swaption on a swap with evenly spaced fixed payments.
//!
//! Times are year fractions from the valuation date. The fixed leg pays
//! `K·τ` at `τ, 2τ, …, T_m`; the option is exercised at the first tenor
//! date `τ` into the swap running from there to `T_m`.

use hw_core::{errors::Error, Rate, Real, Result, Size, Time};
use serde::{Deserialize, Serialize};

/// Tolerance on `T_m / τ` being a whole number.
const GRID_TOLERANCE: Real = 1e-9;

/// Direction of the underlying swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapType {
    /// Pay fixed, receive floating.
    Payer,
    /// Receive fixed, pay floating.
    Receiver,
}

impl SwapType {
    /// +1 for Payer, −1 for Receiver.
    pub fn sign(self) -> Real {
        match self {
            SwapType::Payer => 1.0,
            SwapType::Receiver => -1.0,
        }
    }
}

/// Terms of the swaption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwaptionSpec {
    /// Final payment date `T_m` of the underlying swap.
    pub maturity: Time,
    /// Spacing `τ` of the payment dates.
    pub tenor: Time,
    /// Notional `N`.
    pub notional: Real,
    /// Fixed rate `K`.
    pub fixed_rate: Rate,
}

impl SwaptionSpec {
    /// Build and validate a swaption.
    pub fn new(maturity: Time, tenor: Time, notional: Real, fixed_rate: Rate) -> Result<Self> {
        let spec = Self {
            maturity,
            tenor,
            notional,
            fixed_rate,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that the payment grid is well formed.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `τ > 0`, `T_m > τ`, `T_m` is a whole
    /// multiple of `τ`, `N > 0` and `K` is finite.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidArgument(msg));
        if !(self.tenor.is_finite() && self.tenor > 0.0) {
            return invalid(format!("tenor must be positive, got {}", self.tenor));
        }
        if !(self.maturity.is_finite() && self.maturity > self.tenor) {
            return invalid(format!(
                "maturity {} must exceed the tenor {}",
                self.maturity, self.tenor
            ));
        }
        let ratio = self.maturity / self.tenor;
        if (ratio - ratio.round()).abs() > GRID_TOLERANCE {
            return invalid(format!(
                "maturity {} is not a whole multiple of the tenor {}",
                self.maturity, self.tenor
            ));
        }
        if !(self.notional.is_finite() && self.notional > 0.0) {
            return invalid(format!("notional must be positive, got {}", self.notional));
        }
        if !self.fixed_rate.is_finite() {
            return invalid(format!("fixed rate must be finite, got {}", self.fixed_rate));
        }
        Ok(())
    }

    /// Number of tenor periods `T_m / τ`.
    pub fn periods(&self) -> Size {
        (self.maturity / self.tenor).round() as Size
    }

    /// The `i`-th date of the payment grid, `i·τ`; the last one is `T_m`.
    pub fn grid_time(&self, i: Size) -> Time {
        if i == self.periods() {
            self.maturity
        } else {
            i as Real * self.tenor
        }
    }

    /// Candidate exercise dates `τ, 2τ, …, T_m − τ`.
    pub fn exercise_times(&self) -> Vec<Time> {
        (1..self.periods()).map(|i| self.grid_time(i)).collect()
    }

    /// The European exercise date, i.e. the first tenor date.
    pub fn european_exercise_time(&self) -> Time {
        self.tenor
    }

    /// Payment dates strictly after grid date `i`: `(i+1)·τ, …, T_m`.
    pub fn payment_times_after(&self, i: Size) -> impl Iterator<Item = Time> + '_ {
        (i + 1..=self.periods()).map(move |j| self.grid_time(j))
    }
}

impl Default for SwaptionSpec {
    fn default() -> Self {
        Self {
            maturity: 5.0,
            tenor: 0.5,
            notional: 1.0,
            fixed_rate: 0.04,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_grid() {
        let s = SwaptionSpec::default();
        assert_eq!(s.periods(), 10);
        assert_eq!(s.european_exercise_time(), 0.5);
        let ex = s.exercise_times();
        assert_eq!(ex.len(), 9);
        assert_eq!(ex[0], 0.5);
        assert_eq!(ex[8], 4.5);
        let pay: Vec<f64> = s.payment_times_after(1).collect();
        assert_eq!(pay, vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0]);
    }

    #[test]
    fn last_grid_date_is_the_maturity() {
        let s = SwaptionSpec::new(0.3, 0.1, 1.0, 0.02).unwrap();
        assert_eq!(s.periods(), 3);
        assert_eq!(s.grid_time(3), 0.3);
        assert_eq!(s.payment_times_after(2).collect::<Vec<_>>(), vec![0.3]);
    }

    #[test]
    fn rejects_malformed_terms() {
        let bad = [
            (5.0, 0.0, 1.0, 0.04),
            (0.5, 0.5, 1.0, 0.04),
            (5.2, 0.5, 1.0, 0.04),
            (5.0, 0.5, 0.0, 0.04),
            (5.0, 0.5, 1.0, f64::NAN),
        ];
        for (m, t, n, k) in bad {
            assert!(
                matches!(SwaptionSpec::new(m, t, n, k), Err(Error::InvalidArgument(_))),
                "accepted ({m}, {t}, {n}, {k})"
            );
        }
    }

    #[test]
    fn swap_type_sign() {
        assert_eq!(SwapType::Payer.sign(), 1.0);
        assert_eq!(SwapType::Receiver.sign(), -1.0);
    }
}
