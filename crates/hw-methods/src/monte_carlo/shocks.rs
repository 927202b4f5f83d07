//! Antithetic standard-normal shocks.

use super::check_ensemble_size;
use hw_core::{Real, Result, Size};
use hw_math::{InverseCumulativeNormalRng, PathMatrix};

/// Standard-normal shocks indexed `[path][step]`.
///
/// Row `i + paths/2` is the exact negation of row `i`. Rows in the first half
/// are consecutive draws of a single seeded generator, so the matrix is a
/// pure function of `(paths, steps, seed)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShockMatrix(PathMatrix);

impl ShockMatrix {
    /// Draw `paths/2` rows of `steps` normals and mirror them.
    ///
    /// # Errors
    /// [`hw_core::Error::InvalidEnsembleSize`] if `paths` is odd or zero.
    pub fn generate(paths: Size, steps: Size, seed: u64) -> Result<Self> {
        check_ensemble_size(paths)?;
        hw_core::ensure!(steps > 0, "shock rows need at least one step");

        let mut data = vec![0.0; paths * steps];
        let (head, tail) = data.split_at_mut(paths / 2 * steps);
        InverseCumulativeNormalRng::new(seed).fill(head);
        for (mirrored, &z) in tail.iter_mut().zip(head.iter()) {
            *mirrored = -z;
        }
        Ok(Self(PathMatrix::from_path_major(paths, steps, data)?))
    }

    /// Build the full antithetic matrix from its first half.
    pub fn from_half(half: &PathMatrix) -> Result<Self> {
        let data: Vec<Real> = half
            .iter_paths()
            .flatten()
            .copied()
            .chain(half.iter_paths().flatten().map(|z| -z))
            .collect();
        Self::from_matrix(PathMatrix::from_path_major(
            2 * half.paths(),
            half.columns(),
            data,
        )?)
    }

    /// Use a caller-supplied shock matrix as is.
    ///
    /// The rows are not checked for mirroring. Estimators downstream pair
    /// row `i` with row `i + paths/2`, so a matrix whose halves are not
    /// negatives of each other yields a valid price but a meaningless
    /// standard error; build such input with [`ShockMatrix::from_half`].
    ///
    /// # Errors
    /// * [`hw_core::Error::InvalidEnsembleSize`] if the row count is odd or zero.
    /// * [`hw_core::Error::Precondition`] if the rows are empty.
    pub fn from_matrix(shocks: PathMatrix) -> Result<Self> {
        check_ensemble_size(shocks.paths())?;
        hw_core::ensure!(shocks.columns() > 0, "shock rows need at least one step");
        Ok(Self(shocks))
    }

    /// Whether row `i + paths/2` is the exact negation of row `i` for every
    /// row of the first half.
    pub fn is_antithetic(&self) -> bool {
        let half = self.paths() / 2;
        (0..half).all(|i| {
            self.path(i)
                .iter()
                .zip(self.path(i + half))
                .all(|(a, b)| *a == -*b)
        })
    }

    /// Number of rows.
    pub fn paths(&self) -> Size {
        self.0.paths()
    }

    /// Shocks per row.
    pub fn steps(&self) -> Size {
        self.0.columns()
    }

    /// Row `i`.
    pub fn path(&self, i: Size) -> &[Real] {
        self.0.path(i)
    }

    /// Index of the antithetic partner of row `i`.
    pub fn antithetic_partner(&self, i: Size) -> Size {
        let half = self.paths() / 2;
        if i < half {
            i + half
        } else {
            i - half
        }
    }

    /// The underlying grid.
    pub fn matrix(&self) -> &PathMatrix {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hw_core::Error;

    #[test]
    fn second_half_negates_first_half() {
        let shocks = ShockMatrix::generate(8, 25, 7).unwrap();
        for i in 0..4 {
            let j = shocks.antithetic_partner(i);
            assert_eq!(j, i + 4);
            assert_eq!(shocks.antithetic_partner(j), i);
            for (a, b) in shocks.path(i).iter().zip(shocks.path(j)) {
                assert_eq!(*a, -*b);
            }
        }
    }

    #[test]
    fn seed_determines_the_matrix() {
        let a = ShockMatrix::generate(4, 10, 1).unwrap();
        assert_eq!(a, ShockMatrix::generate(4, 10, 1).unwrap());
        assert_ne!(a, ShockMatrix::generate(4, 10, 2).unwrap());
    }

    #[test]
    fn odd_path_count_is_rejected() {
        assert_eq!(
            ShockMatrix::generate(5, 10, 1),
            Err(Error::InvalidEnsembleSize { paths: 5 })
        );
        let odd = PathMatrix::zeros(3, 2);
        assert!(matches!(
            ShockMatrix::from_matrix(odd),
            Err(Error::InvalidEnsembleSize { paths: 3 })
        ));
    }

    #[test]
    fn empty_rows_are_rejected() {
        assert!(matches!(
            ShockMatrix::from_matrix(PathMatrix::zeros(2, 0)),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn antithetic_check() {
        assert!(ShockMatrix::generate(6, 12, 3).unwrap().is_antithetic());
        let skewed = PathMatrix::from_paths(&[vec![0.0, 1.0], vec![0.0, 1.0]]).unwrap();
        assert!(!ShockMatrix::from_matrix(skewed).unwrap().is_antithetic());
    }

    #[test]
    fn mirror_from_half() {
        let half = PathMatrix::from_paths(&[vec![0.5, -1.0], vec![2.0, 0.25]]).unwrap();
        let full = ShockMatrix::from_half(&half).unwrap();
        assert_eq!(full.paths(), 4);
        assert_eq!(full.path(2), &[-0.5, 1.0]);
        assert_eq!(full.path(3), &[-2.0, -0.25]);
        assert!(full.is_antithetic());
    }
}
