use itertools::izip;
use serde::{Deserialize, Serialize};
use std::ops::Sub;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProfileError {
    #[error("profile columns differ in length: Q={q}, I={intensity}, E={error}")]
    ColumnLength {
        q: usize,
        intensity: usize,
        error: usize,
    },
    #[error("Q is not sorted at bin #{0}")]
    DecreasingQ(usize),
    #[error("cannot subtract profiles of {0} and {1} bins")]
    BinCount(usize, usize),
    #[error("Q grids differ at bin #{index}: {lhs} vs {rhs}")]
    Binning { index: usize, lhs: f64, rhs: f64 },
}
type Result<T> = std::result::Result<T, ProfileError>;

/// Relative tolerance on Q bin matching for subtraction
const Q_TOLERANCE: f64 = 1e-9;

/// One dimensional intensity profile versus the momentum transfer Q
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    q: Vec<f64>,
    intensity: Vec<f64>,
    error: Vec<f64>,
}
impl Profile {
    /// Creates a new profile, Q must be non-decreasing
    pub fn new(q: Vec<f64>, intensity: Vec<f64>, error: Vec<f64>) -> Result<Self> {
        if q.len() != intensity.len() || q.len() != error.len() {
            return Err(ProfileError::ColumnLength {
                q: q.len(),
                intensity: intensity.len(),
                error: error.len(),
            });
        }
        if let Some(index) = q.windows(2).position(|w| !(w[1] >= w[0])) {
            return Err(ProfileError::DecreasingQ(index + 1));
        }
        Ok(Self {
            q,
            intensity,
            error,
        })
    }
    /// Creates a profile with zero errors
    pub fn from_q_intensity(q: Vec<f64>, intensity: Vec<f64>) -> Result<Self> {
        let error = vec![0f64; intensity.len()];
        Self::new(q, intensity, error)
    }
    pub fn len(&self) -> usize {
        self.q.len()
    }
    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
    pub fn q(&self) -> &[f64] {
        &self.q
    }
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }
    pub fn error(&self) -> &[f64] {
        &self.error
    }
    /// Iterator over the `(Q, I, E)` triples
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        izip!(&self.q, &self.intensity, &self.error).map(|(&q, &i, &e)| (q, i, e))
    }
    /// Mutable iterator over the intensities and errors
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = (&mut f64, &mut f64)> {
        self.intensity.iter_mut().zip(self.error.iter_mut())
    }
    /// Keeps the bins within `range`
    pub(crate) fn retain_bins(&mut self, range: std::ops::Range<usize>) {
        self.q.truncate(range.end);
        self.intensity.truncate(range.end);
        self.error.truncate(range.end);
        self.q.drain(..range.start);
        self.intensity.drain(..range.start);
        self.error.drain(..range.start);
    }
}
/// Bin-for-bin subtraction, errors are added in quadrature
impl Sub for &Profile {
    type Output = Result<Profile>;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.len() != rhs.len() {
            return Err(ProfileError::BinCount(self.len(), rhs.len()));
        }
        if let Some((index, (&lhs, &rhs))) = self
            .q
            .iter()
            .zip(&rhs.q)
            .enumerate()
            .find(|(_, (a, b))| (*a - *b).abs() > Q_TOLERANCE * a.abs().max(b.abs()))
        {
            return Err(ProfileError::Binning { index, lhs, rhs });
        }
        let (intensity, error) = izip!(&self.intensity, &self.error, &rhs.intensity, &rhs.error)
            .map(|(i1, e1, i2, e2)| (i1 - i2, e1.hypot(*e2)))
            .unzip();
        Ok(Profile {
            q: self.q.clone(),
            intensity,
            error,
        })
    }
}
