use crate::Profile;
use serde::Serialize;
use std::fmt;

/// Sum of squared differences between two profiles over their common Q bins
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Residue {
    pub sum: f64,
    /// number of aligned bins contributing to the sum
    pub terms: usize,
}
impl Residue {
    /// No common Q bin was found, the residue carries no information
    pub fn is_degenerate(&self) -> bool {
        self.terms == 0
    }
}
impl From<Residue> for f64 {
    fn from(residue: Residue) -> Self {
        residue.sum
    }
}
impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6e} ({} bins)", self.sum, self.terms)
    }
}

/// Left/Right and Up/Down residues
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ResiduePair {
    pub x: Residue,
    pub y: Residue,
}
impl ResiduePair {
    /// Returns `(residueX, residueY)`
    pub fn values(&self) -> (f64, f64) {
        (self.x.sum, self.y.sum)
    }
}
impl From<ResiduePair> for (f64, f64) {
    fn from(pair: ResiduePair) -> Self {
        pair.values()
    }
}

/// Computes the residue between profiles `a` and `b`
///
/// Both Q sequences are walked together: a bin of `a` below the current bin
/// of `b` is skipped, bins of `b` below the current bin of `a` are skipped,
/// and equal Q bins contribute `(Ia - Ib)^2`. The walk over `a` is bounded by
/// the length of the shorter profile.
///
/// Every aligned bin contributes, so two profiles differing by 2 on six
/// aligned bins give a residue of 24.
pub fn residue(a: &Profile, b: &Profile) -> Residue {
    residue_labelled("residue", a, b)
}

pub(crate) fn residue_labelled(label: &str, a: &Profile, b: &Profile) -> Residue {
    let (qa, ya) = (a.q(), a.intensity());
    let (qb, yb) = (b.q(), b.intensity());
    let n = a.len().min(b.len());
    let mut residue = Residue::default();
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < qb.len() {
        if qa[i] < qb[j] {
            log::trace!("{label}1 {i} {j}");
            i += 1;
        } else if qa[i] > qb[j] {
            while j < qb.len() && qa[i] > qb[j] {
                log::trace!("{label}2 {i} {j}");
                j += 1;
            }
        } else {
            residue.sum += (ya[i] - yb[j]).powi(2);
            residue.terms += 1;
            i += 1;
            j += 1;
        }
    }
    residue
}
