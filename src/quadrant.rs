use serde::{Deserialize, Serialize};
use std::{
    f64::consts::PI,
    ops::{Index, IndexMut},
};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Detector quadrant with respect to the beam centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum Quadrant {
    Left,
    Right,
    Up,
    Down,
}
impl Quadrant {
    /// Quadrant identifier used by mask builders
    pub fn id(&self) -> u8 {
        match self {
            Quadrant::Left => 1,
            Quadrant::Right => 2,
            Quadrant::Up => 3,
            Quadrant::Down => 4,
        }
    }
    /// Returns the quadrant an azimuth angle [rad] falls into
    pub fn from_azimuth(phi: f64) -> Self {
        // shift so that Right starts at 0
        let phi = (phi + PI / 4f64).rem_euclid(2f64 * PI);
        match (phi / (PI / 2f64)) as usize {
            0 => Quadrant::Right,
            1 => Quadrant::Up,
            2 => Quadrant::Left,
            _ => Quadrant::Down,
        }
    }
}

/// Angular-radial sector of a quadrant mask
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantSector {
    pub quadrant: Quadrant,
    /// sector origin, the beam centre in the detector local frame
    pub centre: [f64; 3],
    pub radius_min: f64,
    pub radius_max: f64,
}
impl QuadrantSector {
    /// Sector centred at the local origin
    pub fn new(quadrant: Quadrant, radius_min: f64, radius_max: f64) -> Self {
        Self {
            quadrant,
            centre: [0f64; 3],
            radius_min,
            radius_max,
        }
    }
    /// Checks if the detector plane point `(x,y)` lies within the sector
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.centre[0], y - self.centre[1]);
        let r = dx.hypot(dy);
        if !(r >= self.radius_min && r <= self.radius_max) {
            return false;
        }
        Quadrant::from_azimuth(dy.atan2(dx)) == self.quadrant
    }
}

/// One value per quadrant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrants<T> {
    pub left: T,
    pub right: T,
    pub up: T,
    pub down: T,
}
impl<T> Quadrants<T> {
    pub fn from_fn<F: FnMut(Quadrant) -> T>(mut f: F) -> Self {
        Self {
            left: f(Quadrant::Left),
            right: f(Quadrant::Right),
            up: f(Quadrant::Up),
            down: f(Quadrant::Down),
        }
    }
    /// Builds the four values in canonical order, stopping at the first error
    pub fn try_from_fn<E, F>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(Quadrant) -> Result<T, E>,
    {
        Ok(Self {
            left: f(Quadrant::Left)?,
            right: f(Quadrant::Right)?,
            up: f(Quadrant::Up)?,
            down: f(Quadrant::Down)?,
        })
    }
    pub fn map<U, F: FnMut(Quadrant, T) -> U>(self, mut f: F) -> Quadrants<U> {
        Quadrants {
            left: f(Quadrant::Left, self.left),
            right: f(Quadrant::Right, self.right),
            up: f(Quadrant::Up, self.up),
            down: f(Quadrant::Down, self.down),
        }
    }
    /// Pairs the values with the ones of another set
    pub fn zip<U>(self, other: Quadrants<U>) -> Quadrants<(T, U)> {
        Quadrants {
            left: (self.left, other.left),
            right: (self.right, other.right),
            up: (self.up, other.up),
            down: (self.down, other.down),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &T)> + '_ {
        Quadrant::iter().map(move |q| (q, &self[q]))
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Quadrant, &mut T)> + '_ {
        [
            (Quadrant::Left, &mut self.left),
            (Quadrant::Right, &mut self.right),
            (Quadrant::Up, &mut self.up),
            (Quadrant::Down, &mut self.down),
        ]
        .into_iter()
    }
}
impl<T, E> Quadrants<Result<T, E>> {
    pub fn transpose(self) -> Result<Quadrants<T>, E> {
        Ok(Quadrants {
            left: self.left?,
            right: self.right?,
            up: self.up?,
            down: self.down?,
        })
    }
}
impl<T> Index<Quadrant> for Quadrants<T> {
    type Output = T;

    fn index(&self, quadrant: Quadrant) -> &Self::Output {
        match quadrant {
            Quadrant::Left => &self.left,
            Quadrant::Right => &self.right,
            Quadrant::Up => &self.up,
            Quadrant::Down => &self.down,
        }
    }
}
impl<T> IndexMut<Quadrant> for Quadrants<T> {
    fn index_mut(&mut self, quadrant: Quadrant) -> &mut Self::Output {
        match quadrant {
            Quadrant::Left => &mut self.left,
            Quadrant::Right => &mut self.right,
            Quadrant::Up => &mut self.up,
            Quadrant::Down => &mut self.down,
        }
    }
}
