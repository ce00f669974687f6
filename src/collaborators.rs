//! Contracts of the reduction machinery the centre finder drives
//!
//! Image loading, mask rasterization and Q conversion live outside this crate;
//! the centre finder only sequences them through these traits.

use crate::{error::CollaboratorError, Profile, QuadrantSector, ReductionConfig};
use strum_macros::Display;

pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

/// Measurement a reduced image originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Run {
    Sample,
    Background,
}

/// Instrument component relative positioning
pub trait DetectorMover {
    /// Translates `component` by `(dx, dy)` relative to its current position
    fn move_component(&mut self, component: &str, dx: f64, dy: f64) -> CollaboratorResult<()>;
}

/// Reduction steps up to, and excluding, the conversion to Q
pub trait ReductionPipeline {
    type Image: Clone;
    type Handle: DetectorMover;

    /// The sample and, if any, the background measurement handles
    fn handles_mut(&mut self) -> (&mut Self::Handle, Option<&mut Self::Handle>);
    fn has_background(&self) -> bool;
    fn preprocess_and_reduce_to_pre_q(
        &mut self,
        run: Run,
        config: &ReductionConfig,
    ) -> CollaboratorResult<Self::Image>;
}

/// Quadrant mask construction and application
pub trait QuadrantMasker<I> {
    type Shape;

    fn build_quadrant_mask(&self, sector: &QuadrantSector) -> CollaboratorResult<Self::Shape>;
    /// Masks all the pixels of `image` outside `shape`
    fn apply_mask(&self, image: &mut I, shape: &Self::Shape) -> CollaboratorResult<()>;
}

/// Azimuthal averaging of a masked image into a Q profile
pub trait QConverter<I> {
    fn to_q(&self, image: &I, config: &ReductionConfig) -> CollaboratorResult<Profile>;
}
