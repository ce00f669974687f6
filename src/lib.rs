//! # Beam centre refinement for small-angle scattering
//!
//! At a trial beam centre, the reduced detector data is split into the Left,
//! Right, Up and Down quadrants, each quadrant is averaged into an
//! intensity versus Q profile and the asymmetry of opposite quadrants is
//! returned as a pair of residues.
//! An external optimizer minimizes the residues by calling
//! [CentreFinder::seek_centre] with successive trial positions.
//!
//! Loading, masking and Q conversion of the detector data are provided by the
//! caller through the traits of the [collaborators] module.
//!
//! ```no_run
//! # use sans_centre::*;
//! # fn search<P, M, C>(mut reduction: Reduction<P, M, C>) -> Result<(), Error>
//! # where
//! #     P: ReductionPipeline,
//! #     M: QuadrantMasker<P::Image>,
//! #     C: QConverter<P::Image>,
//! # {
//! let config = ReductionConfig::default()
//!     .radius_range(0.06, 0.28)
//!     .scale_factors((1000., 1000.));
//! let mut finder = CentreFinder::new((0., 0.), &config);
//! let residues = finder.seek_centre(&mut reduction, &config, (0.002, -0.001))?;
//! println!("{}", finder.status_str(1, residues.x.sum, residues.y.sum));
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod collaborators;
pub mod config;
mod error;
pub mod finder;
pub mod mover;
pub mod partition;
mod position;
mod profile;
mod quadrant;
pub mod residue;
#[cfg(test)]
mod test_utils;

pub use cleaner::{SpectrumCleaner, StripEndNans};
pub use collaborators::{DetectorMover, QConverter, QuadrantMasker, ReductionPipeline, Run};
pub use config::{ConfigError, FindDirection, ReductionConfig, ScaleFactors};
pub use error::{CollaboratorError, Error};
pub use finder::{CentreFinder, CentreFinderError, Reduction, TrialStage};
pub use partition::PartitionError;
pub use position::Position;
pub use profile::{Profile, ProfileError};
pub use quadrant::{Quadrant, QuadrantSector, Quadrants};
pub use residue::{residue, Residue, ResiduePair};
