use crate::{
    cleaner::{SpectrumCleaner, StripEndNans},
    collaborators::Run,
    config::ConfigError,
    error::CollaboratorError,
    mover::move_detector,
    partition::{partition_quadrants, subtract_background, PartitionError},
    residue::residue_labelled,
    Position, Profile, QConverter, QuadrantMasker, Quadrants, ReductionConfig, ReductionPipeline,
    Residue, ResiduePair, ScaleFactors,
};
use std::time::Instant;
use strum_macros::Display;

#[derive(thiserror::Error, Debug)]
pub enum CentreFinderError {
    #[error("invalid reduction configuration")]
    Config(#[from] ConfigError),
    #[error("trial beam centre {0} is not finite")]
    NonFiniteTrial(Position),
    #[error("failed to move the detector component `{component}`")]
    Move {
        component: String,
        #[source]
        source: CollaboratorError,
    },
    #[error("failed to reduce the {run} run")]
    Pipeline {
        run: Run,
        #[source]
        source: CollaboratorError,
    },
    #[error("failed to build the quadrant profiles")]
    Partition(#[from] PartitionError),
}
type Result<T> = std::result::Result<T, CentreFinderError>;

/// Progress of a centre finding trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TrialStage {
    Idle,
    Moved,
    Partitioned,
    BackgroundCombined,
    Cleaned,
    Residued,
}

/// The reduction machinery a [CentreFinder] drives
pub struct Reduction<P, M, C, S = StripEndNans> {
    pub pipeline: P,
    pub masker: M,
    pub converter: C,
    pub cleaner: S,
}
impl<P, M, C> Reduction<P, M, C> {
    pub fn new(pipeline: P, masker: M, converter: C) -> Self {
        Self {
            pipeline,
            masker,
            converter,
            cleaner: StripEndNans,
        }
    }
}
impl<P, M, C, S> Reduction<P, M, C, S> {
    pub fn cleaner<T: SpectrumCleaner>(self, cleaner: T) -> Reduction<P, M, C, T> {
        Reduction {
            pipeline: self.pipeline,
            masker: self.masker,
            converter: self.converter,
            cleaner,
        }
    }
}

/// Beam centre finder
///
/// Each call to [CentreFinder::seek_centre] moves the detector to a trial
/// beam centre, splits the reduced data into the Left, Right, Up and Down
/// quadrants and returns the asymmetry of opposite quadrants.
/// Trials must be run one at a time.
#[derive(Debug, Clone)]
pub struct CentreFinder {
    position: Position,
    scale_factors: ScaleFactors,
    quadrants: Option<Quadrants<Profile>>,
}
impl CentreFinder {
    /// Creates a finder for data whose detector is positioned at `guess`
    pub fn new<T: Into<Position>>(guess: T, config: &ReductionConfig) -> Self {
        Self {
            position: guess.into(),
            scale_factors: config.scale_factors,
            quadrants: None,
        }
    }
    /// Beam centre of the last successful trial
    pub fn position(&self) -> Position {
        self.position
    }
    /// Scale factors of the last successful trial, or of the configuration
    /// the finder was created with
    pub fn scale_factors(&self) -> ScaleFactors {
        self.scale_factors
    }
    /// Quadrant profiles of the last successful trial
    pub fn quadrants(&self) -> Option<&Quadrants<Profile>> {
        self.quadrants.as_ref()
    }
    /// Evaluates the residues at the `trial` beam centre
    ///
    /// The finder position is updated to `trial` only if the trial succeeds;
    /// on failure, the detector is moved back to the previous position.
    pub fn seek_centre<P, M, C, S, T>(
        &mut self,
        reduction: &mut Reduction<P, M, C, S>,
        config: &ReductionConfig,
        trial: T,
    ) -> Result<ResiduePair>
    where
        P: ReductionPipeline,
        M: QuadrantMasker<P::Image>,
        C: QConverter<P::Image>,
        S: SpectrumCleaner,
        T: Into<Position>,
    {
        let trial = trial.into();
        config.validate()?;
        if !trial.is_finite() {
            return Err(CentreFinderError::NonFiniteTrial(trial));
        }
        log::info!("Seeking beam centre at {trial}...");
        let now = Instant::now();

        let mut stage = TrialStage::Idle;
        let d = trial - self.position;
        let (sample, background) = reduction.pipeline.handles_mut();
        move_detector(sample, background, &config.detector, d.x, d.y).map_err(|source| {
            CentreFinderError::Move {
                component: config.detector.clone(),
                source,
            }
        })?;

        set_stage(&mut stage, TrialStage::Moved);
        match Self::evaluate(reduction, config, &mut stage) {
            Ok((residues, quadrants)) => {
                self.position = trial;
                self.scale_factors = config.scale_factors;
                self.quadrants = Some(quadrants);
                set_stage(&mut stage, TrialStage::Idle);
                log::info!(
                    "... residues: X={}, Y={} in {}ms",
                    residues.x,
                    residues.y,
                    now.elapsed().as_millis()
                );
                Ok(residues)
            }
            Err(e) => {
                log::warn!("trial at {trial} aborted after the {stage} stage: {e}");
                let (sample, background) = reduction.pipeline.handles_mut();
                if let Err(e) = move_detector(sample, background, &config.detector, -d.x, -d.y) {
                    log::error!("failed to move the detector back to {}: {e}", self.position);
                }
                Err(e)
            }
        }
    }
    fn evaluate<P, M, C, S>(
        reduction: &mut Reduction<P, M, C, S>,
        config: &ReductionConfig,
        stage: &mut TrialStage,
    ) -> Result<(ResiduePair, Quadrants<Profile>)>
    where
        P: ReductionPipeline,
        M: QuadrantMasker<P::Image>,
        C: QConverter<P::Image>,
        S: SpectrumCleaner,
    {
        let trial_config = config.for_centre_finding();
        let Reduction {
            pipeline,
            masker,
            converter,
            cleaner,
        } = reduction;

        let image = pipeline
            .preprocess_and_reduce_to_pre_q(Run::Sample, &trial_config)
            .map_err(|source| CentreFinderError::Pipeline {
                run: Run::Sample,
                source,
            })?;
        let mut quadrants =
            partition_quadrants(&image, Run::Sample, &trial_config, masker, converter)?;
        drop(image);
        set_stage(stage, TrialStage::Partitioned);

        if pipeline.has_background() {
            let image = pipeline
                .preprocess_and_reduce_to_pre_q(Run::Background, &trial_config)
                .map_err(|source| CentreFinderError::Pipeline {
                    run: Run::Background,
                    source,
                })?;
            let background =
                partition_quadrants(&image, Run::Background, &trial_config, masker, converter)?;
            quadrants = subtract_background(quadrants, background)?;
            set_stage(stage, TrialStage::BackgroundCombined);
        }

        quadrants
            .iter_mut()
            .for_each(|(_, profile)| cleaner.strip_special_and_trim(profile));
        set_stage(stage, TrialStage::Cleaned);

        let direction = config.find_direction;
        let residues = ResiduePair {
            x: if direction.searches_x() {
                residue_labelled("LR", &quadrants.left, &quadrants.right)
            } else {
                Residue::default()
            },
            y: if direction.searches_y() {
                residue_labelled("UD", &quadrants.up, &quadrants.down)
            } else {
                Residue::default()
            },
        };
        if direction.searches_x() && residues.x.is_degenerate() {
            log::warn!("Left and Right quadrants have no common Q bin");
        }
        if direction.searches_y() && residues.y.is_degenerate() {
            log::warn!("Up and Down quadrants have no common Q bin");
        }
        set_stage(stage, TrialStage::Residued);
        Ok((residues, quadrants))
    }
    /// One line summary of an iteration with the scaled beam centre
    pub fn status_str(&self, iteration: usize, residue_x: f64, residue_y: f64) -> String {
        format!(
            "Itr {}:  ({},{})  SX={}  SY={}",
            iteration,
            fixed_width(self.scale_factors.x * self.position.x, 9),
            fixed_width(self.scale_factors.y * self.position.y, 9),
            fixed_width(residue_x, 6),
            fixed_width(residue_y, 6)
        )
    }
}

fn set_stage(stage: &mut TrialStage, next: TrialStage) {
    log::debug!("{stage} -> {next}");
    *stage = next;
}

/// Formats `value` padded or truncated to exactly `width` characters
fn fixed_width(value: f64, width: usize) -> String {
    format!("{:<1$.1$}", format!("{value:?}"), width)
}
