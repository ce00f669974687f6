use crate::{
    collaborators::Run, error::CollaboratorError, Profile, ProfileError, QConverter, Quadrant,
    QuadrantMasker, QuadrantSector, Quadrants, ReductionConfig,
};

#[derive(thiserror::Error, Debug)]
pub enum PartitionError {
    #[error("failed to mask the {run} image for the {quadrant} quadrant")]
    Mask {
        run: Run,
        quadrant: Quadrant,
        #[source]
        source: CollaboratorError,
    },
    #[error("failed to convert the {run} {quadrant} quadrant to Q")]
    QConversion {
        run: Run,
        quadrant: Quadrant,
        #[source]
        source: CollaboratorError,
    },
    #[error("failed to subtract the background from the {quadrant} quadrant")]
    Subtraction {
        quadrant: Quadrant,
        #[source]
        source: ProfileError,
    },
}
type Result<T> = std::result::Result<T, PartitionError>;

/// Masks a copy of `image` to the quadrant sector and reduces it to a Q profile
///
/// The sector is centred at the local origin, the detector having already
/// been moved to the trial beam centre.
pub fn partition<I, M, C>(
    image: &I,
    run: Run,
    quadrant: Quadrant,
    config: &ReductionConfig,
    masker: &M,
    converter: &C,
) -> Result<Profile>
where
    I: Clone,
    M: QuadrantMasker<I>,
    C: QConverter<I>,
{
    let sector = QuadrantSector::new(quadrant, config.radius_min, config.radius_max);
    let mut masked = image.clone();
    masker
        .build_quadrant_mask(&sector)
        .and_then(|shape| masker.apply_mask(&mut masked, &shape))
        .map_err(|source| PartitionError::Mask {
            run,
            quadrant,
            source,
        })?;
    let profile = converter
        .to_q(&masked, config)
        .map_err(|source| PartitionError::QConversion {
            run,
            quadrant,
            source,
        })?;
    log::debug!("{run} {quadrant} quadrant: {} bins", profile.len());
    Ok(profile)
}

/// Partitions `image` into the four quadrant profiles
pub fn partition_quadrants<I, M, C>(
    image: &I,
    run: Run,
    config: &ReductionConfig,
    masker: &M,
    converter: &C,
) -> Result<Quadrants<Profile>>
where
    I: Clone,
    M: QuadrantMasker<I>,
    C: QConverter<I>,
{
    Quadrants::try_from_fn(|quadrant| partition(image, run, quadrant, config, masker, converter))
}

/// Subtracts the background quadrant profiles from the sample ones
///
/// The background profiles are consumed.
pub fn subtract_background(
    sample: Quadrants<Profile>,
    background: Quadrants<Profile>,
) -> Result<Quadrants<Profile>> {
    sample
        .zip(background)
        .map(|quadrant, (sample, background)| {
            (&sample - &background)
                .map_err(|source| PartitionError::Subtraction { quadrant, source })
        })
        .transpose()
}
