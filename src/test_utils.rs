//! Synthetic detector and reduction doubles for the unit tests

use crate::{
    collaborators::{CollaboratorResult, Run},
    DetectorMover, Profile, QConverter, QuadrantMasker, QuadrantSector, ReductionConfig,
    ReductionPipeline,
};
use std::f64::consts::PI;

/// Pixel size, a power of 2 so that pixel coordinates are exact
pub(crate) const PIXEL: f64 = 1. / 256.;
const N_PIXEL: usize = 64;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Square pixelated detector
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetectorImage {
    /// detector translation
    pub position: (f64, f64),
    counts: Vec<f64>,
    masked: Vec<bool>,
}
impl DetectorImage {
    /// Detector with counts given by `f(x,y)` in the detector frame
    pub fn from_fn<F: Fn(f64, f64) -> f64>(f: F) -> Self {
        let counts = (0..N_PIXEL * N_PIXEL)
            .map(|k| {
                let (x, y) = Self::local(k);
                f(x, y)
            })
            .collect();
        Self {
            position: (0., 0.),
            counts,
            masked: vec![false; N_PIXEL * N_PIXEL],
        }
    }
    fn local(k: usize) -> (f64, f64) {
        let half = 0.5 * (N_PIXEL - 1) as f64;
        let (i, j) = (k % N_PIXEL, k / N_PIXEL);
        ((i as f64 - half) * PIXEL, (j as f64 - half) * PIXEL)
    }
    /// Unmasked pixels lab coordinates and counts
    pub fn pixels(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.counts
            .iter()
            .zip(&self.masked)
            .enumerate()
            .filter(|&(_, (_, &m))| !m)
            .map(|(k, (&c, _))| {
                let (x, y) = Self::local(k);
                (x + self.position.0, y + self.position.1, c)
            })
    }
}
impl DetectorMover for DetectorImage {
    fn move_component(&mut self, component: &str, dx: f64, dy: f64) -> CollaboratorResult<()> {
        if component != ReductionConfig::default().detector {
            return Err(format!("no component named {component}").into());
        }
        self.position.0 += dx;
        self.position.1 += dy;
        Ok(())
    }
}

/// Ring pattern centred at `centre` in the detector frame
pub(crate) fn ring_detector(centre: (f64, f64), scale: f64) -> DetectorImage {
    DetectorImage::from_fn(|x, y| {
        let r = (x - centre.0).hypot(y - centre.1);
        scale * ((-((r - 0.05) / 0.01).powi(2)).exp() + 0.1 / (1. + (r / 0.02).powi(2)))
    })
}

/// Sample and optional background measurements
#[derive(Debug, Clone)]
pub(crate) struct SyntheticReduction {
    pub sample: DetectorImage,
    pub background: Option<DetectorImage>,
    pub fail: Option<Run>,
    /// configurations the pipeline was called with
    pub calls: Vec<(Run, ReductionConfig)>,
}
impl SyntheticReduction {
    /// Measurements with the detectors moved so that `guess` is on the beam axis
    pub fn new(
        mut sample: DetectorImage,
        mut background: Option<DetectorImage>,
        guess: (f64, f64),
    ) -> Self {
        sample.position = (-guess.0, -guess.1);
        if let Some(background) = background.as_mut() {
            background.position = (-guess.0, -guess.1);
        }
        Self {
            sample,
            background,
            fail: None,
            calls: vec![],
        }
    }
}
impl ReductionPipeline for SyntheticReduction {
    type Image = DetectorImage;
    type Handle = DetectorImage;

    fn handles_mut(&mut self) -> (&mut Self::Handle, Option<&mut Self::Handle>) {
        (&mut self.sample, self.background.as_mut())
    }
    fn has_background(&self) -> bool {
        self.background.is_some()
    }
    fn preprocess_and_reduce_to_pre_q(
        &mut self,
        run: Run,
        config: &ReductionConfig,
    ) -> CollaboratorResult<Self::Image> {
        self.calls.push((run, config.clone()));
        if self.fail == Some(run) {
            return Err(format!("{run} reduction failed").into());
        }
        match run {
            Run::Sample => Ok(self.sample.clone()),
            Run::Background => self
                .background
                .clone()
                .ok_or_else(|| "no background run".into()),
        }
    }
}

/// Masks the pixels outside a quadrant sector
pub(crate) struct SectorMasker;
impl QuadrantMasker<DetectorImage> for SectorMasker {
    type Shape = QuadrantSector;

    fn build_quadrant_mask(&self, sector: &QuadrantSector) -> CollaboratorResult<Self::Shape> {
        Ok(*sector)
    }
    fn apply_mask(&self, image: &mut DetectorImage, shape: &Self::Shape) -> CollaboratorResult<()> {
        let position = image.position;
        let mut n_unmasked = 0usize;
        for (k, masked) in image.masked.iter_mut().enumerate() {
            let (x, y) = DetectorImage::local(k);
            if !shape.contains(x + position.0, y + position.1) {
                *masked = true;
            }
            if !*masked {
                n_unmasked += 1;
            }
        }
        if n_unmasked == 0 {
            return Err(format!("{} quadrant mask covers no pixel", shape.quadrant).into());
        }
        Ok(())
    }
}

/// Radial averaging into fixed Q bins, empty bins are NaN
pub(crate) struct ToQ {
    /// neutron wavelength [m]
    pub wavelength: f64,
    /// sample to detector distance [m]
    pub distance: f64,
    pub bin_width: f64,
    pub n_bin: usize,
}
impl Default for ToQ {
    fn default() -> Self {
        Self {
            wavelength: 6e-10,
            distance: 4.,
            bin_width: 0.005,
            n_bin: 25,
        }
    }
}
impl ToQ {
    fn q(&self, radius: f64) -> f64 {
        4. * PI * (0.5 * (radius / self.distance).atan()).sin() / self.wavelength
    }
}
impl QConverter<DetectorImage> for ToQ {
    fn to_q(&self, image: &DetectorImage, _config: &ReductionConfig) -> CollaboratorResult<Profile> {
        let mut sums = vec![(0f64, 0usize); self.n_bin];
        for (x, y, c) in image.pixels() {
            let k = (x.hypot(y) / self.bin_width) as usize;
            if let Some((s, n)) = sums.get_mut(k) {
                *s += c;
                *n += 1;
            }
        }
        let q = (0..self.n_bin)
            .map(|k| self.q((k as f64 + 0.5) * self.bin_width))
            .collect();
        let (intensity, error) = sums
            .into_iter()
            .map(|(s, n)| {
                let n = n as f64;
                (s / n, s.abs().sqrt() / n)
            })
            .unzip();
        Ok(Profile::new(q, intensity, error)?)
    }
}
