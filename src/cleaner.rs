use crate::Profile;

/// Spectrum cleaning applied to each quadrant profile before publication
pub trait SpectrumCleaner {
    fn strip_special_and_trim(&self, profile: &mut Profile);
}

/// Zeroes the non-finite values and trims the all-zero bins at both ends
///
/// Interior zeros are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct StripEndNans;
impl SpectrumCleaner for StripEndNans {
    fn strip_special_and_trim(&self, profile: &mut Profile) {
        profile.values_mut().for_each(|(i, e)| {
            if !i.is_finite() {
                *i = 0f64;
            }
            if !e.is_finite() {
                *e = 0f64;
            }
        });
        let is_zero = |i: &f64| *i == 0f64;
        let intensity = profile.intensity();
        let start = intensity
            .iter()
            .position(|i| !is_zero(i))
            .unwrap_or(intensity.len());
        let end = intensity
            .iter()
            .rposition(|i| !is_zero(i))
            .map_or(start, |k| k + 1);
        log::trace!(
            "trimming {} leading and {} trailing bins",
            start,
            intensity.len() - end
        );
        profile.retain_bins(start..end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(q: Vec<f64>, i: Vec<f64>, e: Vec<f64>) -> Profile {
        let mut profile = Profile::new(q, i, e).unwrap();
        StripEndNans.strip_special_and_trim(&mut profile);
        profile
    }

    #[test]
    fn special_values() {
        let profile = clean(
            vec![1., 2., 3., 4.],
            vec![1., f64::NAN, f64::INFINITY, 2.],
            vec![0.1, f64::NEG_INFINITY, 0.1, f64::NAN],
        );
        assert_eq!(profile.intensity(), &[1., 0., 0., 2.]);
        assert_eq!(profile.error(), &[0.1, 0., 0.1, 0.]);
    }

    #[test]
    fn trim_ends_only() {
        let profile = clean(
            vec![1., 2., 3., 4., 5., 6., 7.],
            vec![f64::NAN, 0., 3., 0., 4., 0., f64::INFINITY],
            vec![0.; 7],
        );
        assert_eq!(profile.q(), &[3., 4., 5.]);
        assert_eq!(profile.intensity(), &[3., 0., 4.]);
    }

    #[test]
    fn all_zero() {
        let profile = clean(vec![1., 2., 3.], vec![0., f64::NAN, 0.], vec![1.; 3]);
        assert!(profile.is_empty());
        assert!(profile.error().is_empty());
    }

    #[test]
    fn untouched() {
        let profile = clean(vec![1., 2.], vec![1., 2.], vec![0.5; 2]);
        assert_eq!(profile.intensity(), &[1., 2.]);
    }
}
