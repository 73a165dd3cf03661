//! Elementary statistics over value slices.
//!
//! Missing values (the NaN sentinel) are skipped by the aggregators here;
//! how gaps propagate through derived series is decided in `metrics`.

/// Mean over finite values. `None` when no finite value exists.
pub fn mean(values: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            n += 1;
        }
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sample standard deviation (n-1 denominator) over finite values.
///
/// `None` with fewer than 2 finite values. The n-1 convention is used by
/// every caller in this crate so z-scores stay comparable across series.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let mut acc = 0.0;
    let mut n = 0usize;
    for &v in values {
        if v.is_finite() {
            acc += (v - m) * (v - m);
            n += 1;
        }
    }
    if n < 2 {
        return None;
    }
    Some((acc / (n - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing() {
        let values = [1.0, f64::NAN, 3.0];
        assert!((mean(&values).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mean_of_all_missing_is_none() {
        assert!(mean(&[f64::NAN, f64::NAN]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn stddev_known_values() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: sample variance = 32/7.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_stddev(&values).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stddev_constant_series_is_zero() {
        let sd = sample_stddev(&[5.0, 5.0, 5.0]).unwrap();
        assert!(sd.abs() < 1e-12);
    }

    #[test]
    fn stddev_needs_two_finite_points() {
        assert!(sample_stddev(&[1.0]).is_none());
        assert!(sample_stddev(&[1.0, f64::NAN]).is_none());
    }
}
