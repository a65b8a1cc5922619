use fitsweep_core::{ErrorInfo, SweepError, SweepParameter};

/// Generates `count` values log-uniformly spaced between `10^low` and
/// `10^high`, both endpoints included.
///
/// The exponents are laid out linearly as `low + i * step` with the final
/// exponent pinned to `high`, so the first and last values are exactly
/// `10^low` and `10^high`. A single point yields `[10^low]`.
pub fn log_space(low: f64, high: f64, count: usize) -> Result<Vec<SweepParameter>, SweepError> {
    validate_bounds(low, high, count)?;
    if count == 1 {
        return Ok(vec![SweepParameter::new(pow10(low))]);
    }
    let step = (high - low) / (count - 1) as f64;
    let values = (0..count)
        .map(|idx| {
            let exponent = if idx + 1 == count {
                high
            } else {
                low + idx as f64 * step
            };
            SweepParameter::new(pow10(exponent))
        })
        .collect();
    Ok(values)
}

/// `10^exponent`. Integral exponents up to 22 (where `10^k` is exact) use
/// `powi`, so decade endpoints come out as the nearest double (`0.01`, not
/// `0.010000000000000002`).
pub(crate) fn pow10(exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= 22.0 {
        10f64.powi(exponent as i32)
    } else {
        10f64.powf(exponent)
    }
}

fn validate_bounds(low: f64, high: f64, count: usize) -> Result<(), SweepError> {
    if count == 0 {
        return Err(SweepError::Plan(
            ErrorInfo::new("plan-points", "a sweep needs at least one point")
                .with_context("points", "0"),
        ));
    }
    if !low.is_finite() || !high.is_finite() {
        return Err(SweepError::Plan(
            ErrorInfo::new("plan-bounds", "sweep exponents must be finite")
                .with_context("low", low.to_string())
                .with_context("high", high.to_string()),
        ));
    }
    if low > high {
        return Err(SweepError::Plan(
            ErrorInfo::new("plan-bounds", "low exponent exceeds high exponent")
                .with_context("low", low.to_string())
                .with_context("high", high.to_string())
                .with_hint("swap low_exponent and high_exponent"),
        ));
    }
    if pow10(low) <= 0.0 || !pow10(high).is_finite() {
        return Err(SweepError::Plan(
            ErrorInfo::new("plan-bounds", "sweep values underflow to zero or overflow")
                .with_context("low", low.to_string())
                .with_context("high", high.to_string())
                .with_hint("keep exponents within about -307..=308"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_domain_endpoints() {
        let values = log_space(-2.0, 4.0, 20).expect("grid");
        assert_eq!(values.len(), 20);
        assert_eq!(values[0].value(), 0.01);
        assert_eq!(values[19].value(), 10_000.0);
    }

    #[test]
    fn integral_exponents_are_exact() {
        assert_eq!(pow10(-3.0), 0.001);
        assert_eq!(pow10(0.0), 1.0);
        assert_eq!(pow10(22.0), 1e22);
        assert_eq!(pow10(0.5), 10f64.powf(0.5));
    }

    #[test]
    fn rejects_empty_and_inverted() {
        assert_eq!(log_space(0.0, 1.0, 0).unwrap_err().code(), "plan-points");
        assert_eq!(log_space(2.0, 1.0, 3).unwrap_err().code(), "plan-bounds");
        assert_eq!(log_space(f64::NAN, 1.0, 3).unwrap_err().code(), "plan-bounds");
        assert_eq!(log_space(-400.0, -399.0, 3).unwrap_err().code(), "plan-bounds");
        assert_eq!(log_space(300.0, 400.0, 3).unwrap_err().code(), "plan-bounds");
        let edge = log_space(-300.0, 300.0, 5).expect("wide grid");
        assert!(edge.iter().all(|p| p.value() > 0.0 && p.value().is_finite()));
    }
}
