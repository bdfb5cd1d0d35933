use special::Gamma as _;

/// Natural logarithm of binomial coefficent, ln nCk
///
/// # Example
///
/// ```rust
/// use proportions::misc::ln_binom;
///
/// assert!((ln_binom(4.0, 2.0) - 6.0_f64.ln()).abs() < 1E-12);
/// ```
pub fn ln_binom(n: f64, k: f64) -> f64 {
    (n + 1.0).ln_gamma().0
        - (k + 1.0).ln_gamma().0
        - (n - k + 1.0).ln_gamma().0
}

/// Safely compute `log(sum(exp(xs))`
///
/// An empty slice sums to zero, so its log is `-∞`.
///
/// # Example
///
/// ```rust
/// use proportions::misc::logsumexp;
///
/// let ln_ps = [0.2_f64.ln(), 0.3_f64.ln(), 0.5_f64.ln()];
/// assert!(logsumexp(&ln_ps).abs() < 1E-12);
/// assert_eq!(logsumexp(&[]), f64::NEG_INFINITY);
/// ```
pub fn logsumexp(xs: &[f64]) -> f64 {
    match xs {
        [] => f64::NEG_INFINITY,
        [x] => *x,
        _ => {
            let maxval = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if maxval == f64::NEG_INFINITY {
                return maxval;
            }
            xs.iter().fold(0.0, |acc, x| acc + (x - maxval).exp()).ln()
                + maxval
        }
    }
}

/// Clamp `x` to `[lower, upper]`
#[inline]
pub(crate) fn clip(x: f64, lower: f64, upper: f64) -> f64 {
    x.max(lower).min(upper)
}
