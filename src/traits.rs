//! Trait definitions

/// A distribution with a density (or mass) function
pub trait HasDensity<X> {
    /// Probability function
    ///
    /// # Example
    ///
    /// ```
    /// use proportions::dist::Gaussian;
    /// use proportions::traits::HasDensity;
    ///
    /// let g = Gaussian::standard();
    /// assert!(g.f(&0.0_f64) > g.f(&0.1_f64));
    /// assert!(g.f(&0.0_f64) > g.f(&-0.1_f64));
    /// ```
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log of the probability function
    fn ln_f(&self, x: &X) -> f64;
}

/// Identifies the support of the distribution
pub trait Support<X> {
    /// Returns `true` if `x` is in the support of the distribution
    ///
    /// # Example
    ///
    /// ```
    /// use proportions::dist::Hypergeometric;
    /// use proportions::traits::Support;
    ///
    /// // 20 items, 7 marked, draw 12: at least 0 and at most 7 marked
    /// let hg = Hypergeometric::new(20, 7, 12).unwrap();
    /// assert!(hg.supports(&0_u64));
    /// assert!(hg.supports(&7_u64));
    /// assert!(!hg.supports(&8_u64));
    /// ```
    fn supports(&self, x: &X) -> bool;
}

/// Has a cumulative distribution function (CDF)
pub trait Cdf<X>: HasDensity<X> {
    /// The value of the Cumulative Density Function at `x`
    fn cdf(&self, x: &X) -> f64;

    /// Survival function, `1 - CDF(x)`
    fn sf(&self, x: &X) -> f64 {
        1.0 - self.cdf(x)
    }
}

/// Has an inverse-CDF / quantile function
pub trait InverseCdf<X>: HasDensity<X> {
    /// The value of the `x` at the given probability in the CDF
    fn invcdf(&self, p: f64) -> X;

    /// Alias for `invcdf`
    fn quantile(&self, p: f64) -> X {
        self.invcdf(p)
    }
}
