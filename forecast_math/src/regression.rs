//! Ordinary least squares regression
//!
//! A thin layer over `linregress` exposing what the unit-root test needs:
//! coefficients with standard errors, t statistics and information
//! criteria. The intercept is always included and sits in column 0.

use crate::descriptive::is_constant;
use crate::{ensure_finite, MathError, Result};
use linregress::{FormulaRegressionBuilder, RegressionDataBuilder};

/// A fitted least squares regression
#[derive(Debug, Clone)]
pub struct OlsFit {
    coefficients: Vec<f64>,
    std_errors: Vec<f64>,
    ssr: f64,
    nobs: usize,
}

impl OlsFit {
    /// Fit `y` on an intercept plus the given regressor rows.
    ///
    /// Every row of `x` holds one observation and must have the same width.
    /// Coefficient 0 is the intercept, coefficient `j + 1` belongs to
    /// regressor column `j`.
    pub fn fit_with_intercept(x: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        let nobs = y.len();
        if x.len() != nobs {
            return Err(MathError::InvalidInput(format!(
                "Regressor rows ({}) don't match observations ({})",
                x.len(),
                nobs
            )));
        }

        let width = x.first().map(|row| row.len()).unwrap_or(0);
        if width == 0 {
            return Err(MathError::InvalidInput(
                "Regression needs at least one regressor".to_string(),
            ));
        }
        if x.iter().any(|row| row.len() != width) {
            return Err(MathError::InvalidInput(
                "Regressor rows have different widths".to_string(),
            ));
        }

        let k = width + 1;
        if nobs <= k {
            return Err(MathError::InsufficientData(format!(
                "Need more than {} observations for {} coefficients, got {}",
                k, k, nobs
            )));
        }

        ensure_finite(y, "Regression response")?;
        for row in x {
            ensure_finite(row, "Regressor row")?;
        }

        let mut columns = Vec::with_capacity(k);
        columns.push(("y".to_string(), y.to_vec()));
        for j in 0..width {
            let column: Vec<f64> = x.iter().map(|row| row[j]).collect();
            // A constant regressor duplicates the intercept
            if is_constant(&column, 0.0) {
                return Err(MathError::SingularMatrix(format!(
                    "Regressor column {} is constant",
                    j
                )));
            }
            columns.push((format!("x{}", j), column));
        }

        let formula = format!(
            "y ~ {}",
            (0..width)
                .map(|j| format!("x{}", j))
                .collect::<Vec<_>>()
                .join(" + ")
        );

        let data = RegressionDataBuilder::new()
            .build_from(columns)
            .map_err(|e| {
                MathError::CalculationError(format!("Invalid regression data: {}", e))
            })?;

        let model = FormulaRegressionBuilder::new()
            .data(&data)
            .formula(formula)
            .fit()
            .map_err(|e| MathError::CalculationError(format!("Regression fit failed: {}", e)))?;

        let coefficients = model.parameters().to_vec();
        let std_errors = model.se().to_vec();
        if coefficients.len() != k || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MathError::SingularMatrix(
                "Regression coefficients are not identified".to_string(),
            ));
        }

        Ok(Self {
            coefficients,
            std_errors,
            ssr: model.ssr(),
            nobs,
        })
    }

    /// Estimated coefficients, intercept first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Standard errors of the coefficients
    pub fn std_errors(&self) -> &[f64] {
        &self.std_errors
    }

    /// Sum of squared residuals
    pub fn ssr(&self) -> f64 {
        self.ssr
    }

    /// Number of observations used in the fit
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// t statistic of coefficient `index` (0 is the intercept)
    pub fn t_statistic(&self, index: usize) -> Result<f64> {
        let coef = self.coefficients.get(index).ok_or_else(|| {
            MathError::InvalidInput(format!("No coefficient at index {}", index))
        })?;
        let se = self.std_errors.get(index).copied().unwrap_or(f64::NAN);

        if !se.is_finite() || se <= f64::EPSILON {
            return Err(MathError::CalculationError(
                "Standard error is zero, t statistic undefined".to_string(),
            ));
        }

        Ok(coef / se)
    }

    /// Gaussian log-likelihood evaluated at the least squares estimate
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, `-2 llf + 2 k`
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.coefficients.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_recovers_line() {
        // y = 1 + 2x with a small alternating disturbance
        let x: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..8)
            .map(|i| 1.0 + 2.0 * i as f64 + if i % 2 == 0 { 0.001 } else { -0.001 })
            .collect();

        let fit = OlsFit::fit_with_intercept(&x, &y).unwrap();
        assert_approx_eq!(fit.coefficients()[0], 1.0, 1e-2);
        assert_approx_eq!(fit.coefficients()[1], 2.0, 1e-2);
        assert!(fit.ssr() < 1e-4);
        assert_eq!(fit.nobs(), 8);
    }

    #[test]
    fn test_standard_errors_and_t_statistic() {
        let x: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64]).collect();
        let y = vec![1.0, 3.0, 2.0, 5.0, 4.0];

        let fit = OlsFit::fit_with_intercept(&x, &y).unwrap();
        // slope = 0.8, intercept = 1.4
        assert_approx_eq!(fit.coefficients()[0], 1.4, 1e-9);
        assert_approx_eq!(fit.coefficients()[1], 0.8, 1e-9);

        // ssr = 3.6, sigma2 = 1.2, var(slope) = 1.2 / 10
        assert_approx_eq!(fit.ssr(), 3.6, 1e-9);
        assert_approx_eq!(fit.std_errors()[1], (0.12_f64).sqrt(), 1e-9);
        assert_approx_eq!(fit.t_statistic(1).unwrap(), 0.8 / 0.12_f64.sqrt(), 1e-9);
        assert!(fit.aic().is_finite());
        assert!(fit.t_statistic(2).is_err());
    }

    #[test]
    fn test_two_regressors() {
        // y = 0.5 + 1.5 a - 2 b plus a small alternating disturbance
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![i as f64, ((i * 7) % 5) as f64])
            .collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let noise = if i % 2 == 0 { 0.01 } else { -0.01 };
                0.5 + 1.5 * row[0] - 2.0 * row[1] + noise
            })
            .collect();

        let fit = OlsFit::fit_with_intercept(&x, &y).unwrap();
        assert_eq!(fit.coefficients().len(), 3);
        assert_approx_eq!(fit.coefficients()[1], 1.5, 1e-2);
        assert_approx_eq!(fit.coefficients()[2], -2.0, 1e-2);
        assert!(fit.ssr() > 0.0);
    }

    #[test]
    fn test_constant_regressor_is_singular() {
        let x: Vec<Vec<f64>> = (0..5).map(|_| vec![1.0]).collect();
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let err = OlsFit::fit_with_intercept(&x, &y).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix(_)));
    }

    #[test]
    fn test_too_few_observations() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![1.0, 2.0];
        assert!(matches!(
            OlsFit::fit_with_intercept(&x, &y),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let x: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64]).collect();
        let y = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        assert!(matches!(
            OlsFit::fit_with_intercept(&x, &y),
            Err(MathError::InvalidInput(_))
        ));
    }
}
