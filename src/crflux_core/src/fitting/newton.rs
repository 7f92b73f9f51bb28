use crate::errors::{CrfluxResult, Error};

/// Solve root using the Newton-Raphson method.
///
/// This accepts a two functions, the first being a single input function for which
/// the root is desired. The second function being the derivative of the first with
/// respect to the input variable.
///
/// ```
///     use crflux_core::fitting::newton_raphson;
///     let f = |x| { 1.0 * x * x - 1.0 };
///     let d = |x| { 2.0 * x };
///     let root = newton_raphson(f, d, 0.0, 1e-10).unwrap();
///     assert!((root - 1.0).abs() < 1e-12);
/// ```
///
#[inline(always)]
pub fn newton_raphson<Func, Der>(func: Func, der: Der, start: f64, atol: f64) -> CrfluxResult<f64>
where
    Func: Fn(f64) -> f64,
    Der: Fn(f64) -> f64,
{
    let mut x = start;

    // if the starting position has derivative of 0, nudge it a bit.
    if der(x).abs() < 1e-12 {
        x += 0.1;
    }

    let mut f_eval: f64;
    let mut d_eval: f64;
    for _ in 0..100 {
        f_eval = func(x);
        if f_eval.abs() < atol {
            return Ok(x);
        }
        d_eval = der(x);

        // Derivative is 0, cannot solve
        if d_eval.abs() < 1e-12 {
            Err(Error::Convergence(
                "Newton-Raphson root finding failed to converge due to zero derivative.".into(),
            ))?;
        }

        if !d_eval.is_finite() || !f_eval.is_finite() {
            Err(Error::Convergence(
                "Newton-Raphson root finding failed to converge due to non-finite evaluations"
                    .into(),
            ))?;
        }

        x -= f_eval / d_eval;
    }
    Err(Error::Convergence(
        "Newton-Raphson root finding hit iteration limit without converging.".into(),
    ))?
}

/// Newton-Raphson where the derivative is taken by a central finite difference.
///
/// Used where the function is a difference of two tabulated or closed form fluxes and
/// an analytic derivative is not worth deriving. `step` is the half width of the
/// difference stencil.
///
/// ```
///     use crflux_core::fitting::newton_raphson_numeric;
///     let root = newton_raphson_numeric(|x: f64| x.exp() - 2.0, 0.0, 1e-6, 1e-12).unwrap();
///     assert!((root - 2f64.ln()).abs() < 1e-10);
/// ```
pub fn newton_raphson_numeric<Func>(func: Func, start: f64, step: f64, atol: f64) -> CrfluxResult<f64>
where
    Func: Fn(f64) -> f64,
{
    if step <= 0.0 || !step.is_finite() {
        return Err(Error::ValueError(
            "Finite difference step must be positive.".into(),
        ));
    }
    let der = |x: f64| (func(x + step) - func(x - step)) / (2.0 * step);
    newton_raphson(&func, der, start, atol)
}

#[cfg(test)]
mod tests {
    use crate::fitting::{newton_raphson, newton_raphson_numeric};

    #[test]
    fn test_newton_raphson() {
        let f = |x| 1.0 * x * x - 1.0;
        let d = |x| 2.0 * x;

        let root = newton_raphson(f, d, 0.0, 1e-10).unwrap();
        assert!((root - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_newton_no_root() {
        let f = |x: f64| x * x + 1.0;
        let d = |x: f64| 2.0 * x;
        assert!(newton_raphson(f, d, 3.0, 1e-10).is_err());
    }

    #[test]
    fn test_numeric_log_crossing() {
        // two power laws crossing at x = log10(E) = 2
        let f = |x: f64| (-2.7 * x) - (-2.5 * x - 0.4);
        let root = newton_raphson_numeric(f, 3.1, 1e-4, 1e-12).unwrap();
        assert!((root - 2.0).abs() < 1e-9);
        assert!(newton_raphson_numeric(f, 3.1, 0.0, 1e-12).is_err());
    }
}
