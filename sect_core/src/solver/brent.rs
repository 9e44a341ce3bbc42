//! # Brent Root Finder
//!
//! Classic bracketed Brent's method (inverse quadratic interpolation with
//! secant and bisection fallbacks) with an absolute tolerance on the
//! abscissa. The bracket endpoints must straddle a sign change; an exact
//! zero at an endpoint is returned immediately.

use serde::{Deserialize, Serialize};

/// A closed search interval [lo, hi].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub lo: f64,
    pub hi: f64,
}

impl Bracket {
    pub fn new(lo: f64, hi: f64) -> Self {
        Bracket { lo, hi }
    }

    /// Clamp this bracket to lie inside `outer`.
    pub fn clamp_to(&self, outer: &Bracket) -> Bracket {
        Bracket {
            lo: self.lo.max(outer.lo),
            hi: self.hi.min(outer.hi),
        }
    }
}

/// Why the root search failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootError {
    /// f has the same sign at both endpoints
    NotBracketed { f_lo: f64, f_hi: f64 },
    /// the iteration cap was reached before the tolerance was met
    MaxIterations { best: f64 },
}

const MAX_ITERATIONS: usize = 100;

/// Find a root of `f` inside `bracket` to absolute tolerance `xtol`.
pub fn brent(
    mut f: impl FnMut(f64) -> f64,
    bracket: Bracket,
    xtol: f64,
) -> Result<f64, RootError> {
    let (mut a, mut b) = (bracket.lo, bracket.hi);
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(RootError::NotBracketed { f_lo: fa, f_hi: fb });
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // attempt inverse quadratic interpolation (secant when a == c)
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 {
            d
        } else {
            tol1.copysign(xm)
        };
        fb = f(b);
    }

    Err(RootError::MaxIterations { best: b })
}
