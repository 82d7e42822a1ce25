//! Alpha-Stable Noise Sampler
//!
//! Draws independent increments from a stable distribution S(alpha, beta, scale, 0)
//! in the 1-parameterization, using the Chambers-Mallows-Stuck construction:
//!
//! V ~ Uniform(-pi/2, pi/2), W ~ Exp(1)
//!
//! alpha != 1:
//!   X = S * sin(alpha (V + B)) / cos(V)^(1/alpha) * (cos(V - alpha (V + B)) / W)^((1 - alpha) / alpha)
//!   with B = atan(beta tan(pi alpha / 2)) / alpha, S = (1 + beta^2 tan^2(pi alpha / 2))^(1 / (2 alpha))
//!   Y = scale * X
//!
//! alpha == 1:
//!   X = 2/pi * ((pi/2 + beta V) tan V - beta ln((pi/2) W cos V / (pi/2 + beta V)))
//!   Y = scale * X + 2/pi * beta * scale * ln(scale)
//!
//! alpha == 2 degenerates to a Gaussian with standard deviation scale * sqrt(2);
//! it is sampled directly instead of going through the transform.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use rand::distributions::{Distribution, Open01};
use rand::Rng;
use statrs::distribution::{Exp, Normal};

use crate::domain::params::validate_stable_shape;
use crate::domain::{ForecastError, ForecastResult};

#[derive(Debug, Clone, Copy)]
enum Kernel {
    /// alpha == 2
    Gaussian(Normal),
    /// Chambers-Mallows-Stuck transform
    Cms(Cms),
}

#[derive(Debug, Clone, Copy)]
enum Cms {
    /// alpha == 1, carries the location shift 2/pi * beta * scale * ln(scale)
    Unit { shift: f64 },
    /// Any other alpha, carries B and S
    General { b: f64, s: f64 },
}

/// Stable distribution with zero location, ready to sample
#[derive(Debug, Clone, Copy)]
pub struct StableNoise {
    alpha: f64,
    beta: f64,
    scale: f64,
    kernel: Kernel,
    exp: Exp,
}

impl StableNoise {
    /// Build a sampler, failing on alpha outside (0, 2], beta outside [-1, 1] or scale <= 0
    pub fn new(alpha: f64, beta: f64, scale: f64) -> ForecastResult<Self> {
        validate_stable_shape(alpha, beta)?;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ForecastError::invalid(format!("scale must be > 0, got {}", scale)));
        }

        let kernel = if alpha == 2.0 {
            let normal = Normal::new(0.0, scale * SQRT_2)
                .map_err(|e| ForecastError::invalid(e.to_string()))?;
            Kernel::Gaussian(normal)
        } else if alpha == 1.0 {
            Kernel::Cms(Cms::Unit {
                shift: 2.0 / PI * beta * scale * scale.ln(),
            })
        } else {
            let zeta = beta * (PI * alpha / 2.0).tan();
            Kernel::Cms(Cms::General {
                b: zeta.atan() / alpha,
                s: (1.0 + zeta * zeta).powf(1.0 / (2.0 * alpha)),
            })
        };

        let exp = Exp::new(1.0).map_err(|e| ForecastError::invalid(e.to_string()))?;

        Ok(Self {
            alpha,
            beta,
            scale,
            kernel,
            exp,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Draw `count` independent increments
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> ForecastResult<Vec<f64>> {
        if count < 1 {
            return Err(ForecastError::invalid("count must be >= 1"));
        }
        Ok((0..count).map(|_| self.sample(rng)).collect())
    }

    /// One Chambers-Mallows-Stuck draw. Overflowing draws (tiny alpha only) are redrawn.
    fn transform<R: Rng + ?Sized>(&self, cms: Cms, rng: &mut R) -> f64 {
        loop {
            let u: f64 = Open01.sample(rng);
            let v = PI * (u - 0.5);
            let w = self.exp.sample(rng);

            let y = match cms {
                Cms::Unit { shift } => {
                    let half_pi_bv = FRAC_PI_2 + self.beta * v;
                    let x = 2.0 / PI
                        * (half_pi_bv * v.tan()
                            - self.beta * ((FRAC_PI_2 * w * v.cos()) / half_pi_bv).ln());
                    self.scale * x + shift
                }
                Cms::General { b, s } => {
                    let a = self.alpha;
                    let x = s * (a * (v + b)).sin() / v.cos().powf(1.0 / a)
                        * ((v - a * (v + b)).cos() / w).powf((1.0 - a) / a);
                    self.scale * x
                }
            };

            if y.is_finite() {
                return y;
            }
        }
    }
}

impl Distribution<f64> for StableNoise {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.kernel {
            Kernel::Gaussian(normal) => normal.sample(rng),
            Kernel::Cms(cms) => self.transform(cms, rng),
        }
    }
}

/// Draw `count` stable increments with zero location
pub fn sample_stable<R: Rng + ?Sized>(
    alpha: f64,
    beta: f64,
    scale: f64,
    count: usize,
    rng: &mut R,
) -> ForecastResult<Vec<f64>> {
    StableNoise::new(alpha, beta, scale)?.sample_n(rng, count)
}
