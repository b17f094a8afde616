use std::f64::consts::PI;
use std::str::FromStr;

use crate::filters::expr::{Cond, Expr};
use crate::foundation::error::{WavyteError, WavyteResult};

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Circular ease-in.
    InCirc,
    /// Circular ease-out.
    OutCirc,
    /// Overshooting ease-in.
    InBack,
    /// Overshooting ease-out.
    OutBack,
}

// (family, in, out, in/out)
const FAMILIES: &[(&str, Ease, Option<Ease>, Option<Ease>)] = &[
    ("quad", Ease::InQuad, Some(Ease::OutQuad), Some(Ease::InOutQuad)),
    ("cubic", Ease::InCubic, Some(Ease::OutCubic), Some(Ease::InOutCubic)),
    ("quart", Ease::InQuart, Some(Ease::OutQuart), Some(Ease::InOutQuart)),
    ("sine", Ease::InSine, Some(Ease::OutSine), Some(Ease::InOutSine)),
    ("expo", Ease::InExpo, Some(Ease::OutExpo), None),
    ("circ", Ease::InCirc, Some(Ease::OutCirc), None),
    ("back", Ease::InBack, Some(Ease::OutBack), None),
];

impl Ease {
    /// Every supported curve.
    pub const ALL: [Ease; 19] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InBack,
        Ease::OutBack,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::InExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InBack => BACK_C3 * t.powi(3) - BACK_C1 * t * t,
            Self::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
        }
    }

    /// The same curve as [`Ease::apply`], as an expression of the progress expression `p`.
    pub fn curve_expr(self, p: Expr) -> Expr {
        let mirrored = || -2.0 * p.clone() + 2.0;
        let split = |lo: Expr, hi: Expr| Expr::cond(Cond::lt(p.clone(), 0.5), lo, hi);
        match self {
            Self::Linear => p.clone(),
            Self::InQuad => p.clone().pow(2.0),
            Self::OutQuad => 1.0 - (1.0 - p.clone()).pow(2.0),
            Self::InOutQuad => split(
                2.0 * p.clone().pow(2.0),
                1.0 - mirrored().pow(2.0) / 2.0,
            ),
            Self::InCubic => p.clone().pow(3.0),
            Self::OutCubic => 1.0 - (1.0 - p.clone()).pow(3.0),
            Self::InOutCubic => split(
                4.0 * p.clone().pow(3.0),
                1.0 - mirrored().pow(3.0) / 2.0,
            ),
            Self::InQuart => p.clone().pow(4.0),
            Self::OutQuart => 1.0 - (1.0 - p.clone()).pow(4.0),
            Self::InOutQuart => split(
                8.0 * p.clone().pow(4.0),
                1.0 - mirrored().pow(4.0) / 2.0,
            ),
            Self::InSine => 1.0 - (p.clone() * (PI / 2.0)).cos(),
            Self::OutSine => (p.clone() * (PI / 2.0)).sin(),
            Self::InOutSine => -((p.clone() * PI).cos() - 1.0) / 2.0,
            Self::InExpo => Expr::cond(
                Cond::lte(p.clone(), 0.0),
                Expr::constant(0.0),
                Expr::constant(2.0).pow(10.0 * p.clone() - 10.0),
            ),
            Self::OutExpo => Expr::cond(
                Cond::lt(p.clone(), 1.0),
                1.0 - Expr::constant(2.0).pow(-10.0 * p.clone()),
                Expr::constant(1.0),
            ),
            Self::InCirc => 1.0 - (1.0 - p.clone().pow(2.0)).sqrt(),
            Self::OutCirc => (1.0 - (p.clone() - 1.0).pow(2.0)).sqrt(),
            Self::InBack => BACK_C3 * p.clone().pow(3.0) - BACK_C1 * p.clone().pow(2.0),
            Self::OutBack => {
                1.0 + BACK_C3 * (p.clone() - 1.0).pow(3.0) + BACK_C1 * (p.clone() - 1.0).pow(2.0)
            }
        }
    }

    /// Closed-form value expression `from + range * curve((t - delay) / duration)`.
    pub fn value_expr(self, from: f64, range: f64, duration: f64, delay: f64) -> Expr {
        if self == Self::Linear {
            return Expr::linear(from, range, duration, delay);
        }
        let progress = (Expr::Time - delay) / duration;
        let scaled = range * self.curve_expr(progress);
        if from == 0.0 { scaled } else { from + scaled }
    }
}

impl FromStr for Ease {
    type Err = WavyteError;

    /// Accepts `linear`, `quadIn`, `easeInQuad`, `in_quad`, `InOutQuad` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let key = key.strip_prefix("ease").unwrap_or(&key);

        if key == "linear" {
            return Ok(Self::Linear);
        }
        for (family, ease_in, ease_out, ease_in_out) in FAMILIES {
            let Some(pos) = key.find(family) else {
                continue;
            };
            let dir = format!("{}{}", &key[..pos], &key[pos + family.len()..]);
            let found = match dir.as_str() {
                "in" => Some(*ease_in),
                "out" => *ease_out,
                "inout" => *ease_in_out,
                _ => None,
            };
            if let Some(ease) = found {
                return Ok(ease);
            }
        }
        Err(WavyteError::unsupported_ease(s))
    }
}

/// Closed-form expression for the named curve; unknown names fail with
/// [`WavyteError::UnsupportedEase`].
pub fn evaluate(
    curve: &str,
    from: f64,
    range: f64,
    duration: f64,
    delay: f64,
) -> WavyteResult<Expr> {
    let ease: Ease = curve.parse()?;
    Ok(ease.value_expr(from, range, duration, delay))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
