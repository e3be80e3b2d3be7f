//! Linear fitness scaling.
//!
//! Scaling shifts raw fitness values by the current population extremes so
//! that fitness-proportionate selection keeps a controllable pressure.
//!
//! - Static: `f' = f - fmin + ksi` (maximize) or `f' = fmax - f + ksi` (minimize).
//! - Dynamic: the same shift with `ksi0 * r^k`, where `k` is the
//!   1-based generation number, so pressure decays as evolution proceeds.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3
//! - Yu, Wang & Xu (2002), "A study on dynamic linear fitness scaling"

use std::fmt;
use std::str::FromStr;

use crate::engine::GenerationContext;
use crate::error::{ConfigError, EvolveError, Result};

/// Optimization direction of the raw fitness being scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalingTarget {
    /// Larger raw values are better.
    #[default]
    Max,
    /// Smaller raw values are better.
    Min,
}

impl FromStr for ScalingTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "max" => Ok(ScalingTarget::Max),
            "min" => Ok(ScalingTarget::Min),
            other => Err(ConfigError::InvalidTarget(other.to_string())),
        }
    }
}

impl fmt::Display for ScalingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingTarget::Max => write!(f, "max"),
            ScalingTarget::Min => write!(f, "min"),
        }
    }
}

/// Static linear scaling parameters.
///
/// ```
/// use u_evolve::{LinearScaling, ScalingTarget};
///
/// let scaling = LinearScaling::default();
/// assert_eq!(scaling.target, ScalingTarget::Max);
/// assert_eq!(scaling.ksi, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearScaling {
    pub target: ScalingTarget,
    /// Selective pressure adjustment added after the shift.
    pub ksi: f64,
}

impl Default for LinearScaling {
    fn default() -> Self {
        Self {
            target: ScalingTarget::Max,
            ksi: 0.5,
        }
    }
}

impl LinearScaling {
    pub fn new(target: ScalingTarget, ksi: f64) -> Self {
        Self { target, ksi }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.ksi.is_finite() {
            return Err(ConfigError::InvalidAdjustment(self.ksi));
        }
        Ok(())
    }
}

/// Dynamic linear scaling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicLinearScaling {
    pub target: ScalingTarget,
    /// Initial selective pressure adjustment.
    pub ksi0: f64,
    /// Decay factor in (0, 1). Conventionally 0.9–0.999.
    pub r: f64,
}

impl Default for DynamicLinearScaling {
    fn default() -> Self {
        Self {
            target: ScalingTarget::Max,
            ksi0: 2.0,
            r: 0.9,
        }
    }
}

impl DynamicLinearScaling {
    pub fn new(target: ScalingTarget, ksi0: f64, r: f64) -> Self {
        Self { target, ksi0, r }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.ksi0.is_finite() {
            return Err(ConfigError::InvalidAdjustment(self.ksi0));
        }
        if !(self.r > 0.0 && self.r < 1.0) {
            return Err(ConfigError::InvalidDecay(self.r));
        }
        Ok(())
    }

    /// Adjustment term `ksi0 * r^k` with `k = generation + 1`.
    ///
    /// Outside a run `k` is 0.
    pub fn adjustment(&self, generation: Option<usize>) -> f64 {
        let k = generation.map_or(0, |g| g + 1);
        self.ksi0 * self.r.powf(k as f64)
    }
}

/// Transformation applied on top of a raw fitness function.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scaling {
    #[default]
    None,
    Linear(LinearScaling),
    DynamicLinear(DynamicLinearScaling),
}

impl From<LinearScaling> for Scaling {
    fn from(s: LinearScaling) -> Self {
        Scaling::Linear(s)
    }
}

impl From<DynamicLinearScaling> for Scaling {
    fn from(s: DynamicLinearScaling) -> Self {
        Scaling::DynamicLinear(s)
    }
}

impl Scaling {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match self {
            Scaling::None => Ok(()),
            Scaling::Linear(s) => s.validate(),
            Scaling::DynamicLinear(s) => s.validate(),
        }
    }

    /// Scales a raw value using the statistics in `context`.
    ///
    /// Statistics are read at call time, so the result always reflects the
    /// most recently completed generation.
    pub fn apply(&self, raw: f64, context: &GenerationContext) -> Result<f64> {
        let (target, adjustment) = match self {
            Scaling::None => return Ok(raw),
            Scaling::Linear(s) => (s.target, s.ksi),
            Scaling::DynamicLinear(s) => (s.target, s.adjustment(context.generation)),
        };
        let stats = context.stats.ok_or(EvolveError::StatisticsUnavailable)?;
        Ok(match target {
            ScalingTarget::Max => raw - stats.min + adjustment,
            ScalingTarget::Min => stats.max - raw + adjustment,
        })
    }
}
