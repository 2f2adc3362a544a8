use crate::math::{Vector3, TOLERANCE};

/// Scores a candidate point-to-point correspondence from the displacement
/// each point would travel during the morph. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostFunction {
    /// Sum of displacement lengths.
    #[default]
    TotalDisplacement,
    /// Population variance of displacement lengths.
    DistanceVariance,
    /// Circular variance of displacement directions in the XY plane,
    /// `1 - |mean unit displacement|`.
    AngleVariance,
}

impl CostFunction {
    /// Evaluates the cost of a set of displacements.
    #[must_use]
    pub fn evaluate(self, displacements: &[Vector3]) -> f64 {
        if displacements.is_empty() {
            return 0.0;
        }
        match self {
            Self::TotalDisplacement => displacements.iter().map(Vector3::norm).sum(),
            Self::DistanceVariance => distance_variance(displacements),
            Self::AngleVariance => angle_variance(displacements),
        }
    }
}

fn distance_variance(displacements: &[Vector3]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = displacements.len() as f64;
    let mean = displacements.iter().map(Vector3::norm).sum::<f64>() / n;
    displacements
        .iter()
        .map(|d| (d.norm() - mean).powi(2))
        .sum::<f64>()
        / n
}

fn angle_variance(displacements: &[Vector3]) -> f64 {
    let mut sum_cos = 0.0;
    let mut sum_sin = 0.0;
    let mut count = 0_u32;
    for d in displacements {
        let len = d.x.hypot(d.y);
        if len < TOLERANCE {
            continue;
        }
        sum_cos += d.x / len;
        sum_sin += d.y / len;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    let n = f64::from(count);
    1.0 - (sum_cos / n).hypot(sum_sin / n)
}
