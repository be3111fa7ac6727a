use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Maximum number of frontier pops a single search may perform, constrained to [1, 1_000_000]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct StepBudget(usize);

impl StepBudget {
    const MIN: usize = 1;
    const MAX: usize = 1_000_000;

    pub fn new(value: usize) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for StepBudget {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl From<usize> for StepBudget {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<StepBudget> for usize {
    fn from(value: StepBudget) -> Self {
        value.0
    }
}

/// Euclidean distance at which a fuzzy search accepts a cell as arrived, constrained to [0.0, 64.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct FuzzyRadius(f32);

impl FuzzyRadius {
    const MIN: f32 = 0.0;
    const MAX: f32 = 64.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FuzzyRadius {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl From<f32> for FuzzyRadius {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<FuzzyRadius> for f32 {
    fn from(value: FuzzyRadius) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_budget_clamping() {
        assert_eq!(StepBudget::new(0).get(), 1);
        assert_eq!(StepBudget::new(500).get(), 500);
        assert_eq!(StepBudget::new(5_000_000).get(), 1_000_000);
    }

    #[test]
    fn test_fuzzy_radius_clamping() {
        assert_eq!(FuzzyRadius::new(-1.0).get(), 0.0);
        assert_eq!(FuzzyRadius::new(2.5).get(), 2.5);
        assert_eq!(FuzzyRadius::new(100.0).get(), 64.0);
    }

    #[test]
    fn test_display() {
        let radius = FuzzyRadius::new(1.5);
        assert_eq!(format!("{radius}"), "1.5");
        assert_eq!(format!("{}", StepBudget::new(42)), "42");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StepBudget::default().get(), 1000);
        assert_eq!(FuzzyRadius::default().get(), 2.0);
    }
}
