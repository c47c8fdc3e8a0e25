use smallvec::SmallVec;

use crate::foundation::error::{GlowError, GlowResult};

/// One bloom/core layer of a multi-pass draw.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassSpec {
    /// Multiplier applied to the width profile output.
    pub width_mul: f64,
    /// Multiplier folded into the additive color.
    pub opacity_mul: f32,
    /// Whether this is an outer bloom layer (as opposed to the core).
    #[serde(default)]
    pub bloom: bool,
}

impl PassSpec {
    /// Bloom layer.
    pub const fn bloom(width_mul: f64, opacity_mul: f32) -> Self {
        Self {
            width_mul,
            opacity_mul,
            bloom: true,
        }
    }

    /// Core layer.
    pub const fn core(width_mul: f64, opacity_mul: f32) -> Self {
        Self {
            width_mul,
            opacity_mul,
            bloom: false,
        }
    }
}

/// Fewest passes a stack may hold.
pub const MIN_PASSES: usize = 3;
/// Most passes a stack may hold.
pub const MAX_PASSES: usize = 5;

/// Ordered pass list, outermost (widest, dimmest) first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<PassSpec>", into = "Vec<PassSpec>")]
pub struct PassStack {
    passes: SmallVec<[PassSpec; MAX_PASSES]>,
}

impl PassStack {
    /// Three passes: wide haze, mid glow, core.
    pub fn soft() -> Self {
        Self::from_static(&[
            PassSpec::bloom(3.0, 0.15),
            PassSpec::bloom(1.8, 0.35),
            PassSpec::core(0.7, 0.9),
        ])
    }

    /// Four passes.
    pub fn standard() -> Self {
        Self::from_static(&[
            PassSpec::bloom(3.5, 0.12),
            PassSpec::bloom(2.2, 0.25),
            PassSpec::bloom(1.3, 0.5),
            PassSpec::core(0.5, 1.0),
        ])
    }

    /// Five passes with a hot white-ish core.
    pub fn intense() -> Self {
        Self::from_static(&[
            PassSpec::bloom(4.5, 0.1),
            PassSpec::bloom(3.0, 0.2),
            PassSpec::bloom(1.9, 0.4),
            PassSpec::bloom(1.1, 0.7),
            PassSpec::core(0.45, 1.0),
        ])
    }

    fn from_static(passes: &[PassSpec]) -> Self {
        Self {
            passes: SmallVec::from_slice(passes),
        }
    }

    /// Validate and wrap a custom pass list.
    pub fn new(passes: &[PassSpec]) -> GlowResult<Self> {
        let stack = Self::from_static(passes);
        stack.validate()?;
        Ok(stack)
    }

    /// Passes in draw order.
    pub fn passes(&self) -> &[PassSpec] {
        &self.passes
    }

    /// Number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Always `false` for a validated stack.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Check pass count and widest/dimmest-first ordering.
    pub fn validate(&self) -> GlowResult<()> {
        let n = self.passes.len();
        if !(MIN_PASSES..=MAX_PASSES).contains(&n) {
            return Err(GlowError::validation(format!(
                "pass stack must hold {MIN_PASSES}..={MAX_PASSES} passes, got {n}"
            )));
        }
        for p in &self.passes {
            if !p.width_mul.is_finite() || p.width_mul < 0.0 {
                return Err(GlowError::validation("pass width_mul must be finite and >= 0"));
            }
            if !p.opacity_mul.is_finite() || p.opacity_mul < 0.0 {
                return Err(GlowError::validation("pass opacity_mul must be finite and >= 0"));
            }
        }
        for w in self.passes.windows(2) {
            if w[1].width_mul > w[0].width_mul {
                return Err(GlowError::validation(
                    "passes must be ordered widest first (width_mul non-increasing)",
                ));
            }
            if w[1].opacity_mul < w[0].opacity_mul {
                return Err(GlowError::validation(
                    "passes must be ordered dimmest first (opacity_mul non-decreasing)",
                ));
            }
        }
        Ok(())
    }
}

impl Default for PassStack {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<PassSpec>> for PassStack {
    type Error = GlowError;

    fn try_from(value: Vec<PassSpec>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PassStack> for Vec<PassSpec> {
    fn from(value: PassStack) -> Self {
        value.passes.into_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
