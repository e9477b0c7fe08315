use serde::{Deserialize, Serialize};

/// Upper bound of the economic-situation axis.
pub const ECONOMIC_MAX: u8 = 40;
/// Upper bound of the academic-performance axis.
pub const ACADEMIC_MAX: u8 = 30;
/// Upper bound of the social-context axis.
pub const SOCIAL_MAX: u8 = 30;

/// A rubric score outside its axis bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{axis} score {value} exceeds maximum {max}")]
pub struct ScoreOutOfRange {
    pub axis: &'static str,
    pub value: u8,
    pub max: u8,
}

/// The three-axis rubric. Construction enforces the per-axis bounds, so a
/// held value is always within range; the total is a plain unweighted sum
/// with a maximum of 100. Deserialization re-passes the bounds check, so a
/// hand-edited store record cannot smuggle an out-of-range score back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScores")]
pub struct RubricScores {
    economic: u8,
    academic: u8,
    social: u8,
}

/// Unvalidated wire shape; field names match [`RubricScores`] so serialized
/// records round-trip.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawScores {
    economic: u8,
    academic: u8,
    social: u8,
}

impl TryFrom<RawScores> for RubricScores {
    type Error = ScoreOutOfRange;

    fn try_from(raw: RawScores) -> Result<Self, Self::Error> {
        Self::new(raw.economic, raw.academic, raw.social)
    }
}

impl RubricScores {
    pub fn new(economic: u8, academic: u8, social: u8) -> Result<Self, ScoreOutOfRange> {
        check_axis("economic", economic, ECONOMIC_MAX)?;
        check_axis("academic", academic, ACADEMIC_MAX)?;
        check_axis("social", social, SOCIAL_MAX)?;
        Ok(Self {
            economic,
            academic,
            social,
        })
    }

    pub fn economic(&self) -> u8 {
        self.economic
    }

    pub fn academic(&self) -> u8 {
        self.academic
    }

    pub fn social(&self) -> u8 {
        self.social
    }

    pub fn total(&self) -> u16 {
        u16::from(self.economic) + u16::from(self.academic) + u16::from(self.social)
    }
}

fn check_axis(axis: &'static str, value: u8, max: u8) -> Result<(), ScoreOutOfRange> {
    if value > max {
        return Err(ScoreOutOfRange { axis, value, max });
    }
    Ok(())
}
