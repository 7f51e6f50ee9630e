//! Foreground adjustment search for failing color pairs.
//!
//! The background is treated as fixed. The foreground moves toward whichever
//! end of the luminance range lies furthest from the background: lighter on
//! dark backgrounds (luminance < 0.5), darker otherwise.
//!
//! # Algorithm
//! 1. If the pair already meets the target, report it as compliant
//! 2. Pick the direction from the background luminance
//! 3. Shift all three channels by `step` (saturating), recompute the ratio
//! 4. Stop on success, after `max_iterations`, or once the color saturates
//!
//! A returned color has always been checked against the target. Running out
//! of iterations is a normal outcome reported as [`Suggestion::Unreachable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::rgb::Rgb8;
use crate::contrast::luminance::{ContrastRatio, contrast_ratio, relative_luminance};

/// Background luminance below which the foreground is lightened.
const LIGHTEN_BELOW: f64 = 0.5;

/// Bounds of the step search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Per-channel change per iteration, out of 255.
    pub step: u8,
    /// Maximum number of steps before giving up.
    pub max_iterations: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            step: 10,
            max_iterations: 20,
        }
    }
}

/// Which way the foreground moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Lighten,
    Darken,
}

impl Direction {
    /// Direction that moves a foreground away from `bg`.
    pub fn away_from(bg: Rgb8) -> Self {
        if relative_luminance(bg) < LIGHTEN_BELOW {
            Self::Lighten
        } else {
            Self::Darken
        }
    }

    fn delta(self, step: u8) -> i16 {
        match self {
            Self::Lighten => i16::from(step),
            Self::Darken => -i16::from(step),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lighten => write!(f, "lighten"),
            Self::Darken => write!(f, "darken"),
        }
    }
}

/// Outcome of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// The pair meets the target as is.
    AlreadyCompliant,
    /// Lightening the foreground by `steps` iterations meets the target.
    Lighten { steps: u32 },
    /// Darkening the foreground by `steps` iterations meets the target.
    Darken { steps: u32 },
    /// No foreground shift within the budget meets the target.
    Unreachable { direction: Direction },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyCompliant => write!(f, "already compliant"),
            Self::Lighten { steps } => write!(f, "lighten the foreground ({steps} steps)"),
            Self::Darken { steps } => write!(f, "darken the foreground ({steps} steps)"),
            Self::Unreachable { direction } => write!(
                f,
                "no simple foreground {direction} reaches the target; \
                 reconsider the pairing (add an overlay or use another role)"
            ),
        }
    }
}

/// Result of [`suggest_adjustment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub suggestion: Suggestion,
    /// A foreground verified to meet the target, if one was found.
    pub adjusted_color: Option<Rgb8>,
    /// Ratio of the last candidate examined.
    pub reached: ContrastRatio,
}

/// Search for a foreground that meets `target` against `bg` using the
/// default [`SearchParams`].
pub fn suggest_adjustment(fg: Rgb8, bg: Rgb8, target: f64) -> Adjustment {
    suggest_adjustment_with(fg, bg, target, &SearchParams::default())
}

/// Search for a foreground that meets `target` against `bg`.
pub fn suggest_adjustment_with(
    fg: Rgb8,
    bg: Rgb8,
    target: f64,
    params: &SearchParams,
) -> Adjustment {
    let current = contrast_ratio(fg, bg);
    if current.value() >= target {
        return Adjustment {
            suggestion: Suggestion::AlreadyCompliant,
            adjusted_color: Some(fg),
            reached: current,
        };
    }

    let direction = Direction::away_from(bg);
    let delta = direction.delta(params.step);
    let mut candidate = fg;
    let mut reached = current;

    for steps in 1..=params.max_iterations {
        let next = candidate.shifted(delta);
        if next == candidate {
            break;
        }
        candidate = next;
        reached = contrast_ratio(candidate, bg);

        if reached.value() >= target {
            tracing::debug!(
                "adjust {fg} on {bg}: {direction} {steps} steps to {candidate} ({reached})"
            );
            let suggestion = match direction {
                Direction::Lighten => Suggestion::Lighten { steps },
                Direction::Darken => Suggestion::Darken { steps },
            };
            return Adjustment {
                suggestion,
                adjusted_color: Some(candidate),
                reached,
            };
        }
    }

    tracing::debug!("adjust {fg} on {bg}: target {target} unreachable, best {reached}");
    Adjustment {
        suggestion: Suggestion::Unreachable { direction },
        adjusted_color: None,
        reached,
    }
}
