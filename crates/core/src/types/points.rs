//! Loyalty point balance.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when converting a raw number into [`LoyaltyPoints`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoyaltyPointsError {
    /// The value is below zero.
    #[error("loyalty points cannot be negative (got {0})")]
    Negative(i64),
    /// The value does not fit the stored range.
    #[error("loyalty points must be at most {max} (got {value})")]
    TooLarge {
        /// Value that was rejected.
        value: i64,
        /// Maximum allowed value.
        max: i64,
    },
}

/// A client's accumulated loyalty points.
///
/// One point is credited per visit. Every [`REWARD_THRESHOLD`](Self::REWARD_THRESHOLD)
/// points unlock a reward; unlocking does not consume points, so reward state
/// is always derived from the balance.
///
/// ```
/// use loyalty_core::LoyaltyPoints;
///
/// let points = LoyaltyPoints::new(23);
/// assert!(points.reward_available());
/// assert_eq!(points.stamps(), 3);
/// assert_eq!(points.rewards_earned(), 2);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoyaltyPoints(u32);

impl LoyaltyPoints {
    /// Number of points needed for one reward.
    pub const REWARD_THRESHOLD: u32 = 10;

    /// Largest balance the store can hold (`INTEGER` column).
    pub const MAX: u32 = i32::MAX as u32;

    /// Empty balance.
    pub const ZERO: Self = Self(0);

    /// Create a balance from a point count.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    /// Get the point count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Balance after one more visit, or `None` past [`MAX`](Self::MAX).
    #[must_use]
    pub const fn incremented(self) -> Option<Self> {
        if self.0 >= Self::MAX {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// Whether the client has reached at least one reward.
    #[must_use]
    pub const fn reward_available(self) -> bool {
        self.0 >= Self::REWARD_THRESHOLD
    }

    /// Filled stamps on the current card (`points mod 10`).
    #[must_use]
    pub const fn stamps(self) -> u32 {
        self.0 % Self::REWARD_THRESHOLD
    }

    /// Number of completed cards (`points / 10`).
    #[must_use]
    pub const fn rewards_earned(self) -> u32 {
        self.0 / Self::REWARD_THRESHOLD
    }
}

impl fmt::Display for LoyaltyPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LoyaltyPoints {
    fn from(points: u32) -> Self {
        Self(points)
    }
}

impl From<LoyaltyPoints> for u32 {
    fn from(points: LoyaltyPoints) -> Self {
        points.0
    }
}

impl TryFrom<i64> for LoyaltyPoints {
    type Error = LoyaltyPointsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(LoyaltyPointsError::Negative(value));
        }
        u32::try_from(value)
            .ok()
            .filter(|points| *points <= Self::MAX)
            .map(Self)
            .ok_or(LoyaltyPointsError::TooLarge {
                value,
                max: i64::from(Self::MAX),
            })
    }
}

impl TryFrom<i32> for LoyaltyPoints {
    type Error = LoyaltyPointsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<LoyaltyPoints> for i32 {
    #[allow(clippy::cast_possible_wrap)] // bounded by LoyaltyPoints::MAX on construction paths
    fn from(points: LoyaltyPoints) -> Self {
        points.0.min(LoyaltyPoints::MAX) as Self
    }
}
