//! Regularity classes from cycle-length spread.

use crate::models::CycleRegularity;

/// Upper bounds (inclusive) on the standard deviation of recent cycle lengths.
pub const VERY_REGULAR_MAX_STD_DEV: f64 = 2.0;
pub const REGULAR_MAX_STD_DEV: f64 = 4.0;
pub const SOMEWHAT_IRREGULAR_MAX_STD_DEV: f64 = 6.0;

impl CycleRegularity {
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev <= VERY_REGULAR_MAX_STD_DEV {
            Self::VeryRegular
        } else if std_dev <= REGULAR_MAX_STD_DEV {
            Self::Regular
        } else if std_dev <= SOMEWHAT_IRREGULAR_MAX_STD_DEV {
            Self::SomewhatIrregular
        } else {
            Self::Irregular
        }
    }
}
