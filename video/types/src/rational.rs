/*!
    Rational numbers and timestamp types.
*/

use std::time::Duration;

/**
    A rational number, used for time bases and frame rates.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    /// Numerator.
    pub num: i32,
    /// Denominator.
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.
    */
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /**
        Convert to a floating point value.
    */
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/**
    A presentation timestamp in time base units.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pts(pub i64);

impl Pts {
    /**
        Convert to wall-clock time using the given time base.

        Returns `None` for negative timestamps, which some containers emit
        for frames preceding the nominal start.
    */
    pub fn to_duration(self, time_base: Rational) -> Option<Duration> {
        if self.0 < 0 {
            return None;
        }
        let seconds = self.0 as f64 * time_base.num as f64 / time_base.den as f64;
        Some(Duration::from_secs_f64(seconds))
    }
}

/**
    A duration in time base units, as carried by packets.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaDuration(pub i64);

impl MediaDuration {
    /**
        Convert to wall-clock time using the given time base.
    */
    pub fn to_duration(self, time_base: Rational) -> Option<Duration> {
        if self.0 <= 0 {
            return None;
        }
        let seconds = self.0 as f64 * time_base.num as f64 / time_base.den as f64;
        Some(Duration::from_secs_f64(seconds))
    }
}
