//! Milli-unit fixed-point quantities.
//!
//! A `Quantity` stores its logical value times 1000. Rendering follows the
//! decimal-SI canonical form:
//! - values that are not whole render as `<milli>m` (`100m`, `1500m`)
//! - whole values render as integers with the largest exact suffix
//!   (`1`, `250`, `1k`, `3M`)

use std::fmt;

use serde::{Serialize, Serializer};

// Index 0 is "no suffix"; each step is a factor of 1000.
const SI_SUFFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Fixed-point quantity at milli-unit precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    milli: i64,
}

impl Quantity {
    pub const ZERO: Quantity = Quantity { milli: 0 };

    pub fn from_milli(milli: i64) -> Self {
        Self { milli }
    }

    pub fn milli_value(self) -> i64 {
        self.milli
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milli % 1000 != 0 {
            return write!(f, "{}m", self.milli);
        }

        let mut whole = self.milli / 1000;
        if whole == 0 {
            return f.write_str("0");
        }

        let mut exp = 0;
        while exp + 1 < SI_SUFFIXES.len() && whole % 1000 == 0 {
            whole /= 1000;
            exp += 1;
        }
        let suffix = SI_SUFFIXES.get(exp).copied().unwrap_or_default();
        write!(f, "{whole}{suffix}")
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
