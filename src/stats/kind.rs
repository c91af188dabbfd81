//! Named reductions

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::RoiError;

/// A reduction over the values of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Sum,
    Mean,
    Median,
    Min,
    Max,
    /// Population variance (divisor n)
    Var,
    /// Population standard deviation (divisor n)
    Std,
}

lazy_static! {
    // Accepted spellings, all lowercase
    static ref STAT_ALIASES: HashMap<&'static str, StatKind> = {
        let mut m = HashMap::new();
        m.insert("sum", StatKind::Sum);
        m.insert("total", StatKind::Sum);
        m.insert("mean", StatKind::Mean);
        m.insert("average", StatKind::Mean);
        m.insert("avg", StatKind::Mean);
        m.insert("median", StatKind::Median);
        m.insert("min", StatKind::Min);
        m.insert("minimum", StatKind::Min);
        m.insert("max", StatKind::Max);
        m.insert("maximum", StatKind::Max);
        m.insert("var", StatKind::Var);
        m.insert("variance", StatKind::Var);
        m.insert("std", StatKind::Std);
        m.insert("stddev", StatKind::Std);
        m.insert("std_dev", StatKind::Std);
        m
    };
}

impl StatKind {
    /// Every reduction, in reporting order
    pub const ALL: [StatKind; 7] = [
        StatKind::Sum,
        StatKind::Mean,
        StatKind::Median,
        StatKind::Min,
        StatKind::Max,
        StatKind::Var,
        StatKind::Std,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Sum => "sum",
            StatKind::Mean => "mean",
            StatKind::Median => "median",
            StatKind::Min => "min",
            StatKind::Max => "max",
            StatKind::Var => "var",
            StatKind::Std => "std",
        }
    }

    /// Whether the reduction has a value for an empty selection
    pub fn defined_on_empty(&self) -> bool {
        matches!(self, StatKind::Sum)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StatKind {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        STAT_ALIASES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| RoiError::InvalidParameter(format!("unknown statistic \"{}\"", s)))
    }
}

impl Serialize for StatKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StatKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Mean".parse::<StatKind>().unwrap(), StatKind::Mean);
        assert_eq!(" stddev ".parse::<StatKind>().unwrap(), StatKind::Std);
        assert_eq!("VARIANCE".parse::<StatKind>().unwrap(), StatKind::Var);
        assert!("mode".parse::<StatKind>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in StatKind::ALL {
            assert_eq!(kind.name().parse::<StatKind>().unwrap(), kind);
        }
    }
}
