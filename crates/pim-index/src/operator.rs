use std::fmt;
use std::str::FromStr;

use pim_core::PropertyError;

/// Filter operators, spelled as callers write them (`"NOT EMPTY"`, `"<="`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEqual,
    LowerThan,
    LowerOrEqualThan,
    GreaterThan,
    GreaterOrEqualThan,
    StartsWith,
    EndsWith,
    Contains,
    DoesNotContain,
    In,
    NotIn,
    Between,
    NotBetween,
    IsEmpty,
    IsNotEmpty,
    InChildren,
    NotInChildren,
}

impl Operator {
    pub const ALL: [Operator; 18] = [
        Operator::Equals,
        Operator::NotEqual,
        Operator::LowerThan,
        Operator::LowerOrEqualThan,
        Operator::GreaterThan,
        Operator::GreaterOrEqualThan,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Contains,
        Operator::DoesNotContain,
        Operator::In,
        Operator::NotIn,
        Operator::Between,
        Operator::NotBetween,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::InChildren,
        Operator::NotInChildren,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEqual => "!=",
            Operator::LowerThan => "<",
            Operator::LowerOrEqualThan => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqualThan => ">=",
            Operator::StartsWith => "STARTS WITH",
            Operator::EndsWith => "ENDS WITH",
            Operator::Contains => "CONTAINS",
            Operator::DoesNotContain => "DOES NOT CONTAIN",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::IsEmpty => "EMPTY",
            Operator::IsNotEmpty => "NOT EMPTY",
            Operator::InChildren => "IN CHILDREN",
            Operator::NotInChildren => "NOT IN CHILDREN",
        }
    }

    /// Operators that take no value.
    #[must_use]
    pub fn is_emptiness(self) -> bool {
        matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = PropertyError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PropertyError::InvalidArgument(format!("Unknown operator \"{wanted}\".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_spelling() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
        assert_eq!(" not empty ".parse::<Operator>().unwrap(), Operator::IsNotEmpty);
    }

    #[test]
    fn unknown_operator_is_invalid_argument() {
        assert_eq!(
            "LIKE".parse::<Operator>().unwrap_err(),
            PropertyError::InvalidArgument("Unknown operator \"LIKE\".".to_string())
        );
    }
}
