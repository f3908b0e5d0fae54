use std::fmt;

/// Result type for filter construction
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while building a `CohortFilter`.
///
/// These never reach the evaluator: a filter that exists is a valid filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Filter has no conditions
    EmptyConditions,

    /// Field name is not one of the record fields
    UnknownField(String),

    /// Operator name is not one of eq/ne/gt/lt/gte/lte/contains
    UnknownOperator(String),

    /// Logic is neither AND nor OR
    UnknownLogic(String),

    /// Condition expression could not be split into field/operator/value
    MalformedCondition(String),

    /// Page or result limit of zero
    InvalidLimit,

    /// Pair supplied with a frequency of zero
    ZeroFrequency(String, String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyConditions => {
                write!(f, "Invalid filter: at least one condition is required")
            }
            ValidationError::UnknownField(name) => write!(f, "Unknown field: {}", name),
            ValidationError::UnknownOperator(name) => write!(f, "Unsupported operator: {}", name),
            ValidationError::UnknownLogic(name) => {
                write!(f, "Unsupported logic: {} (expected AND or OR)", name)
            }
            ValidationError::MalformedCondition(expr) => {
                write!(f, "Malformed condition '{}': expected '<field> <op> <value>'", expr)
            }
            ValidationError::InvalidLimit => write!(f, "Invalid limit: must be at least 1"),
            ValidationError::ZeroFrequency(a, b) => {
                write!(f, "Invalid pair {} / {}: frequency must be at least 1", a, b)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
