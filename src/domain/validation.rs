use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidUrl { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is required"),
            Self::InvalidUrl { field, input } => {
                write!(f, "{field} must be an absolute http(s) URL: {input}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
