use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MftError {
    ReadFile,
    TruncatedRecord,
    UnterminatedAttributes,
}

impl std::error::Error for MftError {}

impl fmt::Display for MftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MftError::ReadFile => write!(f, "Failed to read MFT data"),
            MftError::TruncatedRecord => write!(f, "MFT record is truncated"),
            MftError::UnterminatedAttributes => {
                write!(f, "MFT record attributes never reached the end marker")
            }
        }
    }
}
