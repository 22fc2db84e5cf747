use std::fmt;

#[derive(Debug)]
pub(crate) enum UtilError {
    CreateDirectory,
    LogFile,
}

impl std::error::Error for UtilError {}

impl fmt::Display for UtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilError::CreateDirectory => write!(f, "Could not create directory(ies)"),
            UtilError::LogFile => write!(f, "Could not create log file"),
        }
    }
}
