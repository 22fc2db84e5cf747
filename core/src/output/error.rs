use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputError {
    CreateDirectory,
    CreateFile,
    Serialize,
    WriteRecord,
}

impl std::error::Error for OutputError {}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::CreateDirectory => write!(f, "Failed to create output directory"),
            OutputError::CreateFile => write!(f, "Failed to create output file"),
            OutputError::Serialize => write!(f, "Failed to serialize entry"),
            OutputError::WriteRecord => write!(f, "Failed to write entry"),
        }
    }
}
