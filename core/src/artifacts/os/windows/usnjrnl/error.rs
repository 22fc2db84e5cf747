use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UsnJrnlError {
    ReadFile,
    UnrecognizedVersion,
    TruncatedRecord,
}

impl std::error::Error for UsnJrnlError {}

impl fmt::Display for UsnJrnlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsnJrnlError::ReadFile => write!(f, "Failed to read UsnJrnl data"),
            UsnJrnlError::UnrecognizedVersion => write!(f, "Unrecognized UsnJrnl record version"),
            UsnJrnlError::TruncatedRecord => write!(f, "UsnJrnl record is truncated"),
        }
    }
}

/// A record the scanner could not decode, and where it was found
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RecordError {
    pub offset: u64,
    pub size: u32,
    pub error: UsnJrnlError,
}

impl RecordError {
    /// Only a failure to read the journal stops a scan. Everything else skips one record
    pub fn is_fatal(&self) -> bool {
        self.error == UsnJrnlError::ReadFile
    }
}

impl std::error::Error for RecordError {}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {} (declared size {})",
            self.error, self.offset, self.size
        )
    }
}
