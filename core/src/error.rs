use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum CollectionError {
    NoFile,
    BadToml,
    Journal,
    Mft,
    Output,
    LogFile,
    Format,
}

impl std::error::Error for CollectionError {}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NoFile => write!(f, "Failed to read TOML file"),
            CollectionError::BadToml => write!(f, "Failed to parse TOML data"),
            CollectionError::Journal => write!(f, "Failed to parse UsnJrnl data"),
            CollectionError::Mft => write!(f, "Failed to parse MFT data"),
            CollectionError::Output => write!(f, "Failed to output UsnJrnl entries"),
            CollectionError::LogFile => write!(f, "Failed to setup logging"),
            CollectionError::Format => write!(f, "Unknown output format"),
        }
    }
}
