use crate::{
    artifacts::os::windows::usnjrnl::parser::UsnJrnlEntry, output::error::OutputError,
};
use log::error;
use std::io::Write;

/// Serialize an entry as a single line of JSON
pub(crate) fn write_line<W: Write>(writer: &mut W, entry: &UsnJrnlEntry) -> Result<(), OutputError> {
    let line = match serde_json::to_string(entry) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to serialize entry: {err:?}");
            return Err(OutputError::Serialize);
        }
    };

    if let Err(err) = writeln!(writer, "{line}") {
        error!("[core] Failed to write jsonl line: {err:?}");
        return Err(OutputError::WriteRecord);
    }
    Ok(())
}
