use super::error::FileSystemError;
use log::{error, info};
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

/// Open a file for buffered reading
pub(crate) fn file_reader(path: &str) -> Result<BufReader<File>, FileSystemError> {
    let reader_result = File::open(path);
    match reader_result {
        Ok(reader) => Ok(BufReader::new(reader)),
        Err(err) => {
            error!("[core] Failed to open file {path}: {err:?}");
            Err(FileSystemError::OpenFile)
        }
    }
}

/// Read a whole file into memory
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    let mut reader = file_reader(path)?;
    let mut buffer = Vec::new();
    if let Err(err) = reader.read_to_end(&mut buffer) {
        error!("[core] Failed to read file {path}: {err:?}");
        return Err(FileSystemError::ReadFile);
    }
    Ok(buffer)
}

/**
 * Extracted `$J` streams are sparse, and the start can be gigabytes of zeros
 * Returns the offset of the first non-zero byte, or the stream length if everything is zero
 */
pub(crate) fn skip_leading_zeros<T: Read + Seek>(reader: &mut T) -> Result<u64, FileSystemError> {
    if let Err(err) = reader.seek(SeekFrom::Start(0)) {
        error!("[core] Could not seek to start of data: {err:?}");
        return Err(FileSystemError::ReadFile);
    }

    let chunk_size = 65536;
    let mut chunk = vec![0u8; chunk_size];
    let mut offset = 0;
    loop {
        let bytes_read = match reader.read(&mut chunk) {
            Ok(result) => result,
            Err(err) => {
                error!("[core] Could not read data at offset {offset}: {err:?}");
                return Err(FileSystemError::ReadFile);
            }
        };

        let finished = 0;
        if bytes_read == finished {
            break;
        }

        if let Some(position) = chunk[..bytes_read].iter().position(|value| *value != 0) {
            offset += position as u64;
            info!("[core] Skipped {offset} bytes of leading zeros");
            return Ok(offset);
        }
        offset += bytes_read as u64;
    }

    info!("[core] Data only contains zeros. Size: {offset}");
    Ok(offset)
}
