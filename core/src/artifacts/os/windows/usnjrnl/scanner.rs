/**
 * Walk an extracted `$J` stream and frame each record using its declared size
 *
 * Records are 8 byte aligned but the stream is not clean. Sparse regions and slack leave zero filled gaps between
 * records that are not covered by any record size. When the size at the current offset is too small to be a record
 * we look ahead for the next non-zero byte and realign to it
 */
use super::{
    error::{RecordError, UsnJrnlError},
    record::{UsnRecord, MIN_RECORD_SIZE},
};
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, error, warn};
use std::io::{Read, Seek, SeekFrom};

/// Amount of data read at each offset to find a record size or the end of a gap
pub const WINDOW_SIZE: u64 = 800;
const RECORD_ALIGNMENT: u64 = 8;

/// Lazily decode `UsnJrnl` records from a reader. Stops at the end of data or at corruption we cannot recover from
pub struct UsnScanner<R: Read + Seek> {
    reader: R,
    offset: u64,
    finished: bool,
}

/// Scan a `$J` stream from the start
pub fn scan<R: Read + Seek>(reader: R) -> UsnScanner<R> {
    UsnScanner::new(reader, 0)
}

impl<R: Read + Seek> UsnScanner<R> {
    /// Start scanning at `offset`. Usually the first non-zero byte of the stream
    pub fn new(reader: R, offset: u64) -> UsnScanner<R> {
        UsnScanner {
            reader,
            offset,
            finished: false,
        }
    }

    /// Offset of the next read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read up to `size` bytes at `offset`. Fewer bytes are returned at the end of the stream
    fn read_at(&mut self, offset: u64, size: u64) -> Result<Vec<u8>, UsnJrnlError> {
        if let Err(err) = self.reader.seek(SeekFrom::Start(offset)) {
            error!("[usnjrnl] Could not seek to offset {offset}: {err:?}");
            return Err(UsnJrnlError::ReadFile);
        }

        let mut buffer = Vec::new();
        if let Err(err) = self.reader.by_ref().take(size).read_to_end(&mut buffer) {
            error!("[usnjrnl] Could not read {size} bytes at offset {offset}: {err:?}");
            return Err(UsnJrnlError::ReadFile);
        }
        Ok(buffer)
    }

    /// Move past a zero filled gap. Ends the scan if the whole window is zeros
    fn skip_gap(&mut self, window: &[u8]) {
        let zeros = match window.iter().position(|value| *value != 0) {
            Some(result) => result as u64,
            None => {
                debug!(
                    "[usnjrnl] Only zeros found at offset {}. End of journal data",
                    self.offset
                );
                self.finished = true;
                return;
            }
        };

        // Non-zero data may start in the middle of a record size, so round down to the record alignment
        let aligned = (self.offset + zeros) & !(RECORD_ALIGNMENT - 1);
        if aligned > self.offset {
            debug!(
                "[usnjrnl] Skipped {} byte gap at offset {}",
                aligned - self.offset,
                self.offset
            );
            self.offset = aligned;
        } else {
            self.offset += RECORD_ALIGNMENT;
        }
    }

    fn fatal(&mut self, offset: u64, size: u32) -> Option<Result<UsnRecord, RecordError>> {
        self.finished = true;
        Some(Err(RecordError {
            offset,
            size,
            error: UsnJrnlError::ReadFile,
        }))
    }
}

impl<R: Read + Seek> Iterator for UsnScanner<R> {
    type Item = Result<UsnRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let offset = self.offset;
            let window = match self.read_at(offset, WINDOW_SIZE) {
                Ok(result) => result,
                Err(_err) => return self.fatal(offset, 0),
            };
            if window.len() < MIN_RECORD_SIZE as usize {
                self.finished = true;
                break;
            }

            let mut header = window.as_slice();
            let size = match header.read_u32::<LittleEndian>() {
                Ok(result) => result,
                Err(err) => {
                    error!("[usnjrnl] Could not read record size at offset {offset}: {err:?}");
                    return self.fatal(offset, 0);
                }
            };

            if (size as i32) < 0 {
                warn!("[usnjrnl] Record size {size} at offset {offset} is not valid. Stopping scan");
                self.finished = true;
                break;
            }
            if size < MIN_RECORD_SIZE {
                self.skip_gap(&window);
                continue;
            }

            // Always move past the record, even if it fails to decode
            self.offset += size as u64;
            let data = match self.read_at(offset, size as u64) {
                Ok(result) => result,
                Err(_err) => return self.fatal(offset, size),
            };
            if data.len() < size as usize {
                return Some(Err(RecordError {
                    offset,
                    size,
                    error: UsnJrnlError::TruncatedRecord,
                }));
            }

            let record = UsnRecord::parse_record(&data).map_err(|error| RecordError {
                offset,
                size,
                error,
            });
            return Some(record);
        }
        None
    }
}
