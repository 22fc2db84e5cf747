/**
 * `UsnJrnl` is a sparse Windows binary file that tracks changes to files and directories.
 * Located at the alternative data stream (ADS) \<drive\>:\$Extend\$UsnJrnl:$J
 * Parsing this data can sometimes show files that have been deleted. However, depending on the file activity
 * on the system entries in the `UsnJrnl` may get overwritten quickly
 *
 * This parser works on an already extracted `$J` stream. An extracted `$MFT` can be provided to rebuild full paths
 *
 * References:
 * `https://github.com/libyal/libfsntfs/blob/main/documentation/New%20Technologies%20File%20System%20(NTFS).asciidoc#usn_change_journal`
 *
 * Other Parsers:
 * `https://f001.backblazeb2.com/file/EricZimmermanTools/MFTECmd.zip`
 * `https://github.com/Velocidex/velociraptor`
 */
use super::{
    error::UsnJrnlError,
    flags::{decode_flags, FlagTable, FILE_ATTRIBUTES, REASON_LONG, REASON_SHORT, SOURCE_INFO},
    record::UsnRecord,
    scanner::UsnScanner,
};
use crate::{
    artifacts::os::windows::mft::{
        index::MftIndex,
        resolver::{PathResolver, ORPHAN},
    },
    filesystem::files::{file_reader, skip_leading_zeros},
    structs::toml::UsnJrnlOptions,
    utils::time::datetime_to_string,
};
use log::{error, info, warn};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
};

const REASON_CLOSE: u32 = 0x80000000;
const REASON_RENAME_OLD_NAME: u32 = 0x1000;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UsnJrnlEntry {
    /**UTC. `YYYY-MM-DD HH:MM:SS.ffffff` */
    pub update_time: String,
    pub unix_time: i64,
    pub major_version: u16,
    pub mft_entry: u128,
    pub mft_sequence: u16,
    pub parent_mft_entry: u128,
    pub parent_mft_sequence: u16,
    pub update_sequence_number: i64,
    pub filename: String,
    /**Same as `filename` unless an MFT index was provided */
    pub full_path: String,
    pub file_attributes: String,
    pub update_reason: String,
    pub update_source_flags: String,
    pub security_descriptor_id: u32,
}

/// Counts for a finished (or in progress) journal parse
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JournalSummary {
    /**Records decoded, before filtering */
    pub decoded: u64,
    /**Records returned after filtering */
    pub emitted: u64,
    /**Records that could not be decoded */
    pub skipped: u64,
}

/// Decoded, filtered, and labeled journal entries
pub struct JournalEntries<'a, R: Read + Seek> {
    scanner: UsnScanner<R>,
    reasons: &'static FlagTable,
    all_records: bool,
    resolver: Option<PathResolver<'a>>,
    summary: JournalSummary,
}

impl<'a, R: Read + Seek> JournalEntries<'a, R> {
    pub fn new(
        scanner: UsnScanner<R>,
        options: &UsnJrnlOptions,
        index: Option<&'a MftIndex>,
    ) -> JournalEntries<'a, R> {
        let reasons = if options.long_flags {
            REASON_LONG
        } else {
            REASON_SHORT
        };
        JournalEntries {
            scanner,
            reasons,
            all_records: options.all_records,
            resolver: index.map(PathResolver::new),
            summary: JournalSummary::default(),
        }
    }

    pub fn summary(&self) -> &JournalSummary {
        &self.summary
    }

    /// By default only close and rename (old name) records are kept. They hold the final state of a change
    fn keep(&self, record: &UsnRecord) -> bool {
        self.all_records || record.update_reason() & (REASON_CLOSE | REASON_RENAME_OLD_NAME) != 0
    }

    fn entry(&mut self, record: &UsnRecord) -> UsnJrnlEntry {
        let filename = record.filename().to_string();
        let full_path = match &mut self.resolver {
            Some(resolver) => match u32::try_from(record.parent_reference()) {
                Ok(parent) => resolver.full_path(parent, &filename),
                Err(_err) => format!("{ORPHAN}\\{filename}"),
            },
            None => filename.clone(),
        };

        UsnJrnlEntry {
            update_time: datetime_to_string(record.update_time()),
            unix_time: record.update_time().timestamp(),
            major_version: record.major_version_number(),
            mft_entry: record.file_reference(),
            mft_sequence: record.file_sequence(),
            parent_mft_entry: record.parent_reference(),
            parent_mft_sequence: record.parent_sequence(),
            update_sequence_number: record.update_sequence_number(),
            filename,
            full_path,
            file_attributes: decode_flags(FILE_ATTRIBUTES, record.file_attributes()),
            update_reason: decode_flags(self.reasons, record.update_reason()),
            update_source_flags: decode_flags(SOURCE_INFO, record.update_source_flags()),
            security_descriptor_id: record.security_descriptor_id(),
        }
    }
}

impl<R: Read + Seek> Iterator for JournalEntries<'_, R> {
    type Item = Result<UsnJrnlEntry, UsnJrnlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.scanner.next()? {
                Ok(result) => result,
                Err(err) if err.is_fatal() => {
                    error!("[usnjrnl] Stopping journal parse: {err}");
                    return Some(Err(err.error));
                }
                Err(err) => {
                    warn!("[usnjrnl] Skipping record: {err}");
                    self.summary.skipped += 1;
                    continue;
                }
            };

            self.summary.decoded += 1;
            if !self.keep(&record) {
                continue;
            }
            self.summary.emitted += 1;
            return Some(Ok(self.entry(&record)));
        }
    }
}

/// Open an extracted `$J` file and start parsing at the first non-zero byte
pub fn parse_journal_file<'a>(
    options: &UsnJrnlOptions,
    index: Option<&'a MftIndex>,
) -> Result<JournalEntries<'a, BufReader<File>>, UsnJrnlError> {
    let path = &options.journal;
    let mut reader = match file_reader(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[usnjrnl] Could not open UsnJrnl file {path}: {err:?}");
            return Err(UsnJrnlError::ReadFile);
        }
    };

    let leading_zeros = match skip_leading_zeros(&mut reader) {
        Ok(result) => result,
        Err(err) => {
            error!("[usnjrnl] Could not read UsnJrnl file {path}: {err:?}");
            return Err(UsnJrnlError::ReadFile);
        }
    };
    // The first non-zero byte can be the upper byte of a record size. Records are 8 byte aligned
    let alignment = 8;
    let offset = leading_zeros - leading_zeros % alignment;
    info!("[usnjrnl] Parsing {path} starting at offset {offset}");

    let scanner = UsnScanner::new(reader, offset);
    Ok(JournalEntries::new(scanner, options, index))
}
