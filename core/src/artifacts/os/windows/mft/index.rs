/**
 * Build a lookup of MFT entry number to name and parent entry number
 *
 * Only the `$FILE_NAME` attribute is needed to rebuild paths. Records can have several (DOS 8.3, Win32, hard links).
 * The last one in the record is used, which is usually the Win32 long name but this is not guaranteed
 *
 * References:
 * `https://github.com/libyal/libfsntfs/blob/main/documentation/New%20Technologies%20File%20System%20(NTFS).asciidoc#mft_entry`
 */
use super::{
    error::MftError,
    fixup::Fixup,
    header::{MftHeader, MFT_RECORD_SIZE, MFT_SIGNATURE},
};
use crate::{
    filesystem::files::file_reader,
    utils::{
        nom_helper::{
            nom_data, nom_unsigned_four_bytes, nom_unsigned_one_byte, nom_unsigned_two_bytes,
        },
        strings::escape_utf16_name,
    },
};
use log::{error, info, warn};
use std::{collections::HashMap, io::Read};

const ATTRIBUTE_END: u32 = 0xffffffff;
const FILENAME_ATTRIBUTE: u32 = 0x30;
const NO_PARENT_ENTRY: u32 = 0xffffffff;
/// Resident attribute header size. The attribute name (if any) follows it
const RESIDENT_HEADER_SIZE: u64 = 24;
/// Parent reference (8), four timestamps (32), sizes (16), flags (4), reparse (4)
const FILENAME_NAME_SIZE_OFFSET: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub mft_entry: u32,
    /**Non-printable characters are escaped as `0xNN` */
    pub name: String,
    /**`None` if the record has no `$FILE_NAME` attribute or the parent is recorded as -1 */
    pub parent_mft_entry: Option<u32>,
}

pub type MftIndex = HashMap<u32, IndexEntry>;

/// Read every 1024 byte record from the reader and index the valid FILE records
pub fn build_index<R: Read>(mut reader: R) -> Result<MftIndex, MftError> {
    let mut index = HashMap::new();
    let mut offset: u64 = 0;
    let mut total = 0;

    loop {
        let mut record = Vec::with_capacity(MFT_RECORD_SIZE);
        let read_result = reader
            .by_ref()
            .take(MFT_RECORD_SIZE as u64)
            .read_to_end(&mut record);
        if let Err(err) = read_result {
            error!("[mft] Could not read MFT record at offset {offset}: {err:?}");
            return Err(MftError::ReadFile);
        }

        if record.is_empty() {
            break;
        }
        total += 1;

        if !record.starts_with(MFT_SIGNATURE) {
            offset += record.len() as u64;
            continue;
        }
        if record.len() < MFT_RECORD_SIZE {
            warn!(
                "[mft] Record at offset {offset} is only {} bytes. Skipping",
                record.len()
            );
            break;
        }

        match parse_record(&mut record, offset) {
            Ok(entry) => {
                // Duplicate entry numbers replace earlier ones
                index.insert(entry.mft_entry, entry);
            }
            Err(err) => warn!("[mft] Skipping record at offset {offset}: {err}"),
        }
        offset += MFT_RECORD_SIZE as u64;
    }

    info!("[mft] Indexed {} of {total} MFT records", index.len());
    Ok(index)
}

/// Index an extracted `$MFT` file
pub fn build_index_file(path: &str) -> Result<MftIndex, MftError> {
    let reader = match file_reader(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[mft] Could not open MFT file {path}: {err:?}");
            return Err(MftError::ReadFile);
        }
    };
    info!("[mft] Building path index from {path}");
    build_index(reader)
}

/// Apply fixups and walk the attribute list of a single FILE record
fn parse_record(record: &mut [u8], offset: u64) -> Result<IndexEntry, MftError> {
    let header = match MftHeader::parse_header(record) {
        Ok((_, result)) => result,
        Err(_err) => return Err(MftError::TruncatedRecord),
    };

    // A damaged fixup array does not stop the attribute walk. The raw bytes are used instead
    let fixup = record
        .get(header.fix_up_value_offset as usize..)
        .and_then(|data| Fixup::get_fixup(data, header.fix_up_count).ok())
        .map(|(_, result)| result);
    match fixup {
        Some(result) => {
            if !Fixup::apply_fixup(record, &result) {
                warn!("[mft] Fixup did not fully apply to record at offset {offset}. Using raw sector bytes");
            }
        }
        None => warn!(
            "[mft] Could not read fixup array ({} values) for record at offset {offset}. Using raw bytes",
            header.fix_up_count
        ),
    }

    let mut entry = IndexEntry {
        mft_entry: header.index,
        name: String::new(),
        parent_mft_entry: None,
    };

    let mut attrib_start = header.attrib_offset as usize;
    loop {
        let attribute = match record.get(attrib_start..) {
            Some(result) => result,
            None => return Err(MftError::UnterminatedAttributes),
        };
        let (attrib_type, attrib_size) = match attribute_header(attribute) {
            Ok((_, result)) => result,
            Err(_err) => return Err(MftError::UnterminatedAttributes),
        };

        if attrib_type == ATTRIBUTE_END {
            break;
        }
        if attrib_size == 0 {
            return Err(MftError::UnterminatedAttributes);
        }

        if attrib_type == FILENAME_ATTRIBUTE {
            let (parent, name) = match filename_attribute(attribute) {
                Ok((_, result)) => result,
                Err(_err) => return Err(MftError::TruncatedRecord),
            };
            entry.parent_mft_entry = parent;
            entry.name = name;
        }

        attrib_start += attrib_size as usize;
    }

    Ok(entry)
}

/// Attribute type and total size
fn attribute_header(data: &[u8]) -> nom::IResult<&[u8], (u32, u16)> {
    let (input, attrib_type) = nom_unsigned_four_bytes(data)?;
    if attrib_type == ATTRIBUTE_END {
        return Ok((input, (attrib_type, 0)));
    }
    let (input, size) = nom_unsigned_two_bytes(input)?;
    Ok((input, (attrib_type, size)))
}

/// Parent entry number and escaped name from a resident `$FILE_NAME` attribute
fn filename_attribute(data: &[u8]) -> nom::IResult<&[u8], (Option<u32>, String)> {
    let name_size_offset = 9;
    let (input, _) = nom_data(data, name_size_offset)?;
    let (_, attrib_name_size) = nom_unsigned_one_byte(input)?;

    // adjust for UTF16. Double the name size
    let adjust = 2;
    let (input, _) = nom_data(data, RESIDENT_HEADER_SIZE + attrib_name_size as u64 * adjust)?;
    let (input, parent_mft) = nom_unsigned_four_bytes(input)?;
    let (input, _) = nom_data(input, FILENAME_NAME_SIZE_OFFSET)?;
    let (input, name_size) = nom_unsigned_one_byte(input)?;
    let (input, _namespace) = nom_unsigned_one_byte(input)?;
    let (input, name_data) = nom_data(input, name_size as u64 * adjust)?;

    // -1 marks an entry without a parent
    let parent = if parent_mft == NO_PARENT_ENTRY {
        None
    } else {
        Some(parent_mft)
    };
    Ok((input, (parent, escape_utf16_name(name_data))))
}
