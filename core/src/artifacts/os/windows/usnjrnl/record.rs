/**
 * Decode a single `UsnJrnl` record. The scanner hands over exactly the bytes the record declares
 *
 * Version 2 records use 64 bit file references (48 bit entry + 16 bit sequence)
 * Version 3 records use 128 bit file references (ReFS). Version 3 support is best effort. We have not seen
 * real version 3 records in an NTFS `$J`, so the layout below follows the `USN_RECORD_V3` documentation only
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/api/winioctl/ns-winioctl-usn_record_v2`
 * `https://learn.microsoft.com/en-us/windows/win32/api/winioctl/ns-winioctl-usn_record_v3`
 */
use super::error::UsnJrnlError;
use crate::utils::{
    nom_helper::{
        nom_data, nom_signed_eight_bytes, nom_unsigned_eight_bytes, nom_unsigned_four_bytes,
        nom_unsigned_two_bytes,
    },
    strings::extract_utf16_string,
    time::filetime_to_datetime,
};
use chrono::{DateTime, Utc};

/// Smallest possible record. Everything before the filename
pub const MIN_RECORD_SIZE: u32 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum UsnRecord {
    V2(UsnRecordV2),
    /**Best effort. See module docs */
    V3(UsnRecordV3),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsnRecordV2 {
    pub minor_version: u16,
    pub mft_entry: u32,
    pub mft_sequence: u16,
    pub parent_mft_entry: u32,
    pub parent_mft_sequence: u16,
    pub update_sequence_number: i64,
    pub update_time: DateTime<Utc>,
    pub update_reason: u32,
    pub update_source_flags: u32,
    pub security_descriptor_id: u32,
    pub file_attributes: u32,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsnRecordV3 {
    pub minor_version: u16,
    pub mft_entry: u128,
    pub parent_mft_entry: u128,
    pub update_sequence_number: i64,
    pub update_time: DateTime<Utc>,
    pub update_reason: u32,
    pub update_source_flags: u32,
    pub security_descriptor_id: u32,
    pub file_attributes: u32,
    pub filename: String,
}

impl UsnRecord {
    /// Decode a framed record based on its major version
    pub fn parse_record(data: &[u8]) -> Result<UsnRecord, UsnJrnlError> {
        let major_result = UsnRecord::major_version(data);
        let major_version = match major_result {
            Ok((_, result)) => result,
            Err(_err) => return Err(UsnJrnlError::TruncatedRecord),
        };

        let version_two = 2;
        let version_three = 3;
        let record_result = if major_version == version_two {
            UsnRecordV2::parse_v2(data).map(|(_, record)| UsnRecord::V2(record))
        } else if major_version == version_three {
            UsnRecordV3::parse_v3(data).map(|(_, record)| UsnRecord::V3(record))
        } else {
            return Err(UsnJrnlError::UnrecognizedVersion);
        };

        match record_result {
            Ok(result) => Ok(result),
            Err(_err) => Err(UsnJrnlError::TruncatedRecord),
        }
    }

    fn major_version(data: &[u8]) -> nom::IResult<&[u8], u16> {
        let (input, _size) = nom_unsigned_four_bytes(data)?;
        nom_unsigned_two_bytes(input)
    }

    pub fn major_version_number(&self) -> u16 {
        match self {
            UsnRecord::V2(_) => 2,
            UsnRecord::V3(_) => 3,
        }
    }

    pub fn minor_version(&self) -> u16 {
        match self {
            UsnRecord::V2(record) => record.minor_version,
            UsnRecord::V3(record) => record.minor_version,
        }
    }

    pub fn file_reference(&self) -> u128 {
        match self {
            UsnRecord::V2(record) => record.mft_entry as u128,
            UsnRecord::V3(record) => record.mft_entry,
        }
    }

    /// Version 3 records do not carry a separate sequence number
    pub fn file_sequence(&self) -> u16 {
        match self {
            UsnRecord::V2(record) => record.mft_sequence,
            UsnRecord::V3(_) => 0,
        }
    }

    pub fn parent_reference(&self) -> u128 {
        match self {
            UsnRecord::V2(record) => record.parent_mft_entry as u128,
            UsnRecord::V3(record) => record.parent_mft_entry,
        }
    }

    pub fn parent_sequence(&self) -> u16 {
        match self {
            UsnRecord::V2(record) => record.parent_mft_sequence,
            UsnRecord::V3(_) => 0,
        }
    }

    pub fn update_sequence_number(&self) -> i64 {
        match self {
            UsnRecord::V2(record) => record.update_sequence_number,
            UsnRecord::V3(record) => record.update_sequence_number,
        }
    }

    pub fn update_time(&self) -> &DateTime<Utc> {
        match self {
            UsnRecord::V2(record) => &record.update_time,
            UsnRecord::V3(record) => &record.update_time,
        }
    }

    pub fn update_reason(&self) -> u32 {
        match self {
            UsnRecord::V2(record) => record.update_reason,
            UsnRecord::V3(record) => record.update_reason,
        }
    }

    pub fn update_source_flags(&self) -> u32 {
        match self {
            UsnRecord::V2(record) => record.update_source_flags,
            UsnRecord::V3(record) => record.update_source_flags,
        }
    }

    pub fn security_descriptor_id(&self) -> u32 {
        match self {
            UsnRecord::V2(record) => record.security_descriptor_id,
            UsnRecord::V3(record) => record.security_descriptor_id,
        }
    }

    pub fn file_attributes(&self) -> u32 {
        match self {
            UsnRecord::V2(record) => record.file_attributes,
            UsnRecord::V3(record) => record.file_attributes,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            UsnRecord::V2(record) => &record.filename,
            UsnRecord::V3(record) => &record.filename,
        }
    }
}

impl UsnRecordV2 {
    pub(crate) fn parse_v2(data: &[u8]) -> nom::IResult<&[u8], UsnRecordV2> {
        let (input, _size) = nom_unsigned_four_bytes(data)?;
        let (input, _major_version) = nom_unsigned_two_bytes(input)?;
        let (input, minor_version) = nom_unsigned_two_bytes(input)?;

        // Only the lower 32 bits of the 48 bit entry are used
        let (input, mft_entry) = nom_unsigned_four_bytes(input)?;
        let (input, _upper_entry) = nom_unsigned_two_bytes(input)?;
        let (input, mft_sequence) = nom_unsigned_two_bytes(input)?;

        let (input, parent_mft_entry) = nom_unsigned_four_bytes(input)?;
        let (input, _upper_entry) = nom_unsigned_two_bytes(input)?;
        let (input, parent_mft_sequence) = nom_unsigned_two_bytes(input)?;

        let (input, update_sequence_number) = nom_signed_eight_bytes(input)?;
        let (input, usn_time) = nom_unsigned_eight_bytes(input)?;
        let (input, update_reason) = nom_unsigned_four_bytes(input)?;
        let (input, update_source_flags) = nom_unsigned_four_bytes(input)?;
        let (input, security_descriptor_id) = nom_unsigned_four_bytes(input)?;
        let (input, file_attributes) = nom_unsigned_four_bytes(input)?;
        let (input, name_size) = nom_unsigned_two_bytes(input)?;
        let (input, name_offset) = nom_unsigned_two_bytes(input)?;

        let (_, filename) = UsnRecord::get_name(data, name_offset, name_size)?;

        let record = UsnRecordV2 {
            minor_version,
            mft_entry,
            mft_sequence,
            parent_mft_entry,
            parent_mft_sequence,
            update_sequence_number,
            update_time: filetime_to_datetime(&usn_time),
            update_reason,
            update_source_flags,
            security_descriptor_id,
            file_attributes,
            filename,
        };
        Ok((input, record))
    }
}

impl UsnRecordV3 {
    pub(crate) fn parse_v3(data: &[u8]) -> nom::IResult<&[u8], UsnRecordV3> {
        let (input, _size) = nom_unsigned_four_bytes(data)?;
        let (input, _major_version) = nom_unsigned_two_bytes(input)?;
        let (input, minor_version) = nom_unsigned_two_bytes(input)?;

        let (input, mft_entry) = UsnRecordV3::file_id(input)?;
        let (input, parent_mft_entry) = UsnRecordV3::file_id(input)?;

        let (input, update_sequence_number) = nom_signed_eight_bytes(input)?;
        let (input, usn_time) = nom_unsigned_eight_bytes(input)?;
        let (input, update_reason) = nom_unsigned_four_bytes(input)?;
        let (input, update_source_flags) = nom_unsigned_four_bytes(input)?;
        let (input, security_descriptor_id) = nom_unsigned_four_bytes(input)?;
        let (input, file_attributes) = nom_unsigned_four_bytes(input)?;
        let (input, name_size) = nom_unsigned_two_bytes(input)?;
        let (input, name_offset) = nom_unsigned_two_bytes(input)?;

        let (_, filename) = UsnRecord::get_name(data, name_offset, name_size)?;

        let record = UsnRecordV3 {
            minor_version,
            mft_entry,
            parent_mft_entry,
            update_sequence_number,
            update_time: filetime_to_datetime(&usn_time),
            update_reason,
            update_source_flags,
            security_descriptor_id,
            file_attributes,
            filename,
        };
        Ok((input, record))
    }

    /// 128 bit file id stored as two little endian u64 values. Second value is the upper half
    fn file_id(data: &[u8]) -> nom::IResult<&[u8], u128> {
        let (input, lower) = nom_unsigned_eight_bytes(data)?;
        let (input, upper) = nom_unsigned_eight_bytes(input)?;
        let id = ((upper as u128) << 64) | lower as u128;
        Ok((input, id))
    }
}

impl UsnRecord {
    /// Filename lives at an offset relative to the start of the record. Both offset and size must fit in the record
    fn get_name(data: &[u8], name_offset: u16, name_size: u16) -> nom::IResult<&[u8], String> {
        let (name_start, _) = nom_data(data, name_offset as u64)?;
        let (input, name_data) = nom_data(name_start, name_size as u64)?;
        Ok((input, extract_utf16_string(name_data)))
    }
}
