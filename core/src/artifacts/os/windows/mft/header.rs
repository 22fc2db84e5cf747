use crate::utils::nom_helper::{
    nom_unsigned_eight_bytes, nom_unsigned_four_bytes, nom_unsigned_two_bytes,
};

/// Size of every MFT FILE record we index
pub const MFT_RECORD_SIZE: usize = 1024;
/// `FILE` followed by the low byte of the fixup offset (0x30)
pub(crate) const MFT_SIGNATURE: &[u8] = b"FILE0";

#[derive(Debug)]
pub(crate) struct MftHeader {
    _sig: u32,
    pub(crate) fix_up_value_offset: u16,
    pub(crate) fix_up_count: u16,
    _transaction_seq: u64,
    _sequence: u16,
    _ref_count: u16,
    pub(crate) attrib_offset: u16,
    _entry_flags: u16,
    _used_size: u32,
    _total_size: u32,
    _mft_base_index: u32,
    _mft_base_seq: u16,
    _next_attrib_id: u16,
    pub(crate) index: u32,
}

impl MftHeader {
    /// Parse the 48 byte header at the start of a FILE record
    pub(crate) fn parse_header(data: &[u8]) -> nom::IResult<&[u8], MftHeader> {
        let (input, sig) = nom_unsigned_four_bytes(data)?;
        let (input, fix_up_value_offset) = nom_unsigned_two_bytes(input)?;
        let (input, fix_up_count) = nom_unsigned_two_bytes(input)?;
        let (input, transaction_seq) = nom_unsigned_eight_bytes(input)?;
        let (input, sequence) = nom_unsigned_two_bytes(input)?;
        let (input, ref_count) = nom_unsigned_two_bytes(input)?;
        let (input, attrib_offset) = nom_unsigned_two_bytes(input)?;
        let (input, entry_flags) = nom_unsigned_two_bytes(input)?;

        let (input, used_size) = nom_unsigned_four_bytes(input)?;
        let (input, total_size) = nom_unsigned_four_bytes(input)?;
        let (input, mft_base_index) = nom_unsigned_four_bytes(input)?;
        let (input, _) = nom_unsigned_two_bytes(input)?;
        let (input, mft_base_seq) = nom_unsigned_two_bytes(input)?;

        let (input, next_attrib_id) = nom_unsigned_two_bytes(input)?;
        let (input, _padding) = nom_unsigned_two_bytes(input)?;
        let (input, index) = nom_unsigned_four_bytes(input)?;

        let header = MftHeader {
            _sig: sig,
            fix_up_value_offset,
            fix_up_count,
            _transaction_seq: transaction_seq,
            _sequence: sequence,
            _ref_count: ref_count,
            attrib_offset,
            _entry_flags: entry_flags,
            _used_size: used_size,
            _total_size: total_size,
            _mft_base_index: mft_base_index,
            _mft_base_seq: mft_base_seq,
            _next_attrib_id: next_attrib_id,
            index,
        };

        Ok((input, header))
    }
}

#[cfg(test)]
mod tests {
    use super::MftHeader;

    #[test]
    fn test_parse_header() {
        let test = [
            70, 73, 76, 69, 48, 0, 3, 0, 182, 200, 59, 224, 6, 0, 0, 0, 1, 0, 1, 0, 56, 0, 1, 0,
            80, 2, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 23, 0, 0, 0, 39, 0, 0, 0,
        ];

        let (input, result) = MftHeader::parse_header(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(result.fix_up_value_offset, 48);
        assert_eq!(result.fix_up_count, 3);
        assert_eq!(result.attrib_offset, 56);
        assert_eq!(result.index, 39);
    }

    #[test]
    fn test_parse_header_short() {
        let test = [70, 73, 76, 69, 48, 0, 3, 0];
        assert!(MftHeader::parse_header(&test).is_err());
    }
}
