/**
 * Journal and MFT records are fixed layouts of little endian integers
 * With nom we read each field in two steps, ex:
 *   `take X bytes`
 *   `le_uX` to number
 *
 * These functions keep the record parsers from repeating those two steps for every field
 */
use nom::{
    bytes::complete::take,
    number::complete::{le_i64, le_u8, le_u16, le_u32, le_u64},
};
use std::mem::size_of;

/**
 * Nom two (2) bytes to u16
 */
pub(crate) fn nom_unsigned_two_bytes(data: &[u8]) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;
    let (_, value) = le_u16(value_data)?;
    Ok((input, value))
}

/**
 * Nom one (1) byte to u8
 */
pub(crate) fn nom_unsigned_one_byte(data: &[u8]) -> nom::IResult<&[u8], u8> {
    let (input, value_data) = take(size_of::<u8>())(data)?;
    let (_, value) = le_u8(value_data)?;
    Ok((input, value))
}

/**
 * Nom four (4) bytes to u32
 */
pub(crate) fn nom_unsigned_four_bytes(data: &[u8]) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;
    let (_, value) = le_u32(value_data)?;
    Ok((input, value))
}

/**
 * Nom eight (8) bytes to u64
 */
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8]) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;
    let (_, value) = le_u64(value_data)?;
    Ok((input, value))
}

/**
 * Nom eight (8) bytes to i64
 */
pub(crate) fn nom_signed_eight_bytes(data: &[u8]) -> nom::IResult<&[u8], i64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;
    let (_, value) = le_i64(value_data)?;
    Ok((input, value))
}

/**
 * Nom an arbitrary amount of data and return the bytes remaining and bytes nom'd
 */
pub(crate) fn nom_data(data: &[u8], count: u64) -> nom::IResult<&[u8], &[u8]> {
    let (input, value) = take(count)(data)?;
    Ok((input, value))
}

#[cfg(test)]
mod tests {
    use super::{
        nom_data, nom_signed_eight_bytes, nom_unsigned_eight_bytes, nom_unsigned_four_bytes,
        nom_unsigned_one_byte, nom_unsigned_two_bytes,
    };

    #[test]
    fn test_nom_unsigned_two_bytes() {
        let test = [60, 0, 1];
        let (input, results) = nom_unsigned_two_bytes(&test).unwrap();
        assert_eq!(results, 60);
        assert_eq!(input, [1]);
    }

    #[test]
    fn test_nom_unsigned_one_byte() {
        let test = [12, 0];
        let (_, results) = nom_unsigned_one_byte(&test).unwrap();
        assert_eq!(results, 12);
    }

    #[test]
    fn test_nom_unsigned_four_bytes() {
        let test = [0, 0, 0, 128];
        let (_, results) = nom_unsigned_four_bytes(&test).unwrap();
        assert_eq!(results, 0x80000000);
    }

    #[test]
    fn test_nom_unsigned_eight_bytes() {
        let test = [220, 174, 212, 97, 67, 52, 217, 1];
        let (_, results) = nom_unsigned_eight_bytes(&test).unwrap();
        assert_eq!(results, 133195127992921820);
    }

    #[test]
    fn test_nom_signed_eight_bytes() {
        let test = [255, 255, 255, 255, 255, 255, 255, 255];
        let (_, results) = nom_signed_eight_bytes(&test).unwrap();
        assert_eq!(results, -1);
    }

    #[test]
    fn test_nom_data() {
        let test = [2, 0, 0, 0, 0, 0];
        let (input, results) = nom_data(&test, 4).unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_nom_data_short() {
        let test = [2, 0];
        assert!(nom_data(&test, 4).is_err());
    }
}
