/// Get a UTF16 string from provided bytes data. Stops at the first NUL character
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let min_byte_size = 2;
    let utf16_data: Vec<u16> = data
        .chunks_exact(min_byte_size)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .take_while(|wide_char| *wide_char != 0)
        .collect();

    // Journal names are not strict UTF16, unpaired surrogates show up in the wild
    String::from_utf16_lossy(&utf16_data)
}

/**
 * Render an MFT `$FILE_NAME` name for display
 * Printable ASCII characters are kept. Everything else becomes a `0x` escape of the low byte
 * NUL characters are dropped
 */
pub(crate) fn escape_utf16_name(data: &[u8]) -> String {
    let min_byte_size = 2;
    let printable = 0x20..0x80;

    let mut name = String::new();
    for wide_char in data.chunks_exact(min_byte_size) {
        let value = u16::from_le_bytes([wide_char[0], wide_char[1]]);
        if value == 0 {
            continue;
        }

        if printable.contains(&value) {
            name.push(char::from(wide_char[0]));
            continue;
        }
        name.push_str(&format!("0x{:02x}", value & 0xff));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::{escape_utf16_name, extract_utf16_string};

    #[test]
    fn test_extract_utf16_string() {
        let test = [
            98, 0, 57, 0, 55, 0, 102, 0, 46, 0, 106, 0, 115, 0, 111, 0, 110, 0, 108, 0,
        ];
        assert_eq!(extract_utf16_string(&test), "b97f.jsonl");
    }

    #[test]
    fn test_extract_utf16_string_stops_at_nul() {
        let test = [97, 0, 98, 0, 0, 0, 99, 0];
        assert_eq!(extract_utf16_string(&test), "ab");
    }

    #[test]
    fn test_extract_utf16_string_odd_length() {
        let test = [97, 0, 98];
        assert_eq!(extract_utf16_string(&test), "a");
    }

    #[test]
    fn test_extract_utf16_string_non_ascii() {
        // "café"
        let test = [99, 0, 97, 0, 102, 0, 233, 0];
        assert_eq!(extract_utf16_string(&test), "café");
    }

    #[test]
    fn test_escape_utf16_name() {
        let test = [36, 0, 77, 0, 70, 0, 84, 0];
        assert_eq!(escape_utf16_name(&test), "$MFT");
    }

    #[test]
    fn test_escape_utf16_name_non_printable() {
        // "caf" + U+00E9 + U+4E2D
        let test = [99, 0, 97, 0, 102, 0, 233, 0, 45, 78];
        assert_eq!(escape_utf16_name(&test), "caf0xe90x2d");
    }

    #[test]
    fn test_escape_utf16_name_skips_nul() {
        let test = [97, 0, 0, 0, 98, 0];
        assert_eq!(escape_utf16_name(&test), "ab");
    }
}
