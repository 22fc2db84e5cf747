/**
 * NTFS protects multi-sector records with an update sequence array (fixup)
 * The last two bytes of every 512 byte sector are replaced with a check value on disk. The real bytes are stored in
 * the array right after the check value
 */
use crate::utils::nom_helper::nom_data;
use log::debug;

const SECTOR_SIZE: usize = 512;
const FIXUP_SIZE: u64 = 2;

#[derive(Debug)]
pub(crate) struct Fixup {
    pub(crate) placeholder: Vec<u8>,
    pub(crate) original: Vec<Vec<u8>>,
}

impl Fixup {
    /// Parse the array. `count` includes the check value
    pub(crate) fn get_fixup(data: &[u8], count: u16) -> nom::IResult<&[u8], Fixup> {
        let (mut input, placeholder) = nom_data(data, FIXUP_SIZE)?;

        let mut original = Vec::new();
        for _ in 1..count {
            let (remaining, value) = nom_data(input, FIXUP_SIZE)?;
            original.push(value.to_vec());
            input = remaining;
        }

        let fix = Fixup {
            placeholder: placeholder.to_vec(),
            original,
        };

        Ok((input, fix))
    }

    /// Restore sector trailers that still hold the check value. Returns false if any sector did not match
    pub(crate) fn apply_fixup(entry: &mut [u8], fixup: &Fixup) -> bool {
        let mut applied = true;
        for (sector, fix) in fixup.original.iter().enumerate() {
            let end = (sector + 1) * SECTOR_SIZE;
            if end > entry.len() {
                debug!("[mft] Fixup array is larger than the record");
                return false;
            }

            let start = end - FIXUP_SIZE as usize;
            if entry[start..end] != fixup.placeholder[..] {
                debug!("[mft] Fixup check value mismatch in sector {sector}");
                applied = false;
                continue;
            }
            entry[start..end].copy_from_slice(fix);
        }
        applied
    }
}
