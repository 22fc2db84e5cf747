/**
 * `UsnJrnl` records store the update reason, update source, and file attributes as bitmasks
 * Each table maps a single bit value to a label. Tables are sorted by bit value so combined
 * flags always render in the same order
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/api/winioctl/ns-winioctl-usn_record_v2`
 * `https://learn.microsoft.com/en-us/windows/win32/fileio/file-attribute-constants`
 */

/// Bit value to label mapping used by `decode_flags`
pub type FlagTable = [(u32, &'static str)];

/// Short update reason labels. The default vocabulary
pub static REASON_SHORT: &FlagTable = &[
    (0x0, " "),
    (0x1, "data_overwritten"),
    (0x2, "data_appended"),
    (0x4, "data_truncated"),
    (0x10, "ads_data_overwritten"),
    (0x20, "ads_data_appended"),
    (0x40, "ads_data_truncated"),
    (0x100, "file_created"),
    (0x200, "file_deleted"),
    (0x400, "extended_attrib_changed"),
    (0x800, "access_changed"),
    (0x1000, "file_old_name"),
    (0x2000, "file_new_name"),
    (0x4000, "content_indexed_changed"),
    (0x8000, "basic_info_changed"),
    (0x10000, "hardlink_changed"),
    (0x20000, "compression_changed"),
    (0x40000, "encryption_changed"),
    (0x80000, "objid_changed"),
    (0x100000, "reparse_changed"),
    (0x200000, "ads_added_or_deleted"),
    (0x400000, "transacted_changed"),
    (0x80000000, "file_closed"),
];

/// Long update reason descriptions
pub static REASON_LONG: &FlagTable = &[
    (0x0, " "),
    (0x1, "The data in the file or directory is overwritten."),
    (0x2, "The file or directory was added to."),
    (0x4, "The file or directory was truncated."),
    (
        0x10,
        "Data in one or more named data streams for the file was overwritten.",
    ),
    (0x20, "One or more named data streams for the file were added to."),
    (0x40, "One or more named data streams for the file was truncated."),
    (0x100, "The file or directory was created for the first time."),
    (0x200, "The file or directory was deleted."),
    (
        0x400,
        "The user made a change to the file's or directory's extended attributes.",
    ),
    (
        0x800,
        "A change was made in the access rights to the file or directory.",
    ),
    (
        0x1000,
        "The file or directory was renamed and the file name in this structure is the previous name.",
    ),
    (
        0x2000,
        "The file or directory was renamed and the file name in this structure is the new name.",
    ),
    (
        0x4000,
        "A user toggled the FILE_ATTRIBUTE_NOT_CONTENT_INDEXED attribute.",
    ),
    (
        0x8000,
        "A user has either changed one or more file or directory attributes or one or more time stamps.",
    ),
    (
        0x10000,
        "An NTFS hard link was added to or removed from the file or directory.",
    ),
    (
        0x20000,
        "The compression state of the file or directory was changed from or to compressed.",
    ),
    (0x40000, "The file or directory was encrypted or decrypted."),
    (
        0x80000,
        "The object identifier of the file or directory was changed.",
    ),
    (
        0x100000,
        "The reparse point contained in the file or directory was changed, or a reparse point was added to or deleted from the file or directory.",
    ),
    (
        0x200000,
        "A named stream has been added to or removed from the file or a named stream has been renamed.",
    ),
    (
        0x400000,
        "The file or directory was modified as part of a transaction.",
    ),
    (0x80000000, "The file or directory was closed."),
];

/// Update source labels. Almost always 0
pub static SOURCE_INFO: &FlagTable = &[
    (0x0, ""),
    (
        0x1,
        "The operation provides information about a change to the file or directory made by the operating system.",
    ),
    (
        0x2,
        "The operation adds a private data stream to a file or directory.",
    ),
    (
        0x4,
        "The operation is modifying a file to match the contents of the same file which exists in another member of the replica set.",
    ),
];

/// File attribute labels
pub static FILE_ATTRIBUTES: &FlagTable = &[
    (0x0, " "),
    (0x1, "READONLY"),
    (0x2, "HIDDEN"),
    (0x4, "SYSTEM"),
    (0x10, "DIRECTORY"),
    (0x20, "ARCHIVE"),
    (0x40, "DEVICE"),
    (0x80, "NORMAL"),
    (0x100, "TEMPORARY"),
    (0x200, "SPARSE_FILE"),
    (0x400, "REPARSE_POINT"),
    (0x800, "COMPRESSED"),
    (0x1000, "OFFLINE"),
    (0x2000, "NOT_CONTENT_INDEXED"),
    (0x4000, "ENCRYPTED"),
    (0x10000, "VIRTUAL"),
];

/**
 * Convert a bitmask to labels
 * A value with its own entry returns that label. Otherwise every set bit with an entry is
 * joined with `"; "` in ascending bit order. Bits without an entry are dropped
 */
pub fn decode_flags(table: &FlagTable, bitmask: u32) -> String {
    if let Some((_, label)) = table.iter().find(|(value, _)| *value == bitmask) {
        return (*label).to_string();
    }

    let labels: Vec<&str> = table
        .iter()
        .filter(|(value, _)| value & bitmask != 0)
        .map(|(_, label)| *label)
        .collect();
    labels.join("; ")
}
