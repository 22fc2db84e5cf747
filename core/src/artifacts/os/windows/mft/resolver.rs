/**
 * Rebuild full paths by walking parent entry numbers up to the root directory (entry 5)
 *
 * Paths are relative to the volume root (`.\Users\...`). Entries whose chain breaks are marked:
 *   `NoParent\` the chain reached a record without a `$FILE_NAME` attribute
 *   `[ORPHAN]\` the chain reached a parent that is not in the index
 *
 * Parent cycles are not detected. A cycle that never reaches entry 5 will not resolve
 */
use super::index::MftIndex;
use std::collections::HashMap;

/// MFT entry number of the volume root directory
pub const ROOT_ENTRY: u32 = 5;
const ROOT_PATH: &str = ".";
const NO_PARENT: &str = "NoParent";
pub(crate) const ORPHAN: &str = "[ORPHAN]";

pub struct PathResolver<'a> {
    index: &'a MftIndex,
    cache: HashMap<u32, String>,
}

impl<'a> PathResolver<'a> {
    pub fn new(index: &'a MftIndex) -> PathResolver<'a> {
        PathResolver {
            index,
            cache: HashMap::new(),
        }
    }

    /// Full path for an entry number. `None` if the entry is not in the index
    pub fn resolve_path(&mut self, mft_entry: u32) -> Option<String> {
        if mft_entry == ROOT_ENTRY {
            return Some(String::from(ROOT_PATH));
        }
        if let Some(path) = self.cache.get(&mft_entry) {
            return Some(path.clone());
        }

        let index = self.index;
        let mut current = index.get(&mft_entry)?;
        let mut path = current.name.clone();
        let mut first_parent = true;
        loop {
            let parent = match current.parent_mft_entry {
                Some(result) => result,
                None => {
                    path = format!("{NO_PARENT}\\{path}");
                    break;
                }
            };
            if parent == ROOT_ENTRY {
                path = format!("{ROOT_PATH}\\{path}");
                break;
            }

            // Only the direct parent is checked against already resolved paths
            if first_parent {
                if let Some(parent_path) = self.cache.get(&parent) {
                    path = format!("{parent_path}\\{path}");
                    break;
                }
            }
            first_parent = false;

            current = match index.get(&parent) {
                Some(result) => result,
                None => {
                    path = format!("{ORPHAN}\\{path}");
                    break;
                }
            };
            path = format!("{}\\{path}", current.name);
        }

        self.cache.insert(mft_entry, path.clone());
        Some(path)
    }

    /// Join a journal filename to the resolved path of its parent directory
    pub fn full_path(&mut self, parent_mft_entry: u32, filename: &str) -> String {
        match self.resolve_path(parent_mft_entry) {
            Some(path) => format!("{path}\\{filename}"),
            None => format!("{ORPHAN}\\{filename}"),
        }
    }
}
