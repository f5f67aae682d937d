//! Applications stored as directories on disk
//!
//! Layout, per storage root:
//!
//! ```text
//! <root>/<16 uppercase hex digit id>/control.toml   name, author, version, icon
//! <root>/<16 uppercase hex digit id>/...            application content
//! ```
//!
//! An application may have content on both roots; metadata is read from the
//! first root that has a control file.

use super::{ControlData, Inventory, OccupiedSize, Record, StorageSpace};
use crate::error::InventoryError;
use crate::model::{AppId, StorageId};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CONTROL_FILE: &str = "control.toml";

#[derive(Debug, Deserialize)]
struct ControlFile {
    name: String,
    #[serde(default)]
    author: String,
    #[serde(default, alias = "display_version")]
    version: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryInventory {
    roots: Vec<(StorageId, PathBuf)>,
}

impl DirectoryInventory {
    pub fn new(internal: Option<PathBuf>, removable: Option<PathBuf>) -> Self {
        let roots = [(StorageId::Internal, internal), (StorageId::Removable, removable)]
            .into_iter()
            .filter_map(|(storage, root)| root.map(|r| (storage, r)))
            .collect();
        Self { roots }
    }

    pub fn root(&self, storage: StorageId) -> Option<&Path> {
        self.roots
            .iter()
            .find(|(s, _)| *s == storage)
            .map(|(_, root)| root.as_path())
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn app_dirs(&self, id: AppId) -> impl Iterator<Item = (StorageId, PathBuf)> + '_ {
        let name = id.to_string();
        self.roots
            .iter()
            .map(move |(storage, root)| (*storage, root.join(&name)))
    }

    /// Ids present on any root, ascending so paging is stable.
    fn installed_ids(&self) -> Result<BTreeSet<AppId>, InventoryError> {
        let mut ids = BTreeSet::new();
        for (storage, root) in &self.roots {
            let read_dir = match fs::read_dir(root) {
                Ok(rd) => rd,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("{} storage root {} does not exist", storage, root.display());
                    continue;
                }
                Err(e) => return Err(InventoryError::io(root, e)),
            };

            for dir_entry in read_dir {
                let dir_entry = dir_entry.map_err(|e| InventoryError::io(root, e))?;
                let is_dir = dir_entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    continue;
                }
                let file_name = dir_entry.file_name();
                match file_name.to_str().and_then(parse_dir_name) {
                    Some(id) => {
                        ids.insert(id);
                    }
                    None => debug!("skipping non-application directory {:?}", file_name),
                }
            }
        }
        Ok(ids)
    }
}

/// Application directories are named by exactly 16 uppercase hex digits,
/// the same spelling `AppId` displays as, so lookups by id find them again.
fn parse_dir_name(name: &str) -> Option<AppId> {
    let is_upper_hex = |c: char| c.is_ascii_digit() || ('A'..='F').contains(&c);
    if name.len() != 16 || !name.chars().all(is_upper_hex) {
        return None;
    }
    name.parse().ok()
}

fn dir_size(dir: &Path) -> Result<u64, InventoryError> {
    let mut total = 0u64;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            InventoryError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .map_err(|e| InventoryError::io(entry.path(), e.into()))?;
            total = total.saturating_add(metadata.len());
        }
    }
    Ok(total)
}

/// Total/free space of the disk whose mount point is the longest prefix of
/// `path`.
fn disk_space_for_path(path: &Path) -> Option<StorageSpace> {
    use sysinfo::Disks;

    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let disks = Disks::new_with_refreshed_list();

    let mut best: Option<(usize, StorageSpace)> = None;
    for disk in disks.list() {
        let mount = disk.mount_point();
        if path.starts_with(mount) {
            let len = mount.as_os_str().len();
            if best.map(|(best_len, _)| len > best_len).unwrap_or(true) {
                let space = StorageSpace {
                    total: disk.total_space(),
                    free: disk.available_space(),
                };
                best = Some((len, space));
            }
        }
    }
    best.map(|(_, space)| space)
}

impl Inventory for DirectoryInventory {
    fn list_records(&self, offset: usize, limit: usize) -> Result<Vec<Record>, InventoryError> {
        Ok(self
            .installed_ids()?
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|id| Record { id })
            .collect())
    }

    fn control_data(&self, id: AppId) -> Result<ControlData, InventoryError> {
        for (_, dir) in self.app_dirs(id) {
            let path = dir.join(CONTROL_FILE);
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(InventoryError::io(path, e)),
            };

            let file: ControlFile = toml::from_str(&text).map_err(|e| InventoryError::Malformed {
                id,
                reason: e.to_string(),
            })?;
            if file.name.trim().is_empty() {
                return Err(InventoryError::Malformed {
                    id,
                    reason: "empty name".to_string(),
                });
            }
            return Ok(ControlData {
                name: file.name,
                author: file.author,
                display_version: file.version,
                icon: file.icon,
            });
        }

        Err(InventoryError::Malformed {
            id,
            reason: format!("no {} found", CONTROL_FILE),
        })
    }

    fn occupied_size(&self, id: AppId) -> Result<OccupiedSize, InventoryError> {
        let mut size = OccupiedSize::default();
        for (storage, dir) in self.app_dirs(id) {
            if !dir.is_dir() {
                continue;
            }
            let bytes = dir_size(&dir)?;
            match storage {
                StorageId::Internal => size.internal = bytes,
                StorageId::Removable => size.removable = bytes,
            }
        }
        Ok(size)
    }

    fn delete(&self, id: AppId) -> Result<(), InventoryError> {
        let mut removed = false;
        for (_, dir) in self.app_dirs(id) {
            if !dir.exists() {
                continue;
            }
            fs::remove_dir_all(&dir).map_err(|e| InventoryError::io(&dir, e))?;
            removed = true;
        }
        if removed {
            Ok(())
        } else {
            Err(InventoryError::NotFound(id))
        }
    }

    fn storage_space(&self, storage: StorageId) -> Result<StorageSpace, InventoryError> {
        let root = self
            .root(storage)
            .ok_or(InventoryError::StorageUnavailable(storage))?;
        disk_space_for_path(root).ok_or_else(|| {
            InventoryError::io(
                root,
                io::Error::new(io::ErrorKind::NotFound, "no mounted disk contains this path"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install(root: &Path, id: AppId, control: Option<&str>, payload: &[u8]) -> PathBuf {
        let dir = root.join(id.to_string());
        fs::create_dir_all(&dir).unwrap();
        if let Some(control) = control {
            fs::write(dir.join(CONTROL_FILE), control).unwrap();
        }
        fs::write(dir.join("data.bin"), payload).unwrap();
        dir
    }

    fn fixture() -> (TempDir, DirectoryInventory) {
        let tmp = TempDir::new().unwrap();
        let internal = tmp.path().join("internal");
        let removable = tmp.path().join("removable");
        fs::create_dir_all(&internal).unwrap();
        fs::create_dir_all(&removable).unwrap();
        let inventory = DirectoryInventory::new(Some(internal), Some(removable));
        (tmp, inventory)
    }

    #[test]
    fn test_lists_ids_across_roots_without_duplicates() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        let removable = inv.root(StorageId::Removable).unwrap().to_path_buf();

        install(&internal, AppId(0x20), Some("name = \"B\""), b"x");
        install(&removable, AppId(0x20), None, b"yy");
        install(&removable, AppId(0x10), Some("name = \"A\""), b"z");
        fs::create_dir_all(internal.join("not-an-app")).unwrap();
        fs::write(internal.join("0000000000000030"), b"plain file").unwrap();

        let ids: Vec<AppId> = inv
            .list_records(0, 30)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![AppId(0x10), AppId(0x20)]);
    }

    #[test]
    fn test_paging() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        for i in 0..5 {
            install(&internal, AppId(i), Some("name = \"x\""), b"");
        }
        assert_eq!(inv.list_records(0, 2).unwrap().len(), 2);
        assert_eq!(inv.list_records(4, 2).unwrap(), vec![Record { id: AppId(4) }]);
        assert!(inv.list_records(5, 2).unwrap().is_empty());
    }

    #[test]
    fn test_control_data_and_sizes() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        let removable = inv.root(StorageId::Removable).unwrap().to_path_buf();
        let id = AppId(0xABC);

        let control = "name = \"Kart\"\nauthor = \"Studio\"\nversion = \"1.2.0\"\nicon = \"KR\"\n";
        let dir = install(&internal, id, Some(control), &[0u8; 100]);
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/more.bin"), [0u8; 50]).unwrap();
        install(&removable, id, None, &[0u8; 400]);

        let data = inv.control_data(id).unwrap();
        assert_eq!(data.name, "Kart");
        assert_eq!(data.author, "Studio");
        assert_eq!(data.display_version, "1.2.0");
        assert_eq!(data.icon.as_deref(), Some("KR"));

        let size = inv.occupied_size(id).unwrap();
        assert_eq!(size.internal, 100 + 50 + control.len() as u64);
        assert_eq!(size.removable, 400);
    }

    #[test]
    fn test_missing_or_broken_control_is_malformed() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        install(&internal, AppId(1), None, b"");
        install(&internal, AppId(2), Some("name = [not toml"), b"");
        install(&internal, AppId(3), Some("name = \"  \""), b"");

        for id in [AppId(1), AppId(2), AppId(3)] {
            assert!(matches!(
                inv.control_data(id),
                Err(InventoryError::Malformed { .. })
            ));
        }
    }

    #[test]
    fn test_delete_removes_every_root() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        let removable = inv.root(StorageId::Removable).unwrap().to_path_buf();
        let a = install(&internal, AppId(9), Some("name = \"A\""), b"1");
        let b = install(&removable, AppId(9), None, b"2");

        inv.delete(AppId(9)).unwrap();
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(matches!(
            inv.delete(AppId(9)),
            Err(InventoryError::NotFound(AppId(9)))
        ));
    }

    #[test]
    fn test_missing_root_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let inv = DirectoryInventory::new(Some(tmp.path().join("absent")), None);
        assert!(inv.list_records(0, 30).unwrap().is_empty());
        assert!(matches!(
            inv.storage_space(StorageId::Removable),
            Err(InventoryError::StorageUnavailable(StorageId::Removable))
        ));
    }

    #[test]
    fn test_parse_dir_name() {
        assert_eq!(parse_dir_name("0100000000010000"), Some(AppId(0x0100_0000_0001_0000)));
        assert_eq!(parse_dir_name("ABCDEFABCDEF0123"), Some(AppId(0xABCD_EFAB_CDEF_0123)));
        assert_eq!(parse_dir_name("abcdefABCDEF0123"), None);
        assert_eq!(parse_dir_name("123"), None);
        assert_eq!(parse_dir_name("+100000000010000"), None);
        assert_eq!(parse_dir_name("010000000001000G"), None);
    }

    #[test]
    fn test_lowercase_dir_is_not_listed() {
        let (_tmp, inv) = fixture();
        let internal = inv.root(StorageId::Internal).unwrap().to_path_buf();
        let lower = internal.join("010000000001000a");
        fs::create_dir_all(&lower).unwrap();
        fs::write(lower.join(CONTROL_FILE), "name = \"Game\"").unwrap();
        fs::write(lower.join("data.bin"), [0u8; 4096]).unwrap();
        install(&internal, AppId(0x0100_0000_0001_000B), Some("name = \"Other\""), b"x");

        let ids: Vec<AppId> = inv
            .list_records(0, 30)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![AppId(0x0100_0000_0001_000B)]);

        // Every listed id resolves to its own directory.
        for id in ids {
            assert!(inv.control_data(id).is_ok());
            inv.delete(id).unwrap();
        }
        assert!(lower.exists());
    }
}
