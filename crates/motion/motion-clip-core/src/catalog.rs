//! Clip catalog: which clip files exist and which family each one uses.
//!
//! The family is an explicit field of every entry; file names are never
//! inspected. JSON shape:
//!
//! ```json
//! { "clips": [ { "name": "backflip", "path": "Mini_Cheetah/backflip.dat", "family": "cheetah" } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ClipError;
use crate::family::ClipFamily;
use crate::ids::ClipId;
use crate::player::ClipPlayer;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Path relative to the source root.
    pub path: String,
    pub family: ClipFamily,
}

impl CatalogEntry {
    pub fn new(name: &str, path: &str, family: ClipFamily) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            family,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipCatalog {
    #[serde(default)]
    pub clips: Vec<CatalogEntry>,
}

const BUILTIN_CHEETAH: [&str; 10] = [
    "backflip",
    "front_jump_data",
    "front_jump_extend_legs",
    "front_jump_pitchup",
    "front_jump_pitchup_v2",
    "front_jump_pitchup_v2_too_much",
    "front_jump_v3",
    "front_jump_v4",
    "front_jump_v5",
    "mc_flip",
];

/// Capability for fetching raw clip bytes by catalog path.
pub trait ClipSource {
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ClipError>;
}

/// Reads clips from a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsClipSource {
    root: PathBuf,
}

impl FsClipSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ClipSource for FsClipSource {
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ClipError> {
        let full = self.root.join(path);
        fs::read(&full).map_err(|source| ClipError::Fetch {
            path: full.display().to_string(),
            source,
        })
    }
}

/// In-memory source keyed by catalog path.
impl ClipSource for HashMap<String, Vec<u8>> {
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ClipError> {
        self.get(path).cloned().ok_or_else(|| ClipError::Fetch {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such clip"),
        })
    }
}

impl ClipCatalog {
    /// The stock clip set: ten Mini Cheetah plans and one Go1 backflip.
    pub fn builtin() -> Self {
        let mut clips: Vec<CatalogEntry> = BUILTIN_CHEETAH
            .iter()
            .map(|stem| {
                CatalogEntry::new(
                    stem,
                    &format!("Mini_Cheetah/{stem}.dat"),
                    ClipFamily::Cheetah,
                )
            })
            .collect();
        clips.push(CatalogEntry::new(
            "offline_backflip_new_v12",
            "Go1/offline_backflip_new_v12.dat",
            ClipFamily::Go1,
        ));
        Self { clips }
    }

    /// Parse a catalog and reject duplicate entry names.
    pub fn from_json_str(s: &str) -> Result<Self, ClipError> {
        let catalog: ClipCatalog =
            serde_json::from_str(s).map_err(|e| ClipError::Catalog(format!("parse error: {e}")))?;
        {
            let mut seen = HashSet::new();
            for entry in &catalog.clips {
                if !seen.insert(entry.name.as_str()) {
                    return Err(ClipError::Catalog(format!(
                        "duplicate clip name '{}'",
                        entry.name
                    )));
                }
            }
        }
        Ok(catalog)
    }

    pub fn to_json_string(&self) -> Result<String, ClipError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClipError::Catalog(format!("serialize error: {e}")))
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.clips.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Fetch and load every entry into `player`. Entries that fail to fetch
    /// or decode are reported through `on_error` and skipped. Returns the ids
    /// of the clips that loaded, in catalog order.
    pub fn load_into<F>(
        &self,
        source: &mut dyn ClipSource,
        player: &mut ClipPlayer,
        mut on_error: F,
    ) -> Vec<ClipId>
    where
        F: FnMut(&CatalogEntry, &ClipError),
    {
        let mut loaded = Vec::with_capacity(self.clips.len());
        for entry in &self.clips {
            let result = source
                .fetch(&entry.path)
                .and_then(|bytes| player.load_clip(&entry.name, entry.family, &bytes));
            match result {
                Ok(id) => loaded.push(id),
                Err(err) => {
                    warn!("clip '{}' not loaded: {err}", entry.name);
                    on_error(entry, &err);
                }
            }
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_eleven_clips_with_one_go1() {
        let cat = ClipCatalog::builtin();
        assert_eq!(cat.len(), 11);
        let go1: Vec<_> = cat
            .clips
            .iter()
            .filter(|e| e.family == ClipFamily::Go1)
            .collect();
        assert_eq!(go1.len(), 1);
        assert_eq!(go1[0].path, "Go1/offline_backflip_new_v12.dat");
        assert_eq!(
            cat.get("mc_flip").map(|e| e.path.as_str()),
            Some("Mini_Cheetah/mc_flip.dat")
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let json = r#"{ "clips": [
            { "name": "a", "path": "a.dat", "family": "cheetah" },
            { "name": "a", "path": "b.dat", "family": "go1" }
        ] }"#;
        assert!(matches!(
            ClipCatalog::from_json_str(json),
            Err(ClipError::Catalog(m)) if m.contains("duplicate")
        ));
    }

    #[test]
    fn unique_names_parse_and_keep_order() {
        let json = r#"{ "clips": [
            { "name": "a", "path": "a.dat", "family": "cheetah" },
            { "name": "b", "path": "b.dat", "family": "go1" }
        ] }"#;
        let cat = ClipCatalog::from_json_str(json).unwrap();
        let names: Vec<&str> = cat.clips.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(cat.get("b").map(|e| e.family), Some(ClipFamily::Go1));
    }

    #[test]
    fn unknown_family_is_a_parse_error() {
        let json = r#"{ "clips": [ { "name": "a", "path": "a.dat", "family": "spot" } ] }"#;
        assert!(matches!(
            ClipCatalog::from_json_str(json),
            Err(ClipError::Catalog(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_families() {
        let cat = ClipCatalog::builtin();
        let text = cat.to_json_string().unwrap();
        assert!(text.contains("\"family\": \"go1\""));
        assert_eq!(ClipCatalog::from_json_str(&text).unwrap(), cat);
    }
}
