//! Shared test fixtures: catalog JSON files listed in `fixtures/manifest.json`
//! and builders for synthetic clip buffers.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    catalogs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod catalogs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.catalogs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.catalogs, "catalog", name)?;
        read_to_string(rel)
    }
}

/// Builders for raw clip buffers (little-endian f32, no header).
pub mod clips {
    use super::*;

    /// Encode values exactly as a clip file stores them.
    pub fn encode(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// `frames` frames of `width` values where every channel of frame `i` is `i`.
    pub fn ramp(width: usize, frames: usize) -> Vec<u8> {
        let values: Vec<f32> = (0..frames)
            .flat_map(|i| std::iter::repeat(i as f32).take(width))
            .collect();
        encode(&values)
    }

    /// Zero-filled frames with selected `(channel, value)` overrides per frame.
    pub fn sparse(width: usize, frames: &[&[(usize, f32)]]) -> Result<Vec<u8>> {
        let mut values = vec![0.0f32; width * frames.len()];
        for (i, overrides) in frames.iter().enumerate() {
            for &(ch, v) in overrides.iter() {
                if ch >= width {
                    return Err(anyhow!("channel {ch} outside frame width {width}"));
                }
                values[i * width + ch] = v;
            }
        }
        Ok(encode(&values))
    }

    /// In-memory clip store keyed by catalog path, ready to act as a clip source.
    pub fn store(entries: &[(&str, Vec<u8>)]) -> hashbrown::HashMap<String, Vec<u8>> {
        entries
            .iter()
            .map(|(path, bytes)| (path.to_string(), bytes.clone()))
            .collect()
    }

    /// Write `bytes` to a fresh file under the system temp dir, returning the
    /// root directory and the relative path written.
    pub fn write_temp(tag: &str, rel: &str, bytes: &[u8]) -> Result<PathBuf> {
        let root = std::env::temp_dir().join(format!(
            "motion-clip-fixtures-{tag}-{}",
            std::process::id()
        ));
        let full = root.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&full, bytes).with_context(|| format!("failed to write {}", full.display()))?;
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_catalogs() {
        let mut keys = catalogs::keys();
        keys.sort();
        assert_eq!(keys, vec!["builtin".to_string(), "demo".to_string()]);
        assert!(catalogs::json("demo").unwrap().contains("\"hop\""));
        assert!(catalogs::json("nope").is_err());
    }

    #[test]
    fn ramp_and_sparse_sizes() {
        assert_eq!(clips::ramp(4, 3).len(), 48);
        let bytes = clips::sparse(4, &[&[(1, 2.0)], &[]]).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[4..8], &2.0f32.to_le_bytes());
        assert!(clips::sparse(4, &[&[(4, 1.0)]]).is_err());
    }
}
