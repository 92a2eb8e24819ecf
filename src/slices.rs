//! Ordered stack of slice images.
//!
//! Slices are addressed two ways: a 0-based position in the stack (what the
//! controller navigates) and a slice id stamped into records, which is
//! `position + 1 + offset`. The offset is either declared in the config or
//! detected from the numeric suffixes of the file names, so a stack whose
//! files are numbered 41..=80 gets ids 41..=80.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::SLICE_EXTENSIONS;
use crate::error::{LocalizerError, Result};

/// How the slice id offset is determined.
///
/// In config files this is either the string `"auto"` or a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceOffset {
    /// Smallest trailing number in the file names, minus one.
    #[default]
    Auto,
    /// Fixed offset added to every 1-based position.
    Fixed(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SliceOffsetProxy {
    Fixed(u32),
    Keyword(OffsetKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OffsetKeyword {
    Auto,
}

impl Serialize for SliceOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let proxy = match *self {
            SliceOffset::Auto => SliceOffsetProxy::Keyword(OffsetKeyword::Auto),
            SliceOffset::Fixed(value) => SliceOffsetProxy::Fixed(value),
        };
        proxy.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SliceOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let proxy = SliceOffsetProxy::deserialize(deserializer).map_err(|_| {
            serde::de::Error::custom("slice_offset must be \"auto\" or a non-negative integer")
        })?;
        Ok(match proxy {
            SliceOffsetProxy::Fixed(value) => SliceOffset::Fixed(value),
            SliceOffsetProxy::Keyword(OffsetKeyword::Auto) => SliceOffset::Auto,
        })
    }
}

/// The slice images of one session, in display order.
#[derive(Debug, Clone)]
pub struct SliceStack {
    paths: Vec<PathBuf>,
    offset: u32,
}

impl SliceStack {
    /// Scan `dir` for slice images.
    pub fn from_dir(dir: &Path, offset: SliceOffset) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_slice_image(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(LocalizerError::no_slices(dir));
        }

        let stack = Self::build(paths, offset)?;
        log::info!(
            "Found {} slices in {:?} (ids {}..={})",
            stack.len(),
            dir,
            stack.first_id(),
            stack.last_id()
        );
        Ok(stack)
    }

    /// Build from a listing the shell already has.
    pub fn from_paths(paths: Vec<PathBuf>, offset: SliceOffset) -> Result<Self> {
        if paths.is_empty() {
            return Err(LocalizerError::no_slices(PathBuf::new()));
        }
        Self::build(paths, offset)
    }

    fn build(mut paths: Vec<PathBuf>, offset: SliceOffset) -> Result<Self> {
        sort_slices(&mut paths);
        let offset = match offset {
            SliceOffset::Fixed(value) => value,
            SliceOffset::Auto => detect_offset(&paths),
        };

        // Every id up to `len + offset` must fit in a u32.
        let fits = u32::try_from(paths.len())
            .ok()
            .and_then(|len| len.checked_add(offset))
            .is_some();
        if !fits {
            return Err(LocalizerError::SliceIdOverflow {
                offset,
                slices: paths.len(),
            });
        }
        Ok(Self { paths, offset })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Slice id of a 0-based position.
    pub fn slice_id(&self, index: usize) -> u32 {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_add(1)
            .saturating_add(self.offset)
    }

    pub fn first_id(&self) -> u32 {
        self.slice_id(0)
    }

    pub fn last_id(&self) -> u32 {
        self.slice_id(self.len().saturating_sub(1))
    }

    /// Position of a slice id, if it belongs to this stack.
    pub fn index_of(&self, slice_id: u32) -> Option<usize> {
        let index = slice_id.checked_sub(1 + self.offset)? as usize;
        (index < self.len()).then_some(index)
    }

    /// Image file for a 0-based position.
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// Whether the extension is one of [`SLICE_EXTENSIONS`] (case-insensitive).
pub fn is_slice_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SLICE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Trailing run of digits in a file stem, e.g. `slice_042` -> 42.
pub fn trailing_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    stem[stem.len() - digits..].parse().ok()
}

/// Smallest trailing number minus one; zero when no name carries a number.
pub fn detect_offset(paths: &[PathBuf]) -> u32 {
    paths
        .iter()
        .filter_map(|p| trailing_number(p))
        .min()
        .map_or(0, |min| min.saturating_sub(1))
}

/// Name order, then numeric order when every file is numbered, so that
/// `s9` sorts before `s10`.
fn sort_slices(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.iter().all(|p| trailing_number(p).is_some()) {
        paths.sort_by_key(|p| trailing_number(p));
    }
}
