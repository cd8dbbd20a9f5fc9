//! # Path Resolution
//!
//! Naming rules for the files and directories the commands write to, and the
//! [`FileSet`] collection used to find batch inputs.
//!
//! * `name.ext` is rewritten in place as `name.bookworm.ext`.
//! * Outputs without an explicit destination land in [`DEFAULT_SUBDIRECTORY`],
//!   next to their source.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Subdirectory used whenever no explicit output location is given.
pub const DEFAULT_SUBDIRECTORY: &str = "__bookworm__/";

const TEMP_MARKER: &str = "bookworm";

pub fn default_subdirectory() -> &'static str {
    DEFAULT_SUBDIRECTORY
}

/// Derives the temporary target for `file_name`: `dir/name.ext` becomes `dir/name.bookworm.ext`.
pub fn temp_file_name(file_name: &Path) -> PathBuf {
    let Some(stem) = file_name.file_stem() else {
        return file_name.join(TEMP_MARKER);
    };

    let mut name: OsString = stem.to_os_string();
    name.push(".");
    name.push(TEMP_MARKER);
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }

    file_name.with_file_name(name)
}

/// The default output directory for `file_name`: a [`DEFAULT_SUBDIRECTORY`] sibling of the file.
///
/// Pure path arithmetic; the filesystem is never consulted.
pub fn temp_directory(file_name: &Path) -> PathBuf {
    let parent: &Path = file_name.parent().unwrap_or(Path::new(""));
    parent.join(DEFAULT_SUBDIRECTORY)
}

/// Checks whether `file` carries `extension`. The leading period is optional.
pub fn has_extension(file: &Path, extension: &str) -> bool {
    let wanted: &str = extension.strip_prefix('.').unwrap_or(extension);
    match file.extension() {
        Some(ext) => ext == wanted,
        None => wanted.is_empty(),
    }
}

/// Checks that every path in `files` is an existing regular file.
pub fn files_exist<I, P>(files: I) -> bool
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    files.into_iter().all(|file| file.as_ref().is_file())
}

/// A directory and an ordered list of file names inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
}

impl FileSet {
    pub fn new(path: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            path: path.into(),
            files,
        }
    }

    /// Lists the regular files directly inside `path`, sorted by name.
    pub fn read_dir(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path: PathBuf = path.into();
        let mut files: Vec<PathBuf> = Vec::new();

        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(PathBuf::from(entry.file_name()));
            }
        }
        files.sort();

        Ok(Self { path, files })
    }

    /// Keeps only the files carrying `extension`, preserving order.
    pub fn with_extension(&self, extension: &str) -> FileSet {
        let files: Vec<PathBuf> = self
            .files
            .iter()
            .filter(|file| has_extension(file, extension))
            .cloned()
            .collect();

        FileSet {
            path: self.path.clone(),
            files,
        }
    }

    /// Full paths of the files, in order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|file| self.path.join(file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Free-function form of [`FileSet::with_extension`].
pub fn with_extension(extension: &str, file_set: &FileSet) -> FileSet {
    file_set.with_extension(extension)
}
