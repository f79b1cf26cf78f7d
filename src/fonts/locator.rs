/// Font file lookup

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

/// Resolves a font file name (e.g. `arial.ttf`) to a path on disk.
pub trait FontLocator: Send + Sync {
    /// Return the first matching file, or `None` if nothing matches.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Looks next to the working directory first, then walks the platform's font
/// directories.
#[derive(Debug, Clone)]
pub struct SystemFontLocator {
    dirs: Vec<PathBuf>,
}

impl SystemFontLocator {
    pub fn new() -> Self {
        Self { dirs: system_font_dirs() }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl Default for SystemFontLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLocator for SystemFontLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        // Only bare file names are searched for; an explicit path is final.
        if direct.components().count() != 1 {
            return None;
        }
        find_in_dirs(&self.dirs, name)
    }
}

/// Searches a fixed set of directories, recursively, and nothing else.
#[derive(Debug, Clone, Default)]
pub struct DirFontLocator {
    dirs: Vec<PathBuf>,
}

impl DirFontLocator {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { dirs: dirs.into_iter().map(Into::into).collect() }
    }

    /// A locator that never finds anything.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl FontLocator for DirFontLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        find_in_dirs(&self.dirs, name)
    }
}

fn find_in_dirs(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    let wanted = OsStr::new(name);
    for dir in dirs {
        if !dir.is_dir() {
            continue;
        }
        let hit = WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == wanted);
        if let Some(entry) = hit {
            debug!("located font {} at {}", name, entry.path().display());
            return Some(entry.into_path());
        }
    }
    None
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(windows) {
        if let Some(windir) = env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        if let Some(home) = home_dir() {
            dirs.push(home.join("Library/Fonts"));
        }
    } else {
        let data_home = env::var_os("XDG_DATA_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|h| h.join(".local/share")));
        if let Some(data_home) = data_home {
            dirs.push(data_home.join("fonts"));
        }
        let data_dirs = env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
        for d in data_dirs.split(':').filter(|d| !d.is_empty()) {
            dirs.push(Path::new(d).join("fonts"));
        }
        if let Some(home) = home_dir() {
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}
