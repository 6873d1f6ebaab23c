use std::fs;
use std::path::PathBuf;

/// Read-only view of one directory level. Detection code takes `&dyn DirHandle`
/// instead of `&Path` so precedence rules can be exercised without touching disk.
pub trait DirHandle {
    /// Immediate child names, sorted lexicographically so scans are
    /// deterministic across filesystems.
    fn child_names(&self) -> Vec<String>;

    fn is_dir(&self, name: &str) -> bool;

    fn has_file(&self, name: &str) -> bool;

    /// Full text of an immediate child file. Any I/O or encoding failure is
    /// folded into `None`; the detectors treat that as "no evidence".
    fn read_text(&self, name: &str) -> Option<String>;

    fn subdir(&self, name: &str) -> Option<Box<dyn DirHandle>>;
}

pub struct FsDir {
    path: PathBuf,
}

impl FsDir {
    pub fn new(path: impl Into<PathBuf>) -> FsDir {
        FsDir { path: path.into() }
    }
}

impl DirHandle for FsDir {
    fn child_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.path) {
            Ok(rd) => rd
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    fn is_dir(&self, name: &str) -> bool {
        self.path.join(name).is_dir()
    }

    fn has_file(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    fn read_text(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path.join(name)).ok()
    }

    fn subdir(&self, name: &str) -> Option<Box<dyn DirHandle>> {
        let p = self.path.join(name);
        if p.is_dir() {
            Some(Box::new(FsDir::new(p)))
        } else {
            None
        }
    }
}
