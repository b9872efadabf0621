//! Temporary graph databases for CLI tests.

use camino::Utf8PathBuf;
use tempfile::TempDir;

use crate::seed::seed_database;

pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) db: Utf8PathBuf,
}

impl Workspace {
    /// A directory with no database in it yet.
    pub(super) fn empty() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            db: root.join("graph.db"),
            _dir: dir,
        }
    }

    /// A directory holding a database with the reference graph.
    pub(super) fn seeded() -> Self {
        let workspace = Self::empty();
        seed_database(&workspace.db).expect("seed reference graph");
        workspace
    }
}

pub(super) fn output_json(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("output is JSON")
}
