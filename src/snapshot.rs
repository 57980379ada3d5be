use crate::error::Result;
use crate::models::Movie;
use std::fs::{self, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Persisted snapshot of every movie mirrored so far, stored as a single
/// JSON array. The file is created on first use; the in-memory sequence
/// is the source of truth and `save` always rewrites the whole array.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot. A missing or empty file means "no prior data",
    /// not a decode error; an unopenable file is fatal to the caller.
    pub fn load(&self) -> Result<Vec<Movie>> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Truncates the file and writes the full sequence.
    pub fn save(&self, movies: &[Movie]) -> Result<()> {
        let content = serde_json::to_string(movies)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Torrent;
    use std::io::Write;

    #[test]
    fn missing_file_loads_empty_and_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        let store = SnapshotStore::new(&path);

        assert!(store.load().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn empty_file_is_no_prior_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  \n").unwrap();

        let store = SnapshotStore::new(file.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let store = SnapshotStore::new(file.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn round_trip_preserves_order_and_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("movies.json"));

        let movies = vec![
            Movie { id: 3, title: "C".to_string(), ..Default::default() },
            Movie {
                id: 1,
                title: String::new(),
                year: 0,
                torrents: vec![Torrent::default()],
                ..Default::default()
            },
            Movie { id: 2, title: "B".to_string(), rating: 7.2, ..Default::default() },
        ];

        store.save(&movies).unwrap();
        assert_eq!(store.load().unwrap(), movies);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("movies.json"));

        let many: Vec<Movie> =
            (0..10).map(|i| Movie { id: i, ..Default::default() }).collect();
        store.save(&many).unwrap();

        let fewer = vec![Movie { id: 99, ..Default::default() }];
        store.save(&fewer).unwrap();

        assert_eq!(store.load().unwrap(), fewer);
    }
}
