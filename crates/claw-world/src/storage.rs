//! Directory-backed persistence for chunks and world metadata.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/world.ron            world metadata (pretty RON)
//! <root>/chunks/<cx,cy,cz>.chunk   raw 4096-byte chunk payloads
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use claw_voxel::{Chunk, ChunkCoord};
use serde::{Deserialize, Serialize};

use crate::chunk_manager::ChunkManager;
use crate::error::StorageError;
use crate::renderer::ChunkRenderer;

const CHUNK_DIR: &str = "chunks";
const CHUNK_EXT: &str = "chunk";
const META_FILE: &str = "world.ron";

/// Session-level state saved next to the chunks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldMeta {
    pub seed: u64,
    /// Seconds of simulated time.
    pub elapsed: f64,
    pub day_count: u32,
    /// Unix timestamp (seconds) of the save.
    pub saved_at: u64,
}

impl WorldMeta {
    /// Metadata stamped with the current wall-clock time.
    pub fn new(seed: u64, elapsed: f64, day_count: u32) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            seed,
            elapsed,
            day_count,
            saved_at,
        }
    }
}

/// A world save on disk.
#[derive(Clone, Debug)]
pub struct ChunkStore {
    root: PathBuf,
}

impl ChunkStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { root: root.into() };
        let chunks = store.chunk_dir();
        fs::create_dir_all(&chunks).map_err(|source| io_error(&chunks, source))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn chunk_dir(&self) -> PathBuf {
        self.root.join(CHUNK_DIR)
    }

    fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.chunk_dir().join(format!("{coord}.{CHUNK_EXT}"))
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join(META_FILE)
    }

    /// Writes one chunk's raw payload, replacing any previous save.
    pub fn save_chunk(&self, chunk: &Chunk) -> Result<(), StorageError> {
        let path = self.chunk_path(chunk.coord());
        fs::write(&path, chunk.serialize()).map_err(|source| io_error(&path, source))
    }

    /// Reads the raw payload saved for `coord`, or `None` if it was never saved.
    pub fn load_chunk(&self, coord: ChunkCoord) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.chunk_path(coord);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    /// Saves every chunk yielded by `chunks`. Returns how many were written.
    pub fn save_all<'a>(
        &self,
        chunks: impl IntoIterator<Item = &'a Chunk>,
    ) -> Result<usize, StorageError> {
        let mut written = 0;
        for chunk in chunks {
            self.save_chunk(chunk)?;
            written += 1;
        }
        tracing::info!(chunks = written, root = %self.root.display(), "saved chunks");
        Ok(written)
    }

    /// Coordinates of every saved chunk, sorted.
    ///
    /// Files without the chunk extension are ignored; a chunk file whose name
    /// is not a valid key is an error.
    pub fn list_saved(&self) -> Result<Vec<ChunkCoord>, StorageError> {
        let dir = self.chunk_dir();
        let entries = fs::read_dir(&dir).map_err(|source| io_error(&dir, source))?;

        let mut coords = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| io_error(&dir, source))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(CHUNK_EXT) {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let coord = stem
                .parse::<ChunkCoord>()
                .map_err(|source| StorageError::Key {
                    path: path.clone(),
                    source,
                })?;
            coords.push(coord);
        }
        coords.sort_unstable();
        Ok(coords)
    }

    pub fn save_meta(&self, meta: &WorldMeta) -> Result<(), StorageError> {
        let text = ron::ser::to_string_pretty(meta, ron::ser::PrettyConfig::default())
            .map_err(StorageError::SerializeMeta)?;
        let path = self.meta_path();
        fs::write(&path, text).map_err(|source| io_error(&path, source))
    }

    /// Reads the world metadata, or `None` for a fresh store.
    pub fn load_meta(&self) -> Result<Option<WorldMeta>, StorageError> {
        let path = self.meta_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(io_error(&path, source)),
        };
        ron::from_str(&text)
            .map(Some)
            .map_err(StorageError::ParseMeta)
    }

    /// Deletes every saved chunk and the world metadata.
    pub fn clear(&self) -> Result<(), StorageError> {
        let dir = self.chunk_dir();
        fs::remove_dir_all(&dir).map_err(|source| io_error(&dir, source))?;
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;

        let meta = self.meta_path();
        match fs::remove_file(&meta) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(io_error(&meta, source)),
        }
        tracing::info!(root = %self.root.display(), "cleared world save");
        Ok(())
    }

    /// Installs every saved chunk into `manager`. Returns how many were restored.
    pub fn restore_into<R: ChunkRenderer>(
        &self,
        manager: &mut ChunkManager<R>,
    ) -> Result<usize, StorageError> {
        let mut restored = 0;
        for coord in self.list_saved()? {
            let Some(bytes) = self.load_chunk(coord)? else {
                continue;
            };
            manager
                .load_chunk(coord, &bytes)
                .map_err(StorageError::Restore)?;
            restored += 1;
        }
        tracing::info!(chunks = restored, root = %self.root.display(), "restored chunks");
        Ok(restored)
    }
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use claw_voxel::BlockId;

    use super::*;
    use crate::settings::WorldSettings;

    fn sample_chunk(coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        chunk.set(1, 2, 3, BlockId::BRICK);
        chunk.set(15, 15, 15, BlockId::GLASS);
        chunk
    }

    #[test]
    fn test_open_creates_chunk_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("save");
        let store = ChunkStore::open(&root).unwrap();
        assert!(root.join("chunks").is_dir());
        assert_eq!(store.root(), root);
    }

    #[test]
    fn test_save_then_load_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        let coord = ChunkCoord::new(-2, 1, 7);
        let chunk = sample_chunk(coord);

        store.save_chunk(&chunk).unwrap();
        assert!(dir.path().join("chunks/-2,1,7.chunk").is_file());

        let bytes = store.load_chunk(coord).unwrap().expect("saved");
        let restored = Chunk::deserialize(coord, &bytes).unwrap();
        assert_eq!(restored.blocks(), chunk.blocks());
    }

    #[test]
    fn test_load_missing_chunk_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        assert!(store.load_chunk(ChunkCoord::new(0, 0, 0)).unwrap().is_none());
    }

    #[test]
    fn test_list_saved_sorted_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        let coords = [
            ChunkCoord::new(3, 0, 0),
            ChunkCoord::new(-1, 1, 2),
            ChunkCoord::new(0, 0, -5),
        ];
        let chunks: Vec<Chunk> = coords.iter().map(|&c| sample_chunk(c)).collect();
        assert_eq!(store.save_all(&chunks).unwrap(), 3);
        fs::write(dir.path().join("chunks/notes.txt"), "hello").unwrap();

        let mut expected = coords.to_vec();
        expected.sort_unstable();
        assert_eq!(store.list_saved().unwrap(), expected);
    }

    #[test]
    fn test_list_saved_rejects_malformed_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("chunks/1,2.chunk"), [0u8; 4]).unwrap();
        let err = store.list_saved().unwrap_err();
        assert!(matches!(err, StorageError::Key { .. }), "got {err}");
    }

    #[test]
    fn test_meta_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        assert!(store.load_meta().unwrap().is_none());

        let meta = WorldMeta {
            seed: 42,
            elapsed: 1234.5,
            day_count: 3,
            saved_at: 1_700_000_000,
        };
        store.save_meta(&meta).unwrap();
        assert_eq!(store.load_meta().unwrap(), Some(meta));
    }

    #[test]
    fn test_corrupt_meta_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("world.ron"), "(seed: oops").unwrap();
        assert!(matches!(
            store.load_meta().unwrap_err(),
            StorageError::ParseMeta(_)
        ));
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        store.save_chunk(&sample_chunk(ChunkCoord::new(0, 0, 0))).unwrap();
        store.save_meta(&WorldMeta::new(1, 0.0, 0)).unwrap();

        store.clear().unwrap();
        assert!(store.list_saved().unwrap().is_empty());
        assert!(store.load_meta().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_restore_into_manager_preserves_edits() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        let settings = WorldSettings {
            seed: 42,
            render_distance: 1,
            world_height_chunks: 2,
        };

        let mut world = ChunkManager::new(settings);
        world.load_around(0.0, 0.0);
        let y = world.get_surface_y(4, 4);
        assert!(world.place_block(4, y, 4, BlockId::WOOL));
        store.save_all(world.loaded_chunks()).unwrap();

        let mut fresh = ChunkManager::new(settings);
        assert_eq!(store.restore_into(&mut fresh).unwrap(), 18);
        let stats = fresh.load_around(0.0, 0.0);
        assert_eq!(stats.generated, 0);
        assert_eq!(fresh.get_block(4, y, 4), BlockId::WOOL);
    }

    #[test]
    fn test_restore_rejects_truncated_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("chunks/0,0,0.chunk"), [1u8; 10]).unwrap();

        let mut world = ChunkManager::new(WorldSettings::default());
        let err = store.restore_into(&mut world).unwrap_err();
        assert!(matches!(err, StorageError::Restore(_)));
    }
}
