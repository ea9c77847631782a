use crate::{
    domain::Board,
    error::{CaseFileError, Result},
    storage::{decode_board, encode_board, Storage, DEFAULT_STORAGE_KEY},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one JSON document per storage key
pub struct FileStorage {
    root_path: PathBuf,
    key: String,
}

impl FileStorage {
    const CASEFILE_DIR: &'static str = ".casefile";

    /// Creates a new FileStorage instance for the given data root
    pub fn new(data_root: impl AsRef<Path>) -> Self {
        Self::with_key(data_root, DEFAULT_STORAGE_KEY)
    }

    /// Creates a FileStorage that stores the board under a custom key
    pub fn with_key(data_root: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            root_path: data_root.as_ref().join(Self::CASEFILE_DIR),
            key: key.into(),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(format!("{}.json", self.key))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_board(&Board::default()).await?;
        }

        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = encode_board(board)?;
        // Write next to the target, then rename so a crash never leaves half a board
        let tmp = self.board_file().with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, self.board_file()).await?;

        Ok(())
    }

    async fn load_board(&self) -> Result<Board> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(CaseFileError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        decode_board(&contents)
    }

    async fn clear(&self) -> Result<()> {
        let board_file = self.board_file();
        if board_file.exists() {
            fs::remove_file(board_file).await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.board_file().exists()
    }
}
