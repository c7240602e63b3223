use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// An audio file read from disk, ready to be sent as a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub file_name: String,
    /// Declared media type, guessed from the file extension.
    pub media_type: String,
    /// Shared with the page state that selected the file.
    pub bytes: Arc<[u8]>,
}

impl std::fmt::Debug for AudioUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioUpload")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AudioFileError {
    #[error("not a file name: {0:?}")]
    MissingFileName(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads `path` and declares its media type the way a browser file input does.
///
/// Unknown extensions get `application/octet-stream`, which the upload page rejects.
pub fn load_audio_file(path: &Path) -> Result<AudioUpload, AudioFileError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AudioFileError::MissingFileName(path.to_path_buf()))?;
    let bytes = fs::read(path).map_err(|source| AudioFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(AudioUpload {
        file_name,
        media_type,
        bytes: bytes.into(),
    })
}
