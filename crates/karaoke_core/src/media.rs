use std::fmt;
use std::sync::Arc;

/// An audio file picked by the user, either from the browse dialog or a drop.
///
/// The payload is shared, so handing the file to a submission does not copy it.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Only declared `audio/*` media types are accepted for submission.
    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with("audio/")
    }
}

// Payloads can be several megabytes; keep them out of log lines.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
