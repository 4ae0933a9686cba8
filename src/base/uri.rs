use std::fmt;

use smol_str::SmolStr;

/// Unique key of a document in the workspace.
///
/// Cheap to clone; short URIs are stored inline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persistence", serde(transparent))]
pub struct DocumentUri(SmolStr);

impl DocumentUri {
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self(SmolStr::new(uri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// File extension of the last path segment, if any.
    pub fn extension(&self) -> Option<&str> {
        let last = self.0.rsplit('/').next()?;
        let (stem, ext) = last.rsplit_once('.')?;
        (!stem.is_empty()).then_some(ext)
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for DocumentUri {
    fn from(uri: String) -> Self {
        Self(SmolStr::from(uri))
    }
}

impl AsRef<str> for DocumentUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
