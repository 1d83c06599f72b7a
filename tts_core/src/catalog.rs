use serde::Serialize;

/// A single voice offered by the service.
///
/// Descriptors are defined at startup and never mutated; the discovery
/// endpoint serializes them verbatim.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoiceDescriptor {
    pub id: String,
    pub name: String,
    pub lang: String,
}

impl VoiceDescriptor {
    pub fn new(id: &str, name: &str, lang: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }
}

/// Fixed, in-memory list of supported voices.
///
/// Insertion order is preserved and reflected in the discovery response.
/// The catalog is shared read-only across sessions (behind an `Arc`), so
/// no locking is needed.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
}

impl VoiceCatalog {
    /// Create from a prebuilt list
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self { voices }
    }

    /// All voices, in insertion order
    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(vec![
            VoiceDescriptor::new("en", "English (US)", "en"),
            VoiceDescriptor::new("en-uk", "English (UK)", "en-uk"),
            VoiceDescriptor::new("en-au", "English (Australia)", "en-au"),
            VoiceDescriptor::new("en-in", "English (India)", "en-in"),
        ])
    }
}
