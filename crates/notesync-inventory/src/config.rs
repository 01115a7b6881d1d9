//! Firestore store configuration.

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_METADATA_BASE_URL: &str = "http://metadata.google.internal";
const DEFAULT_COLLECTION: &str = "notebooklm_sources";

/// Connection settings for the inventory collection.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Project owning the `(default)` database.
    pub project_id: String,
    /// Collection holding one document per ingested source.
    pub collection: String,
    /// Firestore endpoint base; overridable for tests.
    pub base_url: String,
    /// GCE metadata server base; overridable for tests.
    pub metadata_base_url: String,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection: DEFAULT_COLLECTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Points both endpoints at the given base URL (tests).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = base.to_string();
        self.metadata_base_url = base.to_string();
        self
    }

    /// URL of the collection's documents listing.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.base_url, self.project_id, self.collection
        )
    }

    /// URL of a single document, keyed by display name.
    #[must_use]
    pub fn document_url(&self, display_name: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(display_name)
        )
    }
}
