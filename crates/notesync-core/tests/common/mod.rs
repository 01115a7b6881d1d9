//! In-memory fakes for the three collaborators.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use notesync_core::{
    CoreError, CoreResult, IngestionService, InventoryRecord, InventoryStore, RemoteFile,
    RemoteFolder, SourceDetails, SourceHandle, SourceStatus,
};

/// Remote folder backed by a fixed listing.
#[derive(Default)]
pub struct FakeRemote {
    pub files: Mutex<Vec<RemoteFile>>,
    pub contents: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_list: Mutex<bool>,
    pub fail_downloads: Mutex<HashSet<String>>,
}

impl FakeRemote {
    pub fn with_files(names: &[&str]) -> Self {
        let remote = Self::default();
        for (i, name) in names.iter().enumerate() {
            remote.add_file(&format!("id-{i}"), name);
        }
        remote
    }

    pub fn add_file(&self, id: &str, name: &str) {
        self.files.lock().unwrap().push(RemoteFile::new(id, name));
        self.contents
            .lock()
            .unwrap()
            .insert(id.to_string(), format!("content of {name}").into_bytes());
    }

    pub fn remove_file(&self, name: &str) {
        self.files.lock().unwrap().retain(|f| f.name != name);
    }
}

#[async_trait]
impl RemoteFolder for FakeRemote {
    async fn list(&self) -> CoreResult<Vec<RemoteFile>> {
        if *self.fail_list.lock().unwrap() {
            return Err(CoreError::upstream("listing unavailable"));
        }
        Ok(self.files.lock().unwrap().clone())
    }

    async fn download(&self, file_id: &str) -> CoreResult<Vec<u8>> {
        if self.fail_downloads.lock().unwrap().contains(file_id) {
            return Err(CoreError::upstream("download failed"));
        }
        self.contents
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| CoreError::upstream("no such file"))
    }
}

/// One scripted response for a poll attempt.
#[derive(Debug, Clone, Copy)]
pub enum PollStep {
    NotVisible,
    Processing,
    Complete,
    Failed,
}

#[derive(Default)]
struct IngestionState {
    /// source id -> original file name.
    sources: HashMap<String, String>,
    /// file name -> remaining scripted poll responses.
    scripts: HashMap<String, VecDeque<PollStep>>,
    /// status fetch count per source id.
    get_calls: HashMap<String, u32>,
    deleted: Vec<String>,
    next_id: u32,
}

/// Ingestion service whose processing behavior is scripted per file.
///
/// Unscripted sources report `Processing` forever, which is how the
/// poll-termination bound gets exercised.
#[derive(Default)]
pub struct FakeIngestion {
    state: Mutex<IngestionState>,
    pub reject_uploads: Mutex<HashSet<String>>,
    pub empty_handles: Mutex<HashSet<String>>,
    pub fail_deletes: Mutex<HashSet<String>>,
}

impl FakeIngestion {
    pub fn script(&self, file_name: &str, steps: &[PollStep]) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(file_name.to_string(), steps.iter().copied().collect());
    }

    /// Scripts immediate completion on the first poll.
    pub fn complete_immediately(&self, file_name: &str) {
        self.script(file_name, &[PollStep::Complete]);
    }

    pub fn get_calls_for(&self, source_id: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .get_calls
            .get(source_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_get_calls(&self) -> u32 {
        self.state.lock().unwrap().get_calls.values().sum()
    }

    pub fn deleted_resources(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    fn resource_name(source_id: &str) -> String {
        format!("projects/42/locations/global/notebooks/nb-1/sources/{source_id}")
    }
}

#[async_trait]
impl IngestionService for FakeIngestion {
    async fn create_source(&self, _content: &[u8], file_name: &str) -> CoreResult<SourceHandle> {
        if self.reject_uploads.lock().unwrap().contains(file_name) {
            return Err(CoreError::upstream("upload rejected"));
        }
        if self.empty_handles.lock().unwrap().contains(file_name) {
            return Ok(SourceHandle {
                name: String::new(),
                display_name: file_name.to_string(),
            });
        }

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let source_id = format!("src-{}", state.next_id);
        state
            .sources
            .insert(source_id.clone(), file_name.to_string());
        Ok(SourceHandle {
            name: Self::resource_name(&source_id),
            display_name: file_name.to_string(),
        })
    }

    async fn get_source(&self, source_id: &str) -> CoreResult<Option<SourceDetails>> {
        let mut state = self.state.lock().unwrap();
        *state.get_calls.entry(source_id.to_string()).or_insert(0) += 1;

        let Some(file_name) = state.sources.get(source_id).cloned() else {
            return Ok(None);
        };
        let step = state
            .scripts
            .get_mut(&file_name)
            .and_then(VecDeque::pop_front)
            .unwrap_or(PollStep::Processing);

        let details = |status| SourceDetails {
            name: Self::resource_name(source_id),
            // The service reports its own title; the pipeline must
            // overwrite it with the remote file name.
            display_name: format!("{file_name} (service copy)"),
            status,
            extra: serde_json::Map::new(),
        };

        match step {
            PollStep::NotVisible => Ok(None),
            PollStep::Processing => Ok(Some(details(SourceStatus::Processing))),
            PollStep::Complete => Ok(Some(details(SourceStatus::Complete))),
            PollStep::Failed => Ok(Some(details(SourceStatus::Failed))),
        }
    }

    async fn delete_source(&self, resource_name: &str) -> CoreResult<()> {
        if self.fail_deletes.lock().unwrap().contains(resource_name) {
            return Err(CoreError::upstream("delete rejected"));
        }
        self.state
            .lock()
            .unwrap()
            .deleted
            .push(resource_name.to_string());
        Ok(())
    }
}

/// Inventory store backed by a map keyed by display name.
#[derive(Default)]
pub struct FakeInventory {
    pub records: Mutex<HashMap<String, InventoryRecord>>,
    pub fail_get_all: Mutex<bool>,
    pub fail_puts: Mutex<HashSet<String>>,
}

impl FakeInventory {
    pub fn with_records(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut records = store.records.lock().unwrap();
            for (resource_name, display_name) in entries {
                records.insert(
                    (*display_name).to_string(),
                    InventoryRecord::new(*resource_name, *display_name, SourceStatus::Complete),
                );
            }
        }
        store
    }

    pub fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn record(&self, display_name: &str) -> Option<InventoryRecord> {
        self.records.lock().unwrap().get(display_name).cloned()
    }
}

#[async_trait]
impl InventoryStore for FakeInventory {
    async fn get_all(&self) -> CoreResult<Vec<InventoryRecord>> {
        if *self.fail_get_all.lock().unwrap() {
            return Err(CoreError::upstream("inventory unavailable"));
        }
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn put(&self, record: &InventoryRecord) -> CoreResult<()> {
        if self.fail_puts.lock().unwrap().contains(&record.display_name) {
            return Err(CoreError::upstream("write rejected"));
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.display_name.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, display_name: &str) -> CoreResult<()> {
        self.records.lock().unwrap().remove(display_name);
        Ok(())
    }
}
