use std::{collections::HashSet, path::PathBuf, sync::Arc};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::types::Person;
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{info, warn};

use crate::colors::ColorTable;
use crate::errors::ServiceError;
use crate::person::repository::PersonRepository;
use crate::storage::person_csv;

/// Person store backed by a delimited text file.
///
/// The whole file is read into memory on open. Creates append one row to the
/// file first and only then extend the in-memory list; the write lock is held
/// across id assignment and the append so concurrent creates cannot collide.
/// A failed append is truncated away again.
pub struct FlatFileStore {
    inner: RwLock<State>,
    file_path: PathBuf,
    colors: Arc<ColorTable>,
    /// Makes the next append fail after its bytes were written.
    #[cfg(test)]
    fail_sync: AtomicBool,
}

#[derive(Default)]
struct State {
    persons: Vec<Person>,
    /// The file does not end with a line break yet.
    needs_newline: bool,
    /// Highest id that may already be on disk without being in `persons`.
    reserved_id: i32,
}

/// How an append failed.
enum AppendFailure {
    /// Nothing of the row is left in the file.
    RolledBack(ServiceError),
    /// Part or all of the row may remain in the file.
    Torn(ServiceError),
}

impl FlatFileStore {
    /// Load the store from a path. Creates an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P, colors: Arc<ColorTable>) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let state = match fs::read(&file_path).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let state = Self::load_rows(&text, &colors);
                info!(file = %file_path.display(), persons = state.persons.len(), "person file loaded");
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"").await?;
                info!(file = %file_path.display(), "created empty person file");
                State::default()
            }
            Err(e) => {
                return Err(ServiceError::Storage(format!("cannot read {}: {e}", file_path.display())));
            }
        };

        Ok(Arc::new(Self {
            inner: RwLock::new(state),
            file_path,
            colors,
            #[cfg(test)]
            fail_sync: AtomicBool::new(false),
        }))
    }

    fn load_rows(text: &str, colors: &ColorTable) -> State {
        let mut persons = Vec::new();
        let mut seen = HashSet::new();
        let mut max_id: i32 = 0;

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = match person_csv::parse_row(line) {
                Ok(row) => row,
                Err(e) => {
                    warn!(line = idx + 1, content = line, error = %e, "skipping person row");
                    continue;
                }
            };
            let id = match row.explicit_id {
                Some(id) if seen.contains(&id) => {
                    warn!(line = idx + 1, id, "skipping person row with duplicate id");
                    continue;
                }
                Some(id) => id,
                None => match max_id.checked_add(1) {
                    Some(id) => id,
                    None => {
                        warn!(line = idx + 1, "skipping person row, no id left to assign");
                        continue;
                    }
                },
            };
            let mut person = row.person;
            person.id = id;
            person.color = colors.id_to_name(person.color_id).to_string();
            seen.insert(id);
            max_id = max_id.max(id);
            persons.push(person);
        }

        let needs_newline = !text.is_empty() && !text.ends_with('\n');
        State { persons, needs_newline, reserved_id: 0 }
    }

    /// Append `data`; on failure the file is cut back to its previous length.
    async fn append(&self, data: &[u8]) -> Result<(), AppendFailure> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await
            .map_err(|e| {
                AppendFailure::RolledBack(ServiceError::Storage(format!(
                    "cannot open {}: {e}",
                    self.file_path.display()
                )))
            })?;
        let old_len = file
            .metadata()
            .await
            .map_err(|e| AppendFailure::RolledBack(e.into()))?
            .len();

        let Err(e) = self.write_synced(&mut file, data).await else {
            return Ok(());
        };
        match file.set_len(old_len).await {
            Ok(()) => Err(AppendFailure::RolledBack(e)),
            Err(te) => {
                warn!(file = %self.file_path.display(), error = %te, "cannot truncate after failed append");
                Err(AppendFailure::Torn(e))
            }
        }
    }

    async fn write_synced(&self, file: &mut fs::File, data: &[u8]) -> Result<(), ServiceError> {
        file.write_all(data).await?;
        file.flush().await?;
        #[cfg(test)]
        if self.fail_sync.swap(false, Ordering::SeqCst) {
            return Err(ServiceError::Storage("sync failed".into()));
        }
        file.sync_data().await?;
        Ok(())
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }
}

#[async_trait]
impl PersonRepository for FlatFileStore {
    async fn list_all(&self) -> Result<Vec<Person>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.persons.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_color(&self, color: Option<&str>) -> Result<Vec<Person>, ServiceError> {
        let Some(color) = color.filter(|c| !c.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        let wanted = color.to_lowercase();
        let state = self.inner.read().await;
        Ok(state
            .persons
            .iter()
            .filter(|p| p.color.to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        let person = self.colors.canonicalize(person)?;
        let mut person = person_csv::normalize_for_file(person)?;

        let mut state = self.inner.write().await;
        person.id = state
            .persons
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .max(state.reserved_id)
            .checked_add(1)
            .ok_or_else(|| ServiceError::Storage("person id space exhausted".into()))?;

        let mut row = String::new();
        if state.needs_newline {
            row.push('\n');
        }
        row.push_str(&person_csv::format_row(&person));
        row.push('\n');
        match self.append(row.as_bytes()).await {
            Ok(()) => {}
            Err(AppendFailure::RolledBack(e)) => return Err(e),
            Err(AppendFailure::Torn(e)) => {
                // keep the leftover on its own line and never hand out its id again
                state.needs_newline = true;
                state.reserved_id = person.id;
                return Err(e);
            }
        }

        // the row is on disk; now it may become visible
        state.needs_newline = false;
        state.persons.push(person.clone());
        info!(id = person.id, color_id = person.color_id, file = %self.file_path.display(), "person appended");
        Ok(person)
    }
}
