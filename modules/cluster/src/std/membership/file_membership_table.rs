//! Membership table stored as one JSON document per deployment.

extern crate std;

use alloc::{
  format,
  string::{String, ToString},
};
use std::{
  fs::{self, File, OpenOptions},
  io::{ErrorKind, Read, Write},
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::debug;

use super::deployment_table::DeploymentTable;
use crate::core::{
  config::MembershipTableConfig,
  membership::{
    EntryEtag, MembershipEntry, MembershipTable, MembershipTableData, MembershipTableError, SiloAddress, TableVersion,
  },
};


/// Membership table persisted under a directory shared by every silo of a host.
///
/// Each call takes an exclusive `fs2` lock on `<deployment>.lock`, loads the document, applies the
/// conditional write and replaces the document through a temp file and rename. Readers take a
/// shared lock. The compare-and-swap rules therefore hold across processes.
#[derive(Clone, Debug)]
pub struct FileMembershipTable {
  deployment_id: String,
  directory:     PathBuf,
}

impl FileMembershipTable {
  /// Creates a table rooted at the directory named by the config's connection string.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipTableError::InvalidConfig`] when the connection string is empty.
  pub fn new(config: &MembershipTableConfig) -> Result<Self, MembershipTableError> {
    if config.connection_string().trim().is_empty() {
      return Err(MembershipTableError::InvalidConfig(
        "file membership table needs a directory path as connection string".into(),
      ));
    }
    Ok(Self { deployment_id: config.deployment_id().into(), directory: PathBuf::from(config.connection_string()) })
  }

  /// Path of the JSON document for `deployment_id`.
  #[must_use]
  pub fn document_path(&self, deployment_id: &str) -> PathBuf {
    self.directory.join(format!("{}.json", file_stem(deployment_id)))
  }

  async fn with_read<R>(
    &self,
    f: impl FnOnce(&DeploymentTable) -> Result<R, MembershipTableError> + Send + 'static,
  ) -> Result<R, MembershipTableError>
  where
    R: Send + 'static, {
    let files = DocumentFiles::new(&self.directory, &self.deployment_id);
    let deployment_id = self.deployment_id.clone();
    run_blocking(move || {
      let _lock = files.lock(false)?;
      let table = files.load(&deployment_id)?;
      f(&table)
    })
    .await
  }

  async fn with_write<R>(
    &self,
    f: impl FnOnce(&mut DeploymentTable) -> Result<(R, bool), MembershipTableError> + Send + 'static,
  ) -> Result<R, MembershipTableError>
  where
    R: Send + 'static, {
    let files = DocumentFiles::new(&self.directory, &self.deployment_id);
    let deployment_id = self.deployment_id.clone();
    run_blocking(move || {
      let _lock = files.lock(true)?;
      let mut table = files.load(&deployment_id)?;
      let (result, dirty) = f(&mut table)?;
      if dirty {
        files.store(&table)?;
      }
      Ok(result)
    })
    .await
  }
}

#[async_trait]
impl MembershipTable for FileMembershipTable {
  fn deployment_id(&self) -> &str {
    &self.deployment_id
  }

  async fn initialize(&self, try_init_table_version: bool) -> Result<bool, MembershipTableError> {
    if !try_init_table_version {
      return self.with_read(|table| Ok(table.is_initialized())).await;
    }
    let created = self
      .with_write(|table| {
        let created = table.initialize();
        Ok((created, created))
      })
      .await?;
    debug!(deployment = %self.deployment_id, created, "file membership table initialized");
    Ok(true)
  }

  async fn delete_deployment_entries(&self, deployment_id: &str) -> Result<(), MembershipTableError> {
    let files = DocumentFiles::new(&self.directory, deployment_id);
    run_blocking(move || {
      if !files.directory.exists() {
        return Ok(());
      }
      let _lock = files.lock(true)?;
      match fs::remove_file(&files.document) {
        | Ok(()) => Ok(()),
        | Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        | Err(error) => Err(error.into()),
      }
    })
    .await
  }

  async fn read_row(&self, silo: &SiloAddress) -> Result<MembershipTableData, MembershipTableError> {
    let silo = *silo;
    self.with_read(move |table| table.read_row(&silo)).await
  }

  async fn read_all(&self) -> Result<MembershipTableData, MembershipTableError> {
    self.with_read(|table| table.read_all()).await
  }

  async fn insert_row(
    &self,
    entry: &MembershipEntry,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    let entry = entry.clone();
    let expected = expected_version.clone();
    self
      .with_write(move |table| {
        let inserted = table.insert_row(&entry, &expected)?;
        Ok((inserted, inserted))
      })
      .await
  }

  async fn update_row(
    &self,
    entry: &MembershipEntry,
    etag: &EntryEtag,
    expected_version: &TableVersion,
  ) -> Result<bool, MembershipTableError> {
    let entry = entry.clone();
    let etag = etag.clone();
    let expected = expected_version.clone();
    self
      .with_write(move |table| {
        let updated = table.update_row(&entry, &etag, &expected)?;
        Ok((updated, updated))
      })
      .await
  }

  async fn merge_alive(&self, entry: &MembershipEntry) -> Result<(), MembershipTableError> {
    let entry = entry.clone();
    self
      .with_write(move |table| {
        table.merge_alive(&entry)?;
        Ok(((), true))
      })
      .await
  }
}

struct DocumentFiles {
  directory: PathBuf,
  document:  PathBuf,
  temporary: PathBuf,
  lock:      PathBuf,
}

impl DocumentFiles {
  fn new(directory: &Path, deployment_id: &str) -> Self {
    let stem = file_stem(deployment_id);
    Self {
      directory: directory.to_path_buf(),
      document:  directory.join(format!("{stem}.json")),
      temporary: directory.join(format!("{stem}.json.tmp")),
      lock:      directory.join(format!("{stem}.lock")),
    }
  }

  fn lock(&self, exclusive: bool) -> Result<File, MembershipTableError> {
    fs::create_dir_all(&self.directory)?;
    let file = OpenOptions::new().read(true).write(true).create(true).truncate(false).open(&self.lock)?;
    if exclusive {
      file.lock_exclusive()?;
    } else {
      file.lock_shared()?;
    }
    Ok(file)
  }

  fn load(&self, deployment_id: &str) -> Result<DeploymentTable, MembershipTableError> {
    let mut file = match File::open(&self.document) {
      | Ok(file) => file,
      | Err(error) if error.kind() == ErrorKind::NotFound => return Ok(DeploymentTable::new(deployment_id)),
      | Err(error) => return Err(error.into()),
    };
    let mut buffer = alloc::vec::Vec::new();
    file.read_to_end(&mut buffer)?;
    let table: DeploymentTable =
      serde_json::from_slice(&buffer).map_err(|error| MembershipTableError::Corrupted(error.to_string()))?;
    if table.deployment_id() != deployment_id {
      return Err(MembershipTableError::Corrupted(format!(
        "document {} belongs to deployment `{}`",
        self.document.display(),
        table.deployment_id()
      )));
    }
    Ok(table)
  }

  fn store(&self, table: &DeploymentTable) -> Result<(), MembershipTableError> {
    let bytes = serde_json::to_vec_pretty(table).map_err(|error| MembershipTableError::Corrupted(error.to_string()))?;
    let mut file = OpenOptions::new().write(true).create(true).truncate(true).open(&self.temporary)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    fs::rename(&self.temporary, &self.document)?;
    Ok(())
  }
}

/// Maps a deployment id onto a portable file stem. Bytes outside `[A-Za-z0-9_.-]` are
/// percent-encoded so distinct ids never share a file.
fn file_stem(deployment_id: &str) -> String {
  let mut stem = String::with_capacity(deployment_id.len());
  for byte in deployment_id.bytes() {
    if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
      stem.push(char::from(byte));
    } else {
      stem.push_str(&format!("%{byte:02X}"));
    }
  }
  stem
}

async fn run_blocking<R>(
  task: impl FnOnce() -> Result<R, MembershipTableError> + Send + 'static,
) -> Result<R, MembershipTableError>
where
  R: Send + 'static, {
  tokio::task::spawn_blocking(task).await.map_err(|error| MembershipTableError::Unavailable(error.to_string()))?
}
