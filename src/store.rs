use crate::{
    data::{Config, Record, Schema},
    read::{read_records, RecordUser},
    write::write_record,
};
use anyhow::Context;
use log::{debug, info};
use std::{
    fs::{self, File, OpenOptions},
    io::ErrorKind,
    path::Path,
};

/// Append-only flat file of encoded records. No locking: two processes appending
/// at once get whatever the file system gives append-mode writes.
#[derive(Debug)]
pub(crate) struct Store {
    config: Config,
}

impl Store {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn schema(&self) -> &Schema {
        &self.config.schema
    }

    pub fn path(&self) -> &Path {
        &self.config.store_path
    }

    fn ensure_parent(&self) -> Result<(), anyhow::Error> {
        if let Some(dir) = self.path().parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// Truncates the store to zero records, creating it if needed. Whatever was
    /// stored before is gone.
    pub fn initialize(&self) -> Result<(), anyhow::Error> {
        self.ensure_parent()?;
        File::create(self.path())
            .with_context(|| format!("cannot reset store {}", self.path().display()))?;
        info!("initialized empty store at {}", self.path().display());
        Ok(())
    }

    pub fn append(&self, record: &Record) -> Result<(), anyhow::Error> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .with_context(|| format!("cannot open store {}", self.path().display()))?;
        write_record(file, record, self.schema())
            .with_context(|| format!("cannot write to store {}", self.path().display()))?;
        debug!("appended record to {}", self.path().display());
        Ok(())
    }

    /// Feeds every stored record to `user`, in append order. A missing store file
    /// holds no records.
    pub fn scan<U: RecordUser>(&self, user: &mut U) -> Result<(), anyhow::Error> {
        let file = match File::open(self.path()) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no store at {}, nothing to read", self.path().display());
                return Ok(());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("cannot open store {}", self.path().display()))
            }
        };
        read_records(file, user)
            .with_context(|| format!("cannot read store {}", self.path().display()))
    }

    /// All stored records, or the first decoding error and nothing else.
    pub fn load_all(&self) -> Result<Vec<Record>, anyhow::Error> {
        let mut records = Vec::new();
        self.scan(&mut records)?;
        debug!(
            "loaded {} records from {}",
            records.len(),
            self.path().display()
        );
        Ok(records)
    }
}
