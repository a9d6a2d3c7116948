pub mod codec;

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};

use crate::error::StorageError;
use crate::store::Record;

/// Separator between fields of a save-file line
pub const FIELD_SEPARATOR: &str = " | ";

/// A record that can be written to and read back from one save-file line
pub trait FlatRecord: Record + Sized {
    fn to_fields(&self) -> Vec<String>;

    /// Rebuilds a record from the trimmed fields of one line
    fn from_fields(fields: &StringRecord) -> Result<Self, StorageError>;

    fn to_line(&self) -> String {
        self.to_fields().join(FIELD_SEPARATOR)
    }
}

/// A save-file line that could not be decoded and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: u64,
    pub content: String,
    pub reason: String,
}

/// Records read from a save file, plus any lines that were skipped
#[derive(Debug)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedLine>,
}

/// Pipe-delimited save file holding one record per line
#[derive(Debug, Clone)]
pub struct FlatFile<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: FlatRecord> FlatFile<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in the file.
    ///
    /// A missing file gives an empty list (its directory is created so the
    /// first write succeeds). Lines that do not decode are skipped and
    /// reported back rather than failing the whole load.
    pub fn load_all(&self) -> Result<LoadReport<T>, StorageError> {
        let mut report = LoadReport {
            records: Vec::new(),
            skipped: Vec::new(),
        };

        if !self.path.exists() {
            self.ensure_parent()?;
            return Ok(report);
        }

        let text = fs::read_to_string(&self.path)?;
        let raw_lines: Vec<&str> = text.lines().collect();
        let raw_line = |line_number: u64| -> String {
            usize::try_from(line_number)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| raw_lines.get(i))
                .map(|line| line.to_string())
                .unwrap_or_default()
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'|')
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        for result in reader.records() {
            let (line_number, outcome) = match result {
                Ok(fields) => {
                    let line_number = fields.position().map(|p| p.line()).unwrap_or(0);
                    (line_number, T::from_fields(&fields))
                }
                Err(e) => {
                    let line_number = e.position().map(|p| p.line()).unwrap_or(0);
                    (line_number, Err(StorageError::Csv(e)))
                }
            };
            let content = raw_line(line_number);

            match outcome {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!(
                        "Skipping line {} of {}: {} ({})",
                        line_number,
                        self.path.display(),
                        content,
                        e
                    );
                    report.skipped.push(SkippedLine {
                        line_number,
                        content,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Loaded {} {} record(s) from {}",
            report.records.len(),
            T::ENTITY,
            self.path.display()
        );
        Ok(report)
    }

    /// Appends one record, creating the file if needed
    pub fn append_one(&self, record: &T) -> Result<(), StorageError> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;
        Ok(())
    }

    /// Replaces the file contents with `records`
    pub fn overwrite_all(&self, records: &[T]) -> Result<(), StorageError> {
        self.ensure_parent()?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for record in records {
            writeln!(writer, "{}", record.to_line())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
