use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CorruptRecord, PersistenceError};
use crate::model::task::Task;
use crate::repository::codec;
use crate::repository::traits::{LoadReport, SkippedLine, TaskRepository};
use crate::time::DateTimeResolver;

const DEFAULT_DIR_NAME: &str = ".taskline";
const DEFAULT_FILE_NAME: &str = "tasks.txt";

#[derive(Debug, Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
    resolver: DateTimeResolver,
}

impl FileTaskRepository {
    /// Opens the store at `file_path`, or `~/.taskline/tasks.txt` when `None`.
    /// The parent directory is created if it does not exist; the file itself
    /// is only written on the first save.
    pub fn new(file_path: Option<PathBuf>) -> Result<Self, PersistenceError> {
        let path = match file_path {
            Some(path) => path,
            None => default_data_path()?,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        Ok(FileTaskRepository {
            file_path: path,
            resolver: DateTimeResolver::new(),
        })
    }

    /// Uses `resolver` when re-resolving stored date text.
    pub fn with_resolver(mut self, resolver: DateTimeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> io::Result<LoadReport> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let mut report = LoadReport::default();

        // Split on raw bytes so one undecodable line cannot fail the whole load.
        for (i, bytes) in reader.split(b'\n').enumerate() {
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line_number = i + 1;
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    warn!(line_number, "skipping corrupted record: invalid UTF-8");
                    report.skipped.push(SkippedLine {
                        line_number,
                        content,
                        reason: CorruptRecord::InvalidUtf8,
                    });
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode(&line, &self.resolver) {
                Ok(task) => report.tasks.push(task),
                Err(reason) => {
                    warn!(line_number, %reason, "skipping corrupted record: {}", line);
                    report.skipped.push(SkippedLine {
                        line_number,
                        content: line,
                        reason,
                    });
                }
            }
        }
        Ok(report)
    }

    fn write_tasks(&self, tasks: &[Task]) -> io::Result<()> {
        // Full snapshot into a sibling file, then swap it in.
        let tmp_path = self.file_path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            for task in tasks {
                writeln!(writer, "{}", codec::encode(task))?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.file_path)
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> Result<LoadReport, PersistenceError> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "no data file yet");
            return Ok(LoadReport::default());
        }
        let report = self.read_tasks().map_err(|source| PersistenceError::Read {
            path: self.file_path.clone(),
            source,
        })?;
        debug!(
            loaded = report.tasks.len(),
            skipped = report.skipped.len(),
            "loaded data file"
        );
        Ok(report)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        self.write_tasks(tasks).map_err(|source| PersistenceError::Write {
            path: self.file_path.clone(),
            source,
        })?;
        debug!(count = tasks.len(), path = %self.file_path.display(), "saved tasks");
        Ok(())
    }
}

fn default_data_path() -> Result<PathBuf, PersistenceError> {
    let home_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
    Ok(home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
}
