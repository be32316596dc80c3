// crates/task_store/src/lib.rs

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use task_line::{format_task_line, leading_id, leading_id_token, parse_task_line, validate_field};

/// A todo list kept as one task line per row of a plain text file.
///
/// The store holds only the path. Every operation opens the file, re-reads
/// whatever it needs and closes it again before returning. Lines are handled
/// as raw bytes, so content that is not UTF-8 is scanned and kept intact.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Binds a store to `path`, creating an empty file if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Error opening {}", path.display()))?;
        log::debug!("Using task file {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns one more than the largest leading id in the file, or 1 when no
    /// line carries an id. Lines that do not start with a digit are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a leading id overflows.
    pub fn generate_id(&self) -> Result<u64> {
        let content = self.read_all()?;
        let mut biggest_id = 0u64;

        for (index, line) in split_lines(&content).into_iter().enumerate() {
            let id = leading_id(line)
                .with_context(|| format!("Line {} of {}", index + 1, self.path.display()))?;
            if let Some(id) = id {
                biggest_id = biggest_id.max(id);
            }
        }

        let next_id = biggest_id
            .checked_add(1)
            .context("No task ids left after the largest existing id")?;
        log::debug!("Largest task id is {}; next id is {}", biggest_id, next_id);
        Ok(next_id)
    }

    /// Appends `<id>. <description> - <due_date>` as a new line.
    ///
    /// If the file does not end with a newline, one is written first so the
    /// record always starts on its own line.
    ///
    /// # Errors
    ///
    /// Returns an error if either field contains a line break or the write fails.
    pub fn add_task(&self, id: u64, description: &str, due_date: &str) -> Result<()> {
        validate_field("description", description)?;
        validate_field("due date", due_date)?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Error opening {}", self.path.display()))?;

        let mut line = String::new();
        if self.missing_trailing_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&format_task_line(id, description, due_date));
        line.push('\n');

        file.write_all(line.as_bytes())
            .with_context(|| format!("Error writing to {}", self.path.display()))?;
        log::debug!("Added task {} to {}", id, self.path.display());
        Ok(())
    }

    /// Generates the next id and appends the task under it.
    pub fn add(&self, description: &str, due_date: &str) -> Result<u64> {
        let id = self.generate_id()?;
        self.add_task(id, description, due_date)?;
        Ok(id)
    }

    /// Drops every line whose leading digits are exactly `id`, compared as
    /// text, and rewrites the rest in their original order. Returns the
    /// number of lines removed.
    ///
    /// `"2"` does not match a line starting `02.`, and a token that is not a
    /// plain run of digits (`"+2"`, `"abc"`) matches nothing. When nothing
    /// matches the file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, truncated or rewritten.
    pub fn remove_task(&self, id: &str) -> Result<usize> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("Error opening {}", self.path.display()))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .with_context(|| format!("Error reading {}", self.path.display()))?;

        let target = id.as_bytes();
        let mut kept: Vec<&[u8]> = Vec::new();
        let mut removed = 0usize;
        for line in split_lines(&content) {
            if leading_id_token(line) == Some(target) {
                if let Some(task) = std::str::from_utf8(line).ok().and_then(parse_task_line) {
                    log::debug!("Removing task {}: {}", task.id, task.description);
                }
                removed += 1;
            } else {
                kept.push(line);
            }
        }

        if removed == 0 {
            log::debug!("No task with id {} in {}", id, self.path.display());
            return Ok(0);
        }

        let mut rewritten = kept.join(&b'\n');
        if !rewritten.is_empty() {
            rewritten.push(b'\n');
        }

        file.set_len(0)
            .with_context(|| format!("Error truncating {}", self.path.display()))?;
        file.seek(SeekFrom::Start(0))
            .with_context(|| format!("Error rewinding {}", self.path.display()))?;
        file.write_all(&rewritten)
            .with_context(|| format!("Error writing to {}", self.path.display()))?;

        log::debug!(
            "Removed {} line(s); {} line(s) kept in {}",
            removed,
            kept.len(),
            self.path.display()
        );
        Ok(removed)
    }

    /// Copies the file to `out` byte for byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or `out` cannot be written.
    pub fn list_tasks<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut file = self.open_read()?;
        io::copy(&mut file, out)
            .with_context(|| format!("Error listing {}", self.path.display()))?;
        out.flush().context("Error flushing task listing")?;
        Ok(())
    }

    fn open_read(&self) -> Result<File> {
        File::open(&self.path).with_context(|| format!("Error opening {}", self.path.display()))
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        self.open_read()?
            .read_to_end(&mut content)
            .with_context(|| format!("Error reading {}", self.path.display()))?;
        Ok(content)
    }

    fn missing_trailing_newline(&self, file: &mut File) -> Result<bool> {
        let len = file
            .metadata()
            .with_context(|| format!("Error reading metadata of {}", self.path.display()))?
            .len();
        if len == 0 {
            return Ok(false);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .with_context(|| format!("Error reading {}", self.path.display()))?;
        Ok(last[0] != b'\n')
    }
}

/// Splits on `\n`, keeping every other byte of each line. A final newline
/// does not start an extra empty line.
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|&b| b == b'\n').collect()
}
