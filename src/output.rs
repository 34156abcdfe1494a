use crate::error::Result;
use crate::statement::Statement;

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

pub trait StatementWriter {
    fn write(&mut self, statement: &Statement) -> Result<()>;
}

/// Writes the statement as JSON indented by two spaces.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatementWriter for JsonWriter<W> {
    fn write(&mut self, statement: &Statement) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, statement)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the statement to a file, replacing any previous content.
///
/// Missing parent directories are created. The file is only touched when
/// [`StatementWriter::write`] is called.
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatementWriter for JsonFileWriter {
    fn write(&mut self, statement: &Statement) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        JsonWriter::new(file).write(statement)
    }
}
