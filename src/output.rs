//
// output.rs
// CTP-DicomEdit
//
// File-backed script sink, default output naming and the overwrite policy for existing DicomEdit scripts.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::script::ScriptSink;

/// Extension used for generated DicomEdit scripts.
pub const SCRIPT_EXTENSION: &str = "das";

/// Sink that writes each assembler phase to disk in its own open/append/close cycle.
///
/// The first phase truncates the file; every later phase appends.
pub struct FileSink {
    path: PathBuf,
    started: bool,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            started: false,
        }
    }
}

impl ScriptSink for FileSink {
    fn append_section(&mut self, lines: &[String]) -> io::Result<()> {
        let file = if self.started {
            OpenOptions::new().append(true).open(&self.path)?
        } else {
            File::create(&self.path)?
        };
        self.started = true;

        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }

    fn discard(&mut self) -> io::Result<()> {
        if !self.started {
            return Ok(());
        }
        self.started = false;
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// `script.xml` becomes `script.das` next to it.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(SCRIPT_EXTENSION)
}

/// Asks the operator a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Interactive confirmation on stdin/stdout.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        print!("{question} [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(answer_is_yes(&input))
    }
}

/// Never agrees; for non-interactive runs.
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(false)
    }
}

fn answer_is_yes(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// What to do when the output script already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    #[default]
    Prompt,
    Overwrite,
    Skip,
}

impl OverwritePolicy {
    pub fn from_flags(force: bool, no_clobber: bool) -> Self {
        match (force, no_clobber) {
            (true, _) => OverwritePolicy::Overwrite,
            (false, true) => OverwritePolicy::Skip,
            (false, false) => OverwritePolicy::Prompt,
        }
    }

    /// Whether writing to `path` may go ahead.
    pub fn allows_write(self, path: &Path, confirm: &mut dyn Confirm) -> io::Result<bool> {
        if !path.exists() {
            return Ok(true);
        }
        match self {
            OverwritePolicy::Overwrite => Ok(true),
            OverwritePolicy::Skip => Ok(false),
            OverwritePolicy::Prompt => {
                confirm.confirm(&format!("{} already exists. Overwrite?", path.display()))
            }
        }
    }
}
