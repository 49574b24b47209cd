//
// script.rs
// CTP-DicomEdit
//
// Assembles the DicomEdit script in its fixed order (preamble, parameters, elements, global removes) onto a sink.
//
// Thales Matheus Mendonça Santos - October 2026

use std::io;

use thiserror::Error;

use crate::models::{Section, TranslatedScript};

/// Header written once at the top of every generated script.
pub const PREAMBLE: [&str; 4] = [
    "// This DicomEdit script was automatically generated.",
    "// Converted from a CTP DicomAnonymizer script by ctp-dicomedit.",
    "version \"6.6\"",
    "",
];

/// Append-only destination for generated lines.
///
/// Each call carries one whole phase of the script; implementations must have
/// the lines durably written before returning.
pub trait ScriptSink {
    fn append_section(&mut self, lines: &[String]) -> io::Result<()>;

    /// Drop whatever was written so far. Called when a later phase fails, so an
    /// incomplete script never looks like a finished one.
    fn discard(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ScriptSink for Vec<String> {
    fn append_section(&mut self, lines: &[String]) -> io::Result<()> {
        self.extend_from_slice(lines);
        Ok(())
    }

    fn discard(&mut self) -> io::Result<()> {
        self.clear();
        Ok(())
    }
}

impl<S: ScriptSink + ?Sized> ScriptSink for &mut S {
    fn append_section(&mut self, lines: &[String]) -> io::Result<()> {
        (**self).append_section(lines)
    }

    fn discard(&mut self) -> io::Result<()> {
        (**self).discard()
    }
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("{attempted:?} section cannot be written after {current:?}")]
    OutOfOrder { current: Section, attempted: Section },
    #[error("failed to write the script preamble")]
    Preamble(#[source] io::Error),
    #[error("failed to write the {section:?} section")]
    Sink {
        section: Section,
        #[source]
        source: io::Error,
    },
}

/// Writes sections strictly in [`Section::ORDER`], each at most once, with the
/// preamble emitted ahead of the first one.
pub struct ScriptAssembler<S> {
    sink: S,
    preamble_written: bool,
    last: Option<Section>,
}

impl<S: ScriptSink> ScriptAssembler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            preamble_written: false,
            last: None,
        }
    }

    pub fn write_section(&mut self, section: Section, lines: &[String]) -> Result<(), AssemblyError> {
        if let Some(current) = self.last {
            if section <= current {
                return Err(AssemblyError::OutOfOrder {
                    current,
                    attempted: section,
                });
            }
        }

        self.ensure_preamble()?;
        self.sink
            .append_section(lines)
            .map_err(|source| AssemblyError::Sink { section, source })?;
        self.last = Some(section);
        tracing::debug!(?section, lines = lines.len(), "wrote script section");
        Ok(())
    }

    /// Write every section of `script` in order.
    pub fn write_script(&mut self, script: &TranslatedScript) -> Result<(), AssemblyError> {
        for section in Section::ORDER {
            self.write_section(section, script.section(section))?;
        }
        Ok(())
    }

    /// Hand the sink back. A script with no sections still gets its preamble.
    pub fn finish(mut self) -> Result<S, AssemblyError> {
        self.ensure_preamble()?;
        Ok(self.sink)
    }

    fn ensure_preamble(&mut self) -> Result<(), AssemblyError> {
        if self.preamble_written {
            return Ok(());
        }
        let preamble: Vec<String> = PREAMBLE.iter().map(|line| line.to_string()).collect();
        self.sink
            .append_section(&preamble)
            .map_err(AssemblyError::Preamble)?;
        self.preamble_written = true;
        Ok(())
    }
}

/// Assemble `script` onto `sink` and return the sink. On failure the sink is
/// discarded before the error is returned.
pub fn assemble<S: ScriptSink>(sink: S, script: &TranslatedScript) -> Result<S, AssemblyError> {
    let mut assembler = ScriptAssembler::new(sink);
    if let Err(err) = assembler.write_script(script) {
        if let Err(discard_err) = assembler.sink.discard() {
            tracing::warn!(error = %discard_err, "could not discard partial script");
        }
        return Err(err);
    }
    assembler.finish()
}

/// In-memory rendering of the complete script, one entry per line.
pub fn render_lines(script: &TranslatedScript) -> Vec<String> {
    let mut lines = PREAMBLE.iter().map(|line| line.to_string()).collect::<Vec<_>>();
    for section in Section::ORDER {
        lines.extend_from_slice(script.section(section));
    }
    lines
}

/// Complete script text with every line newline-terminated.
pub fn render(script: &TranslatedScript) -> String {
    render_lines(script)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}
