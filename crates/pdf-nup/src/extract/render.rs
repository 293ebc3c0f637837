//! Invocation of the external rasterizer

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use super::{BoundingBox, ExtractConfig, extract_boxes};
use crate::constants::{DEFAULT_RENDERER, RASTER_SIZE};
use crate::types::{NupError, RasterMode, Result};

/// The program that turns a document on stdin into raster images on stdout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RendererCommand {
    pub program: String,
    /// Arguments replacing the Ghostscript defaults
    pub args: Option<Vec<String>>,
}

impl Default for RendererCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER.to_string(),
            args: None,
        }
    }
}

impl RendererCommand {
    /// Arguments passed to the renderer for the given raster mode
    pub fn arguments(&self, mode: RasterMode) -> Vec<String> {
        if let Some(args) = &self.args {
            return args.clone();
        }
        let device = match mode {
            RasterMode::Bilevel => "pbmraw",
            RasterMode::Color => "ppmraw",
        };
        vec![
            "-q".to_string(),
            "-dNOPAUSE".to_string(),
            format!("-sDEVICE={}", device),
            format!("-g{}x{}", RASTER_SIZE, RASTER_SIZE),
            "-sOutputFile=-".to_string(),
            "-".to_string(),
        ]
    }
}

/// Open the document to feed the renderer. Directories are refused.
fn open_input(path: &Path) -> Result<File> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(NupError::Io(io::Error::new(
            io::ErrorKind::IsADirectory,
            "Is a directory",
        )));
    }
    Ok(file)
}

/// Render `input` (stdin when `None`) and extract per-slot bounding boxes
/// from the renderer's output.
pub(crate) fn render_and_extract(
    input: Option<&Path>,
    renderer: &RendererCommand,
    config: &ExtractConfig,
) -> Result<Vec<BoundingBox>> {
    let stdin = match input {
        Some(path) => Stdio::from(open_input(path)?),
        None => Stdio::inherit(),
    };

    let args = renderer.arguments(config.mode);
    debug!("running {} {}", renderer.program, args.join(" "));

    let mut child = Command::new(&renderer.program)
        .args(&args)
        .stdin(stdin)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|source| NupError::RendererUnavailable {
            program: renderer.program.clone(),
            source,
        })?;

    let stdout = child.stdout.take().ok_or_else(|| {
        NupError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "renderer output unavailable",
        ))
    })?;

    // `extract_boxes` drops the pipe before we wait on the child.
    let result = extract_boxes(stdout, config);

    // Exit status is ignored.
    match child.wait() {
        Ok(status) => debug!("renderer exited with {}", status),
        Err(e) => debug!("could not wait for renderer: {}", e),
    }

    result
}
