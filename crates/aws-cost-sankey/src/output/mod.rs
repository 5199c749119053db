//! Output writers for the cost graph projections.
//!
//! This module handles writing data to disk in various formats:
//! - Plain-text edge lists (also the replay input format)
//! - HTML Sankey charts

pub mod html;
pub mod text;

// Re-export main functions
pub use html::write_html;
pub use text::{emit_text, format_edge_line, write_text};

use crate::utils::error::RenderError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), RenderError> {
    if path.as_os_str().is_empty() {
        return Err(RenderError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(RenderError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate the path, create parent directories and write `content`
///
/// **Private** - shared by the format-specific writers
fn write_file(content: &str, output_path: &Path) -> Result<(), RenderError> {
    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                RenderError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    Ok(())
}
