//! HTML chart output writer.

use super::write_file;
use crate::utils::error::RenderError;
use log::{debug, info};
use std::path::Path;

/// Write a rendered chart page to a file
///
/// **Public** - main entry point for chart output
///
/// # Errors
/// * `RenderError::WriteFailed` - I/O error during write
/// * `RenderError::InvalidPath` - Path is invalid
pub fn write_html(html: &str, output_path: impl AsRef<Path>) -> Result<(), RenderError> {
    let output_path = output_path.as_ref();

    info!("Writing chart to: {}", output_path.display());

    if let Some(ext) = output_path.extension() {
        if ext != "html" {
            debug!("Warning: File does not have .html extension: {}", output_path.display());
        }
    }

    write_file(html, output_path)?;

    info!(
        "Chart written successfully ({} bytes, {:.2} KB)",
        html.len(),
        html.len() as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/output.html");

        write_html("<html></html>", &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_html("<html></html>", temp_dir.path());
        assert!(matches!(result, Err(RenderError::InvalidPath(_))));
    }
}
