//! Tool file persistence.

use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Writes generated tool files into an output directory. Files are created
/// or overwritten in place; no backup or conflict detection.
pub struct ToolWriter {
    out_dir: PathBuf,
}

impl ToolWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Filename for the first generation of a tool.
    pub fn tool_filename(tool_name: &str) -> String {
        format!("{}.py", tool_name)
    }

    /// Filename for the revised version of a tool.
    pub fn improved_filename(tool_name: &str) -> String {
        format!("{}_improved.py", tool_name)
    }

    /// Write `content` to `filename` under the output directory and return
    /// the absolute path of the written file.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, ApiError> {
        std::fs::create_dir_all(&self.out_dir).map_err(|e| {
            ApiError::WriteError(format!(
                "Failed to create output directory {}: {}",
                self.out_dir.display(),
                e
            ))
        })?;
        let path = self.out_dir.join(filename);
        std::fs::write(&path, content).map_err(|e| {
            ApiError::WriteError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        absolute_path(&path)
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, ApiError> {
    path.canonicalize().map_err(|e| {
        ApiError::WriteError(format!(
            "Failed to resolve absolute path for {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_follow_tool_name() {
        assert_eq!(ToolWriter::tool_filename("greeter"), "greeter.py");
        assert_eq!(
            ToolWriter::improved_filename("greeter"),
            "greeter_improved.py"
        );
    }

    #[test]
    fn write_creates_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ToolWriter::new(dir.path());

        let path = writer.write("tool.py", "def f(): pass\n").unwrap();
        assert!(path.is_absolute());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "def f(): pass\n");

        let path = writer.write("tool.py", "def f(): return 2\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "def f(): return 2\n"
        );
    }

    #[test]
    fn write_creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ToolWriter::new(dir.path().join("nested/tools"));
        let path = writer.write("tool.py", "x = 1\n").unwrap();
        assert!(path.exists());
    }
}
