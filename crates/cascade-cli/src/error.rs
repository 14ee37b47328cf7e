//! Errors specific to the command line.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A page in the build description names a module the graph lacks.
    #[error("page `{page}` is not in the module graph")]
    UnknownPage { page: String },
}
