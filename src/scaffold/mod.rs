//! Scaffold command: creates empty text, JSON, CSV and XML files for authoring
//! dialogue and data assets.
pub mod templates;

use std::{
    fmt,
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
};

pub use templates::FileTemplate;

pub const DEFAULT_ASSET_ROOT: &str = "assets";
const MAX_NAME_ATTEMPTS: usize = 1000;

#[derive(Debug)]
pub enum ScaffoldError {
    InvalidName { name: String },
    MissingDirectory { path: PathBuf },
    NoFreeName { directory: PathBuf, stem: String },
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => {
                write!(f, "invalid file name '{}': must not contain path separators", name)
            }
            Self::MissingDirectory { path } => {
                write!(f, "target directory {} does not exist", path.display())
            }
            Self::NoFreeName { directory, stem } => write!(
                f,
                "no free file name for '{}' in {}",
                stem,
                directory.display()
            ),
            Self::Io { path, source } => write!(f, "failed to create {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Directory new files go into.
///
/// Without a selection this is `root`. A selection that is an existing
/// directory is used as-is; anything else (a file, a missing path) resolves
/// to its parent.
pub fn resolve_target_directory(selection: Option<&Path>, root: &Path) -> PathBuf {
    let Some(selection) = selection.filter(|path| !path.as_os_str().is_empty()) else {
        return root.to_path_buf();
    };

    if selection.is_dir() {
        return selection.to_path_buf();
    }

    match selection.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => root.to_path_buf(),
    }
}

/// Creates an empty `template` file in `directory` and returns its path.
///
/// Uses `name` (or the template's default name) as the stem. Existing files
/// are never overwritten: ` 1`, ` 2`, ... is appended until a free name is
/// found.
pub fn create_empty_file(
    directory: &Path,
    template: FileTemplate,
    name: Option<&str>,
) -> Result<PathBuf, ScaffoldError> {
    let stem = file_stem(template, name)?;
    if !directory.is_dir() {
        return Err(ScaffoldError::MissingDirectory {
            path: directory.to_path_buf(),
        });
    }

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let file_name = if attempt == 0 {
            format!("{}{}", stem, template.extension())
        } else {
            format!("{} {}{}", stem, attempt, template.extension())
        };
        let path = directory.join(file_name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => return Ok(path),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ScaffoldError::Io { path, source }),
        }
    }

    Err(ScaffoldError::NoFreeName {
        directory: directory.to_path_buf(),
        stem,
    })
}

fn file_stem(template: FileTemplate, name: Option<&str>) -> Result<String, ScaffoldError> {
    let name = name.map(str::trim).filter(|name| !name.is_empty());
    let Some(name) = name else {
        return Ok(template.default_name().to_string());
    };

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ScaffoldError::InvalidName {
            name: name.to_string(),
        });
    }

    let stem = name.strip_suffix(template.extension()).unwrap_or(name);
    if stem.is_empty() {
        return Err(ScaffoldError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(stem.to_string())
}

/// Runs the `new-file` subcommand.
pub fn execute(
    template: FileTemplate,
    selection: Option<&Path>,
    name: Option<&str>,
    root: &Path,
) -> Result<PathBuf, ScaffoldError> {
    let directory = resolve_target_directory(selection, root);
    let path = create_empty_file(&directory, template, name)?;
    println!("Created {}: {}", template, path.display());
    Ok(path)
}
