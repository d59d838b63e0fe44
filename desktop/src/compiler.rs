use std::io::Write;
use std::path::{Path, PathBuf};

use iconc_core::{Artifact, ArtifactEntry, ArtifactError, IconEncoder, SizeClass, symbol_name};
use log::{debug, info};

use crate::error::CompileError;
use crate::normalize::load_icon;

/// Only files with this extension are picked up.
pub const ICON_EXTENSION: &str = "png";

/// Where icons come from and where the header goes.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    pub widget_dir: PathBuf,
    pub ui_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            widget_dir: PathBuf::from("icons-buttons"),
            ui_dir: PathBuf::from("icons-ui"),
            output: PathBuf::from("src/assets/icons.h"),
        }
    }
}

impl CompileConfig {
    pub fn input_dir(&self, size_class: SizeClass) -> &Path {
        match size_class {
            SizeClass::Widget => &self.widget_dir,
            SizeClass::Ui => &self.ui_dir,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileReport {
    pub widget_icons: usize,
    pub ui_icons: usize,
    pub bitmap_bytes: usize,
}

/// Icon files in `dir`, sorted by file name. A missing directory has no icons.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let read_dir_error = |source| CompileError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("Input directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(read_dir_error(err)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_error)?;
        // glob skips dot-files
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == ICON_EXTENSION) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Run every icon through the pipeline, widget group first.
pub fn compile(config: &CompileConfig, encoder: &impl IconEncoder) -> Result<Artifact, CompileError> {
    let mut artifact = Artifact::new();
    for size_class in SizeClass::ALL {
        let files = discover(config.input_dir(size_class))?;
        debug!("{} {} icons", files.len(), size_class.repr());
        for path in files {
            let entry = process_icon(&path, size_class, encoder)?;
            info!("Processing {} → {}", path.display(), entry.symbol);
            artifact.push(entry).map_err(|err| match err {
                ArtifactError::DuplicateSymbol { symbol, existing } => {
                    CompileError::DuplicateSymbol {
                        symbol,
                        path: path.clone(),
                        existing,
                    }
                }
            })?;
        }
    }
    Ok(artifact)
}

fn process_icon(
    path: &Path,
    size_class: SizeClass,
    encoder: &impl IconEncoder,
) -> Result<ArtifactEntry, CompileError> {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let symbol = symbol_name(&stem);
    let raster = load_icon(path, size_class)?;
    let bitmap = encoder.encode(&raster).map_err(|source| CompileError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ArtifactEntry {
        symbol,
        origin: path.display().to_string(),
        size_class,
        bitmap,
    })
}

/// Replace `path` with `contents` through a temporary file in the same
/// directory, so a failed run never leaves a truncated header behind.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), CompileError> {
    let io_error = |source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    if let Some(permissions) = output_permissions(path) {
        file.as_file().set_permissions(permissions).map_err(io_error)?;
    }
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Keep the mode of an existing header, otherwise use the usual 0644 instead
/// of the temp file's 0600.
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(metadata) = std::fs::metadata(path) {
        return Some(metadata.permissions());
    }
    default_permissions()
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

/// Compile all icons and write the header.
pub fn run(config: &CompileConfig, encoder: &impl IconEncoder) -> Result<CompileReport, CompileError> {
    let artifact = compile(config, encoder)?;
    write_atomically(&config.output, &artifact.render())?;
    Ok(CompileReport {
        widget_icons: artifact.count(SizeClass::Widget),
        ui_icons: artifact.count(SizeClass::Ui),
        bitmap_bytes: artifact.total_bytes(),
    })
}
