use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Replace `path` with `data` so readers see either the old output or the new one.
///
/// The bytes go to `<name>.tmp` next to the target, are flushed, and then renamed
/// over it. On unix the parent directory is synced so the rename survives a crash.
/// The temp file is removed again if the rename fails.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path(path)?;
    let parent = output_dir(path);
    if let Some(dir) = parent {
        fs::create_dir_all(dir)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    match parent {
        Some(dir) => sync_dir(dir),
        None => Ok(()),
    }
}

fn output_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path {} has no file name", path.display()),
        )
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    OpenOptions::new().read(true).open(dir)?.sync_all()
}

// Directories cannot be opened as files on windows.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
