use crate::config::Config;
use crate::db::log::insert_log;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Copy the database file to `dest_file`, optionally zipping it.
/// An existing destination is only overwritten with `force`.
pub fn backup_database(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
    let src = Path::new(&cfg.database);
    let dest = Path::new(dest_file);

    if !src.exists() {
        return Err(AppError::NotFound(format!(
            "database {}",
            src.display()
        )));
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    if dest.exists() && !force {
        return Err(AppError::Validation(format!(
            "'{}' already exists (use --force to overwrite)",
            dest.display()
        )));
    }

    fs::copy(src, dest)?;

    let final_path = if compress {
        let zipped = compress_backup(dest)?;
        fs::remove_file(dest)?;
        zipped
    } else {
        dest.to_path_buf()
    };

    // Record the backup in the internal log
    if let Ok(conn) = Connection::open(src) {
        let _ = insert_log(
            &conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );
    }

    Ok(final_path)
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.sqlite".to_string());
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}
