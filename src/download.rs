use crate::error::Result;
use crate::export::Export;
use directories::UserDirs;
use std::fs;
use std::path::PathBuf;

/// Hands an export over to the user.
pub trait Downloader {
    fn save(&self, export: &Export) -> Result<PathBuf>;
}

/// Saves exports as files in one directory.
#[derive(Debug, Clone)]
pub struct DirDownloader {
    dir: PathBuf,
}

impl DirDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download folder, or the working directory without one.
    pub fn user_downloads() -> Self {
        let dir = UserDirs::new()
            .and_then(|u| u.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }
}

impl Downloader for DirDownloader {
    fn save(&self, export: &Export) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(&export.filename);
        // write beside the target, then rename over it
        let partial = self.dir.join(format!(".{}.part", export.filename));
        let written = fs::write(&partial, &export.bytes).and_then(|()| fs::rename(&partial, &target));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&partial) {
                log::debug!("could not remove {}: {cleanup}", partial.display());
            }
            return Err(e.into());
        }
        log::info!(
            "saved {} ({}, {} bytes)",
            target.display(),
            export.mime,
            export.bytes.len()
        );
        Ok(target)
    }
}
