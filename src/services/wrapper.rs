//! Rendering wrapper staging: download, unpack into the game directory, and
//! write the wrapper's own configuration file.

use std::fs;
use std::io::{Cursor, Read};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use super::SetupError;
use super::display::Resolution;
use crate::models::WrapperConfig;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Where the wrapper payload comes from.
pub trait WrapperSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SetupError>;
}

/// Blocking HTTP download with a single global timeout and no retries.
pub struct HttpWrapperSource {
    agent: ureq::Agent,
}

impl HttpWrapperSource {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl WrapperSource for HttpWrapperSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SetupError> {
        let download_error = |message: String| SetupError::Download {
            url: url.to_string(),
            message,
        };

        tracing::info!("Downloading {}", url);
        let response = self
            .agent
            .get(url)
            .header("User-Agent", concat!("armymen2-setup/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|e| download_error(e.to_string()))?;

        let mut bytes = Vec::new();
        response
            .into_body()
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| download_error(e.to_string()))?;

        tracing::debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

/// Files written into the game directory by [`install_wrapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperInstall {
    pub files: Vec<Utf8PathBuf>,
    pub config_file: Option<Utf8PathBuf>,
}

/// Fetches the wrapper, unpacks it into `game_dir`, and renders its config.
pub fn install_wrapper(
    source: &dyn WrapperSource,
    config: &WrapperConfig,
    game_dir: &Utf8Path,
    resolution: Resolution,
) -> Result<WrapperInstall, SetupError> {
    let payload = source.fetch(&config.download_url)?;

    let files = if payload.starts_with(ZIP_MAGIC) {
        unpack_zip(&payload, game_dir)?
    } else {
        let name = file_name_from_url(&config.download_url).ok_or_else(|| {
            SetupError::Archive(format!("cannot name payload from {}", config.download_url))
        })?;
        let dest = game_dir.join(name);
        fs::write(&dest, &payload).map_err(|e| SetupError::write(&dest, e))?;
        vec![dest]
    };

    let config_file = if config.config_file.is_empty() {
        None
    } else {
        let dest = game_dir.join(&config.config_file);
        fs::write(&dest, render_template(&config.config_template, resolution))
            .map_err(|e| SetupError::write(&dest, e))?;
        Some(dest)
    };

    tracing::info!(
        "Installed wrapper into {} ({} files{})",
        game_dir,
        files.len(),
        if config_file.is_some() { ", config written" } else { "" }
    );

    Ok(WrapperInstall { files, config_file })
}

/// Substitutes `{width}` and `{height}` in the wrapper config template.
pub fn render_template(template: &str, resolution: Resolution) -> String {
    template
        .replace("{width}", &resolution.width.to_string())
        .replace("{height}", &resolution.height.to_string())
}

fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Extracts every file entry, keeping its relative path under `dest`.
fn unpack_zip(bytes: &[u8], dest: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SetupError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SetupError::Archive(format!("failed to open zip: {}", e)))?;

    let mut written = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| SetupError::Archive(format!("failed to read zip entry: {}", e)))?;

        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry
            .enclosed_name()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        else {
            tracing::warn!("Skipping zip entry {:?} outside the game directory", entry.name());
            continue;
        };

        let dest_path = dest.join(&relative);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SetupError::write(parent, e))?;
        }

        let mut outfile =
            fs::File::create(&dest_path).map_err(|e| SetupError::write(&dest_path, e))?;
        std::io::copy(&mut entry, &mut outfile).map_err(|e| SetupError::write(&dest_path, e))?;

        tracing::debug!("Extracted {}", dest_path);
        written.push(dest_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let res = Resolution {
            width: 1600,
            height: 1200,
        };
        assert_eq!(
            render_template("[ddraw]\nwidth={width}\nheight={height}\n", res),
            "[ddraw]\nwidth=1600\nheight=1200\n"
        );
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://example.com/dl/ddraw.dll?raw=1"),
            Some("ddraw.dll")
        );
        assert_eq!(file_name_from_url("https://example.com/"), None);
    }

    #[test]
    fn test_escaping_zip_entry_is_skipped() {
        use std::io::Write;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let dest = base.join("game");
        fs::create_dir_all(&dest).unwrap();

        let mut archive = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        archive.start_file("../escape.txt", options).unwrap();
        archive.write_all(b"nope").unwrap();
        archive.start_file("ddraw.dll", options).unwrap();
        archive.write_all(b"MZ").unwrap();
        let bytes = archive.finish().unwrap().into_inner();

        let written = unpack_zip(&bytes, &dest).unwrap();

        assert_eq!(written, vec![dest.join("ddraw.dll")]);
        assert!(!base.join("escape.txt").exists());
    }

    #[test]
    fn test_invalid_zip_is_archive_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dest = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let bytes = b"PK\x03\x04garbage";
        assert!(matches!(
            unpack_zip(bytes, &dest),
            Err(SetupError::Archive(_))
        ));
    }
}
