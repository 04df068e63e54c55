use crate::models::{WindowGeometry, WindowSettings};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tauri::{AppHandle, Manager};

pub const SETTINGS_FILE_NAME: &str = "window-settings.json";

/// Where the window controller reads and writes the last normal-state geometry.
pub trait GeometryStore {
    fn saved_geometry(&self) -> WindowGeometry;
    fn store_geometry(&mut self, geometry: WindowGeometry) -> Result<()>;
}

/// Settings file owned by the app: loaded once at startup, written at most once at shutdown.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: WindowSettings,
}

pub fn settings_path(app: &AppHandle) -> Result<PathBuf> {
    let dir = app
        .path()
        .app_config_dir()
        .context("Failed to resolve config dir")?;
    Ok(dir.join(SETTINGS_FILE_NAME))
}

impl SettingsStore {
    /// Missing files yield defaults. A file that exists but cannot be parsed is an error;
    /// callers decide whether to fall back with [`SettingsStore::with_defaults`].
    pub fn load(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::with_defaults(path));
        }

        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings: WindowSettings = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse settings {}", path.display()))?;

        Ok(Self { path, settings })
    }

    pub fn with_defaults(path: PathBuf) -> Self {
        Self {
            path,
            settings: WindowSettings::default(),
        }
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    pub fn save(&self) -> Result<()> {
        write_settings_atomically(&self.path, &self.settings)
            .with_context(|| format!("Failed to write settings {}", self.path.display()))
    }
}

impl GeometryStore for SettingsStore {
    fn saved_geometry(&self) -> WindowGeometry {
        self.settings.geometry()
    }

    fn store_geometry(&mut self, geometry: WindowGeometry) -> Result<()> {
        self.settings.set_geometry(geometry);
        self.save()
    }
}

fn write_settings_atomically(path: &Path, settings: &WindowSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    serde_json::to_writer_pretty(&mut file, settings)?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    let _ = fs::remove_file(path);
    fs::rename(tmp, path)?;
    Ok(())
}
