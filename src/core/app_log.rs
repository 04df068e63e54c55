use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tauri::{AppHandle, Manager, Runtime};

const LOG_FILE_NAME: &str = "app.log.jsonl";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;
const MAX_ROTATIONS: usize = 3;

static LOG_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLogRecord {
    pub ts_ms: i64,
    pub level: String,
    pub scope: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AppLogRecord {
    pub fn now(level: &str, scope: &str, message: &str, data: Option<Value>) -> Self {
        Self {
            ts_ms: Utc::now().timestamp_millis(),
            level: level.to_string(),
            scope: scope.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

fn log_dir<R: Runtime>(app: &AppHandle<R>) -> Result<PathBuf, String> {
    let dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to resolve log dir: {}", e))?;
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create log dir: {}", e))?;
    Ok(dir)
}

fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

fn rotated_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("app.log.{}.jsonl", index))
}

fn rotate_if_needed(dir: &Path, max_bytes: u64) -> Result<(), String> {
    let path = log_path(dir);
    let Ok(meta) = fs::metadata(&path) else {
        return Ok(());
    };
    if meta.len() < max_bytes {
        return Ok(());
    }

    let oldest = rotated_path(dir, MAX_ROTATIONS);
    if oldest.exists() {
        fs::remove_file(&oldest)
            .map_err(|e| format!("Failed to remove old log {}: {}", oldest.display(), e))?;
    }

    for i in (1..MAX_ROTATIONS).rev() {
        let src = rotated_path(dir, i);
        let dst = rotated_path(dir, i + 1);
        if src.exists() {
            fs::rename(&src, &dst).map_err(|e| {
                format!("Failed to rotate log ({} -> {}): {}", src.display(), dst.display(), e)
            })?;
        }
    }

    let first = rotated_path(dir, 1);
    fs::rename(&path, &first).map_err(|e| {
        format!("Failed to rotate log ({} -> {}): {}", path.display(), first.display(), e)
    })?;
    Ok(())
}

fn append_in_dir(dir: &Path, record: &AppLogRecord, max_bytes: u64) -> Result<(), String> {
    let _guard = LOG_LOCK.lock();
    rotate_if_needed(dir, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(dir))
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    let line = serde_json::to_string(record)
        .map_err(|e| format!("Failed to serialize log record: {}", e))?;
    file.write_all(line.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|e| format!("Failed to write log record: {}", e))?;
    Ok(())
}

pub fn append<R: Runtime>(app: &AppHandle<R>, record: AppLogRecord) -> Result<(), String> {
    let dir = log_dir(app)?;
    append_in_dir(&dir, &record, MAX_LOG_BYTES)
}

pub fn record<R: Runtime>(
    app: &AppHandle<R>,
    level: &str,
    scope: &str,
    message: &str,
    data: Option<Value>,
) -> Result<(), String> {
    append(app, AppLogRecord::now(level, scope, message, data))
}

pub fn info<R: Runtime>(app: &AppHandle<R>, scope: &str, message: &str) -> Result<(), String> {
    record(app, "info", scope, message, None)
}

pub fn install_panic_hook<R: Runtime>(app: AppHandle<R>) {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let _ = append(
            &app,
            AppLogRecord::now("error", "panic", &format!("{} ({})", payload, location), None),
        );

        prev(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_records(path: &Path) -> Vec<AppLogRecord> {
        fs::read_to_string(path)
            .expect("read log")
            .lines()
            .map(|line| serde_json::from_str(line).expect("parse record"))
            .collect()
    }

    #[test]
    fn appends_one_json_line_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = AppLogRecord::now("info", "app", "startup", None);
        let second = AppLogRecord::now(
            "error",
            "browser",
            "provisioning_failed",
            Some(json!({ "error": "boom" })),
        );

        append_in_dir(dir.path(), &first, MAX_LOG_BYTES).expect("append");
        append_in_dir(dir.path(), &second, MAX_LOG_BYTES).expect("append");

        let records = read_records(&log_path(dir.path()));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "startup");
        assert!(records[0].data.is_none());
        assert_eq!(records[1].scope, "browser");
        assert_eq!(records[1].data, Some(json!({ "error": "boom" })));
    }

    #[test]
    fn rotates_when_log_exceeds_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = AppLogRecord::now("info", "window", "geometry_saved", None);

        append_in_dir(dir.path(), &record, 1).expect("append");
        append_in_dir(dir.path(), &record, 1).expect("append");
        append_in_dir(dir.path(), &record, 1).expect("append");

        assert_eq!(read_records(&log_path(dir.path())).len(), 1);
        assert!(rotated_path(dir.path(), 1).exists());
        assert!(rotated_path(dir.path(), 2).exists());
        assert!(!rotated_path(dir.path(), 3).exists());
    }
}
