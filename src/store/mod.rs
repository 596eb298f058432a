pub mod bookings;
pub mod content;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;

pub const BOOKINGS_FILE: &str = "bookings.json";
pub const TESTIMONIALS_FILE: &str = "testimonials.json";
pub const SERVICES_FILE: &str = "services.json";
pub const GALLERY_FILE: &str = "gallery.json";
pub const NOTIFICATIONS_LOG: &str = "notifications.log";

/// Handle on the flat-file data directory. One JSON array document per
/// entity plus the append-only notification log. All read-modify-write
/// cycles go through the single `Mutex<Storage>` in `AppState`, which is
/// what makes the conflict check and the append atomic.
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Opens the data directory, creating it and seeding empty collection
    /// documents on first run.
    pub fn open(data_dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(data_dir)?;

        let storage = Self {
            data_dir: data_dir.to_path_buf(),
        };
        for file in [BOOKINGS_FILE, TESTIMONIALS_FILE, SERVICES_FILE, GALLERY_FILE] {
            let path = storage.path(file);
            if !path.exists() {
                fs::write(&path, "[]")?;
            }
        }

        Ok(storage)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.path(NOTIFICATIONS_LOG)
    }

    pub(crate) fn read_collection<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Vec<T>, AppError> {
        let raw = fs::read_to_string(self.path(file))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Serializes the whole collection to a temp file and renames it into
    /// place, so a concurrent reader never sees a half-written document.
    pub(crate) fn write_collection<T: Serialize>(
        &self,
        file: &str,
        items: &[T],
    ) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path(&format!("{file}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path(file))?;
        Ok(())
    }
}
