//! Platform-specific paths for presets.
//!
//! - **User presets**: `~/.config/phaser/presets/` (Linux),
//!   `~/Library/Application Support/phaser/presets/` (macOS),
//!   `%APPDATA%\phaser\presets\` (Windows)
//! - **System presets**: `/usr/share/phaser/presets/` (Linux),
//!   `/Library/Application Support/phaser/presets/` (macOS)
//!
//! ```rust,no_run
//! use phaser_config::paths;
//!
//! if let Some(path) = paths::find_preset("slow_sweep") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::PresetError;

const APP_NAME: &str = "phaser";

const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./phaser/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Returns the system-wide (usually read-only) presets directory.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by path or name.
///
/// An existing file path wins; otherwise `name` (with `.toml` appended when
/// missing) is looked up in the user directory, then the system directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    [user_presets_dir(), system_presets_dir()]
        .into_iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, PresetError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| PresetError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Preset files in the user directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset files in the system directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// User presets followed by system presets. Duplicates are kept.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

/// `.toml` files directly inside `dir`, sorted. Empty if unreadable.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use phaser_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/jet.toml"));
/// assert_eq!(name, Some("jet".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_name_the_app() {
        assert!(user_presets_dir().to_string_lossy().contains("phaser"));
        assert!(system_presets_dir().ends_with("phaser/presets"));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        let found = find_preset(preset_path.to_str().unwrap());
        assert_eq!(found, Some(preset_path));
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.toml")).unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        let names: Vec<_> = presets
            .iter()
            .filter_map(|p| preset_name_from_path(p))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_preset_name_from_path() {
        assert_eq!(
            preset_name_from_path(Path::new("simple.toml")),
            Some("simple".to_string())
        );
    }
}
