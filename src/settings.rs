//! Editor settings: grid, sizing limits, page boundaries.
//!
//! Stored as JSON under the platform config directory. Missing keys fall
//! back to defaults so older settings files keep loading. [`SettingsWatcher`]
//! reports changes to the file so the editor can reload on its own thread.

use crate::constants::{
    DEFAULT_GRID_SIZE, DUPLICATE_OFFSET, HANDLE_SIZE, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH, NUDGE_STEP,
};
use crate::error::{SettingsError, SettingsResult};
use crate::types::Rect;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub enabled: bool,
    pub size: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridSettings {
    /// Grid size to snap with, or 0 when snapping is off.
    pub fn effective_size(&self) -> f32 {
        if self.enabled && self.size > 0.0 {
            self.size
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub grid: GridSettings,
    pub min_field_width: f32,
    pub min_field_height: f32,
    /// Handle hit box side in screen pixels
    pub handle_size: f32,
    /// Manhattan distance in screen pixels before a press turns into a drag
    pub drag_threshold: f32,
    pub nudge_step: f32,
    pub duplicate_offset: (f32, f32),
    /// Boundary for pages without an explicit entry in `page_boundaries`
    pub default_boundary: Option<Rect>,
    pub page_boundaries: BTreeMap<usize, Rect>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            min_field_width: MIN_FIELD_WIDTH,
            min_field_height: MIN_FIELD_HEIGHT,
            handle_size: HANDLE_SIZE,
            drag_threshold: 0.0,
            nudge_step: NUDGE_STEP,
            duplicate_offset: DUPLICATE_OFFSET,
            default_boundary: None,
            page_boundaries: BTreeMap::new(),
        }
    }
}

impl EditorSettings {
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: EditorSettings = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Settings from the default location, or defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded editor settings");
                settings
            }
            Err(e) => {
                warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to [`default_settings_path`], returning where the file went.
    pub fn save_default(&self) -> SettingsResult<PathBuf> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save(&path)?;
        info!(path = %path.display(), "Saved editor settings");
        Ok(path)
    }

    /// Boundary that constrains fields on `page`, if any.
    pub fn boundary_for(&self, page: usize) -> Option<Rect> {
        self.page_boundaries
            .get(&page)
            .copied()
            .or(self.default_boundary)
    }

    /// Replace values a hand-edited file could get wrong with usable ones.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_field_width > 0.0) {
            self.min_field_width = defaults.min_field_width;
        }
        if !(self.min_field_height > 0.0) {
            self.min_field_height = defaults.min_field_height;
        }
        if !(self.handle_size >= 0.0) {
            self.handle_size = defaults.handle_size;
        }
        if !(self.drag_threshold >= 0.0) {
            self.drag_threshold = 0.0;
        }
        if !(self.grid.size >= 0.0) {
            self.grid.size = defaults.grid.size;
        }
        self.page_boundaries.retain(|_, rect| usable_boundary(rect));
        if self.default_boundary.is_some_and(|rect| !usable_boundary(&rect)) {
            self.default_boundary = None;
        }
        self
    }
}

fn usable_boundary(rect: &Rect) -> bool {
    rect.is_finite() && rect.has_valid_size()
}

/// `<config dir>/formcanvas/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("formcanvas").join("settings.json"))
}

// ============================================================================
// Watcher
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

/// Watches the settings file's directory and reports events for the file.
///
/// Events arrive on notify's thread and queue in a channel; [`poll`] drains
/// them from the caller's thread.
///
/// [`poll`]: SettingsWatcher::poll
pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> SettingsResult<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            events: rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next event concerning the settings file, if one is queued.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        while let Ok(result) = self.events.try_recv() {
            match result {
                Ok(event) => {
                    if let Some(event) = classify(&event, &self.path) {
                        return Some(event);
                    }
                }
                Err(e) => return Some(SettingsEvent::Error(e.to_string())),
            }
        }
        None
    }
}

/// Map a raw notify event to a [`SettingsEvent`] if it touches the file
/// named by `path`. Access and other kinds are ignored.
pub fn classify(event: &Event, path: &Path) -> Option<SettingsEvent> {
    let ours = event
        .paths
        .iter()
        .any(|p| p.file_name() == path.file_name());
    if !ours {
        return None;
    }
    match event.kind {
        EventKind::Create(_) => Some(SettingsEvent::Created),
        EventKind::Modify(_) => Some(SettingsEvent::Modified),
        EventKind::Remove(_) => Some(SettingsEvent::Deleted),
        _ => None,
    }
}
