//! Replay a scripted pointer session against the editor and print every
//! notification it raises, one per line.
//!
//! ```sh
//! RUST_LOG=formcanvas=debug formcanvas session.json
//! ```

use anyhow::{Context, Result, bail};
use formcanvas::FormEditor;
use formcanvas::geometry::{Alignment, Axis};
use formcanvas::input::Modifiers;
use formcanvas::settings::EditorSettings;
use formcanvas::types::{FieldId, FieldType, Point, Rect};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Script {
    /// Falls back to the user's settings file, then to defaults
    settings: Option<EditorSettings>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    AddField {
        field_type: FieldType,
        x: f32,
        y: f32,
        width: Option<f32>,
        height: Option<f32>,
        #[serde(default)]
        page: usize,
    },
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        control: bool,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp {
        x: f32,
        y: f32,
    },
    Cancel,
    Select {
        id: FieldId,
    },
    ClearSelection,
    RemoveField {
        id: FieldId,
    },
    DeleteSelection,
    DuplicateSelection,
    Nudge {
        dx: i32,
        dy: i32,
    },
    Align {
        alignment: Alignment,
    },
    Distribute {
        axis: Axis,
    },
    Grid {
        enabled: bool,
        size: f32,
    },
    Zoom {
        zoom: f32,
    },
    Offset {
        x: f32,
        y: f32,
    },
    PageBoundary {
        page: usize,
        boundary: Option<Rect>,
    },
    CanvasSize {
        width: f32,
        height: f32,
    },
    ActivePage {
        page: usize,
    },
}

fn run_step(editor: &mut FormEditor, step: Step) -> Result<()> {
    match step {
        Step::AddField {
            field_type,
            x,
            y,
            width,
            height,
            page,
        } => {
            let id = match (width, height) {
                (Some(width), Some(height)) => {
                    editor.add_field(field_type, x, y, width, height, page)?
                }
                (None, None) => editor.add_field_with_default_size(field_type, x, y, page)?,
                _ => bail!("add_field needs both width and height, or neither"),
            };
            println!("added {} {}", id, field_type);
        }
        Step::PointerDown {
            x,
            y,
            shift,
            control,
        } => {
            editor.on_pointer_down_with(Point::new(x, y), Modifiers { shift, control });
        }
        Step::PointerMove { x, y } => {
            editor.on_pointer_move(Point::new(x, y));
        }
        Step::PointerUp { x, y } => {
            editor.on_pointer_up(Point::new(x, y));
        }
        Step::Cancel => {
            editor.cancel_drag();
        }
        Step::Select { id } => editor.select(&id)?,
        Step::ClearSelection => editor.clear_selection(),
        Step::RemoveField { id } => {
            editor.remove_field(&id)?;
        }
        Step::DeleteSelection => {
            editor.delete_selection();
        }
        Step::DuplicateSelection => {
            for id in editor.duplicate_selection()? {
                println!("added {}", id);
            }
        }
        Step::Nudge { dx, dy } => {
            editor.nudge_selection(dx, dy);
        }
        Step::Align { alignment } => {
            editor.align_selection(alignment)?;
        }
        Step::Distribute { axis } => {
            editor.distribute_selection(axis)?;
        }
        Step::Grid { enabled, size } => editor.set_grid(enabled, size)?,
        Step::Zoom { zoom } => editor.set_zoom(zoom),
        Step::Offset { x, y } => editor.set_offset(x, y),
        Step::PageBoundary { page, boundary } => editor.set_page_boundary(page, boundary)?,
        Step::CanvasSize { width, height } => editor.set_canvas_size(width, height)?,
        Step::ActivePage { page } => editor.set_active_page(page),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formcanvas=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: formcanvas <script.json>");
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let script: Script = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse script {}", path.display()))?;

    let settings = script
        .settings
        .unwrap_or_else(EditorSettings::load_or_default);
    let mut editor = FormEditor::with_settings(settings);
    let _subscription = editor.subscribe(|event| println!("{}", event));

    info!(steps = script.steps.len(), "Replaying {}", path.display());
    for (index, step) in script.steps.into_iter().enumerate() {
        if let Err(e) = run_step(&mut editor, step) {
            warn!(step = index, "Step failed: {:#}", e);
            println!("error step {}: {}", index, e);
        }
    }

    for field in editor.list_fields(None) {
        let rect = field.rect;
        println!(
            "field {} {} page {} at {} {} {}x{}",
            field.id, field.field_type, field.page, rect.x, rect.y, rect.width, rect.height
        );
    }
    Ok(())
}
