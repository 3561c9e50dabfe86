// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tweesplit::export::{ExportDestination, TweeExporter};
use tweesplit::model::{CanvasPoint, GroupId, NodeGeometry, Position, ScreenPoint};
use tweesplit::selection::{CanvasView, PointerButton, PointerEvent, SelectionState};
use tweesplit::source::JsonPassageFile;
use tweesplit::store::{StateFolder, WriteDurability};
use tweesplit::workspace::{LoadOutcome, PersistOutcome, Workspace};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let path = env::temp_dir().join(format!("tweesplit-{prefix}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("split_workflow")
        .join("mansion.json")
}

/// Canvas drawn straight from the workspace layout, no pan or zoom.
struct LayoutCanvas {
    nodes: Vec<NodeGeometry>,
}

impl LayoutCanvas {
    fn of(ws: &Workspace) -> Self {
        Self {
            nodes: ws
                .canvas_nodes()
                .into_iter()
                .map(|node| NodeGeometry::new(node.name, node.position))
                .collect(),
        }
    }
}

impl CanvasView for LayoutCanvas {
    fn screen_to_canvas(&self, point: ScreenPoint) -> CanvasPoint {
        Position::new(point.x, point.y)
    }

    fn nodes(&self) -> Vec<NodeGeometry> {
        self.nodes.clone()
    }
}

fn drag_select(ws: &mut Workspace, from: (f64, f64), to: (f64, f64)) {
    let view = LayoutCanvas::of(ws);
    let from = ScreenPoint::new(from.0, from.1);
    let to = ScreenPoint::new(to.0, to.1);
    ws.handle_pointer(PointerEvent::Down(PointerButton::Secondary, from), &view);
    ws.handle_pointer(PointerEvent::Move(to), &view);
    ws.handle_pointer(PointerEvent::Up(PointerButton::Secondary, to), &view);
}

fn names(ws: &Workspace, id: &GroupId) -> Vec<String> {
    ws.groups().get(id).expect("group").passage_names().to_vec()
}

#[test]
fn split_story_by_canvas_selection_and_export() {
    let tmp = TempDir::new("split-workflow");
    let story = tmp.path().join("mansion.json");
    fs::copy(fixture_path(), &story).unwrap();
    let folder = StateFolder::new(tmp.path().join("state")).with_durability(WriteDurability::Durable);

    let mut ws = Workspace::new();
    ws.restore(&folder, &JsonPassageFile);
    assert!(ws.file_path().is_none());

    assert_eq!(ws.open_file(&JsonPassageFile, &story), LoadOutcome::Applied { passages: 8 });
    assert_eq!(ws.links().len(), 6);
    // Eight unpositioned passages: three columns.
    assert_eq!(ws.layout().position("Kitchen"), Some(Position::new(0.0, 120.0)));
    assert_eq!(ws.layout().position("Gate"), Some(Position::new(220.0, 240.0)));
    assert_eq!(ws.persist(&folder), PersistOutcome::Saved);

    // Kitchen and Cellar centers sit at (75,140) and (295,140).
    drag_select(&mut ws, (0.0, 100.0), (300.0, 200.0));
    assert!(matches!(ws.selection().state(), SelectionState::MenuOpen { .. }));
    let house = ws.create_group_from_selection().expect("house group");

    drag_select(&mut ws, (400.0, 220.0), (0.0, 300.0));
    let outside = ws.create_group_from_selection().expect("outside group");

    // A tiny drag keeps the previous (empty) selection and opens nothing.
    drag_select(&mut ws, (10.0, 10.0), (12.0, 12.0));
    assert_eq!(ws.selection().state(), SelectionState::Idle);

    // Hall joins the house via the list view.
    ws.selection_mut().select_many(["Hall"]);
    assert!(ws.assign_selection_to(&house));

    ws.groups_mut().rename(&house, "house.twee");
    ws.groups_mut().rename(&outside, "outside.twee");
    assert_eq!(names(&ws, &house), vec!["Kitchen", "Cellar", "Hall"]);
    assert_eq!(names(&ws, &outside), vec!["Garden", "Gate"]);
    assert_eq!(ws.persist(&folder), PersistOutcome::Saved);

    let mut reopened = Workspace::new();
    reopened.restore(&folder, &JsonPassageFile);
    assert_eq!(reopened.file_path(), ws.file_path());
    assert_eq!(reopened.groups().snapshot(), ws.groups().snapshot());
    assert_eq!(reopened.groups_mut().create_group().as_str(), "3");

    let out = tmp.path().join("split");
    let passages = ws.passages().to_vec();
    let summary = ws
        .export(&TweeExporter::new(&passages), ExportDestination::Directory(out.clone()))
        .expect("directory export");
    assert_eq!((summary.files_written, summary.total_passages), (2, 5));
    assert_eq!(
        fs::read_to_string(out.join("house.twee")).unwrap(),
        ":: Kitchen [house]\nWarm. [[Down|Cellar]]\n\n\
         :: Cellar [house]\nCold. [[Hall<-Back]]\n\n\
         :: Hall [house start]\nA long hall. [[Kitchen]] [[Up->Attic]]"
    );

    let zip_path = tmp.path().join("split.zip");
    ws.export(&TweeExporter::new(&passages), ExportDestination::Archive(zip_path.clone()))
        .expect("zip export");
    let mut archive = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
    let mut outside_text = String::new();
    archive.by_name("outside.twee").unwrap().read_to_string(&mut outside_text).unwrap();
    assert_eq!(
        outside_text,
        ":: Garden [outside]\nRoses. [[Gate]]\n\n:: Gate [outside]\nLocked. [[Garden]] [[Nowhere]]"
    );
}

#[test]
fn auto_group_then_export_skips_story_metadata() {
    let tmp = TempDir::new("split-auto");
    let mut ws = Workspace::new();
    ws.open_file(&JsonPassageFile, &fixture_path());

    ws.auto_group();

    let filenames = ws.groups().groups().iter().map(|g| g.filename().to_owned()).collect::<Vec<_>>();
    assert_eq!(filenames, vec!["house.twee", "outside.twee"]);

    let passages = ws.passages().to_vec();
    let summary = ws
        .export(&TweeExporter::new(&passages), ExportDestination::Directory(tmp.path().to_path_buf()))
        .expect("export");
    assert_eq!((summary.files_written, summary.total_passages), (2, 6));
    let house = fs::read_to_string(tmp.path().join("house.twee")).unwrap();
    assert!(!house.contains("StoryData"));
    assert!(house.starts_with(":: Hall [house start]\n"));
}
