use std::sync::Mutex;

use imagemap_core::image::ATTR_SRC;
use imagemap_core::{ImageAttributes, MemoryVault, Notifier};
use imagemap_designer::editor::{
    CanvasBox, EditorHost, EditorSession, EditorSettings, EditorTool, PointerInput,
};
use imagemap_designer::serialization::LegacyShapes;

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn drawn_session(src: &str) -> EditorSession {
    let mut s = EditorSession::open(
        ImageAttributes::new().with(ATTR_SRC, src),
        CanvasBox::new(0.0, 0.0, 100.0, 100.0),
        EditorSettings::default(),
    );
    s.select_tool(EditorTool::Rectangle);
    s.pointer_down(PointerInput::primary(10.0, 10.0));
    s.pointer_up(PointerInput::primary(30.0, 40.0));
    s
}

#[tokio::test]
async fn test_save_writes_pretty_legacy_json_next_to_image() {
    let vault = MemoryVault::with_files([("assets/plan.png", "")]);
    let notifier = RecordingNotifier::default();
    let host = EditorHost {
        links: &vault,
        vault: &vault,
        notifier: &notifier,
        active_path: "notes/house.md",
    };

    let path = drawn_session("plan.png").save(&host).await.unwrap();
    assert_eq!(path, "assets/plan.png.map.json");

    let written = vault.get(&path).unwrap();
    assert!(written.contains('\n'), "expected pretty-printed JSON");
    let shapes = LegacyShapes::from_json(&written).unwrap();
    assert_eq!(shapes.rects, vec![[10.0, 10.0, 20.0, 30.0]]);
    assert!(shapes.polygons.is_empty());
    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec!["Image map saved to assets/plan.png.map.json".to_string()]
    );
}

#[tokio::test]
async fn test_unresolved_image_saves_by_file_name() {
    let vault = MemoryVault::new();
    let notifier = RecordingNotifier::default();
    let host = EditorHost {
        links: &vault,
        vault: &vault,
        notifier: &notifier,
        active_path: "notes/house.md",
    };
    let path = drawn_session("https://example.com/pics/plan.png")
        .save(&host)
        .await
        .unwrap();
    assert_eq!(path, "plan.png.map.json");
    assert!(vault.get("plan.png.map.json").is_some());
}

#[tokio::test]
async fn test_failed_save_keeps_model_for_retry() {
    let vault = MemoryVault::with_files([("plan.png", "")]);
    vault.set_read_only(true);
    let notifier = RecordingNotifier::default();
    let host = EditorHost {
        links: &vault,
        vault: &vault,
        notifier: &notifier,
        active_path: "note.md",
    };
    let session = drawn_session("plan.png");

    let err = session.save(&host).await.unwrap_err();
    assert!(err.is_host_error());
    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec!["Failed to save coordinates".to_string()]
    );
    assert_eq!(session.shape_count(), 1);
    assert!(vault.get("plan.png.map.json").is_none());

    vault.set_read_only(false);
    let path = session.save(&host).await.unwrap();
    assert_eq!(path, "plan.png.map.json");
    assert!(vault.get(&path).is_some());
}
