use std::sync::Arc;
use std::time::Duration;

use imagemap_core::image::{ATTR_COORDINATES, ATTR_MAP, ATTR_OVERLAY, ATTR_SRC};
use imagemap_core::{ImageAttributes, ImageReady, ImageSize, MemoryVault};
use futures::StreamExt;
use imagemap_designer::pipeline::{ImageOutcome, OverlayProcessor, RenderedDocument, RenderedImage};
use serde_json::json;

fn processor(vault: Arc<MemoryVault>) -> OverlayProcessor {
    OverlayProcessor::new(vault.clone(), vault)
}

fn loaded(attrs: ImageAttributes) -> RenderedImage {
    RenderedImage::new(attrs, ImageReady::loaded(ImageSize::new(100, 100)))
}

#[tokio::test]
async fn test_malformed_image_does_not_stop_the_others() {
    let vault = Arc::new(MemoryVault::new());
    let doc = RenderedDocument {
        source_path: "notes/house.md".to_string(),
        frontmatter: Some(json!({"imageMaps": {"b": {"rects": [[0, 0, 5, 5]]}}})),
        images: vec![
            loaded(
                ImageAttributes::new()
                    .with(ATTR_SRC, "a.png")
                    .with(ATTR_COORDINATES, r#"[{"type":"circle","cx":1,"cy":1,"r":1}]"#),
            ),
            loaded(
                ImageAttributes::new()
                    .with(ATTR_SRC, "broken.png")
                    .with(ATTR_COORDINATES, "[{\"type\":"),
            ),
            loaded(ImageAttributes::new().with(ATTR_SRC, "b.png").with(ATTR_MAP, "b")),
        ],
    };

    let outcomes = processor(vault).process_document(&doc).await;
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_rendered());
    assert!(matches!(outcomes[1], ImageOutcome::Skipped));
    assert!(outcomes[2].is_rendered());

    let scene = outcomes[2].container().unwrap().scene().unwrap();
    assert_eq!(scene.children[0].tag, "rect");
}

#[tokio::test]
async fn test_external_overlay_and_scene_coexist() {
    let vault = Arc::new(MemoryVault::with_files([(
        "overlays/plan.svg",
        "<svg id=\"plan\"></svg>",
    )]));
    let doc = RenderedDocument {
        source_path: "notes/house.md".to_string(),
        frontmatter: None,
        images: vec![loaded(
            ImageAttributes::new()
                .with(ATTR_SRC, "plan.png")
                .with(ATTR_OVERLAY, "plan.svg")
                .with(ATTR_COORDINATES, r#"{"rects":[[1,1,2,2]]}"#),
        )],
    };

    let outcomes = processor(vault).process_document(&doc).await;
    let container = outcomes[0].container().unwrap();
    assert_eq!(container.external(), Some("<svg id=\"plan\"></svg>"));
    assert!(container.scene().is_some());
    let html = container.to_html();
    assert!(html.find("id=\"plan\"").unwrap() < html.find("viewBox").unwrap());
}

#[tokio::test]
async fn test_missing_external_overlay_keeps_local_shapes() {
    let vault = Arc::new(MemoryVault::with_files([("overlays/other.svg", "<svg/>")]));
    let processor = processor(vault);
    assert_eq!(
        processor
            .load_external_overlay("missing.svg", "notes/house.md")
            .await,
        None
    );

    let doc = RenderedDocument {
        source_path: "notes/house.md".to_string(),
        frontmatter: None,
        images: vec![loaded(
            ImageAttributes::new()
                .with(ATTR_OVERLAY, "missing.svg")
                .with(ATTR_COORDINATES, r#"{"ellipses":[[5,5,1,1]]}"#),
        )],
    };
    let outcomes = processor.process_document(&doc).await;
    let container = outcomes[0].container().unwrap();
    assert!(container.external().is_none());
    assert_eq!(container.scene().unwrap().children.len(), 1);
}

#[tokio::test]
async fn test_overlay_only_image_renders_without_scene() {
    let vault = Arc::new(MemoryVault::with_files([("a.svg", "<svg/>")]));
    let image = loaded(ImageAttributes::new().with(ATTR_OVERLAY, "a.svg"));
    let container = processor(vault)
        .process_image(&image, "note.md", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(container.external(), Some("<svg/>"));
    assert!(container.scene().is_none());
}

#[tokio::test]
async fn test_rendering_waits_for_image_ready() {
    let vault = Arc::new(MemoryVault::new());
    let processor = processor(vault);
    let (handle, ready) = ImageReady::pending();
    let doc = RenderedDocument {
        source_path: "note.md".to_string(),
        frontmatter: None,
        images: vec![RenderedImage::new(
            ImageAttributes::new().with(ATTR_COORDINATES, r#"{"rects":[[0,0,1,1]]}"#),
            ready,
        )],
    };

    let early =
        tokio::time::timeout(Duration::from_millis(20), processor.process_document(&doc)).await;
    assert!(early.is_err(), "rendered before the image loaded");

    let fire = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.fire(ImageSize::new(320, 200));
    };
    let (outcomes, ()) = tokio::join!(processor.process_document(&doc), fire);
    let scene = outcomes[0].container().unwrap().scene().unwrap();
    assert_eq!(scene.attr("viewBox"), Some("0 0 320 200"));
}

#[tokio::test]
async fn test_image_that_never_loads_fails_alone() {
    let vault = Arc::new(MemoryVault::new());
    let (handle, ready) = ImageReady::pending();
    drop(handle);
    let doc = RenderedDocument {
        source_path: "note.md".to_string(),
        frontmatter: None,
        images: vec![
            RenderedImage::new(
                ImageAttributes::new().with(ATTR_COORDINATES, r#"{"rects":[[0,0,1,1]]}"#),
                ready,
            ),
            loaded(ImageAttributes::new().with(ATTR_COORDINATES, r#"{"rects":[[0,0,1,1]]}"#)),
        ],
    };
    let outcomes = processor(vault).process_document(&doc).await;
    assert!(matches!(outcomes[0], ImageOutcome::Failed(_)));
    assert!(outcomes[1].is_rendered());
}

#[tokio::test]
async fn test_loaded_image_is_not_held_up_by_a_loading_one() {
    let vault = Arc::new(MemoryVault::new());
    let processor = processor(vault);
    let (handle, ready) = ImageReady::pending();
    let doc = RenderedDocument {
        source_path: "note.md".to_string(),
        frontmatter: None,
        images: vec![
            RenderedImage::new(
                ImageAttributes::new().with(ATTR_COORDINATES, r#"{"rects":[[0,0,1,1]]}"#),
                ready,
            ),
            loaded(ImageAttributes::new().with(ATTR_COORDINATES, r#"{"rects":[[2,2,3,3]]}"#)),
        ],
    };

    {
        let mut outcomes = processor.outcomes(&doc);
        let (index, outcome) = tokio::time::timeout(Duration::from_millis(500), outcomes.next())
            .await
            .expect("loaded image waited on the loading one")
            .unwrap();
        assert_eq!(index, 1);
        assert!(outcome.is_rendered());
    }

    let fire = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.fire(ImageSize::new(50, 50));
    };
    let (outcomes, ()) = tokio::join!(processor.process_document(&doc), fire);
    let first = outcomes[0].container().unwrap().scene().unwrap();
    assert_eq!(first.attr("viewBox"), Some("0 0 50 50"));
    assert!(outcomes[1].is_rendered());
}

#[tokio::test]
async fn test_empty_external_overlay_is_skipped() {
    let vault = Arc::new(MemoryVault::with_files([("blank.svg", "")]));
    let doc = RenderedDocument {
        source_path: "note.md".to_string(),
        frontmatter: None,
        images: vec![loaded(
            ImageAttributes::new()
                .with(ATTR_SRC, "plan.png")
                .with(ATTR_OVERLAY, "blank.svg"),
        )],
    };
    let outcomes = processor(vault).process_document(&doc).await;
    assert!(matches!(outcomes[0], ImageOutcome::Skipped));
}
