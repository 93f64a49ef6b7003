use std::sync::Mutex;

use imagemap_core::{ExternalOpener, HostError, ImageSize, Navigator};
use imagemap_designer::links::{LinkContext, PointerEvent};
use imagemap_designer::model::{CoordinateSpace, Region, RegionRectangle, ShapeLayer};
use imagemap_designer::svg_renderer::{render_overlay, RenderSettings};

#[derive(Default)]
struct FakeNavigator {
    opened: Mutex<Vec<(String, String, bool)>>,
}

impl Navigator for FakeNavigator {
    fn open_link_text(
        &self,
        target: &str,
        source_path: &str,
        new_leaf: bool,
    ) -> Result<(), HostError> {
        self.opened
            .lock()
            .unwrap()
            .push((target.to_string(), source_path.to_string(), new_leaf));
        Ok(())
    }
}

#[derive(Default)]
struct FakeOpener {
    opened: Mutex<Vec<String>>,
}

impl ExternalOpener for FakeOpener {
    fn open(&self, target: &str) -> Result<(), HostError> {
        self.opened.lock().unwrap().push(target.to_string());
        Ok(())
    }
}

fn linked_scene() -> imagemap_designer::scene::SvgElement {
    let layer = ShapeLayer::with_regions(
        CoordinateSpace::Pixel,
        vec![
            Region::new(RegionRectangle::new(0.0, 0.0, 10.0, 10.0)).with_link("Rooms/Kitchen"),
            Region::new(RegionRectangle::new(20.0, 0.0, 10.0, 10.0)),
        ],
    );
    render_overlay(&layer, ImageSize::new(100, 100), &RenderSettings::default())
}

#[test]
fn test_linked_region_opens_through_navigator() {
    let scene = linked_scene();
    let nav = FakeNavigator::default();
    let opener = FakeOpener::default();
    let ctx = LinkContext::new(Some(&nav), &opener).with_source_path("notes/house.md");

    let linked = &scene.children[0];
    assert!(linked.attr("style").unwrap().ends_with("cursor: pointer;"));

    let mut event = PointerEvent::new();
    assert!(linked.dispatch_pointer_down(&mut event, &ctx).unwrap());
    assert!(event.default_prevented());
    assert!(event.propagation_stopped());
    assert_eq!(
        *nav.opened.lock().unwrap(),
        vec![(
            "Rooms/Kitchen".to_string(),
            "notes/house.md".to_string(),
            true
        )]
    );
    assert!(opener.opened.lock().unwrap().is_empty());
}

#[test]
fn test_without_navigator_link_opens_as_new_target() {
    let scene = linked_scene();
    let opener = FakeOpener::default();
    let ctx = LinkContext::new(None, &opener);

    let mut event = PointerEvent::new();
    scene.children[0]
        .dispatch_pointer_down(&mut event, &ctx)
        .unwrap();
    assert_eq!(*opener.opened.lock().unwrap(), vec!["Rooms/Kitchen".to_string()]);
}

#[test]
fn test_unlinked_region_has_no_action() {
    let scene = linked_scene();
    let opener = FakeOpener::default();
    let ctx = LinkContext::new(None, &opener);

    let plain = &scene.children[1];
    assert!(!plain.attr("style").unwrap().contains("cursor"));
    let mut event = PointerEvent::new();
    assert!(!plain.dispatch_pointer_down(&mut event, &ctx).unwrap());
    assert!(!event.default_prevented());
    assert!(opener.opened.lock().unwrap().is_empty());
}
