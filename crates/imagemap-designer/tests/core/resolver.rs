use imagemap_core::image::{ATTR_COORDINATES, ATTR_MAP, ATTR_SRC};
use imagemap_core::ImageAttributes;
use imagemap_designer::model::{CoordinateSpace, ShapeKind};
use imagemap_designer::resolver::resolve_coordinates;
use imagemap_designer::serialization::ShapeDefinition;
use serde_json::json;

fn kinds(def: &ShapeDefinition) -> Vec<ShapeKind> {
    def.to_layer().iter().map(|r| r.kind()).collect()
}

#[test]
fn test_inline_beats_map_reference() {
    let attrs = ImageAttributes::new()
        .with(ATTR_SRC, "floor.png")
        .with(
            ATTR_COORDINATES,
            r#"[{"type":"circle","cx":5,"cy":5,"r":2}]"#,
        )
        .with(ATTR_MAP, "floor");
    let fm = json!({"imageMaps": {"floor": {"rects": [[0, 0, 10, 10]]}}});

    let def = resolve_coordinates(&attrs, Some(&fm)).unwrap();
    assert_eq!(kinds(&def), vec![ShapeKind::Circle]);
}

#[test]
fn test_malformed_inline_falls_through_to_map() {
    let attrs = ImageAttributes::new()
        .with(ATTR_COORDINATES, "[{not json")
        .with(ATTR_MAP, "floor");
    let fm = json!({"imageMaps": {"floor": {"rects": [[0, 0, 10, 10]]}}});

    let def = resolve_coordinates(&attrs, Some(&fm)).unwrap();
    assert!(def.is_legacy());
    assert_eq!(kinds(&def), vec![ShapeKind::Rectangle]);
}

#[test]
fn test_malformed_inline_without_map_is_absent() {
    let attrs = ImageAttributes::new().with(ATTR_COORDINATES, "{{{");
    assert!(resolve_coordinates(&attrs, None).is_none());
}

#[test]
fn test_missing_sources_are_absent() {
    let attrs = ImageAttributes::new().with(ATTR_MAP, "nope");
    let fm = json!({"imageMaps": {"floor": []}});
    assert!(resolve_coordinates(&attrs, Some(&fm)).is_none());
    assert!(resolve_coordinates(&attrs, None).is_none());
    assert!(resolve_coordinates(&ImageAttributes::new(), Some(&fm)).is_none());
}

#[test]
fn test_empty_attribute_counts_as_absent() {
    let attrs = ImageAttributes::new()
        .with(ATTR_COORDINATES, "")
        .with(ATTR_MAP, "floor");
    let fm = json!({"imageMaps": {"floor": {"ellipses": [[5, 5, 2, 1]]}}});
    let def = resolve_coordinates(&attrs, Some(&fm)).unwrap();
    assert_eq!(kinds(&def), vec![ShapeKind::Ellipse]);
}

#[test]
fn test_frontmatter_region_entry_with_space() {
    let attrs = ImageAttributes::new().with(ATTR_MAP, "plan");
    let fm = json!({
        "imageMaps": {
            "plan": {
                "space": "percent",
                "regions": [
                    {"type": "polygon", "points": "0,0 10,0 10,10"},
                    {"type": "rect", "x": 1, "y": 2, "width": 3, "height": 4}
                ]
            }
        }
    });
    let def = resolve_coordinates(&attrs, Some(&fm)).unwrap();
    assert_eq!(def.space(), CoordinateSpace::Percent);
    assert_eq!(kinds(&def), vec![ShapeKind::Polygon, ShapeKind::Rectangle]);
}

#[test]
fn test_legacy_normalizes_in_group_order() {
    let def = ShapeDefinition::from_json_str(
        r#"{"ellipses":[[50,50,5,5]],"rects":[[1,1,2,2]],"polygons":["0,0 4,0 4,4"]}"#,
    )
    .unwrap();
    assert_eq!(
        kinds(&def),
        vec![ShapeKind::Polygon, ShapeKind::Rectangle, ShapeKind::Ellipse]
    );
}

#[test]
fn test_invalid_regions_are_skipped() {
    let def = ShapeDefinition::from_json_str(
        r#"[
            {"type":"triangle","x":1},
            {"type":"polygon","points":"0,0 1,1"},
            {"type":"ellipse","cx":1,"cy":1,"rx":1,"ry":1}
        ]"#,
    )
    .unwrap();
    assert_eq!(kinds(&def), vec![ShapeKind::Ellipse]);
}

#[test]
fn test_scalar_definition_is_rejected() {
    assert!(ShapeDefinition::from_json_str("42").is_err());
    assert!(ShapeDefinition::from_json_str("\"rects\"").is_err());
}
