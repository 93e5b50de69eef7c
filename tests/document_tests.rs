//! Integration tests for scene documents and settings files on disk.

use scene_scrub::prelude::*;
use scene_scrub::scene::ObjectDocument;

use tempfile::NamedTempFile;

const PUTNAM_JSON: &str = r#"{
    "cameras": ["Camera", "Camera.001", "Camera.002"],
    "materials": ["edge_color_1", "Mirror_01", "material", "Material", "White_Subway_Tile", "guest-surround-tile"],
    "objects": [
        { "name": "roof", "children": [
            { "name": "shingles", "slots": [{ "material": "material", "faces": 40 }] }
        ] },
        { "name": "ceiling" },
        { "name": "guest-bath-ceiling" },
        { "name": "guest-bath", "children": [
            { "name": "mirror", "slots": [{ "material": "Mirror_01", "faces": 2 }] },
            { "name": "mirror-frame", "slots": [
                { "material": "Mirror_01", "faces": 8 },
                { "material": null, "faces": 0 }
            ] },
            { "name": "surround", "slots": [
                { "material": "White_Subway_Tile", "faces": 30 },
                { "material": "guest-surround-tile", "faces": 12 }
            ] },
            { "name": "vanity", "slots": [
                { "material": "material", "faces": 6 },
                { "material": "Material", "faces": 6 }
            ] }
        ] }
    ]
}"#;

fn child<'a>(parent: &'a ObjectDocument, name: &str) -> &'a ObjectDocument {
    parent
        .children
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("missing child {name}"))
}

#[test]
fn test_clean_document_round_trip() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();
    std::fs::write(path, PUTNAM_JSON).expect("Failed to write scene");

    {
        let mut scene = MemoryScene::open(path).expect("Failed to open scene");
        assert_eq!(scene.num_objects(), 9);
        Scrubber::with_defaults(&mut scene).clean_up().expect("clean_up failed");
        scene.save(path).expect("Failed to save scene");
    }

    let doc = SceneDocument::open(path).expect("Failed to reopen scene");
    println!("{}", doc.to_json().unwrap());

    assert!(doc.written_by.as_deref().unwrap_or("").starts_with("scene-scrub"));
    assert_eq!(doc.cameras, vec!["Camera"]);
    assert_eq!(doc.materials, vec!["mirror-material", "material", "guest-surround-tile"]);

    let roof = &doc.objects[0];
    assert!(roof.hidden);
    assert!(roof.children[0].hidden);
    assert!(doc.objects[1].hidden);
    assert!(doc.objects[2].hidden);

    let bath = &doc.objects[3];
    assert!(!bath.hidden);
    let frame = child(bath, "mirror-frame");
    assert_eq!(frame.slots.len(), 1);
    assert_eq!(frame.slots[0].material.as_deref(), Some("mirror-material"));

    let surround = child(bath, "surround");
    assert_eq!(surround.slots.len(), 1);
    assert_eq!(surround.slots[0].material.as_deref(), Some("guest-surround-tile"));
    assert_eq!(surround.slots[0].faces, 30);

    let vanity = child(bath, "vanity");
    assert_eq!(vanity.slots.len(), 1);
    assert_eq!(vanity.slots[0].material.as_deref(), Some("material"));
}

#[test]
fn test_failed_batch_reports_missing_root() {
    let doc = SceneDocument {
        cameras: vec!["Camera".into()],
        objects: vec![ObjectDocument::new("roof")],
        ..Default::default()
    };
    let mut scene = MemoryScene::from_document(&doc).unwrap();
    let err = Scrubber::with_defaults(&mut scene).clean_up().unwrap_err();
    assert_eq!(err.to_string(), "Object not found: ceiling");
}

#[test]
fn test_open_rejects_bad_json() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(temp.path(), "{ not json").unwrap();
    assert!(matches!(MemoryScene::open(temp.path()), Err(Error::Json(_))));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(MemoryScene::open(&missing), Err(Error::Io(_))));
}

#[test]
fn test_settings_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = ScrubSettings::default();
    settings.default_camera = "Main".into();
    settings.hidden_roots = vec!["attic".into()];
    settings.save_to(&path).expect("Failed to save settings");

    let loaded = ScrubSettings::load_from(&path).expect("Failed to load settings");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.resolved_map().resolve("Color_K01"), "roof-shingles-material");
}

#[test]
fn test_clean_keeps_hidden_objects_outside_roots() {
    let json = r#"{
        "cameras": ["Camera"],
        "objects": [
            { "name": "roof" },
            { "name": "ceiling" },
            { "name": "guest-bath-ceiling" },
            { "name": "guest-bath", "children": [{ "name": "vanity", "hidden": true }] }
        ]
    }"#;
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(temp.path(), json).expect("Failed to write scene");

    let mut scene = MemoryScene::open(temp.path()).expect("Failed to open scene");
    Scrubber::with_defaults(&mut scene).clean_up().expect("clean_up failed");
    scene.save(temp.path()).expect("Failed to save scene");

    let doc = SceneDocument::open(temp.path()).expect("Failed to reopen scene");
    let bath = &doc.objects[3];
    assert!(!bath.hidden);
    assert!(child(bath, "vanity").hidden);
}
