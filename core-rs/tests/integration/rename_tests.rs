//! Integration tests for project rename
//!
//! Tests the full rename flow on disk:
//! - `.ioc` and TouchGFX file moves
//! - Field updates in every descriptor
//! - Reported changes and post-rename issues

#[path = "../common/mod.rs"]
mod common;

use common::ProjectTree;
use pretty_assertions::assert_eq;
use stpn_core::ProjectError;

#[test]
fn test_rename_stale_main_project() {
    let tree = ProjectTree::cube("Widget", "OldWidget", "OldWidget");
    let ioc_before = tree.read("Widget.ioc");

    let mut model = tree.open();
    assert_eq!(model.issues().len(), 3);

    assert!(model.rename("Widget").unwrap());
    assert_eq!(
        model.changes(),
        ["Project name", "Project link name", "Project link locationURI"]
    );
    assert!(model.issues().is_empty(), "{:?}", model.issues());

    assert_eq!(tree.read("Widget.ioc"), ioc_before);
    assert_eq!(tree.read("STM32CubeIDE/.project"), common::project_xml("Widget", "Widget"));
    assert!(tree.open().issues().is_empty());
}

#[test]
fn test_rename_whole_project() {
    let tree = ProjectTree::full("OldWidget");

    let mut model = tree.open();
    assert!(model.issues().is_empty());
    assert!(model.rename("Widget").unwrap());
    assert_eq!(
        model.changes(),
        [
            ".ioc file rename",
            "Project name",
            "Project link name",
            "Project link locationURI",
            "TouchGFX project file rename",
            "TouchGFX Application.Name",
            "TouchGFX Application.ProjectFile",
            "TouchGFX project.part file rename",
            "TouchGFX project.part Application.Name",
            "TouchGFX project.part Application.ProjectFile",
            "TouchGFX target.config target_configuration.project_file",
            "Launch configuration PROJECT_ATTR",
            "Launch configuration PROGRAM_NAME",
        ]
    );
    assert!(model.issues().is_empty(), "{:?}", model.issues());

    assert!(tree.path("Widget.ioc").is_file());
    assert!(!tree.path("OldWidget.ioc").exists());
    assert_eq!(tree.read("TouchGFX/Widget.touchgfx"), common::touchgfx_json("Widget"));
    assert_eq!(tree.read("TouchGFX/Widget.touchgfx.part"), common::touchgfx_json("Widget"));
    assert!(!tree.path("TouchGFX/OldWidget.touchgfx").exists());
    assert!(!tree.path("TouchGFX/OldWidget.touchgfx.part").exists());
    assert_eq!(tree.read("TouchGFX/target.config"), common::target_config_json("Widget"));

    // the launch file keeps its name, only its contents follow
    assert_eq!(tree.read("STM32CubeIDE/OldWidget Debug.launch"), common::launch_xml("Widget"));

    let reopened = tree.open();
    assert_eq!(reopened.name(), "Widget");
    assert!(reopened.issues().is_empty(), "{:?}", reopened.issues());
}

#[test]
fn test_rename_without_touchgfx_touches_main_files_only() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget");

    let mut model = tree.open();
    assert!(model.rename("Widget").unwrap());
    assert_eq!(
        model.changes(),
        [
            ".ioc file rename",
            "Project name",
            "Project link name",
            "Project link locationURI",
        ]
    );
}

#[test]
fn test_invalid_name_leaves_tree_untouched() {
    let tree = ProjectTree::full("OldWidget");
    let before = tree.snapshot();

    let mut model = tree.open();
    let result = model.rename("1abc");
    assert!(matches!(result, Err(ProjectError::InvalidName(ref name)) if name == "1abc"));
    assert!(model.changes().is_empty());
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn test_rename_to_current_name_is_noop() {
    let tree = ProjectTree::full("Widget");
    let before = tree.snapshot();

    let mut model = tree.open();
    assert!(!model.rename("Widget").unwrap());
    assert!(model.changes().is_empty());
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn test_occupied_file_name_is_not_overwritten() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget").with_touchgfx("OldWidget");
    tree.write("TouchGFX/Widget.touchgfx", "{}\n");

    let mut model = tree.open();
    assert!(model.gui_project().path().ends_with("OldWidget.touchgfx"));
    assert!(model.rename("Widget").unwrap());

    assert!(!model.changes().iter().any(|change| change == "TouchGFX project file rename"));
    assert!(model.changes().iter().any(|change| change == "TouchGFX Application.Name"));
    assert_eq!(
        model.issues(),
        ["TouchGFX project file name doesn't match .ioc file name."]
    );
    assert_eq!(tree.read("TouchGFX/Widget.touchgfx"), "{}\n");
}

#[test]
fn test_unparsable_descriptor_is_left_alone() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget");
    tree.write("TouchGFX/OldWidget.touchgfx", "{ not json");

    let mut model = tree.open();
    assert!(model.rename("Widget").unwrap());

    assert!(model.changes().iter().any(|change| change == "TouchGFX project file rename"));
    assert!(!model.changes().iter().any(|change| change == "TouchGFX Application.Name"));
    assert_eq!(tree.read("TouchGFX/Widget.touchgfx"), "{ not json");
}

#[test]
fn test_failed_save_is_reported_as_issue() {
    let tree = ProjectTree::full("OldWidget");

    let mut model = tree.open();
    let target = tree.path("TouchGFX/target.config");
    std::fs::remove_file(&target).unwrap();
    std::fs::create_dir(&target).unwrap();

    assert!(model.rename("Widget").unwrap());
    assert!(!model
        .changes()
        .iter()
        .any(|change| change == "TouchGFX target.config target_configuration.project_file"));
    assert!(model.changes().iter().any(|change| change == "TouchGFX Application.ProjectFile"));
    assert!(model.changes().iter().any(|change| change == "Launch configuration PROGRAM_NAME"));
    assert_eq!(model.changes().len(), 12);
    assert_eq!(
        model.issues(),
        ["TouchGFX target.config project_file doesn't match .ioc file name."]
    );
    assert_eq!(model.gui_target_config().project_file(), "../OldWidget.ioc");
}
