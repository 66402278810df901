//! Integration tests for project consistency checks
//!
//! Builds project trees on disk and verifies the issues reported by:
//! - Discovery of the descriptor files
//! - Main project, TouchGFX and launch configuration checks
//! - Layout overrides loaded from YAML

#[path = "../common/mod.rs"]
mod common;

use common::ProjectTree;
use pretty_assertions::assert_eq;
use stpn_core::{LayoutConfig, ProjectError, ProjectModel};

#[test]
fn test_consistent_project_reports_nothing() {
    let tree = ProjectTree::full("Widget");

    let model = tree.open();
    assert_eq!(model.name(), "Widget");
    assert!(model.has_gui());
    assert!(model.launch_config().exists());
    assert!(model.issues().is_empty(), "{:?}", model.issues());
}

#[test]
fn test_stale_main_project_reports_three_issues() {
    let tree = ProjectTree::cube("Widget", "OldWidget", "OldWidget");

    let model = tree.open();
    assert_eq!(
        model.issues(),
        [
            "Project name doesn't match .ioc file name.",
            "Project link name doesn't match .ioc file name.",
            "Project link locationURI doesn't match .ioc file name.",
        ]
    );
}

#[test]
fn test_without_touchgfx_only_main_project_is_checked() {
    let tree = ProjectTree::cube("Widget", "OldWidget", "Widget");

    let model = tree.open();
    assert!(!model.has_gui());
    assert!(!model.gui_part().exists());
    assert!(!model.gui_target_config().exists());
    assert_eq!(model.issues(), ["Project name doesn't match .ioc file name."]);
}

#[test]
fn test_stale_touchgfx_files_reported_in_order() {
    let tree = ProjectTree::cube("Widget", "Widget", "Widget").with_touchgfx("OldWidget");

    let model = tree.open();
    assert_eq!(
        model.issues(),
        [
            "TouchGFX project file name doesn't match .ioc file name.",
            "TouchGFX project Name doesn't match .ioc file name.",
            "TouchGFX project ProjectFile doesn't match .ioc file name.",
            "TouchGFX project .part file name doesn't match .ioc file name.",
            "TouchGFX project .part Name doesn't match .ioc file name.",
            "TouchGFX project .part ProjectFile doesn't match .ioc file name.",
            "TouchGFX target.config project_file doesn't match .ioc file name.",
        ]
    );
}

#[test]
fn test_target_config_follows_primary_reference() {
    let tree = ProjectTree::cube("Widget", "Widget", "Widget").with_touchgfx("Widget");
    tree.write(
        "TouchGFX/target.config",
        "{\n  \"target_configuration\": {\n    \"project_file\": \"../../Widget.ioc\"\n  }\n}\n",
    );

    let model = tree.open();
    assert_eq!(
        model.issues(),
        ["TouchGFX target.config project_file doesn't match .ioc file name."]
    );
}

#[test]
fn test_without_primary_each_reference_stands_alone() {
    let tree = ProjectTree::cube("Widget", "Widget", "Widget");
    tree.write("TouchGFX/Widget.touchgfx.part", &common::touchgfx_json("Widget"));
    tree.write(
        "TouchGFX/target.config",
        "{\n  \"target_configuration\": {\n    \"project_file\": \"../../Widget.ioc\"\n  }\n}\n",
    );

    let model = tree.open();
    assert!(!model.has_gui());
    assert!(model.gui_part().exists());
    assert!(model.issues().is_empty(), "{:?}", model.issues());
}

#[test]
fn test_stale_launch_configuration() {
    let tree = ProjectTree::cube("Widget", "Widget", "Widget").with_launch("OldWidget");

    let model = tree.open();
    assert_eq!(
        model.issues(),
        [
            "Launch configuration PROJECT_ATTR doesn't match .ioc file name.",
            "Launch configuration PROGRAM_NAME doesn't match .ioc file name.",
        ]
    );
}

#[test]
fn test_unparsable_touchgfx_file_has_empty_fields() {
    let tree = ProjectTree::cube("Widget", "Widget", "Widget");
    tree.write("TouchGFX/Widget.touchgfx", "{ not json");

    let model = tree.open();
    assert!(model.has_gui());
    assert_eq!(model.gui_project().name(), "");
    assert_eq!(model.issues(), ["TouchGFX project Name doesn't match .ioc file name."]);
}

#[test]
fn test_missing_files_are_reported_by_kind() {
    let result = ProjectModel::open("/nonexistent/project/root", LayoutConfig::default());
    assert!(matches!(result, Err(ProjectError::RootNotFound(_))));

    let tree = ProjectTree::new();
    tree.write("Widget.ioc", "");
    let result = ProjectModel::open(tree.root(), LayoutConfig::default());
    assert!(matches!(result, Err(ProjectError::MainProjectNotFound(_))));

    let tree = ProjectTree::new();
    tree.write("STM32CubeIDE/.project", &common::project_xml("Widget", "Widget"));
    let result = ProjectModel::open(tree.root(), LayoutConfig::default());
    assert!(matches!(result, Err(ProjectError::DeviceConfigNotFound(_))));
}

#[test]
fn test_layout_override_from_yaml() {
    let tree = ProjectTree::new();
    tree.write("Widget.ioc", "");
    tree.write("CubeIDE/.project", &common::project_xml("OldWidget", "Widget"));
    tree.write("layout.yaml", "cubeDirectory: CubeIDE\n");

    let default = ProjectModel::open(tree.root(), LayoutConfig::default());
    assert!(matches!(default, Err(ProjectError::MainProjectNotFound(_))));

    let layout = LayoutConfig::load(tree.path("layout.yaml")).unwrap();
    let model = ProjectModel::open(tree.root(), layout).unwrap();
    assert_eq!(model.issues(), ["Project name doesn't match .ioc file name."]);
}
