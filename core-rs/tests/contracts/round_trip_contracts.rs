// Round Trip Contract Tests
//
// These tests verify that the tool only edits the values it owns.
//
// **Problem**: re-serializing XML or JSON through a generic model reorders
// keys, drops comments and rewrites declarations the IDE depends on
// **Solution**: Contract tests comparing renamed files byte for byte

#[path = "../common/mod.rs"]
mod common;

use common::ProjectTree;
use pretty_assertions::assert_eq;
use stpn_core::PathField;

/// WHY: The `.project` file is owned by STM32CubeIDE
/// REASON: Comments, declaration, whitespace and unrelated links survive a rename
/// BREAKS: The IDE would show spurious diffs or lose build settings
#[test]
fn project_file_changes_only_name_fields() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget");
    let before = tree.read("STM32CubeIDE/.project");

    tree.open().rename("Widget").unwrap();

    let expected = before
        .replace("<name>OldWidget</name>", "<name>Widget</name>")
        .replace("<name>OldWidget.ioc</name>", "<name>Widget.ioc</name>")
        .replace("PROJECT_LOC/OldWidget.ioc", "PROJECT_LOC/Widget.ioc");
    assert_eq!(tree.read("STM32CubeIDE/.project"), expected);
    assert!(expected.contains("<!-- generated by STM32CubeMX -->"));
    assert!(expected.contains("PARENT-1-PROJECT_LOC/Core/Src/system_stm32f7xx.c"));
}

/// WHY: TouchGFX compares its files key by key
/// REASON: Key order and untouched values survive a rename
/// BREAKS: TouchGFX Designer would treat the project as modified
#[test]
fn touchgfx_files_keep_key_order() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget").with_touchgfx("OldWidget");

    tree.open().rename("Widget").unwrap();

    let renamed = tree.read("TouchGFX/Widget.touchgfx");
    assert_eq!(renamed, common::touchgfx_json("Widget"));
    let screens = renamed.find("\"Screens\"").unwrap();
    let name = renamed.find("\"Name\"").unwrap();
    let resolution = renamed.find("\"Resolution\"").unwrap();
    assert!(screens < name && name < resolution);
}

/// WHY: The `.ioc` file is moved, never rewritten
/// REASON: Its contents belong to STM32CubeMX
/// BREAKS: Device configuration could be corrupted by the rename
#[test]
fn ioc_contents_survive_move() {
    let tree = ProjectTree::cube("OldWidget", "OldWidget", "OldWidget");
    tree.write("OldWidget.ioc", "Mcu.Family=STM32F7\r\nProjectManager.ProjectName=OldWidget\r\n");

    tree.open().rename("Widget").unwrap();

    assert_eq!(
        tree.read("Widget.ioc"),
        "Mcu.Family=STM32F7\r\nProjectManager.ProjectName=OldWidget\r\n"
    );
}

/// WHY: Placeholders locate the project, they aren't part of its name
/// REASON: Only the target segment is renamed; special and `.`/`..` segments stay
/// BREAKS: Link locations would point outside the project
#[test]
fn only_target_segment_is_renamed() {
    let mut field = PathField::with_patterns("PARENT-1-PROJECT_LOC/./../Bar.ioc", &[".*PROJECT_LOC$"]).unwrap();
    field.rename_target("Foo");
    assert_eq!(field.to_string(), "PARENT-1-PROJECT_LOC/./../Foo.ioc");

    let mut field = PathField::with_patterns("..\\..\\Bar.ioc", &[]).unwrap();
    field.rename_target("Foo");
    assert_eq!(field.to_string(), "..\\..\\Foo.ioc");
}

/// WHY: Renaming keeps the kind of file referenced
/// REASON: A bare name inherits the old extension, a dotted name is used as is
/// BREAKS: References would lose their `.ioc` / `.elf` extension
#[test]
fn extension_is_preserved_unless_given() {
    let field = PathField::with_patterns("Bar.ioc", &[]).unwrap();

    let mut bare = field.clone();
    bare.rename_target("Foo");
    assert_eq!(bare.to_string(), "Foo.ioc");

    let mut dotted = field.clone();
    dotted.rename_target("Foo.xyz");
    assert_eq!(dotted.to_string(), "Foo.xyz");

    assert_eq!(field.to_string(), "Bar.ioc");
}
