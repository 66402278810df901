/**
 * model.rs
 * Cross-file consistency model of an STM32CubeIDE / TouchGFX project
 *
 * The `.ioc` file name is the source of truth. Every other descriptor
 * that mentions the project name is compared against it (check) or
 * rewritten to a new name (rename).
 */

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::descriptor::variants::{
    DeviceConfig, GuiProject, GuiProjectKind, GuiTargetConfig, LaunchConfig, MainProject,
};
use crate::errors::Result;
use crate::path::PathField;
use crate::project::files::ProjectFiles;
use crate::project::layout::LayoutConfig;
use crate::project::name::validate_project_name;

/// All descriptors of one project plus the issues and changes found
#[derive(Debug)]
pub struct ProjectModel {
    root: PathBuf,
    layout: LayoutConfig,
    device_config: DeviceConfig,
    main_project: MainProject,
    gui_project: GuiProject,
    gui_part: GuiProject,
    gui_target_config: GuiTargetConfig,
    launch_config: LaunchConfig,
    link_location: PathField,
    gui_reference: Option<PathField>,
    program_name: PathField,
    issues: Vec<String>,
    changes: Vec<String>,
}

impl ProjectModel {
    /// Discover and load the project under `root`
    ///
    /// Fails if the root doesn't exist, or the main project or `.ioc`
    /// file is missing.
    pub fn open<P: AsRef<Path>>(root: P, layout: LayoutConfig) -> Result<Self> {
        let root = root.as_ref();
        let files = ProjectFiles::discover(root, &layout)?;
        Self::from_files(root, files, layout)
    }

    /// Load the project from already discovered files
    pub fn from_files<P: AsRef<Path>>(root: P, files: ProjectFiles, layout: LayoutConfig) -> Result<Self> {
        let root = root.as_ref();
        files.require(root)?;

        let device_config = DeviceConfig::load(files.device_config.unwrap_or_default());
        let main_project = MainProject::load(
            files.main_project.unwrap_or_default(),
            &layout.device_config_extension,
        );
        let gui_project = GuiProject::load(files.gui_project.unwrap_or_default(), GuiProjectKind::Primary);
        let gui_part = GuiProject::load(files.gui_part.unwrap_or_default(), GuiProjectKind::Part);
        let gui_target_config = GuiTargetConfig::load(files.gui_target_config.unwrap_or_default());
        let launch_config = LaunchConfig::load(files.launch_config.unwrap_or_default());

        let mut model = Self {
            root: root.to_path_buf(),
            link_location: PathField::new("", &[]),
            gui_reference: None,
            program_name: PathField::new("", &[]),
            layout,
            device_config,
            main_project,
            gui_project,
            gui_part,
            gui_target_config,
            launch_config,
            issues: Vec::new(),
            changes: Vec::new(),
        };
        model.refresh_paths()?;
        model.issues = model.check_issues();

        debug!(
            "Loaded project {:?} from {} with {} issue(s)",
            model.name(),
            model.root.display(),
            model.issues.len()
        );
        Ok(model)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Project name as stored in the main project file
    pub fn name(&self) -> String {
        self.main_project.name()
    }

    pub fn device_config(&self) -> &DeviceConfig {
        &self.device_config
    }

    pub fn main_project(&self) -> &MainProject {
        &self.main_project
    }

    pub fn gui_project(&self) -> &GuiProject {
        &self.gui_project
    }

    pub fn gui_part(&self) -> &GuiProject {
        &self.gui_part
    }

    pub fn gui_target_config(&self) -> &GuiTargetConfig {
        &self.gui_target_config
    }

    pub fn launch_config(&self) -> &LaunchConfig {
        &self.launch_config
    }

    /// Whether the project has a primary TouchGFX project
    pub fn has_gui(&self) -> bool {
        self.gui_project.exists()
    }

    /// Inconsistencies found at load time, or after the last rename
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Changes applied by the last rename
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    /// Compare every existing descriptor with the `.ioc` file name
    ///
    /// One issue per violated field, in descriptor order: main project,
    /// TouchGFX project, TouchGFX part, target config, launch config.
    pub fn check_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let ioc_name = self.device_config.name();
        let ioc_file_name = self.device_config.file_name();

        if self.main_project.exists() {
            let expected_location = renamed(&self.link_location, ioc_file_name);
            if self.main_project.name() != ioc_name {
                issues.push("Project name doesn't match .ioc file name.");
            }
            if self.main_project.link_name() != ioc_file_name {
                issues.push("Project link name doesn't match .ioc file name.");
            }
            if self.main_project.link_location_uri() != expected_location {
                issues.push("Project link locationURI doesn't match .ioc file name.");
            }
        }

        let gui = &self.gui_project;
        if gui.exists() {
            if gui.file_name() != self.gui_file_name(ioc_name, GuiProjectKind::Primary) {
                issues.push("TouchGFX project file name doesn't match .ioc file name.");
            }
            if gui.name() != ioc_name {
                issues.push("TouchGFX project Name doesn't match .ioc file name.");
            }
            if gui.project_file() != self.expected_gui_reference(&gui.project_file(), ioc_file_name) {
                issues.push("TouchGFX project ProjectFile doesn't match .ioc file name.");
            }
        }

        let part = &self.gui_part;
        if part.exists() {
            if part.file_name() != self.gui_file_name(ioc_name, GuiProjectKind::Part) {
                issues.push("TouchGFX project .part file name doesn't match .ioc file name.");
            }
            if part.name() != ioc_name {
                issues.push("TouchGFX project .part Name doesn't match .ioc file name.");
            }
            if part.project_file() != self.expected_gui_reference(&part.project_file(), ioc_file_name) {
                issues.push("TouchGFX project .part ProjectFile doesn't match .ioc file name.");
            }
        }

        let target = &self.gui_target_config;
        if target.exists()
            && target.project_file() != self.expected_gui_reference(&target.project_file(), ioc_file_name)
        {
            issues.push("TouchGFX target.config project_file doesn't match .ioc file name.");
        }

        let launch = &self.launch_config;
        if launch.exists() {
            if launch.project_attr() != ioc_name {
                issues.push("Launch configuration PROJECT_ATTR doesn't match .ioc file name.");
            }
            if launch.program_name() != renamed(&self.program_name, ioc_name) {
                issues.push("Launch configuration PROGRAM_NAME doesn't match .ioc file name.");
            }
        }

        issues.into_iter().map(str::to_string).collect()
    }

    /// Rename the project to `new_name`
    ///
    /// The name is validated before anything is touched. Each step is
    /// then applied independently; a failed file rename or save is logged
    /// and left out of [`changes`](Self::changes), and the descriptor
    /// keeps its on-disk values. Returns whether anything changed. Issues
    /// are recomputed afterwards.
    pub fn rename(&mut self, new_name: &str) -> Result<bool> {
        validate_project_name(new_name)?;
        self.changes.clear();

        let new_ioc_file_name = format!("{}{}", new_name, self.layout.device_config_extension);

        if self.device_config.exists()
            && self.device_config.name() != new_name
            && self.device_config.rename(&new_ioc_file_name)
        {
            self.changes.push(".ioc file rename".to_string());
        }

        self.rename_main_project(new_name, &new_ioc_file_name);
        self.rename_gui_project(GuiProjectKind::Primary, new_name, &new_ioc_file_name);
        self.rename_gui_project(GuiProjectKind::Part, new_name, &new_ioc_file_name);
        self.rename_gui_target_config(&new_ioc_file_name);
        self.rename_launch_config(new_name);

        self.refresh_paths()?;
        self.issues = self.check_issues();

        info!("Renamed project to {} with {} change(s)", new_name, self.changes.len());
        Ok(!self.changes.is_empty())
    }

    fn rename_main_project(&mut self, new_name: &str, new_ioc_file_name: &str) {
        if !self.main_project.exists() {
            return;
        }
        let new_location = renamed(&self.link_location, new_ioc_file_name);
        let project = &mut self.main_project;
        let original = project.clone();
        let mut pending = Vec::new();

        sync(project, &mut pending, "Project name", new_name, MainProject::name, MainProject::set_name);
        sync(
            project,
            &mut pending,
            "Project link name",
            new_ioc_file_name,
            MainProject::link_name,
            MainProject::set_link_name,
        );
        sync(
            project,
            &mut pending,
            "Project link locationURI",
            &new_location,
            MainProject::link_location_uri,
            MainProject::set_link_location_uri,
        );

        let saved = project.update();
        settle(&mut self.changes, pending, saved, project.path());
        if !saved {
            *project = original;
        }
    }

    fn rename_gui_project(&mut self, kind: GuiProjectKind, new_name: &str, new_ioc_file_name: &str) {
        let (file_label, name_label, project_file_label) = match kind {
            GuiProjectKind::Primary => (
                "TouchGFX project file rename",
                "TouchGFX Application.Name",
                "TouchGFX Application.ProjectFile",
            ),
            GuiProjectKind::Part => (
                "TouchGFX project.part file rename",
                "TouchGFX project.part Application.Name",
                "TouchGFX project.part Application.ProjectFile",
            ),
        };

        let new_file_name = self.gui_file_name(new_name, kind);
        let gui = match kind {
            GuiProjectKind::Primary => &self.gui_project,
            GuiProjectKind::Part => &self.gui_part,
        };
        if !gui.exists() {
            return;
        }
        let new_project_file = self.expected_gui_reference(&gui.project_file(), new_ioc_file_name);

        let gui = match kind {
            GuiProjectKind::Primary => &mut self.gui_project,
            GuiProjectKind::Part => &mut self.gui_part,
        };

        if gui.file_name() != new_file_name && gui.rename_file(&new_file_name) {
            self.changes.push(file_label.to_string());
        }

        let original = gui.clone();
        let mut pending = Vec::new();
        sync(gui, &mut pending, name_label, new_name, GuiProject::name, GuiProject::set_name);
        sync(
            gui,
            &mut pending,
            project_file_label,
            &new_project_file,
            GuiProject::project_file,
            GuiProject::set_project_file,
        );

        let saved = gui.update();
        settle(&mut self.changes, pending, saved, gui.path());
        if !saved {
            *gui = original;
        }
    }

    fn rename_gui_target_config(&mut self, new_ioc_file_name: &str) {
        if !self.gui_target_config.exists() {
            return;
        }
        let new_project_file =
            self.expected_gui_reference(&self.gui_target_config.project_file(), new_ioc_file_name);
        let target = &mut self.gui_target_config;
        let original = target.clone();
        let mut pending = Vec::new();

        sync(
            target,
            &mut pending,
            "TouchGFX target.config target_configuration.project_file",
            &new_project_file,
            GuiTargetConfig::project_file,
            GuiTargetConfig::set_project_file,
        );

        let saved = target.update();
        settle(&mut self.changes, pending, saved, target.path());
        if !saved {
            *target = original;
        }
    }

    fn rename_launch_config(&mut self, new_name: &str) {
        if !self.launch_config.exists() {
            return;
        }
        let new_program_name = renamed(&self.program_name, new_name);
        let launch = &mut self.launch_config;
        let original = launch.clone();
        let mut pending = Vec::new();

        sync(
            launch,
            &mut pending,
            "Launch configuration PROJECT_ATTR",
            new_name,
            LaunchConfig::project_attr,
            LaunchConfig::set_project_attr,
        );
        sync(
            launch,
            &mut pending,
            "Launch configuration PROGRAM_NAME",
            &new_program_name,
            LaunchConfig::program_name,
            LaunchConfig::set_program_name,
        );

        let saved = launch.update();
        settle(&mut self.changes, pending, saved, launch.path());
        if !saved {
            *launch = original;
        }
    }

    /// Rebuild the path fields from the current descriptor values
    fn refresh_paths(&mut self) -> Result<()> {
        self.link_location = PathField::new(
            &self.main_project.link_location_uri(),
            &self.layout.link_location_regexes()?,
        );
        self.program_name = PathField::new(
            &self.launch_config.program_name(),
            &self.layout.program_name_regexes()?,
        );

        let primary = self.gui_project.project_file();
        self.gui_reference = if self.gui_project.exists() && !primary.is_empty() {
            Some(PathField::new(&primary, &[]))
        } else {
            None
        };
        Ok(())
    }

    /// Expected `.ioc` reference of a TouchGFX descriptor
    ///
    /// Based on the primary project's `ProjectFile` when there is one,
    /// otherwise on the descriptor's own value.
    fn expected_gui_reference(&self, own: &str, ioc_file_name: &str) -> String {
        match &self.gui_reference {
            Some(reference) => renamed(reference, ioc_file_name),
            None => renamed(&PathField::new(own, &[]), ioc_file_name),
        }
    }

    fn gui_file_name(&self, name: &str, kind: GuiProjectKind) -> String {
        match kind {
            GuiProjectKind::Primary => format!("{}{}", name, self.layout.gui_project_extension),
            GuiProjectKind::Part => format!("{}{}", name, self.layout.gui_part_extension()),
        }
    }
}

/// Render a copy of `field` with its target renamed
fn renamed(field: &PathField, new_base: &str) -> String {
    let mut copy = field.clone();
    copy.rename_target(new_base);
    copy.to_string()
}

/// Set one field to `expected`, queueing `label` if the value really changed
fn sync<D>(
    descriptor: &mut D,
    pending: &mut Vec<&'static str>,
    label: &'static str,
    expected: &str,
    get: fn(&D) -> String,
    set: fn(&mut D, &str),
) {
    if get(descriptor) == expected {
        return;
    }
    set(descriptor, expected);
    if get(descriptor) == expected {
        pending.push(label);
    }
}

/// Record queued field changes once their file has been saved
///
/// Callers restore the descriptor as loaded when the save failed, so
/// later checks see what is on disk.
fn settle(changes: &mut Vec<String>, pending: Vec<&'static str>, saved: bool, path: &Path) {
    if pending.is_empty() {
        return;
    }
    if saved {
        for label in pending {
            info!("{}: {}", label, path.display());
            changes.push(label.to_string());
        }
    } else {
        warn!(
            "Failed to save {}, {} change(s) not applied",
            path.display(),
            pending.len()
        );
    }
}
