//! # st-project-name core
//!
//! Keeps the project name of an STM32CubeIDE / TouchGFX project consistent
//! across every file that mentions it, and renames projects.
//!
//! ## Core Principle
//!
//! **The `.ioc` file name IS the project name**: every other descriptor is
//! checked against it, and a rename starts by moving it.
//!
//! ## Files involved
//!
//! ```text
//! <root>/
//! ├── Widget.ioc                          device configuration (authoritative)
//! ├── STM32CubeIDE/
//! │   ├── .project                        name, .ioc link name and location
//! │   └── Widget Debug.launch             PROJECT_ATTR, PROGRAM_NAME
//! └── TouchGFX/
//!     ├── Widget.touchgfx                 Application.Name / ProjectFile
//!     ├── Widget.touchgfx.part            Application.Name / ProjectFile
//!     └── target.config                   target_configuration.project_file
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use stpn_core::{LayoutConfig, ProjectModel};
//!
//! let mut model = ProjectModel::open(".", LayoutConfig::default())?;
//! for issue in model.issues() {
//!     println!("{}", issue);
//! }
//! if model.rename("Widget")? {
//!     println!("{:?}", model.changes());
//! }
//! # Ok::<(), stpn_core::ProjectError>(())
//! ```

pub mod errors;
pub mod path;
pub mod descriptor;
pub mod project;
pub mod drivers;

pub use errors::{ProjectError, Result};
pub use path::PathField;
pub use descriptor::{JsonDescriptor, StructuredDescriptor, XmlDescriptor, XmlDocument};
pub use descriptor::variants::{DeviceConfig, GuiProject, GuiProjectKind, GuiTargetConfig, LaunchConfig, MainProject};
pub use project::{is_valid_project_name, validate_project_name, LayoutConfig, ProjectFiles, ProjectModel};
pub use drivers::{CommitOutcome, GitDriver, DEFAULT_COMMIT_MESSAGE};

/// Version of the tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
