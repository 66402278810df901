//! Concrete descriptors of an STM32CubeIDE / TouchGFX project

mod device_config;
mod gui_project;
mod gui_target_config;
mod launch_config;
mod main_project;

pub use device_config::DeviceConfig;
pub use gui_project::{GuiProject, GuiProjectKind};
pub use gui_target_config::GuiTargetConfig;
pub use launch_config::LaunchConfig;
pub use main_project::MainProject;
