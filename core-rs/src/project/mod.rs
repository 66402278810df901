/**
 * project module
 * Project discovery, layout, name validation and the consistency model
 */

pub mod files;
pub mod layout;
pub mod model;
pub mod name;

pub use files::ProjectFiles;
pub use layout::LayoutConfig;
pub use model::ProjectModel;
pub use name::{is_valid_project_name, validate_project_name};
