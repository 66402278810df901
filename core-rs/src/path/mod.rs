//! Relative path values embedded in project descriptors
//!
//! Descriptors reference the `.ioc` file through relative paths such as
//! `PARENT-1-PROJECT_LOC/Widget.ioc` or `../../Widget.ioc`. [`PathField`]
//! splits such a value into segments and exposes the one segment that
//! carries the project name.

mod field;

pub use field::PathField;
