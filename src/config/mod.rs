pub mod project_paths;
pub mod settings;
