pub mod atomic_file;
pub mod event_log;
pub mod rules;
pub mod session_registry;
