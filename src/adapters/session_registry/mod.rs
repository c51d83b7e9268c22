pub mod file_session_registry;
