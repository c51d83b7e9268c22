pub mod check;
pub mod init;
pub mod log;
pub mod settings_helpers;
pub mod status;
pub mod track;
