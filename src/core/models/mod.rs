pub mod hook_input;
pub mod log_record;
