pub mod jsonl_event_log;
