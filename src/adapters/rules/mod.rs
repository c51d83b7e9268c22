pub mod rule_installer;
