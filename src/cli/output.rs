use colored::{ColoredString, Colorize};

/// A status line: `  <mark> <msg>`.
fn marked(mark: ColoredString, msg: &str) -> String {
    format!("  {mark} {msg}")
}

/// Print a success message.
pub fn success(msg: &str) {
    println!("{}", marked("✓".green(), msg));
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("{}", marked("⚠".yellow(), msg));
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("{}", marked("✗".red(), msg));
}

/// Print a section title preceded by a blank line.
pub fn header(title: &str) {
    println!("\n{}", title.bold());
}

/// Print a labelled value, aligned for status views.
pub fn field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{label}:").dimmed(), value);
}

/// Print one item of an indented list.
pub fn bullet(item: &str) {
    println!("    • {item}");
}
