use colored::Colorize;

/// Terminal output styling - clean, minimalist design
pub struct Styles;

impl Styles {
    /// Print a section header
    pub fn header(text: &str) {
        println!();
        println!("{}", text.bright_white().bold());
        println!("{}", "─".repeat(40).dimmed());
    }

    /// Print a success message
    pub fn success(text: &str) {
        println!("{} {}", "[ok]".bright_green(), text);
    }

    /// Print an error message
    pub fn error(text: &str) {
        eprintln!("{} {}", "[error]".bright_red(), text);
    }

    /// Print a warning message
    pub fn warning(text: &str) {
        println!("{} {}", "[warn]".bright_yellow(), text);
    }

    /// Print an info message
    pub fn info(text: &str) {
        println!("{} {}", "->".dimmed(), text);
    }

    /// Print a dimmed/secondary message
    pub fn dimmed(text: &str) {
        println!("   {}", text.dimmed());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!(
            "   {:<16} {}",
            format!("{}:", key).dimmed(),
            value.bright_white()
        );
    }
}
