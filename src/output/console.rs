//! Console output utilities.

use std::path::Path;

use console::style;

use crate::media::AccountFilter;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Twitter Favorite Pics                             ║
║     Download the media of your favorited tweets       ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    filter: &AccountFilter,
    download_dir: &Path,
    without_asking: bool,
    unfavorite: bool,
) {
    let accounts = if filter.is_empty() {
        "all".to_string()
    } else {
        filter.handles().collect::<Vec<_>>().join(", ")
    };

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Accounts:       {}", accounts);
    println!("  Directory:      {}", download_dir.display());
    println!("  Ask each page:  {}", if without_asking { "no" } else { "yes" });
    println!("  Un-favorite:    {}", if unfavorite { "yes" } else { "no" });
    println!();
}
