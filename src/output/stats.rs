//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::download::DownloadState;

/// Print the end-of-run summary.
pub fn print_run_stats(state: &DownloadState, download_dir: &Path) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    println!("  Pages:        {}", state.pages);
    println!(
        "  Tweets:       {} ({} matched)",
        state.posts_seen, state.posts_matched
    );
    println!("  Files:        {} downloaded", state.files_downloaded);
    println!("  Un-favorited: {}", state.tweets_unfavorited);
    if state.links_logged > 0 {
        println!("  Links logged: {}", state.links_logged);
    }
    if state.failures > 0 {
        println!("  Failed:       {}", style(state.failures).red());
    }
    if state.cooldowns > 0 {
        println!("  Cooldowns:    {}", state.cooldowns);
    }
    println!(
        "  Last tweet ID: {}",
        style(state.last_cursor.as_deref().unwrap_or("-")).green()
    );
    println!("  All media is stored in: {}", download_dir.display());
    println!("{}", style("═".repeat(50)).dim());
}
