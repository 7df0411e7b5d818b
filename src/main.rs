//! twitter-favorite-pics - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use favorite_media_harvester::{
    api::{authorize, Authorizer, FavoritesApi, TwitterApi},
    cli::{Args, PromptGate, TerminalPrompter},
    config::{
        default_settings_path, validate_settings, ConfigProvider, FileConfigProvider, RunOptions,
    },
    download::{harvest_favorites, DownloadState},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Authentication(_) | Error::Api(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) | Error::CursorRegression { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load settings, prompting on first run
    let settings_path = match &args.config {
        Some(path) => path.clone(),
        None => default_settings_path()?,
    };
    let provider = FileConfigProvider::new(settings_path, TerminalPrompter::new());
    let mut settings = provider.load_or_prompt()?;
    validate_settings(&settings)?;

    let mut options = RunOptions::from_settings(&settings)?;
    args.merge_into_options(&mut options)?;

    // Authorize; settings are written once, with a new token merged in
    let stored = settings.access_token_pair();
    let authorizer = Authorizer::new(settings.consumer(), options.request_timeout)?;
    let token = authorize(&authorizer, stored.clone(), provider.prompter()).await?;
    if stored.as_ref() != Some(&token) {
        settings.set_access_token(&token);
        provider.store(&settings)?;
        print_info(&format!(
            "Access token saved to {}",
            provider.path().display()
        ));
    }

    let api: Arc<dyn FavoritesApi> = Arc::new(TwitterApi::new(
        settings.consumer(),
        token,
        options.request_timeout,
    )?);

    print_config_summary(
        &options.filter,
        &options.download_root,
        options.without_asking,
        options.unfavorite,
    );

    let mut state = DownloadState::new(options.start_id.clone());
    let mut gate = PromptGate::new(provider.prompter());
    let result = harvest_favorites(api, &options, &mut gate, &mut state).await;

    print_run_stats(&state, &options.download_root);
    result?;

    if state.failures > 0 {
        print_warning(&format!(
            "{} item(s) failed; re-run with --tweetid to retry older pages",
            state.failures
        ));
    } else {
        print_success("Done");
    }

    Ok(())
}
