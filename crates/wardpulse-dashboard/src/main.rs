//! WardPulse dashboard - main entry point
//!
//! A Dioxus desktop application for exploring ward-level discourse
//! analytics served by the WardPulse backend.
//!
//! Usage:
//!   wardpulse-dashboard --api-url http://127.0.0.1:5000

use std::sync::OnceLock;

use clap::Parser;

use wardpulse_client::ApiClient;

mod app;
mod components;
mod theme;

/// Embedded CSS (loaded at compile time)
const THEME_CSS: &str = include_str!("../assets/themes.css");
const STYLE_CSS: &str = include_str!("../assets/style.css");

/// Shared API client, configured once at startup.
static API: OnceLock<ApiClient> = OnceLock::new();

/// Handle to the configured API client.
pub(crate) fn api() -> &'static ApiClient {
    API.get().expect("API client is set before launch")
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "wardpulse-dashboard")]
#[command(about = "Explore ward-level discourse analytics")]
struct Args {
    /// Base URL of the analytics backend
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Initial theme (dark or light)
    #[arg(short, long, default_value = "dark")]
    theme: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();

    let client = ApiClient::new(&args.api_url)?;
    tracing::info!("Using analytics backend at {}", client.base_url());
    API.set(client).ok();

    if args.theme == "light" {
        *theme::CURRENT_THEME.write() = theme::Theme::Light;
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title("WardPulse: Discourse Analytics")
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1400.0, 900.0))
                        .with_resizable(true),
                )
                .with_custom_head(format!(
                    r#"<style>{}</style><style>{}</style>"#,
                    THEME_CSS, STYLE_CSS
                )),
        )
        .launch(app::App);

    Ok(())
}
