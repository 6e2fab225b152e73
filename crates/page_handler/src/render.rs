//! Pages as a browser sees them after running their scripts.

use core::time::Duration;
use std::ffi::OsStr;

use anyhow::{Error, anyhow};
use headless_chrome::{Browser, LaunchOptionsBuilder};
use log::info;
use tokio::task::spawn_blocking;
use url::Url;

/// Load `url` in headless Chrome and return the serialized DOM once
/// navigation has finished.
///
/// The browser is launched for this call only. It runs on the blocking pool.
///
/// # Errors
///
/// Returns `Err` if Chrome cannot be launched, navigation fails, or the
/// blocking task panics.
pub async fn fetch_rendered(url: &Url) -> Result<String, Error> {
    let target = url.clone();
    spawn_blocking(move || render_blocking(&target))
        .await
        .map_err(|err| anyhow!("Render task for {url} failed: {err}"))?
}

fn render_blocking(url: &Url) -> Result<String, Error> {
    let launch_opts = LaunchOptionsBuilder::default()
        .headless(true)
        .window_size(Some((1280, 800)))
        .idle_browser_timeout(Duration::from_secs(60))
        .args(vec![
            OsStr::new("--allow-file-access-from-files"),
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-extensions"),
            OsStr::new("--disable-background-networking"),
            OsStr::new("--disable-sync"),
            OsStr::new("--blink-settings=imagesEnabled=false"),
        ])
        .build()
        .map_err(|err| anyhow!("Failed to build LaunchOptions for headless_chrome: {err}"))?;
    let browser = Browser::new(launch_opts)?;
    let tab = browser.new_tab()?;
    tab.navigate_to(url.as_str())?;
    tab.wait_until_navigated()?;
    let html = tab.get_content()?;
    info!("Rendered {url} ({} bytes)", html.len());
    Ok(html)
}
