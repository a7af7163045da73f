//! Badge PDF renderer
//!
//! Drives a headless Chromium to print the badge HTML as a two-page
//! PDF sized to the physical card. The browser process is owned by the
//! render call: it is launched fresh, used, and dropped before the call
//! returns, on the success and error paths alike, so no browser
//! process outlives a request.
//!
//! The driver is synchronous; handlers run it under `spawn_blocking`.

use super::template::{CARD_HEIGHT_IN, CARD_WIDTH_IN};
use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use headless_chrome::protocol::cdp::Emulation;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;

/// Badge PDF renderer
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    /// Upper bound on page load and PDF export
    timeout: Duration,
}

impl BadgeRenderer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Render a self-contained HTML document to PDF bytes.
    ///
    /// The two `.page` blocks in the document become the two physical
    /// pages of the output.
    pub fn render(&self, html: &str) -> anyhow::Result<Vec<u8>> {
        let launch = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .idle_browser_timeout(self.timeout)
            .build()
            .context("Failed to build browser launch options")?;

        // Browser is dropped at the end of this scope on every exit
        // path; Drop kills the Chromium process.
        let browser = Browser::new(launch).context("Failed to launch headless browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(self.timeout);

        // Badge colors must not be inverted by an ambient dark theme
        tab.call_method(Emulation::SetEmulatedMedia {
            media: Some("print".to_string()),
            features: Some(vec![Emulation::MediaFeature {
                name: "prefers-color-scheme".to_string(),
                value: "light".to_string(),
            }]),
        })
        .context("Failed to force light rendering")?;

        let data_url = format!("data:text/html;base64,{}", BASE64.encode(html));
        tab.navigate_to(&data_url)
            .context("Failed to load badge HTML")?;
        tab.wait_until_navigated()
            .context("Badge page did not finish loading")?;

        let pdf = tab
            .print_to_pdf(Some(PrintToPdfOptions {
                landscape: Some(false),
                display_header_footer: Some(false),
                print_background: Some(true),
                paper_width: Some(CARD_WIDTH_IN),
                paper_height: Some(CARD_HEIGHT_IN),
                margin_top: Some(0.0),
                margin_bottom: Some(0.0),
                margin_left: Some(0.0),
                margin_right: Some(0.0),
                prefer_css_page_size: Some(true),
                ..Default::default()
            }))
            .context("PDF export failed")?;

        Ok(pdf)
    }
}
