//! Browser-automation adapter.
//!
//! For shorteners whose redirect only fires after script execution, a countdown
//! or an ad gate. Each fetch launches its own Chromium with a throwaway profile,
//! loads the page, lets it settle and reports wherever the page ended up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use log::{debug, warn};
use tokio::task::JoinHandle;

use super::{FetchOutcome, Fetcher};
use crate::error_handling::FetchError;
use crate::user_agent::UserAgentPool;

/// Browser launch and navigation settings.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Chromium binary; chromiumoxide searches the usual locations when unset.
    pub executable: Option<PathBuf>,
    /// Wait after load before reading the address.
    pub settle: Duration,
    /// Bound on page load.
    pub navigation_timeout: Duration,
    /// Bound on each CDP call after load.
    pub command_timeout: Duration,
}

/// One launched browser with its CDP handler task.
///
/// Close it with [`BrowserSession::close`]. If the session is dropped instead
/// (cancelled future, panic) the handler is aborted and chromiumoxide kills
/// the child process when the `Browser` drops.
struct BrowserSession {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
    profile_dir: PathBuf,
}

impl BrowserSession {
    async fn launch(options: &BrowserOptions, user_agent: &str) -> Result<Self, FetchError> {
        let profile_dir = std::env::temp_dir().join(format!(
            "link_bypass-{}-{:016x}",
            std::process::id(),
            rand::random::<u64>()
        ));
        Self::launch_in(options, user_agent, profile_dir).await
    }

    async fn launch_in(
        options: &BrowserOptions,
        user_agent: &str,
        profile_dir: PathBuf,
    ) -> Result<Self, FetchError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(&profile_dir)
            .request_timeout(options.command_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg(format!("--user-agent={user_agent}"));
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        let launched = match builder.build() {
            Ok(config) => Browser::launch(config).await.map_err(|e| e.to_string()),
            Err(e) => Err(e),
        };
        let (browser, mut handler) = match launched {
            Ok(launched) => launched,
            Err(e) => {
                // Chromium may have created the profile before failing
                remove_profile(&profile_dir).await;
                return Err(FetchError::BrowserLaunch(e));
            }
        };

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser: Some(browser),
            handler,
            profile_dir,
        })
    }

    async fn visit(&self, url: &str, options: &BrowserOptions) -> Result<String, FetchError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| FetchError::BrowserNavigation("session already closed".into()))?;

        let page = tokio::time::timeout(options.navigation_timeout, browser.new_page(url))
            .await
            .map_err(|_| FetchError::Timeout(options.navigation_timeout))?
            .map_err(|e| FetchError::BrowserNavigation(e.to_string()))?;

        tokio::time::sleep(options.settle).await;

        let address = tokio::time::timeout(options.command_timeout, page.url())
            .await
            .map_err(|_| FetchError::Timeout(options.command_timeout))?
            .map_err(|e| FetchError::BrowserNavigation(e.to_string()))?
            .filter(|address| !address.is_empty())
            .ok_or_else(|| FetchError::BrowserNavigation("page reported no address".into()));

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {}: {}", url, e);
        }
        web_address(&address?)
    }

    async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("Failed waiting for browser exit: {}", e);
            }
        }
        self.handler.abort();
        remove_profile(&self.profile_dir).await;
    }
}

async fn remove_profile(profile_dir: &Path) {
    match tokio::fs::remove_dir_all(profile_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!(
            "Could not remove browser profile {}: {}",
            profile_dir.display(),
            e
        ),
    }
}

/// Accepts a settled page address only when it is a web URL.
///
/// Chromium reports a failed load as `chrome-error://chromewebdata/` and can
/// also stop on `about:blank`; neither is somewhere a link leads.
pub(crate) fn web_address(address: &str) -> Result<String, FetchError> {
    match url::Url::parse(address) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(address.to_string()),
        _ => Err(FetchError::BrowserNavigation(format!(
            "page settled on {address}"
        ))),
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.browser.is_some() {
            debug!("Browser session dropped without close; killing browser");
        }
    }
}

/// Resolves a URL by letting a real browser follow it.
pub struct BrowserFetcher {
    options: BrowserOptions,
    user_agents: UserAgentPool,
}

impl BrowserFetcher {
    pub fn new(options: BrowserOptions, user_agents: UserAgentPool) -> Self {
        Self {
            options,
            user_agents,
        }
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let session = BrowserSession::launch(&self.options, self.user_agents.random()).await?;
        let visited = session.visit(url, &self.options).await;
        // Teardown on every path, including navigation failure
        session.close().await;

        let address = visited?;
        debug!("Browser settled on {} for {}", address, url);
        Ok(FetchOutcome::Navigated(address))
    }
}
