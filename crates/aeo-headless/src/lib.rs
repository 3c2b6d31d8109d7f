pub mod browser;
pub mod pool;

pub use browser::HeadlessRenderer;
pub use pool::{BrowserPool, BrowserPoolConfig, PageCheckout};
