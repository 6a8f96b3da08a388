//! product-image-bundler server
//!
//! Serves the upload form on the default bind address until SIGINT/SIGTERM.

use product_image_bundler::{Config, ImageBundler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,product_image_bundler=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = Config::default();
    tracing::info!(
        address = %config.server.api.bind_address,
        version = env!("CARGO_PKG_VERSION"),
        "product-image-bundler starting"
    );

    let bundler = ImageBundler::new(config)?;
    product_image_bundler::serve_with_shutdown(bundler).await?;

    Ok(())
}
