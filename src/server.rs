use crate::error::{AssetError, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub root: PathBuf,
    pub port: u16,
}

impl ServeConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Serve `config.root` as static files until the process is stopped.
pub async fn serve(config: ServeConfig) -> Result<()> {
    if !config.root.is_dir() {
        return Err(AssetError::FileNotFound(config.root));
    }

    let routes = warp::fs::dir(config.root.clone());
    let (addr, server) = warp::serve(routes).try_bind_ephemeral(config.addr())?;

    info!(root = %config.root.display(), %addr, "serving static files");
    println!("🌐 Serving {} at http://localhost:{}", config.root.display(), addr.port());

    server.await;
    Ok(())
}
