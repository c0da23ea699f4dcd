//! HTTP server command
//!
//! Applies the schema, then serves the REST API until Ctrl+C / SIGTERM.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use sportbook_server::db::schema;
use sportbook_server::{run_server, Database, ServerConfig, Settings};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server].bind or 127.0.0.1)
    #[arg(long, short = 'b')]
    pub bind: Option<IpAddr>,

    /// Port to listen on (default: [server].port or 3030)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Command-line flags win over the `[server]` section.
    fn server_config(&self, settings: &Settings) -> Result<ServerConfig> {
        let bind = match self.bind {
            Some(ip) => ip,
            None => settings
                .server
                .bind
                .parse()
                .with_context(|| format!("Invalid [server] bind address '{}'", settings.server.bind))?,
        };
        let port = self.port.unwrap_or(settings.server.port);

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(bind, port),
            cors_permissive: self.cors_permissive || settings.server.cors_permissive,
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, settings: &Settings, db: Database) -> Result<()> {
    let config = args.server_config(settings)?;

    db.with_connection(|conn| Box::pin(async move { schema::apply(conn).await }))
        .await
        .context("Failed to apply database schema")?;

    tracing::info!("Starting sportbook server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(db, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(bind: Option<&str>, port: Option<u16>) -> ServeArgs {
        ServeArgs {
            bind: bind.map(|b| b.parse().unwrap()),
            port,
            cors_permissive: false,
        }
    }

    #[test]
    fn defaults_come_from_settings() {
        let config = args(None, None).server_config(&Settings::default()).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3030");
        assert!(!config.cors_permissive);
    }

    #[test]
    fn flags_override_settings() {
        let mut settings = Settings::default();
        settings.server.cors_permissive = true;

        let config = args(Some("0.0.0.0"), Some(8080))
            .server_config(&settings)
            .unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.cors_permissive);
    }

    #[test]
    fn bad_bind_in_settings_is_an_error() {
        let mut settings = Settings::default();
        settings.server.bind = "localhost:80".into();
        assert!(args(None, None).server_config(&settings).is_err());
    }
}
