//! studentcc - Development Peer
//!
//! Hosts the Student contract against an in-memory world state and serves
//! invocations over TCP.

use clap::Parser;
use std::sync::Arc;
use studentcc::connection::{handle_connection, ConnectionStats};
use studentcc::ledger::{MemoryWorldState, Peer};
use studentcc::Config;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_banner(config: &Config) {
    println!(
        r#"
studentcc v{} - Student Record Chaincode (development peer)
──────────────────────────────────────────────────────────────
Listening on {}
Functions: createStudent, queryStudent, updateStudent, deleteStudent

Use Ctrl+C to shutdown gracefully.
"#,
        studentcc::VERSION,
        config.bind_address()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    print_banner(&config);

    let state = Arc::new(MemoryWorldState::new());
    let peer = Arc::new(Peer::new(Arc::clone(&state)));
    info!("Contract instantiated on in-memory world state");

    let stats = Arc::new(ConnectionStats::new());

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping peer...");
    };

    tokio::select! {
        _ = accept_loop(listener, Arc::clone(&peer), Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    let world = state.stats();
    info!(
        keys = world.keys,
        committed = peer.committed(),
        rejected = peer.rejected(),
        "Peer shutdown complete"
    );
    Ok(())
}

/// Accepts connections and spawns a task per client.
async fn accept_loop(listener: TcpListener, peer: Arc<Peer>, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let peer = Arc::clone(&peer);
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    handle_connection(stream, addr, peer, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
