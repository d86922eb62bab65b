use quay::core::Shutdown;
use tokio::signal::ctrl_c;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Turn SIGTERM and SIGINT into a stop request; repeated signals are ignored
pub fn spawn_signal_listener(shutdown: Shutdown, role: &'static str) -> JoinHandle<()> {
    tokio::spawn(listen(shutdown, role))
}

#[cfg(unix)]
async fn listen(shutdown: Shutdown, role: &'static str) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(e) => {
            error!(error = %e, "Failed to install SIGTERM handler");
            return listen_for_interrupts(shutdown, role).await;
        }
    };

    loop {
        let name = tokio::select! {
            Ok(()) = ctrl_c() => "SIGINT",
            Some(()) = term.recv() => "SIGTERM",
            else => return,
        };
        stop(&shutdown, name, role);
    }
}

#[cfg(not(unix))]
async fn listen(shutdown: Shutdown, role: &'static str) {
    listen_for_interrupts(shutdown, role).await
}

async fn listen_for_interrupts(shutdown: Shutdown, role: &'static str) {
    loop {
        if let Err(e) = ctrl_c().await {
            error!(error = %e, "Failed to listen for interrupts");
            return;
        }
        stop(&shutdown, "SIGINT", role);
    }
}

fn stop(shutdown: &Shutdown, name: &'static str, role: &str) {
    if shutdown.trigger() {
        info!(signal = name, "Received signal {}. Stopping {}.", name, role);
    } else {
        debug!(signal = name, "Already stopping");
    }
}
