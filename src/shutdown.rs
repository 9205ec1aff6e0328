use tokio::signal;

/// Resolves on the first SIGINT or SIGTERM and returns its name.
#[cfg(unix)]
pub async fn terminated() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    let mut term = unix_signal(SignalKind::terminate())?;
    tokio::select! {
        res = signal::ctrl_c() => res.map(|_| "interrupt"),
        _ = term.recv() => Ok("terminated"),
    }
}

#[cfg(not(unix))]
pub async fn terminated() -> std::io::Result<&'static str> {
    signal::ctrl_c().await.map(|_| "interrupt")
}
