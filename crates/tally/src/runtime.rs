//! The sampling run: load, sample until asked to stop, flush.

use std::{
    future::{Future, pending},
    path::{Path, PathBuf},
    sync::Arc,
};

use focus_probe::FocusProbe;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    Result,
    sampler::{Sampler, SamplerConfig},
    store::ActivityStore,
};

/// What a completed run left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// File the store was flushed to.
    pub path: PathBuf,
    /// Distinct labels in the flushed store.
    pub labels: usize,
    /// Sum of all counts in the flushed store.
    pub total: u64,
}

/// Sample focus into the store at `path` until `shutdown` completes.
///
/// The store is loaded before sampling starts; a corrupt file aborts the run
/// without touching it. When `shutdown` resolves the sampler is cancelled, its
/// current tick is allowed to finish, and the store it hands back is flushed
/// exactly once.
pub async fn run_until<F>(
    path: &Path,
    probe: Arc<dyn FocusProbe>,
    config: SamplerConfig,
    shutdown: F,
) -> Result<RunSummary>
where
    F: Future<Output = ()>,
{
    let store = ActivityStore::load(path)?;
    info!(
        path = %path.display(),
        labels = store.len(),
        total = store.total(),
        "activity store loaded"
    );

    let cancel = CancellationToken::new();
    let sampler = Sampler::new(probe, store, config).spawn(cancel.clone());

    shutdown.await;
    info!("saving data...");
    cancel.cancel();
    let store = sampler.await?;
    store.flush(path)?;

    let summary = RunSummary {
        path: path.to_path_buf(),
        labels: store.len(),
        total: store.total(),
    };
    info!(
        path = %summary.path.display(),
        labels = summary.labels,
        total = summary.total,
        "activity store saved"
    );
    Ok(summary)
}

/// Resolve when the process receives an interrupt or termination request.
///
/// If a signal handler cannot be installed that source is ignored with a
/// warning; the other keeps listening.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for interrupt");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for termination");
                pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = interrupt => info!(signal = "interrupt", "shutdown requested"),
        () = terminate => info!(signal = "terminate", "shutdown requested"),
    }
}
