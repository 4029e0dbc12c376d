//! Background worker for server requests and health polling.

use askdb_core::{HealthStatus, HttpClient, QueryRequest, QueryResponse, QueryTransport};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

pub enum WorkerCommand {
    Ask { id: u64, request: QueryRequest },
    Quit,
}

pub enum WorkerEvent {
    Answer {
        id: u64,
        result: askdb_core::Result<QueryResponse>,
    },
    Health {
        status: HealthStatus,
    },
}

/// Spawn the worker thread. The tokio runtime is built up front so a failure
/// surfaces before the terminal is taken over.
pub fn start_worker(
    client: HttpClient,
    health_interval: Duration,
    cmd_rx: Receiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("askdb-worker".to_string())
        .spawn(move || worker_loop(runtime, client, health_interval, cmd_rx, evt_tx))
}

fn worker_loop(
    runtime: tokio::runtime::Runtime,
    client: HttpClient,
    health_interval: Duration,
    cmd_rx: Receiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) {
    let mut last_health_at: Option<Instant> = None;
    let mut pending: Option<(u64, QueryRequest)> = None;

    loop {
        // Receive at least one command, but wake periodically for health.
        match cmd_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(WorkerCommand::Ask { id, request }) => pending = Some((id, request)),
            Ok(WorkerCommand::Quit) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        // Coalesce bursts: only the latest question is answered.
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                WorkerCommand::Ask { id, request } => {
                    if let Some((dropped, _)) = pending.replace((id, request)) {
                        tracing::debug!(dropped, "superseded question dropped");
                    }
                }
                WorkerCommand::Quit => return,
            }
        }

        if let Some((id, request)) = pending.take() {
            let started = Instant::now();
            let result = runtime.block_on(client.ask(&request));
            tracing::info!(
                id,
                ok = result.is_ok(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "question answered"
            );
            if evt_tx.send(WorkerEvent::Answer { id, result }).is_err() {
                break;
            }
        }

        if last_health_at.map_or(true, |at| at.elapsed() >= health_interval) {
            let status = runtime.block_on(client.health());
            if let HealthStatus::Offline(reason) = &status {
                tracing::debug!(%reason, "health check failed");
            }
            if evt_tx.send(WorkerEvent::Health { status }).is_err() {
                break;
            }
            last_health_at = Some(Instant::now());
        }
    }
}
