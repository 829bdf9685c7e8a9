//! Terminal viewer for the desktop variant.
//!
//! The producer endpoint pushes `(mode, text)` pairs onto a hand-off queue.
//! A refresh task wakes on a fixed short interval, drains the queue into a
//! [`TextDisplay`] and re-renders it when anything changed. Copy and clear
//! are local actions read from stdin.

pub mod display;
pub mod handoff;

pub use display::*;
pub use handoff::*;

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Display shared between the refresh task and the command reader.
pub type SharedDisplay = Arc<Mutex<TextDisplay>>;

/// Applies every queued write to the display, oldest first.
///
/// Returns the number of writes applied.
pub fn drain_handoff(rx: &mut HandoffReceiver, display: &mut TextDisplay) -> usize {
    let mut applied = 0;
    while let Ok((mode, text)) = rx.try_recv() {
        display.apply(mode, &text);
        applied += 1;
    }
    applied
}

/// Spawns the refresh task. It stops when `shutdown` flips to `true`.
pub fn spawn_viewer(
    mut rx: HandoffReceiver,
    display: SharedDisplay,
    refresh_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            interval_ms = refresh_interval.as_millis(),
            "Viewer refresh task started"
        );
        let mut ticker = tokio::time::interval(refresh_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }

            let mut display = display.lock().unwrap_or_else(PoisonError::into_inner);
            let applied = drain_handoff(&mut rx, &mut display);
            if applied > 0 {
                tracing::debug!(applied, "Applied queued updates");
            }
            if display.is_dirty() {
                if let Err(e) = display.render(&mut std::io::stdout().lock()) {
                    tracing::warn!(?e, "Failed to render display");
                }
            }
        }

        tracing::info!("Viewer refresh task stopped");
    })
}

/// Spawns a task reading `copy` / `clear` commands from stdin.
pub fn spawn_command_reader(
    display: SharedDisplay,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line,
                _ = shutdown.changed() => break,
            };

            let command = match line {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(?e, "Failed to read viewer command");
                    break;
                }
            };

            let mut display = display.lock().unwrap_or_else(PoisonError::into_inner);
            match command.trim() {
                "copy" => {
                    let mut stdout = std::io::stdout().lock();
                    let sequence = display.copy_sequence();
                    if let Err(e) = stdout
                        .write_all(sequence.as_bytes())
                        .and_then(|_| stdout.flush())
                    {
                        tracing::warn!(?e, "Failed to write clipboard sequence");
                    }
                }
                "clear" => display.clear(),
                "" => {}
                other => {
                    tracing::debug!(command = other, "Unknown viewer command");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WriteMode;

    #[test]
    fn test_drain_applies_in_order() {
        let (tx, mut rx) = handoff_queue();
        tx.send((WriteMode::Set, "ab".to_string())).unwrap();
        tx.send((WriteMode::Append, "cd".to_string())).unwrap();
        tx.send((WriteMode::Append, "ef".to_string())).unwrap();

        let mut display = TextDisplay::new();
        assert_eq!(drain_handoff(&mut rx, &mut display), 3);
        assert_eq!(display.text(), "abcdef");
        assert_eq!(drain_handoff(&mut rx, &mut display), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_viewer_task_drains_on_tick() {
        let (tx, rx) = handoff_queue();
        let display: SharedDisplay = Arc::new(Mutex::new(TextDisplay::new()));
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = spawn_viewer(
            rx,
            Arc::clone(&display),
            Duration::from_millis(100),
            stop_rx,
        );

        tx.send((WriteMode::Set, "hello".to_string())).unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(display.lock().unwrap().text(), "hello");

        stop_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
