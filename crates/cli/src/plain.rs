//! Plain (non-dashboard) mode.
//!
//! Children inherit the parent's streams, so their output interleaves freely
//! on the shared terminal. The parent stays alive until every child has
//! exited on its own, or Ctrl-C triggers a supervised shutdown.

use anyhow::Result;
use colored::Colorize;
use tokio::sync::mpsc;
use wrun_core::supervisor::{ProcessEvent, Supervisor, SHUTDOWN_GRACE};

pub async fn execute(
    mut supervisor: Supervisor,
    mut events: mpsc::UnboundedReceiver<ProcessEvent>,
) -> Result<()> {
    let interrupted = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break true,
            maybe_event = events.recv() => match maybe_event {
                Some(ProcessEvent::Exited { name, code }) => {
                    supervisor.record_exit(&name, code);
                    println!(
                        "{} exited with code {}",
                        format!("[{}]", name).magenta(),
                        code.map_or_else(|| "signal".to_string(), |c| c.to_string())
                    );
                    if supervisor.running_count() == 0 {
                        break false;
                    }
                }
                // Output events only occur in captured mode.
                Some(ProcessEvent::Output { .. }) => {}
                None => break false,
            }
        }
    };

    if interrupted {
        supervisor.shutdown(SHUTDOWN_GRACE).await;
    }
    Ok(())
}
