//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::FetchDocuments => "fetch_documents",
        BackendCommand::AnalyzeDocument { .. } => "analyze_document",
        BackendCommand::Unmount => "unmount",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup failure); relaunch"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::DocumentId;

    use super::*;

    #[test]
    fn reports_full_queue_in_status() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::FetchDocuments, &mut status);
        assert!(status.is_empty());

        dispatch_backend_command(
            &tx,
            BackendCommand::AnalyzeDocument { id: DocumentId(1) },
            &mut status,
        );
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_backend_in_status() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::FetchDocuments, &mut status);
        assert!(status.contains("disconnected"));
    }
}
