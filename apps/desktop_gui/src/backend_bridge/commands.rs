//! Backend commands queued from UI to backend worker.

use shared::domain::DocumentId;

#[derive(Debug)]
pub enum BackendCommand {
    FetchDocuments,
    AnalyzeDocument { id: DocumentId },
    /// Window is closing; stop applying list results.
    Unmount,
}
