//! UI layer for the desktop window: the document list page.

pub mod app;

pub use app::DocumentListApp;
