//! Render-ready description of the document list page, shared by front-ends.

use shared::domain::DocumentId;

use crate::{controller::ViewState, storage_links::StorageLinks};

pub const PAGE_TITLE: &str = "Documents";
pub const UPLOAD_LABEL: &str = "Upload document";
pub const LOADING_LABEL: &str = "Loading...";
pub const OPEN_LABEL: &str = "Open";
pub const ANALYZE_LABEL: &str = "Analyze";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCard {
    pub id: DocumentId,
    pub file_name: String,
    pub open_url: String,
    pub uploader_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: &'static str,
    pub upload_url: String,
    pub loading: bool,
    pub error_banner: Option<String>,
    pub cards: Vec<DocumentCard>,
}

impl PageView {
    pub fn build(state: &ViewState, links: &StorageLinks, upload_url: &str) -> Self {
        let cards = state
            .documents
            .iter()
            .map(|doc| DocumentCard {
                id: doc.id,
                file_name: doc.file_name.clone(),
                open_url: links.url_for(&doc.s3_key),
                uploader_label: format!("Uploader ID: {}", doc.uploader_id),
            })
            .collect();

        Self {
            title: PAGE_TITLE,
            upload_url: upload_url.to_string(),
            loading: state.loading,
            error_banner: (!state.error.is_empty()).then(|| state.error.clone()),
            cards,
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.title);
        out.push('\n');
        out.push_str(&format!("{UPLOAD_LABEL}: {}\n", self.upload_url));
        if self.loading {
            out.push_str(LOADING_LABEL);
            out.push('\n');
        }
        if let Some(error) = &self.error_banner {
            out.push_str(&format!("error: {error}\n"));
        }
        for card in &self.cards {
            out.push_str(&format!(
                "\n[{}] {}\n  {OPEN_LABEL}: {}\n  {}\n",
                card.id, card.file_name, card.open_url, card.uploader_label
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{DocumentMeta, UserId};

    use super::*;

    fn state_with_one_document() -> ViewState {
        ViewState {
            documents: vec![DocumentMeta {
                id: DocumentId(1),
                file_name: "a.pdf".into(),
                s3_key: "k1".into(),
                uploader_id: UserId(7),
            }],
            loading: false,
            error: String::new(),
        }
    }

    #[test]
    fn cards_carry_storage_link_and_uploader() {
        let links = StorageLinks::new("bucket.example.com");
        let page = PageView::build(
            &state_with_one_document(),
            &links,
            "http://localhost:3000/documents/register",
        );

        assert_eq!(page.error_banner, None);
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].open_url, "https://bucket.example.com/k1");
        assert_eq!(page.cards[0].uploader_label, "Uploader ID: 7");
    }

    #[test]
    fn error_banner_only_when_error_is_set() {
        let links = StorageLinks::new("bucket.example.com");
        let state = ViewState {
            error: "db down".into(),
            ..ViewState::default()
        };
        let page = PageView::build(&state, &links, "/documents/register");
        assert_eq!(page.error_banner.as_deref(), Some("db down"));

        let text = page.render_text();
        assert!(text.starts_with("Documents\n"));
        assert!(text.contains("error: db down"));
        assert!(!text.contains(LOADING_LABEL));
    }

    #[test]
    fn text_rendering_lists_cards_in_order() {
        let links = StorageLinks::new("bucket.example.com");
        let mut state = state_with_one_document();
        state.documents.push(DocumentMeta {
            id: DocumentId(2),
            file_name: "b.pdf".into(),
            s3_key: "k2".into(),
            uploader_id: UserId(8),
        });
        state.loading = true;

        let text = PageView::build(&state, &links, "/documents/register").render_text();
        let first = text.find("a.pdf").expect("first card");
        let second = text.find("b.pdf").expect("second card");
        assert!(first < second);
        assert!(text.contains(LOADING_LABEL));
        assert!(text.contains("Open: https://bucket.example.com/k2"));
    }
}
