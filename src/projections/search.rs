// Search and visibility filtering over document snapshots

use chrono::{DateTime, Utc};

use crate::directory::{Position, User};
use crate::workflow::types::{Area, Document, DocumentState};

/// Criteria for the tracking/search view. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive term matched against the order code, the primary
    /// file name, and every attachment name.
    pub term: Option<String>,
    pub state: Option<DocumentState>,
    /// Inclusive creation-date range.
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SearchFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(term) = &self.term {
            let term = term.to_lowercase();
            let in_oc = doc.oc.to_lowercase().contains(&term);
            let in_primary = doc.primary_file.name.to_lowercase().contains(&term);
            let in_attachments = doc
                .attachments
                .iter_all()
                .any(|f| f.name.to_lowercase().contains(&term));
            if !term.is_empty() && !in_oc && !in_primary && !in_attachments {
                return false;
            }
        }
        if let Some(state) = self.state {
            if doc.state != state {
                return false;
            }
        }
        if let Some(from) = self.from {
            if doc.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if doc.created_at > to {
                return false;
            }
        }
        true
    }
}

/// Documents the given user may see. Sales assistants are scoped to the
/// documents they registered themselves; everyone else sees the full set.
pub fn visible_documents<'a>(documents: &'a [Document], user: &User) -> Vec<&'a Document> {
    let scoped_to_own = user.area == Area::Sales && user.position == Some(Position::Assistant);
    documents
        .iter()
        .filter(|doc| !scoped_to_own || doc.created_by == user.id)
        .collect()
}

/// Visibility scoping plus filter criteria in one pass.
pub fn search<'a>(
    documents: &'a [Document],
    user: &User,
    filter: &SearchFilter,
) -> Vec<&'a Document> {
    visible_documents(documents, user)
        .into_iter()
        .filter(|doc| filter.matches(doc))
        .collect()
}
