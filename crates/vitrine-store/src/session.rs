//! Editing session over a content store.

use std::sync::Arc;

use vitrine_content::{EditError, SiteContent};

use crate::store::{ContentStore, StoreError};

/// One editing session: a single in-memory tree plus the store it was
/// loaded from.
///
/// Edits and saves are serialized against the same tree reference (the
/// `&mut self` borrow makes interleaving impossible), so an edit applied
/// before a save is always part of that save's snapshot. A failed save
/// leaves the tree untouched and the session usable for a retry.
///
/// Sessions do not coordinate with each other; two concurrent sessions
/// saving the same store are last-writer-wins.
pub struct EditorSession {
    store: Arc<dyn ContentStore>,
    content: SiteContent,
}

impl EditorSession {
    /// Load the current document from `store` and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the document cannot be loaded.
    pub fn load(store: Arc<dyn ContentStore>) -> Result<Self, StoreError> {
        let content = store.load()?;
        Ok(Self { store, content })
    }

    /// The session's current tree.
    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// Apply one edit operation to the session's tree.
    ///
    /// The closure receives the current tree and returns the next one;
    /// on error the session's tree is unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the [`EditError`] from the operation.
    pub fn apply<F>(&mut self, edit: F) -> Result<(), EditError>
    where
        F: FnOnce(&SiteContent) -> Result<SiteContent, EditError>,
    {
        self.content = edit(&self.content)?;
        Ok(())
    }

    /// Persist the session's tree by overwriting the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the save fails; the in-memory tree is
    /// unchanged either way, so the user can retry without re-entering
    /// their edits.
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrine_content::HeroField;

    use super::*;
    use crate::mock::MockContentStore;

    fn session_with_seed() -> (Arc<MockContentStore>, EditorSession) {
        let store = Arc::new(MockContentStore::new().with_document(SiteContent::seed()));
        let session = EditorSession::load(Arc::clone(&store) as Arc<dyn ContentStore>).unwrap();
        (store, session)
    }

    #[test]
    fn test_load_missing_document_fails() {
        let store: Arc<dyn ContentStore> = Arc::new(MockContentStore::new());

        assert!(EditorSession::load(store).is_err());
    }

    #[test]
    fn test_apply_then_save_persists_edits() {
        let (store, mut session) = session_with_seed();

        session
            .apply(|c| Ok(c.set_hero_field(HeroField::Title, "Edited")))
            .unwrap();
        session.save().unwrap();

        assert_eq!(store.document().unwrap().hero.title, "Edited");
    }

    #[test]
    fn test_failed_edit_leaves_tree_unchanged() {
        let (_store, mut session) = session_with_seed();
        let before = session.content().clone();

        let result = session.apply(|c| c.remove_project(42));

        assert!(result.is_err());
        assert_eq!(session.content(), &before);
    }

    #[test]
    fn test_failed_save_keeps_edits_for_retry() {
        let (store, mut session) = session_with_seed();

        session
            .apply(|c| Ok(c.set_hero_field(HeroField::Title, "Keep me")))
            .unwrap();
        store.fail_next_save();

        assert!(session.save().is_err());
        // The tree still carries the edit; a retry succeeds.
        assert_eq!(session.content().hero.title, "Keep me");
        session.save().unwrap();
        assert_eq!(store.document().unwrap().hero.title, "Keep me");
    }

    #[test]
    fn test_edits_between_saves_accumulate() {
        let (store, mut session) = session_with_seed();

        session.apply(|c| Ok(c.add_project())).unwrap();
        session.save().unwrap();
        session.apply(|c| Ok(c.add_project())).unwrap();
        session.save().unwrap();

        let ids: Vec<u32> = store
            .document()
            .unwrap()
            .projects
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
