use crate::db::{Novel, NovelId, NovelPatch, Store};
use crate::error::NovellaError;
use tracing::info;

/// Admin editor for a novel's metadata.
///
/// Performs no authorization itself; callers check [`crate::service::capability::Role`] first.
pub struct NovelEditWidget {
    id: NovelId,
    draft: NovelPatch,
}

impl NovelEditWidget {
    /// Seed the draft from the novel as it was when the editor was built.
    pub fn new(novel: &Novel) -> Self {
        Self {
            id: novel.id,
            draft: NovelPatch::from(novel),
        }
    }

    pub fn id(&self) -> NovelId {
        self.id
    }

    pub fn draft(&self) -> &NovelPatch {
        &self.draft
    }

    /// Write all four fields, then re-read the novel so the caller sees what the store holds.
    pub async fn update(
        &mut self,
        store: &Store,
        patch: NovelPatch,
    ) -> Result<Novel, NovellaError> {
        let patch = validate(patch)?;
        store.update_novel(self.id, &patch).await?;
        info!(novel_id = self.id, title = %patch.title, "novel metadata updated");

        let novel = store.novel(self.id).await?.ok_or(NovellaError::NotFound)?;
        self.draft = NovelPatch::from(&novel);
        Ok(novel)
    }
}

fn validate(patch: NovelPatch) -> Result<NovelPatch, NovellaError> {
    let required = [
        ("title", &patch.title),
        ("author", &patch.author),
        ("cover", &patch.cover),
        ("description", &patch.description),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(NovellaError::InvalidForm(format!("{field} is required")));
    }
    Ok(patch)
}
