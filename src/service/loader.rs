use crate::db::{Novel, NovelId, Store};
use tracing::{debug, warn};

pub fn parse_novel_id(raw: &str) -> Option<NovelId> {
    raw.trim().parse().ok()
}

/// Fetch the novel a detail view is about. Bad ids, missing rows and failed reads all read as absent.
pub async fn load_novel(store: &Store, raw_id: &str) -> Option<Novel> {
    let Some(id) = parse_novel_id(raw_id) else {
        debug!(raw_id, "novel id is not numeric");
        return None;
    };
    match store.novel(id).await {
        Ok(novel) => novel,
        Err(e) => {
            warn!(novel_id = id, error = %e, "failed to load novel");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed_integers() {
        assert_eq!(parse_novel_id(" 42 "), Some(42));
        assert_eq!(parse_novel_id("abc"), None);
        assert_eq!(parse_novel_id(""), None);
    }
}
