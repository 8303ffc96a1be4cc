use crate::tags::store::TagItemStore;
use crate::tags::Tag;

/// computes thread counts for tags from a [`TagItemStore`]. Holds no state of its own, so errors from the store
/// come back unchanged
pub struct AssociationCounter<'a, S: TagItemStore> {
    store: &'a S,
}

impl<'a, S: TagItemStore> AssociationCounter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// the number of threads carrying `tag`
    pub fn count_threads(&self, tag: &Tag) -> Result<u64, S::Error> {
        self.store.count_associations_for_tag(tag.id)
    }

    /// the number of threads carrying both `tag` and the tag with id `other_tag_id`.
    ///
    /// A tag intersected with itself is just its own thread count, so no pair query is made in that case
    pub fn intersection_count(&self, tag: &Tag, other_tag_id: u32) -> Result<u64, S::Error> {
        if other_tag_id == tag.id {
            return self.count_threads(tag);
        }
        log::debug!(
            "Counting threads shared by tag {} and tag {other_tag_id}",
            tag.id
        );
        self.store
            .count_associations_for_tag_pair(tag.id, other_tag_id)
    }
}
