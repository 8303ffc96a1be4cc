use rusqlite::Connection;

use crate::tags::repository;
use crate::tags::Tag;

/// finds tags by name within a namespace
pub trait TagLookup {
    type Error;

    /// returns the tag in `namespace_id` whose name case-insensitively matches `name`, if there is one
    fn find_tag_by_name(&self, namespace_id: u32, name: &str) -> Result<Option<Tag>, Self::Error>;
}

/// answers count queries over the thread <-> tag association set
pub trait TagItemStore {
    type Error;

    /// the number of threads carrying the tag
    fn count_associations_for_tag(&self, tag_id: u32) -> Result<u64, Self::Error>;

    /// the number of threads carrying both tags
    fn count_associations_for_tag_pair(
        &self,
        tag_id: u32,
        other_tag_id: u32,
    ) -> Result<u64, Self::Error>;
}

impl TagLookup for Connection {
    type Error = rusqlite::Error;

    fn find_tag_by_name(&self, namespace_id: u32, name: &str) -> Result<Option<Tag>, Self::Error> {
        repository::get_tag_by_name(namespace_id, name, self)
    }
}

impl TagItemStore for Connection {
    type Error = rusqlite::Error;

    fn count_associations_for_tag(&self, tag_id: u32) -> Result<u64, Self::Error> {
        repository::count_threads_for_tag(tag_id, self)
    }

    fn count_associations_for_tag_pair(
        &self,
        tag_id: u32,
        other_tag_id: u32,
    ) -> Result<u64, Self::Error> {
        repository::count_threads_for_tag_pair(tag_id, other_tag_id, self)
    }
}
