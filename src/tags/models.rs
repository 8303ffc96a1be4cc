/// represents a tag in the Tags table of the database.
///
/// `public_id` is fixed for the life of the tag: for canonical tags it's the well-known name (e.g. `inbox`),
/// for user-created tags it's a generated token. `name` is the display name and may change
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Tag {
    /// the id of the tag
    pub id: u32,
    /// the namespace that owns this tag
    pub namespace_id: u32,
    pub public_id: String,
    /// the display name of the tag, unique (case-insensitively) within the namespace
    pub name: String,
    /// true only for tags that a user explicitly created
    pub user_created: bool,
}

/// a single row in the TagItems table, recording that a thread carries a tag
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct TagItem {
    pub thread_id: u32,
    pub tag_id: u32,
}

/// counters computed for a tag on request. These are never stored
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TagStats {
    /// how many threads carry the tag
    pub thread_count: u64,
    /// how many threads carry both the tag and the namespace's `unread` tag
    pub unread_count: u64,
}
