//! Decides what a user may do with a tag. Everything here is derived from a tag's `user_created` flag and
//! `public_id`, both of which are fixed once the tag exists, so nothing is cached or stored.

use crate::tags::store::TagLookup;
use crate::tags::Tag;

/// tags every namespace is provisioned with. For these, the public id and the name are the same string
pub const CANONICAL_TAG_NAMES: [&str; 11] = [
    "inbox",
    "archive",
    "drafts",
    "sending",
    "sent",
    "spam",
    "starred",
    "trash",
    "unread",
    "unseen",
    "attachment",
];

/// names that can never be used for a user-created tag, whether or not a canonical tag has that name
pub const RESERVED_TAG_NAMES: [&str; 10] = [
    "all",
    "archive",
    "drafts",
    "sending",
    "sent",
    "replied",
    "file",
    "attachment",
    "unseen",
    "important",
];

/// canonical tags that a user is allowed to both add to and remove from threads
pub const USER_MUTABLE_TAGS: [&str; 6] = ["unread", "starred", "spam", "trash", "inbox", "archive"];

/// can only ever be removed by a user, never added
const UNSEEN: &str = "unseen";

/// whether a user may remove `tag` from a thread
pub fn is_removable(tag: &Tag) -> bool {
    is_addable(tag) || tag.public_id == UNSEEN
}

/// whether a user may add `tag` to a thread
pub fn is_addable(tag: &Tag) -> bool {
    tag.user_created || USER_MUTABLE_TAGS.contains(&tag.public_id.as_str())
}

/// true for tags a user can see on a thread but never toggle, such as `drafts` or `sent`
pub fn is_read_only(tag: &Tag) -> bool {
    !(is_removable(tag) || is_addable(tag))
}

/// true if `name` collides with a reserved or canonical tag name, ignoring case
pub fn is_reserved_name(name: &str) -> bool {
    let name = name.to_lowercase();
    RESERVED_TAG_NAMES.contains(&name.as_str()) || CANONICAL_TAG_NAMES.contains(&name.as_str())
}

/// checks whether `name` can be used for a new tag in the namespace.
///
/// Reserved and canonical names are rejected without consulting `lookup`. Otherwise the name is available only if
/// `lookup` has no tag with that name (case-insensitively) in the namespace.
///
/// Two concurrent registrations can both see `true` here; the unique constraint on the tag's name is what
/// ultimately rejects the second, and callers must treat that rejection the same as `false`
pub fn is_name_available<L: TagLookup>(
    name: &str,
    namespace_id: u32,
    lookup: &L,
) -> Result<bool, L::Error> {
    let name = name.to_lowercase();
    if is_reserved_name(&name) {
        return Ok(false);
    }
    Ok(lookup.find_tag_by_name(namespace_id, &name)?.is_none())
}
