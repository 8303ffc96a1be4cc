use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::tags::{Tag, TagItem};

/// creates a new tag in the database. This does not check if the name is available,
/// so the caller must check that themselves. The unique constraints on the table will still reject duplicates
pub fn create_tag(
    namespace_id: u32,
    public_id: &str,
    name: &str,
    user_created: bool,
    con: &Connection,
) -> Result<Tag, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/create_tag.sql"))?;
    let id = pst.insert(rusqlite::params![
        namespace_id,
        public_id,
        name,
        name.to_lowercase(),
        user_created
    ])? as u32;
    Ok(Tag {
        id,
        namespace_id,
        public_id: public_id.to_string(),
        name: name.to_string(),
        user_created,
    })
}

/// retrieves a tag from the database with the passed `id`
///
/// # Returns
/// - `Err(rusqlite::Error::QueryReturnedNoRows)` if no tag with that id exists
pub fn get_tag(id: u32, con: &Connection) -> Result<Tag, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], tag_mapper)
}

/// retrieves the tag with the passed `public_id` in the namespace. `None` means there was no match
pub fn get_tag_by_public_id(
    namespace_id: u32,
    public_id: &str,
    con: &Connection,
) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/get_by_public_id.sql"
    ))?;
    match pst.query_row(rusqlite::params![namespace_id, public_id], tag_mapper) {
        Ok(tag) => Ok(Some(tag)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// searches for a tag in the namespace whose name case-insensitively matches the passed name.
/// Names are compared by their rust lowercase form, which sqlite's `lower` can't do for non-ascii text.
///
/// if `None` is returned, that means there was no match
pub fn get_tag_by_name(
    namespace_id: u32,
    name: &str,
    con: &Connection,
) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_name.sql"))?;
    match pst.query_row(
        rusqlite::params![namespace_id, name.to_lowercase()],
        tag_mapper,
    ) {
        Ok(tag) => Ok(Some(tag)),
        // no tag found
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to get tag by name, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// retrieves every tag in the namespace, ordered by id
pub fn get_tags_for_namespace(
    namespace_id: u32,
    con: &Connection,
) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/get_tags_for_namespace.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![namespace_id], tag_mapper)?;
    rows.collect::<Result<Vec<Tag>, rusqlite::Error>>()
}

/// changes the display name of the tag. The public id is never touched
pub fn rename_tag(id: u32, name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/rename_tag.sql"))?;
    pst.execute(rusqlite::params![name, name.to_lowercase(), id])?;
    Ok(())
}

/// records that the thread carries the tag. Does nothing if the thread already carries it
pub fn add_tag_to_thread(item: TagItem, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/add_tag_to_thread.sql"
    ))?;
    pst.execute(rusqlite::params![item.thread_id, item.tag_id])?;
    Ok(())
}

pub fn remove_tag_from_thread(item: TagItem, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/remove_tag_from_thread.sql"
    ))?;
    pst.execute(rusqlite::params![item.thread_id, item.tag_id])?;
    Ok(())
}

pub fn get_tags_on_thread(thread_id: u32, con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/get_tags_for_thread.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![thread_id], tag_mapper)?;
    rows.collect::<Result<Vec<Tag>, rusqlite::Error>>()
}

/// counts the threads carrying the tag
pub fn count_threads_for_tag(tag_id: u32, con: &Connection) -> Result<u64, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/count_threads_for_tag.sql"
    ))?;
    let count: i64 = pst.query_row(rusqlite::params![tag_id], |row| row.get(0))?;
    Ok(count as u64)
}

/// counts the threads carrying both tags, by joining the TagItems table to itself on thread id
pub fn count_threads_for_tag_pair(
    tag_id: u32,
    other_tag_id: u32,
    con: &Connection,
) -> Result<u64, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/count_threads_for_tag_pair.sql"
    ))?;
    let count: i64 = pst.query_row(rusqlite::params![tag_id, other_tag_id], |row| row.get(0))?;
    Ok(count as u64)
}

/// maps a [`Tag`] from a database row
fn tag_mapper(row: &rusqlite::Row) -> Result<Tag, rusqlite::Error> {
    let id: u32 = row.get(0)?;
    let namespace_id: u32 = row.get(1)?;
    let public_id: String = row.get(2)?;
    let name: String = row.get(3)?;
    let user_created: bool = row.get(4)?;
    Ok(Tag {
        id,
        namespace_id,
        public_id,
        name,
        user_created,
    })
}
