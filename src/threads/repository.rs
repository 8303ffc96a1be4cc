use rusqlite::Connection;

use crate::threads::Thread;

pub fn create_thread(
    namespace_id: u32,
    subject: &str,
    con: &Connection,
) -> Result<Thread, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/threads/create_thread.sql"))?;
    let id = pst.insert(rusqlite::params![namespace_id, subject])? as u32;
    Ok(Thread {
        id,
        namespace_id,
        subject: subject.to_string(),
    })
}

/// retrieves the thread with the passed `id`
///
/// # Returns
/// - `Err(rusqlite::Error::QueryReturnedNoRows)` if no thread with that id exists
pub fn get_thread(id: u32, con: &Connection) -> Result<Thread, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/threads/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], |row| {
        Ok(Thread {
            id: row.get(0)?,
            namespace_id: row.get(1)?,
            subject: row.get(2)?,
        })
    })
}
