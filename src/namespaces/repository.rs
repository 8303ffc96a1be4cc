use rusqlite::Connection;

use crate::namespaces::Namespace;

pub fn create_namespace(public_id: &str, con: &Connection) -> Result<Namespace, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/namespaces/create_namespace.sql"
    ))?;
    let id = pst.insert(rusqlite::params![public_id])? as u32;
    Ok(Namespace {
        id,
        public_id: public_id.to_string(),
    })
}

/// retrieves the namespace with the passed `id`
///
/// # Returns
/// - `Err(rusqlite::Error::QueryReturnedNoRows)` if no namespace with that id exists
pub fn get_namespace(id: u32, con: &Connection) -> Result<Namespace, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/namespaces/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], namespace_mapper)
}

pub fn get_all_namespaces(con: &Connection) -> Result<Vec<Namespace>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/namespaces/get_all.sql"))?;
    let rows = pst.query_map([], namespace_mapper)?;
    rows.collect::<Result<Vec<Namespace>, rusqlite::Error>>()
}

/// deletes the namespace. Its tags, threads, and their tag associations are removed by cascade,
/// so the connection must have foreign keys enabled
pub fn delete_namespace(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/namespaces/delete_namespace.sql"
    ))?;
    pst.execute(rusqlite::params![id])?;
    Ok(())
}

fn namespace_mapper(row: &rusqlite::Row) -> Result<Namespace, rusqlite::Error> {
    let id: u32 = row.get(0)?;
    let public_id: String = row.get(1)?;
    Ok(Namespace { id, public_id })
}
