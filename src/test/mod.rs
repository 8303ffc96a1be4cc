use std::fs::remove_file;
use std::path::Path;

use crate::namespaces::{repository as namespace_repository, Namespace};
use crate::repository::{initialize_db, open_connection};
use crate::tags::repository as tag_repository;
use crate::tags::{Tag, TagItem};
use crate::threads::{repository as thread_repository, Thread};

/// every test thread gets its own database file, named after the test
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

/// wipes this test's database and creates the tables fresh
pub fn init_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
}

pub fn create_namespace_db_entry(public_id: &str) -> Namespace {
    let con = open_connection().unwrap();
    let namespace = namespace_repository::create_namespace(public_id, &con).unwrap();
    con.close().unwrap();
    namespace
}

pub fn create_thread_db_entry(namespace_id: u32, subject: &str) -> Thread {
    let con = open_connection().unwrap();
    let thread = thread_repository::create_thread(namespace_id, subject, &con).unwrap();
    con.close().unwrap();
    thread
}

/// canonical tags use their name as their public id
pub fn create_canonical_tag_db_entry(namespace_id: u32, name: &str) -> Tag {
    let con = open_connection().unwrap();
    let tag = tag_repository::create_tag(namespace_id, name, name, false, &con).unwrap();
    con.close().unwrap();
    tag
}

pub fn create_user_tag_db_entry(namespace_id: u32, public_id: &str, name: &str) -> Tag {
    let con = open_connection().unwrap();
    let tag = tag_repository::create_tag(namespace_id, public_id, name, true, &con).unwrap();
    con.close().unwrap();
    tag
}

pub fn tag_thread(thread_id: u32, tag_id: u32) {
    let con = open_connection().unwrap();
    tag_repository::add_tag_to_thread(TagItem { thread_id, tag_id }, &con).unwrap();
    con.close().unwrap();
}

/// builds a tag without touching the database
pub fn tag(id: u32, public_id: &str, user_created: bool) -> Tag {
    Tag {
        id,
        namespace_id: 1,
        public_id: public_id.to_string(),
        name: public_id.to_string(),
        user_created,
    }
}
