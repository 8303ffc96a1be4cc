use std::backtrace::Backtrace;
use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::model::error::tag_errors::{
    CreateTagError, GetTagError, TagCountError, TagRelationError, UpdateTagError,
};
use crate::namespaces::repository as namespace_repository;
use crate::public_id::{PublicIdGenerator, UuidPublicIds};
use crate::repository::{close_connection, connect, is_unique_violation};
use crate::tags::counter::AssociationCounter;
use crate::tags::repository as tag_repository;
use crate::tags::{policy, Tag, TagItem, TagStats};
use crate::threads::repository as thread_repository;

/// creates a new user tag in the namespace with a freshly generated public id.
///
/// Fails with [`CreateTagError::NameUnavailable`] if the name is reserved, canonical, or already taken,
/// including when another registration of the same name wins a race with this one
pub fn create_tag(namespace_id: u32, name: &str) -> Result<Tag, CreateTagError> {
    create_tag_with_ids(namespace_id, name, &UuidPublicIds)
}

pub(crate) fn create_tag_with_ids<G: PublicIdGenerator>(
    namespace_id: u32,
    name: &str,
    ids: &G,
) -> Result<Tag, CreateTagError> {
    if name.trim().is_empty() {
        return Err(CreateTagError::InvalidName);
    }
    let con = connect().map_err(|_| CreateTagError::DbError)?;
    match namespace_repository::get_namespace(namespace_id, &con) {
        Ok(_) => {}
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Cannot create tag {name}, because namespace {namespace_id} does not exist!");
            close_connection(con);
            return Err(CreateTagError::NamespaceNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve namespace with id {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            close_connection(con);
            return Err(CreateTagError::DbError);
        }
    };
    match policy::is_name_available(name, namespace_id, &con) {
        Ok(true) => {}
        Ok(false) => {
            log::info!("Tag name {name} is not available in namespace {namespace_id}");
            close_connection(con);
            return Err(CreateTagError::NameUnavailable);
        }
        Err(e) => {
            log::error!(
                "Failed to check if any tags with the name {name} already exist! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            close_connection(con);
            return Err(CreateTagError::DbError);
        }
    };
    let public_id = ids.generate_public_id();
    let res = tag_repository::create_tag(namespace_id, &public_id, name, true, &con);
    close_connection(con);
    match res {
        Ok(tag) => Ok(tag),
        // someone else registered the name between our check and our insert
        Err(e) if is_unique_violation(&e) => {
            log::info!("Tag name {name} was taken in namespace {namespace_id} before it could be created");
            Err(CreateTagError::NameUnavailable)
        }
        Err(e) => {
            log::error!(
                "Failed to create a new tag with the name {name}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateTagError::DbError)
        }
    }
}

/// will return the tag with the passed public id in the namespace
pub fn get_tag(namespace_id: u32, public_id: &str) -> Result<Tag, GetTagError> {
    let con = connect().map_err(|_| GetTagError::DbError)?;
    let res = tag_repository::get_tag_by_public_id(namespace_id, public_id, &con);
    close_connection(con);
    match res {
        Ok(Some(tag)) => Ok(tag),
        Ok(None) => Err(GetTagError::TagNotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve tag {public_id} in namespace {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetTagError::DbError)
        }
    }
}

/// returns every tag in the namespace, keyed by public id. An unknown namespace has no tags
pub fn get_tags_for_namespace(namespace_id: u32) -> Result<BTreeMap<String, Tag>, GetTagError> {
    let con = connect().map_err(|_| GetTagError::DbError)?;
    let res = tag_repository::get_tags_for_namespace(namespace_id, &con);
    close_connection(con);
    match res {
        Ok(tags) => Ok(tags
            .into_iter()
            .map(|tag| (tag.public_id.clone(), tag))
            .collect()),
        Err(e) => {
            log::error!(
                "Could not retrieve tags for namespace {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetTagError::DbError)
        }
    }
}

/// changes the display name of a user-created tag. Its public id stays the same.
///
/// Changing only the case of a tag's own name is allowed
pub fn rename_tag(namespace_id: u32, public_id: &str, new_name: &str) -> Result<Tag, UpdateTagError> {
    if new_name.trim().is_empty() {
        return Err(UpdateTagError::InvalidName);
    }
    let con = connect().map_err(|_| UpdateTagError::DbError)?;
    let tag = match tag_repository::get_tag_by_public_id(namespace_id, public_id, &con) {
        Ok(Some(tag)) => tag,
        Ok(None) => {
            log::error!("Could not rename tag {public_id}, because it does not exist in namespace {namespace_id}!");
            close_connection(con);
            return Err(UpdateTagError::TagNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve tag {public_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            close_connection(con);
            return Err(UpdateTagError::DbError);
        }
    };
    if !tag.user_created {
        log::error!("Could not rename tag {public_id}, because it is not user created");
        close_connection(con);
        return Err(UpdateTagError::NotUserCreated);
    }
    // a case-only change would otherwise collide with the tag itself
    if tag.name.to_lowercase() != new_name.to_lowercase() {
        match policy::is_name_available(new_name, namespace_id, &con) {
            Ok(true) => {}
            Ok(false) => {
                log::info!("Could not rename tag {public_id} to {new_name}, because that name is not available");
                close_connection(con);
                return Err(UpdateTagError::NameUnavailable);
            }
            Err(e) => {
                log::error!(
                    "Could not search tags by name with value {new_name}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                close_connection(con);
                return Err(UpdateTagError::DbError);
            }
        };
    }
    let res = tag_repository::rename_tag(tag.id, new_name, &con)
        .and_then(|_| tag_repository::get_tag(tag.id, &con));
    close_connection(con);
    match res {
        Ok(renamed) => Ok(renamed),
        Err(e) if is_unique_violation(&e) => Err(UpdateTagError::NameUnavailable),
        Err(e) => {
            log::error!(
                "Could not rename tag {public_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(UpdateTagError::DbError)
        }
    }
}

/// looks up the thread and the tag with `public_id` in the thread's namespace
fn find_thread_tag(
    thread_id: u32,
    public_id: &str,
    con: &Connection,
) -> Result<Tag, TagRelationError> {
    let thread = match thread_repository::get_thread(thread_id, con) {
        Ok(thread) => thread,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("No thread with id {thread_id} exists!");
            return Err(TagRelationError::ThreadNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve thread with id {thread_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(TagRelationError::DbError);
        }
    };
    match tag_repository::get_tag_by_public_id(thread.namespace_id, public_id, con) {
        Ok(Some(tag)) => Ok(tag),
        Ok(None) => {
            log::error!(
                "No tag {public_id} exists in namespace {}!",
                thread.namespace_id
            );
            Err(TagRelationError::TagNotFound)
        }
        Err(e) => {
            log::error!(
                "Could not retrieve tag {public_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(TagRelationError::DbError)
        }
    }
}

/// applies the tag to the thread if users are allowed to add it. Adding a tag the thread already carries is a no-op
pub fn add_tag_to_thread(thread_id: u32, public_id: &str) -> Result<(), TagRelationError> {
    let con = connect().map_err(|_| TagRelationError::DbError)?;
    let res = find_thread_tag(thread_id, public_id, &con).and_then(|tag| {
        if !policy::is_addable(&tag) {
            log::warn!("Refusing to add tag {public_id} to thread {thread_id}, users cannot add it");
            return Err(TagRelationError::NotAddable);
        }
        let item = TagItem {
            thread_id,
            tag_id: tag.id,
        };
        tag_repository::add_tag_to_thread(item, &con).map_err(|e| {
            log::error!(
                "Failed to add tag {public_id} to thread {thread_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            TagRelationError::DbError
        })
    });
    close_connection(con);
    res
}

/// takes the tag off the thread if users are allowed to remove it. Removing a tag the thread doesn't carry is a no-op
pub fn remove_tag_from_thread(thread_id: u32, public_id: &str) -> Result<(), TagRelationError> {
    let con = connect().map_err(|_| TagRelationError::DbError)?;
    let res = find_thread_tag(thread_id, public_id, &con).and_then(|tag| {
        if !policy::is_removable(&tag) {
            log::warn!("Refusing to remove tag {public_id} from thread {thread_id}, users cannot remove it");
            return Err(TagRelationError::NotRemovable);
        }
        let item = TagItem {
            thread_id,
            tag_id: tag.id,
        };
        tag_repository::remove_tag_from_thread(item, &con).map_err(|e| {
            log::error!(
                "Failed to remove tag {public_id} from thread {thread_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            TagRelationError::DbError
        })
    });
    close_connection(con);
    res
}

pub fn get_tags_on_thread(thread_id: u32) -> Result<Vec<Tag>, TagRelationError> {
    let con = connect().map_err(|_| TagRelationError::DbError)?;
    let res = match thread_repository::get_thread(thread_id, &con) {
        Ok(_) => tag_repository::get_tags_on_thread(thread_id, &con).map_err(|e| {
            log::error!(
                "Failed to retrieve tags on thread {thread_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            TagRelationError::DbError
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(TagRelationError::ThreadNotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve thread with id {thread_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(TagRelationError::DbError)
        }
    };
    close_connection(con);
    res
}

fn require_tag(namespace_id: u32, public_id: &str, con: &Connection) -> Result<Tag, TagCountError> {
    match tag_repository::get_tag_by_public_id(namespace_id, public_id, con) {
        Ok(Some(tag)) => Ok(tag),
        Ok(None) => Err(TagCountError::TagNotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve tag {public_id} in namespace {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(TagCountError::DbError)
        }
    }
}

fn log_count_error(public_id: &str, e: rusqlite::Error) -> TagCountError {
    log::error!(
        "Failed to count threads for tag {public_id}! Error is {e:?}\n{}",
        Backtrace::force_capture()
    );
    TagCountError::DbError
}

/// computes how many threads carry the tag, and how many of those are also unread.
/// A namespace without an `unread` tag has an unread count of 0
pub fn get_tag_stats(namespace_id: u32, public_id: &str) -> Result<TagStats, TagCountError> {
    let con = connect().map_err(|_| TagCountError::DbError)?;
    let res = compute_tag_stats(namespace_id, public_id, &con);
    close_connection(con);
    res
}

fn compute_tag_stats(
    namespace_id: u32,
    public_id: &str,
    con: &Connection,
) -> Result<TagStats, TagCountError> {
    let tag = require_tag(namespace_id, public_id, con)?;
    let counter = AssociationCounter::new(con);
    let thread_count = counter
        .count_threads(&tag)
        .map_err(|e| log_count_error(public_id, e))?;
    let unread_count = match require_tag(namespace_id, "unread", con) {
        Ok(unread) => counter
            .intersection_count(&tag, unread.id)
            .map_err(|e| log_count_error(public_id, e))?,
        Err(TagCountError::TagNotFound) => 0,
        Err(e) => return Err(e),
    };
    Ok(TagStats {
        thread_count,
        unread_count,
    })
}

/// counts the threads in the namespace carrying both tags
pub fn tag_intersection(
    namespace_id: u32,
    public_id: &str,
    other_public_id: &str,
) -> Result<u64, TagCountError> {
    let con = connect().map_err(|_| TagCountError::DbError)?;
    let res = require_tag(namespace_id, public_id, &con).and_then(|tag| {
        let other = require_tag(namespace_id, other_public_id, &con)?;
        AssociationCounter::new(&con)
            .intersection_count(&tag, other.id)
            .map_err(|e| log_count_error(public_id, e))
    });
    close_connection(con);
    res
}
