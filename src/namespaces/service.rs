use std::backtrace::Backtrace;
use std::collections::HashSet;

use rusqlite::Connection;

use crate::model::error::namespace_errors::{
    CreateNamespaceError, DeleteNamespaceError, GetNamespaceError, ProvisionTagsError,
};
use crate::namespaces::repository as namespace_repository;
use crate::namespaces::Namespace;
use crate::public_id::{PublicIdGenerator, UuidPublicIds};
use crate::repository::{close_connection, connect};
use crate::tags::policy::CANONICAL_TAG_NAMES;
use crate::tags::repository as tag_repository;
use crate::tags::Tag;

/// creates a new namespace along with every canonical tag, all in one transaction
pub fn create_namespace() -> Result<Namespace, CreateNamespaceError> {
    let mut con = connect().map_err(|_| CreateNamespaceError::DbError)?;
    let public_id = UuidPublicIds.generate_public_id();
    let created = create_namespace_with_tags(&public_id, &mut con);
    close_connection(con);
    match created {
        Ok(namespace) => {
            log::info!(
                "Created namespace {} with id {}",
                namespace.public_id,
                namespace.id
            );
            Ok(namespace)
        }
        Err(e) => {
            log::error!(
                "Failed to create namespace {public_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateNamespaceError::DbError)
        }
    }
}

fn create_namespace_with_tags(
    public_id: &str,
    con: &mut Connection,
) -> Result<Namespace, rusqlite::Error> {
    let tx = con.transaction()?;
    let namespace = namespace_repository::create_namespace(public_id, &tx)?;
    provision_missing_tags(namespace.id, &tx)?;
    tx.commit()?;
    Ok(namespace)
}

/// retrieves the namespace with the passed id
pub fn get_namespace(id: u32) -> Result<Namespace, GetNamespaceError> {
    let con = connect().map_err(|_| GetNamespaceError::DbError)?;
    let res = namespace_repository::get_namespace(id, &con);
    close_connection(con);
    match res {
        Ok(namespace) => Ok(namespace),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GetNamespaceError::NamespaceNotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve namespace with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetNamespaceError::DbError)
        }
    }
}

pub fn get_all_namespaces() -> Result<Vec<Namespace>, GetNamespaceError> {
    let con = connect().map_err(|_| GetNamespaceError::DbError)?;
    let res = namespace_repository::get_all_namespaces(&con);
    close_connection(con);
    res.map_err(|e| {
        log::error!(
            "Could not retrieve namespaces! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetNamespaceError::DbError
    })
}

/// adds any canonical tag the namespace doesn't have yet. Returns only the tags that were created,
/// so calling this on a fully provisioned namespace returns an empty list
pub fn provision_canonical_tags(namespace_id: u32) -> Result<Vec<Tag>, ProvisionTagsError> {
    let mut con = connect().map_err(|_| ProvisionTagsError::DbError)?;
    match namespace_repository::get_namespace(namespace_id, &con) {
        Ok(_) => {}
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Cannot provision tags for namespace {namespace_id}, because it does not exist!");
            close_connection(con);
            return Err(ProvisionTagsError::NamespaceNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve namespace with id {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            close_connection(con);
            return Err(ProvisionTagsError::DbError);
        }
    };
    let res = con.transaction().and_then(|tx| {
        let created = provision_missing_tags(namespace_id, &tx)?;
        tx.commit()?;
        Ok(created)
    });
    close_connection(con);
    match res {
        Ok(created) => {
            if !created.is_empty() {
                log::info!(
                    "Provisioned {} canonical tags for namespace {namespace_id}",
                    created.len()
                );
            }
            Ok(created)
        }
        Err(e) => {
            log::error!(
                "Failed to provision canonical tags for namespace {namespace_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ProvisionTagsError::DbError)
        }
    }
}

/// canonical tags use their name as their public id, and are never user created
fn provision_missing_tags(namespace_id: u32, con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let existing: HashSet<String> = tag_repository::get_tags_for_namespace(namespace_id, con)?
        .into_iter()
        .map(|tag| tag.public_id)
        .collect();
    let mut created: Vec<Tag> = Vec::new();
    for name in CANONICAL_TAG_NAMES
        .iter()
        .filter(|name| !existing.contains(**name))
    {
        created.push(tag_repository::create_tag(
            namespace_id,
            name,
            name,
            false,
            con,
        )?);
    }
    Ok(created)
}

/// deletes the namespace, and with it all of its tags, threads, and tag associations
pub fn delete_namespace(id: u32) -> Result<(), DeleteNamespaceError> {
    let con = connect().map_err(|_| DeleteNamespaceError::DbError)?;
    let res = namespace_repository::get_namespace(id, &con)
        .and_then(|_| namespace_repository::delete_namespace(id, &con));
    close_connection(con);
    match res {
        Ok(()) => {
            log::info!("Deleted namespace {id}");
            Ok(())
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Could not delete namespace {id}, because it does not exist!");
            Err(DeleteNamespaceError::NamespaceNotFound)
        }
        Err(e) => {
            log::error!(
                "Could not delete namespace {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DeleteNamespaceError::DbError)
        }
    }
}
