use std::process::ExitCode;

use thread_tags::config::THREAD_TAGS_CONFIG;
use thread_tags::logging::init_logging;
use thread_tags::namespaces::service as namespace_service;
use thread_tags::repository::initialize_db;
use thread_tags::tags::service as tag_service;

/// initializes the database, makes sure every namespace has its canonical tags, and logs the thread counts of each tag
fn main() -> ExitCode {
    if let Err(e) = init_logging(&THREAD_TAGS_CONFIG.log) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = initialize_db() {
        log::error!("Failed to initialize the database: {e:?}");
        return ExitCode::FAILURE;
    }
    let namespaces = match namespace_service::get_all_namespaces() {
        Ok(namespaces) => namespaces,
        Err(e) => {
            log::error!("Failed to retrieve namespaces: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    for namespace in namespaces {
        if let Err(e) = namespace_service::provision_canonical_tags(namespace.id) {
            log::error!(
                "Failed to provision tags for namespace {}: {e:?}",
                namespace.public_id
            );
            return ExitCode::FAILURE;
        }
        let tags = match tag_service::get_tags_for_namespace(namespace.id) {
            Ok(tags) => tags,
            Err(e) => {
                log::error!(
                    "Failed to retrieve tags for namespace {}: {e:?}",
                    namespace.public_id
                );
                return ExitCode::FAILURE;
            }
        };
        for (public_id, tag) in tags {
            match tag_service::get_tag_stats(namespace.id, &public_id) {
                Ok(stats) => log::info!(
                    "[{}] {} ({public_id}): {} threads, {} unread",
                    namespace.public_id,
                    tag.name,
                    stats.thread_count,
                    stats.unread_count
                ),
                Err(e) => log::warn!("Failed to count threads for tag {public_id}: {e:?}"),
            }
        }
    }
    ExitCode::SUCCESS
}
