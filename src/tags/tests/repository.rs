mod create_tag_tests {
    use crate::repository::{is_unique_violation, open_connection};
    use crate::tags::repository;
    use crate::tags::Tag;
    use crate::test::*;

    #[test]
    fn create_tag() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let con = open_connection().unwrap();
        let tag = repository::create_tag(ns.id, "abc", "receipts", true, &con).unwrap();
        let found = repository::get_tag(tag.id, &con).unwrap();
        con.close().unwrap();
        assert_eq!(
            Tag {
                id: 1,
                namespace_id: ns.id,
                public_id: "abc".to_string(),
                name: "receipts".to_string(),
                user_created: true,
            },
            found
        );
        cleanup();
    }

    #[test]
    fn create_tag_duplicate_name_is_unique_violation() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let con = open_connection().unwrap();
        repository::create_tag(ns.id, "abc", "receipts", true, &con).unwrap();
        let res = repository::create_tag(ns.id, "def", "RECEIPTS", true, &con).unwrap_err();
        con.close().unwrap();
        assert!(is_unique_violation(&res));
        cleanup();
    }

    #[test]
    fn create_tag_duplicate_non_ascii_name_is_unique_violation() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let con = open_connection().unwrap();
        repository::create_tag(ns.id, "abc", "Äpfel", true, &con).unwrap();
        let res = repository::create_tag(ns.id, "def", "äpfel", true, &con).unwrap_err();
        con.close().unwrap();
        assert!(is_unique_violation(&res));
        cleanup();
    }

    #[test]
    fn create_tag_duplicate_public_id_is_unique_violation() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let con = open_connection().unwrap();
        repository::create_tag(ns.id, "abc", "receipts", true, &con).unwrap();
        let res = repository::create_tag(ns.id, "abc", "travel", true, &con).unwrap_err();
        con.close().unwrap();
        assert!(is_unique_violation(&res));
        cleanup();
    }

    #[test]
    fn same_name_in_different_namespaces() {
        init_db();
        let first = create_namespace_db_entry("first");
        let second = create_namespace_db_entry("second");
        create_canonical_tag_db_entry(first.id, "inbox");
        create_canonical_tag_db_entry(second.id, "inbox");
        let con = open_connection().unwrap();
        assert_eq!(1, repository::get_tags_for_namespace(first.id, &con).unwrap().len());
        assert_eq!(1, repository::get_tags_for_namespace(second.id, &con).unwrap().len());
        con.close().unwrap();
        cleanup();
    }

    #[test]
    fn create_tag_unknown_namespace_fails() {
        init_db();
        let con = open_connection().unwrap();
        let res = repository::create_tag(42, "abc", "receipts", true, &con);
        con.close().unwrap();
        assert!(res.is_err());
        cleanup();
    }
}

mod get_tag_tests {
    use crate::repository::open_connection;
    use crate::tags::repository::{get_tag, get_tag_by_name, get_tag_by_public_id};
    use crate::test::*;

    #[test]
    fn get_tag_by_name_found() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let expected = create_user_tag_db_entry(ns.id, "abc", "Receipts");
        let con = open_connection().unwrap();
        let found = get_tag_by_name(ns.id, "rEcEiPtS", &con).unwrap();
        con.close().unwrap();
        assert_eq!(Some(expected), found);
        cleanup();
    }

    #[test]
    fn get_tag_by_name_non_ascii_case() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let expected = create_user_tag_db_entry(ns.id, "abc", "Ärger");
        let con = open_connection().unwrap();
        let found = get_tag_by_name(ns.id, "äRGER", &con).unwrap();
        con.close().unwrap();
        assert_eq!(Some(expected), found);
        cleanup();
    }

    #[test]
    fn get_tag_by_name_not_found() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let other = create_namespace_db_entry("other");
        create_user_tag_db_entry(other.id, "abc", "receipts");
        let con = open_connection().unwrap();
        let found = get_tag_by_name(ns.id, "receipts", &con).unwrap();
        con.close().unwrap();
        assert_eq!(None, found);
        cleanup();
    }

    #[test]
    fn get_tag_by_public_id_found() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let expected = create_canonical_tag_db_entry(ns.id, "starred");
        let con = open_connection().unwrap();
        let found = get_tag_by_public_id(ns.id, "starred", &con).unwrap();
        let not_found = get_tag_by_public_id(ns.id, "Starred", &con).unwrap();
        con.close().unwrap();
        assert_eq!(Some(expected), found);
        assert_eq!(None, not_found);
        cleanup();
    }

    #[test]
    fn get_tag_not_found() {
        init_db();
        let con = open_connection().unwrap();
        let res = get_tag(1, &con);
        con.close().unwrap();
        assert_eq!(Err(rusqlite::Error::QueryReturnedNoRows), res);
        cleanup();
    }
}

mod rename_tag_tests {
    use crate::repository::open_connection;
    use crate::tags::repository::{get_tag, get_tag_by_name, rename_tag};
    use crate::test::*;

    #[test]
    fn rename_tag_updates_name_lookup() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let tag = create_user_tag_db_entry(ns.id, "abc", "receipts");
        let con = open_connection().unwrap();
        rename_tag(tag.id, "Übersicht", &con).unwrap();
        let old_name = get_tag_by_name(ns.id, "receipts", &con).unwrap();
        let new_name = get_tag_by_name(ns.id, "ÜBERSICHT", &con).unwrap();
        con.close().unwrap();
        assert_eq!(None, old_name);
        assert_eq!(Some(tag.id), new_name.map(|t| t.id));
        cleanup();
    }

    #[test]
    fn rename_tag_keeps_public_id() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let tag = create_user_tag_db_entry(ns.id, "abc", "receipts");
        let con = open_connection().unwrap();
        rename_tag(tag.id, "bills", &con).unwrap();
        let renamed = get_tag(tag.id, &con).unwrap();
        con.close().unwrap();
        assert_eq!("bills", renamed.name);
        assert_eq!("abc", renamed.public_id);
        cleanup();
    }
}

mod thread_tag_tests {
    use crate::repository::open_connection;
    use crate::tags::repository::*;
    use crate::tags::TagItem;
    use crate::test::*;

    #[test]
    fn add_tag_to_thread_is_idempotent() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let inbox = create_canonical_tag_db_entry(ns.id, "inbox");
        let thread = create_thread_db_entry(ns.id, "hello");
        let con = open_connection().unwrap();
        let item = TagItem {
            thread_id: thread.id,
            tag_id: inbox.id,
        };
        add_tag_to_thread(item, &con).unwrap();
        add_tag_to_thread(item, &con).unwrap();
        let tags = get_tags_on_thread(thread.id, &con).unwrap();
        let count = count_threads_for_tag(inbox.id, &con).unwrap();
        con.close().unwrap();
        assert_eq!(vec![inbox], tags);
        assert_eq!(1, count);
        cleanup();
    }

    #[test]
    fn remove_tag_from_thread_leaves_other_tags() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let inbox = create_canonical_tag_db_entry(ns.id, "inbox");
        let starred = create_canonical_tag_db_entry(ns.id, "starred");
        let thread = create_thread_db_entry(ns.id, "hello");
        tag_thread(thread.id, inbox.id);
        tag_thread(thread.id, starred.id);
        let con = open_connection().unwrap();
        remove_tag_from_thread(
            TagItem {
                thread_id: thread.id,
                tag_id: inbox.id,
            },
            &con,
        )
        .unwrap();
        let tags = get_tags_on_thread(thread.id, &con).unwrap();
        con.close().unwrap();
        assert_eq!(vec![starred], tags);
        cleanup();
    }

    #[test]
    fn count_threads_for_tag_pair_uses_shared_threads() {
        init_db();
        let ns = create_namespace_db_entry("ns");
        let inbox = create_canonical_tag_db_entry(ns.id, "inbox");
        let unread = create_canonical_tag_db_entry(ns.id, "unread");
        for i in 0..5 {
            let thread = create_thread_db_entry(ns.id, &format!("thread {i}"));
            tag_thread(thread.id, inbox.id);
            if i % 2 == 0 {
                tag_thread(thread.id, unread.id);
            }
        }
        let con = open_connection().unwrap();
        assert_eq!(5, count_threads_for_tag(inbox.id, &con).unwrap());
        assert_eq!(3, count_threads_for_tag(unread.id, &con).unwrap());
        assert_eq!(3, count_threads_for_tag_pair(inbox.id, unread.id, &con).unwrap());
        assert_eq!(3, count_threads_for_tag_pair(unread.id, inbox.id, &con).unwrap());
        con.close().unwrap();
        cleanup();
    }
}
