//! Store-level functional tests.
//!
//! Exercises each reference collaborator implementation directly through its
//! trait, the way the page context consumes it.

use pageflow::{
    Category, Course, CourseModule, ModuleInfoProvider, NavKind, NavRequest, ScopeLevel,
    SessionStore, ThemeHandle, ThemeHints, ThemeResolver,
};

// ─────────────────────────────────────────────────────────────────────────────
// Theme resolver
// ─────────────────────────────────────────────────────────────────────────────

mod theme_resolver {
    use super::*;
    use pageflow::{StandardThemeResolver, ThemeSourcePolicy};

    fn resolver() -> StandardThemeResolver {
        let resolver = StandardThemeResolver::new("standard");
        resolver.register(ThemeHandle::new("boost"));
        resolver.register(ThemeHandle::new("classic"));
        resolver.register(ThemeHandle::new("cohorttheme"));
        resolver
    }

    #[test]
    fn course_theme_wins_over_everything() {
        let hints = ThemeHints {
            course: Some("boost".into()),
            category: Some("classic".into()),
            session: Some("classic".into()),
            user: Some("classic".into()),
            cohort: Some("cohorttheme".into()),
        };
        assert_eq!(resolver().resolve_name(&hints), "boost");
    }

    #[test]
    fn sources_are_consulted_in_order() {
        let mut hints = ThemeHints {
            category: Some("classic".into()),
            cohort: Some("cohorttheme".into()),
            ..ThemeHints::default()
        };
        assert_eq!(resolver().resolve_name(&hints), "classic");

        hints.category = None;
        assert_eq!(resolver().resolve_name(&hints), "cohorttheme");
    }

    #[test]
    fn unknown_candidates_are_skipped() {
        let hints = ThemeHints {
            course: Some("uninstalled".into()),
            user: Some("boost".into()),
            ..ThemeHints::default()
        };
        assert_eq!(resolver().resolve_name(&hints), "boost");
    }

    #[test]
    fn disabled_sources_are_ignored() {
        let resolver = resolver().with_policy(ThemeSourcePolicy {
            course: false,
            ..ThemeSourcePolicy::default()
        });
        let hints = ThemeHints {
            course: Some("boost".into()),
            category: Some("classic".into()),
            ..ThemeHints::default()
        };
        assert_eq!(resolver.resolve_name(&hints), "classic");
    }

    #[test]
    fn no_hints_falls_back_to_site_default() {
        assert_eq!(resolver().resolve_name(&ThemeHints::default()), "standard");
    }

    #[test]
    fn loading_an_unknown_theme_falls_back_to_the_default() {
        let handle = resolver().load("vanished").unwrap();
        assert_eq!(handle.name, "standard");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session store
// ─────────────────────────────────────────────────────────────────────────────

mod session_store {
    use super::*;
    use pageflow::MemorySessionStore;

    #[test]
    fn put_and_get() {
        let store = MemorySessionStore::new();
        store.put("k1", "v1".into());
        assert_eq!(store.get("k1").as_deref(), Some("v1"));
        assert!(store.get("k2").is_none());
    }

    #[test]
    fn overwriting_a_key_does_not_count_against_the_cap() {
        let store = MemorySessionStore::with_cap(2);
        store.put("a", "1".into());
        store.put("a", "2".into());
        store.put("b", "1".into());

        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.get("b").as_deref(), Some("1"));
    }

    #[test]
    fn oldest_entry_evicted_beyond_cap() {
        let store = MemorySessionStore::with_cap(2);
        store.put("a", "1".into());
        store.put("b", "2".into());
        store.put("c", "3".into());

        assert!(store.get("a").is_none());
        assert_eq!(store.get("b").as_deref(), Some("2"));
        assert_eq!(store.get("c").as_deref(), Some("3"));
    }

    #[test]
    fn rotation_changes_the_secret() {
        let store = MemorySessionStore::new();
        let before = store.secret();
        store.rotate_secret();
        assert_ne!(before, store.secret());
        assert_eq!(store.secret().len(), 32);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory stores
// ─────────────────────────────────────────────────────────────────────────────

mod memory_stores {
    use super::*;
    use pageflow::{
        CategoryStore, CourseStore, MemoryCategoryStore, MemoryCourseStore,
        MemoryModuleInfoProvider, MemoryScopeResolver, PageError, ScopeResolver,
    };

    #[test]
    fn missing_course_is_a_recoverable_not_found() {
        let store = MemoryCourseStore::new();
        let err = store.get_by_id(99).unwrap_err();
        assert!(matches!(err, PageError::NotFound { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn list_by_ids_skips_missing_categories() {
        let store = MemoryCategoryStore::new();
        store.insert(Category::new(3, 0, "Sciences", vec![3]));

        let found = store.list_by_ids(&[3, 44]).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&3));
    }

    #[test]
    fn canonicalize_rejects_course_mismatch() {
        let provider = MemoryModuleInfoProvider::new();
        let raw = CourseModule {
            id: 40,
            course: 5,
            instance: 9,
            modname: "forum".into(),
        };
        let err = provider
            .canonicalize(&raw, &Course::new(6, 0, "other"))
            .unwrap_err();
        assert!(matches!(err, PageError::Precondition(_)));
    }

    #[test]
    fn scope_ids_are_memoized() {
        let scopes = MemoryScopeResolver::new();
        let first = scopes.course_scope(5);
        let again = scopes.course_scope(5);
        assert_eq!(first, again);

        let other = scopes.module_scope(5);
        assert_ne!(first.id, other.id);

        assert_eq!(scopes.instance_by_id(first.id), Some(first));
        assert!(scopes.instance_by_id(9999).is_none());
    }

    #[test]
    fn system_scope_is_always_id_one() {
        let scopes = MemoryScopeResolver::new();
        let system = scopes.system_scope();
        assert_eq!(system.id, 1);
        assert_eq!(system.level, ScopeLevel::System);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block factories
// ─────────────────────────────────────────────────────────────────────────────

mod block_factories {
    use super::*;
    use pageflow::{
        BlockManagerFactory, MemoryScopeResolver, NullBlockFactory, PageUrl,
        RecordingBlockFactory, ScopeResolver,
    };
    use url::Url;

    fn page_url() -> PageUrl {
        let base = Url::parse("https://campus.test/").unwrap();
        PageUrl::parse(&base, "/course/view.php", &[]).unwrap()
    }

    #[test]
    fn null_manager_does_nothing() {
        let scopes = MemoryScopeResolver::new();
        let mut manager = NullBlockFactory.create(&scopes.system_scope(), "base");
        manager.load_blocks().unwrap();
        assert!(!manager.process_url_actions(&page_url()).unwrap());
        manager.create_all_instances();
    }

    #[test]
    fn recording_factory_captures_the_call_sequence() {
        let scopes = MemoryScopeResolver::new();
        let factory = RecordingBlockFactory::new();
        let mut manager = factory.create(&scopes.course_scope(5), "course");
        manager.load_blocks().unwrap();
        manager.create_all_instances();

        let calls = factory.calls();
        assert_eq!(calls[0], format!("create scope={} layout=course", scopes.course_scope(5).id));
        assert_eq!(&calls[1..], ["load_blocks", "create_all_instances"]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation builder
// ─────────────────────────────────────────────────────────────────────────────

mod navigation_builder {
    use super::*;
    use pageflow::{MemoryModuleInfoProvider, NavigationBuilder, StaticNavigationBuilder};

    #[test]
    fn site_root_is_always_present() {
        let builder = StaticNavigationBuilder::new("Campus");
        let view = builder.build(NavKind::Main, &NavRequest::default());
        assert_eq!(view.kind, NavKind::Main);
        assert_eq!(view.roots[0].text, "Campus");
    }

    #[test]
    fn course_and_module_appear_as_a_branch() {
        let provider = MemoryModuleInfoProvider::new();
        let course = Course::new(5, 0, "physics");
        let module = provider
            .canonicalize(
                &CourseModule {
                    id: 40,
                    course: 5,
                    instance: 9,
                    modname: "forum".into(),
                },
                &course,
            )
            .unwrap();

        let builder = StaticNavigationBuilder::new("Campus");
        let view = builder.build(
            NavKind::Main,
            &NavRequest {
                course: Some(&course),
                module: Some(&module),
                user_editing: false,
            },
        );
        let course_node = &view.roots[1];
        assert_eq!(course_node.text, "physics");
        assert_eq!(course_node.children[0].text, "forum 9");
    }

    #[test]
    fn secondary_navigation_gains_settings_while_editing() {
        let builder = StaticNavigationBuilder::new("Campus");
        let view = builder.build(
            NavKind::Secondary,
            &NavRequest {
                user_editing: true,
                ..NavRequest::default()
            },
        );
        assert!(view.roots.iter().any(|n| n.text == "Settings"));
    }
}
