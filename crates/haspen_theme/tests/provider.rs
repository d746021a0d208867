use haspen_core::ContextScope;
use haspen_theme::{
    dark_theme, light_theme, use_theme, ColorOverrides, ColorScheme, FileStorage, ManualScheme,
    MemoryRoot, MemoryStorage, ThemeEnvironment, ThemeError, ThemeMode, ThemeOverride,
    SystemScheme, ThemeProvider, ThemeProviderConfig, UnavailableStorage, THEME_ATTRIBUTE,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

fn harness() -> (ManualScheme, MemoryRoot, ThemeEnvironment) {
    let system = ManualScheme::new(ColorScheme::Light);
    let root = MemoryRoot::new();
    let env = ThemeEnvironment::headless()
        .with_system(system.clone())
        .with_root(root.clone());
    (system, root, env)
}

#[test]
fn mounting_dark_marks_root_and_uses_dark_colors() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_mode(ThemeMode::Dark),
        env,
    );

    let theme = use_theme(provider.scope());
    assert_eq!(root.theme_attribute().as_deref(), Some("dark"));
    assert_eq!(theme.theme().colors.primary, dark_theme().colors.primary);
    assert_eq!(
        root.snapshot().property("--haspen-colors-primary"),
        Some(dark_theme().colors.primary.as_str())
    );
}

#[test]
fn toggle_alternates_strictly_from_light() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);
    let theme = use_theme(provider.scope());

    let mut seen = vec![theme.scheme()];
    for _ in 0..5 {
        theme.toggle_mode();
        seen.push(theme.scheme());
        assert_eq!(
            root.theme_attribute().as_deref(),
            Some(theme.scheme().as_str())
        );
    }

    use ColorScheme::{Dark, Light};
    assert_eq!(seen, vec![Light, Dark, Light, Dark, Light, Dark]);
}

#[test]
fn toggle_from_auto_leaves_auto() {
    let (system, _root, env) = harness();
    system.set(ColorScheme::Dark);
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_mode(ThemeMode::Auto),
        env,
    );
    let theme = use_theme(provider.scope());
    assert!(theme.is_dark());

    theme.toggle_mode();
    assert_eq!(theme.mode(), ThemeMode::Light);
    assert!(!theme.is_following_system());
    assert_eq!(system.watcher_count(), 0);
}

#[test]
fn auto_follows_system_flips_without_set_mode() {
    let (system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);
    let theme = use_theme(provider.scope());

    theme.set_mode(ThemeMode::Auto);
    assert!(theme.is_light());

    system.set(ColorScheme::Dark);
    assert!(theme.is_dark());
    assert!(!theme.is_light());
    assert_eq!(theme.mode(), ThemeMode::Auto);
    assert_eq!(*theme.theme(), *dark_theme());
    assert_eq!(root.theme_attribute().as_deref(), Some("dark"));

    system.set(ColorScheme::Light);
    assert!(theme.is_light());
    assert_eq!(root.theme_attribute().as_deref(), Some("light"));
}

#[test]
fn fixed_mode_ignores_system_flips() {
    let (system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_mode(ThemeMode::Auto),
        env,
    );
    let theme = use_theme(provider.scope());

    theme.set_mode(ThemeMode::Light);
    system.set(ColorScheme::Dark);
    assert!(theme.is_light());
    assert_eq!(root.theme_attribute().as_deref(), Some("light"));
}

#[test]
fn invalid_literal_leaves_state_unchanged() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_mode(ThemeMode::Dark),
        env,
    );
    let theme = use_theme(provider.scope());
    let before_theme = theme.theme();
    let before_root = root.snapshot();

    let result = theme.set_mode_str("bogus");
    assert!(matches!(result, Err(ThemeError::InvalidMode(ref v)) if v == "bogus"));
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(*theme.theme(), *before_theme);
    assert_eq!(root.snapshot(), before_root);

    theme.set_mode_str("light").unwrap();
    assert_eq!(theme.mode(), ThemeMode::Light);
}

#[test]
fn persisted_mode_wins_over_configured_mode() {
    let storage = MemoryStorage::new();
    let app = ContextScope::root();

    {
        let (_system, _root, env) = harness();
        let provider = ThemeProvider::mount(
            &app,
            ThemeProviderConfig::new().with_persistence("k"),
            env.with_storage(storage.clone()),
        );
        use_theme(provider.scope()).set_mode(ThemeMode::Dark);
        assert_eq!(storage.get("k").as_deref(), Some("dark"));
    }

    let (_system, root, env) = harness();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new()
            .with_mode(ThemeMode::Light)
            .with_persistence("k"),
        env.with_storage(storage.clone()),
    );
    let theme = use_theme(provider.scope());
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(root.theme_attribute().as_deref(), Some("dark"));
}

#[test]
fn persisted_mode_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!("haspen-provider-{}.toml", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let app = ContextScope::root();

    {
        let (_system, _root, env) = harness();
        let provider = ThemeProvider::mount(
            &app,
            ThemeProviderConfig::new().with_persistence("mode"),
            env.with_storage(FileStorage::new(&path)),
        );
        provider.context().set_mode(ThemeMode::Auto);
    }

    let (_system, _root, env) = harness();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_persistence("mode"),
        env.with_storage(FileStorage::new(&path)),
    );
    assert_eq!(provider.context().mode(), ThemeMode::Auto);
    assert!(provider.context().is_following_system());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_persisted_value_falls_back_to_configured_mode() {
    let storage = MemoryStorage::new();
    storage.insert("k", "sepia");
    let (_system, _root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new()
            .with_mode(ThemeMode::Dark)
            .with_persistence("k"),
        env.with_storage(storage),
    );
    assert_eq!(provider.context().mode(), ThemeMode::Dark);
}

#[test]
fn storage_failures_never_reach_the_caller() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new()
            .with_mode(ThemeMode::Dark)
            .with_persistence("k"),
        env.with_storage(UnavailableStorage),
    );
    let theme = use_theme(provider.scope());
    assert_eq!(theme.mode(), ThemeMode::Dark);

    theme.set_mode(ThemeMode::Light);
    theme.toggle_mode();
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(root.theme_attribute().as_deref(), Some("dark"));
}

#[test]
fn missing_provider_yields_light_fallback() {
    let orphan = ContextScope::root().child();
    let theme = use_theme(&orphan);

    assert_eq!(theme.mode(), ThemeMode::Light);
    assert_eq!(*theme.theme(), *light_theme());
    assert!(!theme.persists_mode());

    // The fallback still works locally
    theme.toggle_mode();
    assert!(theme.is_dark());
    assert!(!orphan.has(&haspen_theme::THEME_CONTEXT));
}

#[test]
fn consumers_share_one_context() {
    let (_system, _root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);

    let header = use_theme(&provider.scope().child());
    let footer = use_theme(&provider.scope().child().child());
    assert!(Arc::ptr_eq(&header, &footer));
    assert!(Arc::ptr_eq(&header, provider.context()));

    header.set_mode(ThemeMode::Dark);
    assert!(footer.is_dark());
}

#[test]
fn nearest_provider_wins_and_last_writer_owns_the_root() {
    let root = MemoryRoot::new();
    let system = ManualScheme::default();
    let env = || {
        ThemeEnvironment::headless()
            .with_system(system.clone())
            .with_root(root.clone())
    };

    let app = ContextScope::root();
    let outer = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env());
    let inner = ThemeProvider::mount(
        outer.scope(),
        ThemeProviderConfig::new().with_mode(ThemeMode::Dark),
        env(),
    );

    assert!(use_theme(&inner.scope().child()).is_dark());
    assert!(use_theme(&outer.scope().child()).is_light());
    assert_eq!(root.theme_attribute().as_deref(), Some("dark"));

    outer.context().apply_theme();
    assert_eq!(root.theme_attribute().as_deref(), Some("light"));
}

#[test]
fn override_changes_reapply_and_keep_other_tokens() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);

    provider.set_theme_override(Some(ThemeOverride::new().with_colors(ColorOverrides {
        primary: Some("#fff".into()),
        ..Default::default()
    })));

    let snapshot = root.snapshot();
    assert_eq!(snapshot.property("--haspen-colors-primary"), Some("#fff"));
    assert_eq!(
        snapshot.property("--haspen-colors-secondary"),
        Some(light_theme().colors.secondary.as_str())
    );
    assert_eq!(snapshot.attribute(THEME_ATTRIBUTE), Some("light"));
}

#[test]
fn subscribers_observe_mode_and_theme_changes() {
    let (_system, _root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);
    let theme = use_theme(provider.scope());

    let schemes = Arc::new(Mutex::new(Vec::new()));
    let schemes_clone = schemes.clone();
    theme
        .scheme_signal()
        .subscribe(move |scheme| schemes_clone.lock().unwrap().push(*scheme));

    let backgrounds = Arc::new(Mutex::new(Vec::new()));
    let backgrounds_clone = backgrounds.clone();
    theme.theme_signal().subscribe(move |t| {
        backgrounds_clone
            .lock()
            .unwrap()
            .push(t.colors.background.clone())
    });

    theme.set_mode(ThemeMode::Dark);
    theme.set_mode(ThemeMode::Dark);

    assert_eq!(*schemes.lock().unwrap(), vec![ColorScheme::Dark]);
    assert_eq!(
        *backgrounds.lock().unwrap(),
        vec![
            dark_theme().colors.background.clone(),
            dark_theme().colors.background.clone()
        ]
    );
}

#[test]
fn unmount_stops_following_the_system() {
    let (system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_mode(ThemeMode::Auto),
        env,
    );
    let theme = Arc::clone(provider.context());
    assert_eq!(system.watcher_count(), 1);

    provider.unmount();
    assert_eq!(system.watcher_count(), 0);

    system.set(ColorScheme::Dark);
    assert!(theme.is_light());
    // Styles are not reverted on unmount
    assert_eq!(root.theme_attribute().as_deref(), Some("light"));
}

#[test]
fn transitions_class_follows_config() {
    let (_system, root, env) = harness();
    let app = ContextScope::root();
    let _provider = ThemeProvider::mount(
        &app,
        ThemeProviderConfig::new().with_transitions(false),
        env,
    );
    assert!(!root.snapshot().has_class(haspen_theme::TRANSITION_CLASS));
}

#[test]
fn system_flips_on_another_thread_never_override_a_fixed_selection() {
    let (system, root, env) = harness();
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, ThemeProviderConfig::default(), env);
    let theme = use_theme(provider.scope());

    let stop = Arc::new(AtomicBool::new(false));
    let flipper = {
        let system = system.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut scheme = ColorScheme::Light;
            while !stop.load(Ordering::SeqCst) {
                scheme = scheme.toggle();
                system.set(scheme);
            }
        })
    };

    let light_background = light_theme().colors.background.as_str();
    for _ in 0..200 {
        theme.set_mode(ThemeMode::Auto);
        theme.set_mode(ThemeMode::Light);

        assert_eq!(theme.scheme(), ColorScheme::Light);
        assert_eq!(*theme.theme(), *light_theme());
        let snapshot = root.snapshot();
        assert_eq!(snapshot.attribute(THEME_ATTRIBUTE), Some("light"));
        assert_eq!(
            snapshot.property("--haspen-colors-background"),
            Some(light_background)
        );
    }

    // Back to auto: once flips stop, state and root match the system
    theme.set_mode(ThemeMode::Auto);
    stop.store(true, Ordering::SeqCst);
    flipper.join().unwrap();

    let expected = system.current();
    assert_eq!(theme.scheme(), expected);
    assert_eq!(root.theme_attribute().as_deref(), Some(expected.as_str()));
}
