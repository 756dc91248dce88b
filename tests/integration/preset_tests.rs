use kiln::core::{AssetRoute, AssetRouter, ConfigAssembler, Preset, ProjectPaths, RuleSet};
use std::path::{Path, PathBuf};

fn assembler(preset: Preset) -> ConfigAssembler {
    let paths = ProjectPaths::new("/app")
        .with_entry("src/index.tsx")
        .with_output_dir("dist");
    ConfigAssembler::new(paths, preset)
}

#[test]
fn test_base_matches_construction_literals() {
    for preset in Preset::ALL {
        let config = assembler(preset).base();

        assert!(!config.entry.is_empty());
        assert_eq!(
            config.entry.paths().collect::<Vec<_>>(),
            vec![Path::new("/app/src/index.tsx")]
        );
        assert_eq!(config.output.path, PathBuf::from("/app/dist"));
        assert!(!config.resolve.extensions.is_empty());
        assert_eq!(config.resolve.extensions, vec![".ts", ".tsx", ".js", ".jsx"]);
    }
}

#[test]
fn test_bundle_filename_per_preset() {
    let flat = assembler(Preset::Flat).base();
    assert_eq!(flat.output.filename, "bundle.js");
    assert_eq!(flat.output.bundle_path(), PathBuf::from("/app/dist/bundle.js"));

    let nested = assembler(Preset::Nested).base();
    assert_eq!(nested.output.filename, "js/bundle.js");
    assert!(nested.output.bundle_path().starts_with("/app/dist"));
}

#[test]
fn test_every_base_has_cleaning_plugin() {
    for preset in Preset::ALL {
        assert!(assembler(preset).base().has_plugin("clean-output"));
    }
}

#[test]
fn test_build_cache_only_in_nested() {
    assert!(!assembler(Preset::Flat).base().has_plugin("build-cache"));
    assert!(assembler(Preset::Nested).base().has_plugin("build-cache"));
}

#[test]
fn test_small_asset_inlined_large_emitted() {
    let config = assembler(Preset::Nested).base();
    let router = AssetRouter::from_config(&config).unwrap();

    assert!(matches!(router.route("badge.png", 5 * 1024), AssetRoute::Inline { .. }));
    match router.route("banner.png", 50 * 1024) {
        AssetRoute::Emit { path } => assert!(path.starts_with("statics")),
        other => panic!("expected emission, got {:?}", other),
    }
}

#[test]
fn test_dependency_assets_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let dependency = dir.path().join("node_modules/pkg");
    std::fs::create_dir_all(&dependency).unwrap();
    let big = dependency.join("big.png");
    std::fs::write(&big, vec![0u8; 50 * 1024]).unwrap();

    let paths = ProjectPaths::new(dir.path());
    let config = ConfigAssembler::new(paths, Preset::Nested).base();
    let router = AssetRouter::from_config(&config).unwrap();
    let rules = RuleSet::from_config(&config).unwrap();

    assert!(rules.match_path(&big).is_none());
    assert_eq!(router.route_file(&big).unwrap(), None);
    assert!(!router.handles("node_modules/x.png"));
}

#[test]
fn test_presets_keep_distinct_thresholds() {
    let flat = AssetRouter::from_config(&assembler(Preset::Flat).base()).unwrap();
    let nested = AssetRouter::from_config(&assembler(Preset::Nested).base()).unwrap();

    // 12 KiB sits between the two limits
    assert!(flat.route("mid.jpg", 12 * 1024).is_inline());
    assert!(!nested.route("mid.jpg", 12 * 1024).is_inline());
}

#[test]
fn test_rules_follow_declaration_order() {
    let config = assembler(Preset::Flat).base();
    let rules = RuleSet::from_config(&config).unwrap();

    assert_eq!(rules.len(), 3);
    assert_eq!(rules.match_index(Path::new("src/App.tsx")), Some(0));
    assert_eq!(rules.match_index(Path::new("src/theme.sass")), Some(1));
    assert_eq!(rules.match_index(Path::new("src/font.ttf")), Some(2));
    assert_eq!(rules.match_index(Path::new("node_modules/x/App.tsx")), None);
}
