use kiln::core::{
    development_overlay, merge, production_overlay, ConfigAssembler, MinimizerSpec, Mode, Preset,
    ProjectPaths,
};
use kiln::plugins::PluginSpec;

fn assembler(preset: Preset) -> ConfigAssembler {
    ConfigAssembler::new(ProjectPaths::new("/app"), preset)
}

#[test]
fn test_development_merge() {
    for preset in Preset::ALL {
        let assembler = assembler(preset);
        let base = assembler.base();
        let dev = assembler.development().unwrap();

        assert_eq!(dev.mode, Some(Mode::Development));
        assert_eq!(dev.devtool.as_deref(), Some("inline-source-map"));

        let server = dev.dev_server.as_ref().unwrap();
        assert_eq!(server.port, 3030);
        assert!(server.hot);
        assert!(server.compress);
        assert!(server.history_api_fallback);
        assert_eq!(server.content_base, base.output.path);

        // base plugins survive, in order, ahead of dev-only ones
        assert!(dev.plugins.len() >= base.plugins.len());
        assert_eq!(&dev.plugins[..base.plugins.len()], &base.plugins[..]);
        assert_eq!(dev.module.rules, base.module.rules);
        assert!(dev.optimization.is_none());
    }
}

#[test]
fn test_analyzer_is_development_only() {
    let assembler = assembler(Preset::Nested);

    let dev = assembler.development().unwrap();
    assert_eq!(dev.plugins.last().map(PluginSpec::name), Some("bundle-analyzer"));

    let prod = assembler.production().unwrap();
    assert!(!prod.has_plugin("bundle-analyzer"));
}

#[test]
fn test_production_merge() {
    let flat = assembler(Preset::Flat).production().unwrap();
    assert_eq!(flat.mode, Some(Mode::Production));
    assert!(flat.dev_server.is_none());

    let optimization = flat.optimization.as_ref().unwrap();
    assert!(optimization.minimize);
    assert_eq!(optimization.minimizers.len(), 1);
    assert!(optimization.minimizers[0].drops_console());

    let nested = assembler(Preset::Nested).production().unwrap();
    let names: Vec<_> = nested
        .optimization
        .as_ref()
        .unwrap()
        .minimizers
        .iter()
        .map(MinimizerSpec::name)
        .collect();
    assert_eq!(names, vec!["terser", "css-minimizer"]);
}

#[test]
fn test_merge_is_idempotent() {
    for preset in Preset::ALL {
        let paths = ProjectPaths::new("/app");
        let base = ConfigAssembler::new(paths.clone(), preset).base();

        let dev_overlay = development_overlay(preset, &paths);
        assert_eq!(
            merge(&base, &dev_overlay).unwrap(),
            merge(&base, &dev_overlay).unwrap()
        );

        let prod_overlay = production_overlay(preset);
        assert_eq!(
            merge(&base, &prod_overlay).unwrap(),
            merge(&base, &prod_overlay).unwrap()
        );
    }
}

#[test]
fn test_merge_leaves_base_untouched() {
    let base = assembler(Preset::Nested).base();
    let snapshot = base.clone();

    let _ = merge(&base, &production_overlay(Preset::Nested)).unwrap();
    assert_eq!(base, snapshot);
}

#[test]
fn test_json_rendering_roundtrips() {
    let dev = assembler(Preset::Nested).development().unwrap();
    let json = dev.to_json_pretty().unwrap();

    assert!(json.contains("\"devServer\""));
    assert!(json.contains("\"historyApiFallback\": true"));

    let parsed: kiln::BundlerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, dev);
}
