use super::*;

#[test]
fn default_config_has_sensible_values() {
    let config = NodeConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1:7420");
    assert!(config.seeds.is_empty());
    assert_eq!(config.gossip_period_ms, 1_000);
    assert_eq!(config.timer_batch_limit, 100);
}

#[test]
fn load_fills_in_defaults_for_an_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wren.toml");
    std::fs::write(&path, "").unwrap();

    let config = NodeConfig::load(&path).unwrap();
    assert_eq!(config.bind_addr, NodeConfig::default().bind_addr);
}

#[test]
fn load_overrides_only_the_fields_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wren.toml");
    std::fs::write(&path, "bind_addr = \"0.0.0.0:9000\"\nseeds = [\"a:1\", \"b:2\"]\n").unwrap();

    let config = NodeConfig::load(&path).unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.seeds, vec!["a:1".to_string(), "b:2".to_string()]);
    assert_eq!(config.gossip_period_ms, NodeConfig::default().gossip_period_ms);
}

#[test]
fn load_fails_on_missing_file() {
    let err = NodeConfig::load(std::path::Path::new("/nonexistent/wren.toml"));
    assert!(err.is_err());
}
