use std::fs;
use std::path::PathBuf;

use hanoi_plots::config::{AppConfig, PathsConfig, RenderConfig};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "hanoi_plots_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f64, b: f64, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-9, "{label} mismatch: {a} vs {b}");
}

#[test]
fn custom_config_round_trips_through_disk() {
    let path = unique_path("custom.toml");
    let custom = AppConfig {
        paths: PathsConfig {
            input: PathBuf::from("bench/out.csv"),
            output_dir: PathBuf::from("bench/png"),
        },
        render: RenderConfig {
            width: 1600,
            height: 900,
            dashboard_threshold_ms: 2.5,
            tick_step: 5,
        },
    };
    fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();

    let cfg = AppConfig::load_or_default(&path);
    assert_eq!(cfg.paths, custom.paths);
    assert_eq!(cfg.render.width, 1600);
    assert_eq!(cfg.render.height, 900);
    assert_eq!(cfg.render.tick_step, 5);
    assert_close(
        cfg.render.dashboard_threshold_ms,
        2.5,
        "render.dashboard_threshold_ms",
    );
    assert_eq!(cfg.render.wide_size(), (2400, 900));

    let _ = fs::remove_file(&path);
}

#[test]
fn existing_template_is_not_overwritten() {
    let path = unique_path("keep.toml");
    fs::write(&path, "[paths]\ninput = \"x.csv\"\n").unwrap();

    let cfg = AppConfig::load_or_default(&path);
    assert_eq!(cfg.paths.input, PathBuf::from("x.csv"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[paths]\ninput = \"x.csv\"\n"
    );

    let _ = fs::remove_file(&path);
}
