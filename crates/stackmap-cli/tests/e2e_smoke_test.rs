use std::fs;

use tempfile::tempdir;

use stackmap_cli::{Args, run};

fn args_for(output: String) -> Args {
    Args {
        output: Some(output),
        format: None,
        config: None,
        icon_dir: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_dot_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("docs").join("overview.dot");

    let path = run(&args_for(output.to_string_lossy().to_string()))
        .expect("Rendering the overview as DOT should succeed");
    assert_eq!(path, output);

    let dot = fs::read_to_string(&path).expect("Output file should exist");
    assert!(dot.starts_with("digraph"));
    for title in [
        "Cloud Development Kit (CDK)",
        "CDK Stack = Network",
        "CDK Stack = Hosts",
        "Networking Resources",
        "Compute Resources",
    ] {
        assert!(dot.contains(title), "missing cluster {title}");
    }

    // A second run recreates the same artifact.
    fs::remove_file(&path).unwrap();
    run(&args_for(output.to_string_lossy().to_string())).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), dot);
}

#[test]
fn e2e_smoke_test_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let output = temp_dir.path().join("farm");
    fs::write(
        &config_path,
        format!(
            "[output]\npath = {:?}\nformat = \"dot\"\n\n[farm]\nservers = [\"Lobby\", \"Survival\"]\n",
            output.to_string_lossy()
        ),
    )
    .unwrap();

    let args = Args {
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    let path = run(&args).expect("Rendering with a config file should succeed");

    assert_eq!(path, output.with_extension("dot"));
    let dot = fs::read_to_string(&path).unwrap();
    assert!(dot.contains("Server Survival"));
    assert!(!dot.contains("Server A"));
}

#[test]
fn e2e_smoke_test_error_cases() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let missing_config = Args {
        config: Some(
            temp_dir
                .path()
                .join("missing.toml")
                .to_string_lossy()
                .to_string(),
        ),
        log_level: "off".to_string(),
        ..Args::default()
    };
    assert!(run(&missing_config).is_err());

    let empty_farm = temp_dir.path().join("empty.toml");
    fs::write(&empty_farm, "[farm]\nservers = []\n").unwrap();
    let args = Args {
        output: Some(
            temp_dir
                .path()
                .join("never.dot")
                .to_string_lossy()
                .to_string(),
        ),
        config: Some(empty_farm.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("never.dot").exists());
}
