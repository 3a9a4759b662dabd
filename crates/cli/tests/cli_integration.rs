//! End-to-end tests for the `libra` binary

#[macro_use]
mod common;

use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_search_by_title() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "search", "matematikë").assert_success()?;

    assert!(result.contains_stdout("Matematikë 1"));
    assert!(result.contains_stdout("Matematikë 8"));
    assert!(!result.contains_stdout("Abetare"));
    assert_eq!(result.result_blocks(), 1);
    Ok(())
}

#[test]
fn test_search_with_grade_filter() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "search", "--grade", "6").assert_success()?;

    assert!(result.contains_stdout("Biologji 6"));
    assert!(result.contains_stdout("Fizikë 6"));
    assert!(!result.contains_stdout("Fizikë 9"));
    Ok(())
}

#[test]
fn test_search_no_results() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "search", "zzz").assert_success()?;
    assert!(result.contains_stdout("No books found"));
    Ok(())
}

#[test]
fn test_interactive_burst_runs_one_search() -> Result<()> {
    let dir = TempDir::new()?;

    // All edits arrive well inside the window; EOF flushes the last one
    let result = libra!(dir.path(), "--debounce-ms", "5000", "interactive")
        .stdin("g\ngj\ngje\ngjeo\n")
        .assert_success()?;

    assert_eq!(result.result_blocks(), 1, "stdout: {}", result.stdout);
    assert!(result.contains_stdout("'gjeo'"));
    assert!(result.contains_stdout("Gjeografi 5"));
    assert!(result.contains_stdout("Gjeometri 8"));
    Ok(())
}

#[test]
fn test_interactive_empty_input_runs_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "interactive").stdin("").assert_success()?;
    assert_eq!(result.result_blocks(), 0);
    Ok(())
}

#[test]
fn test_simulate_coalesces_keystrokes() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(
        dir.path(),
        "--debounce-ms",
        "1000",
        "simulate",
        "kimi",
        "--keystroke-ms",
        "5"
    )
    .assert_success()?;

    assert_eq!(result.result_blocks(), 1, "stdout: {}", result.stdout);
    assert!(result.contains_stdout("Kimi 7"));
    assert!(result.contains_stdout("4 keystrokes"));
    assert!(result.contains_stdout("3 superseded"));
    Ok(())
}

#[test]
fn test_config_file_is_used() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("libra.toml");
    fs::write(
        &config_path,
        "[search]\ndebounce_ms = 120\nmax_results = 2\n",
    )?;

    let config_arg = config_path.display().to_string();
    let result = libra!(dir.path(), "--config", &config_arg, "config").assert_success()?;
    assert!(result.contains_stdout("debounce_ms = 120"));
    assert!(result.contains_stdout("max_results = 2"));

    let result = libra!(dir.path(), "--config", &config_arg, "search").assert_success()?;
    assert!(result.contains_stdout("(2)"));
    Ok(())
}

#[test]
fn test_defaults_without_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "config").assert_success()?;
    assert!(result.contains_stdout("debounce_ms = 300"));
    assert!(result.contains_stdout("18 books"));
    Ok(())
}

#[test]
fn test_invalid_config_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("libra.toml");
    fs::write(&config_path, "[search]\nmax_results = 0\n")?;

    let config_arg = config_path.display().to_string();
    let result = libra!(dir.path(), "--config", &config_arg, "config").assert_failure()?;
    assert!(result.contains_stderr("max_results"));
    Ok(())
}

#[test]
fn test_debounce_override_out_of_range_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "--debounce-ms", "999999", "config").assert_failure()?;
    assert!(result.contains_stderr("debounce"));
    Ok(())
}

#[test]
fn test_custom_catalogue() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("books.toml"),
        r#"
[[products]]
id = 1
title = "Astronomi"
author = "T. Testi"
grade = 9
price = 3.25
"#,
    )?;
    let config_path = dir.path().join("libra.toml");
    fs::write(&config_path, "[catalog]\npath = \"books.toml\"\n")?;

    let config_arg = config_path.display().to_string();
    let result = libra!(dir.path(), "--config", &config_arg, "search", "astro").assert_success()?;
    assert!(result.contains_stdout("Astronomi"));
    assert!(result.contains_stdout("3.25 €"));

    let result = libra!(dir.path(), "--config", &config_arg, "search", "abetare").assert_success()?;
    assert!(result.contains_stdout("No books found"));
    Ok(())
}

#[test]
fn test_featured() -> Result<()> {
    let dir = TempDir::new()?;
    let result = libra!(dir.path(), "featured", "--limit", "2").assert_success()?;
    assert!(result.contains_stdout("Gjuha Shqipe 9"));
    assert!(result.contains_stdout("Fizikë 9"));
    assert!(!result.contains_stdout("Abetare"));
    Ok(())
}
