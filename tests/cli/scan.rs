use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

fn laravel_project() -> Result<CliTest> {
    CliTest::with_files(&[
        (
            "lang/en/messages.php",
            "<?php\n\nreturn [\n    'welcome' => 'Welcome',\n    'unused' => 'Not used',\n];\n",
        ),
        (
            "lang/fr/messages.php",
            "<?php\n\nreturn [\n    'welcome' => 'Bienvenue',\n    'unused' => 'Inutile',\n];\n",
        ),
        ("lang/en.json", r#"{"Welcome back": "Welcome back", "Goodbye": "Goodbye"}"#),
        (
            "lang/en/validation.php",
            "<?php return ['required' => 'The :attribute field is required.'];",
        ),
        (
            "app/Http/Controllers/HomeController.php",
            "<?php\n\nclass HomeController\n{\n    public function index()\n    {\n        return __('messages.welcome');\n    }\n}\n",
        ),
        (
            "resources/views/home.blade.php",
            "<h1>{{ __('Welcome back') }}</h1>\n",
        ),
    ])
}

#[test]
fn test_scan_reports_unused_keys() -> Result<()> {
    let test = laravel_project()?;
    let (code, stdout, _) = run(test.scan_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("| Total translations  | 5     |"), "{}", stdout);
    assert!(stdout.contains("| Used translations   | 2     |"), "{}", stdout);
    assert!(stdout.contains("| Unused translations | 2     |"), "{}", stdout);
    assert!(
        stdout.contains("Unused translations:\n  • Goodbye (en)\n  • messages.unused (en, fr)\n"),
        "{}",
        stdout
    );
    assert!(!stdout.contains("validation.required"));
    Ok(())
}

#[test]
fn test_scan_does_not_modify_files() -> Result<()> {
    let test = laravel_project()?;
    let before = test.read_file("lang/en/messages.php")?;

    run(test.scan_command())?;

    assert_eq!(test.read_file("lang/en/messages.php")?, before);
    Ok(())
}

#[test]
fn test_scan_everything_used() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en.json", r#"{"Hello": "Hello"}"#),
        ("resources/js/app.js", "console.log(t('Hello'));"),
    ])?;
    let (code, stdout, _) = run(test.scan_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ No unused translations found!"));
    Ok(())
}

#[test]
fn test_scan_without_lang_directory() -> Result<()> {
    let test = CliTest::with_files(&[("app/a.php", "<?php __('a.b');")])?;
    let (code, stdout, _) = run(test.scan_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("| Total translations  | 0     |"));
    assert!(stdout.contains("No unused translations found!"));
    Ok(())
}

#[test]
fn test_scan_explicit_path_overrides_defaults() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en.json", r#"{"In app": "x", "In modules": "y"}"#),
        ("app/a.php", "<?php __('In app');"),
        ("modules/b.php", "<?php __('In modules');"),
    ])?;

    let (_, stdout, _) = run(test.scan_command())?;
    assert!(stdout.contains("  • In modules (en)"));
    assert!(!stdout.contains("  • In app (en)"));

    let (_, stdout, _) = run({
        let mut cmd = test.scan_command();
        cmd.args(["--path", "modules"]);
        cmd
    })?;
    assert!(stdout.contains("  • In app (en)"));
    assert!(!stdout.contains("  • In modules (en)"));
    Ok(())
}

#[test]
fn test_scan_configured_paths_and_exclude() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/messages.php", "<?php return ['a' => 'A', 'b' => 'B'];"),
        ("lang/en/admin.php", "<?php return ['title' => 'Admin'];"),
        ("src/page.php", "<?php __('messages.a');"),
    ])?;
    test.write_config(r#"{ "paths": ["src"], "exclude": ["admin.*"] }"#)?;

    let (code, stdout, _) = run(test.scan_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("| Unused translations | 1     |"), "{}", stdout);
    assert!(stdout.contains("  • messages.b (en)"));
    assert!(!stdout.contains("admin.title"));
    Ok(())
}

#[test]
fn test_scan_from_subdirectory_uses_config_root() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en.json", r#"{"Used": "u", "Unused": "x"}"#),
        ("app/Models/User.php", "<?php __('Used');"),
    ])?;
    test.write_config("{}")?;

    let (code, stdout, _) = run({
        let mut cmd = test.scan_command();
        cmd.current_dir(test.root().join("app/Models"));
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("| Total translations  | 2     |"), "{}", stdout);
    assert!(stdout.contains("  • Unused (en)"));
    Ok(())
}

#[test]
fn test_scan_save_writes_report() -> Result<()> {
    let test = laravel_project()?;
    let (code, stdout, _) = run({
        let mut cmd = test.scan_command();
        cmd.args(["--save", "report.json"]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Results saved to: report.json"));

    let report: Value =
        serde_json::from_str(&test.read_file("report.json")?).context("report should be JSON")?;
    assert_eq!(report["total"], 5);
    assert_eq!(report["used"], 2);
    assert_eq!(report["unused"], 2);

    let entry = &report["unused_keys"]["messages.unused"]["fr"];
    assert_eq!(entry["group"], "messages");
    assert_eq!(entry["key_path"], "unused");
    assert_eq!(entry["locale"], "fr");
    assert_eq!(entry["value"], "Inutile");
    assert!(
        entry["file"]
            .as_str()
            .is_some_and(|f| f.ends_with("messages.php"))
    );
    assert_eq!(report["unused_keys"]["Goodbye"]["en"]["group"], Value::Null);
    Ok(())
}

#[test]
fn test_scan_malformed_config_is_an_error() -> Result<()> {
    let test = laravel_project()?;
    test.write_config("{ not json")?;

    let (code, _, stderr) = run(test.scan_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Error: Failed to parse config file"), "{}", stderr);
    Ok(())
}

#[test]
fn test_scan_verbose_warns_about_config() -> Result<()> {
    let test = laravel_project()?;
    test.write_config(r#"{ "loaders": ["yaml"], "scanners": "all" }"#)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.scan_command();
        cmd.args(["-v", "--path", "missing"]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stderr.contains("warning: Unknown loader 'yaml'"), "{}", stderr);
    assert!(stderr.contains("warning: Scan path does not exist:"), "{}", stderr);
    // falls back to the default loaders and source paths
    assert!(stdout.contains("| Total translations  | 5     |"), "{}", stdout);
    Ok(())
}
