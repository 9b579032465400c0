use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ Created"), "{}", stdout);
    assert!(stdout.contains(".langprunerc.json"));

    let content = test.read_file(".langprunerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(
        parsed,
        json!({
            "paths": ["app", "resources/views", "resources/js"],
            "exclude": ["validation.*", "auth.*", "pagination.*", "passwords.*", "filament.*", "nova.*"],
            "ignore": ["vendor", "node_modules", "storage", "bootstrap/cache"],
            "filePatterns": ["*.php", "*.blade.php", "*.vue", "*.js", "*.ts", "*.jsx", "*.tsx"],
            "loaders": ["json", "php"],
            "scanners": ["php", "blade", "vue", "react"],
            "langPath": "lang"
        })
    );
    assert!(content.ends_with("}\n"));
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config("{}")?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("already exists"), "{}", stderr);
    assert_eq!(test.read_file(".langprunerc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en.json", r#"{"Used": "u", "Unused": "x"}"#),
        ("resources/views/a.blade.php", "{{ __('Used') }}"),
    ])?;

    run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    let (code, stdout, stderr) = run(test.scan_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("  • Unused (en)"), "{}", stdout);
    Ok(())
}
