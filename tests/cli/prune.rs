use anyhow::Result;

use crate::{CliTest, run};

fn project() -> Result<CliTest> {
    CliTest::with_files(&[
        (
            "lang/en/messages.php",
            "<?php\n\nreturn [\n    'welcome' => 'Welcome',\n    'unused' => 'Not used',\n];\n",
        ),
        (
            "lang/en/legacy.php",
            "<?php\n\nreturn [\n    'nested' => [\n        'child' => 'value',\n    ],\n];\n",
        ),
        ("lang/en.json", "{\n    \"Hello\": \"Hello\",\n    \"Goodbye\": \"Goodbye\"\n}\n"),
        (
            "lang/en/auth.php",
            "<?php return ['failed' => 'These credentials do not match our records.'];",
        ),
        ("app/page.php", "<?php __('messages.welcome'); __('Hello');"),
    ])
}

#[test]
fn test_prune_is_dry_run_by_default() -> Result<()> {
    let test = project()?;
    let before = [
        test.read_file("lang/en/messages.php")?,
        test.read_file("lang/en/legacy.php")?,
        test.read_file("lang/en.json")?,
    ];

    let (code, stdout, _) = run(test.prune_command())?;

    assert_eq!(code, 0);
    assert!(
        stdout.contains(
            "Found 3 unused translation entries:\n  • Goodbye (en)\n  • legacy.nested.child (en)\n  • messages.unused (en)\n"
        ),
        "{}",
        stdout
    );
    assert!(stdout.contains("Would delete 3 entries."));
    assert!(stdout.contains("Run with --apply to delete these keys."));

    let after = [
        test.read_file("lang/en/messages.php")?,
        test.read_file("lang/en/legacy.php")?,
        test.read_file("lang/en.json")?,
    ];
    assert_eq!(after, before);
    Ok(())
}

#[test]
fn test_prune_apply_removes_keys() -> Result<()> {
    let test = project()?;

    let (code, stdout, _) = run({
        let mut cmd = test.prune_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Deleted 3 unused translation entries."), "{}", stdout);

    assert_eq!(
        test.read_file("lang/en/messages.php")?,
        "<?php\n\nreturn [\n    'welcome' => 'Welcome',\n];\n"
    );
    assert_eq!(test.read_file("lang/en.json")?, "{\n    \"Hello\": \"Hello\"\n}\n");
    assert!(!test.exists("lang/en/legacy.php"));
    // protected by the default exclusions
    assert!(test.exists("lang/en/auth.php"));
    Ok(())
}

#[test]
fn test_prune_apply_twice() -> Result<()> {
    let test = project()?;
    let apply = || {
        let mut cmd = test.prune_command();
        cmd.arg("--apply");
        cmd
    };

    run(apply())?;
    let (code, stdout, _) = run(apply())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ No unused translations to remove!"), "{}", stdout);
    Ok(())
}

#[test]
fn test_prune_nothing_to_remove() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en.json", r#"{"Hello": "Hello"}"#),
        ("resources/views/a.blade.php", "@lang('Hello')"),
    ])?;

    let (code, stdout, _) = run(test.prune_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("No unused translations to remove!"));
    Ok(())
}

#[test]
fn test_prune_with_path_and_empty_exclude() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "lang/en/validation.php",
            "<?php return ['required' => 'Required', 'email' => 'Email'];",
        ),
        ("src/form.php", "<?php __('validation.required');"),
    ])?;
    test.write_config(r#"{ "exclude": [] }"#)?;

    let (code, stdout, _) = run({
        let mut cmd = test.prune_command();
        cmd.args(["--apply", "--path", "src"]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("  • validation.email (en)"), "{}", stdout);
    assert_eq!(
        test.read_file("lang/en/validation.php")?,
        "<?php\n\nreturn [\n    'required' => 'Required',\n];\n"
    );
    Ok(())
}

#[test]
fn test_prune_vue_and_react_usages() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "lang/en.json",
            r#"{"vue.title": "t", "react.title": "t", "orphan": "o"}"#,
        ),
        (
            "resources/js/Pages/Home.vue",
            "<template><h1>{{ $t('vue.title') }}</h1></template>",
        ),
        (
            "resources/js/components/Header.tsx",
            "export const Header = () => <h1>{t(\"react.title\")}</h1>;",
        ),
        ("node_modules/pkg/index.js", "t('orphan')"),
    ])?;

    let (code, stdout, _) = run({
        let mut cmd = test.prune_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("  • orphan (en)"), "{}", stdout);
    assert!(stdout.contains("Deleted 1 unused translation entry."));
    assert_eq!(
        test.read_file("lang/en.json")?,
        "{\n    \"vue.title\": \"t\",\n    \"react.title\": \"t\"\n}\n"
    );
    Ok(())
}
