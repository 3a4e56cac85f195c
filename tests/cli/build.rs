use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const CONFIG: &str = r#"{
  "project": "Demo",
  "version": "1.0",
  "copyright": "2024, Demo Authors"
}"#;

const INDEX: &str = r#"{
  "source": "index.rst",
  "toc": [
    { "type": "toctree", "caption": "Contents", "line": 5,
      "entries": [
        { "target": "guide/start" },
        { "title": "Getting started", "target": "guide/start" }
      ] }
  ],
  "body": [
    { "type": "section", "line": 1, "children": [
      { "type": "title", "text": "Welcome", "line": 1 },
      { "type": "paragraph", "text": "This is the\nhome page.", "line": 3 },
      { "type": "substitution_definition", "line": 9, "children": [
        { "type": "paragraph", "text": "Product name", "line": 9 }
      ] },
      { "type": "paragraph", "text": "Welcome", "line": 11 }
    ] }
  ]
}"#;

const START: &str = r#"{
  "source": "guide/start.rst",
  "body": [
    { "type": "paragraph", "text": "Install the package.", "line": 3 }
  ]
}"#;

const EXPECTED_INDEX_POT: &str = r##"# SOME DESCRIPTIVE TITLE.
# Copyright (C) 2024, Demo Authors
# This file is distributed under the same license as the Demo package.
# FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.
#
#, fuzzy
msgid ""
msgstr ""
"Project-Id-Version: Demo 1.0\n"
"Report-Msgid-Bugs-To: \n"
"POT-Creation-Date: 2023-11-14 22:13+0000\n"
"PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\n"
"Last-Translator: FULL NAME <EMAIL@ADDRESS>\n"
"Language-Team: LANGUAGE <LL@li.org>\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"

#: ../../index.rst:5
msgid "Contents"
msgstr ""

#: ../../index.rst:5
msgid "Getting started"
msgstr ""

#: ../../index.rst:1
#: ../../index.rst:11
msgid "Welcome"
msgstr ""

#: ../../index.rst:3
msgid "This is the home page."
msgstr ""
"##;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(".potgenrc.json", CONFIG)?;
    test.write_file("index.doctree.json", INDEX)?;
    test.write_file("guide/start.doctree.json", START)?;
    Ok(test)
}

#[test]
fn test_build_writes_catalogs() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ guide.pot  1 message
    ✓ index.pot  4 messages
    ✓ Built 2 catalogs from 2 documents and 0 templates (2 written, 0 unchanged)

    ----- stderr -----
    ");

    assert_eq!(test.read_file("_build/gettext/index.pot")?, EXPECTED_INDEX_POT);
    let guide = test.read_file("_build/gettext/guide.pot")?;
    assert!(guide.ends_with("#: ../../guide/start.rst:3\nmsgid \"Install the package.\"\nmsgstr \"\"\n"));

    Ok(())
}

#[test]
fn test_rebuild_leaves_unchanged_catalogs_alone() -> Result<()> {
    let test = project()?;
    test.build_command().output()?;

    assert_cmd_snapshot!(test.build_command().env("SOURCE_DATE_EPOCH", "1800000000"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Built 2 catalogs from 2 documents and 0 templates (0 written, 2 unchanged)

    ----- stderr -----
    ");
    // The old creation date is kept because the file was not rewritten.
    assert_eq!(test.read_file("_build/gettext/index.pot")?, EXPECTED_INDEX_POT);

    // A moved paragraph changes a location and rewrites only that catalog.
    test.write_file("guide/start.doctree.json", &START.replace("\"line\": 3", "\"line\": 4"))?;
    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ guide.pot  1 message
    ✓ Built 2 catalogs from 2 documents and 0 templates (1 written, 1 unchanged)

    ----- stderr -----
    ");
    assert!(test.read_file("_build/gettext/guide.pot")?.contains("#: ../../guide/start.rst:4\n"));

    Ok(())
}

#[test]
fn test_build_verbose_lists_unchanged_catalogs() -> Result<()> {
    let test = project()?;
    test.build_command().output()?;

    // Keep debug logging out of the snapshot.
    assert_cmd_snapshot!(test.build_command().arg("--verbose").env("RUST_LOG", "off"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    = guide.pot  1 message (unchanged)
    = index.pot  4 messages (unchanged)
    ✓ Built 2 catalogs from 2 documents and 0 templates (0 written, 2 unchanged)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_build_with_templates() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".potgenrc.json",
        r#"{ "project": "Demo", "templatesPath": ["_templates"] }"#,
    )?;
    test.write_file(
        "_templates/layout.html",
        "<title>{{ _('Search') }}</title>\n{% trans %}Hello {{ user }}{% endtrans %}\n",
    )?;

    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ guide.pot      1 message
    ✓ index.pot      4 messages
    ✓ templates.pot  2 messages
    ✓ Built 3 catalogs from 2 documents and 1 template (3 written, 0 unchanged)

    ----- stderr -----
    ");

    let templates = test.read_file("_build/gettext/templates.pot")?;
    assert!(templates.contains("#: ../../_templates/layout.html:1\nmsgid \"Search\"\n"));
    assert!(templates.contains("#: ../../_templates/layout.html:2\nmsgid \"Hello %(user)s\"\n"));

    Ok(())
}

#[test]
fn test_broken_template_aborts_build() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".potgenrc.json",
        r#"{ "templatesPath": ["_templates"] }"#,
    )?;
    test.write_file("_templates/broken.html", "{% trans %}never closed\n")?;

    let root = test.root_pattern();
    insta::with_settings!({filters => vec![(root.as_str(), "[PROJECT]")]}, {
        assert_cmd_snapshot!(test.build_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: [PROJECT]/_templates/broken.html: line 1: unclosed trans block
        ");
    });
    assert!(!test.root().join("_build").exists());

    Ok(())
}

#[test]
fn test_compact_domain_and_output_override() -> Result<()> {
    let test = project()?;
    test.write_file(".potgenrc.json", r#"{ "compact": "docs" }"#)?;

    assert_cmd_snapshot!(test.build_command().args(["--output-dir", "locale/pot"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ docs.pot  5 messages
    ✓ Built 1 catalog from 2 documents and 0 templates (1 written, 0 unchanged)

    ----- stderr -----
    ");

    let docs = test.read_file("locale/pot/docs.pot")?;
    assert!(docs.contains("msgid \"Install the package.\""));
    assert!(docs.contains("msgid \"Welcome\""));
    assert!(!test.root().join("_build").exists());

    Ok(())
}

#[test]
fn test_output_dir_outside_project() -> Result<()> {
    let test = CliTest::new()?;
    // The project lives in `p/`; catalogs go next to it.
    test.write_file("p/.git/HEAD", "")?;
    test.write_file("p/.potgenrc.json", r#"{ "outputDir": "../out" }"#)?;
    test.write_file(
        "p/index.doctree.json",
        r#"{ "source": "index.rst", "body": [{ "type": "paragraph", "text": "Home", "line": 1 }] }"#,
    )?;

    test.build_command().current_dir(test.root().join("p")).output()?;
    let index = test.read_file("out/index.pot")?;
    assert!(index.contains("#: ../p/index.rst:1\nmsgid \"Home\"\n"), "{}", index);

    Ok(())
}

#[test]
fn test_show_ids() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".potgenrc.json",
        r#"{ "showLocations": false, "showIds": true }"#,
    )?;

    test.build_command().output()?;
    let first = test.read_file("_build/gettext/guide.pot")?;
    assert!(!first.contains("start.rst"));
    let id_lines: Vec<&str> = first.lines().filter(|l| l.starts_with("#: ")).collect();
    assert_eq!(id_lines.len(), 1);
    assert_eq!(id_lines[0].len(), "#: ".len() + 32);

    // Stable ids: rebuilding into a fresh directory gives the same catalog.
    test.build_command().args(["--output-dir", "again"]).output()?;
    assert_eq!(test.read_file("again/guide.pot")?, first);

    Ok(())
}

#[test]
fn test_invalid_config_value() -> Result<()> {
    let test = project()?;
    test.write_file(".potgenrc.json", r#"{ "showLocations": "yes" }"#)?;

    let root = test.root_pattern();
    insta::with_settings!({filters => vec![(root.as_str(), "[PROJECT]")]}, {
        assert_cmd_snapshot!(test.build_command(), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to parse config file: "[PROJECT]/.potgenrc.json": Invalid value for 'showLocations': expected boolean, found "yes"
        "#);
    });

    Ok(())
}

#[test]
fn test_invalid_source_date_epoch() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.build_command().env("SOURCE_DATE_EPOCH", "yesterday"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: invalid SOURCE_DATE_EPOCH value: "yesterday"
    "#);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());
    let help = String::from_utf8(output.stdout)?;
    assert!(help.contains("build"));
    assert!(help.contains("init"));

    Ok(())
}
