use expect_test::expect;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("script-analyzer-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn offset_must_fit_the_text() {
    assert_eq!(checked_offset("abc", 3), Ok(TextSize::from(3)));
    assert_eq!(
        checked_offset("abc", 4),
        Err(OffsetError::BeyondText {
            offset: 4,
            len: 3,
        })
    );
    assert_eq!(
        checked_offset("é", 1),
        Err(OffsetError::NotCharBoundary {
            offset: 1,
        })
    );
}

#[test]
fn errors_render_readably() {
    let error = CliError::from(OffsetError::BeyondText {
        offset: 9,
        len: 2,
    });
    assert_eq!(error.to_string(), "offset 9 is past the end of the text (2 bytes)");
    assert!(std::error::Error::source(&error).is_some());

    let missing = read_source(Path::new("/definitely/not/here.ts")).unwrap_err();
    assert!(matches!(missing, CliError::Io { .. }));
    assert!(missing.to_string().starts_with("failed to read /definitely/not/here.ts"));
}

#[test]
fn snapshot_rendering() {
    let tree = SyntaxTree::parse("const x = 1;");
    let x = crate::position::token_at(&tree, TextSize::from(6), Default::default(), EngineKind::Fast).snapshot(&tree);

    assert_eq!(render_snapshot(Some(&x), OutputFormat::Text).unwrap(), r#"Ident@5..7 "x""#);
    assert_eq!(render_snapshot(None, OutputFormat::Text).unwrap(), "none");
    assert_eq!(render_snapshot(None, OutputFormat::Json).unwrap(), "null");
    let json = render_snapshot(Some(&x), OutputFormat::Json).unwrap();
    assert!(json.contains(r#""fullStart": 5"#));
}

#[test]
fn children_of_call_under_argument() {
    let tree = SyntaxTree::parse("f(a, b);");
    expect![[r#"
        CallExpr@0..7
          Ident@0..1 "f"
          LParen@1..2 "("
          SyntaxList@2..6
          RParen@6..7 ")"
    "#]]
    .assert_eq(&render_children(&tree, TextSize::from(3)));
}

#[test]
fn containing_node_of_offset_past_statements() {
    let tree = SyntaxTree::parse("a;  ");
    assert_eq!(containing_node(&tree, TextSize::from(4)), tree.root());
}

#[test]
fn collects_only_script_sources() {
    let dir = scratch_dir("collect");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("b.ts"), "b;").unwrap();
    std::fs::write(dir.join("nested/a.ts"), "a;").unwrap();
    std::fs::write(dir.join("notes.md"), "# notes").unwrap();

    let files = collect_sources(&dir);
    assert_eq!(files, vec![dir.join("b.ts"), dir.join("nested/a.ts")]);
    assert_eq!(collect_sources(&dir.join("b.ts")), vec![dir.join("b.ts")]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn verify_checks_every_offset() {
    let dir = scratch_dir("verify");
    std::fs::write(dir.join("one.ts"), "const x = 1;").unwrap();
    std::fs::write(dir.join("two.ts"), "f(a, b);\n").unwrap();

    let report = verify(&dir, &SearchSettings::default(), false).unwrap();
    assert!(report.is_clean(), "{}", report.summary());
    assert_eq!(report.skipped, 0);
    let offsets: Vec<u32> = report.files.iter().map(|file| file.offsets).collect();
    assert_eq!(offsets, vec![13, 10]);
    assert_eq!(report.stats.queries, (13 + 10) * 9);
    assert!(report.summary().ends_with("checked 2 file(s), 0 divergence(s), 0 whitelisted, 0 skipped"));

    let _ = std::fs::remove_dir_all(&dir);
}
