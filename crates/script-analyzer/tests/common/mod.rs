#![allow(dead_code)]

use std::path::PathBuf;

use script_analyzer::{Element, SyntaxKind, SyntaxTree};
use text_size::TextSize;

/// Small sources exercising the corners of the position search: missing
/// nodes, empty lists, trailing trivia and doc comments.
pub const INLINE_SOURCES: &[&str] = &[
    "",
    "   ",
    "// c",
    "a",
    "const x = 1;",
    "f();",
    "f(,)",
    "f(a, b, );",
    "x as number",
    "let a = [1, , 2];",
    "class A { static #n = 1; m(x?: number): void {} }",
    "if (a) b(); else { c = d ? e : f; }",
    "while (i < 10) i++;",
    "const g = (a, b) => { return a + b; };",
    "new Foo.Bar(1).baz?.qux[0];",
    "/** doc */\nfunction f() {}",
    "/** @param {string} s text */\nexport function g(s: string) {}\n",
    "a; // trailing comment\n",
    "const = ;",
    "function (",
];

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(fixtures_root())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .collect();
    paths.sort();
    paths
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_root().join(name)).expect("fixture must exist")
}

/// Every fixture and inline source, labelled for assertion messages.
pub fn corpus() -> Vec<(String, String)> {
    let mut sources: Vec<(String, String)> = fixture_paths()
        .into_iter()
        .map(|path| {
            let text = std::fs::read_to_string(&path).expect("fixture must be readable");
            (path.display().to_string(), text)
        })
        .collect();
    sources.extend(INLINE_SOURCES.iter().enumerate().map(|(i, text)| (format!("inline #{i}"), text.to_string())));
    sources
}

/// All offsets `0..=len` on char boundaries.
pub fn offsets(text: &str) -> impl Iterator<Item = TextSize> + '_ {
    (0..=text.len()).filter(|&i| text.is_char_boundary(i)).map(|i| TextSize::from(i as u32))
}

pub fn offset_of(
    text: &str,
    needle: &str,
) -> TextSize {
    TextSize::from(text.find(needle).expect("needle must occur") as u32)
}

pub fn accepts_closing_paren(
    tree: &SyntaxTree,
    element: &Element,
) -> bool {
    element.kind(tree) == SyntaxKind::RParen
}
