//! Embeds the duel word lists
//!
//! Each list is checked with the same rules the runtime loader applies, but a
//! malformed entry fails the build instead of being skipped.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const WORD_LEN: usize = 5;

struct List {
    source: &'static str,
    target: &'static str,
    name: &'static str,
    doc: &'static str,
}

const LISTS: [List; 2] = [
    List {
        source: "data/answers.txt",
        target: "answers.rs",
        name: "ANSWERS",
        doc: "Words that can be chosen as a duel secret",
    },
    List {
        source: "data/allowed.txt",
        target: "allowed.rs",
        name: "ALLOWED",
        doc: "All words accepted as guesses",
    },
];

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));

    for list in &LISTS {
        println!("cargo:rerun-if-changed={}", list.source);
        let content = fs::read_to_string(list.source)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", list.source));
        let words = checked_words(list.source, &content);
        write_list(&out_dir.join(list.target), list, &words);
    }
}

/// Lowercased entries in file order, first occurrence wins
fn checked_words(source: &str, content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for (number, line) in content.lines().enumerate() {
        let entry = line.split('#').next().unwrap_or_default().trim();
        if entry.is_empty() {
            continue;
        }
        assert!(
            entry.len() == WORD_LEN && entry.bytes().all(|b| b.is_ascii_alphabetic()),
            "{source}:{}: {entry:?} is not a {WORD_LEN}-letter word",
            number + 1
        );
        let word = entry.to_ascii_lowercase();
        if seen.insert(word.clone()) {
            words.push(word);
        } else {
            println!("cargo:warning={source}:{}: duplicate {word:?} dropped", number + 1);
        }
    }
    assert!(!words.is_empty(), "{source} has no words");
    words
}

fn write_list(path: &Path, list: &List, words: &[String]) {
    let List { name, doc, .. } = list;
    let count = words.len();

    let mut code = format!("// Generated from {}, {count} words\n\n", list.source);
    let _ = writeln!(code, "/// {doc}");
    let _ = writeln!(code, "pub const {name}: &[&str] = &[");
    for word in words {
        let _ = writeln!(code, "    {word:?},");
    }
    let _ = writeln!(code, "];\n");
    let _ = writeln!(code, "/// Number of entries in [`{name}`]");
    let _ = writeln!(code, "pub const {name}_COUNT: usize = {count};");

    fs::write(path, code).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
}
