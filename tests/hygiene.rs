//! Hygiene: source-level checks on the server crate.
//!
//! The bootstrap in `main.rs` may `expect` on fatal startup errors, so only
//! silent discards are policed here.

use std::fs;
use std::path::Path;

fn production_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

#[test]
fn no_silent_discard() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|(name, _)| name.ends_with("main.rs")), "no sources found under src/");

    let hits: Vec<String> = files
        .iter()
        .flat_map(|(name, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains("let _ ="))
                .map(|(n, _)| format!("  {name}:{}", n + 1))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(hits.is_empty(), "`let _ =` found (inspect or log the result):\n{}", hits.join("\n"));
}
