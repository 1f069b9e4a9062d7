//! Collects `description.md` files from each tool directory into a generated
//! lookup table so tool descriptions live next to their implementation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let tools_dir = manifest_dir.join("src").join("mcp").join("tools");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));

    println!("cargo:rerun-if-changed={}", tools_dir.display());

    let mut entries = Vec::new();
    collect_descriptions(&tools_dir, &mut entries);
    entries.sort();

    let mut generated = String::new();
    generated.push_str("/// Tool descriptions keyed by `<noun>_<verb>`, generated by build.rs\n");
    generated.push_str(
        "pub fn get_tool_descriptions() -> HashMap<&'static str, &'static str> {\n",
    );
    generated.push_str("    let mut descriptions = HashMap::new();\n");
    for (key, path) in &entries {
        println!("cargo:rerun-if-changed={}", path.display());
        generated.push_str(&format!(
            "    descriptions.insert({key:?}, include_str!({:?}));\n",
            path.display().to_string()
        ));
    }
    generated.push_str("    descriptions\n}\n");

    fs::write(out_dir.join("tool_descriptions.rs"), generated)
        .expect("failed to write tool_descriptions.rs");
}

fn collect_descriptions(tools_dir: &Path, entries: &mut Vec<(String, PathBuf)>) {
    let Ok(nouns) = fs::read_dir(tools_dir) else {
        return;
    };
    for noun in nouns.flatten() {
        let noun_path = noun.path();
        if !noun_path.is_dir() {
            continue;
        }
        let Ok(verbs) = fs::read_dir(&noun_path) else {
            continue;
        };
        for verb in verbs.flatten() {
            let description = verb.path().join("description.md");
            if description.is_file() {
                let key = format!(
                    "{}_{}",
                    noun.file_name().to_string_lossy(),
                    verb.file_name().to_string_lossy()
                );
                entries.push((key, description));
            }
        }
    }
}
