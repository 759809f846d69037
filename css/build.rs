use std::{
    env, fs,
    path::{Path, PathBuf},
};

use theme_tokens_core::{build_token_set, Registry};

fn main() {
    let tokens_dir = Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap()).join("../tokens");
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let build_path = out_dir.join("sets");

    let mut sets = fs::read_dir(&tokens_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    sets.sort();

    let registry = Registry::with_builtins();
    let mut css = vec![];
    let mut scss = vec![];
    for set in &sets {
        let written = build_token_set(&registry, set, &tokens_dir, &build_path)
            .unwrap_or_else(|err| panic!("token set {set}: {err}"));
        for path in written {
            let text = fs::read_to_string(&path).unwrap();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("css") => css.push(text),
                Some("scss") if !text.is_empty() => scss.push(text),
                _ => {}
            }
        }
    }

    fs::write(out_dir.join("theme_tokens.css"), css.join("\n")).unwrap();
    fs::write(out_dir.join("theme_tokens.scss"), scss.join("\n")).unwrap();
    println!("cargo:rerun-if-changed=../tokens");
    println!("cargo:rerun-if-changed=build.rs");
}
