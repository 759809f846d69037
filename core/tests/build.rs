use std::fs;

use theme_tokens_core::{
    build_platform, build_token_set, export_platform, BuildConfig, FileConfig, PlatformConfig,
    Registry, TokenError, TokenValue, WEB_PLATFORM,
};

const GLOBAL: &str = r##"{
  "color": {
    "base": {
      "all": {
        "background": {
          "button": {
            "primary": {
              "default": { "value": "#1A73E8", "type": "color" },
              "hover": { "value": "{color.base.all.background.button.primary.default}", "type": "color" }
            }
          }
        }
      }
    }
  },
  "spacing": {
    "base": {
      "all": {
        "size": {
          "small": { "value": "8" },
          "medium": { "value": 16 }
        }
      }
    }
  },
  "shadow": {
    "base": {
      "all": {
        "dropShadow": {
          "card": {
            "value": { "x": 2, "y": 4, "blur": 6, "spread": 0, "color": "#FF00807F" },
            "type": "dropShadow"
          }
        }
      }
    }
  },
  "motion": {
    "base": {
      "all": {
        "transition": {
          "fade": {
            "default": {
              "function": { "value": "0.4,0,0.2,1", "type": "transition" },
              "duration": { "value": 300, "type": "transition" }
            }
          }
        }
      }
    }
  },
  "font": {
    "base": {
      "all": {
        "typography": {
          "heading": {
            "value": { "fontWeight": "Bold", "fontSize": 32, "fontFamily": "Inter" },
            "type": "typography"
          }
        }
      }
    }
  }
}"##;

#[test]
fn builds_all_outputs_for_a_token_set() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(tokens.path().join("global.json"), GLOBAL).unwrap();

    let registry = Registry::with_builtins();
    let written = build_token_set(&registry, "global", tokens.path(), output.path()).unwrap();
    let names = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(names, ["global.css", "global.scss", "global.transition.css"]);

    let css = fs::read_to_string(output.path().join("global.css")).unwrap();
    assert!(css.starts_with(".global {\n"));
    assert!(css.contains("  --color-base-all-background-button-primary-default: #1a73e8;\n"));
    assert!(css.contains("  --color-base-all-background-button-primary-hover: #1a73e8;\n"));
    assert!(css.contains("  --spacing-base-all-size-small: 8px;\n"));
    assert!(css.contains("  --spacing-base-all-size-medium: 16px;\n"));
    assert!(css.contains(
        "  --shadow-base-all-drop-shadow-card: 2px 4px 6px 0px rgba(255, 0, 128, 0.49);\n"
    ));
    assert!(!css.contains("heading"));

    let scss = fs::read_to_string(output.path().join("global.scss")).unwrap();
    assert_eq!(
        scss,
        "@mixin font-base-all-typography-heading {\n  font-family: \"Inter\", sans-serif;\n  font-weight: bold;\n  font-size: 2rem;\n}\n"
    );

    let transition = fs::read_to_string(output.path().join("global.transition.css")).unwrap();
    assert!(transition
        .contains("--motion-base-all-transition-fade-default: cubic-bezier(0.4,0,0.2,1) 300ms;"));
}

#[test]
fn composites_with_referencing_fields_are_still_transformed() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        tokens.path().join("refs.json"),
        r##"{
  "color": { "base": { "all": { "shadow": { "value": "#00000080", "type": "color" } } } },
  "sizing": { "base": { "all": { "font": { "value": "16", "type": "sizing" } } } },
  "shadow": {
    "base": {
      "all": {
        "card": {
          "value": { "x": 0, "y": 2, "blur": 4, "spread": 0, "color": "{color.base.all.shadow}" },
          "type": "dropShadow"
        }
      }
    }
  },
  "font": {
    "base": {
      "all": {
        "typography": {
          "body": {
            "value": { "fontFamily": "Inter", "fontSize": "{sizing.base.all.font}" },
            "type": "typography"
          }
        }
      }
    }
  }
}"##,
    )
    .unwrap();

    build_token_set(&Registry::with_builtins(), "refs", tokens.path(), output.path()).unwrap();

    let css = fs::read_to_string(output.path().join("refs.css")).unwrap();
    assert!(css.contains("  --color-base-all-shadow: rgba(0, 0, 0, 0.5);\n"));
    assert!(css.contains("  --sizing-base-all-font: 16px;\n"));
    assert!(css.contains("  --shadow-base-all-card: 0px 2px 4px 0px rgba(0, 0, 0, 0.5);\n"));

    let scss = fs::read_to_string(output.path().join("refs.scss")).unwrap();
    assert_eq!(
        scss,
        "@mixin font-base-all-typography-body {\n  font-family: \"Inter\", sans-serif;\n  font-size: 1rem;\n}\n"
    );
}

#[test]
fn malformed_referenced_shadow_color_is_rejected() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        tokens.path().join("refs.json"),
        r##"{
  "alpha": { "value": "#0000008" },
  "shadow": {
    "card": {
      "value": { "x": 0, "y": 2, "blur": 4, "spread": 0, "color": "{alpha}" },
      "type": "dropShadow"
    }
  }
}"##,
    )
    .unwrap();

    let err = build_token_set(&Registry::with_builtins(), "refs", tokens.path(), output.path())
        .unwrap_err();
    assert!(matches!(
        err,
        TokenError::MalformedShadowColor { token, color } if token == "shadow-card" && color == "#0000008"
    ));
}

#[test]
fn rebuilding_is_byte_identical() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(tokens.path().join("global.json"), GLOBAL).unwrap();
    let registry = Registry::with_builtins();

    let read_all = || {
        build_token_set(&registry, "global", tokens.path(), output.path())
            .unwrap()
            .iter()
            .map(|path| fs::read_to_string(path).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(read_all(), read_all());
}

#[test]
fn malformed_shadow_aborts_without_output() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        tokens.path().join("broken.json"),
        r##"{ "shadow": { "card": {
            "value": { "x": 0, "y": 1, "blur": 2, "spread": 0, "color": "#FFF" },
            "type": "dropShadow"
        } } }"##,
    )
    .unwrap();

    let build_path = output.path().join("out");
    let err = build_token_set(
        &Registry::with_builtins(),
        "broken",
        tokens.path(),
        &build_path,
    )
    .unwrap_err();
    match err {
        TokenError::MalformedShadowColor { token, color } => {
            assert_eq!(token, "shadow-card");
            assert_eq!(color, "#FFF");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!build_path.exists());
}

#[test]
fn explicit_config_merges_sources_and_chains_rem() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        tokens.path().join("base.json"),
        r#"{ "spacing": { "gap": { "value": "24" }, "pad": { "value": "8" } } }"#,
    )
    .unwrap();
    fs::write(
        tokens.path().join("override.json"),
        r#"{ "spacing": { "pad": { "value": "32" } } }"#,
    )
    .unwrap();

    let config = BuildConfig::from_json(
        "config.json",
        &format!(
            r#"{{
                "source": [{base:?}, {over:?}],
                "platforms": {{
                    "web": {{
                        "transforms": ["attribute/extendedCti", "name/cti/kebab", "sizes/pxToRem"],
                        "buildPath": {out:?},
                        "prefix": "acme",
                        "files": [{{ "destination": "vars.css", "format": "css/variables" }}]
                    }}
                }}
            }}"#,
            base = tokens.path().join("base.json"),
            over = tokens.path().join("override.json"),
            out = output.path(),
        ),
    )
    .unwrap();

    let registry = Registry::with_builtins();
    let dictionary = export_platform(&registry, &config, WEB_PLATFORM).unwrap();
    assert_eq!(
        dictionary.get("spacing.pad").unwrap().value,
        TokenValue::Text("2rem".to_string())
    );

    build_platform(&registry, &config, WEB_PLATFORM).unwrap();
    let css = fs::read_to_string(output.path().join("vars.css")).unwrap();
    assert_eq!(
        css,
        ":root {\n  --acme-spacing-gap: 1.5rem;\n  --acme-spacing-pad: 2rem;\n}\n"
    );
}

#[test]
fn unknown_format_fails_before_writing() {
    let tokens = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(tokens.path().join("a.json"), r#"{ "x": { "value": 1 } }"#).unwrap();

    let mut config = BuildConfig::for_token_set("a", tokens.path(), output.path());
    config.platforms.insert(
        "print".to_string(),
        PlatformConfig {
            build_path: output.path().to_path_buf(),
            files: vec![
                FileConfig::new("a.css", "css/variables"),
                FileConfig::new("a.pdf", "pdf/nope"),
            ],
            ..Default::default()
        },
    );
    let err = build_platform(&Registry::with_builtins(), &config, "print").unwrap_err();
    assert!(matches!(err, TokenError::UnknownFormat(name) if name == "pdf/nope"));
    assert!(!output.path().join("a.css").exists());
}
