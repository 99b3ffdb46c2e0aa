use pakt_config::{CompilerSettings, ConfigError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_workspace_tsconfig_chain_with_comments() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tsconfig.base.json"),
        r#"{
            // shared by every project
            "compilerOptions": {
                "importHelpers": true,
                "target": "es2015",
                "paths": { "@acme/*": ["libs/*/src/index.ts"] },
            },
        }"#,
    )
    .unwrap();

    let project = dir.path().join("apps/api");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("tsconfig.json"),
        r#"{ "extends": "../../tsconfig.base.json", "compilerOptions": { "strict": true } }"#,
    )
    .unwrap();
    fs::write(
        project.join("tsconfig.app.json"),
        r#"{
            "extends": "./tsconfig.json",
            /* app overrides */
            "compilerOptions": { "outDir": "../../dist/out-tsc" }
        }"#,
    )
    .unwrap();

    let settings = CompilerSettings::load(&project.join("tsconfig.app.json")).unwrap();
    assert!(settings.import_helpers());
    assert_eq!(settings.bool_option("strict"), Some(true));
    assert_eq!(settings.option("target").unwrap(), "es2015");
    assert_eq!(settings.option("outDir").unwrap(), "../../dist/out-tsc");
}

#[test]
fn test_error_messages_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsconfig.json");
    fs::write(&path, "[1, 2").unwrap();

    let err = CompilerSettings::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCompilerSettings { .. }));
    assert!(err.to_string().contains("tsconfig.json"));
}
