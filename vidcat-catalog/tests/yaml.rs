use vidcat_catalog::{Role, UserStatus, load_list, load_seed};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_full_seed_dir() {
    let tmp = TempDir::new().unwrap();

    write_yaml(
        tmp.path(),
        "series.yaml",
        r#"
- title: "Dominando SAP S/4HANA"
  description: "Ruta completa de S/4HANA"
- title: "Onboarding Corporativo"
"#,
    );
    write_yaml(
        tmp.path(),
        "categories.yaml",
        r#"
- SAP FI
- SAP CO
- Fiori
"#,
    );
    write_yaml(
        tmp.path(),
        "users.yaml",
        r#"
- email: admin@example.com
  client_name: Altim
  role: ADMIN
  status: ACTIVE
- email: ops@iberia.example
  client_name: Iberia
"#,
    );

    let seed = load_seed(tmp.path()).unwrap();
    assert_eq!(seed.series.len(), 2);
    assert_eq!(seed.series[0].title, "Dominando SAP S/4HANA");
    assert_eq!(seed.series[1].description, None);
    assert_eq!(seed.categories, vec!["SAP FI", "SAP CO", "Fiori"]);
    assert_eq!(seed.users.len(), 2);
    assert_eq!(seed.users[0].role, Role::Admin);
    assert_eq!(seed.users[0].status, UserStatus::Active);
    assert_eq!(seed.users[1].role, Role::Client);
    assert_eq!(seed.users[1].status, UserStatus::Pending);
}

#[test]
fn missing_files_are_empty() {
    let tmp = TempDir::new().unwrap();
    write_yaml(tmp.path(), "categories.yaml", "- General\n");

    let seed = load_seed(tmp.path()).unwrap();
    assert!(seed.series.is_empty());
    assert!(seed.users.is_empty());
    assert_eq!(seed.categories, vec!["General"]);
}

#[test]
fn missing_dir_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nonexistent");
    assert!(load_seed(&missing).is_err());
}

#[test]
fn empty_file_is_empty_list() {
    let tmp = TempDir::new().unwrap();
    write_yaml(tmp.path(), "categories.yaml", "\n");
    let names: Vec<String> = load_list(&tmp.path().join("categories.yaml")).unwrap();
    assert!(names.is_empty());
}

#[test]
fn malformed_yaml_reports_path() {
    let tmp = TempDir::new().unwrap();
    write_yaml(tmp.path(), "series.yaml", "- title: [unclosed\n");
    let err = load_seed(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("series.yaml"));
}
