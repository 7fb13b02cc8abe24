use std::fs;
use std::process::{Command, Output};

fn fixture_path() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/tests/fixtures/sample-go-module/")
}

fn inspect_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_inspect"))
}

fn run(args: &[&str]) -> Output {
    inspect_cmd()
        .args(args)
        .output()
        .expect("failed to run inspect")
}

fn packages_json(extra: &[&str]) -> serde_json::Value {
    let fixture = fixture_path();
    let mut args = vec!["packages", fixture.as_str()];
    args.extend_from_slice(extra);
    let output = run(&args);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "inspect packages failed: stdout={stdout}, stderr={stderr}"
    );
    serde_json::from_str(&stdout).expect("output should be valid JSON")
}

fn names(list: &serde_json::Value) -> Vec<&str> {
    list.as_array()
        .expect("should be an array")
        .iter()
        .map(|v| v["name"].as_str().expect("name should be a string"))
        .collect()
}

#[test]
fn test_packages_default_output() {
    let json = packages_json(&[]);
    let obj = json.as_object().expect("registry should be an object");

    let keys: Vec<_> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["store", "util"], "cmd/ and main are left out");

    let util = &json["util"];
    assert!(util.get("name").is_none());
    assert_eq!(names(&util["funcs"]), vec!["Add", "Upper", "Describe"]);
    assert_eq!(util["imports"], serde_json::json!(["fmt", "fmt", "strings"]));
    assert_eq!(
        util["funcs"][1]["documentation"],
        "Upper returns s in upper case.\n\nIt never fails."
    );
    assert_eq!(
        util["funcs"][2]["signature"],
        "func Describe(label string, value int) string"
    );
}

#[test]
fn test_packages_methods_and_interfaces() {
    let json = packages_json(&[]);
    let store = &json["store"];

    assert_eq!(names(&store["funcs"]), vec!["New", "Get", "Put", "Read"]);
    assert_eq!(
        store["funcs"][1]["signature"],
        "func (m *memStore) Get(key string) ([]byte, error)"
    );
    assert!(store["funcs"][2].get("documentation").is_none());

    assert_eq!(names(&store["interfaces"]), vec!["Getter", "Store"]);
    let iface = &store["interfaces"][1];
    assert_eq!(
        iface["embedded_interfaces"],
        serde_json::json!(["io.Reader", "Getter"])
    );
    assert_eq!(
        iface["methods"],
        serde_json::json!(["Put(key string, value []byte) error"])
    );
    assert!(store["interfaces"][0].get("embedded_interfaces").is_none());
}

#[test]
fn test_packages_unexported_filter() {
    let json = packages_json(&["--funcs", "unexported"]);
    assert_eq!(names(&json["util"]["funcs"]), vec!["debug", "lower"]);
    assert!(json["store"].get("funcs").is_none());
}

#[test]
fn test_packages_include_tests() {
    let json = packages_json(&["--include-tests"]);
    let funcs = names(&json["util"]["funcs"]);
    assert!(funcs.contains(&"TestUpper"), "test functions included: {funcs:?}");
}

#[test]
fn test_packages_include_main_and_reserved() {
    let json = packages_json(&["--include-main"]);
    assert_eq!(names(&json["main"]["funcs"]), vec!["Run"]);

    let json = packages_json(&["--include-main", "--no-reserved-dir", "--funcs", "all"]);
    let funcs = names(&json["main"]["funcs"]);
    // Root main.go, then cmd/tool/main.go appended without deduplication.
    assert_eq!(funcs, vec!["Run", "main", "main"]);
}

#[test]
fn test_packages_compact_is_single_line() {
    let output = run(&["packages", &fixture_path(), "--compact"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1, "compact output: {stdout}");
}

#[test]
fn test_packages_output_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let out = dir.path().join("packages.json");

    let output = run(&["packages", &fixture_path(), "--output", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "nothing on stdout when writing a file");

    let content = fs::read_to_string(&out).expect("output file should exist");
    let json: serde_json::Value = serde_json::from_str(&content).expect("should be valid JSON");
    assert!(json.get("store").is_some());
}

#[test]
fn test_packages_parse_failure_exits_2() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("a/a.go"), "package a\n\nfunc A() {}\n").unwrap();
    fs::write(dir.path().join("b/b.go"), "package b\n\nfunc (\n").unwrap();

    let output = run(&["packages", dir.path().to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2), "stderr={stderr}");
    assert!(stderr.contains("b.go"), "error names the file: {stderr}");
    assert!(output.stdout.is_empty());

    let output = run(&["packages", dir.path().to_str().unwrap(), "--allow-partial"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr={stderr}");
    assert!(stderr.contains("WARN"), "stderr={stderr}");
    assert!(
        stderr.contains("1 package(s) collected before the failure"),
        "stderr={stderr}"
    );
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("partial output should be valid JSON");
    assert!(json.get("a").is_some());
    assert!(json.get("b").is_none());
}

#[test]
fn test_packages_respects_config_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::create_dir_all(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib/lib.go"), "package lib\n\nfunc Pub() {}\n\nfunc priv() {}\n").unwrap();
    fs::write(
        dir.path().join(".inspect.toml"),
        "[extract]\nfuncs = \"all\"\n",
    )
    .unwrap();

    let output = run(&["packages", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names(&json["lib"]["funcs"]), vec!["Pub", "priv"]);

    // Flags win over the file.
    let output = run(&["packages", dir.path().to_str().unwrap(), "--funcs", "exported"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names(&json["lib"]["funcs"]), vec!["Pub"]);
}

#[test]
fn test_interfaces_report() {
    let output = run(&["interfaces", &fixture_path()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout={stdout}");

    assert!(stdout.contains("Package store"), "{stdout}");
    assert!(stdout.contains("Interface Store"), "{stdout}");
    assert!(stdout.contains("Implements:"));
    assert!(stdout.contains("io.Reader"));
    assert!(stdout.contains("Get(key string) ([]byte, error)"));
    assert!(!stdout.contains("Package util"), "util has no interfaces: {stdout}");
}

#[test]
fn test_file_text_report() {
    let path = format!("{}util/strings.go", fixture_path());
    let output = run(&["file", &path, "--funcs", "all"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout={stdout}");

    assert!(stdout.contains("\"util\""), "package name: {stdout}");
    assert!(stdout.contains("strings"));
    let lower = stdout.find("func lower(s string) string").expect("lower listed");
    let upper = stdout.find("func Upper(s string) string").expect("Upper listed");
    assert!(lower < upper, "unexported functions come first: {stdout}");
}

#[test]
fn test_file_json_report() {
    let path = format!("{}store/store.go", fixture_path());
    let output = run(&["file", &path, "--json", "--funcs", "exported"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(json["package"], "store");
    assert_eq!(json["imports"], serde_json::json!(["errors", "io"]));
    assert_eq!(names(&json["funcs"]), vec!["New", "Get", "Put", "Read"]);
    assert_eq!(names(&json["interfaces"]), vec!["Getter", "Store"]);
}

#[test]
fn test_file_uses_config_filter_unless_overridden() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let src = dir.path().join("lib.go");
    fs::write(&src, "package lib\n\nfunc Pub() {}\n\nfunc priv() {}\n").unwrap();
    fs::write(
        dir.path().join(".inspect.toml"),
        "[extract]\nfuncs = \"unexported\"\n",
    )
    .unwrap();

    let output = run(&["file", src.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names(&json["funcs"]), vec!["priv"]);

    let output = run(&["file", src.to_str().unwrap(), "--json", "--funcs", "all"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names(&json["funcs"]), vec!["Pub", "priv"]);
}

#[test]
fn test_file_default_filter_is_exported() {
    let path = format!("{}util/strings.go", fixture_path());
    let output = run(&["file", &path, "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names(&json["funcs"]), vec!["Upper", "Describe"]);
}

#[test]
fn test_file_missing_exits_2() {
    let output = run(&["file", "/nonexistent/path/nothing.go"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "stderr={stderr}");
}

#[test]
fn test_invalid_funcs_value_is_rejected() {
    let output = run(&["packages", &fixture_path(), "--funcs", "public"]);
    assert!(!output.status.success());
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = inspect_cmd()
        .arg("init")
        .current_dir(dir.path())
        .output()
        .expect("failed to run inspect init");
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join(".inspect.toml")).expect("config written");
    assert!(content.contains("[walk]"));
    assert!(content.contains("reserved_dir = \"cmd\""));

    let again = inspect_cmd()
        .arg("init")
        .current_dir(dir.path())
        .output()
        .expect("failed to run inspect init");
    assert_eq!(again.status.code(), Some(2), "refuses to overwrite");

    let forced = inspect_cmd()
        .args(["init", "--force"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run inspect init --force");
    assert!(forced.status.success());
}
