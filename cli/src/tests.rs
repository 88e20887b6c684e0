use super::*;
use std::io::Cursor;
use tempfile::tempdir;

fn parse_render(args: &[&str]) -> RenderArgs {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("parse cli");
    match cli.command {
        Command::Render(args) => args,
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn parses_render_args() {
    let args = parse_render(&[
        "fontload", "-vv", "render", "-p", "bunny", "-s", "family=Fira Sans", "--set", "subsets=[\"latin\"]",
        "--json",
    ]);

    assert_eq!(args.provider.as_deref(), Some("bunny"));
    assert_eq!(args.set.len(), 2);
    assert!(args.json);
    assert!(!args.html);
}

#[test]
fn json_and_html_conflict() {
    let parse = Cli::try_parse_from(["fontload", "render", "--json", "--html"]);
    assert!(parse.is_err());
}

#[test]
fn assignments_parse_json_with_string_fallback() {
    assert_eq!(
        parse_assignment("weight=700").expect("number"),
        ("weight".to_string(), Value::from(700))
    );
    assert_eq!(
        parse_assignment("weights=[\"400\",\"700\"]").expect("array"),
        ("weights".to_string(), serde_json::json!(["400", "700"]))
    );
    assert_eq!(
        parse_assignment("version=6.4.0").expect("string"),
        ("version".to_string(), Value::from("6.4.0"))
    );
    assert_eq!(
        parse_assignment("css=a=b").expect("split on first ="),
        ("css".to_string(), Value::from("a=b"))
    );
    assert!(parse_assignment("family").is_err());
    assert!(parse_assignment("=Roboto").is_err());
}

#[test]
fn set_pairs_override_config_file() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("font.json");
    fs::write(&path, r#"{"family": "Roboto", "display": "block"}"#).expect("write config");

    let request = build_request(
        Some(&path),
        &["display=swap".to_string()],
        Cursor::new(Vec::new()),
    )
    .expect("request");

    assert!(request.key_equals("family", "Roboto"));
    assert!(request.key_equals("display", "swap"));
}

#[test]
fn reads_config_from_stdin() {
    let stdin = Cursor::new(br#"{"kitId": "abc1234"}"#.to_vec());
    let request = build_request(Some(Path::new("-")), &[], stdin).expect("request");
    assert!(request.key_equals("kitId", "abc1234"));
}

#[test]
fn invalid_config_reports_path() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("broken.json");
    fs::write(&path, "[1, 2]").expect("write config");

    let err = build_request(Some(&path), &[], Cursor::new(Vec::new())).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn render_binds_after_links_load() {
    let request = FontRequest::new()
        .with("family", "Roboto")
        .with("use", ".my-class");
    let report = render(None, request, false).expect("render");

    assert_eq!(report.provider, Provider::Google);
    assert!(report.html.contains("<link rel=\"stylesheet\""));
    assert!(report.html.contains("id=\"font-style--my-class\""));
}

#[test]
fn render_surfaces_failed_links() {
    let request = FontRequest::new().with("url", "https://cdn.example/icons.css");
    let err = render(None, request, true).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("loading font via custom"), "{message}");
    assert!(message.contains("https://cdn.example/icons.css"), "{message}");
}

#[test]
fn writes_plain_report_for_inline_css() {
    let request = FontRequest::new()
        .with("name", "Brand")
        .with("src", "brand.otf")
        .with("use", "body");
    let report = render(Some("selfhosted"), request, false).expect("render");

    let mut buf = Cursor::new(Vec::new());
    write_plain(&report, &mut buf).expect("write");
    let output = String::from_utf8(buf.into_inner()).expect("utf8");

    assert!(output.starts_with("provider: custom\ninline css:\n  @font-face {"));
    assert!(output.contains("format('opentype')"));
    assert!(output.contains("binding: body -> Brand"));
}

#[test]
fn writes_html_with_root_classes() {
    let request = FontRequest::new()
        .with("iconSet", "solid")
        .with("use", ".fa-ready");
    let report = render(None, request, false).expect("render");

    let mut buf = Cursor::new(Vec::new());
    write_html(&report, &mut buf).expect("write");
    let output = String::from_utf8(buf.into_inner()).expect("utf8");

    assert!(output.contains("font-awesome/6.5.1/css/all.min.css"));
    assert!(output.ends_with("<!-- root classes: fa-ready -->\n"));
}

#[test]
fn provider_table_covers_every_provider() {
    let table = provider_table();
    assert_eq!(table.len(), Provider::ALL.len());
    assert!(table
        .iter()
        .any(|row| row.provider == Provider::Adobe && row.aliases.contains(&"tk")));
}
