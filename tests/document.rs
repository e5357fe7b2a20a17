use tomlite::{parse, Array, Datetime, ErrorKind, TableArray};

#[test]
fn configuration_document() {
    let doc = parse(
        r#"
        # service configuration
        title = "demo"
        debug = false

        [server]
        host = "127.0.0.1"
        port = 8080
        timeouts = [1.5, 3.0, 6.0]

        [server.tls]
        enabled = true
        cert = 'C:\certs\demo.pem'

        [[worker]]
        name = "ingest"
        started = 2024-06-01T12:00:00Z

        [[worker]]
        name = "compact"
        started = 2024-06-01T12:30:00.250000Z
        "#,
    )
    .unwrap();

    assert_eq!(doc.get_as::<&str>("title"), Some("demo"));
    assert_eq!(doc.get_as::<bool>("debug"), Some(false));
    assert_eq!(doc.get_qualified_as::<&str>("server.host"), Some("127.0.0.1"));
    assert_eq!(doc.get_qualified_as::<i64>("server.port"), Some(8080));
    assert_eq!(
        doc.get_qualified_as::<&Array>("server.timeouts")
            .unwrap()
            .values_as::<f64>(),
        vec![Some(1.5), Some(3.0), Some(6.0)]
    );
    assert_eq!(doc.get_qualified_as::<bool>("server.tls.enabled"), Some(true));
    // literal string: backslashes survive untouched
    assert_eq!(
        doc.get_qualified_as::<&str>("server.tls.cert"),
        Some(r"C:\certs\demo.pem")
    );

    let workers = doc.get_as::<&TableArray>("worker").unwrap();
    assert_eq!(workers.len(), 2);
    assert_eq!(workers.get(0).unwrap().get_as::<&str>("name"), Some("ingest"));
    let started = workers.get(1).unwrap().get_as::<Datetime>("started").unwrap();
    assert_eq!(started.microsecond, 250000);
}

#[test]
fn round_trip_through_printer() {
    let input = r#"
        count = 3
        [outer]
        label = "x"
        [outer.inner]
        flag = true
        values = [[1], [2, 3]]
        [[entries]]
        id = 1
        [[entries]]
        id = 2
        "#;
    let first = parse(input).unwrap();
    let second = parse(&tomlite::ser::to_string(&first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn first_error_aborts_with_line() {
    let err = parse("ok = 1\nbad = [1, \"two\"]\n").unwrap_err();
    match err {
        tomlite::Error::Parse(e) => {
            assert_eq!(e.kind(), ErrorKind::ArrayHeterogeneous);
            assert_eq!(e.line(), 2);
            assert_eq!(e.to_string(), "line 2: mixed value types in array");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = tomlite::parse_file("definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, tomlite::Error::Io(_)));
    assert!(err.to_string().contains("definitely/not/here.toml"));
}
