use hashnav_engine::{parse_index, ArticleDescriptor, IndexError};

#[test]
fn parses_bare_array_index() {
    let json = r#"[{"url": "https://blog.test/html/a.html"}, {"url": "https://blog.test/html/b.html"}]"#;
    let articles = parse_index(json).expect("parse");
    assert_eq!(
        articles,
        vec![
            ArticleDescriptor {
                url: "https://blog.test/html/a.html".to_string()
            },
            ArticleDescriptor {
                url: "https://blog.test/html/b.html".to_string()
            },
        ]
    );
}

#[test]
fn parses_wrapped_index() {
    let json = r#"{"articles": [{"url": "https://blog.test/html/a.html"}]}"#;
    let articles = parse_index(json).expect("parse");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].url, "https://blog.test/html/a.html");
}

#[test]
fn ignores_extra_descriptor_fields() {
    let json = r#"[{"url": "https://blog.test/html/a.html", "title": "A", "date": "2021-03-01"}]"#;
    let articles = parse_index(json).expect("parse");
    assert_eq!(articles[0].url, "https://blog.test/html/a.html");
}

#[test]
fn rejects_malformed_json() {
    let err = parse_index("{not json").unwrap_err();
    assert!(matches!(err, IndexError::Parse { .. }));
}

#[test]
fn rejects_unknown_document_shape() {
    let err = parse_index(r#"{"items": []}"#).unwrap_err();
    assert!(matches!(err, IndexError::Parse { .. }));
}
