use newsfeed_core::ArticlesResponse;

#[test]
fn decodes_newsapi_payload() {
    let body = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": "bbc-news", "name": "BBC News"},
                "author": null,
                "title": "Headline",
                "description": "Short",
                "url": "https://bbc.example/1",
                "urlToImage": "https://bbc.example/1.jpg",
                "publishedAt": "2024-05-01T10:00:00Z",
                "content": null
            },
            {
                "source": {"id": null, "name": "Somewhere"},
                "title": null,
                "url": "https://somewhere.example/2"
            }
        ]
    }"#;

    let response: ArticlesResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.total_results, Some(2));
    let articles = response.into_articles();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].source_name(), Some("BBC News"));
    assert_eq!(articles[0].body_text(), "Short");
    assert!(articles[0].published_at.is_some());
    assert_eq!(articles[1].title, "");
    assert_eq!(articles[1].body_text(), "No content available.");
}

#[test]
fn missing_article_list_is_empty_result() {
    let response: ArticlesResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
    assert!(response.into_articles().is_empty());
}

#[test]
fn articles_without_url_are_dropped_not_fatal() {
    let body = r#"{
        "status": "ok",
        "articles": [
            {"title": "Removed", "url": null},
            {"title": "No link"},
            {"title": "Kept", "url": "https://kept.example/1"}
        ]
    }"#;

    let response: ArticlesResponse = serde_json::from_str(body).unwrap();
    let articles = response.into_articles();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Kept");
}
