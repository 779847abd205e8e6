#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

use std::time::Duration;

use cinefetch_api::fetch::{MediaKind, ResultRecord, fetch_batch};
use cinefetch_api::tmdb::TmdbClient;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MATRIX: &str = include_str!("../../../fixtures/tmdb/search_movie_the_matrix.json");
const BREAKING_BAD: &str = include_str!("../../../fixtures/tmdb/search_tv_breaking_bad.json");
const EMPTY: &str = include_str!("../../../fixtures/tmdb/search_empty.json");

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::builder()
        .base_url(format!("{}/3/", server.uri()).parse().unwrap())
        .api_token("test-token")
        .user_agent("test/0.0.0")
        .build()
        .unwrap()
}

fn titles(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| String::from(*v)).collect()
}

#[tokio::test]
async fn test_batch_over_http_keeps_order_and_fields() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("year", "1999"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MATRIX)
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .and(query_param("query", "Breaking Bad"))
        .and(query_param_is_missing("year"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BREAKING_BAD))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "Nonexistent Film"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // Act
    let table = fetch_batch(
        &client,
        &titles(&["The Matrix", "Breaking Bad", "Nonexistent Film"]),
        &[Some(1999), Some(2008), None],
        &[MediaKind::Movie, MediaKind::Show, MediaKind::Movie],
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(table.len(), 3);

    let matrix = &table.rows()[0];
    assert_eq!(matrix.title, "The Matrix");
    assert_eq!(matrix.year.as_deref(), Some("1999-03-31"));
    assert_eq!(matrix.provider_id, Some(603));
    assert_eq!(matrix.popularity, Some(88.512));
    assert_eq!(matrix.rating_average, Some(8.2));
    assert_eq!(matrix.rating_count, Some(25_873));

    let show = &table.rows()[1];
    assert_eq!(show.title, "Breaking Bad");
    assert_eq!(show.year.as_deref(), Some("2008-01-20"));
    assert_eq!(show.provider_id, Some(1396));

    assert_eq!(table.rows()[2], ResultRecord::no_match("Nonexistent Film"));
}

#[tokio::test]
async fn test_batch_over_http_fails_on_single_server_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("query", "broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY))
        .mount(&server)
        .await;
    let client = client_for(&server);

    // Act
    let result = fetch_batch(
        &client,
        &titles(&["fine", "broken", "also fine"]),
        &[None, None, None],
        &[MediaKind::Show, MediaKind::Show, MediaKind::Show],
    )
    .await;

    // Assert
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("lookup failed for item 1"));
    assert!(message.contains("HTTP 500"));
}

#[tokio::test]
async fn test_batch_over_http_unauthorized() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
        ))
        .mount(&server)
        .await;
    let client = client_for(&server);

    // Act
    let result = fetch_batch(&client, &titles(&["x"]), &[None], &[MediaKind::Movie]).await;

    // Assert
    assert!(format!("{:#}", result.unwrap_err()).contains("Invalid API key"));
}
