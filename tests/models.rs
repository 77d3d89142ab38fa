use portfolio_server::models::{RatingsRecord, SourceState, SourceStatus};
use portfolio_server::types::{PlayerStats, ProfileRecord, RepoId, RepositoryRecord};
use serde_json::json;

#[test]
fn test_repository_from_api_json() {
    let repo: RepositoryRecord = serde_json::from_value(json!({
        "id": 123456,
        "name": "finnacle",
        "full_name": "Tushar-Pandey-31/finnacle",
        "description": "Paper trading on Spring Boot microservices",
        "html_url": "https://github.com/Tushar-Pandey-31/finnacle",
        "stargazers_count": 12,
        "language": "Java",
        "topics": ["kafka", "spring-boot"],
        "fork": false,
        "owner": { "login": "Tushar-Pandey-31" },
        "watchers_count": 12
    }))
    .expect("Failed to parse repository");

    assert_eq!(repo.id, RepoId::Number(123456));
    assert_eq!(repo.full_name, "Tushar-Pandey-31/finnacle");
    assert_eq!(repo.topics, vec!["kafka", "spring-boot"]);
    assert!(repo.search_text().contains("microservices"));
    assert!(repo.search_text().contains("kafka"));
}

#[test]
fn test_repository_missing_optional_fields() {
    let repo: RepositoryRecord = serde_json::from_value(json!({
        "id": 1,
        "name": "bare",
        "html_url": "https://github.com/octocat/bare",
        "description": null,
        "language": null
    }))
    .expect("Failed to parse repository");

    assert_eq!(repo.stargazers_count, 0);
    assert!(repo.topics.is_empty());
    assert!(!repo.fork);
    assert_eq!(repo.full_name, "");
    assert_eq!(repo.search_text().trim(), "bare");
}

#[test]
fn test_repository_list_with_null_names() {
    let repos: Vec<RepositoryRecord> = serde_json::from_value(json!([
        {
            "id": 1,
            "name": "toy",
            "full_name": null,
            "html_url": "https://github.com/octocat/toy",
            "stargazers_count": 3
        },
        {
            "id": 2,
            "name": null,
            "full_name": "octocat/unnamed",
            "html_url": "https://github.com/octocat/unnamed",
            "stargazers_count": null,
            "topics": null,
            "fork": null
        }
    ]))
    .expect("Failed to parse repository list");

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].full_name, "");
    assert_eq!(repos[0].stargazers_count, 3);
    assert_eq!(repos[1].name, "");
    assert_eq!(repos[1].full_name, "octocat/unnamed");
    assert_eq!(repos[1].stargazers_count, 0);
    assert!(repos[1].topics.is_empty());
    assert!(!repos[1].fork);
}

#[test]
fn test_synthetic_id_round_trips_as_string() {
    let value = serde_json::to_value(RepoId::Key("finnacle-live".to_string())).unwrap();
    assert_eq!(value, json!("finnacle-live"));
    let value = serde_json::to_value(RepoId::Number(5)).unwrap();
    assert_eq!(value, json!(5));
}

#[test]
fn test_profile_is_passed_through() {
    let profile: ProfileRecord = serde_json::from_value(json!({
        "login": "octocat",
        "followers": 10,
        "bio": null
    }))
    .unwrap();

    assert_eq!(profile.login(), Some("octocat"));
    assert_eq!(profile.0["followers"], json!(10));
}

#[test]
fn test_ratings_from_stats() {
    let stats: PlayerStats = serde_json::from_value(json!({
        "chess_blitz": { "last": { "rating": 1320 } },
        "chess_bullet": {}
    }))
    .unwrap();

    let ratings = RatingsRecord::from(&stats);
    assert_eq!(ratings, RatingsRecord { rapid: None, blitz: Some(1320), bullet: None });
}

#[test]
fn test_source_state_transitions() {
    let mut state: SourceState<u32> = SourceState::loading();
    assert_eq!(state.status(), SourceStatus::Loading);

    state.settle(Ok(7));
    assert_eq!(state.status(), SourceStatus::Ready);
    assert_eq!(state.data, Some(7));

    state.settle(Err("ratings fetch failed".to_string()));
    assert_eq!(state.status(), SourceStatus::Failed);
    assert!(state.data.is_none());
    assert!(!state.loading);
}
