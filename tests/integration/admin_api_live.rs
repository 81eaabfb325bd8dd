//! Tests against a running circulation server

use circulation_admin::{config::AdminApiConfig, services::AdminClient};

fn client() -> AdminClient {
    let config = AdminApiConfig {
        base_url: std::env::var("CIRCULATION_ADMIN_URL")
            .unwrap_or_else(|_| "http://localhost:6500".to_string()),
        ..Default::default()
    };
    AdminClient::new(&config).expect("Failed to build admin client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_fetch_lanes() {
    let tree = client().fetch_lanes().await.expect("Failed to fetch lanes");

    for (_, lane) in tree.iter() {
        for sublane in &lane.sublanes {
            assert_eq!(tree.parent_of(Some(sublane)).map(|p| p.id), Some(lane.id));
        }
    }
}

#[tokio::test]
#[ignore]
async fn test_fetch_custom_lists() {
    let lists = client()
        .fetch_custom_lists()
        .await
        .expect("Failed to fetch custom lists");

    assert!(lists.iter().all(|list| list.entry_count >= 0));
}
