//! Full store lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every store
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, response parsing, and local state patching work end-to-end with
//! the server's actual payloads (UUID ids, decimal strings, timestamps).

use std::cell::RefCell;
use std::rc::Rc;

use campaign_core::{
    CampaignClient, CampaignPatch, CampaignStatus, CampaignStore, NewCampaign, Settings, StoreEvent, UreqTransport,
};
use mock_server::{ListShape, ServerConfig};

/// Serve the mock API on a random port from a background thread and return
/// its base URL.
fn start_server(config: ServerConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::serve(listener, &config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn store_for(base_url: &str) -> CampaignStore<UreqTransport> {
    CampaignStore::new(CampaignClient::new(base_url), UreqTransport::new())
}

#[test]
fn crud_lifecycle() {
    let base_url = start_server(ServerConfig::default());
    let settings = Settings::new(&base_url).unwrap();
    let mut store = CampaignStore::from_settings(&settings);

    // Step 1: fetch on an empty server.
    assert!(store.fetch_campaigns().is_empty());
    assert!(store.error().is_none());

    // Step 2: create two campaigns.
    let created = store
        .create_campaign(&NewCampaign {
            name: "Integration test".to_string(),
            budget: 100.0,
            spend: 50.0,
            status: CampaignStatus::Active,
        })
        .expect("create should succeed");
    assert!(created.is_persisted());
    assert!(created.created_at.is_some());
    let second = store
        .create_campaign(&NewCampaign {
            name: "Second".to_string(),
            budget: 10.0,
            spend: 0.0,
            status: CampaignStatus::Paused,
        })
        .unwrap();
    assert_eq!(store.campaigns().len(), 2);
    assert_eq!(store.total_budget(), 110.0);
    assert_eq!(store.total_spend(), 50.0);

    // Step 3: update spend only; the other campaign is untouched.
    let updated = store
        .update_campaign(
            &created.id,
            &CampaignPatch {
                spend: Some(75.25),
                ..CampaignPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Integration test");
    assert_eq!(updated.spend, 75.25);
    assert_eq!(store.find(&second.id), Some(&second));
    assert_eq!(store.total_spend(), 75.25);

    // Step 4: refetch. Server order is newest first, local state agrees.
    let fetched = store.fetch_campaigns();
    let ids: Vec<&str> = fetched.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), created.id.as_str()]);
    assert_eq!(store.find(&created.id).unwrap().spend, 75.25);

    // Step 5: delete.
    assert!(store.delete_campaign(&created.id));
    assert!(store.find(&created.id).is_none());
    assert_eq!(store.campaigns().len(), 1);

    // Step 6: a second delete is a 404 and leaves state unchanged.
    assert!(!store.delete_campaign(&created.id));
    assert_eq!(store.error(), Some("API error: 404"));
    assert_eq!(store.campaigns().len(), 1);

    // Step 7: refetch clears the error and matches local state.
    assert_eq!(store.fetch_campaigns(), store.campaigns().to_vec());
    assert!(store.error().is_none());
}

#[test]
fn bare_list_shape_is_accepted() {
    let base_url = start_server(ServerConfig {
        list_shape: ListShape::Bare,
        seed_sample_data: true,
    });
    let mut store = store_for(&base_url);

    let campaigns = store.fetch_campaigns();
    assert_eq!(campaigns.len(), 5);
    assert_eq!(store.total_budget(), 32000.0);
    assert_eq!(store.total_spend(), 20250.0);
}

#[test]
fn server_validation_failure_surfaces_as_error() {
    let base_url = start_server(ServerConfig::default());
    let mut store = store_for(&base_url);

    let result = store.create_campaign(&NewCampaign {
        name: "Overdrawn".to_string(),
        budget: -1.0,
        spend: 0.0,
        status: CampaignStatus::Active,
    });

    assert!(result.is_none());
    assert_eq!(store.error(), Some("API error: 400"));
    assert!(store.campaigns().is_empty());
}

#[test]
fn unreachable_server_is_a_recorded_failure() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut store = store_for(&format!("http://{addr}"));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    assert!(store.fetch_campaigns().is_empty());
    assert!(store.error().unwrap().starts_with("network error"));
    assert!(!store.is_loading());
    assert_eq!(events.borrow().first(), Some(&StoreEvent::LoadingChanged(true)));
    assert_eq!(events.borrow().last(), Some(&StoreEvent::LoadingChanged(false)));
}
