//! Full request flows against the in-memory store: no scripting, real
//! create/read/update/delete lifecycles over HTTP.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{auth_token, TestApp};

#[tokio::test]
async fn attack_lifecycle() -> Result<()> {
    let (base_url, client) = TestApp::spawn_memory().await?;
    let token = auth_token();

    // Create
    let res = client
        .post(format!("{}/attacks", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Hydro Pump", "typeId": 1, "damages": 110 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(
        created,
        json!({ "id": 1, "name": "Hydro Pump", "typeId": 1, "damages": 110 })
    );

    // Read back, twice - identical responses without intervening mutation
    let first = client
        .get(format!("{}/attacks/1", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let second = client
        .get(format!("{}/attacks/1", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(first, created);
    assert_eq!(first, second);

    // Partial update leaves unspecified fields untouched
    let res = client
        .patch(format!("{}/attacks/1", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Thunder" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "id": 1, "name": "Thunder", "typeId": 1, "damages": 110 })
    );

    // Delete, then the id is gone
    let res = client
        .delete(format!("{}/attacks/1", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(format!("{}/attacks/1", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn patching_a_missing_attack_is_not_found() -> Result<()> {
    let (base_url, client) = TestApp::spawn_memory().await?;

    let res = client
        .patch(format!("{}/attacks/999", base_url))
        .header("Authorization", format!("Bearer {}", auth_token()))
        .json(&json!({ "name": "Thunder" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Attack not found" })
    );
    Ok(())
}

#[tokio::test]
async fn resource_families_do_not_interfere() -> Result<()> {
    let (base_url, client) = TestApp::spawn_memory().await?;
    let token = auth_token();

    let res = client
        .post(format!("{}/attacks", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Thunderbolt", "typeId": 1, "damages": 90 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/decks", base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Electric Deck", "ownerId": 1, "cards": [1] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let attacks = client
        .get(format!("{}/attacks", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let decks = client
        .get(format!("{}/decks", base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(attacks.as_array().unwrap().len(), 1);
    assert_eq!(decks.as_array().unwrap().len(), 1);
    assert_eq!(decks[0]["cards"], json!([1]));
    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_row_surfaces_as_storage_failure() -> Result<()> {
    let (base_url, client) = TestApp::spawn_memory().await?;

    // No pre-existence check on delete: the store's rejection maps to 500
    let res = client
        .delete(format!("{}/attacks/999", base_url))
        .header("Authorization", format!("Bearer {}", auth_token()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Failed to delete the attack" })
    );
    Ok(())
}
