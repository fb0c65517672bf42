mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn create_links_teacher_to_creator() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;

    let res = client
        .post(server.teachers_url(""))
        .json(&json!({
            "name": "Jane Doe",
            "phone": "5551234567",
            "email": "jane@x.com",
            "creator": user.id.to_string(),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    let teacher = &body["teacher"];
    assert_eq!(teacher["creator"], json!(user.id.to_string()));
    assert_eq!(teacher["name"], "Jane Doe");
    assert_eq!(teacher["email"], "jane@x.com");

    let tid: Uuid = teacher["id"].as_str().unwrap_or_default().parse()?;
    assert_eq!(server.user(&user).await?.teacher, vec![tid]);

    let listed = client
        .get(server.teachers_url(&format!("/user/{}", user.id)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(listed["teacher"], json!([teacher]));

    Ok(())
}

#[tokio::test]
async fn create_rejects_incomplete_input() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;

    let res = client
        .post(server.teachers_url(""))
        .json(&json!({ "name": "Jane Doe", "phone": "5551234567", "creator": user.id.to_string() }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Invalid inputs passed, please check your data.");
    assert_eq!(body["field_errors"]["email"], "is required");

    assert_eq!(server.store.teacher_count().await, 0);
    assert!(server.user(&user).await?.teacher.is_empty());

    Ok(())
}

#[tokio::test]
async fn create_rejects_unreadable_body() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.teachers_url(""))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .post(server.teachers_url(""))
        .json(&json!({ "name": "Jane", "phone": 5551234567_u64, "email": "jane@x.com", "creator": Uuid::new_v4() }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn create_with_unknown_creator_is_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.teachers_url(""))
        .json(&json!({
            "name": "Jane Doe",
            "phone": "5551234567",
            "email": "jane@x.com",
            "creator": Uuid::new_v4().to_string(),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Could not find user for provided id.");
    assert_eq!(server.store.teacher_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn update_changes_only_name_and_phone() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;
    let created = server.create_teacher(&client, &user, "Jane Doe").await?;
    let tid = created["id"].as_str().unwrap_or_default().to_string();

    let res = client
        .patch(server.teachers_url(&format!("/{}", tid)))
        .json(&json!({
            "name": "Jane Smith",
            "phone": "5559876543",
            "email": "ignored@x.com",
            "creator": Uuid::new_v4().to_string(),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let updated = &body["teacher"];
    assert_eq!(updated["name"], "Jane Smith");
    assert_eq!(updated["phone"], "5559876543");
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["creator"], created["creator"]);
    assert_eq!(updated["id"], created["id"]);

    let fetched = client
        .get(server.teachers_url(&format!("/{}", tid)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(&fetched["teacher"], updated);

    Ok(())
}

#[tokio::test]
async fn update_with_short_phone_is_422_and_mutates_nothing() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;
    let created = server.create_teacher(&client, &user, "Jane Doe").await?;
    let tid = created["id"].as_str().unwrap_or_default().to_string();

    let res = client
        .patch(server.teachers_url(&format!("/{}", tid)))
        .json(&json!({ "name": "Jane Smith", "phone": "555" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["field_errors"]["phone"], "must be at least 10 characters");

    let fetched = client
        .get(server.teachers_url(&format!("/{}", tid)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["teacher"], created);

    Ok(())
}

#[tokio::test]
async fn update_unknown_teacher_is_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(server.teachers_url(&format!("/{}", Uuid::new_v4())))
        .json(&json!({ "name": "Jane Smith", "phone": "5559876543" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_removes_teacher_and_back_reference() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;
    let keep = server.create_teacher(&client, &user, "John Roe").await?;
    let doomed = server.create_teacher(&client, &user, "Jane Doe").await?;
    let tid = doomed["id"].as_str().unwrap_or_default().to_string();

    let res = client.delete(server.teachers_url(&format!("/{}", tid))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Deleted teacher.");

    let res = client.get(server.teachers_url(&format!("/{}", tid))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let remaining: Vec<String> = server
        .user(&user)
        .await?
        .teacher
        .iter()
        .map(Uuid::to_string)
        .collect();
    assert_eq!(remaining, vec![keep["id"].as_str().unwrap_or_default().to_string()]);

    Ok(())
}

#[tokio::test]
async fn deleting_last_teacher_empties_user_listing() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let user = server.seed_user("Ada").await?;
    let created = server.create_teacher(&client, &user, "Jane Doe").await?;
    let tid = created["id"].as_str().unwrap_or_default().to_string();

    let res = client.delete(server.teachers_url(&format!("/{}", tid))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(server.teachers_url(&format!("/user/{}", user.id)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_unknown_teacher_is_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(server.teachers_url(&format!("/{}", Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Could not find teacher for this id.");

    Ok(())
}
