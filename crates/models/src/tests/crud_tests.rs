use anyhow::Result;
use sea_orm::EntityTrait;

use super::{sample_home, seed_realtor, setup_test_db};
use crate::{home, image, user};

#[tokio::test]
async fn test_user_create_and_lookup() -> Result<()> {
    let db = setup_test_db().await?;

    let created = seed_realtor(&db, "realtor@example.com").await?;
    assert_eq!(created.user_type, user::UserType::Realtor);

    let found = user::find_by_email(&db, "realtor@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(user::find_by_email(&db, "nobody@example.com").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_user_email_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let first = seed_realtor(&db, "dup@example.com").await?;
    let again = user::NewUser {
        name: first.name,
        phone: first.phone,
        email: first.email,
        password_hash: first.password,
        user_type: user::UserType::Buyer,
    };
    let err = user::create(&db, again).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_user_rejects_invalid_email() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(seed_realtor(&db, "not-an-email").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_home_create_persists_one_image_per_url() -> Result<()> {
    let db = setup_test_db().await?;
    let realtor = seed_realtor(&db, "r@example.com").await?;

    let urls = vec!["https://img/1.png".to_string(), "https://img/2.png".to_string()];
    let (h, images) = home::create_with_images(&db, realtor.id, sample_home("Toronto", 300_000.0), &urls).await?;

    assert_eq!(h.realtor_id, realtor.id);
    assert_eq!(images.len(), 2);
    assert!(images.iter().all(|i| i.home_id == h.id));
    assert_eq!(image::urls_for_home(&db, h.id).await?, urls);
    Ok(())
}

#[tokio::test]
async fn test_home_partial_update() -> Result<()> {
    let db = setup_test_db().await?;
    let realtor = seed_realtor(&db, "r@example.com").await?;
    let (h, _) = home::create_with_images(&db, realtor.id, sample_home("Toronto", 100.0), &[]).await?;

    let updated = home::apply_changes(
        &db,
        h.id,
        home::HomeChanges { price: Some(250.0), property_type: Some(home::PropertyType::Condo), ..Default::default() },
    )
    .await?
    .expect("home exists");

    assert_eq!(updated.price, 250.0);
    assert_eq!(updated.property_type, home::PropertyType::Condo);
    assert_eq!(updated.city, "Toronto");
    assert_eq!(updated.address, h.address);
    Ok(())
}

#[tokio::test]
async fn test_home_update_missing_returns_none() -> Result<()> {
    let db = setup_test_db().await?;
    let res = home::apply_changes(&db, 4242, home::HomeChanges { city: Some("X".into()), ..Default::default() }).await?;
    assert!(res.is_none());
    assert!(home::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_first_url_per_home() -> Result<()> {
    let db = setup_test_db().await?;
    let realtor = seed_realtor(&db, "r@example.com").await?;
    let (a, _) = home::create_with_images(
        &db,
        realtor.id,
        sample_home("Toronto", 1.0),
        &["https://img/a1.png".to_string(), "https://img/a2.png".to_string()],
    )
    .await?;
    let (b, _) = home::create_with_images(&db, realtor.id, sample_home("Ottawa", 2.0), &[]).await?;

    let first = image::first_url_per_home(&db, &[a.id, b.id]).await?;
    assert_eq!(first.get(&a.id).map(String::as_str), Some("https://img/a1.png"));
    assert!(!first.contains_key(&b.id));
    assert!(image::first_url_per_home(&db, &[]).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_realtor_id_of() -> Result<()> {
    let db = setup_test_db().await?;
    let realtor = seed_realtor(&db, "r@example.com").await?;
    let (h, _) = home::create_with_images(&db, realtor.id, sample_home("Toronto", 1.0), &[]).await?;
    assert_eq!(home::realtor_id_of(&db, h.id).await?, Some(realtor.id));
    assert_eq!(home::realtor_id_of(&db, h.id + 1).await?, None);
    Ok(())
}
