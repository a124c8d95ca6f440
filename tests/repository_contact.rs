use chrono::NaiveDate;
use contacts_api::domain::entities::{ContactData, ContactFilter, NewUser, Role};
use contacts_api::domain::repositories::{ContactRepository, UserRepository};
use contacts_api::error::AppError;
use contacts_api::infrastructure::persistence::{PgContactRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn create_owner(pool: &Arc<PgPool>, username: &str) -> i64 {
    PgUserRepository::new(pool.clone())
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            avatar: None,
            role: Role::User,
            is_email_confirmed: true,
        })
        .await
        .unwrap()
        .id
}

fn data(first_name: &str, email: &str, phone: &str) -> ContactData {
    ContactData {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        address: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_scoped_by_owner(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgContactRepository::new(pool);

    let contact = repo
        .create(alice, data("Grace", "grace@navy.mil", "+1 555 0100"))
        .await
        .unwrap();

    assert_eq!(contact.user_id, alice);
    assert!(repo.find(alice, contact.id).await.unwrap().is_some());
    assert!(repo.find(bob, contact.id).await.unwrap().is_none());
    assert!(
        repo.update(bob, contact.id, data("X", "x@example.com", "+1 000"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!repo.delete(bob, contact.id).await.unwrap());
    assert!(repo.delete(alice, contact.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unique_per_owner(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgContactRepository::new(pool);

    repo.create(alice, data("Grace", "grace@navy.mil", "+1 555 0100"))
        .await
        .unwrap();

    let duplicate = repo
        .create(alice, data("Other", "grace@navy.mil", "+1 555 0199"))
        .await;
    match duplicate {
        Err(AppError::Conflict { details, .. }) => {
            assert_eq!(details["constraint"], "contacts_user_email_key")
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    assert!(
        repo.create(bob, data("Grace", "grace@navy.mil", "+1 555 0100"))
            .await
            .is_ok()
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_replaces_all_fields(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let repo = PgContactRepository::new(pool);

    let mut original = data("Grace", "grace@navy.mil", "+1 555 0100");
    original.address = Some("Arlington".to_string());
    let contact = repo.create(alice, original).await.unwrap();

    let updated = repo
        .update(alice, contact.id, data("Grace", "hopper@navy.mil", "+1 555 0101"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.email, "hopper@navy.mil");
    assert_eq!(updated.phone, "+1 555 0101");
    assert!(updated.address.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_filters_escape_wildcards(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let repo = PgContactRepository::new(pool);

    repo.create(alice, data("Ada", "ada@example.com", "+44 100"))
        .await
        .unwrap();
    repo.create(alice, data("Grace", "grace@navy.mil", "+1 555 0100"))
        .await
        .unwrap();
    repo.create(alice, data("A_lan", "alan@example.com", "+44 200"))
        .await
        .unwrap();

    let filter = ContactFilter {
        email: Some("EXAMPLE".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.list(alice, filter, 0, 10).await.unwrap().len(), 2);

    let filter = ContactFilter {
        first_name: Some("_".to_string()),
        ..Default::default()
    };
    let found = repo.list(alice, filter, 0, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "A_lan");

    let page = repo
        .list(alice, ContactFilter::default(), 1, 1)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].first_name, "Grace");

    assert_eq!(repo.list_all(alice).await.unwrap().len(), 3);
    assert_eq!(repo.count().await.unwrap(), 3);
}
