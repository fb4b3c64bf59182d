//! Integration tests for `DieselUserRepository` against PostgreSQL.
//!
//! Set `USERBASE_TEST_DATABASE_URL` to run them. Every test empties the
//! `users` table, so they run serially.

use rstest::{fixture, rstest};
use serial_test::serial;
use userbase::domain::ports::UserRepository;
use userbase::domain::{FullName, NewUser, Role, UserFilter, UserId, UserPatch};
use userbase::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, bootstrap_schema,
};

mod support;

use support::test_database_url;

#[fixture]
fn alice() -> NewUser {
    NewUser::new(
        FullName::new("Alice").expect("valid name"),
        Role::new("admin").expect("valid role"),
        5,
    )
}

fn user(name: &str, role: &str, efficiency: i32) -> NewUser {
    NewUser::new(
        FullName::new(name).expect("valid name"),
        Role::new(role).expect("valid role"),
        efficiency,
    )
}

async fn fresh_repository() -> Option<DieselUserRepository> {
    let url = test_database_url()?;
    bootstrap_schema(&url).await.expect("schema bootstrap succeeds");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2).with_min_idle(None))
        .await
        .expect("pool builds");
    let repository = DieselUserRepository::new(pool);
    repository.delete_all().await.expect("table can be emptied");
    Some(repository)
}

#[rstest]
#[tokio::test]
#[serial]
async fn inserted_user_round_trips_by_id(alice: NewUser) {
    let Some(repository) = fresh_repository().await else {
        return;
    };

    let created = repository.insert(&alice).await.expect("insert succeeds");
    assert!(created.id().get() > 0);

    let fetched = repository
        .find_by_id(created.id())
        .await
        .expect("lookup succeeds");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test]
#[serial]
async fn bootstrap_is_idempotent() {
    let Some(url) = test_database_url() else {
        return;
    };

    bootstrap_schema(&url).await.expect("first bootstrap");
    bootstrap_schema(&url).await.expect("second bootstrap");
}

#[rstest]
#[tokio::test]
#[serial]
async fn role_filter_is_exact_and_ordered(alice: NewUser) {
    let Some(repository) = fresh_repository().await else {
        return;
    };

    let first = repository.insert(&alice).await.expect("insert alice");
    repository
        .insert(&user("Bob", "Admin", 3))
        .await
        .expect("insert bob");
    let third = repository
        .insert(&user("Carol", "admin", 7))
        .await
        .expect("insert carol");

    let admins = repository
        .list(&UserFilter::by_role(Role::new("admin").expect("valid role")))
        .await
        .expect("filtered list");
    assert_eq!(
        admins.iter().map(|u| u.id()).collect::<Vec<_>>(),
        vec![first.id(), third.id()]
    );

    let everyone = repository.list(&UserFilter::all()).await.expect("list");
    assert_eq!(everyone.len(), 3);
}

#[rstest]
#[tokio::test]
#[serial]
async fn update_touches_only_supplied_fields(alice: NewUser) {
    let Some(repository) = fresh_repository().await else {
        return;
    };

    let created = repository.insert(&alice).await.expect("insert");
    let updated = repository
        .update(created.id(), &UserPatch::default().with_efficiency(9))
        .await
        .expect("update succeeds")
        .expect("row exists");

    assert_eq!(updated.efficiency(), 9);
    assert_eq!(updated.full_name(), created.full_name());
    assert_eq!(updated.role(), created.role());

    let unchanged = repository
        .update(created.id(), &UserPatch::default())
        .await
        .expect("empty update succeeds");
    assert_eq!(unchanged, Some(updated));
}

#[rstest]
#[tokio::test]
#[serial]
async fn missing_rows_are_none() {
    let Some(repository) = fresh_repository().await else {
        return;
    };
    let id = UserId::new(4242).expect("positive id");

    assert_eq!(repository.find_by_id(id).await.expect("lookup"), None);
    assert_eq!(
        repository
            .update(id, &UserPatch::default().with_efficiency(1))
            .await
            .expect("update"),
        None
    );
    assert_eq!(repository.delete_by_id(id).await.expect("delete"), None);
}

#[rstest]
#[tokio::test]
#[serial]
async fn deletes_return_snapshots_and_clear_rows(alice: NewUser) {
    let Some(repository) = fresh_repository().await else {
        return;
    };

    let created = repository.insert(&alice).await.expect("insert");
    repository
        .insert(&user("Bob", "dev", 3))
        .await
        .expect("insert bob");

    let removed = repository
        .delete_by_id(created.id())
        .await
        .expect("delete succeeds");
    assert_eq!(removed, Some(created.clone()));
    assert_eq!(
        repository.find_by_id(created.id()).await.expect("lookup"),
        None
    );

    assert_eq!(repository.delete_all().await.expect("delete all"), 1);
    assert!(
        repository
            .list(&UserFilter::all())
            .await
            .expect("list")
            .is_empty()
    );
}
