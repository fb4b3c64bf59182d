//! Tests for the user domain service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, FullName, Role};

fn user_id(raw: i32) -> UserId {
    UserId::new(raw).expect("valid id")
}

#[fixture]
fn alice() -> User {
    User::new(
        user_id(1),
        FullName::new("Alice").expect("valid name"),
        Role::new("admin").expect("valid role"),
        5,
    )
}

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_returns_the_stored_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .withf(|user| user.full_name().as_str() == "Alice" && user.efficiency() == 5)
        .times(1)
        .returning(|user| Ok(user.clone().into_user(user_id(1))));

    let new_user = NewUser::new(
        FullName::new("Alice").expect("valid name"),
        Role::new("admin").expect("valid role"),
        5,
    );
    let created = service(repo)
        .create_user(new_user)
        .await
        .expect("create succeeds");

    assert_eq!(created.id(), user_id(1));
    assert_eq!(created.role().as_str(), "admin");
}

#[rstest]
#[tokio::test]
async fn get_maps_missing_row_to_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = service(repo)
        .get_user(user_id(99))
        .await
        .expect_err("missing user");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), USER_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn get_returns_the_stored_user(alice: User) {
    let mut repo = MockUserRepository::new();
    let stored = alice.clone();
    repo.expect_find_by_id()
        .withf(|id| id.get() == 1)
        .return_once(move |_| Ok(Some(stored)));

    let found = service(repo).get_user(user_id(1)).await.expect("found");
    assert_eq!(found, alice);
}

#[rstest]
#[tokio::test]
async fn list_passes_the_filter_through(alice: User) {
    let mut repo = MockUserRepository::new();
    let stored = alice.clone();
    repo.expect_list()
        .withf(|filter| filter.role().map(Role::as_str) == Some("admin"))
        .return_once(move |_| Ok(vec![stored]));

    let filter = UserFilter::by_role(Role::new("admin").expect("valid role"));
    let users = service(repo).list_users(&filter).await.expect("list");
    assert_eq!(users, vec![alice]);
}

#[rstest]
#[tokio::test]
async fn update_and_delete_report_missing_rows() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().return_once(|_, _| Ok(None));
    repo.expect_delete_by_id().return_once(|_| Ok(None));
    let service = service(repo);

    let update_err = service
        .update_user(user_id(7), UserPatch::default().with_efficiency(9))
        .await
        .expect_err("missing user");
    let delete_err = service
        .delete_user(user_id(7))
        .await
        .expect_err("missing user");

    assert_eq!(update_err.code(), ErrorCode::NotFound);
    assert_eq!(delete_err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_returns_the_pre_deletion_snapshot(alice: User) {
    let mut repo = MockUserRepository::new();
    let stored = alice.clone();
    repo.expect_delete_by_id()
        .return_once(move |_| Ok(Some(stored)));

    let deleted = service(repo)
        .delete_user(user_id(1))
        .await
        .expect("delete succeeds");
    assert_eq!(deleted, alice);
}

#[rstest]
#[case(UserPersistenceError::connection("pool timed out"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn persistence_failures_are_redacted(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert().return_once(move |_| Err(failure));

    let new_user = NewUser::new(
        FullName::new("Alice").expect("valid name"),
        Role::new("admin").expect("valid role"),
        5,
    );
    let err = service(repo)
        .create_user(new_user)
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), expected);
    assert_eq!(err.message(), "Failed to create user");
}

#[rstest]
#[tokio::test]
async fn delete_all_maps_failures_with_its_own_message() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete_all()
        .return_once(|| Err(UserPersistenceError::query("lock timeout")));

    let err = service(repo)
        .delete_all_users()
        .await
        .expect_err("store failure");
    assert_eq!(err.message(), "Failed to delete all users");
}

#[rstest]
#[tokio::test]
async fn read_failures_name_the_read_that_failed() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .return_once(|_| Err(UserPersistenceError::connection("connection refused")));
    repo.expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::query("syntax error")));
    let service = service(repo);

    let list_err = service
        .list_users(&UserFilter::all())
        .await
        .expect_err("list fails");
    let get_err = service.get_user(user_id(1)).await.expect_err("get fails");

    assert_eq!(list_err.message(), "Failed to get users");
    assert_eq!(list_err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(get_err.message(), "Failed to get user");
    assert_eq!(get_err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn delete_all_succeeds_on_empty_store() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete_all().times(1).return_once(|| Ok(0));

    service(repo)
        .delete_all_users()
        .await
        .expect("delete all succeeds");
}
