//! Host onboarding lifecycle over in-memory repositories: apply, approve,
//! reject, and the stale-decision guard.

mod common;

use std::sync::Arc;

use chrono::Utc;

use common::{InMemoryApplicationRepository, InMemoryUserRepository};
use wayfare_core::hosts::{
    HostService, HostServiceTrait, NewHostApplication, User, UserRepositoryTrait,
};
use wayfare_core::notifications::{MockNotifier, Notice, NotifierTrait};
use wayfare_core::statuses::UserRole;
use wayfare_core::Error;

fn user(id: &str, role: UserRole) -> User {
    let now = Utc::now().naive_utc();
    User {
        id: id.to_string(),
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

fn service(seed: User) -> (Arc<InMemoryUserRepository>, HostService, MockNotifier) {
    let users = Arc::new(InMemoryUserRepository::with_user(seed));
    let applications = Arc::new(InMemoryApplicationRepository::new());
    let mock = MockNotifier::new();
    let notifier: Arc<dyn NotifierTrait> = Arc::new(mock.clone());
    let service = HostService::new(applications, users.clone(), notifier);
    (users, service, mock)
}

#[tokio::test]
async fn approval_promotes_the_user_and_empties_the_queue() {
    let (users, service, notifier) = service(user("usr_1", UserRole::User));

    let application = service
        .apply_for_host(NewHostApplication {
            user_id: "usr_1".to_string(),
            motivation: Some("I run treks in the Sahyadris".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(service.list_pending_applications().unwrap().len(), 1);

    service.approve_application(&application.id).await.unwrap();

    // USER -> HOST, queue drained, applicant notified.
    assert_eq!(users.get_by_id("usr_1").unwrap().role, UserRole::Host);
    assert!(service.list_pending_applications().unwrap().is_empty());
    assert_eq!(service.list_hosts().unwrap().len(), 1);
    assert!(matches!(
        &notifier.notices()[..],
        [Notice::ApplicationApproved { .. }]
    ));
}

#[tokio::test]
async fn deciding_twice_fails_with_stale_state() {
    let (_, service, _) = service(user("usr_1", UserRole::User));
    let application = service
        .apply_for_host(NewHostApplication {
            user_id: "usr_1".to_string(),
            motivation: None,
        })
        .await
        .unwrap();

    service.approve_application(&application.id).await.unwrap();
    let err = service
        .approve_application(&application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[tokio::test]
async fn rejection_keeps_the_role_and_sends_the_reason() {
    let (users, service, notifier) = service(user("usr_1", UserRole::User));
    let application = service
        .apply_for_host(NewHostApplication {
            user_id: "usr_1".to_string(),
            motivation: None,
        })
        .await
        .unwrap();

    service
        .reject_application(&application.id, Some("Incomplete profile".to_string()))
        .await
        .unwrap();

    assert_eq!(users.get_by_id("usr_1").unwrap().role, UserRole::User);
    assert!(matches!(
        &notifier.notices()[..],
        [Notice::ApplicationRejected { reason: Some(r), .. }] if r == "Incomplete profile"
    ));
}

#[tokio::test]
async fn existing_hosts_cannot_reapply() {
    let (_, service, _) = service(user("usr_1", UserRole::Host));
    let err = service
        .apply_for_host(NewHostApplication {
            user_id: "usr_1".to_string(),
            motivation: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[tokio::test]
async fn notification_failure_does_not_block_the_approval() {
    let (users, service, notifier) = service(user("usr_1", UserRole::User));
    let application = service
        .apply_for_host(NewHostApplication {
            user_id: "usr_1".to_string(),
            motivation: None,
        })
        .await
        .unwrap();

    notifier.set_failing(true);
    service.approve_application(&application.id).await.unwrap();

    // The promotion committed even though the notice was lost.
    assert_eq!(users.get_by_id("usr_1").unwrap().role, UserRole::Host);
    assert!(notifier.notices().is_empty());
}
