//! End-to-end scenarios: value owner custody, removal and operation dispatch

use assert_matches::assert_matches;
use ledger_authorization::{
    AuthError, AuthErrorKind, ScopeAuthorizer, ScopeOperation, ScopeTransition,
};
use ledger_core::{Party, PartyRole};
use ledger_testkit::{init_test_tracing, new_scope_id, signers, TestLedger};

#[test]
fn test_owner_adds_data_access_by_full_write() {
    init_test_tracing();
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());

    let scope_id = new_scope_id();
    let existing = ledger.scope(&scope_id).owner(&users.user1).build();
    let proposed = ledger
        .scope(&scope_id)
        .owner(&users.user1)
        .data_access(&users.user2)
        .build();

    assert!(authorizer
        .validate_update(Some(&existing), &proposed, &signers(&[&users.user1]))
        .is_ok());
}

#[test]
fn test_assigning_marker_needs_deposit() {
    let mut ledger = TestLedger::new();
    let user1 = ledger.users.user1.clone();
    let marker = ledger.add_marker::<&str>("testcoin", &[]);
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());

    let scope_id = new_scope_id();
    let existing = ledger.scope(&scope_id).owner(&user1).build();
    let proposed = ledger
        .scope(&scope_id)
        .owner(&user1)
        .value_owner(&marker)
        .build();

    let err = authorizer
        .validate_update(Some(&existing), &proposed, &signers(&[&user1]))
        .unwrap_err();
    assert_eq!(err, AuthError::NoDepositAuthority { marker });
    assert_eq!(err.kind(), AuthErrorKind::Authority);
}

#[test]
fn test_withdraw_holder_takes_value_from_marker() {
    let mut ledger = TestLedger::new();
    let user1 = ledger.users.user1.clone();
    let marker = ledger.add_marker("testcoin", &[(user1.as_str(), "withdraw")]);
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());

    let scope_id = new_scope_id();
    let existing = ledger
        .scope(&scope_id)
        .owner(&user1)
        .value_owner(&marker)
        .build();
    let proposed = ledger
        .scope(&scope_id)
        .owner(&user1)
        .value_owner(&user1)
        .build();

    assert!(authorizer
        .validate_update(Some(&existing), &proposed, &signers(&[&user1]))
        .is_ok());
}

#[test]
fn test_deleting_absent_data_access() {
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let existing = ledger
        .scope(&new_scope_id())
        .owner(&users.user1)
        .data_access(&users.user2)
        .build();

    assert_eq!(
        authorizer.validate_delete_data_access(&[&users.user3], &existing, &signers(&[&users.user1])),
        Err(AuthError::AddressNotInDataAccess {
            address: users.user3.clone()
        })
    );
}

#[test]
fn test_empty_owner_list_rejected_for_any_signers() {
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let scope_id = new_scope_id();
    let existing = ledger.scope(&scope_id).owner(&users.user1).build();
    let proposed = ledger.scope(&scope_id).build();

    for signer_list in [vec![], vec![&users.user1], vec![&users.user1, &users.user2]] {
        assert_eq!(
            authorizer.validate_update_owners(&existing, &proposed, &signers(&signer_list)),
            Err(AuthError::NoOwnersSpecified)
        );
    }
}

#[test]
fn test_replacing_sole_owner_needs_old_owner() {
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let scope_id = new_scope_id();
    let existing = ledger.scope(&scope_id).owner(&users.user1).build();
    let proposed = ledger.scope(&scope_id).owner(&users.user2).build();

    assert_eq!(
        authorizer.validate_update_owners(&existing, &proposed, &signers(&[&users.user2])),
        Err(AuthError::missing_signatures(vec![Party::owner(&users.user1)]))
    );
}

#[test]
fn test_remove_requires_every_owner() {
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let existing = ledger
        .scope(&new_scope_id())
        .owner(&users.user1)
        .party(&users.user2, PartyRole::Servicer)
        .build();

    assert_eq!(
        authorizer.validate_remove(&existing, &signers::<&str>(&[])),
        Err(AuthError::missing_signatures(vec![
            Party::owner(&users.user1),
            Party::new(&users.user2, PartyRole::Servicer),
        ]))
    );
    assert!(authorizer
        .validate_remove(&existing, &signers(&[&users.user1, &users.user2]))
        .is_ok());
}

#[test]
fn test_remove_releases_value_owner() {
    let mut ledger = TestLedger::new();
    let (user1, user2) = (ledger.users.user1.clone(), ledger.users.user2.clone());
    let marker = ledger.add_marker("testcoin", &[(user2.as_str(), "withdraw")]);
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());

    let held_by_marker = ledger
        .scope(&new_scope_id())
        .owner(&user1)
        .value_owner(&marker)
        .build();
    assert_eq!(
        authorizer.validate_remove(&held_by_marker, &signers(&[&user1])),
        Err(AuthError::NoWithdrawAuthority {
            marker: marker.clone()
        })
    );
    assert!(authorizer
        .validate_remove(&held_by_marker, &signers(&[&user1, &user2]))
        .is_ok());

    let held_by_user = ledger
        .scope(&new_scope_id())
        .owner(&user1)
        .value_owner(&user2)
        .build();
    assert_eq!(
        authorizer.validate_remove(&held_by_user, &signers(&[&user1])),
        Err(AuthError::missing_owner_signature(user2.clone()))
    );
}

#[test]
fn test_operation_dispatch() {
    init_test_tracing();
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let owner = signers(&[&users.user1]);

    let scope_id = new_scope_id();
    let scope = ledger.scope(&scope_id).owner(&users.user1).build();

    let created = authorizer
        .authorize(None, ScopeOperation::Write { scope: scope.clone() }, &owner)
        .unwrap();
    assert_eq!(created, ScopeTransition::Upsert(scope.clone()));

    let added = authorizer
        .authorize(
            Some(&scope),
            ScopeOperation::AddDataAccess {
                scope_id: scope_id.clone(),
                addresses: vec![users.user2.clone(), users.user2.clone()],
            },
            &owner,
        )
        .unwrap();
    let ScopeTransition::Upsert(with_access) = added else {
        panic!("expected upsert");
    };
    assert_eq!(with_access.data_access, vec![users.user2.clone()]);

    let removed_access = authorizer
        .authorize(
            Some(&with_access),
            ScopeOperation::DeleteDataAccess {
                scope_id: scope_id.clone(),
                addresses: vec![users.user2.clone()],
            },
            &owner,
        )
        .unwrap();
    assert_eq!(removed_access, ScopeTransition::Upsert(scope.clone()));

    let new_owners = vec![Party::owner(&users.user2)];
    let reowned = authorizer
        .authorize(
            Some(&scope),
            ScopeOperation::UpdateOwners {
                scope_id: scope_id.clone(),
                owners: new_owners.clone(),
            },
            &owner,
        )
        .unwrap();
    assert_matches!(reowned, ScopeTransition::Upsert(s) if s.owners == new_owners);

    let deleted = authorizer
        .authorize(
            Some(&scope),
            ScopeOperation::Delete {
                scope_id: scope_id.clone(),
            },
            &owner,
        )
        .unwrap();
    assert_eq!(deleted, ScopeTransition::Remove(scope_id));
}

#[test]
fn test_operation_targets_must_exist_and_match() {
    let ledger = TestLedger::new();
    let users = &ledger.users;
    let authorizer = ScopeAuthorizer::new(&ledger.specifications, &ledger.markers, ledger.codec());
    let owner = signers(&[&users.user1]);
    let scope = ledger.scope(&new_scope_id()).owner(&users.user1).build();
    let other_id = new_scope_id();

    let err = authorizer
        .authorize(
            None,
            ScopeOperation::Delete {
                scope_id: other_id.clone(),
            },
            &owner,
        )
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::ScopeNotFound {
            scope_id: other_id.clone()
        }
    );
    assert_eq!(err.kind(), AuthErrorKind::Identity);

    assert_matches!(
        authorizer.authorize(
            Some(&scope),
            ScopeOperation::AddDataAccess {
                scope_id: other_id,
                addresses: vec![users.user2.clone()],
            },
            &owner,
        ),
        Err(AuthError::IdentifierMismatch { .. })
    );
}
