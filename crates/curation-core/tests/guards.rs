//! # Guard Integration Tests
//!
//! Every precondition and access rule on the public operations. Each
//! rejected call must leave ledgers, event log and balances untouched.

mod common;

use common::{Harness, START, coordinator};
use curation_collab::{LockRequest, TallyBook};
use curation_core::ChallengeOutcome;
use curation_types::constants::PCT_BASE;
use curation_types::*;

// ═══════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════

#[test]
fn uninitialized_coordinator_rejects_every_mutation() {
    let clock = ManualClock::new(Timestamp(START));
    let mut c = coordinator(&clock);
    let someone = AccountId::from_label("someone");
    let entry = EntryId::for_data(b"Test");

    let results = [
        c.new_application(someone, b"Test".to_vec(), LockId(1)).err(),
        c.register_unchallenged_application(entry).err(),
        c.remove_application(someone, entry).err(),
        c.challenge_application(someone, entry, LockId(1)).err(),
        c.resolve_challenge(entry).err(),
        c.claim_reward(someone, VoteId(1)).err(),
        c.set_min_deposit(someone, 1).err(),
        c.set_apply_stage_len(someone, 1).err(),
        c.set_dispensation_pct(someone, 1).err(),
        c.set_voting_app(someone, TallyBook::new(AccountId::from_label("v2")))
            .err(),
        c.transfer_admin(someone, someone).err(),
    ];
    for result in results {
        assert_eq!(result, Some(CurationError::NotInitialized));
    }
    assert!(c.events().is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// New application
// ═══════════════════════════════════════════════════════════════════

#[test]
fn empty_data_rejected() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let lock_id = h.lock(applicant, 100);
    let err = h
        .curation
        .new_application(applicant, Vec::new(), lock_id)
        .unwrap_err();
    assert_eq!(err, CurationError::EmptyData);
    assert!(!h.curation.is_lock_used(applicant, lock_id));
}

#[test]
fn duplicate_data_rejected_while_live() {
    let mut h = Harness::new();
    let first = AccountId::random();
    let second = AccountId::random();
    let entry = h.apply(first, b"Test", 100);

    let lock_id = h.lock(second, 100);
    let err = h
        .curation
        .new_application(second, b"Test".to_vec(), lock_id)
        .unwrap_err();
    assert_eq!(err, CurationError::DuplicateApplication(entry));
    assert_eq!(h.curation.application(entry).unwrap().applicant, first);
}

#[test]
fn data_already_in_registry_rejected() {
    let mut h = Harness::new();
    h.curation.registry_mut().add(b"Test").unwrap();
    let applicant = AccountId::random();
    let lock_id = h.lock(applicant, 100);
    let err = h
        .curation
        .new_application(applicant, b"Test".to_vec(), lock_id)
        .unwrap_err();
    assert!(matches!(err, CurationError::DataAlreadyRegistered(_)));
}

#[test]
fn lock_validation_rules() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let stranger = AccountId::random();
    let deadline = START + 1_000;

    let cases = [
        // below min deposit
        LockRequest::seconds(99, deadline, h.address),
        // ends one second before the apply stage does
        LockRequest::seconds(100, deadline - 1, h.address),
        // someone else may unlock it
        LockRequest::seconds(100, deadline, stranger),
        // block-denominated
        LockRequest {
            time_unit: TimeUnit::Blocks,
            ..LockRequest::seconds(100, u64::MAX, h.address)
        },
    ];
    for (i, request) in cases.into_iter().enumerate() {
        let data = format!("entry-{i}").into_bytes();
        let lock_id = h.lock_with(applicant, request);
        let err = h
            .curation
            .new_application(applicant, data, lock_id)
            .unwrap_err();
        assert!(
            matches!(err, CurationError::InvalidLock { .. }),
            "case {i}: {err}"
        );
        assert!(!h.curation.is_lock_used(applicant, lock_id));
    }

    // Exactly at the boundary is fine.
    let lock_id = h.lock_with(applicant, LockRequest::seconds(100, deadline, h.address));
    h.curation
        .new_application(applicant, b"boundary".to_vec(), lock_id)
        .unwrap();
}

#[test]
fn missing_lock_rejected() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let err = h
        .curation
        .new_application(applicant, b"Test".to_vec(), LockId(42))
        .unwrap_err();
    assert_eq!(
        err,
        CurationError::LockNotFound {
            owner: applicant,
            lock_id: LockId(42)
        }
    );
}

#[test]
fn lock_cannot_back_two_live_records() {
    let mut h = Harness::new();
    let owner = AccountId::random();
    let lock_id = h.lock(owner, 100);
    let entry = h
        .curation
        .new_application(owner, b"A".to_vec(), lock_id)
        .unwrap();
    assert!(h.curation.is_lock_used(owner, lock_id));

    let err = h
        .curation
        .new_application(owner, b"B".to_vec(), lock_id)
        .unwrap_err();
    assert_eq!(err, CurationError::LockAlreadyUsed { owner, lock_id });

    // Nor a challenge on some other entry.
    let other = h.apply(AccountId::random(), b"C", 100);
    let err = h
        .curation
        .challenge_application(owner, other, lock_id)
        .unwrap_err();
    assert_eq!(err, CurationError::LockAlreadyUsed { owner, lock_id });
    assert!(h.curation.challenge(other).is_none());

    h.curation.remove_application(owner, entry).unwrap();
    assert!(!h.curation.is_lock_used(owner, lock_id));
}

#[test]
fn failed_operation_leaves_event_log_unchanged() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    h.apply(applicant, b"Test", 100);
    let before = h.curation.events().to_vec();

    let lock_id = h.lock_with(applicant, LockRequest::seconds(1, u64::MAX, h.address));
    assert!(
        h.curation
            .new_application(applicant, b"Other".to_vec(), lock_id)
            .is_err()
    );
    assert_eq!(h.curation.events(), before.as_slice());
}

// ═══════════════════════════════════════════════════════════════════
// Registration and withdrawal
// ═══════════════════════════════════════════════════════════════════

#[test]
fn registration_time_boundary() {
    let mut h = Harness::new();
    let entry = h.apply(AccountId::random(), b"Test", 100);

    h.clock.set(Timestamp(START + 999));
    let err = h
        .curation
        .register_unchallenged_application(entry)
        .unwrap_err();
    assert_eq!(
        err,
        CurationError::ApplyStageNotElapsed {
            entry_id: entry,
            ready_at: START + 1_000,
            now: START + 999
        }
    );
    assert!(!h.curation.registry().exists(b"Test"));

    h.clock.set(Timestamp(START + 1_000));
    h.curation.register_unchallenged_application(entry).unwrap();

    let err = h
        .curation
        .register_unchallenged_application(entry)
        .unwrap_err();
    assert_eq!(err, CurationError::AlreadyRegistered(entry));
}

#[test]
fn register_blocked_by_pending_challenge() {
    let mut h = Harness::new();
    let entry = h.apply(AccountId::random(), b"Test", 100);
    h.challenge(AccountId::random(), entry, 100);
    h.elapse_apply_stage();

    let err = h
        .curation
        .register_unchallenged_application(entry)
        .unwrap_err();
    assert_eq!(err, CurationError::ChallengePending(entry));
}

#[test]
fn register_unknown_entry() {
    let mut h = Harness::new();
    let entry = EntryId::for_data(b"nothing");
    assert_eq!(
        h.curation.register_unchallenged_application(entry),
        Err(CurationError::ApplicationNotFound(entry))
    );
}

#[test]
fn only_applicant_may_withdraw() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let mallory = AccountId::random();
    let entry = h.apply(applicant, b"Test", 100);

    let err = h.curation.remove_application(mallory, entry).unwrap_err();
    assert_eq!(
        err,
        CurationError::NotApplicant {
            caller: mallory,
            entry_id: entry
        }
    );
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(h.curation.application(entry).is_some());
}

#[test]
fn withdraw_blocked_by_pending_challenge() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let entry = h.apply(applicant, b"Test", 100);
    h.challenge(AccountId::random(), entry, 100);

    let err = h.curation.remove_application(applicant, entry).unwrap_err();
    assert_eq!(err, CurationError::ChallengePending(entry));
    assert_eq!(h.balance(applicant).locked, 100);
}

// ═══════════════════════════════════════════════════════════════════
// Challenges
// ═══════════════════════════════════════════════════════════════════

#[test]
fn one_challenge_per_entry() {
    let mut h = Harness::new();
    let entry = h.apply(AccountId::random(), b"Test", 100);
    h.challenge(AccountId::random(), entry, 100);

    let second = AccountId::random();
    let lock_id = h.lock(second, 100);
    let err = h
        .curation
        .challenge_application(second, entry, lock_id)
        .unwrap_err();
    assert_eq!(err, CurationError::AlreadyChallenged(entry));
    assert!(!h.curation.is_lock_used(second, lock_id));
}

#[test]
fn challenge_unknown_entry() {
    let mut h = Harness::new();
    let challenger = AccountId::random();
    let lock_id = h.lock(challenger, 100);
    let entry = EntryId::for_data(b"nothing");
    assert_eq!(
        h.curation.challenge_application(challenger, entry, lock_id),
        Err(CurationError::ApplicationNotFound(entry))
    );
}

#[test]
fn challenge_lock_must_cover_min_deposit() {
    let mut h = Harness::new();
    let entry = h.apply(AccountId::random(), b"Test", 100);
    let challenger = AccountId::random();
    let lock_id = h.lock(challenger, 50);
    let err = h
        .curation
        .challenge_application(challenger, entry, lock_id)
        .unwrap_err();
    assert!(matches!(err, CurationError::InvalidLock { .. }));
    assert!(h.curation.challenge(entry).is_none());
    assert!(h.curation.vote(VoteId(1)).is_none());
}

#[test]
fn touch_and_remove_under_collateralized_application() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let challenger = AccountId::random();
    let entry = h.apply(applicant, b"Test", 100);
    let app_lock = h.curation.application(entry).unwrap().lock_id;

    h.curation.set_min_deposit(h.admin, 200).unwrap();
    h.curation.drain_events();

    // The challenger's lock is never consulted.
    let outcome = h
        .curation
        .challenge_application(challenger, entry, LockId(7))
        .unwrap();
    assert_eq!(outcome, ChallengeOutcome::TouchedAndRemoved);

    assert!(h.curation.application(entry).is_none());
    assert!(h.curation.challenge(entry).is_none());
    assert!(!h.curation.is_lock_used(applicant, app_lock));
    assert!(h.curation.vote(VoteId(1)).is_none());
    assert_eq!(h.balance(applicant).available, 100);
    assert_eq!(h.balance(challenger).total(), 0);

    let events = h.curation.events();
    assert_eq!(
        events[0],
        CurationEvent::ChallengeCreated {
            entry_id: entry,
            challenger,
            vote_id: None
        }
    );
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, CurationEvent::TokensMoved { .. }))
    );
    assert_eq!(
        h.event_names(),
        ["CHALLENGE_CREATED", "APPLICATION_REMOVED", "LOCK_RELEASED"]
    );
}

#[test]
fn reused_vote_id_is_refused() {
    let mut h = Harness::new();
    let first = h.apply(AccountId::random(), b"A", 100);
    let vote_id = h.challenge(AccountId::random(), first, 100);
    h.close_vote(vote_id, true, 70, &[]);
    h.curation.resolve_challenge(first).unwrap();

    // A misbehaving voting app hands out the same id again.
    h.curation.voting_mut().set_next_vote_id(vote_id);
    let second = h.apply(AccountId::random(), b"B", 100);
    let challenger = AccountId::random();
    let lock_id = h.lock(challenger, 100);
    let err = h
        .curation
        .challenge_application(challenger, second, lock_id)
        .unwrap_err();
    assert!(matches!(err, CurationError::Voting(_)));
    assert!(h.curation.challenge(second).is_none());
    assert!(!h.curation.is_lock_used(challenger, lock_id));
}

// ═══════════════════════════════════════════════════════════════════
// Parameter Store
// ═══════════════════════════════════════════════════════════════════

#[test]
fn parameter_setters_are_admin_only() {
    let mut h = Harness::new();
    let mallory = AccountId::random();

    for err in [
        h.curation.set_min_deposit(mallory, 1).unwrap_err(),
        h.curation.set_apply_stage_len(mallory, 1).unwrap_err(),
        h.curation.set_dispensation_pct(mallory, 1).unwrap_err(),
        h.curation
            .set_voting_app(mallory, TallyBook::new(AccountId::from_label("v2")))
            .unwrap_err(),
    ] {
        assert!(matches!(err, CurationError::Unauthorized { caller, .. } if caller == mallory));
    }
    assert_eq!(h.curation.parameters(), Some(Parameters::default()));
    assert!(h.curation.events().is_empty());
}

#[test]
fn admin_updates_parameters() {
    let mut h = Harness::new();
    h.curation.set_min_deposit(h.admin, 250).unwrap();
    h.curation.set_apply_stage_len(h.admin, 60).unwrap();
    h.curation.set_dispensation_pct(h.admin, PCT_BASE / 4).unwrap();

    let params = h.curation.parameters().unwrap();
    assert_eq!(params.min_deposit, 250);
    assert_eq!(params.apply_stage_len, 60);
    assert_eq!(params.dispensation_pct, Pct::percent(25).unwrap());
    assert_eq!(
        h.event_names(),
        ["PARAMETER_CHANGED", "PARAMETER_CHANGED", "PARAMETER_CHANGED"]
    );

    let err = h
        .curation
        .set_dispensation_pct(h.admin, PCT_BASE + 1)
        .unwrap_err();
    assert!(matches!(err, CurationError::PctOutOfRange { .. }));
    assert_eq!(
        h.curation.parameters().unwrap().dispensation_pct,
        Pct::percent(25).unwrap()
    );
}

#[test]
fn challenge_keeps_dispensation_snapshot() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let challenger = AccountId::random();
    let entry = h.apply(applicant, b"Test", 100);
    let vote_id = h.challenge(challenger, entry, 100);

    h.curation.set_dispensation_pct(h.admin, PCT_BASE / 10).unwrap();
    h.curation.set_min_deposit(h.admin, 1_000).unwrap();

    h.close_vote(vote_id, true, 70, &[]);
    let resolution = h.curation.resolve_challenge(entry).unwrap();
    assert_eq!(resolution.redistribution.dispensed, 60);
    assert_eq!(h.balance(challenger).available, 160);
}

#[test]
fn set_voting_app_swaps_collaborator() {
    let mut h = Harness::new();

    let err = h
        .curation
        .set_voting_app(h.admin, TallyBook::new(AccountId::ZERO))
        .unwrap_err();
    assert!(matches!(err, CurationError::InvalidServiceAddress { .. }));
    assert_eq!(h.curation.voting().address(), AccountId::from_label("voting"));

    let next = AccountId::from_label("voting-v2");
    let previous = h
        .curation
        .set_voting_app(h.admin, TallyBook::new(next))
        .unwrap();
    assert_eq!(previous.address(), AccountId::from_label("voting"));
    assert_eq!(h.curation.voting().address(), next);
    assert_eq!(
        h.curation.events().last(),
        Some(&CurationEvent::ParameterChanged {
            parameter: ParameterKind::VotingApp,
            value: next.to_string()
        })
    );
}

#[test]
fn vote_id_reissued_by_new_voting_app_is_refused() {
    let mut h = Harness::new();
    let first = h.apply(AccountId::random(), b"A", 100);
    let vote_id = h.challenge(AccountId::random(), first, 100);
    h.close_vote(vote_id, true, 70, &[]);
    h.curation.resolve_challenge(first).unwrap();

    // A fresh app numbers its votes from 1 again.
    h.curation
        .set_voting_app(h.admin, TallyBook::new(AccountId::from_label("voting-v2")))
        .unwrap();
    let second = h.apply(AccountId::random(), b"B", 100);
    let challenger = AccountId::random();
    let lock_id = h.lock(challenger, 100);
    let err = h
        .curation
        .challenge_application(challenger, second, lock_id)
        .unwrap_err();

    assert_eq!(err, CurationError::Voting(format!("{vote_id} was already resolved")));
    assert!(h.curation.challenge(second).is_none());
    assert!(!h.curation.is_lock_used(challenger, lock_id));
    // The refused vote stays behind in the new app.
    assert!(h.curation.voting().get_vote(vote_id).is_some());
}

#[test]
fn swapping_voting_app_strands_open_challenge() {
    let mut h = Harness::new();
    let applicant = AccountId::random();
    let challenger = AccountId::random();
    let entry = h.apply(applicant, b"Test", 100);
    let vote_id = h.challenge(challenger, entry, 100);

    h.curation
        .set_voting_app(h.admin, TallyBook::new(AccountId::from_label("voting-v2")))
        .unwrap();

    let err = h.curation.resolve_challenge(entry).unwrap_err();
    assert_eq!(err, CurationError::Voting(format!("{vote_id} is unknown")));
    assert!(h.curation.challenge(entry).is_some());
    assert_eq!(h.balance(applicant).locked, 100);
    assert_eq!(h.balance(challenger).locked, 100);
}

#[test]
fn admin_transfer() {
    let mut h = Harness::new();
    let next = AccountId::random();
    h.curation.transfer_admin(h.admin, next).unwrap();
    assert_eq!(h.curation.admin(), Some(next));
    assert!(h.curation.set_min_deposit(h.admin, 1).is_err());
    h.curation.set_min_deposit(next, 1).unwrap();
}
