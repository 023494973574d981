//! Shared fixture for the integration tests: a coordinator wired to the
//! in-process collaborators and a manual clock.

#![allow(dead_code)]

use curation_collab::{LockBook, LockRequest, SetRegistry, TallyBook, TokenBalance};
use curation_core::{ChallengeOutcome, Curation};
use curation_types::*;

pub type TestCuration = Curation<SetRegistry, LockBook, TallyBook, ManualClock>;

pub const START: u64 = 1_700_000_000;

pub struct Harness {
    pub curation: TestCuration,
    pub clock: ManualClock,
    pub admin: AccountId,
    pub address: AccountId,
}

/// Log to the test writer; `RUST_LOG=curation_core=debug` shows outbound calls.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn coordinator(clock: &ManualClock) -> TestCuration {
    Curation::new(
        AccountId::from_label("curation"),
        SetRegistry::new(AccountId::from_label("registry")),
        LockBook::new(AccountId::from_label("staking")),
        TallyBook::new(AccountId::from_label("voting")),
        clock.clone(),
    )
}

impl Harness {
    /// Reference parameters: min deposit 100, apply stage 1000 s, 60%.
    pub fn new() -> Self {
        Self::with_params(Parameters::default())
    }

    pub fn with_params(params: Parameters) -> Self {
        init_tracing();
        let clock = ManualClock::new(Timestamp(START));
        let mut curation = coordinator(&clock);
        let admin = AccountId::from_label("admin");
        curation.initialize(admin, params).unwrap();
        let address = curation.address();
        Self {
            curation,
            clock,
            admin,
            address,
        }
    }

    pub fn fund(&mut self, account: AccountId, amount: u64) {
        self.curation.staking_mut().deposit(account, amount).unwrap();
    }

    /// Fund `owner` and lock `amount` well past the apply stage.
    pub fn lock(&mut self, owner: AccountId, amount: u64) -> LockId {
        let unlock_at = self.curation.now().as_secs() + 100_000;
        self.lock_with(owner, LockRequest::seconds(amount, unlock_at, self.address))
    }

    pub fn lock_with(&mut self, owner: AccountId, request: LockRequest) -> LockId {
        self.fund(owner, request.amount);
        self.curation.staking_mut().lock(owner, request).unwrap()
    }

    pub fn apply(&mut self, applicant: AccountId, data: &[u8], amount: u64) -> EntryId {
        let lock_id = self.lock(applicant, amount);
        self.curation
            .new_application(applicant, data.to_vec(), lock_id)
            .unwrap()
    }

    pub fn challenge(&mut self, challenger: AccountId, entry_id: EntryId, amount: u64) -> VoteId {
        let lock_id = self.lock(challenger, amount);
        match self
            .curation
            .challenge_application(challenger, entry_id, lock_id)
            .unwrap()
        {
            ChallengeOutcome::Opened(vote_id) => vote_id,
            ChallengeOutcome::TouchedAndRemoved => panic!("expected a vote to open"),
        }
    }

    /// Close a vote and post each voter's winning stake.
    pub fn close_vote(
        &mut self,
        vote_id: VoteId,
        accepted: bool,
        winning_total: u64,
        winners: &[(AccountId, u64)],
    ) {
        let voting = self.curation.voting_mut();
        voting.close(vote_id, accepted, winning_total).unwrap();
        for &(voter, stake) in winners {
            voting.set_voter_winning_stake(vote_id, voter, stake).unwrap();
        }
    }

    pub fn balance(&self, account: AccountId) -> TokenBalance {
        self.curation.staking().balance(account)
    }

    pub fn elapse_apply_stage(&self) {
        let len = self.curation.parameters().unwrap().apply_stage_len;
        self.clock.advance(len);
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.curation.events().iter().map(CurationEvent::name).collect()
    }
}
