//! Fractional ownership balances.
//!
//! A [`Split`] records how much of one ownable an owner holds. The
//! [`Splits`] ledger applies mint, burn and transfer to the `splits`
//! collection. Every ledger operation computes all resulting splits before
//! writing any of them, so a failing check leaves the store untouched.

use mantle_store::{KvStore, Mappable, Mapper, StoreRegistry};
use mantle_types::{Dec, Id};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EntityError, EntityResult};

/// Module name of the split collection.
pub const MODULE: &str = "splits";

composite_id! {
    /// `ownerID|ownableID`. Partial when the ownable is empty: a prefix scan
    /// over every split of one owner.
    SplitId { owner_id, ownable_id }
}

/// Balance of one ownable held by one owner. Never negative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    id: SplitId,
    value: Dec,
}

impl Split {
    pub fn new(owner_id: Id, ownable_id: Id, value: Dec) -> Self {
        Self {
            id: SplitId::new(owner_id, ownable_id),
            value,
        }
    }

    pub fn id(&self) -> &SplitId {
        &self.id
    }

    pub fn owner_id(&self) -> &Id {
        self.id.owner_id()
    }

    pub fn ownable_id(&self) -> &Id {
        self.id.ownable_id()
    }

    pub fn value(&self) -> Dec {
        self.value
    }

    pub fn can_send(&self, amount: Dec) -> bool {
        self.value >= amount
    }

    /// Split with `amount` debited.
    pub fn send(&self, amount: Dec) -> EntityResult<Split> {
        ensure_non_negative(amount)?;
        if !self.can_send(amount) {
            return Err(EntityError::InsufficientBalance {
                split: self.id.to_string(),
                available: self.value,
                requested: amount,
            });
        }
        let value = self
            .value
            .checked_sub(amount)
            .ok_or_else(|| EntityError::Overflow(self.id.to_string()))?;
        Ok(Self {
            id: self.id.clone(),
            value,
        })
    }

    /// Split with `amount` credited.
    pub fn receive(&self, amount: Dec) -> EntityResult<Split> {
        ensure_non_negative(amount)?;
        let value = self
            .value
            .checked_add(amount)
            .ok_or_else(|| EntityError::Overflow(self.id.to_string()))?;
        Ok(Self {
            id: self.id.clone(),
            value,
        })
    }
}

impl Mappable for Split {
    type Key = SplitId;

    fn key(&self) -> SplitId {
        self.id.clone()
    }
}

fn ensure_non_negative(amount: Dec) -> EntityResult<()> {
    if amount.is_negative() {
        return Err(EntityError::NegativeAmount(amount));
    }
    Ok(())
}

/// How the ledger treats splits whose value drops to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    /// Remove a split from the store once its value reaches zero.
    pub prune_empty_splits: bool,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            prune_empty_splits: true,
        }
    }
}

/// The split ledger.
#[derive(Debug, Clone)]
pub struct Splits {
    mapper: Mapper<Split>,
    policy: LedgerPolicy,
}

impl Splits {
    pub fn register(registry: &mut StoreRegistry, policy: LedgerPolicy) -> EntityResult<Self> {
        Ok(Self {
            mapper: registry.register(MODULE)?,
            policy,
        })
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    /// The split for `(owner, ownable)`; the zero-valued prototype if absent.
    pub fn split<S: KvStore + ?Sized>(&self, store: &S, owner_id: &Id, ownable_id: &Id) -> EntityResult<Split> {
        let id = SplitId::new(owner_id.clone(), ownable_id.clone());
        Ok(self.mapper.fetch(store, &id)?)
    }

    /// Every split held by `owner_id`, in ownable order.
    pub fn splits_of<S: KvStore + ?Sized>(&self, store: &S, owner_id: &Id) -> EntityResult<Vec<Split>> {
        let partial = SplitId::new(owner_id.clone(), Id::empty());
        Ok(self
            .mapper
            .iterate(store, &partial)?
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Total of `ownable_id` across all owners.
    pub fn supply<S: KvStore + ?Sized>(&self, store: &S, ownable_id: &Id) -> EntityResult<Dec> {
        let mut total = Dec::ZERO;
        for split in self.mapper.iterate(store, &SplitId::default())? {
            let split = split?;
            if split.ownable_id() == ownable_id {
                total = total
                    .checked_add(split.value())
                    .ok_or_else(|| EntityError::Overflow(ownable_id.to_string()))?;
            }
        }
        Ok(total)
    }

    /// Credit `amount` to `(owner, ownable)`, creating the split if absent.
    pub fn mint<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        owner_id: &Id,
        ownable_id: &Id,
        amount: Dec,
    ) -> EntityResult<Split> {
        let current = self.split(&*store, owner_id, ownable_id)?;
        let minted = if current.is_prototype() {
            ensure_non_negative(amount)?;
            Split::new(owner_id.clone(), ownable_id.clone(), amount)
        } else {
            current.receive(amount)?
        };
        self.write(store, &minted)?;
        debug!(split = %minted.id(), %amount, "mint");
        Ok(minted)
    }

    /// Debit `amount` from `(owner, ownable)`.
    pub fn burn<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        owner_id: &Id,
        ownable_id: &Id,
        amount: Dec,
    ) -> EntityResult<Split> {
        let current = self.existing(&*store, owner_id, ownable_id)?;
        let burned = current.send(amount)?;
        self.write(store, &burned)?;
        debug!(split = %burned.id(), %amount, "burn");
        Ok(burned)
    }

    /// Move `amount` of `ownable_id` from `from_id` to `to_id`.
    ///
    /// Fails with `EntityNotFound` if the source split is absent and with
    /// `InsufficientBalance` if it holds less than `amount`. The destination
    /// split is created if absent. Both splits are computed before either is
    /// written.
    pub fn transfer<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        from_id: &Id,
        to_id: &Id,
        ownable_id: &Id,
        amount: Dec,
    ) -> EntityResult<()> {
        let source = self.existing(&*store, from_id, ownable_id)?;
        let sent = source.send(amount)?;
        if from_id == to_id {
            return Ok(());
        }

        let destination = self.split(&*store, to_id, ownable_id)?;
        let received = if destination.is_prototype() {
            Split::new(to_id.clone(), ownable_id.clone(), amount)
        } else {
            destination.receive(amount)?
        };

        self.write(store, &sent)?;
        self.write(store, &received)?;
        debug!(from = %from_id, to = %to_id, ownable = %ownable_id, %amount, "transfer");
        Ok(())
    }

    fn existing<S: KvStore + ?Sized>(&self, store: &S, owner_id: &Id, ownable_id: &Id) -> EntityResult<Split> {
        let split = self.split(&*store, owner_id, ownable_id)?;
        if split.is_prototype() {
            return Err(EntityError::not_found(
                "split",
                SplitId::new(owner_id.clone(), ownable_id.clone()),
            ));
        }
        Ok(split)
    }

    /// Persist a split, pruning it when empty if the policy says so.
    fn write<S: KvStore + ?Sized>(&self, store: &mut S, split: &Split) -> EntityResult<()> {
        let mut splits = self.mapper.collection(store);
        let exists = splits.contains(split.id())?;
        match (exists, split.value().is_zero() && self.policy.prune_empty_splits) {
            (true, true) => splits.remove(split)?,
            (true, false) => splits.mutate(split)?,
            (false, true) => {}
            (false, false) => splits.add(split)?,
        }
        Ok(())
    }
}
