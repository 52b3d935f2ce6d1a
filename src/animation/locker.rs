use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::ObjectId;
use crate::foundation::error::{SceneError, SceneResult};

/// Sentinel property name that claims every property of an object.
pub const ALL_PROPERTIES: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Claim {
    All,
    Some(BTreeSet<String>),
}

/// The (object, property) pairs an animation or updater writes.
///
/// Arbitration is a construction-time check: merging two lockers strictly fails on the first
/// shared pair, while sequential composition merges with conflicts ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Locker {
    claims: BTreeMap<ObjectId, Claim>,
}

impl Locker {
    /// Empty locker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locker claiming `properties` of `object`, strictly (duplicates are an error).
    pub fn of(object: ObjectId, properties: &[&str]) -> SceneResult<Self> {
        let mut locker = Self::new();
        for property in properties {
            locker.add(object, property, false)?;
        }
        Ok(locker)
    }

    /// Claim `property` of `object`.
    ///
    /// Without `ignore_conflicts`, claiming `*` on an object that already has claims, claiming
    /// anything on an object owned through `*`, or claiming a property twice is an error.
    pub fn add(
        &mut self,
        object: ObjectId,
        property: &str,
        ignore_conflicts: bool,
    ) -> SceneResult<()> {
        let whole = property == ALL_PROPERTIES;
        let claim = self
            .claims
            .entry(object)
            .or_insert_with(|| Claim::Some(BTreeSet::new()));

        match claim {
            Claim::All => {
                if !ignore_conflicts {
                    return Err(SceneError::locked(object, property));
                }
            }
            Claim::Some(props) => {
                if whole {
                    if !props.is_empty() && !ignore_conflicts {
                        return Err(SceneError::locked(object, property));
                    }
                    *claim = Claim::All;
                } else if !props.insert(property.to_owned()) && !ignore_conflicts {
                    return Err(SceneError::locked(object, property));
                }
            }
        }
        Ok(())
    }

    /// Merge every claim of `other` into `self`.
    ///
    /// On a strict merge failure `self` is left unchanged.
    pub fn merge(&mut self, other: &Locker, ignore_conflicts: bool) -> SceneResult<()> {
        if !ignore_conflicts
            && let Some((object, property)) = self.conflict_with(other)
        {
            return Err(SceneError::locked(object, property));
        }
        for (object, property) in other.pairs() {
            self.add(object, &property, true)?;
        }
        Ok(())
    }

    /// First (object, property) pair that both lockers claim, if any.
    pub fn conflict_with(&self, other: &Locker) -> Option<(ObjectId, String)> {
        for (object, theirs) in &other.claims {
            let Some(ours) = self.claims.get(object) else {
                continue;
            };
            match (ours, theirs) {
                (Claim::Some(a), Claim::Some(b)) => {
                    if let Some(shared) = a.intersection(b).next() {
                        return Some((*object, shared.clone()));
                    }
                }
                (Claim::All, Claim::Some(b)) if b.is_empty() => continue,
                (Claim::Some(a), Claim::All) if a.is_empty() => continue,
                (Claim::All, Claim::Some(b)) => {
                    let first = b.iter().next().cloned().unwrap_or_default();
                    return Some((*object, first));
                }
                _ => return Some((*object, ALL_PROPERTIES.to_owned())),
            }
        }
        None
    }

    /// Return `true` when `object`'s `property` is claimed, directly or through `*`.
    pub fn contains(&self, object: ObjectId, property: &str) -> bool {
        match self.claims.get(&object) {
            Some(Claim::All) => true,
            Some(Claim::Some(props)) => props.contains(property),
            None => false,
        }
    }

    /// All claimed pairs; whole-object claims are reported as `*`.
    pub fn pairs(&self) -> Vec<(ObjectId, String)> {
        let mut out = Vec::new();
        for (object, claim) in &self.claims {
            match claim {
                Claim::All => out.push((*object, ALL_PROPERTIES.to_owned())),
                Claim::Some(props) => out.extend(props.iter().map(|p| (*object, p.clone()))),
            }
        }
        out
    }

    /// Return `true` when nothing is claimed.
    pub fn is_empty(&self) -> bool {
        self.claims.values().all(|c| match c {
            Claim::All => false,
            Claim::Some(props) => props.is_empty(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/locker.rs"]
mod tests;
