//! Building choice groups from loosely populated inputs.
//!
//! A flattened record spreads the arms of a choice over several optional
//! fields. [`ChoiceCandidates`] gathers one offer per arm and only yields a
//! value when exactly one arm (or, for optional groups, at most one) was
//! actually supplied.

use crate::error::{Result, WireError};

pub struct ChoiceCandidates<T> {
    group: String,
    offered: Vec<(&'static str, T)>,
}

impl<T> ChoiceCandidates<T> {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            offered: Vec::new(),
        }
    }

    /// Offers an arm; `None` means the caller supplied nothing for it.
    pub fn offer(mut self, arm: &'static str, payload: Option<T>) -> Self {
        if let Some(payload) = payload {
            self.offered.push((arm, payload));
        }
        self
    }

    /// Names of the arms that were supplied, in offer order.
    pub fn supplied(&self) -> Vec<&'static str> {
        self.offered.iter().map(|(arm, _)| *arm).collect()
    }

    pub fn exactly_one(self) -> Result<T> {
        let group = self.group.clone();
        self.at_most_one()?
            .ok_or_else(|| WireError::choice_none(group))
    }

    pub fn at_most_one(mut self) -> Result<Option<T>> {
        if self.offered.len() > 1 {
            let supplied = self.supplied();
            return Err(WireError::choice_multiple(self.group, supplied));
        }
        Ok(self.offered.pop().map(|(_, payload)| payload))
    }
}

/// Picks the single arm whose inputs are present, before any payload is
/// built. Use this when building an arm can itself fail, so that ambiguity
/// is reported ahead of an incomplete arm.
pub fn select_arm(group: &str, arms: &[(&'static str, bool)]) -> Result<&'static str> {
    select_optional_arm(group, arms)?.ok_or_else(|| WireError::choice_none(group))
}

pub fn select_optional_arm(
    group: &str,
    arms: &[(&'static str, bool)],
) -> Result<Option<&'static str>> {
    let present: Vec<&'static str> = arms
        .iter()
        .filter(|(_, present)| *present)
        .map(|(arm, _)| *arm)
        .collect();
    match present.as_slice() {
        [] => Ok(None),
        [arm] => Ok(Some(*arm)),
        _ => Err(WireError::choice_multiple(group, present)),
    }
}
