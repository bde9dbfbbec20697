use super::partition;
use crate::block::{apply_block, build_state, State};
use crate::error::Result;
use crate::params::{CounterPolicy, Key, Nonce};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Base state and counter rules for one call into a driver
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeystreamPlan {
    state: State,
    base_counter: u32,
    #[zeroize(skip)]
    policy: CounterPolicy,
}

impl KeystreamPlan {
    pub fn new(key: &Key, nonce: &Nonce, base_counter: u32, policy: CounterPolicy) -> Self {
        Self {
            state: build_state(key, nonce, base_counter),
            base_counter,
            policy,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn base_counter(&self) -> u32 {
        self.base_counter
    }

    pub fn policy(&self) -> CounterPolicy {
        self.policy
    }

    /// Counter for block `index` of the message
    pub fn counter_for(&self, index: usize) -> Result<u32> {
        self.policy.counter_for(self.base_counter, index)
    }

    /// Fail before any work if `blocks` counters are not available
    pub fn check_blocks(&self, blocks: usize) -> Result<()> {
        self.policy.check_range(self.base_counter, blocks)
    }
}

/// Apply keystream block by block, in order
pub fn apply_sequential(plan: &KeystreamPlan, text: &[u8]) -> Result<Vec<u8>> {
    let spans = partition(text.len());
    plan.check_blocks(spans.len())?;
    debug!(bytes = text.len(), blocks = spans.len(), "sequential keystream");

    let mut out = Vec::with_capacity(text.len());
    for span in &spans {
        let counter = plan.counter_for(span.index)?;
        out.extend(apply_block(plan.state(), counter, &text[span.range()])?);
    }
    Ok(out)
}
