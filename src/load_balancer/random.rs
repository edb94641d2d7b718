//! Uniform random selection.

use crate::load_balancer::Selector;

/// Selects a server uniformly at random.
///
/// Uses `fastrand`'s thread-local generator; selection quality does not need
/// to be cryptographic.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn select<'a>(&self, servers: &'a [String]) -> Option<&'a str> {
        if servers.is_empty() {
            return None;
        }
        Some(servers[fastrand::usize(..servers.len())].as_str())
    }
}
