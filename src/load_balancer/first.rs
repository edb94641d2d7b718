//! First-server selection.

use crate::load_balancer::Selector;

/// Always selects the first server in configuration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstSelector;

impl Selector for FirstSelector {
    fn select<'a>(&self, servers: &'a [String]) -> Option<&'a str> {
        servers.first().map(String::as_str)
    }
}
