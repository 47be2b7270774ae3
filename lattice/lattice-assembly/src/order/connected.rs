use std::collections::BTreeSet;

use tracing::debug;

use crate::graph::ContactGraph;
use crate::layout::AssemblyLayout;
use crate::order::{OrderStrategy, Placement, RevealOrder};
use crate::params::OrderParams;

/// Grow from the lowest piece over world-proximity contacts, always taking
/// the lowest piece on the frontier.
///
/// Pieces the frontier never reaches are appended in height order.
#[must_use]
pub fn connected_order(layout: &AssemblyLayout, params: &OrderParams) -> RevealOrder {
    let count = layout.len();
    let mut order = RevealOrder::new(OrderStrategy::Connected, count);
    let by_height = layout.by_height();
    let Some(&seed) = by_height.first() else {
        return order;
    };

    let graph = ContactGraph::from_proximity(layout, params.proximity_factor * layout.diameter());
    let mut visited = vec![false; count];
    let mut frontier = BTreeSet::from([seed]);
    visited[seed] = true;

    loop {
        let Some(next) = frontier.iter().copied().min_by(|&a, &b| layout.height_cmp(a, b)) else {
            break;
        };
        frontier.remove(&next);
        let placement = if next == seed { Placement::Seed } else { Placement::Connected };
        order.push(layout, next, placement);

        for &n in graph.neighbors(next) {
            if !visited[n] {
                visited[n] = true;
                frontier.insert(n);
            }
        }
    }

    let reached = order.len();
    for index in by_height {
        if !visited[index] {
            order.push(layout, index, Placement::Disconnected);
        }
    }
    if reached < count {
        debug!(reached, total = count, "contact graph is disconnected, appended remaining pieces by height");
    }
    order
}
