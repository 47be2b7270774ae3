use crate::layout::AssemblyLayout;
use crate::order::{OrderStrategy, Placement, RevealOrder};

/// Sort pieces by (min Y, centroid Y, input index).
#[must_use]
pub fn global_order(layout: &AssemblyLayout) -> RevealOrder {
    let mut order = RevealOrder::new(OrderStrategy::Global, layout.len());
    for index in layout.by_height() {
        order.push(layout, index, Placement::Height);
    }
    order
}
