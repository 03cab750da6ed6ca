//! Endpoint functions, one module per URL segment.

use fetcher_core::RouteDescriptor;

pub mod sellers;

use sellers::sales::{articles::comments, entire};

/// Every endpoint of this client, keyed by its qualified function name.
pub static ROUTES: &[(&str, RouteDescriptor)] = &[
    ("sellers.sales.entire.index", entire::index::ROUTE),
    ("sellers.sales.entire.at", entire::at::ROUTE),
    ("sellers.sales.articles.comments.store", comments::store::ROUTE),
];

/// Look up an endpoint descriptor by qualified name.
pub fn route(name: &str) -> Option<RouteDescriptor> {
    ROUTES
        .iter()
        .find(|(qualified, _)| *qualified == name)
        .map(|(_, route)| *route)
}
