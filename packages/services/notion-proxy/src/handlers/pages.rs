use super::{HandlerSpec, Input, Operation, ParamBinding};
use crate::routes::{HttpMethod, RouteDescriptor};

const PAGE_ID: &[ParamBinding] = &[ParamBinding { route: "id", arg: "page_id" }];
// The page capture is named `id` like `/pages/:id`; the router rejects two
// differently named captures in the same position.
const PAGE_AND_PROPERTY_ID: &[ParamBinding] = &[
    ParamBinding { route: "id", arg: "page_id" },
    ParamBinding { route: "property_id", arg: "property_id" },
];

/// Forwards `filter_properties` from the query string.
pub static RETRIEVE: HandlerSpec = HandlerSpec { operation: Operation::RetrievePage, params: PAGE_ID, input: Input::Query };
pub static UPDATE: HandlerSpec = HandlerSpec { operation: Operation::UpdatePage, params: PAGE_ID, input: Input::Body };
pub static RETRIEVE_PROPERTY: HandlerSpec =
    HandlerSpec { operation: Operation::RetrievePageProperty, params: PAGE_AND_PROPERTY_ID, input: Input::Query };

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(HttpMethod::Get, "/pages/:id", &RETRIEVE),
        RouteDescriptor::new(HttpMethod::Patch, "/pages/:id", &UPDATE),
        RouteDescriptor::new(HttpMethod::Get, "/pages/:id/properties/:property_id", &RETRIEVE_PROPERTY),
    ]
}
