use super::{HandlerSpec, Input, Operation, ParamBinding};
use crate::routes::{HttpMethod, RouteDescriptor};

const DATABASE_ID: &[ParamBinding] = &[ParamBinding { route: "id", arg: "database_id" }];

pub static RETRIEVE: HandlerSpec = HandlerSpec { operation: Operation::RetrieveDatabase, params: DATABASE_ID, input: Input::None };
pub static UPDATE: HandlerSpec = HandlerSpec { operation: Operation::UpdateDatabase, params: DATABASE_ID, input: Input::Body };
/// `filter`, `sorts`, `start_cursor` and `page_size` are all read from the body.
pub static QUERY: HandlerSpec = HandlerSpec { operation: Operation::QueryDatabase, params: DATABASE_ID, input: Input::Body };

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(HttpMethod::Get, "/databases/:id", &RETRIEVE),
        RouteDescriptor::new(HttpMethod::Patch, "/databases/:id", &UPDATE),
        RouteDescriptor::new(HttpMethod::Post, "/databases/:id/query", &QUERY),
    ]
}
