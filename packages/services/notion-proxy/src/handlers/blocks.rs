use super::{HandlerSpec, Input, Operation, ParamBinding};
use crate::routes::{HttpMethod, RouteDescriptor};

const BLOCK_ID: &[ParamBinding] = &[ParamBinding { route: "id", arg: "block_id" }];

pub static RETRIEVE: HandlerSpec = HandlerSpec { operation: Operation::RetrieveBlock, params: BLOCK_ID, input: Input::None };
pub static UPDATE: HandlerSpec = HandlerSpec { operation: Operation::UpdateBlock, params: BLOCK_ID, input: Input::Body };
pub static DELETE: HandlerSpec = HandlerSpec { operation: Operation::DeleteBlock, params: BLOCK_ID, input: Input::None };
// Pagination (`start_cursor`, `page_size`) rides on the query string.
pub static LIST_CHILDREN: HandlerSpec = HandlerSpec { operation: Operation::ListBlockChildren, params: BLOCK_ID, input: Input::Query };
pub static APPEND_CHILDREN: HandlerSpec = HandlerSpec { operation: Operation::AppendBlockChildren, params: BLOCK_ID, input: Input::Body };

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(HttpMethod::Get, "/blocks/:id", &RETRIEVE),
        RouteDescriptor::new(HttpMethod::Patch, "/blocks/:id", &UPDATE),
        RouteDescriptor::new(HttpMethod::Delete, "/blocks/:id", &DELETE),
        RouteDescriptor::new(HttpMethod::Get, "/blocks/:id/children", &LIST_CHILDREN),
        RouteDescriptor::new(HttpMethod::Patch, "/blocks/:id/children", &APPEND_CHILDREN),
    ]
}
