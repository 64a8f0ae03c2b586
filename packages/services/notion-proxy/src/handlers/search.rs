use super::{HandlerSpec, Input, Operation};
use crate::routes::{HttpMethod, RouteDescriptor};

pub static SEARCH: HandlerSpec = HandlerSpec { operation: Operation::Search, params: &[], input: Input::Body };

pub fn routes() -> Vec<RouteDescriptor> {
    vec![RouteDescriptor::new(HttpMethod::Post, "/search", &SEARCH)]
}
