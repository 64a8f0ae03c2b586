use super::{HandlerSpec, Input, Operation, ParamBinding};
use crate::routes::{HttpMethod, RouteDescriptor};

const USER_ID: &[ParamBinding] = &[ParamBinding { route: "id", arg: "user_id" }];

pub static LIST: HandlerSpec = HandlerSpec { operation: Operation::ListUsers, params: &[], input: Input::Query };
pub static RETRIEVE: HandlerSpec = HandlerSpec { operation: Operation::RetrieveUser, params: USER_ID, input: Input::None };

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(HttpMethod::Get, "/users", &LIST),
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", &RETRIEVE),
    ]
}
