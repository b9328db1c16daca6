use crate::domain::ApiRequest;
use crate::tools::operation::{no_args, Operation, Render};

pub static GET_USER: Operation = Operation {
    name: "get_user",
    description: "Get current user information",
    schema: no_args,
    build: |_| Ok(ApiRequest::get("/user")),
    render: Render::Json,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::args::ArgBag;
    use rmcp::model::JsonObject;

    #[test]
    fn get_user_hits_user_endpoint() {
        let empty = JsonObject::new();
        let req = GET_USER.request(&ArgBag::new(&empty)).unwrap();
        assert_eq!(req.method, reqwest::Method::GET);
        assert_eq!(req.path, "/user");
        assert!(req.body.is_none());
    }
}
