//! Translation of the API operations into [`Request`](crate::request::Request) values
//!
//! Every method of the [`RequestBuilder`] maps one operation of the
//! [Box v2 API](https://developer.box.com/reference/) to a request. The builder
//! doesn't validate anything, an empty id simply gives a path the server will reject.

use bytes::Bytes;
use serde_json::{json, Map, Value};

use crate::request::{Format, Method, Request};
use crate::resource::ResourceType;
use crate::response::{Outcome, Response};
use crate::shared_link::SharedLink;

/// Version segment of every v2 path
pub const API_VERSION: &str = "2.0";
/// Path of the legacy endpoint handling the tickets and tokens
pub const LEGACY_PATH: &str = "1.0/rest";

/// The optional changes applied by [`RequestBuilder::update`]
///
/// Only the fields that are set and not empty end up in the request body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateParams {
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub shared_link: Option<SharedLink>,
    pub message: Option<String>,
}

impl UpdateParams {
    pub fn set_parent_id(&mut self, value: impl Into<String>) {
        self.parent_id = Some(value.into());
    }

    /// Moves the item to another folder
    pub fn with_parent_id(mut self, value: impl Into<String>) -> Self {
        self.set_parent_id(value);
        self
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = Some(value.into());
    }

    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.set_name(value);
        self
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = Some(value.into());
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.set_description(value);
        self
    }

    pub fn set_shared_link(&mut self, value: SharedLink) {
        self.shared_link = Some(value);
    }

    pub fn with_shared_link(mut self, value: SharedLink) -> Self {
        self.set_shared_link(value);
        self
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = Some(value.into());
    }

    /// Changes the message of a comment
    pub fn with_message(mut self, value: impl Into<String>) -> Self {
        self.set_message(value);
        self
    }

    /// The body members, with the absent and empty values filtered out
    pub fn body_fields(&self) -> Vec<(&'static str, Value)> {
        let candidates = [
            (
                "parent",
                non_empty(&self.parent_id).map(|id| json!({ "id": id })),
            ),
            ("name", non_empty(&self.name).map(Value::from)),
            ("description", non_empty(&self.description).map(Value::from)),
            ("shared_link", self.shared_link.as_ref().map(Value::from)),
            ("message", non_empty(&self.message).map(Value::from)),
        ];
        candidates
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Builder of the requests for every operation of the API
///
/// ```
/// use boxapi::builder::RequestBuilder;
/// use boxapi::request::Method;
/// use boxapi::resource::ResourceType;
///
/// let request = RequestBuilder.get(ResourceType::Folder, "42");
/// assert_eq!(request.method(), Method::Get);
/// assert_eq!(request.path(), "2.0/folder/42");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    /// Gets the information of a resource
    pub fn get(&self, resource_type: ResourceType, id: impl Into<String>) -> Request {
        let mut req = self.json_request(resource_type, "{id}", Method::Get);
        req.add_segment("id", id);
        req
    }

    /// Lists the items of a folder
    pub fn get_items(&self, folder_id: impl Into<String>) -> Request {
        let mut req = self.json_request(ResourceType::Folder, "{id}/items", Method::Get);
        req.add_segment("id", folder_id);
        req
    }

    /// Creates a folder named `name` in the folder `parent_id`
    pub fn create_folder(&self, parent_id: impl Into<String>, name: &str) -> Request {
        let mut req = self.json_request(ResourceType::Folder, "{parentId}", Method::Post);
        req.add_segment("parentId", parent_id);
        req.set_body(json!({ "name": name }));
        req
    }

    /// Uploads a new file named `name` in the folder `parent_id`
    pub fn create_file(
        &self,
        parent_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Request {
        let mut req = self.json_request(ResourceType::File, "data", Method::Post);
        req.add_file("filename1", name, content);
        req.add_form("folder_id", parent_id);
        req
    }

    /// Deletes a folder, the `recursive` flag allows to delete a folder that is not empty
    pub fn delete_folder(&self, id: impl Into<String>, recursive: bool) -> Request {
        let mut req = self.delete_request(ResourceType::Folder, id);
        req.add_query("recursive", recursive.to_string());
        req
    }

    /// Deletes a file
    ///
    /// The `If-Match` header is always sent, empty when no `etag` is given.
    pub fn delete_file(&self, id: impl Into<String>, etag: Option<&str>) -> Request {
        let mut req = self.delete_request(ResourceType::File, id);
        req.add_header("If-Match", etag.unwrap_or_default());
        req
    }

    pub fn delete_comment(&self, id: impl Into<String>) -> Request {
        self.delete_request(ResourceType::Comment, id)
    }

    fn delete_request(&self, resource_type: ResourceType, id: impl Into<String>) -> Request {
        let mut req = self.json_request(resource_type, "{id}", Method::Delete);
        req.add_segment("id", id);
        req
    }

    /// Copies a resource in the folder `new_parent_id`, under the given `name`
    pub fn copy(
        &self,
        resource_type: ResourceType,
        id: impl Into<String>,
        new_parent_id: &str,
        name: &str,
    ) -> Request {
        let mut req = self.json_request(resource_type, "{id}/copy", Method::Post);
        req.add_segment("id", id);
        req.set_body(json!({
            "parent": { "id": new_parent_id },
            "name": name,
        }));
        req
    }

    /// Updates a resource with the fields set in `params`
    pub fn update(
        &self,
        resource_type: ResourceType,
        id: impl Into<String>,
        params: &UpdateParams,
    ) -> Request {
        let mut req = self.json_request(resource_type, "{id}", Method::Put);
        req.add_segment("id", id);
        let body: Map<String, Value> = params
            .body_fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        req.set_body(Value::Object(body));
        req
    }

    /// Downloads the content of a file
    pub fn read(&self, file_id: impl Into<String>) -> Request {
        let mut req = self.raw_request(ResourceType::File, "{id}/data", Method::Get);
        req.add_segment("id", file_id);
        req
    }

    /// Uploads a new version of the content of a file
    pub fn write(
        &self,
        file_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Request {
        let mut req = self.json_request(ResourceType::File, "{id}/data", Method::Post);
        req.add_segment("id", file_id);
        req.add_file("filename", name, content);
        req
    }

    pub fn add_comment(&self, file_id: impl Into<String>, message: &str) -> Request {
        let mut req = self.json_request(ResourceType::File, "{id}/comments", Method::Post);
        req.add_segment("id", file_id);
        req.set_body(json!({ "message": message }));
        req
    }

    pub fn get_comments(&self, resource_type: ResourceType, id: impl Into<String>) -> Request {
        let mut req = self.json_request(resource_type, "{id}/comments", Method::Get);
        req.add_segment("id", id);
        req
    }

    /// Requests a ticket, first step of the authentication
    pub fn get_ticket(&self, api_key: impl Into<String>) -> Request {
        let mut req = Request::new(Method::Get, LEGACY_PATH);
        req.add_query("action", "get_ticket");
        req.add_query("api_key", api_key);
        req
    }

    /// Exchanges a ticket, once authorized by the user, for an auth token
    pub fn swap_ticket_for_token(
        &self,
        api_key: impl Into<String>,
        ticket: impl Into<String>,
    ) -> Request {
        let mut req = Request::new(Method::Get, LEGACY_PATH);
        req.add_query("action", "get_auth_token");
        req.add_query("api_key", api_key);
        req.add_query("ticket", ticket);
        req
    }

    /// Evaluates the response of a request, see [`evaluate`](crate::response::evaluate).
    pub fn was_successful(&self, response: Option<&Response>) -> Outcome {
        crate::response::evaluate(response)
    }

    fn raw_request(&self, resource_type: ResourceType, resource: &str, method: Method) -> Request {
        let template = if resource.is_empty() {
            String::from("{version}/{type}")
        } else {
            format!("{{version}}/{{type}}/{resource}")
        };
        let mut req = Request::new(method, template);
        req.add_segment("version", API_VERSION);
        req.add_segment("type", resource_type.wire_name());
        req
    }

    fn json_request(&self, resource_type: ResourceType, resource: &str, method: Method) -> Request {
        let mut req = self.raw_request(resource_type, resource, method);
        req.set_format(Format::Json);
        req
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestBuilder, UpdateParams};
    use crate::request::{Format, Method};
    use crate::resource::ResourceType;
    use crate::shared_link::{SharedLink, SharedLinkAccess};
    use serde_json::json;

    const ALL_TYPES: [ResourceType; 3] = [
        ResourceType::Folder,
        ResourceType::File,
        ResourceType::Comment,
    ];

    #[test]
    fn get() {
        for kind in ALL_TYPES {
            let req = RequestBuilder.get(kind, "42");
            assert_eq!(req.method(), Method::Get);
            assert_eq!(req.format(), Format::Json);
            assert_eq!(req.template(), "{version}/{type}/{id}");
            assert_eq!(req.path(), format!("2.0/{}/42", kind.wire_name()));
            assert!(req.body().is_none());
        }
    }

    #[test]
    fn get_items() {
        let req = RequestBuilder.get_items("0");
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.path(), "2.0/folder/0/items");
    }

    #[test]
    fn create_folder() {
        let req = RequestBuilder.create_folder("0", "testing");
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.segment("parentId"), Some("0"));
        assert_eq!(req.path(), "2.0/folder/0");
        assert_eq!(req.body(), Some(&json!({ "name": "testing" })));
    }

    #[test]
    fn create_file() {
        let req = RequestBuilder.create_file("12", "hello.txt", b"hello".to_vec());
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.path(), "2.0/file/data");
        assert_eq!(req.form(), &[("folder_id", "12".to_string())]);
        let files = req.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].field, "filename1");
        assert_eq!(files[0].file_name, "hello.txt");
        assert_eq!(files[0].content.as_ref(), b"hello");
        assert!(req.body().is_none());
    }

    #[test]
    fn delete_folder() {
        let req = RequestBuilder.delete_folder("42", true);
        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.path(), "2.0/folder/42");
        assert_eq!(req.query_param("recursive"), Some("true"));
        let req = RequestBuilder.delete_folder("42", false);
        assert_eq!(req.query_param("recursive"), Some("false"));
    }

    #[test]
    fn delete_file_with_etag() {
        let req = RequestBuilder.delete_file("42", Some("3"));
        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.path(), "2.0/file/42");
        assert_eq!(req.header("If-Match"), Some("3"));
    }

    #[test]
    fn delete_file_without_etag() {
        let req = RequestBuilder.delete_file("42", None);
        assert_eq!(req.headers(), &[("If-Match", String::new())]);
    }

    #[test]
    fn delete_comment() {
        let req = RequestBuilder.delete_comment("7");
        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.path(), "2.0/comment/7");
        assert!(req.headers().is_empty());
        assert!(req.query().is_empty());
    }

    #[test]
    fn copy() {
        for kind in ALL_TYPES {
            let req = RequestBuilder.copy(kind, "42", "12", "copied");
            assert_eq!(req.method(), Method::Post);
            assert_eq!(req.path(), format!("2.0/{}/42/copy", kind.wire_name()));
            assert_eq!(
                req.body(),
                Some(&json!({ "parent": { "id": "12" }, "name": "copied" }))
            );
        }
    }

    #[test]
    fn update_with_name_only() {
        let params = UpdateParams::default().with_name("x");
        let req = RequestBuilder.update(ResourceType::File, "42", &params);
        assert_eq!(req.method(), Method::Put);
        assert_eq!(req.path(), "2.0/file/42");
        let body = req.body().unwrap().as_object().unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body["name"], "x");
    }

    #[test]
    fn update_ignores_empty_strings() {
        let params = UpdateParams::default()
            .with_name("")
            .with_description("")
            .with_parent_id("")
            .with_message("hello");
        let req = RequestBuilder.update(ResourceType::Comment, "1", &params);
        assert_eq!(req.body(), Some(&json!({ "message": "hello" })));
    }

    #[test]
    fn update_with_everything() {
        let params = UpdateParams::default()
            .with_parent_id("12")
            .with_name("name")
            .with_description("desc")
            .with_shared_link(SharedLink::new(SharedLinkAccess::Open))
            .with_message("msg");
        let keys: Vec<_> = params.body_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["parent", "name", "description", "shared_link", "message"]
        );
        let req = RequestBuilder.update(ResourceType::Folder, "42", &params);
        assert_eq!(
            req.body(),
            Some(&json!({
                "parent": { "id": "12" },
                "name": "name",
                "description": "desc",
                "shared_link": { "access": "open" },
                "message": "msg",
            }))
        );
    }

    #[test]
    fn update_without_fields() {
        let req = RequestBuilder.update(ResourceType::Folder, "42", &UpdateParams::default());
        assert_eq!(req.body(), Some(&json!({})));
    }

    #[test]
    fn read() {
        let req = RequestBuilder.read("42");
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.format(), Format::Raw);
        assert_eq!(req.path(), "2.0/file/42/data");
    }

    #[test]
    fn write() {
        let req = RequestBuilder.write("42", "hello.txt", &b"world"[..]);
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.format(), Format::Json);
        assert_eq!(req.path(), "2.0/file/42/data");
        assert_eq!(req.files()[0].field, "filename");
        assert!(req.form().is_empty());
    }

    #[test]
    fn add_comment() {
        let req = RequestBuilder.add_comment("42", "nice");
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.path(), "2.0/file/42/comments");
        assert_eq!(req.body(), Some(&json!({ "message": "nice" })));
    }

    #[test]
    fn get_comments() {
        let req = RequestBuilder.get_comments(ResourceType::Folder, "42");
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.path(), "2.0/folder/42/comments");
    }

    #[test]
    fn get_ticket() {
        let req = RequestBuilder.get_ticket("key");
        assert_eq!(req.path(), "1.0/rest");
        assert!(req.segments().is_empty());
        assert_eq!(
            req.query(),
            &[
                ("action", "get_ticket".to_string()),
                ("api_key", "key".to_string()),
            ]
        );
    }

    #[test]
    fn swap_ticket_for_token() {
        let req = RequestBuilder.swap_ticket_for_token("key", "ticket");
        assert_eq!(req.path(), "1.0/rest");
        assert_eq!(req.query_param("action"), Some("get_auth_token"));
        assert_eq!(req.query_param("api_key"), Some("key"));
        assert_eq!(req.query_param("ticket"), Some("ticket"));
    }

    #[test]
    fn raw_request_without_resource() {
        let req = RequestBuilder.raw_request(ResourceType::Folder, "", Method::Get);
        assert_eq!(req.template(), "{version}/{type}");
        assert_eq!(req.path(), "2.0/folder");
    }

    #[test]
    fn identical_inputs_give_identical_requests() {
        let params = UpdateParams::default().with_name("x");
        assert_eq!(
            RequestBuilder.update(ResourceType::File, "1", &params),
            RequestBuilder.update(ResourceType::File, "1", &params)
        );
        assert_eq!(
            RequestBuilder.create_file("0", "a.bin", vec![1, 2, 3]),
            RequestBuilder.create_file("0", "a.bin", vec![1, 2, 3])
        );
    }
}
