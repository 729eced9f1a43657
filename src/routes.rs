//! `/users` route handlers and the application router.
//!
//! | Method | Path          | Success                         | Failure     |
//! |--------|---------------|---------------------------------|-------------|
//! | POST   | `/users`      | 201 + `Location` + created user | 400         |
//! | GET    | `/users`      | 200 + array                     |             |
//! | GET    | `/users/{id}` | 200 + user                      | 404         |
//! | PUT    | `/users/{id}` | 200 + updated user              | 404 or 400  |
//! | DELETE | `/users/{id}` | 204                             | 404         |
//!
//! An `{id}` that is not an unsigned integer is treated exactly like an
//! unknown route: `404` with an empty body.

use std::future::Future;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::Fault;
use crate::middleware::{ErrorTranslator, RequestLogger, RequireAuthorization};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;
use crate::store::UserStore;
use crate::user::{User, UserId, UserPayload};
use crate::validate::validate;

type HandlerResult = Result<Response, Fault>;

/// The full service: user routes behind the error translator, the
/// authorization gate and the exchange logger, in that order.
pub fn app(store: Arc<UserStore>) -> Router {
    Router::new()
        .post("/users", with_store(Arc::clone(&store), create))
        .get("/users", with_store(Arc::clone(&store), list))
        .get("/users/{id}", with_store(Arc::clone(&store), get))
        .put("/users/{id}", with_store(Arc::clone(&store), update))
        .delete("/users/{id}", with_store(store, delete))
        .layer(ErrorTranslator)
        .layer(RequireAuthorization)
        .layer(RequestLogger)
}

/// Adapts a `(store, request)` handler into the `Fn(Request)` shape the
/// router expects, sharing one store across every route.
fn with_store<F, Fut>(
    store: Arc<UserStore>,
    handler: F,
) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<UserStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    move |req| handler(Arc::clone(&store), req)
}

// POST /users
async fn create(store: Arc<UserStore>, req: Request) -> HandlerResult {
    let payload = match parse_payload(&req) {
        Ok(p) => p,
        Err(res) => return Ok(res),
    };
    if let Err(errors) = validate(&payload) {
        return Ok(validation_failed(errors));
    }

    let (email, name) = payload.into_fields();
    let id = store.insert(email.clone(), name.clone())?;
    let user = User { id, email, name };

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/users/{id}"))
        .json(serde_json::to_vec(&user)?))
}

// GET /users
async fn list(store: Arc<UserStore>, _req: Request) -> HandlerResult {
    Ok(Response::json(serde_json::to_vec(&store.list()?)?))
}

// GET /users/{id}
async fn get(store: Arc<UserStore>, req: Request) -> HandlerResult {
    let Some(id) = path_id(&req) else {
        return Ok(Response::status(Status::NotFound));
    };
    match store.get(id)? {
        Some(user) => Ok(Response::json(serde_json::to_vec(&user)?)),
        None => Ok(Response::status(Status::NotFound)),
    }
}

// PUT /users/{id}
async fn update(store: Arc<UserStore>, req: Request) -> HandlerResult {
    let Some(id) = path_id(&req) else {
        return Ok(Response::status(Status::NotFound));
    };
    if !store.contains(id)? {
        return Ok(Response::status(Status::NotFound));
    }

    let payload = match parse_payload(&req) {
        Ok(p) => p,
        Err(res) => return Ok(res),
    };
    if let Err(errors) = validate(&payload) {
        return Ok(validation_failed(errors));
    }

    let (email, name) = payload.into_fields();
    match store.update(id, email, name)? {
        Some(user) => Ok(Response::json(serde_json::to_vec(&user)?)),
        // deleted between the existence check and the update
        None => Ok(Response::status(Status::NotFound)),
    }
}

// DELETE /users/{id}
async fn delete(store: Arc<UserStore>, req: Request) -> HandlerResult {
    let Some(id) = path_id(&req) else {
        return Ok(Response::status(Status::NotFound));
    };
    if store.remove(id)? {
        Ok(Response::status(Status::NoContent))
    } else {
        Ok(Response::status(Status::NotFound))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn path_id(req: &Request) -> Option<UserId> {
    req.param("id")?.parse().ok()
}

/// Empty body reads as `{}`. Malformed JSON, or JSON that is not an object,
/// is a 400 in the validation shape.
fn parse_payload(req: &Request) -> Result<UserPayload, Response> {
    if req.body().iter().all(u8::is_ascii_whitespace) {
        return Ok(UserPayload::default());
    }
    let value: Value = serde_json::from_slice(req.body())
        .map_err(|e| validation_failed(vec![e.to_string()]))?;
    // serde's struct derive would also accept a positional array
    if !value.is_object() {
        return Err(validation_failed(vec!["Request body must be a JSON object.".to_owned()]));
    }
    serde_json::from_value(value)
        .map_err(|e| validation_failed(vec![e.to_string()]))
}

fn validation_failed(errors: Vec<String>) -> Response {
    let body = json!({ "errors": errors }).to_string();
    Response::builder().status(Status::BadRequest).json(body.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;

    fn request(method: Method, path: &str, body: &str) -> Request {
        Request::builder(method, path)
            .header("Authorization", "Bearer test")
            .body(body.to_owned())
            .build()
    }

    fn json_of(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_location() {
        let store = Arc::new(UserStore::new());
        let router = app(Arc::clone(&store));

        let first = router
            .dispatch(request(Method::Post, "/users", r#"{"Email":"a@b.com","Name":"Ann"}"#))
            .await;
        let second = router
            .dispatch(request(Method::Post, "/users", r#"{"Email":"c@d.com","Name":"Cy"}"#))
            .await;

        assert_eq!(first.code(), 201);
        assert_eq!(first.header("location"), Some("/users/1"));
        assert_eq!(json_of(&first), json!({"Id": 1, "Email": "a@b.com", "Name": "Ann"}));
        assert_eq!(second.header("location"), Some("/users/2"));
        assert_eq!(json_of(&second)["Id"], 2);
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_id() {
        let router = app(Arc::new(UserStore::new()));

        let res = router
            .dispatch(request(Method::Post, "/users", r#"{"Id":99,"Email":"a@b.com","Name":"Ann"}"#))
            .await;

        assert_eq!(json_of(&res)["Id"], 1);
    }

    #[tokio::test]
    async fn create_with_empty_fields_lists_both_errors() {
        let store = Arc::new(UserStore::new());
        let router = app(Arc::clone(&store));

        let res = router
            .dispatch(request(Method::Post, "/users", r#"{"Email":"","Name":""}"#))
            .await;

        assert_eq!(res.code(), 400);
        assert_eq!(
            json_of(&res),
            json!({"errors": ["Email is required.", "Name is required."]})
        );
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn create_with_bad_email_is_rejected() {
        let router = app(Arc::new(UserStore::new()));

        let res = router
            .dispatch(request(Method::Post, "/users", r#"{"Email":"not-an-email","Name":"Ann"}"#))
            .await;

        assert_eq!(res.code(), 400);
        assert_eq!(json_of(&res), json!({"errors": ["Email is not valid."]}));
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_errors() {
        let router = app(Arc::new(UserStore::new()));

        let res = router.dispatch(request(Method::Post, "/users", "{not json")).await;

        assert_eq!(res.code(), 400);
        assert_eq!(json_of(&res)["errors"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn non_object_bodies_are_rejected() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        let router = app(Arc::clone(&store));

        for (method, path) in [(Method::Post, "/users"), (Method::Put, "/users/1")] {
            for body in [r#"["c@d.com","Cy"]"#, r#""c@d.com""#, "42"] {
                let res = router.dispatch(request(method, path, body)).await;
                assert_eq!(res.code(), 400, "{method} {path} {body}");
                assert_eq!(
                    json_of(&res),
                    json!({"errors": ["Request body must be a JSON object."]})
                );
            }
        }

        assert_eq!(
            store.list().unwrap(),
            [User { id: 1, email: "a@b.com".into(), name: "Ann".into() }]
        );
    }

    #[tokio::test]
    async fn empty_body_fails_validation() {
        let router = app(Arc::new(UserStore::new()));

        let res = router.dispatch(request(Method::Post, "/users", "")).await;

        assert_eq!(res.code(), 400);
        assert_eq!(
            json_of(&res),
            json!({"errors": ["Email is required.", "Name is required."]})
        );
    }

    #[tokio::test]
    async fn list_returns_all_users() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        store.insert("c@d.com".into(), "Cy".into()).unwrap();
        let router = app(store);

        let res = router.dispatch(request(Method::Get, "/users", "")).await;

        assert_eq!(res.code(), 200);
        assert_eq!(
            json_of(&res),
            json!([
                {"Id": 1, "Email": "a@b.com", "Name": "Ann"},
                {"Id": 2, "Email": "c@d.com", "Name": "Cy"}
            ])
        );
    }

    #[tokio::test]
    async fn get_unknown_or_unparseable_id_is_404() {
        let router = app(Arc::new(UserStore::new()));

        for path in ["/users/1", "/users/abc", "/users/-1"] {
            let res = router.dispatch(request(Method::Get, path, "")).await;
            assert_eq!(res.code(), 404, "{path}");
            assert!(res.body().is_empty());
        }
    }

    #[tokio::test]
    async fn update_missing_id_is_404_even_with_bad_payload() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        let router = app(Arc::clone(&store));

        let res = router.dispatch(request(Method::Put, "/users/5", r#"{"Email":""}"#)).await;

        assert_eq!(res.code(), 404);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn update_validates_existing_user() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        let router = app(Arc::clone(&store));

        let res = router
            .dispatch(request(Method::Put, "/users/1", r#"{"Email":"bad","Name":"Ann"}"#))
            .await;

        assert_eq!(res.code(), 400);
        assert_eq!(store.get(1).unwrap().map(|u| u.email).as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn delete_twice_is_204_then_404() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        let router = app(store);

        let first = router.dispatch(request(Method::Delete, "/users/1", "")).await;
        let second = router.dispatch(request(Method::Delete, "/users/1", "")).await;

        assert_eq!(first.code(), 204);
        assert!(first.body().is_empty());
        assert_eq!(second.code(), 404);
    }

    #[tokio::test]
    async fn every_route_requires_authorization() {
        let store = Arc::new(UserStore::new());
        store.insert("a@b.com".into(), "Ann".into()).unwrap();
        let router = app(Arc::clone(&store));
        let body = r#"{"Email":"x@y.com","Name":"X"}"#;

        for (method, path) in [
            (Method::Post, "/users"),
            (Method::Get, "/users"),
            (Method::Get, "/users/1"),
            (Method::Put, "/users/1"),
            (Method::Delete, "/users/1"),
            (Method::Get, "/nowhere"),
        ] {
            let req = Request::builder(method, path).body(body).build();
            let res = router.dispatch(req).await;
            assert_eq!(res.code(), 401, "{method} {path}");
        }

        assert_eq!(
            store.list().unwrap(),
            [User { id: 1, email: "a@b.com".into(), name: "Ann".into() }]
        );
    }
}
