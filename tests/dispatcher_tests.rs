use argbind::{
    merge_raw_arguments, BindError, BindErrorCode, Binder, DiagnosticSink, Dispatcher, FieldKind,
    ParsedRequest,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[test]
fn test_merge_precedence() {
    // body < query/form values < path variables
    let request = ParsedRequest::new()
        .with_body(json!({"a": 1}))
        .with_value("a", "2")
        .with_value("b", "3")
        .with_path_var("a", "4");

    let raw = merge_raw_arguments(&request);
    assert_eq!(raw.get("a"), Some(&json!("4")));
    assert_eq!(raw.get("b"), Some(&json!("3")));
}

#[test]
fn test_merge_flattens_multi_valued_entries() {
    let request = ParsedRequest::new()
        .with_value("limit", "10")
        .with_value("limit", "20");
    let raw = merge_raw_arguments(&request);
    assert_eq!(raw.get("limit"), Some(&json!("10")));
}

#[test]
fn test_merge_ignores_non_object_body() {
    let request = ParsedRequest::new().with_body(json!([1, 2, 3]));
    assert!(merge_raw_arguments(&request).is_empty());
}

#[test]
fn test_merge_keeps_body_value_types() {
    let request = ParsedRequest::new().with_body(json!({"limit": 10, "active": true}));
    let raw = merge_raw_arguments(&request);
    assert_eq!(raw.get("limit"), Some(&json!(10)));
    assert_eq!(raw.get("active"), Some(&json!(true)));
}

#[test]
fn test_bound_handler_end_to_end() {
    let handler = Binder::new()
        .field("pet_id", FieldKind::Integer)
        .field("limit", FieldKind::Integer)
        .bind("get_pet(pet_id, limit = 25)", |args: &[Value]| {
            json!({ "pet_id": args[0], "limit": args[1] })
        })
        .expect("bind failed");

    let request = ParsedRequest::new()
        .with_path_var("pet_id", "7")
        .with_value("limit", "50");
    let result = handler.call(&request).expect("call failed");
    assert_eq!(result, json!({ "pet_id": 7, "limit": 50 }));

    // Omitting the optional parameter falls back to the schema default.
    let request = ParsedRequest::new().with_path_var("pet_id", "8");
    let result = handler.call(&request).expect("call failed");
    assert_eq!(result, json!({ "pet_id": 8, "limit": 25 }));
}

#[test]
fn test_bound_handler_missing_required() {
    let handler = Binder::new()
        .bind("get_pet(pet_id)", |_: &[Value]| json!(null))
        .expect("bind failed");

    let err = handler
        .call(&ParsedRequest::new())
        .expect_err("call should fail");
    assert_eq!(err.error_code, BindErrorCode::ArgumentMissing);
    assert!(err.error_msg.contains("pet_id"));
    assert_eq!(err.status_code, 200);
}

#[test]
fn test_failed_binding_never_invokes_handler() {
    let invoked = Arc::new(Mutex::new(false));
    let seen = Arc::clone(&invoked);
    let handler = Binder::new()
        .field("limit", FieldKind::Integer)
        .bind("list_pets(limit = 10)", move |_: &[Value]| {
            *seen.lock().expect("lock") = true;
            json!(null)
        })
        .expect("bind failed");

    let request = ParsedRequest::new().with_value("limit", "ten");
    assert!(handler.call(&request).is_err());
    assert!(!*invoked.lock().expect("lock"));
}

#[test]
fn test_typed_return_is_serialized() {
    #[derive(serde::Serialize)]
    struct Pet {
        id: i64,
        name: String,
    }

    let handler = Binder::new()
        .bind("get_pet(pet_id)", |args: &[Value]| Pet {
            id: args[0].as_str().and_then(|s| s.parse().ok()).unwrap_or(0),
            name: "Fluffy".to_string(),
        })
        .expect("bind failed");

    let request = ParsedRequest::new().with_path_var("pet_id", "3");
    let result = handler.call(&request).expect("call failed");
    assert_eq!(result, json!({ "id": 3, "name": "Fluffy" }));
}

#[test]
fn test_sequential_calls_share_no_state() {
    let handler = Binder::new()
        .field("tags", FieldKind::list())
        .bind("tag_pets(owner, tags = \"1,2\")", |args: &[Value]| {
            json!({ "owner": args[0], "tags": args[1] })
        })
        .expect("bind failed");

    let first = handler
        .call(
            &ParsedRequest::new()
                .with_path_var("owner", "a")
                .with_value("tags", "7,8"),
        )
        .expect("first call failed");
    assert_eq!(first["tags"], json!([7, 8]));

    let second = handler
        .call(&ParsedRequest::new().with_path_var("owner", "b"))
        .expect("second call failed");
    assert_eq!(second["tags"], json!([1, 2]));
}

#[derive(Default)]
struct CollectingSink {
    events: Mutex<Vec<String>>,
}

impl CollectingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    fn push(&self, event: String) {
        self.events.lock().expect("lock").push(event);
    }
}

impl DiagnosticSink for CollectingSink {
    fn handler_registered(&self, handler: &str, replaced: bool) {
        self.push(format!("registered:{handler}:{replaced}"));
    }

    fn dispatch_started(&self, handler: &str) {
        self.push(format!("started:{handler}"));
    }

    fn dispatch_succeeded(&self, handler: &str, _latency: std::time::Duration) {
        self.push(format!("ok:{handler}"));
    }

    fn dispatch_failed(&self, handler: &str, error: &BindError) {
        self.push(format!("failed:{handler}:{}", error.error_code));
    }
}

fn dispatcher_with_sink() -> (Dispatcher, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::default());
    let dispatcher = Dispatcher::with_sink(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
    (dispatcher, sink)
}

#[test]
fn test_dispatch_success_and_failure_reach_sink() {
    let (mut dispatcher, sink) = dispatcher_with_sink();
    let handler = Binder::new()
        .bind("get_pet(pet_id)", |args: &[Value]| args[0].clone())
        .expect("bind failed");
    dispatcher.register(handler);

    let ok = dispatcher
        .dispatch("get_pet", &ParsedRequest::new().with_path_var("pet_id", "5"))
        .expect("handler registered")
        .expect("call succeeds");
    assert_eq!(ok, json!("5"));

    let err = dispatcher
        .dispatch("get_pet", &ParsedRequest::new())
        .expect("handler registered")
        .expect_err("call fails");
    assert_eq!(err.error_code, BindErrorCode::ArgumentMissing);

    assert_eq!(
        sink.events(),
        vec![
            "registered:get_pet:false".to_string(),
            "started:get_pet".to_string(),
            "ok:get_pet".to_string(),
            "started:get_pet".to_string(),
            "failed:get_pet:ARGUMENT_MISSING".to_string(),
        ]
    );
}

#[test]
fn test_dispatch_unknown_handler_returns_none() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch("nope", &ParsedRequest::new()).is_none());
}

#[test]
fn test_register_replaces_existing_handler() {
    let (mut dispatcher, sink) = dispatcher_with_sink();
    let binder = Binder::new();
    dispatcher.register(
        binder
            .bind("get_pet()", |_: &[Value]| json!("old"))
            .expect("bind failed"),
    );
    dispatcher.register(
        binder
            .bind("get_pet()", |_: &[Value]| json!("new"))
            .expect("bind failed"),
    );

    let result = dispatcher
        .dispatch("get_pet", &ParsedRequest::new())
        .expect("handler registered")
        .expect("call succeeds");
    assert_eq!(result, json!("new"));
    assert_eq!(
        sink.events(),
        vec![
            "registered:get_pet:false".to_string(),
            "registered:get_pet:true".to_string(),
            "started:get_pet".to_string(),
            "ok:get_pet".to_string(),
        ]
    );
    assert_eq!(dispatcher.handler_names(), vec!["get_pet"]);
}
