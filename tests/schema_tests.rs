use argbind::{
    build_schema, ArgumentContainer, BindErrorCode, ConfigError, FieldConfig, FieldKind,
    RawArguments, Signature, Validators,
};
use serde_json::json;

fn validators(entries: &[(&str, FieldKind)]) -> Validators {
    entries
        .iter()
        .map(|(name, kind)| (name.to_string(), FieldConfig::new(kind.clone())))
        .collect()
}

#[test]
fn test_build_schema_basic() {
    let sig = Signature::parse("get_pet(pet_id, limit = 25, verbose = false)").expect("parse");
    let schema = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)])).expect("build");

    assert_eq!(schema.handler_name(), "get_pet");
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.required_names(), vec!["pet_id"]);

    let limit = schema.param("limit").expect("limit exists");
    assert!(limit.has_default());
    assert!(limit.has_field());
    let pet_id = schema.param("pet_id").expect("pet_id exists");
    assert!(pet_id.is_required());
    assert!(!pet_id.has_field());
}

#[test]
fn test_default_coerced_at_build_time() {
    // A string default behind an Integer field resolves numerically even
    // when the call supplies nothing.
    let sig = Signature::parse(r#"list_pets(limit = "25")"#).expect("parse");
    let schema = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)])).expect("build");

    let raw = RawArguments::new();
    let container = ArgumentContainer::bind(&schema, &raw).expect("bind");
    let args = container.args().expect("args");
    assert_eq!(args.as_slice(), &[json!(25)]);
}

#[test]
fn test_plain_default_stored_unmodified() {
    let sig = Signature::parse(r#"list_pets(limit = "25")"#).expect("parse");
    let schema = build_schema(&sig, &Validators::new()).expect("build");

    let raw = RawArguments::new();
    let container = ArgumentContainer::bind(&schema, &raw).expect("bind");
    let args = container.args().expect("args");
    assert_eq!(args.as_slice(), &[json!("25")]);
}

#[test]
fn test_unknown_validator_parameter() {
    let sig = Signature::parse("get_pet(pet_id)").expect("parse");
    let err = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)]))
        .expect_err("build should fail");
    assert!(
        matches!(err, ConfigError::UnknownParameter { handler, name } if handler == "get_pet" && name == "limit")
    );
}

#[test]
fn test_invalid_default_rejected_at_build() {
    let sig = Signature::parse(r#"get_pet(limit = "lots")"#).expect("parse");
    let err = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)]))
        .expect_err("build should fail");
    assert!(matches!(err, ConfigError::InvalidDefault { name, .. } if name == "limit"));
}

#[test]
fn test_null_default_builds_but_fails_on_read() {
    // A null default is skipped at seed time; reading the never-written
    // field applies the format to null and fails.
    let sig = Signature::parse("get_pet(limit = null)").expect("parse");
    let schema = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)])).expect("build");

    let raw = RawArguments::new();
    let container = ArgumentContainer::bind(&schema, &raw).expect("bind");
    let err = container.args().expect_err("args should fail");
    assert_eq!(err.error_code, BindErrorCode::ArgumentFormat);
}

#[test]
fn test_schema_is_reusable_across_calls() {
    let sig = Signature::parse("get_pet(pet_id, limit = 10)").expect("parse");
    let schema = build_schema(&sig, &validators(&[("limit", FieldKind::Integer)])).expect("build");

    let mut first = RawArguments::new();
    first.insert("pet_id".to_string(), json!("1"));
    first.insert("limit".to_string(), json!("50"));
    let args1 = ArgumentContainer::bind(&schema, &first)
        .expect("bind")
        .args()
        .expect("args");
    assert_eq!(args1.as_slice(), &[json!("1"), json!(50)]);

    // Second call omits the optional parameter; the build-time default is
    // still in place, untouched by the first call's write.
    let mut second = RawArguments::new();
    second.insert("pet_id".to_string(), json!("2"));
    let args2 = ArgumentContainer::bind(&schema, &second)
        .expect("bind")
        .args()
        .expect("args");
    assert_eq!(args2.as_slice(), &[json!("2"), json!(10)]);
}
