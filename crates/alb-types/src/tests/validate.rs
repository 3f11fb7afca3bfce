use serde_json::json;

use super::fixture;
use crate::{
    ApiVersion, Edition, HealthMonitor, Pool, Schema, ValidateOptions, Violation,
    catalog::{find_kind, kinds},
    decode_value, validate, validate_value,
};

#[test]
fn fixtures_are_clean_under_enterprise() {
    let opts = ValidateOptions::default();
    for entry in kinds() {
        let violations = entry.validate(&fixture(entry.kind), &opts);
        assert!(violations.is_empty(), "{}: {violations:?}", entry.kind);
    }
}

#[test]
fn restricted_algorithm_is_flagged_for_basic() {
    let mut pool = Pool::new("web");
    pool.lb_algorithm = Some("LB_ALGORITHM_FASTEST_RESPONSE".into());

    assert!(validate(&pool, &ValidateOptions::new(Edition::Enterprise)).is_empty());

    let violations = validate(&pool, &ValidateOptions::new(Edition::Basic));
    match violations.as_slice() {
        [Violation::EditionRestricted { field, edition, value }] => {
            assert_eq!(field, "lb_algorithm");
            assert_eq!(*edition, Edition::Basic);
            assert_eq!(value, &json!("LB_ALGORITHM_FASTEST_RESPONSE"));
        }
        other => panic!("unexpected violations: {other:?}"),
    }

    pool.lb_algorithm = Some("LB_ALGORITHM_ROUND_ROBIN".into());
    assert!(validate(&pool, &ValidateOptions::new(Edition::Essentials)).is_empty());
}

#[test]
fn enterprise_only_flag_allows_default_elsewhere() {
    let mut pool = Pool::new("web");
    pool.use_service_port = Some(false);
    assert!(validate(&pool, &ValidateOptions::new(Edition::Essentials)).is_empty());

    pool.use_service_port = Some(true);
    let violations = validate(&pool, &ValidateOptions::new(Edition::Essentials));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field(), "use_service_port");
}

#[test]
fn unknown_enum_decodes_but_is_reported() {
    let monitor: HealthMonitor =
        decode_value(json!({"name": "hm", "type": "HEALTH_MONITOR_QUIC"})).unwrap();
    let violations = validate(&monitor, &ValidateOptions::default());
    assert!(matches!(
        violations.as_slice(),
        [Violation::UnknownEnumValue { value, .. }] if value == "HEALTH_MONITOR_QUIC"
    ));
}

#[test]
fn ranges_apply_to_nested_lists() {
    let violations = validate_value(
        Pool::schema(),
        &json!({
            "name": "web",
            "servers": [
                {"ip": {"addr": "10.0.0.1", "type": "V4"}, "ratio": 20},
                {"ip": {"addr": "10.0.0.2", "type": "V4"}, "ratio": 21}
            ]
        }),
        &ValidateOptions::default(),
    );
    assert_eq!(
        violations,
        vec![Violation::OutOfRange { field: "servers[1].ratio".into(), value: 21, min: 1, max: 20 }]
    );
}

#[test]
fn read_only_fields_flagged_only_for_writes() {
    let pool = fixture("pool");
    let entry = find_kind("pool").unwrap();
    assert!(entry.validate(&pool, &ValidateOptions::default()).is_empty());

    let write = ValidateOptions::default().for_write();
    let fields: Vec<_> = entry
        .validate(&pool, &write)
        .into_iter()
        .filter(|v| matches!(v, Violation::ReadOnlySet { .. }))
        .map(|v| v.field().to_string())
        .collect();
    assert_eq!(fields, vec!["url", "_last_modified"]);
}

#[test]
fn newer_fields_flagged_for_older_controllers() {
    let body = json!({"name": "web", "append_port": "ALWAYS"});
    let old = ValidateOptions::default().with_api_version(ApiVersion::parse("18.2.3").unwrap());
    let violations = validate_value(Pool::schema(), &body, &old);
    assert!(matches!(
        violations.as_slice(),
        [Violation::NotInVersion { since: "20.1.1", version, .. }] if version == "18.2.3"
    ));

    let current = ValidateOptions::default().with_api_version(ApiVersion::parse("22.1").unwrap());
    assert!(validate_value(Pool::schema(), &body, &current).is_empty());
}

#[test]
fn conflicting_required_field_is_reported_as_missing() {
    let body = json!({
        "rules": [{
            "action": "NETWORK_SECURITY_POLICY_ACTION_TYPE_ALLOW",
            "enable": true,
            "index": 1,
            "name": "allow"
        }]
    });
    let entry = find_kind("networksecuritypolicy").unwrap();
    assert_eq!(
        entry.validate(&body, &ValidateOptions::default()),
        vec![Violation::MissingRequired { field: "rules[0].match".into() }]
    );
}

#[test]
fn monitor_types_gated_per_edition() {
    let monitor = HealthMonitor::new("dns", "HEALTH_MONITOR_DNS");
    assert!(validate(&monitor, &ValidateOptions::default()).is_empty());
    let violations = validate(&monitor, &ValidateOptions::new(Edition::Essentials));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field(), "type");
}

#[test]
fn empty_reference_is_advisory() {
    let body = json!({"name": "web", "tenant_ref": "", "health_monitor_refs": ["hm-1", "  "]});
    assert!(decode_value::<Pool>(body.clone()).is_ok());
    assert_eq!(
        validate_value(Pool::schema(), &body, &ValidateOptions::default()),
        vec![
            Violation::EmptyReference { field: "tenant_ref".into() },
            Violation::EmptyReference { field: "health_monitor_refs[1]".into() },
        ]
    );
}
