use serde_json::json;

use super::fixture;
use crate::{
    DecodeError, EncodeError, HttpPolicies, HttpRequestRule, IpAddr, NetworkSecurityPolicy,
    NetworkSecurityRule, Pool, Ref, Server, Tenant, Timestamp, VirtualService,
    catalog::kinds, decode, decode_value, encode, encode_for_write, encode_value,
};

#[test]
fn minimal_rule_encodes_only_its_three_fields() {
    let rule = HttpRequestRule::new(1, "r1");
    let value = encode_value(&rule).unwrap();
    assert_eq!(value, json!({"enable": true, "index": 1, "name": "r1"}));
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn unset_optionals_are_omitted() {
    let value = encode_value(&Pool::new("web")).unwrap();
    assert_eq!(value, json!({"name": "web"}));

    let value = encode_value(&VirtualService::new("vs")).unwrap();
    assert!(value.get("pool_ref").is_none());
    assert!(value.get("services").is_none());
}

#[test]
fn every_fixture_survives_decode_then_encode() {
    for entry in kinds() {
        let wire = fixture(entry.kind);
        let normalized = entry
            .normalize(wire.clone())
            .unwrap_or_else(|err| panic!("{}: {err}", entry.kind));
        assert_eq!(normalized, wire, "{} did not round-trip", entry.kind);
    }
}

#[test]
fn typed_round_trip_keeps_every_set_field() {
    let mut pool = Pool::new("web");
    pool.uuid = Some("pool-1".into());
    pool.tenant_ref = Some(Ref::new("https://ctl/api/tenant/tenant-1"));
    pool.last_modified = Some(Timestamp::from_micros(1_700_000_000_000_001));
    pool.default_server_port = Some(8443);
    pool.servers = vec![
        Server { ratio: Some(5), ..Server::new(IpAddr::v4("10.0.0.1")) },
        Server { port: Some(9000), hostname: Some("b".into()), ..Server::new(IpAddr::v4("10.0.0.2")) },
    ];
    pool.health_monitor_refs = vec![Ref::new("hm-1")];

    let bytes = encode(&pool).unwrap();
    let back: Pool = decode(&bytes).unwrap();
    assert_eq!(back, pool);
}

#[test]
fn explicit_null_round_trips_distinct_from_absent() {
    let mut vs = VirtualService::new("vs");
    vs.pool_ref = Some(None);
    let value = encode_value(&vs).unwrap();
    assert_eq!(value, json!({"name": "vs", "pool_ref": null}));

    let back: VirtualService = decode_value(value).unwrap();
    assert_eq!(back.pool_ref, Some(None));

    let absent: VirtualService = decode_value(json!({"name": "vs"})).unwrap();
    assert_eq!(absent.pool_ref, None);
}

#[test]
fn absent_optional_scalars_stay_unset() {
    let pool: Pool = decode_value(json!({"name": "web"})).unwrap();
    assert_eq!(pool.enabled, None);
    assert_eq!(pool.default_server_port, None);
    assert_eq!(pool.lb_algorithm, None);
    assert!(pool.servers.is_empty());
    assert_eq!(encode_value(&pool).unwrap(), json!({"name": "web"}));
}

#[test]
fn null_optional_list_decodes_as_empty() {
    let pool: Pool = decode_value(json!({"name": "web", "servers": null, "description": null})).unwrap();
    assert!(pool.servers.is_empty());
    assert_eq!(pool.description, None);
    assert_eq!(encode_value(&pool).unwrap(), json!({"name": "web"}));

    let vs: VirtualService =
        decode_value(json!({"name": "vs", "services": null, "http_policies": null})).unwrap();
    assert!(vs.services.is_empty());
    assert!(vs.http_policies.is_empty());
}

#[test]
fn empty_reference_is_carried_opaquely() {
    let wire = json!({"name": "web", "tenant_ref": "", "health_monitor_refs": [" "]});
    let pool: Pool = decode_value(wire.clone()).unwrap();
    assert_eq!(pool.tenant_ref.as_ref().map(Ref::as_str), Some(""));
    assert_eq!(encode_value(&pool).unwrap(), wire);
}

#[test]
fn missing_required_field_fails_decode() {
    let err = decode_value::<Pool>(json!({"description": "no name"})).unwrap_err();
    assert!(matches!(err, DecodeError::MissingRequired { kind: "Pool", .. }));
    assert_eq!(err.field(), Some("name"));

    let err = decode_value::<Tenant>(json!({"name": null})).unwrap_err();
    assert_eq!(err.field(), Some("name"));
}

#[test]
fn nested_failures_carry_their_path() {
    let err = decode_value::<Pool>(json!({"name": "web", "servers": [{"ip": {"addr": "10.0.0.1", "type": "V4"}}, {"port": 80}]}))
        .unwrap_err();
    assert!(matches!(err, DecodeError::MissingRequired { .. }));
    assert_eq!(err.field(), Some("servers[1].ip"));

    let err = decode_value::<Pool>(json!({"name": "web", "servers": [{"ip": {"addr": 5, "type": "V4"}}]}))
        .unwrap_err();
    match err {
        DecodeError::TypeMismatch { field, expected, found, .. } => {
            assert_eq!(field, "servers[0].ip.addr");
            assert_eq!(expected, "string");
            assert_eq!(found, "integer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_object_and_malformed_payloads_are_rejected() {
    let err = decode_value::<Pool>(json!(["web"])).unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { expected: "object", found: "array", .. }));
    assert!(matches!(decode::<Pool>(b"{\"name\": "), Err(DecodeError::Malformed { .. })));
}

#[test]
fn out_of_width_integer_is_invalid_not_truncated() {
    let err = decode_value::<Pool>(json!({"name": "web", "default_server_port": 70000})).unwrap_err();
    assert!(matches!(err, DecodeError::Invalid { kind: "Pool", .. }));
}

#[test]
fn required_omit_empty_fields_are_treated_as_required() {
    let wire = json!({
        "name": "nsp",
        "rules": [{
            "action": "NETWORK_SECURITY_POLICY_ACTION_TYPE_ALLOW",
            "enable": true,
            "index": 1,
            "name": "allow-all"
        }]
    });
    let err = decode_value::<NetworkSecurityPolicy>(wire).unwrap_err();
    assert_eq!(err.field(), Some("rules[0].match"));

    let policy = NetworkSecurityPolicy {
        rules: vec![NetworkSecurityRule {
            action: "NETWORK_SECURITY_POLICY_ACTION_TYPE_ALLOW".into(),
            enable: true,
            index: 1,
            name: "allow-all".into(),
            ..Default::default()
        }],
        ..Default::default()
    };
    match encode_value(&policy).unwrap_err() {
        EncodeError::MissingRequired { kind, field } => {
            assert_eq!(kind, "NetworkSecurityPolicy");
            assert_eq!(field, "rules[0].match");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut vs = VirtualService::new("vs");
    vs.http_policies.push(HttpPolicies { index: 11, http_policy_set_ref: None });
    assert!(encode_value(&vs).is_err());
}

#[test]
fn unknown_keys_and_enum_tokens_are_tolerated() {
    let wire = json!({
        "name": "web",
        "lb_algorithm": "LB_ALGORITHM_FROM_THE_FUTURE",
        "some_new_field": {"nested": [1, 2, 3]}
    });
    let pool: Pool = decode_value(wire).unwrap();
    assert_eq!(pool.lb_algorithm.as_deref(), Some("LB_ALGORITHM_FROM_THE_FUTURE"));

    let value = encode_value(&pool).unwrap();
    assert_eq!(value, json!({"name": "web", "lb_algorithm": "LB_ALGORITHM_FROM_THE_FUTURE"}));
}

#[test]
fn write_form_drops_read_only_fields_at_every_depth() {
    let pool: Pool = decode_value(fixture("pool")).unwrap();
    let body = encode_for_write(&pool).unwrap();
    assert!(body.get("url").is_none());
    assert!(body.get("_last_modified").is_none());
    assert_eq!(body["uuid"], "pool-1");
    assert_eq!(body["servers"][0]["ip"]["addr"], "10.0.0.1");
}
