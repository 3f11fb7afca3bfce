use jsonschema::{JSONSchema, paths::JSONPointer};
use serde_json::{Value, json};

pub mod codec;
pub mod collections;
pub mod validate;

/// A realistic controller response for each catalog kind, using only modelled
/// fields with non-default values.
pub(crate) fn fixture(kind: &str) -> Value {
    match kind {
        "tenant" => json!({
            "uuid": "tenant-1",
            "url": "https://ctl/api/tenant/tenant-1",
            "_last_modified": "1699987200123456",
            "name": "admin",
            "local": true,
            "config_settings": {"tenant_vrf": false}
        }),
        "pool" => json!({
            "uuid": "pool-1",
            "url": "https://ctl/api/pool/pool-1",
            "_last_modified": "1699987200123456",
            "tenant_ref": "https://ctl/api/tenant/tenant-1",
            "name": "web",
            "default_server_port": 8080,
            "lb_algorithm": "LB_ALGORITHM_ROUND_ROBIN",
            "servers": [
                {"ip": {"addr": "10.0.0.1", "type": "V4"}, "ratio": 2},
                {"ip": {"addr": "10.0.0.2", "type": "V4"}, "enabled": false}
            ],
            "health_monitor_refs": ["https://ctl/api/healthmonitor/hm-1"]
        }),
        "healthmonitor" => json!({
            "uuid": "hm-1",
            "name": "http-check",
            "type": "HEALTH_MONITOR_HTTP",
            "send_interval": 5,
            "http_monitor": {
                "http_request": "GET /healthz HTTP/1.1",
                "http_response_code": ["HTTP_2XX", "HTTP_3XX"]
            }
        }),
        "httppolicyset" => json!({
            "uuid": "httppolicyset-1",
            "name": "redirects",
            "http_request_policy": {
                "rules": [
                    {
                        "enable": true,
                        "index": 2,
                        "name": "to-https",
                        "match": {"path": {"match_criteria": "BEGINS_WITH", "match_str": ["/login"]}},
                        "redirect_action": {"protocol": "HTTPS", "port": 443}
                    },
                    {"enable": false, "index": 1, "name": "r1"}
                ]
            }
        }),
        "networksecuritypolicy" => json!({
            "uuid": "nsp-1",
            "name": "block-bad",
            "rules": [{
                "action": "NETWORK_SECURITY_POLICY_ACTION_TYPE_DENY",
                "age": 30,
                "enable": true,
                "index": 1,
                "match": {
                    "client_ip": {
                        "match_criteria": "IS_IN",
                        "addrs": [{"addr": "192.0.2.1", "type": "V4"}]
                    }
                },
                "name": "deny-range"
            }]
        }),
        "virtualservice" => json!({
            "uuid": "vs-1",
            "name": "frontend",
            "services": [{"port": 80}, {"port": 443, "enable_ssl": true}],
            "pool_ref": "https://ctl/api/pool/pool-1",
            "http_policies": [{
                "index": 11,
                "http_policy_set_ref": "https://ctl/api/httppolicyset/httppolicyset-1"
            }],
            "network_security_policy_ref": "https://ctl/api/networksecuritypolicy/nsp-1"
        }),
        "alert" => json!({
            "uuid": "alert-1",
            "name": "pool-down",
            "level": "ALERT_HIGH",
            "obj_uuid": "pool-1",
            "summary": "Pool web is down",
            "reason": "threshold_exceeded",
            "timestamp": 1699987200.5,
            "related_uuid": ["pool-1"],
            "throttle_count": 3
        }),
        other => panic!("no fixture for kind {other}"),
    }
}

pub(crate) fn compile(schema: &Value) -> JSONSchema {
    JSONSchema::options()
        .compile(schema)
        .expect("exported schema must compile successfully")
}

pub(crate) fn assert_json_schema(schema: &Value, instance: &Value) {
    let compiled = compile(schema);
    if let Err(errors) = compiled.validate(instance) {
        let mut messages = Vec::new();
        for err in errors {
            messages.push(format!("{}: {}", format_pointer(&err.instance_path), err));
        }
        panic!(
            "schema validation failed: {}\ninstance: {}",
            messages.join("; "),
            instance
        );
    }
}

fn format_pointer(pointer: &JSONPointer) -> String {
    let text = pointer.to_string();
    if text.is_empty() { "/".into() } else { text }
}
