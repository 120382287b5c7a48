use super::*;

fn reference(s: &str) -> Reference {
    s.parse().unwrap()
}

#[test]
fn test_rule_a_official_image() {
    let dest = map_destination(&reference("docker.io/library/nginx"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/nginx");
}

#[test]
fn test_rule_a_is_case_insensitive() {
    let dest = map_destination(&reference("docker.io/Library/redis"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/redis");
}

#[test]
fn test_rule_b_collapsed_namespace() {
    let dest = map_destination(&reference("host/name/name"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/name");
}

#[test]
fn test_rule_b_is_case_insensitive() {
    let dest = map_destination(&reference("host/Grafana/grafana"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/grafana");
}

#[test]
fn test_rule_c_default_flattens_namespace() {
    let dest =
        map_destination(&reference("registry.example.com/org/image"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/org-image");
}

#[test]
fn test_rule_c_flattens_deep_namespaces() {
    let dest = map_destination(
        &reference("registry.k8s.io/sig-storage/csi/driver"),
        "hub.example/mirror",
    )
    .unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/sig-storage-csi-driver");
}

#[test]
fn test_two_component_reference_uses_rule_c() {
    let dest = map_destination(&reference("docker.io/nginx"), "hub.example/mirror").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/nginx");
}

#[test]
fn test_hub_trailing_slash_is_ignored() {
    let dest = map_destination(&reference("docker.io/library/nginx"), "hub.example/mirror/").unwrap();
    assert_eq!(dest.as_str(), "hub.example/mirror/nginx");
}

#[test]
fn test_empty_hub_is_rejected() {
    let err = map_destination(&reference("docker.io/library/nginx"), "  ").unwrap_err();
    assert!(matches!(err, MirrorError::Validation { .. }));
}

#[test]
fn test_destination_is_stable_across_calls() {
    let source = reference("quay.io/prometheus/node-exporter");
    let first = map_destination(&source, "hub.example/mirror").unwrap();
    let second = map_destination(&source, "hub.example/mirror").unwrap();
    assert_eq!(first, second);
}
