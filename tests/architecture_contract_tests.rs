//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_non_export_lines_in_mod_files, path_exists, read_relative,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn cli_reaches_outbound_adapters_only_through_operator() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["crate::adapter::outbound", "crate::application::"],
    );

    assert!(
        hits.is_empty(),
        "CLI handlers should call the operator port, found: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "tokio_postgres::",
            "reqwest::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn application_depends_on_ports_not_adapters() {
    let hits = find_lines_containing(
        "src/application",
        &[
            "crate::adapter::",
            "crate::infrastructure::",
            "tokio_postgres::",
            "reqwest::",
        ],
    );

    assert!(
        hits.is_empty(),
        "application layer should only use domain and port types: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn cli_operator_bridge_uses_operator_name() {
    let source = read_relative("src/adapter/inbound/cli/operator.rs");
    assert!(
        source.contains("pub fn operator() -> &'static dyn OperatorPort"),
        "operator bridge should expose `operator()` capability accessor"
    );
}

#[test]
fn operator_ports_take_config_content_not_paths() {
    let hits = find_lines_containing(
        "src/port/inbound/operator",
        &["std::path::Path", "PathBuf", "&Path"],
    );

    assert!(
        hits.is_empty(),
        "operator ports should receive config content, found path types: {hits:#?}"
    );
}

#[test]
fn startup_path_never_prints_to_stdout() {
    for dir in [
        "src/application",
        "src/infrastructure",
        "src/adapter/outbound",
    ] {
        let hits = find_lines_containing(dir, &["println!", "print!(", "std::io::stdout"]);
        assert!(
            hits.is_empty(),
            "stdout belongs to the exec'd server, found writes in {dir}: {hits:#?}"
        );
    }

    let entrypoint = read_relative("src/adapter/inbound/cli/entrypoint.rs");
    assert!(
        !entrypoint.contains("output::"),
        "entrypoint handler should not write CLI output"
    );
}

#[test]
fn init_script_ships_with_compose_setup() {
    assert!(path_exists("docker/init-databases.sql"));
    assert!(path_exists("docker/docker-compose.yml"));
    assert!(path_exists("docker/Dockerfile"));
}

#[test]
fn compose_gateway_uses_in_network_postgres_port() {
    let compose = read_relative("docker/docker-compose.yml");
    let gateway = compose
        .split("\n  gateway:")
        .nth(1)
        .expect("compose file should define a gateway service");
    assert!(
        gateway.contains("POSTGRES_PORT: 5432"),
        "gateway must not inherit the host-side POSTGRES_PORT from .env"
    );
}
