//! Sidecar command builder.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::flags;
use crate::domain::{CommandSpec, RunConfiguration, SidecarOs};
use crate::error::PortError;
use crate::ports::{MtlsInspector, PortAllocator};
use crate::settings::UNLIMITED;

/// A built sidecar command together with the ports it was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarCommand {
    pub command: CommandSpec,
    pub http_port: u16,
    pub grpc_port: u16,
    pub metrics_port: u16,
    /// Set only when profiling is enabled.
    pub profile_port: Option<u16>,
}

/// Builder for the sidecar (`daprd`) invocation.
///
/// Flags are emitted in a fixed order:
/// 1. Core flags (app ID, ports, log level, limits, protocol, components)
/// 2. `--app-port` if the application port is set
/// 3. `--placement-host-address`, with a platform default port if missing
/// 4. `--config`, plus `--enable-mtls --sentry-address` if the config enables mTLS
/// 5. `--enable-profiling --profile-port` if profiling is enabled
/// 6. `--app-ssl` if the application serves TLS
///
/// # Example
///
/// ```rust,ignore
/// let sidecar = SidecarCommandBuilder::new(daprd_path, &ports, &mtls)
///     .os(SidecarOs::Unix)
///     .build("orders", &config)?;
/// ```
pub struct SidecarCommandBuilder<'a> {
    binary_path: PathBuf,
    os: SidecarOs,
    ports: &'a dyn PortAllocator,
    mtls: &'a dyn MtlsInspector,
}

impl<'a> SidecarCommandBuilder<'a> {
    /// Create a builder for the host platform.
    pub fn new(
        binary_path: impl Into<PathBuf>,
        ports: &'a dyn PortAllocator,
        mtls: &'a dyn MtlsInspector,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            os: SidecarOs::current(),
            ports,
            mtls,
        }
    }

    /// Override the sidecar platform designation.
    #[must_use]
    pub const fn os(mut self, os: SidecarOs) -> Self {
        self.os = os;
        self
    }

    /// Build the sidecar command for `app_id`.
    ///
    /// Fails only when a port allocation fails.
    pub fn build(
        &self,
        app_id: &str,
        config: &RunConfiguration,
    ) -> Result<SidecarCommand, PortError> {
        let http_port = self.resolve_port(config.http_port, "http")?;
        let grpc_port = self.resolve_port(config.grpc_port, "grpc")?;
        let metrics_port = self.resolve_port(config.metrics_port, "metrics")?;

        let mut args = ArgList::default();
        args.value(flags::APP_ID, app_id)
            .value(flags::HTTP_PORT, http_port)
            .value(flags::GRPC_PORT, grpc_port)
            .value(flags::LOG_LEVEL, &config.log_level)
            .value(
                flags::APP_MAX_CONCURRENCY,
                normalize_max_concurrency(config.max_concurrency),
            )
            .value(flags::APP_PROTOCOL, &config.protocol)
            .value(flags::COMPONENTS_PATH, config.components_path.display())
            .value(flags::METRICS_PORT, metrics_port)
            .value(
                flags::MAX_REQUEST_SIZE,
                normalize_max_request_size(config.max_request_body_size),
            );

        if let Some(app_port) = config.app_port {
            args.value(flags::APP_PORT, app_port);
        }

        args.value(
            flags::PLACEMENT_HOST_ADDRESS,
            placement_address(&config.placement_host_address, self.os),
        );

        if let Some(config_file) = config
            .config_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
        {
            self.push_config(&mut args, config_file);
        }

        let profile_port = if config.enable_profiling {
            let port = self.resolve_port(config.profile_port, "profile")?;
            args.flag(flags::ENABLE_PROFILING)
                .value(flags::PROFILE_PORT, port);
            Some(port)
        } else {
            None
        };

        if config.app_ssl {
            args.flag(flags::APP_SSL);
        }

        Ok(SidecarCommand {
            command: CommandSpec::new(&self.binary_path, args.into_vec()),
            http_port,
            grpc_port,
            metrics_port,
            profile_port,
        })
    }

    fn push_config(&self, args: &mut ArgList, config_file: &Path) {
        args.value(flags::CONFIG, config_file.display());

        match self
            .mtls
            .sentry_address(config_file)
            .filter(|addr| !addr.is_empty())
        {
            Some(sentry) => {
                debug!(config = %config_file.display(), %sentry, "mTLS enabled by config");
                args.flag(flags::ENABLE_MTLS)
                    .value(flags::SENTRY_ADDRESS, sentry);
            }
            None => debug!(config = %config_file.display(), "mTLS not enabled by config"),
        }
    }

    fn resolve_port(&self, pinned: Option<u16>, kind: &'static str) -> Result<u16, PortError> {
        if let Some(port) = pinned {
            return Ok(port);
        }
        let port = self.ports.allocate()?;
        debug!(port, kind, "Allocated free port");
        Ok(port)
    }
}

/// Values below 1 mean "unlimited" and are emitted as `-1`.
pub const fn normalize_max_concurrency(max: i32) -> i32 {
    if max < 1 { UNLIMITED } else { max }
}

/// Negative values mean "unlimited" and are emitted as `-1`.
pub const fn normalize_max_request_size(size: i32) -> i32 {
    if size < 0 { UNLIMITED } else { size }
}

/// Append the platform default placement port when `address` has none.
///
/// Any `:` counts as an explicit port; the address is then passed through.
pub fn placement_address(address: &str, os: SidecarOs) -> String {
    if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, os.default_placement_port())
    }
}

/// Ordered flag/value accumulator.
#[derive(Debug, Default)]
struct ArgList(Vec<String>);

impl ArgList {
    fn value(&mut self, flag: &str, value: impl Display) -> &mut Self {
        self.0.push(flag.to_string());
        self.0.push(value.to_string());
        self
    }

    fn flag(&mut self, flag: &str) -> &mut Self {
        self.0.push(flag.to_string());
        self
    }

    fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedPortAllocator, MockMtlsInspector, MockPortAllocator, MtlsDisabled};

    const DAPRD: &str = "/home/dev/.dapr/bin/daprd";

    fn pinned_config() -> RunConfiguration {
        RunConfiguration::new("/home/dev/.dapr/components")
            .with_http_port(3500)
            .with_grpc_port(50001)
            .with_metrics_port(9090)
    }

    fn no_ports() -> FixedPortAllocator {
        FixedPortAllocator::new(std::iter::empty())
    }

    fn build_with(
        config: &RunConfiguration,
        ports: &dyn PortAllocator,
        mtls: &dyn MtlsInspector,
        os: SidecarOs,
    ) -> Result<SidecarCommand, PortError> {
        SidecarCommandBuilder::new(DAPRD, ports, mtls)
            .os(os)
            .build("orders", config)
    }

    fn build(config: &RunConfiguration) -> SidecarCommand {
        build_with(
            config,
            &no_ports(),
            &MtlsDisabled,
            SidecarOs::Unix,
        )
        .unwrap()
    }

    #[test]
    fn pinned_ports_are_used_without_allocation() {
        let mut ports = MockPortAllocator::new();
        ports.expect_allocate().times(0);

        let sidecar = build_with(&pinned_config(), &ports, &MtlsDisabled, SidecarOs::Unix).unwrap();

        assert_eq!(sidecar.http_port, 3500);
        assert_eq!(sidecar.grpc_port, 50001);
        assert_eq!(sidecar.metrics_port, 9090);
        assert_eq!(sidecar.command.flag_value("--dapr-http-port"), Some("3500"));
        assert_eq!(sidecar.command.flag_value("--dapr-grpc-port"), Some("50001"));
        assert_eq!(sidecar.command.flag_value("--metrics-port"), Some("9090"));
    }

    #[test]
    fn unset_ports_are_allocated_independently() {
        let ports = FixedPortAllocator::new([41000, 41001, 41002]);
        let config = RunConfiguration::new("/components");

        let sidecar = build_with(&config, &ports, &MtlsDisabled, SidecarOs::Unix).unwrap();

        assert_eq!(sidecar.http_port, 41000);
        assert_eq!(sidecar.grpc_port, 41001);
        assert_eq!(sidecar.metrics_port, 41002);
        assert_eq!(ports.remaining(), 0);
    }

    #[test]
    fn only_unset_ports_consume_allocations() {
        let ports = FixedPortAllocator::new([41000]);
        let config = RunConfiguration::new("/components")
            .with_http_port(3500)
            .with_metrics_port(9090);

        let sidecar = build_with(&config, &ports, &MtlsDisabled, SidecarOs::Unix).unwrap();

        assert_eq!(sidecar.grpc_port, 41000);
        assert_eq!(sidecar.http_port, 3500);
    }

    #[test]
    fn core_flags_are_emitted_in_order() {
        let config = pinned_config()
            .with_log_level("debug")
            .with_protocol("grpc")
            .with_max_concurrency(5)
            .with_max_request_body_size(8);

        let sidecar = build(&config);

        assert_eq!(sidecar.command.program, PathBuf::from(DAPRD));
        assert_eq!(
            sidecar.command.args,
            vec![
                "--app-id",
                "orders",
                "--dapr-http-port",
                "3500",
                "--dapr-grpc-port",
                "50001",
                "--log-level",
                "debug",
                "--app-max-concurrency",
                "5",
                "--app-protocol",
                "grpc",
                "--components-path",
                "/home/dev/.dapr/components",
                "--metrics-port",
                "9090",
                "--dapr-http-max-request-size",
                "8",
                "--placement-host-address",
                "localhost:50005",
            ]
        );
    }

    #[test]
    fn non_positive_concurrency_is_unlimited() {
        for (input, expected) in [(0, "-1"), (-7, "-1"), (1, "1"), (5, "5")] {
            let sidecar = build(&pinned_config().with_max_concurrency(input));
            assert_eq!(
                sidecar.command.flag_value("--app-max-concurrency"),
                Some(expected),
                "max concurrency {input}"
            );
        }
    }

    #[test]
    fn negative_request_size_is_unlimited() {
        assert_eq!(normalize_max_request_size(-3), -1);
        assert_eq!(normalize_max_request_size(0), 0);
        assert_eq!(normalize_max_request_size(16), 16);

        let sidecar = build(&pinned_config().with_max_request_body_size(-20));
        assert_eq!(
            sidecar.command.flag_value("--dapr-http-max-request-size"),
            Some("-1")
        );
    }

    #[test]
    fn app_port_flag_only_when_set() {
        assert!(!build(&pinned_config()).command.has_flag("--app-port"));

        let sidecar = build(&pinned_config().with_app_port(0));
        assert_eq!(sidecar.command.flag_value("--app-port"), Some("0"));

        let sidecar = build(&pinned_config().with_app_port(8080));
        assert_eq!(sidecar.command.flag_value("--app-port"), Some("8080"));
    }

    #[test]
    fn placement_port_defaults_per_platform() {
        assert_eq!(placement_address("localhost", SidecarOs::Windows), "localhost:6050");
        assert_eq!(placement_address("localhost", SidecarOs::Unix), "localhost:50005");
        assert_eq!(placement_address("placement", SidecarOs::Unix), "placement:50005");
    }

    #[test]
    fn placement_with_port_passes_through() {
        assert_eq!(placement_address("10.0.0.4:7000", SidecarOs::Windows), "10.0.0.4:7000");
        assert_eq!(placement_address("10.0.0.4:7000", SidecarOs::Unix), "10.0.0.4:7000");
    }

    #[test]
    fn windows_sidecar_gets_windows_placement_port() {
        let sidecar = build_with(
            &pinned_config(),
            &no_ports(),
            &MtlsDisabled,
            SidecarOs::Windows,
        )
        .unwrap();
        assert_eq!(
            sidecar.command.flag_value("--placement-host-address"),
            Some("localhost:6050")
        );
    }

    #[test]
    fn config_with_mtls_adds_sentry_flags() {
        let mut mtls = MockMtlsInspector::new();
        mtls.expect_sentry_address()
            .withf(|path| path.as_os_str() == "/home/dev/.dapr/config.yaml")
            .times(1)
            .returning(|_| Some("localhost:50001".to_string()));

        let config = pinned_config().with_config_file("/home/dev/.dapr/config.yaml");
        let sidecar = build_with(&config, &no_ports(), &mtls, SidecarOs::Unix).unwrap();

        assert_eq!(
            sidecar.command.flag_value("--config"),
            Some("/home/dev/.dapr/config.yaml")
        );
        assert!(sidecar.command.has_flag("--enable-mtls"));
        assert_eq!(
            sidecar.command.flag_value("--sentry-address"),
            Some("localhost:50001")
        );
    }

    #[test]
    fn config_without_mtls_only_adds_config_flag() {
        let config = pinned_config().with_config_file("/etc/dapr/config.yaml");
        let sidecar = build(&config);

        assert!(sidecar.command.has_flag("--config"));
        assert!(!sidecar.command.has_flag("--enable-mtls"));
        assert!(!sidecar.command.has_flag("--sentry-address"));
    }

    #[test]
    fn empty_sentry_address_means_disabled() {
        let mut mtls = MockMtlsInspector::new();
        mtls.expect_sentry_address()
            .returning(|_| Some(String::new()));

        let config = pinned_config().with_config_file("/etc/dapr/config.yaml");
        let sidecar = build_with(&config, &no_ports(), &mtls, SidecarOs::Unix).unwrap();

        assert!(!sidecar.command.has_flag("--enable-mtls"));
    }

    #[test]
    fn missing_or_empty_config_skips_inspection() {
        let mut mtls = MockMtlsInspector::new();
        mtls.expect_sentry_address().times(0);

        for config in [pinned_config(), pinned_config().with_config_file("")] {
            let sidecar = build_with(&config, &no_ports(), &mtls, SidecarOs::Unix).unwrap();
            assert!(!sidecar.command.has_flag("--config"));
        }
    }

    #[test]
    fn profiling_allocates_port_when_unset() {
        let ports = FixedPortAllocator::new([42000]);
        let config = pinned_config().with_profiling(None);

        let sidecar = build_with(&config, &ports, &MtlsDisabled, SidecarOs::Unix).unwrap();

        assert_eq!(sidecar.profile_port, Some(42000));
        assert!(sidecar.command.has_flag("--enable-profiling"));
        assert_eq!(sidecar.command.flag_value("--profile-port"), Some("42000"));
    }

    #[test]
    fn profiling_uses_pinned_port() {
        let sidecar = build(&pinned_config().with_profiling(Some(7777)));
        assert_eq!(sidecar.profile_port, Some(7777));
        assert_eq!(sidecar.command.flag_value("--profile-port"), Some("7777"));
    }

    #[test]
    fn profiling_disabled_emits_nothing() {
        let sidecar = build(&pinned_config());
        assert_eq!(sidecar.profile_port, None);
        assert!(!sidecar.command.has_flag("--enable-profiling"));
        assert!(!sidecar.command.has_flag("--profile-port"));
    }

    #[test]
    fn app_ssl_is_a_trailing_flag() {
        let sidecar = build(&pinned_config().with_app_ssl(true));
        assert_eq!(sidecar.command.args.last().map(String::as_str), Some("--app-ssl"));

        assert!(!build(&pinned_config()).command.has_flag("--app-ssl"));
    }

    #[test]
    fn optional_flags_follow_placement_in_order() {
        let mut mtls = MockMtlsInspector::new();
        mtls.expect_sentry_address()
            .returning(|_| Some("localhost:50001".to_string()));
        let config = pinned_config()
            .with_app_port(8080)
            .with_config_file("/cfg.yaml")
            .with_profiling(Some(7777))
            .with_app_ssl(true);

        let sidecar = build_with(&config, &no_ports(), &mtls, SidecarOs::Unix).unwrap();

        let tail: Vec<&str> = sidecar
            .command
            .args
            .iter()
            .skip_while(|arg| *arg != "--app-port")
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            vec![
                "--app-port",
                "8080",
                "--placement-host-address",
                "localhost:50005",
                "--config",
                "/cfg.yaml",
                "--enable-mtls",
                "--sentry-address",
                "localhost:50001",
                "--enable-profiling",
                "--profile-port",
                "7777",
                "--app-ssl",
            ]
        );
    }

    #[test]
    fn allocation_failure_propagates() {
        let ports = FixedPortAllocator::new([41000]);
        let config = RunConfiguration::new("/components");

        let err = build_with(&config, &ports, &MtlsDisabled, SidecarOs::Unix).unwrap_err();
        assert!(matches!(err, PortError::Exhausted(_)));
    }
}
