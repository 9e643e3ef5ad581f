// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Creates a block device in VMware Aria Automation.

const DESCRIPTION: &str = concat!(
    "Creates a block device using the IaaS API of a VMware Aria Automation",
    " appliance. The project is selected by id or by name, a name is resolved",
    " to the id of the first matching project. Unless --force is given the",
    " tool asks for confirmation before submitting the request.",
    " By default the tool prints the submitted request. With",
    " --wait-for-completion it polls the request every 5 seconds, and prints",
    " the created block devices once the request finishes. If the request does",
    " not finish before --completion-timeout the tool prints nothing."
);

mod prompt;

use auth::credentials::{Credentials, access_token, anonymous, refresh_token};
use clap::Parser;
use iaas::builder::{Creation, ProjectSelector};
use iaas::client::BlockDevices;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = enable_tracing(args.verbose)?;
    tracing::debug!("{args:?}");

    let client = BlockDevices::builder()
        .with_endpoint(&args.connection.server)
        .with_credentials(credentials(&args.connection)?)
        .with_api_version(&args.connection.api_version)
        .with_accept_invalid_certs(args.connection.ignore_cert_requirements)
        .build()
        .await?;

    let creation = client
        .create_block_device()
        .set_name(&args.name)
        .set_capacity_in_gb(args.capacity_in_gb)
        .set_project(args.project.selector())
        .set_or_clear_description(args.device_description.as_ref())
        .set_persistent(args.persistent)
        .set_encrypted(args.encrypted)
        .set_wait_for_completion(args.wait_for_completion)
        .set_completion_timeout(Duration::from_secs(args.completion_timeout))
        .set_confirm(!args.force)
        .set_prompt(prompt::Terminal)
        .send()
        .await?;

    match creation {
        Creation::Declined => {}
        Creation::Submitted(operation) => {
            println!("{}", serde_json::to_string_pretty(&operation)?);
        }
        Creation::Completed(disks) => {
            for disk in disks {
                println!("{}", serde_json::to_string_pretty(&disk)?);
            }
        }
        Creation::TimedOut { request_id } => {
            tracing::warn!(
                %request_id,
                "the request did not finish within {} seconds",
                args.completion_timeout
            );
        }
    }
    Ok(())
}

fn credentials(args: &Connection) -> anyhow::Result<Credentials> {
    if let Some(token) = &args.access_token {
        return Ok(access_token::Builder::new(token).build());
    }
    if let Some(token) = &args.refresh_token {
        let credentials = refresh_token::Builder::new(&args.server, token)
            .with_accept_invalid_certs(args.ignore_cert_requirements)
            .build()?;
        return Ok(credentials);
    }
    tracing::warn!("no credentials configured, sending unauthenticated requests");
    Ok(anonymous::Builder::new().build())
}

fn enable_tracing(verbose: bool) -> anyhow::Result<tracing::dispatcher::DefaultGuard> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    // Route `log` records from dependencies into `tracing`.
    tracing_log::LogTracer::init()?;
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    Ok(tracing::subscriber::set_default(subscriber))
}

/// Creates a block device in VMware Aria Automation.
#[derive(Clone, Debug, Parser)]
#[command(name = "new-vra-block-device", version, about, long_about = DESCRIPTION)]
struct Args {
    #[command(flatten)]
    connection: Connection,

    /// The name of the new block device.
    #[arg(long)]
    name: String,

    /// The capacity of the new block device, in GB.
    #[arg(long)]
    capacity_in_gb: i32,

    #[command(flatten)]
    project: Project,

    /// A description for the new block device.
    #[arg(long)]
    device_description: Option<String>,

    /// Keep the block device when the machine using it is deleted.
    #[arg(long)]
    persistent: bool,

    /// Encrypt the block device.
    #[arg(long)]
    encrypted: bool,

    /// Wait until the request finishes, then print the new block devices.
    #[arg(long)]
    wait_for_completion: bool,

    /// How long to wait for the request, in seconds.
    ///
    /// Only used with `--wait-for-completion`.
    #[arg(long, default_value_t = 120)]
    completion_timeout: u64,

    /// Submit the request without asking for confirmation.
    #[arg(long)]
    force: bool,

    /// Log requests and responses to stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// Connection settings, typically set in the environment.
#[derive(Clone, clap::Args)]
struct Connection {
    /// The appliance URL, for example `https://vra.example.com`.
    #[arg(long, env = "VRA_SERVER")]
    server: String,

    /// A bearer token for the IaaS API.
    #[arg(long, env = "VRA_ACCESS_TOKEN", conflicts_with = "refresh_token", hide_env_values = true)]
    access_token: Option<String>,

    /// A refresh token, exchanged for a bearer token on first use.
    #[arg(long, env = "VRA_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// The value of the `apiVersion` query parameter.
    #[arg(long, env = "VRA_API_VERSION", default_value = "2021-07-15")]
    api_version: String,

    /// Skip the TLS certificate validation, for lab appliances.
    #[arg(long, env = "VRA_IGNORE_CERT_REQUIREMENTS")]
    ignore_cert_requirements: bool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("server", &self.server)
            .field("access_token", &self.access_token.as_ref().map(|_| "[censored]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[censored]"))
            .field("api_version", &self.api_version)
            .field("ignore_cert_requirements", &self.ignore_cert_requirements)
            .finish()
    }
}

#[derive(Clone, Debug, clap::Args)]
#[group(required = true, multiple = false)]
struct Project {
    /// The id of the project owning the block device.
    #[arg(long)]
    project_id: Option<String>,

    /// The name of the project owning the block device.
    #[arg(long)]
    project_name: Option<String>,
}

impl Project {
    fn selector(&self) -> ProjectSelector {
        match (&self.project_id, &self.project_name) {
            (Some(id), _) => ProjectSelector::Id(id.clone()),
            (None, Some(name)) => ProjectSelector::Name(name.clone()),
            // The argument group requires one of the two. An empty name is
            // rejected by the request builder.
            (None, None) => ProjectSelector::Name(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SERVER: [&str; 2] = ["--server", "https://vra.example.com"];

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        let base = ["new-vra-block-device"].into_iter().chain(SERVER);
        Args::try_parse_from(base.chain(args.iter().copied()))
    }

    #[test]
    fn command() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let args = parse(&["--name", "disk1", "--capacity-in-gb", "10", "--project-id", "p-123"])?;
        assert_eq!(args.name, "disk1");
        assert_eq!(args.capacity_in_gb, 10);
        assert_eq!(args.project.selector(), ProjectSelector::Id("p-123".into()));
        assert_eq!(args.device_description, None);
        assert!(!args.persistent);
        assert!(!args.encrypted);
        assert!(!args.wait_for_completion);
        assert_eq!(args.completion_timeout, 120);
        assert!(!args.force);
        assert_eq!(args.connection.server, "https://vra.example.com");
        Ok(())
    }

    #[test]
    fn all_flags() -> anyhow::Result<()> {
        let args = parse(&[
            "--name",
            "disk1",
            "--capacity-in-gb",
            "10",
            "--project-name",
            "GOLD",
            "--device-description",
            "test-only",
            "--persistent",
            "--encrypted",
            "--wait-for-completion",
            "--completion-timeout",
            "30",
            "--force",
            "--api-version",
            "2019-01-15",
            "--ignore-cert-requirements",
        ])?;
        assert_eq!(args.project.selector(), ProjectSelector::Name("GOLD".into()));
        assert_eq!(args.device_description.as_deref(), Some("test-only"));
        assert!(args.persistent);
        assert!(args.encrypted);
        assert!(args.wait_for_completion);
        assert_eq!(args.completion_timeout, 30);
        assert!(args.force);
        assert_eq!(args.connection.api_version, "2019-01-15");
        assert!(args.connection.ignore_cert_requirements);
        Ok(())
    }

    #[test_case(&["--name", "disk1", "--capacity-in-gb", "10"]; "missing project")]
    #[test_case(&["--name", "disk1", "--capacity-in-gb", "10", "--project-id", "p-123", "--project-name", "GOLD"]; "both projects")]
    #[test_case(&["--capacity-in-gb", "10", "--project-id", "p-123"]; "missing name")]
    #[test_case(&["--name", "disk1", "--project-id", "p-123"]; "missing capacity")]
    #[test_case(&["--name", "disk1", "--capacity-in-gb", "ten", "--project-id", "p-123"]; "bad capacity")]
    #[test_case(&["--name", "disk1", "--capacity-in-gb", "10", "--project-id", "p-123", "--access-token", "a", "--refresh-token", "r"]; "both tokens")]
    fn invalid(args: &[&str]) {
        let got = parse(args);
        assert!(got.is_err(), "{got:?}");
    }

    #[test]
    fn debug_censors_tokens() -> anyhow::Result<()> {
        let args = parse(&[
            "--name",
            "disk1",
            "--capacity-in-gb",
            "10",
            "--project-id",
            "p-123",
            "--access-token",
            "test-only-secret",
        ])?;
        let got = format!("{args:?}");
        assert!(!got.contains("test-only-secret"), "{got}");
        assert!(got.contains("[censored]"), "{got}");
        Ok(())
    }

    #[test]
    fn credentials_from_args() -> anyhow::Result<()> {
        let args = parse(&[
            "--name",
            "disk1",
            "--capacity-in-gb",
            "10",
            "--project-id",
            "p-123",
            "--refresh-token",
            "test-only-refresh",
        ])?;
        let got = credentials(&args.connection)?;
        let fmt = format!("{got:?}");
        assert!(!fmt.contains("test-only-refresh"), "{fmt}");
        Ok(())
    }
}
