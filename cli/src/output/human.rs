//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::ports::SessionView;
use crate::domain::{AccountStatus, ConnectionInfo, LaunchConfig, PodId};
use crate::output::{OutputContext, outln};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        outln!("podlaunch {version}");
    }

    /// Render the launch configuration and where it came from.
    pub fn render_config(&self, config: &LaunchConfig, path: &Path) {
        outln!();
        outln!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        outln!();
        outln!("  {:<20} {}", "template_id:", config.template_id);
        outln!("  {:<20} {}", "network_volume_id:", config.network_volume_id);
        outln!("  {:<20} {}", "gpu_types:", config.gpu_types.join(", "));
        outln!("  {:<20} {}", "gpu_count:", config.gpu_count);
        outln!("  {:<20} {}", "ports:", format_ports(&config.ports));
        outln!("  {:<20} {}", "name_prefix:", config.name_prefix);
        outln!("  {:<20} {}", "desktop_port:", config.desktop_port);
        outln!();
        outln!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["PODLAUNCH_CONFIG", "RUNPOD_API_KEY", "NO_COLOR"] {
            let value = match std::env::var(var) {
                Ok(_) if var == "RUNPOD_API_KEY" => "(set)".to_string(),
                Ok(v) => v,
                Err(_) => "(not set)".to_string(),
            };
            outln!("    {:<18} {value}", format!("{var}:"));
        }
        outln!();
    }

    /// Render a one-shot account summary.
    pub fn render_account(&self, status: &AccountStatus) {
        outln!("  {}", format_account_line(status));
    }
}

impl SessionView for HumanRenderer<'_> {
    fn banner(&self, pod: &PodId) {
        if self.ctx.quiet {
            return;
        }
        let rule = "━".repeat(64);
        outln!();
        outln!("  {}", rule.style(self.ctx.styles.banner));
        outln!(
            "  {}",
            format!("Pod {pod} is billed until this session ends.").style(self.ctx.styles.banner)
        );
        outln!(
            "  {}",
            "Press Enter, Ctrl-C, or close this window to terminate it."
                .style(self.ctx.styles.banner)
        );
        outln!("  {}", rule.style(self.ctx.styles.banner));
        outln!();
    }

    fn connection(&self, info: &ConnectionInfo) {
        outln!();
        outln!("  {}", "Connection details:".style(self.ctx.styles.header));
        for (label, value) in info.lines() {
            outln!(
                "    {:<14} {}",
                format!("{label}:").style(self.ctx.styles.dim),
                value.style(self.ctx.styles.link)
            );
        }
        outln!();
    }

    fn account(&self, status: &AccountStatus) {
        if self.ctx.quiet {
            return;
        }
        let now = chrono::Local::now().format("%H:%M:%S");
        outln!(
            "  {} {}",
            format!("[{now}]").style(self.ctx.styles.dim),
            format_account_line(status)
        );
    }

    fn terminate_hint(&self) {
        outln!(
            "  {}",
            "Press Enter to terminate the pod.".style(self.ctx.styles.bold)
        );
    }
}

/// `Balance: $12.34 | Burn rate: $0.69/hr | Est. runtime: 17.9 hrs`
#[must_use]
pub fn format_account_line(status: &AccountStatus) -> String {
    format!(
        "Balance: ${:.2} | Burn rate: ${:.2}/hr | Est. runtime: {}",
        status.balance,
        status.burn_rate_per_hour,
        status.estimated_runtime()
    )
}

/// Comma-separated port list, or a note that the template decides.
#[must_use]
pub fn format_ports(ports: &[String]) -> String {
    if ports.is_empty() {
        "(from template)".to_string()
    } else {
        ports.join(", ")
    }
}
