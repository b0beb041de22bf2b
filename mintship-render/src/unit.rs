//! Systemd unit rendering — [`UnitContext`] and [`UnitRenderer`].
//!
//! The unit bakes in the supervision decisions: unconditional restart with
//! a fixed 10 second delay, and a deny-by-default sandbox whose single
//! writable exception is the daemon's data directory. Process exits are not
//! inspected; every exit is retried identically by systemd.

use serde::{Deserialize, Serialize};
use tera::Tera;

use mintship_core::descriptor::ServiceDescriptor;

use crate::error::RenderError;

const UNIT_TEMPLATE_NAME: &str = "cdk-mintd.service.tera";
const UNIT_TEMPLATE: &str = include_str!("templates/cdk-mintd.service.tera");

/// Serializable rendering payload built from [`ServiceDescriptor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitContext {
    pub description: String,
    pub user: String,
    pub group: String,
    /// Working directory, also the unit's `ReadWritePaths=` exception.
    pub working_dir: String,
    pub exec_start: String,
    /// `EnvironmentFile=` line, omitted entirely when `None`.
    pub env_file: Option<String>,
}

impl UnitContext {
    pub fn from_descriptor(descriptor: &ServiceDescriptor) -> Self {
        UnitContext {
            description: "Cashu CDK mint daemon".to_string(),
            user: descriptor.user.clone(),
            group: descriptor.group.clone(),
            working_dir: descriptor.data_dir.display().to_string(),
            exec_start: descriptor.exec_start.clone(),
            env_file: descriptor
                .env_file
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Tera-based renderer for the embedded unit template.
///
/// Create once with [`UnitRenderer::new`] and reuse.
pub struct UnitRenderer {
    tera: Tera,
}

impl UnitRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(UNIT_TEMPLATE_NAME, UNIT_TEMPLATE)?;
        Ok(UnitRenderer { tera })
    }

    pub fn render(&self, ctx: &UnitContext) -> Result<String, RenderError> {
        let tera_ctx = tera::Context::from_serialize(ctx)?;
        Ok(self.tera.render(UNIT_TEMPLATE_NAME, &tera_ctx)?)
    }
}

/// Render the systemd unit for `descriptor`.
pub fn render_unit(descriptor: &ServiceDescriptor) -> Result<String, RenderError> {
    UnitRenderer::new()?.render(&UnitContext::from_descriptor(descriptor))
}
