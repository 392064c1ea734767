use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::Result;
use wpgen_codegen::tools::{HttpMethod, Permission, RestArg, RestRouteOptions};

use super::emit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PermissionMode {
    /// Anyone
    Public,
    /// Any logged-in user
    LoggedIn,
    /// Users with --capability
    Capability,
}

#[derive(Args)]
pub struct RestRouteCommand {
    /// REST namespace (e.g. my-plugin/v1)
    #[arg(long)]
    pub namespace: String,

    /// Route path (e.g. /items/(?P<id>\d+))
    #[arg(long)]
    pub route: String,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    pub method: HttpMethod,

    #[arg(long, value_enum, default_value_t = PermissionMode::Public)]
    pub permission: PermissionMode,

    /// Capability checked with --permission capability
    #[arg(long, default_value = "manage_options")]
    pub capability: String,

    /// Route argument as name:in:type[:required][:sanitize]
    #[arg(long = "arg")]
    pub args: Vec<RestArg>,

    /// Generate a WP_REST_Controller subclass
    #[arg(long)]
    pub controller: bool,

    /// Write the stub to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RestRouteCommand {
    pub fn options(&self) -> RestRouteOptions {
        let permission = match self.permission {
            PermissionMode::Public => Permission::Public,
            PermissionMode::LoggedIn => Permission::LoggedIn,
            PermissionMode::Capability => Permission::Capability(self.capability.clone()),
        };

        RestRouteOptions {
            method: self.method,
            permission,
            args: self.args.clone(),
            controller: self.controller,
            ..RestRouteOptions::new(&self.namespace, &self.route)
        }
    }

    pub fn run(&self) -> Result<()> {
        emit(self.output.as_deref(), &self.options().generate()?)
    }
}
