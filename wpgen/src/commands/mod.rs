mod acf_field;
mod check;
mod completions;
mod crud;
mod db_prefix;
mod delete_products;
mod init;
mod migration;
mod plugin_header;
mod rest_route;

use std::path::Path;

use acf_field::AcfFieldCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use crud::CrudCommand;
use db_prefix::DbPrefixCommand;
use delete_products::DeleteProductsCommand;
use eyre::Result;
use init::InitCommand;
use migration::MigrationSqlCommand;
use plugin_header::PluginHeaderCommand;
use rest_route::RestRouteCommand;
use wpgen_core::File;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for wpgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Write generated text to `output`, or to stdout when no path is given.
pub(crate) fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            File::new(path, content).write()?;
            tracing::info!(path = %path.display(), "wrote output");
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "wpgen")]
#[command(version)]
#[command(about = "Generate WordPress plugin boilerplate and maintenance SQL")]
pub(crate) struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Crud(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::MigrationSql(cmd) => cmd.run(),
            Commands::DbPrefix(cmd) => cmd.run(),
            Commands::DeleteProducts(cmd) => cmd.run(),
            Commands::PluginHeader(cmd) => cmd.run(),
            Commands::RestRoute(cmd) => cmd.run(),
            Commands::AcfField(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter wpgen.toml
    Init(InitCommand),

    /// Generate the CRUD plugin file from wpgen.toml
    Crud(CrudCommand),

    /// Validate wpgen.toml without generating code
    Check(CheckCommand),

    /// Generate SQL that moves a site to a new domain
    MigrationSql(MigrationSqlCommand),

    /// Generate SQL that renames the table prefix
    DbPrefix(DbPrefixCommand),

    /// Generate SQL that deletes all WooCommerce products
    DeleteProducts(DeleteProductsCommand),

    /// Generate a plugin header comment
    PluginHeader(PluginHeaderCommand),

    /// Generate a REST route registration stub
    RestRoute(RestRouteCommand),

    /// Generate an ACF custom field type class
    AcfField(AcfFieldCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_crud_defaults() {
        let cli = Cli::try_parse_from(["wpgen", "crud"]).unwrap();
        let Commands::Crud(cmd) = cli.command else {
            panic!("expected crud command");
        };
        assert_eq!(cmd.config, Path::new("wpgen.toml"));
        assert!(cmd.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["wpgen", "check", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_rest_route_args() {
        let cli = Cli::try_parse_from([
            "wpgen",
            "rest-route",
            "--namespace",
            "shop/v1",
            "--route",
            "/orders",
            "--method",
            "post",
            "--permission",
            "capability",
            "--capability",
            "edit_posts",
            "--arg",
            "title:body:string:required",
            "--arg",
            "qty:body:integer",
        ])
        .unwrap();
        let Commands::RestRoute(cmd) = cli.command else {
            panic!("expected rest-route command");
        };
        let options = cmd.options();
        assert_eq!(options.args.len(), 2);
        assert_eq!(options.method.as_str(), "POST");
        assert_eq!(
            options.permission,
            wpgen_codegen::tools::Permission::Capability("edit_posts".into())
        );
    }

    #[test]
    fn test_rejects_unknown_method() {
        assert!(
            Cli::try_parse_from([
                "wpgen",
                "rest-route",
                "--namespace",
                "a/v1",
                "--route",
                "/x",
                "--method",
                "TRACE",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_db_prefix_sites() {
        let cli = Cli::try_parse_from([
            "wpgen",
            "db-prefix",
            "--old",
            "wp_",
            "--new",
            "shop_",
            "--multisite",
            "--sites",
            "2, 3, x",
        ])
        .unwrap();
        let Commands::DbPrefix(cmd) = cli.command else {
            panic!("expected db-prefix command");
        };
        assert_eq!(cmd.options().site_ids, [2, 3]);
    }

    #[test]
    fn test_parse_acf_field_flags() {
        let cli = Cli::try_parse_from([
            "wpgen",
            "acf-field",
            "color_picker",
            "--category",
            "choice",
            "--no-js",
            "--css",
            "--no-rest",
        ])
        .unwrap();
        let Commands::AcfField(cmd) = cli.command else {
            panic!("expected acf-field command");
        };
        let options = cmd.options();
        assert_eq!(options.category, "choice");
        assert!(!options.with_js);
        assert!(options.with_css);
        assert!(!options.show_in_rest);
        assert!(options.supports_required);
    }

    #[test]
    fn test_acf_field_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["wpgen", "acf-field", "x", "--category", "fancy"]).is_err());
    }

    #[test]
    fn test_emit_writes_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out").join("migration.sql");

        emit(Some(&path), "SELECT 1;\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "SELECT 1;\n");
    }
}
