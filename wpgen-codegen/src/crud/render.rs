//! Single-file CRUD plugin renderer.

use serde_json::{Map, Value};
use wpgen_core::{
    escape_php_double_quoted, escape_php_string, to_constant_case, to_pascal_snake_case,
};

use super::{AllowedColumnSet, EntityDescriptor, column::PRIMARY_KEY, ddl::column_lines};
use crate::builder::CodeBuilder;

/// Default page size of the generated `list()` method.
pub const DEFAULT_PER_PAGE: u32 = 20;

const FORBIDDEN: &str = "return new WP_Error( 'forbidden', 'Forbidden', array( 'status' => 403 ) );";

/// Render the complete plugin file for an entity.
///
/// Pure and deterministic: the descriptor is normalized with
/// [`EntityDescriptor::effective`], then the DDL lines and allow-list are
/// derived from it and templated into PHP.
pub fn render(descriptor: &EntityDescriptor) -> String {
    let descriptor = descriptor.clone().effective();
    let lines = column_lines(&descriptor.columns, descriptor.add_timestamps);
    let allowed = AllowedColumnSet::build(&descriptor.columns, descriptor.add_timestamps);
    PluginRenderer::new(&descriptor, &lines, &allowed).render()
}

/// Templates an already-normalized descriptor and its derived parts.
pub struct PluginRenderer<'a> {
    descriptor: &'a EntityDescriptor,
    column_lines: &'a [String],
    allowed: &'a AllowedColumnSet,
    /// Constant/class prefix, e.g. `TFD_DBCRUD_TICKET`.
    prefix: String,
    entity_slug: String,
}

impl<'a> PluginRenderer<'a> {
    pub fn new(
        descriptor: &'a EntityDescriptor,
        column_lines: &'a [String],
        allowed: &'a AllowedColumnSet,
    ) -> Self {
        let entity_slug = descriptor.entity_slug();
        let prefix = to_constant_case(&format!("tfd-dbcrud-{}", entity_slug));
        Self {
            descriptor,
            column_lines,
            allowed,
            prefix,
            entity_slug,
        }
    }

    /// The constant/class prefix used throughout the file.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn render(&self) -> String {
        let d = self.descriptor;
        let mut b = CodeBuilder::php();

        self.render_header(&mut b);
        self.render_constants(&mut b);
        self.render_columns_function(&mut b);
        self.render_installer(&mut b);
        b.when(d.generate_repository, |b| self.render_repository(b));
        b.when(d.generate_rest_controller, |b| self.render_rest_routes(b));
        self.render_hooks(&mut b);
        self.render_usage(&mut b);

        b.build()
    }

    fn render_header(&self, b: &mut CodeBuilder) {
        let d = self.descriptor;
        let mut features = vec!["custom table (dbDelta + upgrades)"];
        if d.generate_repository {
            features.push("$wpdb repository CRUD");
        }
        if d.generate_rest_controller {
            features.push("REST CRUD endpoints");
        }

        b.push_line("<?php");
        b.push_docblock([
            format!(
                "Plugin Name: TFD DB CRUD - {}",
                to_pascal_snake_case(&self.entity_slug)
            ),
            format!("Description: Generated plugin: {}.", features.join(", ")),
            format!("Version: {}", d.version),
            "Author: Tools for Devs Generator".to_string(),
            "Requires at least: 6.0".to_string(),
            "Requires PHP: 7.4".to_string(),
        ]);
        b.push_blank();
        b.push_line("if ( ! defined( 'ABSPATH' ) ) { exit; }");
        b.push_blank();
    }

    fn render_constants(&self, b: &mut CodeBuilder) {
        let d = self.descriptor;
        let p = &self.prefix;
        let string_const = |b: &mut CodeBuilder, name: &str, value: &str| {
            b.push_line(&format!(
                "define( '{}_{}', '{}' );",
                p,
                name,
                escape_php_string(value)
            ));
        };
        let bool_const = |b: &mut CodeBuilder, name: &str, value: bool| {
            b.push_line(&format!("define( '{}_{}', {} );", p, name, value));
        };

        string_const(b, "VERSION", &d.version);
        string_const(b, "ENTITY", &self.entity_slug);
        string_const(b, "TABLE", &d.table);
        string_const(b, "OPTION_KEY", &d.option_key);
        string_const(b, "REST_NAMESPACE", &d.rest_namespace);
        string_const(b, "CAPABILITY_WRITE", &d.write_capability);
        bool_const(b, "ENABLE_REST", d.generate_rest_controller);
        bool_const(b, "ADD_TIMESTAMPS", d.add_timestamps);
        bool_const(b, "USE_CHARSET_COLLATE", d.use_charset_collate);

        let alias = escape_php_string(&d.version_constant);
        b.push_block(
            &format!("if ( ! defined( '{}' ) ) {{", alias),
            "}",
            |b| {
                b.push_line(&format!("define( '{}', {}_VERSION );", alias, p));
            },
        );
        b.push_blank();
    }

    fn render_columns_function(&self, b: &mut CodeBuilder) {
        let entries: Vec<String> = self
            .column_lines
            .iter()
            .map(|line| format!("\"{}\"", escape_php_double_quoted(line)))
            .collect();

        b.push_block(
            &format!(
                "function {}_columns_sql(): array {{",
                self.prefix.to_lowercase()
            ),
            "}",
            |b| {
                b.push_block("return array(", ");", |b| {
                    b.push_separated(&entries, ",");
                });
            },
        );
        b.push_blank();
    }

    fn render_installer(&self, b: &mut CodeBuilder) {
        let p = &self.prefix;

        b.push_block(&format!("final class {}_Installer {{", p), "}", |b| {
            b.push_block("public static function table(): string {", "}", |b| {
                b.push_line("global $wpdb;");
                b.push_line(&format!("return $wpdb->prefix . {}_TABLE;", p));
            });
            b.push_blank();
            b.push_block("public static function target_version(): string {", "}", |b| {
                b.push_line(&format!("return (string) {}_VERSION;", p));
            });
            b.push_blank();
            b.push_block("public static function install(): void {", "}", |b| {
                b.push_line("global $wpdb;");
                b.push_line("require_once ABSPATH . 'wp-admin/includes/upgrade.php';");
                b.push_line("$table_name = self::table();");
                b.push_line("$charset_collate = '';");
                b.push_block(&format!("if ( {}_USE_CHARSET_COLLATE ) {{", p), "}", |b| {
                    b.push_line("$charset_collate = $wpdb->get_charset_collate();");
                });
                b.push_line(&format!("$columns = {}_columns_sql();", p.to_lowercase()));
                b.push_blank();
                b.push_line(
                    r#"$sql = "CREATE TABLE {$table_name} (\n\t\t" . implode( ",\n\t\t", $columns ) . ",\n\t\tPRIMARY KEY (`id`)\n) {$charset_collate};";"#,
                );
                b.push_line("dbDelta( $sql );");
                b.push_line(&format!(
                    "update_option( {}_OPTION_KEY, self::target_version() );",
                    p
                ));
            });
            b.push_blank();
            b.push_block("public static function maybe_upgrade(): void {", "}", |b| {
                b.push_line(&format!(
                    "$installed = (string) get_option( {}_OPTION_KEY, '0' );",
                    p
                ));
                b.push_line("$target = self::target_version();");
                b.push_block("if ( version_compare( $installed, $target, '<' ) ) {", "}", |b| {
                    b.push_line("self::install();");
                });
            });
        });
        b.push_blank();
    }

    fn render_repository(&self, b: &mut CodeBuilder) {
        let p = &self.prefix;
        let allowed: Vec<String> = self
            .allowed
            .iter()
            .map(|name| format!("'{}'", escape_php_string(name)))
            .collect();

        b.push_block(&format!("final class {}_Repository {{", p), "}", |b| {
            b.push_block("private static function table(): string {", "}", |b| {
                b.push_line(&format!("return {}_Installer::table();", p));
            });
            b.push_blank();
            b.push_block("private static function allowed_columns(): array {", "}", |b| {
                b.push_line(&format!("return array( {} );", allowed.join(", ")));
            });
            b.push_blank();
            b.push_block(
                "private static function filter_data( array $data ): array {",
                "}",
                |b| {
                    b.push_line("$allowed = array_flip( self::allowed_columns() );");
                    b.push_line("$out = array();");
                    b.push_block("foreach ( $data as $k => $v ) {", "}", |b| {
                        b.push_line("$key = sanitize_key( (string) $k );");
                        b.push_block(
                            &format!(
                                "if ( isset( $allowed[ $key ] ) && '{}' !== $key ) {{",
                                PRIMARY_KEY
                            ),
                            "}",
                            |b| {
                                b.push_line("$out[ $key ] = $v;");
                            },
                        );
                    });
                    b.push_line("return $out;");
                },
            );
            b.push_blank();
            b.push_block("public static function create( array $data ): int {", "}", |b| {
                b.push_line("global $wpdb;");
                b.push_line("$table = self::table();");
                b.push_line("$insert = self::filter_data( $data );");
                b.push_line("if ( empty( $insert ) ) { return 0; }");
                b.push_line("$ok = $wpdb->insert( $table, $insert );");
                b.push_line("return $ok ? (int) $wpdb->insert_id : 0;");
            });
            b.push_blank();
            b.push_block("public static function get( int $id ): ?array {", "}", |b| {
                b.push_line("global $wpdb;");
                b.push_line("$table = self::table();");
                b.push_line(
                    r#"$row = $wpdb->get_row( $wpdb->prepare( "SELECT * FROM {$table} WHERE id = %d LIMIT 1", $id ), ARRAY_A );"#,
                );
                b.push_line("return $row ? (array) $row : null;");
            });
            b.push_blank();
            b.push_block(
                "public static function list( array $args = array() ): array {",
                "}",
                |b| {
                    b.push_line("global $wpdb;");
                    b.push_line("$table = self::table();");
                    b.push_line(&format!(
                        "$per  = isset( $args['per'] ) ? max( 1, (int) $args['per'] ) : {};",
                        DEFAULT_PER_PAGE
                    ));
                    b.push_line(
                        "$page = isset( $args['page'] ) ? max( 1, (int) $args['page'] ) : 1;",
                    );
                    b.push_line("$off  = ( $page - 1 ) * $per;");
                    b.push_line(
                        r#"$sql  = "SELECT * FROM {$table} ORDER BY id DESC LIMIT %d OFFSET %d";"#,
                    );
                    b.push_line(
                        "return (array) $wpdb->get_results( $wpdb->prepare( $sql, $per, $off ), ARRAY_A );",
                    );
                },
            );
            b.push_blank();
            b.push_block(
                "public static function update( int $id, array $data ): int {",
                "}",
                |b| {
                    b.push_line("global $wpdb;");
                    b.push_line("$table = self::table();");
                    b.push_line("$update = self::filter_data( $data );");
                    b.push_line("if ( empty( $update ) ) { return 0; }");
                    b.push_block(&format!("if ( {}_ADD_TIMESTAMPS ) {{", p), "}", |b| {
                        b.push_line("$update['updated_at'] = current_time( 'mysql' );");
                    });
                    b.push_line("return (int) $wpdb->update( $table, $update, array( 'id' => $id ) );");
                },
            );
            b.push_blank();
            b.push_block("public static function delete( int $id ): int {", "}", |b| {
                b.push_line("global $wpdb;");
                b.push_line("$table = self::table();");
                b.push_line("return (int) $wpdb->delete( $table, array( 'id' => $id ) );");
            });
        });
        b.push_blank();
    }

    fn render_rest_routes(&self, b: &mut CodeBuilder) {
        let p = &self.prefix;
        let repo = format!("{}_Repository", p);

        b.push_block(&format!("if ( {}_ENABLE_REST ) {{", p), "}", |b| {
            b.push_block("add_action( 'rest_api_init', function() {", "} );", |b| {
                b.push_line(&format!("$base = sanitize_key( {}_ENTITY );", p));
                b.push_line(&format!("$ns   = {}_REST_NAMESPACE;", p));
                b.push_blank();

                b.push_block("register_rest_route( $ns, '/' . $base, array(", ") );", |b| {
                    self.route(b, "READABLE", false, |b| {
                        b.push_block(
                            &format!("return rest_ensure_response( {}::list( array(", repo),
                            ") ) );",
                            |b| {
                                b.push_line("'page' => (int) $r->get_param('page'),");
                                b.push_line("'per'  => (int) $r->get_param('per'),");
                            },
                        );
                    });
                    self.route(b, "CREATABLE", true, |b| {
                        b.push_line(&format!(
                            "$id = {}::create( (array) $r->get_json_params() );",
                            repo
                        ));
                        b.push_line("return rest_ensure_response( array( 'id' => $id ) );");
                    });
                });
                b.push_blank();

                b.push_block(
                    r"register_rest_route( $ns, '/' . $base . '/(?P<id>\d+)', array(",
                    ") );",
                    |b| {
                        self.route(b, "READABLE", false, |b| {
                            b.push_line(&format!("$row = {}::get( (int) $r['id'] );", repo));
                            b.push_line("return rest_ensure_response( $row ? $row : array() );");
                        });
                        self.route(b, "EDITABLE", true, |b| {
                            b.push_line(&format!(
                                "$updated = {}::update( (int) $r['id'], (array) $r->get_json_params() );",
                                repo
                            ));
                            b.push_line(
                                "return rest_ensure_response( array( 'updated' => $updated ) );",
                            );
                        });
                        self.route(b, "DELETABLE", true, |b| {
                            b.push_line(&format!("$deleted = {}::delete( (int) $r['id'] );", repo));
                            b.push_line(
                                "return rest_ensure_response( array( 'deleted' => $deleted ) );",
                            );
                        });
                    },
                );
            });
        });
        b.push_blank();
    }

    /// One endpoint entry of a `register_rest_route()` array.
    ///
    /// Write endpoints check the configured capability before running `body`.
    fn route<F>(&self, b: &mut CodeBuilder, method: &str, write: bool, body: F)
    where
        F: FnOnce(&mut CodeBuilder),
    {
        b.push_block("array(", "),", |b| {
            b.push_line(&format!("'methods'  => WP_REST_Server::{},", method));
            b.push_block("'callback' => function( WP_REST_Request $r ) {", "},", |b| {
                b.when(write, |b| {
                    b.push_block(
                        &format!("if ( ! current_user_can( {}_CAPABILITY_WRITE ) ) {{", self.prefix),
                        "}",
                        |b| {
                            b.push_line(FORBIDDEN);
                        },
                    );
                });
                body(b);
            });
            b.push_line("'permission_callback' => '__return_true',");
        });
    }

    fn render_hooks(&self, b: &mut CodeBuilder) {
        let p = &self.prefix;
        b.push_line(&format!(
            "register_activation_hook( __FILE__, array( '{}_Installer', 'install' ) );",
            p
        ));
        b.push_line(&format!(
            "add_action( 'plugins_loaded', array( '{}_Installer', 'maybe_upgrade' ) );",
            p
        ));
        b.push_blank();
    }

    fn render_usage(&self, b: &mut CodeBuilder) {
        let d = self.descriptor;
        let repo = format!("{}_Repository", self.prefix);
        let sample = self.example_payload();
        let mut lines = vec!["USAGE EXAMPLES".to_string()];

        if d.generate_repository {
            let php_sample = php_array(&sample);
            lines.extend([
                String::new(),
                "PHP:".to_string(),
                format!("  $id  = {}::create( {} );", repo, php_sample),
                format!("  $row = {}::get( $id );", repo),
                format!(
                    "  $rows = {}::list( array( 'page' => 1, 'per' => {} ) );",
                    repo, DEFAULT_PER_PAGE
                ),
                format!("  {}::update( $id, {} );", repo, php_sample),
                format!("  {}::delete( $id );", repo),
            ]);
        }

        if d.generate_rest_controller {
            let url = format!(
                "https://example.com/wp-json/{}/{}",
                d.rest_namespace, self.entity_slug
            );
            let json = json_object(&sample);
            lines.extend([
                String::new(),
                "CURL (REST):".to_string(),
                format!("  curl -X GET \"{}\"", url),
                format!(
                    "  curl -X POST \"{}\" -H \"Content-Type: application/json\" -d '{}'",
                    url, json
                ),
                format!("  curl -X GET \"{}/123\"", url),
                format!(
                    "  curl -X PUT \"{}/123\" -H \"Content-Type: application/json\" -d '{}'",
                    url, json
                ),
                format!("  curl -X DELETE \"{}/123\"", url),
            ]);
        }

        b.push_docblock(lines);
    }

    /// Up to two `(column, sample value)` pairs drawn from the user columns.
    ///
    /// Falls back to a `title` sample when the entity has no user columns.
    fn example_payload(&self) -> Vec<(String, &'static str)> {
        let pairs: Vec<(String, &'static str)> = self
            .allowed
            .iter()
            .filter(|name| !matches!(*name, PRIMARY_KEY | "created_at" | "updated_at"))
            .take(2)
            .map(|name| (name.to_string(), sample_value(name)))
            .collect();

        if pairs.is_empty() {
            vec![("title".to_string(), "Example")]
        } else {
            pairs
        }
    }
}

fn sample_value(column: &str) -> &'static str {
    match column {
        "title" => "Example",
        "status" => "pending",
        _ => "example",
    }
}

fn php_array(pairs: &[(String, &str)]) -> String {
    let items: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("'{}' => '{}'", escape_php_string(k), escape_php_string(v)))
        .collect();
    format!("array( {} )", items.join(", "))
}

fn json_object(pairs: &[(String, &str)]) -> String {
    let map: Map<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(*v)))
        .collect();
    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::ColumnSpec;

    fn ticket() -> EntityDescriptor {
        let mut status = ColumnSpec::new("status", "VARCHAR(50)");
        status.default_value = Some("pending".to_string());
        EntityDescriptor::new("ticket")
            .with_table("my_plugin_tickets")
            .with_column(ColumnSpec::new("title", "VARCHAR(255)"))
            .with_column(status)
    }

    #[test]
    fn test_prefix_from_entity() {
        let d = EntityDescriptor::new("Order Item").effective();
        let allowed = AllowedColumnSet::build(&[], false);
        let renderer = PluginRenderer::new(&d, &[], &allowed);
        assert_eq!(renderer.prefix(), "TFD_DBCRUD_ORDER_ITEM");
    }

    #[test]
    fn test_render_is_deterministic() {
        let d = ticket();
        assert_eq!(render(&d), render(&d));
    }

    #[test]
    fn test_render_contains_columns_function() {
        let out = render(&ticket());
        assert!(out.contains(
            "function tfd_dbcrud_ticket_columns_sql(): array {\n\treturn array(\n\t\t\"`id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT\",\n"
        ));
        assert!(out.contains("\t\t\"`status` VARCHAR(50) NOT NULL DEFAULT 'pending'\",\n"));
        assert!(out.contains("\t\t\"`updated_at` DATETIME NULL DEFAULT NULL\"\n\t);\n}\n"));
    }

    #[test]
    fn test_render_allow_list() {
        let out = render(&ticket());
        assert!(out.contains(
            "return array( 'id', 'title', 'status', 'created_at', 'updated_at' );"
        ));
    }

    #[test]
    fn test_render_pagination_defaults() {
        let out = render(&ticket());
        assert!(out.contains("$per  = isset( $args['per'] ) ? max( 1, (int) $args['per'] ) : 20;"));
        assert!(out.contains("$page = isset( $args['page'] ) ? max( 1, (int) $args['page'] ) : 1;"));
        assert!(out.contains("$off  = ( $page - 1 ) * $per;"));
    }

    #[test]
    fn test_render_write_routes_check_capability() {
        let out = render(&ticket());
        let checks = out
            .matches("if ( ! current_user_can( TFD_DBCRUD_TICKET_CAPABILITY_WRITE ) ) {")
            .count();
        assert_eq!(checks, 3, "create, update and delete are guarded");
        assert_eq!(out.matches("WP_REST_Server::READABLE").count(), 2);
    }

    #[test]
    fn test_render_without_rest_or_repository() {
        let out = render(&ticket().with_rest(false).with_repository(false));
        assert!(!out.contains("_Repository {"));
        assert!(!out.contains("register_rest_route"));
        assert!(out.contains("define( 'TFD_DBCRUD_TICKET_ENABLE_REST', false );"));
        assert!(out.contains("final class TFD_DBCRUD_TICKET_Installer {"));
        assert!(!out.contains("curl"));
    }

    #[test]
    fn test_render_rest_forces_repository() {
        let out = render(&ticket().with_repository(false).with_rest(true));
        assert!(out.contains("final class TFD_DBCRUD_TICKET_Repository {"));
    }

    #[test]
    fn test_render_defaults_for_blank_entity() {
        let out = render(&EntityDescriptor::default());
        assert!(out.contains(" * Plugin Name: TFD DB CRUD - Item\n"));
        assert!(out.contains("define( 'TFD_DBCRUD_ITEM_TABLE', 'tfd_items' );"));
        assert!(out.contains("define( 'TFD_DBCRUD_ITEM_REST_NAMESPACE', 'tfd-dbcrud/v1' );"));
        assert!(out.contains("if ( ! defined( 'TFD_DBCRUD_VERSION' ) ) {"));
        assert!(out.contains("$id  = TFD_DBCRUD_ITEM_Repository::create( array( 'title' => 'Example' ) );"));
    }

    #[test]
    fn test_usage_examples_use_real_columns() {
        let out = render(&ticket());
        assert!(out.contains(
            "TFD_DBCRUD_TICKET_Repository::update( $id, array( 'title' => 'Example', 'status' => 'pending' ) );"
        ));
        assert!(out.contains(
            r#"-d '{"status":"pending","title":"Example"}'"#
        ));
        assert!(out.contains(
            r#"curl -X DELETE "https://example.com/wp-json/tfd-dbcrud/v1/ticket/123""#
        ));
    }

    #[test]
    fn test_dollar_in_default_is_not_interpolated() {
        let mut price = ColumnSpec::new("label", "VARCHAR(20)");
        price.default_value = Some("$5".to_string());
        let out = render(&EntityDescriptor::new("coupon").with_column(price));
        assert!(out.contains(r#""`label` VARCHAR(20) NOT NULL DEFAULT '\$5'""#));
    }

    #[test]
    fn test_update_stamps_updated_at() {
        let out = render(&ticket());
        assert!(out.contains(
            "\t\tif ( TFD_DBCRUD_TICKET_ADD_TIMESTAMPS ) {\n\t\t\t$update['updated_at'] = current_time( 'mysql' );\n\t\t}\n"
        ));
    }
}
