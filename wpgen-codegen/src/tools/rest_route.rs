//! REST route registration stubs.

use std::{fmt, str::FromStr, sync::LazyLock};

use eyre::{Result, bail};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use wpgen_core::{escape_php_string, to_pascal_snake_case, to_slug};

use crate::builder::CodeBuilder;

/// Named path parameter: `(?P<name>pattern)`.
static PATH_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\?P<([a-zA-Z0-9_]+)>([^)]+)\)").expect("valid regex")
});

const DEFAULT_CAPABILITY: &str = "manage_options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// The matching `WP_REST_Server` method constant.
    pub fn wp_constant(&self) -> &'static str {
        match self {
            Self::Get => "WP_REST_Server::READABLE",
            Self::Post => "WP_REST_Server::CREATABLE",
            Self::Put | Self::Patch => "WP_REST_Server::EDITABLE",
            Self::Delete => "WP_REST_Server::DELETABLE",
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported HTTP method '{}'", other)),
        }
    }
}

/// Who may call the route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Public,
    LoggedIn,
    /// A blank capability means `manage_options`.
    Capability(String),
}

impl Permission {
    fn check(&self) -> String {
        match self {
            Self::Public => "return true;".to_string(),
            Self::LoggedIn => "return is_user_logged_in();".to_string(),
            Self::Capability(cap) => {
                let cap = match cap.trim() {
                    "" => DEFAULT_CAPABILITY,
                    cap => cap,
                };
                format!("return current_user_can( '{}' );", escape_php_string(cap))
            }
        }
    }
}

/// Where a route argument is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgLocation {
    Path,
    #[default]
    Query,
    Body,
}

impl FromStr for ArgLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "path" => Ok(Self::Path),
            "" | "query" => Ok(Self::Query),
            "body" => Ok(Self::Body),
            other => Err(format!("unknown argument location '{}'", other)),
        }
    }
}

/// One entry of the route's `args` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestArg {
    pub name: String,
    pub location: ArgLocation,
    /// JSON schema type: string, integer, number, boolean, array, object.
    pub arg_type: String,
    pub required: bool,
    pub sanitize: Option<String>,
}

impl RestArg {
    pub fn new(name: impl Into<String>, location: ArgLocation, arg_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            arg_type: arg_type.into(),
            required: false,
            sanitize: None,
        }
    }

    /// Sample JSON value used in the curl example body.
    fn sample(&self) -> Value {
        match self.arg_type.as_str() {
            "integer" => Value::from(1),
            "number" => Value::from(1.5),
            "boolean" => Value::Bool(true),
            "array" => Value::Array(Vec::new()),
            "object" => Value::Object(Map::new()),
            _ => Value::from("value"),
        }
    }
}

/// Parses `name:in:type[:required][:sanitize]`.
///
/// `in` defaults to `query` and `type` to `string`. Any trailing segment
/// other than `required`/`optional` is taken as the sanitize callback.
impl FromStr for RestArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(format!("argument '{}' has no name", s));
        }
        let location = parts.next().unwrap_or_default().parse()?;
        let arg_type = match parts.next().unwrap_or_default() {
            "" => "string",
            t => t,
        };

        let mut arg = RestArg::new(name, location, arg_type);
        for part in parts {
            match part {
                "required" => arg.required = true,
                "optional" | "" => {}
                callback => arg.sanitize = Some(callback.to_string()),
            }
        }
        Ok(arg)
    }
}

/// Find `(?P<name>pattern)` path parameters in a route.
///
/// Digit patterns become `integer`/`absint`, anything else
/// `string`/`sanitize_text_field`. All are required.
pub fn detect_path_params(route: &str) -> Vec<RestArg> {
    PATH_PARAM
        .captures_iter(route)
        .map(|caps| {
            let (arg_type, sanitize) = if is_numeric_pattern(&caps[2]) {
                ("integer", "absint")
            } else {
                ("string", "sanitize_text_field")
            };
            RestArg {
                required: true,
                sanitize: Some(sanitize.to_string()),
                ..RestArg::new(&caps[1], ArgLocation::Path, arg_type)
            }
        })
        .collect()
}

fn is_numeric_pattern(pattern: &str) -> bool {
    pattern.contains(r"\d") || pattern.contains("[0-9]")
}

/// Options for the `rest-route` tool.
#[derive(Debug, Clone, Default)]
pub struct RestRouteOptions {
    pub namespace: String,
    /// Route path; a leading `/` is added when missing.
    pub route: String,
    pub method: HttpMethod,
    pub permission: Permission,
    pub args: Vec<RestArg>,
    /// Emit a `WP_REST_Controller` subclass instead of a callback function.
    pub controller: bool,
}

impl RestRouteOptions {
    pub fn new(namespace: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            route: route.into(),
            ..Self::default()
        }
    }

    /// The route with surrounding whitespace removed and a leading `/`.
    pub fn route_path(&self) -> String {
        let route = self.route.trim();
        if route.is_empty() || route.starts_with('/') {
            route.to_string()
        } else {
            format!("/{}", route)
        }
    }

    /// User arguments followed by any path parameters they do not already name.
    pub fn effective_args(&self) -> Vec<RestArg> {
        let mut args: Vec<RestArg> = self
            .args
            .iter()
            .filter(|a| !a.name.trim().is_empty())
            .cloned()
            .collect();
        for param in detect_path_params(&self.route_path()) {
            if !args.iter().any(|a| a.name == param.name) {
                args.push(param);
            }
        }
        args
    }

    pub fn generate(&self) -> Result<String> {
        let namespace = self.namespace.trim();
        let route = self.route_path();
        if namespace.is_empty() {
            bail!("please enter a namespace (e.g. my-plugin/v1)");
        }
        if route.is_empty() {
            bail!(r"please enter a route (e.g. /items or /items/(?P<id>\d+))");
        }

        let route = RouteContext {
            namespace,
            route: &route,
            method: self.method,
            permission: &self.permission,
            args: self.effective_args(),
        };
        let code = if self.controller {
            route.render_controller()
        } else {
            route.render_function()
        };
        tracing::debug!(controller = self.controller, "generated rest route");
        Ok(code)
    }
}

struct RouteContext<'a> {
    namespace: &'a str,
    route: &'a str,
    method: HttpMethod,
    permission: &'a Permission,
    args: Vec<RestArg>,
}

impl RouteContext<'_> {
    fn identifier_base(&self) -> String {
        format!("{}_{}", self.namespace, self.route)
    }

    fn function_name(&self) -> String {
        to_slug(&format!("tfd_rest_{}_{}", self.identifier_base(), self.method))
    }

    fn class_name(&self) -> String {
        format!(
            "TFD_REST_{}_Controller",
            to_pascal_snake_case(&self.identifier_base())
        )
    }

    fn rest_base(&self) -> &str {
        match self.route.trim_start_matches('/').split('/').next() {
            Some(base) if !base.is_empty() => base,
            _ => "items",
        }
    }

    fn curl_example(&self) -> Vec<String> {
        let route = PATH_PARAM.replace_all(self.route, |caps: &Captures| {
            let sample = if is_numeric_pattern(&caps[2]) {
                "123"
            } else {
                "example"
            };
            sample.to_string()
        });
        let url = format!("https://example.com/wp-json/{}{}", self.namespace, route);

        if !self.method.has_body() {
            return vec![format!("curl -X {} \"{}\"", self.method, url)];
        }

        let body: Map<String, Value> = self
            .args
            .iter()
            .filter(|a| a.location == ArgLocation::Body)
            .map(|a| (a.name.clone(), a.sample()))
            .collect();
        let json = serde_json::to_string_pretty(&Value::Object(body)).unwrap_or_default();

        let mut lines = vec![
            format!("curl -X {} \"{}\" \\", self.method, url),
            "  -H \"Content-Type: application/json\" \\".to_string(),
        ];
        let mut json_lines = json.lines();
        if let Some(first) = json_lines.next() {
            lines.push(format!("  -d '{}", first));
        }
        lines.extend(json_lines.map(str::to_string));
        if let Some(last) = lines.last_mut() {
            last.push('\'');
        }
        lines
    }

    fn push_header(&self, b: &mut CodeBuilder) {
        let mut lines = vec![
            format!("REST Route: {}{}", self.namespace, self.route),
            format!("Method: {}", self.method),
            String::new(),
            "Example curl:".to_string(),
        ];
        lines.extend(self.curl_example());

        b.push_line("<?php");
        b.push_docblock(lines);
        b.push_blank();
    }

    fn push_args(&self, b: &mut CodeBuilder) {
        const KEY: &str = "'args'                => array(";
        if self.args.is_empty() {
            b.push_line("'args'                => array(),");
            return;
        }

        let last = self.args.len() - 1;
        b.push_block(KEY, "),", |b| {
            for (i, arg) in self.args.iter().enumerate() {
                let close = if i == last { ")" } else { ")," };
                b.push_block(
                    &format!("'{}' => array(", escape_php_string(&arg.name)),
                    close,
                    |b| {
                        let mut fields = vec![
                            format!("'type'     => '{}'", escape_php_string(&arg.arg_type)),
                            format!("'required' => {}", arg.required),
                        ];
                        if let Some(sanitize) = &arg.sanitize {
                            fields.push(format!(
                                "'sanitize_callback' => '{}'",
                                escape_php_string(sanitize)
                            ));
                        }
                        b.push_separated(&fields, ",");
                    },
                );
            }
        });
    }

    fn push_handler_body(b: &mut CodeBuilder) {
        b.push_blank();
        b.push_line("// Examples:");
        b.push_line("// $id = $request->get_param( 'id' );");
        b.push_line("// $body = $request->get_json_params();");
        b.push_blank();
        b.push_block("$data = array(", ");", |b| {
            b.push_line("'ok' => true,");
        });
        b.push_blank();
        b.push_line("return rest_ensure_response( $data );");
    }

    fn push_callback_docblock(b: &mut CodeBuilder, summary: &str, returns: &str) {
        b.push_docblock([
            summary,
            "",
            "@param WP_REST_Request $request Request.",
            returns,
        ]);
    }

    fn render_function(&self) -> String {
        let function = self.function_name();
        let mut b = CodeBuilder::php();
        self.push_header(&mut b);

        b.push_block("add_action( 'rest_api_init', function () {", "} );", |b| {
            b.push_blank();
            b.push_block("register_rest_route(", ");", |b| {
                b.push_line(&format!("'{}',", escape_php_string(self.namespace)));
                b.push_line(&format!("'{}',", escape_php_string(self.route)));
                b.push_block("array(", ")", |b| {
                    b.push_line(&format!(
                        "'methods'             => {},",
                        self.method.wp_constant()
                    ));
                    b.push_line(&format!(
                        "'callback'            => '{}',",
                        escape_php_string(&function)
                    ));
                    b.push_block(
                        "'permission_callback' => function( WP_REST_Request $request ) {",
                        "},",
                        |b| {
                            b.push_line(&self.permission.check());
                        },
                    );
                    self.push_args(b);
                });
            });
            b.push_blank();
        });
        b.push_blank();

        Self::push_callback_docblock(
            &mut b,
            "Endpoint callback.",
            "@return WP_REST_Response|WP_Error",
        );
        b.push_block(
            &format!("function {}( WP_REST_Request $request ) {{", function),
            "}",
            Self::push_handler_body,
        );
        b.build()
    }

    fn render_controller(&self) -> String {
        let class = self.class_name();
        let mut b = CodeBuilder::php();
        self.push_header(&mut b);

        b.push_block(
            &format!("class {} extends WP_REST_Controller {{", class),
            "}",
            |b| {
                b.push_blank();
                b.push_block("public function __construct() {", "}", |b| {
                    b.push_line(&format!(
                        "$this->namespace = '{}';",
                        escape_php_string(self.namespace)
                    ));
                    b.push_line(&format!(
                        "$this->rest_base = '{}';",
                        escape_php_string(self.rest_base())
                    ));
                });
                b.push_blank();
                b.push_docblock(["Register routes."]);
                b.push_block("public function register_routes() : void {", "}", |b| {
                    b.push_blank();
                    b.push_block("register_rest_route(", ");", |b| {
                        b.push_line("$this->namespace,");
                        b.push_line(&format!("'{}',", escape_php_string(self.route)));
                        b.push_block("array(", ")", |b| {
                            b.push_block("array(", "),", |b| {
                                b.push_line(&format!(
                                    "'methods'             => {},",
                                    self.method.wp_constant()
                                ));
                                b.push_line(
                                    "'callback'            => array( $this, 'handle_request' ),",
                                );
                                b.push_line(
                                    "'permission_callback' => array( $this, 'permissions_check' ),",
                                );
                                self.push_args(b);
                            });
                        });
                    });
                });
                b.push_blank();
                Self::push_callback_docblock(b, "Permissions check.", "@return bool|WP_Error");
                b.push_block(
                    "public function permissions_check( WP_REST_Request $request ) {",
                    "}",
                    |b| {
                        b.push_line(&self.permission.check());
                    },
                );
                b.push_blank();
                Self::push_callback_docblock(
                    b,
                    "Main handler for this route.",
                    "@return WP_REST_Response|WP_Error",
                );
                b.push_block(
                    "public function handle_request( WP_REST_Request $request ) {",
                    "}",
                    Self::push_handler_body,
                );
            },
        );
        b.push_blank();
        b.push_block("add_action( 'rest_api_init', function () {", "} );", |b| {
            b.push_line(&format!("$controller = new {}();", class));
            b.push_line("$controller->register_routes();");
        });
        b.build()
    }
}
