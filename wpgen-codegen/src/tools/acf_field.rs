//! ACF custom field type class, with optional JS and CSS companions.

use eyre::{Result, bail};
use wpgen_core::{escape_php_string, is_php_identifier, to_pascal_snake_case, to_slug};

use crate::builder::CodeBuilder;

pub const DEFAULT_ACF_CATEGORY: &str = "basic";
pub const DEFAULT_ACF_TEXT_DOMAIN: &str = "my-plugin";
pub const DEFAULT_ACF_VERSION_CONSTANT: &str = "MY_PLUGIN_VERSION";

/// Field groups ACF lists field types under.
pub const ACF_CATEGORIES: [&str; 6] = [
    "basic",
    "content",
    "choice",
    "relational",
    "layout",
    "jquery",
];

/// Inputs for an `acf_field` subclass.
///
/// Only `field_name` is required. Blank text fields fall back to defaults:
/// the label to the PascalCase field name, the class to
/// `CFB_Field_<PascalCase>`.
#[derive(Debug, Clone, Default)]
pub struct AcfFieldOptions {
    pub field_name: String,
    pub field_label: String,
    pub text_domain: String,
    pub category: String,
    pub class_name: String,
    pub version_constant: String,
    pub supports_required: bool,
    pub show_in_rest: bool,
    /// Enqueue and emit an `acf.Field.extend` script.
    pub with_js: bool,
    /// Enqueue and emit a stylesheet.
    pub with_css: bool,
}

impl AcfFieldOptions {
    /// Options with required support, REST exposure and the script enabled.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            supports_required: true,
            show_in_rest: true,
            with_js: true,
            ..Self::default()
        }
    }

    pub fn generate(&self) -> Result<String> {
        let field = to_slug(&self.field_name);
        if field.is_empty() {
            bail!("please enter a valid field name");
        }
        let pascal = to_pascal_snake_case(&field).replace('_', "");

        let class = match self.class_name.trim() {
            "" => format!("CFB_Field_{}", pascal),
            name if is_php_identifier(name) => name.to_string(),
            name => bail!("'{}' is not a valid PHP class name", name),
        };
        let version_constant = match self.version_constant.trim() {
            "" => DEFAULT_ACF_VERSION_CONSTANT.to_string(),
            name if is_php_identifier(name) => name.to_string(),
            name => bail!("'{}' is not a valid PHP constant name", name),
        };

        let ctx = FieldContext {
            field,
            label: escape_php_string(non_blank(&self.field_label, &pascal)),
            text_domain: escape_php_string(non_blank(
                &self.text_domain,
                DEFAULT_ACF_TEXT_DOMAIN,
            )),
            category: escape_php_string(non_blank(&self.category, DEFAULT_ACF_CATEGORY)),
            class,
            version_constant,
            options: self,
        };

        let mut out = ctx.php();
        if self.with_js {
            out.push('\n');
            out.push_str(&ctx.js());
        }
        if self.with_css {
            out.push('\n');
            out.push_str(&ctx.css());
        }
        Ok(out)
    }
}

fn non_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        v => v,
    }
}

fn banner(b: &mut CodeBuilder, title: &str, file: Option<&str>) {
    b.push_line("/* ===============================");
    b.push_line(&format!(" * {}", title));
    if let Some(file) = file {
        b.push_line(&format!(" * File: {}", file));
    }
    b.push_line(" * =============================== */");
}

struct FieldContext<'a> {
    field: String,
    label: String,
    text_domain: String,
    category: String,
    class: String,
    version_constant: String,
    options: &'a AcfFieldOptions,
}

impl FieldContext<'_> {
    fn php(&self) -> String {
        let bool_lit = |v: bool| if v { "true" } else { "false" };
        let td = &self.text_domain;

        let mut b = CodeBuilder::php();
        b.push_line("<?php");
        banner(&mut b, "PHP: Field Class", None);
        b.push_block("if ( ! class_exists( 'acf_field' ) ) {", "}", |b| {
            b.push_line("return;");
        });
        b.push_blank();

        b.push_block(
            &format!("class {} extends acf_field {{", self.class),
            "}",
            |b| {
                b.push_blank();
                b.push_block("public function __construct() {", "}", |b| {
                    b.push_line(&format!("$this->name     = '{}';", self.field));
                    b.push_line(&format!(
                        "$this->label    = __( '{}', '{}' );",
                        self.label, td
                    ));
                    b.push_line(&format!("$this->category = '{}';", self.category));
                    b.push_blank();
                    b.push_block("$this->defaults = array(", ");", |b| {
                        b.push_line("'placeholder' => '',");
                    });
                    b.push_blank();
                    b.push_block("$this->supports = array(", ");", |b| {
                        b.push_line("'escaping_html' => false,");
                        b.push_line(&format!(
                            "'required'      => {},",
                            bool_lit(self.options.supports_required)
                        ));
                    });
                    b.push_blank();
                    b.push_line(&format!(
                        "$this->show_in_rest = {};",
                        bool_lit(self.options.show_in_rest)
                    ));
                    b.push_blank();
                    b.push_line("parent::__construct();");
                });
                b.push_blank();

                b.push_block(
                    "public function render_field_settings( $field ) : void {",
                    "}",
                    |b| {
                        b.push_block("acf_render_field_setting(", ");", |b| {
                            b.push_line("$field,");
                            b.push_block("array(", ")", |b| {
                                b.push_line(&format!(
                                    "'label'       => __( 'Placeholder', '{}' ),",
                                    td
                                ));
                                b.push_line("'name'        => 'placeholder',");
                                b.push_line("'type'        => 'text',");
                                b.push_line(&format!(
                                    "'placeholder' => __( 'Type something…', '{}' ),",
                                    td
                                ));
                            });
                        });
                    },
                );
                b.push_blank();

                b.push_block("public function render_field( $field ) : void {", "}", |b| {
                    b.push_line(
                        "$placeholder = isset( $field['placeholder'] ) ? (string) $field['placeholder'] : '';",
                    );
                    b.push_blank();
                    b.push_block("printf(", ");", |b| {
                        b.push_line("'<input type=\"text\" class=\"%s\" name=\"%s\" value=\"%s\" placeholder=\"%s\" />',");
                        b.push_line(&format!("esc_attr( 'acf-{}-input' ),", self.field));
                        b.push_line("esc_attr( $field['name'] ),");
                        b.push_line("esc_attr( (string) $field['value'] ),");
                        b.push_line("esc_attr( $placeholder )");
                    });
                });
                b.push_blank();

                b.push_block(
                    "public function input_admin_enqueue_scripts() : void {",
                    "}",
                    |b| self.enqueue(b),
                );
                b.push_blank();
            },
        );
        b.push_blank();
        b.push_line("// Register.");
        b.push_line(&format!("acf_register_field_type( '{}' );", self.class));
        b.build()
    }

    fn enqueue(&self, b: &mut CodeBuilder) {
        let constant = &self.version_constant;
        let field = &self.field;

        b.push_line(&format!(
            "$version = defined( '{constant}' ) ? {constant} : '1.0.0';"
        ));
        b.when(self.options.with_js, |b| {
            b.push_blank();
            b.push_block("wp_enqueue_script(", ");", |b| {
                b.push_line(&format!("'acf-{field}',"));
                b.push_line(&format!(
                    "plugin_dir_url( __FILE__ ) . 'assets/js/acf-{field}.js',"
                ));
                b.push_line("array( 'acf-input' ),");
                b.push_line("$version,");
                b.push_line("true");
            });
        });
        b.when(self.options.with_css, |b| {
            b.push_blank();
            b.push_block("wp_enqueue_style(", ");", |b| {
                b.push_line(&format!("'acf-{field}',"));
                b.push_line(&format!(
                    "plugin_dir_url( __FILE__ ) . 'assets/css/acf-{field}.css',"
                ));
                b.push_line("array(),");
                b.push_line("$version");
            });
        });
    }

    fn js(&self) -> String {
        let field = &self.field;
        let mut b = CodeBuilder::php();
        banner(
            &mut b,
            "JS: acf.Field.extend",
            Some(&format!("assets/js/acf-{field}.js")),
        );
        b.push_block("(function($){", "})(jQuery);", |b| {
            b.push_line("\"use strict\";");
            b.push_blank();
            b.push_block("if ( typeof acf === \"undefined\" ) {", "}", |b| {
                b.push_line("return;");
            });
            b.push_blank();
            b.push_block("var Field = acf.Field.extend({", "});", |b| {
                b.push_line(&format!("type: \"{field}\","));
                b.push_blank();
                b.push_block("events: {", "},", |b| {
                    b.push_line(&format!("\"input .acf-{field}-input\": \"onChange\""));
                });
                b.push_blank();
                b.push_block("onChange: function(e){", "}", |b| {
                    b.push_line("// Validate or transform the input here.");
                    b.push_line(&format!(
                        "// console.log(\"Value:\", this.$(\".acf-{field}-input\").val());"
                    ));
                });
            });
            b.push_blank();
            b.push_line("acf.registerFieldType(Field);");
            b.push_blank();
        });
        b.build()
    }

    fn css(&self) -> String {
        let field = &self.field;
        let mut b = CodeBuilder::php();
        banner(
            &mut b,
            "CSS: Field Styles",
            Some(&format!("assets/css/acf-{field}.css")),
        );
        b.push_block(&format!(".acf-{field}-input{{"), "}", |b| {
            b.push_line("width: 100%;");
            b.push_line("max-width: 100%;");
        });
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_field_name() {
        let php = AcfFieldOptions::new(" Color Picker ").generate().unwrap();

        assert!(php.starts_with("<?php\n"));
        assert!(php.contains("class CFB_Field_ColorPicker extends acf_field {\n"));
        assert!(php.contains("\t\t$this->name     = 'color_picker';\n"));
        assert!(php.contains("\t\t$this->label    = __( 'ColorPicker', 'my-plugin' );\n"));
        assert!(php.contains("\t\t$this->category = 'basic';\n"));
        assert!(php.contains("\t\t\t'required'      => true,\n"));
        assert!(php.contains("\t\t$this->show_in_rest = true;\n"));
        assert!(php.contains(
            "$version = defined( 'MY_PLUGIN_VERSION' ) ? MY_PLUGIN_VERSION : '1.0.0';"
        ));
        assert!(php.contains("acf_register_field_type( 'CFB_Field_ColorPicker' );\n"));
    }

    #[test]
    fn test_js_and_css_sections_follow_flags() {
        let mut options = AcfFieldOptions::new("rating");
        let php = options.generate().unwrap();
        assert!(php.contains("'assets/js/acf-rating.js'"));
        assert!(php.contains(" * File: assets/js/acf-rating.js\n"));
        assert!(php.contains("acf.registerFieldType(Field);"));
        assert!(!php.contains("wp_enqueue_style"));
        assert!(!php.contains("CSS: Field Styles"));

        options.with_js = false;
        options.with_css = true;
        let php = options.generate().unwrap();
        assert!(!php.contains("wp_enqueue_script"));
        assert!(php.contains("'assets/css/acf-rating.css'"));
        assert!(php.ends_with(".acf-rating-input{\n\twidth: 100%;\n\tmax-width: 100%;\n}\n"));
    }

    #[test]
    fn test_custom_values_are_escaped() {
        let options = AcfFieldOptions {
            field_label: "Editor's pick".into(),
            text_domain: "shop".into(),
            category: "choice".into(),
            class_name: "Shop_Pick_Field".into(),
            version_constant: "SHOP_VERSION".into(),
            supports_required: false,
            show_in_rest: false,
            ..AcfFieldOptions::new("pick")
        };
        let php = options.generate().unwrap();

        assert!(php.contains("__( 'Editor\\'s pick', 'shop' )"));
        assert!(php.contains("class Shop_Pick_Field extends acf_field"));
        assert!(php.contains("'required'      => false,"));
        assert!(php.contains("$this->show_in_rest = false;"));
        assert!(php.contains("defined( 'SHOP_VERSION' ) ? SHOP_VERSION"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(AcfFieldOptions::new("%%").generate().is_err());

        let options = AcfFieldOptions {
            class_name: "My Field".into(),
            ..AcfFieldOptions::new("pick")
        };
        assert!(options.generate().is_err());

        let options = AcfFieldOptions {
            version_constant: "1X".into(),
            ..AcfFieldOptions::new("pick")
        };
        assert!(options.generate().is_err());
    }
}
