use std::path::PathBuf;

use clap::{Args, builder::PossibleValuesParser};
use eyre::Result;
use wpgen_codegen::tools::{ACF_CATEGORIES, AcfFieldOptions, DEFAULT_ACF_CATEGORY};

use super::emit;

#[derive(Args)]
pub struct AcfFieldCommand {
    /// Field type name, slugged (e.g. color_picker)
    pub name: String,

    /// Label shown in the field type picker
    #[arg(long, default_value = "")]
    pub label: String,

    #[arg(long, default_value = DEFAULT_ACF_CATEGORY, value_parser = PossibleValuesParser::new(ACF_CATEGORIES))]
    pub category: String,

    /// PHP class name [default: CFB_Field_<Name>]
    #[arg(long = "class", default_value = "")]
    pub class_name: String,

    #[arg(long, default_value = "")]
    pub text_domain: String,

    /// Constant holding the plugin version for asset URLs
    #[arg(long, default_value = "")]
    pub version_constant: String,

    /// Skip the acf.Field.extend script
    #[arg(long)]
    pub no_js: bool,

    /// Include a stylesheet
    #[arg(long)]
    pub css: bool,

    /// Hide the field from the REST API
    #[arg(long)]
    pub no_rest: bool,

    /// Do not support the "required" setting
    #[arg(long)]
    pub no_required: bool,

    /// Write the bundle to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AcfFieldCommand {
    pub fn options(&self) -> AcfFieldOptions {
        AcfFieldOptions {
            field_name: self.name.clone(),
            field_label: self.label.clone(),
            text_domain: self.text_domain.clone(),
            category: self.category.clone(),
            class_name: self.class_name.clone(),
            version_constant: self.version_constant.clone(),
            supports_required: !self.no_required,
            show_in_rest: !self.no_rest,
            with_js: !self.no_js,
            with_css: self.css,
        }
    }

    pub fn run(&self) -> Result<()> {
        emit(self.output.as_deref(), &self.options().generate()?)
    }
}
