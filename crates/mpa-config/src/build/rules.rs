use serde::Serialize;
use serde_json::{Value, json};

use crate::mode::BuildMode;

pub const SVELTE_LOADER: &str = "svelte-loader";
pub const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";
pub const CSS_LOADER: &str = "css-loader";
pub const STYLE_LOADER: &str = "style-loader";
pub const LESS_LOADER: &str = "less-loader";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOptions {
    pub rules: Vec<ModuleRule>,
}

/// Maps files whose path matches `test` onto a loader pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRule {
    /// Regular expression source matched against the module path
    pub test: String,

    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<LoaderUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<RuleResolve>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderUse {
    pub loader: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderUse {
    pub fn new(loader: &str) -> Self {
        Self {
            loader: loader.to_string(),
            options: None,
        }
    }

    pub fn with_options(loader: &str, options: Value) -> Self {
        Self {
            loader: loader.to_string(),
            options: Some(options),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResolve {
    pub fully_specified: bool,
}

impl ModuleRule {
    fn loaders(test: &str, uses: Vec<LoaderUse>) -> Self {
        Self {
            test: test.to_string(),
            uses,
            resolve: None,
        }
    }

    /// Whether `path` is handled by this rule.
    pub fn matches(&self, path: &str) -> bool {
        regex::Regex::new(&self.test).is_ok_and(|re| re.is_match(path))
    }
}

impl ModuleOptions {
    /// Loader rules for component, stylesheet and less sources.
    ///
    /// Component CSS is emitted as separate files in production and kept
    /// inline with hot reload in development.
    pub fn for_mode(mode: BuildMode) -> Self {
        let prod = mode.is_production();

        let rules = vec![
            ModuleRule::loaders(
                r"\.svelte$",
                vec![LoaderUse::with_options(
                    SVELTE_LOADER,
                    json!({
                        "compilerOptions": { "dev": !prod },
                        "emitCss": prod,
                        "hotReload": !prod,
                    }),
                )],
            ),
            ModuleRule::loaders(
                r"\.css$",
                vec![LoaderUse::new(CSS_EXTRACT_LOADER), LoaderUse::new(CSS_LOADER)],
            ),
            ModuleRule::loaders(
                r"\.less$",
                vec![
                    LoaderUse::new(STYLE_LOADER),
                    LoaderUse::new(CSS_LOADER),
                    LoaderUse::new(LESS_LOADER),
                ],
            ),
            // svelte ships extensionless imports in its .mjs files
            ModuleRule {
                test: r"node_modules/svelte/.*\.mjs$".to_string(),
                uses: Vec::new(),
                resolve: Some(RuleResolve {
                    fully_specified: false,
                }),
            },
        ];

        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for<'a>(options: &'a ModuleOptions, path: &str) -> &'a ModuleRule {
        options
            .rules
            .iter()
            .find(|rule| rule.matches(path))
            .unwrap_or_else(|| panic!("no rule for {path}"))
    }

    #[test]
    fn svelte_rule_follows_mode() {
        let dev = ModuleOptions::for_mode(BuildMode::Development);
        let options = rule_for(&dev, "src/App.svelte").uses[0].options.clone().unwrap();
        assert_eq!(options["compilerOptions"]["dev"], json!(true));
        assert_eq!(options["emitCss"], json!(false));
        assert_eq!(options["hotReload"], json!(true));

        let prod = ModuleOptions::for_mode(BuildMode::Production);
        let options = rule_for(&prod, "src/App.svelte").uses[0].options.clone().unwrap();
        assert_eq!(options["compilerOptions"]["dev"], json!(false));
        assert_eq!(options["emitCss"], json!(true));
        assert_eq!(options["hotReload"], json!(false));
    }

    #[test]
    fn stylesheets_use_their_pipelines() {
        let options = ModuleOptions::for_mode(BuildMode::Development);

        let css: Vec<_> = rule_for(&options, "src/app.css")
            .uses
            .iter()
            .map(|u| u.loader.as_str())
            .collect();
        assert_eq!(css, vec![CSS_EXTRACT_LOADER, CSS_LOADER]);

        let less: Vec<_> = rule_for(&options, "src/theme.less")
            .uses
            .iter()
            .map(|u| u.loader.as_str())
            .collect();
        assert_eq!(less, vec![STYLE_LOADER, CSS_LOADER, LESS_LOADER]);
    }

    #[test]
    fn svelte_runtime_modules_are_not_fully_specified() {
        let options = ModuleOptions::for_mode(BuildMode::Production);
        let rule = rule_for(&options, "node_modules/svelte/internal/index.mjs");
        assert_eq!(
            rule.resolve,
            Some(RuleResolve {
                fully_specified: false
            })
        );
        let value = serde_json::to_value(rule).unwrap();
        assert_eq!(value["resolve"]["fullySpecified"], json!(false));
        assert!(value.get("use").is_none());
    }
}
