use super::AllowLists;
use crate::config::{RegistryConfig, UI_ALIAS_PREFIX};
use std::collections::BTreeSet;

/// Where the specifiers being classified came from. Only component groups
/// carry a context; without one, parent-relative imports are ignored and no
/// self-reference suppression applies.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// Output path of the importing file, e.g. `components/lib/card/Card.vue`
    pub file_path: &'a str,
    /// Group the importing file belongs to
    pub group: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyClassification {
    pub dependencies: BTreeSet<String>,
    pub dev_dependencies: BTreeSet<String>,
    pub registry_dependencies: BTreeSet<String>,
}

impl DependencyClassification {
    pub fn merge(&mut self, other: DependencyClassification) {
        self.dependencies.extend(other.dependencies);
        self.dev_dependencies.extend(other.dev_dependencies);
        self.registry_dependencies.extend(other.registry_dependencies);
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
            && self.dev_dependencies.is_empty()
            && self.registry_dependencies.is_empty()
    }
}

pub struct DependencyClassifier {
    allow: AllowLists,
    component_base: String,
    library_alias: String,
    base_url: String,
}

impl DependencyClassifier {
    pub fn new(allow: AllowLists, config: &RegistryConfig) -> Self {
        Self {
            allow,
            component_base: config.component_base(),
            library_alias: config.library_alias(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn allow_lists(&self) -> &AllowLists {
        &self.allow
    }

    pub fn classify(
        &self,
        imports: &[String],
        context: Option<ClassifyContext<'_>>,
    ) -> DependencyClassification {
        let mut out = DependencyClassification::default();

        for spec in imports {
            let spec = spec.as_str();

            if spec.starts_with("./") {
                continue;
            }

            if spec.starts_with("../") {
                if let Some(ctx) = context {
                    if let Some(group) = self.crossed_group(ctx, spec) {
                        out.registry_dependencies.insert(self.item_url(&group));
                    }
                }
                continue;
            }

            if self.allow.is_runtime(spec) {
                out.dependencies.insert(spec.to_string());

                let types = format!("@types/{}", spec);
                if self.allow.is_dev(&types) {
                    out.dev_dependencies.insert(types);
                }
            }

            if self.allow.is_dev(spec) {
                out.dev_dependencies.insert(spec.to_string());
            }

            if let Some(slug) = first_segment_after(spec, UI_ALIAS_PREFIX) {
                out.registry_dependencies.insert(slug.to_string());
            }

            if let Some(slug) = first_segment_after(spec, &self.library_alias) {
                if context.map_or(false, |ctx| ctx.group == slug) {
                    continue;
                }
                out.registry_dependencies.insert(self.item_url(slug));
            }
        }

        out
    }

    /// Group a parent-relative import lands in, when it is a different group
    /// under the component root.
    fn crossed_group(&self, ctx: ClassifyContext<'_>, spec: &str) -> Option<String> {
        let resolved = resolve_relative(ctx.file_path, spec);
        let rest = resolved.strip_prefix(&self.component_base)?;
        let group = rest.split('/').find(|s| !s.is_empty())?;
        (group != ctx.group).then(|| group.to_string())
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url, name)
    }
}

fn first_segment_after<'a>(spec: &'a str, prefix: &str) -> Option<&'a str> {
    spec.strip_prefix(prefix)?
        .split('/')
        .find(|s| !s.is_empty())
}

/// Joins `spec` onto the directory of `file_path`, POSIX style, collapsing
/// `.` and `..` segments. Leading `..` that climb above the start are kept.
pub(crate) fn resolve_relative(file_path: &str, spec: &str) -> String {
    let dir = file_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    let mut parts: Vec<&str> = Vec::new();

    for segment in dir.split('/').chain(spec.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    parts.join("/")
}
