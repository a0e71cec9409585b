//! Import extraction
//!
//! Pulls the module specifiers of top-level import declarations out of
//! component sources. The parser sits behind [`ImportExtractor`]; the default
//! implementation is backed by oxc.

mod extractor;
mod sfc;

pub use extractor::{ImportError, ImportExtractor, OxcImportExtractor};
pub use sfc::SfcScripts;

use tracing::{debug, warn};

/// Script text to analyze for a source file, chosen by extension.
///
/// `.vue` files contribute their `<script>` and `<script setup>` blocks joined
/// by a newline, `.ts` files their whole content. Anything else has no script.
pub fn script_source(path: &str, content: &str) -> Option<String> {
    if path.ends_with(".vue") {
        Some(SfcScripts::parse(content).joined())
    } else if path.ends_with(".ts") {
        Some(content.to_string())
    } else {
        None
    }
}

/// Imports referenced by a source file. Parse failures are logged and yield
/// an empty list.
pub fn imports_for_file(extractor: &dyn ImportExtractor, path: &str, content: &str) -> Vec<String> {
    let Some(code) = script_source(path, content) else {
        debug!(path, "No script source, skipping import extraction");
        return Vec::new();
    };

    if code.trim().is_empty() {
        return Vec::new();
    }

    match extractor.extract(&code) {
        Ok(imports) => {
            debug!(path, count = imports.len(), "Extracted imports");
            imports
        }
        Err(e) => {
            warn!(path, error = %e, "Failed to parse imports, treating file as import-free");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingExtractor;

    impl ImportExtractor for FailingExtractor {
        fn extract(&self, _code: &str) -> Result<Vec<String>, ImportError> {
            Err(ImportError::Parse("boom".to_string()))
        }
    }

    #[test]
    fn test_script_source_ts() {
        let code = script_source("components/x/use-x.ts", "import a from 'a'");
        assert_eq!(code.as_deref(), Some("import a from 'a'"));
    }

    #[test]
    fn test_script_source_vue_joins_blocks() {
        let sfc = r#"<script lang="ts">
import { a } from 'a'
</script>
<script setup lang="ts">
import b from 'b'
</script>
<template><div /></template>"#;
        let code = script_source("Button.vue", sfc).unwrap();
        assert!(code.contains("from 'a'"));
        assert!(code.contains("from 'b'"));
        assert!(!code.contains("template"));
    }

    #[test]
    fn test_script_source_other_extension() {
        assert!(script_source("styles.css", "body {}").is_none());
    }

    #[test]
    fn test_imports_for_file_uses_extractor() {
        let imports = imports_for_file(
            &OxcImportExtractor,
            "use-audio.ts",
            "import { ref } from 'vue'\nimport x from 'lodash'\n",
        );
        assert_eq!(imports, vec!["vue", "lodash"]);
    }

    #[test]
    fn test_imports_for_file_swallows_parse_errors() {
        let imports = imports_for_file(&FailingExtractor, "a.ts", "import a from 'a'");
        assert!(imports.is_empty());
    }

    #[test]
    fn test_imports_for_template_only_sfc() {
        let imports = imports_for_file(&FailingExtractor, "Icon.vue", "<template><svg /></template>");
        assert!(imports.is_empty());
    }

    #[test]
    fn test_imports_for_file_drops_aborted_parse() {
        let imports = imports_for_file(
            &OxcImportExtractor,
            "button.ts",
            "import { debounce } from 'lodash'\nimport { broken from 'nowhere'\n",
        );
        assert!(imports.is_empty());
    }

    #[test]
    fn test_imports_for_generic_component() {
        let sfc = r#"<script setup lang="ts" generic="T extends Record<string, unknown>">
import { debounce } from 'lodash'
import Button from '@/components/ui/button'
</script>
<template><ul><li v-for="item in items" /></ul></template>"#;
        let imports = imports_for_file(&OxcImportExtractor, "List.vue", sfc);
        assert_eq!(imports, vec!["lodash", "@/components/ui/button"]);
    }

    #[test]
    fn test_imports_ignore_commented_script_in_template() {
        let sfc = "<template><!-- <script>import x from 'ghost'</script> --><div /></template>\n<script setup>import a from 'a'</script>";
        let imports = imports_for_file(&OxcImportExtractor, "Ghost.vue", sfc);
        assert_eq!(imports, vec!["a"]);
    }
}
