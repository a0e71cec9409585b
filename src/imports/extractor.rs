use oxc::allocator::Allocator;
use oxc::ast::ast::Statement;
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse source: {0}")]
    Parse(String),
}

/// Extracts the module specifiers of top-level import declarations.
///
/// Implementations return each specifier once, in first-seen order.
pub trait ImportExtractor: Send + Sync {
    fn extract(&self, code: &str) -> Result<Vec<String>, ImportError>;
}

/// oxc-backed extractor. Sources are parsed as TypeScript modules.
///
/// Recoverable syntax errors are tolerated as long as the parser produced a
/// program; only an aborted parse is reported as an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct OxcImportExtractor;

impl ImportExtractor for OxcImportExtractor {
    fn extract(&self, code: &str) -> Result<Vec<String>, ImportError> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, code, SourceType::ts()).parse();

        if ret.panicked {
            let message = ret
                .errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "parser aborted".to_string());
            return Err(ImportError::Parse(message));
        }

        let mut seen = HashSet::new();
        let mut imports = Vec::new();
        for stmt in &ret.program.body {
            if let Statement::ImportDeclaration(decl) = stmt {
                let specifier = decl.source.value.as_str();
                if !specifier.is_empty() && seen.insert(specifier.to_string()) {
                    imports.push(specifier.to_string());
                }
            }
        }

        Ok(imports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(code: &str) -> Vec<String> {
        OxcImportExtractor.extract(code).unwrap()
    }

    #[test]
    fn test_named_default_and_namespace_imports() {
        let code = r#"
import { computed, ref } from 'vue'
import Player from './Player.vue'
import * as icons from 'lucide-vue-next'
"#;
        assert_eq!(extract(code), vec!["vue", "./Player.vue", "lucide-vue-next"]);
    }

    #[test]
    fn test_type_and_side_effect_imports() {
        let code = r#"
import type { Ref } from 'vue'
import './styles.css'
"#;
        assert_eq!(extract(code), vec!["vue", "./styles.css"]);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let code = r#"
import { a } from 'b'
import { c } from 'd'
import { e } from 'b'
"#;
        assert_eq!(extract(code), vec!["b", "d"]);
    }

    #[test]
    fn test_ignores_dynamic_imports_and_reexports() {
        let code = r#"
export { default as Button } from './Button.vue'
export * from './types'
const lazy = () => import('./Heavy.vue')
"#;
        assert!(extract(code).is_empty());
    }

    #[test]
    fn test_nested_imports_not_top_level() {
        let code = r#"
function load() {
  return import('x')
}
"#;
        assert!(extract(code).is_empty());
    }

    #[test]
    fn test_typescript_syntax() {
        let code = r#"
import { cva, type VariantProps } from 'class-variance-authority'
interface Props { size?: number }
const props = withDefaults(defineProps<Props>(), { size: 1 })
"#;
        assert_eq!(extract(code), vec!["class-variance-authority"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_aborted_parse_is_an_error() {
        let code = "import a from 'a'\nimport { broken from 'nowhere'\nimport b from 'b'\n";
        let err = OxcImportExtractor.extract(code).unwrap_err();
        assert!(matches!(err, ImportError::Parse(ref msg) if !msg.is_empty()));
    }
}
