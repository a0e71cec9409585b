//! Script blocks of Vue single-file components

use regex::Regex;
use std::sync::OnceLock;

/// Opening tag at the start of the input. Quoted attribute values may contain
/// `>` (e.g. `generic="T extends Record<string, unknown>"`).
fn open_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^<([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("valid regex")
    })
}

fn setup_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)setup(?:\s|=|$)").expect("valid regex"))
}

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Position just past the comment starting at `at`
fn skip_comment(lower: &str, at: usize) -> usize {
    lower[at..]
        .find(COMMENT_CLOSE)
        .map_or(lower.len(), |end| at + end + COMMENT_CLOSE.len())
}

/// Position just past the `>` following `at`
fn past_gt(lower: &str, at: usize) -> usize {
    lower[at..].find('>').map_or(lower.len(), |gt| at + gt + 1)
}

fn is_close_tag(rest: &str, tag: &str) -> bool {
    rest.strip_prefix("</")
        .and_then(|r| r.strip_prefix(tag))
        .is_some_and(|r| r.starts_with(|c: char| c == '>' || c.is_ascii_whitespace()))
}

/// Body end and resume position of a raw-text block (`script`, `style`,
/// custom blocks): the first closing tag ends it.
fn raw_block_end(lower: &str, from: usize, tag: &str) -> (usize, usize) {
    let mut pos = from;
    while let Some(offset) = lower[pos..].find("</") {
        let at = pos + offset;
        if is_close_tag(&lower[at..], tag) {
            return (at, past_gt(lower, at));
        }
        pos = at + 2;
    }
    (lower.len(), lower.len())
}

/// Body end and resume position of a `<template>` block, which may nest
/// further templates and contain comments.
fn template_block_end(lower: &str, from: usize) -> (usize, usize) {
    let mut depth = 0usize;
    let mut pos = from;
    while let Some(offset) = lower[pos..].find('<') {
        let at = pos + offset;
        let rest = &lower[at..];

        if rest.starts_with(COMMENT_OPEN) {
            pos = skip_comment(lower, at);
            continue;
        }
        if is_close_tag(rest, "template") {
            if depth == 0 {
                return (at, past_gt(lower, at));
            }
            depth -= 1;
        } else if let Some(caps) = open_tag_re().captures(rest) {
            if &caps[1] == "template" && !caps[2].trim_end().ends_with('/') {
                depth += 1;
            }
            pos = at + caps[0].len();
            continue;
        }
        pos = at + 1;
    }
    (lower.len(), lower.len())
}

/// The `<script>` and `<script setup>` contents of a component. Only top-level
/// blocks count and only the first of each kind is kept; template, style and
/// comments are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcScripts {
    pub script: Option<String>,
    pub script_setup: Option<String>,
}

impl SfcScripts {
    pub fn parse(source: &str) -> Self {
        let mut scripts = Self::default();
        // ASCII lowercasing keeps byte offsets valid for `source`
        let lower = source.to_ascii_lowercase();
        let mut pos = 0;

        while let Some(offset) = lower[pos..].find('<') {
            let start = pos + offset;
            let rest = &lower[start..];

            if rest.starts_with(COMMENT_OPEN) {
                pos = skip_comment(&lower, start);
                continue;
            }
            let Some(caps) = open_tag_re().captures(rest) else {
                pos = start + 1;
                continue;
            };

            let tag = caps[1].to_string();
            let body_start = start + caps[0].len();
            if caps[2].trim_end().ends_with('/') {
                pos = body_start;
                continue;
            }

            let (body_end, next) = if tag == "template" {
                template_block_end(&lower, body_start)
            } else {
                raw_block_end(&lower, body_start, &tag)
            };

            if tag == "script" {
                let attrs = &source[start + 1 + tag.len()..body_start - 1];
                let slot = if setup_attr_re().is_match(attrs) {
                    &mut scripts.script_setup
                } else {
                    &mut scripts.script
                };
                if slot.is_none() {
                    *slot = Some(source[body_start..body_end].to_string());
                }
            }
            pos = next;
        }

        scripts
    }

    /// Script then script-setup content, newline separated
    pub fn joined(&self) -> String {
        [
            self.script.as_deref().unwrap_or(""),
            self.script_setup.as_deref().unwrap_or(""),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_only() {
        let sfc = "<script setup lang=\"ts\">\nimport a from 'a'\n</script>\n<template />";
        let scripts = SfcScripts::parse(sfc);
        assert!(scripts.script.is_none());
        assert_eq!(scripts.script_setup.as_deref(), Some("\nimport a from 'a'\n"));
    }

    #[test]
    fn test_both_blocks() {
        let sfc = "<script>\nexport default {}\n</script>\n<script setup>\nconst x = 1\n</script>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts.script.as_deref(), Some("\nexport default {}\n"));
        assert_eq!(scripts.script_setup.as_deref(), Some("\nconst x = 1\n"));
        assert_eq!(scripts.joined(), "\nexport default {}\n\n\nconst x = 1\n");
    }

    #[test]
    fn test_setup_attr_not_confused_with_lang_value() {
        let sfc = "<script lang=\"setup-ts\">const a = 1</script>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts.script.as_deref(), Some("const a = 1"));
        assert!(scripts.script_setup.is_none());
    }

    #[test]
    fn test_style_and_template_ignored() {
        let sfc = "<template><p>script</p></template>\n<style scoped>.a{}</style>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts, SfcScripts::default());
        assert_eq!(scripts.joined(), "\n");
    }

    #[test]
    fn test_generic_attribute_with_angle_brackets() {
        let sfc = "<script setup lang=\"ts\" generic=\"T extends Record<string, unknown>\">\nimport { debounce } from 'lodash'\n</script>\n<template><ul /></template>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(
            scripts.script_setup.as_deref(),
            Some("\nimport { debounce } from 'lodash'\n")
        );
    }

    #[test]
    fn test_single_quoted_attribute_with_angle_bracket() {
        let sfc = "<script setup lang='ts' generic='T extends A<B>'>const a = 1</script>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts.script_setup.as_deref(), Some("const a = 1"));
    }

    #[test]
    fn test_commented_out_script_ignored() {
        let sfc = "<!-- <script>import old from 'old'</script> -->\n<script setup>import a from 'a'</script>";
        let scripts = SfcScripts::parse(sfc);
        assert!(scripts.script.is_none());
        assert_eq!(scripts.script_setup.as_deref(), Some("import a from 'a'"));
    }

    #[test]
    fn test_script_inside_template_ignored() {
        let sfc = "<template><!-- <script>import x from 'ghost'</script> --><div /></template>\n<script setup>import a from 'a'</script>";
        let scripts = SfcScripts::parse(sfc);
        assert!(scripts.script.is_none());
        assert_eq!(scripts.script_setup.as_deref(), Some("import a from 'a'"));
    }

    #[test]
    fn test_nested_templates_skipped_as_one_block() {
        let sfc = r#"<template>
  <template v-if="ok"><span>a</span></template>
  <template #footer><script>import y from 'y'</script></template>
</template>
<script lang="ts">import b from 'b'</script>"#;
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts.script.as_deref(), Some("import b from 'b'"));
        assert!(scripts.script_setup.is_none());
    }

    #[test]
    fn test_uppercase_tags() {
        let sfc = "<SCRIPT setup>const a = 1</SCRIPT>";
        let scripts = SfcScripts::parse(sfc);
        assert_eq!(scripts.script_setup.as_deref(), Some("const a = 1"));
    }
}
