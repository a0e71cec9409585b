//! Shared fixture workspace for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const OUTPUT_DIR: &str = "dist/registry";

/// A throwaway component library workspace on disk
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Elements with three groups (one invalid), two examples, one block
    pub fn standard() -> Self {
        let ws = Self::empty();

        ws.write(
            "packages/elements/package.json",
            r#"{
  "name": "@repo/elements",
  "dependencies": {
    "vue": "^3.5.0",
    "lodash": "^4.17.21",
    "motion-v": "^1.0.0",
    "@repo/shadcn-vue": "workspace:*",
    "@repo/shared-utils": "workspace:*"
  },
  "devDependencies": {
    "@types/lodash": "^4.17.0",
    "typescript": "^5.6.0"
  }
}"#,
        );
        ws.write(
            "packages/examples/package.json",
            r#"{ "dependencies": { "@vueuse/core": "^12.0.0" } }"#,
        );
        ws.write(
            "packages/shadcn-vue/package.json",
            r#"{ "dependencies": { "reka-ui": "^2.0.0" } }"#,
        );

        ws.write(
            "packages/elements/src/index.ts",
            "export * from './card'\nexport * from './shared'\n",
        );
        ws.write(
            "packages/elements/src/card/Card.vue",
            r#"<script lang="ts">
export const cardVariants = ['default', 'outline'] as const
</script>

<script setup lang="ts">
import { debounce } from 'lodash'
import type { MotionProps } from 'motion-v'
import { Button } from '@repo/shadcn-vue/components/ui/button'
import { cn } from '@repo/shadcn-vue/lib/utils'
import { useCard } from '@repo/elements/card/useCard'
import SharedButton from '../shared/button'
import CardHeader from './CardHeader.vue'
import { sharedHelper } from '@repo/shared-utils'
</script>

<template>
  <div :class="cn('card')"><CardHeader /><Button /></div>
</template>
"#,
        );
        ws.write(
            "packages/elements/src/card/CardHeader.vue",
            "<template><header><slot /></header></template>\n",
        );
        ws.write(
            "packages/elements/src/card/useCard.ts",
            "import { ref } from 'vue'\nexport function useCard() { return ref(0) }\n",
        );
        ws.write(
            "packages/elements/src/card/index.ts",
            "export { default as Card } from './Card.vue'\n",
        );
        ws.write(
            "packages/elements/src/shared/button.ts",
            "import { computed } from 'vue'\nimport { debounce } from 'lodash'\nimport { broken from 'nowhere'\nimport { reka } from 'reka-ui'\n",
        );
        ws.write(
            "packages/elements/src/shared/format.ts",
            "import { animate } from 'motion-v'\nexport const fade = () => animate\n",
        );
        ws.write("packages/elements/src/shared/README.md", "# Shared\n");
        ws.write(
            "packages/elements/src/Bad Group/thing.ts",
            "export const thing = 1\n",
        );

        ws.write(
            "packages/examples/src/card.vue",
            r#"<script setup lang="ts">
import { Card } from '@repo/elements/card'
import { useMouse } from '@vueuse/core'
import Helper from './helpers/Helper.vue'
</script>
<template><Card /></template>
"#,
        );
        ws.write(
            "packages/examples/src/voice-button.vue",
            "<template><button /></template>\n",
        );
        ws.write(
            "packages/examples/src/helpers/Helper.vue",
            "<template><span /></template>\n",
        );

        ws.write(
            "packages/blocks/src/block-meta.toml",
            r#"[voice-chat-01]
description = "A voice chat interface with live transcript."
categories = ["agents", "audio"]
iframe_height = "800px"
mobile = "component"
"#,
        );
        ws.write(
            "packages/blocks/src/voice-chat-01/page.vue",
            r#"<script setup lang="ts">
import ChatPanel from './components/ChatPanel.vue'
import { Orb } from '@repo/elements/orb'
</script>
<template><ChatPanel /><Orb /></template>
"#,
        );
        ws.write(
            "packages/blocks/src/voice-chat-01/components/ChatPanel.vue",
            r#"<script setup lang="ts">
import { Card } from '@repo/elements/card'
import { Input } from '@repo/shadcn-vue/components/ui/input'
</script>
<template><Card><Input /></Card></template>
"#,
        );
        ws.write(
            "packages/blocks/src/voice-chat-01/lib/format.ts",
            "export const format = (s: string) => s.trim()\n",
        );
        fs::create_dir_all(ws.path().join("packages/blocks/src/placeholder-02"))
            .expect("Failed to create empty block");

        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_path(&self) -> PathBuf {
        self.path().join(OUTPUT_DIR)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write fixture file");
    }

    pub fn read_output(&self, rel: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.output_path().join(rel))
            .unwrap_or_else(|e| panic!("Failed to read output {}: {}", rel, e));
        serde_json::from_str(&content).expect("Output is not valid JSON")
    }

    pub fn output_exists(&self, rel: &str) -> bool {
        self.output_path().join(rel).exists()
    }
}
