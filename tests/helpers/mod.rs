#![allow(dead_code)]

use guidebook::clock::FixedClock;
use guidebook::config::{GuidebookConfig, LayoutConfig};
use guidebook::guide::GuideSet;
use guidebook::notes::{EntryDraft, SnippetStore};
use std::path::Path;
use tempfile::TempDir;

/// 2024-03-05T12:00:00Z
pub const T0: i64 = 1_709_640_000_000;

pub fn clock() -> FixedClock {
    FixedClock::from_millis(T0)
}

pub fn clock_at(offset_millis: i64) -> FixedClock {
    FixedClock::from_millis(T0 + offset_millis)
}

/// Builder for throwaway project trees.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parents.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.dir.path().join(rel)).unwrap();
        self
    }

    pub fn manifest(self, json: &str) -> Self {
        self.file("package.json", json)
    }

    pub fn guides(&self) -> GuideSet {
        GuideSet::new(self.root(), &LayoutConfig::default())
    }

    pub fn store(&self) -> SnippetStore {
        let config = GuidebookConfig::default();
        SnippetStore::new(self.root(), &config.layout, &config.notes)
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).unwrap()
    }
}

/// A small Next.js App Router project with Tailwind, Zustand and axios.
pub fn next_app() -> Fixture {
    Fixture::new()
        .manifest(
            r#"{
                "name": "storefront",
                "description": "Online store",
                "dependencies": {
                    "next": "14.0.0",
                    "react": "18.2.0",
                    "zustand": "4.4.0",
                    "axios": "1.6.0"
                },
                "devDependencies": { "tailwindcss": "3.4.0" },
                "scripts": { "dev": "next dev", "build": "next build" }
            }"#,
        )
        .file("src/app/page.tsx", "export default function Home() { return null }\n")
        .file("src/app/cart/page.tsx", "export default function Cart() { return null }\n")
        .file(
            "src/components/Button.tsx",
            "import { cn } from '@/lib/cn';\n\nexport const Button = () => {\n  return null;\n};\n",
        )
        .file("src/components/Button.module.css", ".root {}\n")
        .file("src/components/Button.test.tsx", "test('x', () => {});\n")
        .file("src/hooks/useCart.ts", "import { useState } from 'react';\nexport function useCart() { const [a] = useState(0); useEffect(() => {}); return a; }\n")
        .file("src/lib/api.ts", "import axios from 'axios';\nexport const api = axios.create();\n")
        .file("node_modules/next/index.js", "")
}

pub fn snippet(category: &str, title: &str) -> EntryDraft {
    EntryDraft {
        category: category.into(),
        title: title.into(),
        description: format!("{title} description"),
        code: "export const x = 1;".into(),
        language: None,
        tags: vec!["react".into()],
        notes: None,
    }
}
