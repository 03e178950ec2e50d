mod helpers;

use guidebook::error::GuideError;
use guidebook::notes::{Category, EntryDraft};
use helpers::{clock, clock_at, snippet, Fixture};

#[test]
fn added_entry_reads_back_unchanged() {
    let fx = Fixture::new();
    let store = fx.store();
    let draft = EntryDraft {
        language: Some("tsx".into()),
        notes: Some("Prefer composition.".into()),
        code: "export function Card({ children }) {\n  return <div>{children}</div>;\n}\n".into(),
        ..snippet("component", "Card Shell")
    };
    store.add(&draft, &clock()).unwrap();

    let entries = store.get(Category::Component).unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, "card-shell");
    assert_eq!(entry.title, draft.title);
    assert_eq!(entry.description, draft.description);
    assert_eq!(entry.code, draft.code);
    assert_eq!(entry.language, "tsx");
    assert_eq!(entry.tags, draft.tags);
    assert_eq!(entry.notes, draft.notes);
}

#[test]
fn default_language_fills_missing_language() {
    let fx = Fixture::new();
    let store = fx.store();
    store.add(&snippet("function", "Format price"), &clock()).unwrap();
    assert_eq!(store.get(Category::Function).unwrap()[0].language, "typescript");
}

#[test]
fn invalid_category_has_no_side_effects() {
    let fx = Fixture::new();
    let err = fx.store().add(&snippet("widget", "Nope"), &clock()).unwrap_err();

    assert!(matches!(err, GuideError::InvalidInput(_)));
    assert!(!fx.root().join(".vscode").exists());
}

#[test]
fn hook_slug_and_index_listing() {
    let fx = Fixture::new();
    let store = fx.store();
    let path = store.add(&snippet("hook", "useDebounce Hook"), &clock()).unwrap();

    assert!(path.ends_with(".vscode/personal-notes/hook/usedebounce-hook.md"));
    let index = store.scan_index().unwrap();
    assert_eq!(index.count(Category::Hook), 1);
    assert_eq!(index.total_count, 1);

    let readme = fx.read(".vscode/personal-notes/README.md");
    assert!(readme.contains("(1)"));
    assert_eq!(readme.matches("- [useDebounce Hook](./hook/usedebounce-hook.md)").count(), 1);
}

#[test]
fn ideographic_titles_get_timestamped_slugs() {
    let fx = Fixture::new();
    let store = fx.store();
    let a = store.add(&snippet("tip", "防抖技巧"), &clock()).unwrap();
    let b = store.add(&snippet("tip", "防抖技巧"), &clock_at(1)).unwrap();

    assert_ne!(a, b);
    assert_eq!(store.get(Category::Tip).unwrap().len(), 2);
}

#[test]
fn search_is_case_insensitive() {
    let fx = Fixture::new();
    let store = fx.store();
    store.add(&snippet("hook", "useDebounce Hook"), &clock()).unwrap();
    store.add(&snippet("style", "Flex center"), &clock_at(1)).unwrap();

    let found = store.search("DEBOUNCE").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "useDebounce Hook");

    assert_eq!(store.search("react").unwrap().len(), 2);
    assert!(store.search("graphql").unwrap().is_empty());
}

#[test]
fn rebuild_is_idempotent() {
    let fx = Fixture::new();
    let store = fx.store();
    store.add(&snippet("solution", "Retry fetch"), &clock()).unwrap();

    store.rebuild_index().unwrap();
    let first = fx.read(".vscode/personal-notes/README.md");
    store.rebuild_index().unwrap();
    assert_eq!(fx.read(".vscode/personal-notes/README.md"), first);
    assert!(!store.index_drifted().unwrap());
}

#[test]
fn hand_deleted_entry_is_dropped_on_rebuild() {
    let fx = Fixture::new();
    let store = fx.store();
    let path = store.add(&snippet("function", "Clamp"), &clock()).unwrap();
    std::fs::remove_file(path).unwrap();

    assert!(store.index_drifted().unwrap());
    let index = store.rebuild_index().unwrap();
    assert_eq!(index.total_count, 0);
    assert!(fx.read(".vscode/personal-notes/README.md").contains("Total entries: 0"));
}

#[test]
fn core_guidelines_lead_the_index() {
    let fx = Fixture::new();
    let store = fx.store();
    store.add(&snippet("tip", "Small PRs"), &clock()).unwrap();
    store.set_core_guidelines("- Never commit secrets").unwrap();

    let guidelines = store.read_core_guidelines().unwrap().found().unwrap();
    assert_eq!(guidelines, "# Core Guidelines\n\n- Never commit secrets\n");

    let readme = fx.read(".vscode/personal-notes/README.md");
    let core = readme.find("CORE_GUIDELINES.md").unwrap();
    let total = readme.find("Total entries").unwrap();
    assert!(core < total);
}

#[test]
fn read_notes_by_category() {
    let fx = Fixture::new();
    let store = fx.store();
    assert!(!store.read_notes(None).unwrap().is_found());

    store.add(&snippet("hook", "useToggle"), &clock()).unwrap();
    let hooks = store.read_notes(Some(Category::Hook)).unwrap().found().unwrap();
    assert!(hooks.contains("## useToggle"));
    assert!(hooks.contains("```typescript\nexport const x = 1;\n```"));
    assert!(!store.read_notes(Some(Category::Style)).unwrap().is_found());
}
