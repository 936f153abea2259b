//! Integration tests for Symdex

use symdex::{Entry, Index, MalformedIndexError, QueryEngine, SearchOptions};
use tempfile::TempDir;

/// Build the index a documentation run over a small container library
/// would produce: a mix of unique keys and overloaded ones.
fn build_sample_index() -> Index {
    let mut index = Index::new();

    index
        .insert(
            "pointer_cast",
            Entry::new(
                "pointer_cast",
                "bit::stl::casts",
                "../d4/dc0/namespacebit_1_1stl_1_1casts.html#a893",
            ),
        )
        .unwrap();

    for (label, anchor) in [
        ("pointer_wrapper()=default", "#ab55"),
        ("pointer_wrapper(in_place_t, Args &amp;&amp;...args) noexcept", "#a7fc"),
        ("pointer_wrapper(const pointer_wrapper &amp;other)=default", "#aafa"),
        ("pointer_wrapper(pointer_wrapper &amp;&amp;other)=default", "#a47e"),
        ("pointer_wrapper(const pointer_wrapper&lt; U &gt; &amp;other)", "#a144"),
        ("pointer_wrapper(pointer_wrapper&lt; U &gt; &amp;&amp;other)", "#abac"),
    ] {
        index
            .insert(
                "pointer_wrapper",
                Entry::new(
                    label,
                    "bit::stl::pointer_wrapper",
                    format!("../d6/dde/classbit_1_1stl_1_1pointer__wrapper.html{}", anchor),
                ),
            )
            .unwrap();
    }

    index
        .insert(
            "pop",
            Entry::new(
                "pop()",
                "bit::stl::circular_queue",
                "../dc/dfe/classbit_1_1stl_1_1circular__queue.html#aa97",
            ),
        )
        .unwrap();

    for scope in [
        "bit::stl::circular_array",
        "bit::stl::circular_buffer",
        "bit::stl::circular_deque",
    ] {
        index
            .insert("pop_back", Entry::new("pop_back()", scope, format!("../x/{}.html#pb", scope)))
            .unwrap();
        index
            .insert("pop_front", Entry::new("pop_front()", scope, format!("../x/{}.html#pf", scope)))
            .unwrap();
    }

    index
        .insert(
            "push",
            Entry::new(
                "push()",
                "bit::stl::circular_queue",
                "../dc/dfe/classbit_1_1stl_1_1circular__queue.html#a123",
            ),
        )
        .unwrap();

    index
}

#[test]
fn test_full_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("symdex.idx");

    // Build and persist the index, as the documentation build would
    let index = build_sample_index();
    index.save(&index_path).unwrap();

    // Load it back the way the search client does at startup
    let loaded = Index::load(&index_path).unwrap();
    assert_eq!(loaded.len(), index.len());

    // Query it
    let engine = QueryEngine::new(loaded);
    let groups = engine.search("pop", &SearchOptions::default());

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["pop", "pop_back", "pop_front"]);
}

#[test]
fn test_round_trip_preserves_orders_and_content() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("symdex.idx");

    let index = build_sample_index();
    index.save(&index_path).unwrap();
    let loaded = Index::load(&index_path).unwrap();

    // Key order, entry order, and exact string content all survive,
    // including escaped markup in overload labels.
    assert_eq!(loaded.records(), index.records());
    assert_eq!(
        loaded.lookup("pointer_wrapper")[1].label,
        "pointer_wrapper(in_place_t, Args &amp;&amp;...args) noexcept"
    );
}

#[test]
fn test_lookup_returns_built_entries_in_order() {
    let index = build_sample_index();

    let entries = index.lookup("pop_back");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].scope, "bit::stl::circular_array");
    assert_eq!(entries[1].scope, "bit::stl::circular_buffer");
    assert_eq!(entries[2].scope, "bit::stl::circular_deque");

    assert!(index.lookup("absent").is_empty());
}

#[test]
fn test_substring_search_excludes_non_matches() {
    let engine = QueryEngine::new(build_sample_index());

    let groups = engine.search("pop", &SearchOptions::default());
    assert!(groups.iter().all(|g| g.key.contains("pop")));
    assert!(!groups.iter().any(|g| g.key == "push"));
}

#[test]
fn test_overload_group_survives_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("symdex.idx");

    build_sample_index().save(&index_path).unwrap();
    let engine = QueryEngine::new(Index::load(&index_path).unwrap());

    let groups = engine.search("pointer_wrapper", &SearchOptions::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].rows.len(), 6);

    // Each sub-row is scope-qualified and distinct
    for row in &groups[0].rows {
        assert!(row.label.starts_with("bit::stl::pointer_wrapper::pointer_wrapper"));
    }
    let unique: std::collections::HashSet<&str> =
        groups[0].rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(unique.len(), 6);
}

#[test]
fn test_search_is_idempotent_over_frozen_index() {
    let engine = QueryEngine::new(build_sample_index());

    let first = engine.search("po", &SearchOptions::default());
    let second = engine.search("po", &SearchOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_empty_and_unmatched_queries() {
    let engine = QueryEngine::new(build_sample_index());

    assert!(engine.search("", &SearchOptions::default()).is_empty());
    assert!(engine
        .search("zzz_not_present", &SearchOptions::default())
        .is_empty());
}

#[test]
fn test_concurrent_searches_share_the_index() {
    // Overlapping rapid keystrokes read the same frozen index without
    // locking; each search owns its result vector.
    let engine = std::sync::Arc::new(QueryEngine::new(build_sample_index()));

    let handles: Vec<_> = ["po", "pop", "pop_", "pointer"]
        .into_iter()
        .map(|query| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.search(query, &SearchOptions::default()))
        })
        .collect();

    for handle in handles {
        assert!(!handle.join().unwrap().is_empty());
    }
}

#[test]
fn test_malformed_index_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("symdex.idx");

    std::fs::write(
        &index_path,
        concat!(
            "{\"magic\":\"symdex\",\"version\":1,\"records\":1}\n",
            "{\"key\":\"pop\",\"entries\":[]}\n",
        ),
    )
    .unwrap();

    let err = Index::load(&index_path).unwrap_err();
    assert!(matches!(err, MalformedIndexError::EmptyEntries { .. }));
}

#[test]
fn test_truncated_index_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("symdex.idx");

    // Write a valid index, then chop off its last record and footer
    build_sample_index().save(&index_path).unwrap();
    let text = std::fs::read_to_string(&index_path).unwrap();
    let truncated: Vec<&str> = text.lines().take(3).collect();
    std::fs::write(&index_path, truncated.join("\n")).unwrap();

    let err = Index::load(&index_path).unwrap_err();
    assert!(matches!(err, MalformedIndexError::RecordCountMismatch { .. }));
}
