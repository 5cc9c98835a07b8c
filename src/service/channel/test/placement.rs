use super::*;
use std::collections::HashMap;

/// Tests thread kinds never appear as tree nodes.
///
/// Threads present in the channel cache are excluded from both category
/// children and `others`.
///
/// Expected: only the parent text channel is captured
#[tokio::test]
async fn threads_are_not_tree_nodes() -> Result<(), SnapshotError> {
    let mut source = FakeGuildSource::new(1);
    let mut orphan_thread = thread(4, "orphan-thread", ChannelKind::PrivateThread, 999);
    orphan_thread.parent_id = None;
    source.channels = vec![
        category(10, "Chat", 0),
        text_channel(11, "general", 0, Some(10)),
        thread(2, "public-thread", ChannelKind::PublicThread, 11),
        thread(3, "news-thread", ChannelKind::NewsThread, 11),
        orphan_thread,
    ];

    let tree = capture(&source).await?;

    assert_eq!(names(&tree.categories[0].children), vec!["general"]);
    assert!(tree.others.is_empty());

    Ok(())
}

/// Tests every non-thread channel is placed exactly once.
///
/// Expected: each channel name appears once across categories and others
#[tokio::test]
async fn every_channel_placed_exactly_once() -> Result<(), SnapshotError> {
    let mut source = FakeGuildSource::new(1);
    source.channels = vec![
        category(10, "One", 0),
        category(20, "Two", 1),
        text_channel(11, "one-a", 0, Some(10)),
        voice_channel(12, "one-b", 1, Some(10)),
        text_channel(21, "two-a", 3, Some(20)),
        text_channel(31, "free-a", 5, None),
        voice_channel(32, "free-b", 6, None),
        thread(40, "a-thread", ChannelKind::PublicThread, 11),
    ];

    let tree = capture(&source).await?;

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for entry in tree.iter_channels() {
        *seen.entry(entry.name()).or_default() += 1;
    }

    for expected in ["one-a", "one-b", "two-a", "free-a", "free-b"] {
        assert_eq!(seen.get(expected), Some(&1), "{expected}");
    }
    assert_eq!(seen.len(), 5);

    Ok(())
}

/// Tests a channel whose parent category is not cached lands in `others`.
///
/// Expected: channel kept as a top level entry instead of being dropped
#[tokio::test]
async fn channel_with_uncached_parent_goes_to_others() -> Result<(), SnapshotError> {
    let mut source = FakeGuildSource::new(1);
    source.channels = vec![
        text_channel(11, "stray", 1, Some(404)),
        text_channel(12, "free", 0, None),
    ];

    let tree = capture(&source).await?;

    assert!(tree.categories.is_empty());
    assert_eq!(names(&tree.others), vec!["free", "stray"]);

    Ok(())
}

/// Tests equal positions fall back to id order for deterministic output.
#[tokio::test]
async fn equal_positions_ordered_by_id() -> Result<(), SnapshotError> {
    let mut source = FakeGuildSource::new(1);
    source.channels = vec![
        voice_channel(9, "voice", 0, None),
        text_channel(3, "text", 0, None),
    ];

    let tree = capture(&source).await?;

    assert_eq!(names(&tree.others), vec!["text", "voice"]);

    Ok(())
}
