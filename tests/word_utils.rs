use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use textnav::paragraph::{InlineTextNode, NodeGroupItem, StaticTextNode};
use textnav::word_utils::{next_word_end, next_word_start, word_ends, word_starts};

fn single_child_group(name: &str, starts: &[usize], ends: &[usize]) -> NodeGroupItem {
    let child = InlineTextNode::new(name, 0)
        .with_word_starts(starts)
        .with_word_ends(ends);
    NodeGroupItem::new(StaticTextNode::new(name, vec![child]), 0)
}

fn two_child_group() -> NodeGroupItem {
    let first = InlineTextNode::new("kitty cat ", 0)
        .with_word_starts([0, 6])
        .with_word_ends([5, 9]);
    let second = InlineTextNode::new("is cute", 1)
        .with_word_starts([0, 3])
        .with_word_ends([2, 7]);
    NodeGroupItem::new(
        StaticTextNode::new("kitty cat is cute", vec![first, second]),
        0,
    )
}

#[test]
fn next_word_start_without_hints() {
    let empty = NodeGroupItem::default();
    for group in [None, Some(&empty)] {
        assert_eq!(next_word_start("kitty cat", 0, group), 0);
        assert_eq!(next_word_start(" kitty cat", 0, group), 1);
        assert_eq!(next_word_start("kitty cat", 5, group), 6);
        assert_eq!(next_word_start("kitty cat", 6, group), 6);
        assert_eq!(next_word_start("kitty \"cat\"", 5, group), 7);
    }
}

#[test]
fn next_word_end_without_hints() {
    assert_eq!(next_word_end("kitty cat", 0, None), 5);
    assert_eq!(next_word_end(" kitty cat", 0, None), 6);
    assert_eq!(next_word_end("kitty cat", 6, None), 9);
    assert_eq!(next_word_end("kitty cat", 7, None), 9);
}

#[test]
fn next_word_start_with_hints() {
    let mut group = single_child_group("kitty cat", &[0, 6], &[]);
    assert_eq!(next_word_start("kitty cat", 0, Some(&group)), 0);
    assert_eq!(next_word_start("kitty cat", 5, Some(&group)), 6);
    assert_eq!(next_word_start("kitty cat", 6, Some(&group)), 6);

    group.start_char = 10;
    assert_eq!(next_word_start("once upon kitty cat", 9, Some(&group)), 10);
    assert_eq!(next_word_start("once upon kitty cat", 15, Some(&group)), 16);

    // Without inline children the text itself is scanned.
    group.node.children.clear();
    assert_eq!(
        next_word_start("once upon a kitty cat", 10, Some(&group)),
        10
    );
}

#[test]
fn next_word_start_across_children() {
    let group = two_child_group();
    assert_eq!(next_word_start("kitty cat is cute", 7, Some(&group)), 10);
    assert_eq!(next_word_start("kitty cat is cute", 11, Some(&group)), 13);
}

#[test]
fn next_word_end_with_hints() {
    let mut group = single_child_group("kitty cat", &[], &[5, 9]);
    assert_eq!(next_word_end("kitty cat", 0, Some(&group)), 5);
    assert_eq!(next_word_end("kitty cat", 4, Some(&group)), 5);
    assert_eq!(next_word_end("kitty cat", 5, Some(&group)), 9);
    assert_eq!(next_word_end("kitty cat", 6, Some(&group)), 9);

    group.start_char = 10;
    assert_eq!(next_word_end("once upon kitty cat", 9, Some(&group)), 15);
    assert_eq!(next_word_end("once upon kitty cat", 17, Some(&group)), 19);

    group.node.children.clear();
    assert_eq!(next_word_end("kitty cat", 4, Some(&group)), 5);
}

#[test]
fn next_word_end_across_children() {
    let group = two_child_group();
    assert_eq!(next_word_end("kitty cat is cute", 10, Some(&group)), 12);
    assert_eq!(next_word_end("kitty cat is cute", 13, Some(&group)), 17);
}

#[test]
fn hints_are_ignored_when_inline_text_is_off() {
    let mut group = single_child_group("kitty cat", &[0, 3], &[3, 9]);
    group.has_inline_text = false;
    assert_eq!(next_word_start("kitty cat", 1, Some(&group)), 6);
    assert_eq!(next_word_end("kitty cat", 0, Some(&group)), 5);
}

#[test]
fn exhausted_hints_fall_back_to_end_of_content() {
    let group = single_child_group("kitty cat", &[0, 6], &[5, 9]);
    assert_eq!(next_word_start("kitty cat", 7, Some(&group)), 9);
    assert_eq!(next_word_end("kitty cat", 9, Some(&group)), 9);
}

#[test]
fn index_inside_a_word_moves_to_the_following_word() {
    assert_eq!(next_word_start("kitty cat", 2, None), 6);
    assert_eq!(next_word_start("kitty cat", 4, None), 6);
    assert_eq!(next_word_start("kitty cat", 7, None), 9);

    let group = single_child_group("kitty cat", &[0, 6], &[5, 9]);
    assert_eq!(next_word_start("kitty cat", 2, Some(&group)), 6);
}

#[test]
fn oversized_hint_offsets_are_clamped_to_the_text() {
    let json = r#"{
      "start_char": 18446744073709551615,
      "has_inline_text": true,
      "node": {
        "name": "kitty",
        "children": [
          { "name": "kitty", "word_starts": [0], "word_ends": [5], "index_in_parent": 0 }
        ]
      }
    }"#;
    let group: NodeGroupItem = serde_json::from_str(json).expect("hints should parse");
    assert_eq!(group.start_char, usize::MAX);
    assert_eq!(next_word_start("kitty", 0, Some(&group)), 5);
    assert_eq!(next_word_end("kitty", 0, Some(&group)), 5);
    assert_eq!(word_starts("kitty", Some(&group)).count(), 0);
    assert_eq!(word_ends("kitty", Some(&group)).collect::<Vec<_>>(), vec![5]);

    let group = single_child_group("kitty cat", &[0, usize::MAX], &[usize::MAX]);
    assert_eq!(next_word_start("kitty cat", 1, Some(&group)), 9);
    assert_eq!(next_word_end("kitty cat", 0, Some(&group)), 9);
}

#[test]
fn children_are_ordered_by_index_in_parent() {
    let mut group = two_child_group();
    group.node.children.reverse();
    assert_eq!(next_word_start("kitty cat is cute", 7, Some(&group)), 10);
    assert_eq!(next_word_end("kitty cat is cute", 13, Some(&group)), 17);
}

#[test]
fn boundary_iterators_cover_the_text() {
    assert_eq!(
        word_starts("kitty \"cat\" is cute", None).collect::<Vec<_>>(),
        vec![0, 7, 12, 15]
    );
    assert_eq!(
        word_ends("kitty \"cat\" is cute", None).collect::<Vec<_>>(),
        vec![5, 10, 14, 19]
    );

    let group = two_child_group();
    assert_eq!(
        word_starts("kitty cat is cute", Some(&group)).collect::<Vec<_>>(),
        vec![0, 6, 10, 13]
    );
    assert_eq!(
        word_ends("kitty cat is cute", Some(&group)).collect::<Vec<_>>(),
        vec![5, 9, 12, 17]
    );
}

#[test]
fn empty_text_has_no_boundaries() {
    assert_eq!(next_word_start("", 0, None), 0);
    assert_eq!(next_word_end("", 0, None), 0);
    assert_eq!(word_starts("", None).count(), 0);
    assert_eq!(word_ends("", None).count(), 0);
}

fn random_text(rng: &mut StdRng) -> String {
    const ALPHABET: &[char] = &['a', 'b', 'Z', '9', ' ', ' ', '"', '\'', '.', '-', '\n', 'é'];
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn results_stay_in_bounds_and_advance() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let text = random_text(&mut rng);
        let len = text.chars().count();

        for index in 0..=len {
            let start = next_word_start(&text, index, None);
            assert!(
                start >= index && start <= len,
                "start {start} for {text:?} at {index}"
            );

            let end = next_word_end(&text, index, None);
            assert!(end <= len, "end {end} for {text:?} at {index}");
            if index < len {
                assert!(end > index, "end {end} for {text:?} at {index}");
            }
        }

        let starts: Vec<usize> = word_starts(&text, None).collect();
        assert!(
            starts.windows(2).all(|w| w[0] < w[1]),
            "starts {starts:?} for {text:?}"
        );
        let ends: Vec<usize> = word_ends(&text, None).collect();
        assert!(
            ends.windows(2).all(|w| w[0] < w[1]),
            "ends {ends:?} for {text:?}"
        );
        assert_eq!(starts.len(), ends.len(), "word count for {text:?}");
    }
}
