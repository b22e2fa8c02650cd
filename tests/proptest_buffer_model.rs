//! Property-based tests pitting the piece-table buffer against a plain
//! string model.
//!
//! The master property: after any sequence of valid inserts and deletes,
//! materializing the buffer yields exactly the text produced by applying
//! the same operations to an ordinary `String`.

use proptest::prelude::*;
use quilt::{Buffer, Editor};

/// A single edit with position material drawn independently of the evolving
/// document; seeds are mapped onto valid positions at application time.
#[derive(Clone, Debug)]
enum Op {
    Insert { pos_seed: usize, text: String },
    Delete { pos_seed: usize, len_seed: usize },
}

fn ops(text_pattern: &'static str) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (any::<usize>(), text_pattern)
                .prop_map(|(pos_seed, text)| Op::Insert { pos_seed, text }),
            (any::<usize>(), any::<usize>())
                .prop_map(|(pos_seed, len_seed)| Op::Delete { pos_seed, len_seed }),
        ],
        0..48,
    )
}

/// Valid split positions of `model`: every char boundary plus the end.
fn boundaries(model: &str) -> Vec<usize> {
    model
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(model.len()))
        .collect()
}

proptest! {
    /// ASCII edit sequences: buffer text, length, and piece invariants all
    /// track the string model after every operation.
    #[test]
    fn ascii_edits_match_string_model(ops in ops("[ -~]{0,8}")) {
        let mut buffer = Buffer::new();
        let mut model = String::new();

        for op in &ops {
            match op {
                Op::Insert { pos_seed, text } => {
                    let pos = pos_seed % (model.len() + 1);
                    buffer.insert(pos, text).unwrap();
                    model.insert_str(pos, text);
                }
                Op::Delete { pos_seed, len_seed } => {
                    let pos = pos_seed % (model.len() + 1);
                    let n = len_seed % (model.len() - pos + 1);
                    buffer.delete(pos, n).unwrap();
                    model.replace_range(pos..pos + n, "");
                }
            }

            prop_assert_eq!(buffer.to_string(), model.clone());
            prop_assert_eq!(buffer.len(), model.len());
            prop_assert!(
                buffer.pieces().iter().all(|piece| !piece.is_empty()),
                "piece table contains a zero-length piece"
            );
        }
    }

    /// Multibyte edit sequences with positions drawn from the model's char
    /// boundaries behave identically to the string model.
    #[test]
    fn multibyte_edits_match_string_model(ops in ops("[a√é🦀\n]{0,4}")) {
        let mut buffer = Buffer::new();
        let mut model = String::new();

        for op in &ops {
            let valid = boundaries(&model);
            match op {
                Op::Insert { pos_seed, text } => {
                    let pos = valid[pos_seed % valid.len()];
                    buffer.insert(pos, text).unwrap();
                    model.insert_str(pos, text);
                }
                Op::Delete { pos_seed, len_seed } => {
                    let pos = valid[pos_seed % valid.len()];
                    let ends: Vec<usize> =
                        valid.iter().copied().filter(|&b| b >= pos).collect();
                    let end = ends[len_seed % ends.len()];
                    buffer.delete(pos, end - pos).unwrap();
                    model.replace_range(pos..end, "");
                }
            }

            prop_assert_eq!(buffer.to_string(), model.clone());
            prop_assert_eq!(buffer.len(), model.len());
        }
    }

    /// Insert length deltas are exact and no-op inserts change nothing.
    #[test]
    fn insert_length_invariant(
        initial in "[ -~]{0,32}",
        pos_seed in any::<usize>(),
        text in "[ -~]{0,16}",
    ) {
        let mut buffer = Buffer::with_text(&initial);
        let pos = pos_seed % (initial.len() + 1);
        let before = buffer.len();

        buffer.insert(pos, &text).unwrap();
        prop_assert_eq!(buffer.len(), before + text.len());

        let snapshot = buffer.to_string();
        buffer.insert(pos, "").unwrap();
        prop_assert_eq!(buffer.to_string(), snapshot);
        prop_assert_eq!(buffer.len(), before + text.len());
    }

    /// Out-of-range operations are rejected and leave the buffer unchanged.
    #[test]
    fn out_of_range_edits_are_rejected(
        initial in "[ -~]{0,32}",
        excess in 1usize..64,
        n in 0usize..8,
    ) {
        let mut buffer = Buffer::with_text(&initial);
        let snapshot = buffer.to_string();

        prop_assert!(buffer.insert(initial.len() + excess, "x").is_err());
        prop_assert!(buffer.delete(initial.len() + excess, n).is_err());
        prop_assert!(buffer.delete(0, initial.len() + excess).is_err());
        prop_assert_eq!(buffer.to_string(), snapshot);
    }

    /// Backward search agrees with a byte scan over the materialized text.
    #[test]
    fn find_backwards_matches_model(ops in ops("[ab\n]{0,6}"), pos_seed in any::<usize>()) {
        let (buffer, model) = replay_ascii(&ops);
        let pos = pos_seed % (model.len() + 2); // also probe past the end
        let expected = model
            .bytes()
            .enumerate()
            .take(pos + 1)
            .rev()
            .find(|&(_, b)| b == b'\n')
            .map(|(i, _)| i);
        prop_assert_eq!(buffer.find_backwards(pos, '\n'), expected);
    }

    /// Forward search agrees with a byte scan over the materialized text.
    #[test]
    fn find_forwards_matches_model(ops in ops("[ab\n]{0,6}"), pos_seed in any::<usize>()) {
        let (buffer, model) = replay_ascii(&ops);
        let pos = pos_seed % (model.len() + 2);
        let expected = model
            .bytes()
            .enumerate()
            .skip(pos)
            .find(|&(_, b)| b == b'\n')
            .map(|(i, _)| i);
        prop_assert_eq!(buffer.find_forwards(pos, '\n'), expected);
    }

    /// The cursor stays clamped to the document under any motion sequence,
    /// and huge motions land exactly on the buffer ends.
    #[test]
    fn editor_cursor_stays_clamped(
        initial in "[ -~\n]{0,32}",
        motions in prop::collection::vec((0usize..4, 0usize..40), 0..32),
    ) {
        let mut editor = Editor::with_text(&initial);
        for (kind, n) in motions {
            match kind {
                0 => editor.forward(n),
                1 => editor.backward(n),
                2 => editor.forward_line(n),
                _ => editor.backward_line(n),
            }
            prop_assert!(editor.position() <= editor.len());
        }

        editor.backward(usize::MAX);
        prop_assert_eq!(editor.position(), 0);
        editor.forward(usize::MAX);
        prop_assert_eq!(editor.position(), editor.len());
    }
}

fn replay_ascii(ops: &[Op]) -> (Buffer, String) {
    let mut buffer = Buffer::new();
    let mut model = String::new();
    for op in ops {
        match op {
            Op::Insert { pos_seed, text } => {
                let pos = pos_seed % (model.len() + 1);
                buffer.insert(pos, text).unwrap();
                model.insert_str(pos, text);
            }
            Op::Delete { pos_seed, len_seed } => {
                let pos = pos_seed % (model.len() + 1);
                let n = len_seed % (model.len() - pos + 1);
                buffer.delete(pos, n).unwrap();
                model.replace_range(pos..pos + n, "");
            }
        }
    }
    (buffer, model)
}
