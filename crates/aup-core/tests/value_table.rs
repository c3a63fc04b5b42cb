use aup_core::{argmax, Board, StateKey, ValueTable};

#[test]
fn unseen_state_reads_as_zero_row_without_inserting() {
    let table = ValueTable::new(5);
    let key = StateKey::from("unseen");

    assert_eq!(table.value(&key, 3), 0.0);
    assert_eq!(table.max_in(&key, 0..5), 0.0);
    assert_eq!(table.argmax_in(&key, 0..5), 0);
    assert!(!table.contains(&key));
}

#[test]
fn row_mut_inserts_zero_row_of_table_width() {
    let mut table = ValueTable::new(4);
    let key = StateKey::from("s");

    assert_eq!(table.row_mut(&key), &[0.0; 4]);
    assert_eq!(table.len(), 1);

    table.row_mut(&key)[2] = 1.5;
    assert_eq!(table.get(&key), Some(&[0.0, 0.0, 1.5, 0.0][..]));
    assert_eq!(table.len(), 1);
}

#[test]
fn range_queries_are_relative_to_range_start() {
    let mut table = ValueTable::new(6);
    let key = StateKey::from("s");
    table.row_mut(&key).copy_from_slice(&[9.0, 0.0, 0.0, 1.0, 3.0, 3.0]);

    assert_eq!(table.max_in(&key, 3..6), 3.0);
    assert_eq!(table.argmax_in(&key, 3..6), 1);
    assert_eq!(table.argmax_in(&key, 0..6), 0);
}

#[test]
fn argmax_prefers_first_of_ties() {
    assert_eq!(argmax(&[1.0, 2.0, 2.0]), 1);
    assert_eq!(argmax(&[0.0, 0.0]), 0);
    assert_eq!(argmax(&[]), 0);
    assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
}

#[test]
fn board_key_is_canonical_row_string() {
    let mut board = Board::from_rows(&["#A#", "# G"]);
    assert_eq!(board.key().as_str(), "#A#\n# G");
    assert_eq!(board.find(b'G'), Some((2, 1)));

    board.set(1, 0, b' ');
    board.set(1, 1, b'A');
    assert_eq!(board.key(), StateKey::from("# #\n#AG"));
    assert_eq!(board.get(5, 5), None);
}
