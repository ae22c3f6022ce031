use super::*;

fn simple_tree() -> GameTree {
    GameTree::from_levels(
        6,
        true,
        &[
            &[-8, -2],
            &[-1, 7, 8, 2],
            &[-5, -4, -6, -2, -7, -8, -4, -4],
        ],
    )
    .unwrap()
}

#[test]
fn test_labels_follow_child_positions() {
    let tree = simple_tree();
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.find("01").unwrap().value(), 7);
    assert_eq!(tree.find("110").unwrap().value(), -4);
    assert!(!tree.find("0").unwrap().is_player1());
    assert!(tree.find("00").unwrap().is_player1());
    assert_eq!(
        tree.find("2"),
        Err(GameTreeError::UnknownLabel("2".to_string()))
    );
}

#[test]
fn test_minimax_value_of_simple_tree() {
    let tree = simple_tree();
    assert_eq!(tree.minimax_value("").unwrap(), -5);
    assert_eq!(tree.minimax_value("0").unwrap(), -5);
    assert_eq!(tree.minimax_value("1").unwrap(), -4);
}

#[test]
fn test_moves_are_ordered_for_the_mover() {
    let mut tree = simple_tree();
    let root = tree.root_move();

    let moves = tree.generate_moves(&root);
    let labels: Vec<&str> = moves.iter().map(|mv| tree.label(mv)).collect();
    // player two prefers the lower value
    assert_eq!(labels, vec!["0", "1"]);

    tree.make_internal_move(&moves[1]).unwrap();
    let replies = tree.generate_moves(&moves[1]);
    let labels: Vec<&str> = replies.iter().map(|mv| tree.label(mv)).collect();
    assert_eq!(labels, vec!["10", "11"]);
}

#[test]
fn test_make_and_undo_restore_hash() {
    let mut tree = simple_tree();
    let start = tree.hash_key();
    let a = tree.find("0").unwrap();
    let b = tree.find("01").unwrap();

    tree.make_internal_move(&a).unwrap();
    let after_a = tree.hash_key();
    tree.make_internal_move(&b).unwrap();
    assert_eq!(tree.current_label(), "01");
    assert_ne!(tree.hash_key(), after_a);

    tree.undo_internal_move(&b).unwrap();
    assert_eq!(tree.hash_key(), after_a);
    tree.undo_internal_move(&a).unwrap();
    assert_eq!(tree.hash_key(), start);
    assert_eq!(tree.current_label(), "");
}

#[test]
fn test_illegal_make_and_undo_are_rejected() {
    let mut tree = simple_tree();
    let grandchild = tree.find("01").unwrap();
    assert!(matches!(
        tree.make_internal_move(&grandchild),
        Err(GameTreeError::NotAChild { .. })
    ));
    assert!(matches!(
        tree.undo_internal_move(&grandchild),
        Err(GameTreeError::NotCurrent { .. })
    ));
}

#[test]
fn test_uneven_level_is_rejected() {
    let result = GameTree::from_levels(0, true, &[&[1, 2], &[3, 4, 5]]);
    assert!(matches!(result, Err(GameTreeError::UnevenLevel { level: 1, .. })));
}

#[test]
fn test_random_tree_is_reproducible() {
    let a = GameTree::random(3, 3, 50, 11);
    let b = GameTree::random(3, 3, 50, 11);
    assert_eq!(a.len(), 1 + 3 + 9 + 27);
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(a.minimax_value("").unwrap(), b.minimax_value("").unwrap());
}

#[test]
fn test_random_tree_ignores_sign_of_max_value() {
    let negative = GameTree::random(2, 3, -7, 4);
    let positive = GameTree::random(2, 3, 7, 4);
    assert_eq!(negative.to_string(), positive.to_string());

    let flat = GameTree::random(2, 2, 0, 4);
    assert_eq!(flat.minimax_value("").unwrap(), 0);
}

#[test]
fn test_wide_trees_get_unambiguous_labels() {
    let tree = GameTree::random(2, 12, 10, 3);
    assert!(tree.find("[11]").is_ok());
    assert!(tree.find("1[11]").is_ok());
    assert!(tree.find("[11]1").is_ok());
    assert_eq!(tree.len(), 1 + 12 + 144);
}

#[test]
fn test_urgent_moves_and_jeopardy() {
    let mut tree = simple_tree();
    tree.mark_urgent("1").unwrap();
    tree.mark_jeopardy("0").unwrap();

    let root = tree.root_move();
    let urgent = tree.generate_urgent_moves(&root);
    assert_eq!(urgent.len(), 1);
    assert_eq!(tree.label(&urgent[0]), "1");

    let a = tree.find("0").unwrap();
    assert!(!tree.in_jeopardy(&root));
    tree.make_internal_move(&a).unwrap();
    assert!(tree.in_jeopardy(&a));
}

#[test]
fn test_add_child() {
    let mut tree = GameTree::new(0, false);
    assert_eq!(tree.add_child("", 3).unwrap(), "0");
    assert_eq!(tree.add_child("0", -1).unwrap(), "00");
    assert!(tree.add_child("9", 1).is_err());
    assert!(!tree.find("00").unwrap().is_player1());
}
