//! Cursor navigation, selection and script insertion tests

use formulate::core::tree::{ElementKind, ListId, TreeItem};
use formulate::{Cursor, Direction, Editor, EditorOptions, Formula, Key};

fn parse(latex: &str) -> Formula {
    Formula::from_latex(latex).unwrap()
}

fn cursor_at(formula: &Formula, pos: usize) -> Cursor {
    let mut cursor = Cursor::new(formula.root());
    cursor.reparent(formula.root(), pos);
    cursor
}

fn cursor_at_end(formula: &Formula) -> Cursor {
    let mut cursor = Cursor::new(formula.root());
    cursor.reparent_end(formula, formula.root());
    cursor
}

/// Exponent and subscript lists of the scripts element at `index` in the root.
fn scripts_at(formula: &Formula, index: usize) -> (Option<ListId>, Option<ListId>) {
    let element = formula.elements(formula.root())[index];
    match formula.kind(element) {
        ElementKind::Scripts(s) => (s.exponent, s.subscript),
        other => panic!("expected scripts, found {}", other.kind_name()),
    }
}

fn check(formula: &Formula, cursor: &Cursor) {
    assert_eq!(formula.check_invariants(), Ok(()));
    cursor.assert_valid(formula);
}

// ============================================================================
// Superscripts and subscripts
// ============================================================================

mod scripts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_empty_superscript() {
        let mut f = parse("x");
        let mut cursor = cursor_at_end(&f);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_add_to_superscript_after() {
        let mut f = parse("x^{2}2");
        let mut cursor = cursor_at_end(&f);
        cursor.handle_movement(&f, Direction::Left, true);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{22}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_add_to_superscript_after_selecting_right() {
        let mut f = parse("x^{2}2");
        let mut cursor = cursor_at(&f, 2);
        cursor.handle_movement(&f, Direction::Right, true);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{22}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_add_to_superscript_before() {
        let mut f = parse("xy^{z}");
        let mut cursor = cursor_at(&f, 1);
        cursor.handle_movement(&f, Direction::Right, true);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{yz}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_add_to_superscript_before_selecting_left() {
        let mut f = parse("xy^{z}");
        let mut cursor = cursor_at(&f, 2);
        cursor.handle_movement(&f, Direction::Left, true);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{yz}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_move_into_existing_superscript() {
        let mut f = parse("x^{2}");
        let mut cursor = cursor_at(&f, 1);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x^{2}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }

    #[test]
    fn test_backspace_out_of_superscript() {
        let mut f = parse("x_{4}^{3}");
        let exponent = scripts_at(&f, 1).0.unwrap();
        let mut cursor = Cursor::new(exponent);
        cursor.backspace(&mut f, Direction::Left);
        assert_eq!(f.to_latex(), "x_{4}3");
        check(&f, &cursor);
    }

    #[test]
    fn test_backspace_out_of_subscript() {
        let mut f = parse("x_{4}^{3}");
        let subscript = scripts_at(&f, 1).1.unwrap();
        let mut cursor = Cursor::new(subscript);
        cursor.backspace(&mut f, Direction::Left);
        assert_eq!(f.to_latex(), "x4^{3}");
        check(&f, &cursor);
    }

    #[test]
    fn test_add_subscript_to_superscript() {
        let mut f = parse("x^{3}");
        let mut cursor = cursor_at_end(&f);
        cursor.insert_superscript_subscript(&mut f, false);
        assert_eq!(f.to_latex(), "x_{}^{3}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).1);
        check(&f, &cursor);
    }

    #[test]
    fn test_superscript_over_selected_scripts() {
        let mut f = parse("x^{2}");
        let mut cursor = cursor_at_end(&f);
        cursor.select_all(&f);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "^{x^{2}}");
        let exponent = scripts_at(&f, 0).0.unwrap();
        assert_eq!((cursor.owner(), cursor.pos()), (exponent, 2));
        check(&f, &cursor);
    }

    #[test]
    fn test_subscript_over_selected_scripts() {
        let mut f = parse("ax_{1}");
        let mut cursor = cursor_at_end(&f);
        cursor.select_all(&f);
        cursor.insert_superscript_subscript(&mut f, false);
        assert_eq!(f.to_latex(), "_{ax_{1}}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 0).1);
        check(&f, &cursor);
    }

    #[test]
    fn test_superscript_with_selection_reaching_out_of_scripts() {
        let mut f = parse("x^{2}");
        let exponent = scripts_at(&f, 1).0.unwrap();
        let mut cursor = Cursor::new(exponent);
        cursor.reparent(exponent, 1);
        for _ in 0..3 {
            cursor.handle_movement(&f, Direction::Left, true);
        }
        assert_eq!(cursor.selection(&f).unwrap().range, 0..2);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "^{x^{2}}");
        check(&f, &cursor);
    }

    #[test]
    fn test_select_all_then_caret_key() {
        let mut editor = Editor::from_latex("x^{2}", EditorOptions::default()).unwrap();
        editor.press(Key::SelectAll);
        editor.type_char('^');
        editor.type_char('3');
        assert_eq!(editor.to_latex(), "^{x^{2}3}");
        check(editor.formula(), editor.cursor());
    }

    #[test]
    fn test_add_superscript_to_subscript() {
        let mut f = parse("x_{3}");
        let mut cursor = cursor_at_end(&f);
        cursor.insert_superscript_subscript(&mut f, true);
        assert_eq!(f.to_latex(), "x_{3}^{}");
        assert_eq!(Some(cursor.owner()), scripts_at(&f, 1).0);
        check(&f, &cursor);
    }
}

// ============================================================================
// Deletion
// ============================================================================

mod deletion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_all_backspace() {
        let mut f = parse("abcd");
        let mut cursor = cursor_at(&f, 2);
        cursor.select_all(&f);
        let removed = cursor.backspace(&mut f, Direction::Left);
        assert_eq!(removed.len(), 4);
        assert_eq!(f.len(f.root()), 0);
        check(&f, &cursor);
    }

    #[test]
    fn test_backspace() {
        let mut f = parse("abcd");
        let mut cursor = cursor_at(&f, 2);
        cursor.backspace(&mut f, Direction::Left);
        assert_eq!(f.to_latex(), "acd");
        assert_eq!(cursor.pos(), 1);
        check(&f, &cursor);
    }

    #[test]
    fn test_delete_forward() {
        let mut f = parse("abcd");
        let mut cursor = cursor_at(&f, 2);
        cursor.backspace(&mut f, Direction::Right);
        assert_eq!(f.to_latex(), "abd");
        assert_eq!(cursor.pos(), 2);
        check(&f, &cursor);
    }

    #[test]
    fn test_backspace_at_root_start_is_noop() {
        let mut f = parse("ab");
        let mut cursor = cursor_at(&f, 0);
        cursor.backspace(&mut f, Direction::Left);
        assert_eq!(f.to_latex(), "ab");
        assert_eq!(cursor.pos(), 0);
    }
}

// ============================================================================
// Movement and selection
// ============================================================================

mod movement {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_walk_through_fraction() {
        let f = parse(r"a\frac{b}{c}d");
        let frac = f.elements(f.root())[1];
        let lists = f.lists(frac);
        let mut cursor = cursor_at(&f, 1);

        assert!(cursor.handle_movement(&f, Direction::Right, false));
        assert_eq!((cursor.owner(), cursor.pos()), (lists[0], 0));
        assert!(cursor.handle_movement(&f, Direction::Right, false));
        assert_eq!((cursor.owner(), cursor.pos()), (lists[0], 1));
        assert!(cursor.handle_movement(&f, Direction::Right, false));
        assert_eq!((cursor.owner(), cursor.pos()), (lists[1], 0));
        assert!(cursor.handle_movement(&f, Direction::Right, false));
        assert!(cursor.handle_movement(&f, Direction::Right, false));
        assert_eq!((cursor.owner(), cursor.pos()), (f.root(), 2));
    }

    #[test]
    fn test_enter_from_the_right_lands_at_end() {
        let f = parse(r"\sqrt{xy}");
        let radicand = f.lists(f.elements(f.root())[0])[0];
        let mut cursor = cursor_at_end(&f);
        cursor.handle_movement(&f, Direction::Left, false);
        assert_eq!((cursor.owner(), cursor.pos()), (radicand, 2));
    }

    #[test]
    fn test_nth_root_visits_index_first() {
        let f = parse(r"\sqrt[3]{x}");
        let root_elem = f.elements(f.root())[0];
        let lists = f.lists(root_elem);
        let mut cursor = cursor_at(&f, 0);
        cursor.handle_movement(&f, Direction::Right, false);
        assert_eq!(cursor.owner(), lists[0]);
        assert_eq!(f.list_to_latex(lists[0]), "3");
    }

    #[test]
    fn test_selection_widens_to_enclosing_element() {
        let f = parse(r"a\frac{b}{c}d");
        let frac = f.elements(f.root())[1];
        let numerator = f.lists(frac)[0];
        let mut cursor = cursor_at(&f, 0);
        cursor.handle_movement(&f, Direction::Right, true);
        cursor.handle_movement(&f, Direction::Right, true);
        assert_eq!(cursor.owner(), numerator);

        let selection = cursor.selection(&f).unwrap();
        assert_eq!(selection.list, f.root());
        assert_eq!(selection.range, 0..2);
        assert_eq!(cursor.copy_selection(&f), r"a\frac{b}{c}");
    }

    #[test]
    fn test_selection_started_inside_element() {
        let f = parse(r"a\frac{b}{c}d");
        let frac = f.elements(f.root())[1];
        let denominator = f.lists(frac)[1];
        let mut cursor = Cursor::new(denominator);
        cursor.reparent(denominator, 1);
        cursor.handle_movement(&f, Direction::Right, true);
        cursor.handle_movement(&f, Direction::Right, true);
        assert_eq!((cursor.owner(), cursor.pos()), (f.root(), 3));
        assert_eq!(cursor.selection(&f).unwrap().range, 1..3);
    }

    #[test]
    fn test_plain_move_clears_selection() {
        let f = parse("abc");
        let mut cursor = cursor_at(&f, 1);
        cursor.handle_movement(&f, Direction::Right, true);
        assert!(cursor.is_selecting());
        cursor.handle_movement(&f, Direction::Right, false);
        assert!(!cursor.is_selecting());
        assert_eq!(cursor.secondary(), None);
    }

    #[test]
    fn test_selection_across_common_ancestor() {
        let f = parse(r"x\abs{3}-3\sqrt{\frac{2}{x}}+4");
        let root = f.root();
        let argument = f.lists(f.elements(root)[1])[0];
        let radicand = f.lists(f.elements(root)[4])[0];
        let denominator = f.lists(f.elements(radicand)[0])[1];

        let mut cursor = Cursor::new(root);
        cursor.mouse_select(&f, TreeItem::List(argument), Direction::Left, false);
        cursor.mouse_select(&f, TreeItem::List(denominator), Direction::Right, true);
        let selection = cursor.selection(&f).unwrap();
        assert_eq!((selection.list, selection.range), (root, 1..5));

        let mut cursor = Cursor::new(root);
        cursor.mouse_select(&f, TreeItem::List(denominator), Direction::Right, false);
        cursor.mouse_select(&f, TreeItem::List(argument), Direction::Left, true);
        let selection = cursor.selection(&f).unwrap();
        assert_eq!((selection.list, selection.range), (root, 1..5));
        assert_eq!(cursor.copy_selection(&f), r"\abs{3}-3\sqrt{\frac{2}{x}}");
    }
}
