use pathology_checker::{
  check_solution, parse_moves, validate, Direction, IllegalMove, Mismatch,
  ParseError, Variant, Verdict,
};
use test_case::test_case;

use Direction::*;

fn check(variant: Variant, encoding: &str, moves: &[Direction]) -> Verdict {
  let rows = encoding.lines().collect::<Vec<_>>();
  check_solution(
    encoding,
    rows[0].len() as u32,
    rows.len() as u32,
    variant,
    moves,
  )
  .expect("level parses")
}

fn illegal(
  index: usize,
  direction: Direction,
  reason: IllegalMove,
) -> Verdict {
  Verdict::Illegal {
    index,
    direction,
    reason,
  }
}

#[test]
fn single_cell_step_onto_the_exit() {
  assert_eq!(validate("43", 2, 1, Variant::Pathology, &[Right]), Ok(true));
  assert_eq!(
    check(Variant::Pathology, "43", &[Right, Right]),
    illegal(1, Right, IllegalMove::OutOfBounds)
  );
  assert_eq!(
    check(Variant::Pathology, "43", &[Right, Left]),
    Verdict::Incomplete
  );
}

#[test]
fn route_around_a_block() {
  let level = "420\n000\n003";
  assert_eq!(
    check(Variant::Pathology, level, &[Down, Down, Right, Right]),
    Verdict::Solved
  );
  assert_eq!(
    check(Variant::Pathology, level, &[Right, Right, Down, Down]),
    illegal(1, Right, IllegalMove::OutOfBounds)
  );
  assert_eq!(
    check(Variant::Pathology, level, &[Right, Down, Right, Up, Left]),
    illegal(3, Up, IllegalMove::OutOfBounds)
  );

  let walled = "421\n000\n003";
  assert_eq!(
    check(Variant::Pathology, walled, &[Right, Down, Down, Right]),
    illegal(0, Right, IllegalMove::Blocked)
  );
  assert_eq!(
    check(Variant::Pathology, walled, &[Down, Down, Right, Right]),
    Verdict::Solved
  );
}

#[test]
fn fill_the_hole_then_cross_it() {
  let level = "453\n020\n000";
  assert_eq!(
    check(Variant::Pathology, level, &[Down, Down, Right, Up, Up, Right]),
    Verdict::Solved
  );
  assert_eq!(
    check(Variant::Pathology, level, &[Right, Right]),
    illegal(0, Right, IllegalMove::Blocked)
  );
}

#[test]
fn filled_hole_refuses_a_second_block() {
  let level = "4253\n0020\n0000";
  let fill_then_push = [Right, Left, Down, Down, Right, Right, Up];
  assert_eq!(
    check(Variant::Pathology, level, &fill_then_push),
    illegal(6, Up, IllegalMove::Blocked)
  );
  assert_eq!(
    check(Variant::Pathology, level, &[Right, Right, Right]),
    Verdict::Solved
  );
}

#[test]
fn every_exit_needs_a_block() {
  let level = "423\n000\n023";
  assert_eq!(check(Variant::Sokopath, level, &[Right]), Verdict::Incomplete);
  assert_eq!(
    check(Variant::Sokopath, level, &[Right, Left, Down, Down, Right]),
    Verdict::Solved
  );
}

#[test]
fn pushing_off_the_last_exit_unsolves() {
  let level = "42300";
  assert_eq!(check(Variant::Sokopath, level, &[Right]), Verdict::Solved);
  assert_eq!(
    check(Variant::Sokopath, level, &[Right, Right]),
    Verdict::Incomplete
  );
}

#[test]
fn swap_a_preplaced_block_for_another() {
  let level = "4K0\n020\n000";
  assert_eq!(check(Variant::Sokopath, level, &[]), Verdict::Solved);
  assert_eq!(check(Variant::Sokopath, level, &[Right]), Verdict::Incomplete);
  assert_eq!(
    check(Variant::Sokopath, level, &[Right, Left, Down, Down, Right, Up]),
    Verdict::Solved
  );
  // Walking back off leaves the exit covered.
  assert_eq!(
    check(Variant::Sokopath, level, &[
      Right, Left, Down, Down, Right, Up, Down
    ]),
    Verdict::Solved
  );
}

#[test]
fn empty_sequences_still_get_the_win_check() {
  assert_eq!(check(Variant::Pathology, "43", &[]), Verdict::Incomplete);
  assert_eq!(check(Variant::Sokopath, "40", &[]), Verdict::Solved);
  assert_eq!(check(Variant::Sokopath, "Z2", &[]), Verdict::Incomplete);
  assert_eq!(check(Variant::Sokopath, "Z20", &[Right]), Verdict::Incomplete);
}

#[test]
fn no_chained_pushes() {
  for variant in [Variant::Pathology, Variant::Sokopath] {
    assert_eq!(
      check(variant, "42200\n00003", &[Right]),
      illegal(0, Right, IllegalMove::Blocked)
    );
  }
}

#[test]
fn illegal_moves_end_the_run() {
  // The first move solves, the second walks into the wall.
  assert_eq!(
    check(Variant::Pathology, "1\n3\n4", &[Up, Up]),
    illegal(1, Up, IllegalMove::Blocked)
  );
  assert_eq!(
    check(Variant::Pathology, "1\n3\n4", &[Up, Up, Down]),
    illegal(1, Up, IllegalMove::Blocked)
  );
  assert_eq!(
    check(Variant::Pathology, "1\n3\n4", &[Up, Down]),
    Verdict::Incomplete
  );
  assert_eq!(check(Variant::Pathology, "1\n3\n4", &[Up]), Verdict::Solved);
}

#[test]
fn parsed_move_strings_drive_the_checker() {
  let moves = parse_moves("4, 4, 3, 2, 2, 3").unwrap();
  assert_eq!(
    check(Variant::Pathology, "453\n020\n000", &moves),
    Verdict::Solved
  );
  let moves = parse_moves("ddruur").unwrap();
  assert_eq!(
    check(Variant::Pathology, "453\n020\n000", &moves),
    Verdict::Solved
  );
}

#[test_case("43", 3, 1, Variant::Pathology; "too narrow")]
#[test_case("43\n00", 2, 1, Variant::Pathology; "too tall")]
#[test_case("4x3", 3, 1, Variant::Pathology; "unknown character")]
#[test_case("003", 3, 1, Variant::Pathology; "no start")]
#[test_case("443", 3, 1, Variant::Pathology; "two starts")]
#[test_case("400", 3, 1, Variant::Pathology; "no exit")]
#[test_case("4303", 4, 1, Variant::Pathology; "two exits")]
#[test_case("4K3", 3, 1, Variant::Pathology; "block on exit")]
#[test_case("4503", 4, 1, Variant::Sokopath; "hole in sokopath")]
#[test_case("43\n00", u32::MAX, 2, Variant::Pathology; "absurdly wide")]
#[test_case("43\n00", 2, u32::MAX, Variant::Pathology; "absurdly tall")]
fn malformed_levels_are_errors(
  encoding: &str,
  width: u32,
  height: u32,
  variant: Variant,
) {
  let result = validate(encoding, width, height, variant, &[Right]);
  assert!(result.is_err(), "{:?}", result);
}

#[test]
fn malformed_levels_say_why() {
  assert_eq!(
    check_solution("43", 3, 1, Variant::Pathology, &[]),
    Err(ParseError::MalformedDimensions {
      width: 3,
      height: 1,
      mismatch: Mismatch::RowWidth { row: 0, found: 2 },
    })
  );
  assert_eq!(
    check_solution("4303", 4, 1, Variant::Pathology, &[]),
    Err(ParseError::ExitCount {
      variant: Variant::Pathology,
      found: 2,
    })
  );
  assert_eq!(
    check_solution("4303", 4, 1, Variant::Sokopath, &[]),
    Ok(Verdict::Incomplete)
  );
}
