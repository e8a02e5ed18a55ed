use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn play(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_critter-match"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch critter-match");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write player input");
    child.wait_with_output().expect("critter-match did not finish")
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn seeded_game_draws_the_board_and_quits() {
    let output = play(&["--seed", "3", "--size", "5"], "hint\nquit\n");
    let stdout = text(&output.stdout);

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert!(stdout.contains("score: 0"));
    assert!(stdout.contains("try swapping"));
}

#[test]
fn same_seed_prints_the_same_board() {
    let first = play(&["--seed", "11"], "quit\n");
    let second = play(&["--seed", "11"], "quit\n");

    assert_eq!(text(&first.stdout), text(&second.stdout));
}

#[test]
fn undersized_board_is_refused() {
    let output = play(&["--size", "2"], "");

    assert!(!output.status.success());
    assert!(text(&output.stderr).contains("invalid board configuration"));
}

#[test]
fn oversized_board_is_refused_without_panicking() {
    let output = play(&["--size", "4000000000"], "");
    let stderr = text(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid board configuration"));
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

#[test]
fn unknown_kind_is_refused() {
    let output = play(&["--kinds", "sheep,unicorn,dino"], "");

    assert!(!output.status.success());
    assert!(text(&output.stderr).contains("unicorn"));
}
