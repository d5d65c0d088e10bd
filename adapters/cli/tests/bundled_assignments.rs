use std::process::{Command, Output};

fn ant_trail(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ant-trail"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to launch ant-trail")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is utf-8")
}

#[test]
fn spiral_solution_reaches_the_goal() {
    let output = ant_trail(&[
        "run",
        "--assignment",
        "assignments/spiral.toml",
        "--program",
        "2(11) 2(10) 12 2(10) 2(11)",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Success! The ant reached the goal."), "{text}");
    assert!(text.contains("(5, 1) up"), "{text}");
}

#[test]
fn encoded_solution_passes_review() {
    let encoded = ant_trail(&[
        "encode",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--program",
        "2(1)",
    ]);
    assert!(encoded.status.success());
    let solution = stdout(&encoded);
    assert!(solution.starts_with("ant:v1:around-the-wall:"), "{solution}");

    let reviewed = ant_trail(&[
        "review",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--solution",
        solution.trim(),
    ]);
    assert!(reviewed.status.success());
    let text = stdout(&reviewed);
    assert!(text.contains("committed 2 of 2 moves"), "{text}");
    assert!(text.trim_end().ends_with("correct"), "{text}");
    assert!(!text.contains("incorrect"), "{text}");
}

#[test]
fn solution_for_another_assignment_is_refused() {
    let encoded = ant_trail(&[
        "encode",
        "--assignment",
        "assignments/spiral.toml",
        "--program",
        "11",
    ]);
    let solution = stdout(&encoded);

    let reviewed = ant_trail(&[
        "review",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--solution",
        solution.trim(),
    ]);
    assert!(!reviewed.status.success());
}

#[test]
fn unknown_move_in_program_text_fails() {
    let output = ant_trail(&[
        "run",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--program",
        "1 99",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("program rejected"), "{stderr}");
}

#[test]
fn oversized_repeat_count_is_refused_without_expanding() {
    let output = ant_trail(&[
        "run",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--program",
        "4000000000(2 1)",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("limit is 100"), "{stderr}");
}

#[test]
fn repeat_count_at_the_limit_halts_early() {
    let output = ant_trail(&[
        "run",
        "--assignment",
        "assignments/around-the-wall.toml",
        "--program",
        "100(1 2)",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("The ant got stuck in a loop!"), "{text}");
}
